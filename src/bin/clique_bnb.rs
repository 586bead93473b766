use std::fs;
use std::rc::Rc;

use clap::{App, load_yaml};
use dogs::search_algorithm::{NeverStoppingCriterion, TimeStoppingCriterion};
use tracing::{error, warn};
use tracing_subscriber::EnvFilter;

use max_clique::clique::checker;
use max_clique::dimacs::{read_from_file, DimacsGraph};
use max_clique::search::clique_bnb::clique_bnb;
use max_clique::util::{
    read_params, export_results, csv_line, run_report, solution_path, solution_to_string,
    CSV_HEADER, INVALID_CLIQUE_WARNING,
};


/** solves each given instance with the branch & bound and reports the cliques found. */
pub fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();
    // parse arguments
    let yaml = load_yaml!("clique_bnb.yml");
    let main_args = App::from_yaml(yaml).get_matches();
    let params = match read_params(&main_args) {
        Ok(params) => params,
        Err(e) => {
            error!("{}", e);
            std::process::exit(2);
        }
    };
    if let Some(dir) = &params.solution_dir {
        if let Err(e) = fs::create_dir_all(dir) {
            error!("unable to create {}: {}", dir, e);
            std::process::exit(2);
        }
    }
    let mut csv = String::from(CSV_HEADER);
    let mut reports = Vec::new();
    for inst_filename in &params.instances {
        println!("=======================");
        println!("reading instance: {}...", inst_filename);
        let DimacsGraph { graph, nb_skipped_lines, .. } = match read_from_file(inst_filename) {
            Ok(instance) => instance,
            Err(e) => {
                error!("{}", e);
                continue;
            }
        };
        if nb_skipped_lines > 0 {
            warn!("{} lines skipped in {}", nb_skipped_lines, inst_filename);
        }
        graph.display_statistics();
        let inst = Rc::new(graph);
        // solve it
        let solution = match params.time_limit {
            None => clique_bnb(inst.clone(), params.bnb.clone(), NeverStoppingCriterion::default()),
            Some(t) => clique_bnb(inst.clone(), params.bnb.clone(), TimeStoppingCriterion::new(t)),
        };
        let is_valid = checker(&inst, &solution.clique).is_ok();
        if !is_valid {
            println!("{}", INVALID_CLIQUE_WARNING);
            csv += INVALID_CLIQUE_WARNING;
            csv += "\n";
        }
        csv += csv_line(inst_filename, &solution).as_str();
        println!(
            "{}, result - {}, time - {:.6}{}",
            inst_filename, solution.size(), solution.time_searched,
            if solution.is_optimal { "" } else { " (time limit reached)" }
        );
        // export solution
        if let Some(dir) = &params.solution_dir {
            let filename = solution_path(dir, inst_filename);
            if let Err(e) = fs::write(&filename, solution_to_string(&solution.clique)) {
                error!("unable to write the solution in {}: {}", filename, e);
            }
        }
        reports.push(run_report(inst_filename, &solution, nb_skipped_lines, is_valid));
    }
    // export statistics
    if let Err(e) = export_results(&params, &csv, &reports) {
        error!("unable to export the results: {}", e);
        std::process::exit(1);
    }
}
