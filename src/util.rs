use std::fs;
use std::path::Path;

use clap::ArgMatches;
use serde_json::{json, Value};
use thiserror::Error;
use tracing::info;

use crate::graph::VertexId;
use crate::search::clique_bnb::{BnBParams, CliqueSolution};

/// header of the CSV summary
pub const CSV_HEADER:&str = "File; Clique; Time (sec)\n";

/// line written in the CSV summary (and console) when the checker rejects a solution
pub const INVALID_CLIQUE_WARNING:&str = "*** WARNING: incorrect clique ***";

/** errors raised while reading the command line parameters */
#[derive(Debug, Error)]
pub enum ParamsError {
    /// a command line value cannot be parsed
    #[error("unable to parse the value given to --{name}: {value}")]
    InvalidValue {
        /// name of the option
        name: String,
        /// given value
        value: String,
    },
    /// the configuration file cannot be read
    #[error("unable to read the configuration file {filename}: {source}")]
    ConfigIo {
        /// file name
        filename: String,
        /// underlying error
        #[source]
        source: std::io::Error,
    },
    /// the configuration file is not a valid JSON parameter file
    #[error("invalid configuration file {filename}: {source}")]
    ConfigFormat {
        /// file name
        filename: String,
        /// underlying error
        #[source]
        source: serde_json::Error,
    },
}

/** parameters of a batch run */
#[derive(Debug, Clone, PartialEq)]
pub struct RunParams {
    /// instance files
    pub instances: Vec<String>,
    /// time limit per instance (seconds), None: no limit
    pub time_limit: Option<f32>,
    /// solver parameters
    pub bnb: BnBParams,
    /// CSV summary file
    pub csv_file: String,
    /// JSON statistics file
    pub perf_file: Option<String>,
    /// directory where the solutions are written
    pub solution_dir: Option<String>,
}

/// parses an optional command line value
fn parse_value<T:std::str::FromStr>(main_args:&ArgMatches, name:&str) -> Result<Option<T>, ParamsError> {
    match main_args.value_of(name) {
        None => Ok(None),
        Some(s) => s.parse::<T>().map(Some).map_err(|_| ParamsError::InvalidValue {
            name: name.to_string(),
            value: s.to_string(),
        }),
    }
}

/// reads solver parameters from a JSON file (missing fields take their default value)
pub fn read_config(filename:&str) -> Result<BnBParams, ParamsError> {
    let content = fs::read_to_string(filename).map_err(|source| ParamsError::ConfigIo {
        filename: filename.to_string(), source
    })?;
    serde_json::from_str(&content).map_err(|source| ParamsError::ConfigFormat {
        filename: filename.to_string(), source
    })
}

/** reads the command line. The configuration file (if any) is read first,
then the command line options override it.
*/
pub fn read_params(main_args:&ArgMatches) -> Result<RunParams, ParamsError> {
    let instances:Vec<String> = main_args.values_of("instances")
        .map(|values| values.map(|s| s.to_string()).collect())
        .unwrap_or_default();
    let mut bnb = match main_args.value_of("config") {
        None => BnBParams::default(),
        Some(filename) => {
            info!("reading parameters from: {}", filename);
            read_config(filename)?
        }
    };
    if let Some(seed) = parse_value(main_args, "seed")? { bnb.greedy.seed = seed; }
    if let Some(nb_restarts) = parse_value(main_args, "restarts")? { bnb.greedy.nb_restarts = nb_restarts; }
    if let Some(size) = parse_value(main_args, "restriction")? { bnb.greedy.restriction_size = size; }
    let time_limit:Option<f32> = parse_value(main_args, "time")?;
    let csv_file = main_args.value_of("csv").unwrap_or("clique_bnb.csv").to_string();
    // read value of the performance logs filename
    let perf_file = main_args.value_of("perf").map(|e| {
        info!("printing perfs in: {}", e);
        e.to_string()
    });
    // read value of the solution directory
    let solution_dir = main_args.value_of("solutions").map(|e| {
        info!("printing solutions in: {}", e);
        e.to_string()
    });
    Ok(RunParams { instances, time_limit, bnb, csv_file, perf_file, solution_dir })
}

/// CSV summary line of a run
pub fn csv_line(inst_filename:&str, solution:&CliqueSolution) -> String {
    format!("{}; {}; {:.6}\n", inst_filename, solution.size(), solution.time_searched)
}

/** writes a string encoding the clique (1-indexed vertices on a single line) */
pub fn solution_to_string(clique:&[VertexId]) -> String {
    let vertices:Vec<String> = clique.iter().map(|v| (v+1).to_string()).collect();
    vertices.join(" ") + "\n"
}

/// path of the solution file of an instance within the solution directory
pub fn solution_path(solution_dir:&str, inst_filename:&str) -> String {
    let stem = Path::new(inst_filename).file_name()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| inst_filename.to_string());
    Path::new(solution_dir).join(format!("{}.sol", stem)).to_string_lossy().to_string()
}

/// statistics of a run, as exported in the performance file
pub fn run_report(inst_filename:&str, solution:&CliqueSolution, nb_skipped_lines:usize, is_valid:bool) -> Value {
    json!({
        "inst_name": inst_filename,
        "clique_size": solution.size(),
        "is_optimal": solution.is_optimal,
        "is_valid": is_valid,
        "time_searched": solution.time_searched,
        "primal_list": solution.stats.primal_list,
        "stats": solution.stats,
        "nb_skipped_lines": nb_skipped_lines,
    })
}

/// exports search results to files
pub fn export_results(params:&RunParams, csv:&str, reports:&[Value]) -> std::io::Result<()> {
    fs::write(&params.csv_file, csv)?;
    if let Some(filename) = &params.perf_file {
        let content = serde_json::to_string_pretty(reports)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
        fs::write(filename, content)?;
    }
    Ok(())
}
