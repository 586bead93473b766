use std::rc::Rc;
use std::time::Instant;

use dogs::search_algorithm::{NeverStoppingCriterion, StoppingCriterion};
use serde::{Serialize, Deserialize};
use tracing::{debug, info};

use crate::graph::{BitGraph, VertexId};
use crate::search::color_sort::ColorSort;
use crate::search::greedy_clique::{greedy_clique, GreedyParams};

/** parameters of the branch & bound */
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BnBParams {
    /// parameters of the greedy computing the initial clique
    pub greedy: GreedyParams,
}

/** statistics collected during the search */
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BnBStatistics {
    /// number of calls to expand
    pub nb_nodes: u64,
    /// number of nodes without candidates
    pub nb_leaves: u64,
    /// number of nodes whose remaining branches were cut by the coloring bound
    pub nb_pruned: u64,
    /// number of incumbent improvements made by the tree search
    pub nb_improvements: u64,
    /// size of the clique found by the greedy
    pub greedy_size: usize,
    /// maximum depth reached
    pub max_depth: usize,
    /// successive incumbent sizes (greedy first)
    pub primal_list: Vec<usize>,
}

/** result of the branch & bound */
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CliqueSolution {
    /// vertices of the best clique found (0-indexed)
    pub clique: Vec<VertexId>,
    /// true iff the search completed (the clique is then maximum)
    pub is_optimal: bool,
    /// search statistics
    pub stats: BnBStatistics,
    /// time spent (seconds)
    pub time_searched: f32,
}

impl CliqueSolution {
    /// size of the clique
    pub fn size(&self) -> usize { self.clique.len() }
}


/** best clique found so far. Only replaced by a strictly larger clique. */
#[derive(Debug, Clone, Default)]
pub struct Incumbent {
    /// vertices of the clique
    clique: Vec<VertexId>,
    /// successive sizes
    primal_list: Vec<usize>,
}

impl Incumbent {
    /// size of the best clique
    pub fn size(&self) -> usize { self.clique.len() }

    /// vertices of the best clique
    pub fn clique(&self) -> &[VertexId] { &self.clique }

    /// successive sizes of the incumbent
    pub fn primal_list(&self) -> &[usize] { &self.primal_list }

    /// replaces the incumbent if the candidate clique is larger. returns true if it was replaced
    pub fn try_improve(&mut self, candidate:&[VertexId]) -> bool {
        if candidate.len() <= self.clique.len() { return false; }
        self.clique.clear();
        self.clique.extend_from_slice(candidate);
        self.primal_list.push(candidate.len());
        true
    }
}


/**
Branch & bound for the maximum clique problem.

Each node holds a set of candidates (vertices adjacent to the whole current clique).
The candidates are colored greedily (see [`ColorSort`]) and explored from the last
colored one to the first. When the current clique size plus the color of the
vertex cannot beat the incumbent, the node is closed: the colors before it are
not greater.
*/
#[derive(Debug)]
pub struct CliqueBnB<Stopping:StoppingCriterion> {
    /// instance to solve
    inst: Rc<BitGraph>,
    /// parameters
    params: BnBParams,
    /// when to stop the search
    stopping_criterion: Stopping,
    /// vertices chosen along the current branch
    current_clique: Vec<VertexId>,
    /// best clique found so far
    incumbent: Incumbent,
    /// coloring buffers
    color_sort: ColorSort,
    /// true if the stopping criterion interrupted the search
    interrupted: bool,
    /// statistics
    stats: BnBStatistics,
}

impl<Stopping:StoppingCriterion> CliqueBnB<Stopping> {

    /** creates the solver */
    pub fn new(inst:Rc<BitGraph>, params:BnBParams, stopping_criterion:Stopping) -> Self {
        let n = inst.nb_vertices();
        Self {
            inst,
            params,
            stopping_criterion,
            current_clique: Vec::with_capacity(n),
            incumbent: Incumbent::default(),
            color_sort: ColorSort::new(n),
            interrupted: false,
            stats: BnBStatistics::default(),
        }
    }

    /// best clique found so far
    pub fn incumbent(&self) -> &Incumbent { &self.incumbent }

    /// statistics of the search
    pub fn statistics(&self) -> &BnBStatistics { &self.stats }

    /** seeds the incumbent with the randomized greedy, then runs the tree search
    from the vertices sorted by non-increasing degree.
    */
    pub fn run(&mut self) -> CliqueSolution {
        let t_start = Instant::now();
        if self.inst.nb_vertices() == 0 {
            return CliqueSolution {
                clique: Vec::new(),
                is_optimal: true,
                stats: self.stats.clone(),
                time_searched: t_start.elapsed().as_secs_f32(),
            };
        }
        let seed = greedy_clique(&self.inst, &self.params.greedy);
        self.stats.greedy_size = seed.len();
        self.incumbent.try_improve(&seed);
        info!("greedy clique: {}", seed.len());
        let candidates = self.inst.vertices_by_degree();
        self.expand(&candidates);
        self.stats.primal_list = self.incumbent.primal_list().to_vec();
        let solution = CliqueSolution {
            clique: self.incumbent.clique().to_vec(),
            is_optimal: !self.interrupted,
            stats: self.stats.clone(),
            time_searched: t_start.elapsed().as_secs_f32(),
        };
        info!(
            "branch & bound: clique {} (optimal: {}) in {:.3}s, {} nodes",
            solution.size(), solution.is_optimal, solution.time_searched, self.stats.nb_nodes
        );
        solution
    }

    /// explores the node whose candidates are given
    fn expand(&mut self, candidates:&[VertexId]) {
        self.stats.nb_nodes += 1;
        self.stats.max_depth = self.stats.max_depth.max(self.current_clique.len());
        if self.interrupted || self.stopping_criterion.is_finished() {
            self.interrupted = true;
            return;
        }
        if candidates.is_empty() {
            self.stats.nb_leaves += 1;
            if self.incumbent.try_improve(&self.current_clique) {
                self.stats.nb_improvements += 1;
                debug!("new best clique! ({})", self.incumbent.size());
            }
            return;
        }
        let mut order = Vec::with_capacity(candidates.len());
        let mut bounds = Vec::with_capacity(candidates.len());
        self.color_sort.sort(&self.inst, candidates, &mut order, &mut bounds);
        for i in (0..order.len()).rev() {
            if self.current_clique.len() + bounds[i] <= self.incumbent.size() {
                self.stats.nb_pruned += 1;
                return;
            }
            let v = order[i];
            let row = self.inst.row(v);
            let new_candidates:Vec<VertexId> = order[..i].iter()
                .filter(|u| row.test(**u))
                .copied()
                .collect();
            self.current_clique.push(v);
            self.expand(&new_candidates);
            self.current_clique.pop();
            if self.interrupted { return; }
        }
    }
}

/** solves the maximum clique problem on inst (stops when the stopping criterion is met) */
pub fn clique_bnb<Stopping:StoppingCriterion>(inst:Rc<BitGraph>, params:BnBParams, stopping_criterion:Stopping) -> CliqueSolution {
    CliqueBnB::new(inst, params, stopping_criterion).run()
}

/** returns a maximum clique of inst (default parameters, no time limit) */
pub fn max_clique(inst:Rc<BitGraph>) -> Vec<VertexId> {
    clique_bnb(inst, BnBParams::default(), NeverStoppingCriterion::default()).clique
}
