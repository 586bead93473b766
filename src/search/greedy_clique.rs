use fastrand::Rng;
use serde::{Serialize, Deserialize};
use tracing::debug;

use crate::graph::{BitGraph, VertexId};

/** parameters of the randomized greedy */
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GreedyParams {
    /// number of independent greedy constructions
    pub nb_restarts: usize,
    /// the next vertex is chosen among the first `restriction_size` candidates
    pub restriction_size: usize,
    /// random seed
    pub seed: u64,
}

impl Default for GreedyParams {
    fn default() -> Self {
        Self { nb_restarts: 8, restriction_size: 10, seed: 1234567 }
    }
}

/** implements a randomized greedy algorithm that finds a "large" size clique.
Candidates start as all the vertices sorted by non-increasing degree. While some
candidate remains, pick one at random among the first `restriction_size` ones, add it
to the clique and only keep the candidates adjacent to it (keeping their order).
The construction is repeated `nb_restarts` times and the largest clique is returned.
*/
pub fn greedy_clique(inst:&BitGraph, params:&GreedyParams) -> Vec<VertexId> {
    let mut rng = Rng::with_seed(params.seed);
    greedy_clique_with_rng(inst, params.nb_restarts, params.restriction_size, &mut rng)
}

/// same as [`greedy_clique`] with a user-provided random number generator
pub fn greedy_clique_with_rng(inst:&BitGraph, nb_restarts:usize, restriction_size:usize, rng:&mut Rng) -> Vec<VertexId> {
    let n = inst.nb_vertices();
    let mut best:Vec<VertexId> = Vec::new();
    if n == 0 { return best; }
    let nb_restarts = nb_restarts.max(1);
    let restriction_size = restriction_size.max(1);
    let by_degree = inst.vertices_by_degree();
    let mut candidates:Vec<VertexId> = Vec::with_capacity(n);
    for restart in 0..nb_restarts {
        candidates.clear();
        candidates.extend_from_slice(&by_degree);
        let mut clique = Vec::new();
        while !candidates.is_empty() {
            let last = candidates.len() - 1;
            let v = candidates[rng.usize(0..=last.min(restriction_size-1))];
            clique.push(v);
            // v is not its own neighbor, so it leaves the candidates too
            let row = inst.row(v);
            candidates.retain(|u| row.test(*u));
        }
        debug!("greedy restart {}: clique of size {}", restart, clique.len());
        if clique.len() > best.len() {
            best = clique;
        }
    }
    best
}


#[cfg(test)]
mod tests {
    use super::*;

    use crate::clique::checker;
    use crate::generator::{random_graph, planted_clique};

    #[test]
    fn test_empty_graph() {
        let g = BitGraph::from_edges(0, vec![]);
        assert!(greedy_clique(&g, &GreedyParams::default()).is_empty());
    }

    #[test]
    fn test_edgeless_graph() {
        let g = BitGraph::from_edges(5, vec![]);
        assert_eq!(greedy_clique(&g, &GreedyParams::default()).len(), 1);
    }

    #[test]
    fn test_complete_graph() {
        let edges = (0..6).flat_map(|u| (u+1..6).map(move |v| (u,v)));
        let g = BitGraph::from_edges(6, edges);
        let mut sol = greedy_clique(&g, &GreedyParams::default());
        sol.sort_unstable();
        assert_eq!(sol, vec![0,1,2,3,4,5]);
    }

    #[test]
    fn test_result_is_maximal_clique() {
        for seed in 0..10 {
            let g = random_graph(50, 0.5, seed);
            let sol = greedy_clique(&g, &GreedyParams { seed, ..GreedyParams::default() });
            assert!(checker(&g, &sol).is_ok());
            // no vertex can extend it
            for v in g.vertices() {
                if !sol.contains(&v) {
                    assert!(sol.iter().any(|u| !g.are_adjacent(*u, v)));
                }
            }
        }
    }

    #[test]
    fn test_deterministic_with_seed() {
        let g = random_graph(80, 0.6, 7);
        let params = GreedyParams { nb_restarts: 4, restriction_size: 5, seed: 99 };
        assert_eq!(greedy_clique(&g, &params), greedy_clique(&g, &params));
    }

    #[test]
    fn test_no_randomization_follows_degrees() {
        // restriction of 1: always picks the first candidate (largest degree)
        let (g, clique) = planted_clique(30, 10, 0.05, 11);
        let params = GreedyParams { nb_restarts: 1, restriction_size: 1, seed: 0 };
        let sol = greedy_clique(&g, &params);
        assert!(checker(&g, &sol).is_ok());
        assert_eq!(sol[0], g.vertices_by_degree()[0]);
        assert!(sol.len() <= clique.len() + 1);
    }

    #[test]
    fn test_picks_among_first_candidates() {
        for seed in 0..20 {
            let g = random_graph(40, 0.7, seed);
            for restriction_size in [1, 3, 10].iter() {
                let sol = greedy_clique_with_rng(&g, 1, *restriction_size, &mut Rng::with_seed(seed));
                // replay the construction: each pick is among the first candidates
                let mut candidates = g.vertices_by_degree();
                for v in &sol {
                    let pos = candidates.iter().position(|u| u == v)
                        .unwrap_or_else(|| panic!("{} is not a candidate", v));
                    assert!(pos < (*restriction_size).min(candidates.len()), "seed {}: position {}", seed, pos);
                    candidates.retain(|u| g.are_adjacent(*u, *v));
                }
                assert!(candidates.is_empty());
            }
        }
    }

    #[test]
    fn test_zero_parameters_are_clamped() {
        let g = random_graph(20, 0.5, 1);
        let params = GreedyParams { nb_restarts: 0, restriction_size: 0, seed: 0 };
        assert!(!greedy_clique(&g, &params).is_empty());
    }
}
