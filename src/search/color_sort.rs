use crate::graph::{BitGraph, BitRow, VertexId};

/** greedy sequential coloring of a candidate set, used as an upper bound for the
clique search.

Colors are built one at a time: a single scan over the uncolored vertices puts
in the current color every vertex that is not adjacent to a vertex already in it.
Vertices are output in the order they are colored, so the bounds (color of each
vertex) are non-decreasing along the order and `bounds[i]` bounds the size of a
clique drawn from `order[0..=i]`.

The scratch buffers are kept between calls so that the search does not allocate
them at every node.
*/
#[derive(Debug, Clone)]
pub struct ColorSort {
    /// vertices that cannot enter the current color
    forbidden: BitRow,
    /// vertices not colored yet
    uncolored: Vec<VertexId>,
    /// vertices skipped by the current color
    next_uncolored: Vec<VertexId>,
}

impl ColorSort {

    /// creates the scratch buffers for a graph with n vertices
    pub fn new(n:usize) -> Self {
        Self {
            forbidden: BitRow::new(n),
            uncolored: Vec::with_capacity(n),
            next_uncolored: Vec::with_capacity(n),
        }
    }

    /** colors the candidates. `order` and `bounds` are overwritten:
    `order` is a permutation of the candidates and `bounds[i]` the color (starting at 1)
    of `order[i]`.
    */
    pub fn sort(&mut self, inst:&BitGraph, candidates:&[VertexId], order:&mut Vec<VertexId>, bounds:&mut Vec<usize>) {
        debug_assert_eq!(self.forbidden.width(), inst.nb_vertices(), "ColorSort built for another graph");
        debug_assert!(is_duplicate_free(inst, candidates), "duplicate vertices in the candidate set");
        order.clear();
        bounds.clear();
        self.uncolored.clear();
        self.uncolored.extend_from_slice(candidates);
        let mut color = 0;
        while !self.uncolored.is_empty() {
            color += 1;
            self.forbidden.clear();
            self.next_uncolored.clear();
            for v in &self.uncolored {
                if self.forbidden.test(*v) {
                    self.next_uncolored.push(*v);
                } else {
                    order.push(*v);
                    bounds.push(color);
                    self.forbidden.set(*v);
                    self.forbidden.or_with(inst.row(*v));
                }
            }
            std::mem::swap(&mut self.uncolored, &mut self.next_uncolored);
        }
    }
}

/** result of a coloring (see [`ColorSort`]) */
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColoredCandidates {
    /// candidates in the order they were colored
    pub order: Vec<VertexId>,
    /// bounds[i]: color of order[i]
    pub bounds: Vec<usize>,
}

impl ColoredCandidates {
    /// number of colors used (upper bound on the clique number of the candidates)
    pub fn nb_colors(&self) -> usize { self.bounds.last().copied().unwrap_or(0) }

    /// color classes (each one is an independent set)
    pub fn classes(&self) -> Vec<Vec<VertexId>> {
        let mut res = vec![Vec::new() ; self.nb_colors()];
        for (v,c) in self.order.iter().zip(&self.bounds) {
            res[c-1].push(*v);
        }
        res
    }
}

/// colors the candidates using fresh buffers
pub fn color_sort(inst:&BitGraph, candidates:&[VertexId]) -> ColoredCandidates {
    let mut res = ColoredCandidates::default();
    ColorSort::new(inst.nb_vertices()).sort(inst, candidates, &mut res.order, &mut res.bounds);
    res
}

/// true iff no vertex appears twice
fn is_duplicate_free(inst:&BitGraph, candidates:&[VertexId]) -> bool {
    let mut seen = BitRow::new(inst.nb_vertices());
    for v in candidates {
        if seen.test(*v) { return false; }
        seen.set(*v);
    }
    true
}


#[cfg(test)]
mod tests {
    use super::*;

    use crate::clique::brute_force_clique_number;
    use crate::generator::random_graph;

    fn check_coloring(inst:&BitGraph, candidates:&[VertexId], res:&ColoredCandidates) {
        // permutation of the candidates
        let mut sorted_order = res.order.clone();
        sorted_order.sort_unstable();
        let mut sorted_candidates = candidates.to_vec();
        sorted_candidates.sort_unstable();
        assert_eq!(sorted_order, sorted_candidates);
        assert_eq!(res.order.len(), res.bounds.len());
        // non-decreasing bounds over the whole order, starting at 1, no gap
        if !res.bounds.is_empty() { assert_eq!(res.bounds[0], 1); }
        for w in res.bounds.windows(2) {
            assert!(w[0] <= w[1] && w[1] <= w[0]+1, "bounds {:?}", res.bounds);
        }
        // each color is an independent set
        for class in res.classes() {
            assert!(!class.is_empty());
            for u in &class {
                for v in &class {
                    assert!(!inst.are_adjacent(*u, *v), "{} and {} share a color", u, v);
                }
            }
        }
    }

    #[test]
    fn test_empty_candidates() {
        let g = BitGraph::from_edges(3, vec![(0,1)]);
        let res = color_sort(&g, &[]);
        assert!(res.order.is_empty());
        assert_eq!(res.nb_colors(), 0);
    }

    #[test]
    fn test_complete_graph() {
        let edges = (0..5).flat_map(|u| (u+1..5).map(move |v| (u,v)));
        let g = BitGraph::from_edges(5, edges);
        let res = color_sort(&g, &[4,3,2,1,0]);
        assert_eq!(res.order, vec![4,3,2,1,0]);
        assert_eq!(res.bounds, vec![1,2,3,4,5]);
    }

    #[test]
    fn test_skipped_vertices_keep_their_order() {
        // path 0-1-2-3: first color {0,2}, second {1,3}
        let g = BitGraph::from_edges(4, vec![(0,1), (1,2), (2,3)]);
        let res = color_sort(&g, &[0,1,2,3]);
        assert_eq!(res.order, vec![0,2,1,3]);
        assert_eq!(res.bounds, vec![1,1,2,2]);
        // a subset of the candidates
        let res = color_sort(&g, &[3,2]);
        assert_eq!(res.order, vec![3,2]);
        assert_eq!(res.bounds, vec![1,2]);
    }

    #[test]
    fn test_buffers_are_reset_between_calls() {
        let g = BitGraph::from_edges(4, vec![(0,1), (2,3)]);
        let mut sorter = ColorSort::new(4);
        let mut order = vec![42];
        let mut bounds = vec![42];
        sorter.sort(&g, &[0,1], &mut order, &mut bounds);
        assert_eq!(bounds, vec![1,2]);
        sorter.sort(&g, &[2,0], &mut order, &mut bounds);
        assert_eq!(order, vec![2,0]);
        assert_eq!(bounds, vec![1,1]);
    }

    #[test]
    fn test_bound_soundness_random_graphs() {
        let mut sorter = ColorSort::new(12);
        let mut order = Vec::new();
        let mut bounds = Vec::new();
        for seed in 0..30 {
            let density = 0.2 + 0.6 * (seed as f64 / 30.);
            let g = random_graph(12, density, seed);
            // the full vertex set, then the neighborhood of vertex 0
            let all:Vec<VertexId> = g.vertices_by_degree();
            let neighborhood:Vec<VertexId> = g.neighbors(0).collect();
            for candidates in [all, neighborhood].iter() {
                sorter.sort(&g, candidates, &mut order, &mut bounds);
                let res = ColoredCandidates { order: order.clone(), bounds: bounds.clone() };
                check_coloring(&g, candidates, &res);
                // every prefix bound is sound
                for i in 0..order.len() {
                    assert!(bounds[i] >= brute_force_clique_number(&g, &order[..=i]));
                }
            }
        }
    }
}
