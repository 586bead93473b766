use dogs::data_structures::sparse_set::SparseSet;

use crate::graph::{BitGraph, VertexId};

/** result of the clique checker */
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckerResult {
    /// the vertices form a clique of the given size
    Ok(usize),
    /// the vertex does not belong to the graph
    VertexOutOfRange(VertexId),
    /// the vertex appears more than once
    DuplicateVertex(VertexId),
    /// the two vertices are both in the clique but not adjacent
    NonAdjacent(VertexId, VertexId),
}

impl CheckerResult {
    /// true iff the checked vertices form a clique
    pub fn is_ok(&self) -> bool { matches!(self, CheckerResult::Ok(_)) }
}

/**
checks that the given vertices are distinct and pairwise adjacent.
returns the size of the clique if it is the case.
*/
pub fn checker(inst:&BitGraph, clique:&[VertexId]) -> CheckerResult {
    let mut visited = SparseSet::new(inst.nb_vertices());
    for v in clique {
        if *v >= inst.nb_vertices() {
            return CheckerResult::VertexOutOfRange(*v);
        }
        if visited.contains(*v) {
            return CheckerResult::DuplicateVertex(*v);
        }
        visited.insert(*v);
    }
    for (i,u) in clique.iter().enumerate() {
        for v in &clique[i+1..] {
            if !inst.are_adjacent(*u, *v) {
                return CheckerResult::NonAdjacent(*u, *v);
            }
        }
    }
    CheckerResult::Ok(clique.len())
}

/// clique number of the subgraph induced by `vertices`, by enumerating every subset
#[cfg(test)]
pub(crate) fn brute_force_clique_number(inst:&BitGraph, vertices:&[VertexId]) -> usize {
    let k = vertices.len();
    assert!(k <= 20, "brute force limited to 20 vertices");
    let mut best = 0;
    for mask in 0u32..(1u32 << k) {
        let size = mask.count_ones() as usize;
        if size <= best { continue; }
        let subset:Vec<VertexId> = (0..k).filter(|i| mask & (1 << i) != 0).map(|i| vertices[i]).collect();
        if checker(inst, &subset).is_ok() {
            best = size;
        }
    }
    best
}
