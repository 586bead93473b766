/*
Implements seeded random instance generators:
 - uniform random graphs G(n,p)
 - random graphs with a planted clique
*/
use rand::{Rng, SeedableRng, rngs::StdRng, seq::SliceRandom};

use crate::graph::{BitGraph, GraphBuilder, VertexId};

/** generates a G(n,p) random graph: each edge exists with probability p */
pub fn random_graph(n:usize, p:f64, seed:u64) -> BitGraph {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut builder = GraphBuilder::new(n);
    add_random_edges(&mut builder, p.clamp(0., 1.), &mut rng);
    builder.build()
}

/** generates a G(n,p) random graph in which k random vertices are made pairwise
adjacent. Returns the graph and the planted clique (sorted).
*/
pub fn planted_clique(n:usize, k:usize, p:f64, seed:u64) -> (BitGraph, Vec<VertexId>) {
    assert!(k <= n, "planted_clique: cannot plant a clique of size {} in {} vertices", k, n);
    let mut rng = StdRng::seed_from_u64(seed);
    let mut builder = GraphBuilder::new(n);
    add_random_edges(&mut builder, p.clamp(0., 1.), &mut rng);
    let mut vertices:Vec<VertexId> = (0..n).collect();
    vertices.shuffle(&mut rng);
    let mut clique = vertices[..k].to_vec();
    clique.sort_unstable();
    for (i,u) in clique.iter().enumerate() {
        for v in &clique[i+1..] {
            builder.add_edge(*u, *v);
        }
    }
    (builder.build(), clique)
}

/// adds each edge of the builder with probability p
fn add_random_edges<R:Rng>(builder:&mut GraphBuilder, p:f64, rng:&mut R) {
    let n = builder.nb_vertices();
    for u in 0..n {
        for v in u+1..n {
            if rng.gen_bool(p) {
                builder.add_edge(u, v);
            }
        }
    }
}
