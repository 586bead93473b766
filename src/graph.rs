use bit_set::BitSet;
use tracing::info;

/** Vertex Id */
pub type VertexId = usize;

/** fixed-width bit row packed in 64-bit words. Bit `v` is set iff vertex `v`
belongs to the row. All rows of a graph share the same width (the number of
vertices), which makes bulk operations (union) word-by-word.
*/
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BitRow {
    /// packed bits
    bits: BitSet<u64>,
    /// number of addressable bits
    width: usize,
}

impl BitRow {

    /** creates an empty row able to address vertices `0..width` */
    pub fn new(width:usize) -> Self {
        let mut bits = BitSet::<u64>::default();
        bits.reserve_len_exact(width);
        Self { bits, width }
    }

    /// number of addressable bits
    pub fn width(&self) -> usize { self.width }

    /// true iff bit v is set
    pub fn test(&self, v:VertexId) -> bool {
        debug_assert!(v < self.width, "BitRow::test: {} out of range (width {})", v, self.width);
        self.bits.contains(v)
    }

    /// sets bit v
    pub fn set(&mut self, v:VertexId) {
        debug_assert!(v < self.width, "BitRow::set: {} out of range (width {})", v, self.width);
        self.bits.insert(v);
    }

    /// self ← self ∪ other
    pub fn or_with(&mut self, other:&BitRow) {
        debug_assert_eq!(self.width, other.width, "BitRow::or_with: rows of mismatched width");
        self.bits.union_with(&other.bits);
    }

    /// resets every bit (the width is kept)
    pub fn clear(&mut self) { self.bits.clear(); }

    /// number of set bits
    pub fn count(&self) -> usize { self.bits.len() }

    /// iterates over the set bits in increasing order
    pub fn iter(&self) -> impl Iterator<Item=VertexId> + '_ { self.bits.iter() }
}


/** immutable undirected graph stored as a bit-packed adjacency matrix.
Built with a [`GraphBuilder`].
*/
#[derive(Debug, Clone)]
pub struct BitGraph {
    /// nb vertices
    n: usize,
    /// nb edges
    m: usize,
    /// rows[u]: neighbors of u
    rows: Vec<BitRow>,
    /// degrees[u]: number of neighbors of u
    degrees: Vec<usize>,
}

impl BitGraph {

    /// number of vertices
    pub fn nb_vertices(&self) -> usize { self.n }

    /// number of (distinct) edges
    pub fn nb_edges(&self) -> usize { self.m }

    /// iterates over the vertices
    pub fn vertices(&self) -> std::ops::Range<VertexId> { 0..self.n }

    /// number of neighbors of u
    pub fn degree(&self, u:VertexId) -> usize { self.degrees[u] }

    /// returns if u and v are adjacent (O(1))
    pub fn are_adjacent(&self, u:VertexId, v:VertexId) -> bool {
        self.rows[u].test(v)
    }

    /// adjacency row of u
    pub fn row(&self, u:VertexId) -> &BitRow { &self.rows[u] }

    /// neighbors of u in increasing order
    pub fn neighbors(&self, u:VertexId) -> impl Iterator<Item=VertexId> + '_ {
        self.rows[u].iter()
    }

    /// vertices sorted by non-increasing degree (ties broken by id)
    pub fn vertices_by_degree(&self) -> Vec<VertexId> {
        let mut res:Vec<VertexId> = self.vertices().collect();
        res.sort_by(|a,b| self.degree(*b).cmp(&self.degree(*a)));
        res
    }

    /// builds a graph from a list of 0-indexed edges (invalid edges are ignored)
    pub fn from_edges<I>(n:usize, edges:I) -> Self where I:IntoIterator<Item=(VertexId,VertexId)> {
        let mut builder = GraphBuilder::new(n);
        for (u,v) in edges {
            builder.add_edge(u, v);
        }
        builder.build()
    }

    /// logs some statistics about the graph
    pub fn display_statistics(&self) {
        info!("\t{} \t vertices", self.nb_vertices());
        info!("\t{} \t edges", self.nb_edges());
        if let (Some(min), Some(max)) = (self.degrees.iter().min(), self.degrees.iter().max()) {
            info!("\t{} \t min degree", min);
            info!("\t{} \t max degree", max);
        }
        if self.n > 1 {
            let density = 2. * self.m as f64 / (self.n as f64 * (self.n as f64 - 1.));
            info!("\t{:.3} \t density", density);
        }
    }
}


/** incrementally builds a [`BitGraph`]. Self-loops and out-of-range endpoints
are rejected, repeated edges are only counted once.
*/
#[derive(Debug)]
pub struct GraphBuilder {
    /// nb vertices
    n: usize,
    /// nb distinct edges inserted so far
    m: usize,
    /// adjacency rows
    rows: Vec<BitRow>,
    /// degrees
    degrees: Vec<usize>,
    /// number of rejected edges
    nb_rejected: usize,
}

impl GraphBuilder {

    /// creates a builder for a graph with n vertices and no edge
    pub fn new(n:usize) -> Self {
        Self {
            n,
            m: 0,
            rows: vec![BitRow::new(n) ; n],
            degrees: vec![0 ; n],
            nb_rejected: 0,
        }
    }

    /// number of vertices of the graph being built
    pub fn nb_vertices(&self) -> usize { self.n }

    /// number of distinct edges inserted so far
    pub fn nb_edges(&self) -> usize { self.m }

    /// number of rejected edges (out of range or self-loops)
    pub fn nb_rejected(&self) -> usize { self.nb_rejected }

    /** adds the edge (u,v) (0-indexed). Returns false if the edge is rejected
    (self-loop or out of range). Adding an existing edge is a no-op that returns true.
    */
    pub fn add_edge(&mut self, u:VertexId, v:VertexId) -> bool {
        if u >= self.n || v >= self.n || u == v {
            self.nb_rejected += 1;
            return false;
        }
        if !self.rows[u].test(v) {
            self.rows[u].set(v);
            self.rows[v].set(u);
            self.degrees[u] += 1;
            self.degrees[v] += 1;
            self.m += 1;
        }
        true
    }

    /// adds the edge (a,b) given with 1-indexed endpoints (DIMACS convention)
    pub fn add_dimacs_edge(&mut self, a:usize, b:usize) -> bool {
        if a == 0 || b == 0 {
            self.nb_rejected += 1;
            return false;
        }
        self.add_edge(a-1, b-1)
    }

    /// freezes the graph
    pub fn build(self) -> BitGraph {
        BitGraph { n: self.n, m: self.m, rows: self.rows, degrees: self.degrees }
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    fn square() -> BitGraph {
        BitGraph::from_edges(4, vec![(0,1), (1,2), (2,3), (3,0)])
    }

    #[test]
    fn test_adjacency_is_symmetric() {
        let g = square();
        for u in g.vertices() {
            for v in g.vertices() {
                assert_eq!(g.are_adjacent(u, v), g.are_adjacent(v, u));
            }
            assert!(!g.are_adjacent(u, u));
        }
        assert!(g.are_adjacent(0, 3));
        assert!(!g.are_adjacent(0, 2));
        assert_eq!(g.nb_edges(), 4);
    }

    #[test]
    fn test_duplicate_edges_do_not_change_degrees() {
        let mut builder = GraphBuilder::new(3);
        assert!(builder.add_edge(0, 1));
        assert!(builder.add_edge(1, 0));
        assert!(builder.add_dimacs_edge(1, 2));
        let g = builder.build();
        assert_eq!(g.degree(0), 1);
        assert_eq!(g.degree(1), 1);
        assert_eq!(g.degree(2), 0);
        assert_eq!(g.nb_edges(), 1);
    }

    #[test]
    fn test_invalid_edges_are_rejected() {
        let mut builder = GraphBuilder::new(3);
        assert!(!builder.add_edge(1, 1));
        assert!(!builder.add_edge(0, 3));
        assert!(!builder.add_dimacs_edge(0, 2));
        assert!(!builder.add_dimacs_edge(2, 4));
        assert!(builder.add_dimacs_edge(3, 1));
        assert_eq!(builder.nb_rejected(), 4);
        let g = builder.build();
        assert_eq!(g.nb_edges(), 1);
        assert!(g.are_adjacent(0, 2));
    }

    #[test]
    fn test_rows_and_degrees() {
        let g = BitGraph::from_edges(70, vec![(0,65), (0,3), (65,69)]);
        assert_eq!(g.row(0).width(), 70);
        assert_eq!(g.row(0).count(), g.degree(0));
        assert_eq!(g.neighbors(0).collect::<Vec<_>>(), vec![3,65]);
        assert_eq!(g.neighbors(65).collect::<Vec<_>>(), vec![0,69]);
        assert_eq!(g.vertices_by_degree()[0..3], [0,65,3]);
    }

    #[test]
    fn test_row_union() {
        let g = square();
        let mut forbidden = BitRow::new(4);
        forbidden.set(0);
        forbidden.or_with(g.row(0));
        assert_eq!(forbidden.iter().collect::<Vec<_>>(), vec![0,1,3]);
        forbidden.clear();
        assert_eq!(forbidden.count(), 0);
        assert_eq!(forbidden.width(), 4);
    }

    #[test]
    fn test_row_uses_64_bit_words() {
        let mut row = BitRow::new(70);
        row.set(69);
        assert_eq!(row.bits.get_ref().storage().len(), 2);
        let mut small = BitRow::new(64);
        small.set(63);
        assert_eq!(small.bits.get_ref().storage().len(), 1);
    }

    #[test]
    fn test_empty_graph() {
        let g = BitGraph::from_edges(0, vec![]);
        assert_eq!(g.nb_vertices(), 0);
        assert!(g.vertices_by_degree().is_empty());
        g.display_statistics();
    }
}
