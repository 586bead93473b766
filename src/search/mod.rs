//! Search algorithms for the maximum clique problem.

/// randomized greedy that finds a clique of "large" size
pub mod greedy_clique;

/// greedy coloring used as an upper bound
pub mod color_sort;

/// branch & bound for the CLIQUE problem
pub mod clique_bnb;
