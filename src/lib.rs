//! Exact Maximum Clique solver (branch & bound with greedy coloring bounds)

// #![warn(clippy::all, clippy::pedantic)]
// useful additional warnings if docs are missing, or crates imported but unused, etc.
#![warn(missing_debug_implementations)]
#![warn(missing_docs)]
#![warn(trivial_casts, trivial_numeric_casts)]
#![warn(unsafe_code)]
#![warn(unused_extern_crates)]
#![warn(variant_size_differences)]

// not sure if already by default in clippy
#![warn(clippy::similar_names)]
#![warn(clippy::shadow_unrelated)]
#![warn(clippy::shadow_same)]
#![warn(clippy::shadow_reuse)]


/// bit-packed graph representation
pub mod graph;

/// clique checker
pub mod clique;

/// read/write DIMACS formats
pub mod dimacs;

/// seeded random instance generators
pub mod generator;

/// helper and utility methods for executables
pub mod util;

/// search algorithms for the maximum clique problem
pub mod search;
