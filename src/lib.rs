//! Approximate graph coloring via Wigderson's recursive reduction (B/C),
//! greedy independent sets (D), and structure-driven randomized variants.

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


/// mutable graph store with O(1) vertex/edge deletion and induced subgraphs
pub mod graph;

/// degree bucket queue giving O(1) amortized extremal-degree queries
pub mod degree;

/// vertex selection strategies (deterministic extremal & degree-biased random)
pub mod strategy;

/// the coloring algorithm family (B, C, D, E and SDR variants)
pub mod coloring;

/// read/write DIMACS edge-list format
pub mod dimacs;

/// read/write the JSON graph document format
pub mod json;

/// helper and utility methods for executables
pub mod util;
