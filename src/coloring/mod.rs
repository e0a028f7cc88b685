//! The coloring algorithm family: recursive reduction (B), chromatic-number
//! search (C), greedy independent sets (D), best-of-two (E), and the
//! structure-driven randomized variants with their retry wrappers.

use derive_more::Display;

/// BFS two-coloring of bipartite graphs (base case of the reduction)
pub mod bipartite;

/// recursive reduction B with its sequential and brute-force fallbacks
pub mod recursive;

/// binary-search driver C for an unknown chromatic number
pub mod search;

/// greedy independent-set coloring D
pub mod greedy;

/// best-of-two driver E
pub mod best;

/// randomized retry wrappers (iterated / fixed-seed modes)
pub mod randomized;

pub use crate::graph::ColorMap;
pub use self::best::{color_e, BestColoring, Winner};
pub use self::greedy::{color_d, color_d_with};
pub use self::randomized::{sdr_c, sdr_d, sdr_e, RetryMode, SdrParams};
pub use self::recursive::{color_b, color_b_with};
pub use self::search::{color_c, color_c_with};

/** failures of the coloring algorithms.

`NotBipartite` is ordinary data for the k-escalation drivers, not an abort;
`ColoringFailed` ends one randomized attempt sequence and may be retried by
the caller with other parameters; `TooManyColors` means a structural
invariant broke and is never expected in correct operation. */
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq)]
pub enum ColoringError {
    /// a traversed edge connected two same-colored vertices during 2-coloring
    #[display(fmt = "graph is not 2-colorable")]
    NotBipartite,
    /// the brute-force residual stage would exceed max_degree+1 colors
    #[display(fmt = "residual coloring exceeded the max_degree+1 bound (broken invariant)")]
    TooManyColors,
    /// a randomized retry wrapper exhausted its iteration budget
    #[display(fmt = "randomized coloring exhausted its retry budget")]
    ColoringFailed,
}

impl std::error::Error for ColoringError {}
