use crate::coloring::greedy::color_d;
use crate::coloring::search::color_c;
use crate::coloring::ColoringError;
use crate::graph::{ColorMap, Graph};

/// which of the two competing algorithms produced the committed coloring
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Winner {
    /// the recursive-reduction search won (or tied)
    Recursive,
    /// the greedy independent-set coloring won
    Greedy,
}

/// outcome of the best-of-two run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BestColoring {
    /// number of colors of the committed coloring
    pub colors_used: usize,
    /// the algorithm that produced it
    pub winner: Winner,
}

/** Runs the reduction search and the greedy independent-set coloring on the
same source and commits whichever uses fewer colors; the reduction wins
ties. Both contenders color private clones, so the loser leaves no trace in
the caller's color map. */
pub fn color_e(graph: &Graph, colors: &mut ColorMap) -> Result<BestColoring, ColoringError> {
    let mut recursive_map = ColorMap::new();
    let recursive = color_c(graph, &mut recursive_map)?;
    let mut greedy_map = ColorMap::new();
    let greedy = color_d(graph, &mut greedy_map);
    if recursive <= greedy {
        *colors = recursive_map;
        Ok(BestColoring { colors_used: recursive, winner: Winner::Recursive })
    } else {
        *colors = greedy_map;
        Ok(BestColoring { colors_used: greedy, winner: Winner::Greedy })
    }
}
