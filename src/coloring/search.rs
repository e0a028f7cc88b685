use log::debug;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::coloring::recursive::color_b_with;
use crate::coloring::ColoringError;
use crate::graph::{ColorMap, Graph};
use crate::strategy::SelectionStrategy;

/// one reduction trial at a fixed target k, on a private copy of the source
pub(crate) fn attempt<R: Rng>(
    k: usize,
    source: &Graph,
    strategy: &SelectionStrategy,
    rng: &mut R,
) -> Result<(usize, ColorMap), ColoringError> {
    let mut work = source.clone();
    let mut trial = ColorMap::new();
    let used = color_b_with(k, &mut work, 1, &mut trial, strategy, rng)?;
    Ok((used, trial))
}

/** Colors a graph of unknown chromatic number by searching for the smallest
target k the reduction succeeds at.

The target doubles (2, 4, 8, ...) until a trial succeeds, then a binary
search over the last doubling interval narrows down the frontier between
failing and succeeding targets. Every trial runs on a fresh clone of the
source with a fresh color map; the committed result is the successful trial
at the lowest target. Colors start at 1, the return value is the number of
colors used, so colors lie in `1..=count`. */
pub fn color_c(graph: &Graph, colors: &mut ColorMap) -> Result<usize, ColoringError> {
    let mut rng = StdRng::seed_from_u64(0);
    color_c_with(graph, colors, &SelectionStrategy::MaxDegree, &mut rng)
}

/** the search with a pluggable selection policy handed through to every
reduction trial. With a randomized policy a failed trial does not prove the
target infeasible; this driver still escalates on failure, and the retry
wrappers around it re-run the whole search when the outcome is unusable. */
pub fn color_c_with<R: Rng>(
    graph: &Graph,
    colors: &mut ColorMap,
    strategy: &SelectionStrategy,
    rng: &mut R,
) -> Result<usize, ColoringError> {
    if graph.is_empty() {
        return Ok(0);
    }
    // the k=1 trial succeeds exactly on edgeless graphs, and 1 color is
    // already optimal there
    match attempt(1, graph, strategy, rng) {
        Ok((used, map)) => {
            *colors = map;
            return Ok(used);
        }
        Err(ColoringError::NotBipartite) => {}
        Err(e) => return Err(e),
    }
    let mut exponent: u32 = 1;
    let mut best = loop {
        match attempt(1 << exponent, graph, strategy, rng) {
            Ok(res) => break res,
            Err(ColoringError::NotBipartite) => {
                debug!("target {} failed, doubling", 1 << exponent);
                exponent += 1;
            }
            Err(e) => return Err(e),
        }
    };
    let mut lower: usize = 1 << (exponent - 1);
    let mut upper: usize = 1 << exponent;
    while upper - lower > 1 {
        let middle = (lower + upper) / 2;
        match attempt(middle, graph, strategy, rng) {
            Ok(res) => {
                best = res;
                upper = middle;
            }
            Err(ColoringError::NotBipartite) => lower = middle,
            Err(e) => return Err(e),
        }
    }
    // one shot at the last rejected target; worthwhile for randomized
    // policies, a cheap re-confirmation for deterministic ones
    if lower >= 2 {
        if let Ok(res) = attempt(lower, graph, strategy, rng) {
            best = res;
            upper = lower;
        }
    }
    debug!("reduction succeeded at target {} with {} colors", upper, best.0);
    let (used, map) = best;
    *colors = map;
    Ok(used)
}
