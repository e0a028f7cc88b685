use log::debug;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::coloring::best::{BestColoring, Winner};
use crate::coloring::greedy::{color_d, color_d_with};
use crate::coloring::search::attempt;
use crate::coloring::ColoringError;
use crate::graph::{ColorMap, Graph};
use crate::strategy::SelectionStrategy;

/// default retry budget of the iterated mode
pub const MAX_ATTEMPTS: usize = 100;

/// how a randomized run spends its randomness across retries
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetryMode {
    /// one random stream across all trials; retries explore new selections
    Iterated,
    /// the stream restarts from the seed before every reduction trial,
    /// trading retry diversity for per-trial reproducibility
    FixedSeed,
}

/** parameters of a structure-driven randomized run */
#[derive(Debug, Clone, Copy)]
pub struct SdrParams {
    /// vertex-selection policy handed to every trial
    pub strategy: SelectionStrategy,
    /// randomness discipline across retries
    pub mode: RetryMode,
    /// trial budget of the final search stage
    pub max_attempts: usize,
    /// seed of the random stream; drawn from entropy when absent
    pub seed: Option<u64>,
}

impl SdrParams {
    /// defaults for the randomized reduction search
    pub fn recursive(exponent: f64) -> Self {
        SdrParams {
            strategy: SelectionStrategy::default_recursive(exponent),
            mode: RetryMode::Iterated,
            max_attempts: MAX_ATTEMPTS,
            seed: None,
        }
    }

    /// defaults for the randomized greedy coloring
    pub fn greedy(exponent: f64) -> Self {
        SdrParams {
            strategy: SelectionStrategy::default_greedy(exponent),
            ..Self::recursive(exponent)
        }
    }

    /// pins the seed, making the whole run reproducible
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}

impl Default for SdrParams {
    fn default() -> Self {
        Self::recursive(1.0)
    }
}

/// random stream of one run; re-wound before each trial in fixed-seed mode
struct Stream {
    rng: StdRng,
    rewind: Option<u64>,
}

impl Stream {
    fn new(params: &SdrParams) -> Self {
        let seed = match params.seed {
            Some(s) => s,
            None => rand::thread_rng().gen(),
        };
        debug!("randomized run seeded with {}", seed);
        Stream {
            rng: StdRng::seed_from_u64(seed),
            rewind: if params.mode == RetryMode::FixedSeed { Some(seed) } else { None },
        }
    }

    fn next_trial(&mut self) -> &mut StdRng {
        if let Some(seed) = self.rewind {
            self.rng = StdRng::seed_from_u64(seed);
        }
        &mut self.rng
    }
}

/** Randomized counterpart of the binary-search driver.

The doubling and narrowing phases run as in the deterministic search, except
that every reduction trial selects vertices through `params.strategy`. A
randomized trial failing does not prove its target infeasible, so the final
stage re-attempts the two frontier targets up to `params.max_attempts`
times; exhausting the budget without a success fails with `ColoringFailed`.
Every trial colors a fresh clone of the source. */
pub fn sdr_c(graph: &Graph, colors: &mut ColorMap, params: &SdrParams) -> Result<usize, ColoringError> {
    if graph.is_empty() {
        return Ok(0);
    }
    let mut stream = Stream::new(params);
    match attempt(1, graph, &params.strategy, stream.next_trial()) {
        Ok((used, map)) => {
            *colors = map;
            return Ok(used);
        }
        Err(ColoringError::NotBipartite) => {}
        Err(e) => return Err(e),
    }
    let mut exponent: u32 = 1;
    loop {
        match attempt(1 << exponent, graph, &params.strategy, stream.next_trial()) {
            Ok(_) => break,
            Err(ColoringError::NotBipartite) => exponent += 1,
            Err(e) => return Err(e),
        }
    }
    let mut lower: usize = 1 << (exponent - 1);
    let mut upper: usize = 1 << exponent;
    while upper - lower > 1 {
        let middle = (lower + upper) / 2;
        match attempt(middle, graph, &params.strategy, stream.next_trial()) {
            Ok(_) => upper = middle,
            Err(ColoringError::NotBipartite) => lower = middle,
            Err(e) => return Err(e),
        }
    }
    for trial in 0..params.max_attempts {
        if lower >= 2 {
            if let Ok((used, map)) = attempt(lower, graph, &params.strategy, stream.next_trial()) {
                debug!("target {} reached after {} final trials", lower, trial + 1);
                *colors = map;
                return Ok(used);
            }
        }
        if let Ok((used, map)) = attempt(upper, graph, &params.strategy, stream.next_trial()) {
            debug!("target {} reached after {} final trials", upper, trial + 1);
            *colors = map;
            return Ok(used);
        }
    }
    Err(ColoringError::ColoringFailed)
}

/** randomized counterpart of the greedy independent-set coloring; a single
run, since the greedy construction cannot fail. */
pub fn sdr_d(graph: &Graph, colors: &mut ColorMap, params: &SdrParams) -> usize {
    let mut stream = Stream::new(params);
    color_d_with(graph, colors, &params.strategy, stream.next_trial())
}

/** randomized best-of-three: runs the randomized search, the randomized
greedy coloring, and the deterministic greedy coloring as a baseline, then
commits the smallest of the three; ties go to the search, and between the
two greedy runs to the randomized one. The baseline keeps one unlucky random
pass from inflating the result. A search that exhausts its budget forfeits
to the greedy side instead of failing the whole run. */
pub fn sdr_e(
    graph: &Graph,
    colors: &mut ColorMap,
    search_params: &SdrParams,
    greedy_params: &SdrParams,
) -> Result<BestColoring, ColoringError> {
    let mut search_map = ColorMap::new();
    let search_used = match sdr_c(graph, &mut search_map, search_params) {
        Ok(used) => Some(used),
        Err(ColoringError::ColoringFailed) => None,
        Err(e) => return Err(e),
    };
    let mut greedy_map = ColorMap::new();
    let mut greedy_used = sdr_d(graph, &mut greedy_map, greedy_params);
    let mut baseline_map = ColorMap::new();
    let baseline_used = color_d(graph, &mut baseline_map);
    if baseline_used < greedy_used {
        greedy_used = baseline_used;
        greedy_map = baseline_map;
    }
    match search_used {
        Some(used) if used <= greedy_used => {
            *colors = search_map;
            Ok(BestColoring { colors_used: used, winner: Winner::Recursive })
        }
        _ => {
            *colors = greedy_map;
            Ok(BestColoring { colors_used: greedy_used, winner: Winner::Greedy })
        }
    }
}
