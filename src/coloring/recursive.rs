use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::coloring::bipartite::two_color;
use crate::coloring::ColoringError;
use crate::graph::{ColorMap, Graph};
use crate::strategy::SelectionStrategy;

/** degree threshold `n^(1 - 1/(k-1))` of the reduction step; requires k ≥ 2 */
pub fn f_k(k: usize, n: usize) -> f64 {
    (n as f64).powf(1.0 - 1.0 / (k as f64 - 1.0))
}

/** gives every vertex its own color; the trivial n-coloring used once the
target k reaches log2(n), where the reduction cannot gain anything. Returns
the number of colors consumed from `base`. */
pub fn sequential_coloring(graph: &mut Graph, colors: &mut ColorMap, base: usize) -> usize {
    let mut used = 0;
    for id in graph.vertex_ids() {
        graph.set_color(id, base + used);
        colors.insert(id, base + used);
        used += 1;
    }
    used
}

/** first-fit coloring of the low-degree residual graph: each vertex takes the
lowest admissible color at or above `base`. Every vertex has at most
`max_degree` colored neighbors, so an offset beyond `max_degree` is
impossible in a consistent graph; hitting it reports `TooManyColors` instead
of looping further. Returns the number of colors consumed from `base`. */
pub fn residual_coloring(graph: &mut Graph, colors: &mut ColorMap, base: usize) -> Result<usize, ColoringError> {
    let bound = match graph.max_degree() {
        Some(d) => d,
        None => return Ok(0),
    };
    let mut highest = 0;
    for id in graph.vertex_ids() {
        let mut c = base;
        while !graph.is_color_admissible(id, c) {
            c += 1;
            if c - base > bound {
                return Err(ColoringError::TooManyColors);
            }
        }
        graph.set_color(id, c);
        colors.insert(id, c);
        highest = highest.max(c - base + 1);
    }
    Ok(highest)
}

/** Wigderson's recursive reduction, targeting a k-chromatic graph.

While a vertex of degree ≥ `ceil(f_k)` exists, one such vertex is picked, its
neighborhood extracted as an induced subgraph and colored recursively with
target k-1, and the vertex itself takes the first color past that range; the
neighborhood extraction guarantees no surviving edge into the rest, so
consecutive reduction steps may share that boundary color. The low-degree
remainder is finished first-fit.

Consumes the graph destructively; callers wanting to keep it pass a clone.
Colors are written from `base` upward into both the graph and `colors`; the
return value is the number of colors consumed, i.e. colors lie in
`base..base+count`. Fails with `NotBipartite` when k is too small for the
graph. */
pub fn color_b(k: usize, graph: &mut Graph, base: usize, colors: &mut ColorMap) -> Result<usize, ColoringError> {
    // the deterministic policy never samples; any fixed seed will do
    let mut rng = StdRng::seed_from_u64(0);
    color_b_with(k, graph, base, colors, &SelectionStrategy::MaxDegree, &mut rng)
}

/** the reduction with a pluggable vertex-selection policy (the randomized
variants pass a degree-biased one); control flow is identical to `color_b`. */
pub fn color_b_with<R: Rng>(
    k: usize,
    graph: &mut Graph,
    base: usize,
    colors: &mut ColorMap,
    strategy: &SelectionStrategy,
    rng: &mut R,
) -> Result<usize, ColoringError> {
    if graph.is_empty() {
        return Ok(0);
    }
    if k <= 1 {
        // one color suffices only without edges; otherwise this target k
        // fails the same way a failed 2-coloring does
        if graph.nb_edges() == 0 {
            for id in graph.vertex_ids() {
                graph.set_color(id, base);
                colors.insert(id, base);
            }
            return Ok(1);
        }
        return Err(ColoringError::NotBipartite);
    }
    if k == 2 {
        return two_color(graph, colors, base);
    }
    if k as f64 >= (graph.nb_vertices() as f64).log2() {
        return Ok(sequential_coloring(graph, colors, base));
    }
    // the threshold is fixed at the entry vertex count for the whole loop;
    // vertices falling below it as the graph shrinks go to the first-fit
    // stage, they are not reduced further
    let threshold = f_k(k, graph.nb_vertices()).ceil() as usize;
    let mut current = base;
    let mut reduced = false;
    while graph.max_degree().map_or(false, |d| d >= threshold) {
        let v = match strategy.select(graph, rng) {
            Some(v) => v,
            None => break,
        };
        let mut hood = graph.induce_on_neighborhood(v);
        let inner = color_b_with(k - 1, &mut hood, current, colors, strategy, rng)?;
        graph.set_color(v, current + inner);
        colors.insert(v, current + inner);
        current += inner;
        graph.delete_vertex(v);
        reduced = true;
    }
    let residual = residual_coloring(graph, colors, current)?;
    let tail = if reduced { residual.max(1) } else { residual };
    Ok(current - base + tail)
}

/// checks a color map against a fresh copy of the source graph
#[cfg(test)]
pub fn assert_valid(source: &Graph, colors: &ColorMap, max_count: usize) {
    let mut check = source.clone();
    check.apply_colors(colors);
    let distinct = check.check_coloring().unwrap_or_else(|| panic!("invalid coloring {:?}", colors));
    assert!(distinct <= max_count, "{} distinct colors, claimed {}", distinct, max_count);
}
