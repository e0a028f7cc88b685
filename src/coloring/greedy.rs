use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::graph::{ColorMap, Graph};
use crate::strategy::SelectionStrategy;

/** Greedy coloring by maximal independent sets.

Each color class is built on a scratch copy of the still-uncolored subgraph:
a minimum-degree vertex is picked, colored, and removed together with its
whole neighborhood from the scratch copy (the neighborhood is blocked for
this color) but only the vertex itself leaves the uncolored subgraph. When
the scratch copy runs dry the color class is maximal and the next color
starts. Picking minimum-degree vertices blocks as few candidates as possible
per pick.

Never fails; colors start at 1 and the count is returned, so colors lie in
`1..=count`, bounded by max_degree+1. The source graph is left untouched. */
pub fn color_d(graph: &Graph, colors: &mut ColorMap) -> usize {
    let mut rng = StdRng::seed_from_u64(0);
    color_d_with(graph, colors, &SelectionStrategy::MinDegree, &mut rng)
}

/** the greedy independent-set coloring with a pluggable selection policy */
pub fn color_d_with<R: Rng>(
    graph: &Graph,
    colors: &mut ColorMap,
    strategy: &SelectionStrategy,
    rng: &mut R,
) -> usize {
    let mut uncolored = graph.clone();
    uncolored.ensure_degree_index();
    let mut color = 0;
    while !uncolored.is_empty() {
        color += 1;
        let mut scratch = uncolored.clone();
        while !scratch.is_empty() {
            let v = match strategy.select(&mut scratch, rng) {
                Some(v) => v,
                None => break,
            };
            colors.insert(v, color);
            for u in scratch.live_neighbors(v) {
                scratch.remove_vertex_with_edges(u);
            }
            scratch.remove_vertex_with_edges(v);
            uncolored.remove_vertex_with_edges(v);
        }
    }
    color
}
