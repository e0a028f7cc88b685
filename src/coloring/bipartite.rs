use std::collections::VecDeque;

use crate::coloring::ColoringError;
use crate::graph::{ColorMap, Graph};

/** 2-colors the graph by BFS, writing colors `base` and `base+1` both into the
vertex color fields of the working graph and into the caller's color map.

Every connected component is traversed from its lowest-id vertex; isolated
vertices take `base` without traversal. Encountering an already-visited
neighbor of the same color proves an odd cycle and fails with `NotBipartite`.
Returns the number of colors consumed (always 2 on success). */
pub fn two_color(graph: &mut Graph, colors: &mut ColorMap, base: usize) -> Result<usize, ColoringError> {
    let ids = graph.vertex_ids();
    for &id in &ids {
        if graph.live_neighbors(id).is_empty() {
            graph.set_color(id, base);
            colors.insert(id, base);
            graph.set_marked(id, true);
        } else {
            graph.set_marked(id, false);
        }
    }
    let mut queue = VecDeque::new();
    for &root in &ids {
        if graph.is_marked(root) {
            continue;
        }
        graph.set_marked(root, true);
        graph.set_color(root, base);
        colors.insert(root, base);
        queue.push_back(root);
        while let Some(cur) = queue.pop_front() {
            let cur_color = graph.color_of(cur).unwrap_or(base);
            let flip = if cur_color == base { base + 1 } else { base };
            for w in graph.live_neighbors(cur) {
                if !graph.is_marked(w) {
                    graph.set_marked(w, true);
                    graph.set_color(w, flip);
                    colors.insert(w, flip);
                    queue.push_back(w);
                } else if graph.color_of(w) == Some(cur_color) {
                    return Err(ColoringError::NotBipartite);
                }
            }
        }
    }
    Ok(2)
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_four_cycle() {
        let mut g = Graph::with_vertices(4);
        g.add_edge(1, 2);
        g.add_edge(2, 3);
        g.add_edge(3, 4);
        g.add_edge(4, 1);
        let mut colors = ColorMap::new();
        assert_eq!(two_color(&mut g, &mut colors, 1), Ok(2));
        let expected: ColorMap = vec![(1, 1), (2, 2), (3, 1), (4, 2)].into_iter().collect();
        assert_eq!(colors, expected);
        assert_eq!(g.check_coloring(), Some(2));
    }

    #[test]
    fn test_odd_cycle_fails() {
        let mut g = Graph::with_vertices(5);
        for i in 1..5 {
            g.add_edge(i, i + 1);
        }
        g.add_edge(5, 1);
        let mut colors = ColorMap::new();
        assert_eq!(two_color(&mut g, &mut colors, 1), Err(ColoringError::NotBipartite));
    }

    #[test]
    fn test_isolated_vertices_take_first_color() {
        let mut g = Graph::with_vertices(3);
        let mut colors = ColorMap::new();
        assert_eq!(two_color(&mut g, &mut colors, 4), Ok(2));
        for id in 1..=3 {
            assert_eq!(colors.get(&id), Some(&4));
        }
    }

    #[test]
    fn test_multiple_components() {
        let mut g = Graph::with_vertices(6);
        g.add_edge(1, 2);
        g.add_edge(3, 4);
        g.add_edge(4, 5);
        let mut colors = ColorMap::new();
        assert_eq!(two_color(&mut g, &mut colors, 0), Ok(2));
        assert_eq!(g.check_coloring(), Some(2));
        assert_eq!(colors[&3], 0);
        assert_eq!(colors[&4], 1);
        assert_eq!(colors[&5], 0);
    }

    #[test]
    fn test_skips_stale_neighbor_ids() {
        let mut g = Graph::with_vertices(4);
        g.add_edge(1, 2);
        g.add_edge(2, 3);
        g.add_edge(3, 4);
        g.add_edge(4, 1);
        g.add_edge(1, 3); // odd chord, removed below via shallow delete
        g.delete_vertex(3);
        let mut colors = ColorMap::new();
        assert_eq!(two_color(&mut g, &mut colors, 1), Ok(2));
        assert!(!colors.contains_key(&3));
        assert_eq!(g.check_coloring(), Some(2));
    }
}
