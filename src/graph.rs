use std::collections::{BTreeMap, BTreeSet};

use bit_set::BitSet;

use crate::degree::DegreeIndex;

/** Vertex Id */
pub type VertexId = usize;

/** Color assignment produced by a coloring run (vertex-id -> color).
Owned by the caller of a coloring routine, never by the graph, so that
concurrent attempts on independent graph copies share no mutable state. */
pub type ColorMap = BTreeMap<VertexId, usize>;

/** a vertex of the graph store */
#[derive(Debug, Clone)]
pub struct Vertex {
    /// stable identity of the vertex
    id: VertexId,
    /// assigned color, None until colored
    color: Option<usize>,
    /// transient traversal flag, reset at the start of each traversal
    marked: bool,
    /// ids of adjacent vertices (may contain stale ids after vertex deletion)
    neighbors: BTreeSet<VertexId>,
}

impl Vertex {
    /// the vertex id
    pub fn id(&self) -> VertexId { self.id }

    /// assigned color, if any
    pub fn color(&self) -> Option<usize> { self.color }

    /// size of the neighbor set (counts stale entries, see `delete_vertex`)
    pub fn degree(&self) -> usize { self.neighbors.len() }

    /// neighbor ids in ascending order
    pub fn neighbors(&self) -> impl Iterator<Item=VertexId> + '_ {
        self.neighbors.iter().copied()
    }
}

/** Mutable adjacency-based graph with a co-maintained degree bucket index.

Vertices are held in an ordered arena addressed by stable integer ids; the
neighbor relation is symmetric (`v ∈ N(u) ⇔ u ∈ N(v)`) except for the stale
entries a `delete_vertex` leaves behind by design. Ordered storage makes
iteration deterministic, which the clone/seed reproducibility of the
randomized algorithms relies on.

A graph is built once and then destructively consumed by a coloring run;
algorithms operate on a private `clone` of the caller's graph.
*/
#[derive(Debug, Default)]
pub struct Graph {
    /// live vertices, by id
    vertices: BTreeMap<VertexId, Vertex>,
    /// number of live vertices
    m: usize,
    /// number of edges
    n: usize,
    /// degree bucket queue, built lazily on first extremal query
    degrees: Option<DegreeIndex>,
}

impl Clone for Graph {
    /** fully independent deep copy; the degree index is re-derived (rather
    than copied) when the source carries one. */
    fn clone(&self) -> Self {
        let mut copy = Graph {
            vertices: self.vertices.clone(),
            m: self.m,
            n: self.n,
            degrees: None,
        };
        if self.degrees.is_some() {
            copy.build_degree_index();
        }
        copy
    }
}

impl Graph {
    /// creates an empty graph
    pub fn new() -> Self { Self::default() }

    /// creates a graph with vertices 1..=m and no edges (DIMACS numbering)
    pub fn with_vertices(m: usize) -> Self {
        let mut g = Self::new();
        for id in 1..=m {
            g.add_vertex(id);
        }
        g
    }

    /// number of live vertices
    pub fn nb_vertices(&self) -> usize { self.m }

    /// number of edges
    pub fn nb_edges(&self) -> usize { self.n }

    /// true iff no vertex is live
    pub fn is_empty(&self) -> bool { self.m == 0 }

    /// true iff the vertex id is live
    pub fn contains(&self, id: VertexId) -> bool { self.vertices.contains_key(&id) }

    /// the vertex with the given id, if live
    pub fn vertex(&self, id: VertexId) -> Option<&Vertex> { self.vertices.get(&id) }

    /// live vertex ids, ascending
    pub fn vertex_ids(&self) -> Vec<VertexId> {
        self.vertices.keys().copied().collect()
    }

    /// live neighbors of a vertex (stale ids filtered out, not dereferenced)
    pub fn live_neighbors(&self, id: VertexId) -> Vec<VertexId> {
        match self.vertices.get(&id) {
            Some(v) => v.neighbors.iter().copied()
                .filter(|u| self.vertices.contains_key(u))
                .collect(),
            None => Vec::new(),
        }
    }

    /// edge list (a,b) with a < b, both endpoints live
    pub fn edges(&self) -> Vec<(VertexId, VertexId)> {
        let mut res = Vec::with_capacity(self.n);
        for (&a, v) in &self.vertices {
            for &b in &v.neighbors {
                if a < b && self.vertices.contains_key(&b) {
                    res.push((a, b));
                }
            }
        }
        res
    }

    /** adds a new vertex; no change and `false` if the id already exists. */
    pub fn add_vertex(&mut self, id: VertexId) -> bool {
        if self.vertices.contains_key(&id) {
            return false;
        }
        self.vertices.insert(id, Vertex {
            id,
            color: None,
            marked: false,
            neighbors: BTreeSet::new(),
        });
        self.m += 1;
        true
    }

    /** adds an undirected edge; no change and `false` if an endpoint is
    missing, the endpoints coincide, or the edge already exists. The degree
    index is NOT updated (edges are never added after construction). */
    pub fn add_edge(&mut self, a: VertexId, b: VertexId) -> bool {
        if a == b || !self.vertices.contains_key(&a) || !self.vertices.contains_key(&b) {
            return false;
        }
        let inserted = match self.vertices.get_mut(&a) {
            Some(va) => va.neighbors.insert(b),
            None => false,
        };
        if !inserted {
            return false; // already adjacent
        }
        if let Some(vb) = self.vertices.get_mut(&b) {
            vb.neighbors.insert(a);
        }
        self.n += 1;
        true
    }

    /** deletes an edge from both adjacency sets and decrements both endpoint
    degrees in the index; `false` if the edge does not exist. */
    pub fn delete_edge(&mut self, a: VertexId, b: VertexId) -> bool {
        let removed_a = match self.vertices.get_mut(&a) {
            Some(va) => va.neighbors.remove(&b),
            None => false,
        };
        if !removed_a {
            return false;
        }
        if let Some(vb) = self.vertices.get_mut(&b) {
            vb.neighbors.remove(&a);
        }
        self.n -= 1;
        if let Some(idx) = self.degrees.as_mut() {
            idx.decrease(a);
            idx.decrease(b);
        }
        true
    }

    /** deletes a vertex in O(1): the vertex leaves the vertex set and the
    degree index, but its neighbors' neighbor sets are NOT updated (the
    intentional shortcut required by the algorithms' complexity bounds).
    Traversals must skip, never dereference, the stale ids left behind. */
    pub fn delete_vertex(&mut self, id: VertexId) -> bool {
        if self.vertices.remove(&id).is_none() {
            return false;
        }
        self.m -= 1;
        if let Some(idx) = self.degrees.as_mut() {
            idx.remove(id);
        }
        true
    }

    /** deletes a vertex together with all its edges, keeping every surviving
    neighbor's adjacency set and degree bucket exact. Used by the greedy
    independent-set algorithm, which must keep the shrinking graph fully
    consistent across color classes. */
    pub fn remove_vertex_with_edges(&mut self, id: VertexId) -> bool {
        let hood: Vec<VertexId> = match self.vertices.get(&id) {
            Some(v) => v.neighbors.iter().copied().collect(),
            None => return false,
        };
        for w in hood {
            let removed = match self.vertices.get_mut(&w) {
                Some(nv) => nv.neighbors.remove(&id),
                None => false, // stale entry, edge already gone
            };
            if removed {
                self.n -= 1;
                if let Some(idx) = self.degrees.as_mut() {
                    idx.decrease(w);
                }
            }
        }
        if let Some(idx) = self.degrees.as_mut() {
            idx.remove(id);
        }
        self.vertices.remove(&id);
        self.m -= 1;
        true
    }

    /// builds (or rebuilds) the degree index from the adjacency sets
    pub fn build_degree_index(&mut self) {
        let mut idx = DegreeIndex::new();
        for (&id, v) in &self.vertices {
            idx.add(id, v.neighbors.len());
        }
        self.degrees = Some(idx);
    }

    /// builds the degree index if it does not exist yet
    pub fn ensure_degree_index(&mut self) {
        if self.degrees.is_none() {
            self.build_degree_index();
        }
    }

    /// the degree index, if built
    pub fn degrees(&self) -> Option<&DegreeIndex> { self.degrees.as_ref() }

    /// maximum degree currently in the graph (index built lazily)
    pub fn max_degree(&mut self) -> Option<usize> {
        self.ensure_degree_index();
        self.degrees.as_mut().and_then(|idx| idx.max_degree())
    }

    /// minimum degree currently in the graph (index built lazily)
    pub fn min_degree(&mut self) -> Option<usize> {
        self.ensure_degree_index();
        self.degrees.as_mut().and_then(|idx| idx.min_degree())
    }

    /// a vertex of maximum degree
    pub fn max_degree_vertex(&mut self) -> Option<VertexId> {
        self.ensure_degree_index();
        self.degrees.as_mut().and_then(|idx| idx.max_degree_vertex())
    }

    /// a vertex of minimum degree
    pub fn min_degree_vertex(&mut self) -> Option<VertexId> {
        self.ensure_degree_index();
        self.degrees.as_mut().and_then(|idx| idx.min_degree_vertex())
    }

    /** destructively partitions the graph: the neighbors of `v` leave this
    graph and become a new subgraph keeping only the edges among themselves.
    Edges from the neighborhood to the rest of the graph (including to `v`
    itself) are deleted on both sides, with a degree decrement of the
    surviving endpoint. Cost is proportional to the neighborhood size plus
    its incident edge count. */
    pub fn induce_on_neighborhood(&mut self, v: VertexId) -> Graph {
        self.ensure_degree_index();
        let mut sub = Graph::new();
        let hood: Vec<VertexId> = match self.vertices.get(&v) {
            Some(vert) => vert.neighbors.iter().copied()
                .filter(|u| self.vertices.contains_key(u))
                .collect(),
            None => return sub,
        };
        let hood_set: BTreeSet<VertexId> = hood.iter().copied().collect();
        // move the neighborhood out, adjacency sets still intact
        for &u in &hood {
            if let Some(vert) = self.vertices.remove(&u) {
                self.m -= 1;
                sub.vertices.insert(u, vert);
                sub.m += 1;
            }
        }
        // prune cross edges, count internal ones (each seen from both ends)
        let mut internal_twice = 0usize;
        for &u in &hood {
            let snapshot: Vec<VertexId> = match sub.vertices.get(&u) {
                Some(vert) => vert.neighbors.iter().copied().collect(),
                None => continue,
            };
            for w in snapshot {
                if hood_set.contains(&w) {
                    internal_twice += 1;
                    continue;
                }
                if let Some(subv) = sub.vertices.get_mut(&u) {
                    subv.neighbors.remove(&w);
                }
                let surviving = match self.vertices.get_mut(&w) {
                    Some(outer) => outer.neighbors.remove(&u),
                    None => false, // stale id in the extracted vertex's set
                };
                if surviving {
                    self.n -= 1;
                    if let Some(idx) = self.degrees.as_mut() {
                        idx.decrease(w);
                    }
                }
            }
            if let Some(idx) = self.degrees.as_mut() {
                idx.remove(u);
            }
        }
        let internal = internal_twice / 2;
        self.n -= internal;
        sub.n = internal;
        sub
    }

    /// assigned color of a vertex
    pub fn color_of(&self, id: VertexId) -> Option<usize> {
        self.vertices.get(&id).and_then(|v| v.color)
    }

    /// assigns a color to a vertex (no-op on a missing id)
    pub fn set_color(&mut self, id: VertexId, color: usize) {
        if let Some(v) = self.vertices.get_mut(&id) {
            v.color = Some(color);
        }
    }

    /// writes a color map back into the vertex color fields
    pub fn apply_colors(&mut self, colors: &ColorMap) {
        for (&id, &c) in colors {
            self.set_color(id, c);
        }
    }

    /// true iff the traversal flag of the vertex is set
    pub fn is_marked(&self, id: VertexId) -> bool {
        self.vertices.get(&id).map_or(false, |v| v.marked)
    }

    /// sets or clears the traversal flag of a vertex
    pub fn set_marked(&mut self, id: VertexId, marked: bool) {
        if let Some(v) = self.vertices.get_mut(&id) {
            v.marked = marked;
        }
    }

    /** true iff no live neighbor of `id` currently holds `color`; O(degree) */
    pub fn is_color_admissible(&self, id: VertexId, color: usize) -> bool {
        match self.vertices.get(&id) {
            Some(v) => v.neighbors.iter().all(|w| {
                self.vertices.get(w).map_or(true, |nv| nv.color != Some(color))
            }),
            None => true,
        }
    }

    /** verifies the coloring: every vertex colored and no edge with both
    endpoints sharing a color. Returns the number of distinct colors used,
    or None if the coloring is invalid. Post-hoc validation only. */
    pub fn check_coloring(&self) -> Option<usize> {
        let mut used = BitSet::new();
        for (&id, v) in &self.vertices {
            let c = v.color?;
            used.insert(c);
            for &w in &v.neighbors {
                if let Some(nv) = self.vertices.get(&w) {
                    if w != id && nv.color == Some(c) {
                        return None;
                    }
                }
            }
        }
        Some(used.len())
    }

    /// number of distinct colors assigned to live vertices
    pub fn colors_used(&self) -> usize {
        let mut used = BitSet::new();
        for v in self.vertices.values() {
            if let Some(c) = v.color {
                used.insert(c);
            }
        }
        used.len()
    }

    /// print statistics of the graph
    pub fn display_statistics(&mut self) {
        println!("\t{} \t vertices", self.nb_vertices());
        println!("\t{} \t edges", self.nb_edges());
        if let (Some(min), Some(max)) = (self.min_degree(), self.max_degree()) {
            println!("\t{} \t min degree", min);
            println!("\t{} \t max degree", max);
        }
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    /// path 1-2-3-4 plus chord 2-4
    fn small_graph() -> Graph {
        let mut g = Graph::with_vertices(4);
        g.add_edge(1, 2);
        g.add_edge(2, 3);
        g.add_edge(3, 4);
        g.add_edge(2, 4);
        g
    }

    /// recorded buckets must match true neighbor-set sizes, extremal caches
    /// must match the extremal non-empty bucket
    fn assert_index_consistent(g: &mut Graph) {
        g.ensure_degree_index();
        let mut true_degrees: Vec<usize> = Vec::new();
        for id in g.vertex_ids() {
            let deg = g.vertex(id).unwrap().degree();
            assert_eq!(
                g.degrees().unwrap().recorded_degree(id),
                Some(deg),
                "vertex {} sits in the wrong bucket", id
            );
            true_degrees.push(deg);
        }
        assert_eq!(g.max_degree(), true_degrees.iter().max().copied());
        assert_eq!(g.min_degree(), true_degrees.iter().min().copied());
    }

    #[test]
    fn test_build_counts() {
        let g = small_graph();
        assert_eq!(g.nb_vertices(), 4);
        assert_eq!(g.nb_edges(), 4);
        assert_eq!(g.vertex(2).unwrap().degree(), 3);
    }

    #[test]
    fn test_add_rejects_duplicates() {
        let mut g = small_graph();
        assert!(!g.add_vertex(1));
        assert!(!g.add_edge(1, 2));
        assert!(!g.add_edge(2, 2));
        assert!(!g.add_edge(1, 99));
        assert_eq!(g.nb_vertices(), 4);
        assert_eq!(g.nb_edges(), 4);
    }

    #[test]
    fn test_delete_edge() {
        let mut g = small_graph();
        g.ensure_degree_index();
        assert!(g.delete_edge(2, 4));
        assert!(!g.delete_edge(2, 4));
        assert!(!g.delete_edge(1, 4));
        assert_eq!(g.nb_edges(), 3);
        assert_index_consistent(&mut g);
    }

    #[test]
    fn test_delete_vertex_is_shallow() {
        let mut g = small_graph();
        assert!(g.delete_vertex(3));
        assert!(!g.delete_vertex(3));
        assert_eq!(g.nb_vertices(), 3);
        // neighbor sets keep the stale id; live_neighbors filters it
        assert!(g.vertex(2).unwrap().neighbors().any(|u| u == 3));
        assert_eq!(g.live_neighbors(2), vec![1, 4]);
    }

    #[test]
    fn test_clone_is_independent() {
        let mut g = small_graph();
        g.ensure_degree_index();
        let mut copy = g.clone();
        copy.delete_edge(1, 2);
        copy.delete_vertex(1);
        assert_eq!(g.nb_vertices(), 4);
        assert_eq!(g.nb_edges(), 4);
        assert!(copy.degrees().is_some());
        assert_index_consistent(&mut g);
        assert_index_consistent(&mut copy);
    }

    #[test]
    fn test_extremal_queries() {
        let mut g = small_graph();
        assert_eq!(g.max_degree(), Some(3));
        assert_eq!(g.min_degree(), Some(1));
        assert_eq!(g.max_degree_vertex(), Some(2));
        assert_eq!(g.min_degree_vertex(), Some(1));
    }

    #[test]
    fn test_induce_on_neighborhood() {
        // wheel: hub 1 adjacent to rim 2,3,4; rim cycle 2-3-4
        let mut g = Graph::with_vertices(4);
        g.add_edge(1, 2);
        g.add_edge(1, 3);
        g.add_edge(1, 4);
        g.add_edge(2, 3);
        g.add_edge(3, 4);
        g.ensure_degree_index();
        let sub = g.induce_on_neighborhood(1);
        assert_eq!(sub.nb_vertices(), 3);
        assert_eq!(sub.nb_edges(), 2);
        assert_eq!(sub.edges(), vec![(2, 3), (3, 4)]);
        // the surviving graph is just the hub, now isolated
        assert_eq!(g.nb_vertices(), 1);
        assert_eq!(g.nb_edges(), 0);
        assert_eq!(g.vertex(1).unwrap().degree(), 0);
        assert_index_consistent(&mut g);
    }

    #[test]
    fn test_induce_rescans_extremal_bucket() {
        // star: max-degree bucket empties when the hub's hood is extracted
        let mut g = Graph::with_vertices(5);
        for leaf in 2..=5 {
            g.add_edge(1, leaf);
        }
        g.add_edge(2, 3);
        assert_eq!(g.max_degree(), Some(4));
        let sub = g.induce_on_neighborhood(1);
        assert_eq!(sub.nb_edges(), 1);
        assert_eq!(g.max_degree(), Some(0));
        assert_eq!(g.min_degree(), Some(0));
        assert_index_consistent(&mut g);
        // extracting everything leaves the sentinel state
        let mut empty = Graph::with_vertices(2);
        empty.add_edge(1, 2);
        empty.ensure_degree_index();
        let _sub2 = empty.induce_on_neighborhood(1);
        empty.delete_vertex(1);
        assert_eq!(empty.max_degree(), None);
        assert_eq!(empty.min_degree(), None);
    }

    #[test]
    fn test_index_invariant_after_mixed_mutations() {
        let mut g = Graph::with_vertices(7);
        let edges = [(1,2),(1,3),(1,4),(2,3),(3,4),(4,5),(5,6),(6,7),(2,7),(3,7)];
        for &(a, b) in &edges {
            g.add_edge(a, b);
        }
        g.ensure_degree_index();
        g.delete_edge(3, 7);
        let _sub = g.induce_on_neighborhood(1);
        g.delete_edge(6, 7);
        assert_index_consistent(&mut g);
    }

    #[test]
    fn test_remove_vertex_with_edges() {
        let mut g = small_graph();
        g.ensure_degree_index();
        assert!(g.remove_vertex_with_edges(2));
        assert_eq!(g.nb_vertices(), 3);
        assert_eq!(g.nb_edges(), 1);
        assert_eq!(g.live_neighbors(4), vec![3]);
        assert_index_consistent(&mut g);
    }

    #[test]
    fn test_admissibility_and_checker() {
        let mut g = small_graph();
        g.set_color(1, 0);
        g.set_color(2, 1);
        g.set_color(3, 0);
        assert!(!g.is_color_admissible(4, 0));
        assert!(!g.is_color_admissible(4, 1));
        assert!(g.is_color_admissible(4, 2));
        assert_eq!(g.check_coloring(), None); // vertex 4 uncolored
        g.set_color(4, 2);
        assert_eq!(g.check_coloring(), Some(3));
        g.set_color(4, 1); // conflicts with 2
        assert_eq!(g.check_coloring(), None);
    }
}
