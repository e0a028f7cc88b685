use std::collections::{BTreeMap, BTreeSet};

use crate::graph::VertexId;

/** Bucket queue keyed by vertex degree.

Keeps one bucket per degree value occurring in the graph, ordered by degree,
plus a cached extremal degree at each end. A vertex sits in the bucket of its
recorded degree; the recorded degree is only ever moved down (`decrease`) or
dropped (`remove`): the system deletes edges and vertices after construction,
it never adds them, so no `increase` operation exists.

The cached `max_degree` is an upper bound of the true maximum and `min_degree`
a lower bound of the true minimum; extremal queries re-scan inward from the
cached position until a non-empty bucket is found and move the cache there,
which keeps queries O(1) amortized over a deletion sequence.
*/
#[derive(Debug, Clone, Default)]
pub struct DegreeIndex {
    /// buckets[d]: ids of the vertices recorded at degree d
    buckets: BTreeMap<usize, BTreeSet<VertexId>>,
    /// recorded[v]: the degree bucket v currently occupies
    recorded: BTreeMap<VertexId, usize>,
    /// cached degree of the highest non-empty bucket (None once empty)
    max_degree: Option<usize>,
    /// cached degree of the lowest non-empty bucket (None once empty)
    min_degree: Option<usize>,
}

impl DegreeIndex {
    /// creates an empty index
    pub fn new() -> Self { Self::default() }

    /// number of vertices currently indexed
    pub fn len(&self) -> usize { self.recorded.len() }

    /// true iff no vertex is indexed
    pub fn is_empty(&self) -> bool { self.recorded.is_empty() }

    /** places a vertex in the bucket of its current degree, creating the
    bucket if absent, and widens the cached extremal degrees if needed. */
    pub fn add(&mut self, id: VertexId, deg: usize) {
        self.buckets.entry(deg).or_insert_with(BTreeSet::new).insert(id);
        self.recorded.insert(id, deg);
        if self.max_degree.map_or(true, |d| deg > d) {
            self.max_degree = Some(deg);
        }
        if self.min_degree.map_or(true, |d| deg < d) {
            self.min_degree = Some(deg);
        }
    }

    /** moves a vertex from bucket d to bucket d-1 (created in place if
    absent). Called once per deleted edge endpoint; O(log #buckets) here in
    place of the original O(1) linked-list splice, since the insertion point
    is found by key rather than by a neighbor pointer. */
    pub fn decrease(&mut self, id: VertexId) {
        let deg = match self.recorded.get(&id) {
            Some(d) => *d,
            None => return,
        };
        if deg == 0 {
            return; // already at the bottom; nothing to move
        }
        self.take_from_bucket(id, deg);
        self.buckets.entry(deg - 1).or_insert_with(BTreeSet::new).insert(id);
        self.recorded.insert(id, deg - 1);
        if self.min_degree.map_or(true, |d| deg - 1 < d) {
            self.min_degree = Some(deg - 1);
        }
    }

    /** evicts a vertex from the index entirely (vertex deletion or induced
    subgraph extraction). */
    pub fn remove(&mut self, id: VertexId) {
        if let Some(deg) = self.recorded.remove(&id) {
            self.take_from_bucket(id, deg);
        }
    }

    /// the degree bucket the vertex is recorded in, if indexed
    pub fn recorded_degree(&self, id: VertexId) -> Option<usize> {
        self.recorded.get(&id).copied()
    }

    /** degree of the highest non-empty bucket. Re-scans downward from the
    cached position if the old extremal bucket was emptied, or resets the
    cache to the "no max" sentinel once the structure is empty. */
    pub fn max_degree(&mut self) -> Option<usize> {
        let start = self.max_degree?;
        let found = self.buckets.range(..=start).rev()
            .find(|(_, b)| !b.is_empty())
            .map(|(d, _)| *d);
        self.max_degree = found;
        if found.is_none() {
            self.min_degree = None;
        }
        found
    }

    /** degree of the lowest non-empty bucket (upward re-scan, same discipline
    as `max_degree`). */
    pub fn min_degree(&mut self) -> Option<usize> {
        let start = self.min_degree?;
        let found = self.buckets.range(start..)
            .find(|(_, b)| !b.is_empty())
            .map(|(d, _)| *d);
        self.min_degree = found;
        if found.is_none() {
            self.max_degree = None;
        }
        found
    }

    /// first vertex of the highest non-empty bucket
    pub fn max_degree_vertex(&mut self) -> Option<VertexId> {
        let deg = self.max_degree()?;
        self.buckets[&deg].iter().next().copied()
    }

    /// first vertex of the lowest non-empty bucket
    pub fn min_degree_vertex(&mut self) -> Option<VertexId> {
        let deg = self.min_degree()?;
        self.buckets[&deg].iter().next().copied()
    }

    /// degrees of the non-empty buckets, ascending
    pub fn occupied_degrees(&self) -> Vec<usize> {
        self.buckets.iter()
            .filter(|(_, b)| !b.is_empty())
            .map(|(d, _)| *d)
            .collect()
    }

    /// vertices recorded at the given degree
    pub fn bucket(&self, deg: usize) -> Option<&BTreeSet<VertexId>> {
        self.buckets.get(&deg).filter(|b| !b.is_empty())
    }

    fn take_from_bucket(&mut self, id: VertexId, deg: usize) {
        let emptied = match self.buckets.get_mut(&deg) {
            Some(bucket) => {
                bucket.remove(&id);
                bucket.is_empty()
            }
            None => false,
        };
        if emptied {
            self.buckets.remove(&deg);
        }
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_and_extremal() {
        let mut idx = DegreeIndex::new();
        idx.add(1, 3);
        idx.add(2, 1);
        idx.add(3, 3);
        assert_eq!(idx.max_degree(), Some(3));
        assert_eq!(idx.min_degree(), Some(1));
        assert_eq!(idx.max_degree_vertex(), Some(1));
        assert_eq!(idx.min_degree_vertex(), Some(2));
    }

    #[test]
    fn test_decrease_moves_bucket() {
        let mut idx = DegreeIndex::new();
        idx.add(7, 2);
        idx.decrease(7);
        assert_eq!(idx.recorded_degree(7), Some(1));
        assert_eq!(idx.max_degree(), Some(1));
        assert_eq!(idx.min_degree(), Some(1));
        idx.decrease(7);
        idx.decrease(7); // already at 0, must be a no-op
        assert_eq!(idx.recorded_degree(7), Some(0));
        assert_eq!(idx.min_degree(), Some(0));
    }

    #[test]
    fn test_remove_rescans_extremal() {
        let mut idx = DegreeIndex::new();
        idx.add(1, 5);
        idx.add(2, 2);
        idx.add(3, 0);
        idx.remove(1);
        assert_eq!(idx.max_degree(), Some(2));
        idx.remove(3);
        assert_eq!(idx.min_degree(), Some(2));
        idx.remove(2);
        assert_eq!(idx.max_degree(), None);
        assert_eq!(idx.min_degree(), None);
        assert!(idx.is_empty());
    }

    #[test]
    fn test_occupied_degrees_ascending() {
        let mut idx = DegreeIndex::new();
        idx.add(1, 4);
        idx.add(2, 0);
        idx.add(3, 2);
        assert_eq!(idx.occupied_degrees(), vec![0, 2, 4]);
        idx.decrease(3);
        assert_eq!(idx.occupied_degrees(), vec![0, 1, 4]);
    }
}
