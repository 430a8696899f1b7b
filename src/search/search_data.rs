use ahash::{HashMap, HashMapExt, HashSet, HashSetExt};

use super::path::{reconstruct_path, Path};
use crate::graphs::{Distance, Vertex, Weight};

/// Per-run state of a frontier search: distances, predecessors and the set of
/// closed vertices.
///
/// A vertex without a distance entry is at infinite distance. Distances only
/// ever decrease, and a predecessor is written in the same step as the
/// distance it explains.
pub struct SearchData<V: Vertex> {
    distances: HashMap<V, Distance>,
    predecessors: HashMap<V, V>,
    closed: HashSet<V>,
}

impl<V: Vertex> SearchData<V> {
    pub fn new(source: V) -> SearchData<V> {
        let mut distances = HashMap::new();
        distances.insert(source, 0.0);
        SearchData {
            distances,
            predecessors: HashMap::new(),
            closed: HashSet::new(),
        }
    }

    pub fn get_distance(&self, vertex: &V) -> Distance {
        self.distances
            .get(vertex)
            .copied()
            .unwrap_or(Distance::INFINITY)
    }

    pub fn get_predecessor(&self, vertex: &V) -> Option<&V> {
        self.predecessors.get(vertex)
    }

    /// Offers the route `tail -> head`. Returns the new distance of `head` if
    /// the route is strictly shorter than the recorded one.
    pub fn relax(&mut self, tail: &V, head: &V, edge_weight: Weight) -> Option<Distance> {
        let alternative_distance = self.get_distance(tail) + edge_weight;
        if alternative_distance < self.get_distance(head) {
            self.distances.insert(head.clone(), alternative_distance);
            self.predecessors.insert(head.clone(), tail.clone());
            return Some(alternative_distance);
        }
        None
    }

    /// Marks `vertex` as final. Returns false if it already was.
    pub fn close(&mut self, vertex: V) -> bool {
        self.closed.insert(vertex)
    }

    pub fn is_closed(&self, vertex: &V) -> bool {
        self.closed.contains(vertex)
    }

    pub fn closed(&self) -> &HashSet<V> {
        &self.closed
    }

    pub fn number_of_closed(&self) -> u32 {
        self.closed.len() as u32
    }

    pub fn distances(&self) -> &HashMap<V, Distance> {
        &self.distances
    }

    pub fn get_path(&self, source: &V, target: &V) -> Option<Path<V>> {
        let distance = self.get_distance(target);
        if distance == Distance::INFINITY {
            return None;
        }

        let vertices = reconstruct_path(&self.predecessors, source, target)?;
        Some(Path { vertices, distance })
    }

    pub fn into_parts(self) -> (HashMap<V, Distance>, HashMap<V, V>, HashSet<V>) {
        (self.distances, self.predecessors, self.closed)
    }
}
