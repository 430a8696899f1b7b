use ahash::HashMap;
use serde::{Deserialize, Serialize};

use crate::graphs::{Distance, Vertex};

/// Represents a path in a graph.
///
/// This struct encapsulates the vertices that form a path, source and target
/// included, and the total weight of traversing it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Path<V> {
    pub vertices: Vec<V>,
    pub distance: Distance,
}

/// Represents a request for finding a shortest path in a graph.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ShortestPathRequest<V> {
    pub source: V,
    pub target: V,
}

/// Represents a request for validating a shortest path in a graph.
///
/// This struct is used to encapsulate a shortest path request along with the
/// distance of a shortest path, if there exists one.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ShortestPathTestCase<V> {
    pub request: ShortestPathRequest<V>,
    pub distance: Option<Distance>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ShortestPathTestTimingResult<V> {
    pub test_case: ShortestPathTestCase<V>,
    pub distance: Option<Distance>,
    pub expanded: u32,
    pub timing_in_seconds: f64,
}

/// Walks the predecessor chain from `target` back to `source`.
///
/// Returns `None` if the chain does not end at `source`, which covers a
/// target that was never reached, and if the chain loops.
pub fn reconstruct_path<V: Vertex>(
    predecessors: &HashMap<V, V>,
    source: &V,
    target: &V,
) -> Option<Vec<V>> {
    let mut vertices = vec![target.clone()];

    let mut current = target;
    while let Some(predecessor) = predecessors.get(current) {
        vertices.push(predecessor.clone());
        // a simple chain visits every key at most once
        if vertices.len() > predecessors.len() + 1 {
            return None;
        }
        current = predecessor;
    }

    if current != source {
        return None;
    }

    vertices.reverse();
    Some(vertices)
}
