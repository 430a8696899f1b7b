//! Incremental, validating graph construction.

use ahash::{HashMap, HashMapExt, HashSet, HashSetExt};
use tracing::warn;

use super::{
    edge::{TaillessEdge, WeightedEdge},
    weighted_graph::WeightedGraph,
    Vertex, Weight,
};
use crate::error::GraphError;

/// Collects vertices and edges, then validates and freezes them into a
/// [`WeightedGraph`].
///
/// Edges may only connect declared vertices. Validation happens in
/// [`GraphBuilder::build`], so malformed input never reaches a solver.
#[derive(Clone, Debug)]
pub struct GraphBuilder<V: Vertex> {
    vertices: Vec<V>,
    known: HashSet<V>,
    edges: Vec<WeightedEdge<V>>,
}

impl<V: Vertex> Default for GraphBuilder<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V: Vertex> GraphBuilder<V> {
    pub fn new() -> GraphBuilder<V> {
        GraphBuilder {
            vertices: Vec::new(),
            known: HashSet::new(),
            edges: Vec::new(),
        }
    }

    /// Declares a vertex. Declaring a vertex twice is a no-op.
    pub fn add_vertex(&mut self, vertex: V) -> &mut Self {
        if self.known.insert(vertex.clone()) {
            self.vertices.push(vertex);
        }
        self
    }

    pub fn add_vertices(&mut self, vertices: impl IntoIterator<Item = V>) -> &mut Self {
        vertices.into_iter().for_each(|vertex| {
            self.add_vertex(vertex);
        });
        self
    }

    pub fn add_edge(&mut self, tail: V, head: V, weight: Weight) -> &mut Self {
        self.edges.push(WeightedEdge::new(tail, head, weight));
        self
    }

    /// Adds `tail -> head` and `head -> tail` with the same weight.
    pub fn add_edge_bidirectional(&mut self, tail: V, head: V, weight: Weight) -> &mut Self {
        self.add_edge(tail.clone(), head.clone(), weight);
        self.add_edge(head, tail, weight)
    }

    pub fn number_of_vertices(&self) -> u32 {
        self.vertices.len() as u32
    }

    pub fn number_of_edges(&self) -> u32 {
        self.edges.len() as u32
    }

    /// Validates every edge and builds the graph.
    ///
    /// Parallel edges between the same ordered pair collapse into one edge
    /// carrying the smallest weight.
    pub fn build(self) -> Result<WeightedGraph<V>, GraphError> {
        self.edges
            .iter()
            .try_for_each(|edge| Self::validate_edge(&self.known, edge))?;

        let mut out_edges: HashMap<V, Vec<TaillessEdge<V>>> =
            HashMap::with_capacity(self.vertices.len());
        for vertex in self.vertices.iter() {
            out_edges.insert(vertex.clone(), Vec::new());
        }

        for edge in self.edges {
            // after validation the tail is always present
            let Some(edges_sharing_tail) = out_edges.get_mut(&edge.tail) else {
                continue;
            };
            match edges_sharing_tail
                .iter_mut()
                .find(|existing| existing.head == edge.head)
            {
                Some(existing) => {
                    warn!(
                        tail = ?edge.tail,
                        head = ?edge.head,
                        kept = existing.weight.min(edge.weight),
                        "merging parallel edges"
                    );
                    existing.weight = existing.weight.min(edge.weight);
                }
                None => edges_sharing_tail.push(edge.tailless()),
            }
        }

        Ok(WeightedGraph::from_parts(self.vertices, out_edges))
    }

    fn validate_edge(known: &HashSet<V>, edge: &WeightedEdge<V>) -> Result<(), GraphError> {
        for endpoint in [&edge.tail, &edge.head] {
            if !known.contains(endpoint) {
                return Err(GraphError::InvalidGraph {
                    reason: format!(
                        "edge {:?} -> {:?} references unknown node {:?}",
                        edge.tail, edge.head, endpoint
                    ),
                });
            }
        }

        if !edge.weight.is_finite() {
            return Err(GraphError::InvalidGraph {
                reason: format!(
                    "edge {:?} -> {:?} has non-finite weight {}",
                    edge.tail, edge.head, edge.weight
                ),
            });
        }

        if edge.weight < 0.0 {
            return Err(GraphError::NegativeWeight {
                tail: format!("{:?}", edge.tail),
                head: format!("{:?}", edge.head),
                weight: edge.weight,
            });
        }

        Ok(())
    }
}
