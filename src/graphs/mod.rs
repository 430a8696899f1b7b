use std::{fmt::Debug, hash::Hash};

use self::edge::TaillessEdge;

pub mod builder;
pub mod edge;
pub mod fn_graph;
pub mod graph_factory;
pub mod grid;
pub mod weighted_graph;

pub type Weight = f64;
pub type Distance = f64;

/// Opaque node identifier. Any hashable, comparable, cloneable value works.
pub trait Vertex: Clone + Eq + Hash + Debug + Send + Sync {}

impl<T> Vertex for T where T: Clone + Eq + Hash + Debug + Send + Sync {}

/// Neighbor and edge cost accessor consumed by the search algorithms.
///
/// Implementations must not change while a search runs and must only report
/// non-negative weights.
pub trait Graph: Send + Sync {
    type Vertex: Vertex;

    fn out_edges(
        &self,
        tail: &Self::Vertex,
    ) -> Box<dyn Iterator<Item = TaillessEdge<Self::Vertex>> + '_>;

    fn contains(&self, vertex: &Self::Vertex) -> bool;
}
