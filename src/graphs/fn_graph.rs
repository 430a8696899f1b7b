use std::marker::PhantomData;

use super::{edge::TaillessEdge, Graph, Vertex, Weight};

/// Wraps a successor function as a [`Graph`], for state spaces that are never
/// materialized. Every vertex is considered part of the graph.
pub struct FnGraph<V, F> {
    successors: F,
    vertex: PhantomData<fn() -> V>,
}

impl<V, F> FnGraph<V, F>
where
    V: Vertex,
    F: Fn(&V) -> Vec<(V, Weight)> + Send + Sync,
{
    pub fn new(successors: F) -> FnGraph<V, F> {
        FnGraph {
            successors,
            vertex: PhantomData,
        }
    }
}

impl<V, F> Graph for FnGraph<V, F>
where
    V: Vertex,
    F: Fn(&V) -> Vec<(V, Weight)> + Send + Sync,
{
    type Vertex = V;

    fn out_edges(&self, tail: &V) -> Box<dyn Iterator<Item = TaillessEdge<V>> + '_> {
        Box::new(
            (self.successors)(tail)
                .into_iter()
                .map(|(head, weight)| TaillessEdge::new(head, weight)),
        )
    }

    fn contains(&self, _vertex: &V) -> bool {
        true
    }
}
