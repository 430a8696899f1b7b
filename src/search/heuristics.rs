use crate::{
    error::GraphError,
    graphs::{weighted_graph::WeightedGraph, Distance, Vertex},
    search::solver::dijkstra_single_source,
};

/// Estimate of the remaining cost from a vertex to the goal of a search.
///
/// A* is optimal only if the estimate is admissible (never above the true
/// remaining cost) and consistent (`estimate(u) <= weight(u, v) +
/// estimate(v)` for every edge). Neither property is checked while a search
/// runs; [`is_consistent`] and [`is_admissible`] test them up front.
pub trait Heuristic<V>: Send + Sync {
    fn estimate(&self, vertex: &V) -> Distance;
}

/// Constant zero estimate. Turns A* into Dijkstra.
#[derive(Clone, Copy, Debug, Default)]
pub struct ZeroHeuristic;

impl<V> Heuristic<V> for ZeroHeuristic {
    fn estimate(&self, _vertex: &V) -> Distance {
        0.0
    }
}

impl<V, F> Heuristic<V> for F
where
    F: Fn(&V) -> Distance + Send + Sync,
{
    fn estimate(&self, vertex: &V) -> Distance {
        self(vertex)
    }
}

pub fn is_consistent<V: Vertex>(graph: &WeightedGraph<V>, heuristic: &impl Heuristic<V>) -> bool {
    graph
        .edges()
        .all(|edge| heuristic.estimate(&edge.tail) <= edge.weight + heuristic.estimate(&edge.head))
}

/// Compares the estimate with the true distance to `goal` for every vertex.
/// Vertices that cannot reach the goal are not constrained.
pub fn is_admissible<V: Vertex>(
    graph: &WeightedGraph<V>,
    heuristic: &impl Heuristic<V>,
    goal: &V,
) -> Result<bool, GraphError> {
    let to_goal = dijkstra_single_source(&graph.reversed(), goal)?;
    Ok(graph
        .vertices()
        .all(|vertex| heuristic.estimate(vertex) <= to_goal.distance(vertex)))
}
