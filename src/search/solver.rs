//! Frontier search realizing Dijkstra, A* and Greedy Best-First.

use ahash::HashMap;
use tracing::{debug, trace};

use super::{
    frontier::{FrontierEntry, PriorityFrontier},
    heuristics::{Heuristic, ZeroHeuristic},
    path::{reconstruct_path, Path},
    search_data::SearchData,
    Strategy,
};
use crate::{
    error::GraphError,
    graphs::{Distance, Graph, Vertex},
};

/// Outcome of one search. A missing path is a regular result and reports an
/// infinite distance.
#[derive(Clone, Debug, PartialEq)]
pub struct SearchResult<V> {
    pub path: Option<Path<V>>,
    /// Number of vertices closed before the search stopped.
    pub expanded: u32,
}

impl<V> SearchResult<V> {
    pub fn distance(&self) -> Distance {
        self.path
            .as_ref()
            .map(|path| path.distance)
            .unwrap_or(Distance::INFINITY)
    }

    pub fn is_found(&self) -> bool {
        self.path.is_some()
    }
}

/// Distances and predecessors of an exhaustive search from one source.
#[derive(Clone, Debug)]
pub struct ShortestPathTree<V: Vertex> {
    source: V,
    distances: HashMap<V, Distance>,
    predecessors: HashMap<V, V>,
    expanded: u32,
}

impl<V: Vertex> ShortestPathTree<V> {
    pub fn distance(&self, vertex: &V) -> Distance {
        self.distances
            .get(vertex)
            .copied()
            .unwrap_or(Distance::INFINITY)
    }

    pub fn distances(&self) -> &HashMap<V, Distance> {
        &self.distances
    }

    pub fn path(&self, target: &V) -> Option<Path<V>> {
        let distance = *self.distances.get(target)?;
        let vertices = reconstruct_path(&self.predecessors, &self.source, target)?;
        Some(Path { vertices, distance })
    }

    pub fn number_of_reached(&self) -> u32 {
        self.distances.len() as u32
    }

    pub fn expanded(&self) -> u32 {
        self.expanded
    }
}

/// One search loop, configured by a [`Strategy`] and a [`Heuristic`].
///
/// The graph supplies neighbors and edge costs. All per-run state is created
/// inside each call, so a solver can be shared between threads and reused.
///
/// Preconditions, not checked at run time: edge weights are non-negative,
/// and for [`Strategy::AStar`] the heuristic is admissible and consistent.
/// Breaking them does not fail, but returned distances may not be optimal.
pub struct ShortestPathSolver<'a, G: Graph, H> {
    graph: &'a G,
    strategy: Strategy,
    heuristic: H,
}

impl<'a, G: Graph> ShortestPathSolver<'a, G, ZeroHeuristic> {
    pub fn dijkstra(graph: &'a G) -> ShortestPathSolver<'a, G, ZeroHeuristic> {
        ShortestPathSolver {
            graph,
            strategy: Strategy::Dijkstra,
            heuristic: ZeroHeuristic,
        }
    }
}

impl<'a, G, H> ShortestPathSolver<'a, G, H>
where
    G: Graph,
    H: Heuristic<G::Vertex>,
{
    pub fn new(graph: &'a G, strategy: Strategy, heuristic: H) -> ShortestPathSolver<'a, G, H> {
        ShortestPathSolver {
            graph,
            strategy,
            heuristic,
        }
    }

    pub fn a_star(graph: &'a G, heuristic: H) -> ShortestPathSolver<'a, G, H> {
        Self::new(graph, Strategy::AStar, heuristic)
    }

    pub fn greedy_best_first(graph: &'a G, heuristic: H) -> ShortestPathSolver<'a, G, H> {
        Self::new(graph, Strategy::GreedyBestFirst, heuristic)
    }

    /// Searches from `source` until a vertex satisfying `is_goal` is popped.
    pub fn search<F>(
        &self,
        source: &G::Vertex,
        is_goal: F,
    ) -> Result<SearchResult<G::Vertex>, GraphError>
    where
        F: Fn(&G::Vertex) -> bool,
    {
        if !self.graph.contains(source) {
            return Err(GraphError::unknown_node(source));
        }

        debug!(strategy = ?self.strategy, source = ?source, "starting search");

        if is_goal(source) {
            return Ok(SearchResult {
                path: Some(Path {
                    vertices: vec![source.clone()],
                    distance: 0.0,
                }),
                expanded: 0,
            });
        }

        let (data, goal) = self.explore(source, Some(&is_goal));
        let path = goal.and_then(|goal| data.get_path(source, &goal));
        let result = SearchResult {
            path,
            expanded: data.number_of_closed(),
        };

        debug!(
            strategy = ?self.strategy,
            expanded = result.expanded,
            distance = result.distance(),
            "search finished"
        );

        Ok(result)
    }

    /// Point to point search. `target` has to be part of the graph.
    pub fn shortest_path(
        &self,
        source: &G::Vertex,
        target: &G::Vertex,
    ) -> Result<SearchResult<G::Vertex>, GraphError> {
        if !self.graph.contains(target) {
            return Err(GraphError::unknown_node(target));
        }
        self.search(source, |vertex| vertex == target)
    }

    /// Runs until the frontier is exhausted and keeps everything it found.
    ///
    /// Only [`Strategy::Dijkstra`] (or A* with a zero heuristic) yields
    /// shortest distances to every vertex; other strategies record the
    /// distances along the routes they happened to discover.
    pub fn single_source(
        &self,
        source: &G::Vertex,
    ) -> Result<ShortestPathTree<G::Vertex>, GraphError> {
        if !self.graph.contains(source) {
            return Err(GraphError::unknown_node(source));
        }

        let (data, _) = self.explore(source, None::<&fn(&G::Vertex) -> bool>);
        let expanded = data.number_of_closed();
        let (distances, predecessors, _) = data.into_parts();

        debug!(
            strategy = ?self.strategy,
            reached = distances.len(),
            expanded,
            "single source search finished"
        );

        Ok(ShortestPathTree {
            source: source.clone(),
            distances,
            predecessors,
            expanded,
        })
    }

    fn priority(&self, known: Distance, vertex: &G::Vertex) -> Distance {
        self.strategy
            .priority(known, || self.heuristic.estimate(vertex))
    }

    /// The shared relaxation loop. Returns the search state and the goal
    /// vertex, if one was popped.
    fn explore<F>(
        &self,
        source: &G::Vertex,
        is_goal: Option<&F>,
    ) -> (SearchData<G::Vertex>, Option<G::Vertex>)
    where
        F: Fn(&G::Vertex) -> bool,
    {
        let mut data = SearchData::new(source.clone());
        let mut frontier = PriorityFrontier::new();
        frontier.push(source.clone(), self.priority(0.0, source));

        while let Some(FrontierEntry { item: tail, priority, .. }) =
            frontier.pop_open(data.closed())
        {
            if is_goal.is_some_and(|is_goal| is_goal(&tail)) {
                return (data, Some(tail));
            }

            let distance_tail = data.get_distance(&tail);
            trace!(vertex = ?tail, distance = distance_tail, priority, "expanding");
            data.close(tail.clone());

            for edge in self.graph.out_edges(&tail) {
                // closed vertices are final, even where the strategy is not
                // optimal
                if data.is_closed(&edge.head) {
                    continue;
                }
                if let Some(distance_head) = data.relax(&tail, &edge.head, edge.weight) {
                    let priority = self.priority(distance_head, &edge.head);
                    frontier.push(edge.head, priority);
                }
            }
        }

        (data, None)
    }
}

pub fn dijkstra<G: Graph>(
    graph: &G,
    source: &G::Vertex,
    target: &G::Vertex,
) -> Result<SearchResult<G::Vertex>, GraphError> {
    ShortestPathSolver::dijkstra(graph).shortest_path(source, target)
}

pub fn dijkstra_single_source<G: Graph>(
    graph: &G,
    source: &G::Vertex,
) -> Result<ShortestPathTree<G::Vertex>, GraphError> {
    ShortestPathSolver::dijkstra(graph).single_source(source)
}

pub fn a_star<G, H>(
    graph: &G,
    source: &G::Vertex,
    target: &G::Vertex,
    heuristic: H,
) -> Result<SearchResult<G::Vertex>, GraphError>
where
    G: Graph,
    H: Heuristic<G::Vertex>,
{
    ShortestPathSolver::a_star(graph, heuristic).shortest_path(source, target)
}

/// Greedy Best-First search. Fast, but the returned path need not be a
/// shortest one; its distance is the real cost of the path found.
pub fn greedy_best_first<G, H>(
    graph: &G,
    source: &G::Vertex,
    target: &G::Vertex,
    heuristic: H,
) -> Result<SearchResult<G::Vertex>, GraphError>
where
    G: Graph,
    H: Heuristic<G::Vertex>,
{
    ShortestPathSolver::greedy_best_first(graph, heuristic).shortest_path(source, target)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graphs::{fn_graph::FnGraph, weighted_graph::WeightedGraph};

    fn diamond() -> WeightedGraph<char> {
        WeightedGraph::from_adjacency([
            ('A', vec![('B', 4.0), ('C', 2.0)]),
            ('B', vec![('A', 4.0), ('C', 1.0), ('D', 5.0)]),
            ('C', vec![('A', 2.0), ('B', 1.0), ('D', 8.0)]),
            ('D', vec![('B', 5.0), ('C', 8.0)]),
        ])
        .unwrap()
    }

    #[test]
    fn source_satisfying_goal_is_trivial() {
        let graph = diamond();
        let result = dijkstra(&graph, &'A', &'A').unwrap();
        assert_eq!(result.path.unwrap().vertices, vec!['A']);
        assert_eq!(result.expanded, 0);
    }

    #[test]
    fn unknown_source_and_target_are_errors() {
        let graph = diamond();
        assert!(matches!(
            dijkstra(&graph, &'X', &'A'),
            Err(GraphError::UnknownNode { .. })
        ));
        assert!(matches!(
            dijkstra(&graph, &'A', &'X'),
            Err(GraphError::UnknownNode { .. })
        ));
    }

    #[test]
    fn goal_predicate_stops_at_first_match() {
        let graph = diamond();
        let solver = ShortestPathSolver::dijkstra(&graph);
        let result = solver.search(&'A', |v| *v == 'B' || *v == 'D').unwrap();
        let path = result.path.unwrap();
        assert_eq!(path.vertices.last(), Some(&'B'));
        assert_eq!(path.distance, 3.0);
    }

    #[test]
    fn shortest_path_tree_covers_reachable_vertices() {
        let graph = diamond();
        let tree = dijkstra_single_source(&graph, &'A').unwrap();
        assert_eq!(tree.number_of_reached(), 4);
        assert_eq!(tree.expanded(), 4);
        assert_eq!(tree.distance(&'D'), 8.0);
        assert_eq!(tree.path(&'D').unwrap().vertices, vec!['A', 'C', 'B', 'D']);
    }

    #[test]
    fn implicit_graph_search() {
        // count up from 0 by +1 (cost 1) or *2 (cost 1)
        let graph = FnGraph::new(|n: &u32| vec![(n + 1, 1.0), (n * 2, 1.0)]);
        let result = dijkstra(&graph, &1, &10).unwrap();
        assert_eq!(result.distance(), 4.0);
        assert_eq!(result.path.unwrap().vertices, vec![1, 2, 4, 5, 10]);
    }
}
