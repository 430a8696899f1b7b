//! Minimum spanning forests by Kruskal and Prim.
//!
//! Both read the graph as undirected, see
//! [`WeightedGraph::undirected_edges`]. On a disconnected graph Kruskal and
//! [`prim_spanning_forest`] return one tree per component, [`prim`] only the
//! tree of its start vertex.

use ahash::{HashMap, HashSet, HashSetExt};
use clap::ValueEnum;
use itertools::Itertools;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use super::union_find::DisjointSetForest;
use crate::{
    error::GraphError,
    graphs::{
        edge::{TaillessEdge, WeightedEdge},
        weighted_graph::WeightedGraph,
        Graph, Vertex, Weight,
    },
    search::frontier::{FrontierEntry, PriorityFrontier},
};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SpanningForest<V> {
    /// Accepted edges in the order they were added.
    pub edges: Vec<WeightedEdge<V>>,
    pub weight: Weight,
    pub number_of_trees: u32,
}

impl<V> SpanningForest<V> {
    fn from_edges(edges: Vec<WeightedEdge<V>>, number_of_trees: u32) -> SpanningForest<V> {
        let weight = edges.iter().map(|edge| edge.weight).sum();
        SpanningForest {
            edges,
            weight,
            number_of_trees,
        }
    }

    pub fn number_of_edges(&self) -> u32 {
        self.edges.len() as u32
    }
}

/// How Prim finds the cheapest edge leaving the tree.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
pub enum PrimFrontier {
    /// Crossing edges in a lazy priority frontier. Ties go to the edge
    /// discovered first.
    Heap,
    /// Rescans every crossing edge per step, O(|V| |E|). Ties go to the
    /// first edge in vertex visiting order.
    Scan,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
pub enum MstAlgorithm {
    Kruskal,
    Prim,
    PrimScan,
}

pub fn minimum_spanning_forest<V: Vertex>(
    graph: &WeightedGraph<V>,
    algorithm: MstAlgorithm,
) -> SpanningForest<V> {
    match algorithm {
        MstAlgorithm::Kruskal => kruskal(graph),
        MstAlgorithm::Prim => prim_spanning_forest(graph, PrimFrontier::Heap),
        MstAlgorithm::PrimScan => prim_spanning_forest(graph, PrimFrontier::Scan),
    }
}

/// Sorts the undirected edges by weight, ties in edge order, and accepts
/// every edge that joins two components.
pub fn kruskal<V: Vertex>(graph: &WeightedGraph<V>) -> SpanningForest<V> {
    let mut components = DisjointSetForest::from_elements(graph.vertices().cloned());
    let max_edges = graph.vertices().len().saturating_sub(1);

    let mut edges = Vec::new();
    for edge in graph
        .undirected_edges()
        .into_iter()
        .sorted_by(|a, b| a.weight.total_cmp(&b.weight))
    {
        if edges.len() == max_edges {
            break;
        }
        if components.union(&edge.tail, &edge.head) {
            trace!(tail = ?edge.tail, head = ?edge.head, weight = edge.weight, "accepting edge");
            edges.push(edge);
        }
    }

    let forest = SpanningForest::from_edges(edges, components.number_of_sets() as u32);
    debug!(
        edges = forest.edges.len(),
        weight = forest.weight,
        trees = forest.number_of_trees,
        "kruskal finished"
    );
    forest
}

/// Grows a single tree from `start`. Vertices outside the component of
/// `start` are left out.
pub fn prim<V: Vertex>(
    graph: &WeightedGraph<V>,
    start: &V,
    frontier: PrimFrontier,
) -> Result<SpanningForest<V>, GraphError> {
    if !graph.contains(start) {
        return Err(GraphError::unknown_node(start));
    }

    let adjacency = graph.undirected_adjacency();
    let mut visited = HashSet::new();
    let edges = grow_tree(&adjacency, start, frontier, &mut visited);

    let forest = SpanningForest::from_edges(edges, 1);
    debug!(
        start = ?start,
        edges = forest.edges.len(),
        weight = forest.weight,
        "prim finished"
    );
    Ok(forest)
}

/// Restarts [`prim`] at the first unvisited vertex until every vertex is
/// covered.
pub fn prim_spanning_forest<V: Vertex>(
    graph: &WeightedGraph<V>,
    frontier: PrimFrontier,
) -> SpanningForest<V> {
    let adjacency = graph.undirected_adjacency();
    let mut visited = HashSet::new();
    let mut edges = Vec::new();
    let mut number_of_trees = 0;

    for vertex in graph.vertices() {
        if visited.contains(vertex) {
            continue;
        }
        edges.extend(grow_tree(&adjacency, vertex, frontier, &mut visited));
        number_of_trees += 1;
    }

    let forest = SpanningForest::from_edges(edges, number_of_trees);
    debug!(
        ?frontier,
        edges = forest.edges.len(),
        weight = forest.weight,
        trees = forest.number_of_trees,
        "prim forest finished"
    );
    forest
}

type Adjacency<V> = HashMap<V, Vec<TaillessEdge<V>>>;

fn grow_tree<V: Vertex>(
    adjacency: &Adjacency<V>,
    start: &V,
    frontier: PrimFrontier,
    visited: &mut HashSet<V>,
) -> Vec<WeightedEdge<V>> {
    visited.insert(start.clone());
    match frontier {
        PrimFrontier::Heap => grow_with_heap(adjacency, start, visited),
        PrimFrontier::Scan => grow_with_scan(adjacency, start, visited),
    }
}

fn crossing_edges<'a, V: Vertex>(
    adjacency: &'a Adjacency<V>,
    tail: &'a V,
    visited: &'a HashSet<V>,
) -> impl Iterator<Item = &'a TaillessEdge<V>> + 'a {
    adjacency
        .get(tail)
        .into_iter()
        .flatten()
        .filter(move |edge| !visited.contains(&edge.head))
}

fn grow_with_heap<V: Vertex>(
    adjacency: &Adjacency<V>,
    start: &V,
    visited: &mut HashSet<V>,
) -> Vec<WeightedEdge<V>> {
    let mut queue = PriorityFrontier::new();
    for edge in crossing_edges(adjacency, start, visited) {
        queue.push(edge.set_tail(start.clone()), edge.weight);
    }

    let mut tree = Vec::new();
    // an edge whose head joined the tree in the meantime no longer crosses
    while let Some(FrontierEntry { item: edge, .. }) =
        queue.pop_open_by(|edge: &WeightedEdge<V>| visited.contains(&edge.head))
    {
        trace!(tail = ?edge.tail, head = ?edge.head, weight = edge.weight, "accepting edge");
        visited.insert(edge.head.clone());
        for next in crossing_edges(adjacency, &edge.head, visited) {
            queue.push(next.set_tail(edge.head.clone()), next.weight);
        }
        tree.push(edge);
    }
    tree
}

fn grow_with_scan<V: Vertex>(
    adjacency: &Adjacency<V>,
    start: &V,
    visited: &mut HashSet<V>,
) -> Vec<WeightedEdge<V>> {
    let mut tree_vertices = vec![start.clone()];
    let mut tree = Vec::new();

    loop {
        let mut cheapest: Option<WeightedEdge<V>> = None;
        for tail in &tree_vertices {
            for edge in crossing_edges(adjacency, tail, visited) {
                if cheapest
                    .as_ref()
                    .map_or(true, |cheapest| edge.weight < cheapest.weight)
                {
                    cheapest = Some(edge.set_tail(tail.clone()));
                }
            }
        }

        let Some(edge) = cheapest else {
            break;
        };
        trace!(tail = ?edge.tail, head = ?edge.head, weight = edge.weight, "accepting edge");
        visited.insert(edge.head.clone());
        tree_vertices.push(edge.head.clone());
        tree.push(edge);
    }
    tree
}
