use ahash::{HashMap, HashMapExt, HashSet, HashSetExt};

use super::{
    builder::GraphBuilder,
    edge::{TaillessEdge, WeightedEdge},
    Graph, Vertex, Weight,
};
use crate::error::GraphError;

/// Adjacency list graph over arbitrary vertex identifiers.
///
/// Vertices are enumerated in insertion order and every out edge list keeps
/// the order in which its edges were added, so iteration is stable for the
/// lifetime of the graph. Graphs are built through [`GraphBuilder`], which
/// guarantees that every edge references a known vertex and carries a finite,
/// non-negative weight.
#[derive(Clone, Debug)]
pub struct WeightedGraph<V: Vertex> {
    vertices: Vec<V>,
    out_edges: HashMap<V, Vec<TaillessEdge<V>>>,
}

impl<V: Vertex> Default for WeightedGraph<V> {
    fn default() -> Self {
        WeightedGraph {
            vertices: Vec::new(),
            out_edges: HashMap::new(),
        }
    }
}

impl<V: Vertex> WeightedGraph<V> {
    pub(crate) fn from_parts(
        vertices: Vec<V>,
        out_edges: HashMap<V, Vec<TaillessEdge<V>>>,
    ) -> WeightedGraph<V> {
        WeightedGraph {
            vertices,
            out_edges,
        }
    }

    pub fn builder() -> GraphBuilder<V> {
        GraphBuilder::new()
    }

    /// Builds a graph from a node -> [(neighbor, weight)] mapping.
    ///
    /// Every key is a vertex; a neighbor that never appears as a key makes the
    /// adjacency data malformed.
    pub fn from_adjacency<I, N>(adjacency: I) -> Result<WeightedGraph<V>, GraphError>
    where
        I: IntoIterator<Item = (V, N)>,
        N: IntoIterator<Item = (V, Weight)>,
    {
        let adjacency: Vec<(V, Vec<(V, Weight)>)> = adjacency
            .into_iter()
            .map(|(tail, neighbors)| (tail, neighbors.into_iter().collect()))
            .collect();

        let mut builder = GraphBuilder::new();
        builder.add_vertices(adjacency.iter().map(|(tail, _)| tail.clone()));
        for (tail, neighbors) in adjacency {
            for (head, weight) in neighbors {
                builder.add_edge(tail.clone(), head, weight);
            }
        }
        builder.build()
    }

    pub fn number_of_vertices(&self) -> u32 {
        self.vertices.len() as u32
    }

    pub fn number_of_edges(&self) -> u32 {
        self.out_edges.values().map(Vec::len).sum::<usize>() as u32
    }

    pub fn vertices(&self) -> impl ExactSizeIterator<Item = &V> + '_ {
        self.vertices.iter()
    }

    pub fn neighbors(&self, tail: &V) -> &[TaillessEdge<V>] {
        self.out_edges
            .get(tail)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// All directed edges, grouped by tail in vertex order.
    pub fn edges(&self) -> impl Iterator<Item = WeightedEdge<V>> + '_ {
        self.vertices.iter().flat_map(move |tail| {
            self.neighbors(tail)
                .iter()
                .map(move |edge| edge.set_tail(tail.clone()))
        })
    }

    pub fn get_edge_weight(&self, tail: &V, head: &V) -> Option<Weight> {
        self.neighbors(tail)
            .iter()
            .filter(|edge| &edge.head == head)
            .map(|edge| edge.weight)
            .min_by(|a, b| a.total_cmp(b))
    }

    /// Edges of the graph read as undirected.
    ///
    /// A directed edge whose reverse with the same weight was already emitted
    /// is skipped, so the two halves of an undirected edge appear once.
    pub fn undirected_edges(&self) -> Vec<WeightedEdge<V>> {
        let position: HashMap<&V, usize> = self
            .vertices
            .iter()
            .enumerate()
            .map(|(index, vertex)| (vertex, index))
            .collect();

        let mut emitted: HashSet<(usize, usize, u64)> = HashSet::new();
        let mut undirected = Vec::new();
        for edge in self.edges() {
            let (tail, head) = (position[&edge.tail], position[&edge.head]);
            let key = (
                std::cmp::min(tail, head),
                std::cmp::max(tail, head),
                edge.weight.to_bits(),
            );
            if emitted.insert(key) {
                undirected.push(edge);
            }
        }
        undirected
    }

    /// Out edge lists of the graph read as undirected, see
    /// [`WeightedGraph::undirected_edges`].
    pub fn undirected_adjacency(&self) -> HashMap<V, Vec<TaillessEdge<V>>> {
        let mut adjacency: HashMap<V, Vec<TaillessEdge<V>>> = HashMap::new();
        for edge in self.undirected_edges() {
            if edge.tail != edge.head {
                adjacency
                    .entry(edge.head.clone())
                    .or_default()
                    .push(edge.reversed().tailless());
            }
            adjacency
                .entry(edge.tail.clone())
                .or_default()
                .push(edge.tailless());
        }
        adjacency
    }

    pub fn reversed(&self) -> WeightedGraph<V> {
        let mut out_edges: HashMap<V, Vec<TaillessEdge<V>>> = self
            .vertices
            .iter()
            .map(|vertex| (vertex.clone(), Vec::new()))
            .collect();
        for edge in self.edges() {
            out_edges
                .entry(edge.head.clone())
                .or_default()
                .push(edge.reversed().tailless());
        }
        WeightedGraph {
            vertices: self.vertices.clone(),
            out_edges,
        }
    }

    pub fn is_bidirectional(&self) -> bool {
        self.edges().all(|edge| {
            self.neighbors(&edge.head)
                .iter()
                .any(|back| back.head == edge.tail && back.weight == edge.weight)
        })
    }
}

impl<V: Vertex> Graph for WeightedGraph<V> {
    type Vertex = V;

    fn out_edges(&self, tail: &V) -> Box<dyn Iterator<Item = TaillessEdge<V>> + '_> {
        Box::new(self.neighbors(tail).iter().cloned())
    }

    fn contains(&self, vertex: &V) -> bool {
        self.out_edges.contains_key(vertex)
    }
}
