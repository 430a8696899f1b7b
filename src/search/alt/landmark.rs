use ahash::HashMap;
use indicatif::ParallelProgressIterator;
use rand::{seq::IteratorRandom, Rng};
use rayon::iter::{IntoParallelRefIterator, ParallelIterator};

use crate::{
    error::GraphError,
    graphs::{weighted_graph::WeightedGraph, Distance, Vertex},
    search::{heuristics::Heuristic, solver::dijkstra_single_source},
    utility::get_progressbar,
};

/// Precomputed distances from and to one landmark vertex.
pub struct Landmark<V: Vertex> {
    pub vertex: V,
    distance_to: HashMap<V, Distance>,
    distance_from: HashMap<V, Distance>,
}

impl<V: Vertex> Landmark<V> {
    pub fn new(graph: &WeightedGraph<V>, vertex: V) -> Result<Landmark<V>, GraphError> {
        let distance_to = dijkstra_single_source(graph, &vertex)?.distances().clone();
        let distance_from = dijkstra_single_source(&graph.reversed(), &vertex)?
            .distances()
            .clone();

        Ok(Landmark {
            vertex,
            distance_to,
            distance_from,
        })
    }

    /// Lower bound on the distance from `vertex` to `target`, by the triangle
    /// inequality over the landmark. Infinite if `vertex` provably cannot
    /// reach `target`.
    pub fn lower_bound(&self, vertex: &V, target: &V) -> Distance {
        let forward = match (self.distance_to.get(target), self.distance_to.get(vertex)) {
            (Some(to_target), Some(to_vertex)) => (to_target - to_vertex).max(0.0),
            // the landmark reaches vertex but not target
            (None, Some(_)) => Distance::INFINITY,
            (_, None) => 0.0,
        };

        let backward = match (self.distance_from.get(vertex), self.distance_from.get(target)) {
            (Some(from_vertex), Some(from_target)) => (from_vertex - from_target).max(0.0),
            // target reaches the landmark but vertex does not
            (None, Some(_)) => Distance::INFINITY,
            (_, None) => 0.0,
        };

        forward.max(backward)
    }
}

pub struct Landmarks<V: Vertex> {
    pub landmarks: Vec<Landmark<V>>,
}

impl<V: Vertex> Landmarks<V> {
    pub fn new(graph: &WeightedGraph<V>, vertices: &[V]) -> Result<Landmarks<V>, GraphError> {
        let landmarks = vertices
            .par_iter()
            .progress_with(get_progressbar(
                "Generating landmarks",
                vertices.len() as u64,
            ))
            .map(|vertex| Landmark::new(graph, vertex.clone()))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Landmarks { landmarks })
    }

    pub fn random<R: Rng>(
        graph: &WeightedGraph<V>,
        number_of_landmarks: u32,
        rng: &mut R,
    ) -> Result<Landmarks<V>, GraphError> {
        let vertices = graph
            .vertices()
            .cloned()
            .choose_multiple(rng, number_of_landmarks as usize);
        Self::new(graph, &vertices)
    }

    pub fn lower_bound(&self, vertex: &V, target: &V) -> Distance {
        self.landmarks
            .iter()
            .map(|landmark| landmark.lower_bound(vertex, target))
            .fold(0.0, Distance::max)
    }

    /// A* heuristic towards `target`. Admissible and consistent on any graph
    /// with non-negative weights.
    pub fn heuristic(&self, target: V) -> LandmarkHeuristic<'_, V> {
        LandmarkHeuristic {
            landmarks: self,
            target,
        }
    }
}

pub struct LandmarkHeuristic<'a, V: Vertex> {
    landmarks: &'a Landmarks<V>,
    target: V,
}

impl<'a, V: Vertex> Heuristic<V> for LandmarkHeuristic<'a, V> {
    fn estimate(&self, vertex: &V) -> Distance {
        self.landmarks.lower_bound(vertex, &self.target)
    }
}
