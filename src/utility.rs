use std::time::Instant;

use ahash::{HashSet, HashSetExt};
use indicatif::{ParallelProgressIterator, ProgressBar, ProgressIterator, ProgressStyle};
use rand::{rngs::StdRng, Rng, SeedableRng};
use rayon::iter::{IntoParallelRefIterator, ParallelIterator};

use crate::{
    error::{GraphError, ValidationError},
    graphs::{builder::GraphBuilder, weighted_graph::WeightedGraph, Distance, Vertex, Weight},
    search::{
        heuristics::Heuristic,
        path::{Path, ShortestPathRequest, ShortestPathTestCase, ShortestPathTestTimingResult},
        solver::{dijkstra, ShortestPathSolver},
        Strategy,
    },
};

pub fn get_progressbar(job_name: &str, len: u64) -> ProgressBar {
    let bar = ProgressBar::new(len);
    bar.set_message(job_name.to_string());
    bar.set_style(
        ProgressStyle::with_template(" {msg} {wide_bar} {human_pos}/{human_len} {eta_precise}")
            .unwrap_or_else(|_| ProgressStyle::default_bar()),
    );
    bar
}

pub fn get_progressspinner(job_name: &str) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    spinner.set_message(job_name.to_string());
    spinner.enable_steady_tick(std::time::Duration::from_millis(100));
    spinner
}

/// Random graph on the vertices `0..number_of_vertices` with up to
/// `number_of_edges` edges and integral weights in `0..=max_weight`. Self
/// loops are skipped and parallel edges collapse, so the edge count may be
/// lower.
pub fn random_graph<R: Rng>(
    rng: &mut R,
    number_of_vertices: u32,
    number_of_edges: u32,
    max_weight: u32,
    bidirectional: bool,
) -> Result<WeightedGraph<u32>, GraphError> {
    let mut builder = GraphBuilder::new();
    builder.add_vertices(0..number_of_vertices);

    if number_of_vertices > 1 {
        for _ in 0..number_of_edges {
            let tail = rng.gen_range(0..number_of_vertices);
            let head = rng.gen_range(0..number_of_vertices);
            if tail == head {
                continue;
            }
            let weight = rng.gen_range(0..=max_weight) as Weight;
            if bidirectional {
                builder.add_edge_bidirectional(tail, head, weight);
            } else {
                builder.add_edge(tail, head, weight);
            }
        }
    }

    builder.build()
}

/// Shortest distance by enumerating every simple path. Exponential, only
/// meant as a reference on small graphs.
pub fn brute_force_distance<V: Vertex>(
    graph: &WeightedGraph<V>,
    source: &V,
    target: &V,
) -> Distance {
    fn visit<V: Vertex>(
        graph: &WeightedGraph<V>,
        current: &V,
        target: &V,
        distance: Distance,
        on_path: &mut HashSet<V>,
        best: &mut Distance,
    ) {
        if current == target {
            *best = best.min(distance);
            return;
        }
        for edge in graph.neighbors(current) {
            if on_path.insert(edge.head.clone()) {
                visit(graph, &edge.head, target, distance + edge.weight, on_path, best);
                on_path.remove(&edge.head);
            }
        }
    }

    let mut on_path = HashSet::new();
    on_path.insert(source.clone());
    let mut best = Distance::INFINITY;
    visit(graph, source, target, 0.0, &mut on_path, &mut best);
    best
}

/// Random source/target pairs with their Dijkstra distance. The pairs are
/// drawn from a generator seeded with `seed`, the distances are computed in
/// parallel.
pub fn generate_test_cases<V: Vertex>(
    graph: &WeightedGraph<V>,
    number_of_tests: u32,
    seed: u64,
) -> Result<Vec<ShortestPathTestCase<V>>, GraphError> {
    let vertices: Vec<V> = graph.vertices().cloned().collect();
    if vertices.is_empty() {
        return Ok(Vec::new());
    }

    let mut rng = StdRng::seed_from_u64(seed);
    let requests: Vec<ShortestPathRequest<V>> = (0..number_of_tests)
        .map(|_| ShortestPathRequest {
            source: vertices[rng.gen_range(0..vertices.len())].clone(),
            target: vertices[rng.gen_range(0..vertices.len())].clone(),
        })
        .collect();

    requests
        .par_iter()
        .progress_with(get_progressbar(
            "Generating test cases",
            requests.len() as u64,
        ))
        .map(|request| {
            let result = dijkstra(graph, &request.source, &request.target)?;
            Ok::<_, GraphError>(ShortestPathTestCase {
                request: request.clone(),
                distance: result.path.map(|path| path.distance),
            })
        })
        .collect()
}

/// Checks a path against a test case.
///
/// With `require_optimal` the distance has to match exactly, otherwise it
/// may not be below the optimum. In both cases the path has to run from
/// source to target over existing edges that sum up to its distance.
pub fn validate_path<V: Vertex>(
    graph: &WeightedGraph<V>,
    test_case: &ShortestPathTestCase<V>,
    path: Option<&Path<V>>,
    require_optimal: bool,
) -> Result<(), ValidationError> {
    let (path, expected) = match (path, test_case.distance) {
        (None, None) => return Ok(()),
        (None, Some(_)) => return Err(ValidationError::MissingPath),
        (Some(_), None) => return Err(ValidationError::UnexpectedPath),
        (Some(path), Some(expected)) => (path, expected),
    };

    if require_optimal && path.distance != expected {
        return Err(ValidationError::WrongDistance {
            expected,
            actual: path.distance,
        });
    }
    if path.distance < expected {
        return Err(ValidationError::BelowOptimum {
            expected,
            actual: path.distance,
        });
    }

    // Ensure first and last vertex of path are source and target of request.
    match (path.vertices.first(), path.vertices.last()) {
        (Some(first), Some(last)) => {
            if first != &test_case.request.source {
                return Err(ValidationError::WrongSource);
            }
            if last != &test_case.request.target {
                return Err(ValidationError::WrongTarget);
            }
        }
        _ => return Err(ValidationError::EmptyPath),
    }

    // check if there is an edge between consecutive path vertices.
    let mut true_distance: Distance = 0.0;
    for pair in path.vertices.windows(2) {
        let weight = graph
            .get_edge_weight(&pair[0], &pair[1])
            .ok_or_else(|| ValidationError::MissingEdge {
                tail: format!("{:?}", pair[0]),
                head: format!("{:?}", pair[1]),
            })?;
        true_distance += weight;
    }

    if true_distance != path.distance {
        return Err(ValidationError::WrongDistance {
            expected: true_distance,
            actual: path.distance,
        });
    }

    Ok(())
}

/// Answers every test case with `strategy`, validates and times it.
/// `heuristic_for` builds the heuristic for a target.
pub fn validate_and_time<V, H, F>(
    graph: &WeightedGraph<V>,
    test_cases: &[ShortestPathTestCase<V>],
    strategy: Strategy,
    heuristic_for: F,
) -> Result<Vec<ShortestPathTestTimingResult<V>>, ValidationError>
where
    V: Vertex,
    H: Heuristic<V>,
    F: Fn(&V) -> H,
{
    test_cases
        .iter()
        .progress_with(get_progressbar(
            "Validating test cases",
            test_cases.len() as u64,
        ))
        .map(|test_case| {
            let request = &test_case.request;
            let solver = ShortestPathSolver::new(graph, strategy, heuristic_for(&request.target));

            let start = Instant::now();
            let result = solver.shortest_path(&request.source, &request.target)?;
            let timing_in_seconds = start.elapsed().as_secs_f64();

            validate_path(graph, test_case, result.path.as_ref(), strategy.is_optimal())?;

            Ok::<_, ValidationError>(ShortestPathTestTimingResult {
                test_case: test_case.clone(),
                distance: result.path.map(|path| path.distance),
                expanded: result.expanded,
                timing_in_seconds,
            })
        })
        .collect()
}
