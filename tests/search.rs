use frontier_paths::{
    error::GraphError,
    graphs::{
        grid::{Cell, Grid},
        weighted_graph::WeightedGraph,
        Distance,
    },
    search::{
        heuristics::ZeroHeuristic,
        solver::{a_star, dijkstra, dijkstra_single_source, greedy_best_first, ShortestPathSolver},
        Strategy,
    },
    utility::{brute_force_distance, validate_path},
};

fn get_small_graph() -> WeightedGraph<char> {
    WeightedGraph::from_adjacency([
        ('A', vec![('B', 4.0), ('C', 2.0)]),
        ('B', vec![('C', 1.0), ('D', 5.0)]),
        ('C', vec![('D', 8.0)]),
        ('D', vec![]),
    ])
    .unwrap()
}

fn get_directed_graph() -> WeightedGraph<char> {
    WeightedGraph::from_adjacency([
        ('A', vec![('B', 4.0), ('C', 2.0)]),
        ('B', vec![('C', 1.0), ('D', 5.0)]),
        ('C', vec![('D', 8.0), ('E', 10.0)]),
        ('D', vec![('E', 2.0), ('F', 6.0)]),
        ('E', vec![('F', 3.0)]),
        ('F', vec![]),
    ])
    .unwrap()
}

fn get_ch_lecture_graph() -> WeightedGraph<u32> {
    // https://jlazarsfeld.github.io/ch.150.project/img/contraction/contract-full-1.png
    let mut builder = WeightedGraph::builder();
    builder.add_vertices(0..11);
    for (tail, head, weight) in [
        (0, 1, 3.0),
        (0, 2, 5.0),
        (0, 10, 3.0),
        (1, 2, 3.0),
        (1, 3, 5.0),
        (2, 3, 2.0),
        (2, 9, 2.0),
        (3, 4, 7.0),
        (3, 9, 4.0),
        (4, 5, 6.0),
        (4, 9, 3.0),
        (5, 6, 4.0),
        (5, 7, 2.0),
        (6, 7, 3.0),
        (6, 8, 5.0),
        (7, 8, 3.0),
        (7, 9, 2.0),
        (8, 9, 4.0),
        (8, 10, 6.0),
        (9, 10, 3.0),
    ] {
        builder.add_edge_bidirectional(tail, head, weight);
    }
    builder.build().unwrap()
}

#[test]
fn dijkstra_small_graph() {
    let graph = get_small_graph();
    let tree = dijkstra_single_source(&graph, &'A').unwrap();
    for (vertex, distance) in [('A', 0.0), ('B', 4.0), ('C', 2.0), ('D', 9.0)] {
        assert_eq!(tree.distance(&vertex), distance);
    }

    let result = dijkstra(&graph, &'A', &'D').unwrap();
    let path = result.path.unwrap();
    assert_eq!(path.distance, 9.0);
    assert_eq!(path.vertices, vec!['A', 'B', 'D']);
}

#[test]
fn dijkstra_directed_graph() {
    let graph = get_directed_graph();
    let tree = dijkstra_single_source(&graph, &'A').unwrap();
    for (vertex, distance) in [
        ('A', 0.0),
        ('B', 4.0),
        ('C', 2.0),
        ('D', 9.0),
        ('E', 11.0),
        ('F', 14.0),
    ] {
        assert_eq!(tree.distance(&vertex), distance);
    }
    assert_eq!(
        tree.path(&'F').unwrap().vertices,
        vec!['A', 'B', 'D', 'E', 'F']
    );
}

#[test]
fn unreachable_is_not_an_error() {
    let graph = get_directed_graph();
    let result = dijkstra(&graph, &'F', &'A').unwrap();
    assert!(!result.is_found());
    assert_eq!(result.distance(), Distance::INFINITY);
    assert_eq!(result.expanded, 1);

    let tree = dijkstra_single_source(&graph, &'D').unwrap();
    assert_eq!(tree.number_of_reached(), 3);
    assert!(tree.path(&'A').is_none());
}

#[test]
fn unknown_nodes_are_errors() {
    let graph = get_small_graph();
    assert_eq!(
        dijkstra(&graph, &'Z', &'A'),
        Err(GraphError::UnknownNode {
            node: "'Z'".to_string()
        })
    );
    assert!(matches!(
        a_star(&graph, &'A', &'Z', ZeroHeuristic),
        Err(GraphError::UnknownNode { .. })
    ));
    assert!(matches!(
        dijkstra_single_source(&graph, &'Z'),
        Err(GraphError::UnknownNode { .. })
    ));
}

#[test]
fn equal_costs_prefer_first_discovered() {
    let graph = WeightedGraph::from_adjacency([
        ('A', vec![('B', 1.0), ('C', 1.0)]),
        ('B', vec![('D', 1.0)]),
        ('C', vec![('D', 1.0)]),
        ('D', vec![]),
    ])
    .unwrap();
    for _ in 0..10 {
        let path = dijkstra(&graph, &'A', &'D').unwrap().path.unwrap();
        assert_eq!(path.vertices, vec!['A', 'B', 'D']);
    }
}

#[test]
fn dijkstra_matches_brute_force() {
    let graph = get_ch_lecture_graph();
    for source in graph.vertices() {
        let tree = dijkstra_single_source(&graph, source).unwrap();
        for target in graph.vertices() {
            assert_eq!(
                tree.distance(target),
                brute_force_distance(&graph, source, target)
            );
        }
    }
}

#[test]
fn greedy_best_first_may_miss_the_optimum() {
    // the estimate lures the search over A
    let graph = WeightedGraph::from_adjacency([
        ('S', vec![('A', 1.0), ('B', 5.0)]),
        ('A', vec![('G', 10.0)]),
        ('B', vec![('G', 1.0)]),
        ('G', vec![]),
    ])
    .unwrap();
    let estimate = |vertex: &char| if *vertex == 'B' { 5.0 } else { 0.0 };

    let greedy = greedy_best_first(&graph, &'S', &'G', estimate).unwrap();
    let greedy_path = greedy.path.unwrap();
    assert_eq!(greedy_path.vertices, vec!['S', 'A', 'G']);
    assert_eq!(greedy_path.distance, 11.0);

    let optimal = dijkstra(&graph, &'S', &'G').unwrap();
    assert_eq!(optimal.distance(), 6.0);
    assert!(greedy_path.distance >= optimal.distance());
}

#[test]
fn dijkstra_ignores_heuristic() {
    let graph = get_small_graph();
    let misleading = |vertex: &char| if *vertex == 'B' { 1000.0 } else { 0.0 };
    let solver = ShortestPathSolver::new(&graph, Strategy::Dijkstra, misleading);
    assert_eq!(solver.shortest_path(&'A', &'D').unwrap().distance(), 9.0);
}

fn walled_grid() -> Grid {
    // wall at x = 2 with a gap at the bottom row
    Grid::new(5, 5, (0..4).map(|y| Cell::new(2, y)))
}

#[test]
fn grid_a_star_agrees_with_dijkstra() {
    let grid = walled_grid();
    let source = Cell::new(0, 0);
    let target = Cell::new(4, 0);

    let optimal = dijkstra(&grid, &source, &target).unwrap();
    let guided = a_star(&grid, &source, &target, grid.manhattan_heuristic(target)).unwrap();

    assert_eq!(optimal.distance(), 12.0);
    assert_eq!(guided.distance(), 12.0);
    assert!(guided.expanded <= optimal.expanded);

    let path = guided.path.unwrap();
    assert_eq!(path.vertices.len(), 13);
    assert!(path.vertices.iter().all(|cell| grid.passable(cell)));
}

#[test]
fn grid_strategies_return_real_costs() {
    let grid = walled_grid();
    let source = Cell::new(0, 2);
    for x in 0..5 {
        for y in 0..5 {
            let target = Cell::new(x, y);
            if !grid.passable(&target) {
                continue;
            }
            let optimal = dijkstra(&grid, &source, &target).unwrap().distance();
            let heuristic = grid.manhattan_heuristic(target);
            let guided = a_star(&grid, &source, &target, heuristic).unwrap();
            let greedy = greedy_best_first(&grid, &source, &target, heuristic).unwrap();

            assert_eq!(guided.distance(), optimal);
            assert!(greedy.distance() >= optimal);

            // every step on a grid costs one
            let greedy_path = greedy.path.unwrap();
            assert_eq!(greedy_path.distance, (greedy_path.vertices.len() - 1) as Distance);
        }
    }
}

#[test]
fn enclosed_grid_goal_has_no_path() {
    let grid = Grid::new(4, 4, [Cell::new(3, 2), Cell::new(2, 3)]);
    let target = Cell::new(3, 3);
    let heuristic = grid.manhattan_heuristic(target);
    let result = a_star(&grid, &Cell::new(0, 0), &target, heuristic).unwrap();
    assert!(result.path.is_none());
    assert_eq!(result.expanded, 13);
}

#[test]
fn search_results_are_deterministic() {
    let graph = get_ch_lecture_graph();
    let first = dijkstra(&graph, &0, &6).unwrap();
    for _ in 0..5 {
        assert_eq!(dijkstra(&graph, &0, &6).unwrap(), first);
    }
}

#[test]
fn guided_search_results_are_deterministic() {
    let graph = get_ch_lecture_graph();
    // hop distance to 6 in the lecture graph, scaled below every edge weight
    let estimate = |vertex: &u32| match vertex {
        6 => 0.0,
        5 | 7 | 8 => 2.0,
        _ => 4.0,
    };
    let first_a_star = a_star(&graph, &0, &6, estimate).unwrap();
    let first_greedy = greedy_best_first(&graph, &0, &6, estimate).unwrap();
    for _ in 0..5 {
        assert_eq!(a_star(&graph, &0, &6, estimate).unwrap(), first_a_star);
        assert_eq!(greedy_best_first(&graph, &0, &6, estimate).unwrap(), first_greedy);
    }

    let grid = walled_grid();
    let source = Cell::new(0, 0);
    let target = Cell::new(4, 0);
    let heuristic = grid.manhattan_heuristic(target);
    let first_a_star = a_star(&grid, &source, &target, heuristic).unwrap();
    let first_greedy = greedy_best_first(&grid, &source, &target, heuristic).unwrap();
    for _ in 0..5 {
        assert_eq!(a_star(&grid, &source, &target, heuristic).unwrap(), first_a_star);
        assert_eq!(
            greedy_best_first(&grid, &source, &target, heuristic).unwrap(),
            first_greedy
        );
    }
}

#[test]
fn found_paths_validate() {
    use frontier_paths::search::path::{ShortestPathRequest, ShortestPathTestCase};

    let graph = get_ch_lecture_graph();
    for target in graph.vertices() {
        let result = dijkstra(&graph, &3, target).unwrap();
        let test_case = ShortestPathTestCase {
            request: ShortestPathRequest {
                source: 3,
                target: *target,
            },
            distance: Some(brute_force_distance(&graph, &3, target)),
        };
        assert_eq!(validate_path(&graph, &test_case, result.path.as_ref(), true), Ok(()));
    }
}
