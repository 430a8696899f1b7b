//! Implicit 4-connected grid with impassable walls.

use ahash::HashSet;
use serde::{Deserialize, Serialize};

use super::{edge::TaillessEdge, Distance, Graph, Weight};
use crate::search::heuristics::Heuristic;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Cell {
    pub x: u32,
    pub y: u32,
}

impl Cell {
    pub fn new(x: u32, y: u32) -> Cell {
        Cell { x, y }
    }

    pub fn manhattan(&self, other: &Cell) -> u32 {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y)
    }
}

#[derive(Clone, Debug)]
pub struct Grid {
    width: u32,
    height: u32,
    walls: HashSet<Cell>,
    step_cost: Weight,
}

impl Grid {
    pub fn new(width: u32, height: u32, walls: impl IntoIterator<Item = Cell>) -> Grid {
        Grid {
            width,
            height,
            walls: walls.into_iter().collect(),
            step_cost: 1.0,
        }
    }

    /// Uses `step_cost` for every move instead of 1. The cost must be finite
    /// and non-negative.
    pub fn with_step_cost(mut self, step_cost: Weight) -> Grid {
        self.step_cost = step_cost;
        self
    }

    pub fn in_bounds(&self, cell: &Cell) -> bool {
        cell.x < self.width && cell.y < self.height
    }

    pub fn passable(&self, cell: &Cell) -> bool {
        !self.walls.contains(cell)
    }

    /// Passable neighbors in the order right, left, down, up.
    pub fn neighbors(&self, cell: &Cell) -> Vec<Cell> {
        let candidates = [
            cell.x.checked_add(1).map(|x| Cell::new(x, cell.y)),
            cell.x.checked_sub(1).map(|x| Cell::new(x, cell.y)),
            cell.y.checked_add(1).map(|y| Cell::new(cell.x, y)),
            cell.y.checked_sub(1).map(|y| Cell::new(cell.x, y)),
        ];

        candidates
            .into_iter()
            .flatten()
            .filter(|neighbor| self.in_bounds(neighbor) && self.passable(neighbor))
            .collect()
    }

    /// Manhattan distance to `goal` scaled by the step cost. Admissible and
    /// consistent for this grid.
    pub fn manhattan_heuristic(&self, goal: Cell) -> ManhattanDistance {
        ManhattanDistance {
            goal,
            step_cost: self.step_cost,
        }
    }
}

impl Graph for Grid {
    type Vertex = Cell;

    fn out_edges(&self, tail: &Cell) -> Box<dyn Iterator<Item = TaillessEdge<Cell>> + '_> {
        let step_cost = self.step_cost;
        Box::new(
            self.neighbors(tail)
                .into_iter()
                .map(move |head| TaillessEdge::new(head, step_cost)),
        )
    }

    fn contains(&self, vertex: &Cell) -> bool {
        self.in_bounds(vertex) && self.passable(vertex)
    }
}

#[derive(Clone, Copy, Debug)]
pub struct ManhattanDistance {
    goal: Cell,
    step_cost: Weight,
}

impl Heuristic<Cell> for ManhattanDistance {
    fn estimate(&self, vertex: &Cell) -> Distance {
        vertex.manhattan(&self.goal) as Distance * self.step_cost
    }
}
