use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::graphs::Distance;

pub mod alt;
pub mod frontier;
pub mod heuristics;
pub mod path;
pub mod search_data;
pub mod solver;

/// Frontier ordering of a [`solver::ShortestPathSolver`].
///
/// All three strategies run the same relaxation loop and only differ in the
/// priority a vertex is pushed with.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
pub enum Strategy {
    /// Priority is the known cost. The heuristic is never evaluated.
    Dijkstra,
    /// Priority is known cost plus heuristic. Optimal for admissible and
    /// consistent heuristics.
    AStar,
    /// Priority is the heuristic alone. The known cost is still tracked and
    /// reported, but the returned path is not guaranteed to be a shortest one.
    GreedyBestFirst,
}

impl Strategy {
    pub fn priority(&self, known: Distance, estimate: impl FnOnce() -> Distance) -> Distance {
        match self {
            Strategy::Dijkstra => known,
            Strategy::AStar => known + estimate(),
            Strategy::GreedyBestFirst => estimate(),
        }
    }

    /// True if the reported distance is the optimum, given the heuristic
    /// preconditions of the strategy hold.
    pub fn is_optimal(&self) -> bool {
        !matches!(self, Strategy::GreedyBestFirst)
    }
}
