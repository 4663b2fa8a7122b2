mod astar;
mod compare;
mod uninformed;

use std::{fmt, sync::Arc, time::Duration};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{dims::Coord, grid::Grid, registry::Registry, HashMap};

pub use astar::AStar;
pub use compare::{bar, compare, compare_with, Comparison};
pub use uninformed::{BreadthFirstSearch, DepthFirstSearch};

/// Registry of the path solvers, keyed by lowercase name.
pub type SolverRegistry = Registry<dyn Solver>;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SolveError {
    #[error("position {0} is outside of the {1}x{2} grid")]
    OutOfBounds(Coord, usize, usize),
}

/// Outcome of a single solver run.
///
/// Not finding a path is a regular result, the expansion count and time are filled either way.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchResult {
    /// Cells from start to end inclusive, `None` when the end is unreachable.
    pub path: Option<Vec<Coord>>,
    /// Number of nodes popped from the frontier.
    pub nodes_expanded: usize,
    pub elapsed: Duration,
}

impl SearchResult {
    pub fn is_found(&self) -> bool {
        self.path.is_some()
    }

    /// Number of cells in the path, start and end included.
    pub fn path_len(&self) -> Option<usize> {
        self.path.as_ref().map(Vec::len)
    }

    pub fn elapsed_ms(&self) -> f64 {
        self.elapsed.as_secs_f64() * 1000.0
    }
}

/// How A* counts expansions when it pops a node that was already closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExpansionCounting {
    /// Count only the first pop of every cell, like BFS and DFS do.
    #[default]
    Unique,
    /// Count every pop, stale duplicates included.
    EveryPop,
}

pub trait Solver: fmt::Debug + Sync + Send {
    /// Display name used in reports.
    fn name(&self) -> &'static str;

    fn solve(&self, grid: &Grid, start: Coord, end: Coord) -> Result<SearchResult, SolveError>;
}

/// Rejects endpoints outside of the grid, returns whether both of them are open.
fn check_endpoints(grid: &Grid, start: Coord, end: Coord) -> Result<bool, SolveError> {
    for pos in [start, end] {
        if !grid.in_bounds(pos) {
            return Err(SolveError::OutOfBounds(pos, grid.rows(), grid.cols()));
        }
    }

    Ok(grid.is_open(start) && grid.is_open(end))
}

/// Walks the parent links back from `end` and returns the path in start-to-end order.
fn reconstruct_path(parents: &HashMap<Coord, Coord>, start: Coord, end: Coord) -> Vec<Coord> {
    let mut path = vec![end];
    let mut current = end;

    while current != start {
        match parents.get(&current) {
            Some(&parent) => {
                path.push(parent);
                current = parent;
            }
            None => break,
        }
    }

    path.reverse();
    path
}

/// Registry with BFS, DFS and A* registered, BFS being the default.
pub fn builtin_solvers(counting: ExpansionCounting) -> SolverRegistry {
    let bfs: Arc<dyn Solver> = Arc::new(BreadthFirstSearch);
    let astar: Arc<dyn Solver> = Arc::new(AStar::new(counting));

    let mut registry = SolverRegistry::with_default(bfs.clone());
    registry.register("bfs".into(), bfs);
    registry.register("dfs".into(), Arc::new(DepthFirstSearch));
    registry.register("astar".into(), astar.clone());
    registry.register("a*".into(), astar);

    registry
}

pub fn solve_bfs(grid: &Grid, start: Coord, end: Coord) -> Result<SearchResult, SolveError> {
    BreadthFirstSearch.solve(grid, start, end)
}

pub fn solve_dfs(grid: &Grid, start: Coord, end: Coord) -> Result<SearchResult, SolveError> {
    DepthFirstSearch.solve(grid, start, end)
}

pub fn solve_astar(grid: &Grid, start: Coord, end: Coord) -> Result<SearchResult, SolveError> {
    AStar::default().solve(grid, start, end)
}
