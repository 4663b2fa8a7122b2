use std::{collections::VecDeque, time::Instant};

use super::{check_endpoints, reconstruct_path, SearchResult, SolveError, Solver};
use crate::{dims::Coord, grid::Grid, HashMap, HashSet};

/// Frontier discipline of an uninformed search.
trait Frontier: Default {
    fn push(&mut self, pos: Coord);
    fn pop(&mut self) -> Option<Coord>;
}

/// FIFO queue.
impl Frontier for VecDeque<Coord> {
    fn push(&mut self, pos: Coord) {
        self.push_back(pos);
    }

    fn pop(&mut self) -> Option<Coord> {
        self.pop_front()
    }
}

/// LIFO stack.
impl Frontier for Vec<Coord> {
    fn push(&mut self, pos: Coord) {
        Vec::push(self, pos);
    }

    fn pop(&mut self) -> Option<Coord> {
        Vec::pop(self)
    }
}

/// Shared traversal of BFS and DFS.
///
/// Cells are marked visited when they enter the frontier, so every cell is expanded at most once.
/// The start is always expanded, a walled start or end only means no path gets reported.
fn traverse<F: Frontier>(grid: &Grid, start: Coord, end: Coord) -> Result<SearchResult, SolveError> {
    let started = Instant::now();
    let mut nodes_expanded = 0;
    let endpoints_open = check_endpoints(grid, start, end)?;

    let mut frontier = F::default();
    let mut visited = HashSet::new();
    let mut parents = HashMap::new();

    frontier.push(start);
    visited.insert(start);

    while let Some(pos) = frontier.pop() {
        nodes_expanded += 1;

        if endpoints_open && pos == end {
            return Ok(SearchResult {
                path: Some(reconstruct_path(&parents, start, end)),
                nodes_expanded,
                elapsed: started.elapsed(),
            });
        }

        for next in grid.neighbors(pos) {
            if visited.insert(next) {
                parents.insert(next, pos);
                frontier.push(next);
            }
        }
    }

    Ok(SearchResult {
        path: None,
        nodes_expanded,
        elapsed: started.elapsed(),
    })
}

/// Breadth-first search, finds a path with the fewest cells.
#[derive(Debug, Clone, Copy, Default)]
pub struct BreadthFirstSearch;

impl Solver for BreadthFirstSearch {
    fn name(&self) -> &'static str {
        "BFS"
    }

    fn solve(&self, grid: &Grid, start: Coord, end: Coord) -> Result<SearchResult, SolveError> {
        traverse::<VecDeque<Coord>>(grid, start, end)
    }
}

/// Depth-first search, returns the first path it runs into.
#[derive(Debug, Clone, Copy, Default)]
pub struct DepthFirstSearch;

impl Solver for DepthFirstSearch {
    fn name(&self) -> &'static str {
        "DFS"
    }

    fn solve(&self, grid: &Grid, start: Coord, end: Coord) -> Result<SearchResult, SolveError> {
        traverse::<Vec<Coord>>(grid, start, end)
    }
}
