//! Plain reachability queries over open cells.
//!
//! Unlike the solvers, these never build paths or collect metrics; the generator uses
//! [`is_connected`] to accept or reject sampled grids.

use std::collections::VecDeque;

use crate::{array::Array2D, dims::Coord, grid::Grid};

/// Breadth-first check whether `end` can be reached from `start` over open cells.
pub fn is_connected(grid: &Grid, start: Coord, end: Coord) -> bool {
    if !grid.is_open(start) || !grid.is_open(end) {
        return false;
    }

    let mut visited = Array2D::new(false, grid.rows(), grid.cols());
    let mut queue = VecDeque::from([start]);
    visited[start] = true;

    while let Some(pos) = queue.pop_front() {
        if pos == end {
            return true;
        }

        for next in grid.neighbors(pos) {
            if !visited[next] {
                visited[next] = true;
                queue.push_back(next);
            }
        }
    }

    false
}

/// Mask of all cells reachable from `start`, `start` included when it's open.
pub fn reachable(grid: &Grid, start: Coord) -> Array2D<bool> {
    let mut visited = Array2D::new(false, grid.rows(), grid.cols());
    if !grid.is_open(start) {
        return visited;
    }

    let mut stack = vec![start];
    visited[start] = true;
    while let Some(pos) = stack.pop() {
        for next in grid.neighbors(pos) {
            if !visited[next] {
                visited[next] = true;
                stack.push(next);
            }
        }
    }

    visited
}

pub fn reachable_count(grid: &Grid, start: Coord) -> usize {
    reachable(grid, start).iter().filter(|&&b| b).count()
}
