use std::{fmt, time::Duration};

use super::{AStar, BreadthFirstSearch, DepthFirstSearch, SearchResult, SolveError, Solver};
use crate::{dims::Coord, grid::Grid};

/// Results of several solvers run against the same grid and endpoints, in run order.
#[derive(Debug, Clone)]
pub struct Comparison {
    pub size: (usize, usize),
    pub start: Coord,
    pub end: Coord,
    entries: Vec<(&'static str, SearchResult)>,
}

impl Comparison {
    pub fn get(&self, name: &str) -> Option<&SearchResult> {
        self.entries
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, r)| r)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &SearchResult)> {
        self.entries.iter().map(|(n, r)| (*n, r))
    }

    pub fn max_nodes(&self) -> usize {
        self.entries
            .iter()
            .map(|(_, r)| r.nodes_expanded)
            .max()
            .unwrap_or(0)
    }

    pub fn max_elapsed(&self) -> Duration {
        self.entries
            .iter()
            .map(|(_, r)| r.elapsed)
            .max()
            .unwrap_or_default()
    }
}

impl fmt::Display for Comparison {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Maze Size: {}x{}", self.size.0, self.size.1)?;
        writeln!(f, "Start: {}, End: {}", self.start, self.end)?;
        writeln!(f)?;
        writeln!(
            f,
            "{:<10}{:<15}{:<15}{:<10}",
            "Algorithm", "Path Length", "Nodes Expanded", "Time (ms)"
        )?;
        writeln!(f, "{}", "-".repeat(50))?;

        for (name, result) in self.iter() {
            let length = result
                .path_len()
                .map_or_else(|| "N/A".to_string(), |len| len.to_string());
            writeln!(
                f,
                "{:<10}{:<15}{:<15}{:.2}",
                name,
                length,
                result.nodes_expanded,
                result.elapsed_ms()
            )?;
        }

        Ok(())
    }
}

/// Horizontal bar of `width` characters, filled proportionally to `value / max`.
pub fn bar(value: f64, max: f64, width: usize) -> String {
    let filled = if max > 0.0 {
        ((value / max) * width as f64).clamp(0.0, width as f64) as usize
    } else {
        0
    };

    format!("{}{}", "█".repeat(filled), " ".repeat(width - filled))
}

/// Runs the given solvers one after another on the same grid.
pub fn compare_with(
    solvers: &[&dyn Solver],
    grid: &Grid,
    start: Coord,
    end: Coord,
) -> Result<Comparison, SolveError> {
    let entries = solvers
        .iter()
        .map(|solver| {
            let result = solver.solve(grid, start, end)?;
            log::debug!(
                "{}: path {:?}, {} expanded, {:?}",
                solver.name(),
                result.path_len(),
                result.nodes_expanded,
                result.elapsed
            );
            Ok((solver.name(), result))
        })
        .collect::<Result<_, SolveError>>()?;

    Ok(Comparison {
        size: grid.size(),
        start,
        end,
        entries,
    })
}

/// Runs BFS, DFS and A* on the same grid.
pub fn compare(grid: &Grid, start: Coord, end: Coord) -> Result<Comparison, SolveError> {
    let astar = AStar::default();
    let solvers: [&dyn Solver; 3] = [&BreadthFirstSearch, &DepthFirstSearch, &astar];
    compare_with(&solvers, grid, start, end)
}
