use std::{collections::HashSet, fmt::Write as _};

use cmsolve::{
    solver::{bar, Comparison},
    Cell, Coord, Difficulty, Grid, SearchResult,
};
use colored::Colorize as _;

/// Width of the comparison bars, in characters.
pub const BAR_WIDTH: usize = 20;

/// Draws the grid two characters per cell, with the optional path laid over it.
///
/// The path's first and last cells are marked as the endpoints, the grid corners otherwise.
pub fn render_grid(grid: &Grid, path: Option<&[Coord]>) -> String {
    let (start, end) = match path.and_then(|p| p.first().zip(p.last())) {
        Some((first, last)) => (*first, *last),
        None => (grid.start(), grid.end()),
    };
    let on_path: HashSet<Coord> = path.into_iter().flatten().copied().collect();
    let mut out = String::new();

    for pos in grid.iter_pos() {
        let cell = if pos == start {
            "S ".green().bold()
        } else if pos == end {
            "E ".red().bold()
        } else if on_path.contains(&pos) {
            "··".blue().bold()
        } else {
            match grid.get(pos) {
                Some(Cell::Wall) => "██".normal(),
                _ => "  ".normal(),
            }
        };

        let _ = write!(out, "{}", cell);
        if pos.col() == grid.cols() as i32 - 1 {
            out.push('\n');
        }
    }

    out
}

fn capitalize(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Summary of a single solver run.
pub fn render_stats(algorithm: &str, result: &SearchResult, difficulty: Difficulty) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "Algorithm: {}", algorithm);
    match result.path_len() {
        Some(len) => {
            let _ = writeln!(out, "Path Length: {}", len);
        }
        None => {
            let _ = writeln!(out, "{}", "No solution found!".yellow());
        }
    }
    let _ = writeln!(out, "Nodes Expanded: {}", result.nodes_expanded);
    let _ = writeln!(out, "Time Taken: {:.2} ms", result.elapsed_ms());
    let _ = writeln!(out, "Difficulty: {}", capitalize(difficulty.name()));

    out
}

/// Nodes expanded and time taken by every solver, with proportional bars.
pub fn render_bars(comparison: &Comparison) -> String {
    let mut out = String::new();
    let max_nodes = comparison.max_nodes() as f64;
    let max_time = comparison.max_elapsed().as_secs_f64();

    let _ = writeln!(out, "Nodes Expanded:");
    for (name, result) in comparison.iter() {
        let _ = writeln!(
            out,
            "{:<5}{:<6} {}",
            format!("{}:", name),
            result.nodes_expanded,
            bar(result.nodes_expanded as f64, max_nodes, BAR_WIDTH).green()
        );
    }

    let _ = writeln!(out);
    let _ = writeln!(out, "Time Taken (ms):");
    for (name, result) in comparison.iter() {
        let _ = writeln!(
            out,
            "{:<5}{:<6.2} {}",
            format!("{}:", name),
            result.elapsed_ms(),
            bar(result.elapsed.as_secs_f64(), max_time, BAR_WIDTH).blue()
        );
    }

    out
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    fn plain() {
        colored::control::set_override(false);
    }

    #[test]
    fn grid_with_path() {
        plain();
        let grid: Grid = "
            0 0 1
            1 0 1
            1 0 0
        "
        .parse()
        .unwrap();
        let path = [Coord(0, 0), Coord(0, 1), Coord(1, 1), Coord(2, 1), Coord(2, 2)];

        assert_eq!(
            render_grid(&grid, Some(&path[..])),
            "S ··██\n██··██\n██··E \n"
        );
    }

    #[test]
    fn single_cell_path_is_marked() {
        plain();
        let grid = Grid::new(2, 2);
        let path = [Coord(1, 0)];
        assert_eq!(render_grid(&grid, Some(&path[..])), "    \nS   \n");
        assert_eq!(render_grid(&Grid::new(1, 1), Some(&[Coord(0, 0)][..])), "S \n");
    }

    #[test]
    fn grid_without_path() {
        plain();
        let grid: Grid = "00\n10".parse().unwrap();
        assert_eq!(render_grid(&grid, None), "S   \n██E \n");
    }

    #[test]
    fn stats_text() {
        plain();
        let result = SearchResult {
            path: Some(vec![Coord(0, 0), Coord(0, 1)]),
            nodes_expanded: 4,
            elapsed: Duration::from_micros(1500),
        };

        assert_eq!(
            render_stats("BFS", &result, Difficulty::Hard),
            "Algorithm: BFS\nPath Length: 2\nNodes Expanded: 4\nTime Taken: 1.50 ms\nDifficulty: Hard\n"
        );

        let missing = SearchResult {
            path: None,
            ..result
        };
        assert!(render_stats("DFS", &missing, Difficulty::Easy).contains("No solution found!"));
    }

    #[test]
    fn bars_for_every_solver() {
        plain();
        let grid = Grid::new(4, 4);
        let comparison = cmsolve::compare(&grid, grid.start(), grid.end()).unwrap();
        let text = render_bars(&comparison);

        assert!(text.starts_with("Nodes Expanded:\n"));
        assert!(text.contains("Time Taken (ms):"));
        for name in ["BFS:", "DFS:", "A*:"] {
            assert_eq!(text.matches(name).count(), 2, "{}", name);
        }
    }
}
