//! Core of tmsolve.
//!
//! Generates random grid mazes that are guaranteed to be solvable and solves them with
//! breadth-first search, depth-first search and A*, reporting the found path, the number of
//! expanded nodes and the elapsed time of every run.

pub mod array;
pub mod connectivity;
pub mod dims;
pub mod generator;
pub mod grid;
pub mod registry;
pub mod solver;

#[cfg(feature = "hashbrown")]
pub(crate) use hashbrown::{HashMap, HashSet};
#[cfg(not(feature = "hashbrown"))]
pub(crate) use std::collections::{HashMap, HashSet};

pub use dims::Coord;
pub use generator::{generate, Difficulty, Fallback, Generator, GeneratorConfig, GeneratorError};
pub use grid::{Cell, Grid, GridError};
pub use solver::{
    compare, solve_astar, solve_bfs, solve_dfs, Comparison, ExpansionCounting, SearchResult,
    SolveError, Solver,
};
