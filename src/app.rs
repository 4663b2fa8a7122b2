use std::{io, sync::Arc};

use clap::Args;
use cmsolve::{
    generator::Random,
    solver::{builtin_solvers, compare_with, Solver, SolverRegistry},
    Coord, Difficulty, Generator, GeneratorError, Grid,
};
use rand::{thread_rng, Rng as _, SeedableRng as _};
use rayon::prelude::*;

use crate::{error::AppError, render, settings::Settings};

/// Maze parameters shared by every command, unset ones come from the settings.
#[derive(Args, Debug, Clone, Default)]
pub struct MazeArgs {
    #[clap(short, long, help = "Number of rows")]
    pub rows: Option<usize>,
    #[clap(short, long, help = "Number of columns")]
    pub cols: Option<usize>,
    #[clap(short, long, help = "Difficulty: easy, medium or hard")]
    pub difficulty: Option<String>,
    #[clap(long, help = "Seed for a reproducible maze")]
    pub seed: Option<u64>,
}

/// Edits and endpoints applied to a generated maze before solving it.
#[derive(Args, Debug, Clone, Default)]
pub struct SolveArgs {
    #[clap(long, value_parser = parse_coord, help = "Toggle the cell at `row,col`, can be repeated")]
    pub toggle: Vec<Coord>,
    #[clap(long, value_parser = parse_coord, help = "Start cell as `row,col`")]
    pub start: Option<Coord>,
    #[clap(long, value_parser = parse_coord, help = "End cell as `row,col`")]
    pub end: Option<Coord>,
}

pub fn parse_coord(text: &str) -> Result<Coord, AppError> {
    let invalid = || AppError::InvalidCoord(text.to_string());
    let (row, col) = text.split_once(',').ok_or_else(invalid)?;

    let row = row.trim().parse().map_err(|_| invalid())?;
    let col = col.trim().parse().map_err(|_| invalid())?;
    Ok(Coord(row, col))
}

pub struct App {
    settings: Settings,
    solvers: SolverRegistry,
}

impl App {
    pub fn new(settings: Settings) -> Self {
        let solvers = builtin_solvers(settings.get_astar_counting());
        Self { settings, solvers }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Looks a solver up by its case-insensitive name.
    pub fn solver(&self, name: &str) -> Result<Arc<dyn Solver>, AppError> {
        self.solvers.get(name.to_lowercase().as_str()).ok_or_else(|| {
            let mut known: Vec<&str> = self.solvers.keys().map(String::as_str).collect();
            known.sort_unstable();
            AppError::UnknownAlgorithm(name.to_string(), known.join(", "))
        })
    }

    /// Solver named in the settings, the default one when that name is unknown.
    pub fn configured_solver(&self) -> Arc<dyn Solver> {
        let name = self.settings.get_algorithm().to_lowercase();
        if !self.solvers.is_registered(name.as_str()) {
            log::warn!("Unknown algorithm '{}' in settings, using the default", name);
        }
        self.solvers.get_or_default(name.as_str())
    }

    fn generator(&self, seed: Option<u64>) -> Generator {
        let mut config = self.settings.get_generator();
        if seed.is_some() {
            config.seed = seed;
        }
        Generator::new(config)
    }

    fn size(&self, maze: &MazeArgs) -> (usize, usize) {
        (
            maze.rows.unwrap_or_else(|| self.settings.get_rows()),
            maze.cols.unwrap_or_else(|| self.settings.get_cols()),
        )
    }

    fn difficulty(&self, maze: &MazeArgs) -> Difficulty {
        maze.difficulty
            .as_deref()
            .map(Difficulty::from_name)
            .unwrap_or_else(|| self.settings.get_difficulty())
    }

    pub fn build_maze(&self, maze: &MazeArgs) -> Result<(Grid, Difficulty), AppError> {
        let (rows, cols) = self.size(maze);
        let difficulty = self.difficulty(maze);
        let grid = self.generator(maze.seed).generate(rows, cols, difficulty)?;
        Ok((grid, difficulty))
    }

    fn edit_maze(grid: &mut Grid, edits: &SolveArgs) -> Result<(Coord, Coord), AppError> {
        for &pos in &edits.toggle {
            let cell = grid.toggle(pos)?;
            log::info!("Toggled {} to {:?}", pos, cell);
        }

        Ok((
            edits.start.unwrap_or_else(|| grid.start()),
            edits.end.unwrap_or_else(|| grid.end()),
        ))
    }

    pub fn generate(&self, maze: &MazeArgs, out: &mut impl io::Write) -> Result<(), AppError> {
        let (grid, difficulty) = self.build_maze(maze)?;

        write!(out, "{}", render::render_grid(&grid, None))?;
        writeln!(
            out,
            "{}x{} {} maze, {} walls",
            grid.rows(),
            grid.cols(),
            difficulty,
            grid.wall_count()
        )?;
        Ok(())
    }

    pub fn solve(
        &self,
        maze: &MazeArgs,
        edits: &SolveArgs,
        algorithm: Option<&str>,
        out: &mut impl io::Write,
    ) -> Result<(), AppError> {
        let solver = match algorithm {
            Some(name) => self.solver(name)?,
            None => self.configured_solver(),
        };
        let (mut grid, difficulty) = self.build_maze(maze)?;
        let (start, end) = Self::edit_maze(&mut grid, edits)?;

        let result = solver.solve(&grid, start, end)?;
        log::debug!(
            "{} expanded {} nodes in {:?}",
            solver.name(),
            result.nodes_expanded,
            result.elapsed
        );

        write!(out, "{}", render::render_grid(&grid, result.path.as_deref()))?;
        writeln!(out)?;
        write!(out, "{}", render::render_stats(solver.name(), &result, difficulty))?;
        Ok(())
    }

    pub fn compare(
        &self,
        maze: &MazeArgs,
        edits: &SolveArgs,
        out: &mut impl io::Write,
    ) -> Result<(), AppError> {
        let (mut grid, _) = self.build_maze(maze)?;
        let (start, end) = Self::edit_maze(&mut grid, edits)?;

        let solvers = ["bfs", "dfs", "astar"]
            .into_iter()
            .map(|name| self.solver(name))
            .collect::<Result<Vec<_>, _>>()?;
        let solvers: Vec<&dyn Solver> = solvers.iter().map(|solver| solver.as_ref()).collect();
        let comparison = compare_with(&solvers, &grid, start, end)?;

        write!(out, "{}", render::render_grid(&grid, None))?;
        writeln!(out)?;
        write!(out, "{}", comparison)?;
        writeln!(out)?;
        write!(out, "{}", render::render_bars(&comparison))?;
        Ok(())
    }

    /// Average wall count of `samples` generated mazes for every difficulty.
    pub fn wall_averages(
        &self,
        maze: &MazeArgs,
        samples: usize,
    ) -> Result<Vec<(Difficulty, f64)>, AppError> {
        let (rows, cols) = self.size(maze);
        let generator = self.generator(maze.seed);
        let base_seed = generator.config().seed.unwrap_or_else(|| thread_rng().gen());
        let samples = samples.max(1);

        Difficulty::ALL
            .into_iter()
            .enumerate()
            .map(|(tier, difficulty)| -> Result<_, AppError> {
                let walls = (0..samples)
                    .into_par_iter()
                    .map(|i| {
                        let seed = base_seed
                            .wrapping_add((tier * samples + i) as u64)
                            .wrapping_mul(0x9E37_79B9_7F4A_7C15);
                        let mut rng = Random::seed_from_u64(seed);
                        generator
                            .generate_with_rng(rows, cols, difficulty, &mut rng)
                            .map(|grid| grid.wall_count())
                    })
                    .collect::<Result<Vec<_>, GeneratorError>>()?;

                let average = walls.iter().sum::<usize>() as f64 / samples as f64;
                Ok((difficulty, average))
            })
            .collect()
    }

    pub fn stats(
        &self,
        maze: &MazeArgs,
        samples: usize,
        out: &mut impl io::Write,
    ) -> Result<(), AppError> {
        let (rows, cols) = self.size(maze);
        let cells = (rows * cols) as f64;

        writeln!(out, "{} samples of {}x{} mazes", samples.max(1), rows, cols)?;
        for (difficulty, average) in self.wall_averages(maze, samples)? {
            writeln!(
                out,
                "{:<8}{:>10.2} walls ({:.1}% of cells)",
                difficulty.name(),
                average,
                average / cells * 100.0
            )?;
        }
        Ok(())
    }
}
