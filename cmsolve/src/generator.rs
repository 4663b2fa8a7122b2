use std::{convert::Infallible, fmt, str::FromStr};

use rand::{thread_rng, Rng, SeedableRng as _};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{
    array::Array2D,
    connectivity,
    dims::Coord,
    grid::{Cell, Grid},
};

/// Random number generator used for anything, where determinism is required.
pub type Random = rand_xoshiro::Xoshiro256StarStar;

/// Wall density preset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    /// Probability of any single cell being sampled as a wall.
    pub fn wall_probability(self) -> f64 {
        match self {
            Difficulty::Easy => 0.2,
            Difficulty::Medium => 0.3,
            Difficulty::Hard => 0.4,
        }
    }

    /// Case-insensitive lookup, unknown names fall back to [`Difficulty::Medium`].
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "easy" => Difficulty::Easy,
            "medium" => Difficulty::Medium,
            "hard" => Difficulty::Hard,
            other => {
                log::warn!("Unknown difficulty '{}', using medium", other);
                Difficulty::Medium
            }
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Difficulty {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from_name(s))
    }
}

/// What the generator does once it runs out of attempts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Fallback {
    /// Keep the last sample and open a corridor along the top row and the right column.
    #[default]
    Corridor,
    /// Give up with [`GeneratorError::AttemptsExhausted`].
    Fail,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Fixed seed, random one is used when not set.
    pub seed: Option<u64>,
    /// Maximum number of samples, `None` resamples until the maze is solvable.
    pub max_attempts: Option<usize>,
    pub fallback: Fallback,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            seed: None,
            max_attempts: Some(10_000),
            fallback: Fallback::Corridor,
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum GeneratorError {
    #[error("invalid maze size {rows}x{cols}, both dimensions must be positive")]
    InvalidSize { rows: usize, cols: usize },
    #[error("no solvable maze found in {0} attempts")]
    AttemptsExhausted(usize),
}

/// Reject-sampling maze generator.
///
/// Every attempt samples each cell independently, opens the start and end cells and keeps the
/// grid only if the end is reachable from the start.
#[derive(Debug, Clone, Default)]
pub struct Generator {
    config: GeneratorConfig,
}

impl Generator {
    pub fn new(config: GeneratorConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    pub fn generate(
        &self,
        rows: usize,
        cols: usize,
        difficulty: Difficulty,
    ) -> Result<Grid, GeneratorError> {
        let seed = self.config.seed.unwrap_or_else(|| thread_rng().gen());
        let mut rng = Random::seed_from_u64(seed);
        log::trace!("Generating {}x{} {} maze, seed {}", rows, cols, difficulty, seed);

        self.generate_with_rng(rows, cols, difficulty, &mut rng)
    }

    pub fn generate_with_rng<R: Rng + ?Sized>(
        &self,
        rows: usize,
        cols: usize,
        difficulty: Difficulty,
        rng: &mut R,
    ) -> Result<Grid, GeneratorError> {
        let cell_count = rows
            .checked_mul(cols)
            .filter(|_| rows <= i32::MAX as usize && cols <= i32::MAX as usize);
        let cell_count = match cell_count {
            Some(count) if count > 0 => count,
            _ => return Err(GeneratorError::InvalidSize { rows, cols }),
        };

        let probability = difficulty.wall_probability();
        let mut attempts = 0usize;

        loop {
            let mut grid = Self::sample(rows, cols, cell_count, probability, rng);
            attempts += 1;

            if connectivity::is_connected(&grid, grid.start(), grid.end()) {
                log::debug!(
                    "Generated {}x{} {} maze after {} attempt(s)",
                    rows,
                    cols,
                    difficulty,
                    attempts
                );
                return Ok(grid);
            }

            if self.config.max_attempts.is_some_and(|max| attempts >= max) {
                return match self.config.fallback {
                    Fallback::Corridor => {
                        log::warn!(
                            "No solvable maze in {} attempts, carving a corridor",
                            attempts
                        );
                        Self::carve_corridor(&mut grid);
                        Ok(grid)
                    }
                    Fallback::Fail => Err(GeneratorError::AttemptsExhausted(attempts)),
                };
            }
        }
    }

    fn sample<R: Rng + ?Sized>(
        rows: usize,
        cols: usize,
        cell_count: usize,
        probability: f64,
        rng: &mut R,
    ) -> Grid {
        let buf = (0..cell_count)
            .map(|_| {
                if rng.gen_bool(probability) {
                    Cell::Wall
                } else {
                    Cell::Open
                }
            })
            .collect();

        let mut cells = Array2D::from_buf(buf, rows, cols)
            .unwrap_or_else(|| Array2D::new(Cell::Open, rows, cols));
        cells[Coord::ZERO] = Cell::Open;
        cells[Coord(rows as i32 - 1, cols as i32 - 1)] = Cell::Open;

        Grid::from_array(cells)
    }

    /// Opens the whole top row and the whole rightmost column.
    fn carve_corridor(grid: &mut Grid) {
        let last_col = grid.cols() as i32 - 1;
        for col in 0..=last_col {
            grid.cells[Coord(0, col)] = Cell::Open;
        }
        for row in 0..grid.rows() as i32 {
            grid.cells[Coord(row, last_col)] = Cell::Open;
        }
    }
}

/// Generates a solvable maze with the default configuration.
pub fn generate(rows: usize, cols: usize, difficulty: Difficulty) -> Result<Grid, GeneratorError> {
    Generator::default().generate(rows, cols, difficulty)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seeded(seed: u64) -> Generator {
        Generator::new(GeneratorConfig {
            seed: Some(seed),
            ..Default::default()
        })
    }

    #[test]
    fn generated_mazes_are_solvable() {
        let mut rng = Random::seed_from_u64(7);
        let generator = Generator::default();

        for difficulty in Difficulty::ALL {
            for (rows, cols) in [(1, 1), (1, 9), (9, 1), (5, 5), (15, 15), (8, 30)] {
                let grid = generator
                    .generate_with_rng(rows, cols, difficulty, &mut rng)
                    .unwrap();
                assert_eq!(grid.size(), (rows, cols));
                assert!(grid.is_open(grid.start()));
                assert!(grid.is_open(grid.end()));
                assert!(connectivity::is_connected(&grid, grid.start(), grid.end()));
            }
        }
    }

    #[test]
    fn same_seed_same_maze() {
        let a = seeded(42).generate(20, 20, Difficulty::Hard).unwrap();
        let b = seeded(42).generate(20, 20, Difficulty::Hard).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn zero_size_is_rejected() {
        assert_eq!(
            generate(0, 5, Difficulty::Easy),
            Err(GeneratorError::InvalidSize { rows: 0, cols: 5 })
        );
        assert_eq!(
            generate(5, 0, Difficulty::Easy),
            Err(GeneratorError::InvalidSize { rows: 5, cols: 0 })
        );
    }

    #[test]
    fn oversized_grid_is_rejected() {
        let rows = usize::MAX / 2 + 1;
        assert_eq!(
            generate(rows, 2, Difficulty::Easy),
            Err(GeneratorError::InvalidSize { rows, cols: 2 })
        );
        assert_eq!(
            generate(3, usize::MAX, Difficulty::Easy),
            Err(GeneratorError::InvalidSize { rows: 3, cols: usize::MAX })
        );
    }

    #[test]
    fn difficulty_names() {
        assert_eq!(Difficulty::from_name("Easy"), Difficulty::Easy);
        assert_eq!(Difficulty::from_name(" HARD "), Difficulty::Hard);
        assert_eq!(Difficulty::from_name("nightmare"), Difficulty::Medium);
        assert_eq!("whatever".parse::<Difficulty>(), Ok(Difficulty::Medium));
        assert_eq!(Difficulty::from_name("nightmare").wall_probability(), 0.3);
    }

    #[test]
    fn difficulty_serializes_lowercase() {
        assert_eq!(ron::to_string(&Difficulty::Hard).unwrap(), "hard");
        assert_eq!(ron::from_str::<Difficulty>("easy").unwrap(), Difficulty::Easy);
    }

    #[test]
    fn harder_means_more_walls() {
        let mut rng = Random::seed_from_u64(1234);
        let generator = Generator::default();
        let samples = 200;

        let averages: Vec<f64> = Difficulty::ALL
            .iter()
            .map(|&difficulty| {
                let total: usize = (0..samples)
                    .map(|_| {
                        generator
                            .generate_with_rng(12, 12, difficulty, &mut rng)
                            .unwrap()
                            .wall_count()
                    })
                    .sum();
                total as f64 / samples as f64
            })
            .collect();

        assert!(averages[0] <= averages[1], "{:?}", averages);
        assert!(averages[1] <= averages[2], "{:?}", averages);
    }

    #[test]
    fn corridor_fallback_is_solvable() {
        let generator = Generator::new(GeneratorConfig {
            seed: None,
            max_attempts: Some(1),
            fallback: Fallback::Corridor,
        });
        let mut rng = Random::seed_from_u64(3);

        for _ in 0..20 {
            let grid = generator
                .generate_with_rng(10, 40, Difficulty::Hard, &mut rng)
                .unwrap();
            assert!(connectivity::is_connected(&grid, grid.start(), grid.end()));
        }
    }

    #[test]
    fn fail_fallback_reports_attempts() {
        let generator = Generator::new(GeneratorConfig {
            seed: None,
            max_attempts: Some(3),
            fallback: Fallback::Fail,
        });
        let mut rng = Random::seed_from_u64(9);

        let result = generator.generate_with_rng(40, 40, Difficulty::Hard, &mut rng);
        match result {
            Ok(grid) => assert!(connectivity::is_connected(&grid, grid.start(), grid.end())),
            Err(err) => assert_eq!(err, GeneratorError::AttemptsExhausted(3)),
        }
    }

    #[test]
    fn config_defaults_from_partial_ron() {
        let config: GeneratorConfig = ron::from_str("(seed: Some(5))").unwrap();
        assert_eq!(config.seed, Some(5));
        assert_eq!(config.max_attempts, Some(10_000));
        assert_eq!(config.fallback, Fallback::Corridor);
    }
}
