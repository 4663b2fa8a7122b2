use std::io;

use cmsolve::{GeneratorError, GridError, SolveError};
use log::SetLoggerError;
use thiserror::Error;

use crate::settings::SettingsError;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Settings error; {0}")]
    Settings(#[from] SettingsError),
    #[error("Generator error; {0}")]
    Generator(#[from] GeneratorError),
    #[error("Solver error; {0}")]
    Solve(#[from] SolveError),
    #[error("Grid error; {0}")]
    Grid(#[from] GridError),
    #[error("Unknown algorithm `{0}`, expected one of: {1}")]
    UnknownAlgorithm(String, String),
    #[error("Invalid coordinate `{0}`, expected `row,col`")]
    InvalidCoord(String),
    #[error("Logger error; {0}")]
    Logger(#[from] SetLoggerError),
    #[error("IO error; {0}")]
    Io(#[from] io::Error),
}

#[cfg(test)]
mod tests {
    use log::LevelFilter;

    use super::*;
    use crate::logging;

    #[test]
    fn second_logger_init_is_an_app_error() {
        let _ = logging::init(LevelFilter::Warn);
        let err = AppError::from(logging::init(LevelFilter::Warn).unwrap_err());

        assert!(matches!(err, AppError::Logger(_)));
        assert!(err.to_string().starts_with("Logger error; "));
        assert!(std::error::Error::source(&err).is_some());
    }
}
