use std::{
    io::{self, Write as _},
    sync::{OnceLock, PoisonError, RwLock},
};

use colored::{ColoredString, Colorize as _};
use log::{Level, LevelFilter, Log, Metadata, Record, SetLoggerError};

static LOGGER: OnceLock<AppLogger> = OnceLock::new();

pub fn get_logger() -> &'static AppLogger {
    // default configuration
    const DEFAULT_LEVEL: LevelFilter = LevelFilter::Warn;

    LOGGER.get_or_init(|| AppLogger::new(DEFAULT_LEVEL))
}

pub fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
    let logger = get_logger();
    logger.set_min_level(level);
    log::set_logger(logger)?;
    log::set_max_level(LevelFilter::Trace);
    Ok(())
}

/// Logger writing `source -> message` lines to stderr.
pub struct AppLogger {
    min_level: RwLock<LevelFilter>,
}

impl AppLogger {
    fn new(min_level: LevelFilter) -> Self {
        Self {
            min_level: RwLock::new(min_level),
        }
    }

    pub fn min_level(&self) -> LevelFilter {
        *self.min_level.read().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn set_min_level(&self, level: LevelFilter) {
        *self.min_level.write().unwrap_or_else(PoisonError::into_inner) = level;
    }

    fn level_tag(level: Level) -> ColoredString {
        let tag = format!("{:<5}", level);
        match level {
            Level::Error => tag.red(),
            Level::Warn => tag.yellow(),
            Level::Info => tag.white(),
            Level::Debug => tag.blue(),
            Level::Trace => tag.dimmed(),
        }
    }

    fn format(record: &Record) -> String {
        format!(
            "{} {} -> {}",
            Self::level_tag(record.level()),
            record.module_path().unwrap_or("unknown").dimmed(),
            record.args()
        )
    }
}

impl Log for AppLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.min_level()
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let _ = writeln!(io::stderr().lock(), "{}", Self::format(record));
        }
    }

    fn flush(&self) {
        let _ = io::stderr().flush();
    }
}
