use std::{fs, io, path::Path};

use cmsolve::{Difficulty, ExpansionCounting, GeneratorConfig};
use ron::{self, extensions::Extensions};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::constants::{self, DEFAULT_SIZE};

const DEFAULT_SETTINGS: &str = include_str!("./default_settings.ron");

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("no preference directory on this system")]
    NoConfigDir,
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    #[error("RON parse error: {0}")]
    Ron(#[from] ron::error::SpannedError),
}

#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub rows: Option<usize>,
    #[serde(default)]
    pub cols: Option<usize>,
    #[serde(default)]
    pub difficulty: Option<Difficulty>,
    #[serde(default)]
    pub algorithm: Option<String>,
    #[serde(default)]
    pub astar_counting: Option<ExpansionCounting>,
    #[serde(default)]
    pub colors: Option<bool>,
    #[serde(default)]
    pub generator: Option<GeneratorConfig>,
}

impl Settings {
    pub fn get_rows(&self) -> usize {
        self.rows.unwrap_or(DEFAULT_SIZE)
    }

    pub fn get_cols(&self) -> usize {
        self.cols.unwrap_or(DEFAULT_SIZE)
    }

    pub fn get_difficulty(&self) -> Difficulty {
        self.difficulty.unwrap_or_default()
    }

    pub fn get_algorithm(&self) -> &str {
        self.algorithm.as_deref().unwrap_or("bfs")
    }

    pub fn get_astar_counting(&self) -> ExpansionCounting {
        self.astar_counting.unwrap_or_default()
    }

    pub fn get_colors(&self) -> bool {
        self.colors.unwrap_or(true)
    }

    pub fn get_generator(&self) -> GeneratorConfig {
        self.generator.clone().unwrap_or_default()
    }

    fn options() -> ron::Options {
        ron::Options::default().with_default_extension(Extensions::IMPLICIT_SOME)
    }

    pub fn parse(text: &str) -> Result<Self, SettingsError> {
        Ok(Self::options().from_str(text)?)
    }

    pub fn parse_default() -> Self {
        Self::parse(DEFAULT_SETTINGS).unwrap_or_default()
    }

    /// Reads the settings file, writing the default one first if it doesn't exist yet.
    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        match fs::read_to_string(path) {
            Ok(text) => Self::parse(&text),
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                log::info!("Creating default settings at {}", path.display());
                Self::reset_config(path)?;
                Self::parse(DEFAULT_SETTINGS)
            }
            Err(err) => Err(err.into()),
        }
    }

    /// Loads the settings from the default location, falling back to the built-in defaults.
    pub fn load_or_default() -> Self {
        let result = constants::settings_path()
            .ok_or(SettingsError::NoConfigDir)
            .and_then(|path| Self::load(&path));

        match result {
            Ok(settings) => settings,
            Err(err) => {
                log::warn!("Failed to load settings, using defaults: {}", err);
                Self::parse_default()
            }
        }
    }

    pub fn reset_config(path: &Path) -> Result<(), SettingsError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, DEFAULT_SETTINGS)?;
        Ok(())
    }
}
