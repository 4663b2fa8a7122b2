use std::path::PathBuf;

use dirs::preference_dir;

/// Maze size used when neither the settings nor the command line specify one.
pub const DEFAULT_SIZE: usize = 15;

pub const SETTINGS_FILE: &str = "settings.ron";

pub fn base_path() -> Option<PathBuf> {
    preference_dir().map(|dir| dir.join("tmsolve"))
}

pub fn settings_path() -> Option<PathBuf> {
    base_path().map(|base| base.join(SETTINGS_FILE))
}
