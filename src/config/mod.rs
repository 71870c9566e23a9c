//! Configuration module for company-research
//!
//! Handles loading and validating settings from YAML files and environment variables.

mod settings;

pub use settings::*;

use anyhow::Result;
use std::path::PathBuf;
use tracing::info;

/// Environment variable naming an explicit settings file
pub const SETTINGS_PATH_ENV: &str = "RESEARCH_SETTINGS_PATH";

/// Default locations searched for a settings file, in order
pub fn default_paths() -> Vec<PathBuf> {
    let mut paths = vec![
        PathBuf::from("settings.yml"),
        PathBuf::from("config/settings.yml"),
    ];
    if let Some(dir) = dirs::config_dir() {
        paths.push(dir.join("company-research/settings.yml"));
    }
    paths
}

/// Load settings from the first file found, falling back to defaults,
/// then apply environment overrides
pub fn load() -> Result<Settings> {
    let explicit = std::env::var(SETTINGS_PATH_ENV).ok().map(PathBuf::from);

    let found = explicit
        .into_iter()
        .chain(default_paths())
        .find(|path| path.exists());

    let mut settings = match found {
        Some(path) => {
            info!("Loading settings from: {}", path.display());
            Settings::from_file(&path)?
        }
        None => {
            info!("No settings file found, using defaults");
            Settings::default()
        }
    };

    settings.merge_env();
    settings.validate()?;
    Ok(settings)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_paths_start_with_local_files() {
        let paths = default_paths();
        assert_eq!(paths[0], PathBuf::from("settings.yml"));
        assert_eq!(paths[1], PathBuf::from("config/settings.yml"));
    }

    #[test]
    fn test_from_file_round_trip() {
        let dir = std::env::temp_dir().join(format!("research-settings-{}", uuid::Uuid::new_v4()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("settings.yml");
        std::fs::write(&path, "server:\n  port: 9100\nsearch:\n  query_timeout: 2.5\n").unwrap();

        let settings = Settings::from_file(&path).unwrap();
        assert_eq!(settings.server.port, 9100);
        assert_eq!(settings.search.query_timeout, 2.5);
        assert_eq!(settings.search.max_results, 8);

        std::fs::remove_dir_all(&dir).unwrap();
    }
}
