// config.rs — Tracker configuration.
//
// TrackerConfig decides where the goals file lives and how example goals
// are generated. `for_project()` gives defaults rooted at a project
// directory; `load_or_default()` layers an optional `goaltrack.toml` on top.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::GoalError;
use crate::template::TemplateConfig;

/// Name of the optional config file in the project root.
pub const CONFIG_FILE_NAME: &str = "goaltrack.toml";

/// Top-level tracker configuration from goaltrack.toml.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackerConfig {
    /// Path to the goals file. Relative paths are resolved against the
    /// project root.
    #[serde(default = "default_goals_file")]
    pub goals_file: PathBuf,

    /// Defaults for generated example goals.
    #[serde(default)]
    pub template: TemplateConfig,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            goals_file: default_goals_file(),
            template: TemplateConfig::default(),
        }
    }
}

fn default_goals_file() -> PathBuf {
    PathBuf::from("goals.json")
}

impl TrackerConfig {
    /// Defaults for a project, without touching disk.
    pub fn for_project(project_root: impl AsRef<Path>) -> Self {
        let mut config = Self::default();
        config.goals_file = project_root.as_ref().join(&config.goals_file);
        config
    }

    /// Parse a config file. Paths in it stay as written.
    pub fn load(path: &Path) -> Result<Self, GoalError> {
        let content = fs::read_to_string(path).map_err(|source| GoalError::IoError {
            path: path.display().to_string(),
            source,
        })?;
        toml::from_str(&content).map_err(|source| GoalError::ConfigError {
            path: path.display().to_string(),
            source,
        })
    }

    /// Load `<project_root>/goaltrack.toml`, falling back to defaults when
    /// the file does not exist. A present but invalid file is an error.
    pub fn load_or_default(project_root: impl AsRef<Path>) -> Result<Self, GoalError> {
        let root = project_root.as_ref();
        let path = root.join(CONFIG_FILE_NAME);
        let mut config = match Self::load(&path) {
            Ok(config) => config,
            Err(GoalError::IoError { source, .. }) if source.kind() == ErrorKind::NotFound => {
                tracing::debug!("no {} in {}, using defaults", CONFIG_FILE_NAME, root.display());
                Self::default()
            }
            Err(e) => return Err(e),
        };
        if config.goals_file.is_relative() {
            config.goals_file = root.join(&config.goals_file);
        }
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn for_project_places_goals_file_in_root() {
        let config = TrackerConfig::for_project("/tmp/project");
        assert_eq!(config.goals_file, PathBuf::from("/tmp/project/goals.json"));
        assert_eq!(config.template.phase_target, 10);
    }

    #[test]
    fn missing_config_file_gives_defaults() {
        let dir = tempdir().unwrap();
        let config = TrackerConfig::load_or_default(dir.path()).unwrap();
        assert_eq!(config, TrackerConfig::for_project(dir.path()));
    }

    #[test]
    fn config_file_overrides_are_applied() {
        let dir = tempdir().unwrap();
        fs::write(
            dir.path().join(CONFIG_FILE_NAME),
            r#"
goals_file = "data/my-goals.json"

[template]
phase_target = 12
unit = "books"
"#,
        )
        .unwrap();

        let config = TrackerConfig::load_or_default(dir.path()).unwrap();
        assert_eq!(config.goals_file, dir.path().join("data/my-goals.json"));
        assert_eq!(config.template.phase_target, 12);
        assert_eq!(config.template.unit, "books");
        assert_eq!(config.template.start_year, 1);
    }

    #[test]
    fn invalid_config_file_is_an_error() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join(CONFIG_FILE_NAME), "goals_file = [").unwrap();

        let result = TrackerConfig::load_or_default(dir.path());
        assert!(matches!(result, Err(GoalError::ConfigError { .. })));
    }
}
