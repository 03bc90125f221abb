// store.rs — GoalStore: persistence for the goal collection.
//
// All goals live in one JSON file (an array of goal objects). Loading never
// fails outright: a missing, blank or corrupt file degrades to an empty
// record list plus a `LoadCondition` describing what happened, so the
// consumer can tell the user exactly why nothing was loaded.
//
// Saving writes the whole collection to a sibling temp file and renames it
// over the target, so a failed save never leaves a half-written goals file.

use std::fmt;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use serde_json::Value;

use crate::error::GoalError;
use crate::goal::Goal;

/// How serious a load condition is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Info,
    Warning,
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Info => write!(f, "info"),
            Severity::Warning => write!(f, "warning"),
            Severity::Error => write!(f, "error"),
        }
    }
}

/// What `GoalStore::load` found on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadCondition {
    /// The file was read and parsed; `count` raw records were returned.
    Loaded { count: usize },
    /// No goals file exists yet.
    Missing,
    /// The file exists but contains only whitespace.
    Empty,
    /// The file could not be read or is not a JSON array.
    Malformed { cause: String },
}

impl LoadCondition {
    pub fn severity(&self) -> Severity {
        match self {
            LoadCondition::Loaded { .. } | LoadCondition::Missing => Severity::Info,
            LoadCondition::Empty => Severity::Warning,
            LoadCondition::Malformed { .. } => Severity::Error,
        }
    }
}

impl fmt::Display for LoadCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadCondition::Loaded { count } => write!(f, "loaded {} goal record(s)", count),
            LoadCondition::Missing => write!(f, "no goals file yet, starting empty"),
            LoadCondition::Empty => write!(f, "goals file is empty, starting empty"),
            LoadCondition::Malformed { cause } => {
                write!(f, "goals file could not be parsed: {}", cause)
            }
        }
    }
}

/// Raw records plus the condition under which they were loaded.
#[derive(Debug, Clone)]
pub struct LoadOutcome {
    pub records: Vec<Value>,
    pub condition: LoadCondition,
}

/// Persistent store for the goal collection.
///
/// The path is always supplied by the caller; nothing here assumes a
/// fixed location.
#[derive(Debug, Clone)]
pub struct GoalStore {
    path: PathBuf,
}

impl GoalStore {
    /// Create a store backed by the given file. The file need not exist.
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read raw goal records from disk.
    pub fn load(&self) -> LoadOutcome {
        let condition_only = |condition: LoadCondition| LoadOutcome {
            records: Vec::new(),
            condition,
        };

        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::info!("goals file {} not found, starting empty", self.path.display());
                return condition_only(LoadCondition::Missing);
            }
            Err(e) => {
                tracing::error!("failed to read goals file {}: {}", self.path.display(), e);
                return condition_only(LoadCondition::Malformed {
                    cause: e.to_string(),
                });
            }
        };

        if content.trim().is_empty() {
            tracing::warn!("goals file {} is empty", self.path.display());
            return condition_only(LoadCondition::Empty);
        }

        match serde_json::from_str::<Value>(&content) {
            Ok(Value::Array(records)) => {
                tracing::debug!(
                    "loaded {} goal record(s) from {}",
                    records.len(),
                    self.path.display()
                );
                LoadOutcome {
                    condition: LoadCondition::Loaded {
                        count: records.len(),
                    },
                    records,
                }
            }
            Ok(_) => {
                let cause = "expected a JSON array of goals".to_string();
                tracing::error!("goals file {}: {}", self.path.display(), cause);
                condition_only(LoadCondition::Malformed { cause })
            }
            Err(e) => {
                tracing::error!("goals file {} is not valid JSON: {}", self.path.display(), e);
                condition_only(LoadCondition::Malformed {
                    cause: e.to_string(),
                })
            }
        }
    }

    /// Write the full goal collection, replacing the file atomically.
    pub fn save(&self, goals: &[Goal]) -> Result<(), GoalError> {
        let bytes = to_json_pretty(goals)?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|source| GoalError::IoError {
                path: parent.display().to_string(),
                source,
            })?;
        }

        let temp_path = self.temp_path();
        if let Err(source) = fs::write(&temp_path, &bytes) {
            let _ = fs::remove_file(&temp_path);
            tracing::error!("failed to write {}: {}", temp_path.display(), source);
            return Err(GoalError::IoError {
                path: temp_path.display().to_string(),
                source,
            });
        }

        if let Err(source) = fs::rename(&temp_path, &self.path) {
            let _ = fs::remove_file(&temp_path);
            tracing::error!(
                "failed to replace {} with {}: {}",
                self.path.display(),
                temp_path.display(),
                source
            );
            return Err(GoalError::IoError {
                path: self.path.display().to_string(),
                source,
            });
        }

        tracing::debug!("saved {} goal(s) to {}", goals.len(), self.path.display());
        Ok(())
    }

    /// Sibling temp file used for atomic replace (`goals.json` → `goals.json.tmp`).
    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

/// JSON with four-space indentation and a trailing newline.
fn to_json_pretty<T: Serialize + ?Sized>(value: &T) -> Result<Vec<u8>, GoalError> {
    let mut buf = Vec::new();
    let formatter = PrettyFormatter::with_indent(b"    ");
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
    value.serialize(&mut ser)?;
    buf.push(b'\n');
    Ok(buf)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::goal::Phase;
    use tempfile::tempdir;

    fn sample_goals() -> Vec<Goal> {
        let mut fitness = Goal::new("Get fit", 2, "km");
        fitness.phases.push(Phase::new(2024, "Run 300 km", 300, 42));
        fitness.phases.push(Phase::new(2025, "Run 600 km", 600, 0));
        let learning = Goal::new("Learn Rust", 1, "");
        vec![fitness, learning]
    }

    #[test]
    fn missing_file_is_informational() {
        let dir = tempdir().unwrap();
        let store = GoalStore::new(dir.path().join("goals.json"));

        let outcome = store.load();
        assert!(outcome.records.is_empty());
        assert_eq!(outcome.condition, LoadCondition::Missing);
        assert_eq!(outcome.condition.severity(), Severity::Info);
    }

    #[test]
    fn blank_file_is_a_warning() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("goals.json");
        fs::write(&path, "  \n\t\n").unwrap();

        let outcome = GoalStore::new(&path).load();
        assert!(outcome.records.is_empty());
        assert_eq!(outcome.condition, LoadCondition::Empty);
        assert_eq!(outcome.condition.severity(), Severity::Warning);
    }

    #[test]
    fn corrupt_file_is_an_error_with_cause() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("goals.json");
        fs::write(&path, "{not json").unwrap();

        let outcome = GoalStore::new(&path).load();
        assert!(outcome.records.is_empty());
        assert_eq!(outcome.condition.severity(), Severity::Error);
        match outcome.condition {
            LoadCondition::Malformed { cause } => assert!(!cause.is_empty()),
            other => panic!("expected Malformed, got {:?}", other),
        }
    }

    #[test]
    fn invalid_utf8_file_is_an_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("goals.json");
        fs::write(&path, [0xff, 0xfe, b'[', b']']).unwrap();

        let outcome = GoalStore::new(&path).load();
        assert!(outcome.records.is_empty());
        assert_eq!(outcome.condition.severity(), Severity::Error);
        assert!(matches!(outcome.condition, LoadCondition::Malformed { .. }));
    }

    #[test]
    fn directory_as_goals_path_is_an_error() {
        let dir = tempdir().unwrap();

        let outcome = GoalStore::new(dir.path()).load();
        assert!(outcome.records.is_empty());
        assert_eq!(outcome.condition.severity(), Severity::Error);
        assert!(matches!(outcome.condition, LoadCondition::Malformed { .. }));
    }

    #[test]
    fn non_array_document_is_malformed() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("goals.json");
        fs::write(&path, r#"{"title": "not a list"}"#).unwrap();

        let outcome = GoalStore::new(&path).load();
        assert!(outcome.records.is_empty());
        assert!(matches!(outcome.condition, LoadCondition::Malformed { .. }));
    }

    #[test]
    fn save_and_load_round_trip() {
        let dir = tempdir().unwrap();
        let store = GoalStore::new(dir.path().join("goals.json"));
        let goals = sample_goals();

        store.save(&goals).unwrap();
        let outcome = store.load();
        assert_eq!(outcome.condition, LoadCondition::Loaded { count: 2 });

        let restored: Vec<Goal> = outcome
            .records
            .into_iter()
            .map(|v| serde_json::from_value(v).unwrap())
            .collect();
        assert_eq!(restored, goals);
    }

    #[test]
    fn save_uses_four_space_indentation() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("goals.json");
        GoalStore::new(&path).save(&sample_goals()).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert!(content.starts_with("[\n    {\n        \"title\": \"Get fit\""));
        assert!(content.ends_with("]\n"));
    }

    #[test]
    fn save_creates_parent_dirs_and_leaves_no_temp_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("goals.json");
        let store = GoalStore::new(&path);

        store.save(&sample_goals()).unwrap();
        assert!(path.exists());
        assert!(!dir.path().join("nested").join("goals.json.tmp").exists());
    }

    #[test]
    fn failed_save_keeps_existing_file_intact() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("goals.json");
        let store = GoalStore::new(&path);
        store.save(&sample_goals()).unwrap();
        let before = fs::read_to_string(&path).unwrap();

        // A directory squatting on the temp path makes the write fail.
        fs::create_dir(dir.path().join("goals.json.tmp")).unwrap();
        let result = store.save(&[]);
        assert!(matches!(result, Err(GoalError::IoError { .. })));

        assert_eq!(fs::read_to_string(&path).unwrap(), before);
    }
}
