// error.rs — Error types for the goal tracker core.
//
// Load-path problems (missing, empty or corrupt goals file) are not errors:
// they surface as a `LoadCondition`. Schema problems surface as diagnostics.
// What remains here is what a caller must actually handle.

use thiserror::Error;

/// Errors that can occur while saving, configuring or updating goals.
#[derive(Debug, Error)]
pub enum GoalError {
    /// A file I/O operation failed.
    #[error("I/O error at {path}: {source}")]
    IoError {
        path: String,
        source: std::io::Error,
    },

    /// Failed to serialize goal data.
    #[error("serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    /// The tracker configuration file could not be parsed.
    #[error("invalid config at {path}: {source}")]
    ConfigError {
        path: String,
        source: toml::de::Error,
    },

    /// No goal exists at the given catalog position.
    #[error("goal not found at index {0}")]
    GoalNotFound(usize),

    /// The goal exists but has no phase for the requested year.
    #[error("goal {goal_index} has no phase for year {year}")]
    PhaseNotFound { goal_index: usize, year: i64 },
}
