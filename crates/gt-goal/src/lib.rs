//! # gt-goal
//!
//! Multi-year goal tracking: goals decompose into yearly phases with
//! numeric targets, persisted as a single JSON file.
//!
//! Loading is forgiving. A missing, blank or corrupt file yields an empty
//! collection plus a [`LoadCondition`]; malformed goals and phases are
//! dropped individually with an indexed [`Diagnostic`] instead of failing
//! the whole load.
//!
//! ## Key components
//!
//! - [`GoalStore`] — reads raw records and writes the collection atomically
//! - [`GoalValidator`] — turns raw records into [`Goal`]/[`Phase`] values
//! - [`ProgressEngine`] — progress ratios and clamped updates
//! - [`GoalCatalog`] — the session's goals; update, append, commit
//! - [`GoalTemplate`] — generated example goals with auto-filled phases
//! - [`TrackerConfig`] — goals file location and template defaults

pub mod catalog;
pub mod config;
pub mod error;
pub mod goal;
pub mod progress;
pub mod store;
pub mod template;
pub mod validator;

pub use catalog::GoalCatalog;
pub use config::TrackerConfig;
pub use error::GoalError;
pub use goal::{Goal, Phase};
pub use progress::ProgressEngine;
pub use store::{GoalStore, LoadCondition, LoadOutcome, Severity};
pub use template::{GoalTemplate, TemplateConfig};
pub use validator::{Diagnostic, DiagnosticKind, GoalValidator, Normalized};
