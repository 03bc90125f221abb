// validator.rs — Turns raw JSON records into well-formed goals.
//
// Normalization is total: every raw entry ends up either as a valid Goal
// or as one (or more) diagnostics naming its position. A bad goal never
// takes its siblings down with it, and a bad phase never takes down its
// goal. Diagnostics are emitted in input order.
//
// Required fields are never silently defaulted. Only `unit` is optional,
// and `achieved` is clamped when it breaks the phase invariant.

use std::fmt;

use serde_json::{Map, Value};

use crate::goal::{Goal, Phase};

/// What the validator did with an entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiagnosticKind {
    /// A top-level entry was not a JSON object; skipped.
    NotAnObject,
    /// A goal had missing or mistyped required fields; skipped.
    InvalidGoal,
    /// A phase had missing or mistyped required fields; skipped.
    InvalidPhase,
    /// A phase's `achieved` was outside `[0, target]`; clamped.
    AchievedClamped,
    /// A goal's `unit` was present but not a string; replaced with "".
    UnitDefaulted,
}

impl DiagnosticKind {
    /// True if the entry was dropped rather than adjusted.
    pub fn is_skip(self) -> bool {
        matches!(
            self,
            DiagnosticKind::NotAnObject | DiagnosticKind::InvalidGoal | DiagnosticKind::InvalidPhase
        )
    }
}

/// An indexed message describing why an entry was skipped or adjusted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// Position of the goal in the raw input.
    pub goal_index: usize,
    /// Position of the phase within the raw goal, for phase-level findings.
    pub phase_index: Option<usize>,
    pub kind: DiagnosticKind,
    pub message: String,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// Result of normalizing a raw record sequence.
#[derive(Debug, Clone, Default)]
pub struct Normalized {
    pub goals: Vec<Goal>,
    pub diagnostics: Vec<Diagnostic>,
}

impl Normalized {
    /// Number of goals and phases that were dropped.
    pub fn skipped(&self) -> usize {
        self.diagnostics.iter().filter(|d| d.kind.is_skip()).count()
    }
}

/// Validates raw goal records.
pub struct GoalValidator;

const PHASE_KEYS: [&str; 4] = ["year", "objective", "target", "achieved"];

impl GoalValidator {
    /// Normalize raw records into valid goals plus diagnostics.
    pub fn normalize(raw_records: &[Value]) -> Normalized {
        let mut out = Normalized::default();

        for (index, raw) in raw_records.iter().enumerate() {
            let Some(record) = raw.as_object() else {
                push(
                    &mut out.diagnostics,
                    index,
                    None,
                    DiagnosticKind::NotAnObject,
                    format!("entry at index {} is not an object", index),
                );
                continue;
            };

            if let Some(goal) = Self::normalize_goal(index, record, &mut out.diagnostics) {
                out.goals.push(goal);
            }
        }

        out
    }

    fn normalize_goal(
        index: usize,
        record: &Map<String, Value>,
        diagnostics: &mut Vec<Diagnostic>,
    ) -> Option<Goal> {
        let title = record
            .get("title")
            .and_then(Value::as_str)
            .filter(|t| !t.trim().is_empty());
        let duration_years = record
            .get("duration_years")
            .and_then(Value::as_u64)
            .filter(|d| *d > 0)
            .and_then(|d| u32::try_from(d).ok());
        let phases = record.get("phases").and_then(Value::as_array);

        let mut problems = Vec::new();
        if title.is_none() {
            problems.push("'title' must be a non-empty string");
        }
        if duration_years.is_none() {
            problems.push("'duration_years' must be a positive integer");
        }
        if phases.is_none() {
            problems.push("'phases' must be a list");
        }

        let (Some(title), Some(duration_years), Some(raw_phases)) = (title, duration_years, phases)
        else {
            push(
                diagnostics,
                index,
                None,
                DiagnosticKind::InvalidGoal,
                format!("goal at index {} skipped: {}", index, problems.join("; ")),
            );
            return None;
        };

        let unit = match record.get("unit") {
            None | Some(Value::Null) => String::new(),
            Some(Value::String(u)) => u.clone(),
            Some(other) => {
                push(
                    diagnostics,
                    index,
                    None,
                    DiagnosticKind::UnitDefaulted,
                    format!(
                        "goal at index {}: 'unit' is not a string ({}), using empty unit",
                        index, other
                    ),
                );
                String::new()
            }
        };

        let mut goal = Goal::new(title, duration_years, unit);
        for (phase_index, raw_phase) in raw_phases.iter().enumerate() {
            if let Some(phase) = Self::normalize_phase(index, phase_index, raw_phase, diagnostics) {
                goal.phases.push(phase);
            }
        }
        Some(goal)
    }

    fn normalize_phase(
        goal_index: usize,
        phase_index: usize,
        raw: &Value,
        diagnostics: &mut Vec<Diagnostic>,
    ) -> Option<Phase> {
        let Some(record) = raw.as_object() else {
            push(
                diagnostics,
                goal_index,
                Some(phase_index),
                DiagnosticKind::InvalidPhase,
                format!(
                    "goal at index {}: phase {} skipped (not an object): {}",
                    goal_index, phase_index, raw
                ),
            );
            return None;
        };

        let missing: Vec<&str> = PHASE_KEYS
            .iter()
            .copied()
            .filter(|key| !record.contains_key(*key))
            .collect();
        if !missing.is_empty() {
            push(
                diagnostics,
                goal_index,
                Some(phase_index),
                DiagnosticKind::InvalidPhase,
                format!(
                    "goal at index {}: phase {} skipped (missing {}): {}",
                    goal_index,
                    phase_index,
                    missing.join(", "),
                    raw
                ),
            );
            return None;
        }

        let year = record.get("year").and_then(Value::as_i64);
        let objective = record.get("objective").and_then(Value::as_str);
        let target = record.get("target").and_then(Value::as_u64);
        let achieved = record.get("achieved").and_then(as_integer);

        let mut mistyped = Vec::new();
        if year.is_none() {
            mistyped.push("year");
        }
        if objective.is_none() {
            mistyped.push("objective");
        }
        if target.is_none() {
            mistyped.push("target");
        }
        if achieved.is_none() {
            mistyped.push("achieved");
        }

        let (Some(year), Some(objective), Some(target), Some(achieved)) =
            (year, objective, target, achieved)
        else {
            push(
                diagnostics,
                goal_index,
                Some(phase_index),
                DiagnosticKind::InvalidPhase,
                format!(
                    "goal at index {}: phase {} skipped (invalid {}): {}",
                    goal_index,
                    phase_index,
                    mistyped.join(", "),
                    raw
                ),
            );
            return None;
        };

        let clamped = achieved.clamp(0, i128::from(target)) as u64;
        if i128::from(clamped) != achieved {
            push(
                diagnostics,
                goal_index,
                Some(phase_index),
                DiagnosticKind::AchievedClamped,
                format!(
                    "goal at index {}: phase {} achieved {} clamped to {} (target {})",
                    goal_index, phase_index, achieved, clamped, target
                ),
            );
        }

        Some(Phase {
            year,
            objective: objective.to_string(),
            target,
            achieved: clamped,
        })
    }
}

/// Integer value of a JSON number, accepting the full i64 and u64 ranges.
fn as_integer(value: &Value) -> Option<i128> {
    value
        .as_i64()
        .map(i128::from)
        .or_else(|| value.as_u64().map(i128::from))
}

fn push(
    diagnostics: &mut Vec<Diagnostic>,
    goal_index: usize,
    phase_index: Option<usize>,
    kind: DiagnosticKind,
    message: String,
) {
    if kind.is_skip() {
        tracing::warn!("{}", message);
    } else {
        tracing::info!("{}", message);
    }
    diagnostics.push(Diagnostic {
        goal_index,
        phase_index,
        kind,
        message,
    });
}
