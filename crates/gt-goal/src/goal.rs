// goal.rs — Goal and Phase: the persisted goal hierarchy.
//
// A Goal spans several years and owns an ordered list of yearly phases.
// Field order on the structs is the field order written to goals.json,
// which keeps saved files stable and diff-friendly.
//
// Phase order is insertion order. Nothing in the crate re-sorts phases,
// so the file and every consumer see them exactly as they were written.

use serde::{Deserialize, Serialize};

/// A long-term goal decomposed into yearly phases.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Goal {
    /// Human-readable title (never empty once validated).
    pub title: String,

    /// How many years the goal spans.
    pub duration_years: u32,

    /// Label for phase quantities (e.g., "books", "km"). May be empty.
    #[serde(default)]
    pub unit: String,

    /// Yearly milestones, in presentation order.
    pub phases: Vec<Phase>,
}

/// One year's milestone within a goal.
///
/// Invariant: `achieved <= target`. When `target == 0`, `achieved` is 0.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Phase {
    pub year: i64,
    pub objective: String,
    pub target: u64,
    pub achieved: u64,
}

impl Goal {
    /// Create a goal with no phases yet.
    pub fn new(title: impl Into<String>, duration_years: u32, unit: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            duration_years,
            unit: unit.into(),
            phases: Vec::new(),
        }
    }

    /// First phase for `year`, if any.
    ///
    /// Duplicate years are tolerated in stored data; lookups always resolve
    /// to the earliest one.
    pub fn phase_for_year(&self, year: i64) -> Option<&Phase> {
        self.phases.iter().find(|p| p.year == year)
    }

    pub(crate) fn phase_for_year_mut(&mut self, year: i64) -> Option<&mut Phase> {
        self.phases.iter_mut().find(|p| p.year == year)
    }

    /// True when every phase with a non-zero target has been met.
    pub fn is_complete(&self) -> bool {
        self.phases
            .iter()
            .filter(|p| p.target > 0)
            .all(Phase::is_complete)
            && self.phases.iter().any(|p| p.target > 0)
    }
}

impl Phase {
    /// Create a phase, clamping `achieved` into `[0, target]`.
    pub fn new(year: i64, objective: impl Into<String>, target: u64, achieved: u64) -> Self {
        Self {
            year,
            objective: objective.into(),
            target,
            achieved: achieved.min(target),
        }
    }

    /// A phase is complete once a non-zero target has been reached.
    pub fn is_complete(&self) -> bool {
        self.target > 0 && self.achieved == self.target
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reading_goal() -> Goal {
        let mut goal = Goal::new("Read more", 3, "books");
        goal.phases.push(Phase::new(2024, "Read 12 books", 12, 5));
        goal.phases.push(Phase::new(2025, "Read 24 books", 24, 0));
        goal.phases.push(Phase::new(2024, "Duplicate year", 6, 6));
        goal
    }

    #[test]
    fn phase_new_clamps_achieved_to_target() {
        let phase = Phase::new(2024, "x", 10, 50);
        assert_eq!(phase.achieved, 10);

        let zero = Phase::new(2024, "x", 0, 3);
        assert_eq!(zero.achieved, 0);
    }

    #[test]
    fn phase_for_year_returns_first_match() {
        let goal = reading_goal();
        let phase = goal.phase_for_year(2024).unwrap();
        assert_eq!(phase.objective, "Read 12 books");
        assert!(goal.phase_for_year(1999).is_none());
    }

    #[test]
    fn goal_completion_ignores_zero_target_phases() {
        let mut goal = Goal::new("Run", 2, "km");
        goal.phases.push(Phase::new(1, "a", 5, 5));
        goal.phases.push(Phase::new(2, "b", 0, 0));
        assert!(goal.is_complete());

        goal.phases[0].achieved = 4;
        assert!(!goal.is_complete());

        let empty = Goal::new("Nothing", 1, "");
        assert!(!empty.is_complete());
    }

    #[test]
    fn serialization_keeps_field_order() {
        let goal = reading_goal();
        let json = serde_json::to_string(&goal).unwrap();
        let title = json.find("\"title\"").unwrap();
        let duration = json.find("\"duration_years\"").unwrap();
        let unit = json.find("\"unit\"").unwrap();
        let phases = json.find("\"phases\"").unwrap();
        assert!(title < duration && duration < unit && unit < phases);

        let restored: Goal = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, goal);
    }

    #[test]
    fn missing_unit_deserializes_as_empty() {
        let json = r#"{"title":"t","duration_years":1,"phases":[]}"#;
        let goal: Goal = serde_json::from_str(json).unwrap();
        assert_eq!(goal.unit, "");
    }
}
