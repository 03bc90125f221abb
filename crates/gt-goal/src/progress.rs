// progress.rs — Derived progress and bounded updates.
//
// Out-of-range update requests are normal input from a consumer (a spinner
// overshooting, a typo); they are clamped into `[0, target]`, never rejected.

use crate::goal::{Goal, Phase};

/// Stateless progress computations over goals and phases.
pub struct ProgressEngine;

impl ProgressEngine {
    /// `achieved / target` in `[0, 1]`; 0 when `target == 0`.
    pub fn ratio(phase: &Phase) -> f64 {
        if phase.target == 0 {
            return 0.0;
        }
        (phase.achieved.min(phase.target) as f64) / (phase.target as f64)
    }

    /// Combined ratio over all phases: total achieved / total target.
    pub fn goal_ratio(goal: &Goal) -> f64 {
        let (achieved, target) = goal
            .phases
            .iter()
            .filter(|p| p.target > 0)
            .fold((0u64, 0u64), |(a, t), p| {
                (
                    a.saturating_add(p.achieved.min(p.target)),
                    t.saturating_add(p.target),
                )
            });
        if target == 0 {
            return 0.0;
        }
        achieved as f64 / target as f64
    }

    /// Clamp a requested achieved value into `[0, target]`.
    pub fn clamp(target: u64, requested: i64) -> u64 {
        if requested <= 0 {
            0
        } else {
            (requested as u64).min(target)
        }
    }

    /// Apply a new achieved value to a copy of `phase`.
    ///
    /// Returns the updated phase and whether its stored value actually
    /// changed, so callers can skip redundant saves.
    pub fn apply_update(phase: &Phase, new_achieved: i64) -> (Phase, bool) {
        let achieved = Self::clamp(phase.target, new_achieved);
        let changed = achieved != phase.achieved;
        let updated = Phase {
            achieved,
            ..phase.clone()
        };
        (updated, changed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn phase(target: u64, achieved: u64) -> Phase {
        Phase::new(2024, "objective", target, achieved)
    }

    #[test]
    fn ratio_is_fraction_of_target() {
        assert_eq!(ProgressEngine::ratio(&phase(4, 1)), 0.25);
        assert_eq!(ProgressEngine::ratio(&phase(4, 4)), 1.0);
        assert_eq!(ProgressEngine::ratio(&phase(4, 0)), 0.0);
    }

    #[test]
    fn ratio_with_zero_target_is_zero() {
        assert_eq!(ProgressEngine::ratio(&phase(0, 0)), 0.0);
    }

    #[test]
    fn ratio_stays_in_unit_interval() {
        for target in 0..20u64 {
            for achieved in 0..25u64 {
                let mut p = phase(target, 0);
                // Bypass the constructor to check ratio is robust on its own.
                p.achieved = achieved;
                let r = ProgressEngine::ratio(&p);
                assert!((0.0..=1.0).contains(&r), "ratio {} out of range", r);
            }
        }
    }

    #[test]
    fn apply_update_clamps_above_target() {
        let (updated, changed) = ProgressEngine::apply_update(&phase(10, 3), 60);
        assert_eq!(updated.achieved, 10);
        assert!(changed);
    }

    #[test]
    fn apply_update_clamps_negative_to_zero() {
        let (updated, changed) = ProgressEngine::apply_update(&phase(10, 3), -5);
        assert_eq!(updated.achieved, 0);
        assert!(changed);
    }

    #[test]
    fn apply_update_same_value_is_unchanged() {
        let (updated, changed) = ProgressEngine::apply_update(&phase(10, 7), 7);
        assert_eq!(updated.achieved, 7);
        assert!(!changed);
    }

    #[test]
    fn apply_update_clamped_to_current_value_is_unchanged() {
        // Already at target; asking for more is a no-op.
        let (_, changed) = ProgressEngine::apply_update(&phase(10, 10), 99);
        assert!(!changed);
    }

    #[test]
    fn goal_ratio_weights_by_target() {
        let mut goal = Goal::new("Save", 2, "EUR");
        goal.phases.push(phase(100, 50));
        goal.phases.push(phase(300, 0));
        goal.phases.push(phase(0, 0));
        assert_eq!(ProgressEngine::goal_ratio(&goal), 0.125);

        let empty = Goal::new("Empty", 1, "");
        assert_eq!(ProgressEngine::goal_ratio(&empty), 0.0);
    }
}
