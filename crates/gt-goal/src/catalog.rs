// catalog.rs — GoalCatalog: the in-memory goal collection for a session.
//
// The catalog owns every Goal and Phase for the lifetime of a session.
// It is built once from the store, mutated in place through `update` and
// `append`, and written back only on an explicit `commit`. There is no
// autosave: edits that are never committed are lost.
//
// Goals are addressed by their position in the catalog. That is only sound
// because a session has a single writer and nothing reorders goals.

use crate::error::GoalError;
use crate::goal::Goal;
use crate::progress::ProgressEngine;
use crate::store::{GoalStore, LoadCondition};
use crate::validator::{Diagnostic, GoalValidator};

/// Session-scoped aggregate of all goals.
pub struct GoalCatalog {
    store: GoalStore,
    goals: Vec<Goal>,
    condition: LoadCondition,
    diagnostics: Vec<Diagnostic>,
    /// Set when in-memory goals differ from what was last loaded or saved.
    dirty: bool,
}

impl GoalCatalog {
    /// Load and validate the store's contents.
    ///
    /// Never fails: whatever could not be loaded is described by
    /// `load_condition()` and `diagnostics()`.
    pub fn open(store: GoalStore) -> Self {
        let outcome = store.load();
        let normalized = GoalValidator::normalize(&outcome.records);
        tracing::info!(
            "catalog opened with {} goal(s), {} diagnostic(s)",
            normalized.goals.len(),
            normalized.diagnostics.len()
        );
        Self {
            store,
            goals: normalized.goals,
            condition: outcome.condition,
            diagnostics: normalized.diagnostics,
            dirty: false,
        }
    }

    pub fn goals(&self) -> &[Goal] {
        &self.goals
    }

    pub fn goal(&self, goal_index: usize) -> Option<&Goal> {
        self.goals.get(goal_index)
    }

    pub fn load_condition(&self) -> &LoadCondition {
        &self.condition
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn store(&self) -> &GoalStore {
        &self.store
    }

    /// True if there are edits not yet committed.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Set the achieved value for one phase of one goal.
    ///
    /// The phase is the first one in the goal with a matching `year`.
    /// The value is clamped into `[0, target]`. Returns whether the stored
    /// value changed; nothing is touched when the goal or year is unknown.
    pub fn update(
        &mut self,
        goal_index: usize,
        year: i64,
        new_achieved: i64,
    ) -> Result<bool, GoalError> {
        let goal = self
            .goals
            .get_mut(goal_index)
            .ok_or(GoalError::GoalNotFound(goal_index))?;
        let phase = goal
            .phase_for_year_mut(year)
            .ok_or(GoalError::PhaseNotFound { goal_index, year })?;

        let (updated, changed) = ProgressEngine::apply_update(phase, new_achieved);
        if changed {
            tracing::debug!(
                "goal {} year {}: achieved {} -> {}",
                goal_index,
                year,
                phase.achieved,
                updated.achieved
            );
            *phase = updated;
            self.dirty = true;
        }
        Ok(changed)
    }

    /// Add an already well-formed goal at the end of the catalog.
    ///
    /// The goal is not re-validated. Returns its index.
    pub fn append(&mut self, goal: Goal) -> usize {
        tracing::debug!(
            "appending goal '{}' with {} phase(s)",
            goal.title,
            goal.phases.len()
        );
        self.goals.push(goal);
        self.dirty = true;
        self.goals.len() - 1
    }

    /// Persist pending edits.
    ///
    /// Returns `Ok(true)` if the file was written, `Ok(false)` if there was
    /// nothing to write. On error the in-memory goals are kept and stay dirty.
    pub fn try_commit(&mut self) -> Result<bool, GoalError> {
        if !self.dirty {
            tracing::debug!("commit skipped: no pending changes");
            return Ok(false);
        }

        let skipped = self.diagnostics.iter().filter(|d| d.kind.is_skip()).count();
        if skipped > 0 {
            tracing::warn!(
                "{} invalid entr(y/ies) from {} will not be written back",
                skipped,
                self.store.path().display()
            );
        }

        self.store.save(&self.goals)?;
        self.dirty = false;
        Ok(true)
    }

    /// Persist pending edits, reporting only success.
    ///
    /// Returns true when the file on disk now matches the catalog, whether
    /// or not a write was needed. Failures are logged.
    pub fn commit(&mut self) -> bool {
        match self.try_commit() {
            Ok(_) => true,
            Err(e) => {
                tracing::error!("failed to save goals: {}", e);
                false
            }
        }
    }
}
