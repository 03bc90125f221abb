// template.rs — Generated example goals.
//
// A template produces a fully formed Goal with one auto-filled phase per
// year, ready to hand to `GoalCatalog::append` without re-validation.

use serde::{Deserialize, Serialize};

use crate::goal::{Goal, Phase};

/// Defaults for phases generated from a template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateConfig {
    /// Target assigned to every generated phase.
    #[serde(default = "default_phase_target")]
    pub phase_target: u64,

    /// Unit label for generated goals.
    #[serde(default)]
    pub unit: String,

    /// Year number of the first generated phase.
    #[serde(default = "default_start_year")]
    pub start_year: i64,
}

impl Default for TemplateConfig {
    fn default() -> Self {
        Self {
            phase_target: default_phase_target(),
            unit: String::new(),
            start_year: default_start_year(),
        }
    }
}

fn default_phase_target() -> u64 {
    10
}

fn default_start_year() -> i64 {
    1
}

/// Builder for an example goal spanning `years` years.
#[derive(Debug, Clone)]
pub struct GoalTemplate {
    pub title: String,
    pub years: u32,
    pub config: TemplateConfig,
}

impl GoalTemplate {
    pub fn new(title: impl Into<String>, years: u32) -> Self {
        Self {
            title: title.into(),
            years,
            config: TemplateConfig::default(),
        }
    }

    pub fn with_config(mut self, config: TemplateConfig) -> Self {
        self.config = config;
        self
    }

    /// Build the goal: phases for consecutive years, nothing achieved yet.
    ///
    /// A zero-year template still yields a one-year goal so the result
    /// passes the same rules the validator enforces. The first year is
    /// pulled back when needed so every phase year fits in an `i64`.
    pub fn build(&self) -> Goal {
        let years = self.years.max(1);
        let start_year = self
            .config
            .start_year
            .min(i64::MAX - i64::from(years - 1));
        let mut goal = Goal::new(self.title.clone(), years, self.config.unit.clone());
        goal.phases = (0..years)
            .map(|offset| {
                Phase::new(
                    start_year + i64::from(offset),
                    format!("Year {} milestone", offset + 1),
                    self.config.phase_target,
                    0,
                )
            })
            .collect();
        goal
    }
}
