// render.rs — Plain-text rendering of goals and progress.

use gt_goal::{Goal, Phase, ProgressEngine};

const BAR_WIDTH: usize = 20;

/// `[#####...............]  25%`
pub fn progress_bar(ratio: f64) -> String {
    let ratio = ratio.clamp(0.0, 1.0);
    let filled = (ratio * BAR_WIDTH as f64).round() as usize;
    format!(
        "[{}{}] {:>3}%",
        "#".repeat(filled),
        ".".repeat(BAR_WIDTH - filled),
        (ratio * 100.0).round() as u32
    )
}

pub fn goal_header(index: usize, goal: &Goal) -> String {
    format!(
        "{}. {} ({} Years) {}",
        index,
        goal.title,
        goal.duration_years,
        progress_bar(ProgressEngine::goal_ratio(goal))
    )
}

pub fn phase_lines(goal: &Goal, phase: &Phase) -> [String; 2] {
    let unit = if goal.unit.is_empty() {
        String::new()
    } else {
        format!(" {}", goal.unit)
    };
    [
        format!("Year {}: {}", phase.year, phase.objective),
        format!(
            "{} Achieved: {} / {}{}",
            progress_bar(ProgressEngine::ratio(phase)),
            phase.achieved,
            phase.target,
            unit
        ),
    ]
}
