// goal.rs — Goal subcommands: list, check, update, add-example.

use gt_goal::{GoalCatalog, GoalStore, GoalTemplate, Severity, TrackerConfig};

use super::render;

fn open_catalog(config: &TrackerConfig) -> GoalCatalog {
    GoalCatalog::open(GoalStore::new(&config.goals_file))
}

fn skipped_count(catalog: &GoalCatalog) -> usize {
    catalog
        .diagnostics()
        .iter()
        .filter(|d| d.kind.is_skip())
        .count()
}

pub fn list(config: &TrackerConfig) -> anyhow::Result<()> {
    let catalog = open_catalog(config);

    if catalog.load_condition().severity() > Severity::Info {
        eprintln!("{}", catalog.load_condition());
    }
    if !catalog.diagnostics().is_empty() {
        eprintln!(
            "{} entr(y/ies) had problems; run `gt check` for details.",
            catalog.diagnostics().len()
        );
    }

    if catalog.goals().is_empty() {
        println!("No goals found in {}.", config.goals_file.display());
        return Ok(());
    }

    for (index, goal) in catalog.goals().iter().enumerate() {
        println!("{}", render::goal_header(index, goal));
        for phase in &goal.phases {
            for line in render::phase_lines(goal, phase) {
                println!("    {}", line);
            }
        }
        println!();
    }
    println!("{} goal(s) total.", catalog.goals().len());

    Ok(())
}

pub fn check(config: &TrackerConfig) -> anyhow::Result<()> {
    let catalog = open_catalog(config);
    let condition = catalog.load_condition();

    println!(
        "{}: {} [{}]",
        config.goals_file.display(),
        condition,
        condition.severity()
    );
    for diagnostic in catalog.diagnostics() {
        let tag = if diagnostic.kind.is_skip() {
            "skipped"
        } else {
            "adjusted"
        };
        println!("  {:<8} {}", tag, diagnostic);
    }

    let skipped = skipped_count(&catalog);
    if condition.severity() == Severity::Error {
        anyhow::bail!("goals file is unreadable");
    }
    if skipped > 0 {
        anyhow::bail!("{} entr(y/ies) skipped", skipped);
    }
    println!("{} valid goal(s).", catalog.goals().len());
    Ok(())
}

pub fn update(
    config: &TrackerConfig,
    goal_index: usize,
    year: i64,
    achieved: i64,
    force: bool,
) -> anyhow::Result<()> {
    let mut catalog = open_catalog(config);

    // Saving drops every entry the validator skipped.
    let skipped = skipped_count(&catalog);
    if skipped > 0 && !force {
        anyhow::bail!(
            "{} entr(y/ies) in {} were skipped on load and would be lost on save; \
             fix them (see `gt check`) or use --force",
            skipped,
            config.goals_file.display()
        );
    }

    if !catalog.update(goal_index, year, achieved)? {
        println!("No change.");
        return Ok(());
    }
    catalog.try_commit()?;

    if let Some(phase) = catalog
        .goal(goal_index)
        .and_then(|g| g.phase_for_year(year))
    {
        println!(
            "Saved: year {} now {} / {}.",
            phase.year, phase.achieved, phase.target
        );
    }
    Ok(())
}

pub fn add_example(
    config: &TrackerConfig,
    title: &str,
    years: u32,
    force: bool,
) -> anyhow::Result<()> {
    let mut catalog = open_catalog(config);

    // Saving now would replace whatever unparseable content is on disk.
    if catalog.load_condition().severity() == Severity::Error && !force {
        anyhow::bail!(
            "{}; refusing to overwrite it (use --force)",
            catalog.load_condition()
        );
    }
    let skipped = skipped_count(&catalog);
    if skipped > 0 && !force {
        anyhow::bail!(
            "{} entr(y/ies) were skipped on load and would be lost on save (use --force)",
            skipped
        );
    }

    let goal = GoalTemplate::new(title, years)
        .with_config(config.template.clone())
        .build();
    let phases = goal.phases.len();
    let index = catalog.append(goal);
    catalog.try_commit()?;

    println!("Added goal {}: {} ({} phases).", index, title, phases);
    Ok(())
}
