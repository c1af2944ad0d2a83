use std::path::Path;

use miette::{IntoDiagnostic, Result};
use owo_colors::OwoColorize;
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use waypoint_core::{
    CountryCode, OrderingRegistry, ResearchSettings, RotationState, StatsPool, StatsSelector,
    WaypointConfig, catalogs, fallback_statistic,
};

use crate::output::Output;

/// Show the single best statistic for a goal
pub async fn featured(country: &str, domain: &str, goal: &str) -> Result<()> {
    let output = Output::new();
    let catalog = catalogs().for_code(country);

    output.section(&format!("Featured statistic ({})", catalog.country().display_name()));

    match catalog.featured_stat(domain, goal) {
        Some(stat) => output.statistic(None, stat),
        None => {
            output.warning("No statistics available, showing the default finding");
            output.statistic(None, &fallback_statistic());
        }
    }

    Ok(())
}

/// Show the relevant-statistics slate for a goal
pub async fn relevant(
    config: &WaypointConfig,
    country: &str,
    domain: &str,
    goal: &str,
    ordering: Option<&str>,
    seed: Option<u64>,
    json: bool,
) -> Result<()> {
    let output = Output::new();
    let country = CountryCode::resolve(country);
    let catalog = catalogs().get(country);

    let registry = OrderingRegistry::new();
    let policy = match ordering {
        Some(name) => registry.resolve(name)?,
        None => config.ordering_for(country, &registry)?,
    };

    let mut rng: Box<dyn RngCore> = match seed {
        Some(seed) => Box::new(StdRng::seed_from_u64(seed)),
        None => Box::new(rand::rng()),
    };

    let result = StatsSelector::with_policy(catalog, policy.clone()).relevant_stats_with_rng(
        domain,
        goal,
        &mut *rng,
    );

    if json {
        let rendered = serde_json::to_string_pretty(&result).into_diagnostic()?;
        println!("{}", rendered);
        return Ok(());
    }

    output.section(&format!(
        "Relevant statistics ({}, {} ordering)",
        country.display_name(),
        policy.name()
    ));
    output.info("Domain:", domain);
    output.info("Goal:", goal);

    if result.goal_specific.is_empty() {
        output.status("No goal-specific statistic for this selection");
    }

    let rotation = result.rotation();
    for (index, stat) in rotation.stats().iter().enumerate() {
        output.statistic(Some((index + 1, rotation.len())), stat);
    }

    Ok(())
}

/// List the domains and goals of a catalog
pub async fn domains(country: &str) -> Result<()> {
    let output = Output::new();
    let catalog = catalogs().for_code(country);

    output.section(&format!("{} catalog", catalog.country().display_name()));
    output.info("Statistics:", &catalog.stat_count().to_string());

    for domain in catalog.domain_names() {
        println!();
        println!("  {}", domain.bright_cyan());
        if let Some(goals) = catalog.goals(domain) {
            for (goal, records) in goals {
                output.list_item(&format!("{} {}", goal, format!("({})", records.len()).dimmed()));
            }
        }
    }

    if !catalog.normalizer().is_identity() {
        println!();
        output.status("Free-form goal names are matched against canonical keys for this country");
    }

    Ok(())
}

/// Show citation details for the featured statistic
pub async fn details(country: &str, domain: &str, goal: &str) -> Result<()> {
    let output = Output::new();
    let catalog = catalogs().for_code(country);

    let fallback = fallback_statistic();
    let stat = catalog.featured_stat(domain, goal).unwrap_or(&fallback);

    output.section(&stat.title);
    output.details(stat);

    Ok(())
}

/// Build and show the multi-country research pool
pub async fn pool(config: &WaypointConfig, settings_path: Option<&Path>) -> Result<()> {
    let output = Output::new();

    let settings = match settings_path {
        Some(path) => ResearchSettings::load(path).await?,
        None => config.research.clone(),
    };

    let countries: Vec<_> = settings
        .countries()
        .iter()
        .map(|c| c.display_name())
        .collect();

    output.section("Research pool");
    output.info("Countries:", &countries.join(", "));
    output.info("Domains:", &settings.selected_domains.join(", "));

    let pool = StatsPool::build(&settings, catalogs());
    match pool.state() {
        RotationState::Empty => {
            output.status("No data yet. Select at least one domain to see research statistics.");
        }
        RotationState::Showing { len, .. } => {
            for (index, stat) in pool.stats().iter().enumerate() {
                output.statistic(Some((index + 1, len)), stat);
            }
        }
    }

    Ok(())
}
