mod commands;
mod output;

use clap::{Parser, Subcommand};
use miette::Result;
use std::path::PathBuf;
use tracing::info;
use waypoint_core::{OrderingRegistry, config};

/// Info for the waypoint crates, warn for everything else
const DEFAULT_LOG_FILTER: &str = "waypoint_core=info,waypoint_cli=info,warn";

#[derive(Parser)]
#[command(name = "waypoint-cli")]
#[command(about = "Waypoint goal research statistics CLI")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file path
    #[arg(long, short = 'c')]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long)]
    debug: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the single best statistic for a goal
    Featured {
        #[command(flatten)]
        selection: SelectionArgs,
    },
    /// Show the relevant-statistics slate for a goal
    Relevant {
        #[command(flatten)]
        selection: SelectionArgs,

        /// Ordering policy (overrides config)
        #[arg(long)]
        ordering: Option<String>,

        /// Seed for a reproducible shuffle
        #[arg(long)]
        seed: Option<u64>,

        /// Print the full selection as JSON
        #[arg(long)]
        json: bool,
    },
    /// List the domains and goals of a country catalog
    Domains {
        /// Country code (unknown codes use the fallback catalog)
        #[arg(long, default_value = "other")]
        country: String,
    },
    /// Show citation details for the featured statistic
    Details {
        #[command(flatten)]
        selection: SelectionArgs,
    },
    /// Build the multi-country research pool
    Pool {
        /// Research settings JSON file (defaults to the config's [research] section)
        #[arg(long)]
        settings: Option<PathBuf>,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        cmd: ConfigCommands,
    },
}

#[derive(clap::Args)]
struct SelectionArgs {
    /// Country code (unknown codes use the fallback catalog)
    #[arg(long, default_value = "other")]
    country: String,

    /// Domain name, e.g. "Career & Work"
    #[arg(long)]
    domain: String,

    /// Goal name as chosen during onboarding
    #[arg(long)]
    goal: String,
}

#[derive(Subcommand)]
enum ConfigCommands {
    /// Show current configuration
    Show,
    /// Save current configuration to file
    Save {
        /// Path to save configuration
        #[arg(default_value = "waypoint.toml")]
        path: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if it exists
    let _ = dotenvy::dotenv();
    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .with_cause_chain()
                .color(true)
                .context_lines(5)
                .tab_width(2)
                .break_words(true)
                .build(),
        )
    }))?;
    miette::set_panic_hook();
    let cli = Cli::parse();

    // Initialize tracing
    use tracing_subscriber::{EnvFilter, fmt};

    // --debug wins, then RUST_LOG (which .env may set), then the default
    let filter = if cli.debug {
        EnvFilter::new("waypoint_core=debug,waypoint_cli=debug")
    } else {
        EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER))
    };

    fmt()
        .with_env_filter(filter)
        .with_file(true)
        .with_line_number(true)
        .with_thread_ids(false)
        .with_thread_names(false)
        .with_timer(tracing_subscriber::fmt::time::LocalTime::rfc_3339())
        .compact()
        .init();

    // Load configuration
    let config = if let Some(config_path) = &cli.config {
        info!("Loading config from: {:?}", config_path);
        config::load_config(config_path).await?
    } else {
        info!("Loading config from standard locations");
        config::load_config_from_standard_locations().await?
    };

    config.validate(&OrderingRegistry::new())?;

    match &cli.command {
        Commands::Featured { selection } => {
            commands::stats::featured(&selection.country, &selection.domain, &selection.goal)
                .await?
        }
        Commands::Relevant {
            selection,
            ordering,
            seed,
            json,
        } => {
            commands::stats::relevant(
                &config,
                &selection.country,
                &selection.domain,
                &selection.goal,
                ordering.as_deref(),
                *seed,
                *json,
            )
            .await?
        }
        Commands::Domains { country } => commands::stats::domains(country).await?,
        Commands::Details { selection } => {
            commands::stats::details(&selection.country, &selection.domain, &selection.goal)
                .await?
        }
        Commands::Pool { settings } => {
            commands::stats::pool(&config, settings.as_deref()).await?
        }
        Commands::Config { cmd } => match cmd {
            ConfigCommands::Show => commands::config::show(&config).await?,
            ConfigCommands::Save { path } => commands::config::save(&config, path).await?,
        },
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_relevant_parses_selection() {
        let cli = Cli::try_parse_from([
            "waypoint-cli",
            "relevant",
            "--country",
            "australia",
            "--domain",
            "Career & Work",
            "--goal",
            "Switch to Tech Career",
            "--seed",
            "7",
        ])
        .unwrap();

        match cli.command {
            Commands::Relevant {
                selection, seed, ..
            } => {
                assert_eq!(selection.country, "australia");
                assert_eq!(selection.goal, "Switch to Tech Career");
                assert_eq!(seed, Some(7));
            }
            _ => panic!("expected relevant command"),
        }
    }

    #[test]
    fn test_default_log_filter_parses() {
        assert!(
            DEFAULT_LOG_FILTER
                .parse::<tracing_subscriber::EnvFilter>()
                .is_ok()
        );
    }
}
