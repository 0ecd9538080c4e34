//! Voyage - AI travel-itinerary planner
//!
//! CLI entry point: no subcommand launches the interactive planner, `plan`
//! runs one generation in batch mode, `about` prints the informational view
//! (reachable without a credential).

use std::fs;
use std::path::{Path, PathBuf};

use clap::Parser;
use colored::*;
use eyre::{Context, Result};
use tracing::{debug, info};

use voyage::cli::{Cli, Command};
use voyage::config::{Config, CredentialStatus};
use voyage::domain::{Budget, Preferences, SpotPreference, TripRequest};
use voyage::export::export_document;
use voyage::llm::create_client;
use voyage::pipeline::run_generation;
use voyage::prompts::PromptLoader;
use voyage::render::{ItineraryView, MEAL_LABELS};
use voyage::tui;

fn setup_logging(cli_log_level: Option<&str>, log_dir: &Path) -> Result<()> {
    fs::create_dir_all(log_dir).context("Failed to create log directory")?;

    let level = match cli_log_level.map(str::to_uppercase).as_deref() {
        Some("TRACE") => tracing::Level::TRACE,
        Some("DEBUG") => tracing::Level::DEBUG,
        Some("INFO") | None => tracing::Level::INFO,
        Some("WARN") | Some("WARNING") => tracing::Level::WARN,
        Some("ERROR") => tracing::Level::ERROR,
        Some(other) => {
            eprintln!("Warning: Unknown log-level '{}', defaulting to INFO", other);
            tracing::Level::INFO
        }
    };

    // Logs go to a file: the terminal belongs to the TUI
    let log_file = fs::File::create(log_dir.join("voyage.log")).context("Failed to create log file")?;

    tracing_subscriber::fmt()
        .with_writer(log_file)
        .with_ansi(false)
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()))
        .init();

    info!("Logging initialized (level: {:?})", level);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = Config::load(cli.config.as_ref()).context("Failed to load configuration")?;
    setup_logging(cli.log_level.as_deref(), &config.storage.log_dir()).context("Failed to setup logging")?;

    info!("Voyage loaded config: provider={}", config.llm.provider);

    debug!(command = ?cli.command, "main: dispatching command");
    match cli.command {
        Some(Command::Plan {
            destination,
            duration,
            budget,
            age_group,
            interests,
            vibe,
            spots,
            export,
            output,
        }) => {
            cmd_plan(
                &config,
                PlanArgs {
                    destination,
                    duration,
                    budget,
                    age_group,
                    interests,
                    vibe,
                    spots,
                    export,
                    output,
                },
            )
            .await
        }
        Some(Command::About) => {
            cmd_about();
            Ok(())
        }
        None => tui::run(&config).await,
    }
}

/// Batch-mode arguments, straight from the CLI
struct PlanArgs {
    destination: String,
    duration: String,
    budget: Budget,
    age_group: String,
    interests: Vec<String>,
    vibe: String,
    spots: SpotPreference,
    export: bool,
    output: Option<PathBuf>,
}

/// One generation, rendered to the terminal with every section expanded
async fn cmd_plan(config: &Config, args: PlanArgs) -> Result<()> {
    let status = config.credential_status();
    if !status.is_usable() {
        print_setup_guidance(config, status);
        return Ok(());
    }

    let client = create_client(&config.llm)?;
    let loader = PromptLoader::new(std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")));

    let mut preferences = Preferences::new();
    preferences.select_budget(args.budget);
    preferences.select_spot_preference(args.spots);
    for interest in &args.interests {
        if !preferences.has_interest(interest) {
            preferences.toggle_interest(interest);
        }
    }

    let request = TripRequest {
        destination: args.destination,
        duration_days: args.duration,
        age_group: args.age_group,
        trip_vibe: args.vibe,
        preferences,
    };

    println!("{}", "Crafting your personal journey...".dimmed());

    match run_generation(client, &loader, &request, config.llm.max_tokens).await {
        Ok(itinerary) => {
            let view = ItineraryView::from_itinerary(&itinerary);
            print_itinerary(&view);

            if args.export {
                let dir = args.output.unwrap_or_else(|| config.export.output_dir.clone());
                let path = export_document(&view, &dir, config.export.page_lines)?;
                println!("{} Exported to {}", "✓".green(), path.display().to_string().cyan());
            }
            Ok(())
        }
        Err(e) => {
            // Inline failure, same contract as the TUI result area
            eprintln!("{} {}", "✗".red(), e.user_message());
            Ok(())
        }
    }
}

/// Print the full itinerary, colored
fn print_itinerary(view: &ItineraryView) {
    println!();
    println!("{}", view.trip_title.cyan().bold());
    println!("{}", view.summary);
    println!();

    for section in &view.sections {
        println!("{}", section.header().cyan());

        println!("  {}", "Activities".bold());
        for activity in &section.activities {
            println!("    • {}", activity);
        }

        println!("  {}", "Dining".bold());
        for (label, meal) in MEAL_LABELS.iter().zip(section.meals.iter()) {
            println!("    {}: {}", label, meal);
        }

        println!("  {}", "Accommodation".bold());
        println!("    {}", section.accommodation);
        println!();
    }
}

/// The about view, reachable without a credential
fn cmd_about() {
    println!("{}", tui::content::ABOUT);
}

/// Where to get a key and how to configure it
fn print_setup_guidance(config: &Config, status: CredentialStatus) {
    let env_name = config.llm.resolve().api_key_env;
    match status {
        CredentialStatus::Placeholder => {
            eprintln!(
                "{} {} still holds a placeholder value.",
                "✗".red(),
                env_name.yellow()
            );
        }
        _ => {
            eprintln!("{} No API key found in {}.", "✗".red(), env_name.yellow());
        }
    }
    eprintln!();
    eprintln!("{}", tui::content::SETUP);
}
