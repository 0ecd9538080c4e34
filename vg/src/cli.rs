//! CLI command definitions and subcommands

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::domain::{Budget, SpotPreference};

/// Voyage - AI travel-itinerary planner
#[derive(Parser)]
#[command(
    name = "vg",
    about = "Plan AI-generated travel itineraries from the terminal",
    version,
)]
pub struct Cli {
    /// Path to config file
    #[arg(short, long, global = true, help = "Path to config file")]
    pub config: Option<PathBuf>,

    /// Log level (TRACE, DEBUG, INFO, WARN, ERROR)
    #[arg(
        short = 'l',
        long = "log-level",
        global = true,
        help = "Log level (TRACE, DEBUG, INFO, WARN, ERROR)"
    )]
    pub log_level: Option<String>,

    /// Subcommand to execute; none launches the interactive planner
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// CLI subcommands
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Generate one itinerary and print it (batch mode)
    Plan {
        /// Where to go
        #[arg(short, long)]
        destination: String,

        /// Trip length in days
        #[arg(short = 'n', long, default_value = "3")]
        duration: String,

        /// Budget tier (budget, mid-range, luxury)
        #[arg(short, long, default_value = "mid-range")]
        budget: Budget,

        /// Age group of the travellers
        #[arg(long, default_value = "26-40")]
        age_group: String,

        /// Interest to include (repeatable)
        #[arg(short, long = "interest")]
        interests: Vec<String>,

        /// Desired trip vibe, free text
        #[arg(short, long, default_value = "")]
        vibe: String,

        /// Location style (popular, lowkey)
        #[arg(short, long, default_value = "popular")]
        spots: SpotPreference,

        /// Also write the paginated document
        #[arg(short, long)]
        export: bool,

        /// Directory for the exported document (defaults to config)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Show what Voyage is and how it works
    About,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parse_no_command() {
        let cli = Cli::parse_from(["vg"]);
        assert!(cli.command.is_none());
    }

    #[test]
    fn test_cli_parse_about() {
        let cli = Cli::parse_from(["vg", "about"]);
        assert!(matches!(cli.command, Some(Command::About)));
    }

    #[test]
    fn test_cli_parse_plan() {
        let cli = Cli::parse_from([
            "vg", "plan", "-d", "Kyoto", "-n", "5", "-b", "luxury", "-i", "Food", "-i", "History", "-s", "lowkey",
        ]);

        if let Some(Command::Plan {
            destination,
            duration,
            budget,
            interests,
            spots,
            export,
            ..
        }) = cli.command
        {
            assert_eq!(destination, "Kyoto");
            assert_eq!(duration, "5");
            assert_eq!(budget, Budget::Luxury);
            assert_eq!(interests, vec!["Food", "History"]);
            assert_eq!(spots, SpotPreference::Lowkey);
            assert!(!export);
        } else {
            panic!("Expected Plan command");
        }
    }

    #[test]
    fn test_cli_plan_defaults() {
        let cli = Cli::parse_from(["vg", "plan", "--destination", "Oslo"]);

        if let Some(Command::Plan {
            duration,
            budget,
            age_group,
            interests,
            vibe,
            spots,
            ..
        }) = cli.command
        {
            assert_eq!(duration, "3");
            assert_eq!(budget, Budget::MidRange);
            assert_eq!(age_group, "26-40");
            assert!(interests.is_empty());
            assert_eq!(vibe, "");
            assert_eq!(spots, SpotPreference::Popular);
        } else {
            panic!("Expected Plan command");
        }
    }

    #[test]
    fn test_cli_with_config() {
        let cli = Cli::parse_from(["vg", "-c", "/path/to/voyage.yml", "about"]);
        assert_eq!(cli.config, Some(PathBuf::from("/path/to/voyage.yml")));
    }

    #[test]
    fn test_cli_rejects_unknown_budget() {
        let result = Cli::try_parse_from(["vg", "plan", "-d", "Oslo", "-b", "lavish"]);
        assert!(result.is_err());
    }
}
