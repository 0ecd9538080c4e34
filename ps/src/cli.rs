//! CLI argument parsing for prefstore

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "ps")]
#[command(author, version, about = "Persisted user preferences for Voyage", long_about = None)]
pub struct Cli {
    /// Store directory (defaults to the platform data dir)
    #[arg(short, long)]
    pub dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print the current preferences
    Show,

    /// Set the color theme
    Theme {
        /// Theme to activate (light, dark)
        #[arg(required = true)]
        theme: String,
    },

    /// Delete the persisted document, reverting to defaults
    Reset,

    /// Print the path of the backing file
    Path,
}
