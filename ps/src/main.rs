use clap::Parser;
use colored::*;
use eyre::{Context, Result};
use log::info;

use prefstore::cli::{Cli, Command};
use prefstore::{PrefStore, Theme};

fn setup_logging() -> Result<()> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();
    Ok(())
}

fn main() -> Result<()> {
    setup_logging().context("Failed to setup logging")?;

    let cli = Cli::parse();
    let dir = cli.dir.unwrap_or_else(PrefStore::default_dir);
    let store = PrefStore::open(&dir)?;

    info!("prefstore starting");

    match cli.command {
        Command::Show => {
            let prefs = store.load()?;
            println!("theme: {}", prefs.theme.to_string().cyan());
        }
        Command::Theme { theme } => {
            let theme: Theme = theme.parse().map_err(|e: String| eyre::eyre!(e))?;
            store.set_theme(theme)?;
            println!("{} Theme set to {}", "✓".green(), theme.to_string().cyan());
        }
        Command::Reset => {
            store.reset()?;
            println!("{} Preferences reset", "✓".green());
        }
        Command::Path => {
            println!("{}", store.path().display());
        }
    }

    Ok(())
}
