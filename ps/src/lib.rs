//! PrefStore - persisted user preferences for Voyage
//!
//! A tiny JSON-backed store for the handful of settings that must survive a
//! restart (currently just the color theme). The application reads it once at
//! startup and writes it on every toggle.
//!
//! # Layout
//!
//! ```text
//! ~/.local/share/voyage/
//! └── prefs.json
//! ```
//!
//! # Example
//!
//! ```ignore
//! use prefstore::{PrefStore, Theme};
//!
//! let store = PrefStore::open(PrefStore::default_dir())?;
//! let prefs = store.load()?;
//! store.set_theme(prefs.theme.toggled())?;
//! ```

pub mod cli;
mod store;

pub use store::{PrefStore, Prefs, Theme};

/// File name of the persisted preferences document
pub const PREFS_FILE: &str = "prefs.json";
