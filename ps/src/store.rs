//! Core PrefStore implementation

use eyre::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::{debug, warn};

/// Color theme, the one value persisted across sessions
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    /// The other theme
    pub fn toggled(self) -> Self {
        debug!(?self, "Theme::toggled: called");
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }

    /// True when the dark palette is active
    pub fn is_dark(self) -> bool {
        matches!(self, Self::Dark)
    }
}

impl std::fmt::Display for Theme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Light => write!(f, "light"),
            Self::Dark => write!(f, "dark"),
        }
    }
}

impl FromStr for Theme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        debug!(%s, "Theme::from_str: called");
        match s.to_lowercase().as_str() {
            "light" => Ok(Self::Light),
            "dark" => Ok(Self::Dark),
            _ => Err(format!("Unknown theme: {}. Use: light or dark", s)),
        }
    }
}

/// The persisted preferences document
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Prefs {
    /// Active color theme
    pub theme: Theme,
}

/// JSON-file-backed preference store
pub struct PrefStore {
    /// Path to the prefs document
    path: PathBuf,
}

impl PrefStore {
    /// Open or create a preference store in the given directory
    pub fn open(dir: impl AsRef<Path>) -> Result<Self> {
        let dir = dir.as_ref();
        fs::create_dir_all(dir).context("Failed to create preference directory")?;
        let path = dir.join(crate::PREFS_FILE);
        debug!(?path, "PrefStore::open: called");
        Ok(Self { path })
    }

    /// Default store directory under the platform data dir
    pub fn default_dir() -> PathBuf {
        dirs::data_local_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("voyage")
    }

    /// Path of the backing file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the persisted preferences
    ///
    /// A missing file yields the defaults. An unreadable document also falls
    /// back to the defaults: preferences are cosmetic and must never block
    /// startup.
    pub fn load(&self) -> Result<Prefs> {
        debug!(path = %self.path.display(), "PrefStore::load: called");
        if !self.path.exists() {
            debug!("PrefStore::load: no file, returning defaults");
            return Ok(Prefs::default());
        }

        let content = fs::read_to_string(&self.path).context("Failed to read preferences")?;
        match serde_json::from_str(&content) {
            Ok(prefs) => Ok(prefs),
            Err(e) => {
                warn!(error = %e, "PrefStore::load: unreadable document, using defaults");
                Ok(Prefs::default())
            }
        }
    }

    /// Persist the full preferences document
    pub fn save(&self, prefs: &Prefs) -> Result<()> {
        debug!(?prefs, "PrefStore::save: called");
        let content = serde_json::to_string_pretty(prefs).context("Failed to serialize preferences")?;
        fs::write(&self.path, content).context("Failed to write preferences")?;
        Ok(())
    }

    /// Record a theme change, keeping the rest of the document intact
    pub fn set_theme(&self, theme: Theme) -> Result<()> {
        debug!(%theme, "PrefStore::set_theme: called");
        let mut prefs = self.load()?;
        prefs.theme = theme;
        self.save(&prefs)
    }

    /// Delete the persisted document, reverting to defaults on next load
    pub fn reset(&self) -> Result<()> {
        debug!(path = %self.path.display(), "PrefStore::reset: called");
        if self.path.exists() {
            fs::remove_file(&self.path).context("Failed to remove preferences")?;
        }
        Ok(())
    }
}
