//! Light/dark theme state with pluggable persistence.
//!
//! The dashboard keeps its theme in an explicit [`ThemeState`] owned by the
//! caller; reads and writes go through the [`ThemeStore`] it was resolved
//! from. When nothing has been stored yet the system preference applies.

use crate::error::{CampaignError, CampaignResult};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::{debug, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn toggle(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Theme {
    type Err = CampaignError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "light" => Ok(Self::Light),
            "dark" => Ok(Self::Dark),
            other => Err(CampaignError::Theme(format!("unknown theme '{other}'"))),
        }
    }
}

/// Persistent key/value slot holding the `theme` preference.
pub trait ThemeStore: Send + Sync {
    fn load(&self) -> CampaignResult<Option<Theme>>;
    fn save(&self, theme: Theme) -> CampaignResult<()>;
}

#[derive(Debug, Serialize, Deserialize)]
struct StoredTheme {
    theme: Theme,
}

impl<T: ThemeStore + ?Sized> ThemeStore for Box<T> {
    fn load(&self) -> CampaignResult<Option<Theme>> {
        (**self).load()
    }

    fn save(&self, theme: Theme) -> CampaignResult<()> {
        (**self).save(theme)
    }
}

/// JSON file store: `{"theme": "dark"}`.
#[derive(Debug, Clone)]
pub struct FileThemeStore {
    path: PathBuf,
}

impl FileThemeStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ThemeStore for FileThemeStore {
    fn load(&self) -> CampaignResult<Option<Theme>> {
        if !self.path.exists() {
            return Ok(None);
        }
        let raw = std::fs::read_to_string(&self.path)?;
        let stored: StoredTheme = serde_json::from_str(&raw)?;
        Ok(Some(stored.theme))
    }

    fn save(&self, theme: Theme) -> CampaignResult<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let body = serde_json::to_string(&StoredTheme { theme })?;
        std::fs::write(&self.path, body)?;
        debug!(path = %self.path.display(), theme = %theme, "Theme persisted");
        Ok(())
    }
}

/// In-memory store, used by tests and when persistence is unavailable.
#[derive(Debug, Default)]
pub struct MemoryThemeStore {
    slot: Mutex<Option<Theme>>,
}

impl MemoryThemeStore {
    pub fn with_theme(theme: Theme) -> Self {
        Self {
            slot: Mutex::new(Some(theme)),
        }
    }
}

impl ThemeStore for MemoryThemeStore {
    fn load(&self) -> CampaignResult<Option<Theme>> {
        Ok(*self.slot.lock())
    }

    fn save(&self, theme: Theme) -> CampaignResult<()> {
        *self.slot.lock() = Some(theme);
        Ok(())
    }
}

/// Current theme plus the store it is persisted to.
#[derive(Debug)]
pub struct ThemeState<S: ThemeStore> {
    store: S,
    current: Theme,
}

impl<S: ThemeStore> ThemeState<S> {
    /// Stored value if present and readable, otherwise the system preference.
    pub fn resolve(store: S, system_preference: Theme) -> Self {
        let current = match store.load() {
            Ok(stored) => stored.unwrap_or(system_preference),
            Err(e) => {
                warn!(error = %e, fallback = %system_preference, "Ignoring unreadable stored theme");
                system_preference
            }
        };
        Self { store, current }
    }

    pub fn current(&self) -> Theme {
        self.current
    }

    pub fn set(&mut self, theme: Theme) -> CampaignResult<Theme> {
        self.store.save(theme)?;
        self.current = theme;
        Ok(theme)
    }

    pub fn toggle(&mut self) -> CampaignResult<Theme> {
        self.set(self.current.toggle())
    }
}
