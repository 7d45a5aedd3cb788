//! Light/dark theme preference.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use storefront_cache::Cache;

use crate::error::CommerceError;

/// Storage key holding `"dark"` or `"light"`.
pub const THEME_STORAGE_KEY: &str = "theme";

/// Colour scheme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

impl Theme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Dark => "dark",
            Theme::Light => "light",
        }
    }

    /// The other theme.
    pub fn toggled(self) -> Self {
        match self {
            Theme::Dark => Theme::Light,
            Theme::Light => Theme::Dark,
        }
    }

    pub fn is_dark(&self) -> bool {
        *self == Theme::Dark
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Theme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "dark" => Ok(Theme::Dark),
            "light" => Ok(Theme::Light),
            other => Err(format!("unknown theme '{other}', expected dark or light")),
        }
    }
}

/// Persisted theme preference.
///
/// Starts dark when nothing is stored. Any stored value other than `dark`,
/// quoted or bare, reads as light.
#[derive(Debug, Clone)]
pub struct ThemeStore {
    cache: Cache,
    theme: Theme,
}

impl ThemeStore {
    /// Load the stored preference.
    pub fn open(cache: Cache) -> Self {
        let theme = match cache.get_raw(THEME_STORAGE_KEY) {
            Ok(Some(bytes)) => stored_theme(&bytes),
            Ok(None) => Theme::default(),
            Err(e) => {
                tracing::warn!(error = %e, "ignoring unreadable stored theme");
                Theme::default()
            }
        };
        Self { cache, theme }
    }

    /// Current theme.
    pub fn theme(&self) -> Theme {
        self.theme
    }

    /// Flip between dark and light and persist the result.
    pub fn toggle(&mut self) -> Result<Theme, CommerceError> {
        self.set(self.theme.toggled())
    }

    /// Select a theme and persist it.
    pub fn set(&mut self, theme: Theme) -> Result<Theme, CommerceError> {
        self.theme = theme;
        self.cache.set(THEME_STORAGE_KEY, theme.as_str())?;
        tracing::debug!(%theme, "theme saved");
        Ok(theme)
    }
}

fn stored_theme(bytes: &[u8]) -> Theme {
    let value = serde_json::from_slice::<String>(bytes)
        .unwrap_or_else(|_| String::from_utf8_lossy(bytes).trim().to_string());
    if value == Theme::Dark.as_str() {
        Theme::Dark
    } else {
        if value != Theme::Light.as_str() {
            tracing::debug!(%value, "unrecognised stored theme, using light");
        }
        Theme::Light
    }
}
