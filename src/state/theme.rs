#[cfg(test)]
#[path = "theme_test.rs"]
mod theme_test;

use std::fmt;
use std::str::FromStr;

use crate::error::UnknownTheme;

/// The two color themes a page can be in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    /// Map the system "prefers dark" signal onto a theme.
    #[must_use]
    pub fn from_prefers_dark(prefers_dark: bool) -> Self {
        if prefers_dark { Self::Dark } else { Self::Light }
    }

    /// The theme a toggle click switches to.
    #[must_use]
    pub fn opposite(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }

    /// Value written to the root's theme attribute and to storage.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    /// Toggle text: the glyph of the theme a click would switch to.
    #[must_use]
    pub fn glyph(self) -> &'static str {
        match self {
            Self::Light => "\u{263E}",
            Self::Dark => "\u{2600}",
        }
    }

    /// Accessible name describing what the toggle does next.
    #[must_use]
    pub fn toggle_label(self) -> &'static str {
        match self {
            Self::Light => "Switch to dark mode",
            Self::Dark => "Switch to light mode",
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Theme {
    type Err = UnknownTheme;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "light" => Ok(Self::Light),
            "dark" => Ok(Self::Dark),
            other => Err(UnknownTheme(other.to_owned())),
        }
    }
}

/// Pick the theme to show on load.
///
/// A stored preference wins; otherwise the system signal decides; with
/// neither, the page is light.
#[must_use]
pub fn resolve(stored: Option<Theme>, system_prefers_dark: Option<bool>) -> Theme {
    stored.unwrap_or_else(|| system_prefers_dark.map_or(Theme::Light, Theme::from_prefers_dark))
}
