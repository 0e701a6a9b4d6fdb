//! Appearance settings model.

use serde::{Deserialize, Serialize};

/// Color scheme derived from the persisted dark-mode flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Appearance {
    #[default]
    Light,
    Dark,
}

impl Appearance {
    /// Maps the `isDarkMode` flag to an appearance.
    pub fn from_dark_mode(is_dark_mode: bool) -> Self {
        if is_dark_mode {
            Self::Dark
        } else {
            Self::Light
        }
    }

    pub fn is_dark(self) -> bool {
        matches!(self, Self::Dark)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }
}
