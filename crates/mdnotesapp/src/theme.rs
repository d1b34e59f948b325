//! Static light/dark palettes and the theme name type.

use crate::error::NotesError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeName {
    #[default]
    Light,
    Dark,
}

impl ThemeName {
    pub fn toggle(self) -> Self {
        match self {
            ThemeName::Light => ThemeName::Dark,
            ThemeName::Dark => ThemeName::Light,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ThemeName::Light => "light",
            ThemeName::Dark => "dark",
        }
    }

    pub fn is_dark(self) -> bool {
        self == ThemeName::Dark
    }
}

impl fmt::Display for ThemeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ThemeName {
    type Err = NotesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "light" => Ok(ThemeName::Light),
            "dark" => Ok(ThemeName::Dark),
            other => Err(NotesError::InvalidTheme(other.to_string())),
        }
    }
}

/// Named colors used by the preview renderer and any view that styles itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Palette {
    pub background: &'static str,
    pub surface: &'static str,
    pub text: &'static str,
    pub text_secondary: &'static str,
    pub text_tertiary: &'static str,
    pub border: &'static str,
    pub primary: &'static str,
    pub success: &'static str,
    pub warning: &'static str,
    pub danger: &'static str,
    pub hover: &'static str,
    pub code: &'static str,
    pub code_bg: &'static str,
    pub shadow: &'static str,
}

pub const LIGHT: Palette = Palette {
    background: "#fafafa",
    surface: "#ffffff",
    text: "#333333",
    text_secondary: "#666666",
    text_tertiary: "#999999",
    border: "#e0e0e0",
    primary: "#2196F3",
    success: "#4CAF50",
    warning: "#FF9800",
    danger: "#ff6b6b",
    hover: "#f5f5f5",
    code: "#f0f0f0",
    code_bg: "#f0f0f0",
    shadow: "rgba(0, 0, 0, 0.1)",
};

pub const DARK: Palette = Palette {
    background: "#0f0f0f",
    surface: "#1a1a1a",
    text: "#ffffff",
    text_secondary: "#e0e0e0",
    text_tertiary: "#cccccc",
    border: "#404040",
    primary: "#64B5F6",
    success: "#66BB6A",
    warning: "#FFA726",
    danger: "#EF5350",
    hover: "#2a2a2a",
    code: "#0d0d0d",
    code_bg: "#0d0d0d",
    shadow: "rgba(0, 0, 0, 0.6)",
};

pub fn palette(theme: ThemeName) -> &'static Palette {
    match theme {
        ThemeName::Light => &LIGHT,
        ThemeName::Dark => &DARK,
    }
}
