//! Structural layout variants and navbar sub-variants.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::LayoutError;

/// Interchangeable page-shell skeleton.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Variant {
    /// Vertical navbar beside the content (`layout1`).
    #[default]
    #[serde(rename = "layout1")]
    Vertical,
    /// Horizontal menu bar above the content (`layout2`).
    #[serde(rename = "layout2")]
    Horizontal,
    /// Navbar stacked above a full-width toolbar (`layout3`).
    #[serde(rename = "layout3")]
    Stacked,
}

impl Variant {
    /// All variants.
    pub const ALL: [Self; 3] = [Self::Vertical, Self::Horizontal, Self::Stacked];

    /// Style id used in settings.
    pub fn id(self) -> &'static str {
        match self {
            Self::Vertical => "layout1",
            Self::Horizontal => "layout2",
            Self::Stacked => "layout3",
        }
    }

    /// Variant for a style id, or the default variant when unknown.
    pub fn from_style(style: &str) -> Self {
        style.parse().unwrap_or_default()
    }

    /// Whether navigation runs across the top of the page.
    pub fn is_horizontal(self) -> bool {
        self == Self::Horizontal
    }
}

impl FromStr for Variant {
    type Err = LayoutError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|v| v.id() == s)
            .ok_or_else(|| LayoutError::UnknownVariant { id: s.to_string() })
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// Navbar rendering sub-variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum NavbarVariant {
    /// Classic vertical menu (`style-1`).
    #[default]
    #[serde(rename = "style-1")]
    Style1,
    /// Compact menu with grouped headers (`style-2`).
    #[serde(rename = "style-2")]
    Style2,
    /// Icon-first menu (`style-3`).
    #[serde(rename = "style-3")]
    Style3,
    /// Top menu bar of the horizontal layout.
    #[serde(rename = "horizontal")]
    Horizontal,
}

impl NavbarVariant {
    /// Vertical navbar styles selectable through settings.
    pub const VERTICAL: [Self; 3] = [Self::Style1, Self::Style2, Self::Style3];

    /// Style id used in settings.
    pub fn id(self) -> &'static str {
        match self {
            Self::Style1 => "style-1",
            Self::Style2 => "style-2",
            Self::Style3 => "style-3",
            Self::Horizontal => "horizontal",
        }
    }

    /// Navbar sub-variant for a layout variant and a configured navbar style.
    ///
    /// Horizontal layouts always use the horizontal bar; unknown styles use
    /// [`NavbarVariant::Style1`].
    pub fn select(variant: Variant, style: &str) -> Self {
        if variant.is_horizontal() {
            return Self::Horizontal;
        }
        Self::parse_vertical(style).unwrap_or_default()
    }

    /// Parse a vertical navbar style id.
    pub fn parse_vertical(style: &str) -> Result<Self, LayoutError> {
        Self::VERTICAL
            .into_iter()
            .find(|v| v.id() == style)
            .ok_or_else(|| LayoutError::UnknownNavbarStyle {
                id: style.to_string(),
            })
    }
}

impl fmt::Display for NavbarVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}
