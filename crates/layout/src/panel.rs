//! Collapsible side regions and their transient modes.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A collapsible or pinnable region of the shell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PanelId {
    /// Primary navigation.
    Navbar,
    /// Left side panel.
    LeftSide,
    /// Right side panel.
    RightSide,
    /// Quick-actions drawer.
    Quick,
}

impl PanelId {
    /// Every panel.
    pub const ALL: [Self; 4] = [Self::Navbar, Self::LeftSide, Self::RightSide, Self::Quick];

    /// Whether the panel supports pinning.
    pub fn pinnable(self) -> bool {
        matches!(self, Self::Navbar | Self::LeftSide)
    }
}

impl fmt::Display for PanelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Navbar => "navbar",
            Self::LeftSide => "left_side",
            Self::RightSide => "right_side",
            Self::Quick => "quick",
        })
    }
}

/// Transient mode of one panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PanelMode {
    /// Closed (for the navbar: folded to an icon rail).
    #[default]
    Collapsed,
    /// Open until the route changes or the user closes it.
    Expanded,
    /// Open and kept open across route changes.
    Pinned,
    /// Forced closed by a mobile viewport.
    MobileHidden,
}

impl PanelMode {
    /// Whether the panel content is shown.
    pub fn is_open(self) -> bool {
        matches!(self, Self::Expanded | Self::Pinned)
    }
}
