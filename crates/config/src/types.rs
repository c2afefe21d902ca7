//! Core configuration data types used in the config crate.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Text direction of the shell.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Left to right.
    #[default]
    Ltr,
    /// Right to left.
    Rtl,
}

/// How page content is contained horizontally.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum ContainerMode {
    /// Centered box with a visible frame.
    Boxed,
    /// Content spans the viewport.
    #[default]
    Fullwidth,
    /// Centered content limited to `container_width`.
    Container,
}

/// Which element scrolls.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum ScrollMode {
    /// Only the content region scrolls.
    #[default]
    Content,
    /// The whole page scrolls.
    Page,
}

/// Side on which the vertical navbar is anchored.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum NavbarPosition {
    /// Left edge (mirrored under RTL).
    #[default]
    Left,
    /// Right edge.
    Right,
}

/// Positioning of the toolbar and footer.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum BarStyle {
    /// Pinned to the viewport edge.
    #[default]
    Fixed,
    /// Scrolls with the content.
    Static,
}

/// Viewport class reported by the viewport observer.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum DeviceClass {
    /// Wide viewport.
    #[default]
    Desktop,
    /// Narrow viewport below the mobile breakpoint.
    Mobile,
}

impl fmt::Display for DeviceClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Desktop => "desktop",
            Self::Mobile => "mobile",
        })
    }
}

/// Structural regions of the shell that carry a display flag.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum Region {
    /// Primary navigation.
    Navbar,
    /// Top toolbar.
    Toolbar,
    /// Page footer.
    Footer,
    /// Left side panel.
    LeftSidePanel,
    /// Right side panel.
    RightSidePanel,
}

impl Region {
    /// Every region, in render order.
    pub const ALL: [Self; 5] = [
        Self::Navbar,
        Self::Toolbar,
        Self::Footer,
        Self::LeftSidePanel,
        Self::RightSidePanel,
    ];
}
