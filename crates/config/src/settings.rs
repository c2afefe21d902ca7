//! Fully resolved shell settings.

use serde::{Deserialize, Serialize};

use crate::{
    BarStyle, ContainerMode, Direction, NavbarPosition, Region, ScrollMode, defaults,
    raw::{self, RawSettings},
};

/// The merged configuration consumed by the layout shell for one render cycle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    /// Structural layout selection and its configuration.
    pub layout: Layout,
    /// Use styled scrollbars instead of native ones.
    pub custom_scrollbars: bool,
    /// Text direction.
    pub direction: Direction,
    /// Theme id per region.
    pub theme: ThemeChoice,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            layout: Layout::default(),
            custom_scrollbars: defaults::CUSTOM_SCROLLBARS,
            direction: defaults::DIRECTION,
            theme: ThemeChoice::default(),
        }
    }
}

impl Settings {
    /// Overlay a partial layer onto this base using current values as defaults.
    #[must_use]
    pub fn overlay_raw(self, overrides: &RawSettings) -> Self {
        overrides.apply_over(&self)
    }

    /// Apply multiple partial layers left-to-right.
    #[must_use]
    pub fn overlay_all_raw(mut self, overlays: &[RawSettings]) -> Self {
        for ov in overlays {
            self = self.overlay_raw(ov);
        }
        self
    }

    /// Convert into a partial layer with every field populated.
    pub fn to_raw(&self) -> RawSettings {
        RawSettings {
            layout: Some(raw::RawLayout {
                style: Some(self.layout.style.clone()),
                config: Some(self.layout.config.to_raw()),
            }),
            custom_scrollbars: Some(self.custom_scrollbars),
            direction: Some(self.direction),
            theme: Some(self.theme.to_raw()),
        }
    }

    /// Whether `region` is configured to render.
    pub fn displays(&self, region: Region) -> bool {
        let c = &self.layout.config;
        match region {
            Region::Navbar => c.navbar.display,
            Region::Toolbar => c.toolbar.display,
            Region::Footer => c.footer.display,
            Region::LeftSidePanel => c.left_side_panel.display,
            Region::RightSidePanel => c.right_side_panel.display,
        }
    }
}

/// Layout selection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Layout {
    /// Structural variant identifier (e.g. `layout1`). Unknown ids fall back
    /// to the default variant in the shell.
    pub style: String,
    /// Variant-independent layout configuration.
    pub config: LayoutConfig,
}

impl Default for Layout {
    fn default() -> Self {
        Self {
            style: defaults::LAYOUT_STYLE.to_string(),
            config: LayoutConfig::default(),
        }
    }
}

/// Region configuration shared by all layout variants.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LayoutConfig {
    /// Horizontal containment.
    pub mode: ContainerMode,
    /// Maximum content width in `container` mode, in pixels.
    pub container_width: u32,
    /// Scrolling element.
    pub scroll: ScrollMode,
    /// Navigation bar.
    pub navbar: Navbar,
    /// Top toolbar.
    pub toolbar: Bar,
    /// Footer.
    pub footer: Bar,
    /// Left side panel.
    pub left_side_panel: SidePanel,
    /// Right side panel.
    pub right_side_panel: SidePanel,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            mode: defaults::CONTAINER_MODE,
            container_width: defaults::CONTAINER_WIDTH,
            scroll: defaults::SCROLL,
            navbar: Navbar::default(),
            toolbar: Bar {
                display: true,
                style: defaults::TOOLBAR_STYLE,
            },
            footer: Bar {
                display: true,
                style: defaults::FOOTER_STYLE,
            },
            left_side_panel: SidePanel { display: true },
            right_side_panel: SidePanel { display: true },
        }
    }
}

impl LayoutConfig {
    /// Convert into a fully populated partial.
    fn to_raw(&self) -> raw::RawLayoutConfig {
        raw::RawLayoutConfig {
            mode: Some(self.mode),
            container_width: Some(self.container_width),
            scroll: Some(self.scroll),
            navbar: Some(raw::RawNavbar {
                display: Some(self.navbar.display),
                style: Some(self.navbar.style.clone()),
                folded: Some(self.navbar.folded),
                position: Some(self.navbar.position),
            }),
            toolbar: Some(self.toolbar.to_raw()),
            footer: Some(self.footer.to_raw()),
            left_side_panel: Some(raw::RawSidePanel {
                display: Some(self.left_side_panel.display),
            }),
            right_side_panel: Some(raw::RawSidePanel {
                display: Some(self.right_side_panel.display),
            }),
        }
    }
}

/// Navigation bar configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Navbar {
    /// Render the navbar at all.
    pub display: bool,
    /// Navbar sub-variant id (e.g. `style-1`).
    pub style: String,
    /// Start folded (icon rail) on desktop.
    pub folded: bool,
    /// Anchoring side.
    pub position: NavbarPosition,
}

impl Default for Navbar {
    fn default() -> Self {
        Self {
            display: true,
            style: defaults::NAVBAR_STYLE.to_string(),
            folded: false,
            position: defaults::NAVBAR_POSITION,
        }
    }
}

/// Toolbar or footer configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default, deny_unknown_fields)]
pub struct Bar {
    /// Render the bar.
    pub display: bool,
    /// Positioning.
    pub style: BarStyle,
}

impl Bar {
    /// Convert into a fully populated partial.
    fn to_raw(self) -> raw::RawBar {
        raw::RawBar {
            display: Some(self.display),
            style: Some(self.style),
        }
    }
}

/// Side panel configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default, deny_unknown_fields)]
pub struct SidePanel {
    /// Render the panel.
    pub display: bool,
}

/// Theme id assigned to each region.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ThemeChoice {
    /// Main content theme.
    pub main: String,
    /// Navbar theme.
    pub navbar: String,
    /// Toolbar theme.
    pub toolbar: String,
    /// Footer theme.
    pub footer: String,
}

impl Default for ThemeChoice {
    fn default() -> Self {
        Self::uniform(defaults::THEME)
    }
}

impl ThemeChoice {
    /// The same theme for every region.
    pub fn uniform(id: &str) -> Self {
        Self {
            main: id.to_string(),
            navbar: id.to_string(),
            toolbar: id.to_string(),
            footer: id.to_string(),
        }
    }

    /// Convert into a fully populated partial.
    fn to_raw(&self) -> raw::RawThemeChoice {
        raw::RawThemeChoice {
            main: Some(self.main.clone()),
            navbar: Some(self.navbar.clone()),
            toolbar: Some(self.toolbar.clone()),
            footer: Some(self.footer.clone()),
        }
    }
}
