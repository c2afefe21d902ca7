use serde::{Deserialize, Serialize};

use super::{
    Bar, BarStyle, ContainerMode, Direction, Layout, LayoutConfig, Navbar, NavbarPosition,
    ScrollMode, Settings, SidePanel, ThemeChoice,
};

// ===== MERGE HELPERS =====

/// Field-level merge of two optional nested partials: both present merge
/// recursively, otherwise whichever is set wins.
fn merge_nested<T: Clone>(lower: Option<T>, higher: &Option<T>, merge: fn(T, &T) -> T) -> Option<T> {
    match (lower, higher) {
        (Some(l), Some(h)) => Some(merge(l, h)),
        (l, None) => l,
        (None, Some(h)) => Some(h.clone()),
    }
}

/// Overlay macro: the higher layer's value when set, else the lower one.
macro_rules! over {
    ($lower:expr, $higher:expr, $field:ident) => {
        $higher.$field.as_ref().cloned().or($lower.$field)
    };
}

/// Apply macro: the partial's value when set, else the concrete base value.
macro_rules! or_field {
    ($self_:expr, $base:expr, $field:ident) => {
        match &$self_.$field {
            Some(v) => v.to_owned(),
            None => $base.$field.to_owned(),
        }
    };
}

// ===== RAW SETTINGS =====

/// A partial settings layer. Every field is optional; an unset field never
/// erases a value supplied by a lower layer, while an explicit value
/// (including `false`) always replaces it.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct RawSettings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub layout: Option<RawLayout>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_scrollbars: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub direction: Option<Direction>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub theme: Option<RawThemeChoice>,
}

impl RawSettings {
    /// True when no field is set.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Merge `higher` over `self`, field by field.
    #[must_use]
    pub fn merge(self, higher: &Self) -> Self {
        Self {
            layout: merge_nested(self.layout, &higher.layout, RawLayout::merge),
            custom_scrollbars: over!(self, higher, custom_scrollbars),
            direction: over!(self, higher, direction),
            theme: merge_nested(self.theme, &higher.theme, RawThemeChoice::merge),
        }
    }

    /// Apply this partial over a concrete base.
    pub fn apply_over(&self, base: &Settings) -> Settings {
        Settings {
            layout: self
                .layout
                .as_ref()
                .map(|l| l.apply_over(&base.layout))
                .unwrap_or_else(|| base.layout.clone()),
            custom_scrollbars: or_field!(self, base, custom_scrollbars),
            direction: or_field!(self, base, direction),
            theme: self
                .theme
                .as_ref()
                .map(|t| t.apply_over(&base.theme))
                .unwrap_or_else(|| base.theme.clone()),
        }
    }

    /// Convert to final Settings with built-in defaults applied.
    pub fn into_settings(self) -> Settings {
        self.apply_over(&Settings::default())
    }

    // Builders used by code that assembles layers programmatically.

    /// Mutable access to the layout config partial, creating it if needed.
    pub fn layout_config_mut(&mut self) -> &mut RawLayoutConfig {
        self.layout
            .get_or_insert_with(RawLayout::default)
            .config
            .get_or_insert_with(RawLayoutConfig::default)
    }

    /// Mutable access to the theme partial, creating it if needed.
    pub fn theme_mut(&mut self) -> &mut RawThemeChoice {
        self.theme.get_or_insert_with(RawThemeChoice::default)
    }

    /// Set the layout style id.
    #[must_use]
    pub fn with_layout_style(mut self, style: &str) -> Self {
        self.layout.get_or_insert_with(RawLayout::default).style = Some(style.to_string());
        self
    }
}

// ===== RAW LAYOUT =====

#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct RawLayout {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub config: Option<RawLayoutConfig>,
}

impl RawLayout {
    /// Merge `higher` over `self`.
    fn merge(self, higher: &Self) -> Self {
        Self {
            style: over!(self, higher, style),
            config: merge_nested(self.config, &higher.config, RawLayoutConfig::merge),
        }
    }

    /// Apply over a concrete base.
    fn apply_over(&self, base: &Layout) -> Layout {
        Layout {
            style: or_field!(self, base, style),
            config: self
                .config
                .as_ref()
                .map(|c| c.apply_over(&base.config))
                .unwrap_or_else(|| base.config.clone()),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct RawLayoutConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mode: Option<ContainerMode>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub container_width: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scroll: Option<ScrollMode>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub navbar: Option<RawNavbar>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub toolbar: Option<RawBar>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub footer: Option<RawBar>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub left_side_panel: Option<RawSidePanel>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub right_side_panel: Option<RawSidePanel>,
}

impl RawLayoutConfig {
    /// Merge `higher` over `self`.
    fn merge(self, higher: &Self) -> Self {
        Self {
            mode: over!(self, higher, mode),
            container_width: over!(self, higher, container_width),
            scroll: over!(self, higher, scroll),
            navbar: merge_nested(self.navbar, &higher.navbar, RawNavbar::merge),
            toolbar: merge_nested(self.toolbar, &higher.toolbar, RawBar::merge),
            footer: merge_nested(self.footer, &higher.footer, RawBar::merge),
            left_side_panel: merge_nested(
                self.left_side_panel,
                &higher.left_side_panel,
                RawSidePanel::merge,
            ),
            right_side_panel: merge_nested(
                self.right_side_panel,
                &higher.right_side_panel,
                RawSidePanel::merge,
            ),
        }
    }

    /// Apply over a concrete base.
    fn apply_over(&self, base: &LayoutConfig) -> LayoutConfig {
        LayoutConfig {
            mode: or_field!(self, base, mode),
            container_width: or_field!(self, base, container_width),
            scroll: or_field!(self, base, scroll),
            navbar: self
                .navbar
                .as_ref()
                .map(|n| n.apply_over(&base.navbar))
                .unwrap_or_else(|| base.navbar.clone()),
            toolbar: self
                .toolbar
                .as_ref()
                .map_or(base.toolbar, |b| b.apply_over(base.toolbar)),
            footer: self
                .footer
                .as_ref()
                .map_or(base.footer, |b| b.apply_over(base.footer)),
            left_side_panel: self
                .left_side_panel
                .as_ref()
                .map_or(base.left_side_panel, |p| p.apply_over(base.left_side_panel)),
            right_side_panel: self
                .right_side_panel
                .as_ref()
                .map_or(base.right_side_panel, |p| p.apply_over(base.right_side_panel)),
        }
    }
}

// ===== RAW REGIONS =====

#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct RawNavbar {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub folded: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<NavbarPosition>,
}

impl RawNavbar {
    /// Merge `higher` over `self`.
    fn merge(self, higher: &Self) -> Self {
        Self {
            display: over!(self, higher, display),
            style: over!(self, higher, style),
            folded: over!(self, higher, folded),
            position: over!(self, higher, position),
        }
    }

    /// Apply over a concrete base.
    fn apply_over(&self, base: &Navbar) -> Navbar {
        Navbar {
            display: or_field!(self, base, display),
            style: or_field!(self, base, style),
            folded: or_field!(self, base, folded),
            position: or_field!(self, base, position),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct RawBar {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<BarStyle>,
}

impl RawBar {
    /// Merge `higher` over `self`.
    fn merge(self, higher: &Self) -> Self {
        Self {
            display: over!(self, higher, display),
            style: over!(self, higher, style),
        }
    }

    /// Apply over a concrete base.
    fn apply_over(&self, base: Bar) -> Bar {
        Bar {
            display: self.display.unwrap_or(base.display),
            style: self.style.unwrap_or(base.style),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct RawSidePanel {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display: Option<bool>,
}

impl RawSidePanel {
    /// Merge `higher` over `self`.
    fn merge(self, higher: &Self) -> Self {
        Self {
            display: over!(self, higher, display),
        }
    }

    /// Apply over a concrete base.
    fn apply_over(&self, base: SidePanel) -> SidePanel {
        SidePanel {
            display: self.display.unwrap_or(base.display),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct RawThemeChoice {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub main: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub navbar: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub toolbar: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub footer: Option<String>,
}

impl RawThemeChoice {
    /// Merge `higher` over `self`.
    fn merge(self, higher: &Self) -> Self {
        Self {
            main: over!(self, higher, main),
            navbar: over!(self, higher, navbar),
            toolbar: over!(self, higher, toolbar),
            footer: over!(self, higher, footer),
        }
    }

    /// Apply over a concrete base.
    fn apply_over(&self, base: &ThemeChoice) -> ThemeChoice {
        ThemeChoice {
            main: or_field!(self, base, main),
            navbar: or_field!(self, base, navbar),
            toolbar: or_field!(self, base, toolbar),
            footer: or_field!(self, base, footer),
        }
    }
}
