//! Theme catalogue and per-region theme selection.
//!
//! The built-in catalogue lives in a `OnceLock`. Its initializer builds every
//! theme as a plain Rust value and must never call [`ThemeCatalogue::builtin`]
//! itself, or initialization would re-enter the lock.
use std::{collections::BTreeMap, sync::OnceLock};

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::{ContainerMode, RawSettings, RawThemeChoice, Region, ThemeChoice, defaults, parse_rgb};

/// Light/dark family of a theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ThemeMode {
    /// Light surfaces, dark text.
    Light,
    /// Dark surfaces, light text.
    Dark,
    /// Light content with framed cards and no shadows.
    Bordered,
}

/// Core colors of a theme as rgb tuples.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Palette {
    /// Accent color.
    pub primary: (u8, u8, u8),
    /// Page background.
    pub background: (u8, u8, u8),
    /// Card and bar surfaces.
    pub surface: (u8, u8, u8),
    /// Body text.
    pub text: (u8, u8, u8),
}

impl Palette {
    /// Build a palette from color strings (`#rrggbb` or a named color).
    ///
    /// Unparseable colors are logged and replaced with black.
    pub fn parse(primary: &str, background: &str, surface: &str, text: &str) -> Self {
        Self {
            primary: color(primary),
            background: color(background),
            surface: color(surface),
            text: color(text),
        }
    }
}

fn color(s: &str) -> (u8, u8, u8) {
    parse_rgb(s).unwrap_or_else(|| {
        warn!(color = s, "invalid theme color, using black");
        (0, 0, 0)
    })
}

/// One visual theme.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Theme {
    /// Catalogue identifier.
    pub id: String,
    /// Light/dark family.
    pub mode: ThemeMode,
    /// Core colors.
    pub palette: Palette,
    /// Regions that use another catalogue theme instead of this one.
    #[serde(default)]
    pub regions: RawThemeChoice,
    /// Layout hints contributed as the theme layer when this theme is active.
    #[serde(default)]
    pub hints: RawSettings,
}

impl Theme {
    /// A theme with no region delegation and no layout hints.
    pub fn new(id: &str, mode: ThemeMode, palette: Palette) -> Self {
        Self {
            id: id.to_string(),
            mode,
            palette,
            regions: RawThemeChoice::default(),
            hints: RawSettings::default(),
        }
    }

    /// The theme id this theme delegates `region` to, if any.
    fn delegate(&self, region: Region) -> Option<&str> {
        match region {
            Region::Navbar => self.regions.navbar.as_deref(),
            Region::Toolbar => self.regions.toolbar.as_deref(),
            Region::Footer => self.regions.footer.as_deref(),
            Region::LeftSidePanel | Region::RightSidePanel => self.regions.main.as_deref(),
        }
    }
}

/// A complete theme assignment: one theme per structural region.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThemeSet {
    /// Content area and side panels.
    pub main: Theme,
    /// Navigation bar.
    pub navbar: Theme,
    /// Top toolbar.
    pub toolbar: Theme,
    /// Footer.
    pub footer: Theme,
}

impl ThemeSet {
    /// Theme ids per region.
    pub fn ids(&self) -> ThemeChoice {
        ThemeChoice {
            main: self.main.id.clone(),
            navbar: self.navbar.id.clone(),
            toolbar: self.toolbar.id.clone(),
            footer: self.footer.id.clone(),
        }
    }
}

/// A catalogue of themes with a guaranteed fallback.
#[derive(Debug, Clone)]
pub struct ThemeCatalogue {
    /// Themes by id, including the fallback.
    themes: BTreeMap<String, Theme>,
    /// Theme used for unknown ids.
    fallback: Theme,
}

impl ThemeCatalogue {
    /// Build a catalogue. The fallback is always part of the catalogue.
    pub fn new(themes: impl IntoIterator<Item = Theme>, fallback: Theme) -> Self {
        let mut map: BTreeMap<String, Theme> =
            themes.into_iter().map(|t| (t.id.clone(), t)).collect();
        map.insert(fallback.id.clone(), fallback.clone());
        Self {
            themes: map,
            fallback,
        }
    }

    /// The static built-in catalogue.
    pub fn builtin() -> &'static Self {
        static CATALOGUE: OnceLock<ThemeCatalogue> = OnceLock::new();
        CATALOGUE.get_or_init(builtin_catalogue)
    }

    /// Id of the fallback theme.
    pub fn default_id(&self) -> &str {
        &self.fallback.id
    }

    /// Look up a theme by id.
    pub fn get(&self, id: &str) -> Option<&Theme> {
        self.themes.get(id)
    }

    /// Whether `id` names a theme in this catalogue.
    pub fn contains(&self, id: &str) -> bool {
        self.themes.contains_key(id)
    }

    /// Theme ids in sorted order.
    pub fn list(&self) -> Vec<&str> {
        self.themes.keys().map(String::as_str).collect()
    }

    /// The theme after `current` in sorted order, wrapping around. Unknown ids
    /// yield the first theme.
    pub fn next(&self, current: &str) -> &str {
        let ids = self.list();
        match ids.iter().position(|&t| t == current) {
            Some(idx) => ids[(idx + 1) % ids.len()],
            None => ids.first().copied().unwrap_or(self.default_id()),
        }
    }

    /// The theme before `current` in sorted order, wrapping around. Unknown
    /// ids yield the first theme.
    pub fn prev(&self, current: &str) -> &str {
        let ids = self.list();
        match ids.iter().position(|&t| t == current) {
            Some(0) => ids[ids.len() - 1],
            Some(idx) => ids[idx - 1],
            None => ids.first().copied().unwrap_or(self.default_id()),
        }
    }

    /// Look up a theme, falling back to the default for unknown ids.
    pub fn theme_or_default(&self, id: &str) -> &Theme {
        self.get(id).unwrap_or_else(|| {
            warn!(theme = id, fallback = %self.fallback.id, "unknown theme, using default");
            &self.fallback
        })
    }

    /// Expand a theme id into a complete four-region set.
    ///
    /// Total: unknown ids resolve to the default theme's set. Region
    /// delegations pointing at missing themes use the owning theme.
    pub fn resolve_theme_set(&self, id: &str) -> ThemeSet {
        let owner = self.theme_or_default(id);
        let pick = |region: Region| -> Theme {
            owner
                .delegate(region)
                .and_then(|d| self.get(d))
                .unwrap_or(owner)
                .clone()
        };
        ThemeSet {
            main: pick(Region::LeftSidePanel),
            navbar: pick(Region::Navbar),
            toolbar: pick(Region::Toolbar),
            footer: pick(Region::Footer),
        }
    }

    /// Resolve independently chosen themes per region.
    pub fn resolve_region_themes(&self, choice: &ThemeChoice) -> ThemeSet {
        ThemeSet {
            main: self.theme_or_default(&choice.main).clone(),
            navbar: self.theme_or_default(&choice.navbar).clone(),
            toolbar: self.theme_or_default(&choice.toolbar).clone(),
            footer: self.theme_or_default(&choice.footer).clone(),
        }
    }

    /// The theme layer for `id`: its layout hints plus its region assignment.
    pub fn layer_for(&self, id: &str) -> RawSettings {
        let owner = self.theme_or_default(id);
        let set = self.resolve_theme_set(&owner.id);
        let mut raw = owner.hints.clone();
        let ids = set.ids();
        *raw.theme_mut() = RawThemeChoice {
            main: Some(ids.main),
            navbar: Some(ids.navbar),
            toolbar: Some(ids.toolbar),
            footer: Some(ids.footer),
        };
        raw
    }
}

fn builtin_catalogue() -> ThemeCatalogue {
    let light = || Palette::parse("#7367f0", "#f8f7fa", "white", "#2f2b3d");

    let default = Theme::new(defaults::THEME, ThemeMode::Light, light());

    let dark = Theme::new(
        "dark",
        ThemeMode::Dark,
        Palette::parse("#7367f0", "#25293c", "#2f3349", "#e1def5"),
    );

    let mut semi_dark = Theme::new("semi-dark", ThemeMode::Light, light());
    semi_dark.regions.navbar = Some("dark".to_string());

    let mut bordered = Theme::new("bordered", ThemeMode::Bordered, light());
    bordered.hints.layout_config_mut().mode = Some(ContainerMode::Boxed);

    let mut midnight = Theme::new(
        "midnight",
        ThemeMode::Dark,
        Palette::parse("#00bfff", "#191970", "#1e2a5a", "white"),
    );
    midnight.regions.toolbar = Some("dark".to_string());
    midnight.regions.footer = Some("dark".to_string());
    midnight
        .hints
        .layout_config_mut()
        .navbar
        .get_or_insert_with(Default::default)
        .folded = Some(true);

    ThemeCatalogue::new([dark, semi_dark, bordered, midnight], default)
}

/// Sorted ids of the built-in themes.
pub fn list_themes() -> Vec<&'static str> {
    ThemeCatalogue::builtin().list()
}

/// Whether the built-in catalogue has a theme named `id`.
pub fn theme_exists(id: &str) -> bool {
    ThemeCatalogue::builtin().contains(id)
}

/// Next built-in theme after `current`.
pub fn next_theme(current: &str) -> &'static str {
    ThemeCatalogue::builtin().next(current)
}

/// Previous built-in theme before `current`.
pub fn prev_theme(current: &str) -> &'static str {
    ThemeCatalogue::builtin().prev(current)
}

/// Resolve a built-in theme id into a complete four-region set.
pub fn resolve_theme_set(id: &str) -> ThemeSet {
    ThemeCatalogue::builtin().resolve_theme_set(id)
}

/// Resolve independently chosen built-in themes per region.
pub fn resolve_region_themes(choice: &ThemeChoice) -> ThemeSet {
    ThemeCatalogue::builtin().resolve_region_themes(choice)
}
