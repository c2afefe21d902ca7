//! Shell settings: partial configuration layers, the resolver that merges
//! them, the theme catalogue, and user preference persistence.
#![allow(missing_docs)]

mod defaults;
mod error;
mod layer;
mod loader;
mod prefs;
mod raw;
mod resolver;
mod settings;
pub mod themes;
mod types;

#[cfg(test)]
mod test_merge;

pub use error::Error;
pub use layer::{ConfigLayer, Rank, merge_layers, resolve};
pub use loader::{LayerFormat, load_layer_from_path, parse_layer};
pub use prefs::{FilePreferences, MemoryPreferences, PreferenceStore, SavePolicy};
pub use raw::{RawBar, RawLayout, RawLayoutConfig, RawNavbar, RawSettings, RawSidePanel, RawThemeChoice};
pub use resolver::{ListenerId, SettingsResolver};
pub use settings::{Bar, Layout, LayoutConfig, Navbar, Settings, SidePanel, ThemeChoice};
pub use types::{BarStyle, ContainerMode, DeviceClass, Direction, NavbarPosition, Region, ScrollMode};

/// Parse a color into a raw rgb tuple.
pub(crate) fn parse_rgb(s: &str) -> Option<(u8, u8, u8)> {
    colornames::Color::try_from(s).ok().map(|c| c.rgb())
}
