//! Ranked configuration layers and the pure resolve function.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{ContainerMode, DeviceClass, RawSettings, Settings, raw::RawSidePanel};

/// Precedence rank of a configuration layer, lowest first.
///
/// Higher ranks override lower ones field by field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Rank {
    /// Global defaults supplied at startup; fixed for the session.
    Defaults = 1,
    /// Layout hints implied by the active theme.
    Theme = 2,
    /// Override declared by the current route.
    Route = 3,
    /// Saved user preference.
    User = 4,
    /// Ephemeral device/viewport override.
    Viewport = 5,
}

impl Rank {
    /// Every rank, lowest precedence first.
    pub const ALL: [Self; 5] = [
        Self::Defaults,
        Self::Theme,
        Self::Route,
        Self::User,
        Self::Viewport,
    ];
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Defaults => "defaults",
            Self::Theme => "theme",
            Self::Route => "route",
            Self::User => "user",
            Self::Viewport => "viewport",
        })
    }
}

/// One ranked partial configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigLayer {
    /// Precedence rank.
    pub rank: Rank,
    /// Partial settings contributed by this layer.
    pub raw: RawSettings,
}

impl ConfigLayer {
    /// Create a layer.
    pub fn new(rank: Rank, raw: RawSettings) -> Self {
        Self { rank, raw }
    }
}

/// Merge layers into a single partial in ascending rank order.
///
/// Sorting is stable, so layers sharing a rank apply in slice order; layers of
/// different ranks apply by rank regardless of their position.
pub fn merge_layers(layers: &[ConfigLayer]) -> RawSettings {
    let mut ordered: Vec<&ConfigLayer> = layers.iter().collect();
    ordered.sort_by_key(|l| l.rank);
    ordered
        .into_iter()
        .fold(RawSettings::default(), |acc, l| acc.merge(&l.raw))
}

/// Resolve layers over the built-in defaults.
///
/// Pure and deterministic: equal inputs produce value-equal settings.
pub fn resolve(layers: &[ConfigLayer]) -> Settings {
    merge_layers(layers).into_settings()
}

impl DeviceClass {
    /// Partial settings forced by this device class (the rank-5 layer).
    ///
    /// Mobile collapses the page to a single full-width column: the right
    /// panel is hidden and the navbar is never folded.
    pub fn overrides(self) -> RawSettings {
        let mut raw = RawSettings::default();
        if self == Self::Mobile {
            let cfg = raw.layout_config_mut();
            cfg.mode = Some(ContainerMode::Fullwidth);
            cfg.navbar.get_or_insert_with(Default::default).folded = Some(false);
            cfg.right_side_panel = Some(RawSidePanel {
                display: Some(false),
            });
        }
        raw
    }
}
