//! Live settings resolution over one slot per rank.

use std::{collections::BTreeMap, fmt};

use tracing::{debug, warn};

use crate::{
    ConfigLayer, DeviceClass, Rank, RawSettings, Settings, resolve, themes::ThemeCatalogue,
};

/// Handle returned by [`SettingsResolver::on_change`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(u64);

/// Callback invoked with the new resolved settings.
type Listener = Box<dyn Fn(&Settings) + Send + Sync>;

/// Holds the current layer of every rank and the settings they resolve to.
///
/// Every mutation re-resolves synchronously. Listeners run only when the
/// resolved value actually changes.
pub struct SettingsResolver {
    /// Current layer per rank. The defaults slot is fixed at construction.
    layers: BTreeMap<Rank, RawSettings>,
    /// Device class behind the viewport layer.
    device: DeviceClass,
    /// Last resolved settings.
    resolved: Settings,
    /// Registered change listeners.
    listeners: Vec<(ListenerId, Listener)>,
    /// Next listener id.
    next_listener: u64,
}

impl fmt::Debug for SettingsResolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SettingsResolver")
            .field("layers", &self.layers)
            .field("device", &self.device)
            .field("resolved", &self.resolved)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

impl SettingsResolver {
    /// Create a resolver whose defaults layer is `defaults`.
    pub fn new(defaults: RawSettings) -> Self {
        let mut layers = BTreeMap::new();
        layers.insert(Rank::Defaults, defaults);
        let resolved = resolve(&snapshot(&layers));
        Self {
            layers,
            device: DeviceClass::default(),
            resolved,
            listeners: Vec::new(),
            next_listener: 0,
        }
    }

    /// The current resolved settings.
    pub fn resolved(&self) -> &Settings {
        &self.resolved
    }

    /// The layer currently held at `rank`.
    pub fn layer(&self, rank: Rank) -> Option<&RawSettings> {
        self.layers.get(&rank)
    }

    /// All populated layers, lowest rank first.
    pub fn layers(&self) -> Vec<ConfigLayer> {
        snapshot(&self.layers)
    }

    /// Current device class.
    pub fn device(&self) -> DeviceClass {
        self.device
    }

    /// Replace the layer at `rank`. Returns whether the resolved settings changed.
    ///
    /// The defaults layer is fixed for the life of the resolver; attempts to
    /// replace it are logged and ignored.
    pub fn set_layer(&mut self, rank: Rank, raw: RawSettings) -> bool {
        if rank == Rank::Defaults {
            warn!("defaults layer is fixed; ignoring replacement");
            return false;
        }
        self.layers.insert(rank, raw);
        self.recompute(rank)
    }

    /// Remove the layer at `rank`. Returns whether the resolved settings changed.
    pub fn clear_layer(&mut self, rank: Rank) -> bool {
        if rank == Rank::Defaults {
            warn!("defaults layer is fixed; ignoring clear");
            return false;
        }
        if self.layers.remove(&rank).is_none() {
            return false;
        }
        self.recompute(rank)
    }

    /// Push a device class into the viewport layer.
    pub fn set_device(&mut self, device: DeviceClass) -> bool {
        self.device = device;
        let raw = device.overrides();
        if raw.is_empty() {
            self.clear_layer(Rank::Viewport)
        } else {
            self.set_layer(Rank::Viewport, raw)
        }
    }

    /// Derive the theme layer from catalogue theme `id`.
    pub fn apply_theme_hints(&mut self, catalogue: &ThemeCatalogue, id: &str) -> bool {
        self.set_layer(Rank::Theme, catalogue.layer_for(id))
    }

    /// Register a listener for resolved-value changes.
    pub fn on_change(&mut self, f: impl Fn(&Settings) + Send + Sync + 'static) -> ListenerId {
        let id = ListenerId(self.next_listener);
        self.next_listener += 1;
        self.listeners.push((id, Box::new(f)));
        id
    }

    /// Remove a listener. Unknown ids are ignored.
    pub fn remove_listener(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(lid, _)| *lid != id);
        self.listeners.len() != before
    }

    /// Re-resolve and notify listeners if the value changed.
    fn recompute(&mut self, cause: Rank) -> bool {
        let next = resolve(&snapshot(&self.layers));
        if next == self.resolved {
            debug!(%cause, "layer change left settings unchanged");
            return false;
        }
        debug!(%cause, style = %next.layout.style, "settings changed");
        self.resolved = next;
        for (_, listener) in &self.listeners {
            listener(&self.resolved);
        }
        true
    }
}

/// Layers as a ranked list.
fn snapshot(layers: &BTreeMap<Rank, RawSettings>) -> Vec<ConfigLayer> {
    layers
        .iter()
        .map(|(rank, raw)| ConfigLayer::new(*rank, raw.clone()))
        .collect()
}
