use std::{collections::HashMap, future::Future, sync::Arc};

use config::{
    ConfigLayer, DeviceClass, PreferenceStore, Rank, RawSettings, SavePolicy, Settings,
    SettingsResolver,
    themes::{ThemeCatalogue, ThemeSet},
};
use layout::{PanelId, RenderPlan, Shell, ShellEvent, ShellState};
use parking_lot::Mutex;
use store::{Feature, MountGuard, SliceHandle, Store};
use tracing::{debug, info, warn};

use crate::{Error, Result, slice};

/// A feature that may also declare per-route settings overrides.
pub trait ShellFeature: Feature {
    /// Route overrides contributed by this feature, as `(route, layer)` pairs.
    fn route_overrides(&self) -> Vec<(String, RawSettings)> {
        Vec::new()
    }
}

/// One user's shell session.
///
/// Owns the store, the settings resolver, the layout shell and the theme
/// selection. Every method takes `&self`; inputs are serialized so the shell
/// and the settings slice observe changes in resolver order.
pub struct Session {
    /// Held for the duration of each input.
    serial: Mutex<()>,
    /// Shared state store.
    store: Store,
    /// Ranked settings layers.
    resolver: Mutex<SettingsResolver>,
    /// Layout shell state.
    shell: Mutex<Shell>,
    /// Theme catalogue.
    catalogue: ThemeCatalogue,
    /// Active theme id.
    theme: Mutex<String>,
    /// Route overrides registered by features.
    routes: Mutex<HashMap<String, RawSettings>>,
    /// Preference persistence.
    prefs: Arc<dyn PreferenceStore>,
    /// User the preferences belong to.
    user: String,
    /// What a preference save does to the live session.
    policy: SavePolicy,
    /// Accessor for the mirrored settings slice.
    settings_slice: SliceHandle<Settings>,
}

impl Session {
    /// Start a session with the built-in theme catalogue.
    ///
    /// The user's saved preference is loaded into the user layer. An
    /// unreadable preference is logged and skipped.
    pub fn new(
        defaults: RawSettings,
        prefs: Arc<dyn PreferenceStore>,
        user: &str,
        policy: SavePolicy,
    ) -> Result<Self> {
        Self::with_catalogue(
            defaults,
            prefs,
            user,
            policy,
            ThemeCatalogue::builtin().clone(),
        )
    }

    /// Start a session with a custom theme catalogue.
    pub fn with_catalogue(
        defaults: RawSettings,
        prefs: Arc<dyn PreferenceStore>,
        user: &str,
        policy: SavePolicy,
        catalogue: ThemeCatalogue,
    ) -> Result<Self> {
        let mut resolver = SettingsResolver::new(defaults);
        match prefs.load(user) {
            Ok(Some(raw)) => {
                resolver.set_layer(Rank::User, raw);
            }
            Ok(None) => {}
            Err(e) => warn!(user, error = %e, "ignoring unreadable preference"),
        }
        let theme = resolver.resolved().theme.main.clone();
        resolver.apply_theme_hints(&catalogue, &theme);

        let settings = resolver.resolved().clone();
        let store = Store::new();
        let settings_slice = slice::register(&store, settings.clone())?;
        info!(user, theme = %theme, style = %settings.layout.style, "session started");
        Ok(Self {
            serial: Mutex::new(()),
            store,
            shell: Mutex::new(Shell::new(&settings)),
            resolver: Mutex::new(resolver),
            catalogue,
            theme: Mutex::new(theme),
            routes: Mutex::new(HashMap::new()),
            prefs,
            user: user.to_string(),
            policy,
            settings_slice,
        })
    }

    /// The session's store.
    pub fn store(&self) -> &Store {
        &self.store
    }

    /// The user this session belongs to.
    pub fn user(&self) -> &str {
        &self.user
    }

    /// Current resolved settings.
    pub fn settings(&self) -> Settings {
        self.resolver.lock().resolved().clone()
    }

    /// Settings as mirrored into the store.
    pub fn settings_slice(&self) -> &SliceHandle<Settings> {
        &self.settings_slice
    }

    /// Current layers, lowest rank first.
    pub fn layers(&self) -> Vec<ConfigLayer> {
        self.resolver.lock().layers()
    }

    /// Current shell state.
    pub fn shell_state(&self) -> ShellState {
        self.shell.lock().state().clone()
    }

    /// Active theme id.
    pub fn theme(&self) -> String {
        self.theme.lock().clone()
    }

    // ===== INPUTS =====

    /// Declare the override layer for `route`.
    pub fn register_route(&self, route: &str, raw: RawSettings) {
        self.routes.lock().insert(route.to_string(), raw);
    }

    /// Navigate to `route`.
    ///
    /// `explicit` replaces any override registered for the route. With
    /// neither, the route layer is cleared.
    pub fn navigate(&self, route: &str, explicit: Option<RawSettings>) {
        let layer = explicit.or_else(|| self.routes.lock().get(route).cloned());
        self.update(
            |r| match layer {
                Some(raw) => r.set_layer(Rank::Route, raw),
                None => r.clear_layer(Rank::Route),
            },
            Some(ShellEvent::RouteChanged(route.to_string())),
        );
        debug!(route, "navigated");
    }

    /// Push a viewport breakpoint crossing.
    pub fn set_viewport(&self, device: DeviceClass) {
        self.update(
            |r| r.set_device(device),
            Some(ShellEvent::ViewportChanged(device)),
        );
    }

    /// Switch the active theme. Unknown ids fall back to the default theme.
    pub fn set_theme(&self, id: &str) {
        let id = self.catalogue.theme_or_default(id).id.clone();
        *self.theme.lock() = id.clone();
        let catalogue = &self.catalogue;
        self.update(|r| r.apply_theme_hints(catalogue, &id), None);
    }

    /// Switch to the next (or previous) catalogue theme.
    pub fn cycle_theme(&self, forward: bool) -> String {
        let current = self.theme();
        let id = if forward {
            self.catalogue.next(&current)
        } else {
            self.catalogue.prev(&current)
        }
        .to_string();
        self.set_theme(&id);
        id
    }

    /// Persist `raw` as the user's preference.
    ///
    /// Under [`SavePolicy::ApplyNow`] the user layer is replaced at once;
    /// under [`SavePolicy::NextLoad`] the live session is left untouched.
    pub fn save_preference(&self, raw: RawSettings) -> Result<()> {
        self.prefs.save(&self.user, &raw)?;
        match self.policy {
            SavePolicy::ApplyNow => {
                self.update(|r| r.set_layer(Rank::User, raw), None);
            }
            SavePolicy::NextLoad => {
                debug!(user = %self.user, "preference saved for next load");
            }
        }
        Ok(())
    }

    /// Flip a panel open or closed.
    pub fn toggle_panel(&self, panel: PanelId) -> Result<bool> {
        let _serial = self.serial.lock();
        self.shell
            .lock()
            .apply(&ShellEvent::Toggle(panel))
            .map_err(Error::from)
    }

    /// Pin or unpin a panel.
    pub fn toggle_pin(&self, panel: PanelId) -> Result<bool> {
        let _serial = self.serial.lock();
        self.shell
            .lock()
            .apply(&ShellEvent::TogglePin(panel))
            .map_err(Error::from)
    }

    // ===== FEATURES =====

    /// Mount a feature and adopt its route overrides.
    pub fn mount<F: ShellFeature>(&self, feature: &F) -> Result<MountGuard> {
        let guard = self.store.mount(feature)?;
        let overrides = feature.route_overrides();
        if !overrides.is_empty() {
            let mut routes = self.routes.lock();
            for (route, raw) in overrides {
                routes.insert(route, raw);
            }
        }
        Ok(guard)
    }

    /// Mount a feature once it has finished loading.
    pub async fn mount_deferred<F, L>(&self, load: L) -> Result<MountGuard>
    where
        F: ShellFeature,
        L: Future<Output = F>,
    {
        let feature = load.await;
        self.mount(&feature)
    }

    // ===== OUTPUTS =====

    /// Render plan for the current state and settings.
    pub fn render_plan(&self) -> RenderPlan {
        let settings = self.settings();
        self.shell.lock().plan(&settings)
    }

    /// Complete theme assignment for the current settings.
    pub fn theme_set(&self) -> ThemeSet {
        self.catalogue.resolve_region_themes(&self.settings().theme)
    }

    // ===== INTERNALS =====

    /// Mutate the resolver, apply `event` to the shell, then sync the shell
    /// with the resolved settings and publish them to the store if they
    /// changed.
    ///
    /// The event goes first so a viewport crossing moves the shell to the new
    /// device before it sees the settings the viewport layer forced.
    fn update(&self, f: impl FnOnce(&mut SettingsResolver) -> bool, event: Option<ShellEvent>) {
        let _serial = self.serial.lock();
        let (changed, settings) = {
            let mut r = self.resolver.lock();
            let changed = f(&mut *r);
            (changed, r.resolved().clone())
        };
        {
            let mut shell = self.shell.lock();
            if let Some(event) = &event
                && let Err(e) = shell.apply(event)
            {
                warn!(error = %e, "shell rejected event");
            }
            if changed || matches!(event, Some(ShellEvent::ViewportChanged(_))) {
                shell.sync_settings(&settings);
            }
        }
        if changed && let Some(action) = slice::resolved_action(&settings) {
            self.store.dispatch(action);
        }
    }
}
