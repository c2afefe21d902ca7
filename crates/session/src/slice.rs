//! Resolved settings mirrored into the store.

use config::{Direction, Settings};
use store::{Action, SliceDescriptor, SliceHandle, Store, StoreError};
use tracing::warn;

/// Slice holding the latest resolved settings.
pub const SETTINGS_SLICE: &str = "session/settings";

/// Action carrying newly resolved settings as its payload.
pub const SETTINGS_RESOLVED: &str = "session/settings-resolved";

/// Replace the slice state with the settings carried by the action.
fn settings_reducer(state: &mut Settings, action: &Action) {
    if !action.is(SETTINGS_RESOLVED) {
        return;
    }
    match action.payload_as::<Settings>() {
        Some(next) => *state = next,
        None => warn!(action = %action.kind, "settings payload did not decode"),
    }
}

/// Register the settings slice and its selectors.
pub fn register(store: &Store, initial: Settings) -> Result<SliceHandle<Settings>, StoreError> {
    let handle = store.register_slice(SliceDescriptor::new(
        SETTINGS_SLICE,
        initial,
        settings_reducer,
    ))?;
    handle.selector(store, "layout_style", |s: &Settings| s.layout.style.clone());
    handle.selector(store, "rtl", |s: &Settings| s.direction == Direction::Rtl);
    handle.selector(store, "main_theme", |s: &Settings| s.theme.main.clone());
    Ok(handle)
}

/// Action publishing `settings`, or `None` if they fail to encode.
pub fn resolved_action(settings: &Settings) -> Option<Action> {
    match serde_json::to_value(settings) {
        Ok(v) => Some(Action::with_payload(SETTINGS_RESOLVED, v)),
        Err(e) => {
            warn!(error = %e, "failed to encode resolved settings");
            None
        }
    }
}
