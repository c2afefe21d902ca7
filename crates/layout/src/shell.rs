use config::Settings;
use tracing::{debug, warn};

use crate::{
    LayoutError, NavbarVariant, RenderPlan, ShellEvent, ShellState, Variant, transition,
};

/// Stateful wrapper around [`transition`] that validates and logs events.
#[derive(Debug, Clone, Default)]
pub struct Shell {
    /// Current state.
    state: ShellState,
}

impl Shell {
    /// Create a shell in its initial desktop state for `settings`.
    pub fn new(settings: &Settings) -> Self {
        Self {
            state: ShellState::new(settings),
        }
    }

    /// Current state.
    pub fn state(&self) -> &ShellState {
        &self.state
    }

    /// Apply an event. Returns whether the state changed.
    ///
    /// Unknown layout or navbar styles are accepted with a warning and fall
    /// back to their defaults. Pinning a panel that cannot be pinned is
    /// rejected and leaves the state unchanged.
    pub fn apply(&mut self, event: &ShellEvent) -> Result<bool, LayoutError> {
        match event {
            ShellEvent::ConfigChanged {
                style,
                navbar_style,
                ..
            } => {
                if let Err(e) = style.parse::<Variant>() {
                    warn!(error = %e, fallback = %Variant::default(), "layout style fallback");
                }
                let horizontal = Variant::from_style(style).is_horizontal();
                if !horizontal && let Err(e) = NavbarVariant::parse_vertical(navbar_style) {
                    warn!(error = %e, fallback = %NavbarVariant::default(), "navbar style fallback");
                }
            }
            ShellEvent::TogglePin(panel) if !panel.pinnable() => {
                return Err(LayoutError::PinUnsupported { panel: *panel });
            }
            _ => {}
        }
        let next = transition(&self.state, event);
        if next == self.state {
            return Ok(false);
        }
        debug!(?event, variant = %next.variant, device = %next.device, "shell transition");
        self.state = next;
        Ok(true)
    }

    /// Apply a config-change event derived from `settings`.
    pub fn sync_settings(&mut self, settings: &Settings) -> bool {
        self.apply(&ShellEvent::config(settings)).unwrap_or(false)
    }

    /// Render plan for the current state.
    pub fn plan(&self, settings: &Settings) -> RenderPlan {
        RenderPlan::compute(&self.state, settings)
    }
}
