//! Shell state and its pure transition function.

use std::collections::BTreeMap;

use config::{DeviceClass, Settings};
use serde::{Deserialize, Serialize};

use crate::{NavbarVariant, PanelId, PanelMode, Variant};

/// Input to the layout shell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShellEvent {
    /// The resolved settings changed; carries the ids the shell selects from.
    ConfigChanged {
        /// `layout.style` of the new settings.
        style: String,
        /// `layout.config.navbar.style` of the new settings.
        navbar_style: String,
        /// `layout.config.navbar.folded` of the new settings.
        navbar_folded: bool,
    },
    /// The viewport crossed a breakpoint.
    ViewportChanged(DeviceClass),
    /// Navigation moved to another route.
    RouteChanged(String),
    /// Flip a panel open or closed.
    Toggle(PanelId),
    /// Pin or unpin a panel.
    TogglePin(PanelId),
    /// Close a panel, pinned or not.
    Close(PanelId),
}

impl ShellEvent {
    /// The config-change event for `settings`.
    pub fn config(settings: &Settings) -> Self {
        Self::ConfigChanged {
            style: settings.layout.style.clone(),
            navbar_style: settings.layout.config.navbar.style.clone(),
            navbar_folded: settings.layout.config.navbar.folded,
        }
    }
}

/// Structural variant plus the transient state of every panel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShellState {
    /// Selected layout variant.
    pub variant: Variant,
    /// Selected navbar sub-variant.
    pub navbar: NavbarVariant,
    /// Current device class.
    pub device: DeviceClass,
    /// Desktop navbar fold, as of the last desktop config change.
    pub navbar_folded: bool,
    /// Current mode of every panel.
    pub panels: BTreeMap<PanelId, PanelMode>,
    /// Desktop panel modes saved when the viewport became mobile.
    pub saved: Option<BTreeMap<PanelId, PanelMode>>,
    /// Current route, if any navigation happened.
    pub route: Option<String>,
}

impl Default for ShellState {
    fn default() -> Self {
        Self::new(&Settings::default())
    }
}

impl ShellState {
    /// Initial desktop state for `settings`.
    ///
    /// An unfolded navbar starts pinned open; everything else starts collapsed.
    pub fn new(settings: &Settings) -> Self {
        let variant = Variant::from_style(&settings.layout.style);
        let folded = settings.layout.config.navbar.folded;
        let panels = PanelId::ALL
            .into_iter()
            .map(|p| {
                let mode = if p == PanelId::Navbar {
                    navbar_mode(folded)
                } else {
                    PanelMode::Collapsed
                };
                (p, mode)
            })
            .collect();
        Self {
            variant,
            navbar: NavbarVariant::select(variant, &settings.layout.config.navbar.style),
            device: DeviceClass::Desktop,
            navbar_folded: folded,
            panels,
            saved: None,
            route: None,
        }
    }

    /// Mode of `panel`.
    pub fn mode(&self, panel: PanelId) -> PanelMode {
        self.panels.get(&panel).copied().unwrap_or_default()
    }

    /// Whether the viewport is mobile.
    pub fn is_mobile(&self) -> bool {
        self.device == DeviceClass::Mobile
    }

    /// Closed mode for the current device.
    fn closed(&self) -> PanelMode {
        if self.is_mobile() {
            PanelMode::MobileHidden
        } else {
            PanelMode::Collapsed
        }
    }
}

/// Desktop navbar mode for a configured fold.
fn navbar_mode(folded: bool) -> PanelMode {
    if folded {
        PanelMode::Collapsed
    } else {
        PanelMode::Pinned
    }
}

/// Compute the state after `event`. Pure and total: every event is accepted in
/// every state, and events that do not apply leave the state unchanged.
pub fn transition(state: &ShellState, event: &ShellEvent) -> ShellState {
    let mut next = state.clone();
    match event {
        ShellEvent::ConfigChanged {
            style,
            navbar_style,
            navbar_folded,
        } => {
            next.variant = Variant::from_style(style);
            next.navbar = NavbarVariant::select(next.variant, navbar_style);
            // The fold resolved on mobile is forced by the viewport and says
            // nothing about the desktop navbar.
            if !state.is_mobile() && *navbar_folded != state.navbar_folded {
                next.navbar_folded = *navbar_folded;
                next.panels.insert(PanelId::Navbar, navbar_mode(*navbar_folded));
            }
        }
        ShellEvent::ViewportChanged(device) => match (state.device, device) {
            (DeviceClass::Desktop, DeviceClass::Mobile) => {
                next.saved = Some(state.panels.clone());
                for mode in next.panels.values_mut() {
                    *mode = PanelMode::MobileHidden;
                }
                next.device = DeviceClass::Mobile;
            }
            (DeviceClass::Mobile, DeviceClass::Desktop) => {
                next.panels = next.saved.take().unwrap_or_else(|| {
                    PanelId::ALL
                        .into_iter()
                        .map(|p| (p, PanelMode::Collapsed))
                        .collect()
                });
                next.device = DeviceClass::Desktop;
            }
            _ => {}
        },
        ShellEvent::RouteChanged(route) => {
            let closed = state.closed();
            for mode in next.panels.values_mut() {
                if *mode == PanelMode::Expanded {
                    *mode = closed;
                }
            }
            if let Some(saved) = next.saved.as_mut() {
                for mode in saved.values_mut() {
                    if *mode == PanelMode::Expanded {
                        *mode = PanelMode::Collapsed;
                    }
                }
            }
            next.route = Some(route.clone());
        }
        ShellEvent::Toggle(panel) => {
            let mode = if state.mode(*panel).is_open() {
                state.closed()
            } else {
                PanelMode::Expanded
            };
            next.panels.insert(*panel, mode);
        }
        ShellEvent::TogglePin(panel) => {
            if panel.pinnable() && !state.is_mobile() {
                let mode = if state.mode(*panel) == PanelMode::Pinned {
                    PanelMode::Expanded
                } else {
                    PanelMode::Pinned
                };
                next.panels.insert(*panel, mode);
            }
        }
        ShellEvent::Close(panel) => {
            next.panels.insert(*panel, state.closed());
        }
    }
    next
}

#[cfg(test)]
mod tests {
    use super::*;

    fn desktop() -> ShellState {
        ShellState::default()
    }

    #[test]
    fn mobile_hides_pinned_and_desktop_restores() {
        let s = transition(&desktop(), &ShellEvent::TogglePin(PanelId::LeftSide));
        assert_eq!(s.mode(PanelId::LeftSide), PanelMode::Pinned);

        let m = transition(&s, &ShellEvent::ViewportChanged(DeviceClass::Mobile));
        assert_eq!(m.mode(PanelId::LeftSide), PanelMode::MobileHidden);
        assert!(PanelId::ALL.iter().all(|p| m.mode(*p) == PanelMode::MobileHidden));

        let d = transition(&m, &ShellEvent::ViewportChanged(DeviceClass::Desktop));
        assert_eq!(d.panels, s.panels);
        assert_eq!(d.saved, None);
    }

    #[test]
    fn route_change_closes_transient_panels_only() {
        let mut s = transition(&desktop(), &ShellEvent::Toggle(PanelId::RightSide));
        s = transition(&s, &ShellEvent::TogglePin(PanelId::LeftSide));
        assert_eq!(s.mode(PanelId::RightSide), PanelMode::Expanded);

        let r = transition(&s, &ShellEvent::RouteChanged("/contracts".into()));
        assert_eq!(r.mode(PanelId::RightSide), PanelMode::Collapsed);
        assert_eq!(r.mode(PanelId::LeftSide), PanelMode::Pinned);
        assert_eq!(r.route.as_deref(), Some("/contracts"));
    }

    #[test]
    fn toggle_flips_and_pin_is_limited() {
        let s = transition(&desktop(), &ShellEvent::Toggle(PanelId::Quick));
        assert_eq!(s.mode(PanelId::Quick), PanelMode::Expanded);
        let s = transition(&s, &ShellEvent::Toggle(PanelId::Quick));
        assert_eq!(s.mode(PanelId::Quick), PanelMode::Collapsed);

        let pinned = transition(&s, &ShellEvent::TogglePin(PanelId::Quick));
        assert_eq!(pinned, s);

        let unpinned = transition(&desktop(), &ShellEvent::TogglePin(PanelId::Navbar));
        assert_eq!(unpinned.mode(PanelId::Navbar), PanelMode::Expanded);
    }

    #[test]
    fn mobile_drawer_opens_and_closes() {
        let m = transition(&desktop(), &ShellEvent::ViewportChanged(DeviceClass::Mobile));
        let open = transition(&m, &ShellEvent::Toggle(PanelId::Navbar));
        assert_eq!(open.mode(PanelId::Navbar), PanelMode::Expanded);
        let routed = transition(&open, &ShellEvent::RouteChanged("/teams".into()));
        assert_eq!(routed.mode(PanelId::Navbar), PanelMode::MobileHidden);
        // Pinning is unavailable on mobile.
        assert_eq!(transition(&routed, &ShellEvent::TogglePin(PanelId::Navbar)), routed);
    }

    #[test]
    fn config_change_reselects_variant() {
        let s = transition(
            &desktop(),
            &ShellEvent::ConfigChanged {
                style: "layout2".into(),
                navbar_style: "style-2".into(),
                navbar_folded: false,
            },
        );
        assert_eq!(s.variant, Variant::Horizontal);
        assert_eq!(s.navbar, NavbarVariant::Horizontal);

        let s = transition(
            &s,
            &ShellEvent::ConfigChanged {
                style: "nonsense".into(),
                navbar_style: "style-2".into(),
                navbar_folded: true,
            },
        );
        assert_eq!(s.variant, Variant::Vertical);
        assert_eq!(s.navbar, NavbarVariant::Style2);
        assert_eq!(s.mode(PanelId::Navbar), PanelMode::Collapsed);
    }

    #[test]
    fn fold_while_mobile_is_ignored_until_desktop() {
        let mut settings = Settings::default();
        settings.layout.config.navbar.folded = true;
        let folded = ShellState::new(&settings);
        let pinned = transition(&folded, &ShellEvent::TogglePin(PanelId::Navbar));
        assert_eq!(pinned.mode(PanelId::Navbar), PanelMode::Pinned);

        let fold = |folded| ShellEvent::ConfigChanged {
            style: "layout1".into(),
            navbar_style: "style-1".into(),
            navbar_folded: folded,
        };
        let m = transition(&pinned, &ShellEvent::ViewportChanged(DeviceClass::Mobile));
        let m = transition(&m, &fold(false));
        assert_eq!(m.saved.as_ref().unwrap()[&PanelId::Navbar], PanelMode::Pinned);
        let m = transition(&m, &fold(true));
        let d = transition(&m, &ShellEvent::ViewportChanged(DeviceClass::Desktop));
        assert_eq!(d.mode(PanelId::Navbar), PanelMode::Pinned);

        // A fold that really changed while mobile applies once back on desktop.
        let m = transition(&pinned, &ShellEvent::ViewportChanged(DeviceClass::Mobile));
        let d = transition(&m, &ShellEvent::ViewportChanged(DeviceClass::Desktop));
        let unfolded = transition(&d, &fold(false));
        assert_eq!(unfolded.mode(PanelId::Navbar), PanelMode::Pinned);
        assert!(!unfolded.navbar_folded);
        let refolded = transition(&unfolded, &fold(true));
        assert_eq!(refolded.mode(PanelId::Navbar), PanelMode::Collapsed);
    }

    #[test]
    fn folded_navbar_starts_collapsed() {
        let mut settings = Settings::default();
        settings.layout.config.navbar.folded = true;
        assert_eq!(ShellState::new(&settings).mode(PanelId::Navbar), PanelMode::Collapsed);
        assert_eq!(desktop().mode(PanelId::Navbar), PanelMode::Pinned);
    }
}
