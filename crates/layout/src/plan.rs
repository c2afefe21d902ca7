//! What the page shell renders for one state and settings pair.

use std::collections::BTreeMap;

use config::{ContainerMode, DeviceClass, Direction, Region, ScrollMode, Settings};
use serde::{Deserialize, Serialize};

use crate::{NavbarVariant, PanelId, PanelMode, ShellState, Variant};

/// Render decisions derived from the shell state and the resolved settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderPlan {
    /// Layout skeleton.
    pub variant: Variant,
    /// Navbar sub-variant.
    pub navbar: NavbarVariant,
    /// Device class the plan targets.
    pub device: DeviceClass,
    /// Text direction.
    pub direction: Direction,
    /// Horizontal containment.
    pub container: ContainerMode,
    /// Scrolling element.
    pub scroll: ScrollMode,
    /// Whether each region is rendered.
    pub regions: BTreeMap<Region, bool>,
    /// Mode of each panel.
    pub panels: BTreeMap<PanelId, PanelMode>,
    /// Whether the vertical navbar is shown as an icon rail.
    pub navbar_folded: bool,
}

impl RenderPlan {
    /// Build the plan for `state` under `settings`.
    pub fn compute(state: &ShellState, settings: &Settings) -> Self {
        let regions = Region::ALL
            .into_iter()
            .map(|r| (r, region_visible(state, settings, r)))
            .collect();
        let navbar_folded = !state.variant.is_horizontal()
            && !state.is_mobile()
            && state.mode(PanelId::Navbar) == PanelMode::Collapsed;
        Self {
            variant: state.variant,
            navbar: state.navbar,
            device: state.device,
            direction: settings.direction,
            container: settings.layout.config.mode,
            scroll: settings.layout.config.scroll,
            regions,
            panels: state.panels.clone(),
            navbar_folded,
        }
    }

    /// Whether `region` is rendered.
    pub fn shows(&self, region: Region) -> bool {
        self.regions.get(&region).copied().unwrap_or(false)
    }
}

/// A region renders when settings enable it and its panel, if any, allows it.
fn region_visible(state: &ShellState, settings: &Settings, region: Region) -> bool {
    if !settings.displays(region) {
        return false;
    }
    match region {
        // A desktop navbar is always present, folded or not; on mobile it is a drawer.
        Region::Navbar => !state.is_mobile() || state.mode(PanelId::Navbar).is_open(),
        Region::LeftSidePanel => state.mode(PanelId::LeftSide).is_open(),
        Region::RightSidePanel => state.mode(PanelId::RightSide).is_open(),
        Region::Toolbar | Region::Footer => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ShellEvent, transition};

    #[test]
    fn hidden_toolbar_and_open_panel() {
        let mut settings = Settings::default();
        settings.layout.config.toolbar.display = false;
        let state = transition(
            &ShellState::new(&settings),
            &ShellEvent::Toggle(PanelId::RightSide),
        );
        let plan = RenderPlan::compute(&state, &settings);
        assert!(!plan.shows(Region::Toolbar));
        assert!(plan.shows(Region::Navbar));
        assert!(plan.shows(Region::RightSidePanel));
        assert!(!plan.shows(Region::LeftSidePanel));
        assert!(!plan.navbar_folded);
    }

    #[test]
    fn settings_flag_beats_open_panel() {
        let mut settings = Settings::default();
        settings.layout.config.right_side_panel.display = false;
        let state = transition(
            &ShellState::new(&settings),
            &ShellEvent::Toggle(PanelId::RightSide),
        );
        assert!(!RenderPlan::compute(&state, &settings).shows(Region::RightSidePanel));
    }

    #[test]
    fn mobile_hides_navbar_drawer() {
        let settings = Settings::default();
        let state = transition(
            &ShellState::new(&settings),
            &ShellEvent::ViewportChanged(DeviceClass::Mobile),
        );
        let plan = RenderPlan::compute(&state, &settings);
        assert!(!plan.shows(Region::Navbar));
        assert!(!plan.navbar_folded);
        assert!(plan.shows(Region::Footer));
    }

    #[test]
    fn plan_serializes_to_json() {
        let settings = Settings::default();
        let plan = RenderPlan::compute(&ShellState::new(&settings), &settings);
        let json = serde_json::to_value(&plan).unwrap();
        assert_eq!(json["variant"], "layout1");
        assert_eq!(json["navbar"], "style-1");
        assert_eq!(json["regions"]["toolbar"], true);
    }
}
