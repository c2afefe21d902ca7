use config::{DeviceClass, Settings};
use layout::{PanelId, PanelMode, ShellEvent, ShellState, transition};
use proptest::prelude::*;

fn arb_panel() -> impl Strategy<Value = PanelId> {
    prop::sample::select(PanelId::ALL.to_vec())
}

fn arb_desktop_event() -> impl Strategy<Value = ShellEvent> {
    prop_oneof![
        arb_panel().prop_map(ShellEvent::Toggle),
        arb_panel().prop_map(ShellEvent::TogglePin),
        arb_panel().prop_map(ShellEvent::Close),
        prop::sample::select(vec!["/", "/contracts", "/teams", "/land"])
            .prop_map(|r| ShellEvent::RouteChanged(r.to_string())),
        (
            prop::sample::select(vec!["layout1", "layout2", "layout3", "bogus"]),
            any::<bool>(),
        )
            .prop_map(|(s, folded)| ShellEvent::ConfigChanged {
                style: s.to_string(),
                navbar_style: "style-2".to_string(),
                navbar_folded: folded,
            }),
    ]
}

fn arb_event() -> impl Strategy<Value = ShellEvent> {
    prop_oneof![
        4 => arb_desktop_event(),
        1 => prop_oneof![Just(DeviceClass::Mobile), Just(DeviceClass::Desktop)]
            .prop_map(ShellEvent::ViewportChanged),
    ]
}

fn run(events: &[ShellEvent]) -> ShellState {
    events
        .iter()
        .fold(ShellState::new(&Settings::default()), |s, e| transition(&s, e))
}

proptest! {
    #[test]
    fn mobile_roundtrip_restores_panels(events in prop::collection::vec(arb_event(), 0..30)) {
        let mut before = run(&events);
        before = transition(&before, &ShellEvent::ViewportChanged(DeviceClass::Desktop));
        let mobile = transition(&before, &ShellEvent::ViewportChanged(DeviceClass::Mobile));
        prop_assert!(PanelId::ALL.iter().all(|p| mobile.mode(*p) == PanelMode::MobileHidden));
        let back = transition(&mobile, &ShellEvent::ViewportChanged(DeviceClass::Desktop));
        prop_assert_eq!(back.panels, before.panels);
    }

    #[test]
    fn mobile_roundtrip_survives_viewport_fold(
        events in prop::collection::vec(arb_event(), 0..30),
        style in prop::sample::select(vec!["layout1", "layout2", "layout3"]),
    ) {
        let config = |folded| ShellEvent::ConfigChanged {
            style: style.to_string(),
            navbar_style: "style-2".to_string(),
            navbar_folded: folded,
        };
        let mut before = run(&events);
        before = transition(&before, &ShellEvent::ViewportChanged(DeviceClass::Desktop));
        before = transition(&before, &config(before.navbar_folded));
        let desktop_fold = before.navbar_folded;

        // Entering mobile forces the navbar unfolded; leaving restores the fold.
        let mut s = transition(&before, &ShellEvent::ViewportChanged(DeviceClass::Mobile));
        s = transition(&s, &config(false));
        s = transition(&s, &config(desktop_fold));
        s = transition(&s, &ShellEvent::ViewportChanged(DeviceClass::Desktop));
        prop_assert_eq!(s.panels, before.panels);
        prop_assert_eq!(s.navbar_folded, desktop_fold);
    }

    #[test]
    fn pinned_panels_survive_route_changes(
        events in prop::collection::vec(arb_event(), 0..30),
        route in "/[a-z]{1,8}",
    ) {
        let s = run(&events);
        let after = transition(&s, &ShellEvent::RouteChanged(route));
        for p in PanelId::ALL {
            if s.mode(p) == PanelMode::Pinned {
                prop_assert_eq!(after.mode(p), PanelMode::Pinned);
            }
            prop_assert_ne!(after.mode(p), PanelMode::Expanded);
        }
    }

    #[test]
    fn only_pinnable_panels_pin(events in prop::collection::vec(arb_event(), 0..40)) {
        let s = run(&events);
        for p in PanelId::ALL {
            if !p.pinnable() {
                prop_assert_ne!(s.mode(p), PanelMode::Pinned);
            }
        }
    }

    #[test]
    fn mobile_state_never_shows_pinned(events in prop::collection::vec(arb_event(), 0..40)) {
        let s = run(&events);
        if s.device == DeviceClass::Mobile {
            for p in PanelId::ALL {
                prop_assert!(matches!(s.mode(p), PanelMode::MobileHidden | PanelMode::Expanded));
            }
        }
    }
}

#[test]
fn ron_event_script_drives_shell() {
    let script: Vec<ShellEvent> = ron::from_str(
        r#"[
            toggle_pin(left_side),
            toggle(right_side),
            viewport_changed(mobile),
            route_changed("/contracts"),
            viewport_changed(desktop),
        ]"#,
    )
    .unwrap();
    let s = run(&script);
    assert_eq!(s.mode(PanelId::LeftSide), PanelMode::Pinned);
    assert_eq!(s.mode(PanelId::RightSide), PanelMode::Collapsed);
    assert_eq!(s.route.as_deref(), Some("/contracts"));
}
