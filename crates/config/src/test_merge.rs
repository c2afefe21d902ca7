#[cfg(test)]
mod tests {
    use proptest::prelude::*;
    use tracing_subscriber::layer::SubscriberExt;

    use crate::{
        ConfigLayer, ContainerMode, Direction, Rank, RawBar, RawNavbar, RawSettings, RawSidePanel,
        Settings, ThemeChoice, merge_layers, resolve,
        themes::{ThemeCatalogue, resolve_theme_set},
    };

    fn arb_rank() -> impl Strategy<Value = Rank> {
        prop::sample::select(Rank::ALL.to_vec())
    }

    fn arb_raw() -> impl Strategy<Value = RawSettings> {
        (
            prop::option::of(prop::sample::select(vec!["layout1", "layout2", "layout3", "bogus"])),
            prop::option::of(any::<bool>()),
            prop::option::of(any::<bool>()),
            prop::option::of(any::<bool>()),
            prop::option::of(any::<bool>()),
            prop::option::of(prop::sample::select(vec![
                ContainerMode::Boxed,
                ContainerMode::Fullwidth,
                ContainerMode::Container,
            ])),
            prop::option::of(prop_oneof![Just(Direction::Ltr), Just(Direction::Rtl)]),
        )
            .prop_map(|(style, nav, folded, toolbar, right, mode, dir)| {
                let mut raw = RawSettings::default();
                if let Some(s) = style {
                    raw = raw.with_layout_style(s);
                }
                if nav.is_some() || folded.is_some() {
                    raw.layout_config_mut().navbar = Some(RawNavbar {
                        display: nav,
                        folded,
                        ..RawNavbar::default()
                    });
                }
                if toolbar.is_some() {
                    raw.layout_config_mut().toolbar = Some(RawBar {
                        display: toolbar,
                        style: None,
                    });
                }
                if right.is_some() {
                    raw.layout_config_mut().right_side_panel = Some(RawSidePanel { display: right });
                }
                if mode.is_some() {
                    raw.layout_config_mut().mode = mode;
                }
                raw.direction = dir;
                raw
            })
    }

    fn arb_layers() -> impl Strategy<Value = Vec<ConfigLayer>> {
        prop::collection::vec(
            (arb_rank(), arb_raw()).prop_map(|(rank, raw)| ConfigLayer::new(rank, raw)),
            0..6,
        )
    }

    /// One layer per rank so that ordering is fully determined by rank.
    fn arb_distinct_layers() -> impl Strategy<Value = Vec<ConfigLayer>> {
        prop::collection::vec(prop::option::of(arb_raw()), 5).prop_map(|slots| {
            slots
                .into_iter()
                .zip(Rank::ALL)
                .filter_map(|(raw, rank)| raw.map(|r| ConfigLayer::new(rank, r)))
                .collect()
        })
    }

    fn toolbar(display: bool) -> RawSettings {
        let mut raw = RawSettings::default();
        raw.layout_config_mut().toolbar = Some(RawBar {
            display: Some(display),
            style: None,
        });
        raw
    }

    proptest! {
        #[test]
        fn resolve_is_deterministic(layers in arb_layers()) {
            prop_assert_eq!(resolve(&layers), resolve(&layers.clone()));
        }

        #[test]
        fn resolve_ignores_call_order(layers in arb_distinct_layers(), seed in any::<u64>()) {
            let mut shuffled = layers.clone();
            let n = shuffled.len();
            if n > 1 {
                shuffled.rotate_left((seed as usize) % n);
                if seed % 2 == 0 {
                    shuffled.reverse();
                }
            }
            prop_assert_eq!(resolve(&layers), resolve(&shuffled));
        }

        #[test]
        fn unset_fields_never_erase(lower in arb_raw()) {
            let lower_only = resolve(&[ConfigLayer::new(Rank::Defaults, lower.clone())]);
            let with_empty = resolve(&[
                ConfigLayer::new(Rank::Defaults, lower),
                ConfigLayer::new(Rank::Viewport, RawSettings::default()),
            ]);
            prop_assert_eq!(lower_only, with_empty);
        }

        #[test]
        fn higher_explicit_false_wins(low in arb_rank(), high in arb_rank()) {
            prop_assume!(low < high);
            let s = resolve(&[
                ConfigLayer::new(high, toolbar(false)),
                ConfigLayer::new(low, toolbar(true)),
            ]);
            prop_assert!(!s.layout.config.toolbar.display);
        }

        #[test]
        fn merge_is_associative(a in arb_raw(), b in arb_raw(), c in arb_raw()) {
            let left = a.clone().merge(&b).merge(&c);
            let right = a.merge(&b.merge(&c));
            prop_assert_eq!(left, right);
        }

        #[test]
        fn merged_layers_match_sequential_overlay(layers in arb_distinct_layers()) {
            let overlays: Vec<RawSettings> = layers.iter().map(|l| l.raw.clone()).collect();
            let sequential = Settings::default().overlay_all_raw(&overlays);
            prop_assert_eq!(merge_layers(&layers).into_settings(), sequential);
        }
    }

    #[test]
    fn ron_fixture_layers_resolve() {
        let defaults: RawSettings =
            ron::from_str("(layout: Some((config: Some((navbar: Some((display: Some(true))))))))")
                .unwrap();
        let route: RawSettings =
            ron::from_str("(layout: Some((config: Some((toolbar: Some((display: Some(false))))))))")
                .unwrap();
        let s = resolve(&[
            ConfigLayer::new(Rank::Route, route),
            ConfigLayer::new(Rank::Defaults, defaults),
        ]);
        assert!(s.layout.config.navbar.display);
        assert!(!s.layout.config.toolbar.display);
    }

    #[test]
    fn unknown_theme_falls_back_with_warning() {
        let (layer, captured) = logging::capture::capture();
        let subscriber = tracing_subscriber::registry().with(layer);
        let set = tracing::subscriber::with_default(subscriber, || {
            resolve_theme_set("not-a-theme")
        });
        assert_eq!(set.ids(), ThemeChoice::uniform("default"));
        assert!(captured.contains("unknown theme"));
        assert!(captured.contains("not-a-theme"));
    }

    #[test]
    fn theme_layer_sits_below_user_choice() {
        let catalogue = ThemeCatalogue::builtin();
        let mut user = RawSettings::default();
        user.theme_mut().navbar = Some("bordered".to_string());
        let s = resolve(&[
            ConfigLayer::new(Rank::User, user),
            ConfigLayer::new(Rank::Theme, catalogue.layer_for("semi-dark")),
        ]);
        assert_eq!(s.theme.navbar, "bordered");
        assert_eq!(s.theme.main, "semi-dark");
    }
}
