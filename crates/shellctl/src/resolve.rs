//! The `resolve` and `check` subcommands.

use std::{iter, path::Path};

use config::{
    DeviceClass, Rank, RawSettings, Settings, SettingsResolver, load_layer_from_path,
    themes::{ThemeCatalogue, ThemeSet},
};
use layout::{RenderPlan, Shell, ShellEvent};
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::{
    cli::{CheckArgs, ResolveArgs},
    error::{Error, Result},
};

/// Everything `resolve` prints.
#[derive(Debug, Serialize)]
pub struct Report {
    /// Ranks that contributed a layer, lowest first.
    pub ranks: Vec<Rank>,
    /// Active theme id.
    pub theme: String,
    /// Resolved settings.
    pub settings: Settings,
    /// Theme per region.
    pub themes: ThemeSet,
    /// Render decisions for the viewport.
    pub plan: RenderPlan,
}

/// Load an optional layer file.
fn load(path: Option<&Path>) -> Result<Option<RawSettings>> {
    path.map(|p| {
        debug!(path = %p.display(), "loading layer");
        load_layer_from_path(p)
    })
    .transpose()
    .map_err(Error::from)
}

/// Resolve the layers named by `args` against `catalogue`.
pub fn build(args: &ResolveArgs, catalogue: &ThemeCatalogue) -> Result<Report> {
    let defaults = load(args.defaults.as_deref())?.unwrap_or_default();
    let mut resolver = SettingsResolver::new(defaults);
    if let Some(raw) = load(args.user.as_deref())? {
        resolver.set_layer(Rank::User, raw);
    }
    if let Some(raw) = load(args.route.as_deref())? {
        resolver.set_layer(Rank::Route, raw);
    }

    let requested = args
        .theme
        .clone()
        .unwrap_or_else(|| resolver.resolved().theme.main.clone());
    let theme = catalogue.theme_or_default(&requested).id.clone();
    let mut theme_layer = catalogue.layer_for(&theme);
    if let Some(extra) = load(args.theme_layer.as_deref())? {
        theme_layer = theme_layer.merge(&extra);
    }
    resolver.set_layer(Rank::Theme, theme_layer);

    let events = match &args.events {
        Some(src) => {
            ron::from_str::<Vec<ShellEvent>>(src).map_err(|e| Error::Events(e.to_string()))?
        }
        None => Vec::new(),
    };

    let device = DeviceClass::from(args.device);
    resolver.set_device(device);
    let settings = resolver.resolved().clone();

    let mut shell = Shell::new(&settings);
    for event in iter::once(ShellEvent::ViewportChanged(device)).chain(events) {
        if let Err(e) = shell.apply(&event) {
            warn!(error = %e, ?event, "shell event rejected");
        }
    }
    let plan = shell.plan(&settings);
    let ranks = resolver.layers().iter().map(|l| l.rank).collect();
    info!(theme = %theme, device = %device, style = %settings.layout.style, "resolved");
    Ok(Report {
        ranks,
        themes: catalogue.resolve_region_themes(&settings.theme),
        theme,
        settings,
        plan,
    })
}

/// Run `resolve` and print the report.
pub fn run(args: &ResolveArgs) -> Result<()> {
    let report = build(args, ThemeCatalogue::builtin())?;
    let out = if args.compact {
        serde_json::to_string(&report)?
    } else {
        serde_json::to_string_pretty(&report)?
    };
    println!("{out}");
    Ok(())
}

/// Run `check`, reporting every file before failing.
pub fn check(args: &CheckArgs) -> Result<()> {
    let mut failed = 0;
    for path in &args.paths {
        match load_layer_from_path(path) {
            Ok(_) => println!("ok: {}", path.display()),
            Err(e) => {
                failed += 1;
                eprintln!("{}", e.pretty());
            }
        }
    }
    if failed > 0 {
        return Err(Error::CheckFailed {
            failed,
            total: args.paths.len(),
        });
    }
    Ok(())
}
