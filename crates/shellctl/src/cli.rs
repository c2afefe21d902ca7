//! Command-line interface definitions for shellctl.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use config::DeviceClass;
use logging::LogArgs;

/// Command-line interface for the `shellctl` binary.
#[derive(Parser, Debug)]
#[command(
    name = "shellctl",
    about = "Resolve shell settings, themes and layout plans",
    version
)]
pub struct Cli {
    /// Logging controls shared across shellcore binaries.
    #[command(flatten)]
    pub log: LogArgs,

    /// What to do.
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Resolve a stack of layer files and print settings, themes and render plan as JSON.
    Resolve(ResolveArgs),
    /// Validate layer files without resolving them.
    Check(CheckArgs),
    /// List the built-in themes.
    Themes,
    /// Print the region themes a theme id resolves to.
    Theme(ThemeArgs),
}

/// Viewport class selectable on the command line.
#[derive(ValueEnum, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Viewport {
    /// Wide viewport.
    #[default]
    Desktop,
    /// Narrow viewport.
    Mobile,
}

impl From<Viewport> for DeviceClass {
    fn from(v: Viewport) -> Self {
        match v {
            Viewport::Desktop => Self::Desktop,
            Viewport::Mobile => Self::Mobile,
        }
    }
}

/// Arguments for the `resolve` subcommand.
#[derive(Args, Debug, Clone, Default)]
pub struct ResolveArgs {
    /// Defaults layer (JSON or RON). Built-in defaults apply when omitted.
    #[arg(long, value_name = "PATH")]
    pub defaults: Option<PathBuf>,

    /// Extra theme-rank layer, applied over the theme's own hints.
    #[arg(long, value_name = "PATH")]
    pub theme_layer: Option<PathBuf>,

    /// Route override layer.
    #[arg(long, value_name = "PATH")]
    pub route: Option<PathBuf>,

    /// User preference layer.
    #[arg(long, value_name = "PATH")]
    pub user: Option<PathBuf>,

    /// Viewport class to resolve for.
    #[arg(long, value_enum, default_value_t = Viewport::Desktop)]
    pub device: Viewport,

    /// Shell events to apply before planning, as a RON list,
    /// e.g. `[toggle_pin(left_side), route_changed("/teams")]`.
    #[arg(long, value_name = "RON")]
    pub events: Option<String>,

    /// Theme id whose hints form the theme layer. Defaults to the resolved main theme.
    #[arg(long, value_name = "ID")]
    pub theme: Option<String>,

    /// Emit compact JSON instead of pretty-printed.
    #[arg(long)]
    pub compact: bool,
}

/// Arguments for the `check` subcommand.
#[derive(Args, Debug, Clone)]
pub struct CheckArgs {
    /// Layer files to validate.
    #[arg(value_name = "PATH", num_args = 1..)]
    pub paths: Vec<PathBuf>,
}

/// Arguments for the `theme` subcommand.
#[derive(Args, Debug, Clone)]
pub struct ThemeArgs {
    /// Theme id. Unknown ids resolve to the default theme.
    #[arg(value_name = "ID")]
    pub id: String,
}
