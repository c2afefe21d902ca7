//! The `themes` and `theme` subcommands.

use config::themes::ThemeCatalogue;

use crate::{cli::ThemeArgs, error::Result};

/// Print every built-in theme id, marking the default.
pub fn list() -> Result<()> {
    let catalogue = ThemeCatalogue::builtin();
    for id in catalogue.list() {
        if id == catalogue.default_id() {
            println!("{id} (default)");
        } else {
            println!("{id}");
        }
    }
    Ok(())
}

/// Print the region assignment for a theme id.
pub fn show(args: &ThemeArgs) -> Result<()> {
    let set = ThemeCatalogue::builtin().resolve_theme_set(&args.id);
    println!("{}", serde_json::to_string_pretty(&set)?);
    Ok(())
}
