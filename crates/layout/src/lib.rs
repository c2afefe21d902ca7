//! Layout shell: selects the structural variant and navbar sub-variant from
//! resolved settings and tracks the transient state of side panels.
//!
//! [`transition`] is the pure state machine; [`Shell`] wraps it with
//! validation and logging; [`RenderPlan`] is what the page shell consumes.

mod error;
mod panel;
mod plan;
mod shell;
mod state;
mod variant;

pub use error::LayoutError;
pub use panel::{PanelId, PanelMode};
pub use plan::RenderPlan;
pub use shell::Shell;
pub use state::{ShellEvent, ShellState, transition};
pub use variant::{NavbarVariant, Variant};
