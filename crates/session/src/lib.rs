//! A shell session wires the state store, the settings resolver, the layout
//! shell and theme selection together for one user.
//!
//! Inputs (route changes, viewport crossings, theme switches, preference
//! saves) update the ranked settings layers; every change that alters the
//! resolved settings is pushed to the layout shell and mirrored into the
//! store's settings slice.

mod error;
mod session;
pub mod slice;

pub use error::{Error, Result};
pub use session::{Session, ShellFeature};
