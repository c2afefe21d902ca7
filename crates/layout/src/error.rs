use thiserror::Error;

use crate::PanelId;

/// Error type for layout shell handling
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[allow(missing_docs)]
pub enum LayoutError {
    /// Layout style id that names no variant
    #[error("Unknown layout style '{id}'")]
    UnknownVariant { id: String },

    /// Navbar style id that names no navbar variant
    #[error("Unknown navbar style '{id}'")]
    UnknownNavbarStyle { id: String },

    /// Pin requested on a panel that cannot be pinned
    #[error("Panel '{panel}' cannot be pinned")]
    PinUnsupported { panel: PanelId },
}
