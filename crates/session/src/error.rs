use thiserror::Error;

/// Errors surfaced by session operations.
#[derive(Debug, Error)]
pub enum Error {
    /// Registry rejected a registration.
    #[error(transparent)]
    Store(#[from] store::StoreError),

    /// Settings could not be loaded or saved.
    #[error(transparent)]
    Config(#[from] config::Error),

    /// The layout shell rejected an event.
    #[error(transparent)]
    Layout(#[from] layout::LayoutError),
}

/// Convenience result type for session operations.
pub type Result<T> = std::result::Result<T, Error>;
