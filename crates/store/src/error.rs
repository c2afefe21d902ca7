use thiserror::Error;

/// Errors reported by the store registries.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// A slice name is already bound to a different reducer (or state type).
    ///
    /// The store keeps the original reducer; the conflicting feature must be fixed.
    #[error("slice '{name}' is already registered with {existing}; refusing {attempted}")]
    Conflict {
        /// Slice name both registrations used.
        name: String,
        /// Type name of the reducer that stays active.
        existing: &'static str,
        /// Type name of the rejected reducer.
        attempted: &'static str,
    },
}
