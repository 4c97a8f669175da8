//! Error types for the core module.

use thiserror::Error;

/// Result type alias for core operations.
pub type CoreResult<T> = Result<T, CoreError>;

/// Errors that can occur while deriving views.
///
/// The public derivation functions never return these; they fall back to a
/// plain rendering instead. Only the strict formatting entry points surface
/// them.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    #[error("Unsupported currency code: {code:?}")]
    Format { code: String },
}
