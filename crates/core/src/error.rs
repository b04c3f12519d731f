//! Crate-level error types.

use thiserror::Error;

/// Errors surfaced by the fireworks simulation core.
///
/// Normal frame-to-frame operation is infallible; the validated
/// boundaries are life-table and display-configuration construction.
/// Lifecycle misuse (releasing a visual twice) is reported as
/// [`FireworksError::InvalidState`] so callers can log and continue
/// instead of crashing the host loop.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FireworksError {
    /// A life table or display parameter failed validation.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// A lifecycle contract was violated, e.g. a duplicate resource
    /// release.
    #[error("invalid state: {0}")]
    InvalidState(&'static str),
}
