//! Error types for harvesting operations.
//!
//! This module provides the [`HarvestError`] type for all adaptor operations
//! and the [`Result`] convenience type.
//!
//! An invalid format pattern is deliberately absent from this taxonomy: it is
//! replaced by the default pattern (see [`crate::format_matcher`]) and never
//! reported.

use thiserror::Error;

/// Boxed error raised by a collaborator (record source, parser, reader).
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Error type for all harvesting operations.
#[derive(Error, Debug)]
pub enum HarvestError {
    /// A resource was requested without a prior successful `has_next`.
    ///
    /// This signals caller error, not an upstream failure.
    #[error("No elements available")]
    NoElementsAvailable,

    /// The record source failed while producing the next record.
    #[error("Record source error: {0}")]
    Source(#[source] BoxError),

    /// The record source failed while being released.
    #[error("Failed to close record source: {0}")]
    Close(#[source] BoxError),

    /// IO error from the underlying feed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid harvest configuration.
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// Configuration document could not be decoded.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl HarvestError {
    /// Wrap an upstream read or parse failure.
    pub fn upstream<E>(err: E) -> Self
    where
        E: Into<BoxError>,
    {
        HarvestError::Source(err.into())
    }

    /// Wrap a failure raised while releasing the record source.
    pub fn close_failed<E>(err: E) -> Self
    where
        E: Into<BoxError>,
    {
        HarvestError::Close(err.into())
    }

    /// Whether this error reports misuse of the iteration protocol rather
    /// than a failure of the source.
    #[must_use]
    pub fn is_protocol_misuse(&self) -> bool {
        matches!(self, HarvestError::NoElementsAvailable)
    }
}

/// Convenience type alias for [`std::result::Result`] with [`HarvestError`].
pub type Result<T> = std::result::Result<T, HarvestError>;
