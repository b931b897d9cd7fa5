//! Errors raised by collection sources.

use crate::update::IndexPath;

/// Error type for source mutations.
///
/// Lookups and diffing never fail; only mutations addressed at coordinates
/// that do not exist are rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum SourceError {
    /// The item to move does not exist.
    #[error("no item at source position {at}")]
    SourceOutOfRange { at: IndexPath },

    /// The destination is not a valid insertion point.
    #[error("cannot insert at destination position {at}")]
    DestinationOutOfRange { at: IndexPath },
}

/// Result alias for source mutations.
pub type Result<T, E = SourceError> = std::result::Result<T, E>;
