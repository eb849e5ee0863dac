//! Galaxy error types.

use crate::record::StarId;

/// Errors raised while building or mutating a [`Galaxy`](crate::Galaxy).
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum GalaxyError {
    /// A store record lacks a usable position component.
    #[error("star record {id} has a missing or non-finite {field}")]
    MalformedRecord {
        /// Identifier of the rejected record.
        id: StarId,
        /// Name of the offending field.
        field: &'static str,
    },

    /// A custom star with this identifier is already indexed.
    #[error("custom star {0} is already part of the galaxy")]
    DuplicateStar(StarId),
}
