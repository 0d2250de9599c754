//! Error types for the geometry adapter.

use thiserror::Error;

/// Result type alias for geometry operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while constructing or transforming polygons.
#[derive(Debug, Error)]
pub enum Error {
    /// The polygon ring does not describe a usable simple polygon.
    #[error("invalid polygon: {0}")]
    InvalidPolygon(String),
}
