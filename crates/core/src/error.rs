//! Error types for the optimization engine.

use thiserror::Error;

/// Result type alias for engine operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while configuring or running the optimizer.
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration contract violation (empty shape set, malformed genome
    /// length, invalid GA parameters).
    #[error("configuration error: {0}")]
    Config(String),

    /// Geometry adapter failure, propagated rather than folded into a
    /// sentinel cost.
    #[error("geometry error: {0}")]
    Geometry(#[from] polynest_geom::Error),

    /// Computation cancelled through the cancel handle.
    #[error("computation cancelled")]
    Cancelled,
}
