//! # Polynest Core
//!
//! Genetic-algorithm engine for 2D nesting: given a fixed set of rigid
//! simple polygons, search for per-shape rigid transforms `(dx, dy, theta)`
//! that pack the shapes tightly while minimizing mutual overlap.
//!
//! ## Core Components
//!
//! - [`Genome`] / [`Population`]: candidate encoding with cached fitness
//! - [`Evaluator`]: overlap + hull-slack cost function
//! - [`GaRunner`]: generational loop with restarts and a hall of fame
//! - [`Refiner`]: greedy coordinate descent for the champion
//!
//! The loop is an anytime optimizer: it runs until cancelled (or for a
//! configured number of cycles) and reports progress through an observer
//! callback.
//!
//! ## Feature Flags
//!
//! - `serde`: Enable serialization/deserialization support

pub mod config;
pub mod error;
pub mod fitness;
pub mod ga;
pub mod genome;
pub mod loader;
pub mod ops;
pub mod refine;
pub mod stats;

// Re-exports
pub use config::{GaConfig, Replacement, Restart};
pub use error::{Error, Result};
pub use fitness::{Evaluator, OVERLAP_WEIGHT};
pub use ga::{GaResult, GaRunner};
pub use genome::{Genome, Population, GENES_PER_SHAPE};
pub use loader::ShapeSource;
pub use refine::Refiner;
pub use stats::{GenerationStats, Observer, Snapshot};
