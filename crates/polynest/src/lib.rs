//! # Polynest
//!
//! GA-based 2D nesting optimizer: searches per-shape rigid transforms that
//! pack a fixed set of simple polygons tightly while minimizing mutual
//! overlap.
//!
//! ## Quick Start
//!
//! ```rust
//! use polynest::{Evaluator, GaConfig, GaRunner, Shape};
//!
//! let shapes = vec![
//!     Shape::rectangle(2.0, 1.0)?,
//!     Shape::rectangle(1.0, 1.0)?,
//!     Shape::rectangle(1.0, 3.0)?,
//! ];
//!
//! let config = GaConfig::default()
//!     .with_population_size(30)
//!     .with_generations_per_cycle(25)
//!     .with_max_cycles(1);
//!
//! let runner = GaRunner::new(config, Evaluator::new(shapes)?)?;
//! let result = runner.run()?;
//!
//! let placed = runner.evaluator().transformed_shapes(&result.best)?;
//! assert_eq!(placed.len(), 3);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Feature Flags
//!
//! - `serde`: Serialization support

/// Optimization engine.
pub use polynest_core as core;

/// Geometry adapter.
pub use polynest_geom as geom;

// Re-export commonly used types at root level
pub use polynest_core::{
    Error, Evaluator, GaConfig, GaResult, GaRunner, GenerationStats, Genome, Population, Refiner,
    Replacement, Restart, Result, ShapeSource, Snapshot,
};
pub use polynest_geom::Shape;
