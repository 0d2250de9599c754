//! # Polynest Geometry Adapter
//!
//! Polygon primitives consumed by the `polynest-core` optimization engine.
//!
//! The engine treats this crate as a narrow capability surface:
//!
//! - [`Shape`]: immutable simple polygon with rigid-transform application
//! - [`polygon`]: signed area, centroid, convex hull, area-with-holes
//! - [`overlay`]: boolean-op backed polygon intersection (via `i_overlay`)
//!
//! ## Feature Flags
//!
//! - `serde`: Enable serialization/deserialization support

pub mod error;
pub mod overlay;
pub mod polygon;
pub mod shape;

pub use error::{Error, Result};
pub use overlay::{intersection_area, intersection_regions};
pub use polygon::{
    area, area_with_holes, bbox_center, bounding_box, centroid, convex_hull, rotate_about,
    signed_area, translate,
};
pub use shape::Shape;
