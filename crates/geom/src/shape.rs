//! Immutable simple polygon shapes.

use crate::polygon;
use crate::{Error, Result};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// An immutable simple polygon.
///
/// The exterior ring is stored open (no repeated closing vertex); the edge
/// from the last vertex back to the first is implicit. Shapes are validated
/// on construction and never mutated afterwards; transforms return new
/// shapes.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Shape {
    exterior: Vec<(f64, f64)>,
}

impl Shape {
    /// Creates a shape from an exterior ring.
    ///
    /// A repeated closing vertex is dropped. The remaining ring must contain
    /// at least 3 distinct vertices.
    pub fn new(mut exterior: Vec<(f64, f64)>) -> Result<Self> {
        if exterior.len() > 1 && exterior.first() == exterior.last() {
            exterior.pop();
        }

        let mut distinct = exterior.clone();
        distinct.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
        distinct.dedup();
        if distinct.len() < 3 {
            return Err(Error::InvalidPolygon(format!(
                "ring has {} distinct vertices, need at least 3",
                distinct.len()
            )));
        }

        Ok(Self { exterior })
    }

    /// Creates an axis-aligned `width` x `height` rectangle at the origin.
    pub fn rectangle(width: f64, height: f64) -> Result<Self> {
        Self::new(vec![
            (0.0, 0.0),
            (width, 0.0),
            (width, height),
            (0.0, height),
        ])
    }

    /// The exterior ring, open form.
    pub fn exterior(&self) -> &[(f64, f64)] {
        &self.exterior
    }

    /// Number of vertices in the exterior ring.
    pub fn vertex_count(&self) -> usize {
        self.exterior.len()
    }

    /// Absolute area of the shape.
    pub fn area(&self) -> f64 {
        polygon::area(&self.exterior)
    }

    /// Vertex centroid of the shape.
    pub fn centroid(&self) -> (f64, f64) {
        polygon::centroid(&self.exterior)
    }

    /// Axis-aligned bounding box `(min_x, min_y, max_x, max_y)`.
    pub fn aabb(&self) -> (f64, f64, f64, f64) {
        polygon::bounding_box(&self.exterior)
    }

    /// Returns the shape translated by `(dx, dy)`.
    pub fn translated(&self, dx: f64, dy: f64) -> Shape {
        Shape {
            exterior: polygon::translate(&self.exterior, dx, dy),
        }
    }

    /// Returns the shape rotated by `angle` radians about its own bounding
    /// box center.
    pub fn rotated(&self, angle: f64) -> Shape {
        Shape {
            exterior: polygon::rotate_about(
                &self.exterior,
                angle,
                polygon::bbox_center(&self.exterior),
            ),
        }
    }

    /// Applies a rigid placement transform: translate by `(dx, dy)`, then
    /// rotate the translated polygon by `angle` radians in place (about the
    /// translated polygon's bounding box center).
    pub fn transformed(&self, dx: f64, dy: f64, angle: f64) -> Shape {
        self.translated(dx, dy).rotated(angle)
    }
}
