//! Shape loading seam.
//!
//! Format parsers (DXF, SVG, test fixtures) live outside the engine; the
//! engine consumes an already-materialized ordered shape list through this
//! trait.

use polynest_geom::Shape;

use crate::Result;

/// A source of input shapes.
///
/// Implementations own whatever parsing their format requires and must
/// yield simple polygons; [`Shape`] construction already enforces the
/// 3-distinct-vertex floor, so degenerate input fails at the source rather
/// than inside the optimizer.
pub trait ShapeSource {
    /// Materializes the ordered shape list.
    fn load_shapes(&self) -> Result<Vec<Shape>>;
}

impl ShapeSource for Vec<Shape> {
    fn load_shapes(&self) -> Result<Vec<Shape>> {
        Ok(self.clone())
    }
}

impl ShapeSource for &[Shape] {
    fn load_shapes(&self) -> Result<Vec<Shape>> {
        Ok(self.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vec_source_round_trips() {
        let shapes = vec![Shape::rectangle(1.0, 2.0).unwrap()];
        let loaded = shapes.load_shapes().unwrap();
        assert_eq!(loaded, shapes);
    }
}
