//! Polygon intersection via boolean overlay operations.
//!
//! Thin adapter over the `i_overlay` clipping library. Degenerate inputs
//! (rings with fewer than 3 vertices or zero area) produce empty results
//! rather than errors.

use i_overlay::core::fill_rule::FillRule;
use i_overlay::core::overlay_rule::OverlayRule;
use i_overlay::float::single::SingleFloatOverlay;

use crate::polygon;

fn is_degenerate(ring: &[(f64, f64)]) -> bool {
    ring.len() < 3 || polygon::area(ring) == 0.0
}

fn to_contour(ring: &[(f64, f64)]) -> Vec<[f64; 2]> {
    ring.iter().map(|&(x, y)| [x, y]).collect()
}

/// Computes the intersection of two rings as a set of shapes.
///
/// Each returned shape is a list of contours where the first contour is the
/// outer boundary and any further contours are holes.
fn intersect(a: &[(f64, f64)], b: &[(f64, f64)]) -> Vec<Vec<Vec<(f64, f64)>>> {
    if is_degenerate(a) || is_degenerate(b) {
        return Vec::new();
    }

    let subj: Vec<Vec<[f64; 2]>> = vec![to_contour(a)];
    let clip: Vec<[f64; 2]> = to_contour(b);

    let shapes = subj.overlay(&[clip], OverlayRule::Intersect, FillRule::NonZero);

    shapes
        .into_iter()
        .map(|shape| {
            shape
                .into_iter()
                .filter(|contour| contour.len() >= 3)
                .map(|contour| contour.into_iter().map(|[x, y]| (x, y)).collect())
                .collect()
        })
        .collect()
}

/// Computes the area of the intersection of two rings.
///
/// Always non-negative; zero for disjoint or degenerate inputs.
pub fn intersection_area(a: &[(f64, f64)], b: &[(f64, f64)]) -> f64 {
    intersect(a, b)
        .iter()
        .map(|contours| {
            // First contour is the outer boundary, the rest are holes.
            let outer = contours.first().map(|c| polygon::area(c)).unwrap_or(0.0);
            let holes: f64 = contours.iter().skip(1).map(|c| polygon::area(c)).sum();
            (outer - holes).max(0.0)
        })
        .sum()
}

/// Computes the outer boundaries of the intersection of two rings.
///
/// Intended for overlap highlighting; holes in the intersection are
/// omitted.
pub fn intersection_regions(a: &[(f64, f64)], b: &[(f64, f64)]) -> Vec<Vec<(f64, f64)>> {
    intersect(a, b)
        .into_iter()
        .filter_map(|mut contours| {
            if contours.is_empty() {
                None
            } else {
                Some(contours.swap_remove(0))
            }
        })
        .collect()
}
