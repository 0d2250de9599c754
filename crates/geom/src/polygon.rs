//! Polygon ring primitives.
//!
//! Rings are ordered vertex sequences `&[(f64, f64)]` with an implicit
//! closing edge from the last vertex back to the first.

/// Computes the signed area of a ring (shoelace formula).
///
/// Positive for counter-clockwise winding, negative for clockwise.
pub fn signed_area(ring: &[(f64, f64)]) -> f64 {
    if ring.len() < 3 {
        return 0.0;
    }

    let mut sum = 0.0;
    for i in 0..ring.len() {
        let (x1, y1) = ring[i];
        let (x2, y2) = ring[(i + 1) % ring.len()];
        sum += x1 * y2 - x2 * y1;
    }
    sum / 2.0
}

/// Computes the absolute area of a ring.
pub fn area(ring: &[(f64, f64)]) -> f64 {
    signed_area(ring).abs()
}

/// Computes the area of a polygon bounded by `outer` with each ring in
/// `holes` treated as an interior hole.
///
/// The result is the outer area minus the summed hole areas, floored at
/// zero. Holes that overlap each other are each subtracted in full.
pub fn area_with_holes(outer: &[(f64, f64)], holes: &[Vec<(f64, f64)>]) -> f64 {
    let hole_area: f64 = holes.iter().map(|h| area(h)).sum();
    (area(outer) - hole_area).max(0.0)
}

/// Computes the centroid (arithmetic mean of vertices) of a ring.
///
/// Returns `(0.0, 0.0)` for an empty ring.
pub fn centroid(ring: &[(f64, f64)]) -> (f64, f64) {
    if ring.is_empty() {
        return (0.0, 0.0);
    }

    let sum: (f64, f64) = ring
        .iter()
        .fold((0.0, 0.0), |acc, &(x, y)| (acc.0 + x, acc.1 + y));
    let n = ring.len() as f64;
    (sum.0 / n, sum.1 / n)
}

/// Computes the axis-aligned bounding box of a ring.
///
/// Returns `(min_x, min_y, max_x, max_y)`; all zeros for an empty ring.
pub fn bounding_box(ring: &[(f64, f64)]) -> (f64, f64, f64, f64) {
    if ring.is_empty() {
        return (0.0, 0.0, 0.0, 0.0);
    }

    let mut min_x = f64::INFINITY;
    let mut min_y = f64::INFINITY;
    let mut max_x = f64::NEG_INFINITY;
    let mut max_y = f64::NEG_INFINITY;

    for &(x, y) in ring {
        min_x = min_x.min(x);
        min_y = min_y.min(y);
        max_x = max_x.max(x);
        max_y = max_y.max(y);
    }

    (min_x, min_y, max_x, max_y)
}

/// Center of the axis-aligned bounding box of a ring.
pub fn bbox_center(ring: &[(f64, f64)]) -> (f64, f64) {
    let (min_x, min_y, max_x, max_y) = bounding_box(ring);
    ((min_x + max_x) / 2.0, (min_y + max_y) / 2.0)
}

/// Translates every vertex of a ring by `(dx, dy)`.
pub fn translate(ring: &[(f64, f64)], dx: f64, dy: f64) -> Vec<(f64, f64)> {
    ring.iter().map(|&(x, y)| (x + dx, y + dy)).collect()
}

/// Rotates every vertex of a ring by `angle` radians around `origin`.
pub fn rotate_about(ring: &[(f64, f64)], angle: f64, origin: (f64, f64)) -> Vec<(f64, f64)> {
    if angle.abs() < 1e-12 {
        return ring.to_vec();
    }

    let (ox, oy) = origin;
    let cos_a = angle.cos();
    let sin_a = angle.sin();

    ring.iter()
        .map(|&(x, y)| {
            let dx = x - ox;
            let dy = y - oy;
            (ox + dx * cos_a - dy * sin_a, oy + dx * sin_a + dy * cos_a)
        })
        .collect()
}

/// Computes the convex hull of a point set (Andrew's monotone chain).
///
/// Returns the hull vertices in counter-clockwise order without a repeated
/// closing point. Degenerate inputs (fewer than 3 distinct points, or all
/// points collinear) return fewer than 3 vertices.
pub fn convex_hull(points: &[(f64, f64)]) -> Vec<(f64, f64)> {
    let mut pts: Vec<(f64, f64)> = points.to_vec();
    pts.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    pts.dedup();

    if pts.len() < 3 {
        return pts;
    }

    fn cross(o: (f64, f64), a: (f64, f64), b: (f64, f64)) -> f64 {
        (a.0 - o.0) * (b.1 - o.1) - (a.1 - o.1) * (b.0 - o.0)
    }

    let mut lower: Vec<(f64, f64)> = Vec::with_capacity(pts.len());
    for &p in &pts {
        while lower.len() >= 2 && cross(lower[lower.len() - 2], lower[lower.len() - 1], p) <= 0.0 {
            lower.pop();
        }
        lower.push(p);
    }

    let mut upper: Vec<(f64, f64)> = Vec::with_capacity(pts.len());
    for &p in pts.iter().rev() {
        while upper.len() >= 2 && cross(upper[upper.len() - 2], upper[upper.len() - 1], p) <= 0.0 {
            upper.pop();
        }
        upper.push(p);
    }

    lower.pop();
    upper.pop();
    lower.extend(upper);
    lower
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn unit_square() -> Vec<(f64, f64)> {
        vec![(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)]
    }

    #[test]
    fn test_signed_area_winding() {
        let ccw = unit_square();
        let cw: Vec<_> = ccw.iter().rev().copied().collect();

        assert_relative_eq!(signed_area(&ccw), 1.0);
        assert_relative_eq!(signed_area(&cw), -1.0);
        assert_relative_eq!(area(&cw), 1.0);
    }

    #[test]
    fn test_area_degenerate() {
        assert_relative_eq!(area(&[]), 0.0);
        assert_relative_eq!(area(&[(0.0, 0.0), (1.0, 1.0)]), 0.0);
        // Collinear ring has zero area but must not panic.
        assert_relative_eq!(area(&[(0.0, 0.0), (1.0, 0.0), (2.0, 0.0)]), 0.0);
    }

    #[test]
    fn test_area_with_holes() {
        let outer = vec![(0.0, 0.0), (4.0, 0.0), (4.0, 4.0), (0.0, 4.0)];
        let hole = vec![(1.0, 1.0), (2.0, 1.0), (2.0, 2.0), (1.0, 2.0)];

        assert_relative_eq!(area_with_holes(&outer, &[hole.clone()]), 15.0);
        // Holes larger than the outer ring floor the result at zero.
        assert_relative_eq!(area_with_holes(&hole, &[outer]), 0.0);
    }

    #[test]
    fn test_centroid_and_bbox() {
        let square = unit_square();
        let (cx, cy) = centroid(&square);
        assert_relative_eq!(cx, 0.5);
        assert_relative_eq!(cy, 0.5);

        let (min_x, min_y, max_x, max_y) = bounding_box(&square);
        assert_relative_eq!(min_x, 0.0);
        assert_relative_eq!(min_y, 0.0);
        assert_relative_eq!(max_x, 1.0);
        assert_relative_eq!(max_y, 1.0);
    }

    #[test]
    fn test_translate_rotate() {
        let square = unit_square();
        let moved = translate(&square, 3.0, -2.0);
        assert_relative_eq!(moved[0].0, 3.0);
        assert_relative_eq!(moved[0].1, -2.0);

        // A quarter turn around the bbox center maps the square onto itself.
        let turned = rotate_about(&square, std::f64::consts::FRAC_PI_2, bbox_center(&square));
        assert_relative_eq!(area(&turned), 1.0, epsilon = 1e-12);
        let (min_x, min_y, max_x, max_y) = bounding_box(&turned);
        assert_relative_eq!(min_x, 0.0, epsilon = 1e-12);
        assert_relative_eq!(min_y, 0.0, epsilon = 1e-12);
        assert_relative_eq!(max_x, 1.0, epsilon = 1e-12);
        assert_relative_eq!(max_y, 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_convex_hull_square_with_interior_point() {
        let mut points = unit_square();
        points.push((0.5, 0.5));

        let hull = convex_hull(&points);
        assert_eq!(hull.len(), 4);
        assert_relative_eq!(signed_area(&hull), 1.0);
    }

    #[test]
    fn test_convex_hull_collinear() {
        let points = vec![(0.0, 0.0), (1.0, 0.0), (2.0, 0.0), (3.0, 0.0)];
        let hull = convex_hull(&points);
        assert!(hull.len() < 3);
    }
}
