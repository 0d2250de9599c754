//! Fitness evaluation for placement genomes.
//!
//! The cost of a genome combines two penalties over the transformed shape
//! set: total pairwise overlap area (weighted by [`OVERLAP_WEIGHT`]) and the
//! unused area of the packing's convex hull. Lower is better.

use polynest_geom::{overlay, polygon, Shape};

use crate::genome::{Genome, GENES_PER_SHAPE};
use crate::{Error, Result};

/// Weight of the overlap term relative to the bounding-area term.
///
/// Makes overlap strongly dominant: any reduction in overlap beats any
/// reduction in hull area, so among overlap-free candidates the search
/// optimizes for compactness alone.
pub const OVERLAP_WEIGHT: f64 = 10.0;

/// Maps genomes to placement costs over a fixed shape set.
///
/// The shape set is supplied once at construction and shared immutably by
/// every evaluation, so batches can run in parallel without locks.
pub struct Evaluator {
    shapes: Vec<Shape>,
}

impl Evaluator {
    /// Creates an evaluator over the given shape set.
    ///
    /// An empty shape set is a configuration error.
    pub fn new(shapes: Vec<Shape>) -> Result<Self> {
        if shapes.is_empty() {
            return Err(Error::Config("shape set is empty".into()));
        }
        Ok(Self { shapes })
    }

    /// The base (untransformed) shape set.
    pub fn shapes(&self) -> &[Shape] {
        &self.shapes
    }

    /// Number of shapes being placed.
    pub fn num_shapes(&self) -> usize {
        self.shapes.len()
    }

    fn check_genome(&self, genome: &Genome) -> Result<()> {
        let expected = self.shapes.len() * GENES_PER_SHAPE;
        if genome.len() != expected {
            return Err(Error::Config(format!(
                "genome has {} genes, expected {} for {} shapes",
                genome.len(),
                expected,
                self.shapes.len()
            )));
        }
        Ok(())
    }

    /// The shape set with each genome transform applied, in shape order.
    pub fn transformed_shapes(&self, genome: &Genome) -> Result<Vec<Shape>> {
        self.check_genome(genome)?;
        Ok(self
            .shapes
            .iter()
            .enumerate()
            .map(|(index, shape)| {
                let (dx, dy, theta) = genome.transform(index);
                shape.transformed(dx, dy, theta)
            })
            .collect())
    }

    /// Computes the placement cost of a genome without touching its cache.
    ///
    /// `cost = OVERLAP_WEIGHT * overlap + bound_area`, where `overlap` is
    /// the symmetric sum of pairwise intersection areas (each unordered
    /// pair contributes both orderings) and `bound_area` is the convex hull
    /// area of the placement minus the summed shape areas, floored at zero.
    pub fn cost(&self, genome: &Genome) -> Result<f64> {
        let placed = self.transformed_shapes(genome)?;

        let mut overlap = 0.0;
        for i in 0..placed.len() {
            for j in (i + 1)..placed.len() {
                // Both (i, j) and (j, i) are counted, doubling the penalty.
                overlap +=
                    2.0 * overlay::intersection_area(placed[i].exterior(), placed[j].exterior());
            }
        }

        Ok(OVERLAP_WEIGHT * overlap + Self::bound_area(&placed))
    }

    /// Evaluates a genome and writes its fitness cache.
    pub fn evaluate_into(&self, genome: &mut Genome) -> Result<f64> {
        let cost = self.cost(genome)?;
        genome.set_fitness(cost);
        Ok(cost)
    }

    /// Convex hull outline of the transformed shape set.
    ///
    /// Fewer than 3 vertices are returned for degenerate placements.
    pub fn packed_hull(&self, genome: &Genome) -> Result<Vec<(f64, f64)>> {
        let placed = self.transformed_shapes(genome)?;
        Ok(Self::hull_of(&placed))
    }

    /// Pairwise overlap regions of the transformed shape set, for overlap
    /// highlighting. Each unordered pair contributes its intersection
    /// boundaries once.
    pub fn overlap_regions(&self, genome: &Genome) -> Result<Vec<Vec<(f64, f64)>>> {
        let placed = self.transformed_shapes(genome)?;

        let mut regions = Vec::new();
        for i in 0..placed.len() {
            for j in (i + 1)..placed.len() {
                regions.extend(overlay::intersection_regions(
                    placed[i].exterior(),
                    placed[j].exterior(),
                ));
            }
        }
        Ok(regions)
    }

    fn hull_of(placed: &[Shape]) -> Vec<(f64, f64)> {
        let mut points = Vec::new();
        for shape in placed {
            points.extend_from_slice(shape.exterior());
        }
        polygon::convex_hull(&points)
    }

    fn bound_area(placed: &[Shape]) -> f64 {
        let hull = Self::hull_of(placed);
        if hull.len() < 3 {
            return 0.0;
        }

        let holes: Vec<Vec<(f64, f64)>> = placed
            .iter()
            .map(|shape| shape.exterior().to_vec())
            .collect();
        polygon::area_with_holes(&hull, &holes)
    }
}
