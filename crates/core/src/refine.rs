//! Greedy coordinate-descent refinement.
//!
//! Polishes a single genome one gene at a time: probe both directions at
//! the current step size, keep taking strictly improving steps, halve the
//! step when neither direction helps, and move to the next gene once the
//! step falls below the threshold. Each probe costs two full fitness
//! evaluations, which is why the loop only ever refines the champion.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::fitness::Evaluator;
use crate::genome::Genome;
use crate::Result;

/// Coordinate-descent refiner over a fixed evaluator.
pub struct Refiner<'a> {
    evaluator: &'a Evaluator,
    initial_step: f64,
    min_step: f64,
    cancelled: Option<Arc<AtomicBool>>,
}

impl<'a> Refiner<'a> {
    /// Creates a refiner with the default step sizes (1.0 down to 0.1).
    pub fn new(evaluator: &'a Evaluator) -> Self {
        Self {
            evaluator,
            initial_step: 1.0,
            min_step: 0.1,
            cancelled: None,
        }
    }

    /// Sets the initial and minimum step sizes.
    pub fn with_steps(mut self, initial: f64, min: f64) -> Self {
        self.initial_step = initial;
        self.min_step = min;
        self
    }

    /// Attaches a cancellation handle, checked between gene indices.
    pub fn with_cancel(mut self, handle: Arc<AtomicBool>) -> Self {
        self.cancelled = Some(handle);
        self
    }

    fn is_cancelled(&self) -> bool {
        self.cancelled
            .as_ref()
            .map(|flag| flag.load(Ordering::Relaxed))
            .unwrap_or(false)
    }

    /// Refines a genome; the result never costs more than the input.
    ///
    /// The returned genome carries a valid fitness cache.
    pub fn refine(&self, genome: &Genome) -> Result<Genome> {
        let mut current = genome.clone();
        let mut current_cost = match current.fitness() {
            Some(cost) => cost,
            None => self.evaluator.evaluate_into(&mut current)?,
        };

        for index in 0..current.len() {
            if self.is_cancelled() {
                break;
            }

            let mut step = self.initial_step;
            loop {
                let mut up = current.clone();
                up.set_gene(index, up.gene(index) + step);
                let up_cost = self.evaluator.evaluate_into(&mut up)?;

                let mut down = current.clone();
                down.set_gene(index, down.gene(index) - step);
                let down_cost = self.evaluator.evaluate_into(&mut down)?;

                // Strict improvement: retry the same gene at the same step.
                if up_cost < current_cost {
                    current = up;
                    current_cost = up_cost;
                    continue;
                }
                if down_cost < current_cost {
                    current = down;
                    current_cost = down_cost;
                    continue;
                }

                if step < self.min_step {
                    break;
                }
                step /= 2.0;
            }
        }

        Ok(current)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use polynest_geom::Shape;

    fn two_squares_evaluator() -> Evaluator {
        let shapes = vec![
            Shape::rectangle(1.0, 1.0).unwrap(),
            Shape::rectangle(1.0, 1.0).unwrap(),
        ];
        Evaluator::new(shapes).unwrap()
    }

    #[test]
    fn test_refine_is_monotonic() {
        let evaluator = two_squares_evaluator();
        let refiner = Refiner::new(&evaluator);

        // Heavily overlapping start.
        let genome = Genome::from_genes(vec![0.0, 0.0, 0.0, 0.3, 0.2, 0.0]);
        let before = evaluator.cost(&genome).unwrap();

        let refined = refiner.refine(&genome).unwrap();
        let after = refined.fitness().unwrap();
        assert!(after <= before, "refine worsened cost: {} -> {}", before, after);
    }

    #[test]
    fn test_refine_resolves_overlap() {
        let evaluator = two_squares_evaluator();
        let refiner = Refiner::new(&evaluator);

        let genome = Genome::from_genes(vec![0.0, 0.0, 0.0, 0.5, 0.0, 0.0]);
        let refined = refiner.refine(&genome).unwrap();

        // The overlap penalty dominates; a half-overlapping pair refines to
        // an overlap-free placement.
        let placed = evaluator.transformed_shapes(&refined).unwrap();
        let overlap =
            polynest_geom::intersection_area(placed[0].exterior(), placed[1].exterior());
        assert!(overlap < 1e-6, "residual overlap {}", overlap);
    }

    #[test]
    fn test_refine_keeps_optimum_fixed() {
        let evaluator = two_squares_evaluator();
        let refiner = Refiner::new(&evaluator);

        // Two unit squares side by side: zero overlap and zero slack.
        let genome = Genome::from_genes(vec![0.0, 0.0, 0.0, 1.0, 0.0, 0.0]);
        let refined = refiner.refine(&genome).unwrap();
        assert!(refined.fitness().unwrap() <= evaluator.cost(&genome).unwrap() + 1e-12);
    }

    #[test]
    fn test_refine_respects_cancellation() {
        let evaluator = two_squares_evaluator();
        let cancelled = Arc::new(AtomicBool::new(true));
        let refiner = Refiner::new(&evaluator).with_cancel(cancelled);

        let genome = Genome::from_genes(vec![0.0, 0.0, 0.0, 0.5, 0.0, 0.0]);
        let refined = refiner.refine(&genome).unwrap();

        // Already cancelled: no gene is touched.
        assert_eq!(refined.genes(), genome.genes());
    }
}
