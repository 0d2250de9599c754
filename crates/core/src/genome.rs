//! Genome and population model.
//!
//! A genome encodes one candidate placement: three real-valued genes per
//! shape, `(dx, dy, theta)`, applied in shape order. The cached fitness is
//! the validity flag: `Some(cost)` iff the cache reflects the current gene
//! values; every mutating accessor clears it.

use rand::prelude::*;
use rand_distr::Normal;
use rayon::prelude::*;

use crate::fitness::Evaluator;
use crate::Result;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Number of genes per shape: `(dx, dy, theta)`.
pub const GENES_PER_SHAPE: usize = 3;

/// One candidate placement solution.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Genome {
    genes: Vec<f64>,
    fitness: Option<f64>,
}

impl Genome {
    /// Creates a genome from raw genes, with an invalid fitness cache.
    pub fn from_genes(genes: Vec<f64>) -> Self {
        Self {
            genes,
            fitness: None,
        }
    }

    /// Creates a random genome for `num_shapes` shapes, every gene drawn
    /// uniformly from `[init_min, init_max)`.
    pub fn random<R: Rng>(num_shapes: usize, init_min: f64, init_max: f64, rng: &mut R) -> Self {
        let genes = (0..num_shapes * GENES_PER_SHAPE)
            .map(|_| rng.gen_range(init_min..init_max))
            .collect();
        Self::from_genes(genes)
    }

    /// Total gene count (`3 * num_shapes`).
    pub fn len(&self) -> usize {
        self.genes.len()
    }

    /// Returns true if the genome has no genes.
    pub fn is_empty(&self) -> bool {
        self.genes.is_empty()
    }

    /// The raw gene slice.
    pub fn genes(&self) -> &[f64] {
        &self.genes
    }

    /// A single gene value.
    pub fn gene(&self, index: usize) -> f64 {
        self.genes[index]
    }

    /// Writes a single gene and invalidates the fitness cache.
    pub fn set_gene(&mut self, index: usize, value: f64) {
        self.genes[index] = value;
        self.fitness = None;
    }

    /// The `(dx, dy, theta)` transform encoded for `shape_index`.
    pub fn transform(&self, shape_index: usize) -> (f64, f64, f64) {
        let base = shape_index * GENES_PER_SHAPE;
        (self.genes[base], self.genes[base + 1], self.genes[base + 2])
    }

    /// Cached cost, if the cache is valid.
    pub fn fitness(&self) -> Option<f64> {
        self.fitness
    }

    /// Returns true if the fitness cache reflects the current genes.
    pub fn is_evaluated(&self) -> bool {
        self.fitness.is_some()
    }

    /// Writes the fitness cache.
    pub fn set_fitness(&mut self, cost: f64) {
        self.fitness = Some(cost);
    }

    /// Explicitly invalidates the fitness cache.
    pub fn invalidate(&mut self) {
        self.fitness = None;
    }

    /// Two-point crossover: swaps the gene segment between two random cut
    /// indices with `other`. Both fitness caches are invalidated.
    pub fn two_point_crossover<R: Rng>(&mut self, other: &mut Genome, rng: &mut R) {
        let n = self.genes.len().min(other.genes.len());
        if n >= 2 {
            let mut lo = rng.gen_range(0..n);
            let mut hi = rng.gen_range(0..n);
            if lo > hi {
                std::mem::swap(&mut lo, &mut hi);
            }
            for k in lo..=hi {
                std::mem::swap(&mut self.genes[k], &mut other.genes[k]);
            }
        }
        self.fitness = None;
        other.fitness = None;
    }

    /// Gaussian mutation: each gene independently receives an `N(0, sigma)`
    /// perturbation with probability `gene_rate`. The fitness cache is
    /// invalidated when any gene was written. Returns whether that happened.
    pub fn gaussian_mutate<R: Rng>(&mut self, sigma: f64, gene_rate: f64, rng: &mut R) -> bool {
        let normal = match Normal::new(0.0, sigma) {
            Ok(distribution) => distribution,
            // Non-positive or non-finite sigma mutates nothing.
            Err(_) => return false,
        };

        let mut changed = false;
        for gene in &mut self.genes {
            if rng.gen::<f64>() < gene_rate {
                *gene += rng.sample(normal);
                changed = true;
            }
        }

        if changed {
            self.fitness = None;
        }
        changed
    }
}

/// An ordered collection of genomes. Duplicates are permitted.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Population {
    individuals: Vec<Genome>,
}

impl Population {
    /// Wraps an existing genome list.
    pub fn new(individuals: Vec<Genome>) -> Self {
        Self { individuals }
    }

    /// Creates `size` random genomes for `num_shapes` shapes.
    pub fn random<R: Rng>(
        size: usize,
        num_shapes: usize,
        init_min: f64,
        init_max: f64,
        rng: &mut R,
    ) -> Self {
        let individuals = (0..size)
            .map(|_| Genome::random(num_shapes, init_min, init_max, rng))
            .collect();
        Self { individuals }
    }

    /// Number of genomes.
    pub fn len(&self) -> usize {
        self.individuals.len()
    }

    /// Returns true if the population holds no genomes.
    pub fn is_empty(&self) -> bool {
        self.individuals.is_empty()
    }

    /// Read access to the genomes.
    pub fn genomes(&self) -> &[Genome] {
        &self.individuals
    }

    /// Mutable access to the genomes.
    pub fn genomes_mut(&mut self) -> &mut [Genome] {
        &mut self.individuals
    }

    /// Consumes the population, yielding its genomes.
    pub fn into_genomes(self) -> Vec<Genome> {
        self.individuals
    }

    /// Appends genomes to the population.
    pub fn extend(&mut self, genomes: impl IntoIterator<Item = Genome>) {
        self.individuals.extend(genomes);
    }

    /// Evaluates every genome whose fitness cache is invalid, in parallel,
    /// writing results back in place.
    ///
    /// A no-op when nothing is stale. Duplicates are each evaluated
    /// independently; the first error aborts the batch.
    pub fn evaluate_stale(&mut self, evaluator: &Evaluator) -> Result<()> {
        self.individuals
            .par_iter_mut()
            .filter(|genome| !genome.is_evaluated())
            .map(|genome| evaluator.evaluate_into(genome).map(|_| ()))
            .collect::<Result<()>>()
    }

    /// Index and reference of the evaluated genome with the lowest cost.
    pub fn best(&self) -> Option<(usize, &Genome)> {
        self.individuals
            .iter()
            .enumerate()
            .filter(|(_, genome)| genome.is_evaluated())
            .min_by(|(_, a), (_, b)| {
                a.fitness()
                    .partial_cmp(&b.fitness())
                    .unwrap_or(std::cmp::Ordering::Equal)
            })
    }

    /// Sorts by ascending cost (unevaluated genomes last) and truncates to
    /// the best `size` genomes.
    pub fn truncate_to_best(&mut self, size: usize) {
        self.individuals.sort_by(|a, b| {
            let ca = a.fitness().unwrap_or(f64::INFINITY);
            let cb = b.fitness().unwrap_or(f64::INFINITY);
            ca.partial_cmp(&cb).unwrap_or(std::cmp::Ordering::Equal)
        });
        self.individuals.truncate(size);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seeded() -> StdRng {
        StdRng::seed_from_u64(7)
    }

    #[test]
    fn test_random_genome_length_and_range() {
        let mut rng = seeded();
        let genome = Genome::random(4, 0.0, 5.0, &mut rng);

        assert_eq!(genome.len(), 12);
        assert!(genome.genes().iter().all(|g| (0.0..5.0).contains(g)));
        assert!(!genome.is_evaluated());
    }

    #[test]
    fn test_set_gene_invalidates_cache() {
        let mut genome = Genome::from_genes(vec![0.0; 6]);
        genome.set_fitness(42.0);
        assert!(genome.is_evaluated());

        genome.set_gene(3, 1.5);
        assert!(!genome.is_evaluated());
        assert_eq!(genome.gene(3), 1.5);
    }

    #[test]
    fn test_crossover_preserves_length_and_invalidates() {
        let mut rng = seeded();
        let mut a = Genome::random(5, 0.0, 5.0, &mut rng);
        let mut b = Genome::random(5, 0.0, 5.0, &mut rng);
        a.set_fitness(1.0);
        b.set_fitness(2.0);

        for _ in 0..20 {
            a.two_point_crossover(&mut b, &mut rng);
            assert_eq!(a.len(), 15);
            assert_eq!(b.len(), 15);
        }
        assert!(!a.is_evaluated());
        assert!(!b.is_evaluated());
    }

    #[test]
    fn test_crossover_swaps_a_segment() {
        let mut rng = seeded();
        let mut a = Genome::from_genes(vec![0.0; 30]);
        let mut b = Genome::from_genes(vec![1.0; 30]);

        a.two_point_crossover(&mut b, &mut rng);

        let moved = a.genes().iter().filter(|&&g| g == 1.0).count();
        assert_eq!(
            b.genes().iter().filter(|&&g| g == 0.0).count(),
            moved,
            "swap must be symmetric"
        );
    }

    #[test]
    fn test_gaussian_mutate_invalidates_on_change() {
        let mut rng = seeded();
        let mut genome = Genome::from_genes(vec![0.0; 9]);
        genome.set_fitness(3.0);

        // gene_rate 1.0 guarantees every gene is written
        let changed = genome.gaussian_mutate(1.0, 1.0, &mut rng);
        assert!(changed);
        assert!(!genome.is_evaluated());
        assert!(genome.genes().iter().any(|&g| g != 0.0));
    }

    #[test]
    fn test_gaussian_mutate_zero_rate_keeps_cache() {
        let mut rng = seeded();
        let mut genome = Genome::from_genes(vec![0.0; 9]);
        genome.set_fitness(3.0);

        let changed = genome.gaussian_mutate(1.0, 0.0, &mut rng);
        assert!(!changed);
        assert!(genome.is_evaluated());
    }

    #[test]
    fn test_population_best() {
        let mut a = Genome::from_genes(vec![0.0; 3]);
        let mut b = Genome::from_genes(vec![0.0; 3]);
        let c = Genome::from_genes(vec![0.0; 3]);
        a.set_fitness(5.0);
        b.set_fitness(2.0);
        // c stays unevaluated and must be skipped

        let population = Population::new(vec![a, b, c]);
        let (index, best) = population.best().unwrap();
        assert_eq!(index, 1);
        assert_eq!(best.fitness(), Some(2.0));
    }

    #[test]
    fn test_truncate_to_best() {
        let genomes: Vec<Genome> = [4.0, 1.0, 3.0, 2.0]
            .iter()
            .map(|&cost| {
                let mut g = Genome::from_genes(vec![cost; 3]);
                g.set_fitness(cost);
                g
            })
            .collect();

        let mut population = Population::new(genomes);
        population.truncate_to_best(2);

        assert_eq!(population.len(), 2);
        assert_eq!(population.genomes()[0].fitness(), Some(1.0));
        assert_eq!(population.genomes()[1].fitness(), Some(2.0));
    }
}
