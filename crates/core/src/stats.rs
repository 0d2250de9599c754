//! Observer snapshots and population statistics.

use crate::genome::{Genome, Population};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Cost statistics over the evaluated genomes of a population.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct GenerationStats {
    /// Mean cost.
    pub mean: f64,
    /// Population standard deviation of the costs.
    pub std_dev: f64,
    /// Lowest cost.
    pub min: f64,
    /// Highest cost.
    pub max: f64,
}

impl GenerationStats {
    /// Computes statistics over every evaluated genome.
    ///
    /// Returns `None` when the population holds no evaluated genomes.
    pub fn from_population(population: &Population) -> Option<Self> {
        let costs: Vec<f64> = population
            .genomes()
            .iter()
            .filter_map(|genome| genome.fitness())
            .collect();
        if costs.is_empty() {
            return None;
        }

        let n = costs.len() as f64;
        let mean = costs.iter().sum::<f64>() / n;
        let variance = costs.iter().map(|c| (c - mean) * (c - mean)).sum::<f64>() / n;
        let (min, max) = costs
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &c| {
                (lo.min(c), hi.max(c))
            });

        Some(Self {
            mean,
            std_dev: variance.sqrt(),
            min,
            max,
        })
    }
}

/// Read-only view of the optimizer state, refreshed once per generation and
/// once after each refinement pass.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Snapshot {
    /// Restart cycle index.
    pub cycle: u32,
    /// Generation index within the cycle.
    pub generation: u32,
    /// Best cost seen across the whole run.
    pub best_cost: f64,
    /// Best genome seen across the whole run (the hall of fame record).
    pub best: Genome,
    /// Statistics over the current population.
    pub stats: GenerationStats,
}

/// Observer callback receiving per-generation snapshots.
///
/// Observers must not block; they read the snapshot and return.
pub type Observer = Box<dyn Fn(&Snapshot) + Send + Sync>;

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_stats_over_known_costs() {
        let genomes: Vec<Genome> = [2.0, 4.0, 6.0, 8.0]
            .iter()
            .map(|&cost| {
                let mut g = Genome::from_genes(vec![0.0; 3]);
                g.set_fitness(cost);
                g
            })
            .collect();
        let population = Population::new(genomes);

        let stats = GenerationStats::from_population(&population).unwrap();
        assert_relative_eq!(stats.mean, 5.0);
        assert_relative_eq!(stats.std_dev, 5.0_f64.sqrt());
        assert_relative_eq!(stats.min, 2.0);
        assert_relative_eq!(stats.max, 8.0);
    }

    #[test]
    fn test_stats_skip_unevaluated() {
        let mut evaluated = Genome::from_genes(vec![0.0; 3]);
        evaluated.set_fitness(3.0);
        let stale = Genome::from_genes(vec![0.0; 3]);

        let population = Population::new(vec![evaluated, stale]);
        let stats = GenerationStats::from_population(&population).unwrap();
        assert_relative_eq!(stats.mean, 3.0);
        assert_relative_eq!(stats.std_dev, 0.0);
    }

    #[test]
    fn test_stats_none_for_all_stale() {
        let population = Population::new(vec![Genome::from_genes(vec![0.0; 3])]);
        assert!(GenerationStats::from_population(&population).is_none());
    }
}
