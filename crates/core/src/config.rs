//! Configuration for the evolutionary loop.

use crate::{Error, Result};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Generational replacement policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Replacement {
    /// Keep the best `elite_count` genomes unconditionally; the offspring
    /// (`population_size - elite_count` of them) replace the rest.
    #[default]
    Elitist,
    /// Merge the prior population, `2 * population_size` offspring and
    /// `population_size` fresh random genomes, then keep the cheapest
    /// `population_size`.
    Truncation,
}

/// Diversification applied between generation cycles to escape local
/// optima.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Restart {
    /// Apply `rounds` unconditional Gaussian mutation passes to every
    /// non-elite genome.
    NonElites { rounds: u32 },
    /// Apply `rounds_per_shape * num_shapes` passes to every genome,
    /// elites included.
    Everyone { rounds_per_shape: u32 },
}

impl Default for Restart {
    fn default() -> Self {
        Restart::NonElites { rounds: 5 }
    }
}

/// Configuration for [`GaRunner`](crate::GaRunner).
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct GaConfig {
    /// Number of genomes carried between generations.
    pub population_size: usize,

    /// Genomes preserved unconditionally by elitist replacement and
    /// shielded from non-elite restarts.
    pub elite_count: usize,

    /// Contestants per tournament draw.
    pub tournament_size: usize,

    /// Probability of two-point crossover per consecutive offspring pair.
    pub crossover_rate: f64,

    /// Probability of a Gaussian mutation pass per offspring.
    pub mutation_rate: f64,

    /// Per-gene perturbation probability within a mutation pass.
    pub gene_rate: f64,

    /// Standard deviation of the Gaussian gene perturbation.
    pub sigma: f64,

    /// Generations per cycle; a restart runs between cycles.
    pub generations_per_cycle: u32,

    /// Number of cycles to run (`None` = run until cancelled).
    pub max_cycles: Option<u32>,

    /// Lower bound of the uniform gene initialization range.
    pub init_min: f64,

    /// Upper bound of the uniform gene initialization range.
    pub init_max: f64,

    /// Generational replacement policy.
    pub replacement: Replacement,

    /// Between-cycle diversification policy.
    pub restart: Restart,

    /// Refine the champion every this many generations (`None` =
    /// disabled).
    pub refine_interval: Option<u32>,

    /// Initial step size of the greedy refiner.
    pub refine_initial_step: f64,

    /// The refiner stops shrinking a gene's step below this threshold.
    pub refine_min_step: f64,

    /// RNG seed; identical seed and configuration reproduce a run.
    pub seed: u64,
}

impl Default for GaConfig {
    fn default() -> Self {
        Self {
            population_size: 50,
            elite_count: 1,
            tournament_size: 2,
            crossover_rate: 0.2,
            mutation_rate: 0.5,
            gene_rate: 0.2,
            sigma: 1.0,
            generations_per_cycle: 100,
            max_cycles: None,
            init_min: 0.0,
            init_max: 5.0,
            replacement: Replacement::default(),
            restart: Restart::default(),
            refine_interval: None,
            refine_initial_step: 1.0,
            refine_min_step: 0.1,
            seed: 64,
        }
    }
}

impl GaConfig {
    /// Creates a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the population size.
    pub fn with_population_size(mut self, size: usize) -> Self {
        self.population_size = size;
        self
    }

    /// Sets the elite count.
    pub fn with_elite_count(mut self, count: usize) -> Self {
        self.elite_count = count;
        self
    }

    /// Sets the tournament size.
    pub fn with_tournament_size(mut self, size: usize) -> Self {
        self.tournament_size = size.max(1);
        self
    }

    /// Sets the crossover probability.
    pub fn with_crossover_rate(mut self, rate: f64) -> Self {
        self.crossover_rate = rate.clamp(0.0, 1.0);
        self
    }

    /// Sets the per-offspring mutation probability.
    pub fn with_mutation_rate(mut self, rate: f64) -> Self {
        self.mutation_rate = rate.clamp(0.0, 1.0);
        self
    }

    /// Sets the per-gene perturbation probability.
    pub fn with_gene_rate(mut self, rate: f64) -> Self {
        self.gene_rate = rate.clamp(0.0, 1.0);
        self
    }

    /// Sets the mutation standard deviation.
    pub fn with_sigma(mut self, sigma: f64) -> Self {
        self.sigma = sigma;
        self
    }

    /// Sets the generations per cycle.
    pub fn with_generations_per_cycle(mut self, generations: u32) -> Self {
        self.generations_per_cycle = generations;
        self
    }

    /// Bounds the run to `cycles` cycles.
    pub fn with_max_cycles(mut self, cycles: u32) -> Self {
        self.max_cycles = Some(cycles);
        self
    }

    /// Sets the uniform gene initialization range.
    pub fn with_init_range(mut self, min: f64, max: f64) -> Self {
        self.init_min = min;
        self.init_max = max;
        self
    }

    /// Sets the replacement policy.
    pub fn with_replacement(mut self, replacement: Replacement) -> Self {
        self.replacement = replacement;
        self
    }

    /// Sets the restart policy.
    pub fn with_restart(mut self, restart: Restart) -> Self {
        self.restart = restart;
        self
    }

    /// Enables champion refinement every `generations` generations.
    pub fn with_refine_interval(mut self, generations: u32) -> Self {
        self.refine_interval = Some(generations.max(1));
        self
    }

    /// Sets the refiner step sizes.
    pub fn with_refine_steps(mut self, initial: f64, min: f64) -> Self {
        self.refine_initial_step = initial;
        self.refine_min_step = min;
        self
    }

    /// Sets the RNG seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Checks the configuration contract.
    pub fn validate(&self) -> Result<()> {
        if self.population_size == 0 {
            return Err(Error::Config("population_size must be positive".into()));
        }
        if self.elite_count >= self.population_size {
            return Err(Error::Config(format!(
                "elite_count {} must be smaller than population_size {}",
                self.elite_count, self.population_size
            )));
        }
        if self.tournament_size == 0 {
            return Err(Error::Config("tournament_size must be positive".into()));
        }
        if !(self.init_min < self.init_max) {
            return Err(Error::Config(format!(
                "init range [{}, {}) is empty",
                self.init_min, self.init_max
            )));
        }
        if !self.sigma.is_finite() || self.sigma <= 0.0 {
            return Err(Error::Config(format!(
                "sigma {} must be positive and finite",
                self.sigma
            )));
        }
        if self.refine_interval == Some(0) {
            return Err(Error::Config("refine_interval must be positive".into()));
        }
        if !self.refine_min_step.is_finite() || self.refine_min_step <= 0.0 {
            return Err(Error::Config(format!(
                "refine_min_step {} must be positive and finite",
                self.refine_min_step
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(GaConfig::default().validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_parameters() {
        assert!(GaConfig::default()
            .with_population_size(0)
            .validate()
            .is_err());
        assert!(GaConfig::default()
            .with_population_size(4)
            .with_elite_count(4)
            .validate()
            .is_err());
        assert!(GaConfig::default().with_init_range(5.0, 5.0).validate().is_err());
        assert!(GaConfig::default().with_sigma(0.0).validate().is_err());
    }

    #[test]
    fn test_builder_clamps_rates() {
        let config = GaConfig::new()
            .with_crossover_rate(1.7)
            .with_mutation_rate(-0.3);

        assert_eq!(config.crossover_rate, 1.0);
        assert_eq!(config.mutation_rate, 0.0);
    }
}
