//! Generational evolutionary loop.
//!
//! The runner drives an unbounded cycle of `generations_per_cycle`
//! generations followed by a restart perturbation, tracking the best genome
//! ever seen (the hall of fame). It never terminates on its own: hosts
//! either bound the run with `max_cycles` or stop it through the cancel
//! handle, and may extract the current best at any point through the
//! observer.

use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use rand::prelude::*;

use crate::config::{GaConfig, Replacement, Restart};
use crate::fitness::Evaluator;
use crate::genome::{Genome, Population};
use crate::ops;
use crate::refine::Refiner;
use crate::stats::{GenerationStats, Observer, Snapshot};
use crate::{Error, Result};

/// Result of a (bounded or cancelled) GA run.
#[derive(Debug, Clone)]
pub struct GaResult {
    /// Best genome across the run, with a valid fitness cache.
    pub best: Genome,
    /// Cost of the best genome.
    pub best_cost: f64,
    /// Total generations executed, across all cycles.
    pub generations: u64,
    /// Completed cycles.
    pub cycles: u32,
    /// Best cost after each generation.
    pub history: Vec<f64>,
    /// Wall-clock duration of the run.
    pub elapsed: Duration,
    /// Whether the run was stopped through the cancel handle.
    pub cancelled: bool,
}

/// Evolutionary loop runner.
pub struct GaRunner {
    config: GaConfig,
    evaluator: Evaluator,
    cancelled: Arc<AtomicBool>,
    observer: Option<Observer>,
}

impl GaRunner {
    /// Creates a runner; the configuration is validated up front.
    pub fn new(config: GaConfig, evaluator: Evaluator) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            evaluator,
            cancelled: Arc::new(AtomicBool::new(false)),
            observer: None,
        })
    }

    /// Attaches an observer receiving per-generation snapshots.
    pub fn with_observer(mut self, observer: Observer) -> Self {
        self.observer = Some(observer);
        self
    }

    /// Handle to stop the run; checked at generation boundaries and
    /// between refinement genes.
    pub fn cancel_handle(&self) -> Arc<AtomicBool> {
        self.cancelled.clone()
    }

    /// The runner's configuration.
    pub fn config(&self) -> &GaConfig {
        &self.config
    }

    /// The fitness evaluator (and its shape set).
    pub fn evaluator(&self) -> &Evaluator {
        &self.evaluator
    }

    /// Runs with an RNG seeded from the configuration.
    pub fn run(&self) -> Result<GaResult> {
        let mut rng = StdRng::seed_from_u64(self.config.seed);
        self.run_with_rng(&mut rng)
    }

    /// Runs the evolutionary loop with a caller-supplied RNG.
    pub fn run_with_rng<R: Rng>(&self, rng: &mut R) -> Result<GaResult> {
        let start = Instant::now();
        let cfg = &self.config;
        let num_shapes = self.evaluator.num_shapes();

        let mut population =
            Population::random(cfg.population_size, num_shapes, cfg.init_min, cfg.init_max, rng);
        population.evaluate_stale(&self.evaluator)?;

        let mut best = match population.best() {
            Some((_, genome)) => genome.clone(),
            None => return Err(Error::Config("population is empty".into())),
        };
        let mut best_cost = best.fitness().unwrap_or(f64::INFINITY);

        let mut history = Vec::new();
        let mut generations: u64 = 0;
        let mut cycle: u32 = 0;
        let mut was_cancelled = false;

        'run: loop {
            for generation in 0..cfg.generations_per_cycle {
                if self.cancelled.load(Ordering::Relaxed) {
                    was_cancelled = true;
                    break 'run;
                }

                let mut offspring = self.spawn_offspring(&population, rng);
                offspring.evaluate_stale(&self.evaluator)?;
                self.replace(&mut population, offspring, rng)?;

                Self::track_best(&population, &mut best, &mut best_cost);

                if let Some(interval) = cfg.refine_interval {
                    if (generation + 1) % interval == 0 {
                        self.refine_champion(
                            &mut population,
                            cycle,
                            generation,
                            &mut best,
                            &mut best_cost,
                        )?;
                    }
                }

                generations += 1;
                history.push(best_cost);
                self.emit(cycle, generation, best_cost, &best, &population);
            }

            cycle += 1;
            if let Some(max_cycles) = cfg.max_cycles {
                if cycle >= max_cycles {
                    break;
                }
            }
            if self.cancelled.load(Ordering::Relaxed) {
                was_cancelled = true;
                break;
            }

            log::debug!("cycle {} done, restarting population", cycle);
            self.restart_population(&mut population, rng)?;
            Self::track_best(&population, &mut best, &mut best_cost);
        }

        Ok(GaResult {
            best,
            best_cost,
            generations,
            cycles: cycle,
            history,
            elapsed: start.elapsed(),
            cancelled: was_cancelled,
        })
    }

    /// Overwrites the hall of fame when the population holds a strictly
    /// better genome.
    fn track_best(population: &Population, best: &mut Genome, best_cost: &mut f64) {
        if let Some((_, genome)) = population.best() {
            if let Some(cost) = genome.fitness() {
                if cost < *best_cost {
                    *best_cost = cost;
                    *best = genome.clone();
                }
            }
        }
    }

    /// Selection, cloning, crossover and mutation for one generation.
    fn spawn_offspring<R: Rng>(&self, population: &Population, rng: &mut R) -> Population {
        let cfg = &self.config;
        let count = match cfg.replacement {
            Replacement::Elitist => cfg.population_size - cfg.elite_count,
            Replacement::Truncation => 2 * cfg.population_size,
        };

        // Tournament winners are clones; the parent population is untouched.
        let mut offspring = ops::tournament_select(population, count, cfg.tournament_size, rng);

        for pair in offspring.chunks_mut(2) {
            if pair.len() == 2 && rng.gen::<f64>() < cfg.crossover_rate {
                let (left, right) = pair.split_at_mut(1);
                left[0].two_point_crossover(&mut right[0], rng);
            }
        }

        for child in offspring.iter_mut() {
            if rng.gen::<f64>() < cfg.mutation_rate {
                child.gaussian_mutate(cfg.sigma, cfg.gene_rate, rng);
            }
        }

        Population::new(offspring)
    }

    fn replace<R: Rng>(
        &self,
        population: &mut Population,
        offspring: Population,
        rng: &mut R,
    ) -> Result<()> {
        let cfg = &self.config;
        match cfg.replacement {
            Replacement::Elitist => {
                let mut next = ops::select_best(population, cfg.elite_count);
                next.extend(offspring.into_genomes());
                *population = Population::new(next);
            }
            Replacement::Truncation => {
                let fresh = Population::random(
                    cfg.population_size,
                    self.evaluator.num_shapes(),
                    cfg.init_min,
                    cfg.init_max,
                    rng,
                );
                population.extend(offspring.into_genomes());
                population.extend(fresh.into_genomes());
                population.evaluate_stale(&self.evaluator)?;
                population.truncate_to_best(cfg.population_size);
            }
        }
        Ok(())
    }

    /// Heavy mutation between cycles, then re-evaluation.
    fn restart_population<R: Rng>(&self, population: &mut Population, rng: &mut R) -> Result<()> {
        let cfg = &self.config;
        match cfg.restart {
            Restart::NonElites { rounds } => {
                let elites: HashSet<usize> =
                    ops::best_indices(population, cfg.elite_count).into_iter().collect();
                for (index, genome) in population.genomes_mut().iter_mut().enumerate() {
                    if elites.contains(&index) {
                        continue;
                    }
                    for _ in 0..rounds {
                        genome.gaussian_mutate(cfg.sigma, cfg.gene_rate, rng);
                    }
                }
            }
            Restart::Everyone { rounds_per_shape } => {
                let rounds = rounds_per_shape as usize * self.evaluator.num_shapes();
                for genome in population.genomes_mut() {
                    for _ in 0..rounds {
                        genome.gaussian_mutate(cfg.sigma, cfg.gene_rate, rng);
                    }
                }
            }
        }
        population.evaluate_stale(&self.evaluator)
    }

    fn refine_champion(
        &self,
        population: &mut Population,
        cycle: u32,
        generation: u32,
        best: &mut Genome,
        best_cost: &mut f64,
    ) -> Result<()> {
        let Some((index, champion)) = population.best().map(|(i, g)| (i, g.clone())) else {
            return Ok(());
        };
        let before = champion.fitness().unwrap_or(f64::INFINITY);

        let refiner = Refiner::new(&self.evaluator)
            .with_steps(self.config.refine_initial_step, self.config.refine_min_step)
            .with_cancel(self.cancelled.clone());
        let refined = refiner.refine(&champion)?;
        let after = refined.fitness().unwrap_or(before);

        log::debug!(
            "cycle {} gen {}: refined champion {:.4} -> {:.4}",
            cycle,
            generation,
            before,
            after
        );

        if after < before {
            population.genomes_mut()[index] = refined.clone();
        }
        if after < *best_cost {
            *best_cost = after;
            *best = refined;
        }

        // Extra snapshot so observers see the post-refinement state.
        self.emit(cycle, generation, *best_cost, best, population);
        Ok(())
    }

    fn emit(
        &self,
        cycle: u32,
        generation: u32,
        best_cost: f64,
        best: &Genome,
        population: &Population,
    ) {
        let Some(stats) = GenerationStats::from_population(population) else {
            return;
        };

        log::debug!(
            "cycle {} gen {}: best={:.4} mean={:.4} std={:.4} min={:.4} max={:.4}",
            cycle,
            generation,
            best_cost,
            stats.mean,
            stats.std_dev,
            stats.min,
            stats.max
        );

        if let Some(observer) = &self.observer {
            observer(&Snapshot {
                cycle,
                generation,
                best_cost,
                best: best.clone(),
                stats,
            });
        }
    }
}
