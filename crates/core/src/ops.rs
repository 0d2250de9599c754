//! Selection operators.
//!
//! The crossover and mutation operators live on [`Genome`](crate::Genome);
//! selection works at the population level and is collected here.

use rand::prelude::*;

use crate::genome::{Genome, Population};

fn cached_cost(genome: &Genome) -> f64 {
    genome.fitness().unwrap_or(f64::INFINITY)
}

/// Tournament selection with replacement.
///
/// Draws `count` winners; each winner is the cheapest of `tournament_size`
/// uniformly sampled contestants. Winners are cloned, so the source
/// population is unaffected and a genome may win any number of times.
pub fn tournament_select<R: Rng>(
    population: &Population,
    count: usize,
    tournament_size: usize,
    rng: &mut R,
) -> Vec<Genome> {
    let genomes = population.genomes();
    if genomes.is_empty() {
        return Vec::new();
    }

    (0..count)
        .map(|_| {
            let mut winner = &genomes[rng.gen_range(0..genomes.len())];
            for _ in 1..tournament_size {
                let contestant = &genomes[rng.gen_range(0..genomes.len())];
                if cached_cost(contestant) < cached_cost(winner) {
                    winner = contestant;
                }
            }
            winner.clone()
        })
        .collect()
}

/// Indices of the `count` cheapest genomes, ascending by cost.
pub fn best_indices(population: &Population, count: usize) -> Vec<usize> {
    let mut indices: Vec<usize> = (0..population.len()).collect();
    indices.sort_by(|&a, &b| {
        let ca = cached_cost(&population.genomes()[a]);
        let cb = cached_cost(&population.genomes()[b]);
        ca.partial_cmp(&cb).unwrap_or(std::cmp::Ordering::Equal)
    });
    indices.truncate(count);
    indices
}

/// Clones of the `count` cheapest genomes, ascending by cost.
pub fn select_best(population: &Population, count: usize) -> Vec<Genome> {
    best_indices(population, count)
        .into_iter()
        .map(|index| population.genomes()[index].clone())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn population_with_costs(costs: &[f64]) -> Population {
        Population::new(
            costs
                .iter()
                .map(|&cost| {
                    let mut g = Genome::from_genes(vec![cost; 3]);
                    g.set_fitness(cost);
                    g
                })
                .collect(),
        )
    }

    #[test]
    fn test_select_best_orders_by_cost() {
        let population = population_with_costs(&[3.0, 1.0, 2.0]);
        let best = select_best(&population, 2);

        assert_eq!(best.len(), 2);
        assert_eq!(best[0].fitness(), Some(1.0));
        assert_eq!(best[1].fitness(), Some(2.0));
    }

    #[test]
    fn test_tournament_select_count_and_replacement() {
        let mut rng = StdRng::seed_from_u64(3);
        let population = population_with_costs(&[5.0, 1.0]);

        // More winners than genomes is fine: selection is with replacement.
        let winners = tournament_select(&population, 10, 2, &mut rng);
        assert_eq!(winners.len(), 10);

        // With tournament size 2 over two genomes, the cheap genome must
        // win the large majority of draws.
        let cheap_wins = winners.iter().filter(|g| g.fitness() == Some(1.0)).count();
        assert!(cheap_wins >= 5, "cheap genome won only {}", cheap_wins);
    }

    #[test]
    fn test_tournament_select_prefers_lower_cost() {
        let mut rng = StdRng::seed_from_u64(9);
        let population = population_with_costs(&[4.0, 2.0, 8.0, 6.0]);

        // A full-population tournament always returns the global best.
        let winners = tournament_select(&population, 5, 64, &mut rng);
        assert!(winners.iter().all(|g| g.fitness() == Some(2.0)));
    }
}
