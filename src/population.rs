//! Population management for the genetic algorithm.

use crate::catalog::Catalog;
use crate::config::Config;
use crate::error::Result;
use crate::genetic::Genetic;
use crate::schedule::{Origin, Schedule};
use rand::Rng;

/// Manages the population of candidate timetables.
pub struct Population {
    /// Individuals, sorted ascending by fitness after each generation
    pub individuals: Vec<Schedule>,
    /// Number of individuals kept across generation boundaries
    pub max_size: usize,
}

impl Population {
    /// Create an empty population with the given configuration.
    pub fn new(config: &Config) -> Self {
        Population {
            individuals: Vec::with_capacity(config.population_size),
            max_size: config.population_size,
        }
    }

    /// Fill the population with scored random candidates.
    pub fn initialize<R: Rng>(
        &mut self,
        catalog: &Catalog,
        config: &Config,
        rng: &mut R,
    ) -> Result<()> {
        self.individuals.clear();

        for _ in 0..self.max_size {
            let mut schedule = Schedule::random(catalog, config, rng)?;
            schedule.evaluate(catalog, config);
            self.individuals.push(schedule);
        }

        self.sort();
        Ok(())
    }

    /// Stable sort by ascending fitness.
    pub fn sort(&mut self) {
        self.individuals.sort_by_key(Schedule::fitness);
    }

    /// Truncation selection: keep the fitter half.
    pub fn select(&mut self) {
        self.sort();
        let survivors = self.individuals.len() / 2;
        self.individuals.truncate(survivors);
    }

    /// Produce one scored offspring per individual, pairing each with its cyclic successor.
    pub fn breed<R: Rng>(
        &self,
        genetic: &Genetic,
        catalog: &Catalog,
        config: &Config,
        rng: &mut R,
    ) -> Vec<Schedule> {
        let count = self.individuals.len();

        (0..count)
            .map(|i| {
                let parent1 = &self.individuals[i];
                let parent2 = &self.individuals[(i + 1) % count];

                let mut offspring = genetic.crossover(parent1, parent2);
                genetic.mutate(&mut offspring, catalog, config, rng);
                offspring.evaluate(catalog, config);
                offspring
            })
            .collect()
    }

    /// Add offspring, re-sort, and cut back to the maximum size.
    pub fn merge(&mut self, offspring: Vec<Schedule>) {
        self.individuals.extend(offspring);
        self.sort();
        self.individuals.truncate(self.max_size);
    }

    /// Replace the worst individuals with fresh scored random candidates.
    ///
    /// Returns how many individuals were replaced. The count is capped so the
    /// best individual always survives.
    pub fn rain<R: Rng>(
        &mut self,
        catalog: &Catalog,
        config: &Config,
        rng: &mut R,
    ) -> Result<usize> {
        let len = self.individuals.len();
        let count = config.rain_replace_count.min(len.saturating_sub(1));
        if count < config.rain_replace_count {
            log::warn!(
                "Rain requested {} replacements but only {} individuals can be replaced",
                config.rain_replace_count,
                count
            );
        }

        for individual in self.individuals[len - count..].iter_mut() {
            let mut schedule = Schedule::random(catalog, config, rng)?;
            schedule.origin = Origin::Rain;
            schedule.evaluate(catalog, config);
            *individual = schedule;
        }

        Ok(count)
    }

    /// The best individual, assuming the population is sorted.
    pub fn best(&self) -> Option<&Schedule> {
        self.individuals.first()
    }

    /// Get the population size.
    pub fn len(&self) -> usize {
        self.individuals.len()
    }

    /// Check if the population is empty.
    pub fn is_empty(&self) -> bool {
        self.individuals.is_empty()
    }
}
