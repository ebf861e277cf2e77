//! # Timetable GA
//!
//! A genetic algorithm that searches for a low-conflict timetable, assigning
//! every (group, subject) requirement a teacher, a room and a time slot.
//!
//! Candidates are scored by summed constraint-violation penalties. Each
//! generation keeps the fitter half of the population, breeds offspring by
//! midpoint crossover and per-slot mutation, and truncates back to the
//! population size. When the best fitness flat-lines, "rain" replaces the
//! weakest individuals with fresh random candidates.

pub mod catalog;
pub mod config;
pub mod error;
pub mod fitness;
pub mod genetic;
pub mod population;
pub mod schedule;
pub mod stagnation;
pub mod utils;

use crate::catalog::Catalog;
use crate::config::Config;
use crate::error::{Result, TimetableError};
use crate::genetic::Genetic;
use crate::population::Population;
use crate::schedule::Schedule;
use crate::stagnation::StagnationMonitor;
use crate::utils::SearchStatistics;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::time::{Duration, Instant};

/// The main algorithm structure that drives the evolutionary search.
pub struct TimetableGa {
    pub catalog: Catalog,
    pub config: Config,
    pub population: Population,
    pub stagnation: StagnationMonitor,
    pub genetic: Genetic,
    /// Number of generations completed
    pub generation: usize,
    /// Number of generations in which rain fired
    pub rain_events: usize,
    /// Best fitness at the end of each generation
    pub fitness_history: Vec<u64>,
    pub run_time: Duration,
    rng: ChaCha8Rng,
}

impl TimetableGa {
    /// Create a new search for the given catalog and configuration.
    ///
    /// Fails before any evolution if the configuration is invalid or the
    /// catalog lacks groups, rooms or teachers.
    pub fn new(catalog: Catalog, config: Config) -> Result<Self> {
        config.validate()?;
        catalog.ensure_non_empty()?;

        let rng = match config.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        };

        Ok(TimetableGa {
            population: Population::new(&config),
            stagnation: StagnationMonitor::new(config.stagnation_window),
            genetic: Genetic,
            generation: 0,
            rain_events: 0,
            fitness_history: Vec::with_capacity(config.generations),
            run_time: Duration::from_secs(0),
            catalog,
            config,
            rng,
        })
    }

    /// Initialize the population with scored random candidates.
    pub fn initialize(&mut self) -> Result<()> {
        self.population
            .initialize(&self.catalog, &self.config, &mut self.rng)?;
        self.generation = 0;
        self.rain_events = 0;
        self.fitness_history.clear();
        self.stagnation = StagnationMonitor::new(self.config.stagnation_window);

        log::info!(
            "Initialized population of {} schedules with {} slots each",
            self.population.len(),
            self.catalog.requirement_count()
        );
        Ok(())
    }

    /// Run one generation and return its best fitness.
    pub fn step(&mut self) -> Result<u64> {
        self.population.select();

        let offspring =
            self.population
                .breed(&self.genetic, &self.catalog, &self.config, &mut self.rng);
        log::debug!(
            "Generation {}: {} survivors, {} offspring",
            self.generation,
            self.population.len(),
            offspring.len()
        );
        self.population.merge(offspring);

        let best_fitness = self
            .population
            .best()
            .map(Schedule::fitness)
            .ok_or(TimetableError::EmptyPopulation)?;

        self.stagnation.record(best_fitness);
        if self.stagnation.is_stagnant() {
            let replaced = self
                .population
                .rain(&self.catalog, &self.config, &mut self.rng)?;
            self.population.sort();
            self.rain_events += 1;
            log::warn!(
                "Rain: replaced {} schedules after best fitness stayed at {}",
                replaced,
                best_fitness
            );
        }

        log::info!(
            "Generation {} best fitness: {}",
            self.generation,
            best_fitness
        );

        self.fitness_history.push(best_fitness);
        self.generation += 1;
        Ok(best_fitness)
    }

    /// Run the full search and return the best schedule of the last generation.
    pub fn run(&mut self) -> Result<&Schedule> {
        let start_time = Instant::now();

        self.initialize()?;

        while self.generation < self.config.generations {
            self.step()?;
        }

        self.run_time = start_time.elapsed();
        log::info!(
            "Search finished after {} generations in {}",
            self.generation,
            utils::format_duration(self.run_time)
        );

        self.best()
    }

    /// The current best schedule.
    pub fn best(&self) -> Result<&Schedule> {
        self.population.best().ok_or(TimetableError::EmptyPopulation)
    }

    /// Summarize the search so far.
    pub fn statistics(&self) -> SearchStatistics {
        SearchStatistics {
            generations: self.generation,
            runtime: self.run_time,
            best_fitness: self.population.best().map_or(u64::MAX, Schedule::fitness),
            rain_events: self.rain_events,
            slot_count: self.catalog.requirement_count(),
            population_size: self.population.len(),
        }
    }
}
