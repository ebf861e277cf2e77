//! Configuration parameters for the timetable genetic algorithm.

use crate::error::{Result, TimetableError};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Configuration settings for the timetable search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Number of individuals kept across generation boundaries
    pub population_size: usize,
    /// Number of generations to run
    pub generations: usize,
    /// Per-slot mutation probability, in percent
    pub mutation_probability_percent: u32,
    /// Time slots are drawn from `0..time_slot_range`
    pub time_slot_range: u32,
    /// Number of recent best-fitness values compared for stagnation
    pub stagnation_window: usize,
    /// Number of worst individuals replaced when rain fires
    pub rain_replace_count: usize,
    /// Penalty for each double-booking or qualification violation
    pub double_book_penalty: u64,
    /// Penalty for a group that does not fit in its room
    pub capacity_penalty: u64,
    /// Teaching hours above which a teacher is penalized
    pub teacher_hour_soft_cap: u64,
    /// Hours counted for every slot assigned to a teacher
    pub hours_per_slot: u64,
    /// Enable the mutation operator that reassigns a slot's group
    pub allow_group_reassignment: bool,
    /// Seed for the random source; entropy when absent
    pub seed: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            population_size: 50,
            generations: 150,
            mutation_probability_percent: 25,
            time_slot_range: 20,
            stagnation_window: 4,
            rain_replace_count: 15,
            double_book_penalty: 10,
            capacity_penalty: 5,
            teacher_hour_soft_cap: 10,
            hours_per_slot: 2,
            allow_group_reassignment: false,
            seed: None,
        }
    }
}

impl Config {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Config::default()
    }

    /// Load a configuration from a JSON file. Missing fields take their defaults.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Check that the parameters describe a runnable search.
    pub fn validate(&self) -> Result<()> {
        if self.population_size < 2 {
            return Err(TimetableError::Configuration(format!(
                "population_size must be at least 2, got {}",
                self.population_size
            )));
        }
        if self.generations == 0 {
            return Err(TimetableError::Configuration(
                "generations must be greater than 0".to_string(),
            ));
        }
        if self.time_slot_range == 0 {
            return Err(TimetableError::Configuration(
                "time_slot_range must be greater than 0".to_string(),
            ));
        }
        if self.mutation_probability_percent > 100 {
            return Err(TimetableError::Configuration(format!(
                "mutation_probability_percent must be in 0..=100, got {}",
                self.mutation_probability_percent
            )));
        }
        if self.stagnation_window == 0 {
            return Err(TimetableError::Configuration(
                "stagnation_window must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }

    /// Set the population size.
    pub fn with_population_size(mut self, size: usize) -> Self {
        self.population_size = size;
        self
    }

    /// Set the number of generations.
    pub fn with_generations(mut self, generations: usize) -> Self {
        self.generations = generations;
        self
    }

    /// Set the per-slot mutation probability in percent.
    pub fn with_mutation_probability_percent(mut self, percent: u32) -> Self {
        self.mutation_probability_percent = percent;
        self
    }

    /// Set the number of available time slots.
    pub fn with_time_slot_range(mut self, range: u32) -> Self {
        self.time_slot_range = range;
        self
    }

    /// Set the stagnation window length.
    pub fn with_stagnation_window(mut self, window: usize) -> Self {
        self.stagnation_window = window;
        self
    }

    /// Set how many individuals rain replaces.
    pub fn with_rain_replace_count(mut self, count: usize) -> Self {
        self.rain_replace_count = count;
        self
    }

    /// Set the double-booking penalty.
    pub fn with_double_book_penalty(mut self, penalty: u64) -> Self {
        self.double_book_penalty = penalty;
        self
    }

    /// Set the room capacity penalty.
    pub fn with_capacity_penalty(mut self, penalty: u64) -> Self {
        self.capacity_penalty = penalty;
        self
    }

    /// Set the teacher hour soft cap.
    pub fn with_teacher_hour_soft_cap(mut self, cap: u64) -> Self {
        self.teacher_hour_soft_cap = cap;
        self
    }

    /// Enable or disable the group reassignment mutation.
    pub fn with_group_reassignment(mut self, allow: bool) -> Self {
        self.allow_group_reassignment = allow;
        self
    }

    /// Set the random seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}
