//! Candidate timetable representation and random candidate generation.

use crate::catalog::Catalog;
use crate::config::Config;
use crate::error::Result;
use crate::fitness;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Identifies a subject by its position in the owning group's requirement list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SubjectRef {
    pub group: usize,
    pub index: usize,
}

/// One (group, subject) requirement assigned to a teacher, a room and a time slot.
///
/// All fields are indices into the [`Catalog`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleSlot {
    /// The group attending; starts as the subject's owning group
    pub group: usize,
    pub subject: SubjectRef,
    pub teacher: usize,
    pub room: usize,
    pub time_slot: u32,
}

impl ScheduleSlot {
    /// Name of the subject taught in this slot.
    pub fn subject_name<'c>(&self, catalog: &'c Catalog) -> &'c str {
        &catalog.groups[self.subject.group].subjects[self.subject.index].name
    }
}

/// How an individual entered the population.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Origin {
    /// Part of the randomly generated initial population
    Initial,
    /// Produced by crossover and mutation
    Offspring,
    /// Injected by rain after stagnation
    Rain,
}

/// A candidate timetable.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Schedule {
    /// One slot per requirement, in catalog order
    pub slots: Vec<ScheduleSlot>,
    /// Constraint-violation score; `None` until evaluated
    pub fitness: Option<u64>,
    pub origin: Origin,
}

impl Schedule {
    /// Create a schedule from slots, leaving it unscored.
    pub fn from_slots(slots: Vec<ScheduleSlot>, origin: Origin) -> Self {
        Schedule {
            slots,
            fitness: None,
            origin,
        }
    }

    /// Build a random timetable with one slot per (group, subject) requirement.
    ///
    /// Teacher, room and time slot are drawn uniformly; qualifications and
    /// capacities are left for the fitness evaluator to penalize.
    pub fn random<R: Rng>(catalog: &Catalog, config: &Config, rng: &mut R) -> Result<Self> {
        catalog.ensure_non_empty()?;

        let slots = catalog
            .requirements()
            .map(|(group, index)| ScheduleSlot {
                group,
                subject: SubjectRef { group, index },
                teacher: rng.gen_range(0..catalog.teachers.len()),
                room: rng.gen_range(0..catalog.rooms.len()),
                time_slot: rng.gen_range(0..config.time_slot_range),
            })
            .collect();

        Ok(Schedule::from_slots(slots, Origin::Initial))
    }

    /// Recompute and store the fitness.
    pub fn evaluate(&mut self, catalog: &Catalog, config: &Config) {
        self.fitness = Some(fitness::calculate_fitness(self, catalog, config));
    }

    /// The stored fitness, with unscored schedules ranked last.
    pub fn fitness(&self) -> u64 {
        self.fitness.unwrap_or(u64::MAX)
    }

    /// Get the number of slots.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Check if the schedule has no slots.
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Check that every requirement of the catalog appears exactly once.
    pub fn covers_requirements(&self, catalog: &Catalog) -> bool {
        let mut counts: HashMap<SubjectRef, usize> = HashMap::new();
        for slot in &self.slots {
            *counts.entry(slot.subject).or_insert(0) += 1;
        }

        counts.len() == catalog.requirement_count()
            && catalog
                .requirements()
                .all(|(group, index)| counts.get(&SubjectRef { group, index }) == Some(&1))
    }
}
