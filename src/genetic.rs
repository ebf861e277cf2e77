//! Genetic operators for the timetable search.

use crate::catalog::Catalog;
use crate::config::Config;
use crate::schedule::{Origin, Schedule, ScheduleSlot};
use rand::Rng;

/// A single-slot perturbation applied by the mutator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutationOperator {
    TimeSlot,
    Teacher,
    Room,
    /// Moves the slot to another group without changing its subject
    Group,
    /// Applies each simple operator independently with probability one half
    Combined,
}

const WITH_GROUP: [MutationOperator; 5] = [
    MutationOperator::TimeSlot,
    MutationOperator::Teacher,
    MutationOperator::Room,
    MutationOperator::Group,
    MutationOperator::Combined,
];

const WITHOUT_GROUP: [MutationOperator; 4] = [
    MutationOperator::TimeSlot,
    MutationOperator::Teacher,
    MutationOperator::Room,
    MutationOperator::Combined,
];

impl MutationOperator {
    /// The operators the mutator draws from under the given configuration.
    ///
    /// Group reassignment leaves the slot's subject untouched, so the slot no
    /// longer matches a requirement of its group. It is only offered when
    /// explicitly enabled.
    pub fn enabled(config: &Config) -> &'static [MutationOperator] {
        if config.allow_group_reassignment {
            &WITH_GROUP
        } else {
            &WITHOUT_GROUP
        }
    }
}

/// Implements the genetic operators (crossover, mutation) for timetables.
pub struct Genetic;

impl Genetic {
    /// Single-point crossover at the midpoint of the slot sequence.
    ///
    /// The offspring takes the first half of `parent1` and the second half of
    /// `parent2`. Both parents list requirements in the same order, so the
    /// offspring still covers every requirement exactly once.
    pub fn crossover(&self, parent1: &Schedule, parent2: &Schedule) -> Schedule {
        let midpoint = parent1.slots.len() / 2;

        let mut slots = Vec::with_capacity(parent1.slots.len());
        slots.extend_from_slice(&parent1.slots[..midpoint]);
        slots.extend_from_slice(parent2.slots.get(midpoint..).unwrap_or(&[]));

        Schedule::from_slots(slots, Origin::Offspring)
    }

    /// Mutate each slot in place with the configured probability.
    ///
    /// The schedule's fitness is cleared; the caller must evaluate it again.
    pub fn mutate<R: Rng>(
        &self,
        schedule: &mut Schedule,
        catalog: &Catalog,
        config: &Config,
        rng: &mut R,
    ) {
        let operators = MutationOperator::enabled(config);

        for slot in schedule.slots.iter_mut() {
            if rng.gen_range(0..100) < config.mutation_probability_percent {
                let operator = operators[rng.gen_range(0..operators.len())];
                Self::apply(operator, slot, catalog, config, rng);
            }
        }

        schedule.fitness = None;
    }

    /// Apply one operator to a slot.
    pub fn apply<R: Rng>(
        operator: MutationOperator,
        slot: &mut ScheduleSlot,
        catalog: &Catalog,
        config: &Config,
        rng: &mut R,
    ) {
        match operator {
            MutationOperator::TimeSlot => {
                slot.time_slot = rng.gen_range(0..config.time_slot_range);
            }
            MutationOperator::Teacher => {
                slot.teacher = rng.gen_range(0..catalog.teachers.len());
            }
            MutationOperator::Room => {
                slot.room = rng.gen_range(0..catalog.rooms.len());
            }
            MutationOperator::Group => {
                slot.group = rng.gen_range(0..catalog.groups.len());
            }
            MutationOperator::Combined => {
                for &simple in MutationOperator::enabled(config)
                    .iter()
                    .filter(|&&op| op != MutationOperator::Combined)
                {
                    if rng.gen_bool(0.5) {
                        Self::apply(simple, slot, catalog, config, rng);
                    }
                }
            }
        }
    }
}
