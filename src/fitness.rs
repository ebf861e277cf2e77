//! Constraint-violation scoring of candidate timetables.
//!
//! Collisions are scanned over all ordered pairs of slots sharing a time slot,
//! self-pairs included. A colliding unordered pair is therefore counted twice,
//! and a self-pair can only ever trigger the qualification rule, which is what
//! penalizes an unqualified teacher who has no other class at that time.

use crate::catalog::Catalog;
use crate::config::Config;
use crate::schedule::{Schedule, ScheduleSlot};
use serde::Serialize;
use std::collections::HashMap;

/// Penalty totals per rule.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct FitnessBreakdown {
    /// Same teacher in different rooms at the same time
    pub teacher_conflicts: u64,
    /// Same group taking different subjects at the same time
    pub group_conflicts: u64,
    /// Same room hosting different groups at the same time
    pub room_conflicts: u64,
    /// Teacher assigned a subject they are not qualified for
    pub qualification: u64,
    /// Group larger than the room it is assigned to
    pub capacity: u64,
    /// Teacher hours above the soft cap
    pub overtime: u64,
}

impl FitnessBreakdown {
    /// Sum of all penalties.
    pub fn total(&self) -> u64 {
        self.teacher_conflicts
            + self.group_conflicts
            + self.room_conflicts
            + self.qualification
            + self.capacity
            + self.overtime
    }
}

/// Score a schedule. Lower is better and 0 means no violation was found.
pub fn calculate_fitness(schedule: &Schedule, catalog: &Catalog, config: &Config) -> u64 {
    evaluate_breakdown(schedule, catalog, config).total()
}

/// Score a schedule rule by rule.
pub fn evaluate_breakdown(
    schedule: &Schedule,
    catalog: &Catalog,
    config: &Config,
) -> FitnessBreakdown {
    let mut breakdown = FitnessBreakdown::default();
    let penalty = config.double_book_penalty;

    // Only slots sharing a time slot can collide
    let mut by_time: HashMap<u32, Vec<&ScheduleSlot>> = HashMap::new();
    for slot in &schedule.slots {
        by_time.entry(slot.time_slot).or_default().push(slot);
    }

    for bucket in by_time.values() {
        for slot in bucket {
            let subject = slot.subject_name(catalog);
            let qualified = catalog.teachers[slot.teacher].is_qualified_for(subject);

            for other in bucket {
                if slot.teacher == other.teacher && slot.room != other.room {
                    breakdown.teacher_conflicts += penalty;
                }
                if slot.group == other.group && subject != other.subject_name(catalog) {
                    breakdown.group_conflicts += penalty;
                }
                if slot.room == other.room && slot.group != other.group {
                    breakdown.room_conflicts += penalty;
                }
                if slot.teacher == other.teacher && !qualified {
                    breakdown.qualification += penalty;
                }
            }
        }
    }

    for slot in &schedule.slots {
        if catalog.groups[slot.group].student_count > catalog.rooms[slot.room].capacity {
            breakdown.capacity += config.capacity_penalty;
        }
    }

    let mut slots_per_teacher = vec![0u64; catalog.teachers.len()];
    for slot in &schedule.slots {
        slots_per_teacher[slot.teacher] += 1;
    }
    for count in slots_per_teacher {
        let hours = count * config.hours_per_slot;
        if hours > config.teacher_hour_soft_cap {
            breakdown.overtime += hours + 1 - config.teacher_hour_soft_cap;
        }
    }

    breakdown
}
