//! Utility functions and structures for reporting search results.

use std::io::Write;
use std::path::Path;
use std::time::Duration;

use itertools::Itertools;
use serde::Serialize;

use crate::catalog::Catalog;
use crate::error::Result;
use crate::schedule::Schedule;

/// Format a duration as hours, minutes, and seconds.
pub fn format_duration(duration: Duration) -> String {
    let total_seconds = duration.as_secs();
    let hours = total_seconds / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let seconds = total_seconds % 60;

    format!("{}h {:02}m {:02}s", hours, minutes, seconds)
}

/// One output record of the final timetable.
#[derive(Debug, Serialize)]
struct SlotRecord<'a> {
    #[serde(rename = "Group")]
    group: &'a str,
    #[serde(rename = "Subject")]
    subject: &'a str,
    #[serde(rename = "Teacher")]
    teacher: &'a str,
    #[serde(rename = "Room")]
    room: &'a str,
    #[serde(rename = "TimeSlot")]
    time_slot: u32,
}

/// Write a schedule as CSV, one record per slot in slot order.
pub fn write_schedule<W: Write>(schedule: &Schedule, catalog: &Catalog, writer: W) -> Result<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);

    for slot in &schedule.slots {
        csv_writer.serialize(SlotRecord {
            group: &catalog.groups[slot.group].name,
            subject: slot.subject_name(catalog),
            teacher: &catalog.teachers[slot.teacher].name,
            room: &catalog.rooms[slot.room].name,
            time_slot: slot.time_slot,
        })?;
    }

    // An empty schedule still gets its header row
    if schedule.is_empty() {
        csv_writer.write_record(["Group", "Subject", "Teacher", "Room", "TimeSlot"])?;
    }

    csv_writer.flush()?;
    Ok(())
}

/// Save a schedule to a CSV file.
pub fn save_schedule<P: AsRef<Path>>(schedule: &Schedule, catalog: &Catalog, path: P) -> Result<()> {
    let file = std::fs::File::create(path)?;
    write_schedule(schedule, catalog, file)
}

/// Summary of a finished search.
#[derive(Debug, Clone, Serialize)]
pub struct SearchStatistics {
    pub generations: usize,
    pub runtime: Duration,
    pub best_fitness: u64,
    pub rain_events: usize,
    pub slot_count: usize,
    pub population_size: usize,
}

impl SearchStatistics {
    /// Format the statistics as a string.
    pub fn format(&self) -> String {
        format!(
            "Search Statistics:
- Generations: {}
- Runtime: {}
- Best Fitness: {}
- Rain Events: {}
- Slots: {}
- Population Size: {}",
            self.generations,
            format_duration(self.runtime),
            self.best_fitness,
            self.rain_events,
            self.slot_count,
            self.population_size
        )
    }
}

/// Render a schedule grouped by time slot.
pub fn render_timetable(schedule: &Schedule, catalog: &Catalog) -> String {
    let mut out = String::new();

    for (time_slot, slots) in &schedule
        .slots
        .iter()
        .sorted_by_key(|slot| slot.time_slot)
        .group_by(|slot| slot.time_slot)
    {
        out.push_str(&format!("Time slot {}:\n", time_slot));
        for slot in slots {
            out.push_str(&format!(
                "  {:<12} {:<16} {:<16} {}\n",
                catalog.groups[slot.group].name,
                slot.subject_name(catalog),
                catalog.teachers[slot.teacher].name,
                catalog.rooms[slot.room].name
            ));
        }
    }

    out
}

/// Print a schedule to the console.
pub fn print_timetable(schedule: &Schedule, catalog: &Catalog) {
    println!("Timetable (fitness {})", schedule.fitness());
    print!("{}", render_timetable(schedule, catalog));
}
