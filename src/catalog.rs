//! Entity catalog for the timetabling problem: groups with their required
//! subjects, rooms, and teachers.
//!
//! The catalog is loaded once before the search and never changes afterwards.

use crate::error::{Result, TimetableError};
use csv::{ReaderBuilder, StringRecord, Trim};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::str::FromStr;

/// A subject a group must be taught, with its weekly hour count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subject {
    pub name: String,
    pub weekly_hours: u32,
}

impl Subject {
    /// Create a new subject.
    pub fn new(name: &str, weekly_hours: u32) -> Self {
        Subject {
            name: name.to_string(),
            weekly_hours,
        }
    }
}

/// A group of students and the ordered list of subjects it requires.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Group {
    pub name: String,
    pub student_count: u32,
    pub subjects: Vec<Subject>,
}

impl Group {
    /// Create a group with no required subjects.
    pub fn new(name: &str, student_count: u32) -> Self {
        Group {
            name: name.to_string(),
            student_count,
            subjects: Vec::new(),
        }
    }

    /// Add a required subject, builder style.
    pub fn with_subject(mut self, name: &str, weekly_hours: u32) -> Self {
        self.subjects.push(Subject::new(name, weekly_hours));
        self
    }
}

/// A room with its seating capacity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Room {
    pub name: String,
    pub capacity: u32,
}

impl Room {
    /// Create a new room.
    pub fn new(name: &str, capacity: u32) -> Self {
        Room {
            name: name.to_string(),
            capacity,
        }
    }
}

/// A teacher, the weekly hours they may teach and the subjects they are qualified for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Teacher {
    pub name: String,
    pub max_weekly_hours: u32,
    pub qualified_subjects: HashSet<String>,
}

impl Teacher {
    /// Create a new teacher.
    pub fn new(name: &str, max_weekly_hours: u32, subjects: &[&str]) -> Self {
        Teacher {
            name: name.to_string(),
            max_weekly_hours,
            qualified_subjects: subjects.iter().map(|s| s.to_string()).collect(),
        }
    }

    /// Check whether the teacher may teach the named subject.
    pub fn is_qualified_for(&self, subject: &str) -> bool {
        self.qualified_subjects.contains(subject)
    }
}

/// The immutable input of a search run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Catalog {
    pub groups: Vec<Group>,
    pub rooms: Vec<Room>,
    pub teachers: Vec<Teacher>,
}

impl Catalog {
    /// Create a catalog from already validated collections.
    pub fn new(groups: Vec<Group>, rooms: Vec<Room>, teachers: Vec<Teacher>) -> Self {
        Catalog {
            groups,
            rooms,
            teachers,
        }
    }

    /// Total number of (group, subject) requirements, which is the slot count of every schedule.
    pub fn requirement_count(&self) -> usize {
        self.groups.iter().map(|g| g.subjects.len()).sum()
    }

    /// Iterate over all requirements as `(group index, subject index)` in catalog order.
    pub fn requirements(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.groups
            .iter()
            .enumerate()
            .flat_map(|(g, group)| (0..group.subjects.len()).map(move |s| (g, s)))
    }

    /// Ensure the catalog can seed random candidates.
    pub fn ensure_non_empty(&self) -> Result<()> {
        if self.groups.is_empty() {
            return Err(TimetableError::Configuration(
                "catalog contains no groups".to_string(),
            ));
        }
        if self.rooms.is_empty() {
            return Err(TimetableError::Configuration(
                "catalog contains no rooms".to_string(),
            ));
        }
        if self.teachers.is_empty() {
            return Err(TimetableError::Configuration(
                "catalog contains no teachers".to_string(),
            ));
        }
        Ok(())
    }

    /// Load a catalog from four comma-delimited, header-less files.
    ///
    /// Subject records naming an unknown group are ignored.
    pub fn from_csv_files<P: AsRef<Path>>(
        groups_path: P,
        subjects_path: P,
        rooms_path: P,
        teachers_path: P,
    ) -> Result<Self> {
        let mut groups = parse_groups(File::open(&groups_path)?, groups_path.as_ref())?;
        parse_subjects(
            File::open(&subjects_path)?,
            subjects_path.as_ref(),
            &mut groups,
        )?;
        let rooms = parse_rooms(File::open(&rooms_path)?, rooms_path.as_ref())?;
        let teachers = parse_teachers(File::open(&teachers_path)?, teachers_path.as_ref())?;

        Ok(Catalog::new(groups, rooms, teachers))
    }

    /// Load a catalog from in-memory readers using the same record formats as
    /// [`Catalog::from_csv_files`].
    pub fn from_readers<R: Read>(groups: R, subjects: R, rooms: R, teachers: R) -> Result<Self> {
        let mut parsed_groups = parse_groups(groups, Path::new("groups"))?;
        parse_subjects(subjects, Path::new("subjects"), &mut parsed_groups)?;
        let rooms = parse_rooms(rooms, Path::new("rooms"))?;
        let teachers = parse_teachers(teachers, Path::new("teachers"))?;

        Ok(Catalog::new(parsed_groups, rooms, teachers))
    }
}

fn records<R: Read>(reader: R) -> csv::StringRecordsIntoIter<R> {
    ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(reader)
        .into_records()
}

fn line_of(record: &StringRecord) -> u64 {
    record.position().map_or(0, |p| p.line())
}

fn text_field<'r>(record: &'r StringRecord, index: usize, what: &str, source: &Path) -> Result<&'r str> {
    match record.get(index) {
        Some(value) if !value.is_empty() => Ok(value),
        _ => Err(TimetableError::data_format(
            source,
            line_of(record),
            format!("missing {}", what),
        )),
    }
}

fn numeric_field<T: FromStr>(
    record: &StringRecord,
    index: usize,
    what: &str,
    source: &Path,
) -> Result<T> {
    let value = text_field(record, index, what, source)?;
    value.parse::<T>().map_err(|_| {
        TimetableError::data_format(
            source,
            line_of(record),
            format!("{} is not a non-negative integer: '{}'", what, value),
        )
    })
}

fn parse_groups<R: Read>(reader: R, source: &Path) -> Result<Vec<Group>> {
    let mut groups = Vec::new();
    for record in records(reader) {
        let record = record?;
        let name = text_field(&record, 0, "group name", source)?;
        let student_count = numeric_field(&record, 1, "student count", source)?;
        groups.push(Group::new(name, student_count));
    }
    Ok(groups)
}

fn parse_subjects<R: Read>(reader: R, source: &Path, groups: &mut [Group]) -> Result<()> {
    for record in records(reader) {
        let record = record?;
        let group_name = text_field(&record, 0, "group name", source)?;
        let subject_name = text_field(&record, 1, "subject name", source)?;
        let hours = numeric_field(&record, 2, "weekly hours", source)?;

        match groups.iter_mut().find(|g| g.name == group_name) {
            Some(group) => group.subjects.push(Subject::new(subject_name, hours)),
            None => log::debug!(
                "Ignoring subject '{}' for unknown group '{}'",
                subject_name,
                group_name
            ),
        }
    }
    Ok(())
}

fn parse_rooms<R: Read>(reader: R, source: &Path) -> Result<Vec<Room>> {
    let mut rooms = Vec::new();
    for record in records(reader) {
        let record = record?;
        let name = text_field(&record, 0, "room name", source)?;
        let capacity = numeric_field(&record, 1, "room capacity", source)?;
        rooms.push(Room::new(name, capacity));
    }
    Ok(rooms)
}

fn parse_teachers<R: Read>(reader: R, source: &Path) -> Result<Vec<Teacher>> {
    let mut teachers = Vec::new();
    for record in records(reader) {
        let record = record?;
        let name = text_field(&record, 0, "teacher name", source)?;
        let max_weekly_hours = numeric_field(&record, 1, "teacher hours", source)?;
        let qualified_subjects = record
            .iter()
            .skip(2)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect();

        teachers.push(Teacher {
            name: name.to_string(),
            max_weekly_hours,
            qualified_subjects,
        });
    }
    Ok(teachers)
}
