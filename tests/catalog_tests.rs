//! Tests for the entity catalog and its CSV loader.

use std::fs;
use timetable_ga::catalog::{Catalog, Group, Room, Teacher};
use timetable_ga::error::TimetableError;

const GROUPS: &str = "G1,25\nG2, 30\n";
const SUBJECTS: &str = "G1,Math,4\nG1,Physics,2\nG2,Math,4\nGX,Latin,3\n";
const ROOMS: &str = "R1,30\nR2,20\n";
const TEACHERS: &str = "Alice,12,Math,Physics\nBob,8,History\nCarol,6\n";

fn load(groups: &str, subjects: &str, rooms: &str, teachers: &str) -> Result<Catalog, TimetableError> {
    Catalog::from_readers(
        groups.as_bytes(),
        subjects.as_bytes(),
        rooms.as_bytes(),
        teachers.as_bytes(),
    )
}

#[test]
fn test_load_from_readers() {
    let catalog = load(GROUPS, SUBJECTS, ROOMS, TEACHERS).unwrap();

    assert_eq!(catalog.groups.len(), 2);
    assert_eq!(catalog.groups[1].name, "G2");
    assert_eq!(catalog.groups[1].student_count, 30);

    let g1_subjects: Vec<&str> = catalog.groups[0]
        .subjects
        .iter()
        .map(|s| s.name.as_str())
        .collect();
    assert_eq!(g1_subjects, vec!["Math", "Physics"]);
    assert_eq!(catalog.groups[0].subjects[0].weekly_hours, 4);

    assert_eq!(catalog.rooms, vec![Room::new("R1", 30), Room::new("R2", 20)]);

    assert_eq!(catalog.teachers.len(), 3);
    assert_eq!(catalog.teachers[0].max_weekly_hours, 12);
    assert!(catalog.teachers[0].is_qualified_for("Math"));
    assert!(catalog.teachers[0].is_qualified_for("Physics"));
    assert!(!catalog.teachers[1].is_qualified_for("Math"));
    assert!(catalog.teachers[2].qualified_subjects.is_empty());
}

#[test]
fn test_subjects_for_unknown_groups_are_ignored() {
    let catalog = load(GROUPS, SUBJECTS, ROOMS, TEACHERS).unwrap();

    assert_eq!(catalog.requirement_count(), 3);
    assert!(catalog
        .groups
        .iter()
        .flat_map(|g| g.subjects.iter())
        .all(|s| s.name != "Latin"));
}

#[test]
fn test_non_numeric_count_is_a_data_format_error() {
    let result = load("G1,25\nG2,many\n", SUBJECTS, ROOMS, TEACHERS);

    match result {
        Err(TimetableError::DataFormat { line, message, .. }) => {
            assert_eq!(line, 2);
            assert!(message.contains("student count"));
        }
        other => panic!("expected a data format error, got {:?}", other.map(|_| ())),
    }
}

#[test]
fn test_missing_field_is_a_data_format_error() {
    let result = load(GROUPS, SUBJECTS, "R1\n", TEACHERS);
    assert!(matches!(result, Err(TimetableError::DataFormat { .. })));

    let result = load(GROUPS, "G1,Math\n", ROOMS, TEACHERS);
    assert!(matches!(result, Err(TimetableError::DataFormat { .. })));
}

#[test]
fn test_requirements_follow_catalog_order() {
    let catalog = Catalog::new(
        vec![
            Group::new("G1", 1).with_subject("A", 1).with_subject("B", 1),
            Group::new("G2", 1),
            Group::new("G3", 1).with_subject("C", 1),
        ],
        vec![Room::new("R1", 1)],
        vec![Teacher::new("T1", 1, &["A"])],
    );

    let requirements: Vec<_> = catalog.requirements().collect();
    assert_eq!(requirements, vec![(0, 0), (0, 1), (2, 0)]);
    assert_eq!(catalog.requirement_count(), 3);
    assert!(catalog.ensure_non_empty().is_ok());
}

#[test]
fn test_load_from_files() {
    let dir = std::env::temp_dir().join(format!("timetable_ga_catalog_{}", std::process::id()));
    fs::create_dir_all(&dir).unwrap();

    let groups = dir.join("groups.csv");
    let subjects = dir.join("subjects.csv");
    let rooms = dir.join("rooms.csv");
    let teachers = dir.join("teachers.csv");
    fs::write(&groups, GROUPS).unwrap();
    fs::write(&subjects, SUBJECTS).unwrap();
    fs::write(&rooms, ROOMS).unwrap();
    fs::write(&teachers, TEACHERS).unwrap();

    let catalog = Catalog::from_csv_files(&groups, &subjects, &rooms, &teachers).unwrap();
    assert_eq!(catalog.groups.len(), 2);
    assert_eq!(catalog.requirement_count(), 3);

    let missing = Catalog::from_csv_files(&dir.join("nope.csv"), &subjects, &rooms, &teachers);
    assert!(matches!(missing, Err(TimetableError::Io(_))));

    fs::remove_dir_all(&dir).unwrap();
}
