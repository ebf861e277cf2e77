//! Unit tests for reporting utilities.

use std::time::Duration;
use timetable_ga::catalog::{Catalog, Group, Room, Teacher};
use timetable_ga::schedule::{Origin, Schedule, ScheduleSlot, SubjectRef};
use timetable_ga::utils::{format_duration, render_timetable, write_schedule};

fn create_test_catalog() -> Catalog {
    Catalog::new(
        vec![Group::new("G1", 10)
            .with_subject("Math", 4)
            .with_subject("Physics", 2)],
        vec![Room::new("R1", 30)],
        vec![Teacher::new("Alice", 10, &["Math", "Physics"])],
    )
}

fn create_test_schedule() -> Schedule {
    let slot = |index, time_slot| ScheduleSlot {
        group: 0,
        subject: SubjectRef { group: 0, index },
        teacher: 0,
        room: 0,
        time_slot,
    };
    Schedule::from_slots(vec![slot(0, 3), slot(1, 1)], Origin::Initial)
}

#[test]
fn test_format_duration() {
    assert_eq!(format_duration(Duration::from_secs(0)), "0h 00m 00s");
    assert_eq!(format_duration(Duration::from_secs(3725)), "1h 02m 05s");
}

#[test]
fn test_write_schedule_in_slot_order() {
    let catalog = create_test_catalog();
    let schedule = create_test_schedule();

    let mut buffer = Vec::new();
    write_schedule(&schedule, &catalog, &mut buffer).unwrap();
    let output = String::from_utf8(buffer).unwrap();
    let lines: Vec<&str> = output.lines().collect();

    assert_eq!(
        lines,
        vec![
            "Group,Subject,Teacher,Room,TimeSlot",
            "G1,Math,Alice,R1,3",
            "G1,Physics,Alice,R1,1",
        ]
    );
}

#[test]
fn test_write_empty_schedule_has_header() {
    let catalog = create_test_catalog();
    let schedule = Schedule::from_slots(Vec::new(), Origin::Initial);

    let mut buffer = Vec::new();
    write_schedule(&schedule, &catalog, &mut buffer).unwrap();

    assert_eq!(
        String::from_utf8(buffer).unwrap().trim_end(),
        "Group,Subject,Teacher,Room,TimeSlot"
    );
}

#[test]
fn test_render_timetable_groups_by_time_slot() {
    let catalog = create_test_catalog();
    let rendered = render_timetable(&create_test_schedule(), &catalog);

    let first = rendered.find("Time slot 1:").unwrap();
    let second = rendered.find("Time slot 3:").unwrap();
    assert!(first < second);
    assert!(rendered.contains("Physics"));
}
