use csv::WriterBuilder;

use crate::timetable::{AssignmentKey, AssignmentStore, Grid};

/// Download name offered for the CSV export
pub const EXPORT_FILENAME: &str = "my-timetable.csv";

/// Serializes the grid into CSV: one header row of day names, then one row
/// per slot with each day's cell flattened to "subject - teacher - Room N"
pub fn export_csv(grid: &Grid, store: &AssignmentStore) -> Result<String, Box<dyn std::error::Error>> {
    let mut wtr = WriterBuilder::new().from_writer(vec![]);

    let mut header = vec!["Time".to_string()];
    header.extend(grid.days.iter().map(|day| day.name().to_string()));
    wtr.write_record(&header)?;

    for slot in &grid.slots {
        let mut record = vec![format!("{} - {}", slot.start, slot.end)];
        for &day in &grid.days {
            let cell = store
                .lookup(&AssignmentKey::new(day, slot.start.clone()))
                .map(|assignment| {
                    let mut parts = vec![assignment.subject.clone()];
                    if let Some(teacher) = &assignment.teacher {
                        parts.push(teacher.clone());
                    }
                    if let Some(room) = &assignment.room {
                        parts.push(format!("Room {}", room));
                    }
                    parts.join(" - ")
                })
                .unwrap_or_default();
            record.push(cell);
        }
        wtr.write_record(&record)?;
    }

    wtr.flush()?;
    Ok(String::from_utf8(wtr.into_inner()?)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::timetable::{Assignment, Day, SubjectColor, TimeSlot};

    fn grid() -> Grid {
        Grid {
            days: vec![Day::Monday, Day::Wednesday],
            slots: vec![TimeSlot { start: "09:00".into(), end: "10:00".into() }],
        }
    }

    #[test]
    fn header_row_lists_time_and_days() {
        let csv = export_csv(&grid(), &AssignmentStore::new()).unwrap();
        let mut lines = csv.lines();
        assert_eq!(lines.next(), Some("Time,Monday,Wednesday"));
    }

    #[test]
    fn cells_flatten_assignment_fields() {
        let mut store = AssignmentStore::new();
        store.upsert(
            AssignmentKey::new(Day::Wednesday, "09:00"),
            Assignment {
                subject: "Math".into(),
                teacher: Some("Smith".into()),
                room: Some("101".into()),
                color: SubjectColor::Blue,
            },
        );
        let csv = export_csv(&grid(), &store).unwrap();
        let row = csv.lines().nth(1).unwrap();
        assert_eq!(row, "09:00 - 10:00,,Math - Smith - Room 101");
    }

    #[test]
    fn one_row_per_slot() {
        let mut wide = grid();
        wide.slots.push(TimeSlot { start: "10:00".into(), end: "11:00".into() });
        let csv = export_csv(&wide, &AssignmentStore::new()).unwrap();
        assert_eq!(csv.lines().count(), 3);
    }
}
