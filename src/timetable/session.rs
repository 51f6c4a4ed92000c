use serde::{Serialize, Deserialize};

use super::days::selected_days;
use super::error::TimetableError;
use super::slots::{generate_slots, parse_time};
use super::store::AssignmentStore;
use super::types::{Assignment, AssignmentKey, Day, Statistics, SubjectColor, TimeSlot};

/// Grid configuration as submitted by the user
#[derive(Debug, Clone, Deserialize)]
pub struct GridRequest {
    pub start_time: String,
    pub end_time: String,
    pub slot_duration: u32,
    pub days: [bool; 7],
}

/// The derived grid: selected days crossed with the generated slots
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Grid {
    pub days: Vec<Day>,
    pub slots: Vec<TimeSlot>,
}

/// Raw cell form input; empty teacher/room fields mean "not set"
#[derive(Debug, Clone, Deserialize)]
pub struct AssignmentDraft {
    pub subject: String,
    #[serde(default)]
    pub teacher: String,
    #[serde(default)]
    pub room: String,
    #[serde(default)]
    pub color: SubjectColor,
}

/// Outcome of a cell submission: the stored record plus whether an existing
/// entry was overwritten (drives the "added" vs "updated" notification)
#[derive(Debug, Clone)]
pub struct CellUpdate {
    pub key: AssignmentKey,
    pub assignment: Assignment,
    pub updated: bool,
}

/// One user's timetable state: the last generated grid plus the assignment
/// store. Everything lives here rather than in ambient globals, so the whole
/// lifecycle is construction, method calls, discard.
#[derive(Debug, Clone, Default)]
pub struct TimetableSession {
    grid: Option<Grid>,
    store: AssignmentStore,
}

impl TimetableSession {
    pub fn new() -> Self {
        TimetableSession::default()
    }

    /// Validates the request and replaces the current grid.
    ///
    /// Assignments are intentionally left untouched: entries keyed by cells
    /// that no longer exist stay in the store and come back when the grid is
    /// regenerated to a configuration containing them again.
    pub fn generate(&mut self, req: &GridRequest) -> Result<&Grid, TimetableError> {
        let days = selected_days(&req.days);
        if days.is_empty() {
            return Err(TimetableError::NoDaysSelected);
        }

        let start = parse_time(&req.start_time)
            .ok_or_else(|| TimetableError::InvalidTime(req.start_time.clone()))?;
        let end = parse_time(&req.end_time)
            .ok_or_else(|| TimetableError::InvalidTime(req.end_time.clone()))?;
        if start >= end {
            return Err(TimetableError::InvalidRange);
        }

        let slots = generate_slots(start, end, req.slot_duration);
        if slots.is_empty() {
            return Err(TimetableError::NoSlotsGenerated);
        }

        let grid: &Grid = self.grid.insert(Grid { days, slots });
        Ok(grid)
    }

    pub fn grid(&self) -> Option<&Grid> {
        self.grid.as_ref()
    }

    /// The current grid, or `EmptyGrid` when nothing has been generated yet
    pub fn require_grid(&self) -> Result<&Grid, TimetableError> {
        self.grid.as_ref().ok_or(TimetableError::EmptyGrid)
    }

    /// Validates and stores a cell submission. The subject name is required;
    /// teacher and room are kept only when non-blank after trimming.
    pub fn put_assignment(
        &mut self,
        day: Day,
        start: &str,
        draft: &AssignmentDraft,
    ) -> Result<CellUpdate, TimetableError> {
        let subject = draft.subject.trim();
        if subject.is_empty() {
            return Err(TimetableError::EmptySubjectName);
        }

        let optional = |field: &str| {
            let trimmed = field.trim();
            (!trimmed.is_empty()).then(|| trimmed.to_string())
        };

        let key = AssignmentKey::new(day, start);
        let assignment = Assignment {
            subject: subject.to_string(),
            teacher: optional(&draft.teacher),
            room: optional(&draft.room),
            color: draft.color,
        };

        let updated = self.store.lookup(&key).is_some();
        self.store.upsert(key.clone(), assignment.clone());
        Ok(CellUpdate { key, assignment, updated })
    }

    pub fn assignment(&self, day: Day, start: &str) -> Option<&Assignment> {
        self.store.lookup(&AssignmentKey::new(day, start))
    }

    /// Removes a cell's assignment; returns whether anything was there
    pub fn remove_assignment(&mut self, day: Day, start: &str) -> bool {
        self.store.delete(&AssignmentKey::new(day, start))
    }

    /// Drops every assignment and reports how many were removed
    pub fn clear(&mut self) -> usize {
        let removed = self.store.count();
        self.store.clear();
        removed
    }

    pub fn statistics(&self) -> Statistics {
        self.store.statistics()
    }

    pub fn store(&self) -> &AssignmentStore {
        &self.store
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn week_request() -> GridRequest {
        GridRequest {
            start_time: "09:00".to_string(),
            end_time: "11:00".to_string(),
            slot_duration: 30,
            days: [true, true, true, true, true, false, false],
        }
    }

    fn draft(subject: &str) -> AssignmentDraft {
        AssignmentDraft {
            subject: subject.to_string(),
            teacher: String::new(),
            room: String::new(),
            color: SubjectColor::Blue,
        }
    }

    #[test]
    fn generate_builds_the_expected_grid() {
        let mut session = TimetableSession::new();
        let grid = session.generate(&week_request()).unwrap();
        assert_eq!(grid.days.len(), 5);
        assert_eq!(grid.slots.len(), 4);
        assert_eq!(grid.slots[0].start, "09:00");
        assert_eq!(grid.slots[3].end, "11:00");
    }

    #[test]
    fn day_selection_is_checked_before_the_time_range() {
        let mut session = TimetableSession::new();
        let mut req = week_request();
        req.days = [false; 7];
        req.end_time = "08:00".to_string();
        assert_eq!(session.generate(&req), Err(TimetableError::NoDaysSelected));
    }

    #[test]
    fn rejects_unparseable_times() {
        let mut session = TimetableSession::new();
        let mut req = week_request();
        req.start_time = "9 o'clock".to_string();
        assert_eq!(
            session.generate(&req),
            Err(TimetableError::InvalidTime("9 o'clock".to_string()))
        );
    }

    #[test]
    fn rejects_end_not_after_start() {
        let mut session = TimetableSession::new();
        let mut req = week_request();
        req.end_time = "09:00".to_string();
        assert_eq!(session.generate(&req), Err(TimetableError::InvalidRange));
        assert!(session.grid().is_none());
    }

    #[test]
    fn rejects_duration_too_coarse_for_the_range() {
        let mut session = TimetableSession::new();
        let mut req = week_request();
        req.slot_duration = 180;
        assert_eq!(session.generate(&req), Err(TimetableError::NoSlotsGenerated));
    }

    #[test]
    fn failed_generation_keeps_the_previous_grid() {
        let mut session = TimetableSession::new();
        session.generate(&week_request()).unwrap();
        let mut bad = week_request();
        bad.end_time = "08:00".to_string();
        assert!(session.generate(&bad).is_err());
        assert_eq!(session.grid().unwrap().slots.len(), 4);
    }

    #[test]
    fn put_assignment_requires_a_subject() {
        let mut session = TimetableSession::new();
        session.generate(&week_request()).unwrap();
        let result = session.put_assignment(Day::Monday, "09:00", &draft("   "));
        assert_eq!(result.unwrap_err(), TimetableError::EmptySubjectName);
        assert!(session.assignment(Day::Monday, "09:00").is_none());
    }

    #[test]
    fn put_assignment_trims_and_drops_blank_optionals() {
        let mut session = TimetableSession::new();
        let mut entry = draft("  Math ");
        entry.teacher = " Smith ".to_string();
        entry.room = "   ".to_string();
        let update = session.put_assignment(Day::Monday, "09:00", &entry).unwrap();
        assert!(!update.updated);
        assert_eq!(update.assignment.subject, "Math");
        assert_eq!(update.assignment.teacher.as_deref(), Some("Smith"));
        assert_eq!(update.assignment.room, None);
    }

    #[test]
    fn resubmission_reports_an_update() {
        let mut session = TimetableSession::new();
        session.put_assignment(Day::Monday, "09:00", &draft("Math")).unwrap();
        let update = session.put_assignment(Day::Monday, "09:00", &draft("Physics")).unwrap();
        assert!(update.updated);
        assert_eq!(session.statistics().total_slots, 1);
    }

    #[test]
    fn remove_assignment_round_trip() {
        let mut session = TimetableSession::new();
        session.put_assignment(Day::Monday, "09:00", &draft("Math")).unwrap();
        assert!(session.remove_assignment(Day::Monday, "09:00"));
        assert!(!session.remove_assignment(Day::Monday, "09:00"));
        assert!(session.assignment(Day::Monday, "09:00").is_none());
    }

    #[test]
    fn regeneration_preserves_assignments_for_recovered_cells() {
        let mut session = TimetableSession::new();
        session.generate(&week_request()).unwrap();
        session.put_assignment(Day::Friday, "09:00", &draft("Math")).unwrap();

        // Shrink the week so Friday's cell disappears, then bring it back
        let mut weekdays_only = week_request();
        weekdays_only.days = [true, true, false, false, false, false, false];
        session.generate(&weekdays_only).unwrap();
        assert_eq!(session.statistics().total_slots, 1);

        session.generate(&week_request()).unwrap();
        assert_eq!(
            session.assignment(Day::Friday, "09:00").map(|a| a.subject.as_str()),
            Some("Math")
        );
    }

    #[test]
    fn clear_reports_how_many_entries_were_dropped() {
        let mut session = TimetableSession::new();
        session.put_assignment(Day::Monday, "09:00", &draft("Math")).unwrap();
        session.put_assignment(Day::Tuesday, "10:00", &draft("Art")).unwrap();
        assert_eq!(session.clear(), 2);
        assert_eq!(session.clear(), 0);
        assert!(session.store().is_empty());
    }

    #[test]
    fn require_grid_fails_before_first_generation() {
        let session = TimetableSession::new();
        assert_eq!(session.require_grid().unwrap_err(), TimetableError::EmptyGrid);
    }
}
