use std::collections::{HashMap, HashSet};

use super::types::{Assignment, AssignmentKey, Statistics};

/// In-memory mapping from grid cells to their assignments.
///
/// Entries survive grid regeneration on purpose: regenerating with a
/// different day or time configuration leaves keys for vanished cells in
/// place, so switching back to a previous configuration recovers them.
/// Only `clear` removes everything.
#[derive(Debug, Clone, Default)]
pub struct AssignmentStore {
    entries: HashMap<AssignmentKey, Assignment>,
}

impl AssignmentStore {
    pub fn new() -> Self {
        AssignmentStore::default()
    }

    /// Inserts or overwrites the assignment at the given cell.
    /// Subject validation happens upstream in the session layer.
    pub fn upsert(&mut self, key: AssignmentKey, assignment: Assignment) {
        self.entries.insert(key, assignment);
    }

    pub fn lookup(&self, key: &AssignmentKey) -> Option<&Assignment> {
        self.entries.get(key)
    }

    /// Removes the entry if present; returns whether anything was removed
    pub fn delete(&mut self, key: &AssignmentKey) -> bool {
        self.entries.remove(key).is_some()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn count(&self) -> usize {
        self.entries.len()
    }

    /// Summary counts for the statistics display
    pub fn statistics(&self) -> Statistics {
        let mut subjects = HashSet::new();
        let mut teachers = HashSet::new();
        for assignment in self.entries.values() {
            subjects.insert(assignment.subject.as_str());
            if let Some(teacher) = &assignment.teacher {
                teachers.insert(teacher.as_str());
            }
        }
        Statistics {
            total_slots: self.entries.len(),
            unique_subjects: subjects.len(),
            unique_teachers: teachers.len(),
        }
    }
}
