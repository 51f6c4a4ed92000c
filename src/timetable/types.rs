use serde::{Serialize, Deserialize};

/// One of the seven canonical weekdays, in fixed Monday..Sunday order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Day {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl Day {
    /// Canonical ordering used for day selection and grid headers
    pub const ALL: [Day; 7] = [
        Day::Monday,
        Day::Tuesday,
        Day::Wednesday,
        Day::Thursday,
        Day::Friday,
        Day::Saturday,
        Day::Sunday,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Day::Monday => "Monday",
            Day::Tuesday => "Tuesday",
            Day::Wednesday => "Wednesday",
            Day::Thursday => "Thursday",
            Day::Friday => "Friday",
            Day::Saturday => "Saturday",
            Day::Sunday => "Sunday",
        }
    }
}

impl std::fmt::Display for Day {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Fixed color palette for subject cells
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubjectColor {
    #[default]
    Blue,
    Green,
    Purple,
    Orange,
    Red,
    Teal,
}

impl SubjectColor {
    /// CSS class suffix used by the grid and the exported document
    pub fn css_class(self) -> &'static str {
        match self {
            SubjectColor::Blue => "blue",
            SubjectColor::Green => "green",
            SubjectColor::Purple => "purple",
            SubjectColor::Orange => "orange",
            SubjectColor::Red => "red",
            SubjectColor::Teal => "teal",
        }
    }
}

/// A discrete time interval within the configured day span.
/// Both bounds are HH:MM wall-clock labels; end - start always equals the
/// configured slot duration (partial trailing slots are never emitted).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeSlot {
    pub start: String,
    pub end: String,
}

/// Identifies one grid cell: (day, slot start time).
/// Slots from a regenerated grid join against previously entered data
/// through this key, so equal start times on the same day collide by design.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AssignmentKey {
    pub day: Day,
    pub start: String,
}

impl AssignmentKey {
    pub fn new(day: Day, start: impl Into<String>) -> Self {
        AssignmentKey { day, start: start.into() }
    }
}

/// The subject/teacher/room/color record attached to one grid cell
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assignment {
    pub subject: String,
    pub teacher: Option<String>,
    pub room: Option<String>,
    pub color: SubjectColor,
}

/// Summary counts over the assignment store, for display only
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Statistics {
    pub total_slots: usize,
    pub unique_subjects: usize,
    pub unique_teachers: usize,
}
