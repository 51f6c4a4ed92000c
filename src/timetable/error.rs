use thiserror::Error;

/// Everything that can go wrong during grid generation, assignment entry,
/// or export. All variants are user-facing and recoverable; the messages
/// are shown verbatim as notification toasts.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TimetableError {
    #[error("Please select at least one day!")]
    NoDaysSelected,
    #[error("'{0}' is not a valid HH:MM time")]
    InvalidTime(String),
    #[error("End time must be after start time!")]
    InvalidRange,
    #[error("No valid time slots could be generated!")]
    NoSlotsGenerated,
    #[error("Please enter a subject name!")]
    EmptySubjectName,
    #[error("Please generate a timetable first!")]
    EmptyGrid,
}
