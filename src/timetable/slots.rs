use super::types::TimeSlot;

/// Parses a time string (HH:MM) to minutes since midnight
pub fn parse_time(time_str: &str) -> Option<u32> {
    let parts: Vec<&str> = time_str.trim().split(':').collect();
    if parts.len() != 2 {
        return None;
    }
    let hours: u32 = parts[0].parse().ok()?;
    let minutes: u32 = parts[1].parse().ok()?;
    if hours >= 24 || minutes >= 60 {
        return None;
    }
    Some(hours * 60 + minutes)
}

/// Formats minutes since midnight to time string (HH:MM)
pub fn format_time(minutes: u32) -> String {
    let hours = minutes / 60;
    let mins = minutes % 60;
    format!("{:02}:{:02}", hours % 24, mins)
}

/// Calculates time slots between start and end (minutes since midnight).
/// Starting at `start`, advances by `duration` minutes and emits a slot only
/// while it still fits fully before `end`; a trailing remainder shorter than
/// one duration is dropped. Returns an empty list when the range is not
/// ascending or nothing fits.
pub fn generate_slots(start: u32, end: u32, duration: u32) -> Vec<TimeSlot> {
    if duration == 0 {
        return Vec::new();
    }

    let mut slots = Vec::new();
    let mut current = start;
    while current + duration <= end {
        slots.push(TimeSlot {
            start: format_time(current),
            end: format_time(current + duration),
        });
        current += duration;
    }
    slots
}
