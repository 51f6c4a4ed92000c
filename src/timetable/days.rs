use super::types::Day;

/// Filters the seven weekday flags down to the selected days, always in
/// canonical Monday..Sunday order regardless of how the input was produced
pub fn selected_days(flags: &[bool; 7]) -> Vec<Day> {
    Day::ALL
        .iter()
        .zip(flags.iter())
        .filter(|(_, &checked)| checked)
        .map(|(&day, _)| day)
        .collect()
}
