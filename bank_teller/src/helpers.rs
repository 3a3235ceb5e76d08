//! Formatting helpers for simulation traces.

/// Render a simulation minute as a wall-clock `HH:MM` label.
///
/// Hours are not wrapped at 24: simulation minutes count from the start
/// of the run, and multi-day horizons simply show larger hour values.
///
/// # Examples
///
/// ```
/// use bank_teller::helpers::format_clock;
///
/// assert_eq!(format_clock(8 * 60), "08:00");
/// assert_eq!(format_clock(9 * 60 + 5), "09:05");
/// assert_eq!(format_clock(0), "00:00");
/// ```
pub fn format_clock(minutes: usize) -> String {
    format!("{:02}:{:02}", minutes / 60, minutes % 60)
}
