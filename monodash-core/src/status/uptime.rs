//! Uptime text

use core::fmt::Write;
use heapless::String;

/// Longest uptime text (`"HH:MM:SS"` / `">99h :SS"`)
pub const UPTIME_LEN: usize = 8;

/// Highest hour count shown in full
pub const MAX_SHOWN_HOURS: u64 = 99;

/// Format seconds since boot as `HH:MM:SS`
///
/// Past 99 hours the hour and minute fields no longer fit; the text
/// saturates to `">99h :SS"` with only the seconds still moving.
pub fn format_uptime(seconds: u64) -> String<UPTIME_LEN> {
    let minutes = seconds / 60;
    let hours = minutes / 60;
    let mut text = String::new();
    // Capacity is exact for both shapes
    let _ = if hours > MAX_SHOWN_HOURS {
        write!(text, ">99h :{:02}", seconds % 60)
    } else {
        write!(text, "{:02}:{:02}:{:02}", hours, minutes % 60, seconds % 60)
    };
    text
}
