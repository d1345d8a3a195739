// SPDX-License-Identifier: MPL-2.0
//! Clock formatting for the time readout.

/// Formats seconds as `m:ss`, or `h:mm:ss` from one hour up.
///
/// Fractions are truncated. Negative and non-finite input reads as zero.
#[must_use]
pub fn format_clock(seconds: f64) -> String {
    let total_secs = if seconds.is_finite() {
        seconds.max(0.0) as u64
    } else {
        0
    };
    let hours = total_secs / 3600;
    let minutes = (total_secs % 3600) / 60;
    let secs = total_secs % 60;

    if hours > 0 {
        format!("{}:{:02}:{:02}", hours, minutes, secs)
    } else {
        format!("{}:{:02}", minutes, secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_clock_handles_zero() {
        assert_eq!(format_clock(0.0), "0:00");
    }

    #[test]
    fn format_clock_handles_seconds() {
        assert_eq!(format_clock(45.9), "0:45");
    }

    #[test]
    fn format_clock_handles_minutes() {
        assert_eq!(format_clock(125.0), "2:05");
        assert_eq!(format_clock(3599.0), "59:59");
    }

    #[test]
    fn format_clock_handles_hours() {
        assert_eq!(format_clock(3600.0), "1:00:00");
        assert_eq!(format_clock(3665.0), "1:01:05");
        assert_eq!(format_clock(36_000.0), "10:00:00");
    }

    #[test]
    fn format_clock_handles_invalid_input() {
        // Negative time should be clamped to 0
        assert_eq!(format_clock(-10.0), "0:00");
        assert_eq!(format_clock(f64::NAN), "0:00");
        assert_eq!(format_clock(f64::INFINITY), "0:00");
    }
}
