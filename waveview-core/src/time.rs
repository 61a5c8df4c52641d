/// Format a time in seconds as `m:ss`.
///
/// Negative and non-finite values display as `0:00`. Minutes are not padded
/// and keep growing past 59 (`61:05`).
pub fn format_time(seconds: f64) -> String {
    let secs = if seconds.is_finite() && seconds > 0.0 { seconds } else { 0.0 };
    let whole = secs.floor() as u64;
    format!("{}:{:02}", whole / 60, whole % 60)
}

/// `position / duration` readout; an unknown duration shows as `0:00`.
pub fn format_progress(position: f64, duration: Option<f64>) -> String {
    format!(
        "{} / {}",
        format_time(position),
        format_time(duration.unwrap_or(0.0))
    )
}

/// Human-readable byte size for the file picker.
pub fn format_size(bytes: u64) -> String {
    const KB: f64 = 1024.0;
    const MB: f64 = KB * 1024.0;
    let b = bytes as f64;
    if b >= MB {
        format!("{:.1} MB", b / MB)
    } else if b >= KB {
        format!("{:.0} KB", b / KB)
    } else {
        format!("{} B", bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_negative_and_nan_are_zero() {
        assert_eq!(format_time(-5.0), "0:00");
        assert_eq!(format_time(0.0), "0:00");
        assert_eq!(format_time(f64::NAN), "0:00");
        assert_eq!(format_time(f64::INFINITY), "0:00");
        assert_eq!(format_time(f64::NEG_INFINITY), "0:00");
    }

    #[test]
    fn test_minutes_unpadded_seconds_padded() {
        assert_eq!(format_time(75.0), "1:15");
        assert_eq!(format_time(65.4), "1:05");
        assert_eq!(format_time(42.0), "0:42");
        assert_eq!(format_time(9.99), "0:09");
        assert_eq!(format_time(3665.0), "61:05");
    }

    #[test]
    fn test_reformatting_is_stable() {
        for &t in &[0.0, 1.5, 59.9, 60.0, 75.0, 599.0, 3601.2] {
            let first = format_time(t);
            let (m, s) = first.split_once(':').unwrap();
            let back = m.parse::<f64>().unwrap() * 60.0 + s.parse::<f64>().unwrap();
            assert_eq!(format_time(back), first);
        }
    }

    #[test]
    fn test_progress_before_duration_known() {
        assert_eq!(format_progress(0.0, None), "0:00 / 0:00");
        assert_eq!(format_progress(0.0, Some(42.0)), "0:00 / 0:42");
    }

    #[test]
    fn test_format_size() {
        assert_eq!(format_size(512), "512 B");
        assert_eq!(format_size(2048), "2 KB");
        assert_eq!(format_size(3 * 1024 * 1024 + 512 * 1024), "3.5 MB");
    }
}
