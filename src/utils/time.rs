//! Clock formatting helpers

/// Format a second count as `m:ss`
pub fn format_clock(total_seconds: u64) -> String {
    let minutes = total_seconds / 60;
    let seconds = total_seconds % 60;
    format!("{}:{:02}", minutes, seconds)
}

#[cfg(test)]
mod tests {
    use super::format_clock;

    #[test]
    fn formats_minutes_and_seconds() {
        assert_eq!(format_clock(0), "0:00");
        assert_eq!(format_clock(9), "0:09");
        assert_eq!(format_clock(1200), "20:00");
        assert_eq!(format_clock(18_059), "300:59");
    }
}
