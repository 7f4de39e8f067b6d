//! Display formatting for stopwatch and countdown values.

/// Formats an elapsed time as `MM:SS.CC`.
///
/// Minutes are unbounded (`125:00.00` after two hours and five minutes);
/// seconds and centiseconds are always two digits. All divisions floor.
pub fn format_stopwatch(ms: u64) -> String {
    let minutes = ms / 60_000;
    let seconds = (ms % 60_000) / 1000;
    let centiseconds = (ms % 1000) / 10;
    format!("{:02}:{:02}.{:02}", minutes, seconds, centiseconds)
}

/// Formats a remaining time as `MM:SS`, truncating sub-second precision.
pub fn format_countdown(ms: u64) -> String {
    let total_seconds = ms / 1000;
    let minutes = total_seconds / 60;
    let seconds = total_seconds % 60;
    format!("{:02}:{:02}", minutes, seconds)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Splits `MM:SS.CC` back into its numeric fields.
    fn parse_stopwatch(s: &str) -> (u64, u64, u64) {
        let (minutes, rest) = s.split_once(':').unwrap();
        let (seconds, centis) = rest.split_once('.').unwrap();
        assert!(minutes.len() >= 2 && minutes.chars().all(|c| c.is_ascii_digit()));
        assert_eq!(seconds.len(), 2);
        assert_eq!(centis.len(), 2);
        (
            minutes.parse().unwrap(),
            seconds.parse().unwrap(),
            centis.parse().unwrap(),
        )
    }

    mod stopwatch_format_tests {
        use super::*;

        #[test]
        fn test_zero() {
            assert_eq!(format_stopwatch(0), "00:00.00");
        }

        #[test]
        fn test_sub_centisecond_truncates() {
            assert_eq!(format_stopwatch(9), "00:00.00");
            assert_eq!(format_stopwatch(10), "00:00.01");
        }

        #[test]
        fn test_mixed() {
            assert_eq!(format_stopwatch(61_234), "01:01.23");
        }

        #[test]
        fn test_unbounded_minutes() {
            assert_eq!(format_stopwatch(125 * 60_000), "125:00.00");
        }

        #[test]
        fn test_fields_bracket_input() {
            for ms in [0, 1, 999, 1000, 59_999, 60_000, 3_599_999, 7_654_321] {
                let (m, s, c) = parse_stopwatch(&format_stopwatch(ms));
                let floor = m * 60_000 + s * 1000 + c * 10;
                assert!(floor <= ms && ms < floor + 10, "ms={}", ms);
                assert!(s < 60);
            }
        }
    }

    mod countdown_format_tests {
        use super::*;

        #[test]
        fn test_zero() {
            assert_eq!(format_countdown(0), "00:00");
        }

        #[test]
        fn test_five_minutes() {
            assert_eq!(format_countdown(300_000), "05:00");
        }

        #[test]
        fn test_truncates_partial_second() {
            assert_eq!(format_countdown(1_999), "00:01");
        }

        #[test]
        fn test_seconds_field_in_range() {
            for ms in [0, 59_000, 60_000, 61_000, 3_599_000, 6_000_000] {
                let formatted = format_countdown(ms);
                let (_, seconds) = formatted.split_once(':').unwrap();
                assert_eq!(seconds.len(), 2);
                assert!(seconds.parse::<u64>().unwrap() < 60);
            }
        }
    }
}
