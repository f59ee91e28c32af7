/// Clock part (`HH:MM`) of a `YYYY-MM-DD HH:MM[:SS]` timestamp.
///
/// Returns `None` when there is no whitespace-separated time component.
pub fn time_of_day(timestamp: &str) -> Option<&str> {
    let time = timestamp.split(' ').nth(1).filter(|t| !t.is_empty())?;
    let end = time.char_indices().nth(5).map(|(i, _)| i).unwrap_or(time.len());
    Some(&time[..end])
}

/// Axis labels for the chart: the trailing `window` timestamps, every
/// `stride`-th one starting with the oldest, reduced to `HH:MM`.
///
/// Timestamps without a time component yield an empty label so the
/// remaining labels keep their positions.
pub fn sample_time_labels(timestamps: &[String], window: usize, stride: usize) -> Vec<String> {
    let stride = stride.max(1);
    let start = timestamps.len().saturating_sub(window);
    timestamps[start..]
        .iter()
        .step_by(stride)
        .map(|ts| time_of_day(ts).unwrap_or_default().to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_hours_and_minutes() {
        assert_eq!(time_of_day("2024-05-01 09:31:00"), Some("09:31"));
        assert_eq!(time_of_day("2024-05-01 09:31"), Some("09:31"));
        assert_eq!(time_of_day("2024-05-01"), None);
    }

    #[test]
    fn samples_every_fifth_of_trailing_twenty() {
        let timestamps: Vec<String> =
            (0..30).map(|m| format!("2024-05-01 10:{:02}:00", m)).collect();
        let labels = sample_time_labels(&timestamps, 20, 5);
        assert_eq!(labels, vec!["10:10", "10:15", "10:20", "10:25"]);
    }

    #[test]
    fn short_history_and_malformed_entries() {
        let timestamps = vec!["2024-05-01 10:00:00".to_string(), "bad".to_string()];
        assert_eq!(sample_time_labels(&timestamps, 20, 1), vec!["10:00", ""]);
        assert!(sample_time_labels(&[], 20, 5).is_empty());
    }
}
