//! Signal aggregation
//!
//! Reduces a window of raw signal samples into one `SignalAggregates`
//! snapshot. Aggregation never fails: empty input yields the all-zero
//! aggregate and unknown signal types are skipped.

use chrono::Duration;

use crate::cognitive::types::{
    FocusDurationStats, IdleTimeStats, KeystrokeLatencyStats, RecentValueStats,
    ScrollVelocityStats, SignalAggregates, SignalSample, SignalType,
};

/// Scroll samples per estimated direction change
const SCROLL_SAMPLES_PER_DIRECTION_CHANGE: usize = 5;

/// Aggregate a window of samples
pub fn aggregate_signals(samples: &[SignalSample]) -> SignalAggregates {
    let mut keystrokes = Vec::new();
    let mut scrolls = Vec::new();
    let mut mouse = Vec::new();
    let mut clicks = Vec::new();
    let mut focus = Vec::new();
    let mut idle = Vec::new();
    let mut tab_switches = 0u32;
    let mut ignored = 0usize;

    for sample in samples {
        match sample.signal_type {
            SignalType::KeystrokeLatency => keystrokes.push(sample.value),
            SignalType::ScrollVelocity => scrolls.push(sample.value),
            SignalType::MouseEntropy => mouse.push(sample.value),
            SignalType::ClickHesitation => clicks.push(sample.value),
            SignalType::FocusDuration => focus.push(sample.value),
            SignalType::IdleTime => idle.push(sample.value),
            SignalType::TabSwitches => tab_switches += 1,
            SignalType::Other(_) => ignored += 1,
        }
    }

    if ignored > 0 {
        tracing::warn!(ignored, "skipping samples with unrecognized signal types");
    }

    SignalAggregates {
        keystroke_latency: keystroke_stats(&keystrokes),
        scroll_velocity: scroll_stats(&scrolls),
        mouse_entropy: recent_value_stats(&mouse),
        click_hesitation: recent_value_stats(&clicks),
        focus_duration: FocusDurationStats {
            total: non_negative_sum(&focus),
            breaks: focus.len() as u32,
        },
        idle_time: IdleTimeStats {
            total: non_negative_sum(&idle),
            periods: idle.len() as u32,
        },
        tab_switches,
        session_duration_ms: session_duration_ms(samples),
    }
}

/// Keep only the samples within `window` of the most recent sample.
///
/// Input order is preserved.
pub fn select_window(samples: &[SignalSample], window: Duration) -> Vec<SignalSample> {
    let Some(latest) = samples.iter().map(|s| s.created_at).max() else {
        return Vec::new();
    };
    let cutoff = latest - window;

    samples
        .iter()
        .filter(|s| s.created_at >= cutoff)
        .cloned()
        .collect()
}

fn keystroke_stats(values: &[f64]) -> KeystrokeLatencyStats {
    let Some(mean) = mean(values) else {
        return KeystrokeLatencyStats::default();
    };

    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / values.len() as f64;

    KeystrokeLatencyStats {
        mean,
        variance,
        count: values.len() as u32,
    }
}

fn scroll_stats(values: &[f64]) -> ScrollVelocityStats {
    let Some(mean) = mean(values) else {
        return ScrollVelocityStats::default();
    };

    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);

    ScrollVelocityStats {
        mean,
        max,
        direction_changes: (values.len() / SCROLL_SAMPLES_PER_DIRECTION_CHANGE) as u32,
    }
}

fn recent_value_stats(values: &[f64]) -> RecentValueStats {
    match (mean(values), values.last()) {
        (Some(mean), Some(&recent)) => RecentValueStats { mean, recent },
        _ => RecentValueStats::default(),
    }
}

fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

// Totals are durations; a negative reading is a capture glitch, not a credit.
fn non_negative_sum(values: &[f64]) -> f64 {
    values.iter().sum::<f64>().max(0.0)
}

/// Span between the earliest and latest timestamp across every sample
fn session_duration_ms(samples: &[SignalSample]) -> u64 {
    let earliest = samples.iter().map(|s| s.created_at).min();
    let latest = samples.iter().map(|s| s.created_at).max();

    match (earliest, latest) {
        (Some(start), Some(end)) => (end - start).num_milliseconds().max(0) as u64,
        _ => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, TimeZone, Utc};
    use pretty_assertions::assert_eq;

    fn at(minute: u32, second: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 15, 14, minute, second).unwrap()
    }

    fn sample(signal_type: SignalType, value: f64, minute: u32) -> SignalSample {
        SignalSample::new(signal_type, value, at(minute, 0))
    }

    #[test]
    fn test_empty_input_is_all_zero() {
        let aggregates = aggregate_signals(&[]);
        assert_eq!(aggregates, SignalAggregates::default());
        assert_eq!(aggregates.session_duration_ms, 0);
    }

    #[test]
    fn test_keystroke_mean_and_population_variance() {
        let samples: Vec<_> = [100.0, 120.0, 140.0, 160.0]
            .iter()
            .map(|&v| sample(SignalType::KeystrokeLatency, v, 0))
            .collect();

        let stats = aggregate_signals(&samples).keystroke_latency;
        assert_eq!(stats.count, 4);
        assert!((stats.mean - 130.0).abs() < 1e-9);
        // ((30^2 + 10^2) * 2) / 4
        assert!((stats.variance - 500.0).abs() < 1e-9);
    }

    #[test]
    fn test_scroll_direction_changes_are_coarse() {
        let samples: Vec<_> = (0..12)
            .map(|i| sample(SignalType::ScrollVelocity, i as f64 * 0.25, 0))
            .collect();

        let stats = aggregate_signals(&samples).scroll_velocity;
        assert_eq!(stats.direction_changes, 2);
        assert_eq!(stats.max, 2.75);
        assert!((stats.mean - 1.375).abs() < 1e-9);
    }

    #[test]
    fn test_recent_is_last_in_input_order() {
        let samples = vec![
            sample(SignalType::ClickHesitation, 900.0, 5),
            sample(SignalType::ClickHesitation, 4000.0, 1),
            sample(SignalType::MouseEntropy, 0.2, 2),
            sample(SignalType::MouseEntropy, 0.6, 3),
        ];

        let aggregates = aggregate_signals(&samples);
        assert_eq!(aggregates.click_hesitation.recent, 4000.0);
        assert_eq!(aggregates.click_hesitation.mean, 2450.0);
        assert_eq!(aggregates.mouse_entropy.recent, 0.6);
        assert!((aggregates.mouse_entropy.mean - 0.4).abs() < 1e-9);
    }

    #[test]
    fn test_totals_and_period_counts() {
        let samples = vec![
            sample(SignalType::FocusDuration, 600_000.0, 0),
            sample(SignalType::FocusDuration, 300_000.0, 10),
            sample(SignalType::IdleTime, 45_000.0, 12),
            sample(SignalType::TabSwitches, 1.0, 13),
            sample(SignalType::TabSwitches, 1.0, 14),
            sample(SignalType::TabSwitches, 1.0, 15),
        ];

        let aggregates = aggregate_signals(&samples);
        assert_eq!(aggregates.focus_duration.total, 900_000.0);
        assert_eq!(aggregates.focus_duration.breaks, 2);
        assert_eq!(aggregates.idle_time.total, 45_000.0);
        assert_eq!(aggregates.idle_time.periods, 1);
        assert_eq!(aggregates.tab_switches, 3);
    }

    #[test]
    fn test_session_duration_spans_all_types() {
        let samples = vec![
            sample(SignalType::KeystrokeLatency, 150.0, 20),
            sample(SignalType::Other("gaze_dwell".to_string()), 1.0, 2),
            sample(SignalType::IdleTime, 1_000.0, 32),
        ];

        let aggregates = aggregate_signals(&samples);
        assert_eq!(aggregates.session_duration_ms, 30 * 60_000);
    }

    #[test]
    fn test_unknown_types_are_ignored() {
        let samples = vec![
            sample(SignalType::Other("pupil_size".to_string()), 4.2, 0),
            sample(SignalType::Other("heart_rate".to_string()), 72.0, 0),
        ];

        let aggregates = aggregate_signals(&samples);
        assert_eq!(aggregates.keystroke_latency.count, 0);
        assert_eq!(aggregates.tab_switches, 0);
        assert_eq!(aggregates.session_duration_ms, 0);
    }

    #[test]
    fn test_single_sample_has_zero_duration() {
        let samples = vec![sample(SignalType::KeystrokeLatency, 150.0, 5)];
        assert_eq!(aggregate_signals(&samples).session_duration_ms, 0);
    }

    #[test]
    fn test_select_window_keeps_recent_samples() {
        let samples = vec![
            SignalSample::new(SignalType::KeystrokeLatency, 1.0, at(0, 0)),
            SignalSample::new(SignalType::KeystrokeLatency, 2.0, at(10, 0)),
            SignalSample::new(SignalType::KeystrokeLatency, 3.0, at(14, 30)),
            SignalSample::new(SignalType::KeystrokeLatency, 4.0, at(15, 0)),
        ];

        let windowed = select_window(&samples, Duration::minutes(5));
        let values: Vec<f64> = windowed.iter().map(|s| s.value).collect();
        assert_eq!(values, vec![2.0, 3.0, 4.0]);

        assert!(select_window(&[], Duration::minutes(5)).is_empty());
    }
}
