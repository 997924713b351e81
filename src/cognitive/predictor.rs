//! Short-horizon state transition forecasting
//!
//! An ordered list of rules; the first one that matches produces the
//! forecast. No rule matching means no forecast.

use crate::cognitive::metrics::WellbeingMetrics;
use crate::cognitive::types::{CognitiveState, SignalAggregates, StatePrediction};

/// Forecast the next likely state for the current window
pub fn predict_next_state(
    state: CognitiveState,
    aggregates: &SignalAggregates,
    metrics: &WellbeingMetrics,
) -> Option<StatePrediction> {
    let session_minutes = aggregates.session_minutes();
    let stress = metrics.stress_index;
    let budget = metrics.cognitive_budget;

    let prediction = if state == CognitiveState::Flow && session_minutes > 45.0 {
        forecast(
            CognitiveState::Fatigued,
            (90.0 - session_minutes).max(15.0),
            0.6 + session_minutes / 180.0,
        )
    } else if state == CognitiveState::Hyperfocus && session_minutes > 90.0 {
        forecast(
            CognitiveState::Overload,
            (120.0 - session_minutes).max(10.0),
            0.7,
        )
    } else if stress > 0.5 && stress < 0.7 {
        forecast(
            CognitiveState::Overload,
            ((0.7 - stress) / 0.1 * 10.0).round(),
            0.5 + stress * 0.3,
        )
    } else if budget > 0.2 && budget < 0.4 {
        forecast(CognitiveState::Fatigued, (budget * 30.0).round(), 0.6)
    } else if state == CognitiveState::Distracted && metrics.focus_level < 0.3 {
        forecast(CognitiveState::Recovery, 5.0, 0.4)
    } else {
        return None;
    };

    tracing::debug!(
        from = state.as_str(),
        to = prediction.next_state.as_str(),
        onset_minutes = prediction.time_to_onset_minutes,
        confidence = prediction.confidence,
        "forecast state transition"
    );

    Some(prediction)
}

fn forecast(next_state: CognitiveState, onset_minutes: f64, confidence: f64) -> StatePrediction {
    StatePrediction {
        next_state,
        time_to_onset_minutes: onset_minutes,
        confidence,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn metrics(focus: f64, stress: f64, budget: f64) -> WellbeingMetrics {
        WellbeingMetrics {
            focus_level: focus,
            stress_index: stress,
            cognitive_budget: budget,
        }
    }

    fn session(minutes: u64) -> SignalAggregates {
        SignalAggregates {
            session_duration_ms: minutes * 60_000,
            ..Default::default()
        }
    }

    #[test]
    fn test_long_flow_forecasts_fatigue() {
        let prediction =
            predict_next_state(CognitiveState::Flow, &session(60), &metrics(0.8, 0.3, 0.8))
                .unwrap();

        assert_eq!(prediction.next_state, CognitiveState::Fatigued);
        assert_eq!(prediction.time_to_onset_minutes, 30.0);
        assert!((prediction.confidence - (0.6 + 60.0 / 180.0)).abs() < 1e-9);
    }

    #[test]
    fn test_long_flow_onset_floor_and_uncapped_confidence() {
        let prediction =
            predict_next_state(CognitiveState::Flow, &session(85), &metrics(0.8, 0.3, 0.7))
                .unwrap();
        assert_eq!(prediction.time_to_onset_minutes, 15.0);
        // Past 72 minutes the forecast confidence exceeds 1
        assert!((prediction.confidence - (0.6 + 85.0 / 180.0)).abs() < 1e-9);
        assert!(prediction.confidence > 1.0);
    }

    #[test]
    fn test_long_hyperfocus_forecasts_overload() {
        let prediction = predict_next_state(
            CognitiveState::Hyperfocus,
            &session(100),
            &metrics(0.95, 0.3, 0.6),
        )
        .unwrap();

        assert_eq!(prediction.next_state, CognitiveState::Overload);
        assert_eq!(prediction.time_to_onset_minutes, 20.0);
        assert_eq!(prediction.confidence, 0.7);

        let late = predict_next_state(
            CognitiveState::Hyperfocus,
            &session(115),
            &metrics(0.95, 0.3, 0.6),
        )
        .unwrap();
        assert_eq!(late.time_to_onset_minutes, 10.0);
    }

    #[test]
    fn test_rising_stress_forecasts_overload() {
        let prediction = predict_next_state(
            CognitiveState::Neutral,
            &session(10),
            &metrics(0.6, 0.6, 0.9),
        )
        .unwrap();

        assert_eq!(prediction.next_state, CognitiveState::Overload);
        assert_eq!(prediction.time_to_onset_minutes, 10.0);
        assert!((prediction.confidence - 0.68).abs() < 1e-9);
    }

    #[test]
    fn test_low_budget_forecasts_fatigue() {
        let prediction = predict_next_state(
            CognitiveState::Neutral,
            &session(10),
            &metrics(0.6, 0.3, 0.3),
        )
        .unwrap();

        assert_eq!(prediction.next_state, CognitiveState::Fatigued);
        assert_eq!(prediction.time_to_onset_minutes, 9.0);
        assert_eq!(prediction.confidence, 0.6);
    }

    #[test]
    fn test_deep_distraction_forecasts_recovery() {
        let prediction = predict_next_state(
            CognitiveState::Distracted,
            &session(10),
            &metrics(0.2, 0.3, 0.8),
        )
        .unwrap();

        assert_eq!(prediction.next_state, CognitiveState::Recovery);
        assert_eq!(prediction.time_to_onset_minutes, 5.0);
        assert_eq!(prediction.confidence, 0.4);
    }

    #[test]
    fn test_first_matching_rule_wins() {
        // Stress, budget and distraction rules all match; stress comes first
        let prediction = predict_next_state(
            CognitiveState::Distracted,
            &session(10),
            &metrics(0.1, 0.55, 0.3),
        )
        .unwrap();
        assert_eq!(prediction.next_state, CognitiveState::Overload);
    }

    #[test]
    fn test_calm_window_has_no_forecast() {
        assert!(predict_next_state(
            CognitiveState::Neutral,
            &session(10),
            &metrics(0.65, 0.3, 1.0),
        )
        .is_none());

        // Stress boundaries are exclusive
        assert!(predict_next_state(
            CognitiveState::Neutral,
            &session(10),
            &metrics(0.65, 0.7, 0.4),
        )
        .is_none());
    }
}
