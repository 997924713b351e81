//! Rule-based cognitive state classification
//!
//! Every state keeps an additive score; rules add fixed increments when their
//! condition holds and the highest score wins. This is a weighted checklist,
//! not a model: the thresholds and weights below are the contract.
//!
//! For flow, hyperfocus and recovery the first rule is a gate: the follow-up
//! rules only count once the gate holds. Without the gates an empty window
//! (no tab switches, no variance, no idle time) would read as flow.

use serde::{Deserialize, Serialize};

use crate::cognitive::metrics::WellbeingMetrics;
use crate::cognitive::types::{Baseline, CognitiveState, SignalAggregates};

/// Score neutral starts with; any other state must beat it outright
pub const NEUTRAL_BASE_SCORE: f64 = 0.3;

/// Idle time (ms) that signals the user has stepped away (5 minutes)
const RECOVERY_IDLE_MS: f64 = 300_000.0;

/// Idle time (ms) under which a long session counts as unbroken (2 minutes)
const UNBROKEN_IDLE_MS: f64 = 120_000.0;

/// Per-state scores for one window, indexed in `CognitiveState::ALL` order
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StateScores([f64; 7]);

impl Default for StateScores {
    fn default() -> Self {
        let mut scores = [0.0; 7];
        scores[index_of(CognitiveState::Neutral)] = NEUTRAL_BASE_SCORE;
        Self(scores)
    }
}

impl StateScores {
    pub fn get(&self, state: CognitiveState) -> f64 {
        self.0[index_of(state)]
    }

    fn add(&mut self, state: CognitiveState, increment: f64) {
        self.0[index_of(state)] += increment;
    }

    /// Strictly greatest score in iteration order; the first state wins ties
    pub fn winner(&self) -> (CognitiveState, f64) {
        let mut best = (CognitiveState::Neutral, self.get(CognitiveState::Neutral));
        for state in CognitiveState::ALL {
            let score = self.get(state);
            if score > best.1 {
                best = (state, score);
            }
        }
        best
    }

    pub fn iter(&self) -> impl Iterator<Item = (CognitiveState, f64)> + '_ {
        CognitiveState::ALL.into_iter().zip(self.0.iter().copied())
    }
}

fn index_of(state: CognitiveState) -> usize {
    match state {
        CognitiveState::Neutral => 0,
        CognitiveState::Flow => 1,
        CognitiveState::Distracted => 2,
        CognitiveState::Overload => 3,
        CognitiveState::Fatigued => 4,
        CognitiveState::Hyperfocus => 5,
        CognitiveState::Recovery => 6,
    }
}

/// Outcome of classification
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StateClassification {
    pub state: CognitiveState,
    /// Winning score capped at 1
    pub confidence: f64,
    pub scores: StateScores,
}

/// Classify one window
pub fn detect_state(
    aggregates: &SignalAggregates,
    metrics: &WellbeingMetrics,
    baseline: Option<&Baseline>,
) -> StateClassification {
    let scores = score_states(aggregates, metrics, baseline);
    let (state, score) = scores.winner();
    let confidence = score.min(1.0);

    tracing::debug!(
        state = state.as_str(),
        confidence,
        focus = metrics.focus_level,
        stress = metrics.stress_index,
        budget = metrics.cognitive_budget,
        "classified cognitive state"
    );

    StateClassification {
        state,
        confidence,
        scores,
    }
}

/// Accumulate every state's score
pub fn score_states(
    aggregates: &SignalAggregates,
    metrics: &WellbeingMetrics,
    baseline: Option<&Baseline>,
) -> StateScores {
    use CognitiveState::*;

    let focus = metrics.focus_level;
    let stress = metrics.stress_index;
    let budget = metrics.cognitive_budget;
    let tabs = aggregates.tab_switches;
    let keystrokes = &aggregates.keystroke_latency;
    let session_minutes = aggregates.session_minutes();
    let idle_total = aggregates.idle_time.total;
    let baseline_latency = baseline.map(|b| b.keystroke_latency.mean);

    let mut scores = StateScores::default();

    if focus >= 0.7 && stress <= 0.3 {
        scores.add(Flow, 0.5);
        if tabs <= 2 {
            scores.add(Flow, 0.3);
        }
        if keystrokes.variance < 50.0 {
            scores.add(Flow, 0.2);
        }
    }

    if focus <= 0.4 {
        scores.add(Distracted, 0.3);
    }
    if tabs >= 5 {
        scores.add(Distracted, 0.4);
    }
    if aggregates.scroll_velocity.direction_changes >= 10 {
        scores.add(Distracted, 0.2);
    }

    if stress >= 0.7 {
        scores.add(Overload, 0.4);
    }
    if budget <= 0.3 {
        scores.add(Overload, 0.4);
    }
    if baseline_latency.is_some_and(|base| keystrokes.mean > base * 1.3) {
        scores.add(Overload, 0.2);
    }

    if session_minutes >= 90.0 {
        scores.add(Fatigued, 0.3);
    }
    if baseline_latency.is_some_and(|base| keystrokes.mean > base * 1.2) {
        scores.add(Fatigued, 0.4);
    }
    if focus < 0.5 && budget < 0.5 {
        scores.add(Fatigued, 0.3);
    }

    if focus >= 0.9 && tabs == 0 {
        scores.add(Hyperfocus, 0.4);
        if session_minutes >= 60.0 {
            scores.add(Hyperfocus, 0.3);
        }
        if idle_total < UNBROKEN_IDLE_MS {
            scores.add(Hyperfocus, 0.2);
        }
    }

    if idle_total >= RECOVERY_IDLE_MS {
        scores.add(Recovery, 0.6);
        if keystrokes.count < 10 {
            scores.add(Recovery, 0.3);
        }
    }

    scores
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cognitive::types::{
        FocusDurationStats, IdleTimeStats, KeystrokeLatencyStats, ScrollVelocityStats,
    };

    fn classify(aggregates: &SignalAggregates, baseline: Option<&Baseline>) -> StateClassification {
        let metrics = WellbeingMetrics::compute(aggregates, baseline);
        detect_state(aggregates, &metrics, baseline)
    }

    #[test]
    fn test_empty_window_is_neutral() {
        let result = classify(&SignalAggregates::default(), None);
        assert_eq!(result.state, CognitiveState::Neutral);
        assert!((result.confidence - 0.3).abs() < 1e-9);

        for (state, score) in result.scores.iter() {
            if state != CognitiveState::Neutral {
                assert!(score <= NEUTRAL_BASE_SCORE, "{state} scored {score}");
            }
        }
    }

    #[test]
    fn test_steady_typing_is_flow() {
        let aggregates = SignalAggregates {
            keystroke_latency: KeystrokeLatencyStats {
                mean: 140.0,
                variance: 10.0,
                count: 30,
            },
            ..Default::default()
        };

        let result = classify(&aggregates, None);
        assert_eq!(result.state, CognitiveState::Flow);
        assert!((result.scores.get(CognitiveState::Flow) - 1.0).abs() < 1e-9);
        assert!((result.confidence - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_long_idle_is_recovery() {
        let aggregates = SignalAggregates {
            idle_time: IdleTimeStats {
                total: 360_000.0,
                periods: 1,
            },
            ..Default::default()
        };

        let result = classify(&aggregates, None);
        assert_eq!(result.state, CognitiveState::Recovery);
        assert!((result.confidence - 0.9).abs() < 1e-9);
    }

    #[test]
    fn test_tab_hopping_is_distracted() {
        let aggregates = SignalAggregates {
            tab_switches: 8,
            scroll_velocity: ScrollVelocityStats {
                mean: 1.0,
                max: 1.5,
                direction_changes: 10,
            },
            ..Default::default()
        };

        // focus = 0.65 - 0.5 = 0.15: 0.3 + 0.4 + 0.2
        let result = classify(&aggregates, None);
        assert_eq!(result.state, CognitiveState::Distracted);
        assert!((result.scores.get(CognitiveState::Distracted) - 0.9).abs() < 1e-9);
    }

    #[test]
    fn test_slowdown_against_baseline_is_fatigue() {
        let aggregates = SignalAggregates {
            keystroke_latency: KeystrokeLatencyStats {
                mean: 250.0,
                variance: 400.0,
                count: 30,
            },
            session_duration_ms: 100 * 60_000,
            ..Default::default()
        };
        let baseline = SignalAggregates {
            keystroke_latency: KeystrokeLatencyStats {
                mean: 200.0,
                variance: 300.0,
                count: 500,
            },
            ..Default::default()
        };

        // 1.25x slower: fatigued gets 0.3 + 0.4, overload's 1.3x rule does not fire
        let result = classify(&aggregates, Some(&baseline));
        assert_eq!(result.state, CognitiveState::Fatigued);
        assert!((result.confidence - 0.7).abs() < 1e-9);
        assert_eq!(result.scores.get(CognitiveState::Overload), 0.0);
    }

    #[test]
    fn test_drained_budget_is_overload() {
        let aggregates = SignalAggregates {
            tab_switches: 4,
            session_duration_ms: 4 * 3_600_000,
            keystroke_latency: KeystrokeLatencyStats {
                mean: 300.0,
                variance: 20.0,
                count: 30,
            },
            ..Default::default()
        };
        let baseline = SignalAggregates {
            keystroke_latency: KeystrokeLatencyStats {
                mean: 200.0,
                variance: 20.0,
                count: 100,
            },
            ..Default::default()
        };

        // budget = 1 - 0.5 - 0.08 = 0.42 stays above 0.3, stress = 0.45
        let metrics = WellbeingMetrics::compute(&aggregates, Some(&baseline));
        assert!((metrics.cognitive_budget - 0.42).abs() < 1e-9);

        // Twelve switches drain the budget to 0.26: overload 0.4 + 0.2
        let heavier = SignalAggregates {
            tab_switches: 12,
            ..aggregates
        };
        let scores = score_states(
            &heavier,
            &WellbeingMetrics::compute(&heavier, Some(&baseline)),
            Some(&baseline),
        );
        assert!((scores.get(CognitiveState::Overload) - 0.6).abs() < 1e-9);
    }

    #[test]
    fn test_hyperfocus_requires_no_switches() {
        let aggregates = SignalAggregates {
            keystroke_latency: KeystrokeLatencyStats {
                mean: 120.0,
                variance: 0.0,
                count: 200,
            },
            focus_duration: FocusDurationStats {
                total: 3_600_000.0,
                breaks: 1,
            },
            session_duration_ms: 70 * 60_000,
            ..Default::default()
        };

        // focus = 0.8 + 0.2 = 1.0: hyperfocus 0.4 + 0.3 + 0.2 = 0.9, flow 1.0
        let scores = score_states(&aggregates, &WellbeingMetrics::compute(&aggregates, None), None);
        assert!((scores.get(CognitiveState::Hyperfocus) - 0.9).abs() < 1e-9);
        assert_eq!(scores.winner().0, CognitiveState::Flow);

        let switched = SignalAggregates {
            tab_switches: 1,
            ..aggregates
        };
        let scores = score_states(&switched, &WellbeingMetrics::compute(&switched, None), None);
        assert_eq!(scores.get(CognitiveState::Hyperfocus), 0.0);
    }

    #[test]
    fn test_ties_go_to_earlier_state() {
        let mut scores = StateScores::default();
        scores.add(CognitiveState::Distracted, 0.7);
        scores.add(CognitiveState::Fatigued, 0.7);
        assert_eq!(scores.winner().0, CognitiveState::Distracted);

        // Exactly matching neutral keeps neutral
        let mut scores = StateScores::default();
        scores.add(CognitiveState::Fatigued, 0.3);
        assert_eq!(scores.winner(), (CognitiveState::Neutral, 0.3));
    }

    #[test]
    fn test_classification_is_deterministic() {
        let aggregates = SignalAggregates {
            tab_switches: 3,
            idle_time: IdleTimeStats {
                total: 200_000.0,
                periods: 2,
            },
            session_duration_ms: 50 * 60_000,
            ..Default::default()
        };

        let first = classify(&aggregates, None);
        let second = classify(&aggregates, None);
        assert_eq!(first, second);
    }
}
