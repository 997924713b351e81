//! Wellbeing metric derivation
//!
//! Computes focus level, stress index and cognitive budget from an aggregate
//! snapshot and an optional historical baseline. The constants here define
//! the classification boundaries used downstream and must not drift.

use serde::{Deserialize, Serialize};

use crate::cognitive::types::{Baseline, SignalAggregates};

/// Keystroke samples needed before cadence consistency is trusted
const MIN_KEYSTROKES_FOR_CONSISTENCY: u32 = 10;

/// Variance (ms²) at which keystroke consistency reaches zero
const KEYSTROKE_VARIANCE_SCALE: f64 = 200.0;

/// Sustained focus (ms) that earns the full duration bonus share (30 minutes)
const FOCUS_BONUS_SCALE_MS: f64 = 1_800_000.0;

/// Scroll velocity (px/ms) above which scrolling reads as agitated
const AGITATED_SCROLL_VELOCITY: f64 = 2.0;

/// Direction changes above which scrolling reads as searching
const AGITATED_DIRECTION_CHANGES: u32 = 10;

/// Click hesitation (ms) above which the last click reads as hesitant
const HESITANT_CLICK_MS: f64 = 3000.0;

/// Idle time (ms) that fully restores the idle bonus (10 minutes)
const IDLE_RESTORE_SCALE_MS: f64 = 600_000.0;

/// Lowest cognitive budget ever reported
pub const MIN_COGNITIVE_BUDGET: f64 = 0.1;

/// The three derived metrics for one window
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WellbeingMetrics {
    pub focus_level: f64,
    pub stress_index: f64,
    pub cognitive_budget: f64,
}

impl WellbeingMetrics {
    pub fn compute(aggregates: &SignalAggregates, baseline: Option<&Baseline>) -> Self {
        Self {
            focus_level: focus_level(aggregates, baseline),
            stress_index: stress_index(aggregates, baseline),
            cognitive_budget: cognitive_budget(aggregates, baseline),
        }
    }
}

/// Focus level (0-1)
///
/// Formula:
/// ```text
/// focus = 0.5 + consistency * 0.3 - tab_penalty - idle_penalty + duration_bonus
/// consistency    = max(0, 1 - variance / 200)   (0.5 with 10 or fewer keystrokes)
/// tab_penalty    = min(tab_switches / 10, 0.5)
/// idle_penalty   = min(idle_periods / 5, 0.3)
/// duration_bonus = min(focus_total_ms / 1_800_000, 0.2)
/// ```
pub fn focus_level(aggregates: &SignalAggregates, _baseline: Option<&Baseline>) -> f64 {
    let keystrokes = &aggregates.keystroke_latency;
    let consistency = if keystrokes.count > MIN_KEYSTROKES_FOR_CONSISTENCY {
        (1.0 - keystrokes.variance / KEYSTROKE_VARIANCE_SCALE).max(0.0)
    } else {
        0.5
    };

    let tab_penalty = (aggregates.tab_switches as f64 / 10.0).min(0.5);
    let idle_penalty = (aggregates.idle_time.periods as f64 / 5.0).min(0.3);
    let duration_bonus = (aggregates.focus_duration.total / FOCUS_BONUS_SCALE_MS).min(0.2);

    (0.5 + consistency * 0.3 - tab_penalty - idle_penalty + duration_bonus).clamp(0.0, 1.0)
}

/// Stress index (0-1)
///
/// Starts at 0.3. Latency slowdown relative to the baseline adds up to its
/// ratio times 0.3; agitated scrolling, frequent direction changes and a
/// hesitant last click add fixed increments.
pub fn stress_index(aggregates: &SignalAggregates, baseline: Option<&Baseline>) -> f64 {
    let mut stress = 0.3;

    if let Some(baseline) = baseline {
        stress += latency_increase_ratio(aggregates, baseline).max(0.0) * 0.3;
    }
    if aggregates.scroll_velocity.max > AGITATED_SCROLL_VELOCITY {
        stress += 0.15;
    }
    if aggregates.scroll_velocity.direction_changes > AGITATED_DIRECTION_CHANGES {
        stress += 0.1;
    }
    if aggregates.click_hesitation.recent > HESITANT_CLICK_MS {
        stress += 0.1;
    }

    stress.clamp(0.0, 1.0)
}

/// Cognitive budget (0.1-1)
///
/// Formula:
/// ```text
/// budget = 1 - min(session_hours / 4, 0.5) - tab_switches * 0.02 + min(idle_total_ms / 600_000, 0.2)
/// ```
pub fn cognitive_budget(aggregates: &SignalAggregates, _baseline: Option<&Baseline>) -> f64 {
    let session_drain = (aggregates.session_hours() / 4.0).min(0.5);
    let switch_drain = aggregates.tab_switches as f64 * 0.02;
    let idle_restore = (aggregates.idle_time.total / IDLE_RESTORE_SCALE_MS).min(0.2);

    (1.0 - session_drain - switch_drain + idle_restore).clamp(MIN_COGNITIVE_BUDGET, 1.0)
}

/// Relative keystroke latency change against the baseline mean.
///
/// Returns 0 when the baseline has no usable latency mean.
pub fn latency_increase_ratio(aggregates: &SignalAggregates, baseline: &Baseline) -> f64 {
    let base = baseline.keystroke_latency.mean;
    if base <= 0.0 {
        return 0.0;
    }
    (aggregates.keystroke_latency.mean - base) / base
}
