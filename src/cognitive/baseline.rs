//! Rolling baseline management
//!
//! Keeps the most recent window aggregates and averages them into a
//! `Baseline` for relative comparisons. The store lives in memory; hosts
//! persist it through `to_json` / `from_json`.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::cognitive::types::{
    Baseline, FocusDurationStats, IdleTimeStats, KeystrokeLatencyStats, RecentValueStats,
    ScrollVelocityStats, SignalAggregates,
};

/// Default baseline window in evaluation windows
pub const DEFAULT_BASELINE_WINDOW: usize = 20;

/// Rolling store of past window aggregates
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AggregateBaselineStore {
    windows: VecDeque<SignalAggregates>,
    window_size: usize,
}

impl Default for AggregateBaselineStore {
    fn default() -> Self {
        Self::new(DEFAULT_BASELINE_WINDOW)
    }
}

impl AggregateBaselineStore {
    /// Create a store keeping at most `window_size` windows (at least one)
    pub fn new(window_size: usize) -> Self {
        let window_size = window_size.max(1);
        Self {
            windows: VecDeque::with_capacity(window_size),
            window_size,
        }
    }

    /// Record a window, evicting the oldest beyond the window size
    pub fn push(&mut self, aggregates: SignalAggregates) {
        self.windows.push_back(aggregates);
        self.evict_excess();
    }

    fn evict_excess(&mut self) {
        while self.windows.len() > self.window_size {
            self.windows.pop_front();
        }
    }

    /// Field-wise mean of the stored windows, `None` when empty
    pub fn baseline(&self) -> Option<Baseline> {
        if self.windows.is_empty() {
            return None;
        }

        let n = self.windows.len() as f64;
        let avg = |f: fn(&SignalAggregates) -> f64| self.windows.iter().map(f).sum::<f64>() / n;
        let avg_count = |f: fn(&SignalAggregates) -> f64| avg(f).round() as u32;

        Some(SignalAggregates {
            keystroke_latency: KeystrokeLatencyStats {
                mean: avg(|a| a.keystroke_latency.mean),
                variance: avg(|a| a.keystroke_latency.variance),
                count: avg_count(|a| a.keystroke_latency.count as f64),
            },
            scroll_velocity: ScrollVelocityStats {
                mean: avg(|a| a.scroll_velocity.mean),
                max: avg(|a| a.scroll_velocity.max),
                direction_changes: avg_count(|a| a.scroll_velocity.direction_changes as f64),
            },
            mouse_entropy: RecentValueStats {
                mean: avg(|a| a.mouse_entropy.mean),
                recent: avg(|a| a.mouse_entropy.recent),
            },
            click_hesitation: RecentValueStats {
                mean: avg(|a| a.click_hesitation.mean),
                recent: avg(|a| a.click_hesitation.recent),
            },
            focus_duration: FocusDurationStats {
                total: avg(|a| a.focus_duration.total),
                breaks: avg_count(|a| a.focus_duration.breaks as f64),
            },
            idle_time: IdleTimeStats {
                total: avg(|a| a.idle_time.total),
                periods: avg_count(|a| a.idle_time.periods as f64),
            },
            tab_switches: avg_count(|a| a.tab_switches as f64),
            session_duration_ms: avg(|a| a.session_duration_ms as f64).round() as u64,
        })
    }

    /// Number of windows currently in the baseline
    pub fn window_count(&self) -> usize {
        self.windows.len()
    }

    pub fn window_size(&self) -> usize {
        self.window_size
    }

    /// Clear all baseline data
    pub fn clear(&mut self) {
        self.windows.clear();
    }

    /// Load baseline store from JSON.
    ///
    /// The window size is held to at least one, and stored windows beyond
    /// it are dropped oldest first.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let mut store: Self = serde_json::from_str(json)?;
        store.window_size = store.window_size.max(1);
        store.evict_excess();
        Ok(store)
    }

    /// Serialize baseline store to JSON
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}
