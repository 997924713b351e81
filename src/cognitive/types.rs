//! Cognitive pipeline data types
//!
//! This module defines the signal samples consumed by the pipeline, the
//! aggregate snapshot they reduce into, and the classification and
//! presentation types the pipeline produces.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::CognitionError;

/// Behavioral signal types captured by the host application
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SignalType {
    KeystrokeLatency,
    ScrollVelocity,
    MouseEntropy,
    ClickHesitation,
    FocusDuration,
    IdleTime,
    TabSwitches,
    /// Signal types this version does not know about; ignored by aggregation
    #[serde(untagged)]
    Other(String),
}

impl SignalType {
    pub fn as_str(&self) -> &str {
        match self {
            SignalType::KeystrokeLatency => "keystroke_latency",
            SignalType::ScrollVelocity => "scroll_velocity",
            SignalType::MouseEntropy => "mouse_entropy",
            SignalType::ClickHesitation => "click_hesitation",
            SignalType::FocusDuration => "focus_duration",
            SignalType::IdleTime => "idle_time",
            SignalType::TabSwitches => "tab_switches",
            SignalType::Other(name) => name.as_str(),
        }
    }
}

/// One observed behavioral measurement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignalSample {
    /// Kind of measurement
    pub signal_type: SignalType,
    /// Measured value (milliseconds, px/ms, counts or entropy depending on type)
    pub value: f64,
    /// When the measurement was taken
    pub created_at: DateTime<Utc>,
}

impl SignalSample {
    pub fn new(signal_type: SignalType, value: f64, created_at: DateTime<Utc>) -> Self {
        Self {
            signal_type,
            value,
            created_at,
        }
    }
}

/// Keystroke latency statistics (milliseconds)
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeystrokeLatencyStats {
    pub mean: f64,
    /// Population variance
    pub variance: f64,
    pub count: u32,
}

/// Scroll velocity statistics (px/ms)
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScrollVelocityStats {
    pub mean: f64,
    pub max: f64,
    /// Coarse estimate: one change per five scroll samples
    pub direction_changes: u32,
}

/// Mean and most recent value of a pointer signal
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecentValueStats {
    pub mean: f64,
    pub recent: f64,
}

/// Accumulated focus time (milliseconds) and number of focus periods
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FocusDurationStats {
    pub total: f64,
    pub breaks: u32,
}

/// Accumulated idle time (milliseconds) and number of idle periods
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IdleTimeStats {
    pub total: f64,
    pub periods: u32,
}

/// Snapshot of one evaluation window of signal samples
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SignalAggregates {
    pub keystroke_latency: KeystrokeLatencyStats,
    pub scroll_velocity: ScrollVelocityStats,
    pub mouse_entropy: RecentValueStats,
    pub click_hesitation: RecentValueStats,
    pub focus_duration: FocusDurationStats,
    pub idle_time: IdleTimeStats,
    pub tab_switches: u32,
    /// Span between the earliest and latest sample, in milliseconds
    pub session_duration_ms: u64,
}

impl SignalAggregates {
    pub fn session_minutes(&self) -> f64 {
        self.session_duration_ms as f64 / 60_000.0
    }

    pub fn session_hours(&self) -> f64 {
        self.session_duration_ms as f64 / 3_600_000.0
    }
}

/// Historical norm used for relative comparisons
pub type Baseline = SignalAggregates;

/// Attentional and wellbeing states recognised by the classifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CognitiveState {
    Neutral,
    Flow,
    Distracted,
    Overload,
    Fatigued,
    Hyperfocus,
    Recovery,
}

impl CognitiveState {
    /// Classifier iteration order; earlier states win exact score ties
    pub const ALL: [CognitiveState; 7] = [
        CognitiveState::Neutral,
        CognitiveState::Flow,
        CognitiveState::Distracted,
        CognitiveState::Overload,
        CognitiveState::Fatigued,
        CognitiveState::Hyperfocus,
        CognitiveState::Recovery,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CognitiveState::Neutral => "neutral",
            CognitiveState::Flow => "flow",
            CognitiveState::Distracted => "distracted",
            CognitiveState::Overload => "overload",
            CognitiveState::Fatigued => "fatigued",
            CognitiveState::Hyperfocus => "hyperfocus",
            CognitiveState::Recovery => "recovery",
        }
    }
}

impl fmt::Display for CognitiveState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CognitiveState {
    type Err = CognitionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CognitiveState::ALL
            .into_iter()
            .find(|state| state.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| CognitionError::UnknownState(s.to_string()))
    }
}

/// Forecast of the next likely state
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StatePrediction {
    pub next_state: CognitiveState,
    pub time_to_onset_minutes: f64,
    pub confidence: f64,
}

/// Output of one evaluation cycle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CognitiveStateResult {
    pub state: CognitiveState,
    /// 0-1
    pub confidence: f64,
    /// 0-1
    pub stress_index: f64,
    /// 0-1
    pub focus_level: f64,
    /// 0.1-1
    pub cognitive_budget: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prediction: Option<StatePrediction>,
}

/// How strongly state-specific token overrides are applied
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdaptationMode {
    Invisible,
    #[default]
    Subtle,
    Visible,
}

impl AdaptationMode {
    pub fn intensity(&self) -> f64 {
        match self {
            AdaptationMode::Invisible => 0.0,
            AdaptationMode::Subtle => 0.6,
            AdaptationMode::Visible => 1.0,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AdaptationMode::Invisible => "invisible",
            AdaptationMode::Subtle => "subtle",
            AdaptationMode::Visible => "visible",
        }
    }
}

impl fmt::Display for AdaptationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AdaptationMode {
    type Err = CognitionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "invisible" => Ok(AdaptationMode::Invisible),
            "subtle" => Ok(AdaptationMode::Subtle),
            "visible" => Ok(AdaptationMode::Visible),
            _ => Err(CognitionError::UnknownAdaptationMode(s.to_string())),
        }
    }
}

/// Which notifications the host should let through
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationFrequency {
    None,
    Critical,
    Important,
    All,
}

impl NotificationFrequency {
    pub fn as_str(&self) -> &'static str {
        match self {
            NotificationFrequency::None => "none",
            NotificationFrequency::Critical => "critical",
            NotificationFrequency::Important => "important",
            NotificationFrequency::All => "all",
        }
    }
}

/// Presentation parameters handed to the rendering layer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdaptiveTokens {
    /// CSS time, e.g. "300ms"
    pub animation_duration: String,
    /// CSS easing keyword or function
    pub animation_ease: String,
    pub ui_opacity: f64,
    pub glow_intensity: f64,
    pub font_scale: f64,
    pub line_height_scale: f64,
    pub density_scale: f64,
    pub touch_target_scale: f64,
    pub accent_saturation: f64,
    pub contrast_boost: f64,
    pub notification_frequency: NotificationFrequency,
    pub auto_hide_chrome: bool,
    pub simplify_layout: bool,
    pub suggest_break: bool,
}
