//! Cognitive state inference and adaptive presentation
//!
//! This module turns behavioral telemetry (typing cadence, scroll and mouse
//! dynamics, idle and tab-switch counts) into a classified attentional state,
//! wellbeing metrics, a short-horizon forecast and adaptive UI tokens.
//!
//! Pipeline: Samples → Aggregator → Metrics → Classifier → Predictor → Tokens → Projections

pub mod adapter;
pub mod aggregator;
pub mod baseline;
pub mod classifier;
pub mod encoder;
pub mod metrics;
pub mod pipeline;
pub mod predictor;
pub mod projection;
pub mod tokens;
pub mod types;

pub use aggregator::aggregate_signals;
pub use classifier::detect_state;
pub use pipeline::{analyze, evaluate, CognitiveProcessor, Evaluation};
pub use predictor::predict_next_state;
pub use projection::{explain_adaptation, tokens_to_css_variables};
pub use tokens::{base_tokens, get_adaptive_tokens};
pub use types::{
    AdaptationMode, AdaptiveTokens, Baseline, CognitiveState, CognitiveStateResult,
    NotificationFrequency, SignalAggregates, SignalSample, SignalType, StatePrediction,
};
