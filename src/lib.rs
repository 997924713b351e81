//! Synheart Cognition - On-device cognitive state inference from behavioral signals
//!
//! Cognition turns raw behavioral telemetry into an attentional state and a
//! set of adaptive presentation tokens through a deterministic pipeline:
//! aggregation → wellbeing metrics → rule-based classification → transition
//! forecast → token mapping.
//!
//! Every stage is a pure function of its inputs. Capturing samples and
//! persisting baselines are left to the host.

pub mod cognitive;
pub mod config;
pub mod error;

// FFI bindings for C interop (always available for cdylib/staticlib builds)
pub mod ffi;

pub use cognitive::{
    aggregate_signals, analyze, evaluate, explain_adaptation, get_adaptive_tokens,
    tokens_to_css_variables, AdaptationMode, AdaptiveTokens, Baseline, CognitiveProcessor,
    CognitiveState, CognitiveStateResult, SignalAggregates, SignalSample, SignalType,
};
pub use config::EngineConfig;
pub use error::CognitionError;

/// Cognition version embedded in all reports
pub const COGNITION_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Producer name for reports
pub const PRODUCER_NAME: &str = "synheart-cognition";
