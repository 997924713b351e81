//! Cognitive pipeline orchestration
//!
//! This module provides the public API for cognitive state processing.
//! It runs samples through aggregation, metrics, classification, forecasting
//! and token mapping.

use chrono::{DateTime, Utc};

use crate::cognitive::aggregator::{aggregate_signals, select_window};
use crate::cognitive::baseline::AggregateBaselineStore;
use crate::cognitive::classifier::detect_state;
use crate::cognitive::encoder::ReportEncoder;
use crate::cognitive::metrics::WellbeingMetrics;
use crate::cognitive::predictor::predict_next_state;
use crate::cognitive::tokens::get_adaptive_tokens;
use crate::cognitive::types::{
    AdaptationMode, AdaptiveTokens, Baseline, CognitiveStateResult, SignalAggregates,
    SignalSample,
};
use crate::config::EngineConfig;
use crate::error::CognitionError;

/// Everything one evaluation cycle produces
#[derive(Debug, Clone, PartialEq)]
pub struct Evaluation {
    pub aggregates: SignalAggregates,
    pub result: CognitiveStateResult,
    pub mode: AdaptationMode,
    pub tokens: AdaptiveTokens,
    pub sample_count: usize,
    pub window_start: Option<DateTime<Utc>>,
    pub window_end: Option<DateTime<Utc>>,
}

/// Classify a window of samples (stateless, one-shot).
///
/// # Example
/// ```ignore
/// let result = analyze(&samples, None);
/// println!("{} ({:.2})", result.state, result.confidence);
/// ```
pub fn analyze(samples: &[SignalSample], baseline: Option<&Baseline>) -> CognitiveStateResult {
    let aggregates = aggregate_signals(samples);
    analyze_aggregates(&aggregates, baseline)
}

/// Classify an already aggregated window
pub fn analyze_aggregates(
    aggregates: &SignalAggregates,
    baseline: Option<&Baseline>,
) -> CognitiveStateResult {
    let metrics = WellbeingMetrics::compute(aggregates, baseline);
    let classification = detect_state(aggregates, &metrics, baseline);
    let prediction = predict_next_state(classification.state, aggregates, &metrics);

    CognitiveStateResult {
        state: classification.state,
        confidence: classification.confidence,
        stress_index: metrics.stress_index,
        focus_level: metrics.focus_level,
        cognitive_budget: metrics.cognitive_budget,
        prediction,
    }
}

/// Classify a window and map the state to adaptive tokens
pub fn evaluate(
    samples: &[SignalSample],
    baseline: Option<&Baseline>,
    mode: AdaptationMode,
) -> Evaluation {
    let aggregates = aggregate_signals(samples);
    let result = analyze_aggregates(&aggregates, baseline);
    let tokens = get_adaptive_tokens(result.state, mode);

    Evaluation {
        aggregates,
        result,
        mode,
        tokens,
        sample_count: samples.len(),
        window_start: samples.iter().map(|s| s.created_at).min(),
        window_end: samples.iter().map(|s| s.created_at).max(),
    }
}

/// Evaluate samples and encode a JSON report (stateless, one-shot)
pub fn samples_to_report(
    samples: &[SignalSample],
    baseline: Option<&Baseline>,
    mode: AdaptationMode,
) -> Result<String, CognitionError> {
    let evaluation = evaluate(samples, baseline, mode);
    ReportEncoder::new().encode_to_json(&evaluation)
}

/// Stateful processor that maintains a rolling baseline across windows.
///
/// Each window is compared against the baseline built from the windows
/// before it, then added to that baseline.
pub struct CognitiveProcessor {
    config: EngineConfig,
    baseline_store: AggregateBaselineStore,
    encoder: ReportEncoder,
    last_evaluation: Option<Evaluation>,
}

impl Default for CognitiveProcessor {
    fn default() -> Self {
        Self::new()
    }
}

impl CognitiveProcessor {
    /// Create a processor with default settings (20 window baseline, subtle mode)
    pub fn new() -> Self {
        Self::with_config(EngineConfig::default())
    }

    pub fn with_config(config: EngineConfig) -> Self {
        Self {
            baseline_store: AggregateBaselineStore::new(config.baseline_window),
            encoder: ReportEncoder::new(),
            last_evaluation: None,
            config,
        }
    }

    /// Evaluate a window of samples against the rolling baseline
    pub fn process(&mut self, samples: &[SignalSample]) -> &Evaluation {
        let windowed;
        let samples = match self.config.window() {
            Some(window) => {
                windowed = select_window(samples, window);
                windowed.as_slice()
            }
            None => samples,
        };

        let baseline = self.baseline_store.baseline();
        let evaluation = evaluate(samples, baseline.as_ref(), self.config.adaptation_mode);

        tracing::info!(
            state = evaluation.result.state.as_str(),
            confidence = evaluation.result.confidence,
            samples = evaluation.sample_count,
            baseline_windows = self.baseline_store.window_count(),
            "evaluated cognitive window"
        );

        // Empty windows carry no behavior worth learning from
        if evaluation.sample_count > 0 {
            self.baseline_store.push(evaluation.aggregates);
        }

        self.last_evaluation.insert(evaluation)
    }

    /// Evaluate a window and encode it as a JSON report
    pub fn process_to_json(&mut self, samples: &[SignalSample]) -> Result<String, CognitionError> {
        let evaluation = self.process(samples).clone();
        self.encoder.encode_to_json(&evaluation)
    }

    /// Most recent evaluation, if any window has been processed
    pub fn last_evaluation(&self) -> Option<&Evaluation> {
        self.last_evaluation.as_ref()
    }

    pub fn adaptation_mode(&self) -> AdaptationMode {
        self.config.adaptation_mode
    }

    /// Change the mode; the last evaluation's tokens are remapped in place
    pub fn set_adaptation_mode(&mut self, mode: AdaptationMode) {
        self.config.adaptation_mode = mode;
        if let Some(evaluation) = self.last_evaluation.as_mut() {
            evaluation.mode = mode;
            evaluation.tokens = get_adaptive_tokens(evaluation.result.state, mode);
        }
    }

    /// Current rolling baseline
    pub fn baseline(&self) -> Option<Baseline> {
        self.baseline_store.baseline()
    }

    /// Save baseline state to JSON for persistence
    pub fn save_baselines(&self) -> Result<String, CognitionError> {
        self.baseline_store
            .to_json()
            .map_err(|e| CognitionError::EncodingError(e.to_string()))
    }

    /// Load baseline state from JSON
    pub fn load_baselines(&mut self, json: &str) -> Result<(), CognitionError> {
        self.baseline_store = AggregateBaselineStore::from_json(json)
            .map_err(|e| CognitionError::ParseError(e.to_string()))?;
        Ok(())
    }

    /// Get the number of windows currently in the baseline
    pub fn baseline_window_count(&self) -> usize {
        self.baseline_store.window_count()
    }

    /// Clear all baseline data
    pub fn clear_baselines(&mut self) {
        self.baseline_store.clear();
    }
}
