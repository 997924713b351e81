//! Cognitive report encoder
//!
//! Encodes an evaluation into a versioned JSON report with producer
//! metadata, for hosts that ship results across a process boundary.

use std::collections::BTreeMap;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::cognitive::pipeline::Evaluation;
use crate::cognitive::projection::{explain_adaptation, tokens_to_css_variables};
use crate::cognitive::types::{AdaptationMode, AdaptiveTokens, CognitiveStateResult};
use crate::error::CognitionError;
use crate::{COGNITION_VERSION, PRODUCER_NAME};

/// Current report schema version
pub const REPORT_VERSION: &str = "1.0.0";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportProducer {
    pub name: String,
    pub version: String,
    pub instance_id: String,
}

/// Time span the report covers
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportWindow {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_utc: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_utc: Option<String>,
    pub duration_ms: u64,
    pub sample_count: usize,
}

/// One evaluation, ready to serialize
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CognitiveReport {
    pub report_version: String,
    pub producer: ReportProducer,
    pub computed_at_utc: String,
    pub window: ReportWindow,
    pub adaptation_mode: AdaptationMode,
    pub result: CognitiveStateResult,
    pub tokens: AdaptiveTokens,
    pub css_variables: BTreeMap<String, String>,
    pub explanation: String,
}

/// Report encoder
pub struct ReportEncoder {
    instance_id: String,
}

impl Default for ReportEncoder {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportEncoder {
    /// Create a new encoder with a unique instance ID
    pub fn new() -> Self {
        Self {
            instance_id: Uuid::new_v4().to_string(),
        }
    }

    /// Create an encoder with a specific instance ID
    pub fn with_instance_id(instance_id: String) -> Self {
        Self { instance_id }
    }

    pub fn instance_id(&self) -> &str {
        &self.instance_id
    }

    /// Encode an evaluation into a report
    pub fn encode(&self, evaluation: &Evaluation) -> CognitiveReport {
        let producer = ReportProducer {
            name: PRODUCER_NAME.to_string(),
            version: COGNITION_VERSION.to_string(),
            instance_id: self.instance_id.clone(),
        };

        let window = ReportWindow {
            start_utc: evaluation.window_start.map(|t| t.to_rfc3339()),
            end_utc: evaluation.window_end.map(|t| t.to_rfc3339()),
            duration_ms: evaluation.aggregates.session_duration_ms,
            sample_count: evaluation.sample_count,
        };

        CognitiveReport {
            report_version: REPORT_VERSION.to_string(),
            producer,
            computed_at_utc: Utc::now().to_rfc3339(),
            window,
            adaptation_mode: evaluation.mode,
            result: evaluation.result,
            css_variables: tokens_to_css_variables(&evaluation.tokens),
            explanation: explain_adaptation(evaluation.result.state, &evaluation.tokens),
            tokens: evaluation.tokens.clone(),
        }
    }

    /// Encode to a pretty-printed JSON string
    pub fn encode_to_json(&self, evaluation: &Evaluation) -> Result<String, CognitionError> {
        let report = self.encode(evaluation);
        serde_json::to_string_pretty(&report).map_err(CognitionError::JsonError)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cognitive::pipeline::evaluate;
    use crate::cognitive::types::{CognitiveState, SignalSample, SignalType};
    use crate::COGNITION_VERSION;
    use chrono::{Duration, TimeZone};

    fn idle_window() -> Vec<SignalSample> {
        let start = Utc.with_ymd_and_hms(2024, 1, 15, 14, 0, 0).unwrap();
        vec![
            SignalSample::new(SignalType::IdleTime, 200_000.0, start),
            SignalSample::new(
                SignalType::IdleTime,
                160_000.0,
                start + Duration::minutes(8),
            ),
        ]
    }

    #[test]
    fn test_encode_report() {
        let evaluation = evaluate(&idle_window(), None, AdaptationMode::Visible);
        let encoder = ReportEncoder::with_instance_id("test-instance".to_string());
        let report = encoder.encode(&evaluation);

        assert_eq!(report.report_version, REPORT_VERSION);
        assert_eq!(report.producer.name, PRODUCER_NAME);
        assert_eq!(report.producer.version, COGNITION_VERSION);
        assert_eq!(report.producer.instance_id, "test-instance");

        assert_eq!(report.window.sample_count, 2);
        assert_eq!(report.window.duration_ms, 8 * 60_000);
        assert_eq!(
            report.window.start_utc.as_deref(),
            Some("2024-01-15T14:00:00+00:00")
        );

        assert_eq!(report.result.state, CognitiveState::Recovery);
        assert_eq!(report.css_variables.len(), 14);
        assert!(report.explanation.starts_with("You're recharging"));
    }

    #[test]
    fn test_encode_to_json() {
        let evaluation = evaluate(&idle_window(), None, AdaptationMode::Subtle);
        let json = ReportEncoder::new().encode_to_json(&evaluation).unwrap();

        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed["report_version"], "1.0.0");
        assert_eq!(parsed["producer"]["name"], "synheart-cognition");
        assert_eq!(parsed["adaptation_mode"], "subtle");
        assert_eq!(parsed["result"]["state"], "recovery");
        assert!(parsed["tokens"]["ui_opacity"].is_number());
        assert!(parsed["css_variables"]["--adaptive-ui-opacity"].is_string());
    }

    #[test]
    fn test_empty_window_omits_bounds() {
        let evaluation = evaluate(&[], None, AdaptationMode::Subtle);
        let value = serde_json::to_value(ReportEncoder::new().encode(&evaluation)).unwrap();

        assert!(value["window"].get("start_utc").is_none());
        assert_eq!(value["window"]["sample_count"], 0);
        assert_eq!(value["result"]["state"], "neutral");
    }

    #[test]
    fn test_unique_instance_ids() {
        assert_ne!(ReportEncoder::new().instance_id(), ReportEncoder::new().instance_id());
    }
}
