//! Signal sample adapter
//!
//! Parses signal samples and baselines from the JSON shapes capture
//! collaborators emit, and flags samples the aggregator would silently
//! mis-weight.

use serde::Serialize;

use crate::cognitive::types::{Baseline, SignalSample, SignalType};
use crate::error::CognitionError;

/// Parse a JSON array of signal samples
pub fn parse_samples(json: &str) -> Result<Vec<SignalSample>, CognitionError> {
    serde_json::from_str(json)
        .map_err(|e| CognitionError::ParseError(format!("Failed to parse sample array: {}", e)))
}

/// Parse newline-delimited JSON, one sample per line; blank lines are skipped
pub fn parse_samples_ndjson(text: &str) -> Result<Vec<SignalSample>, CognitionError> {
    let mut samples = Vec::new();

    for (index, line) in text.lines().enumerate() {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }

        let sample = serde_json::from_str(trimmed).map_err(|e| {
            CognitionError::InvalidSampleLine {
                line: index + 1,
                message: e.to_string(),
            }
        })?;
        samples.push(sample);
    }

    Ok(samples)
}

/// Parse a baseline aggregate; missing fields default to zero
pub fn parse_baseline(json: &str) -> Result<Baseline, CognitionError> {
    serde_json::from_str(json)
        .map_err(|e| CognitionError::ParseError(format!("Failed to parse baseline: {}", e)))
}

/// A problem found in one sample
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SampleIssue {
    /// Position of the sample in the input
    pub index: usize,
    pub signal_type: String,
    pub reason: SampleIssueKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SampleIssueKind {
    /// NaN or infinite value
    NonFinite,
    /// Negative value for a signal that measures time, speed or entropy
    Negative,
    /// Signal type this version does not aggregate
    UnknownType,
}

/// Report samples that are unknown, non-finite or negative.
///
/// The aggregator tolerates all of these; this is for capture collaborators
/// that want to filter before calling in.
pub fn validate_samples(samples: &[SignalSample]) -> Vec<SampleIssue> {
    samples
        .iter()
        .enumerate()
        .filter_map(|(index, sample)| {
            let reason = if let SignalType::Other(_) = sample.signal_type {
                SampleIssueKind::UnknownType
            } else if !sample.value.is_finite() {
                SampleIssueKind::NonFinite
            } else if sample.value < 0.0 {
                SampleIssueKind::Negative
            } else {
                return None;
            };

            Some(SampleIssue {
                index,
                signal_type: sample.signal_type.as_str().to_string(),
                reason,
            })
        })
        .collect()
}
