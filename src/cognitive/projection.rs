//! Token projections for the rendering layer and the transparency panel

use std::collections::BTreeMap;

use crate::cognitive::types::{AdaptiveTokens, CognitiveState};

/// Prefix shared by every CSS custom property this crate emits
pub const CSS_VARIABLE_PREFIX: &str = "--adaptive-";

/// Flatten tokens into CSS custom properties, one per token field
pub fn tokens_to_css_variables(tokens: &AdaptiveTokens) -> BTreeMap<String, String> {
    let entries = [
        ("animation-duration", tokens.animation_duration.clone()),
        ("animation-ease", tokens.animation_ease.clone()),
        ("ui-opacity", tokens.ui_opacity.to_string()),
        ("glow-intensity", tokens.glow_intensity.to_string()),
        ("font-scale", tokens.font_scale.to_string()),
        ("line-height-scale", tokens.line_height_scale.to_string()),
        ("density-scale", tokens.density_scale.to_string()),
        ("touch-target-scale", tokens.touch_target_scale.to_string()),
        ("accent-saturation", tokens.accent_saturation.to_string()),
        ("contrast-boost", tokens.contrast_boost.to_string()),
        (
            "notification-frequency",
            tokens.notification_frequency.as_str().to_string(),
        ),
        ("auto-hide-chrome", tokens.auto_hide_chrome.to_string()),
        ("simplify-layout", tokens.simplify_layout.to_string()),
        ("suggest-break", tokens.suggest_break.to_string()),
    ];

    entries
        .into_iter()
        .map(|(name, value)| (format!("{CSS_VARIABLE_PREFIX}{name}"), value))
        .collect()
}

/// One sentence describing why the interface looks the way it does
pub fn explain_adaptation(state: CognitiveState, tokens: &AdaptiveTokens) -> String {
    let sentence = match state {
        CognitiveState::Neutral => {
            "Your interface is in its standard configuration."
        }
        CognitiveState::Flow => {
            "You're in a flow state, so distractions are minimized and the interface stays out of your way."
        }
        CognitiveState::Distracted => {
            "Your attention seems scattered, so the layout is simplified and key elements are emphasized."
        }
        CognitiveState::Overload => {
            "You appear overloaded, so notifications are paused and the interface is calmer and more spacious."
        }
        CognitiveState::Fatigued => {
            "Signs of fatigue detected, so text is larger and motion is slower to reduce strain."
        }
        CognitiveState::Hyperfocus => {
            "You've been deeply focused for a while, so interruptions are held back while you work."
        }
        CognitiveState::Recovery => {
            "You're recharging, so the interface is relaxed and gentle."
        }
    };

    if tokens.suggest_break {
        format!("{sentence} Consider taking a short break.")
    } else {
        sentence.to_string()
    }
}
