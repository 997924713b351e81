//! Adaptive presentation tokens
//!
//! Maps a cognitive state and adaptation mode to a full `AdaptiveTokens`
//! vector by blending that state's override table onto the base tokens.
//!
//! The five continuous tokens (opacity, glow, font, density, touch target)
//! interpolate with the mode's intensity. Discrete tokens (timing strings,
//! notification gating, layout flags) switch wholesale once intensity
//! exceeds 0.5, so `Subtle` fully switches them while only partly moving the
//! numbers. Hosts rely on that asymmetry; keep it. Line height, accent
//! saturation and contrast boost are not state-adapted and stay at base.

use crate::cognitive::types::{
    AdaptationMode, AdaptiveTokens, CognitiveState, NotificationFrequency,
};

/// Intensity above which discrete tokens take their override
pub const DISCRETE_SWITCH_INTENSITY: f64 = 0.5;

/// Partial override of the base tokens for one state
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TokenOverrides {
    pub animation_duration: Option<&'static str>,
    pub animation_ease: Option<&'static str>,
    pub ui_opacity: Option<f64>,
    pub glow_intensity: Option<f64>,
    pub font_scale: Option<f64>,
    pub density_scale: Option<f64>,
    pub touch_target_scale: Option<f64>,
    pub notification_frequency: Option<NotificationFrequency>,
    pub auto_hide_chrome: Option<bool>,
    pub simplify_layout: Option<bool>,
    pub suggest_break: Option<bool>,
}

impl TokenOverrides {
    pub const NONE: TokenOverrides = TokenOverrides {
        animation_duration: None,
        animation_ease: None,
        ui_opacity: None,
        glow_intensity: None,
        font_scale: None,
        density_scale: None,
        touch_target_scale: None,
        notification_frequency: None,
        auto_hide_chrome: None,
        simplify_layout: None,
        suggest_break: None,
    };
}

const FLOW_TOKENS: TokenOverrides = TokenOverrides {
    animation_duration: Some("400ms"),
    animation_ease: Some("cubic-bezier(0.25, 0.1, 0.25, 1)"),
    ui_opacity: Some(0.9),
    glow_intensity: Some(0.3),
    density_scale: Some(0.95),
    notification_frequency: Some(NotificationFrequency::Critical),
    auto_hide_chrome: Some(true),
    ..TokenOverrides::NONE
};

const DISTRACTED_TOKENS: TokenOverrides = TokenOverrides {
    animation_duration: Some("200ms"),
    animation_ease: Some("ease-out"),
    ui_opacity: Some(1.0),
    glow_intensity: Some(0.7),
    font_scale: Some(1.05),
    density_scale: Some(0.85),
    touch_target_scale: Some(1.1),
    notification_frequency: Some(NotificationFrequency::Important),
    simplify_layout: Some(true),
    ..TokenOverrides::NONE
};

const OVERLOAD_TOKENS: TokenOverrides = TokenOverrides {
    animation_duration: Some("500ms"),
    animation_ease: Some("ease-in-out"),
    ui_opacity: Some(0.85),
    glow_intensity: Some(0.1),
    font_scale: Some(1.1),
    density_scale: Some(0.7),
    touch_target_scale: Some(1.15),
    notification_frequency: Some(NotificationFrequency::None),
    auto_hide_chrome: Some(true),
    simplify_layout: Some(true),
    suggest_break: Some(true),
};

const FATIGUED_TOKENS: TokenOverrides = TokenOverrides {
    animation_duration: Some("600ms"),
    animation_ease: Some("ease-in-out"),
    ui_opacity: Some(0.92),
    glow_intensity: Some(0.2),
    font_scale: Some(1.15),
    density_scale: Some(0.8),
    touch_target_scale: Some(1.2),
    notification_frequency: Some(NotificationFrequency::Important),
    simplify_layout: Some(true),
    suggest_break: Some(true),
    ..TokenOverrides::NONE
};

const HYPERFOCUS_TOKENS: TokenOverrides = TokenOverrides {
    animation_duration: Some("250ms"),
    animation_ease: Some("linear"),
    ui_opacity: Some(0.8),
    glow_intensity: Some(0.15),
    density_scale: Some(1.1),
    notification_frequency: Some(NotificationFrequency::None),
    auto_hide_chrome: Some(true),
    suggest_break: Some(true),
    ..TokenOverrides::NONE
};

const RECOVERY_TOKENS: TokenOverrides = TokenOverrides {
    animation_duration: Some("800ms"),
    animation_ease: Some("ease-in-out"),
    ui_opacity: Some(0.95),
    glow_intensity: Some(0.6),
    font_scale: Some(1.05),
    density_scale: Some(0.9),
    notification_frequency: Some(NotificationFrequency::All),
    ..TokenOverrides::NONE
};

/// Neutral presentation every state blends away from
pub fn base_tokens() -> AdaptiveTokens {
    AdaptiveTokens {
        animation_duration: "300ms".to_string(),
        animation_ease: "cubic-bezier(0.4, 0, 0.2, 1)".to_string(),
        ui_opacity: 1.0,
        glow_intensity: 0.5,
        font_scale: 1.0,
        line_height_scale: 1.0,
        density_scale: 1.0,
        touch_target_scale: 1.0,
        accent_saturation: 1.0,
        contrast_boost: 0.0,
        notification_frequency: NotificationFrequency::All,
        auto_hide_chrome: false,
        simplify_layout: false,
        suggest_break: false,
    }
}

/// Override table for a state; neutral overrides nothing
pub fn state_overrides(state: CognitiveState) -> TokenOverrides {
    match state {
        CognitiveState::Neutral => TokenOverrides::NONE,
        CognitiveState::Flow => FLOW_TOKENS,
        CognitiveState::Distracted => DISTRACTED_TOKENS,
        CognitiveState::Overload => OVERLOAD_TOKENS,
        CognitiveState::Fatigued => FATIGUED_TOKENS,
        CognitiveState::Hyperfocus => HYPERFOCUS_TOKENS,
        CognitiveState::Recovery => RECOVERY_TOKENS,
    }
}

/// Tokens for a state under an adaptation mode
pub fn get_adaptive_tokens(state: CognitiveState, mode: AdaptationMode) -> AdaptiveTokens {
    let tokens = apply_overrides(base_tokens(), &state_overrides(state), mode.intensity());

    tracing::debug!(
        state = state.as_str(),
        mode = mode.as_str(),
        notifications = tokens.notification_frequency.as_str(),
        suggest_break = tokens.suggest_break,
        "mapped adaptive tokens"
    );

    tokens
}

/// Blend an override table onto a token set at the given intensity (0-1)
pub fn apply_overrides(
    base: AdaptiveTokens,
    overrides: &TokenOverrides,
    intensity: f64,
) -> AdaptiveTokens {
    let intensity = intensity.clamp(0.0, 1.0);
    let switched = intensity > DISCRETE_SWITCH_INTENSITY;

    AdaptiveTokens {
        animation_duration: switch(base.animation_duration, overrides.animation_duration, switched),
        animation_ease: switch(base.animation_ease, overrides.animation_ease, switched),
        ui_opacity: interpolate(base.ui_opacity, overrides.ui_opacity, intensity),
        glow_intensity: interpolate(base.glow_intensity, overrides.glow_intensity, intensity),
        font_scale: interpolate(base.font_scale, overrides.font_scale, intensity),
        line_height_scale: base.line_height_scale,
        density_scale: interpolate(base.density_scale, overrides.density_scale, intensity),
        touch_target_scale: interpolate(
            base.touch_target_scale,
            overrides.touch_target_scale,
            intensity,
        ),
        accent_saturation: base.accent_saturation,
        contrast_boost: base.contrast_boost,
        notification_frequency: switch_copy(
            base.notification_frequency,
            overrides.notification_frequency,
            switched,
        ),
        auto_hide_chrome: switch_copy(base.auto_hide_chrome, overrides.auto_hide_chrome, switched),
        simplify_layout: switch_copy(base.simplify_layout, overrides.simplify_layout, switched),
        suggest_break: switch_copy(base.suggest_break, overrides.suggest_break, switched),
    }
}

fn interpolate(base: f64, target: Option<f64>, intensity: f64) -> f64 {
    match target {
        // Full intensity lands exactly on the override
        Some(target) if intensity >= 1.0 => target,
        Some(target) => base + (target - base) * intensity,
        None => base,
    }
}

fn switch(base: String, target: Option<&'static str>, switched: bool) -> String {
    match target {
        Some(target) if switched => target.to_string(),
        _ => base,
    }
}

fn switch_copy<T: Copy>(base: T, target: Option<T>, switched: bool) -> T {
    match target {
        Some(target) if switched => target,
        _ => base,
    }
}
