//! Page-level tunables.
//!
//! Defaults match the stock page; a host page can override any subset with a
//! JSON block (`<script id="ui-config" type="application/json">`) that
//! `boot` feeds to [`UiConfig::from_json`]. Missing fields keep their default.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use std::time::Duration;

use serde::{Deserialize, Serialize};

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid ui config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid ui config: {field} {reason}")]
    Invalid { field: &'static str, reason: &'static str },
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    pub notification: NotificationConfig,
    /// Storage key holding the theme name.
    pub theme_key: String,
    /// How long a copy button shows its "Copied!" state.
    pub copy_feedback_ms: u64,
    /// Remaining-character count below which a counter turns to a warning.
    pub counter_warning_threshold: i64,
    pub animation: AnimationConfig,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            notification: NotificationConfig::default(),
            theme_key: "theme".to_owned(),
            copy_feedback_ms: 2000,
            counter_warning_threshold: 50,
            animation: AnimationConfig::default(),
        }
    }
}

impl UiConfig {
    /// Parse a (possibly partial) JSON override.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed JSON or mistyped fields,
    /// and [`ConfigError::Invalid`] for values outside their range.
    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.theme_key.is_empty() {
            return Err(ConfigError::Invalid { field: "theme_key", reason: "must not be empty" });
        }
        if !(0.0..=1.0).contains(&self.animation.threshold) {
            return Err(ConfigError::Invalid {
                field: "animation.threshold",
                reason: "must be within 0..=1",
            });
        }
        Ok(())
    }

    #[must_use]
    pub fn copy_feedback(&self) -> Duration {
        Duration::from_millis(self.copy_feedback_ms)
    }
}

/// Placement and timing of notification alerts.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NotificationConfig {
    pub duration_ms: u64,
    pub top_px: u32,
    pub right_px: u32,
    pub z_index: i32,
    pub max_width_px: u32,
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self { duration_ms: 3000, top_px: 20, right_px: 20, z_index: 9999, max_width_px: 400 }
    }
}

impl NotificationConfig {
    #[must_use]
    pub fn duration(&self) -> Duration {
        Duration::from_millis(self.duration_ms)
    }
}

/// Scroll-reveal animation of cards.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnimationConfig {
    pub selector: String,
    pub class: String,
    pub threshold: f64,
    pub root_margin: String,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            selector: ".feature-card, .tool-card, .provider-card".to_owned(),
            class: "animate-fade-in".to_owned(),
            threshold: 0.1,
            root_margin: "0px 0px -50px 0px".to_owned(),
        }
    }
}
