use crate::config::default_overlay_refresh_ms;

use std::time::Duration;

use clipdeck_core::overlay::{OverlaySettings, TextStyle};
use serde::{Deserialize, Serialize};

fn default_font() -> String {
    TextStyle::default().font
}

fn default_fill() -> String {
    TextStyle::default().fill
}

fn default_shadow_color() -> String {
    TextStyle::default().shadow_color
}

fn default_shadow_blur() -> f64 {
    TextStyle::default().shadow_blur
}

fn default_margin() -> f64 {
    TextStyle::default().margin
}

/// Timestamp overlay configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OverlayConfig {
    /// Redraw cadence while playing, in milliseconds.
    #[serde(default = "default_overlay_refresh_ms")]
    pub refresh_interval_ms: u64,
    /// Font shorthand.
    #[serde(default = "default_font")]
    pub font: String,
    /// Text colour.
    #[serde(default = "default_fill")]
    pub fill: String,
    /// Drop shadow colour.
    #[serde(default = "default_shadow_color")]
    pub shadow_color: String,
    /// Drop shadow blur radius.
    #[serde(default = "default_shadow_blur")]
    pub shadow_blur: f64,
    /// Distance from the top-right corner in pixels.
    #[serde(default = "default_margin")]
    pub margin: f64,
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self {
            refresh_interval_ms: default_overlay_refresh_ms(),
            font: default_font(),
            fill: default_fill(),
            shadow_color: default_shadow_color(),
            shadow_blur: default_shadow_blur(),
            margin: default_margin(),
        }
    }
}

impl From<&OverlayConfig> for OverlaySettings {
    fn from(config: &OverlayConfig) -> Self {
        OverlaySettings {
            refresh_interval: Duration::from_millis(config.refresh_interval_ms),
            style: TextStyle {
                font: config.font.clone(),
                fill: config.fill.clone(),
                shadow_color: config.shadow_color.clone(),
                shadow_blur: config.shadow_blur,
                margin: config.margin,
                ..TextStyle::default()
            },
        }
    }
}
