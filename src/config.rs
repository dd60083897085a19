//! Tunable drawing-tool options.
//!
//! All fields have defaults, so embedders can construct the config from a
//! partial serialized form (e.g. their own settings file) or start from
//! [`DrawConfig::default`] and override individual fields. Out-of-range
//! values are clamped with a warning rather than rejected.

use serde::{Deserialize, Serialize};

use crate::gesture::ClickOptions;
use crate::host::LayerSpec;

/// Default segment count for circle approximation polygons.
pub const DEFAULT_CIRCLE_STEPS: u32 = 128;

/// Configuration for an [`EditSession`](crate::draw::EditSession).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DrawConfig {
    /// Click classification thresholds (4 px / 12 px / 500 ms)
    pub click: ClickOptions,

    /// Double-click classification thresholds (4 px / 12 px / 300 ms)
    pub double_click: ClickOptions,

    /// Segment count for circle polygons
    pub circle_steps: u32,

    /// Render layers for the draw source; `None` uses the built-in set
    pub layers: Option<Vec<LayerSpec>>,
}

impl Default for DrawConfig {
    fn default() -> Self {
        Self {
            click: ClickOptions::click(),
            double_click: ClickOptions::double_click(),
            circle_steps: DEFAULT_CIRCLE_STEPS,
            layers: None,
        }
    }
}

impl DrawConfig {
    /// Clamps all values to acceptable ranges, logging a warning for each
    /// adjustment.
    ///
    /// Validated ranges:
    /// - gesture tolerances: 1.0 - 128.0 px
    /// - gesture intervals: 50 - 5000 ms
    /// - `circle_steps`: 8 - 512
    pub(crate) fn validate_and_clamp(&mut self) {
        clamp_gesture("click", &mut self.click);
        clamp_gesture("double_click", &mut self.double_click);

        if !(8..=512).contains(&self.circle_steps) {
            log::warn!(
                "invalid circle_steps {}, clamping to 8-512 range",
                self.circle_steps
            );
            self.circle_steps = self.circle_steps.clamp(8, 512);
        }
    }
}

fn clamp_gesture(name: &str, options: &mut ClickOptions) {
    if !(1.0..=128.0).contains(&options.fine_tolerance) {
        log::warn!(
            "invalid {name}.fine_tolerance {:.1}, clamping to 1.0-128.0 range",
            options.fine_tolerance
        );
        options.fine_tolerance = options.fine_tolerance.clamp(1.0, 128.0);
    }
    if !(1.0..=128.0).contains(&options.gross_tolerance) {
        log::warn!(
            "invalid {name}.gross_tolerance {:.1}, clamping to 1.0-128.0 range",
            options.gross_tolerance
        );
        options.gross_tolerance = options.gross_tolerance.clamp(1.0, 128.0);
    }
    if !(50..=5000).contains(&options.interval_ms) {
        log::warn!(
            "invalid {name}.interval_ms {}, clamping to 50-5000 range",
            options.interval_ms
        );
        options.interval_ms = options.interval_ms.clamp(50, 5000);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_classification_thresholds() {
        let config = DrawConfig::default();
        assert_eq!(config.click.interval_ms, 500);
        assert_eq!(config.double_click.interval_ms, 300);
        assert_eq!(config.click.fine_tolerance, 4.0);
        assert_eq!(config.click.gross_tolerance, 12.0);
        assert_eq!(config.circle_steps, 128);
    }

    #[test]
    fn out_of_range_values_are_clamped() {
        let mut config = DrawConfig {
            circle_steps: 100_000,
            ..DrawConfig::default()
        };
        config.click.fine_tolerance = -3.0;
        config.double_click.interval_ms = 0;

        config.validate_and_clamp();
        assert_eq!(config.circle_steps, 512);
        assert_eq!(config.click.fine_tolerance, 1.0);
        assert_eq!(config.double_click.interval_ms, 50);
    }

    #[test]
    fn partial_serialized_form_fills_defaults() {
        let config: DrawConfig =
            serde_json::from_str(r#"{ "circle_steps": 64 }"#).expect("partial config");
        assert_eq!(config.circle_steps, 64);
        assert_eq!(config.click.interval_ms, 500);
        assert!(config.layers.is_none());
    }
}
