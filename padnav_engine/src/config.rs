// Copyright 2025 the Padnav Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Engine tunables and where they come from.

use padnav_focus::{AxisWeights, FocusBand};
use serde::{Deserialize, Serialize};

use crate::catalog::ViewportMargins;

/// Delay between closing a dialog with the cancel button and the reconciling rebuild.
pub const DIALOG_CLOSE_REBUILD_DELAY: u64 = 100;

/// Extra time, on top of [`Config::observer_timeout`], that activation waits before checking
/// whether focus moved.
pub const ACTIVATION_SETTLE_MARGIN: u64 = 50;

/// Engine tunables.
///
/// Field names serialize in camelCase. Every field is optional in serialized form and falls
/// back to its default individually. Durations are milliseconds; distances are pixels.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Config {
    /// Weight of the distance along the axis of travel.
    pub primary_axis_weight: f64,
    /// Weight of the deviation across the axis of travel.
    pub perpendicular_axis_weight: f64,
    /// Scroll distance when no candidate exists in a vertical direction.
    pub scroll_amount: f64,
    /// Quiet window after the last scroll event before rebuilding.
    pub scroll_throttle: u64,
    /// Quiet window after the last resize event before rebuilding.
    pub resize_throttle: u64,
    /// Delay after page-load completion before rebuilding.
    pub page_load_rebuild_delay: u64,
    /// Upper edge of the focus band, as a fraction of viewport height.
    pub focus_upper_bound: f64,
    /// Lower edge of the focus band, as a fraction of viewport height.
    pub focus_lower_bound: f64,
    /// Stick magnitude at or below which input is ignored.
    pub analog_deadzone: f64,
    /// Minimum time between two stick-triggered navigations.
    pub analog_cooldown: u64,
    /// Horizontal slack around the viewport inside which elements stay navigable.
    pub viewport_margin_horizontal: f64,
    /// Vertical slack around the viewport inside which elements stay navigable.
    pub viewport_margin_vertical: f64,
    /// Quiet window after the last structural change before rebuilding.
    pub observer_timeout: u64,
    /// Period of the focused-element accessibility check.
    pub focus_validation_interval: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            primary_axis_weight: 0.3,
            perpendicular_axis_weight: 0.7,
            scroll_amount: 200.0,
            scroll_throttle: 150,
            resize_throttle: 250,
            page_load_rebuild_delay: 500,
            focus_upper_bound: 0.25,
            focus_lower_bound: 0.75,
            analog_deadzone: 0.5,
            analog_cooldown: 300,
            viewport_margin_horizontal: 0.0,
            viewport_margin_vertical: 150.0,
            observer_timeout: 200,
            focus_validation_interval: 1000,
        }
    }
}

/// Errors raised while loading or validating a [`Config`].
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The stored record is not valid JSON for a [`Config`].
    #[error("invalid settings record: {0}")]
    Parse(#[from] serde_json::Error),
    /// A value is out of range.
    #[error("invalid setting `{field}`: {reason}")]
    Invalid {
        /// camelCase name of the offending field.
        field: &'static str,
        /// What is wrong with it.
        reason: &'static str,
    },
    /// The backing store could not be read.
    #[error("settings storage unavailable: {0}")]
    Unavailable(String),
}

impl Config {
    /// Parses and validates a JSON record.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks that every value is usable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        fn invalid(field: &'static str, reason: &'static str) -> Result<(), ConfigError> {
            Err(ConfigError::Invalid { field, reason })
        }

        let non_negative = [
            ("primaryAxisWeight", self.primary_axis_weight),
            ("perpendicularAxisWeight", self.perpendicular_axis_weight),
            ("scrollAmount", self.scroll_amount),
            ("viewportMarginHorizontal", self.viewport_margin_horizontal),
            ("viewportMarginVertical", self.viewport_margin_vertical),
        ];
        for (field, value) in non_negative {
            if !value.is_finite() || value < 0.0 {
                return invalid(field, "must be a finite, non-negative number");
            }
        }
        for (field, value) in [
            ("focusUpperBound", self.focus_upper_bound),
            ("focusLowerBound", self.focus_lower_bound),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return invalid(field, "must be a fraction between 0 and 1");
            }
        }
        if self.focus_upper_bound > self.focus_lower_bound {
            return invalid("focusUpperBound", "must not exceed focusLowerBound");
        }
        if !(0.0..1.0).contains(&self.analog_deadzone) {
            return invalid("analogDeadzone", "must be at least 0 and below 1");
        }
        if self.focus_validation_interval == 0 {
            return invalid("focusValidationInterval", "must be positive");
        }
        Ok(())
    }

    /// Scoring weights for the directional policy.
    pub fn axis_weights(&self) -> AxisWeights {
        AxisWeights {
            primary: self.primary_axis_weight,
            perpendicular: self.perpendicular_axis_weight,
        }
    }

    /// Vertical band inside which a focused element needs no scrolling.
    pub fn focus_band(&self) -> FocusBand {
        FocusBand {
            upper: self.focus_upper_bound,
            lower: self.focus_lower_bound,
        }
    }

    /// Slack around the viewport for catalog filtering.
    pub fn viewport_margins(&self) -> ViewportMargins {
        ViewportMargins {
            horizontal: self.viewport_margin_horizontal,
            vertical: self.viewport_margin_vertical,
        }
    }

    /// Time activation waits before adopting a focus change made by the content.
    pub fn activation_settle_delay(&self) -> u64 {
        self.observer_timeout + ACTIVATION_SETTLE_MARGIN
    }
}

/// A place tunables can be loaded from.
pub trait ConfigSource {
    /// Loads the current record.
    ///
    /// `Ok(None)` means no custom settings exist and defaults apply.
    fn load(&mut self) -> Result<Option<Config>, ConfigError>;
}

/// A source with no custom settings.
#[derive(Clone, Copy, Debug, Default)]
pub struct Defaults;

impl ConfigSource for Defaults {
    fn load(&mut self) -> Result<Option<Config>, ConfigError> {
        Ok(None)
    }
}

impl ConfigSource for Config {
    fn load(&mut self) -> Result<Option<Config>, ConfigError> {
        Ok(Some(self.clone()))
    }
}

/// Storage key for the settings of `hostname`.
pub fn site_key(hostname: &str) -> String {
    let host = if hostname.is_empty() {
        "default"
    } else {
        hostname
    };
    format!("settings_{host}")
}

/// Reads one site's record out of a JSON object keyed by [`site_key`].
#[derive(Clone, Debug)]
pub struct JsonConfigSource {
    hostname: String,
    document: String,
}

impl JsonConfigSource {
    /// Creates a source for `hostname` over the serialized store `document`.
    pub fn new(hostname: impl Into<String>, document: impl Into<String>) -> Self {
        Self {
            hostname: hostname.into(),
            document: document.into(),
        }
    }

    /// Replaces the serialized store, typically before signalling a settings change.
    pub fn set_document(&mut self, document: impl Into<String>) {
        self.document = document.into();
    }
}

impl ConfigSource for JsonConfigSource {
    fn load(&mut self) -> Result<Option<Config>, ConfigError> {
        let mut store: serde_json::Map<String, serde_json::Value> =
            serde_json::from_str(&self.document)?;
        let Some(record) = store.remove(&site_key(&self.hostname)) else {
            return Ok(None);
        };
        let config: Config = serde_json::from_value(record)?;
        config.validate()?;
        Ok(Some(config))
    }
}

/// Loads tunables from `source`, falling back to the defaults on any failure.
///
/// Failures are logged, never returned.
pub fn load_config(source: &mut dyn ConfigSource) -> Config {
    match source.load() {
        Ok(Some(config)) => match config.validate() {
            Ok(()) => {
                log::info!("Settings loaded: {config:?}");
                config
            }
            Err(err) => {
                log::warn!("Using default settings ({err})");
                Config::default()
            }
        },
        Ok(None) => {
            log::info!("No custom settings found, using defaults");
            Config::default()
        }
        Err(err) => {
            log::warn!("Using default settings ({err})");
            Config::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Broken;

    impl ConfigSource for Broken {
        fn load(&mut self) -> Result<Option<Config>, ConfigError> {
            Err(ConfigError::Unavailable("quota exceeded".into()))
        }
    }

    #[test]
    fn absent_fields_fall_back_individually() {
        let config = Config::from_json(r#"{ "scrollAmount": 320, "analogCooldown": 120 }"#)
            .unwrap();
        assert_eq!(config.scroll_amount, 320.0);
        assert_eq!(config.analog_cooldown, 120);
        assert_eq!(config.observer_timeout, 200);
        assert_eq!(config.viewport_margin_vertical, 150.0);
    }

    #[test]
    fn round_trips_camel_case_names() {
        let json = serde_json::to_value(Config::default()).unwrap();
        assert_eq!(json["focusValidationInterval"], 1000);
        assert_eq!(json["perpendicularAxisWeight"], 0.7);
    }

    #[test]
    fn rejects_out_of_range_values() {
        let err = Config::from_json(r#"{ "focusUpperBound": 0.8 }"#).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Invalid {
                field: "focusUpperBound",
                ..
            }
        ));
        assert!(Config::from_json(r#"{ "analogDeadzone": 1.0 }"#).is_err());
        assert!(Config::from_json(r#"{ "primaryAxisWeight": -1 }"#).is_err());
        assert!(matches!(
            Config::from_json(r#"{ "observerTimeout": "soon" }"#),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn failures_load_defaults() {
        assert_eq!(load_config(&mut Broken), Config::default());
        assert_eq!(load_config(&mut Defaults), Config::default());
        let mut bad = Config {
            focus_lower_bound: 2.0,
            ..Config::default()
        };
        assert_eq!(load_config(&mut bad), Config::default());
    }

    #[test]
    fn json_store_is_keyed_per_site() {
        assert_eq!(site_key("example.com"), "settings_example.com");
        assert_eq!(site_key(""), "settings_default");

        let doc = r#"{
            "settings_example.com": { "scrollAmount": 90 },
            "settings_other.org": { "scrollAmount": 10 }
        }"#;
        let mut source = JsonConfigSource::new("example.com", doc);
        assert_eq!(load_config(&mut source).scroll_amount, 90.0);

        let mut missing = JsonConfigSource::new("nowhere.net", doc);
        assert!(missing.load().unwrap().is_none());

        source.set_document("not json");
        assert!(source.load().is_err());
        assert_eq!(load_config(&mut source), Config::default());
    }

    #[test]
    fn derived_views() {
        let config = Config::default();
        assert_eq!(config.axis_weights(), AxisWeights::default());
        assert_eq!(config.focus_band(), FocusBand::default());
        assert_eq!(config.activation_settle_delay(), 250);
    }
}
