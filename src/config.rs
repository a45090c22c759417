use serde::Serialize;

use crate::telemetry::LogLevel;

const DEFAULT_GLITCH_INTERVAL_MS: u32 = 3_000;
const DEFAULT_GLITCH_PROBABILITY: f64 = 0.05;
const DEFAULT_GLITCH_DURATION_MS: u32 = 200;
const DEFAULT_SCROLL_THRESHOLD_PX: f64 = 100.0;
const DEFAULT_PARALLAX_MIN_VIEWPORT_PX: f64 = 768.0;
const DEFAULT_LOG_LEVEL: LogLevel = LogLevel::Info;

const GLITCH_INTERVAL_MS_BOUNDS: (u32, u32) = (250, 60_000);
const GLITCH_PROBABILITY_BOUNDS: (f64, f64) = (0.0, 1.0);
const GLITCH_DURATION_MS_BOUNDS: (u32, u32) = (16, 5_000);
const SCROLL_THRESHOLD_PX_BOUNDS: (f64, f64) = (0.0, 10_000.0);
const PARALLAX_MIN_VIEWPORT_PX_BOUNDS: (f64, f64) = (0.0, 10_000.0);

pub const GLITCH_INTERVAL_MS_ATTRIBUTE: &str = "data-effects-glitch-interval-ms";
pub const GLITCH_PROBABILITY_ATTRIBUTE: &str = "data-effects-glitch-probability";
pub const GLITCH_DURATION_MS_ATTRIBUTE: &str = "data-effects-glitch-duration-ms";
pub const SCROLL_THRESHOLD_ATTRIBUTE: &str = "data-effects-scroll-threshold";
pub const PARALLAX_MIN_WIDTH_ATTRIBUTE: &str = "data-effects-parallax-min-width";
pub const LOG_LEVEL_ATTRIBUTE: &str = "data-effects-log-level";

/// Tunables for every effect, overridable through `data-effects-*`
/// attributes on the document root.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EffectsConfig {
    pub glitch_interval_ms: u32,
    pub glitch_probability: f64,
    pub glitch_duration_ms: u32,
    pub scroll_threshold_px: f64,
    pub parallax_min_viewport_px: f64,
    pub log_level: LogLevel,
}

impl Default for EffectsConfig {
    fn default() -> Self {
        Self {
            glitch_interval_ms: DEFAULT_GLITCH_INTERVAL_MS,
            glitch_probability: DEFAULT_GLITCH_PROBABILITY,
            glitch_duration_ms: DEFAULT_GLITCH_DURATION_MS,
            scroll_threshold_px: DEFAULT_SCROLL_THRESHOLD_PX,
            parallax_min_viewport_px: DEFAULT_PARALLAX_MIN_VIEWPORT_PX,
            log_level: DEFAULT_LOG_LEVEL,
        }
    }
}

impl EffectsConfig {
    pub fn from_attributes(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let glitch_interval_ms = parse_u32_with_bounds(
            &lookup,
            GLITCH_INTERVAL_MS_ATTRIBUTE,
            DEFAULT_GLITCH_INTERVAL_MS,
            GLITCH_INTERVAL_MS_BOUNDS,
        );
        let glitch_probability = parse_f64_with_bounds(
            &lookup,
            GLITCH_PROBABILITY_ATTRIBUTE,
            DEFAULT_GLITCH_PROBABILITY,
            GLITCH_PROBABILITY_BOUNDS,
        );
        let glitch_duration_ms = parse_u32_with_bounds(
            &lookup,
            GLITCH_DURATION_MS_ATTRIBUTE,
            DEFAULT_GLITCH_DURATION_MS,
            GLITCH_DURATION_MS_BOUNDS,
        );
        let scroll_threshold_px = parse_f64_with_bounds(
            &lookup,
            SCROLL_THRESHOLD_ATTRIBUTE,
            DEFAULT_SCROLL_THRESHOLD_PX,
            SCROLL_THRESHOLD_PX_BOUNDS,
        );
        let parallax_min_viewport_px = parse_f64_with_bounds(
            &lookup,
            PARALLAX_MIN_WIDTH_ATTRIBUTE,
            DEFAULT_PARALLAX_MIN_VIEWPORT_PX,
            PARALLAX_MIN_VIEWPORT_PX_BOUNDS,
        );
        let log_level = parse_log_level(&lookup, LOG_LEVEL_ATTRIBUTE, DEFAULT_LOG_LEVEL);

        Self {
            glitch_interval_ms,
            glitch_probability,
            glitch_duration_ms,
            scroll_threshold_px,
            parallax_min_viewport_px,
            log_level,
        }
    }
}

fn parse_u32_with_bounds(
    lookup: &impl Fn(&str) -> Option<String>,
    name: &str,
    default: u32,
    bounds: (u32, u32),
) -> u32 {
    lookup(name)
        .and_then(|value| value.trim().parse::<u32>().ok())
        .filter(|value| (bounds.0..=bounds.1).contains(value))
        .unwrap_or(default)
}

fn parse_f64_with_bounds(
    lookup: &impl Fn(&str) -> Option<String>,
    name: &str,
    default: f64,
    bounds: (f64, f64),
) -> f64 {
    lookup(name)
        .and_then(|value| value.trim().parse::<f64>().ok())
        .filter(|value| (bounds.0..=bounds.1).contains(value))
        .unwrap_or(default)
}

fn parse_log_level(
    lookup: &impl Fn(&str) -> Option<String>,
    name: &str,
    default: LogLevel,
) -> LogLevel {
    lookup(name)
        .and_then(|value| LogLevel::from_name(&value))
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let values: HashMap<String, String> = pairs
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();
        move |name| values.get(name).cloned()
    }

    #[test]
    fn missing_attributes_yield_defaults() {
        let config = EffectsConfig::from_attributes(|_| None);
        assert_eq!(config, EffectsConfig::default());
        assert_eq!(config.glitch_interval_ms, 3_000);
        assert_eq!(config.glitch_duration_ms, 200);
        assert_eq!(config.scroll_threshold_px, 100.0);
        assert_eq!(config.parallax_min_viewport_px, 768.0);
    }

    #[test]
    fn valid_overrides_are_applied() {
        let config = EffectsConfig::from_attributes(lookup_from(&[
            (GLITCH_INTERVAL_MS_ATTRIBUTE, " 1500 "),
            (GLITCH_PROBABILITY_ATTRIBUTE, "0.25"),
            (SCROLL_THRESHOLD_ATTRIBUTE, "40"),
            (LOG_LEVEL_ATTRIBUTE, "Debug"),
        ]));

        assert_eq!(config.glitch_interval_ms, 1_500);
        assert_eq!(config.glitch_probability, 0.25);
        assert_eq!(config.scroll_threshold_px, 40.0);
        assert_eq!(config.log_level, LogLevel::Debug);
        assert_eq!(config.glitch_duration_ms, DEFAULT_GLITCH_DURATION_MS);
    }

    #[test]
    fn out_of_bounds_or_malformed_values_fall_back() {
        let config = EffectsConfig::from_attributes(lookup_from(&[
            (GLITCH_INTERVAL_MS_ATTRIBUTE, "10"),
            (GLITCH_PROBABILITY_ATTRIBUTE, "1.5"),
            (GLITCH_DURATION_MS_ATTRIBUTE, "soon"),
            (PARALLAX_MIN_WIDTH_ATTRIBUTE, "NaN"),
            (LOG_LEVEL_ATTRIBUTE, "verbose"),
        ]));

        assert_eq!(config, EffectsConfig::default());
    }

    #[test]
    fn config_serializes_with_camel_case_keys() {
        let value = serde_json::to_value(EffectsConfig::default()).expect("config serializes");
        assert_eq!(value["glitchIntervalMs"], serde_json::json!(3_000));
        assert_eq!(value["logLevel"], serde_json::json!("info"));
    }
}
