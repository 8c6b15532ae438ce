//! Persisted configuration overrides: a defaults-diffed key/value view of
//! [`SimConfig`], independent of the step pipeline.
//!
//! [`to_overrides`] emits only the entries that differ from the defaults, so
//! an untouched configuration persists as an empty map. [`from_overrides`]
//! starts from the defaults and applies recognized, well-formed, in-range
//! values; anything unrecognized, malformed, or out of range silently keeps
//! the default rather than propagating a bad value into the pipeline.

use crate::config::{SimConfig, StartLayout};
use std::collections::BTreeMap;

pub fn to_overrides(config: &SimConfig) -> BTreeMap<String, String> {
    let defaults = SimConfig::default();
    let mut out = BTreeMap::new();
    let mut push = |key: &str, value: String| {
        out.insert(key.to_string(), value);
    };

    if config.seed != defaults.seed {
        push("seed", config.seed.to_string());
    }
    if config.width != defaults.width {
        push("width", config.width.to_string());
    }
    if config.height != defaults.height {
        push("height", config.height.to_string());
    }
    if config.sensor_distance != defaults.sensor_distance {
        push("sensor_distance", config.sensor_distance.to_string());
    }
    if config.sensor_angle != defaults.sensor_angle {
        push("sensor_angle", config.sensor_angle.to_string());
    }
    if config.turning_speed != defaults.turning_speed {
        push("turning_speed", config.turning_speed.to_string());
    }
    if config.speed != defaults.speed {
        push("speed", config.speed.to_string());
    }
    if config.decay_factor != defaults.decay_factor {
        push("decay_factor", config.decay_factor.to_string());
    }
    if config.deposit_amount != defaults.deposit_amount {
        push("deposit_amount", config.deposit_amount.to_string());
    }
    if config.num_agents != defaults.num_agents {
        push("num_agents", config.num_agents.to_string());
    }
    if config.start_layout != defaults.start_layout {
        push("start_layout", layout_name(config.start_layout).to_string());
    }
    if config.wrap_around != defaults.wrap_around {
        push("wrap_around", config.wrap_around.to_string());
    }
    if config.random_turning != defaults.random_turning {
        push("random_turning", config.random_turning.to_string());
    }
    if config.highlight_agents != defaults.highlight_agents {
        push("highlight_agents", config.highlight_agents.to_string());
    }
    if config.show_debug != defaults.show_debug {
        push("show_debug", config.show_debug.to_string());
    }
    out
}

pub fn from_overrides(overrides: &BTreeMap<String, String>) -> SimConfig {
    let mut config = SimConfig::default();
    for (key, value) in overrides {
        apply_override(&mut config, key, value);
    }
    // Cross-field bound the per-key guards cannot see: the clamp policy folds
    // one step only, so speed must stay below the shorter field side.
    if config.speed >= config.width.min(config.height) as f64 {
        config.speed = SimConfig::default().speed;
    }
    debug_assert!(config.validate().is_ok());
    config
}

fn layout_name(layout: StartLayout) -> &'static str {
    match layout {
        StartLayout::Random => "random",
        StartLayout::Circle => "circle",
    }
}

fn apply_override(config: &mut SimConfig, key: &str, value: &str) {
    match key {
        "seed" => {
            if let Ok(v) = value.parse::<u64>() {
                config.seed = v;
            }
        }
        "width" => set_dim(&mut config.width, value),
        "height" => set_dim(&mut config.height, value),
        "sensor_distance" => set_f64(&mut config.sensor_distance, value, |v| v >= 0.0),
        "sensor_angle" => set_f64(&mut config.sensor_angle, value, |_| true),
        "turning_speed" => set_f64(&mut config.turning_speed, value, |v| v >= 0.0),
        "speed" => set_f64(&mut config.speed, value, |v| v >= 0.0),
        "decay_factor" => set_f32(&mut config.decay_factor, value, |v| (0.0..1.0).contains(&v)),
        "deposit_amount" => set_f32(&mut config.deposit_amount, value, |v| v >= 0.0),
        "num_agents" => {
            if let Ok(v) = value.parse::<usize>() {
                if (1..=SimConfig::MAX_AGENTS).contains(&v) {
                    config.num_agents = v;
                }
            }
        }
        "start_layout" => match value {
            "random" => config.start_layout = StartLayout::Random,
            "circle" => config.start_layout = StartLayout::Circle,
            _ => {}
        },
        "wrap_around" => set_bool(&mut config.wrap_around, value),
        "random_turning" => set_bool(&mut config.random_turning, value),
        "highlight_agents" => set_bool(&mut config.highlight_agents, value),
        "show_debug" => set_bool(&mut config.show_debug, value),
        _ => {}
    }
}

fn set_dim(slot: &mut usize, value: &str) {
    if let Ok(v) = value.parse::<usize>() {
        if (3..=SimConfig::MAX_FIELD_DIM).contains(&v) {
            *slot = v;
        }
    }
}

fn set_f64(slot: &mut f64, value: &str, in_range: impl Fn(f64) -> bool) {
    if let Ok(v) = value.parse::<f64>() {
        if v.is_finite() && in_range(v) {
            *slot = v;
        }
    }
}

fn set_f32(slot: &mut f32, value: &str, in_range: impl Fn(f32) -> bool) {
    if let Ok(v) = value.parse::<f32>() {
        if v.is_finite() && in_range(v) {
            *slot = v;
        }
    }
}

fn set_bool(slot: &mut bool, value: &str) {
    if let Ok(v) = value.parse::<bool>() {
        *slot = v;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_diffs_to_an_empty_map() {
        assert!(to_overrides(&SimConfig::default()).is_empty());
    }

    #[test]
    fn only_changed_options_are_persisted() {
        let config = SimConfig {
            speed: 1.8,
            start_layout: StartLayout::Circle,
            ..SimConfig::default()
        };
        let overrides = to_overrides(&config);
        assert_eq!(overrides.len(), 2);
        assert_eq!(overrides["speed"], "1.8");
        assert_eq!(overrides["start_layout"], "circle");
    }

    #[test]
    fn overrides_round_trip_for_every_option() {
        let config = SimConfig {
            seed: 99,
            width: 400,
            height: 300,
            sensor_distance: 12.5,
            sensor_angle: 0.6,
            turning_speed: 0.3,
            speed: 2.25,
            decay_factor: 0.85,
            deposit_amount: 0.4,
            num_agents: 5000,
            start_layout: StartLayout::Circle,
            wrap_around: false,
            random_turning: true,
            highlight_agents: true,
            show_debug: true,
        };
        let restored = from_overrides(&to_overrides(&config));
        assert_eq!(restored, config);
    }

    #[test]
    fn malformed_values_fall_back_to_defaults() {
        let mut overrides = BTreeMap::new();
        overrides.insert("speed".to_string(), "fast".to_string());
        overrides.insert("decay_factor".to_string(), "NaN".to_string());
        overrides.insert("num_agents".to_string(), "-5".to_string());
        let config = from_overrides(&overrides);
        assert_eq!(config, SimConfig::default());
    }

    #[test]
    fn out_of_range_values_fall_back_to_defaults() {
        let mut overrides = BTreeMap::new();
        overrides.insert("decay_factor".to_string(), "1.0".to_string());
        overrides.insert("width".to_string(), "2".to_string());
        overrides.insert("num_agents".to_string(), "0".to_string());
        let config = from_overrides(&overrides);
        assert_eq!(config, SimConfig::default());
    }

    #[test]
    fn unrecognized_keys_are_ignored() {
        let mut overrides = BTreeMap::new();
        overrides.insert("warp_speed".to_string(), "9".to_string());
        overrides.insert("seed".to_string(), "5".to_string());
        let config = from_overrides(&overrides);
        assert_eq!(config.seed, 5);
        let rest = SimConfig { seed: 42, ..config };
        assert_eq!(rest, SimConfig::default());
    }

    #[test]
    fn restored_configs_always_validate() {
        let mut overrides = BTreeMap::new();
        overrides.insert("width".to_string(), "10".to_string());
        overrides.insert("height".to_string(), "10".to_string());
        overrides.insert("speed".to_string(), "50.0".to_string());
        let config = from_overrides(&overrides);
        assert!(config.validate().is_ok());
        assert_eq!(config.speed, SimConfig::default().speed);
    }
}
