use crate::field::BoundaryPolicy;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum StartLayout {
    #[default]
    Random,
    /// Agents evenly spaced on a ring around the field midpoint, headings
    /// tangent to the ring.
    Circle,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SimConfig {
    /// Deterministic seed for reproducible simulation runs.
    pub seed: u64,
    /// Field width in cells.
    pub width: usize,
    /// Field height in cells.
    pub height: usize,
    /// Radius at which the three sensor samples are taken.
    pub sensor_distance: f64,
    /// Angular offset (radians) of the left/right sensors from the heading.
    pub sensor_angle: f64,
    /// Angular step (radians) applied on a turn decision.
    pub turning_speed: f64,
    /// Linear distance advanced per tick.
    pub speed: f64,
    /// Multiplicative attenuation applied to the trail field each tick.
    pub decay_factor: f32,
    /// Value added to an agent's occupied cell each tick.
    pub deposit_amount: f32,
    /// Population cardinality. Changing it triggers a regeneration.
    pub num_agents: usize,
    /// Initial agent placement. Changing it triggers a regeneration.
    pub start_layout: StartLayout,
    /// Boundary policy: toroidal wrap when true, clamp-to-edge otherwise.
    pub wrap_around: bool,
    /// Randomize turn magnitude in [0.5, 1.0] x turning_speed.
    pub random_turning: bool,
    /// Rendering hint only; not consumed by the step pipeline.
    pub highlight_agents: bool,
    /// Diagnostics hint; drivers may echo per-sample progress when set.
    pub show_debug: bool,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            width: 800,
            height: 600,
            sensor_distance: 9.0,
            sensor_angle: std::f64::consts::FRAC_PI_4,
            turning_speed: std::f64::consts::FRAC_PI_8,
            speed: 1.0,
            decay_factor: 0.9,
            deposit_amount: 0.25,
            num_agents: 2000,
            start_layout: StartLayout::Random,
            wrap_around: true,
            random_turning: false,
            highlight_agents: false,
            show_debug: false,
        }
    }
}

macro_rules! define_sim_config_error {
    (
        $(
            $variant:ident $( { $($field:ident : $type:ty),* } )? => $fmt:literal $(, $arg:expr)*
        );* $(;)?
    ) => {
        #[derive(Debug, Clone, PartialEq)]
        pub enum SimConfigError {
            $(
                $variant $( { $($field : $type),* } )?,
            )*
        }

        impl std::fmt::Display for SimConfigError {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                match self {
                    $(
                        Self::$variant $( { $($field),* } )? => write!(f, $fmt $(, $arg)*),
                    )*
                }
            }
        }
    };
}

define_sim_config_error! {
    InvalidFieldDim => "width and height must each be at least 3 cells";
    FieldTooLarge { max: usize, actual: usize } => "field dimension ({actual}) exceeds supported maximum ({max})";
    FieldCellOverflow => "width * height overflows usize";
    InvalidNumAgents => "num_agents must be greater than 0";
    TooManyAgents { max: usize, actual: usize } => "Too many agents: {} > max {}", actual, max;
    InvalidSensorDistance => "sensor_distance must be finite and non-negative";
    InvalidSensorAngle => "sensor_angle must be finite";
    InvalidTurningSpeed => "turning_speed must be finite and non-negative";
    InvalidSpeed => "speed must be finite, non-negative, and smaller than the field's shorter side";
    InvalidDecayFactor => "decay_factor must be finite and within [0,1)";
    InvalidDepositAmount => "deposit_amount must be finite and non-negative";
}

impl std::error::Error for SimConfigError {}

impl SimConfig {
    pub const MAX_FIELD_DIM: usize = crate::constants::MAX_FIELD_DIM;

    pub const MAX_AGENTS: usize = crate::constants::MAX_AGENTS;

    pub fn validate(&self) -> Result<(), SimConfigError> {
        self.validate_field()?;
        self.validate_agents()?;
        self.validate_sensing()?;
        self.validate_motion()?;
        self.validate_trail()?;
        Ok(())
    }

    /// Boundary policy realized from the `wrap_around` flag.
    pub fn boundary_policy(&self) -> BoundaryPolicy {
        if self.wrap_around {
            BoundaryPolicy::Wrap
        } else {
            BoundaryPolicy::Clamp
        }
    }

    fn validate_field(&self) -> Result<(), SimConfigError> {
        if self.width < 3 || self.height < 3 {
            return Err(SimConfigError::InvalidFieldDim);
        }
        let largest = self.width.max(self.height);
        if largest > Self::MAX_FIELD_DIM {
            return Err(SimConfigError::FieldTooLarge {
                max: Self::MAX_FIELD_DIM,
                actual: largest,
            });
        }
        self.width
            .checked_mul(self.height)
            .ok_or(SimConfigError::FieldCellOverflow)?;
        Ok(())
    }

    fn validate_agents(&self) -> Result<(), SimConfigError> {
        if self.num_agents == 0 {
            return Err(SimConfigError::InvalidNumAgents);
        }
        if self.num_agents > Self::MAX_AGENTS {
            return Err(SimConfigError::TooManyAgents {
                max: Self::MAX_AGENTS,
                actual: self.num_agents,
            });
        }
        Ok(())
    }

    fn validate_sensing(&self) -> Result<(), SimConfigError> {
        if !(self.sensor_distance.is_finite() && self.sensor_distance >= 0.0) {
            return Err(SimConfigError::InvalidSensorDistance);
        }
        if !self.sensor_angle.is_finite() {
            return Err(SimConfigError::InvalidSensorAngle);
        }
        if !(self.turning_speed.is_finite() && self.turning_speed >= 0.0) {
            return Err(SimConfigError::InvalidTurningSpeed);
        }
        Ok(())
    }

    fn validate_motion(&self) -> Result<(), SimConfigError> {
        // The clamp policy folds a single out-of-range step only, so one
        // tick's displacement must stay below the shorter field side.
        let shorter = self.width.min(self.height) as f64;
        if !(self.speed.is_finite() && self.speed >= 0.0 && self.speed < shorter) {
            return Err(SimConfigError::InvalidSpeed);
        }
        Ok(())
    }

    fn validate_trail(&self) -> Result<(), SimConfigError> {
        if !(self.decay_factor.is_finite() && (0.0..1.0).contains(&self.decay_factor)) {
            return Err(SimConfigError::InvalidDecayFactor);
        }
        if !(self.deposit_amount.is_finite() && self.deposit_amount >= 0.0) {
            return Err(SimConfigError::InvalidDepositAmount);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validate_accepts_default() {
        let config = SimConfig::default();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn validate_rejects_degenerate_field() {
        let config = SimConfig {
            width: 2,
            ..SimConfig::default()
        };
        assert_eq!(config.validate(), Err(SimConfigError::InvalidFieldDim));

        let config = SimConfig {
            height: SimConfig::MAX_FIELD_DIM + 1,
            ..SimConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(SimConfigError::FieldTooLarge { .. })
        ));
    }

    #[test]
    fn validate_rejects_invalid_counts() {
        let config = SimConfig {
            num_agents: 0,
            ..SimConfig::default()
        };
        assert_eq!(config.validate(), Err(SimConfigError::InvalidNumAgents));

        let config = SimConfig {
            num_agents: SimConfig::MAX_AGENTS + 1,
            ..SimConfig::default()
        };
        match config.validate() {
            Err(SimConfigError::TooManyAgents { .. }) => (),
            other => panic!("expected TooManyAgents, got {other:?}"),
        }
    }

    #[test]
    fn validate_rejects_out_of_range_decay() {
        for decay in [1.0, 1.5, -0.1, f32::NAN] {
            let config = SimConfig {
                decay_factor: decay,
                ..SimConfig::default()
            };
            assert_eq!(config.validate(), Err(SimConfigError::InvalidDecayFactor));
        }
    }

    #[test]
    fn validate_rejects_speed_reaching_field_size() {
        let config = SimConfig {
            width: 100,
            height: 100,
            speed: 100.0,
            ..SimConfig::default()
        };
        assert_eq!(config.validate(), Err(SimConfigError::InvalidSpeed));
    }

    #[test]
    fn validate_rejects_non_finite_sensing() {
        let config = SimConfig {
            sensor_distance: f64::NAN,
            ..SimConfig::default()
        };
        assert_eq!(
            config.validate(),
            Err(SimConfigError::InvalidSensorDistance)
        );

        let config = SimConfig {
            sensor_angle: f64::INFINITY,
            ..SimConfig::default()
        };
        assert_eq!(config.validate(), Err(SimConfigError::InvalidSensorAngle));
    }

    #[test]
    fn config_round_trips_through_json() {
        let config = SimConfig {
            seed: 7,
            width: 320,
            height: 240,
            sensor_angle: 0.5,
            start_layout: StartLayout::Circle,
            wrap_around: false,
            random_turning: true,
            ..SimConfig::default()
        };
        let json = serde_json::to_string(&config).expect("config should serialize");
        let parsed: SimConfig = serde_json::from_str(&json).expect("config should parse");
        assert_eq!(parsed, config);
    }

    #[test]
    fn partial_config_json_deserializes_with_defaults() {
        let partial_json = r#"{
            "seed": 7,
            "num_agents": 500,
            "start_layout": "circle"
        }"#;
        let cfg: SimConfig = serde_json::from_str(partial_json).expect("partial config should parse");
        assert_eq!(cfg.seed, 7);
        assert_eq!(cfg.num_agents, 500);
        assert_eq!(cfg.start_layout, StartLayout::Circle);
        assert_eq!(cfg.width, SimConfig::default().width);
        assert_eq!(cfg.decay_factor, SimConfig::default().decay_factor);
        assert!(cfg.wrap_around);
    }

    #[test]
    fn error_display_messages_are_preserved() {
        let cases = vec![
            (
                SimConfigError::InvalidFieldDim,
                "width and height must each be at least 3 cells",
            ),
            (
                SimConfigError::FieldTooLarge {
                    max: 4096,
                    actual: 5000,
                },
                "field dimension (5000) exceeds supported maximum (4096)",
            ),
            (
                SimConfigError::TooManyAgents {
                    max: 100,
                    actual: 200,
                },
                "Too many agents: 200 > max 100",
            ),
            (
                SimConfigError::InvalidDecayFactor,
                "decay_factor must be finite and within [0,1)",
            ),
            (
                SimConfigError::InvalidSpeed,
                "speed must be finite, non-negative, and smaller than the field's shorter side",
            ),
        ];

        for (err, expected) in cases {
            assert_eq!(err.to_string(), expected);
        }
    }
}
