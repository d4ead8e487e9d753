//! FSM tunables (perception radii, slew rates, retreat timing).

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Ошибки загрузки/валидации AIConfig
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("failed to parse AI config: {0}")]
    Parse(String),

    #[error("AI config field `{0}` is not finite")]
    NonFinite(&'static str),

    #[error("AI config field `{0}` must be greater than zero")]
    NonPositive(&'static str),

    #[error("visibility half-angle must be in (0, 180] degrees, got {0}")]
    HalfAngleOutOfRange(f32),
}

/// Параметры AI (perception + steering)
///
/// Defaults match the shipped melee enemy. Radii are world units,
/// angles are degrees, rates are per second.
#[derive(Debug, Clone, PartialEq, Reflect, Serialize, Deserialize)]
#[serde(default)]
pub struct AIConfig {
    /// Радиус обзора (строгое `<`)
    pub visibility_radius: f32,
    /// Половина угла конуса обзора, градусы (строгое `<`)
    pub visibility_half_angle: f32,
    /// Радиус атаки (строгое `<`)
    pub attack_radius: f32,
    /// Скорость поворота к цели во время Attack (slerp factor per second)
    pub rotation_speed: f32,
    /// Скорость сглаживания `forwardSpeed` blend параметра в Chase
    pub locomotion_blend_rate: f32,
    /// Сколько MoveBack держится до resolve (секунды)
    pub move_back_duration: f32,
    /// Насколько отходим от цели в MoveBack
    pub move_back_distance: f32,
}

impl Default for AIConfig {
    fn default() -> Self {
        Self {
            visibility_radius: 15.0,
            visibility_half_angle: 90.0,
            attack_radius: 3.0,
            rotation_speed: 5.0,
            locomotion_blend_rate: 10.0,
            move_back_duration: 1.5,
            move_back_distance: 4.0,
        }
    }
}

impl AIConfig {
    /// Parse a RON document. Missing fields fall back to defaults.
    pub fn from_ron_str(source: &str) -> Result<Self, ConfigError> {
        let config: AIConfig =
            ron::from_str(source).map_err(|err| ConfigError::Parse(err.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_ron_string(&self) -> Result<String, ConfigError> {
        ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
            .map_err(|err| ConfigError::Parse(err.to_string()))
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = [
            ("visibility_radius", self.visibility_radius),
            ("attack_radius", self.attack_radius),
            ("rotation_speed", self.rotation_speed),
            ("locomotion_blend_rate", self.locomotion_blend_rate),
            ("move_back_duration", self.move_back_duration),
            ("move_back_distance", self.move_back_distance),
        ];

        for (name, value) in positive {
            if !value.is_finite() {
                return Err(ConfigError::NonFinite(name));
            }
            if value <= 0.0 {
                return Err(ConfigError::NonPositive(name));
            }
        }

        if !self.visibility_half_angle.is_finite() {
            return Err(ConfigError::NonFinite("visibility_half_angle"));
        }
        if self.visibility_half_angle <= 0.0 || self.visibility_half_angle > 180.0 {
            return Err(ConfigError::HalfAngleOutOfRange(self.visibility_half_angle));
        }

        Ok(())
    }
}
