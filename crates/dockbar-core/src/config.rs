use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::animation::AnimationCurve;
use crate::error::{Error, Result};

/// Longest animation duration the engine accepts, in milliseconds
const MAX_DURATION_MS: u64 = 10_000;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DockConfig {
    #[serde(default)]
    pub bar: BarConfig,
    #[serde(default)]
    pub animation: AnimationConfig,
}

impl Default for DockConfig {
    fn default() -> Self {
        Self {
            bar: BarConfig::default(),
            animation: AnimationConfig::default(),
        }
    }
}

impl DockConfig {
    /// Parse a config from TOML, filling missing fields with defaults
    pub fn from_toml_str(raw: &str) -> Result<Self> {
        let config: DockConfig = toml::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize the config back to TOML
    pub fn to_toml_string(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Check field ranges
    pub fn validate(&self) -> Result<()> {
        self.animation.validate()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BarConfig {
    /// Animate bar height changes triggered by content reloads
    #[serde(default = "default_true")]
    pub animate_height_on_reload: bool,
}

impl Default for BarConfig {
    fn default() -> Self {
        Self {
            animate_height_on_reload: default_true(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnimationConfig {
    /// Transition duration in milliseconds
    #[serde(default = "default_duration_ms")]
    pub duration_ms: u64,
    /// Hold time before the transition starts, in milliseconds
    #[serde(default)]
    pub delay_ms: u64,
    /// Spring damping ratio; 1.0 and above is critically damped
    #[serde(default = "default_spring_damping")]
    pub spring_damping: f32,
    /// Initial spring velocity in total-distance units per second
    #[serde(default)]
    pub initial_velocity: f32,
    /// Timing curve
    #[serde(default = "default_curve")]
    pub curve: AnimationCurve,
    /// Start replacement transitions from the currently presented height
    /// instead of the last committed one
    #[serde(default = "default_true")]
    pub begin_from_current_state: bool,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            duration_ms: default_duration_ms(),
            delay_ms: 0,
            spring_damping: default_spring_damping(),
            initial_velocity: 0.0,
            curve: default_curve(),
            begin_from_current_state: default_true(),
        }
    }
}

impl AnimationConfig {
    pub fn duration(&self) -> Duration {
        Duration::from_millis(self.duration_ms)
    }

    pub fn delay(&self) -> Duration {
        Duration::from_millis(self.delay_ms)
    }

    pub fn validate(&self) -> Result<()> {
        if self.duration_ms > MAX_DURATION_MS {
            return Err(Error::Config(format!(
                "animation duration {}ms exceeds the {}ms limit",
                self.duration_ms, MAX_DURATION_MS
            )));
        }
        if self.delay_ms > MAX_DURATION_MS {
            return Err(Error::Config(format!(
                "animation delay {}ms exceeds the {}ms limit",
                self.delay_ms, MAX_DURATION_MS
            )));
        }
        if self.spring_damping <= 0.0 || !self.spring_damping.is_finite() {
            return Err(Error::Config(format!(
                "spring damping must be positive, got {}",
                self.spring_damping
            )));
        }
        if !self.initial_velocity.is_finite() {
            return Err(Error::Config(
                "initial velocity must be finite".to_string(),
            ));
        }
        Ok(())
    }
}

fn default_true() -> bool {
    true
}

fn default_duration_ms() -> u64 {
    250
}

fn default_spring_damping() -> f32 {
    0.8
}

fn default_curve() -> AnimationCurve {
    AnimationCurve::Spring
}
