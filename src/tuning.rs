//! Data-driven game balance
//!
//! Every gameplay constant lives here with the carnival's stock values as
//! defaults. A JSON file may override any subset of fields; the result is
//! validated once, before any entity is built.

use std::path::Path;

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, ensure_finite, ensure_positive};
use crate::input::Keymap;
use crate::sim::bounds::MAX_SUBDIVISIONS;
use crate::sim::motion::{MotionKind, Parabolic};

/// Basketball toss constants
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BasketballTuning {
    /// Vertical acceleration (units/s², negative)
    pub gravity: f32,
    /// Height offset at release
    pub initial_height: f32,
    /// Speed toward the camera's forward direction (units/s)
    pub forward_speed: f32,
    /// Sideways drift (units/s)
    pub lateral_speed: f32,
    /// Visual spin (radians/s)
    pub spin_rate: f32,
    /// Starting throw power (initial vertical velocity)
    pub power: f32,
    pub min_power: f32,
    pub max_power: f32,
    /// Power change per power-up/down key press
    pub power_step: f32,
    /// Ball position relative to the camera while held
    pub hold_offset: [f32; 3],
    /// Ball radius
    pub radius: f32,
    /// A ball whose center drops below this height is a miss
    pub ground_height: f32,
}

impl Default for BasketballTuning {
    fn default() -> Self {
        Self {
            gravity: -3.9,
            initial_height: 0.0,
            forward_speed: 4.0,
            lateral_speed: 0.0,
            spin_rate: 1.0,
            power: 5.5,
            min_power: 1.0,
            max_power: 12.0,
            power_step: 0.5,
            hold_offset: [0.0, -0.8, -3.0],
            radius: 0.3,
            ground_height: 0.5,
        }
    }
}

/// All gameplay tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Dart flight speed (units/s)
    pub dart_speed: f32,
    /// Dart position relative to the camera while held
    pub dart_hold_offset: [f32; 3],
    /// Dart collider half-extents (unit sphere scale)
    pub dart_collider_scale: [f32; 3],
    /// Balloon collider half-extents (unit sphere scale)
    pub balloon_collider_scale: [f32; 3],
    /// Leeway added to every collider's unit radius
    pub collider_margin: f32,
    /// A projectile still flying after this long is a miss
    pub max_flight_seconds: f32,
    /// Icosphere refinement of the collision sample points
    pub bounding_subdivisions: u32,
    /// Emit collider wireframes in the draw list
    pub show_bounds: bool,
    pub basketball: BasketballTuning,
    pub keys: Keymap,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            dart_speed: 15.0,
            dart_hold_offset: [0.0, -1.0, -5.0],
            dart_collider_scale: [0.1, 0.1, 0.6],
            balloon_collider_scale: [0.5, 0.6, 0.5],
            collider_margin: 0.1,
            max_flight_seconds: 4.0,
            bounding_subdivisions: 2,
            show_bounds: false,
            basketball: BasketballTuning::default(),
            keys: Keymap::default(),
        }
    }
}

fn ensure_positive_vec(name: &'static str, v: [f32; 3]) -> Result<Vec3, ConfigError> {
    for c in v {
        ensure_positive(name, c)?;
    }
    Ok(Vec3::from(v))
}

fn ensure_finite_vec(name: &'static str, v: [f32; 3]) -> Result<Vec3, ConfigError> {
    for c in v {
        ensure_finite(name, c)?;
    }
    Ok(Vec3::from(v))
}

impl Tuning {
    /// Parse and validate tuning JSON; missing fields keep their defaults
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Read tuning from a JSON file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let tuning = Self::from_json(&json)?;
        log::info!("Loaded tuning from {}", path.display());
        Ok(tuning)
    }

    /// Read tuning from `path` if given, falling back to defaults on any error
    pub fn load_or_default(path: Option<&Path>) -> Self {
        match path.map(Self::load) {
            Some(Ok(tuning)) => tuning,
            Some(Err(e)) => {
                log::warn!("{e}; using default tuning");
                Self::default()
            }
            None => {
                log::info!("Using default tuning");
                Self::default()
            }
        }
    }

    pub fn to_json_pretty(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Reject any constant the simulation cannot run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.dart_motion()?;
        self.basketball_motion()?;
        self.dart_hold_offset()?;
        self.basketball_hold_offset()?;
        ensure_positive_vec("dart collider scale", self.dart_collider_scale)?;
        ensure_positive_vec("balloon collider scale", self.balloon_collider_scale)?;
        ensure_positive("collider margin", self.collider_margin)?;
        ensure_positive("max flight seconds", self.max_flight_seconds)?;
        if self.bounding_subdivisions > MAX_SUBDIVISIONS {
            return Err(ConfigError::TooManySubdivisions {
                got: self.bounding_subdivisions,
                max: MAX_SUBDIVISIONS,
            });
        }

        let ball = &self.basketball;
        ensure_positive("basketball radius", ball.radius)?;
        ensure_positive("power step", ball.power_step)?;
        ensure_finite("ground height", ball.ground_height)?;
        ensure_finite("min power", ball.min_power)?;
        ensure_finite("max power", ball.max_power)?;
        ensure_finite("power", ball.power)?;
        if ball.min_power > ball.max_power {
            return Err(ConfigError::EmptyPowerRange {
                min: ball.min_power,
                max: ball.max_power,
            });
        }

        self.keys.validate()
    }

    pub fn dart_motion(&self) -> Result<MotionKind, ConfigError> {
        MotionKind::linear(self.dart_speed)
    }

    /// Basketball arc using the starting power
    pub fn basketball_motion(&self) -> Result<MotionKind, ConfigError> {
        let ball = &self.basketball;
        MotionKind::parabolic(Parabolic {
            velocity: self.starting_power(),
            gravity: ball.gravity,
            initial_height: ball.initial_height,
            forward_speed: ball.forward_speed,
            lateral_speed: ball.lateral_speed,
            spin_rate: ball.spin_rate,
        })
    }

    /// Configured power clamped into its range
    pub fn starting_power(&self) -> f32 {
        let ball = &self.basketball;
        ball.power.max(ball.min_power).min(ball.max_power)
    }

    pub fn dart_hold_offset(&self) -> Result<Vec3, ConfigError> {
        ensure_finite_vec("dart hold offset", self.dart_hold_offset)
    }

    pub fn basketball_hold_offset(&self) -> Result<Vec3, ConfigError> {
        ensure_finite_vec("basketball hold offset", self.basketball.hold_offset)
    }
}
