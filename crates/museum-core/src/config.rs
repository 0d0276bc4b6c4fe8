//! Navigation tuning loaded from TOML, defaulting to the values in `constants`.
//!
//! Every section is `#[serde(default)]`, so a file only needs to name the
//! fields it overrides:
//!
//! ```toml
//! [movement]
//! move_speed = 4.0
//!
//! [bounds]
//! min_z = -20.0
//! ```

use crate::constants::*;
use glam::{Vec2, Vec3};
use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("parse navigation config TOML: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("{field} must be finite")]
    NonFinite { field: &'static str },
    #[error("{field} must be positive (got {value})")]
    NotPositive { field: &'static str, value: f32 },
    #[error("{field} must lie in (0, 1] (got {value})")]
    FactorOutOfRange { field: &'static str, value: f32 },
    #[error("room bounds are inverted: x [{min_x}, {max_x}], z [{min_z}, {max_z}]")]
    InvertedBounds {
        min_x: f32,
        max_x: f32,
        min_z: f32,
        max_z: f32,
    },
    #[error("start position ({x}, {z}) lies outside the room bounds")]
    StartOutOfBounds { x: f32, z: f32 },
}

/// Axis-aligned walkable rectangle on the floor plane, as `(x, z)`.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct RoomBounds {
    pub min_x: f32,
    pub max_x: f32,
    pub min_z: f32,
    pub max_z: f32,
}

impl Default for RoomBounds {
    fn default() -> Self {
        Self {
            min_x: ROOM_MIN_X,
            max_x: ROOM_MAX_X,
            min_z: ROOM_MIN_Z,
            max_z: ROOM_MAX_Z,
        }
    }
}

impl RoomBounds {
    #[inline]
    #[must_use]
    pub fn clamp(&self, p: Vec2) -> Vec2 {
        Vec2::new(
            p.x.clamp(self.min_x, self.max_x),
            p.y.clamp(self.min_z, self.max_z),
        )
    }

    #[inline]
    #[must_use]
    pub fn contains(&self, p: Vec2) -> bool {
        (self.min_x..=self.max_x).contains(&p.x) && (self.min_z..=self.max_z).contains(&p.y)
    }

    /// Distance from `p` to the closest walkable point (0 when inside).
    #[inline]
    #[must_use]
    pub fn distance_to(&self, p: Vec2) -> f32 {
        p.distance(self.clamp(p))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct MovementCfg {
    pub move_speed: f32,
    pub position_smoothing: f32,
    pub rotation_smoothing: f32,
    /// Initial logical position `(x, z)`.
    pub start: Vec2,
}

impl Default for MovementCfg {
    fn default() -> Self {
        Self {
            move_speed: MOVE_SPEED,
            position_smoothing: POSITION_SMOOTHING,
            rotation_smoothing: ROTATION_SMOOTHING,
            start: start_position_vec2(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct ProximityCfg {
    pub activation_radius: f32,
    pub profile_trigger: Vec2,
}

impl Default for ProximityCfg {
    fn default() -> Self {
        Self {
            activation_radius: ACTIVATION_RADIUS,
            profile_trigger: profile_trigger_vec2(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct CameraCfg {
    pub follow_lerp: f32,
    pub zoom_lerp: f32,
    pub height: f32,
    pub follow_x_scale: f32,
    pub follow_distance: f32,
    pub follow_look_height: f32,
    pub follow_look_ahead: f32,
    pub zoom_wall_distance: f32,
    pub zoom_center_distance: f32,
    pub frame_look_height: f32,
    pub profile_position: Vec3,
    pub profile_look_at: Vec3,
    pub initial_position: Vec3,
}

impl Default for CameraCfg {
    fn default() -> Self {
        Self {
            follow_lerp: FOLLOW_LERP,
            zoom_lerp: ZOOM_LERP,
            height: CAMERA_HEIGHT,
            follow_x_scale: FOLLOW_X_SCALE,
            follow_distance: FOLLOW_DISTANCE,
            follow_look_height: FOLLOW_LOOK_HEIGHT,
            follow_look_ahead: FOLLOW_LOOK_AHEAD,
            zoom_wall_distance: ZOOM_WALL_DISTANCE,
            zoom_center_distance: ZOOM_CENTER_DISTANCE,
            frame_look_height: FRAME_LOOK_HEIGHT,
            profile_position: Vec3::from(PROFILE_CAMERA_POSITION),
            profile_look_at: Vec3::from(PROFILE_CAMERA_LOOK_AT),
            initial_position: camera_initial_position_vec3(),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct NavConfig {
    pub movement: MovementCfg,
    pub bounds: RoomBounds,
    pub proximity: ProximityCfg,
    pub camera: CameraCfg,
}

impl NavConfig {
    /// Parse and validate a TOML document; missing fields keep their defaults.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let cfg: NavConfig = toml::from_str(text)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let m = &self.movement;
        let b = &self.bounds;
        let c = &self.camera;
        finite("bounds", &[b.min_x, b.max_x, b.min_z, b.max_z])?;
        finite("movement.start", &m.start.to_array())?;
        finite("proximity.profile_trigger", &self.proximity.profile_trigger.to_array())?;
        finite("camera.profile_position", &c.profile_position.to_array())?;
        finite("camera.profile_look_at", &c.profile_look_at.to_array())?;
        finite("camera.initial_position", &c.initial_position.to_array())?;
        finite(
            "camera",
            &[
                c.height,
                c.follow_x_scale,
                c.follow_distance,
                c.follow_look_height,
                c.follow_look_ahead,
                c.zoom_wall_distance,
                c.zoom_center_distance,
                c.frame_look_height,
            ],
        )?;

        positive("movement.move_speed", m.move_speed)?;
        positive("proximity.activation_radius", self.proximity.activation_radius)?;
        factor("movement.position_smoothing", m.position_smoothing)?;
        factor("movement.rotation_smoothing", m.rotation_smoothing)?;
        factor("camera.follow_lerp", c.follow_lerp)?;
        factor("camera.zoom_lerp", c.zoom_lerp)?;

        if b.min_x > b.max_x || b.min_z > b.max_z {
            return Err(ConfigError::InvertedBounds {
                min_x: b.min_x,
                max_x: b.max_x,
                min_z: b.min_z,
                max_z: b.max_z,
            });
        }
        if !b.contains(m.start) {
            return Err(ConfigError::StartOutOfBounds {
                x: m.start.x,
                z: m.start.y,
            });
        }
        Ok(())
    }
}

fn finite(field: &'static str, values: &[f32]) -> Result<(), ConfigError> {
    if values.iter().all(|v| v.is_finite()) {
        Ok(())
    } else {
        Err(ConfigError::NonFinite { field })
    }
}

fn positive(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if !value.is_finite() {
        return Err(ConfigError::NonFinite { field });
    }
    if value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::NotPositive { field, value })
    }
}

fn factor(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value > 0.0 && value <= 1.0 {
        Ok(())
    } else {
        Err(ConfigError::FactorOutOfRange { field, value })
    }
}
