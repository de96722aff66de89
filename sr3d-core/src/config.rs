//! Render configuration.
//!
//! Everything the frame pipeline reads besides the scene itself. The
//! defaults reproduce the fixed 400x400 canvas setup; a JSON document can
//! override any subset of fields.

use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::projection::Camera;

/// RGB color with unclamped channels, nominally in `0.0..=255.0`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Color {
    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    pub const fn gray(value: f32) -> Self {
        Self::new(value, value, value)
    }

    /// Channels clamped to `0..=255` and rounded, for surfaces that need bytes.
    pub fn to_rgb8(self) -> [u8; 3] {
        let channel = |c: f32| {
            if c.is_nan() {
                0
            } else {
                c.round().clamp(0.0, 255.0) as u8
            }
        };
        [channel(self.r), channel(self.g), channel(self.b)]
    }
}

/// How each frame is painted around the shaded triangles.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FrameStyle {
    pub background: Color,
    /// Triangle outline color; `None` disables outlines.
    pub stroke: Option<Color>,
    pub stroke_weight: f32,
}

impl Default for FrameStyle {
    fn default() -> Self {
        Self {
            background: Color::gray(220.0),
            stroke: Some(Color::new(237.0, 34.0, 93.0)),
            stroke_weight: 1.0,
        }
    }
}

/// Root configuration for the frame pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    pub camera: Camera,
    /// Direction of the single directional light.
    pub light_direction: [f32; 3],
    pub style: FrameStyle,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            camera: Camera::default(),
            light_direction: [0.0, 0.0, -1.0],
            style: FrameStyle::default(),
        }
    }
}

impl RenderConfig {
    /// Parses config from JSON.
    pub fn from_json_str(s: &str) -> serde_json::Result<Self> {
        serde_json::from_str(s)
    }

    /// Reject camera values the projection would divide by zero on.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let Camera {
            width,
            height,
            fov,
            near,
            far,
        } = self.camera;

        if width == 0 || height == 0 {
            return Err(ConfigError::EmptyCanvas { width, height });
        }
        if !(fov.is_finite() && fov > 0.0 && fov < 180.0) {
            return Err(ConfigError::FieldOfView(fov));
        }
        if !(near.is_finite() && far.is_finite()) || far == near {
            return Err(ConfigError::DepthRange { near, far });
        }
        Ok(())
    }

    pub fn light(&self) -> Vector3<f32> {
        Vector3::from(self.light_direction)
    }
}
