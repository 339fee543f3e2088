//! Viewer session settings

use serde::{Deserialize, Serialize};

use super::Config;

/// Settings for one viewer session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    /// Camera projection and start pose
    pub camera: CameraConfig,

    /// Emphasis applied to the hovered material
    pub highlight: HighlightConfig,

    /// Frame loop interval in milliseconds
    pub frame_interval_ms: u64,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            camera: CameraConfig::default(),
            highlight: HighlightConfig::default(),
            frame_interval_ms: 16,
        }
    }
}

impl Config for ViewerConfig {}

/// Perspective camera settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Vertical field of view in degrees
    pub fov_degrees: f32,
    /// Near clipping plane
    pub near: f32,
    /// Far clipping plane
    pub far: f32,
    /// Camera position before any model is framed
    pub initial_position: [f32; 3],
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            fov_degrees: 70.0,
            near: 0.01,
            far: 100.0,
            initial_position: [-1.0, -2.0, 0.5],
        }
    }
}

/// Hover emphasis settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HighlightConfig {
    /// Emission color written to every bound material
    pub color: [f32; 3],
    /// Emission strength of the hovered material
    pub intensity: f32,
}

impl Default for HighlightConfig {
    fn default() -> Self {
        Self {
            color: [0.0, 0.75, 1.0],
            intensity: 0.5,
        }
    }
}
