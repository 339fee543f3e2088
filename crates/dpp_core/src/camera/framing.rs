//! Load-triggered normalization and camera placement

use thiserror::Error;

use super::Camera;
use crate::foundation::math::{Transform, Vec3};
use crate::scene::{SceneGraph, AABB};

/// Smallest largest-dimension a model may have and still be framed
pub const MIN_DIMENSION: f32 = 1e-6;

/// Errors raised while framing a freshly loaded model
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FramingError {
    /// The scene has no vertex positions at all
    #[error("Scene has no geometry to frame")]
    EmptyScene,

    /// Every dimension of the bounds is (close to) zero
    #[error("Scene bounds are degenerate (largest dimension {max_dimension})")]
    DegenerateBounds {
        /// Largest dimension that was measured
        max_dimension: f32,
    },
}

/// Transform mapping `bounds` to a box centered at the origin whose largest
/// dimension is 1, i.e. `p' = (p - center) * scale`
pub fn fit_transform(bounds: &AABB) -> Result<Transform, FramingError> {
    let max_dimension = bounds.max_dimension();
    if max_dimension.is_nan() || max_dimension < MIN_DIMENSION {
        return Err(FramingError::DegenerateBounds { max_dimension });
    }

    let scale = 1.0 / max_dimension;
    Ok(Transform::from_translation_scale(-bounds.center() * scale, scale))
}

/// Center the scene at the origin and scale it to unit size
///
/// Returns the bounds after normalization.
pub fn normalize_scene(scene: &mut SceneGraph) -> Result<AABB, FramingError> {
    let bounds = scene.bounds().ok_or(FramingError::EmptyScene)?;
    let fit = fit_transform(&bounds)?;
    scene.apply_model_transform(&fit);

    let normalized = scene.bounds().ok_or(FramingError::EmptyScene)?;
    log::debug!(
        "Normalized model: size {:?} -> {:?}",
        bounds.size(),
        normalized.size()
    );
    Ok(normalized)
}

/// Place the camera so a model with these bounds is fully in view
///
/// The viewing distance is `d = 2 * |max_dim / 4 * tan(2 * fov)|`; the camera
/// sits at `center + (-d, 0.5 d, 1.25 d)` and orbits `center - (0.5 d, 0, 0)`.
pub fn frame_camera(camera: &mut Camera, bounds: &AABB) {
    let center = bounds.center();
    let distance = 2.0 * (bounds.max_dimension() / 4.0 * (2.0 * camera.fov).tan()).abs();

    camera.set_position(center + Vec3::new(-distance, 0.5 * distance, 1.25 * distance));
    camera.set_target(center - Vec3::new(0.5 * distance, 0.0, 0.0));
    log::debug!("Camera framed model at distance {}", distance);
}
