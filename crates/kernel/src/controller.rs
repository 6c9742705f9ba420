use crate::camera::Camera;
use glam::Vec3;
use voxshot_input::ControlState;

/// Horizontal movement speed, units per second.
pub const MOVE_SPEED: f32 = 5.0;

/// Translates directional intents into a camera-relative velocity request.
///
/// This component only shapes the intent vector; grounded-ness, gravity,
/// and the jump impulse are the integrator's business.
#[derive(Debug, Clone, Copy)]
pub struct PlayerController {
    pub speed: f32,
}

impl PlayerController {
    pub fn new() -> Self {
        Self { speed: MOVE_SPEED }
    }

    /// Compute this tick's movement intent.
    ///
    /// Directional booleans combine into a vector in the camera's local
    /// frame (−Z forward, +X right), normalized with a zero-length guard,
    /// scaled to speed, then rotated by the camera's yaw/pitch. Opposing
    /// keys cancel; zero input yields a zero vector, never NaN.
    pub fn intent(&self, controls: &ControlState, camera: &Camera) -> Vec3 {
        let rightward = (controls.right as i32 - controls.left as i32) as f32;
        let backward = (controls.backward as i32 - controls.forward as i32) as f32;
        let local = Vec3::new(rightward, 0.0, backward);
        camera.rotation() * (local.normalize_or_zero() * self.speed)
    }
}

impl Default for PlayerController {
    fn default() -> Self {
        Self::new()
    }
}
