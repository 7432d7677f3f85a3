//! Third-person chase camera

use arena_engine::foundation::math::{world_up, Vec3};
use arena_engine::render::{Camera, Viewport};

use crate::config::CameraConfig;

/// Keeps a [`Camera`] trailing behind and above the avatar
#[derive(Debug, Clone)]
pub struct ChaseCamera {
    camera: Camera,
    tuning: CameraConfig,
}

impl ChaseCamera {
    /// Place the camera at its configured start position
    pub fn new(tuning: CameraConfig, viewport: Viewport) -> Self {
        let [x, y, z] = tuning.start_position;
        let camera = Camera::perspective(
            Vec3::new(x, y, z),
            tuning.fov_degrees,
            viewport.aspect_ratio().unwrap_or(1.0),
            tuning.near,
            tuning.far,
        );
        Self { camera, tuning }
    }

    /// The underlying camera
    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    /// Where the camera wants to be for a target at `position` facing `forward`
    pub fn desired_position(&self, position: Vec3, forward: Vec3) -> Vec3 {
        position + world_up() * self.tuning.height_offset - forward * self.tuning.trail_distance
    }

    /// Ease toward the chase position and look at the target
    ///
    /// The remaining gap shrinks by `decay_base` per second, independent of
    /// frame rate.
    pub fn follow(&mut self, dt: f32, position: Vec3, forward: Vec3) {
        let desired = self.desired_position(position, forward);
        let t = 1.0 - self.tuning.decay_base.powf(dt.max(0.0));
        let eased = self.camera.position.lerp(&desired, t);

        self.camera.set_position(eased);
        self.camera.look_at(position + world_up() * self.tuning.look_height, world_up());
    }

    /// Adopt the new viewport's aspect ratio; minimized surfaces are ignored
    pub fn resize(&mut self, viewport: Viewport) {
        if let Some(aspect) = viewport.aspect_ratio() {
            self.camera.set_aspect_ratio(aspect);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn chase() -> ChaseCamera {
        ChaseCamera::new(CameraConfig::default(), Viewport::new(1280, 720))
    }

    #[test]
    fn test_converges_monotonically() {
        let mut chase = chase();
        let (target, forward) = (Vec3::new(4.0, 0.5, -3.0), Vec3::x());
        let desired = chase.desired_position(target, forward);

        let mut gap = (chase.camera().position - desired).norm();
        for _ in 0..120 {
            chase.follow(1.0 / 60.0, target, forward);
            let next = (chase.camera().position - desired).norm();
            assert!(next <= gap);
            gap = next;
        }
        assert!(gap < 1e-3);
    }

    #[test]
    fn test_one_second_keeps_decay_base_of_the_gap() {
        let mut chase = chase();
        let target = Vec3::zeros();
        let desired = chase.desired_position(target, Vec3::z());
        let start_gap = (chase.camera().position - desired).norm();

        chase.follow(1.0, target, Vec3::z());

        let gap = (chase.camera().position - desired).norm();
        assert_relative_eq!(gap, start_gap * 0.001, epsilon = 1e-4);
    }

    #[test]
    fn test_looks_at_target_head() {
        let mut chase = chase();
        chase.follow(1.0 / 60.0, Vec3::new(0.0, 0.5, 0.0), Vec3::z());
        assert_relative_eq!(chase.camera().target, Vec3::new(0.0, 1.5, 0.0));
    }

    #[test]
    fn test_resize_ignores_zero_height() {
        let mut chase = chase();
        chase.resize(Viewport::new(800, 0));
        assert_relative_eq!(chase.camera().aspect, 1280.0 / 720.0);

        chase.resize(Viewport::new(1000, 1000));
        assert_relative_eq!(chase.camera().aspect, 1.0);
    }
}
