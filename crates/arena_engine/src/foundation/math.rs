//! Math utilities and types
//!
//! Thin aliases over `nalgebra` plus the handful of heading helpers the
//! simulation needs (horizontal projection, facing rotations, guarded slerp).

pub use nalgebra::{Matrix4, Point3, UnitQuaternion, Vector2, Vector3};

/// 2D vector type
pub type Vec2 = Vector2<f32>;

/// 3D vector type
pub type Vec3 = Vector3<f32>;

/// 4x4 matrix type
pub type Mat4 = Matrix4<f32>;

/// Unit quaternion used for all orientations
pub type Quat = UnitQuaternion<f32>;

/// Vectors shorter than this are treated as zero-length.
pub const DIRECTION_EPSILON: f32 = 1.0e-3;

/// World up axis (Y-up, right-handed)
pub fn world_up() -> Vec3 {
    Vec3::y()
}

/// Model-space forward axis every visual faces by default (+Z)
pub fn model_forward() -> Vec3 {
    Vec3::z()
}

/// Math constants
pub mod constants {
    /// Pi constant
    pub const PI: f32 = std::f32::consts::PI;

    /// 2 * Pi
    pub const TAU: f32 = std::f32::consts::TAU;

    /// Degrees to radians conversion factor
    pub const DEG_TO_RAD: f32 = PI / 180.0;
}

/// Math utility functions
pub mod utils {
    use super::{constants, model_forward, Quat, Vec3, DIRECTION_EPSILON};

    /// Convert degrees to radians
    pub fn deg_to_rad(degrees: f32) -> f32 {
        degrees * constants::DEG_TO_RAD
    }

    /// Drop the vertical component of a vector
    pub fn horizontal(v: &Vec3) -> Vec3 {
        Vec3::new(v.x, 0.0, v.z)
    }

    /// Horizontal unit direction of `v`, or `None` when it has no usable length
    pub fn horizontal_direction(v: &Vec3) -> Option<Vec3> {
        horizontal(v).try_normalize(DIRECTION_EPSILON)
    }

    /// Horizontal speed (length of the XZ components)
    pub fn horizontal_speed(v: &Vec3) -> f32 {
        v.x.hypot(v.z)
    }

    /// Rotation turning the model forward axis onto `direction`
    ///
    /// `direction` must be normalized. The anti-parallel case has no unique
    /// shortest arc, so it resolves to a half turn about world up.
    pub fn facing_rotation(direction: &Vec3) -> Quat {
        Quat::rotation_between(&model_forward(), direction)
            .unwrap_or_else(|| Quat::from_axis_angle(&Vec3::y_axis(), constants::PI))
    }

    /// Rotate `current` a fixed fraction of the way toward `target`
    ///
    /// Falls back to snapping when the two orientations are exactly opposite.
    pub fn slerp_towards(current: &Quat, target: &Quat, fraction: f32) -> Quat {
        current
            .try_slerp(target, fraction.clamp(0.0, 1.0), 1.0e-6)
            .unwrap_or(*target)
    }

    /// Horizontal forward direction of an orientation (never zero-length)
    pub fn flat_forward(orientation: &Quat) -> Vec3 {
        horizontal_direction(&(orientation * model_forward())).unwrap_or_else(model_forward)
    }
}
