//! Orbit camera for edge-view captures.

use glam::{Mat4, Vec3};

/// Camera height above the tile plane, as a fraction of orbit distance.
pub const ELEVATION_FACTOR: f32 = 0.6;

/// Camera pose: position and look target. This is the state the capture
/// guard snapshots and restores.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraPose {
    pub position: Vec3,
    pub target: Vec3,
}

/// Perspective camera orbiting the tile origin.
#[derive(Debug, Clone)]
pub struct OrbitCamera {
    pub pose: CameraPose,
}

impl OrbitCamera {
    /// Create a camera at the default resting pose (south of the tile).
    pub fn new() -> Self {
        Self {
            pose: edge_view_pose(std::f32::consts::FRAC_PI_2, 2.6),
        }
    }

    pub fn pose(&self) -> CameraPose {
        self.pose
    }

    pub fn set_pose(&mut self, pose: CameraPose) {
        self.pose = pose;
    }

    /// Move to the edge-view position for the given orbit angle.
    pub fn orbit_to(&mut self, angle_radians: f32, distance: f32) {
        self.pose = edge_view_pose(angle_radians, distance);
    }

    /// View-projection matrix (right-handed, +Y up).
    pub fn view_projection(&self, fov_degrees: f32, aspect: f32) -> Mat4 {
        let view = Mat4::look_at_rh(self.pose.position, self.pose.target, Vec3::Y);
        let proj = Mat4::perspective_rh(fov_degrees.to_radians(), aspect, 0.1, 100.0);
        proj * view
    }
}

impl Default for OrbitCamera {
    fn default() -> Self {
        Self::new()
    }
}

/// Camera placement for one edge view: on the orbit circle at
/// `(d·cos θ, d·0.6, d·sin θ)`, looking at the tile origin.
pub fn edge_view_pose(angle_radians: f32, distance: f32) -> CameraPose {
    CameraPose {
        position: Vec3::new(
            distance * angle_radians.cos(),
            distance * ELEVATION_FACTOR,
            distance * angle_radians.sin(),
        ),
        target: Vec3::ZERO,
    }
}
