//! Multi-angle tile capture.
//!
//! One image per direction, in canonical table order. The order is
//! load-bearing: the prompt numbers images positionally, so any reordering
//! here silently corrupts the edge mapping downstream.

use crate::core::error::Result;
use crate::hex::HexDirection;
use crate::renderer::camera::{CameraPose, OrbitCamera};
use crate::renderer::scene::TileScene;
use crate::renderer::target::RenderTarget;
use crate::renderer::{RenderOptions, TileRenderer};
use image::RgbaImage;

/// Scoped hold on the shared camera: snapshots the pose on acquisition and
/// restores it when dropped, including on early error return.
pub struct PoseGuard<'a> {
    camera: &'a mut OrbitCamera,
    saved: CameraPose,
}

impl<'a> PoseGuard<'a> {
    pub fn new(camera: &'a mut OrbitCamera) -> Self {
        let saved = camera.pose();
        Self { camera, saved }
    }

    pub fn camera(&mut self) -> &mut OrbitCamera {
        self.camera
    }
}

impl Drop for PoseGuard<'_> {
    fn drop(&mut self) {
        self.camera.set_pose(self.saved);
    }
}

impl TileRenderer {
    /// Capture one image per hex edge, in canonical direction order.
    ///
    /// The camera pose after this call equals the pose before it.
    pub fn capture_edge_views(
        &self,
        scene: &TileScene,
        camera: &mut OrbitCamera,
        target: &RenderTarget,
        opts: &RenderOptions,
    ) -> Result<Vec<RgbaImage>> {
        let mut guard = PoseGuard::new(camera);
        let mut views = Vec::with_capacity(HexDirection::ALL.len());

        for direction in HexDirection::ALL {
            guard
                .camera()
                .orbit_to(direction.angle_radians(), opts.distance);
            let image = self.render_frame(scene, guard.camera(), target, opts)?;
            tracing::debug!(direction = direction.label(), "captured edge view");
            views.push(image);
        }

        Ok(views)
    }

    /// Capture a single view from an arbitrary orbit angle (radians), with
    /// the same pose-restore contract as [`capture_edge_views`].
    pub fn capture_from_angle(
        &self,
        scene: &TileScene,
        camera: &mut OrbitCamera,
        target: &RenderTarget,
        angle_radians: f32,
        opts: &RenderOptions,
    ) -> Result<RgbaImage> {
        let mut guard = PoseGuard::new(camera);
        guard.camera().orbit_to(angle_radians, opts.distance);
        self.render_frame(scene, guard.camera(), target, opts)
    }
}
