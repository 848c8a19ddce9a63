//! Orbit-style view over the artwork plane
//!
//! Pan and dolly only; rotation stays disabled so the plane is always viewed
//! fronto-parallel and the camera distance along the view axis is exactly the
//! eye-to-target distance.

use glam::{Mat4, Vec2, Vec3};

use crate::scene::BASE_DISTANCE;

pub const MIN_DISTANCE: f32 = 0.5;
pub const MAX_DISTANCE: f32 = 20.0;
pub const ZOOM_SPEED: f32 = 0.5;

const FOV_Y_DEGREES: f32 = 75.0;
const Z_NEAR: f32 = 0.1;
const Z_FAR: f32 = 1000.0;

pub struct OrbitCamera {
    target: Vec3,
    distance: f32,
}

impl OrbitCamera {
    pub fn new() -> Self {
        Self {
            target: Vec3::ZERO,
            distance: BASE_DISTANCE,
        }
    }

    pub fn eye(&self) -> Vec3 {
        self.target + Vec3::Z * self.distance
    }

    /// Distance along the view axis; the input to the zoom level.
    pub fn distance(&self) -> f32 {
        self.distance
    }

    /// Zoom level as the ratio of the base distance to the current distance.
    pub fn zoom_level(&self) -> f32 {
        BASE_DISTANCE / self.distance
    }

    /// Dolly in (positive) or out (negative) from scroll input. Exponential
    /// so each notch changes the distance by a constant factor, clamped to
    /// the working range.
    pub fn dolly(&mut self, amount: f32) {
        let factor = (-amount * ZOOM_SPEED).exp();
        self.distance = (self.distance * factor).clamp(MIN_DISTANCE, MAX_DISTANCE);
    }

    /// Pan the target in the view plane. Scaled by the current distance so a
    /// screen-space drag feels the same at any zoom.
    pub fn pan(&mut self, delta: Vec2) {
        self.target += Vec3::new(-delta.x, delta.y, 0.0) * self.distance;
    }

    pub fn view(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye(), self.target, Vec3::Y)
    }

    pub fn projection(&self, aspect: f32) -> Mat4 {
        Mat4::perspective_rh(FOV_Y_DEGREES.to_radians(), aspect, Z_NEAR, Z_FAR)
    }

    pub fn view_proj(&self, aspect: f32) -> Mat4 {
        self.projection(aspect) * self.view()
    }

    /// Re-centre the orbit target on the point of the artwork plane (z = 0)
    /// under the pointer, given normalised device coordinates.
    pub fn retarget(&mut self, ndc: Vec2, aspect: f32) {
        if let Some(hit) = self.raycast_plane(ndc, aspect) {
            self.target = Vec3::new(hit.x, hit.y, 0.0);
        }
    }

    /// Intersect the pointer ray with the z = 0 plane.
    fn raycast_plane(&self, ndc: Vec2, aspect: f32) -> Option<Vec3> {
        let inverse = self.view_proj(aspect).inverse();
        let near = inverse.project_point3(Vec3::new(ndc.x, ndc.y, 0.0));
        let far = inverse.project_point3(Vec3::new(ndc.x, ndc.y, 1.0));
        let dir = far - near;
        if dir.z.abs() < f32::EPSILON {
            return None;
        }
        let t = -near.z / dir.z;
        if t < 0.0 {
            return None;
        }
        Some(near + dir * t)
    }
}

impl Default for OrbitCamera {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zoom_level_at_base_distance() {
        let camera = OrbitCamera::new();
        assert!((camera.zoom_level() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_dolly_clamped() {
        let mut camera = OrbitCamera::new();
        for _ in 0..100 {
            camera.dolly(1.0);
        }
        assert!((camera.distance() - MIN_DISTANCE).abs() < 1e-6);

        for _ in 0..100 {
            camera.dolly(-1.0);
        }
        assert!((camera.distance() - MAX_DISTANCE).abs() < 1e-6);
    }

    #[test]
    fn test_zoom_level_doubles_at_half_distance() {
        let mut camera = OrbitCamera::new();
        while camera.distance() > BASE_DISTANCE / 2.0 + 1e-3 {
            camera.dolly(0.01);
        }
        assert!((camera.zoom_level() - 2.0).abs() < 0.01);
    }

    #[test]
    fn test_retarget_centre_hits_origin() {
        let mut camera = OrbitCamera::new();
        camera.retarget(Vec2::ZERO, 16.0 / 9.0);
        assert!(camera.target.length() < 1e-4);
    }

    #[test]
    fn test_retarget_off_centre() {
        let mut camera = OrbitCamera::new();
        camera.retarget(Vec2::new(0.5, 0.0), 1.0);
        // The hit point is right of centre on the plane, at z = 0
        assert!(camera.target.x > 0.0);
        assert_eq!(camera.target.z, 0.0);
        // Eye stays on the +z side at the same distance
        assert!((camera.eye().z - camera.distance()).abs() < 1e-6);
    }

    #[test]
    fn test_pan_keeps_plane_distance() {
        let mut camera = OrbitCamera::new();
        camera.pan(Vec2::new(0.2, -0.1));
        assert_eq!(camera.target.z, 0.0);
        assert!((camera.distance() - BASE_DISTANCE).abs() < 1e-6);
    }
}
