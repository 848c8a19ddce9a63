//! The artwork plane and its relativistic transform
//!
//! The plane's model matrix is rebuilt from scratch every frame from the
//! current velocity, never mutated incrementally, so repeated multiplication
//! cannot accumulate floating-point drift.

use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Vec2, Vec3};

use crate::gallery::Artwork;
use crate::physics::KinematicFactors;

/// Camera distance at which the zoom level reads 1.0.
pub const BASE_DISTANCE: f32 = 5.0;

/// Zoom level above which the high-resolution tier is sampled.
pub const HIGH_RES_ZOOM_THRESHOLD: f32 = 2.0;

/// Uniform block for the plane shader, one field per shader input.
/// Layout must match `shaders/art_plane.wgsl`.
#[repr(C)]
#[derive(Clone, Copy, Pod, Zeroable)]
pub struct PlaneUniforms {
    pub model: [[f32; 4]; 4],
    pub view_proj: [[f32; 4]; 4],
    pub velocity: [f32; 2],
    pub direction: [f32; 2],
    pub gamma: f32,
    pub doppler: f32,
    pub zoom_level: f32,
    pub use_high_res: u32,
}

impl Default for PlaneUniforms {
    fn default() -> Self {
        Self {
            model: Mat4::IDENTITY.to_cols_array_2d(),
            view_proj: Mat4::IDENTITY.to_cols_array_2d(),
            velocity: [0.0; 2],
            direction: [0.0; 2],
            gamma: 1.0,
            doppler: 1.0,
            zoom_level: 1.0,
            use_high_res: 0,
        }
    }
}

/// Vertex of the textured quad.
#[repr(C)]
#[derive(Clone, Copy, Pod, Zeroable)]
pub struct PlaneVertex {
    pub position: [f32; 3],
    pub uv: [f32; 2],
}

/// Unit quad centred on the origin; the plane's world size lives in the
/// model matrix so geometry never needs re-uploading.
pub const PLANE_VERTICES: [PlaneVertex; 4] = [
    PlaneVertex {
        position: [-0.5, -0.5, 0.0],
        uv: [0.0, 1.0],
    },
    PlaneVertex {
        position: [0.5, -0.5, 0.0],
        uv: [1.0, 1.0],
    },
    PlaneVertex {
        position: [0.5, 0.5, 0.0],
        uv: [1.0, 0.0],
    },
    PlaneVertex {
        position: [-0.5, 0.5, 0.0],
        uv: [0.0, 0.0],
    },
];

pub const PLANE_INDICES: [u16; 6] = [0, 1, 2, 0, 2, 3];

/// Anisotropic contraction along `direction` by `inv_gamma`, leaving the
/// perpendicular axis unscaled, for an arbitrary direction angle.
///
/// Built as the similarity transform `R(theta) * S * R(-theta)`: rotate the
/// motion axis onto local x, contract x, rotate back. A zero direction (speed
/// inside the dead zone) yields the identity.
pub fn contraction_matrix(direction: Vec2, inv_gamma: f32) -> Mat4 {
    if direction.length_squared() < 1.0e-12 {
        return Mat4::IDENTITY;
    }
    let theta = direction.y.atan2(direction.x);
    let rotate_back = Mat4::from_rotation_z(theta);
    let scale = Mat4::from_scale(Vec3::new(inv_gamma, 1.0, 1.0));
    let rotate_to_x = Mat4::from_rotation_z(-theta);
    rotate_back * scale * rotate_to_x
}

/// The renderable artwork plane: base dimensions plus the per-frame uniform
/// state fed to the shader.
pub struct ArtPlane {
    artwork: Artwork,
    width: f32,
    height: f32,
    pub uniforms: PlaneUniforms,
}

impl ArtPlane {
    pub fn new(artwork: Artwork) -> Self {
        let (width, height) = artwork.plane_size();
        Self {
            artwork,
            width,
            height,
            uniforms: PlaneUniforms::default(),
        }
    }

    pub fn artwork(&self) -> &Artwork {
        &self.artwork
    }

    /// Rebuild the full uniform set for this frame. The model matrix starts
    /// from the base plane scale and applies the contraction on top; nothing
    /// carries over from the previous frame.
    #[allow(clippy::too_many_arguments)]
    pub fn update(
        &mut self,
        velocity: Vec2,
        direction: Vec2,
        factors: KinematicFactors,
        zoom_level: f32,
        use_high_res: bool,
        view_proj: Mat4,
    ) {
        let model = contraction_matrix(direction, factors.inv_gamma)
            * Mat4::from_scale(Vec3::new(self.width, self.height, 1.0));

        self.uniforms = PlaneUniforms {
            model: model.to_cols_array_2d(),
            view_proj: view_proj.to_cols_array_2d(),
            velocity: velocity.to_array(),
            direction: direction.to_array(),
            gamma: factors.gamma,
            doppler: factors.doppler,
            zoom_level,
            use_high_res: use_high_res as u32,
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::physics;

    fn transform(m: Mat4, v: Vec2) -> Vec2 {
        let out = m * v.extend(0.0).extend(0.0);
        Vec2::new(out.x, out.y)
    }

    #[test]
    fn test_identity_below_dead_zone() {
        let dir = physics::motion_direction(0.0004, 0.0004);
        assert_eq!(contraction_matrix(dir, 0.5), Mat4::IDENTITY);
    }

    #[test]
    fn test_axis_aligned_contraction() {
        let m = contraction_matrix(Vec2::X, 0.5);
        let along = transform(m, Vec2::X);
        let perp = transform(m, Vec2::Y);
        assert!((along - Vec2::new(0.5, 0.0)).length() < 1e-6);
        assert!((perp - Vec2::Y).length() < 1e-6);
    }

    #[test]
    fn test_diagonal_contraction() {
        let v = 0.866;
        let inv_gamma = physics::scale_x(v);
        let dir = physics::motion_direction(0.6124, 0.6124); // 45 degrees
        let m = contraction_matrix(dir, inv_gamma);

        // The component along the motion axis contracts by exactly 1/gamma
        let along = transform(m, dir);
        assert!((along - dir * inv_gamma).length() < 1e-5);

        // The perpendicular extent is untouched
        let perp_dir = Vec2::new(-dir.y, dir.x);
        let perp = transform(m, perp_dir);
        assert!((perp - perp_dir).length() < 1e-5);
    }

    #[test]
    fn test_contraction_arbitrary_angle() {
        let dir = physics::motion_direction(0.2, 0.7);
        let m = contraction_matrix(dir, 0.3);
        let along = transform(m, dir);
        let perp_dir = Vec2::new(-dir.y, dir.x);
        let perp = transform(m, perp_dir);
        assert!((along.length() - 0.3).abs() < 1e-5);
        assert!((perp.length() - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_uniform_layout_size() {
        // Two mat4s, two vec2s, three f32s and a u32: 160 bytes, 16-aligned
        assert_eq!(std::mem::size_of::<PlaneUniforms>(), 160);
    }

    #[test]
    fn test_plane_update_resets_transform() {
        let art = Artwork {
            id: "a".to_string(),
            title: "a".to_string(),
            artist: "a".to_string(),
            year: 2000,
            src: "a.jpg".to_string(),
            width_px: 200,
            height_px: 100,
        };
        let mut plane = ArtPlane::new(art);
        let fast = KinematicFactors::for_speed(0.99);

        // Apply a heavy contraction, then drop back to rest; the model must
        // return exactly to the base scale, not compound
        plane.update(
            Vec2::new(0.99, 0.0),
            Vec2::X,
            fast,
            1.0,
            false,
            Mat4::IDENTITY,
        );
        plane.update(
            Vec2::ZERO,
            Vec2::ZERO,
            KinematicFactors::default(),
            1.0,
            false,
            Mat4::IDENTITY,
        );

        let model = Mat4::from_cols_array_2d(&plane.uniforms.model);
        let corner = transform(model, Vec2::new(0.5, 0.5));
        assert!((corner - Vec2::new(1.0, 0.5)).length() < 1e-6);
    }
}
