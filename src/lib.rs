//! Relativity Gallery - artwork under special relativity
//!
//! Renders a 2D artwork plane in a 3D scene and distorts it to simulate
//! special-relativistic effects: length contraction along the direction of
//! motion and a Doppler-driven hue/brightness shift, both controlled by a
//! user-set 2D velocity vector.

pub mod app;
pub mod camera;
pub mod color;
pub mod gallery;
pub mod physics;
pub mod scene;
pub mod store;
pub mod textures;
pub mod ui;

pub use app::App;
