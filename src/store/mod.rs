//! Application state shared between the UI and the render loop
//!
//! A plain struct passed explicitly into the driver rather than a global:
//! the render loop reads current values every tick, the UI mutates them
//! through clamping setters. All writes are O(1) scalar assignments, so no
//! debouncing is needed.

use glam::Vec2;

use crate::gallery::Artwork;
use crate::physics;

pub struct RelativityStore {
    velocity_x: f32,
    velocity_y: f32,
    current_art: Option<Artwork>,
}

impl RelativityStore {
    pub fn new() -> Self {
        Self {
            velocity_x: 0.0,
            velocity_y: 0.0,
            current_art: None,
        }
    }

    pub fn velocity_x(&self) -> f32 {
        self.velocity_x
    }

    pub fn velocity_y(&self) -> f32 {
        self.velocity_y
    }

    /// Set the horizontal velocity component. Non-finite input is rejected
    /// (previous value retained); finite input is clamped to `[0, MAX_SPEED]`.
    pub fn set_velocity_x(&mut self, v: f32) {
        if v.is_finite() {
            self.velocity_x = v.clamp(0.0, physics::MAX_SPEED);
        }
    }

    /// Set the vertical velocity component, with the same clamping rules.
    pub fn set_velocity_y(&mut self, v: f32) {
        if v.is_finite() {
            self.velocity_y = v.clamp(0.0, physics::MAX_SPEED);
        }
    }

    /// Capped speed magnitude; this is what every kinematic formula consumes.
    pub fn speed(&self) -> f32 {
        physics::cap_speed(Vec2::new(self.velocity_x, self.velocity_y).length())
    }

    /// Unit motion direction, or zero inside the dead zone.
    pub fn direction(&self) -> Vec2 {
        physics::motion_direction(self.velocity_x, self.velocity_y)
    }

    pub fn current_art(&self) -> Option<&Artwork> {
        self.current_art.as_ref()
    }

    pub fn select_art(&mut self, art: Artwork) {
        self.current_art = Some(art);
    }
}

impl Default for RelativityStore {
    fn default() -> Self {
        Self::new()
    }
}
