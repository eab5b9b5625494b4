//! Smoothed position and rotation
//!
//! Both ease exponentially toward a target every frame. Rotation uses the
//! raw `diff * speed * dt` step with no clamp, so `rotation_speed * dt > 1`
//! overshoots the target.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::{MOVE_SPEED, ROTATION_EPSILON, ROTATION_SPEED, SETTLE_DISTANCE};
use crate::{distance, ease_toward};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Motion {
    pub position: Vec2,
    pub target: Vec2,
    /// Degrees, counter-clockwise on screen
    pub angle: f32,
    pub target_angle: f32,
    pub move_speed: f32,
    pub rotation_speed: f32,
    pub settle_distance: f32,
    pub rotation_epsilon: f32,
    /// When false, `update` leaves the position alone
    pub smooth_movement: bool,
}

impl Motion {
    /// Motion at rest at `position`
    pub fn new(position: Vec2) -> Self {
        Self {
            position,
            target: position,
            angle: 0.0,
            target_angle: 0.0,
            move_speed: MOVE_SPEED,
            rotation_speed: ROTATION_SPEED,
            settle_distance: SETTLE_DISTANCE,
            rotation_epsilon: ROTATION_EPSILON,
            smooth_movement: true,
        }
    }

    /// Advance toward the targets. Returns true if anything moved.
    pub fn update(&mut self, dt: f32) -> bool {
        let mut moved = false;

        if self.smooth_movement && distance(self.position, self.target) > self.settle_distance {
            let factor = (self.move_speed * dt).min(1.0);
            self.position = self.position + (self.target - self.position) * factor;
            moved = true;
        }

        if (self.target_angle - self.angle).abs() > self.rotation_epsilon {
            self.angle = ease_toward(self.angle, self.target_angle, self.rotation_speed * dt);
            moved = true;
        }

        moved
    }

    /// Move to `position`, eased or immediately
    pub fn set_position(&mut self, position: Vec2, smooth: bool) {
        self.target = position;
        if !smooth {
            self.position = position;
        }
    }

    /// Rotate to `angle` degrees, eased or immediately
    pub fn set_rotation(&mut self, angle: f32, smooth: bool) {
        self.target_angle = angle;
        if !smooth {
            self.angle = angle;
        }
    }

    /// Jump to the position target with no easing
    pub fn snap_to_target(&mut self) {
        self.position = self.target;
    }

    pub fn is_settled(&self) -> bool {
        distance(self.position, self.target) <= self.settle_distance
            && (self.target_angle - self.angle).abs() <= self.rotation_epsilon
    }
}
