//! Card animation state machine
//!
//! At most one animation runs at a time; starting another replaces it.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::{FLIP_DURATION, HOVER_AMPLITUDE, HOVER_SPEED};

/// Current animation
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub enum AnimationState {
    #[default]
    Idle,
    /// Continuous bob; never ends on its own
    Hovering { phase: f32 },
    /// One-shot flip; returns to Idle when progress reaches 1
    Flipping { progress: f32 },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Animator {
    pub state: AnimationState,
    /// Hover phase advance per second
    pub hover_speed: f32,
    /// Hover bob height (pixels)
    pub hover_amplitude: f32,
    /// Flip length (seconds)
    pub flip_duration: f32,
}

impl Default for Animator {
    fn default() -> Self {
        Self {
            state: AnimationState::Idle,
            hover_speed: HOVER_SPEED,
            hover_amplitude: HOVER_AMPLITUDE,
            flip_duration: FLIP_DURATION,
        }
    }
}

impl Animator {
    pub fn new(hover_speed: f32, hover_amplitude: f32, flip_duration: f32) -> Self {
        Self {
            state: AnimationState::Idle,
            hover_speed,
            hover_amplitude,
            flip_duration,
        }
    }

    pub fn start_hover(&mut self) {
        self.state = AnimationState::Hovering { phase: 0.0 };
    }

    pub fn start_flip(&mut self) {
        self.state = AnimationState::Flipping { progress: 0.0 };
    }

    /// Stop whatever is running
    pub fn cancel(&mut self) {
        self.state = AnimationState::Idle;
    }

    pub fn is_animating(&self) -> bool {
        self.state != AnimationState::Idle
    }

    /// Advance by `dt` seconds
    pub fn update(&mut self, dt: f32) {
        match &mut self.state {
            AnimationState::Idle => {}
            AnimationState::Hovering { phase } => {
                *phase += dt * self.hover_speed;
            }
            AnimationState::Flipping { progress } => {
                *progress += dt / self.flip_duration;
                if *progress >= 1.0 {
                    self.state = AnimationState::Idle;
                }
            }
        }
    }

    /// Visual offset to apply at draw time
    pub fn offset(&self) -> Vec2 {
        match self.state {
            AnimationState::Hovering { phase } => Vec2::new(0.0, phase.sin() * self.hover_amplitude),
            AnimationState::Idle | AnimationState::Flipping { .. } => Vec2::ZERO,
        }
    }

    /// Horizontal scale of the card face during a flip (1 when not flipping)
    pub fn flip_scale(&self) -> f32 {
        match self.state {
            AnimationState::Flipping { progress } => {
                (progress.clamp(0.0, 1.0) * std::f32::consts::PI).cos().abs()
            }
            _ => 1.0,
        }
    }
}
