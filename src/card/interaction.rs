//! Pointer hover / select / drag resolution
//!
//! The controller only decides what should happen; the card applies the
//! outcome to its animator and motion.

use glam::{IVec2, UVec2, Vec2};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PointerButton {
    Primary,
    Middle,
    Secondary,
    Other(u8),
}

/// Discrete input events delivered by the host loop
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InputEvent {
    Press { button: PointerButton },
    Release { button: PointerButton },
    Move,
    Key { code: u32 },
    Quit,
}

/// Axis-aligned screen rectangle, half-open on the max edges
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bounds {
    pub min: IVec2,
    pub size: UVec2,
}

impl Bounds {
    /// Rectangle of `size` centred on the (truncated) pixel `center`
    pub fn centered(center: Vec2, size: UVec2) -> Self {
        let center = center.as_ivec2();
        Self {
            min: center - (size / 2).as_ivec2(),
            size,
        }
    }

    pub fn max(&self) -> IVec2 {
        self.min + self.size.as_ivec2()
    }

    pub fn contains(&self, point: Vec2) -> bool {
        let max = self.max();
        point.x >= self.min.x as f32
            && point.y >= self.min.y as f32
            && point.x < max.x as f32
            && point.y < max.y as f32
    }
}

/// Pointer crossed the card edge
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HoverEdge {
    Entered,
    Left,
}

/// What one event asks the card to do
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct InteractionOutcome {
    pub hover: Option<HoverEdge>,
    /// New movement target
    pub retarget: Option<Vec2>,
    /// Collapse position onto the target with no easing
    pub snap: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Interaction {
    pub hovered: bool,
    pub selected: bool,
}

impl Interaction {
    /// Resolve one event given the pointer position and the card bounds
    pub fn resolve(&mut self, event: &InputEvent, pointer: Vec2, bounds: Bounds) -> InteractionOutcome {
        let mut outcome = InteractionOutcome::default();
        let over = bounds.contains(pointer);

        if over != self.hovered {
            self.hovered = over;
            outcome.hover = Some(if over {
                HoverEdge::Entered
            } else {
                HoverEdge::Left
            });
        }

        match event {
            InputEvent::Press { button } => {
                if *button == PointerButton::Primary {
                    let was_selected = self.selected;
                    self.selected = over;
                    // Only grab on the first press so holding doesn't re-snap
                    if self.selected && !was_selected {
                        outcome.retarget = Some(pointer);
                    }
                }
            }
            InputEvent::Move if self.selected => {
                outcome.retarget = Some(pointer);
            }
            _ => {
                // Losing focus drops the card where it was headed
                self.selected = false;
                outcome.snap = true;
            }
        }

        outcome
    }
}
