//! The card entity
//!
//! Per frame the host calls `handle_event` for every pending event, then
//! `update`, then `draw`. None of these can fail.

use std::borrow::Cow;
use std::fmt;
use std::rc::Rc;

use glam::{IVec2, UVec2, Vec2};
use num_bigint::BigUint;
use serde::{Deserialize, Serialize};

use super::animator::Animator;
use super::growth::GrowthPattern;
use super::interaction::{Bounds, HoverEdge, InputEvent, Interaction};
use super::motion::Motion;
use super::progression::{self, LevelUpSummary};
use super::rarity::RarityTier;
use super::stats::CardStats;
use crate::renderer::icons::codes;
use crate::renderer::{IconRenderer, Image, RedrawCache, Rgba};
use crate::tuning::CardTuning;

/// Level icon color at rest
pub const LEVEL_COLOR: Rgba = Rgba::BLACK;
/// Level icon color right after a level-up
pub const LEVEL_UP_COLOR: Rgba = Rgba::ORANGE;
/// Strength of the rarity dye over the face art
pub const DYE_ALPHA: u8 = 80;

/// What kind of card this is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum CardKind {
    /// Normal playing card
    #[default]
    Standard,
    /// Adds to another card's attributes
    Bonus,
    Cursed,
}

impl CardKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            CardKind::Standard => "Standard",
            CardKind::Bonus => "Bonus",
            CardKind::Cursed => "Cursed",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "standard" => Some(CardKind::Standard),
            "bonus" => Some(CardKind::Bonus),
            "cursed" => Some(CardKind::Cursed),
            _ => None,
        }
    }
}

impl fmt::Display for CardKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single card on the table
#[derive(Debug, Clone)]
pub struct Card {
    id: u32,
    name: String,
    kind: CardKind,
    size: UVec2,
    rarity: RarityTier,
    stats: CardStats,
    growth: GrowthPattern,
    pub animator: Animator,
    pub motion: Motion,
    interaction: Interaction,
    border_color: Rgba,
    border_thickness: u32,
    level_color: Rgba,
    /// Update ticks left on the level-up highlight
    highlight_timer: u32,
    highlight_frames: u32,
    /// Face art, already dyed with the rarity color
    face: Rc<Image>,
    cache: RedrawCache,
}

impl Card {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: u32,
        name: impl Into<String>,
        kind: CardKind,
        position: Vec2,
        size: UVec2,
        rarity: RarityTier,
        stats: CardStats,
        growth: GrowthPattern,
        face: Rc<Image>,
        tuning: &CardTuning,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            kind,
            size,
            rarity,
            stats,
            growth,
            animator: tuning.animator(),
            motion: tuning.motion(position),
            interaction: Interaction::default(),
            border_color: rarity.color(),
            border_thickness: tuning.border_thickness,
            level_color: LEVEL_COLOR,
            highlight_timer: 0,
            highlight_frames: tuning.highlight_frames,
            face,
            cache: RedrawCache::new(),
        }
    }

    pub fn id(&self) -> u32 {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> CardKind {
        self.kind
    }

    pub fn rarity(&self) -> RarityTier {
        self.rarity
    }

    pub fn stats(&self) -> &CardStats {
        &self.stats
    }

    pub fn growth(&self) -> &GrowthPattern {
        &self.growth
    }

    pub fn size(&self) -> UVec2 {
        self.size
    }

    pub fn position(&self) -> Vec2 {
        self.motion.position
    }

    pub fn angle(&self) -> f32 {
        self.motion.angle
    }

    pub fn is_selected(&self) -> bool {
        self.interaction.selected
    }

    pub fn is_hovered(&self) -> bool {
        self.interaction.hovered
    }

    pub fn border_color(&self) -> Rgba {
        self.border_color
    }

    pub fn level_color(&self) -> Rgba {
        self.level_color
    }

    pub fn face(&self) -> &Rc<Image> {
        &self.face
    }

    /// Hit-test rectangle at the current position
    pub fn bounds(&self) -> Bounds {
        Bounds::centered(self.motion.position, self.size)
    }

    /// True when the next `draw` rebuilds the face
    pub fn needs_redraw(&self) -> bool {
        self.cache.is_stale()
    }

    /// Face rebuilds so far
    pub fn redraws(&self) -> u64 {
        self.cache.rebuilds()
    }

    pub fn set_position(&mut self, position: Vec2, smooth: bool) {
        self.motion.set_position(position, smooth);
    }

    pub fn set_rotation(&mut self, angle: f32, smooth: bool) {
        self.motion.set_rotation(angle, smooth);
    }

    pub fn flip(&mut self) {
        self.animator.start_flip();
    }

    /// Add experience, resolving any level-ups
    pub fn gain_xp(&mut self, amount: impl Into<BigUint>) -> LevelUpSummary {
        let summary = progression::gain_xp(&mut self.stats, &self.growth, amount);
        if summary.leveled_up() {
            log::debug!(
                "Card {} ({}) leveled {} -> {}",
                self.id,
                self.name,
                summary.from_level,
                summary.to_level
            );
            for ability in &summary.abilities_unlocked {
                log::info!("Card {} unlocked ability: {}", self.id, ability);
            }
            self.level_color = LEVEL_UP_COLOR;
            self.highlight_timer = self.highlight_frames;
            self.cache.invalidate();
        }
        summary
    }

    /// Apply one input event. `pointer` is the current pointer position.
    pub fn handle_event(&mut self, event: &InputEvent, pointer: Vec2) {
        let outcome = self.interaction.resolve(event, pointer, self.bounds());

        match outcome.hover {
            Some(HoverEdge::Entered) => self.animator.start_hover(),
            Some(HoverEdge::Left) => self.animator.cancel(),
            None => {}
        }
        if let Some(target) = outcome.retarget {
            self.motion.set_position(target, true);
        }
        if outcome.snap {
            self.motion.snap_to_target();
        }
    }

    /// Advance motion, animation and the level highlight by one frame
    pub fn update(&mut self, dt: f32) {
        self.motion.update(dt);
        self.animator.update(dt);

        if self.highlight_timer > 0 {
            self.highlight_timer -= 1;
            if self.highlight_timer == 0 {
                self.level_color = LEVEL_COLOR;
                self.cache.invalidate();
            }
        }
    }

    /// Draw onto `screen`, rebuilding the cached face only if stale.
    ///
    /// Returns the screen rectangle covered by the card this frame.
    pub fn draw(&mut self, screen: &mut Image, icons: &mut dyn IconRenderer) -> Bounds {
        let Self {
            cache,
            size,
            border_thickness,
            border_color,
            face,
            stats,
            level_color,
            animator,
            motion,
            ..
        } = self;

        let cached = cache.get_or_rebuild(|| {
            let style = FaceStyle {
                size: *size,
                border_thickness: *border_thickness,
                border_color: *border_color,
                level_color: *level_color,
            };
            compose_face(&style, face, stats, icons)
        });

        let mut image = Cow::Borrowed(cached);
        let squash = animator.flip_scale();
        if squash < 1.0 {
            image = Cow::Owned(image.squashed_x(squash));
        }
        if motion.angle.abs() > motion.rotation_epsilon {
            image = Cow::Owned(image.rotated(motion.angle));
        }

        let placement = Bounds::centered(motion.position + animator.offset(), image.size());
        screen.blit(&image, placement.min);
        placement
    }
}

/// Everything about a face's look that isn't stats or art
struct FaceStyle {
    size: UVec2,
    border_thickness: u32,
    border_color: Rgba,
    level_color: Rgba,
}

/// Border, face art and the four stat icons
fn compose_face(
    style: &FaceStyle,
    face: &Image,
    stats: &CardStats,
    icons: &mut dyn IconRenderer,
) -> Image {
    let size = style.size;
    let mut canvas = Image::new(size.x, size.y);
    canvas.stroke_rect(IVec2::ZERO, size, style.border_thickness, style.border_color);

    let face_origin = (size / 2).as_ivec2() - (face.size() / 2).as_ivec2();
    canvas.blit(face, face_origin);

    let w = size.x as i32;
    let h = size.y as i32;
    let stat_icons = [
        (codes::HEART, Rgba::RED, IVec2::new(15, 15), stats.health as u64),
        (codes::HAND_FIST, Rgba::BLUE, IVec2::new(15, h - 40), stats.attack as u64),
        (codes::SHIELD, Rgba::GREEN, IVec2::new(w - 30, h - 40), stats.defense as u64),
        (codes::ARROW_UP, style.level_color, IVec2::new(w - 30, 15), stats.level() as u64),
    ];
    for (icon, color, position, value) in stat_icons {
        icons.draw_icon_with_value(icon, color, position, value, &mut canvas);
    }
    canvas
}
