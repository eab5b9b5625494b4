//! Icon rendering seam
//!
//! Glyph rasterisation lives outside this crate (an icon font backend);
//! cards only need something that can stamp an icon, optionally with a
//! number under it.

use glam::{IVec2, UVec2};

use super::image::{Image, Rgba};

/// Font Awesome code points used on the card face
pub mod codes {
    pub const HEART: char = '\u{f004}';
    pub const HAND_FIST: char = '\u{f6e3}';
    pub const SHIELD: char = '\u{f132}';
    pub const ARROW_UP: char = '\u{f062}';
}

pub trait IconRenderer {
    /// Draw a single icon glyph with its top-left at `position`
    fn draw_icon(&mut self, icon: char, color: Rgba, position: IVec2, surface: &mut Image);

    /// Draw an icon with `value` printed underneath it
    fn draw_icon_with_value(
        &mut self,
        icon: char,
        color: Rgba,
        position: IVec2,
        value: u64,
        surface: &mut Image,
    );
}

/// Font-less fallback: a colored square per icon and a bar per value digit.
///
/// Good enough for headless runs and debugging layouts.
#[derive(Debug, Clone)]
pub struct SwatchIcons {
    /// Icon square edge length (pixels)
    pub icon_size: u32,
}

impl Default for SwatchIcons {
    fn default() -> Self {
        Self { icon_size: 12 }
    }
}

impl IconRenderer for SwatchIcons {
    fn draw_icon(&mut self, _icon: char, color: Rgba, position: IVec2, surface: &mut Image) {
        surface.fill_rect(position, UVec2::splat(self.icon_size), color);
    }

    fn draw_icon_with_value(
        &mut self,
        icon: char,
        color: Rgba,
        position: IVec2,
        value: u64,
        surface: &mut Image,
    ) {
        self.draw_icon(icon, color, position, surface);
        let digits = value.checked_ilog10().unwrap_or(0) + 1;
        let below = position + IVec2::new(0, self.icon_size as i32 + 1);
        surface.fill_rect(below, UVec2::new(digits * 3, 2), color);
    }
}
