//! Software pixel surfaces
//!
//! Cards render their face into an `Image` once and reuse it; per-frame
//! placement only needs the cheap transforms at the bottom of this file.

use bytemuck::{Pod, Zeroable};
use glam::{IVec2, Mat2, UVec2, Vec2};
use serde::{Deserialize, Serialize};

/// An 8-bit RGBA color
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Pod, Zeroable, Serialize, Deserialize)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const TRANSPARENT: Rgba = Rgba::new(0, 0, 0, 0);
    pub const BLACK: Rgba = Rgba::rgb(0, 0, 0);
    pub const WHITE: Rgba = Rgba::rgb(255, 255, 255);
    pub const RED: Rgba = Rgba::rgb(255, 0, 0);
    pub const GREEN: Rgba = Rgba::rgb(0, 255, 0);
    pub const BLUE: Rgba = Rgba::rgb(0, 0, 255);
    pub const ORANGE: Rgba = Rgba::rgb(255, 165, 0);
    pub const BROWN: Rgba = Rgba::rgb(165, 42, 42);

    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Opaque color
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 255)
    }

    /// Scale the color channels, keeping alpha
    pub fn darken(self, factor: f32) -> Self {
        let scale = |c: u8| (c as f32 * factor).clamp(0.0, 255.0) as u8;
        Self::new(scale(self.r), scale(self.g), scale(self.b), self.a)
    }

    /// Same color with a different alpha
    pub const fn with_alpha(self, a: u8) -> Self {
        Self::new(self.r, self.g, self.b, a)
    }
}

/// Source-over compositing of `src` onto `dst`
fn blend_over(dst: Rgba, src: Rgba) -> Rgba {
    match src.a {
        0 => dst,
        255 => src,
        a => {
            let a = a as u32;
            let inv = 255 - a;
            let mix = |s: u8, d: u8| ((s as u32 * a + d as u32 * inv) / 255) as u8;
            let out_a = a + dst.a as u32 * inv / 255;
            Rgba::new(
                mix(src.r, dst.r),
                mix(src.g, dst.g),
                mix(src.b, dst.b),
                out_a.min(255) as u8,
            )
        }
    }
}

/// A rectangular RGBA pixel buffer (row-major, origin top-left)
#[derive(Debug, Clone, PartialEq)]
pub struct Image {
    width: u32,
    height: u32,
    pixels: Vec<Rgba>,
}

impl Image {
    /// Fully transparent image
    pub fn new(width: u32, height: u32) -> Self {
        Self::filled(width, height, Rgba::TRANSPARENT)
    }

    pub fn filled(width: u32, height: u32, color: Rgba) -> Self {
        Self {
            width,
            height,
            pixels: vec![color; (width as usize) * (height as usize)],
        }
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    pub fn size(&self) -> UVec2 {
        UVec2::new(self.width, self.height)
    }

    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 || x as u32 >= self.width || y as u32 >= self.height {
            return None;
        }
        Some(y as usize * self.width as usize + x as usize)
    }

    /// Pixel at (x, y), `None` outside the image
    pub fn pixel(&self, x: i32, y: i32) -> Option<Rgba> {
        self.index(x, y).map(|i| self.pixels[i])
    }

    /// Overwrite a pixel; out-of-bounds writes are clipped
    pub fn set_pixel(&mut self, x: i32, y: i32, color: Rgba) {
        if let Some(i) = self.index(x, y) {
            self.pixels[i] = color;
        }
    }

    pub fn fill(&mut self, color: Rgba) {
        self.pixels.fill(color);
    }

    /// Fill a rectangle, clipped to the image
    pub fn fill_rect(&mut self, origin: IVec2, size: UVec2, color: Rgba) {
        let x0 = origin.x.max(0);
        let y0 = origin.y.max(0);
        let x1 = (origin.x + size.x as i32).min(self.width as i32);
        let y1 = (origin.y + size.y as i32).min(self.height as i32);
        for y in y0..y1 {
            for x in x0..x1 {
                self.set_pixel(x, y, color);
            }
        }
    }

    /// Outline a rectangle with bands `thickness` pixels wide, drawn inward
    pub fn stroke_rect(&mut self, origin: IVec2, size: UVec2, thickness: u32, color: Rgba) {
        let t = thickness.min(size.x / 2 + 1).min(size.y / 2 + 1);
        let w = size.x;
        let h = size.y;
        self.fill_rect(origin, UVec2::new(w, t), color);
        self.fill_rect(origin + IVec2::new(0, (h - t.min(h)) as i32), UVec2::new(w, t), color);
        self.fill_rect(origin, UVec2::new(t, h), color);
        self.fill_rect(origin + IVec2::new((w - t.min(w)) as i32, 0), UVec2::new(t, h), color);
    }

    /// Composite `src` onto this image with its top-left at `top_left`
    pub fn blit(&mut self, src: &Image, top_left: IVec2) {
        for sy in 0..src.height as i32 {
            let dy = top_left.y + sy;
            if dy < 0 || dy >= self.height as i32 {
                continue;
            }
            for sx in 0..src.width as i32 {
                let dx = top_left.x + sx;
                if let (Some(di), Some(s)) = (self.index(dx, dy), src.pixel(sx, sy)) {
                    self.pixels[di] = blend_over(self.pixels[di], s);
                }
            }
        }
    }

    /// Multiply every opaque pixel by `dye`, mixed in by `dye.a`
    pub fn tinted(&self, dye: Rgba) -> Image {
        let strength = dye.a as u32;
        let mul = |c: u8, d: u8| {
            let dyed = c as u32 * d as u32 / 255;
            ((c as u32 * (255 - strength) + dyed * strength) / 255) as u8
        };
        let pixels = self
            .pixels
            .iter()
            .map(|p| Rgba::new(mul(p.r, dye.r), mul(p.g, dye.g), mul(p.b, dye.b), p.a))
            .collect();
        Image {
            width: self.width,
            height: self.height,
            pixels,
        }
    }

    /// Rotate counter-clockwise (as seen on screen) by `degrees`.
    ///
    /// The result grows to the rotated bounding box; uncovered pixels are
    /// transparent. Nearest-neighbour sampling.
    pub fn rotated(&self, degrees: f32) -> Image {
        let theta = degrees.to_radians();
        let (sin, cos) = theta.sin_cos();
        let w = self.width as f32;
        let h = self.height as f32;
        let out_w = (w * cos.abs() + h * sin.abs()).round().max(1.0) as u32;
        let out_h = (w * sin.abs() + h * cos.abs()).round().max(1.0) as u32;

        let mut out = Image::new(out_w, out_h);
        let src_center = Vec2::new(w, h) / 2.0;
        let dst_center = Vec2::new(out_w as f32, out_h as f32) / 2.0;
        // Inverse mapping: destination pixel -> source pixel
        let inverse = Mat2::from_angle(theta);

        for y in 0..out_h {
            for x in 0..out_w {
                let d = Vec2::new(x as f32 + 0.5, y as f32 + 0.5) - dst_center;
                let s = inverse * d + src_center;
                if let Some(p) = self.pixel(s.x.floor() as i32, s.y.floor() as i32) {
                    out.pixels[(y * out_w + x) as usize] = p;
                }
            }
        }
        out
    }

    /// Nearest-neighbour resize
    pub fn resized(&self, width: u32, height: u32) -> Image {
        if width == self.width && height == self.height {
            return self.clone();
        }
        let mut out = Image::new(width, height);
        if self.width == 0 || self.height == 0 {
            return out;
        }
        for y in 0..height {
            let sy = (y as u64 * self.height as u64 / height as u64) as i32;
            for x in 0..width {
                let sx = (x as u64 * self.width as u64 / width as u64) as i32;
                if let Some(p) = self.pixel(sx, sy) {
                    out.pixels[(y * width + x) as usize] = p;
                }
            }
        }
        out
    }

    /// Horizontal squash around the vertical center line (flip effect)
    pub fn squashed_x(&self, scale: f32) -> Image {
        let out_w = ((self.width as f32) * scale.clamp(0.0, 1.0)).round().max(1.0) as u32;
        if out_w == self.width {
            return self.clone();
        }
        let mut out = Image::new(out_w, self.height);
        for y in 0..self.height {
            for x in 0..out_w {
                let sx = (x as u64 * self.width as u64 / out_w as u64) as i32;
                if let Some(p) = self.pixel(sx, y as i32) {
                    out.pixels[(y * out_w + x) as usize] = p;
                }
            }
        }
        out
    }

    /// Raw RGBA bytes, e.g. for uploading to a texture
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.pixels)
    }
}
