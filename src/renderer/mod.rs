//! Software rendering module
//!
//! Card faces are composed into RGBA images and placed on a target surface.

pub mod cache;
pub mod icons;
pub mod image;

pub use cache::RedrawCache;
pub use icons::{IconRenderer, SwatchIcons};
pub use image::{Image, Rgba};
