//! Card face images
//!
//! Decoding is left to an `ImageLoader`. Whatever goes wrong there, a card
//! still gets a face: the placeholder for its size, generated once and
//! shared by every card of that size.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use glam::{IVec2, UVec2};

use crate::error::AssetError;
use crate::renderer::{Image, Rgba};

/// Source of decoded face images
pub trait ImageLoader {
    fn load_image(&self, path: &Path) -> Result<Image, AssetError>;
}

/// Loader backed by an in-memory path -> image map
#[derive(Debug, Clone, Default)]
pub struct MemoryLoader {
    images: HashMap<PathBuf, Image>,
}

impl MemoryLoader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, path: impl Into<PathBuf>, image: Image) {
        self.images.insert(path.into(), image);
    }

    pub fn with(mut self, path: impl Into<PathBuf>, image: Image) -> Self {
        self.insert(path, image);
        self
    }
}

impl ImageLoader for MemoryLoader {
    fn load_image(&self, path: &Path) -> Result<Image, AssetError> {
        self.images
            .get(path)
            .cloned()
            .ok_or_else(|| AssetError::NotFound {
                path: path.to_path_buf(),
            })
    }
}

/// Identity of a face image, used to key derived images
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FaceKey {
    /// Placeholder for a card of this (width, height)
    Placeholder(u32, u32),
    /// Loaded from disk and scaled for a card of this (width, height)
    File(PathBuf, u32, u32),
}

/// Size of the face art inside a card border
pub fn face_size(card_size: UVec2, border_thickness: u32) -> UVec2 {
    card_size
        .saturating_sub(UVec2::splat(border_thickness.saturating_mul(2)))
        .max(UVec2::ONE)
}

/// Top-left inset of the placeholder frame
const PLACEHOLDER_INSET: i32 = 5;
/// Placeholder frame is the card size less this, so it sits 3px from the
/// right and bottom of a face inside an 8px border
const PLACEHOLDER_SHRINK: u32 = 24;

/// White card with a thin brown frame
fn placeholder_image(card_size: UVec2, border_thickness: u32) -> Image {
    let size = face_size(card_size, border_thickness);
    let mut image = Image::filled(size.x, size.y, Rgba::WHITE);
    let frame = card_size.saturating_sub(UVec2::splat(PLACEHOLDER_SHRINK));
    image.stroke_rect(IVec2::splat(PLACEHOLDER_INSET), frame, 2, Rgba::BROWN);
    image
}

/// Shared face images: placeholders by card size, loaded faces by path and
/// size, and dyed variants by (face, color).
#[derive(Debug, Default)]
pub struct ImageCache {
    placeholders: HashMap<(u32, u32), Rc<Image>>,
    faces: HashMap<FaceKey, Rc<Image>>,
    tinted: HashMap<(FaceKey, Rgba), Rc<Image>>,
}

impl ImageCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Placeholder face for a card of `card_size`
    pub fn placeholder(&mut self, card_size: UVec2, border_thickness: u32) -> Rc<Image> {
        self.placeholders
            .entry((card_size.x, card_size.y))
            .or_insert_with(|| {
                log::debug!("Generating {}x{} placeholder", card_size.x, card_size.y);
                Rc::new(placeholder_image(card_size, border_thickness))
            })
            .clone()
    }

    /// Face for a card, loaded from `path` if given and loadable, otherwise
    /// the placeholder. Never fails.
    pub fn face(
        &mut self,
        loader: &dyn ImageLoader,
        path: Option<&Path>,
        card_size: UVec2,
        border_thickness: u32,
    ) -> (FaceKey, Rc<Image>) {
        let placeholder_key = FaceKey::Placeholder(card_size.x, card_size.y);
        let Some(path) = path else {
            return (placeholder_key, self.placeholder(card_size, border_thickness));
        };

        let key = FaceKey::File(path.to_path_buf(), card_size.x, card_size.y);
        if let Some(face) = self.faces.get(&key) {
            return (key, face.clone());
        }

        match loader.load_image(path) {
            Ok(image) => {
                let size = face_size(card_size, border_thickness);
                let face = Rc::new(image.resized(size.x, size.y));
                self.faces.insert(key.clone(), face.clone());
                (key, face)
            }
            Err(e) => {
                log::warn!("{e}; using placeholder");
                (placeholder_key, self.placeholder(card_size, border_thickness))
            }
        }
    }

    /// `face` dyed with `dye`, computed once per (face, dye)
    pub fn tinted(&mut self, key: &FaceKey, face: &Image, dye: Rgba) -> Rc<Image> {
        self.tinted
            .entry((key.clone(), dye))
            .or_insert_with(|| Rc::new(face.tinted(dye)))
            .clone()
    }

    pub fn placeholder_count(&self) -> usize {
        self.placeholders.len()
    }

    pub fn tinted_count(&self) -> usize {
        self.tinted.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CARD: UVec2 = UVec2::new(100, 125);

    #[test]
    fn test_placeholder_generated_once_per_size() {
        let mut cache = ImageCache::new();
        let a = cache.placeholder(CARD, 8);
        let b = cache.placeholder(CARD, 8);
        assert!(Rc::ptr_eq(&a, &b));
        assert_eq!(a.size(), UVec2::new(84, 109));
        assert_eq!(a.pixel(0, 0), Some(Rgba::WHITE));
        assert_eq!(a.pixel(5, 5), Some(Rgba::BROWN));

        let c = cache.placeholder(UVec2::new(60, 80), 8);
        assert!(!Rc::ptr_eq(&a, &c));
        assert_eq!(cache.placeholder_count(), 2);
    }

    #[test]
    fn test_placeholder_frame_geometry() {
        let face = placeholder_image(CARD, 8);
        // Frame spans x 5..81 and y 5..106 on an 84x109 face
        assert_eq!(face.pixel(4, 50), Some(Rgba::WHITE));
        assert_eq!(face.pixel(5, 50), Some(Rgba::BROWN));
        assert_eq!(face.pixel(7, 50), Some(Rgba::WHITE));
        assert_eq!(face.pixel(80, 50), Some(Rgba::BROWN));
        assert_eq!(face.pixel(81, 50), Some(Rgba::WHITE));
        assert_eq!(face.pixel(50, 105), Some(Rgba::BROWN));
        assert_eq!(face.pixel(50, 106), Some(Rgba::WHITE));
    }

    #[test]
    fn test_missing_file_falls_back_to_placeholder() {
        let mut cache = ImageCache::new();
        let loader = MemoryLoader::new();
        let (key, face) = cache.face(&loader, Some(Path::new("Assets/cardFront.png")), CARD, 8);
        assert_eq!(key, FaceKey::Placeholder(100, 125));
        assert!(Rc::ptr_eq(&face, &cache.placeholder(CARD, 8)));

        let (key, _) = cache.face(&loader, None, CARD, 8);
        assert_eq!(key, FaceKey::Placeholder(100, 125));
        assert_eq!(cache.placeholder_count(), 1);
    }

    #[test]
    fn test_loaded_face_scaled_and_reused() {
        let mut cache = ImageCache::new();
        let loader = MemoryLoader::new().with("front.png", Image::filled(10, 10, Rgba::BLUE));
        let (key, face) = cache.face(&loader, Some(Path::new("front.png")), CARD, 8);
        assert_eq!(key, FaceKey::File(PathBuf::from("front.png"), 100, 125));
        assert_eq!(face.size(), UVec2::new(84, 109));
        assert_eq!(face.pixel(40, 40), Some(Rgba::BLUE));

        let (_, again) = cache.face(&loader, Some(Path::new("front.png")), CARD, 8);
        assert!(Rc::ptr_eq(&face, &again));
    }

    #[test]
    fn test_tint_cached_per_face_and_color() {
        let mut cache = ImageCache::new();
        let face = cache.placeholder(CARD, 8);
        let key = FaceKey::Placeholder(100, 125);
        let dye = Rgba::rgb(0, 76, 0).with_alpha(80);

        let a = cache.tinted(&key, &face, dye);
        let b = cache.tinted(&key, &face, dye);
        assert!(Rc::ptr_eq(&a, &b));
        assert_ne!(a.pixel(20, 20), face.pixel(20, 20));

        cache.tinted(&key, &face, Rgba::rgb(76, 0, 76).with_alpha(80));
        assert_eq!(cache.tinted_count(), 2);
    }

    #[test]
    fn test_face_size_never_empty() {
        assert_eq!(face_size(UVec2::new(10, 10), 8), UVec2::ONE);
        assert_eq!(face_size(CARD, 3_000_000_000), UVec2::ONE);
        assert_eq!(placeholder_image(CARD, u32::MAX).size(), UVec2::ONE);
    }
}
