//! Redraw cache for rendered card faces
//!
//! Building a face (border, dyed artwork, stat icons) is the expensive part
//! of drawing a card. The result is kept until something that changes the
//! face invalidates it; position and rotation are applied afterwards as
//! transforms and never invalidate.

use super::image::Image;

#[derive(Debug, Clone, Default)]
pub struct RedrawCache {
    image: Option<Image>,
    dirty: bool,
    rebuilds: u64,
}

impl RedrawCache {
    /// Empty cache; the first draw always rebuilds
    pub fn new() -> Self {
        Self {
            image: None,
            dirty: true,
            rebuilds: 0,
        }
    }

    /// Mark the cached face stale
    pub fn invalidate(&mut self) {
        self.dirty = true;
    }

    /// True when the next draw has to rebuild
    pub fn is_stale(&self) -> bool {
        self.dirty || self.image.is_none()
    }

    /// Return the cached face, building it with `build` first if stale
    pub fn get_or_rebuild(&mut self, build: impl FnOnce() -> Image) -> &Image {
        if self.is_stale() {
            self.image = Some(build());
            self.dirty = false;
            self.rebuilds += 1;
            log::debug!("Card face rebuilt ({} total)", self.rebuilds);
        }
        self.image.get_or_insert_with(|| Image::new(1, 1))
    }

    pub fn image(&self) -> Option<&Image> {
        self.image.as_ref()
    }

    /// Number of rebuilds since creation
    pub fn rebuilds(&self) -> u64 {
        self.rebuilds
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::Rgba;

    #[test]
    fn test_rebuilds_once_until_invalidated() {
        let mut cache = RedrawCache::new();
        assert!(cache.is_stale());

        let mut builds = 0;
        for _ in 0..5 {
            cache.get_or_rebuild(|| {
                builds += 1;
                Image::filled(2, 2, Rgba::WHITE)
            });
        }
        assert_eq!(builds, 1);
        assert_eq!(cache.rebuilds(), 1);
        assert!(!cache.is_stale());

        cache.invalidate();
        cache.invalidate();
        let face = cache.get_or_rebuild(|| Image::filled(3, 3, Rgba::RED));
        assert_eq!(face.width(), 3);
        assert_eq!(cache.rebuilds(), 2);
    }
}
