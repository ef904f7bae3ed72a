use std::collections::HashMap;

use crate::api::types::ImageId;
use crate::components::sprite::{ImageFrame, Sprite};
use crate::error::AssetError;

/// Registry of loaded images by name.
/// Hosts fill it as loads resolve; scene code turns names into sprites.
#[derive(Debug, Default)]
pub struct AssetRegistry {
    images: HashMap<String, ImageFrame>,
    next_image: u32,
}

impl AssetRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reserve the next image handle. Backends store the pixels under it.
    pub fn allocate_image(&mut self) -> ImageId {
        let id = ImageId(self.next_image);
        self.next_image += 1;
        id
    }

    /// Register a loaded image under a name, replacing any previous entry.
    pub fn insert_image(&mut self, name: impl Into<String>, frame: ImageFrame) {
        self.images.insert(name.into(), frame);
    }

    pub fn image(&self, name: &str) -> Result<ImageFrame, AssetError> {
        self.images
            .get(name)
            .copied()
            .ok_or_else(|| AssetError::Unknown(name.to_string()))
    }

    /// Single-frame sprite for a named image.
    pub fn sprite(&self, name: &str) -> Result<Sprite, AssetError> {
        self.image(name).map(Sprite::new)
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn allocates_distinct_handles() {
        let mut reg = AssetRegistry::new();
        assert_ne!(reg.allocate_image(), reg.allocate_image());
    }

    #[test]
    fn named_image_becomes_sprite() {
        let mut reg = AssetRegistry::new();
        let image = reg.allocate_image();
        reg.insert_image("cloud", ImageFrame { image, width: 28.0, height: 31.0 });

        let sprite = reg.sprite("cloud").unwrap();
        assert_eq!(sprite.current().width(), 28.0);
        assert_eq!(reg.len(), 1);
    }

    #[test]
    fn unknown_returns_error() {
        let reg = AssetRegistry::new();
        assert!(matches!(reg.image("nonexistent"), Err(AssetError::Unknown(name)) if name == "nonexistent"));
    }
}
