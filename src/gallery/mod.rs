// Gallery system module
//
// This module provides the gallery unlock model:
// - GalleryImage with a full-resolution asset hidden while locked
// - Gallery, the fixed catalog with one-way unlocks
//
// Unlocks are driven by narrative milestones; the controller forwards them
// here as plain unlock(id) calls.

pub mod image;

pub use image::{GalleryImage, ImageId};

use crate::error::FlowError;

/// Fixed collection of unlockable images, ordered by id
#[derive(Debug, Clone)]
pub struct Gallery {
    images: Vec<GalleryImage>,
}

impl Gallery {
    /// Creates an empty gallery
    pub fn new() -> Self {
        Gallery { images: Vec::new() }
    }

    /// Creates a gallery with the built-in catalog
    pub fn create_default() -> Self {
        let mut gallery = Self::new();
        gallery.register_base_images();
        gallery
    }

    /// Adds an image to the catalog
    ///
    /// Returns error if an image with this ID already exists.
    pub fn register(&mut self, image: GalleryImage) -> Result<(), String> {
        match self.images.binary_search_by_key(&image.id, |i| i.id) {
            Ok(_) => Err(format!("Gallery image {} already registered", image.id)),
            Err(index) => {
                self.images.insert(index, image);
                Ok(())
            }
        }
    }

    /// All images, ordered by id
    pub fn list_images(&self) -> &[GalleryImage] {
        &self.images
    }

    pub fn unlocked_ids(&self) -> Vec<ImageId> {
        self.images
            .iter()
            .filter(|image| image.is_unlocked())
            .map(|image| image.id)
            .collect()
    }

    /// Marks an image as unlocked
    ///
    /// Unlocking an already unlocked image is not an error. Returns whether
    /// the image changed state.
    pub fn unlock(&mut self, id: ImageId) -> Result<bool, FlowError> {
        let image = self
            .images
            .iter_mut()
            .find(|image| image.id == id)
            .ok_or(FlowError::UnknownImage(id))?;
        Ok(image.unlock())
    }

    /// Re-applies unlocks materialized from storage, skipping unknown ids
    pub fn apply_unlocks(&mut self, ids: &[ImageId]) {
        for &id in ids {
            if self.unlock(id).is_err() {
                tracing::warn!("Ignoring stored unlock for unknown gallery image {}", id);
            }
        }
    }

    /// Returns the image for full-screen viewing
    pub fn view(&self, id: ImageId) -> Result<&GalleryImage, FlowError> {
        let image = self
            .images
            .iter()
            .find(|image| image.id == id)
            .ok_or(FlowError::UnknownImage(id))?;

        if !image.is_unlocked() {
            return Err(FlowError::Locked(id));
        }
        Ok(image)
    }

    // ======================================================================
    // Built-in catalog
    // ======================================================================

    fn register_base_images(&mut self) {
        let base = [
            (1, "The Threshold", "The house as you first saw it, lights already out.", true),
            (2, "Red Hallway", "Wallpaper that breathes when nobody looks.", false),
            (3, "The Nursery", "A music box that plays a song you never learned.", false),
            (4, "Mirror Room", "Your reflection arrives a second late.", false),
            (5, "The Cellar", "Something was counting the steps with you.", false),
            (6, "Dawn", "The last window, and the light behind it.", false),
        ];

        for (id, title, description, unlocked) in base {
            let thumbnail = format!("/gallery/thumb_{:02}.png", id);
            let full = format!("/gallery/full_{:02}.png", id);
            let image = if unlocked {
                GalleryImage::unlocked(id, title, description, &thumbnail, &full)
            } else {
                GalleryImage::new(id, title, description, &thumbnail, &full)
            };
            if let Err(e) = self.register(image) {
                tracing::error!("{}", e);
            }
        }
    }
}

impl Default for Gallery {
    fn default() -> Self {
        Self::create_default()
    }
}
