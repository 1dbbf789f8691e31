use serde::{Deserialize, Serialize};

/// Gallery image identifier
pub type ImageId = u32;

/// An unlockable image reward
///
/// The full-resolution asset is private: it is only reachable through
/// [`GalleryImage::full_image`], which hides it while the image is locked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GalleryImage {
    pub id: ImageId,
    pub title: String,
    pub description: String,
    pub thumbnail: String,
    full_image: String,
    unlocked: bool,
}

impl GalleryImage {
    /// Creates a locked image
    pub fn new(id: ImageId, title: &str, description: &str, thumbnail: &str, full_image: &str) -> Self {
        GalleryImage {
            id,
            title: title.to_string(),
            description: description.to_string(),
            thumbnail: thumbnail.to_string(),
            full_image: full_image.to_string(),
            unlocked: false,
        }
    }

    /// Same as `new`, but already unlocked
    pub fn unlocked(id: ImageId, title: &str, description: &str, thumbnail: &str, full_image: &str) -> Self {
        GalleryImage {
            unlocked: true,
            ..Self::new(id, title, description, thumbnail, full_image)
        }
    }

    pub fn is_unlocked(&self) -> bool {
        self.unlocked
    }

    /// Full-resolution asset, or `None` while locked
    pub fn full_image(&self) -> Option<&str> {
        if self.unlocked {
            Some(&self.full_image)
        } else {
            None
        }
    }

    /// Unlocks the image. Returns true if it was locked before.
    pub(crate) fn unlock(&mut self) -> bool {
        let was_locked = !self.unlocked;
        self.unlocked = true;
        was_locked
    }
}
