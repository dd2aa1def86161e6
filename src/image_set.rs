//! The ordered collection of images a lightbox session browses.
//!
//! An [`ImageSet`] is built once per open and never mutated afterwards. When a
//! gallery wants to show more than its own images (e.g. a portfolio card that
//! pulls in supplementary shots), it builds a new set with
//! [`ImageSet::with_supplementary`] and opens that.
//!
//! ## Accessible labels
//!
//! Every image should carry a non-empty accessible label; it becomes the
//! `alt` text of the rendered image. Empty labels are accepted so a gallery
//! with imperfect CMS data still opens, but each one is logged as a warning
//! when the set is constructed.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ImageSetError {
    #[error("Image index {index} out of range for {size} images")]
    IndexOutOfRange { index: usize, size: usize },
}

/// One image as shown in the lightbox.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageDescriptor {
    /// Opaque reference to the image bytes (usually a URL).
    pub source: String,
    /// Human-readable description used as alt text.
    pub accessible_label: String,
    /// Short title shown as an overlay.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,
    /// Longer overlay text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl ImageDescriptor {
    pub fn new(source: impl Into<String>, accessible_label: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            accessible_label: accessible_label.into(),
            caption: None,
            description: None,
        }
    }

    pub fn with_caption(mut self, caption: impl Into<String>) -> Self {
        self.caption = Some(caption.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Whether the accessible label is missing or whitespace only.
    pub fn has_empty_label(&self) -> bool {
        self.accessible_label.trim().is_empty()
    }
}

/// Ordered, immutable sequence of images for one session. May be empty;
/// the session refuses to open an empty set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<ImageDescriptor>", into = "Vec<ImageDescriptor>")]
pub struct ImageSet {
    images: Vec<ImageDescriptor>,
}

impl ImageSet {
    pub fn new(images: Vec<ImageDescriptor>) -> Self {
        for (index, image) in images.iter().enumerate() {
            if image.has_empty_label() {
                warn!(index, source = %image.source, "image has an empty accessible label");
            }
        }
        Self { images }
    }

    /// Number of images. Zero is valid.
    pub fn size(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    /// Look up an image by position.
    pub fn at(&self, index: usize) -> Result<&ImageDescriptor, ImageSetError> {
        self.images
            .get(index)
            .ok_or(ImageSetError::IndexOutOfRange {
                index,
                size: self.size(),
            })
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ImageDescriptor> {
        self.images.iter()
    }

    /// Build a new set with `extra` appended after this set's images.
    pub fn with_supplementary(&self, extra: impl IntoIterator<Item = ImageDescriptor>) -> Self {
        let images = self.images.iter().cloned().chain(extra).collect();
        Self::new(images)
    }
}

impl From<Vec<ImageDescriptor>> for ImageSet {
    fn from(images: Vec<ImageDescriptor>) -> Self {
        Self::new(images)
    }
}

impl From<ImageSet> for Vec<ImageDescriptor> {
    fn from(set: ImageSet) -> Self {
        set.images
    }
}

impl FromIterator<ImageDescriptor> for ImageSet {
    fn from_iter<T: IntoIterator<Item = ImageDescriptor>>(iter: T) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a ImageSet {
    type Item = &'a ImageDescriptor;
    type IntoIter = std::slice::Iter<'a, ImageDescriptor>;

    fn into_iter(self) -> Self::IntoIter {
        self.images.iter()
    }
}
