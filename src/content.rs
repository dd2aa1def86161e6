//! Portfolio content decoding.
//!
//! Gallery content arrives as JSON from a headless CMS, or from a static file
//! when the CMS is unavailable:
//!
//! ```json
//! {
//!   "items": [
//!     {
//!       "title": "Bridal",
//!       "description": "Soft glam for the big day",
//!       "category": "bridal",
//!       "images": [
//!         { "src": "/img/bridal-1.jpg", "alt": "Bride in natural light",
//!           "caption": "Morning prep", "description": "Airbrush base" }
//!       ]
//!     }
//!   ]
//! }
//! ```
//!
//! ## Decode or default
//!
//! CMS payloads are not trusted. [`decode_gallery`] walks the JSON and keeps
//! whatever it can use, field by field:
//!
//! | Field | Missing or wrong type |
//! |-------|-----------------------|
//! | `items` | no items |
//! | item `title` | `"Untitled"` |
//! | item `description`, `category` | `None` |
//! | image `src` | image dropped |
//! | image `alt` | image caption, then item title |
//! | image `caption`, `description` | `None` |
//!
//! Items left with no images are dropped. If nothing usable remains, or the
//! payload is not JSON at all, [`load_gallery`] returns the caller's static
//! fallback instead. The rest of the crate only ever sees [`Gallery`].
//!
//! [`parse_gallery`] is the strict counterpart: it fails on the first
//! malformed field, which is what the `check` command wants.

use crate::image_set::{ImageDescriptor, ImageSet};
use crate::session::OpenRequest;
use serde::Deserialize;
use serde_json::Value;
use std::fs;
use std::path::Path;
use thiserror::Error;
use tracing::warn;

#[derive(Error, Debug)]
pub enum ContentError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Invalid gallery: {0}")]
    Invalid(String),
}

const UNTITLED: &str = "Untitled";

/// One portfolio entry: a titled collection of images.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PortfolioItem {
    pub title: String,
    pub description: Option<String>,
    pub category: Option<String>,
    pub images: ImageSet,
}

impl PortfolioItem {
    /// Request to open this item's images in the lightbox at `start`.
    pub fn open_request(&self, start: usize) -> OpenRequest {
        OpenRequest {
            images: self.images.clone(),
            start,
            title: Some(self.title.clone()),
            description: self.description.clone(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Gallery {
    pub items: Vec<PortfolioItem>,
}

impl Gallery {
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Find an item by 1-based position or case-insensitive title.
    pub fn find(&self, key: &str) -> Option<&PortfolioItem> {
        if let Ok(n) = key.parse::<usize>() {
            return n.checked_sub(1).and_then(|i| self.items.get(i));
        }
        self.items
            .iter()
            .find(|item| item.title.eq_ignore_ascii_case(key))
    }

    /// Items in a category, in gallery order.
    pub fn in_category<'a>(&'a self, category: &'a str) -> impl Iterator<Item = &'a PortfolioItem> {
        self.items
            .iter()
            .filter(move |item| item.category.as_deref() == Some(category))
    }
}

// =============================================================================
// Lenient decoding
// =============================================================================

/// Decode whatever is usable from a gallery payload.
pub fn decode_gallery(value: &Value) -> Gallery {
    let items = value
        .get("items")
        .and_then(Value::as_array)
        .map(|items| items.iter().enumerate().filter_map(decode_item).collect())
        .unwrap_or_default();
    Gallery { items }
}

fn decode_item((index, value): (usize, &Value)) -> Option<PortfolioItem> {
    let title = string_field(value, "title").unwrap_or_else(|| UNTITLED.to_string());
    let images: Vec<ImageDescriptor> = value
        .get("images")
        .and_then(Value::as_array)
        .map(|images| {
            images
                .iter()
                .filter_map(|image| decode_image(image, &title))
                .collect()
        })
        .unwrap_or_default();
    if images.is_empty() {
        warn!(index, %title, "dropping portfolio item without usable images");
        return None;
    }
    Some(PortfolioItem {
        description: string_field(value, "description"),
        category: string_field(value, "category"),
        images: ImageSet::new(images),
        title,
    })
}

fn decode_image(value: &Value, item_title: &str) -> Option<ImageDescriptor> {
    let source = string_field(value, "src")?;
    let caption = string_field(value, "caption");
    let accessible_label = string_field(value, "alt")
        .or_else(|| caption.clone())
        .unwrap_or_else(|| item_title.to_string());
    Some(ImageDescriptor {
        source,
        accessible_label,
        caption,
        description: string_field(value, "description"),
    })
}

/// Non-empty trimmed string field, or `None`.
fn string_field(value: &Value, key: &str) -> Option<String> {
    value
        .get(key)
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
}

/// Decode a payload, falling back to `fallback` when it is not JSON or holds
/// no usable items.
pub fn load_gallery(json: &str, fallback: impl FnOnce() -> Gallery) -> Gallery {
    match serde_json::from_str::<Value>(json) {
        Ok(value) => {
            let gallery = decode_gallery(&value);
            if gallery.is_empty() {
                warn!("gallery payload has no usable items, using fallback content");
                fallback()
            } else {
                gallery
            }
        }
        Err(err) => {
            warn!(%err, "gallery payload is not valid JSON, using fallback content");
            fallback()
        }
    }
}

/// Read and leniently decode a gallery file. Only a missing or unreadable
/// file is an error; bad content falls back.
pub fn load_gallery_file(
    path: &Path,
    fallback: impl FnOnce() -> Gallery,
) -> Result<Gallery, ContentError> {
    let json = fs::read_to_string(path)?;
    Ok(load_gallery(&json, fallback))
}

// =============================================================================
// Strict decoding
// =============================================================================

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawGallery {
    items: Vec<RawItem>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawItem {
    title: String,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    category: Option<String>,
    images: Vec<RawImage>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawImage {
    src: String,
    alt: String,
    #[serde(default)]
    caption: Option<String>,
    #[serde(default)]
    description: Option<String>,
}

/// Strictly parse a gallery payload: every field must be present and well
/// typed, every item must have images, and every image needs alt text.
pub fn parse_gallery(json: &str) -> Result<Gallery, ContentError> {
    let raw: RawGallery = serde_json::from_str(json)?;
    for item in &raw.items {
        if item.images.is_empty() {
            return Err(ContentError::Invalid(format!(
                "item {:?} has no images",
                item.title
            )));
        }
        if let Some(pos) = item.images.iter().position(|img| img.alt.trim().is_empty()) {
            return Err(ContentError::Invalid(format!(
                "image {} of item {:?} has empty alt text",
                pos + 1,
                item.title
            )));
        }
    }
    let items = raw
        .items
        .into_iter()
        .map(|item| PortfolioItem {
            title: item.title,
            description: item.description,
            category: item.category,
            images: item
                .images
                .into_iter()
                .map(|img| ImageDescriptor {
                    source: img.src,
                    accessible_label: img.alt,
                    caption: img.caption,
                    description: img.description,
                })
                .collect(),
        })
        .collect();
    Ok(Gallery { items })
}
