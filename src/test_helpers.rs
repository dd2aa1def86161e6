//! Shared test utilities for the simple-lightbox test suite.
//!
//! Provides image set builders, an opened-session shortcut, and a gallery
//! payload that mirrors `fixtures/gallery.json`.
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let mut session = open_at(3, 2);
//! session.apply(Command::Next).unwrap();
//! assert_eq!(session.current_index(), Some(0));
//!
//! let gallery = load_gallery(GALLERY_JSON, Gallery::default);
//! let bridal = find_item(&gallery, "Bridal");
//! ```

use std::path::PathBuf;

use crate::content::{Gallery, PortfolioItem};
use crate::image_set::{ImageDescriptor, ImageSet};
use crate::session::{OpenRequest, Session};

// =========================================================================
// Builders
// =========================================================================

/// `n` images named `look-1.jpg` .. `look-n.jpg`, each labelled and captioned
/// `Look <i>`.
pub fn sample_set(n: usize) -> ImageSet {
    (1..=n)
        .map(|i| {
            ImageDescriptor::new(format!("/img/look-{i}.jpg"), format!("Look {i}"))
                .with_caption(format!("Look {i}"))
        })
        .collect()
}

/// A session opened on `sample_set(n)` at `start`. Panics if the open is
/// rejected.
pub fn open_at(n: usize, start: usize) -> Session {
    Session::opened(OpenRequest::new(sample_set(n), start))
        .unwrap_or_else(|err| panic!("open_at({n}, {start}) rejected: {err}"))
}

// =========================================================================
// Gallery content
// =========================================================================

/// Two items, five photos. Every image has alt text so strict parsing
/// accepts it too.
pub const GALLERY_JSON: &str = r#"{
  "items": [
    {
      "title": "Bridal",
      "description": "Soft glam for the big day",
      "category": "bridal",
      "images": [
        { "src": "/img/bridal-1.jpg", "alt": "Bride in natural light", "caption": "Morning prep" },
        { "src": "/img/bridal-2.jpg", "alt": "Veil and lashes close-up" },
        { "src": "/img/bridal-3.jpg", "alt": "Bride at the altar", "caption": "Ceremony",
          "description": "Long-wear base, waterproof liner" }
      ]
    },
    {
      "title": "Editorial",
      "category": "editorial",
      "images": [
        { "src": "/img/editorial-1.jpg", "alt": "Graphic liner", "caption": "Cover look" },
        { "src": "/img/editorial-2.jpg", "alt": "Metallic lids" }
      ]
    }
  ]
}"#;

/// Path to a file under `fixtures/`.
pub fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("fixtures")
        .join(name)
}

/// Find an item by title. Panics if not found.
pub fn find_item<'a>(gallery: &'a Gallery, title: &str) -> &'a PortfolioItem {
    gallery
        .items
        .iter()
        .find(|item| item.title == title)
        .unwrap_or_else(|| {
            let titles: Vec<&str> = gallery.items.iter().map(|i| i.title.as_str()).collect();
            panic!("item '{title}' not found. Available: {titles:?}")
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::{load_gallery, parse_gallery};

    #[test]
    fn sample_set_sizes() {
        assert!(sample_set(0).is_empty());
        assert_eq!(sample_set(4).size(), 4);
        assert_eq!(sample_set(2).at(1).unwrap().source, "/img/look-2.jpg");
    }

    #[test]
    fn gallery_json_matches_fixture_file() {
        let from_file = std::fs::read_to_string(fixture_path("gallery.json")).unwrap();
        assert_eq!(
            parse_gallery(&from_file).unwrap(),
            parse_gallery(GALLERY_JSON).unwrap()
        );
    }

    #[test]
    fn find_item_by_title() {
        let gallery = load_gallery(GALLERY_JSON, Gallery::default);
        assert_eq!(find_item(&gallery, "Editorial").images.size(), 2);
    }

    #[test]
    #[should_panic(expected = "item 'Runway' not found")]
    fn find_item_panics_on_miss() {
        let gallery = load_gallery(GALLERY_JSON, Gallery::default);
        find_item(&gallery, "Runway");
    }
}
