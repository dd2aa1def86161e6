//! Keyboard focus containment for the open lightbox.
//!
//! While the lightbox is open, Tab and Shift+Tab cycle through its controls
//! and never leave it:
//!
//! ```text
//! ring:  close → previous → next → zoom → thumbnails
//!          ↑                                   │
//!          └──────────────── Tab ──────────────┘
//! ```
//!
//! Controls the presentation does not render for the current gallery (the
//! arrows and the thumbnail toggle on a single image) are left out of the
//! ring when the trap is built. The element that had focus before the
//! lightbox opened is carried by the trap and handed back on release.

use serde::{Deserialize, Serialize};

/// A focusable lightbox control.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FocusTarget {
    Close,
    Previous,
    Next,
    Zoom,
    Thumbnails,
}

impl FocusTarget {
    pub const DEFAULT_RING: [FocusTarget; 5] = [
        FocusTarget::Close,
        FocusTarget::Previous,
        FocusTarget::Next,
        FocusTarget::Zoom,
        FocusTarget::Thumbnails,
    ];

    pub fn name(self) -> &'static str {
        match self {
            FocusTarget::Close => "close",
            FocusTarget::Previous => "previous",
            FocusTarget::Next => "next",
            FocusTarget::Zoom => "zoom",
            FocusTarget::Thumbnails => "thumbnails",
        }
    }
}

/// Which controls are rendered for a given gallery.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Availability {
    pub arrows: bool,
    pub thumbnails: bool,
}

impl Availability {
    pub fn for_gallery(size: usize, min_thumbnail_images: usize) -> Self {
        Self {
            arrows: size > 1,
            thumbnails: size > 1 && size >= min_thumbnail_images,
        }
    }

    pub fn includes(self, target: FocusTarget) -> bool {
        match target {
            FocusTarget::Close | FocusTarget::Zoom => true,
            FocusTarget::Previous | FocusTarget::Next => self.arrows,
            FocusTarget::Thumbnails => self.thumbnails,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FocusTrap {
    ring: Vec<FocusTarget>,
    position: usize,
    return_focus: Option<String>,
}

impl FocusTrap {
    /// Build a trap over the available controls of `ring`, focusing `initial`
    /// (or the first available control when `initial` is not rendered).
    ///
    /// `return_focus` identifies the element that triggered the open.
    pub fn new(
        ring: &[FocusTarget],
        available: Availability,
        initial: FocusTarget,
        return_focus: Option<String>,
    ) -> Self {
        let mut ring: Vec<FocusTarget> = ring
            .iter()
            .copied()
            .filter(|t| available.includes(*t))
            .collect();
        if ring.is_empty() {
            // Close is always rendered; keep the dialog escapable.
            ring.push(FocusTarget::Close);
        }
        let position = ring.iter().position(|t| *t == initial).unwrap_or(0);
        Self {
            ring,
            position,
            return_focus,
        }
    }

    pub fn focused(&self) -> FocusTarget {
        self.ring[self.position]
    }

    pub fn ring(&self) -> &[FocusTarget] {
        &self.ring
    }

    /// Move focus forward, wrapping from the last control to the first.
    pub fn tab(&mut self) -> FocusTarget {
        self.position = (self.position + 1) % self.ring.len();
        self.focused()
    }

    /// Move focus backward, wrapping from the first control to the last.
    pub fn shift_tab(&mut self) -> FocusTarget {
        self.position = (self.position + self.ring.len() - 1) % self.ring.len();
        self.focused()
    }

    /// Focus a specific control (e.g. after a pointer click). Returns `false`
    /// and leaves focus alone when the control is not in the ring.
    pub fn focus(&mut self, target: FocusTarget) -> bool {
        match self.ring.iter().position(|t| *t == target) {
            Some(pos) => {
                self.position = pos;
                true
            }
            None => false,
        }
    }

    /// Release the trap, returning the element focus should go back to.
    pub fn release(self) -> Option<String> {
        self.return_focus
    }
}
