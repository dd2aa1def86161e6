//! The lightbox session: open/closed lifecycle plus per-session view state.
//!
//! A [`Session`] is either closed, or open over an [`ImageSet`] with a
//! [`Navigation`] position and two view flags:
//!
//! - **zoom** is scoped to the current image: any successful navigation, and
//!   closing, reset it.
//! - **thumbnail strip** is scoped to the session: it survives navigation and
//!   is reset on close. Toggling it on a gallery smaller than the configured
//!   minimum is ignored.
//!
//! Every command is applied completely or not at all; a rejected command
//! leaves the session exactly as it was.
//!
//! ```text
//!            open(images, start)             apply(Next | Previous | JumpTo |
//! Closed ───────────────────────▶ Open ◀──┐        ToggleZoom | ToggleThumbnails)
//!   ▲                               │     └──┘
//!   └───────── close / apply(Close) ┘
//! ```

use crate::config::ThumbnailsConfig;
use crate::image_set::{ImageDescriptor, ImageSet};
use crate::input::Command;
use crate::navigation::{Moved, Navigation, NavigationError};
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, warn};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LightboxError {
    #[error("Cannot open the lightbox with no images")]
    EmptyImageSet,
    #[error("Image index {index} out of range for {size} images")]
    IndexOutOfRange { index: usize, size: usize },
    #[error("Lightbox is closed")]
    InvalidCommandWhileClosed,
}

impl From<NavigationError> for LightboxError {
    fn from(err: NavigationError) -> Self {
        match err {
            NavigationError::EmptyImageSet => LightboxError::EmptyImageSet,
            NavigationError::IndexOutOfRange { index, size } => {
                LightboxError::IndexOutOfRange { index, size }
            }
        }
    }
}

/// Arguments for opening a session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpenRequest {
    pub images: ImageSet,
    pub start: usize,
    pub title: Option<String>,
    pub description: Option<String>,
}

impl OpenRequest {
    pub fn new(images: impl Into<ImageSet>, start: usize) -> Self {
        Self {
            images: images.into(),
            start,
            title: None,
            description: None,
        }
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// What a successfully applied command did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Applied {
    Moved(Moved),
    Zoomed(bool),
    ThumbnailStrip(bool),
    /// The thumbnail toggle was ignored because the gallery is too small.
    Ignored,
    Closed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct OpenState {
    images: ImageSet,
    navigation: Navigation,
    zoomed: bool,
    thumbnail_strip: bool,
    title: Option<String>,
    description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    state: Option<OpenState>,
    min_thumbnail_images: usize,
}

impl Default for Session {
    fn default() -> Self {
        Self::new(&ThumbnailsConfig::default())
    }
}

impl Session {
    /// A closed session.
    pub fn new(thumbnails: &ThumbnailsConfig) -> Self {
        Self {
            state: None,
            min_thumbnail_images: thumbnails.min_images.max(1),
        }
    }

    /// Build a session that is already open.
    pub fn opened(request: OpenRequest) -> Result<Self, LightboxError> {
        let mut session = Self::default();
        session.open(request)?;
        Ok(session)
    }

    /// Open (or reopen) the session. Fails without touching the current state
    /// when the image set is empty or the start index is out of range.
    pub fn open(&mut self, request: OpenRequest) -> Result<(), LightboxError> {
        let OpenRequest {
            images,
            start,
            title,
            description,
        } = request;
        if images.is_empty() {
            warn!("refusing to open lightbox with no images");
            return Err(LightboxError::EmptyImageSet);
        }
        let navigation = Navigation::new(images.size(), start).inspect_err(|err| {
            warn!(%err, "refusing to open lightbox");
        })?;
        debug!(size = images.size(), start, "lightbox opened");
        self.state = Some(OpenState {
            images,
            navigation,
            zoomed: false,
            thumbnail_strip: false,
            title,
            description,
        });
        Ok(())
    }

    /// Close the session and release its images. Returns whether it was open.
    pub fn close(&mut self) -> bool {
        let was_open = self.state.take().is_some();
        if was_open {
            debug!("lightbox closed");
        }
        was_open
    }

    /// Apply one command.
    pub fn apply(&mut self, command: Command) -> Result<Applied, LightboxError> {
        let min_thumbnail_images = self.min_thumbnail_images;
        let Some(state) = self.state.as_mut() else {
            warn!(?command, "command received while lightbox is closed");
            return Err(LightboxError::InvalidCommandWhileClosed);
        };
        let applied = match command {
            Command::Next => state.moved(|nav| Ok(nav.next()))?,
            Command::Previous => state.moved(|nav| Ok(nav.previous()))?,
            Command::JumpTo(index) => state
                .moved(|nav| nav.jump_to(index))
                .inspect_err(|err| warn!(%err, "jump rejected"))?,
            Command::ToggleZoom => {
                state.zoomed = !state.zoomed;
                Applied::Zoomed(state.zoomed)
            }
            Command::ToggleThumbnails => {
                if !strip_allowed(state.images.size(), min_thumbnail_images) {
                    Applied::Ignored
                } else {
                    state.thumbnail_strip = !state.thumbnail_strip;
                    Applied::ThumbnailStrip(state.thumbnail_strip)
                }
            }
            Command::Close => {
                self.close();
                Applied::Closed
            }
        };
        debug!(?command, ?applied, "command applied");
        Ok(applied)
    }

    pub fn is_open(&self) -> bool {
        self.state.is_some()
    }

    pub fn images(&self) -> Option<&ImageSet> {
        self.state.as_ref().map(|s| &s.images)
    }

    pub fn current_index(&self) -> Option<usize> {
        self.state.as_ref().map(|s| s.navigation.current())
    }

    pub fn current_image(&self) -> Option<&ImageDescriptor> {
        let state = self.state.as_ref()?;
        state.images.at(state.navigation.current()).ok()
    }

    pub fn is_zoomed(&self) -> bool {
        self.state.as_ref().is_some_and(|s| s.zoomed)
    }

    pub fn show_thumbnail_strip(&self) -> bool {
        self.state.as_ref().is_some_and(|s| s.thumbnail_strip)
    }

    pub fn title(&self) -> Option<&str> {
        self.state.as_ref().and_then(|s| s.title.as_deref())
    }

    pub fn description(&self) -> Option<&str> {
        self.state.as_ref().and_then(|s| s.description.as_deref())
    }

    pub fn min_thumbnail_images(&self) -> usize {
        self.min_thumbnail_images
    }

    /// Whether the thumbnail strip can be toggled for the open gallery.
    pub fn thumbnails_available(&self) -> bool {
        self.images()
            .is_some_and(|set| strip_allowed(set.size(), self.min_thumbnail_images))
    }

    /// Owned copy of everything the presentation needs to render.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            is_open: self.is_open(),
            current_index: self.current_index(),
            images: self
                .images()
                .map(|set| set.iter().cloned().collect())
                .unwrap_or_default(),
            is_zoomed: self.is_zoomed(),
            show_thumbnail_strip: self.show_thumbnail_strip(),
            thumbnails_available: self.thumbnails_available(),
            title: self.title().map(String::from),
            description: self.description().map(String::from),
        }
    }
}

fn strip_allowed(size: usize, min_images: usize) -> bool {
    size > 1 && size >= min_images
}

impl OpenState {
    fn moved(
        &mut self,
        step: impl FnOnce(&mut Navigation) -> Result<Moved, NavigationError>,
    ) -> Result<Applied, LightboxError> {
        let moved = step(&mut self.navigation)?;
        self.zoomed = false;
        Ok(Applied::Moved(moved))
    }
}

/// Render-ready view of a session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Snapshot {
    pub is_open: bool,
    pub current_index: Option<usize>,
    pub images: Vec<ImageDescriptor>,
    pub is_zoomed: bool,
    pub show_thumbnail_strip: bool,
    pub thumbnails_available: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Snapshot {
    pub fn current_image(&self) -> Option<&ImageDescriptor> {
        self.current_index.and_then(|i| self.images.get(i))
    }
}
