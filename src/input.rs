//! Input adapter: turns raw keyboard, touch, and click events into commands.
//!
//! The lightbox understands six commands ([`Command`]). Everything the
//! presentation layer observes (key presses, finished touch gestures, clicks
//! on controls) is classified into at most one of them:
//!
//! | Source | Event | Command |
//! |--------|-------|---------|
//! | Keyboard | `ArrowRight` / `ArrowLeft` | `Next` / `Previous` |
//! | Keyboard | `Escape` | `Close` |
//! | Keyboard | `z` / `Z` | `ToggleZoom` |
//! | Keyboard | `t` / `T` | `ToggleThumbnails` |
//! | Touch | swipe left / right past the threshold | `Next` / `Previous` |
//! | Touch | shorter movement on the image | `ToggleZoom` |
//! | Click | arrow buttons | `Next` / `Previous` (stops propagation) |
//! | Click | thumbnail `i` | `JumpTo(i)` (stops propagation) |
//! | Click | backdrop | `Close` |
//!
//! Key bindings and the swipe threshold come from [`LightboxConfig`].
//!
//! ## Ordering
//!
//! The adapter never reorders, batches, or coalesces: one event in, at most
//! one command out, in delivery order. Suppressing a duplicate that the host
//! synthesizes for the same user action (the click that follows a tap) is the
//! presentation layer's job.
//!
//! ## Listener lifecycle
//!
//! The adapter only produces commands while attached. The controller attaches
//! it when the lightbox opens and detaches it on close, so a stray event
//! delivered after close classifies to nothing.
//!
//! [`LightboxConfig`]: crate::config::LightboxConfig

use crate::config::{GesturesConfig, KeyboardConfig};
use tracing::debug;

/// Everything the lightbox session can be asked to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Next,
    Previous,
    JumpTo(usize),
    Close,
    ToggleZoom,
    ToggleThumbnails,
}

impl Command {
    /// Whether this command moves the carousel.
    pub fn is_navigation(self) -> bool {
        matches!(self, Command::Next | Command::Previous | Command::JumpTo(_))
    }
}

/// Maps DOM key names to commands.
#[derive(Debug, Clone, PartialEq)]
pub struct KeyMap {
    bindings: Vec<(String, Command)>,
}

impl KeyMap {
    pub fn new(keyboard: &KeyboardConfig) -> Self {
        Self {
            bindings: vec![
                (keyboard.next.clone(), Command::Next),
                (keyboard.previous.clone(), Command::Previous),
                (keyboard.close.clone(), Command::Close),
                (keyboard.zoom.clone(), Command::ToggleZoom),
                (keyboard.thumbnails.clone(), Command::ToggleThumbnails),
            ],
        }
    }

    /// Single-character bindings ignore case; named keys must match exactly.
    pub fn classify(&self, key: &str) -> Option<Command> {
        self.bindings
            .iter()
            .find(|(binding, _)| key_matches(binding, key))
            .map(|(_, command)| *command)
    }
}

impl Default for KeyMap {
    fn default() -> Self {
        Self::new(&KeyboardConfig::default())
    }
}

fn key_matches(binding: &str, key: &str) -> bool {
    if binding.chars().count() == 1 {
        binding.to_lowercase() == key.to_lowercase()
    } else {
        binding == key
    }
}

/// Outcome of a completed touch gesture.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Gesture {
    /// Horizontal displacement beyond the threshold.
    Swipe(Command),
    /// Movement at or below the threshold.
    Tap,
}

/// Tracks one touch from start to end and classifies it.
#[derive(Debug, Clone, PartialEq)]
pub struct SwipeTracker {
    threshold: f64,
    start_x: Option<f64>,
}

impl SwipeTracker {
    pub fn new(threshold: f64) -> Self {
        Self {
            threshold,
            start_x: None,
        }
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    pub fn start(&mut self, x: f64) {
        self.start_x = Some(x);
    }

    /// Finish the gesture. Returns `None` if no touch was started.
    pub fn end(&mut self, x: f64) -> Option<Gesture> {
        let start = self.start_x.take()?;
        Some(classify_displacement(x - start, self.threshold))
    }

    pub fn cancel(&mut self) {
        self.start_x = None;
    }
}

impl Default for SwipeTracker {
    fn default() -> Self {
        Self::new(GesturesConfig::default().swipe_threshold)
    }
}

/// Classify a horizontal displacement (end − start). Leftward movement
/// (negative) advances; rightward goes back.
pub fn classify_displacement(dx: f64, threshold: f64) -> Gesture {
    if dx.abs() > threshold {
        if dx < 0.0 {
            Gesture::Swipe(Command::Next)
        } else {
            Gesture::Swipe(Command::Previous)
        }
    } else {
        Gesture::Tap
    }
}

/// Clickable parts of the rendered lightbox.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Previous,
    Next,
    Close,
    ZoomButton,
    ThumbnailsButton,
    Thumbnail(usize),
    /// The dimmed area around the image.
    Backdrop,
    /// The image itself.
    Image,
}

/// What a click on a control resolves to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControlAction {
    pub command: Option<Command>,
    /// The host must stop the event from reaching handlers underneath
    /// (notably the image's own zoom-on-tap handler).
    pub stop_propagation: bool,
}

impl Control {
    pub fn classify(self) -> ControlAction {
        let (command, stop_propagation) = match self {
            Control::Previous => (Command::Previous, true),
            Control::Next => (Command::Next, true),
            Control::Close => (Command::Close, true),
            Control::ZoomButton => (Command::ToggleZoom, true),
            Control::ThumbnailsButton => (Command::ToggleThumbnails, true),
            Control::Thumbnail(i) => (Command::JumpTo(i), true),
            Control::Backdrop => (Command::Close, false),
            Control::Image => (Command::ToggleZoom, false),
        };
        ControlAction {
            command: Some(command),
            stop_propagation,
        }
    }
}

/// Stateful adapter combining key map, swipe tracking, and the listener
/// attachment flag.
#[derive(Debug, Clone, PartialEq)]
pub struct InputAdapter {
    keys: KeyMap,
    swipe: SwipeTracker,
    attached: bool,
}

impl InputAdapter {
    pub fn new(keyboard: &KeyboardConfig, gestures: &GesturesConfig) -> Self {
        Self {
            keys: KeyMap::new(keyboard),
            swipe: SwipeTracker::new(gestures.swipe_threshold),
            attached: false,
        }
    }

    pub fn is_attached(&self) -> bool {
        self.attached
    }

    pub fn attach(&mut self) {
        if !self.attached {
            debug!("input adapter attached");
        }
        self.attached = true;
    }

    /// Stop producing commands and forget any touch in progress.
    pub fn detach(&mut self) {
        if self.attached {
            debug!("input adapter detached");
        }
        self.attached = false;
        self.swipe.cancel();
    }

    pub fn key(&self, key: &str) -> Option<Command> {
        if !self.attached {
            return None;
        }
        self.keys.classify(key)
    }

    pub fn touch_start(&mut self, x: f64) {
        if self.attached {
            self.swipe.start(x);
        }
    }

    /// Finish a touch. `on_image` says whether it landed on the image, which
    /// turns a short tap into a zoom toggle.
    pub fn touch_end(&mut self, x: f64, on_image: bool) -> Option<Command> {
        if !self.attached {
            return None;
        }
        match self.swipe.end(x)? {
            Gesture::Swipe(command) => Some(command),
            Gesture::Tap if on_image => Some(Command::ToggleZoom),
            Gesture::Tap => None,
        }
    }

    pub fn control(&self, control: Control) -> ControlAction {
        let action = control.classify();
        if self.attached {
            action
        } else {
            ControlAction {
                command: None,
                ..action
            }
        }
    }
}

impl Default for InputAdapter {
    fn default() -> Self {
        Self::new(&KeyboardConfig::default(), &GesturesConfig::default())
    }
}
