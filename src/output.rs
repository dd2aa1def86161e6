//! CLI output formatting.
//!
//! # Information-First Display
//!
//! Every entity (portfolio item, image, lightbox state) is shown by its
//! semantic identity first (positional index and title), with sources and
//! overlay text as indented context lines.
//!
//! ## Gallery (`check`)
//!
//! ```text
//! Gallery
//! 001 Bridal (3 photos)
//!     Category: bridal
//!     001 Morning prep
//!         Source: /img/bridal-1.jpg
//!     002 (/img/bridal-2.jpg)
//!         Source: /img/bridal-2.jpg
//!
//! 2 items, 5 photos
//! ```
//!
//! ## Lightbox state (`replay`)
//!
//! ```text
//! > key ArrowRight
//!     moved 001 → 002
//!     Lightbox: Bridal
//!         002/003 Veil and lashes close-up
//!             Source: /img/bridal-2.jpg
//!         Zoom: off
//!         Thumbnails: hidden
//!         Focus: close
//! ```
//!
//! # Architecture
//!
//! Each view has a `format_*` function (returns `Vec<String>`) for testability
//! and a `print_*` wrapper that writes to stdout. Format functions are pure:
//! no I/O, no side effects.

use crate::content::Gallery;
use crate::controller::Handled;
use crate::focus::FocusTarget;
use crate::replay::{Outcome, ScriptLine};
use crate::session::{Applied, Snapshot};

// ============================================================================
// Shared entity display helpers
// ============================================================================

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

/// Format an entity header: positional index + title, with photo count.
///
/// ```text
/// 001 Bridal (3 photos)
/// ```
fn entity_header(index: usize, title: &str, count: usize) -> String {
    format!("{} {} ({} photos)", format_index(index), title, count)
}

/// Format an image line: captioned images show the caption, uncaptioned
/// ones show their source in parens.
///
/// ```text
/// 001 Morning prep        // captioned
/// 002 (/img/b.jpg)        // no caption: source IS the identity
/// ```
fn image_line(index: usize, caption: Option<&str>, source: &str) -> String {
    match caption {
        Some(c) if !c.is_empty() => format!("{} {}", format_index(index), c),
        _ => format!("{} ({})", format_index(index), source),
    }
}

/// Truncate text to `max` characters, appending `...` if truncated.
fn truncate_desc(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        text.to_string()
    } else {
        let cut: String = text.chars().take(max).collect();
        format!("{}...", cut)
    }
}

fn on_off(value: bool) -> &'static str {
    if value { "on" } else { "off" }
}

// ============================================================================
// Gallery
// ============================================================================

pub fn format_gallery(gallery: &Gallery) -> Vec<String> {
    let mut lines = vec!["Gallery".to_string()];
    let mut photos = 0;

    for (i, item) in gallery.items.iter().enumerate() {
        let count = item.images.size();
        photos += count;
        lines.push(entity_header(i + 1, &item.title, count));
        if let Some(category) = &item.category {
            lines.push(format!("{}Category: {}", indent(1), category));
        }
        if let Some(desc) = &item.description {
            lines.push(format!("{}Description: {}", indent(1), truncate_desc(desc, 60)));
        }
        for (j, image) in item.images.iter().enumerate() {
            lines.push(format!(
                "{}{}",
                indent(1),
                image_line(j + 1, image.caption.as_deref(), &image.source)
            ));
            lines.push(format!("{}Source: {}", indent(2), image.source));
            if image.has_empty_label() {
                lines.push(format!("{}Warning: empty alt text", indent(2)));
            }
        }
    }

    lines.push(String::new());
    lines.push(format!(
        "{} item{}, {} photo{}",
        gallery.items.len(),
        if gallery.items.len() == 1 { "" } else { "s" },
        photos,
        if photos == 1 { "" } else { "s" },
    ));
    lines
}

/// Print gallery output to stdout.
pub fn print_gallery(gallery: &Gallery) {
    for line in format_gallery(gallery) {
        println!("{}", line);
    }
}

// ============================================================================
// Lightbox state
// ============================================================================

/// Format the lightbox state at the given depth.
pub fn format_snapshot(snapshot: &Snapshot, focused: Option<FocusTarget>, depth: usize) -> Vec<String> {
    let (Some(index), Some(image)) = (snapshot.current_index, snapshot.current_image()) else {
        return vec![format!("{}Lightbox: closed", indent(depth))];
    };
    let size = snapshot.images.len();
    let mut lines = vec![format!(
        "{}Lightbox: {}",
        indent(depth),
        snapshot.title.as_deref().unwrap_or("(untitled)")
    )];

    let position = format!("{}/{}", format_index(index + 1), format_index(size));
    let label = if image.has_empty_label() {
        "(no alt text)"
    } else {
        image.accessible_label.as_str()
    };
    lines.push(format!("{}{} {}", indent(depth + 1), position, label));
    lines.push(format!("{}Source: {}", indent(depth + 2), image.source));
    if let Some(caption) = &image.caption {
        lines.push(format!("{}Caption: {}", indent(depth + 2), caption));
    }
    if let Some(desc) = &image.description {
        lines.push(format!(
            "{}Description: {}",
            indent(depth + 2),
            truncate_desc(desc, 60)
        ));
    }
    lines.push(format!("{}Zoom: {}", indent(depth + 1), on_off(snapshot.is_zoomed)));
    let strip = match (snapshot.thumbnails_available, snapshot.show_thumbnail_strip) {
        (false, _) => "unavailable",
        (true, true) => "shown",
        (true, false) => "hidden",
    };
    lines.push(format!("{}Thumbnails: {}", indent(depth + 1), strip));
    if let Some(target) = focused {
        lines.push(format!("{}Focus: {}", indent(depth + 1), target.name()));
    }
    lines
}

/// One-line summary of what an event did.
pub fn format_handled(handled: &Handled) -> String {
    match handled {
        Handled::Applied(Applied::Moved(moved)) => format!(
            "moved {} → {}",
            format_index(moved.from + 1),
            format_index(moved.to + 1)
        ),
        Handled::Applied(Applied::Zoomed(z)) => format!("zoom {}", on_off(*z)),
        Handled::Applied(Applied::ThumbnailStrip(s)) => {
            format!("thumbnails {}", if *s { "shown" } else { "hidden" })
        }
        Handled::Applied(Applied::Ignored) => "ignored (gallery too small)".to_string(),
        Handled::Applied(Applied::Closed) => "closed".to_string(),
        Handled::Focus(target) => format!("focus → {}", target.name()),
        Handled::Rejected(err) => format!("rejected: {}", err),
        Handled::Ignored => "no command".to_string(),
    }
}

/// One-line summary of a replay step's outcome.
pub fn format_outcome(outcome: &Outcome) -> String {
    match outcome {
        Outcome::Handled(handled) => format_handled(handled),
        Outcome::Opened => "opened".to_string(),
        Outcome::PageChanged(page) => format!("page → {}", page),
        Outcome::Closed {
            return_focus: Some(target),
        } => format!("closed, focus returns to {}", target),
        Outcome::Closed { return_focus: None } => "closed".to_string(),
        Outcome::UnknownItem(item) => format!("unknown item: {}", item),
    }
}

// ============================================================================
// Replay
// ============================================================================

/// Echo a script line, its outcome, and the resulting lightbox state.
pub fn format_replay_step(
    line: &ScriptLine,
    outcome: &Outcome,
    snapshot: &Snapshot,
    focused: Option<FocusTarget>,
) -> Vec<String> {
    let mut lines = vec![
        format!("> {}", line.text),
        format!("{}{}", indent(1), format_outcome(outcome)),
    ];
    lines.extend(format_snapshot(snapshot, focused, 1));
    lines
}

pub fn print_replay_step(
    line: &ScriptLine,
    outcome: &Outcome,
    snapshot: &Snapshot,
    focused: Option<FocusTarget>,
) {
    for l in format_replay_step(line, outcome, snapshot, focused) {
        println!("{}", l);
    }
}
