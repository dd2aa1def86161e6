//! Reference HTML rendering of a lightbox snapshot.
//!
//! This is one possible presentation layer: it renders a [`Snapshot`] as the
//! markup of a modal dialog. Each clickable element carries a `data-control`
//! attribute naming the [`Control`](crate::input::Control) it maps to, so a
//! small script can forward clicks back to the controller.
//!
//! A closed session renders to nothing.
//!
//! Uses [maud](https://maud.lambda.xyz/) for compile-time HTML templating;
//! all interpolated text is escaped.

use crate::focus::FocusTarget;
use crate::session::Snapshot;
use maud::{Markup, html};

/// Render the lightbox dialog. `focused` marks the control that should
/// receive keyboard focus.
pub fn render_lightbox(snapshot: &Snapshot, focused: Option<FocusTarget>) -> Markup {
    let (Some(index), Some(image)) = (snapshot.current_index, snapshot.current_image()) else {
        return html! {};
    };
    let size = snapshot.images.len();
    let label = snapshot.title.as_deref().unwrap_or("Image viewer");
    let has_focus = |target: FocusTarget| focused == Some(target);

    html! {
        div.lightbox role="dialog" aria-modal="true" aria-label=(label) {
            div.lightbox-backdrop data-control="backdrop" {}
            button.lightbox-close type="button" data-control="close"
                aria-label="Close" autofocus[has_focus(FocusTarget::Close)] { "×" }
            @if let Some(title) = &snapshot.title {
                header.lightbox-header {
                    h2 { (title) }
                    @if let Some(description) = &snapshot.description {
                        p { (description) }
                    }
                }
            }
            figure.lightbox-figure.zoomed[snapshot.is_zoomed] {
                img src=(image.source) alt=(image.accessible_label) data-control="image";
                @if image.caption.is_some() || image.description.is_some() {
                    figcaption {
                        @if let Some(caption) = &image.caption {
                            strong { (caption) }
                        }
                        @if let Some(description) = &image.description {
                            span { (description) }
                        }
                    }
                }
            }
            @if size > 1 {
                button.lightbox-prev type="button" data-control="previous"
                    aria-label="Previous image" autofocus[has_focus(FocusTarget::Previous)] { "‹" }
                button.lightbox-next type="button" data-control="next"
                    aria-label="Next image" autofocus[has_focus(FocusTarget::Next)] { "›" }
            }
            div.lightbox-toolbar {
                span.lightbox-counter aria-live="polite" { (index + 1) " / " (size) }
                button.lightbox-zoom type="button" data-control="zoom"
                    aria-pressed=(flag(snapshot.is_zoomed)) autofocus[has_focus(FocusTarget::Zoom)] { "Zoom" }
                @if snapshot.thumbnails_available {
                    button.lightbox-thumbs type="button" data-control="thumbnails"
                        aria-expanded=(flag(snapshot.show_thumbnail_strip))
                        autofocus[has_focus(FocusTarget::Thumbnails)] { "Thumbnails" }
                }
            }
            @if snapshot.show_thumbnail_strip {
                ol.lightbox-strip {
                    @for (i, thumb) in snapshot.images.iter().enumerate() {
                        li {
                            button type="button" data-control="thumbnail" data-index=(i)
                                aria-current=[(i == index).then_some("true")] {
                                img src=(thumb.source) alt=(thumb.accessible_label);
                            }
                        }
                    }
                }
            }
        }
    }
}

fn flag(value: bool) -> &'static str {
    if value { "true" } else { "false" }
}
