//! # Simple Lightbox
//!
//! A framework-independent lightbox controller for photography portfolios.
//! It owns the state of a modal image viewer (which image is shown, whether
//! it is zoomed, whether the thumbnail strip is visible) and turns raw user
//! events into state transitions. Rendering is somebody else's job: the
//! presentation layer forwards events in and re-renders from a snapshot.
//!
//! # Architecture: Events In, Snapshots Out
//!
//! ```text
//! key / swipe / click ──▶ input ──▶ Command ──▶ session ──▶ Snapshot ──▶ render
//!                                                  │
//!                                              navigation
//!                                             (wrap-around)
//! ```
//!
//! Every layer is a plain value with synchronous methods, so each one can be
//! tested without a browser:
//!
//! - **input** classifies events into at most one [`input::Command`].
//! - **session** applies a command to the open gallery, or rejects it with a
//!   typed [`session::LightboxError`] and leaves the state untouched.
//! - **controller** ties them together with the page-level side effects
//!   (scroll lock, global key listener, focus trap) that exist only while
//!   the lightbox is open.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`image_set`] | Ordered, non-mutating image collection with accessible labels |
//! | [`navigation`] | Current index with wrap-around next/previous and bounds-checked jumps |
//! | [`input`] | Key, touch, and control classification into commands |
//! | [`session`] | Open/closed state, zoom and thumbnail flags, command application |
//! | [`effects`] | Scroll lock and key listener, held for exactly the open lifetime |
//! | [`focus`] | Focus ring trap inside the dialog, restore target on close |
//! | [`controller`] | Event-level entry point composing all of the above |
//! | [`router`] | Site pages as a value with a pure transition function |
//! | [`content`] | Decode-or-default gallery payloads from the CMS |
//! | [`render`] | Reference HTML rendering of a snapshot using Maud |
//! | [`config`] | `config.toml` loading, merging, and validation |
//! | [`output`] | CLI output formatting |
//! | [`replay`] | Event scripts for the `replay` command |
//!
//! # Design Decisions
//!
//! ## One Session Model
//!
//! Zoom, thumbnail strip, and navigation live in a single [`session::Session`].
//! Navigating always resets zoom, and the thumbnail toggle is ignored for
//! galleries below the configured minimum. There is no second, simpler
//! lightbox with its own rules.
//!
//! ## Effects Are Scoped, Not Ambient
//!
//! Locking page scroll and registering a global key handler are acquired on
//! open and released on every close path, including dropping the controller.
//! The page goes through the [`effects::Host`] trait, so tests count
//! acquisitions instead of trusting them.
//!
//! ## Content Is Untrusted
//!
//! CMS payloads are decoded field by field with defaults ([`content`]), so
//! everything past the boundary works with validated [`image_set::ImageSet`]s.
//! A payload with nothing usable falls back to static content.

pub mod config;
pub mod content;
pub mod controller;
pub mod effects;
pub mod focus;
pub mod image_set;
pub mod input;
pub mod navigation;
pub mod output;
pub mod render;
pub mod replay;
pub mod router;
pub mod session;

#[cfg(test)]
pub(crate) mod test_helpers;
