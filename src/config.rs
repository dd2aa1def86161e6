//! Lightbox configuration.
//!
//! Handles loading, validating, and merging `config.toml`. Stock defaults are
//! the base layer; a user file overrides only the keys it names.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! [gestures]
//! swipe_threshold = 50.0    # Minimum horizontal displacement for a swipe
//!
//! [keyboard]
//! next = "ArrowRight"
//! previous = "ArrowLeft"
//! close = "Escape"
//! zoom = "z"                # Single characters match case-insensitively
//! thumbnails = "t"
//!
//! [thumbnails]
//! min_images = 2            # Strip toggle only works from this many images up
//!
//! [focus]
//! ring = ["close", "previous", "next", "zoom", "thumbnails"]
//! initial = "close"
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use crate::focus::FocusTarget;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Lightbox configuration loaded from `config.toml`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LightboxConfig {
    /// Touch gesture classification.
    pub gestures: GesturesConfig,
    /// Keyboard bindings for lightbox commands.
    pub keyboard: KeyboardConfig,
    /// Thumbnail strip settings.
    pub thumbnails: ThumbnailsConfig,
    /// Focus ring order inside the open lightbox.
    pub focus: FocusConfig,
}

impl LightboxConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let threshold = self.gestures.swipe_threshold;
        if !threshold.is_finite() || threshold <= 0.0 {
            return Err(ConfigError::Validation(
                "gestures.swipe_threshold must be a positive number".into(),
            ));
        }
        if self.thumbnails.min_images == 0 {
            return Err(ConfigError::Validation(
                "thumbnails.min_images must be at least 1".into(),
            ));
        }
        self.keyboard.validate()?;
        self.focus.validate()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GesturesConfig {
    /// Minimum absolute horizontal displacement, in CSS pixels, for a touch
    /// to count as a swipe. Anything shorter is a tap.
    pub swipe_threshold: f64,
}

impl Default for GesturesConfig {
    fn default() -> Self {
        Self {
            swipe_threshold: 50.0,
        }
    }
}

/// Key names follow the DOM `KeyboardEvent.key` values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct KeyboardConfig {
    pub next: String,
    pub previous: String,
    pub close: String,
    pub zoom: String,
    pub thumbnails: String,
}

impl Default for KeyboardConfig {
    fn default() -> Self {
        Self {
            next: "ArrowRight".to_string(),
            previous: "ArrowLeft".to_string(),
            close: "Escape".to_string(),
            zoom: "z".to_string(),
            thumbnails: "t".to_string(),
        }
    }
}

impl KeyboardConfig {
    /// All bindings paired with their config key name.
    pub fn bindings(&self) -> [(&'static str, &str); 5] {
        [
            ("next", &self.next),
            ("previous", &self.previous),
            ("close", &self.close),
            ("zoom", &self.zoom),
            ("thumbnails", &self.thumbnails),
        ]
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let bindings = self.bindings();
        for (name, key) in bindings {
            if key.trim().is_empty() {
                return Err(ConfigError::Validation(format!(
                    "keyboard.{name} must not be empty"
                )));
            }
            if RESERVED_KEYS.iter().any(|r| r.eq_ignore_ascii_case(key)) {
                return Err(ConfigError::Validation(format!(
                    "keyboard.{name} cannot use {key:?}, it moves focus inside the lightbox"
                )));
            }
        }
        for (i, (name, key)) in bindings.iter().enumerate() {
            for (other_name, other_key) in &bindings[i + 1..] {
                if bindings_clash(key, other_key) {
                    return Err(ConfigError::Validation(format!(
                        "keyboard.{name} and keyboard.{other_name} are both bound to {key:?}"
                    )));
                }
            }
        }
        Ok(())
    }
}

/// Keys handled by the focus trap before the key map sees them.
const RESERVED_KEYS: [&str; 1] = ["Tab"];

/// Same rule the key map matches with: single characters ignore case,
/// named keys are exact.
fn bindings_clash(a: &str, b: &str) -> bool {
    if a.chars().count() == 1 && b.chars().count() == 1 {
        a.to_lowercase() == b.to_lowercase()
    } else {
        a == b
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ThumbnailsConfig {
    /// Smallest image set for which the thumbnail strip can be shown.
    pub min_images: usize,
}

impl Default for ThumbnailsConfig {
    fn default() -> Self {
        Self { min_images: 2 }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FocusConfig {
    /// Tab order of the lightbox controls.
    pub ring: Vec<FocusTarget>,
    /// Control focused when the lightbox opens.
    pub initial: FocusTarget,
}

impl Default for FocusConfig {
    fn default() -> Self {
        Self {
            ring: FocusTarget::DEFAULT_RING.to_vec(),
            initial: FocusTarget::Close,
        }
    }
}

impl FocusConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        if self.ring.is_empty() {
            return Err(ConfigError::Validation(
                "focus.ring must not be empty".into(),
            ));
        }
        for (i, target) in self.ring.iter().enumerate() {
            if self.ring[i + 1..].contains(target) {
                return Err(ConfigError::Validation(format!(
                    "focus.ring lists {} more than once",
                    target.name()
                )));
            }
        }
        if !self.ring.contains(&self.initial) {
            return Err(ConfigError::Validation(format!(
                "focus.initial ({}) must appear in focus.ring",
                self.initial.name()
            )));
        }
        Ok(())
    }
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
pub fn stock_defaults_value() -> Result<toml::Value, ConfigError> {
    toml::Value::try_from(LightboxConfig::default())
        .map_err(|e| ConfigError::Validation(format!("default config must serialize: {e}")))
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay replace base values entirely.
/// - Keys in base that are not in overlay are preserved.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Load a config file as a raw TOML value.
///
/// Returns `Ok(None)` if the file does not exist.
pub fn load_raw_config(path: &Path) -> Result<Option<toml::Value>, ConfigError> {
    if !path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Merge an optional overlay onto a base value, then deserialize and validate.
pub fn resolve_config(
    base: toml::Value,
    overlay: Option<toml::Value>,
) -> Result<LightboxConfig, ConfigError> {
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: LightboxConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load config from the given file, falling back to stock defaults when the
/// file is absent.
pub fn load_config(path: &Path) -> Result<LightboxConfig, ConfigError> {
    let base = stock_defaults_value()?;
    let overlay = load_raw_config(path)?;
    resolve_config(base, overlay)
}

/// Returns a fully-commented stock `config.toml` with all keys and explanations.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# Simple Lightbox Configuration
# =============================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults. Unknown keys will cause an error.

# ---------------------------------------------------------------------------
# Touch gestures
# ---------------------------------------------------------------------------
[gestures]
# Minimum horizontal displacement (CSS px) between touch start and touch end
# for the gesture to count as a swipe. Shorter movements are taps.
swipe_threshold = 50.0

# ---------------------------------------------------------------------------
# Keyboard
# ---------------------------------------------------------------------------
[keyboard]
# Values are DOM KeyboardEvent.key names. Single characters match
# regardless of case ("z" also matches "Z").
next = "ArrowRight"
previous = "ArrowLeft"
close = "Escape"
zoom = "z"
thumbnails = "t"

# ---------------------------------------------------------------------------
# Thumbnail strip
# ---------------------------------------------------------------------------
[thumbnails]
# The strip toggle is ignored for galleries smaller than this.
min_images = 2

# ---------------------------------------------------------------------------
# Focus
# ---------------------------------------------------------------------------
[focus]
# Tab order of the lightbox controls. Controls that are not rendered
# (e.g. arrows for a single image) are skipped.
ring = ["close", "previous", "next", "zoom", "thumbnails"]

# Control that receives focus when the lightbox opens.
initial = "close"
"##
}
