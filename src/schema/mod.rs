use std::collections::BTreeMap;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use thiserror::Error;

use crate::preset::PresetRegistry;

const COLOR_MARKER: &str = "_color";
const SIZE_MARKERS: [&str; 3] = ["_size", "_height", "_width"];
const NAMED_SIZES: [&str; 7] = [
    "xx-small", "x-small", "small", "medium", "large", "x-large", "xx-large",
];

static COLOR_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^#[0-9A-Fa-f]{6}$").expect("color regex should compile"));
static SIZE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\d+(\.\d+)?(px|pt|em|rem|%|vw|vh|ch)$").expect("size regex should compile")
});

/// Expected value format for a setting key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    Color,
    Size,
    /// Free-form token or text; format is never checked. Keys whose names
    /// match no marker land here, so an unconventional key silently skips
    /// validation (a known gap in the legacy convention, kept as-is).
    Text,
}

/// One rejected field, reported with the offending key.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[error("{key}: {message}")]
pub struct FieldError {
    pub key: String,
    pub message: String,
}

impl FieldError {
    fn new(key: &str, message: impl Into<String>) -> Self {
        Self {
            key: key.to_string(),
            message: message.into(),
        }
    }
}

/// Explicit key-to-kind table driving value validation.
///
/// Known keys are classified once at construction; unknown keys fall back to
/// the marker-substring convention so arbitrary stored keys are accepted and
/// rejected exactly as before.
#[derive(Debug, Clone)]
pub struct SettingsSchema {
    kinds: BTreeMap<String, ValueKind>,
}

impl SettingsSchema {
    /// Build the table from every key the registry's presets know about.
    pub fn from_registry(registry: &PresetRegistry) -> Self {
        let kinds = registry
            .known_keys()
            .map(|key| (key.to_string(), classify_by_markers(key)))
            .collect();
        Self { kinds }
    }

    pub fn kind_of(&self, key: &str) -> ValueKind {
        self.kinds
            .get(key)
            .copied()
            .unwrap_or_else(|| classify_by_markers(key))
    }

    /// Check every entry and return all violations, not just the first.
    pub fn validate_settings_map(&self, settings: &BTreeMap<String, String>) -> Vec<FieldError> {
        let mut errors = Vec::new();
        for (key, value) in settings {
            match self.kind_of(key) {
                ValueKind::Color => {
                    if !COLOR_REGEX.is_match(value) {
                        errors.push(FieldError::new(
                            key,
                            format!("expected a #RRGGBB color, got {value:?}"),
                        ));
                    }
                }
                ValueKind::Size => {
                    if !is_valid_size(value) {
                        errors.push(FieldError::new(
                            key,
                            format!("expected a CSS length or named size, got {value:?}"),
                        ));
                    }
                }
                ValueKind::Text => {}
            }
        }
        errors
    }
}

fn classify_by_markers(key: &str) -> ValueKind {
    if key.contains(COLOR_MARKER) {
        ValueKind::Color
    } else if SIZE_MARKERS.iter().any(|marker| key.contains(marker)) {
        ValueKind::Size
    } else {
        ValueKind::Text
    }
}

fn is_valid_size(value: &str) -> bool {
    SIZE_REGEX.is_match(value) || NAMED_SIZES.contains(&value)
}

/// Membership check against the registry; `None` means the name is usable.
pub fn validate_preset_name(
    registry: &PresetRegistry,
    name: &str,
) -> std::result::Result<(), FieldError> {
    if name.trim().is_empty() {
        return Err(FieldError::new("target_preset", "preset name is required"));
    }
    if !registry.has(name) {
        return Err(FieldError::new(
            "target_preset",
            format!("unknown preset {name:?} (known: {})", registry.names().join(", ")),
        ));
    }
    Ok(())
}

/// Presence check for a site slug field.
pub fn validate_site_slug(
    slug: Option<&str>,
    required: bool,
) -> std::result::Result<(), FieldError> {
    match slug {
        Some(value) if value.trim().is_empty() => {
            Err(FieldError::new("site", "site slug must not be blank"))
        }
        None if required => Err(FieldError::new("site", "site slug is required")),
        _ => Ok(()),
    }
}
