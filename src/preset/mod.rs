mod builtin;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub type PresetResult<T> = std::result::Result<T, UnknownPresetError>;

#[derive(Debug, Error)]
#[error("unknown preset {name:?}")]
pub struct UnknownPresetError {
    pub name: String,
}

/// A named, immutable bundle of default presentation settings.
///
/// Values are always strings: colors as `#RRGGBB`, sizes as CSS length
/// strings, enums as plain tokens.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preset {
    pub name: String,
    pub values: BTreeMap<String, String>,
}

impl Preset {
    pub fn from_pairs(name: &str, pairs: &[(&str, &str)]) -> Self {
        Self {
            name: name.to_string(),
            values: pairs
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Registry of presets, populated once at startup and never mutated.
///
/// Constructed as a value and passed by dependency injection so tests can
/// substitute fixtures.
#[derive(Debug, Clone)]
pub struct PresetRegistry {
    presets: BTreeMap<String, Preset>,
}

impl PresetRegistry {
    /// Registry holding the builtin preset families.
    pub fn builtin() -> Self {
        Self::from_presets(vec![
            builtin::modern(),
            builtin::traditional(),
            builtin::minimal(),
            builtin::contrast(),
        ])
    }

    pub fn from_presets(presets: Vec<Preset>) -> Self {
        Self {
            presets: presets.into_iter().map(|p| (p.name.clone(), p)).collect(),
        }
    }

    pub fn names(&self) -> Vec<&str> {
        self.presets.keys().map(String::as_str).collect()
    }

    pub fn has(&self, name: &str) -> bool {
        self.presets.contains_key(name)
    }

    pub fn get(&self, name: &str) -> PresetResult<&Preset> {
        self.presets.get(name).ok_or_else(|| UnknownPresetError {
            name: name.to_string(),
        })
    }

    /// Union of every key appearing in any registered preset.
    pub fn known_keys(&self) -> impl Iterator<Item = &str> {
        self.presets
            .values()
            .flat_map(|preset| preset.values.keys().map(String::as_str))
    }
}

impl Default for PresetRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}
