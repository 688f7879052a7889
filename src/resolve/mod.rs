use std::collections::BTreeMap;

use serde_json::Value;
use thiserror::Error;

use crate::site::{Scope, Site};
use crate::store::{SettingsStore, StoreResult};

/// Slug assumed when a site never chose a theme.
pub const DEFAULT_THEME_SLUG: &str = "folio";

const SETTINGS_KEY_PREFIX: &str = "theme_settings_";
const LEGACY_CONTAINER_KEY: &str = "theme_settings";
const DEFAULTS_KEY_PREFIX: &str = "themesmith_defaults_";

/// Accepted stand-ins for renamed themes: normalized key -> current slug.
const LEGACY_KEY_ALIASES: [(&str, &str); 2] =
    [("folio-classic", "folio"), ("folio-legacy", "folio")];

pub type ResolveResult<T> = std::result::Result<T, ThemeKeyMismatchError>;

#[derive(Debug, Error)]
#[error("theme key {expected:?} does not match the active theme {slug:?}")]
pub struct ThemeKeyMismatchError {
    pub expected: String,
    pub slug: String,
}

/// Canonical per-theme settings key; the only key writes ever target.
pub fn settings_key(slug: &str) -> String {
    format!("{SETTINGS_KEY_PREFIX}{slug}")
}

/// Global key a preset's stored defaults snapshot lives under.
pub fn defaults_key(preset_name: &str) -> String {
    format!("{DEFAULTS_KEY_PREFIX}{preset_name}")
}

/// The site's configured theme slug, or the platform fallback.
pub fn resolve_theme_slug(site: &Site) -> String {
    site.theme_slug
        .as_deref()
        .filter(|slug| !slug.trim().is_empty())
        .unwrap_or(DEFAULT_THEME_SLUG)
        .to_string()
}

/// Guard against mutating the wrong theme's settings when several themes
/// share one store: the caller-declared key must name the active theme.
///
/// Accepts the slug itself, the slug with hyphens stripped, or a recognized
/// legacy alias, after normalizing (lowercase, spaces to hyphens).
pub fn validate_theme_key(expected: &str, slug: &str) -> ResolveResult<()> {
    let normalized = expected.trim().to_lowercase().replace(' ', "-");
    if normalized == slug {
        return Ok(());
    }
    if normalized == slug.replace('-', "") {
        return Ok(());
    }
    let aliased = LEGACY_KEY_ALIASES
        .iter()
        .any(|(alias, canonical)| *alias == normalized && *canonical == slug);
    if aliased {
        return Ok(());
    }
    Err(ThemeKeyMismatchError {
        expected: expected.to_string(),
        slug: slug.to_string(),
    })
}

/// Resolve the settings map currently in force for a scope/theme.
///
/// Read priority, first non-empty tier wins:
/// 1. the canonical namespaced key (`theme_settings_{slug}`),
/// 2. the legacy container entry keyed by slug,
/// 3. the legacy container read as one flat map.
///
/// An empty map is a normal answer, not an error. Non-string values inside
/// a tier are skipped; historical documents mix types freely.
pub fn resolve_effective(
    store: &dyn SettingsStore,
    scope: Scope,
    slug: &str,
) -> StoreResult<BTreeMap<String, String>> {
    if let Some(Value::Object(namespaced)) = store.get(scope, &settings_key(slug))? {
        let settings = string_entries(&namespaced);
        if !settings.is_empty() {
            return Ok(settings);
        }
    }

    if let Some(Value::Object(container)) = store.get(scope, LEGACY_CONTAINER_KEY)? {
        if let Some(Value::Object(mapped)) = container.get(slug) {
            let settings = string_entries(mapped);
            if !settings.is_empty() {
                return Ok(settings);
            }
        }

        let flat = string_entries(&container);
        if !flat.is_empty() {
            return Ok(flat);
        }
    }

    Ok(BTreeMap::new())
}

/// Read only the canonical namespaced map, ignoring legacy fallbacks.
///
/// Mutating operations merge into this map; the legacy container tiers stay
/// read-only.
pub fn read_namespaced(
    store: &dyn SettingsStore,
    scope: Scope,
    slug: &str,
) -> StoreResult<BTreeMap<String, String>> {
    match store.get(scope, &settings_key(slug))? {
        Some(Value::Object(namespaced)) => Ok(string_entries(&namespaced)),
        _ => Ok(BTreeMap::new()),
    }
}

fn string_entries(object: &serde_json::Map<String, Value>) -> BTreeMap<String, String> {
    object
        .iter()
        .filter_map(|(key, value)| {
            value
                .as_str()
                .map(|text| (key.clone(), text.to_string()))
        })
        .collect()
}
