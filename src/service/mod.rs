use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::preset::{PresetRegistry, UnknownPresetError};
use crate::resolve::{
    self, defaults_key, settings_key, ThemeKeyMismatchError, DEFAULT_THEME_SLUG,
};
use crate::schema::{FieldError, SettingsSchema};
use crate::site::{Scope, Site, SiteError};
use crate::store::{SettingsStore, StorageError};

pub type ServiceResult<T> = std::result::Result<T, ServiceError>;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error(transparent)]
    UnknownPreset(#[from] UnknownPresetError),
    #[error(transparent)]
    ThemeKeyMismatch(#[from] ThemeKeyMismatchError),
    #[error(transparent)]
    SiteNotFound(#[from] SiteError),
    #[error("no settings are stored for {scope} (theme {slug:?})")]
    SettingsNotFound { scope: Scope, slug: String },
    #[error("settings failed validation: {}", format_field_errors(.0))]
    Validation(Vec<FieldError>),
    #[error("no stored defaults exist for preset {preset:?}")]
    StoredDefaultsMissing { preset: String },
    #[error("stored defaults for preset {preset:?} could not be decoded")]
    SnapshotDecode {
        preset: String,
        source: serde_json::Error,
    },
    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl ServiceError {
    /// Message safe to hand straight to an end user, when the failure is an
    /// expected input/state problem. Storage and decode failures return
    /// `None` and go through the error reporter instead.
    pub fn user_message(&self) -> Option<String> {
        match self {
            ServiceError::Storage(_) | ServiceError::SnapshotDecode { .. } => None,
            other => Some(other.to_string()),
        }
    }
}

fn format_field_errors(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Storage namespace plus the theme slug active inside it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThemeTarget {
    pub scope: Scope,
    pub slug: String,
}

impl ThemeTarget {
    pub fn for_site(site: &Site) -> Self {
        Self {
            scope: Scope::Site(site.id),
            slug: resolve::resolve_theme_slug(site),
        }
    }

    pub fn global() -> Self {
        Self {
            scope: Scope::Global,
            slug: DEFAULT_THEME_SLUG.to_string(),
        }
    }
}

/// Effective settings captured under a preset name for later restoration.
///
/// Persisted as a JSON string blob of `values` under the global defaults
/// key; the legacy layout double-encodes, so decoding can genuinely fail.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredDefaultsSnapshot {
    pub preset_name: String,
    pub values: BTreeMap<String, String>,
}

/// Per-key comparison between current settings and a target bundle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DiffEntry {
    pub current: Option<String>,
    pub target: String,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct SettingsDiff {
    pub matches: BTreeMap<String, String>,
    pub differences: BTreeMap<String, DiffEntry>,
}

impl SettingsDiff {
    pub fn is_clean(&self) -> bool {
        self.differences.is_empty()
    }
}

/// Diagnostic view of a target's resolved state.
#[derive(Debug, Clone, Serialize)]
pub struct InspectReport {
    pub slug: String,
    pub count: usize,
    pub settings: BTreeMap<String, String>,
}

/// Preset operations composed from the store, registry and schema.
///
/// Every mutating operation computes its merged map in memory and then
/// writes the single canonical key, so a failure never leaves a partial
/// write behind. Concurrent writers against the same scope+key race and the
/// later write wins; that is the accepted storage contract.
pub struct PresetService<'a> {
    store: &'a dyn SettingsStore,
    registry: &'a PresetRegistry,
    schema: &'a SettingsSchema,
}

impl<'a> PresetService<'a> {
    pub fn new(
        store: &'a dyn SettingsStore,
        registry: &'a PresetRegistry,
        schema: &'a SettingsSchema,
    ) -> Self {
        Self {
            store,
            registry,
            schema,
        }
    }

    /// Overlay a registered preset onto the target's current settings.
    ///
    /// Preset wins per key; keys outside the preset survive untouched.
    /// Returns the number of preset keys written and the resulting map.
    pub fn apply_preset(
        &self,
        target: &ThemeTarget,
        theme_key: &str,
        preset_name: &str,
    ) -> ServiceResult<(usize, BTreeMap<String, String>)> {
        let preset = self.registry.get(preset_name)?;
        self.apply_values(target, theme_key, &preset.values)
    }

    /// Capture the target's effective settings as the stored defaults for
    /// `preset_name`.
    pub fn save_settings_as_defaults(
        &self,
        target: &ThemeTarget,
        theme_key: &str,
        preset_name: &str,
    ) -> ServiceResult<(usize, StoredDefaultsSnapshot)> {
        resolve::validate_theme_key(theme_key, &target.slug)?;

        let settings = resolve::resolve_effective(self.store, target.scope, &target.slug)?;
        if settings.is_empty() {
            return Err(ServiceError::SettingsNotFound {
                scope: target.scope,
                slug: target.slug.clone(),
            });
        }

        let errors = self.schema.validate_settings_map(&settings);
        if !errors.is_empty() {
            return Err(ServiceError::Validation(errors));
        }

        let blob = serde_json::to_string(&settings).map_err(StorageError::Codec)?;
        self.store
            .set(Scope::Global, &defaults_key(preset_name), &Value::String(blob))?;

        tracing::info!(
            preset = preset_name,
            scope = %target.scope,
            count = settings.len(),
            "saved settings as preset defaults"
        );
        let snapshot = StoredDefaultsSnapshot {
            preset_name: preset_name.to_string(),
            values: settings,
        };
        Ok((snapshot.values.len(), snapshot))
    }

    /// Re-apply a previously saved defaults snapshot, treating its values
    /// exactly like a preset.
    pub fn load_stored_defaults(
        &self,
        target: &ThemeTarget,
        theme_key: &str,
        preset_name: &str,
    ) -> ServiceResult<(usize, BTreeMap<String, String>)> {
        let snapshot = self.read_stored_defaults(preset_name)?;
        self.apply_values(target, theme_key, &snapshot.values)
    }

    /// Compare the target's effective settings against a registered preset.
    /// Only keys inside the preset's key set are considered.
    pub fn diff_vs_preset(
        &self,
        target: &ThemeTarget,
        theme_key: &str,
        preset_name: &str,
    ) -> ServiceResult<SettingsDiff> {
        let preset = self.registry.get(preset_name)?;
        self.diff_against(target, theme_key, &preset.values)
    }

    /// Compare the target's effective settings against the stored defaults
    /// snapshot for `preset_name`.
    pub fn diff_vs_stored(
        &self,
        target: &ThemeTarget,
        theme_key: &str,
        preset_name: &str,
    ) -> ServiceResult<SettingsDiff> {
        let snapshot = self.read_stored_defaults(preset_name)?;
        self.diff_against(target, theme_key, &snapshot.values)
    }

    /// Resolved effective settings plus metadata, for diagnostics.
    pub fn inspect(&self, target: &ThemeTarget, theme_key: &str) -> ServiceResult<InspectReport> {
        resolve::validate_theme_key(theme_key, &target.slug)?;
        let settings = resolve::resolve_effective(self.store, target.scope, &target.slug)?;
        Ok(InspectReport {
            slug: target.slug.clone(),
            count: settings.len(),
            settings,
        })
    }

    fn apply_values(
        &self,
        target: &ThemeTarget,
        theme_key: &str,
        values: &BTreeMap<String, String>,
    ) -> ServiceResult<(usize, BTreeMap<String, String>)> {
        let errors = self.schema.validate_settings_map(values);
        if !errors.is_empty() {
            return Err(ServiceError::Validation(errors));
        }
        resolve::validate_theme_key(theme_key, &target.slug)?;

        // Merge in memory, then one write to the canonical key.
        let mut merged = resolve::read_namespaced(self.store, target.scope, &target.slug)?;
        merged.extend(values.iter().map(|(k, v)| (k.clone(), v.clone())));

        let document: serde_json::Map<String, Value> = merged
            .iter()
            .map(|(k, v)| (k.clone(), Value::String(v.clone())))
            .collect();
        self.store.set(
            target.scope,
            &settings_key(&target.slug),
            &Value::Object(document),
        )?;

        tracing::info!(
            scope = %target.scope,
            slug = %target.slug,
            written = values.len(),
            total = merged.len(),
            "applied settings bundle"
        );
        Ok((values.len(), merged))
    }

    fn diff_against(
        &self,
        target: &ThemeTarget,
        theme_key: &str,
        reference: &BTreeMap<String, String>,
    ) -> ServiceResult<SettingsDiff> {
        resolve::validate_theme_key(theme_key, &target.slug)?;
        let current = resolve::resolve_effective(self.store, target.scope, &target.slug)?;

        let mut diff = SettingsDiff::default();
        for (key, wanted) in reference {
            match current.get(key) {
                Some(value) if value == wanted => {
                    diff.matches.insert(key.clone(), value.clone());
                }
                other => {
                    diff.differences.insert(
                        key.clone(),
                        DiffEntry {
                            current: other.cloned(),
                            target: wanted.clone(),
                        },
                    );
                }
            }
        }
        Ok(diff)
    }

    fn read_stored_defaults(&self, preset_name: &str) -> ServiceResult<StoredDefaultsSnapshot> {
        let blob = self
            .store
            .get(Scope::Global, &defaults_key(preset_name))?
            .ok_or_else(|| ServiceError::StoredDefaultsMissing {
                preset: preset_name.to_string(),
            })?;

        let Value::String(serialized) = blob else {
            return Err(ServiceError::StoredDefaultsMissing {
                preset: preset_name.to_string(),
            });
        };
        let values: BTreeMap<String, String> =
            serde_json::from_str(&serialized).map_err(|source| ServiceError::SnapshotDecode {
                preset: preset_name.to_string(),
                source,
            })?;
        Ok(StoredDefaultsSnapshot {
            preset_name: preset_name.to_string(),
            values,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::preset::Preset;
    use crate::site::SiteId;
    use crate::store::MemoryStore;
    use serde_json::json;

    struct Fixture {
        store: MemoryStore,
        registry: PresetRegistry,
        schema: SettingsSchema,
    }

    impl Fixture {
        fn new() -> Self {
            let registry = PresetRegistry::builtin();
            let schema = SettingsSchema::from_registry(&registry);
            Self {
                store: MemoryStore::new(),
                registry,
                schema,
            }
        }

        fn service(&self) -> PresetService<'_> {
            PresetService::new(&self.store, &self.registry, &self.schema)
        }
    }

    fn library_target() -> ThemeTarget {
        ThemeTarget {
            scope: Scope::Site(SiteId(11)),
            slug: "folio".to_string(),
        }
    }

    #[test]
    fn apply_preset_writes_all_values_and_inspect_sees_them() {
        let fixture = Fixture::new();
        let service = fixture.service();
        let target = library_target();

        let (count, map) = service.apply_preset(&target, "folio", "traditional").unwrap();
        let expected = fixture.registry.get("traditional").unwrap();
        assert_eq!(count, expected.len());
        assert_eq!(map.get("h1_font_color").map(String::as_str), Some("#1F3A5F"));

        let report = service.inspect(&target, "folio").unwrap();
        assert_eq!(report.slug, "folio");
        for (key, value) in &expected.values {
            assert_eq!(report.settings.get(key), Some(value), "missing {key}");
        }
    }

    #[test]
    fn apply_preset_preserves_keys_outside_the_preset() {
        let fixture = Fixture::new();
        let service = fixture.service();
        let target = library_target();
        fixture
            .store
            .set(target.scope, &settings_key("folio"), &json!({"custom_note": "keep me"}))
            .unwrap();

        let (_, map) = service.apply_preset(&target, "folio", "modern").unwrap();
        assert_eq!(map.get("custom_note").map(String::as_str), Some("keep me"));
    }

    #[test]
    fn apply_unknown_preset_fails_without_writing() {
        let fixture = Fixture::new();
        let service = fixture.service();
        let err = service
            .apply_preset(&library_target(), "folio", "brutalist")
            .unwrap_err();
        assert!(matches!(err, ServiceError::UnknownPreset(_)));
        assert!(fixture.store.is_empty());
    }

    #[test]
    fn apply_with_mismatched_theme_key_leaves_store_untouched() {
        let fixture = Fixture::new();
        let service = fixture.service();
        let err = service
            .apply_preset(&library_target(), "atrium-press", "modern")
            .unwrap_err();
        assert!(matches!(err, ServiceError::ThemeKeyMismatch(_)));
        assert!(fixture.store.is_empty());
    }

    #[test]
    fn save_then_load_round_trips_the_effective_map() {
        let fixture = Fixture::new();
        let service = fixture.service();
        let target = library_target();

        service.apply_preset(&target, "folio", "traditional").unwrap();
        let before = service.inspect(&target, "folio").unwrap().settings;

        let (count, snapshot) = service
            .save_settings_as_defaults(&target, "folio", "traditional")
            .unwrap();
        assert_eq!(count, before.len());
        assert_eq!(snapshot.values, before);

        service.load_stored_defaults(&target, "folio", "traditional").unwrap();
        let after = service.inspect(&target, "folio").unwrap().settings;
        assert_eq!(after, before);
    }

    #[test]
    fn save_on_empty_target_reports_settings_not_found() {
        let fixture = Fixture::new();
        let service = fixture.service();
        let err = service
            .save_settings_as_defaults(&library_target(), "folio", "modern")
            .unwrap_err();
        assert!(matches!(err, ServiceError::SettingsNotFound { .. }));
    }

    #[test]
    fn diff_is_clean_right_after_apply() {
        let fixture = Fixture::new();
        let service = fixture.service();
        let target = library_target();

        service.apply_preset(&target, "folio", "traditional").unwrap();
        let diff = service.diff_vs_preset(&target, "folio", "traditional").unwrap();
        assert!(diff.is_clean());
        assert_eq!(
            diff.matches.len(),
            fixture.registry.get("traditional").unwrap().len()
        );
    }

    #[test]
    fn single_drifted_key_shows_up_as_exactly_one_difference() {
        let fixture = Fixture::new();
        let service = fixture.service();
        let target = library_target();

        service.apply_preset(&target, "folio", "traditional").unwrap();
        // Manual overwrite outside the service, as a support operator would.
        let mut doc = resolve::read_namespaced(&fixture.store, target.scope, "folio").unwrap();
        doc.insert("primary_color".to_string(), "#000000".to_string());
        let object: serde_json::Map<_, _> = doc
            .iter()
            .map(|(k, v)| (k.clone(), Value::String(v.clone())))
            .collect();
        fixture
            .store
            .set(target.scope, &settings_key("folio"), &Value::Object(object))
            .unwrap();

        let diff = service.diff_vs_preset(&target, "folio", "traditional").unwrap();
        assert_eq!(diff.differences.len(), 1);
        let entry = diff.differences.get("primary_color").unwrap();
        assert_eq!(entry.current.as_deref(), Some("#000000"));
        assert_eq!(entry.target, "#1F3A5F");
    }

    #[test]
    fn load_restores_snapshot_after_manual_drift() {
        let fixture = Fixture::new();
        let service = fixture.service();
        let target = library_target();

        service.apply_preset(&target, "folio", "traditional").unwrap();
        service
            .save_settings_as_defaults(&target, "folio", "traditional")
            .unwrap();

        let (_, mut drifted) = service.apply_preset(&target, "folio", "traditional").unwrap();
        drifted.insert("primary_color".to_string(), "#000000".to_string());
        let object: serde_json::Map<_, _> = drifted
            .iter()
            .map(|(k, v)| (k.clone(), Value::String(v.clone())))
            .collect();
        fixture
            .store
            .set(target.scope, &settings_key("folio"), &Value::Object(object))
            .unwrap();
        assert!(!service
            .diff_vs_stored(&target, "folio", "traditional")
            .unwrap()
            .is_clean());

        service.load_stored_defaults(&target, "folio", "traditional").unwrap();
        let diff = service.diff_vs_stored(&target, "folio", "traditional").unwrap();
        assert!(diff.is_clean());
    }

    #[test]
    fn load_without_saved_defaults_is_descriptive() {
        let fixture = Fixture::new();
        let service = fixture.service();
        let err = service
            .load_stored_defaults(&library_target(), "folio", "modern")
            .unwrap_err();
        assert!(matches!(err, ServiceError::StoredDefaultsMissing { .. }));
        assert!(err.user_message().is_some());
    }

    #[test]
    fn undecodable_snapshot_is_an_internal_error() {
        let fixture = Fixture::new();
        let service = fixture.service();
        fixture
            .store
            .set(Scope::Global, &defaults_key("modern"), &json!("{ not json"))
            .unwrap();

        let err = service
            .load_stored_defaults(&library_target(), "folio", "modern")
            .unwrap_err();
        assert!(matches!(err, ServiceError::SnapshotDecode { .. }));
        assert!(err.user_message().is_none());
    }

    #[test]
    fn inspect_on_empty_target_reports_zero_settings() {
        let fixture = Fixture::new();
        let service = fixture.service();
        let report = service.inspect(&library_target(), "folio").unwrap();
        assert_eq!(report.count, 0);
        assert!(report.settings.is_empty());
    }

    #[test]
    fn invalid_values_abort_before_any_write() {
        let store = MemoryStore::new();
        let registry = PresetRegistry::from_presets(vec![Preset::from_pairs(
            "broken",
            &[("primary_color", "chartreuse"), ("body_font_size", "12")],
        )]);
        let schema = SettingsSchema::from_registry(&registry);
        let service = PresetService::new(&store, &registry, &schema);

        let err = service
            .apply_preset(&library_target(), "folio", "broken")
            .unwrap_err();
        match err {
            ServiceError::Validation(errors) => assert_eq!(errors.len(), 2),
            other => panic!("expected validation failure, got {other:?}"),
        }
        assert!(store.is_empty());
    }
}
