use serde::Deserialize;

use crate::preset::PresetRegistry;
use crate::report::ErrorReporter;
use crate::schema::{self, SettingsSchema};
use crate::service::{PresetService, SettingsDiff, ThemeTarget};
use crate::site::SiteDirectory;
use crate::store::SettingsStore;

/// Preset assumed when a command names none.
pub const DEFAULT_PRESET: &str = "modern";

/// The seven administrator actions, keyed by their wire names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    InspectThemeSettings,
    VerifyDefaultsVsSettings,
    LoadStoredDefaults,
    InspectKey,
    DiffVsPreset,
    LoadDefaultsIntoSettings,
    SaveSettingsAsDefaults,
}

impl Action {
    const TABLE: [(&'static str, Action); 7] = [
        ("inspect_theme_settings", Action::InspectThemeSettings),
        ("verify_defaults_vs_settings", Action::VerifyDefaultsVsSettings),
        ("load_stored_defaults", Action::LoadStoredDefaults),
        ("inspect_key", Action::InspectKey),
        ("diff_vs_preset", Action::DiffVsPreset),
        ("load_defaults_into_settings", Action::LoadDefaultsIntoSettings),
        ("save_settings_as_defaults", Action::SaveSettingsAsDefaults),
    ];

    pub fn from_name(name: &str) -> Option<Action> {
        Self::TABLE
            .iter()
            .find(|(wire, _)| *wire == name)
            .map(|(_, action)| *action)
    }

    pub fn name(self) -> &'static str {
        Self::TABLE
            .iter()
            .find(|(_, action)| *action == self)
            .map(|(wire, _)| *wire)
            .unwrap_or_default()
    }
}

/// One administrator command, conceptually one form POST.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CommandPayload {
    pub action: String,
    #[serde(default)]
    pub target_preset: Option<String>,
    /// Site slug; absent means the global scope.
    #[serde(default)]
    pub site: Option<String>,
    /// Expected theme key; absent means the target's resolved slug.
    #[serde(default)]
    pub theme: Option<String>,
    #[serde(default)]
    pub debug: bool,
    #[serde(default)]
    pub inspect_key: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Success,
    Warning,
    Error,
}

/// User-facing outcome line, consumable by any UI layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub severity: Severity,
    pub text: String,
}

impl Message {
    pub fn success(text: impl Into<String>) -> Self {
        Self {
            severity: Severity::Success,
            text: text.into(),
        }
    }

    pub fn warning(text: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            text: text.into(),
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            text: text.into(),
        }
    }
}

/// Maps an administrator command onto a [`PresetService`] call.
///
/// Every path ends in messages; validation failures never propagate as
/// errors out of `dispatch`.
pub struct ConfigCommandDispatcher<'a> {
    store: &'a dyn SettingsStore,
    registry: &'a PresetRegistry,
    schema: &'a SettingsSchema,
    sites: &'a dyn SiteDirectory,
    reporter: ErrorReporter,
    default_preset: String,
}

impl<'a> ConfigCommandDispatcher<'a> {
    pub fn new(
        store: &'a dyn SettingsStore,
        registry: &'a PresetRegistry,
        schema: &'a SettingsSchema,
        sites: &'a dyn SiteDirectory,
    ) -> Self {
        Self {
            store,
            registry,
            schema,
            sites,
            reporter: ErrorReporter::new(),
            default_preset: DEFAULT_PRESET.to_string(),
        }
    }

    pub fn with_default_preset(mut self, preset: &str) -> Self {
        self.default_preset = preset.to_string();
        self
    }

    pub fn dispatch(&self, payload: &CommandPayload) -> Vec<Message> {
        let Some(action) = Action::from_name(&payload.action) else {
            tracing::warn!(action = %payload.action, "unrecognized action name");
            return vec![Message::warning(format!(
                "Unrecognized action {:?}; nothing was changed.",
                payload.action
            ))];
        };
        tracing::debug!(action = action.name(), site = ?payload.site, "dispatching command");

        if let Err(error) = schema::validate_site_slug(payload.site.as_deref(), false) {
            return vec![Message::error(error.to_string())];
        }
        let target = match &payload.site {
            Some(slug) => match self.sites.site_by_slug(slug) {
                Ok(site) => ThemeTarget::for_site(&site),
                Err(error) => return vec![Message::error(error.to_string())],
            },
            None => ThemeTarget::global(),
        };
        let theme_key = payload.theme.clone().unwrap_or_else(|| target.slug.clone());
        let preset = payload
            .target_preset
            .clone()
            .unwrap_or_else(|| self.default_preset.clone());

        match action {
            Action::InspectThemeSettings => self.inspect_theme_settings(payload, &target, &theme_key),
            Action::InspectKey => self.inspect_key(payload, &target, &theme_key),
            Action::DiffVsPreset => self.diff_vs_preset(payload, &target, &theme_key, &preset),
            Action::VerifyDefaultsVsSettings => {
                self.verify_defaults_vs_settings(payload, &target, &theme_key, &preset)
            }
            Action::LoadDefaultsIntoSettings => {
                self.load_defaults_into_settings(payload, &target, &theme_key, &preset)
            }
            Action::LoadStoredDefaults => {
                self.load_stored_defaults(payload, &target, &theme_key, &preset)
            }
            Action::SaveSettingsAsDefaults => {
                self.save_settings_as_defaults(payload, &target, &theme_key, &preset)
            }
        }
    }

    fn service(&self) -> PresetService<'a> {
        PresetService::new(self.store, self.registry, self.schema)
    }

    fn check_preset(&self, preset: &str) -> Option<Message> {
        schema::validate_preset_name(self.registry, preset)
            .err()
            .map(|error| Message::error(error.to_string()))
    }

    fn inspect_theme_settings(
        &self,
        payload: &CommandPayload,
        target: &ThemeTarget,
        theme_key: &str,
    ) -> Vec<Message> {
        let service = self.service();
        let outcome = self
            .reporter
            .wrap("inspecting theme settings", || service.inspect(target, theme_key));
        match outcome.data {
            Some(report) => {
                let mut messages = vec![Message::success(format!(
                    "Theme {:?} on {}: {} settings stored.",
                    report.slug, target.scope, report.count
                ))];
                if payload.debug {
                    messages.push(Message::success(format!(
                        "Settings: {}",
                        serde_json::to_string(&report.settings).unwrap_or_default()
                    )));
                }
                messages
            }
            None => vec![Message::error(outcome.error.unwrap_or_default())],
        }
    }

    fn inspect_key(
        &self,
        payload: &CommandPayload,
        target: &ThemeTarget,
        theme_key: &str,
    ) -> Vec<Message> {
        let Some(key) = payload
            .inspect_key
            .as_deref()
            .filter(|key| !key.trim().is_empty())
        else {
            return vec![Message::error("inspect_key: a key to inspect is required")];
        };

        let service = self.service();
        let outcome = self
            .reporter
            .wrap("inspecting a settings key", || service.inspect(target, theme_key));
        match outcome.data {
            Some(report) => {
                // A missing key is an answer, not a failure.
                let value = match report.settings.get(key) {
                    Some(value) => format!("{value:?}"),
                    None => "null".to_string(),
                };
                vec![Message::success(format!("{key} = {value}"))]
            }
            None => vec![Message::error(outcome.error.unwrap_or_default())],
        }
    }

    fn diff_vs_preset(
        &self,
        payload: &CommandPayload,
        target: &ThemeTarget,
        theme_key: &str,
        preset: &str,
    ) -> Vec<Message> {
        if let Some(message) = self.check_preset(preset) {
            return vec![message];
        }
        let service = self.service();
        let outcome = self.reporter.wrap("diffing settings against a preset", || {
            service.diff_vs_preset(target, theme_key, preset)
        });
        self.diff_messages(payload, preset, "preset", outcome)
    }

    fn verify_defaults_vs_settings(
        &self,
        payload: &CommandPayload,
        target: &ThemeTarget,
        theme_key: &str,
        preset: &str,
    ) -> Vec<Message> {
        if let Some(message) = self.check_preset(preset) {
            return vec![message];
        }
        let service = self.service();
        let outcome = self
            .reporter
            .wrap("verifying stored defaults against settings", || {
                service.diff_vs_stored(target, theme_key, preset)
            });
        self.diff_messages(payload, preset, "stored defaults", outcome)
    }

    fn diff_messages(
        &self,
        payload: &CommandPayload,
        preset: &str,
        reference: &str,
        outcome: crate::report::Outcome<SettingsDiff>,
    ) -> Vec<Message> {
        match outcome.data {
            Some(diff) => {
                let mut messages = if diff.is_clean() {
                    vec![Message::success(format!(
                        "Settings match the {reference} for {preset:?} ({} keys).",
                        diff.matches.len()
                    ))]
                } else {
                    vec![Message::warning(format!(
                        "Settings differ from the {reference} for {preset:?}: {} matching, {} differing.",
                        diff.matches.len(),
                        diff.differences.len()
                    ))]
                };
                if payload.debug {
                    for (key, entry) in &diff.differences {
                        messages.push(Message::warning(format!(
                            "{key}: current {:?}, target {:?}",
                            entry.current.as_deref().unwrap_or("null"),
                            entry.target
                        )));
                    }
                }
                messages
            }
            None => vec![Message::error(outcome.error.unwrap_or_default())],
        }
    }

    fn load_defaults_into_settings(
        &self,
        payload: &CommandPayload,
        target: &ThemeTarget,
        theme_key: &str,
        preset: &str,
    ) -> Vec<Message> {
        if let Some(message) = self.check_preset(preset) {
            return vec![message];
        }
        let service = self.service();
        let before = if payload.debug {
            service.inspect(target, theme_key).map(|r| r.count).ok()
        } else {
            None
        };

        let outcome = self
            .reporter
            .wrap("applying preset defaults", || {
                service.apply_preset(target, theme_key, preset)
            });
        match outcome.data {
            Some((count, merged)) => {
                let mut messages = vec![Message::success(format!(
                    "Applied preset {preset:?}: {count} settings written."
                ))];
                if payload.debug {
                    messages.push(Message::success(format!(
                        "Settings count before: {}, after: {}.",
                        before.unwrap_or(0),
                        merged.len()
                    )));
                }
                messages
            }
            None => vec![Message::error(outcome.error.unwrap_or_default())],
        }
    }

    fn load_stored_defaults(
        &self,
        payload: &CommandPayload,
        target: &ThemeTarget,
        theme_key: &str,
        preset: &str,
    ) -> Vec<Message> {
        if let Some(message) = self.check_preset(preset) {
            return vec![message];
        }
        let service = self.service();
        let before = if payload.debug {
            service.inspect(target, theme_key).map(|r| r.count).ok()
        } else {
            None
        };

        let outcome = self
            .reporter
            .wrap("loading stored defaults", || {
                service.load_stored_defaults(target, theme_key, preset)
            });
        match outcome.data {
            Some((count, merged)) => {
                let mut messages = vec![Message::success(format!(
                    "Restored stored defaults for {preset:?}: {count} settings written."
                ))];
                if payload.debug {
                    messages.push(Message::success(format!(
                        "Settings count before: {}, after: {}.",
                        before.unwrap_or(0),
                        merged.len()
                    )));
                }
                messages
            }
            None => vec![Message::error(outcome.error.unwrap_or_default())],
        }
    }

    fn save_settings_as_defaults(
        &self,
        payload: &CommandPayload,
        target: &ThemeTarget,
        theme_key: &str,
        preset: &str,
    ) -> Vec<Message> {
        if let Some(message) = self.check_preset(preset) {
            return vec![message];
        }
        let service = self.service();
        let outcome = self
            .reporter
            .wrap("saving settings as preset defaults", || {
                service.save_settings_as_defaults(target, theme_key, preset)
            });
        match outcome.data {
            Some((count, snapshot)) => {
                let mut messages = vec![Message::success(format!(
                    "Saved {count} settings as the defaults for {preset:?}."
                ))];
                if payload.debug {
                    messages.push(Message::success(format!(
                        "Snapshot: {}",
                        serde_json::to_string(&snapshot.values).unwrap_or_default()
                    )));
                }
                messages
            }
            None => vec![Message::error(outcome.error.unwrap_or_default())],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::site::{Site, SiteId, StaticSiteDirectory};
    use crate::store::MemoryStore;

    struct Fixture {
        store: MemoryStore,
        registry: PresetRegistry,
        schema: SettingsSchema,
        sites: StaticSiteDirectory,
    }

    impl Fixture {
        fn new() -> Self {
            let registry = PresetRegistry::builtin();
            let schema = SettingsSchema::from_registry(&registry);
            let mut sites = StaticSiteDirectory::new();
            sites.register(
                "library",
                Site {
                    id: SiteId(11),
                    theme_slug: Some("folio".to_string()),
                },
            );
            Self {
                store: MemoryStore::new(),
                registry,
                schema,
                sites,
            }
        }

        fn dispatcher(&self) -> ConfigCommandDispatcher<'_> {
            ConfigCommandDispatcher::new(&self.store, &self.registry, &self.schema, &self.sites)
        }
    }

    fn payload(action: &str) -> CommandPayload {
        CommandPayload {
            action: action.to_string(),
            site: Some("library".to_string()),
            ..CommandPayload::default()
        }
    }

    #[test]
    fn unknown_action_yields_one_warning_and_no_writes() {
        let fixture = Fixture::new();
        let messages = fixture.dispatcher().dispatch(&payload("reticulate_splines"));
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].severity, Severity::Warning);
        assert!(fixture.store.is_empty());
    }

    #[test]
    fn unknown_site_slug_becomes_an_error_message() {
        let fixture = Fixture::new();
        let mut command = payload("inspect_theme_settings");
        command.site = Some("ghost-site".to_string());
        let messages = fixture.dispatcher().dispatch(&command);
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].severity, Severity::Error);
        assert!(messages[0].text.contains("ghost-site"));
    }

    #[test]
    fn absent_site_means_global_scope() {
        let fixture = Fixture::new();
        let mut command = payload("inspect_theme_settings");
        command.site = None;
        let messages = fixture.dispatcher().dispatch(&command);
        assert_eq!(messages[0].severity, Severity::Success);
        assert!(messages[0].text.contains("global"));
    }

    #[test]
    fn apply_then_inspect_reports_the_preset_values() {
        let fixture = Fixture::new();
        let dispatcher = fixture.dispatcher();

        let mut apply = payload("load_defaults_into_settings");
        apply.target_preset = Some("traditional".to_string());
        let messages = dispatcher.dispatch(&apply);
        assert_eq!(messages[0].severity, Severity::Success);
        let expected = fixture.registry.get("traditional").unwrap().len();
        assert!(messages[0].text.contains(&expected.to_string()), "{}", messages[0].text);

        let mut inspect = payload("inspect_key");
        inspect.inspect_key = Some("h1_font_color".to_string());
        let messages = dispatcher.dispatch(&inspect);
        assert_eq!(messages[0].severity, Severity::Success);
        assert!(messages[0].text.contains("#1F3A5F"));
    }

    #[test]
    fn inspect_key_of_missing_key_succeeds_with_null() {
        let fixture = Fixture::new();
        let mut command = payload("inspect_key");
        command.inspect_key = Some("nonexistent_key".to_string());
        let messages = fixture.dispatcher().dispatch(&command);
        assert_eq!(messages[0].severity, Severity::Success);
        assert!(messages[0].text.contains("null"));
    }

    #[test]
    fn inspect_key_without_key_field_is_rejected() {
        let fixture = Fixture::new();
        let messages = fixture.dispatcher().dispatch(&payload("inspect_key"));
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].severity, Severity::Error);
        assert!(messages[0].text.contains("inspect_key"));
    }

    #[test]
    fn unknown_preset_name_is_rejected_before_dispatching() {
        let fixture = Fixture::new();
        let mut command = payload("load_defaults_into_settings");
        command.target_preset = Some("brutalist".to_string());
        let messages = fixture.dispatcher().dispatch(&command);
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].severity, Severity::Error);
        assert!(fixture.store.is_empty());
    }

    #[test]
    fn save_verify_drift_and_restore_flow() {
        let fixture = Fixture::new();
        let dispatcher = fixture.dispatcher();
        let preset = Some("traditional".to_string());

        let mut apply = payload("load_defaults_into_settings");
        apply.target_preset = preset.clone();
        dispatcher.dispatch(&apply);

        let mut save = payload("save_settings_as_defaults");
        save.target_preset = preset.clone();
        let messages = dispatcher.dispatch(&save);
        assert_eq!(messages[0].severity, Severity::Success);

        let mut verify = payload("verify_defaults_vs_settings");
        verify.target_preset = preset.clone();
        let messages = dispatcher.dispatch(&verify);
        assert_eq!(messages[0].severity, Severity::Success);

        // Re-apply a different preset so settings drift from the snapshot.
        let mut drift = payload("load_defaults_into_settings");
        drift.target_preset = Some("minimal".to_string());
        dispatcher.dispatch(&drift);

        let messages = dispatcher.dispatch(&verify);
        assert_eq!(messages[0].severity, Severity::Warning);

        let mut restore = payload("load_stored_defaults");
        restore.target_preset = preset.clone();
        let messages = dispatcher.dispatch(&restore);
        assert_eq!(messages[0].severity, Severity::Success);

        let messages = dispatcher.dispatch(&verify);
        assert_eq!(messages[0].severity, Severity::Success);
    }

    #[test]
    fn diff_right_after_apply_is_clean() {
        let fixture = Fixture::new();
        let dispatcher = fixture.dispatcher();

        let mut apply = payload("load_defaults_into_settings");
        apply.target_preset = Some("modern".to_string());
        dispatcher.dispatch(&apply);

        let mut diff = payload("diff_vs_preset");
        diff.target_preset = Some("modern".to_string());
        let messages = dispatcher.dispatch(&diff);
        assert_eq!(messages[0].severity, Severity::Success);
        assert!(messages[0].text.contains("match"));
    }

    #[test]
    fn mismatched_theme_key_is_a_descriptive_error() {
        let fixture = Fixture::new();
        let mut command = payload("load_defaults_into_settings");
        command.theme = Some("atrium-press".to_string());
        let messages = fixture.dispatcher().dispatch(&command);
        assert_eq!(messages[0].severity, Severity::Error);
        assert!(messages[0].text.contains("atrium-press"));
        assert!(fixture.store.is_empty());
    }

    #[test]
    fn debug_flag_adds_before_and_after_counts() {
        let fixture = Fixture::new();
        let mut command = payload("load_defaults_into_settings");
        command.target_preset = Some("modern".to_string());
        command.debug = true;
        let messages = fixture.dispatcher().dispatch(&command);
        assert_eq!(messages.len(), 2);
        assert!(messages[1].text.contains("before: 0"));
    }

    #[test]
    fn load_stored_defaults_without_snapshot_is_descriptive() {
        let fixture = Fixture::new();
        let mut command = payload("load_stored_defaults");
        command.target_preset = Some("modern".to_string());
        let messages = fixture.dispatcher().dispatch(&command);
        assert_eq!(messages[0].severity, Severity::Error);
        assert!(messages[0].text.contains("no stored defaults"), "{}", messages[0].text);
    }

    #[test]
    fn action_table_round_trips_names() {
        for (name, action) in Action::TABLE {
            assert_eq!(Action::from_name(name), Some(action));
            assert_eq!(action.name(), name);
        }
        assert_eq!(Action::from_name("definitely_not_an_action"), None);
    }
}
