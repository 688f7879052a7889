use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use serde::Deserialize;

use themesmith::{
    logging, CommandPayload, ConfigCommandDispatcher, FileStore, PresetRegistry, SettingsSchema,
    Severity, Site, SiteId, StaticSiteDirectory,
};

/// Run one administrator theme-configuration command against a local store.
#[derive(Debug, Parser)]
#[command(name = "themesmith", version, about)]
struct Cli {
    /// Action name, e.g. `inspect_theme_settings` or `diff_vs_preset`.
    action: String,

    /// Site slug; omit to target the global scope.
    #[arg(long)]
    site: Option<String>,

    /// Preset name; defaults to the configured default preset.
    #[arg(long = "preset")]
    target_preset: Option<String>,

    /// Expected theme key, for callers that pin one.
    #[arg(long)]
    theme: Option<String>,

    /// Key to look up (for `inspect_key`).
    #[arg(long = "key")]
    inspect_key: Option<String>,

    /// Emit extra before/after diagnostics.
    #[arg(long)]
    debug: bool,

    /// Directory holding the per-scope settings documents.
    #[arg(long, default_value = "themesmith-data")]
    store_dir: PathBuf,

    /// JSON file mapping site slugs to `{ "id": n, "theme": "slug" }`.
    #[arg(long)]
    sites: Option<PathBuf>,
}

#[derive(Debug, Deserialize)]
struct SiteEntry {
    id: u64,
    #[serde(default)]
    theme: Option<String>,
}

fn load_site_directory(path: Option<&PathBuf>) -> anyhow::Result<StaticSiteDirectory> {
    let mut directory = StaticSiteDirectory::new();
    let Some(path) = path else {
        return Ok(directory);
    };

    let serialized = fs::read_to_string(path)
        .with_context(|| format!("failed to read sites file {}", path.display()))?;
    let entries: HashMap<String, SiteEntry> = serde_json::from_str(&serialized)
        .with_context(|| format!("failed to parse sites file {}", path.display()))?;
    for (slug, entry) in entries {
        directory.register(
            &slug,
            Site {
                id: SiteId(entry.id),
                theme_slug: entry.theme,
            },
        );
    }
    Ok(directory)
}

fn main() -> anyhow::Result<()> {
    logging::init();
    let cli = Cli::parse();

    let store = FileStore::with_root(cli.store_dir.clone());
    let registry = PresetRegistry::builtin();
    let schema = SettingsSchema::from_registry(&registry);
    let sites = load_site_directory(cli.sites.as_ref())?;

    let dispatcher = ConfigCommandDispatcher::new(&store, &registry, &schema, &sites);
    let payload = CommandPayload {
        action: cli.action,
        target_preset: cli.target_preset,
        site: cli.site,
        theme: cli.theme,
        debug: cli.debug,
        inspect_key: cli.inspect_key,
    };

    let messages = dispatcher.dispatch(&payload);
    let mut failed = false;
    for message in &messages {
        let tag = match message.severity {
            Severity::Success => "ok",
            Severity::Warning => "warn",
            Severity::Error => {
                failed = true;
                "error"
            }
        };
        println!("[{tag}] {}", message.text);
    }

    if failed {
        std::process::exit(1);
    }
    Ok(())
}
