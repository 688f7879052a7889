//! Preset and settings-resolution engine for site theme configuration.
//!
//! An administrator command (action name + payload) enters the
//! [`dispatch::ConfigCommandDispatcher`], which validates inputs, resolves
//! the target scope and invokes a [`service::PresetService`] operation; the
//! service reads and writes through the [`store::SettingsStore`] with the
//! legacy-format fallbacks in [`resolve`], validating values via
//! [`schema::SettingsSchema`]. Outcomes come back as user-facing messages.

pub mod dispatch;
pub mod error;
pub mod logging;
pub mod preset;
pub mod report;
pub mod resolve;
pub mod schema;
pub mod service;
pub mod site;
pub mod store;

pub use dispatch::{Action, CommandPayload, ConfigCommandDispatcher, Message, Severity};
pub use error::{AppError, AppResult};
pub use preset::{Preset, PresetRegistry};
pub use schema::SettingsSchema;
pub use service::{PresetService, ThemeTarget};
pub use site::{Scope, Site, SiteDirectory, SiteId, StaticSiteDirectory};
pub use store::{FileStore, MemoryStore, SettingsStore};
