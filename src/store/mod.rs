use std::cell::RefCell;
use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde_json::Value;
use thiserror::Error;

use crate::site::Scope;

const GLOBAL_DOCUMENT: &str = "global.json";
const SITE_DOCUMENT_PREFIX: &str = "site-";

pub type StoreResult<T> = std::result::Result<T, StorageError>;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("failed to read settings document: {path}")]
    ReadDocument { path: PathBuf, source: io::Error },
    #[error("failed to write settings document: {path}")]
    WriteDocument { path: PathBuf, source: io::Error },
    #[error("settings document is not a JSON object: {path}")]
    MalformedDocument { path: PathBuf },
    #[error("failed to encode or decode a settings payload")]
    Codec(#[from] serde_json::Error),
}

/// Key/value persistence over the two scope namespaces.
///
/// Every call may hit the backing store; no caching is promised. Writes to
/// the same scope+key race last-write-wins, which callers accept.
pub trait SettingsStore {
    fn get(&self, scope: Scope, key: &str) -> StoreResult<Option<Value>>;
    fn set(&self, scope: Scope, key: &str, value: &Value) -> StoreResult<()>;
}

/// File-backed store: one JSON object document per scope under a root
/// directory. `set` rewrites the whole scope document.
#[derive(Debug, Clone)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    pub const fn with_root(root: PathBuf) -> Self {
        Self { root }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn document_path(&self, scope: Scope) -> PathBuf {
        let name = match scope {
            Scope::Global => GLOBAL_DOCUMENT.to_string(),
            Scope::Site(id) => format!("{SITE_DOCUMENT_PREFIX}{id}.json"),
        };
        self.root.join(name)
    }

    fn read_document(&self, scope: Scope) -> StoreResult<serde_json::Map<String, Value>> {
        let path = self.document_path(scope);
        if !path.exists() {
            return Ok(serde_json::Map::new());
        }

        let serialized =
            fs::read_to_string(&path).map_err(|source| StorageError::ReadDocument {
                path: path.clone(),
                source,
            })?;
        match serde_json::from_str::<Value>(&serialized)? {
            Value::Object(map) => Ok(map),
            _ => Err(StorageError::MalformedDocument { path }),
        }
    }

    fn write_document(
        &self,
        scope: Scope,
        document: &serde_json::Map<String, Value>,
    ) -> StoreResult<()> {
        let path = self.document_path(scope);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|source| StorageError::WriteDocument {
                path: path.clone(),
                source,
            })?;
        }

        let serialized = serde_json::to_string_pretty(&Value::Object(document.clone()))?;
        fs::write(&path, serialized).map_err(|source| StorageError::WriteDocument {
            path: path.clone(),
            source,
        })
    }
}

impl SettingsStore for FileStore {
    fn get(&self, scope: Scope, key: &str) -> StoreResult<Option<Value>> {
        Ok(self.read_document(scope)?.get(key).cloned())
    }

    fn set(&self, scope: Scope, key: &str, value: &Value) -> StoreResult<()> {
        let mut document = self.read_document(scope)?;
        document.insert(key.to_string(), value.clone());
        self.write_document(scope, &document)
    }
}

/// In-memory store for fixtures and embedding.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RefCell<HashMap<(Scope, String), Value>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of keys stored across all scopes.
    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }
}

impl SettingsStore for MemoryStore {
    fn get(&self, scope: Scope, key: &str) -> StoreResult<Option<Value>> {
        Ok(self.entries.borrow().get(&(scope, key.to_string())).cloned())
    }

    fn set(&self, scope: Scope, key: &str, value: &Value) -> StoreResult<()> {
        self.entries
            .borrow_mut()
            .insert((scope, key.to_string()), value.clone());
        Ok(())
    }
}
