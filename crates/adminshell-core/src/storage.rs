//! Durable key-value storage using redb.
//!
//! This is the shell's analogue of browser local storage: string keys,
//! string (JSON) values, one flat namespace. Stores persist their state
//! under fixed keys:
//! - `theme-config` - theme mode and primary color
//! - `app-store` - persisted subset of the application store
//! - `user-store` - persisted subset of the session store

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use parking_lot::RwLock;
use redb::{Database, ReadableTable, TableDefinition};

use crate::error::ShellResult;

// Table definitions
const LOCAL_STORAGE_TABLE: TableDefinition<&str, &str> = TableDefinition::new("local_storage");

/// String key-value storage shared by the theme subsystem and the stores.
pub trait KeyValueStore: Send + Sync {
    /// Returns `None` when the key has never been written.
    fn get_item(&self, key: &str) -> ShellResult<Option<String>>;

    /// Insert or overwrite a value.
    fn set_item(&self, key: &str, value: &str) -> ShellResult<()>;

    /// Remove a key. Removing a missing key is not an error.
    fn remove_item(&self, key: &str) -> ShellResult<()>;
}

/// Storage layer using redb for ACID-compliant persistence
#[derive(Clone)]
pub struct Storage {
    db: Arc<RwLock<Database>>,
}

impl Storage {
    /// Create a new storage instance at the given path.
    ///
    /// This will:
    /// - Create the database directory if it doesn't exist
    /// - Initialize the database file
    /// - Create the key-value table
    pub fn new(path: impl AsRef<Path>) -> ShellResult<Self> {
        let path = path.as_ref();

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let db = Database::create(path)?;

        let write_txn = db.begin_write()?;
        {
            let _ = write_txn.open_table(LOCAL_STORAGE_TABLE)?;
        }
        write_txn.commit()?;

        tracing::debug!(path = %path.display(), "Opened storage");

        Ok(Self {
            db: Arc::new(RwLock::new(db)),
        })
    }

    /// All stored keys, in key order.
    pub fn keys(&self) -> ShellResult<Vec<String>> {
        let db = self.db.read();
        let read_txn = db.begin_read()?;
        let table = read_txn.open_table(LOCAL_STORAGE_TABLE)?;

        let mut keys = Vec::new();
        for entry in table.iter()? {
            let (key, _) = entry?;
            keys.push(key.value().to_string());
        }
        Ok(keys)
    }
}

impl KeyValueStore for Storage {
    fn get_item(&self, key: &str) -> ShellResult<Option<String>> {
        let db = self.db.read();
        let read_txn = db.begin_read()?;
        let table = read_txn.open_table(LOCAL_STORAGE_TABLE)?;

        Ok(table.get(key)?.map(|v| v.value().to_string()))
    }

    fn set_item(&self, key: &str, value: &str) -> ShellResult<()> {
        let db = self.db.read();
        let write_txn = db.begin_write()?;
        {
            let mut table = write_txn.open_table(LOCAL_STORAGE_TABLE)?;
            table.insert(key, value)?;
        }
        write_txn.commit()?;
        Ok(())
    }

    fn remove_item(&self, key: &str) -> ShellResult<()> {
        let db = self.db.read();
        let write_txn = db.begin_write()?;
        {
            let mut table = write_txn.open_table(LOCAL_STORAGE_TABLE)?;
            table.remove(key)?;
        }
        write_txn.commit()?;
        Ok(())
    }
}

/// Non-durable store for tests and ephemeral sessions.
#[derive(Debug, Default)]
pub struct MemoryStore {
    items: RwLock<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.items.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.read().is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn get_item(&self, key: &str) -> ShellResult<Option<String>> {
        Ok(self.items.read().get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> ShellResult<()> {
        self.items.write().insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> ShellResult<()> {
        self.items.write().remove(key);
        Ok(())
    }
}

/// Read and deserialize a JSON value stored under `key`.
pub fn load_json<T, S>(store: &S, key: &str) -> ShellResult<Option<T>>
where
    T: serde::de::DeserializeOwned,
    S: KeyValueStore + ?Sized,
{
    match store.get_item(key)? {
        Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
        None => Ok(None),
    }
}

/// Serialize `value` as JSON and store it under `key`.
pub fn save_json<T, S>(store: &S, key: &str, value: &T) -> ShellResult<()>
where
    T: serde::Serialize + ?Sized,
    S: KeyValueStore + ?Sized,
{
    let raw = serde_json::to_string(value)?;
    store.set_item(key, &raw)
}
