//! The asynchronous store handle.
//!
//! Enable the `async` feature to use it:
//!
//! ```toml
//! [dependencies]
//! dotconf = { version = "0.1", features = ["async"] }
//! ```
//!
//! `AsyncConfig` covers reads and writes: `get`, `set`, their typed and
//! multi-key forms, and the whole-store `load_store`/`save_store` pair.
//! Bookkeeping operations (`has`, `delete`, `clear`, `len`, `entries`)
//! live on the synchronous `Config` handle only; a sync handle at the
//! same path sees the same file.

use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use dotconf_keypath as keypath;
use dotconf_keypath::KeyPath;

use crate::disk;
use crate::error::Error;
use crate::locate;
use crate::options::Options;
use crate::store::{json_type_name, merge_defaults};

/// The asynchronous counterpart of `Config`.
///
/// Same file format, same path resolution, same whole-file semantics;
/// the file I/O suspends instead of blocking, and in-memory work never
/// suspends. Sequentially awaited operations on one handle observe each
/// other's writes; overlapping calls race the way separate processes
/// would.
///
/// # Example
///
/// ```rust,no_run
/// use dotconf::{AsyncConfig, Options};
/// use serde_json::json;
///
/// # async fn example() -> Result<(), dotconf::Error> {
/// let config = AsyncConfig::open(Options::new().project_name("my-tool")).await?;
/// config.set("server.port", 8080).await?;
/// assert_eq!(config.get("server.port").await?, Some(json!(8080)));
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug)]
pub struct AsyncConfig {
    path: PathBuf,
}

impl AsyncConfig {
    /// Resolve the backing file, merge `defaults` beneath persisted
    /// values, and write the result back.
    ///
    /// The same construction contract as `Config::new`, awaited: the
    /// merge happens exactly once, and the file exists once `open`
    /// returns.
    pub async fn open(options: Options) -> Result<AsyncConfig, Error> {
        let path = locate::resolve(&options)?;
        let config = AsyncConfig { path };
        let merged = merge_defaults(options.defaults, config.load_store().await?);
        config.save_store(&merged).await?;
        Ok(config)
    }

    /// Get the value at `key`, a dot-delimited path into the store.
    pub async fn get(&self, key: &str) -> Result<Option<Value>, Error> {
        let store = self.load_store().await?;
        Ok(keypath::get(&store, &KeyPath::new(key)).cloned())
    }

    /// Get the value at `key`, or `default` when the path is unset.
    pub async fn get_or(&self, key: &str, default: Value) -> Result<Value, Error> {
        Ok(self.get(key).await?.unwrap_or(default))
    }

    /// Get the value at `key` deserialized into `T`.
    pub async fn get_as<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, Error> {
        match self.get(key).await? {
            Some(value) => Ok(Some(serde_json::from_value(value)?)),
            None => Ok(None),
        }
    }

    /// Set `value` at `key`, creating intermediate objects along the
    /// path. One load, one save, both awaited.
    pub async fn set<V: Serialize>(&self, key: &str, value: V) -> Result<(), Error> {
        let value = serde_json::to_value(value)?;
        let mut store = self.load_store().await?;
        keypath::set(&mut store, &KeyPath::new(key), value);
        self.save_store(&store).await
    }

    /// Apply several assignments in one load/save cycle.
    ///
    /// Same contract as `Config::set_many`: `assignments` must serialize
    /// to a JSON object, checked before any I/O.
    pub async fn set_many<T: Serialize>(&self, assignments: T) -> Result<(), Error> {
        let assignments = match serde_json::to_value(assignments)? {
            Value::Object(map) => map,
            other => {
                return Err(Error::InvalidAssignments {
                    found: json_type_name(&other),
                });
            }
        };

        let mut store = self.load_store().await?;
        for (key, value) in assignments {
            keypath::set(&mut store, &KeyPath::new(&key), value);
        }
        self.save_store(&store).await
    }

    /// Read the entire store from disk.
    ///
    /// Same contract as `Config::load_store`: missing files read as the
    /// empty store, unparsable files too.
    pub async fn load_store(&self) -> Result<Value, Error> {
        disk::load_async(&self.path).await
    }

    /// Replace the entire store on disk.
    pub async fn save_store(&self, store: &Value) -> Result<(), Error> {
        disk::save_async(&self.path, store).await
    }

    /// The resolved backing-file path, fixed for the handle's lifetime.
    pub fn path(&self) -> &Path {
        &self.path
    }
}
