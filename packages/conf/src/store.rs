//! The synchronous store handle.

use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};

use dotconf_keypath as keypath;
use dotconf_keypath::KeyPath;

use crate::disk;
use crate::error::Error;
use crate::locate;
use crate::options::Options;

/// A persistent key-value configuration store backed by one JSON file.
///
/// The handle holds only the resolved file path. Every operation loads
/// the file, works on the parsed tree in memory, and (for mutations)
/// writes the whole tree back before returning, so the file holds valid
/// JSON after every completed operation. Keys are dot-delimited paths:
/// `"server.port"` addresses `store["server"]["port"]`, and intermediate
/// objects appear on write.
///
/// Nothing here locks the file. Two handles (or two processes) writing
/// at the same time race, and the last whole-file write wins.
///
/// # Example
///
/// ```rust,no_run
/// use dotconf::{Config, Options};
/// use serde_json::json;
///
/// let config = Config::new(Options::new().project_name("my-tool"))?;
/// config.set("server.port", 8080)?;
/// assert_eq!(config.get("server.port")?, Some(json!(8080)));
/// # Ok::<(), dotconf::Error>(())
/// ```
#[derive(Clone, Debug)]
pub struct Config {
    path: PathBuf,
}

impl Config {
    /// Resolve the backing file, merge `defaults` beneath whatever is
    /// already persisted, and write the result back.
    ///
    /// The merge happens exactly once, here: top-level default keys fill
    /// gaps, persisted values win, nested values are not merged.
    /// Construction always persists, so the file and its directory exist
    /// once `new` returns.
    pub fn new(options: Options) -> Result<Config, Error> {
        let path = locate::resolve(&options)?;
        let config = Config { path };
        let merged = merge_defaults(options.defaults, config.load_store()?);
        config.save_store(&merged)?;
        Ok(config)
    }

    /// Get the value at `key`, a dot-delimited path into the store.
    ///
    /// `Ok(None)` when the path is unset; an explicit `null` in the file
    /// is `Some(Value::Null)`, not `None`.
    pub fn get(&self, key: &str) -> Result<Option<Value>, Error> {
        let store = self.load_store()?;
        Ok(keypath::get(&store, &KeyPath::new(key)).cloned())
    }

    /// Get the value at `key`, or `default` when the path is unset.
    pub fn get_or(&self, key: &str, default: Value) -> Result<Value, Error> {
        Ok(self.get(key)?.unwrap_or(default))
    }

    /// Get the value at `key` deserialized into `T`.
    ///
    /// `Ok(None)` when the path is unset; `Error::Json` when a value is
    /// present but does not fit `T`.
    pub fn get_as<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, Error> {
        match self.get(key)? {
            Some(value) => Ok(Some(serde_json::from_value(value)?)),
            None => Ok(None),
        }
    }

    /// Set `value` at `key`, creating intermediate objects along the
    /// path. One load, one save.
    pub fn set<V: Serialize>(&self, key: &str, value: V) -> Result<(), Error> {
        let value = serde_json::to_value(value)?;
        let mut store = self.load_store()?;
        keypath::set(&mut store, &KeyPath::new(key), value);
        self.save_store(&store)
    }

    /// Apply several assignments in one load/save cycle.
    ///
    /// `assignments` must serialize to a JSON object; each of its keys
    /// is itself a dot-delimited path. Anything else is rejected with
    /// `Error::InvalidAssignments` before the store is touched.
    pub fn set_many<T: Serialize>(&self, assignments: T) -> Result<(), Error> {
        let assignments = match serde_json::to_value(assignments)? {
            Value::Object(map) => map,
            other => {
                return Err(Error::InvalidAssignments {
                    found: json_type_name(&other),
                });
            }
        };

        let mut store = self.load_store()?;
        for (key, value) in assignments {
            keypath::set(&mut store, &KeyPath::new(&key), value);
        }
        self.save_store(&store)
    }

    /// Check whether `key` resolves to a value.
    pub fn has(&self, key: &str) -> Result<bool, Error> {
        Ok(keypath::has(&self.load_store()?, &KeyPath::new(key)))
    }

    /// Remove the value at `key`.
    ///
    /// Removing an unset path leaves the content as it was, though the
    /// file is still rewritten.
    pub fn delete(&self, key: &str) -> Result<(), Error> {
        let mut store = self.load_store()?;
        keypath::delete(&mut store, &KeyPath::new(key));
        self.save_store(&store)
    }

    /// Reset the store to the empty object.
    pub fn clear(&self) -> Result<(), Error> {
        self.save_store(&disk::empty_store())
    }

    /// Number of top-level keys. A store whose root is not an object has
    /// none.
    pub fn len(&self) -> Result<usize, Error> {
        let store = self.load_store()?;
        Ok(store.as_object().map_or(0, |map| map.len()))
    }

    /// Check whether the store has no top-level keys.
    pub fn is_empty(&self) -> Result<bool, Error> {
        Ok(self.len()? == 0)
    }

    /// Iterate the top-level entries as they were at the time of the
    /// call.
    ///
    /// The iterator owns a snapshot; call `entries` again to observe
    /// later writes. Iteration starts with a file load, which is why
    /// this is a fallible method rather than an `IntoIterator` impl.
    pub fn entries(&self) -> Result<Entries, Error> {
        let map = match self.load_store()? {
            Value::Object(map) => map,
            _ => Map::new(),
        };
        Ok(Entries {
            inner: map.into_iter(),
        })
    }

    /// Read the entire store from disk.
    ///
    /// This is the read half of every other operation, public so the
    /// whole-file cost and the failure points stay visible. A missing
    /// file reads as the empty store and creates the parent directory.
    /// Unparsable content *also* reads as the empty store: corruption is
    /// not reported, and the broken content is overwritten at the next
    /// save. Callers that need to inspect a broken file must copy it
    /// before constructing a handle, since construction itself saves.
    pub fn load_store(&self) -> Result<Value, Error> {
        disk::load(&self.path)
    }

    /// Replace the entire store on disk.
    ///
    /// The write half of every mutating operation: `store` is encoded as
    /// tab-indented JSON and written over whatever was there.
    pub fn save_store(&self, store: &Value) -> Result<(), Error> {
        disk::save(&self.path, store)
    }

    /// The resolved backing-file path, fixed for the handle's lifetime.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Owning iterator over a store's top-level entries.
///
/// Created by `Config::entries`; yields `(key, value)` pairs from the
/// snapshot taken when it was created.
pub struct Entries {
    inner: serde_json::map::IntoIter,
}

impl Iterator for Entries {
    type Item = (String, Value);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

/// Merge `defaults` beneath a persisted store: default keys fill gaps,
/// persisted top-level keys win wholesale. A non-object store has no top
/// level to fill, so it comes back untouched.
pub(crate) fn merge_defaults(defaults: Option<Map<String, Value>>, persisted: Value) -> Value {
    let Some(defaults) = defaults else {
        return persisted;
    };
    match persisted {
        Value::Object(existing) => {
            let mut merged = defaults;
            for (key, value) in existing {
                merged.insert(key, value);
            }
            Value::Object(merged)
        }
        other => other,
    }
}

pub(crate) fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
