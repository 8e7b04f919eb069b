//! Whole-file JSON load and save.
//!
//! The store travels as one pretty-printed, tab-indented JSON file. A
//! missing file reads as the empty store (and brings its directory into
//! existence); a file that fails to parse also reads as the empty store,
//! so the broken content is silently replaced at the next save.

use std::fs;
use std::io;
use std::path::Path;

use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use serde_json::{Map, Serializer, Value};

use crate::error::Error;

/// Read the store from `path`.
///
/// A missing file yields the empty store and creates the parent
/// directory so a later save has somewhere to land. Content that does
/// not parse as JSON, invalid UTF-8 included, also yields the empty
/// store, logged at warn level. Any other I/O failure propagates.
pub(crate) fn load(path: &Path) -> Result<Value, Error> {
    log::debug!("reading {}", path.display());
    match fs::read(path) {
        Ok(bytes) => Ok(parse(path, &bytes)),
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            ensure_parent(path)?;
            Ok(empty_store())
        }
        Err(err) => Err(Error::Io(err)),
    }
}

/// Write `store` to `path` as tab-indented JSON, replacing prior
/// content.
pub(crate) fn save(path: &Path, store: &Value) -> Result<(), Error> {
    ensure_parent(path)?;
    log::debug!("writing {}", path.display());
    fs::write(path, encode(store)?)?;
    Ok(())
}

/// Read the store from `path` without blocking the calling thread.
///
/// Same contract as `load`.
#[cfg(feature = "async")]
pub(crate) async fn load_async(path: &Path) -> Result<Value, Error> {
    log::debug!("reading {}", path.display());
    match tokio::fs::read(path).await {
        Ok(bytes) => Ok(parse(path, &bytes)),
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            ensure_parent_async(path).await?;
            Ok(empty_store())
        }
        Err(err) => Err(Error::Io(err)),
    }
}

/// Write `store` to `path` without blocking the calling thread.
///
/// Same contract as `save`.
#[cfg(feature = "async")]
pub(crate) async fn save_async(path: &Path, store: &Value) -> Result<(), Error> {
    ensure_parent_async(path).await?;
    log::debug!("writing {}", path.display());
    let encoded = encode(store)?;
    tokio::fs::write(path, encoded).await?;
    Ok(())
}

pub(crate) fn empty_store() -> Value {
    Value::Object(Map::new())
}

fn parse(path: &Path, bytes: &[u8]) -> Value {
    match serde_json::from_slice(bytes) {
        Ok(value) => value,
        Err(err) => {
            log::warn!("discarding unparsable {}: {}", path.display(), err);
            empty_store()
        }
    }
}

/// Serialize in the file format: pretty-printed with tab indentation, no
/// trailing newline.
fn encode(store: &Value) -> Result<Vec<u8>, Error> {
    let mut buf = Vec::new();
    let formatter = PrettyFormatter::with_indent(b"\t");
    let mut serializer = Serializer::with_formatter(&mut buf, formatter);
    store.serialize(&mut serializer)?;
    Ok(buf)
}

fn ensure_parent(path: &Path) -> Result<(), Error> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    Ok(())
}

#[cfg(feature = "async")]
async fn ensure_parent_async(path: &Path) -> Result<(), Error> {
    if let Some(parent) = path.parent() {
        tokio::fs::create_dir_all(parent).await?;
    }
    Ok(())
}
