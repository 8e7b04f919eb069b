//! Dot-delimited key paths and nested access over JSON documents.
//!
//! This is the addressing layer for dotconf:
//! - `KeyPath`: a dot-delimited path (`"server.port"`), split once and
//!   carried as segments
//! - `get`/`set`/`has`/`delete`: navigate a `serde_json::Value` tree by
//!   key path, creating intermediate objects on write
//!
//! Traversal descends through JSON objects only; there is no array-index
//! syntax.
//!
//! # Example
//!
//! ```rust
//! use dotconf_keypath::{get, set, KeyPath};
//! use serde_json::json;
//!
//! let mut doc = json!({});
//! set(&mut doc, &KeyPath::new("server.port"), json!(8080));
//! assert_eq!(get(&doc, &KeyPath::new("server.port")), Some(&json!(8080)));
//! ```

mod access;
mod path;

pub use access::{delete, get, has, set};
pub use path::KeyPath;
