//! A persistent key-value configuration store backed by a single JSON
//! file.
//!
//! For command-line tools and local applications that want a settings
//! file without a database:
//! - `Config`: the synchronous handle. Every operation is one whole-file
//!   load, an in-memory change, and (for mutations) one whole-file save.
//! - `AsyncConfig`: asynchronous reads and writes over the same file
//!   format (behind the `async` feature).
//! - `Options`: where the backing file lives and which defaults seed it.
//!
//! Keys are dot-delimited paths: `"server.port"` addresses
//! `store["server"]["port"]`, and intermediate objects appear on write.
//! The file is pretty-printed, tab-indented JSON, created lazily.
//! Missing and unparsable files read as the empty store.
//!
//! # Example
//!
//! ```rust,no_run
//! use dotconf::{Config, Options};
//! use serde_json::json;
//!
//! let config = Config::new(Options::new().project_name("my-tool"))?;
//!
//! config.set("server.port", 8080)?;
//! assert_eq!(config.get("server.port")?, Some(json!(8080)));
//! assert!(config.has("server")?);
//!
//! config.delete("server.port")?;
//! assert_eq!(config.get_or("server.port", json!(3000))?, json!(3000));
//! # Ok::<(), dotconf::Error>(())
//! ```

mod disk;
mod error;
mod locate;
mod options;
mod store;

pub use error::Error;
pub use options::Options;
pub use store::{Config, Entries};

// Re-export the addressing layer for callers that work on documents
// directly.
pub use dotconf_keypath::KeyPath;

// Async support
#[cfg(feature = "async")]
mod async_store;

#[cfg(feature = "async")]
pub use async_store::AsyncConfig;
