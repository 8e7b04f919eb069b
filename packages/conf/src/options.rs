//! Construction options for store handles.

use std::path::PathBuf;

use serde_json::{Map, Value};

/// Options controlling where a store's backing file lives and what it
/// starts out containing.
///
/// All fields are optional, but the file location must be resolvable:
/// either `cwd` is given, or a project name is (directly, or inferred
/// from the nearest `Cargo.toml` above `base_dir`). `config_name`
/// defaults to `"config"`.
///
/// # Example
///
/// ```rust,no_run
/// use dotconf::{Config, Options};
///
/// let config = Config::new(Options::new().project_name("my-tool"))?;
/// # Ok::<(), dotconf::Error>(())
/// ```
#[derive(Clone, Debug, Default)]
pub struct Options {
    pub(crate) cwd: Option<PathBuf>,
    pub(crate) project_name: Option<String>,
    pub(crate) config_name: Option<String>,
    pub(crate) base_dir: Option<PathBuf>,
    pub(crate) defaults: Option<Map<String, Value>>,
}

impl Options {
    /// Create an empty set of options.
    pub fn new() -> Self {
        Options::default()
    }

    /// Put the backing file directly under `dir` instead of deriving a
    /// per-user location. Takes precedence over everything else.
    pub fn cwd(mut self, dir: impl Into<PathBuf>) -> Self {
        self.cwd = Some(dir.into());
        self
    }

    /// Name the project whose per-user configuration directory holds the
    /// backing file.
    pub fn project_name(mut self, name: impl Into<String>) -> Self {
        self.project_name = Some(name.into());
        self
    }

    /// File name for the backing file, without the `.json` extension.
    /// Defaults to `"config"`.
    pub fn config_name(mut self, name: impl Into<String>) -> Self {
        self.config_name = Some(name.into());
        self
    }

    /// Infer the project name from the nearest `Cargo.toml` at or above
    /// `dir`. Only consulted when `project_name` is not given.
    pub fn base_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.base_dir = Some(dir.into());
        self
    }

    /// Top-level defaults merged beneath persisted values at
    /// construction. Persisted values win; the merge is shallow.
    pub fn defaults(mut self, defaults: Map<String, Value>) -> Self {
        self.defaults = Some(defaults);
        self
    }
}
