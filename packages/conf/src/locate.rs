//! Backing-file location resolution.
//!
//! Precedence: an explicit `cwd` wins; otherwise a project name (given
//! directly, or read from the nearest `Cargo.toml` above `base_dir`)
//! selects a directory under the platform's per-user config root.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::Error;
use crate::options::Options;

const DEFAULT_CONFIG_NAME: &str = "config";

/// Resolve the backing-file path for `options`.
///
/// Always yields an absolute path: a relative `cwd` is anchored to the
/// process working directory here, at construction, so the handle's
/// target cannot drift if the process later changes directory. Pure
/// path computation apart from the manifest walk; the chosen location
/// is not created or checked here.
pub(crate) fn resolve(options: &Options) -> Result<PathBuf, Error> {
    let config_name = options
        .config_name
        .as_deref()
        .unwrap_or(DEFAULT_CONFIG_NAME);
    let file_name = format!("{}.json", config_name);

    if let Some(cwd) = &options.cwd {
        return Ok(absolute(cwd)?.join(file_name));
    }

    let project = match (&options.project_name, &options.base_dir) {
        (Some(name), _) => name.clone(),
        (None, Some(base)) => project_name_from_manifest(base)?,
        (None, None) => {
            return Err(Error::Unresolvable {
                message: "no cwd, project_name, or base_dir given".to_string(),
            });
        }
    };

    let Some(config_root) = dirs::config_dir() else {
        return Err(Error::Unresolvable {
            message: "no per-user configuration directory on this platform".to_string(),
        });
    };

    Ok(config_root.join(project).join(file_name))
}

fn absolute(dir: &Path) -> Result<PathBuf, Error> {
    if dir.is_absolute() {
        return Ok(dir.to_path_buf());
    }
    let current = std::env::current_dir().map_err(|err| Error::Unresolvable {
        message: format!("cannot anchor relative cwd {}: {}", dir.display(), err),
    })?;
    Ok(current.join(dir))
}

/// Read `[package] name` from the nearest `Cargo.toml` at or above
/// `start`.
///
/// The nearest manifest decides: one that cannot be read or parsed, or
/// that carries no package name, fails resolution rather than continuing
/// the walk.
fn project_name_from_manifest(start: &Path) -> Result<String, Error> {
    let mut dir = start;
    loop {
        let manifest = dir.join("Cargo.toml");
        if manifest.exists() {
            return read_package_name(&manifest);
        }
        match dir.parent() {
            Some(parent) => dir = parent,
            None => {
                return Err(Error::Unresolvable {
                    message: format!("no Cargo.toml at or above {}", start.display()),
                });
            }
        }
    }
}

fn read_package_name(manifest: &Path) -> Result<String, Error> {
    let text = fs::read_to_string(manifest).map_err(|err| Error::Unresolvable {
        message: format!("failed to read {}: {}", manifest.display(), err),
    })?;
    let parsed: toml::Value = text.parse().map_err(|err| Error::Unresolvable {
        message: format!("failed to parse {}: {}", manifest.display(), err),
    })?;

    match parsed
        .get("package")
        .and_then(|package| package.get("name"))
        .and_then(toml::Value::as_str)
    {
        Some(name) => Ok(name.to_string()),
        None => Err(Error::Unresolvable {
            message: format!("{} carries no package name", manifest.display()),
        }),
    }
}
