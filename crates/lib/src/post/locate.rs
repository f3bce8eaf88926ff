//! Locating host artifacts inside a realized build root.

use std::io;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::config::Variant;
use crate::execute::ExecuteError;
use crate::platform::Platform;

/// The build directory of the platform that runs natively on this host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostDir {
  pub platform: Platform,
  pub path: PathBuf,
}

impl HostDir {
  /// Directory holding artifacts of `subdir` (e.g. `bin`, `src`).
  ///
  /// Multi-configuration platforms nest artifacts one level deeper, under a
  /// directory named after the variant.
  pub fn artifact_dir(&self, subdir: &str, variant: Variant) -> PathBuf {
    let dir = self.path.join(subdir);
    if self.platform.kind().is_multi_config() {
      dir.join(variant.as_str())
    } else {
      dir
    }
  }

  /// Path of executable `name` inside [`artifact_dir`](Self::artifact_dir).
  pub fn executable(&self, subdir: &str, name: &str, variant: Variant) -> PathBuf {
    self
      .artifact_dir(subdir, variant)
      .join(format!("{name}{}", self.platform.exe_suffix()))
  }
}

/// Find the first entry of `build_root` (in sorted order) that is the build
/// directory of `host`.
///
/// A missing build root, or one without a matching entry, yields `None`.
pub fn find_host_dir(build_root: &Path, host: Option<Platform>) -> Result<Option<HostDir>, ExecuteError> {
  let Some(host) = host else {
    return Ok(None);
  };

  let entries = match std::fs::read_dir(build_root) {
    Ok(entries) => entries,
    Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(None),
    Err(source) => {
      return Err(ExecuteError::ReadDir {
        path: build_root.to_path_buf(),
        source,
      });
    }
  };

  let mut names = Vec::new();
  for entry in entries {
    let entry = entry.map_err(|source| ExecuteError::ReadDir {
      path: build_root.to_path_buf(),
      source,
    })?;
    if entry.path().is_dir() {
      names.push(entry.file_name());
    }
  }
  names.sort();

  let found = names
    .into_iter()
    .find(|name| name.to_str() == Some(host.dir_name()))
    .map(|name| HostDir {
      platform: host,
      path: build_root.join(name),
    });

  debug!(host = %host, found = ?found.as_ref().map(|d| &d.path), "looked up host build directory");
  Ok(found)
}
