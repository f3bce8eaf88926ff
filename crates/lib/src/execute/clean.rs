//! Removal of a previous build root.
//!
//! Entries are removed deepest first. When removal of an entry is refused
//! for lack of permission, write access is restored on the entry and its
//! parent directory and the removal is retried once. Any other failure is
//! fatal.

use std::io;
use std::path::{Path, PathBuf};

use tracing::{debug, info};
use walkdir::WalkDir;

/// Error while removing the build root.
#[derive(Debug, thiserror::Error)]
pub enum CleanError {
  #[error("failed to remove {path}")]
  Remove {
    path: PathBuf,
    #[source]
    source: io::Error,
  },

  #[error("failed to set permissions on {path}")]
  SetPermissions {
    path: PathBuf,
    #[source]
    source: io::Error,
  },

  #[error("failed to traverse directory {path}")]
  WalkDir {
    path: PathBuf,
    #[source]
    source: walkdir::Error,
  },
}

/// Recursively remove `root`. A missing root is not an error.
///
/// A symlinked root is unlinked; the directory it points to is left alone.
pub fn clean(root: &Path) -> Result<(), CleanError> {
  let metadata = match std::fs::symlink_metadata(root) {
    Ok(metadata) => metadata,
    Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(()),
    Err(source) => {
      return Err(CleanError::Remove {
        path: root.to_path_buf(),
        source,
      });
    }
  };

  if metadata.file_type().is_symlink() {
    info!(path = %root.display(), "removing symlinked build root");
    // Directory links on Windows are removed like directories.
    return remove_entry(root, cfg!(windows) && root.is_dir());
  }

  info!(path = %root.display(), "cleaning previous build");

  // Post-order so directories are empty by the time they are removed.
  for entry in WalkDir::new(root).contents_first(true) {
    let entry = entry.map_err(|source| CleanError::WalkDir {
      path: root.to_path_buf(),
      source,
    })?;
    remove_entry(entry.path(), entry.file_type().is_dir())?;
  }

  Ok(())
}

fn remove_entry(path: &Path, is_dir: bool) -> Result<(), CleanError> {
  let remove = || {
    if is_dir {
      std::fs::remove_dir(path)
    } else {
      std::fs::remove_file(path)
    }
  };

  match remove() {
    Ok(()) => Ok(()),
    Err(err) if err.kind() == io::ErrorKind::PermissionDenied => {
      debug!(path = %path.display(), "clearing read-only attribute and retrying");
      if let Some(parent) = path.parent() {
        make_writable(parent)?;
      }
      make_writable(path)?;
      remove().map_err(|source| CleanError::Remove {
        path: path.to_path_buf(),
        source,
      })
    }
    Err(source) => Err(CleanError::Remove {
      path: path.to_path_buf(),
      source,
    }),
  }
}

#[cfg(unix)]
fn make_writable(path: &Path) -> Result<(), CleanError> {
  use std::os::unix::fs::PermissionsExt;

  let metadata = std::fs::symlink_metadata(path).map_err(|source| CleanError::SetPermissions {
    path: path.to_path_buf(),
    source,
  })?;

  // Symlink permissions are meaningless and following them would touch the target.
  if metadata.file_type().is_symlink() {
    return Ok(());
  }

  let mut perms = metadata.permissions();
  perms.set_mode(perms.mode() | 0o700);
  std::fs::set_permissions(path, perms).map_err(|source| CleanError::SetPermissions {
    path: path.to_path_buf(),
    source,
  })
}

#[cfg(windows)]
fn make_writable(path: &Path) -> Result<(), CleanError> {
  let metadata = std::fs::symlink_metadata(path).map_err(|source| CleanError::SetPermissions {
    path: path.to_path_buf(),
    source,
  })?;

  let mut perms = metadata.permissions();
  #[allow(clippy::permissions_set_readonly_false)]
  perms.set_readonly(false);
  std::fs::set_permissions(path, perms).map_err(|source| CleanError::SetPermissions {
    path: path.to_path_buf(),
    source,
  })
}
