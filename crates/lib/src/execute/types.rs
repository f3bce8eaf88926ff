//! Types for target execution.
//!
//! This module defines the error type shared by the executor and the
//! post-build runner, and the report returned by a successful run.

use std::path::PathBuf;

use serde::Serialize;
use thiserror::Error;

use super::clean::CleanError;

/// Errors that can occur while running targets or post-build actions.
///
/// Every variant is fatal. The run stops at the first one.
#[derive(Debug, Error)]
pub enum ExecuteError {
  /// An external process exited unsuccessfully.
  #[error("command failed with exit code {code:?}: {command}")]
  CommandFailed { command: String, code: Option<i32> },

  /// An external process could not be started at all.
  #[error("failed to start {program}")]
  Spawn {
    program: String,
    #[source]
    source: std::io::Error,
  },

  /// A target's build directory could not be created.
  #[error("failed to create build directory {path}")]
  CreateDir {
    path: PathBuf,
    #[source]
    source: std::io::Error,
  },

  /// A directory a post-build action depends on does not exist.
  #[error("expected directory does not exist: {0}")]
  MissingDirectory(PathBuf),

  /// The build root could not be listed.
  #[error("failed to read build directory {path}")]
  ReadDir {
    path: PathBuf,
    #[source]
    source: std::io::Error,
  },

  /// Asking the user for confirmation failed.
  #[error("confirmation prompt failed")]
  Prompt(#[source] std::io::Error),

  /// Removing the previous build failed.
  #[error(transparent)]
  Clean(#[from] CleanError),
}

impl ExecuteError {
  /// Exit code of the failed external process, if that is what went wrong.
  pub fn exit_code(&self) -> Option<i32> {
    match self {
      ExecuteError::CommandFailed { code, .. } => *code,
      _ => None,
    }
  }
}

/// Which steps ran for one target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TargetResult {
  pub name: String,
  pub build_dir: PathBuf,
  pub generated: bool,
  pub compiled: bool,
}

/// Outcome of a successful executor run.
///
/// Failures never produce a report; they surface as [`ExecuteError`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ExecutionReport {
  /// Whether the previous build root was removed first.
  pub cleaned: bool,
  /// Targets processed, in plan order.
  pub targets: Vec<TargetResult>,
}

impl ExecutionReport {
  pub fn is_noop(&self) -> bool {
    self.targets.is_empty()
  }
}
