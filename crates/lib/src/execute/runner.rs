//! External process invocation.
//!
//! Every external step (generate, compile, tests, benchmarks, flashing, demo)
//! is described as an [`Invocation`] and handed to a [`CommandRunner`]. The
//! system runner blocks until the child exits; there is no timeout.

use std::ffi::{OsStr, OsString};
use std::fmt;
use std::path::{Path, PathBuf};
use std::process::Command;

use tracing::{debug, info};

use super::types::ExecuteError;

/// A single external process call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
  pub program: String,
  pub args: Vec<OsString>,
  pub cwd: PathBuf,
}

impl Invocation {
  pub fn new(program: impl Into<String>, cwd: impl AsRef<Path>) -> Self {
    Self {
      program: program.into(),
      args: Vec::new(),
      cwd: cwd.as_ref().to_path_buf(),
    }
  }

  pub fn arg(mut self, arg: impl AsRef<OsStr>) -> Self {
    self.args.push(arg.as_ref().to_os_string());
    self
  }

  pub fn args<I, S>(mut self, args: I) -> Self
  where
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
  {
    self.args.extend(args.into_iter().map(|a| a.as_ref().to_os_string()));
    self
  }

  /// Arguments as lossy strings.
  #[cfg(test)]
  pub fn args_lossy(&self) -> Vec<String> {
    self.args.iter().map(|a| a.to_string_lossy().into_owned()).collect()
  }
}

impl fmt::Display for Invocation {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.program)?;
    for arg in &self.args {
      let arg = arg.to_string_lossy();
      if arg.contains(char::is_whitespace) {
        write!(f, " \"{arg}\"")?;
      } else {
        write!(f, " {arg}")?;
      }
    }
    Ok(())
  }
}

/// Runs invocations to completion, one at a time.
pub trait CommandRunner {
  /// Run `invocation` and wait for it. Any non-zero exit is an error.
  fn run(&mut self, invocation: &Invocation) -> Result<(), ExecuteError>;
}

/// Runs invocations as real child processes with inherited stdio.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
  fn run(&mut self, invocation: &Invocation) -> Result<(), ExecuteError> {
    info!(command = %invocation, cwd = %invocation.cwd.display(), "running");

    let status = Command::new(&invocation.program)
      .args(&invocation.args)
      .current_dir(&invocation.cwd)
      .status()
      .map_err(|source| ExecuteError::Spawn {
        program: invocation.program.clone(),
        source,
      })?;

    debug!(program = %invocation.program, status = %status, "process exited");

    if !status.success() {
      return Err(ExecuteError::CommandFailed {
        command: invocation.to_string(),
        code: status.code(),
      });
    }
    Ok(())
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::util::testutil::shell_cmd;
  use tempfile::TempDir;

  fn shell(script: &str, cwd: &Path) -> Invocation {
    let (program, args) = shell_cmd(script);
    Invocation::new(program, cwd).args(args)
  }

  #[test]
  fn display_quotes_args_with_spaces() {
    let inv = Invocation::new("cmake", "/tmp")
      .args(["-G", "Unix Makefiles"])
      .arg("-DENABLE_TESTS=ON");
    assert_eq!(inv.to_string(), "cmake -G \"Unix Makefiles\" -DENABLE_TESTS=ON");
  }

  #[test]
  fn successful_command_is_ok() {
    let temp = TempDir::new().unwrap();
    SystemRunner.run(&shell("exit 0", temp.path())).unwrap();
  }

  #[test]
  fn failure_carries_exit_code() {
    let temp = TempDir::new().unwrap();
    let err = SystemRunner.run(&shell("exit 3", temp.path())).unwrap_err();
    assert!(matches!(err, ExecuteError::CommandFailed { code: Some(3), .. }));
    assert_eq!(err.exit_code(), Some(3));
  }

  #[test]
  fn runs_in_requested_directory() {
    let temp = TempDir::new().unwrap();
    let sub = temp.path().join("sub");
    std::fs::create_dir(&sub).unwrap();

    let (program, args) = crate::util::testutil::touch_file("cwd_marker");
    SystemRunner
      .run(&Invocation::new(program, &sub).args(args))
      .unwrap();

    assert!(sub.join("cwd_marker").exists());
  }

  #[test]
  fn missing_program_is_a_spawn_error() {
    let temp = TempDir::new().unwrap();
    let err = SystemRunner
      .run(&Invocation::new("barelybuild-no-such-program", temp.path()))
      .unwrap_err();
    assert!(matches!(err, ExecuteError::Spawn { .. }));
  }
}
