//! Shared test helpers for CLI integration tests.

#![allow(dead_code)]

use std::path::{Path, PathBuf};

use assert_cmd::Command;
use assert_cmd::cargo::cargo_bin_cmd;
use tempfile::TempDir;

/// Environment variables the CLI reads; cleared so the host cannot leak in.
const TOOL_VARS: [&str; 6] = [
  "ANDROID_NDK_HOME",
  "DAISY_TOOLCHAIN_PREFIX",
  "BARELYBUILD_CMAKE",
  "BARELYBUILD_CTEST",
  "BARELYBUILD_MAKE",
  "BARELYBUILD_PYTHON",
];

/// Get a Command for the barelybuild binary with a clean tool environment.
pub fn barelybuild_cmd() -> Command {
  let mut cmd = cargo_bin_cmd!("barelybuild");
  for var in TOOL_VARS {
    cmd.env_remove(var);
  }
  cmd
}

/// Isolated project directory.
pub struct TestEnv {
  pub temp: TempDir,
}

impl TestEnv {
  pub fn new() -> Self {
    Self {
      temp: TempDir::new().unwrap(),
    }
  }

  pub fn source_dir(&self) -> PathBuf {
    let p = self.temp.path().to_path_buf();
    dunce::canonicalize(&p).unwrap_or(p)
  }

  pub fn build_dir(&self) -> PathBuf {
    self.source_dir().join("build")
  }

  /// A `barelybuild <subcommand>` rooted at this project.
  pub fn cmd(&self, subcommand: &str) -> Command {
    let mut cmd = barelybuild_cmd();
    cmd.arg(subcommand).arg("--source-dir").arg(self.source_dir());
    cmd
  }

  /// Write an executable shell script that appends its cwd and arguments to
  /// `log` and exits with `code`.
  #[cfg(unix)]
  pub fn fake_tool(&self, name: &str, log: &Path, code: i32) -> PathBuf {
    let path = self.temp.path().join(format!("{name}.sh"));
    write_script(&path, name, log, code);
    path
  }
}

/// Write a logging shell script to `path`, creating parent directories.
#[cfg(unix)]
pub fn write_script(path: &Path, name: &str, log: &Path, code: i32) {
  use std::os::unix::fs::PermissionsExt;

  if let Some(parent) = path.parent() {
    std::fs::create_dir_all(parent).unwrap();
  }
  let script = format!(
    "#!/bin/sh\necho \"$(pwd) {name} $*\" >> \"{}\"\nexit {code}\n",
    log.display()
  );
  std::fs::write(path, script).unwrap();
  std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o755)).unwrap();
}
