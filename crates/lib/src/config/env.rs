//! Environment overrides for toolchain locations.
//!
//! The environment is read once, up front, into a [`ToolchainEnv`]. Nothing
//! downstream of the resolver looks at process environment again.

use crate::consts::{
  ANDROID_NDK_HOME_ENV, CMAKE_ENV, CTEST_ENV, DAISY_TOOLCHAIN_PREFIX_ENV, MAKE_ENV, PYTHON_ENV,
};

/// Snapshot of the environment variables the resolver cares about.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ToolchainEnv {
  pub android_ndk_home: Option<String>,
  pub daisy_toolchain_prefix: Option<String>,
  pub cmake: Option<String>,
  pub ctest: Option<String>,
  pub make: Option<String>,
  pub python: Option<String>,
}

impl ToolchainEnv {
  pub fn from_env() -> Self {
    Self {
      android_ndk_home: std::env::var(ANDROID_NDK_HOME_ENV).ok(),
      daisy_toolchain_prefix: std::env::var(DAISY_TOOLCHAIN_PREFIX_ENV).ok(),
      cmake: program_var(CMAKE_ENV),
      ctest: program_var(CTEST_ENV),
      make: program_var(MAKE_ENV),
      python: program_var(PYTHON_ENV),
    }
  }
}

// Empty program overrides fall back to the default program name.
fn program_var(name: &str) -> Option<String> {
  std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
  use super::*;
  use serial_test::serial;

  #[test]
  #[serial]
  fn reads_toolchain_overrides() {
    temp_env::with_vars(
      [
        (ANDROID_NDK_HOME_ENV, Some("/opt/android-ndk")),
        (DAISY_TOOLCHAIN_PREFIX_ENV, Some("/opt/daisy")),
        (CMAKE_ENV, Some("/usr/local/bin/cmake")),
        (CTEST_ENV, None),
      ],
      || {
        let env = ToolchainEnv::from_env();
        assert_eq!(env.android_ndk_home.as_deref(), Some("/opt/android-ndk"));
        assert_eq!(env.daisy_toolchain_prefix.as_deref(), Some("/opt/daisy"));
        assert_eq!(env.cmake.as_deref(), Some("/usr/local/bin/cmake"));
        assert_eq!(env.ctest, None);
      },
    );
  }

  #[test]
  #[serial]
  fn blank_program_override_is_ignored() {
    temp_env::with_vars([(MAKE_ENV, Some("  ")), (PYTHON_ENV, Some(""))], || {
      let env = ToolchainEnv::from_env();
      assert_eq!(env.make, None);
      assert_eq!(env.python, None);
    });
  }

  #[test]
  #[serial]
  fn empty_prefix_is_kept_for_validation() {
    temp_env::with_var(DAISY_TOOLCHAIN_PREFIX_ENV, Some(""), || {
      let env = ToolchainEnv::from_env();
      assert_eq!(env.daisy_toolchain_prefix.as_deref(), Some(""));
    });
  }
}
