//! Configuration resolution.
//!
//! Turns raw user input ([`RawConfig`]) plus a snapshot of the environment
//! ([`ToolchainEnv`]) into a validated, immutable [`BuildConfiguration`].

pub mod env;
pub mod resolve;
pub mod types;

use thiserror::Error;

pub use env::ToolchainEnv;
pub use resolve::{RawConfig, resolve, resolve_for_host};
pub use types::{
  AndroidAbi, AndroidConfig, BuildConfig, BuildConfiguration, ControlFlags, DaisyConfig, Features, PlatformSet,
  PostBuildSelectors, ToolPaths, Variant,
};

/// Errors raised while validating the requested configuration.
///
/// These are always reported before any external process runs.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
  #[error("unknown build configuration '{0}' (expected one of: debug, release, asan, msan, tsan)")]
  UnknownBuildConfig(String),

  #[error("unknown android abi '{0}' (expected one of: armeabi-v7a, arm64-v8a, x86, x86_64)")]
  UnknownAndroidAbi(String),

  #[error("android targets requested but no android abis were given")]
  EmptyAndroidAbis,

  #[error("android abi '{0}' was requested more than once")]
  DuplicateAndroidAbi(AndroidAbi),

  #[error("daisy targets requested but the daisy toolchain prefix is empty")]
  EmptyDaisyToolchainPrefix,
}
