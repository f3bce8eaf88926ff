//! Types for the resolved build configuration.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use serde::Serialize;

use crate::consts::ANDROID_TOOLCHAIN_FILE;
use crate::platform::Platform;

use super::ConfigError;

/// Build type handed to the generator and compiler.
///
/// Only two states exist. Every configuration other than `release` collapses to
/// `Debug`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Variant {
  Debug,
  Release,
}

impl Variant {
  pub fn as_str(&self) -> &'static str {
    match self {
      Variant::Debug => "Debug",
      Variant::Release => "Release",
    }
  }
}

impl fmt::Display for Variant {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.as_str())
  }
}

/// The user-facing build configuration selector.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BuildConfig {
  Debug,
  #[default]
  Release,
  Asan,
  Msan,
  Tsan,
}

impl BuildConfig {
  pub const ALL: [BuildConfig; 5] = [
    BuildConfig::Debug,
    BuildConfig::Release,
    BuildConfig::Asan,
    BuildConfig::Msan,
    BuildConfig::Tsan,
  ];

  pub fn as_str(&self) -> &'static str {
    match self {
      BuildConfig::Debug => "debug",
      BuildConfig::Release => "release",
      BuildConfig::Asan => "asan",
      BuildConfig::Msan => "msan",
      BuildConfig::Tsan => "tsan",
    }
  }

  pub fn variant(&self) -> Variant {
    match self {
      BuildConfig::Release => Variant::Release,
      _ => Variant::Debug,
    }
  }

  /// Generator option enabling the matching sanitizer, if any.
  pub fn sanitizer_option(&self) -> Option<&'static str> {
    match self {
      BuildConfig::Asan => Some("ENABLE_ASAN"),
      BuildConfig::Msan => Some("ENABLE_MSAN"),
      BuildConfig::Tsan => Some("ENABLE_TSAN"),
      BuildConfig::Debug | BuildConfig::Release => None,
    }
  }
}

impl fmt::Display for BuildConfig {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.as_str())
  }
}

impl FromStr for BuildConfig {
  type Err = ConfigError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    BuildConfig::ALL
      .into_iter()
      .find(|c| c.as_str().eq_ignore_ascii_case(s))
      .ok_or_else(|| ConfigError::UnknownBuildConfig(s.to_string()))
  }
}

/// Android binary interface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum AndroidAbi {
  #[serde(rename = "armeabi-v7a")]
  ArmeabiV7a,
  #[serde(rename = "arm64-v8a")]
  Arm64V8a,
  #[serde(rename = "x86")]
  X86,
  #[serde(rename = "x86_64")]
  X86_64,
}

impl AndroidAbi {
  pub const ALL: [AndroidAbi; 4] = [
    AndroidAbi::ArmeabiV7a,
    AndroidAbi::Arm64V8a,
    AndroidAbi::X86,
    AndroidAbi::X86_64,
  ];

  pub fn as_str(&self) -> &'static str {
    match self {
      AndroidAbi::ArmeabiV7a => "armeabi-v7a",
      AndroidAbi::Arm64V8a => "arm64-v8a",
      AndroidAbi::X86 => "x86",
      AndroidAbi::X86_64 => "x86_64",
    }
  }
}

impl fmt::Display for AndroidAbi {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.as_str())
  }
}

impl FromStr for AndroidAbi {
  type Err = ConfigError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    AndroidAbi::ALL
      .into_iter()
      .find(|abi| abi.as_str() == s)
      .ok_or_else(|| ConfigError::UnknownAndroidAbi(s.to_string()))
  }
}

/// Independent enable flags, one per platform.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PlatformSet {
  pub daisy: bool,
  pub android: bool,
  pub linux: bool,
  pub mac: bool,
  pub windows: bool,
}

impl PlatformSet {
  pub fn contains(&self, platform: Platform) -> bool {
    match platform {
      Platform::Daisy => self.daisy,
      Platform::Android => self.android,
      Platform::Linux => self.linux,
      Platform::Mac => self.mac,
      Platform::Windows => self.windows,
    }
  }

  /// Enabled platforms in plan order.
  pub fn enabled(&self) -> impl Iterator<Item = Platform> + '_ {
    Platform::ALL.into_iter().filter(|p| self.contains(*p))
  }

  pub fn is_empty(&self) -> bool {
    self.enabled().next().is_none()
  }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Features {
  pub tests: bool,
  pub examples: bool,
  pub unity: bool,
  pub benchmarks: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AndroidConfig {
  pub abis: Vec<AndroidAbi>,
  pub min_api: u32,
  pub ndk_root: PathBuf,
}

impl AndroidConfig {
  pub fn toolchain_file(&self) -> PathBuf {
    self.ndk_root.join(ANDROID_TOOLCHAIN_FILE)
  }

  /// Value of the `ANDROID_PLATFORM` option, e.g. `android-21`.
  pub fn platform_string(&self) -> String {
    format!("android-{}", self.min_api)
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DaisyConfig {
  pub toolchain_file: PathBuf,
  pub toolchain_prefix: PathBuf,
}

/// Global skip and clean policy for the executor.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ControlFlags {
  pub clean: bool,
  pub skip_generate: bool,
  pub skip_build: bool,
}

impl ControlFlags {
  /// Both external steps are skipped, so nothing per-target runs.
  pub fn is_noop(&self) -> bool {
    self.skip_generate && self.skip_build
  }
}

/// Selectors for the optional post-build actions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PostBuildSelectors {
  pub demo: Option<String>,
  pub benchmark_out: PathBuf,
  pub benchmark_compare: Option<PathBuf>,
}

/// External programs invoked by the executor and post-build runner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ToolPaths {
  pub cmake: String,
  pub ctest: String,
  pub make: String,
  pub python: String,
}

/// Fully resolved, immutable input to planning and execution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BuildConfiguration {
  pub config: BuildConfig,
  pub variant: Variant,
  pub platforms: PlatformSet,
  pub features: Features,
  pub android: AndroidConfig,
  pub daisy: DaisyConfig,
  pub control: ControlFlags,
  pub post: PostBuildSelectors,
  pub tools: ToolPaths,
  pub source_dir: PathBuf,
  pub build_dir: PathBuf,
}

impl BuildConfiguration {
  /// Examples are built when requested directly or when a demo is selected.
  pub fn examples_enabled(&self) -> bool {
    self.features.examples || self.post.demo.is_some()
  }
}
