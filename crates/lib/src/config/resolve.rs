//! Validation and normalization of raw configuration input.

use std::collections::HashSet;
use std::path::PathBuf;

use tracing::debug;

use crate::consts::{
  BUILD_DIR_NAME, DAISY_TOOLCHAIN_FILE, DEFAULT_ANDROID_MIN_API, DEFAULT_ANDROID_NDK_HOME, DEFAULT_BENCHMARK_OUT,
  DEFAULT_CMAKE, DEFAULT_CTEST, DEFAULT_DAISY_TOOLCHAIN_PREFIX, DEFAULT_MAKE, DEFAULT_PYTHON,
};
use crate::platform::os::Os;

use super::ConfigError;
use super::env::ToolchainEnv;
use super::types::{
  AndroidAbi, AndroidConfig, BuildConfig, BuildConfiguration, ControlFlags, DaisyConfig, Features, PlatformSet,
  PostBuildSelectors, ToolPaths,
};

/// Configuration exactly as the user supplied it.
///
/// Desktop platform flags are optional: `None` means "default to the host".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawConfig {
  pub config: BuildConfig,
  pub linux: Option<bool>,
  pub mac: Option<bool>,
  pub windows: Option<bool>,
  pub android: bool,
  pub android_abis: Vec<AndroidAbi>,
  pub android_min_api: u32,
  pub daisy: bool,
  pub daisy_toolchain_prefix: Option<String>,
  pub tests: bool,
  pub examples: bool,
  pub unity: bool,
  pub benchmarks: bool,
  pub clean: bool,
  pub skip_generate: bool,
  pub skip_build: bool,
  pub demo: Option<String>,
  pub benchmark_out: Option<PathBuf>,
  pub benchmark_compare: Option<PathBuf>,
  pub source_dir: PathBuf,
  pub build_dir: Option<PathBuf>,
}

impl Default for RawConfig {
  fn default() -> Self {
    Self {
      config: BuildConfig::default(),
      linux: None,
      mac: None,
      windows: None,
      android: false,
      android_abis: AndroidAbi::ALL.to_vec(),
      android_min_api: DEFAULT_ANDROID_MIN_API,
      daisy: false,
      daisy_toolchain_prefix: None,
      tests: false,
      examples: false,
      unity: false,
      benchmarks: false,
      clean: false,
      skip_generate: false,
      skip_build: false,
      demo: None,
      benchmark_out: None,
      benchmark_compare: None,
      source_dir: PathBuf::from("."),
      build_dir: None,
    }
  }
}

/// Resolve against the host this process is running on.
pub fn resolve_for_host(raw: &RawConfig, env: &ToolchainEnv) -> Result<BuildConfiguration, ConfigError> {
  resolve(raw, env, Os::current())
}

/// Validate `raw` and fill in defaults from `env` and `host`.
///
/// Toolchain paths are never checked for existence here. A bad path surfaces
/// when the external tool is invoked.
pub fn resolve(raw: &RawConfig, env: &ToolchainEnv, host: Option<Os>) -> Result<BuildConfiguration, ConfigError> {
  let platforms = PlatformSet {
    daisy: raw.daisy,
    android: raw.android,
    linux: raw.linux.unwrap_or(host == Some(Os::Linux)),
    mac: raw.mac.unwrap_or(host == Some(Os::MacOs)),
    windows: raw.windows.unwrap_or(host == Some(Os::Windows)),
  };

  if platforms.android {
    validate_abis(&raw.android_abis)?;
  }

  let ndk_root = env
    .android_ndk_home
    .clone()
    .unwrap_or_else(|| DEFAULT_ANDROID_NDK_HOME.to_string());

  let toolchain_prefix = raw
    .daisy_toolchain_prefix
    .clone()
    .or_else(|| env.daisy_toolchain_prefix.clone())
    .unwrap_or_else(|| DEFAULT_DAISY_TOOLCHAIN_PREFIX.to_string());

  if platforms.daisy && toolchain_prefix.trim().is_empty() {
    return Err(ConfigError::EmptyDaisyToolchainPrefix);
  }

  let build_dir = raw
    .build_dir
    .clone()
    .unwrap_or_else(|| raw.source_dir.join(BUILD_DIR_NAME));

  let resolved = BuildConfiguration {
    config: raw.config,
    variant: raw.config.variant(),
    platforms,
    features: Features {
      tests: raw.tests,
      examples: raw.examples,
      unity: raw.unity,
      benchmarks: raw.benchmarks,
    },
    android: AndroidConfig {
      abis: raw.android_abis.clone(),
      min_api: raw.android_min_api,
      ndk_root: PathBuf::from(ndk_root),
    },
    daisy: DaisyConfig {
      toolchain_file: PathBuf::from(DAISY_TOOLCHAIN_FILE),
      toolchain_prefix: PathBuf::from(toolchain_prefix),
    },
    control: ControlFlags {
      clean: raw.clean,
      skip_generate: raw.skip_generate,
      skip_build: raw.skip_build,
    },
    post: PostBuildSelectors {
      demo: raw.demo.clone().filter(|name| !name.trim().is_empty()),
      benchmark_out: raw
        .benchmark_out
        .clone()
        .unwrap_or_else(|| PathBuf::from(DEFAULT_BENCHMARK_OUT)),
      benchmark_compare: raw.benchmark_compare.clone(),
    },
    tools: ToolPaths {
      cmake: env.cmake.clone().unwrap_or_else(|| DEFAULT_CMAKE.to_string()),
      ctest: env.ctest.clone().unwrap_or_else(|| DEFAULT_CTEST.to_string()),
      make: env.make.clone().unwrap_or_else(|| DEFAULT_MAKE.to_string()),
      python: env.python.clone().unwrap_or_else(|| DEFAULT_PYTHON.to_string()),
    },
    source_dir: raw.source_dir.clone(),
    build_dir,
  };

  debug!(
    config = %resolved.config,
    variant = %resolved.variant,
    platforms = ?resolved.platforms.enabled().collect::<Vec<_>>(),
    "resolved build configuration"
  );

  Ok(resolved)
}

fn validate_abis(abis: &[AndroidAbi]) -> Result<(), ConfigError> {
  if abis.is_empty() {
    return Err(ConfigError::EmptyAndroidAbis);
  }
  let mut seen = HashSet::new();
  for abi in abis {
    if !seen.insert(*abi) {
      return Err(ConfigError::DuplicateAndroidAbi(*abi));
    }
  }
  Ok(())
}
