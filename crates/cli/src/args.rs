//! Build selection flags shared by `build` and `plan`.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;

use barelybuild_lib::config::{AndroidAbi, BuildConfig, RawConfig};
use barelybuild_lib::consts::DEFAULT_ANDROID_MIN_API;

#[derive(Debug, Clone, Args)]
pub struct BuildArgs {
  /// Build configuration: debug, release, asan, msan, or tsan
  #[arg(short, long, default_value_t = BuildConfig::Release)]
  pub config: BuildConfig,

  /// Build the Linux targets (defaults to true on Linux)
  #[arg(long, num_args = 0..=1, default_missing_value = "true", value_name = "BOOL")]
  pub linux: Option<bool>,

  /// Build the Mac targets (defaults to true on macOS)
  #[arg(long, num_args = 0..=1, default_missing_value = "true", value_name = "BOOL")]
  pub mac: Option<bool>,

  /// Build the Windows targets (defaults to true on Windows)
  #[arg(long, num_args = 0..=1, default_missing_value = "true", value_name = "BOOL")]
  pub windows: Option<bool>,

  /// Build the Android targets, one per ABI
  #[arg(long)]
  pub android: bool,

  /// ABIs for the Android targets (defaults to all)
  #[arg(
    long,
    alias = "android_abis",
    value_delimiter = ',',
    num_args = 1..,
    default_values_t = AndroidAbi::ALL
  )]
  pub android_abis: Vec<AndroidAbi>,

  /// Minimum API level for the Android targets
  #[arg(long, alias = "android_min_api", default_value_t = DEFAULT_ANDROID_MIN_API)]
  pub android_min_api: u32,

  /// Build and flash the Daisy program
  #[arg(long)]
  pub daisy: bool,

  /// Daisy toolchain prefix (overrides DAISY_TOOLCHAIN_PREFIX)
  #[arg(long, alias = "daisy_toolchain_prefix")]
  pub daisy_toolchain_prefix: Option<String>,

  /// Build the Unity native plugins
  #[arg(long)]
  pub unity: bool,

  /// Build the examples
  #[arg(long)]
  pub examples: bool,

  /// Build and run the given example demo
  #[arg(long, alias = "run_demo", value_name = "NAME")]
  pub run_demo: Option<String>,

  /// Build and run the benchmarks
  #[arg(long)]
  pub benchmark: bool,

  /// Baseline JSON file to compare the benchmark results against
  #[arg(long, alias = "benchmark_compare", value_name = "FILE")]
  pub benchmark_compare: Option<PathBuf>,

  /// JSON output file for the benchmark results [default: benchmark.json]
  #[arg(long, alias = "benchmark_out", value_name = "FILE")]
  pub benchmark_out: Option<PathBuf>,

  /// Build and run the unit tests
  #[arg(long)]
  pub test: bool,

  /// Remove the previous build before building
  #[arg(long)]
  pub clean: bool,

  /// Skip the generate step
  #[arg(long, alias = "skip_generate")]
  pub skip_generate: bool,

  /// Skip the compile step
  #[arg(long, alias = "skip_build")]
  pub skip_build: bool,

  /// Project source directory (defaults to the current directory)
  #[arg(long, value_name = "DIR")]
  pub source_dir: Option<PathBuf>,

  /// Build root (defaults to <source-dir>/build)
  #[arg(long, value_name = "DIR")]
  pub build_dir: Option<PathBuf>,
}

impl BuildArgs {
  pub fn to_raw(&self) -> Result<RawConfig> {
    let source_dir = match &self.source_dir {
      Some(dir) => dir.clone(),
      None => std::env::current_dir().context("Failed to determine the current directory")?,
    };
    let source_dir = dunce::canonicalize(&source_dir).unwrap_or(source_dir);
    // Tools run inside the target directories, so relative roots would be
    // resolved a second time against them.
    let build_dir = self.build_dir.as_deref().map(absolute).transpose()?;

    Ok(RawConfig {
      config: self.config,
      linux: self.linux,
      mac: self.mac,
      windows: self.windows,
      android: self.android,
      android_abis: self.android_abis.clone(),
      android_min_api: self.android_min_api,
      daisy: self.daisy,
      daisy_toolchain_prefix: self.daisy_toolchain_prefix.clone(),
      tests: self.test,
      examples: self.examples,
      unity: self.unity,
      benchmarks: self.benchmark,
      clean: self.clean,
      skip_generate: self.skip_generate,
      skip_build: self.skip_build,
      demo: self.run_demo.clone(),
      benchmark_out: self.benchmark_out.clone(),
      benchmark_compare: self.benchmark_compare.clone(),
      source_dir,
      build_dir,
    })
  }
}

fn absolute(path: &Path) -> Result<PathBuf> {
  let path = std::path::absolute(path).with_context(|| format!("Failed to resolve {}", path.display()))?;
  Ok(dunce::simplified(&path).to_path_buf())
}
