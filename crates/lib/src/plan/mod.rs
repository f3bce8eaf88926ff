//! Expansion of a [`BuildConfiguration`] into an ordered list of build targets.
//!
//! The order is fixed: Daisy, then one Android target per requested ABI (in
//! the order given), then Linux, Mac, and Windows. The same configuration
//! always yields the same plan.

pub mod target;

use tracing::debug;

use crate::config::BuildConfiguration;
use crate::platform::{GeneratorKind, Platform};

pub use target::{BuildOption, BuildTarget};

/// Build the ordered target list for `config`.
///
/// A configuration with no enabled platforms produces an empty plan.
pub fn build_plan(config: &BuildConfiguration) -> Vec<BuildTarget> {
  let mut plan = Vec::new();
  for platform in config.platforms.enabled() {
    match platform.kind() {
      GeneratorKind::Embedded => plan.push(embedded_target(config, platform)),
      GeneratorKind::CrossCompile => plan.extend(cross_targets(config, platform)),
      GeneratorKind::SingleConfigDesktop | GeneratorKind::MultiConfigDesktop => {
        plan.push(desktop_target(config, platform))
      }
    }
  }
  debug!(
    targets = ?plan.iter().map(BuildTarget::name).collect::<Vec<_>>(),
    "planned build targets"
  );
  plan
}

fn new_target(config: &BuildConfiguration, platform: Platform, options: Vec<BuildOption>) -> BuildTarget {
  BuildTarget {
    platform,
    abi: None,
    kind: platform.kind(),
    generator: platform.generator(),
    source_dir: config.source_dir.clone(),
    build_dir: config.build_dir.join(platform.dir_name()),
    options,
  }
}

// Feature flags never reach the embedded target.
fn embedded_target(config: &BuildConfiguration, platform: Platform) -> BuildTarget {
  let options = vec![
    BuildOption::new("CMAKE_TOOLCHAIN_FILE", config.daisy.toolchain_file.display().to_string()),
    BuildOption::new("TOOLCHAIN_PREFIX", config.daisy.toolchain_prefix.display().to_string()),
    BuildOption::on("ENABLE_DAISY"),
  ];
  new_target(config, platform, options)
}

fn cross_targets(config: &BuildConfiguration, platform: Platform) -> Vec<BuildTarget> {
  let android = &config.android;
  android
    .abis
    .iter()
    .map(|abi| {
      let mut options = vec![
        BuildOption::new("CMAKE_TOOLCHAIN_FILE", android.toolchain_file().display().to_string()),
        BuildOption::new("ANDROID_ABI", abi.as_str()),
        BuildOption::new("ANDROID_NDK", android.ndk_root.display().to_string()),
        BuildOption::new("ANDROID_PLATFORM", android.platform_string()),
        BuildOption::new("CMAKE_BUILD_TYPE", config.variant.as_str()),
      ];
      if config.features.unity {
        options.push(BuildOption::on("ENABLE_UNITY"));
      }

      let mut target = new_target(config, platform, options);
      target.abi = Some(*abi);
      target.build_dir = target.build_dir.join(abi.as_str());
      target
    })
    .collect()
}

fn desktop_target(config: &BuildConfiguration, platform: Platform) -> BuildTarget {
  let mut options = Vec::new();
  // Multi-configuration generators take the build type at compile time instead.
  if !platform.kind().is_multi_config() {
    options.push(BuildOption::new("CMAKE_BUILD_TYPE", config.variant.as_str()));
  }
  options.extend(desktop_feature_options(config));
  new_target(config, platform, options)
}

fn desktop_feature_options(config: &BuildConfiguration) -> Vec<BuildOption> {
  let features = &config.features;
  let mut options = Vec::new();
  if features.unity {
    options.push(BuildOption::on("ENABLE_UNITY"));
  }
  if let Some(sanitizer) = config.config.sanitizer_option() {
    options.push(BuildOption::on(sanitizer));
  }
  if features.benchmarks {
    options.push(BuildOption::on("ENABLE_BENCHMARKS"));
  }
  if features.tests {
    options.push(BuildOption::on("ENABLE_TESTS"));
    options.push(BuildOption::new("GTEST_COLOR", "1"));
  }
  if config.examples_enabled() {
    options.push(BuildOption::on("ENABLE_EXAMPLES"));
  }
  options
}
