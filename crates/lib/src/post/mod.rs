//! Post-build actions.
//!
//! After a successful build, runs (in this order, each only when requested):
//! the test runner, the benchmark binary and optional comparison, the
//! embedded flashing target, and the demo binary. Tests, benchmarks and the
//! demo act only on the build directory of the current host. Flashing and
//! the demo ask for confirmation first.

pub mod locate;

use std::io;
use std::path::Path;

use serde::Serialize;
use tracing::{info, warn};

use crate::config::{BuildConfiguration, Variant};
use crate::consts::{BENCHMARK_BINARY, BENCHMARK_COMPARE_SCRIPT, DAISY_FLASH_TARGET};
use crate::execute::{CommandRunner, ExecuteError, Invocation};
use crate::platform::Platform;

pub use locate::{HostDir, find_host_dir};

/// Asks the user to confirm an action before it runs.
pub trait Prompter {
  /// Returns `Ok(false)` when the user declines.
  fn confirm(&mut self, message: &str) -> io::Result<bool>;
}

/// Where post-build actions look for artifacts.
#[derive(Debug, Clone, Copy)]
pub struct PostBuildContext<'a> {
  pub build_root: &'a Path,
  pub variant: Variant,
}

/// Which post-build actions actually ran.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PostBuildReport {
  pub tests: bool,
  pub benchmarks: bool,
  pub benchmark_compare: bool,
  pub flashed: bool,
  pub demo: bool,
}

/// Run every requested post-build action for the current host.
pub fn run_post_build(
  config: &BuildConfiguration,
  runner: &mut dyn CommandRunner,
  prompter: &mut dyn Prompter,
) -> Result<PostBuildReport, ExecuteError> {
  run_post_build_on(config, Platform::host(), runner, prompter)
}

/// Run every requested post-build action, treating `host` as the current host.
pub fn run_post_build_on(
  config: &BuildConfiguration,
  host: Option<Platform>,
  runner: &mut dyn CommandRunner,
  prompter: &mut dyn Prompter,
) -> Result<PostBuildReport, ExecuteError> {
  let ctx = PostBuildContext {
    build_root: &config.build_dir,
    variant: config.variant,
  };
  let mut report = PostBuildReport::default();

  if config.features.tests {
    if let Some(host_dir) = host_dir_or_warn(&ctx, host, "tests")? {
      run_tests(&host_dir, config, runner)?;
      report.tests = true;
    }
  }

  if config.features.benchmarks {
    if let Some(host_dir) = host_dir_or_warn(&ctx, host, "benchmarks")? {
      report.benchmark_compare = run_benchmarks(&host_dir, &ctx, config, runner)?;
      report.benchmarks = true;
    }
  }

  if config.platforms.daisy {
    report.flashed = flash_daisy(&ctx, config, runner, prompter)?;
  }

  if let Some(demo) = config.post.demo.as_deref() {
    if let Some(host_dir) = host_dir_or_warn(&ctx, host, "demo")? {
      report.demo = run_demo(&host_dir, &ctx, demo, runner, prompter)?;
    }
  }

  Ok(report)
}

fn host_dir_or_warn(
  ctx: &PostBuildContext<'_>,
  host: Option<Platform>,
  action: &str,
) -> Result<Option<HostDir>, ExecuteError> {
  let found = find_host_dir(ctx.build_root, host)?;
  if found.is_none() {
    warn!(
      action,
      build_root = %ctx.build_root.display(),
      host = ?host,
      "no build directory for the current host, skipping"
    );
  }
  Ok(found)
}

fn run_tests(
  host_dir: &HostDir,
  config: &BuildConfiguration,
  runner: &mut dyn CommandRunner,
) -> Result<(), ExecuteError> {
  info!(dir = %host_dir.path.display(), "running tests");
  let ctest = Invocation::new(&config.tools.ctest, &host_dir.path).arg("--output-on-failure");
  runner.run(&ctest)
}

// Returns whether a comparison was run.
fn run_benchmarks(
  host_dir: &HostDir,
  ctx: &PostBuildContext<'_>,
  config: &BuildConfiguration,
  runner: &mut dyn CommandRunner,
) -> Result<bool, ExecuteError> {
  let benchmark_dir = host_dir.artifact_dir("src", ctx.variant);
  let benchmark = host_dir.executable("src", BENCHMARK_BINARY, ctx.variant);
  let out = &config.post.benchmark_out;

  info!(binary = %benchmark.display(), out = %out.display(), "running benchmarks");
  let run = Invocation::new(benchmark.display().to_string(), &benchmark_dir)
    .arg(format!("--benchmark_out={}", out.display()))
    .arg("--benchmark_out_format=json");
  runner.run(&run)?;

  let Some(baseline) = config.post.benchmark_compare.as_ref() else {
    return Ok(false);
  };

  info!(baseline = %baseline.display(), "comparing benchmarks");
  let compare = Invocation::new(&config.tools.python, &benchmark_dir)
    .arg(host_dir.path.join(BENCHMARK_COMPARE_SCRIPT))
    .arg("benchmarks")
    .arg(baseline)
    .arg(out);
  runner.run(&compare)?;
  Ok(true)
}

// Returns whether the board was flashed.
fn flash_daisy(
  ctx: &PostBuildContext<'_>,
  config: &BuildConfiguration,
  runner: &mut dyn CommandRunner,
  prompter: &mut dyn Prompter,
) -> Result<bool, ExecuteError> {
  if !prompter
    .confirm("Flash the Daisy program to the device?")
    .map_err(ExecuteError::Prompt)?
  {
    info!("daisy flashing declined");
    return Ok(false);
  }

  let daisy_dir = ctx.build_root.join(Platform::Daisy.dir_name());
  if !daisy_dir.is_dir() {
    return Err(ExecuteError::MissingDirectory(daisy_dir));
  }

  info!(dir = %daisy_dir.display(), "flashing daisy program");
  runner.run(&Invocation::new(&config.tools.make, &daisy_dir).arg(DAISY_FLASH_TARGET))?;
  Ok(true)
}

// Returns whether the demo was launched.
fn run_demo(
  host_dir: &HostDir,
  ctx: &PostBuildContext<'_>,
  demo: &str,
  runner: &mut dyn CommandRunner,
  prompter: &mut dyn Prompter,
) -> Result<bool, ExecuteError> {
  if !prompter
    .confirm(&format!("Run the {demo} demo?"))
    .map_err(ExecuteError::Prompt)?
  {
    info!(demo, "demo declined");
    return Ok(false);
  }

  let demo_dir = host_dir.artifact_dir("bin", ctx.variant);
  let demo_path = host_dir.executable("bin", demo, ctx.variant);
  info!(demo = %demo_path.display(), "running demo");
  runner.run(&Invocation::new(demo_path.display().to_string(), &demo_dir))?;
  Ok(true)
}
