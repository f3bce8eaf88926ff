//! Target execution.
//!
//! Runs a plan strictly in order: for each target, make sure its build
//! directory exists, run the generate step, then run the compile step. The
//! first failing step aborts the whole run.

pub mod clean;
pub mod runner;
pub mod types;

use tracing::{debug, info};

use crate::config::BuildConfiguration;
use crate::plan::BuildTarget;

pub use clean::{CleanError, clean};
pub use runner::{CommandRunner, Invocation, SystemRunner};
pub use types::{ExecuteError, ExecutionReport, TargetResult};

/// Execute `plan` under the skip and clean policy in `config`.
///
/// # Arguments
///
/// * `plan` - Targets in the order they should be built
/// * `config` - The configuration the plan was built from
/// * `runner` - Runs the external generate and compile steps
///
/// # Returns
///
/// An `ExecutionReport` listing the steps that ran for each target.
pub fn execute_plan(
  plan: &[BuildTarget],
  config: &BuildConfiguration,
  runner: &mut dyn CommandRunner,
) -> Result<ExecutionReport, ExecuteError> {
  let control = config.control;
  let mut report = ExecutionReport::default();

  if control.clean && config.build_dir.symlink_metadata().is_ok() {
    clean(&config.build_dir)?;
    report.cleaned = true;
  }

  if control.is_noop() {
    info!("generate and build both skipped, nothing to do");
    return Ok(report);
  }

  info!(target_count = plan.len(), variant = %config.variant, "starting build");

  for target in plan {
    report.targets.push(execute_target(target, config, runner)?);
  }

  Ok(report)
}

fn execute_target(
  target: &BuildTarget,
  config: &BuildConfiguration,
  runner: &mut dyn CommandRunner,
) -> Result<TargetResult, ExecuteError> {
  let control = config.control;
  info!(target = %target.name(), dir = %target.build_dir.display(), "building target");

  if !target.build_dir.exists() {
    debug!(path = %target.build_dir.display(), "creating build directory");
    std::fs::create_dir_all(&target.build_dir).map_err(|source| ExecuteError::CreateDir {
      path: target.build_dir.clone(),
      source,
    })?;
  }

  if !control.skip_generate {
    runner.run(&generate_invocation(target, config))?;
  }

  if !control.skip_build {
    runner.run(&compile_invocation(target, config))?;
  }

  Ok(TargetResult {
    name: target.name(),
    build_dir: target.build_dir.clone(),
    generated: !control.skip_generate,
    compiled: !control.skip_build,
  })
}

/// The generate step for `target`, run inside its build directory.
pub fn generate_invocation(target: &BuildTarget, config: &BuildConfiguration) -> Invocation {
  Invocation::new(&config.tools.cmake, &target.build_dir).args(target.generate_args())
}

/// The compile step for `target`, narrowed to the demo when one is selected.
pub fn compile_invocation(target: &BuildTarget, config: &BuildConfiguration) -> Invocation {
  Invocation::new(&config.tools.cmake, &target.build_dir)
    .args(target.compile_args(config.variant, config.post.demo.as_deref()))
}
