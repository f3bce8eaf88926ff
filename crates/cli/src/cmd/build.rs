//! Implementation of the `barelybuild build` command.
//!
//! Resolves the configuration, builds every planned target in order, then
//! runs the requested post-build actions for the current host.

use std::time::Instant;

use anyhow::{Context, Result};
use tracing::info;

use barelybuild_lib::config::{ToolchainEnv, resolve_for_host};
use barelybuild_lib::execute::{SystemRunner, execute_plan};
use barelybuild_lib::plan::build_plan;
use barelybuild_lib::post::run_post_build;

use crate::args::BuildArgs;
use crate::output::{format_duration, print_info, print_stat, print_success, print_warning};
use crate::prompts::TerminalPrompter;

/// Execute the build command.
///
/// Any failing external step aborts the run; the error carries the tool's
/// exit status up to `main`.
pub fn cmd_build(args: &BuildArgs, yes: bool) -> Result<()> {
  let started = Instant::now();

  let raw = args.to_raw()?;
  let env = ToolchainEnv::from_env();
  let config = resolve_for_host(&raw, &env).context("Invalid build configuration")?;
  let plan = build_plan(&config);

  info!(source = %config.source_dir.display(), build = %config.build_dir.display(), "resolved build");

  if plan.is_empty() {
    print_warning("No platforms selected, nothing to build.");
  }

  let mut runner = SystemRunner;
  let report = execute_plan(&plan, &config, &mut runner).context("Build failed")?;

  if report.cleaned {
    print_info(&format!("Cleaned {}", config.build_dir.display()));
  }
  for target in &report.targets {
    print_success(&format!("Built {}", target.name));
  }
  if report.is_noop() && !plan.is_empty() {
    print_info("Generate and build both skipped.");
  }

  let mut prompter = TerminalPrompter { assume_yes: yes };
  let post = run_post_build(&config, &mut runner, &mut prompter).context("Post-build action failed")?;

  println!();
  print_success(&format!("Done in {}", format_duration(started.elapsed())));
  print_stat("Targets built", &report.targets.len().to_string());
  if post.tests {
    print_stat("Tests", "passed");
  }
  if post.benchmarks {
    print_stat("Benchmarks", &config.post.benchmark_out.display().to_string());
  }
  if post.flashed {
    print_stat("Daisy", "flashed");
  }
  if post.demo {
    print_stat("Demo", "finished");
  }

  Ok(())
}
