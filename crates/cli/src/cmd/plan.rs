//! Implementation of the `barelybuild plan` command.
//!
//! Resolves the configuration and prints the targets, directories, and
//! external commands a build would run, without running anything.

use anyhow::{Context, Result};
use serde::Serialize;

use barelybuild_lib::config::{BuildConfiguration, ToolchainEnv, resolve_for_host};
use barelybuild_lib::execute::{compile_invocation, generate_invocation};
use barelybuild_lib::plan::{BuildTarget, build_plan};

use crate::args::BuildArgs;
use crate::output::{OutputFormat, print_info, print_json, print_stat, print_step};

#[derive(Serialize)]
struct PlannedTarget<'a> {
  name: String,
  #[serde(flatten)]
  target: &'a BuildTarget,
  generate: Option<String>,
  compile: Option<String>,
}

#[derive(Serialize)]
struct PlanOutput<'a> {
  configuration: &'a BuildConfiguration,
  targets: Vec<PlannedTarget<'a>>,
}

pub fn cmd_plan(args: &BuildArgs, format: OutputFormat) -> Result<()> {
  let raw = args.to_raw()?;
  let config = resolve_for_host(&raw, &ToolchainEnv::from_env()).context("Invalid build configuration")?;
  let plan = build_plan(&config);

  let control = config.control;
  let targets: Vec<_> = plan
    .iter()
    .map(|target| PlannedTarget {
      name: target.name(),
      target,
      generate: (!control.skip_generate).then(|| generate_invocation(target, &config).to_string()),
      compile: (!control.skip_build).then(|| compile_invocation(target, &config).to_string()),
    })
    .collect();

  if format.is_json() {
    return print_json(&PlanOutput {
      configuration: &config,
      targets,
    });
  }

  print_stat("Configuration", config.config.as_str());
  print_stat("Variant", config.variant.as_str());
  print_stat("Build root", &config.build_dir.display().to_string());
  println!();

  if targets.is_empty() {
    print_info("No platforms selected, nothing to build.");
    return Ok(());
  }
  if control.is_noop() {
    print_info("Generate and build are both skipped; no target would run.");
  }

  for planned in &targets {
    print_info(&format!("{} ({})", planned.name, planned.target.generator));
    print_stat("dir", &planned.target.build_dir.display().to_string());
    if let Some(generate) = &planned.generate {
      print_step("generate", generate);
    }
    if let Some(compile) = &planned.compile {
      print_step("compile", compile);
    }
  }

  Ok(())
}
