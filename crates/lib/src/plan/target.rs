//! A single planned build target and its argument vectors.

use std::ffi::OsString;
use std::fmt;
use std::path::PathBuf;

use serde::Serialize;

use crate::config::{AndroidAbi, Variant};
use crate::consts::DEMO_TARGET_PREFIX;
use crate::platform::{GeneratorKind, Platform};

/// A `KEY=VALUE` definition handed opaquely to the generate step.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct BuildOption {
  pub key: String,
  pub value: String,
}

impl BuildOption {
  pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
    Self {
      key: key.into(),
      value: value.into(),
    }
  }

  /// Shorthand for a feature switch set to `ON`.
  pub fn on(key: impl Into<String>) -> Self {
    Self::new(key, "ON")
  }

  /// The `-DKEY=VALUE` form passed on the command line.
  pub fn to_define(&self) -> String {
    format!("-D{}={}", self.key, self.value)
  }
}

impl fmt::Display for BuildOption {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}={}", self.key, self.value)
  }
}

/// One isolated (source, build directory, generator, options) unit.
///
/// Constructed by [`build_plan`](super::build_plan) and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BuildTarget {
  pub platform: Platform,
  pub abi: Option<AndroidAbi>,
  pub kind: GeneratorKind,
  pub generator: &'static str,
  pub source_dir: PathBuf,
  pub build_dir: PathBuf,
  pub options: Vec<BuildOption>,
}

impl BuildTarget {
  /// Human-readable identity, e.g. `Linux` or `Android/arm64-v8a`.
  pub fn name(&self) -> String {
    match self.abi {
      Some(abi) => format!("{}/{}", self.platform.dir_name(), abi),
      None => self.platform.dir_name().to_string(),
    }
  }

  /// Arguments for the generate step.
  pub fn generate_args(&self) -> Vec<OsString> {
    let mut args: Vec<OsString> = vec![
      "-S".into(),
      self.source_dir.clone().into_os_string(),
      "-B".into(),
      self.build_dir.clone().into_os_string(),
      "-G".into(),
      self.generator.into(),
    ];
    args.extend(self.options.iter().map(|opt| OsString::from(opt.to_define())));
    args
  }

  /// Arguments for the compile step, optionally narrowed to a single demo.
  ///
  /// The variant is always passed; single-configuration generators ignore it,
  /// multi-configuration generators need it to pick what to compile.
  pub fn compile_args(&self, variant: Variant, demo: Option<&str>) -> Vec<OsString> {
    let mut args: Vec<OsString> = vec![
      "--build".into(),
      self.build_dir.clone().into_os_string(),
      "--config".into(),
      variant.as_str().into(),
    ];
    if let Some(demo) = demo {
      args.push("--target".into());
      args.push(format!("{DEMO_TARGET_PREFIX}{demo}").into());
    }
    args
  }

  #[cfg(test)]
  pub fn option(&self, key: &str) -> Option<&str> {
    self
      .options
      .iter()
      .find(|opt| opt.key == key)
      .map(|opt| opt.value.as_str())
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn linux_target() -> BuildTarget {
    BuildTarget {
      platform: Platform::Linux,
      abi: None,
      kind: GeneratorKind::SingleConfigDesktop,
      generator: "Unix Makefiles",
      source_dir: PathBuf::from("/src"),
      build_dir: PathBuf::from("/src/build/Linux"),
      options: vec![BuildOption::new("CMAKE_BUILD_TYPE", "Release"), BuildOption::on("ENABLE_TESTS")],
    }
  }

  #[test]
  fn generate_args_put_generator_before_defines() {
    let args = linux_target().generate_args();
    let args: Vec<_> = args.iter().map(|a| a.to_string_lossy().into_owned()).collect();
    assert_eq!(
      args,
      vec![
        "-S",
        "/src",
        "-B",
        "/src/build/Linux",
        "-G",
        "Unix Makefiles",
        "-DCMAKE_BUILD_TYPE=Release",
        "-DENABLE_TESTS=ON",
      ]
    );
  }

  #[test]
  fn compile_args_narrow_to_demo_target() {
    let target = linux_target();
    let args: Vec<_> = target
      .compile_args(Variant::Debug, Some("metronome"))
      .iter()
      .map(|a| a.to_string_lossy().into_owned())
      .collect();
    assert_eq!(
      args,
      vec![
        "--build",
        "/src/build/Linux",
        "--config",
        "Debug",
        "--target",
        "examples_demo_metronome"
      ]
    );
  }

  #[test]
  fn name_includes_abi() {
    let mut target = linux_target();
    assert_eq!(target.name(), "Linux");
    target.platform = Platform::Android;
    target.abi = Some(AndroidAbi::Arm64V8a);
    assert_eq!(target.name(), "Android/arm64-v8a");
  }

  #[test]
  fn option_lookup() {
    let target = linux_target();
    assert_eq!(target.option("CMAKE_BUILD_TYPE"), Some("Release"));
    assert_eq!(target.option("ENABLE_UNITY"), None);
  }

  #[test]
  fn serializes_for_plan_output() {
    let mut target = linux_target();
    target.platform = Platform::Android;
    target.abi = Some(AndroidAbi::X86_64);
    target.kind = GeneratorKind::CrossCompile;

    let json = serde_json::to_value(&target).unwrap();
    assert_eq!(json["platform"], "android");
    assert_eq!(json["abi"], "x86_64");
    assert_eq!(json["kind"], "cross-compile");
    assert_eq!(json["options"][1]["key"], "ENABLE_TESTS");
    assert_eq!(json["options"][1]["value"], "ON");
  }
}
