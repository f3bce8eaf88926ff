//! CLI smoke tests for barelybuild.
//!
//! These tests verify that all commands parse and return appropriate exit
//! codes without invoking any real build tools.

mod common;

use predicates::prelude::*;
use serde_json::Value;

use common::{TestEnv, barelybuild_cmd};

// =============================================================================
// Help & Version
// =============================================================================

#[test]
fn help_flag_works() {
  barelybuild_cmd()
    .arg("--help")
    .assert()
    .success()
    .stdout(predicate::str::contains("Usage"));
}

#[test]
fn version_flag_works() {
  barelybuild_cmd()
    .arg("--version")
    .assert()
    .success()
    .stdout(predicate::str::contains("barelybuild"));
}

#[test]
fn subcommand_help_works() {
  for cmd in &["build", "plan", "info"] {
    barelybuild_cmd()
      .arg(cmd)
      .arg("--help")
      .assert()
      .success()
      .stdout(predicate::str::contains("Usage"));
  }
}

#[test]
fn info_runs() {
  barelybuild_cmd()
    .arg("info")
    .assert()
    .success()
    .stdout(predicate::str::contains("Platforms:"));
}

// =============================================================================
// Plan
// =============================================================================

fn plan_json(env: &TestEnv, flags: &[&str]) -> Value {
  let output = env
    .cmd("plan")
    .args(flags)
    .args(["--format", "json"])
    .output()
    .unwrap();
  assert!(output.status.success(), "plan failed: {}", String::from_utf8_lossy(&output.stderr));
  serde_json::from_slice(&output.stdout).unwrap()
}

#[test]
fn plan_release_linux_with_tests() {
  let env = TestEnv::new();
  let plan = plan_json(&env, &["--linux", "--mac=false", "--windows=false", "--test"]);

  let targets = plan["targets"].as_array().unwrap();
  assert_eq!(targets.len(), 1);
  assert_eq!(targets[0]["name"], "Linux");
  assert_eq!(targets[0]["kind"], "single-config-desktop");
  assert_eq!(
    targets[0]["build_dir"],
    env.build_dir().join("Linux").display().to_string()
  );

  let generate = targets[0]["generate"].as_str().unwrap();
  assert!(generate.starts_with("cmake -S"));
  assert!(generate.contains("-DCMAKE_BUILD_TYPE=Release"));
  assert!(generate.contains("-DENABLE_TESTS=ON"));

  let compile = targets[0]["compile"].as_str().unwrap();
  assert!(compile.ends_with("--config Release"));
}

#[test]
fn plan_expands_android_abis() {
  let env = TestEnv::new();
  let plan = plan_json(
    &env,
    &[
      "--linux=false",
      "--mac=false",
      "--windows=false",
      "--android",
      "--android-abis",
      "arm64-v8a,x86",
      "--android-min-api",
      "21",
    ],
  );

  let targets = plan["targets"].as_array().unwrap();
  let names: Vec<_> = targets.iter().map(|t| t["name"].as_str().unwrap()).collect();
  assert_eq!(names, vec!["Android/arm64-v8a", "Android/x86"]);
  for target in targets {
    assert!(target["generate"].as_str().unwrap().contains("-DANDROID_PLATFORM=android-21"));
  }
}

#[test]
fn plan_is_stable_across_runs() {
  let env = TestEnv::new();
  let flags = ["--linux", "--windows", "--android", "--daisy", "--unity", "--test"];
  assert_eq!(plan_json(&env, &flags), plan_json(&env, &flags));
}

#[test]
fn plan_with_nothing_selected() {
  let env = TestEnv::new();
  env
    .cmd("plan")
    .args(["--linux=false", "--mac=false", "--windows=false"])
    .assert()
    .success()
    .stdout(predicate::str::contains("nothing to build"));
}

#[test]
fn plan_reads_ndk_from_environment() {
  let env = TestEnv::new();
  env
    .cmd("plan")
    .args(["--linux=false", "--mac=false", "--windows=false", "--android", "--android-abis", "x86"])
    .env("ANDROID_NDK_HOME", "/opt/custom-ndk")
    .assert()
    .success()
    .stdout(predicate::str::contains("-DANDROID_NDK=/opt/custom-ndk"));
}

// =============================================================================
// Configuration errors
// =============================================================================

#[test]
fn empty_daisy_prefix_is_a_config_error() {
  let env = TestEnv::new();
  env
    .cmd("plan")
    .args(["--daisy", "--daisy-toolchain-prefix", ""])
    .assert()
    .code(2)
    .stderr(predicate::str::contains("toolchain prefix"));
}

#[test]
fn duplicate_abis_are_a_config_error() {
  let env = TestEnv::new();
  env
    .cmd("build")
    .args(["--android", "--android-abis", "x86,x86"])
    .assert()
    .code(2)
    .stderr(predicate::str::contains("more than once"));
}

#[test]
fn unknown_config_is_rejected() {
  barelybuild_cmd()
    .args(["plan", "--config", "profile"])
    .assert()
    .failure()
    .stderr(predicate::str::contains("profile"));
}
