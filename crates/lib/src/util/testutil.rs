//! Test utilities for barelybuild-lib.
//!
//! Cross-platform shell helpers for tests that spawn real processes, and a
//! recording [`CommandRunner`] for tests that must not.

use std::collections::VecDeque;

use crate::execute::{CommandRunner, ExecuteError, Invocation};
use crate::post::Prompter;

/// Returns the shell command and args to execute a shell script.
#[cfg(unix)]
pub fn shell_cmd(script: &str) -> (&'static str, Vec<String>) {
  ("/bin/sh", vec!["-c".to_string(), script.to_string()])
}

#[cfg(windows)]
pub fn shell_cmd(script: &str) -> (&'static str, Vec<String>) {
  ("cmd.exe", vec!["/C".to_string(), script.to_string()])
}

/// Returns the command and args to create a marker file in the current directory.
#[cfg(unix)]
pub fn touch_file(filename: &str) -> (&'static str, Vec<String>) {
  ("/usr/bin/touch", vec![filename.to_string()])
}

#[cfg(windows)]
pub fn touch_file(filename: &str) -> (&'static str, Vec<String>) {
  (
    "powershell.exe",
    vec![
      "-NoProfile".to_string(),
      "-Command".to_string(),
      format!("New-Item -ItemType File -Path '{}' -Force | Out-Null", filename),
    ],
  )
}

/// Records every invocation instead of running it.
#[derive(Debug, Default)]
pub struct RecordingRunner {
  pub invocations: Vec<Invocation>,
  fail_at: Option<(usize, i32)>,
}

impl RecordingRunner {
  /// Fail the invocation at `index` (0-based) with exit `code`.
  pub fn failing_at(index: usize, code: i32) -> Self {
    Self {
      invocations: Vec::new(),
      fail_at: Some((index, code)),
    }
  }

  pub fn programs(&self) -> Vec<&str> {
    self.invocations.iter().map(|i| i.program.as_str()).collect()
  }
}

impl CommandRunner for RecordingRunner {
  fn run(&mut self, invocation: &Invocation) -> Result<(), ExecuteError> {
    let index = self.invocations.len();
    self.invocations.push(invocation.clone());
    match self.fail_at {
      Some((at, code)) if at == index => Err(ExecuteError::CommandFailed {
        command: invocation.to_string(),
        code: Some(code),
      }),
      _ => Ok(()),
    }
  }
}

/// Accepts every prompt without asking.
#[derive(Debug, Clone, Copy, Default)]
pub struct AssumeYes;

impl Prompter for AssumeYes {
  fn confirm(&mut self, _message: &str) -> std::io::Result<bool> {
    Ok(true)
  }
}

/// Answers prompts from a fixed script, recording each question.
#[derive(Debug, Default)]
pub struct ScriptedPrompter {
  pub asked: Vec<String>,
  answers: VecDeque<bool>,
}

impl ScriptedPrompter {
  pub fn answering(answers: impl IntoIterator<Item = bool>) -> Self {
    Self {
      asked: Vec::new(),
      answers: answers.into_iter().collect(),
    }
  }
}

impl Prompter for ScriptedPrompter {
  fn confirm(&mut self, message: &str) -> std::io::Result<bool> {
    self.asked.push(message.to_string());
    // Unscripted questions are accepted.
    Ok(self.answers.pop_front().unwrap_or(true))
  }
}
