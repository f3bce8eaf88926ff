//! Terminal output for build progress.
//!
//! Progress lines go to stdout. Warnings and errors go to stderr, which keeps
//! `plan --format json` parseable.

use std::time::Duration;

use anyhow::Context;
use clap::ValueEnum;
use owo_colors::{OwoColorize, Stream, Style};

#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum OutputFormat {
  #[default]
  Text,
  Json,
}

impl OutputFormat {
  pub fn is_json(self) -> bool {
    matches!(self, OutputFormat::Json)
  }
}

pub mod symbols {
  pub const SUCCESS: &str = "✓";
  pub const ERROR: &str = "✗";
  pub const WARNING: &str = "⚠";
  pub const INFO: &str = "•";
  pub const ARROW: &str = "→";
}

/// Compact elapsed time, e.g. `850ms`, `12.40s`, `3m 7s`.
pub fn format_duration(duration: Duration) -> String {
  match duration.as_secs() {
    0 => format!("{}ms", duration.subsec_millis()),
    secs @ 1..=59 => format!("{secs}.{:02}s", duration.subsec_millis() / 10),
    secs => format!("{}m {}s", secs / 60, secs % 60),
  }
}

// Stderr lines color the whole message, stdout lines only the symbol.
fn status_line(symbol: &str, style: Style, message: &str, to_stderr: bool) {
  if to_stderr {
    eprintln!(
      "{} {}",
      symbol.if_supports_color(Stream::Stderr, |s| s.style(style)),
      message.if_supports_color(Stream::Stderr, |s| s.style(style))
    );
  } else {
    println!(
      "{} {}",
      symbol.if_supports_color(Stream::Stdout, |s| s.style(style)),
      message
    );
  }
}

pub fn print_success(message: &str) {
  status_line(symbols::SUCCESS, Style::new().green(), message, false);
}

pub fn print_info(message: &str) {
  status_line(symbols::INFO, Style::new().blue(), message, false);
}

pub fn print_warning(message: &str) {
  status_line(symbols::WARNING, Style::new().yellow(), message, true);
}

pub fn print_error(message: &str) {
  status_line(symbols::ERROR, Style::new().red(), message, true);
}

/// An indented `label: value` line under the current heading.
pub fn print_stat(label: &str, value: &str) {
  println!("  {}: {value}", label.if_supports_color(Stream::Stdout, |s| s.dimmed()));
}

/// One external command a target would run, e.g. `→ generate cmake -S ...`.
pub fn print_step(label: &str, command: &str) {
  println!(
    "    {} {} {command}",
    symbols::ARROW.if_supports_color(Stream::Stdout, |s| s.cyan()),
    label.if_supports_color(Stream::Stdout, |s| s.dimmed())
  );
}

pub fn print_json<T: serde::Serialize>(value: &T) -> anyhow::Result<()> {
  let json = serde_json::to_string_pretty(value).context("Failed to serialize plan to JSON")?;
  println!("{json}");
  Ok(())
}
