//! barelybuild-lib: configuration-to-build-plan resolution and execution
//!
//! This crate turns a declarative selection of platforms and feature flags
//! into external build-system invocations:
//! - `config`: validates raw input into an immutable `BuildConfiguration`
//! - `plan`: expands a configuration into ordered `BuildTarget`s
//! - `execute`: cleans, generates, and compiles each target in sequence
//! - `post`: runs tests, benchmarks, device flashing, and demos afterwards

pub mod config;
pub mod consts;
pub mod execute;
pub mod plan;
pub mod platform;
pub mod post;

#[cfg(test)]
mod util;
