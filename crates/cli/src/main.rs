use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use barelybuild_lib::config::ConfigError;
use barelybuild_lib::execute::ExecuteError;

mod args;
mod cmd;
mod output;
mod prompts;

use args::BuildArgs;
use cmd::{cmd_build, cmd_info, cmd_plan};
use output::{OutputFormat, print_error};

/// Exit status for an invalid configuration.
const CONFIG_ERROR_EXIT: u8 = 2;

/// barelybuild - build the barelymusician library for every requested platform
#[derive(Parser)]
#[command(name = "barelybuild")]
#[command(author, version, about, long_about = None)]
struct Cli {
  /// Enable verbose output
  #[arg(short, long, global = true)]
  verbose: bool,

  #[command(subcommand)]
  command: Commands,
}

#[derive(Subcommand)]
enum Commands {
  /// Generate and compile the selected targets, then run post-build actions
  Build {
    #[command(flatten)]
    args: BuildArgs,

    /// Answer yes to every confirmation prompt
    #[arg(short, long)]
    yes: bool,
  },

  /// Show the targets and commands a build would run
  Plan {
    #[command(flatten)]
    args: BuildArgs,

    /// Output format
    #[arg(long, value_enum, default_value_t)]
    format: OutputFormat,
  },

  /// Show the detected host platform
  Info,
}

fn main() -> ExitCode {
  let cli = Cli::parse();

  let default_level = if cli.verbose { "debug" } else { "info" };
  tracing_subscriber::fmt()
    .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)))
    .with_writer(std::io::stderr)
    .without_time()
    .init();

  let result = match cli.command {
    Commands::Build { args, yes } => cmd_build(&args, yes),
    Commands::Plan { args, format } => cmd_plan(&args, format),
    Commands::Info => {
      cmd_info();
      Ok(())
    }
  };

  match result {
    Ok(()) => ExitCode::SUCCESS,
    Err(err) => {
      print_error(&format!("{err:#}"));
      exit_code_for(&err)
    }
  }
}

/// External tool failures propagate the tool's exit status.
fn exit_code_for(err: &anyhow::Error) -> ExitCode {
  for cause in err.chain() {
    if let Some(code) = cause.downcast_ref::<ExecuteError>().and_then(ExecuteError::exit_code) {
      return ExitCode::from(u8::try_from(code).ok().filter(|c| *c != 0).unwrap_or(1));
    }
    if cause.downcast_ref::<ConfigError>().is_some() {
      return ExitCode::from(CONFIG_ERROR_EXIT);
    }
  }
  ExitCode::FAILURE
}
