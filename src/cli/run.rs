//! # Run Command
//!
//! Validates the requested languages and directories, then runs one
//! processor per language over every directory.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use docauthor::config::load_config;
use docauthor::diff::DiffManager;
use docauthor::error::AuthorError;
use docauthor::git::GitBlame;
use docauthor::handlers::{resolve, supported_languages};
use docauthor::logging::{ColorMode, init_tracing, set_quiet, set_verbose};
use docauthor::output::{print_blank_line, print_start_message, print_summary};
use docauthor::processor::{Processor, ProcessorConfig};
use tracing::debug;

/// Arguments for the run command
#[derive(Args, Debug)]
pub struct RunArgs {
  /// Languages to process
  #[arg(
    short,
    long = "language",
    value_name = "LANG",
    num_args = 1..,
    required = true,
    help = format!("Languages to process. Supported languages: {}", supported_languages().join(", "))
  )]
  pub languages: Vec<String>,

  /// Directories to look for source files in, searched recursively
  #[arg(short, long = "dir", value_name = "DIR", num_args = 1.., required = true)]
  pub dirs: Vec<PathBuf>,

  /// Increase verbosity (-v debug, -vv trace)
  #[arg(short, long, action = clap::ArgAction::Count)]
  pub verbose: u8,

  /// Suppress all output except errors
  #[arg(short, long, conflicts_with = "verbose")]
  pub quiet: bool,

  /// Compute the new author lists without modifying files
  #[arg(long)]
  pub dry_run: bool,

  /// Print a diff of every change to stderr
  #[arg(long)]
  pub show_diff: bool,

  /// File patterns to ignore, relative to each directory (supports glob
  /// patterns)
  #[arg(long, short = 'i', value_name = "GLOB")]
  pub ignore: Vec<String>,

  /// Path to config file (default: .docauthor.toml in the current directory)
  #[arg(long, value_name = "FILE")]
  pub config: Option<PathBuf>,

  /// Ignore config file even if present
  #[arg(long)]
  pub no_config: bool,

  /// Control when to use colored output (auto, never, always)
  #[arg(
    long,
    value_name = "WHEN",
    num_args = 0..=1,
    default_value_t = ColorMode::Auto,
    default_missing_value = "always",
    value_enum
  )]
  pub colors: ColorMode,
}

/// Run the author rewrite with the given arguments
pub async fn run_command(args: RunArgs) -> Result<()> {
  init_tracing(args.quiet, args.verbose);

  if args.verbose > 0 {
    set_verbose();
  } else if args.quiet {
    set_quiet();
  }
  args.colors.apply();

  let current_dir = std::env::current_dir()?;
  let mut config = load_config(args.config.as_deref(), &current_dir, args.no_config)?;
  config.merge_cli_ignores(args.ignore);

  // Both checks happen before any file is touched.
  let handlers = resolve(&args.languages, &config.handler_options())?;
  if let Some(dir) = args.dirs.iter().find(|dir| !dir.is_dir()) {
    return Err(AuthorError::InvalidDirectory(dir.clone()).into());
  }

  let diff_manager = DiffManager::new(args.show_diff);

  for handler in handlers {
    let language = handler.language();
    debug!("Running {} handler", language);

    let processor = Processor::new(
      handler,
      GitBlame::new(config.blame_timeout()),
      ProcessorConfig {
        dry_run: args.dry_run,
        git_only: true,
        ignore_patterns: config.ignore.clone(),
        ignore_authors: config.ignore_authors.clone(),
        diff_manager,
      },
    )?;

    print_start_message(language, args.dirs.len(), args.dry_run);
    let summary = processor.run(&args.dirs).await?;
    print_blank_line();
    print_summary(&summary, args.dry_run);
  }

  Ok(())
}
