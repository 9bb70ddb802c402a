//! # docauthor
//!
//! A tool that keeps the `@author` tags of source files in sync with their
//! git history.

mod cli;

use anyhow::Result;

use crate::cli::{Cli, run_command};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
  let cli = Cli::parse_args();

  run_command(cli.args).await
}
