//! # docauthor
//!
//! A tool that writes the list of contributors of each source file into the
//! file's documentation block, using `git blame` as the source of truth.
//!
//! `docauthor` modifies source files in place. Every existing authorship line
//! is replaced with the current list of authors, sorted by surname, so running
//! it twice in a row leaves the files untouched.
//!
//! ## Features
//!
//! * Recursively scan directories for files of the selected languages
//! * Add authors to the documentation block preceding a type declaration, or
//!   create that block when it is missing
//! * Dry-run and diff modes to preview changes
//! * Ignore patterns for files and for bot authors
//!
//! ## Usage as a Library
//!
//! ```rust,no_run
//! use std::path::PathBuf;
//!
//! use docauthor::git::GitBlame;
//! use docauthor::handlers::{HandlerOptions, resolve};
//! use docauthor::processor::{Processor, ProcessorConfig};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> anyhow::Result<()> {
//!     let handlers = resolve(&["java".to_string()], &HandlerOptions::default())?;
//!
//!     for handler in handlers {
//!         let processor = Processor::new(handler, GitBlame::default(), ProcessorConfig::default())?;
//!         let summary = processor.run(&[PathBuf::from("src")]).await?;
//!         println!("{} files updated", summary.files_changed);
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Modules
//!
//! * [`processor`] - Per-file pipeline for one language
//! * [`handlers`] - Language handlers and the language registry
//! * [`authors`] - Author extraction from blame output
//! * [`git`] - `git blame` invocation
//!
//! [`processor`]: crate::processor
//! [`handlers`]: crate::handlers
//! [`authors`]: crate::authors
//! [`git`]: crate::git

pub mod authors;
pub mod config;
pub mod diff;
pub mod error;
pub mod git;
pub mod handlers;
pub mod logging;
pub mod output;
pub mod processor;
pub mod report;
pub mod workspace;
