//! `mdembed_core` is the engine behind [mdembed](https://github.com/mdembed/mdembed). It keeps fenced code blocks in markdown documents in sync with the source files they reference. A fence names its source in a comment on its first line, and the engine replaces the body with the current contents of that file (or a range of its lines).
//!
//! ## Processing Pipeline
//!
//! ```text
//! Markdown document
//!   -> Fence scanner (finds closed ``` blocks, detects the line ending)
//!   -> Directive parser (ignore-next / override comments, first-line comment by file type)
//!   -> Snippet extractor (resolves the path, slices the range, dedents, guards against nested fences)
//!   -> Fence renderer (rebuilds the fence, re-indents, compares with the original)
//!   -> Output document + one report per block
//! ```
//!
//! ## Directives
//!
//! ````markdown
//! ```rust
//! // src/lib.rs#L10-L20
//! ```
//!
//! <!-- embed-directive src/schema.json -->
//! ```json
//! ```
//!
//! <!-- embed-directive ignore-next -->
//! ```rust
//! // left exactly as written
//! ```
//! ````
//!
//! ## Modules
//!
//! - [`file_type`]: The supported fence extension tags and their comment families.
//! - [`comment`]: Reads the path out of a first-line comment.
//! - [`directive`]: Directive grammar, override and ignore-next comments.
//! - [`snippet`]: Path resolution, line ranges and dedenting.
//! - [`render`]: Fence reconstruction.
//! - [`config`]: Configuration loading from `mdembed.toml`.
//! - [`discovery`]: Expands file and glob arguments into documents.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::path::Path;
//!
//! use mdembed_core::EmbedOptions;
//! use mdembed_core::transform_with_report;
//!
//! let path = Path::new("README.md");
//! let source = std::fs::read_to_string(path).unwrap();
//! let report = transform_with_report(&source, path, &EmbedOptions::default());
//!
//! for block in &report.blocks {
//! 	if let Some(reason) = block.outcome.skip_reason() {
//! 		eprintln!("L{}-L{}: {}", block.start_line, block.end_line, reason.message());
//! 	}
//! }
//!
//! if report.changed() {
//! 	std::fs::write(path, &report.output).unwrap();
//! }
//! ```

pub use comment::*;
pub use config::*;
pub use directive::*;
pub use discovery::*;
pub use error::*;
pub use fence::*;
pub use file_type::*;
pub use options::*;
pub use outcome::*;
pub use render::*;
pub use scanner::*;
pub use snippet::*;

pub mod comment;
pub mod config;
pub mod directive;
pub mod discovery;
#[allow(unused_assignments)]
mod error;
mod fence;
pub mod file_type;
mod options;
mod outcome;
pub mod render;
mod scanner;
pub mod snippet;

#[cfg(test)]
mod __fixtures;
