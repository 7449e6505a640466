use miette::Diagnostic;
use thiserror::Error;

/// Hard failures raised outside the per-block embedding pipeline.
///
/// Problems with an individual fence never surface here. They are reported
/// as a [`SkipReason`](crate::SkipReason) on that block while the rest of the
/// document is still processed.
#[derive(Debug, Diagnostic, Error)]
#[non_exhaustive]
pub enum EmbedError {
	#[error(transparent)]
	#[diagnostic(code(mdembed::io_error))]
	Io(#[from] std::io::Error),

	#[error("failed to parse config file: {0}")]
	#[diagnostic(
		code(mdembed::config_parse),
		help("check that mdembed.toml is valid TOML with `source_root`, `strip_embed_comment` and/or an [exclude] section")
	)]
	ConfigParse(String),

	#[error("invalid file pattern `{pattern}`: {reason}")]
	#[diagnostic(
		code(mdembed::invalid_pattern),
		help("patterns use glob syntax, for example `docs/**/*.md`")
	)]
	InvalidPattern { pattern: String, reason: String },

	#[error("no markdown files matched: {patterns}")]
	#[diagnostic(
		code(mdembed::no_input_files),
		help("pass one or more file paths or glob patterns, for example `mdembed README.md`")
	)]
	NoInputFiles { patterns: String },

	#[error("`--stdout` can only be used with a single file, but {count} files were matched")]
	#[diagnostic(
		code(mdembed::stdout_multiple_files),
		help("narrow the file arguments down to one document or drop `--stdout`")
	)]
	StdoutWithMultipleFiles { count: usize },

	#[error("symlink cycle detected at: `{path}`")]
	#[diagnostic(
		code(mdembed::symlink_cycle),
		help("remove the circular symlink or exclude this path")
	)]
	SymlinkCycle { path: String },
}

pub type EmbedResult<T> = Result<T, EmbedError>;
pub type AnyError = Box<dyn std::error::Error>;
pub type AnyEmptyResult = Result<(), AnyError>;
pub type AnyResult<T> = Result<T, AnyError>;
