use std::path::PathBuf;

use clap::Parser;
use clap::ValueEnum;
use mdembed_core::RunMode;

#[derive(Parser)]
#[command(
	author,
	version,
	about = "Keep fenced code blocks in markdown in sync with the source files they reference.",
	long_about = "mdembed fills fenced code blocks in markdown documents with the contents of the \
	              source files they reference.\n\nA fence names its source in a comment on its \
	              first line, optionally with a GitHub style line range:\n\n  ```rust\n  // \
	              src/lib.rs#L10-L20\n  ```\n\nRun it again at any time to refresh every block. \
	              Use `--verify` in CI to fail when the documents have drifted."
)]
#[allow(clippy::struct_excessive_bools)]
pub struct MdembedCli {
	/// Markdown files or glob patterns to process, for example `README.md` or
	/// `docs/**/*.md`.
	#[arg(required = true, value_name = "FILES")]
	pub files: Vec<String>,

	/// Check that every block is up to date without writing anything. Exits
	/// with status 1 when a block would change.
	#[arg(long, default_value_t = false, conflicts_with_all = ["dry_run", "stdout"])]
	pub verify: bool,

	/// Report what would change without writing any files.
	#[arg(long, default_value_t = false, conflicts_with = "stdout")]
	pub dry_run: bool,

	/// Print the processed document to stdout instead of writing it back.
	/// Diagnostics move to stderr. Only one document may be given.
	#[arg(long, default_value_t = false)]
	pub stdout: bool,

	/// Directory embed paths are resolved against. Defaults to the directory
	/// of each document.
	#[arg(long, value_name = "DIR")]
	pub source_root: Option<PathBuf>,

	/// Leave the first-line embed comment out of rendered blocks.
	#[arg(long, default_value_t = false)]
	pub strip_embed_comment: bool,

	/// Suppress the per-block diagnostic log.
	#[arg(long, default_value_t = false)]
	pub silent: bool,

	/// Show a unified diff for every document that changes.
	#[arg(long, default_value_t = false)]
	pub diff: bool,

	/// Output format. Use `text` for the human readable log, `json` for a
	/// summary object or `github` for GitHub Actions annotations.
	#[arg(long, value_enum, default_value_t = OutputFormat::Text)]
	pub format: OutputFormat,

	/// Disable colored output.
	#[arg(long, default_value_t = false)]
	pub no_color: bool,

	/// Enable debug logging.
	#[arg(long, short, default_value_t = false)]
	pub verbose: bool,

	/// Working directory that file arguments and the config file are
	/// resolved in.
	#[arg(long, short)]
	pub path: Option<PathBuf>,
}

impl MdembedCli {
	/// The run mode selected by the mutually exclusive mode flags.
	pub fn mode(&self) -> RunMode {
		if self.verify {
			RunMode::Verify
		} else if self.dry_run {
			RunMode::DryRun
		} else if self.stdout {
			RunMode::Stdout
		} else {
			RunMode::Write
		}
	}
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
	#[default]
	Text,
	Json,
	Github,
}
