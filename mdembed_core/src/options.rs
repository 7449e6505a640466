use std::path::Path;
use std::path::PathBuf;

/// How the result of a transform is going to be used.
///
/// The transformed text is the same in every mode. The mode only decides
/// which document the diagnostic line numbers refer to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RunMode {
	/// The output replaces the document on disk.
	#[default]
	Write,
	/// Report what would change without writing.
	DryRun,
	/// Print the output instead of writing it.
	Stdout,
	/// Check that nothing would change.
	Verify,
}

impl RunMode {
	/// Returns true when the input document is left untouched, so diagnostics
	/// refer to its original line numbers.
	pub fn is_read_only(self) -> bool {
		!matches!(self, Self::Write)
	}
}

/// Options for a single document transform.
#[derive(Debug, Clone, Default)]
pub struct EmbedOptions {
	/// Base directory for embed paths. When unset, paths resolve against the
	/// directory of the document being processed.
	pub source_root: Option<PathBuf>,
	/// Leave the first-line comment out of rendered fences.
	pub strip_embed_comment: bool,
	pub mode: RunMode,
	/// Directory that a relative `source_root` or document path is resolved
	/// against. Defaults to the process working directory.
	pub working_dir: Option<PathBuf>,
}

impl EmbedOptions {
	/// The directory relative paths are resolved against.
	pub fn working_dir(&self) -> PathBuf {
		self.working_dir.clone().unwrap_or_else(|| {
			std::env::current_dir().unwrap_or_else(|_| Path::new(".").to_path_buf())
		})
	}
}
