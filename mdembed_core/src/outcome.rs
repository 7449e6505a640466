use std::path::PathBuf;

use crate::file_type::supported_tags;

/// How loudly a block outcome should be reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
	/// Routine, nothing to act on.
	Info,
	/// Deliberately skipped.
	Notice,
	/// Skipped because the fence is not something the engine handles.
	Warning,
	/// Skipped because the directive could not be honoured.
	Error,
}

/// Why a fenced block was left exactly as it was.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SkipReason {
	/// An `embed-directive ignore-next` comment precedes the fence.
	Ignored,
	/// The fence has no extension tag and no override directive.
	NoExtension,
	/// The fence has no first content line and no override directive.
	EmptyBlock,
	/// The extension tag is not one of the supported tags.
	UnsupportedExtension { extension: String },
	/// The extension tag is supported but maps to no comment family.
	UnresolvedCommentFamily { extension: String },
	/// The first content line holds no comment with a path.
	NoDirective { extension: String },
	/// A directive was found but no path could be read from it.
	NoTarget,
	/// The path carries a `#` that is not a `#L<start>-L<end>` suffix.
	MalformedLineRange { path: String },
	/// The referenced file does not exist.
	FileNotFound { path: String, resolved: PathBuf },
	/// The referenced path exists but could not be read as text.
	Unreadable { resolved: PathBuf, reason: String },
	/// The selected snippet itself contains a fence delimiter.
	FenceCollision { path: String },
	/// The rendered fence is identical to the current one.
	AlreadyUpToDate,
}

impl SkipReason {
	/// Human-readable message for this outcome.
	pub fn message(&self) -> String {
		match self {
			Self::Ignored => "\"Ignore next\" comment detected, skipping code block...".to_string(),
			Self::NoExtension => "No code extension detected, skipping code block...".to_string(),
			Self::EmptyBlock => {
				"Code block is empty & no preceding embed-directive comment, skipping...".to_string()
			}
			Self::UnsupportedExtension { extension } => {
				format!(
					"Unsupported file extension [{extension}], supported extensions are {}, \
					 skipping code block",
					supported_tags()
				)
			}
			Self::UnresolvedCommentFamily { extension } => {
				format!(
					"File extension {extension} marked as supported, but comment family could not \
					 be determined. Please report this issue."
				)
			}
			Self::NoDirective { extension } => {
				format!("No comment detected in first line for block with extension {extension}")
			}
			Self::NoTarget => "No file found in embed line".to_string(),
			Self::MalformedLineRange { path } => {
				format!(
					"Incorrectly formatted line numbering string {path}, Expecting Github \
					 formatting e.g. #L10-L20"
				)
			}
			Self::FileNotFound { path, resolved } => {
				format!(
					"Found filename {path} in comment in first line, but file does not exist at {}!",
					resolved.display()
				)
			}
			Self::Unreadable { resolved, reason } => {
				format!("Could not read {}: {reason}", resolved.display())
			}
			Self::FenceCollision { path } => {
				format!(
					"Output snippet for file {path} contains a code fence. Refusing to embed as \
					 that would break the document"
				)
			}
			Self::AlreadyUpToDate => "No changes required, already up to date".to_string(),
		}
	}

	pub fn severity(&self) -> Severity {
		match self {
			Self::NoDirective { .. } | Self::NoTarget | Self::AlreadyUpToDate => Severity::Info,
			Self::Ignored | Self::NoExtension | Self::EmptyBlock => Severity::Notice,
			Self::UnsupportedExtension { .. } => Severity::Warning,
			Self::UnresolvedCommentFamily { .. }
			| Self::MalformedLineRange { .. }
			| Self::FileNotFound { .. }
			| Self::Unreadable { .. }
			| Self::FenceCollision { .. } => Severity::Error,
		}
	}

	/// Short stable identifier, used by machine-readable output.
	pub fn code(&self) -> &'static str {
		match self {
			Self::Ignored => "ignored",
			Self::NoExtension => "no_extension",
			Self::EmptyBlock => "empty_block",
			Self::UnsupportedExtension { .. } => "unsupported_extension",
			Self::UnresolvedCommentFamily { .. } => "unresolved_comment_family",
			Self::NoDirective { .. } => "no_directive",
			Self::NoTarget => "no_target",
			Self::MalformedLineRange { .. } => "malformed_line_range",
			Self::FileNotFound { .. } => "file_not_found",
			Self::Unreadable { .. } => "unreadable",
			Self::FenceCollision { .. } => "fence_collision",
			Self::AlreadyUpToDate => "up_to_date",
		}
	}
}

/// The result of running one fenced block through the pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplacementOutcome {
	/// The block is kept byte for byte.
	Unchanged(SkipReason),
	/// The block is replaced by `text`, built from `line_count` selected
	/// source lines.
	Replaced { text: String, line_count: usize },
}

impl ReplacementOutcome {
	pub fn is_replaced(&self) -> bool {
		matches!(self, Self::Replaced { .. })
	}

	pub fn skip_reason(&self) -> Option<&SkipReason> {
		match self {
			Self::Unchanged(reason) => Some(reason),
			Self::Replaced { .. } => None,
		}
	}
}

/// What happened to one fenced block, with the context needed to report it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockReport {
	/// 1-indexed line of the opening delimiter. In write mode this is the
	/// line in the output document, otherwise the line in the input.
	pub start_line: usize,
	/// 1-indexed line of the closing delimiter, counted from `start_line`
	/// over the text the block ends up with.
	pub end_line: usize,
	/// The fence extension tag, when it has one.
	pub extension: Option<String>,
	/// The reference text the embed was read from (path plus any range),
	/// when a directive was found.
	pub target: Option<String>,
	pub outcome: ReplacementOutcome,
}

/// The transformed document together with one report per fenced block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransformReport {
	pub output: String,
	pub blocks: Vec<BlockReport>,
}

impl TransformReport {
	/// Returns true if at least one block was replaced.
	pub fn changed(&self) -> bool {
		self.blocks.iter().any(|block| block.outcome.is_replaced())
	}

	/// Number of replaced blocks.
	pub fn replaced_count(&self) -> usize {
		self.blocks
			.iter()
			.filter(|block| block.outcome.is_replaced())
			.count()
	}
}
