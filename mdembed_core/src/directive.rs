//! Parsing of embed directives, both the comment on the first line of a
//! fence and the `embed-directive` comments that may precede it.

use std::sync::LazyLock;

use regex::Regex;

use crate::comment::extract_comment_path;
use crate::fence::FenceBlock;
use crate::file_type::FileType;
use crate::file_type::comment_family_of;
use crate::outcome::SkipReason;

static OVERRIDE_DIRECTIVE: LazyLock<Regex> =
	LazyLock::new(|| Regex::new(r"<!--\s*?embed-directive[ ]+?(\S+?)\s*?-->").unwrap());

static IGNORE_NEXT_DIRECTIVE: LazyLock<Regex> =
	LazyLock::new(|| Regex::new(r"<!--\s*?embed-directive[ -]ignore-next\s*?-->").unwrap());

/// `path` optionally followed by a GitHub style `#L<start>-L<end>` suffix.
static EMBED_TARGET: LazyLock<Regex> =
	LazyLock::new(|| Regex::new(r"(?m)\s?(\S+?)((#L(\d+)-L(\d+))|$)").unwrap());

/// An inclusive, 1-indexed range of lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineRange {
	pub start: usize,
	pub end: usize,
}

impl LineRange {
	pub const fn new(start: usize, end: usize) -> Self {
		Self { start, end }
	}
}

/// A resolved reference to the source region a fence should contain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmbedDirective {
	/// The reference as written, range suffix included.
	pub reference: String,
	/// The path to load, without any range suffix.
	pub target_path: String,
	pub line_range: Option<LineRange>,
	/// Set when an `embed-directive <path>` comment before the fence supplied
	/// the path. The rendered fence then carries no comment line.
	pub display_override: Option<String>,
}

impl EmbedDirective {
	/// Returns true when the path came from an override comment rather than
	/// the fence's first line.
	pub fn is_override(&self) -> bool {
		self.display_override.is_some()
	}
}

/// The directives found in the literal text between the previous fence and
/// the current one.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PrecedingDirectives<'a> {
	/// An `embed-directive ignore-next` comment is present.
	pub ignore_next: bool,
	/// Path of the first `embed-directive <path>` comment, if any.
	pub override_path: Option<&'a str>,
}

impl<'a> PrecedingDirectives<'a> {
	pub fn scan(span: &'a str) -> Self {
		Self {
			ignore_next: has_ignore_next(span),
			override_path: find_override_path(span),
		}
	}
}

/// Returns true if `span` contains an ignore-next directive anywhere.
pub fn has_ignore_next(span: &str) -> bool {
	IGNORE_NEXT_DIRECTIVE.is_match(span)
}

/// Returns the path of the first override directive in `span`.
pub fn find_override_path(span: &str) -> Option<&str> {
	OVERRIDE_DIRECTIVE
		.captures(span)
		.and_then(|captures| captures.get(1))
		.map(|m| m.as_str())
}

/// Split a reference token into its path and optional line range.
///
/// A `#` left in the path after the optional `#L<start>-L<end>` suffix has
/// been taken off means the range is malformed.
pub fn parse_embed_target(token: &str) -> Result<(String, Option<LineRange>), SkipReason> {
	let captures = EMBED_TARGET.captures(token).ok_or(SkipReason::NoTarget)?;
	let path = captures.get(1).map_or("", |m| m.as_str());

	if path.contains('#') {
		return Err(SkipReason::MalformedLineRange {
			path: path.to_string(),
		});
	}

	let line_range = match (captures.get(4), captures.get(5)) {
		(Some(start), Some(end)) => {
			Some(LineRange::new(
				parse_line_number(start.as_str()),
				parse_line_number(end.as_str()),
			))
		}
		_ => None,
	};

	Ok((path.to_string(), line_range))
}

/// Digits that overflow `usize` saturate, which clamps like any other range
/// past the end of the file.
fn parse_line_number(digits: &str) -> usize {
	digits.parse().unwrap_or(usize::MAX)
}

/// Work out which file (and range) `fence` should be filled from.
///
/// An ignore-next directive wins over everything. An override directive
/// supplies the path verbatim and skips all first-line checks. Otherwise the
/// fence needs a supported extension whose comment syntax yields a path on
/// the first content line.
pub fn resolve_directive(
	fence: &FenceBlock<'_>,
	preceding: &PrecedingDirectives<'_>,
) -> Result<EmbedDirective, SkipReason> {
	if preceding.ignore_next {
		return Err(SkipReason::Ignored);
	}

	let (reference, display_override) = if let Some(path) = preceding.override_path {
		(path, Some(path.to_string()))
	} else {
		(first_line_reference(fence)?, None)
	};

	let (target_path, line_range) = parse_embed_target(reference)?;
	tracing::trace!(reference, target = %target_path, ?line_range, "resolved embed directive");

	Ok(EmbedDirective {
		reference: reference.to_string(),
		target_path,
		line_range,
		display_override,
	})
}

fn first_line_reference<'a>(fence: &FenceBlock<'a>) -> Result<&'a str, SkipReason> {
	let Some(extension) = fence.extension() else {
		return Err(SkipReason::NoExtension);
	};
	let Some(first_line) = fence.first_line.filter(|line| !line.is_empty()) else {
		return Err(SkipReason::EmptyBlock);
	};
	let Some(file_type) = FileType::from_tag(extension) else {
		return Err(SkipReason::UnsupportedExtension {
			extension: extension.to_string(),
		});
	};
	let Some(family) = comment_family_of(file_type) else {
		return Err(SkipReason::UnresolvedCommentFamily {
			extension: extension.to_string(),
		});
	};

	extract_comment_path(first_line, family).ok_or_else(|| {
		SkipReason::NoDirective {
			extension: extension.to_string(),
		}
	})
}
