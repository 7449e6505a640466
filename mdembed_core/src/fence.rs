//! Locating fenced code blocks and the line ending style of a document.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

/// Matches from an opening triple backtick (with the indentation in front of
/// it) through the first later line that starts with a triple backtick.
/// Capture group 1 is the leading indentation.
static CODE_FENCE: LazyLock<Regex> =
	LazyLock::new(|| Regex::new(r"(?m)([ \t]*?)```([\s\S]*?)^[ \t]*?```").unwrap());

/// The line ending used throughout a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineEnding {
	#[default]
	Lf,
	CrLf,
}

impl LineEnding {
	/// Detect the line ending of `text`. Any CRLF anywhere in the text wins.
	pub fn detect(text: &str) -> Self {
		if text.contains("\r\n") {
			Self::CrLf
		} else {
			Self::Lf
		}
	}

	pub const fn as_str(self) -> &'static str {
		match self {
			Self::Lf => "\n",
			Self::CrLf => "\r\n",
		}
	}

	/// Number of lines `text` spans when split on this line ending.
	pub fn count_lines(self, text: &str) -> usize {
		text.matches(self.as_str()).count() + 1
	}
}

impl fmt::Display for LineEnding {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

/// A fenced block found in a document. Borrows from the document text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FenceBlock<'a> {
	/// Spaces or tabs in front of the opening delimiter on its line.
	pub leading_indent: &'a str,
	/// Everything after the opening delimiter up to the end of its line.
	pub extension_tag: &'a str,
	/// The first content line. Only present when the block spans at least
	/// three lines (opening, content, closing).
	pub first_line: Option<&'a str>,
	/// The full matched text, delimiters included.
	pub raw: &'a str,
	/// Byte offset of `raw` in the document.
	pub offset: usize,
}

impl<'a> FenceBlock<'a> {
	/// The extension tag, or `None` when the fence has none.
	pub fn extension(&self) -> Option<&'a str> {
		if self.extension_tag.is_empty() {
			None
		} else {
			Some(self.extension_tag)
		}
	}

	/// Byte offset just past the closing delimiter.
	pub fn end(&self) -> usize {
		self.offset + self.raw.len()
	}
}

/// Find every closed fenced block in `source`, left to right and without
/// overlap. An opening delimiter without a closing one is never matched.
pub fn find_fences(source: &str, line_ending: LineEnding) -> Vec<FenceBlock<'_>> {
	CODE_FENCE
		.captures_iter(source)
		.filter_map(|captures| {
			let whole = captures.get(0)?;
			let leading_indent = captures.get(1).map_or("", |m| m.as_str());
			Some(fence_block(
				whole.as_str(),
				whole.start(),
				leading_indent,
				line_ending,
			))
		})
		.collect()
}

fn fence_block<'a>(
	raw: &'a str,
	offset: usize,
	leading_indent: &'a str,
	line_ending: LineEnding,
) -> FenceBlock<'a> {
	let after_delimiter = raw
		.find("```")
		.map_or("", |index| &raw[index + 3..]);
	let tag_end = after_delimiter
		.find(['\r', '\n'])
		.unwrap_or(after_delimiter.len());
	let extension_tag = &after_delimiter[..tag_end];

	let lines: Vec<&str> = raw.split(line_ending.as_str()).collect();
	let first_line = if lines.len() >= 3 { Some(lines[1]) } else { None };

	FenceBlock {
		leading_indent,
		extension_tag,
		first_line,
		raw,
		offset,
	}
}
