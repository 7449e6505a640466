//! Rebuilding a fence around an embedded snippet.

use crate::fence::LineEnding;
use crate::outcome::ReplacementOutcome;
use crate::outcome::SkipReason;

/// Everything needed to render a replacement fence.
#[derive(Debug, Clone, Copy)]
pub struct RenderRequest<'a> {
	/// Extension tag written after the opening delimiter.
	pub extension: &'a str,
	/// The fence's first line, carrying the embed comment.
	pub comment_line: Option<&'a str>,
	/// The dedented snippet.
	pub body: &'a str,
	/// Indentation of the original opening delimiter, applied to every line.
	pub leading_indent: &'a str,
	pub line_ending: LineEnding,
	/// Leave out the comment line and the blank line after it.
	pub omit_comment: bool,
}

/// Render the fence text for `request`.
///
/// With the comment kept the layout is the opening delimiter, the trimmed
/// comment line, one blank line, the body and the closing delimiter.
pub fn render_fence(request: &RenderRequest<'_>) -> String {
	let RenderRequest {
		extension,
		comment_line,
		body,
		leading_indent,
		line_ending,
		omit_comment,
	} = *request;
	let eol = line_ending.as_str();

	let fence = if omit_comment {
		format!("```{extension}{eol}{body}{eol}```")
	} else {
		let comment = comment_line.unwrap_or_default().trim();
		format!("```{extension}{eol}{comment}{eol}{eol}{body}{eol}```")
	};

	indent_lines(&fence, leading_indent, line_ending)
}

/// Prefix every line of `text`, blank ones included, with `indent`.
pub fn indent_lines(text: &str, indent: &str, line_ending: LineEnding) -> String {
	if indent.is_empty() {
		return text.to_string();
	}

	text.split(line_ending.as_str())
		.map(|line| format!("{indent}{line}"))
		.collect::<Vec<_>>()
		.join(line_ending.as_str())
}

/// Compare a rendered fence against the original block text.
pub fn compare_with_original(
	rendered: String,
	original: &str,
	line_count: usize,
) -> ReplacementOutcome {
	if rendered == original {
		ReplacementOutcome::Unchanged(SkipReason::AlreadyUpToDate)
	} else {
		ReplacementOutcome::Replaced {
			text: rendered,
			line_count,
		}
	}
}
