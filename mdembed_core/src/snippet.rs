//! Loading, slicing and dedenting the source region a directive points at.

use std::path::Component;
use std::path::Path;
use std::path::PathBuf;

use crate::directive::EmbedDirective;
use crate::directive::LineRange;
use crate::fence::LineEnding;
use crate::options::EmbedOptions;
use crate::outcome::SkipReason;

/// Source text ready to be placed inside a fence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snippet {
	/// Dedented and trimmed text, joined with the document's line ending.
	pub body: String,
	/// Number of source lines that were selected, before trimming.
	pub line_count: usize,
}

/// Resolve `target` against the configured source root, or against the
/// directory containing `document_path` when no root is configured.
///
/// Relative bases are anchored at the working directory of `options`. An
/// absolute root or target replaces whatever precedes it. The result is
/// normalized lexically.
pub fn resolve_source_path(target: &str, document_path: &Path, options: &EmbedOptions) -> PathBuf {
	let working_dir = options.working_dir();
	let base = match &options.source_root {
		Some(root) => working_dir.join(root),
		None => working_dir.join(document_path.parent().unwrap_or_else(|| Path::new(""))),
	};

	normalize_path(&base.join(target))
}

/// Remove `.` components and fold `..` into its parent without touching the
/// filesystem.
fn normalize_path(path: &Path) -> PathBuf {
	let mut normalized = PathBuf::new();

	for component in path.components() {
		match component {
			Component::CurDir => {}
			Component::ParentDir => {
				match normalized.components().next_back() {
					Some(Component::Normal(_)) => {
						normalized.pop();
					}
					Some(Component::RootDir | Component::Prefix(_)) => {}
					_ => normalized.push(".."),
				}
			}
			other => normalized.push(other.as_os_str()),
		}
	}

	normalized
}

/// Load the region `directive` refers to and prepare it for embedding.
pub fn extract_snippet(
	directive: &EmbedDirective,
	document_path: &Path,
	line_ending: LineEnding,
	options: &EmbedOptions,
) -> Result<Snippet, SkipReason> {
	let resolved = resolve_source_path(&directive.target_path, document_path, options);

	if !resolved.exists() {
		return Err(SkipReason::FileNotFound {
			path: directive.target_path.clone(),
			resolved,
		});
	}

	let content = std::fs::read_to_string(&resolved).map_err(|e| {
		SkipReason::Unreadable {
			resolved: resolved.clone(),
			reason: e.to_string(),
		}
	})?;

	let lines = split_lines(&content);
	let selected = select_lines(&lines, directive.line_range);
	let indent = minimum_indent(selected);
	let body = dedent_lines(selected, indent)
		.join(line_ending.as_str())
		.trim()
		.to_string();

	if body.contains("```") {
		return Err(SkipReason::FenceCollision {
			path: directive.target_path.clone(),
		});
	}

	tracing::debug!(
		path = %resolved.display(),
		lines = selected.len(),
		indent,
		"extracted snippet"
	);

	Ok(Snippet {
		body,
		line_count: selected.len(),
	})
}

/// Split on `\n`, dropping the `\r` of any CRLF pair. A trailing newline
/// produces a final empty line.
pub fn split_lines(content: &str) -> Vec<&str> {
	content
		.split('\n')
		.map(|line| line.strip_suffix('\r').unwrap_or(line))
		.collect()
}

/// Select the 1-indexed inclusive `range` from `lines`. Bounds past the end
/// are clamped and an inverted range selects nothing. A start of `0` counts
/// from the end and begins at the last line.
pub fn select_lines<'a, 'b>(lines: &'b [&'a str], range: Option<LineRange>) -> &'b [&'a str] {
	let Some(range) = range else {
		return lines;
	};

	let start = match range.start {
		0 => lines.len().saturating_sub(1),
		start => (start - 1).min(lines.len()),
	};
	let end = range.end.min(lines.len());

	if start >= end { &[] } else { &lines[start..end] }
}

/// The smallest count of leading whitespace characters over `lines`.
///
/// Once a line without leading whitespace is seen the minimum stays at
/// zero. An empty line restarts the count so the next non-empty line sets a
/// fresh minimum. Trailing empty lines leave the minimum alone, and a
/// selection with no non-empty lines has a minimum of zero.
pub fn minimum_indent(lines: &[&str]) -> usize {
	let mut minimum: Option<usize> = None;
	let mut restart = false;

	for line in lines {
		if minimum == Some(0) {
			return 0;
		}

		if line.is_empty() {
			restart = true;
			continue;
		}

		let leading = line.chars().take_while(|c| c.is_whitespace()).count();
		minimum = match minimum {
			Some(current) if !restart => Some(current.min(leading)),
			_ => Some(leading),
		};
		restart = false;
	}

	minimum.unwrap_or(0)
}

/// Strip the first `indent` characters from every line.
pub fn dedent_lines<'a>(lines: &[&'a str], indent: usize) -> Vec<&'a str> {
	lines
		.iter()
		.map(|line| {
			line.char_indices()
				.nth(indent)
				.map_or("", |(index, _)| &line[index..])
		})
		.collect()
}
