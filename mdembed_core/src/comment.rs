//! Reads the path token out of a single-line comment written in one of the
//! supported [`CommentFamily`] styles.

use std::collections::HashMap;
use std::sync::LazyLock;

use regex::Regex;

use crate::file_type::CommentFamily;

const ALL_FAMILIES: [CommentFamily; 7] = [
	CommentFamily::None,
	CommentFamily::C,
	CommentFamily::Xml,
	CommentFamily::Hash,
	CommentFamily::SingleQuote,
	CommentFamily::DoublePercent,
	CommentFamily::DoubleHyphens,
];

/// One matcher per family. Capture group 1 is the token. `None` for the
/// family without comment syntax.
static COMMENT_READERS: LazyLock<HashMap<CommentFamily, Option<Regex>>> = LazyLock::new(|| {
	ALL_FAMILIES
		.iter()
		.map(|family| (*family, comment_matcher(*family)))
		.collect()
});

fn comment_matcher(family: CommentFamily) -> Option<Regex> {
	let pattern = match family {
		CommentFamily::None => return None,
		CommentFamily::Xml => r"<!--\s*?(\S*?)\s*?-->".to_string(),
		_ => format!(r"{}\s?(\S*?)$", regex::escape(family.marker()?)),
	};

	Some(Regex::new(&pattern).unwrap())
}

/// Extract the token that follows the comment marker of `family` in `line`.
///
/// For marker families the marker may appear anywhere in the line, be
/// followed by at most one whitespace character, and the token must run to
/// the end of the line. XML comments are matched as `<!-- token -->`
/// anywhere in the line. Returns `None` when the marker is absent, nothing
/// follows it, or the family has no comment syntax.
pub fn extract_comment_path(line: &str, family: CommentFamily) -> Option<&str> {
	let matcher = COMMENT_READERS.get(&family)?.as_ref()?;
	let token = matcher.captures(line)?.get(1)?.as_str();

	if token.is_empty() { None } else { Some(token) }
}
