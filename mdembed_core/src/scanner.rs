use std::path::Path;

use crate::directive::PrecedingDirectives;
use crate::directive::resolve_directive;
use crate::fence::FenceBlock;
use crate::fence::LineEnding;
use crate::fence::find_fences;
use crate::options::EmbedOptions;
use crate::outcome::BlockReport;
use crate::outcome::ReplacementOutcome;
use crate::outcome::TransformReport;
use crate::render::RenderRequest;
use crate::render::compare_with_original;
use crate::render::render_fence;
use crate::snippet::extract_snippet;

/// Synchronize every embeddable fence in `source` and return the new
/// document text.
///
/// `document_path` is the location of `source` on disk. Embed paths resolve
/// against its directory unless `options` sets a source root.
pub fn transform(source: &str, document_path: &Path, options: &EmbedOptions) -> String {
	transform_with_report(source, document_path, options).output
}

/// Like [`transform`], also returning what happened to each fence.
///
/// Text outside fences is copied through untouched. A fence that cannot be
/// embedded is kept byte for byte and the reason is recorded in its
/// [`BlockReport`].
pub fn transform_with_report(
	source: &str,
	document_path: &Path,
	options: &EmbedOptions,
) -> TransformReport {
	let line_ending = LineEnding::detect(source);
	let mut output = String::with_capacity(source.len());
	let mut blocks = Vec::new();
	let mut previous_end = 0;

	for fence in find_fences(source, line_ending) {
		let gap = &source[previous_end..fence.offset];

		// Diagnostics in write mode refer to the document as it will be
		// written, which earlier replacements may have shifted.
		let start_line = if options.mode.is_read_only() {
			line_ending.count_lines(&source[..fence.offset])
		} else {
			output.matches(line_ending.as_str()).count() + line_ending.count_lines(gap)
		};

		let preceding = PrecedingDirectives::scan(gap);
		let (outcome, target) = embed_fence(&fence, &preceding, document_path, line_ending, options);
		let block_text = match &outcome {
			ReplacementOutcome::Replaced { text, .. } => text.as_str(),
			ReplacementOutcome::Unchanged(_) => fence.raw,
		};
		let end_line = start_line + line_ending.count_lines(block_text) - 1;

		output.push_str(gap);
		output.push_str(block_text);

		tracing::debug!(
			start_line,
			end_line,
			extension = fence.extension_tag,
			replaced = outcome.is_replaced(),
			reason = outcome.skip_reason().map(|reason| reason.code()),
			"processed code fence"
		);

		blocks.push(BlockReport {
			start_line,
			end_line,
			extension: fence.extension().map(ToString::to_string),
			target,
			outcome,
		});
		previous_end = fence.end();
	}

	output.push_str(&source[previous_end..]);

	TransformReport { output, blocks }
}

/// Run one fence through directive resolution, extraction and rendering.
/// Also returns the directive reference once one has been found.
fn embed_fence(
	fence: &FenceBlock<'_>,
	preceding: &PrecedingDirectives<'_>,
	document_path: &Path,
	line_ending: LineEnding,
	options: &EmbedOptions,
) -> (ReplacementOutcome, Option<String>) {
	let directive = match resolve_directive(fence, preceding) {
		Ok(directive) => directive,
		Err(reason) => return (ReplacementOutcome::Unchanged(reason), None),
	};
	let target = Some(directive.reference.clone());

	let snippet = match extract_snippet(&directive, document_path, line_ending, options) {
		Ok(snippet) => snippet,
		Err(reason) => return (ReplacementOutcome::Unchanged(reason), target),
	};

	let rendered = render_fence(&RenderRequest {
		extension: fence.extension_tag,
		comment_line: fence.first_line,
		body: &snippet.body,
		leading_indent: fence.leading_indent,
		line_ending,
		omit_comment: directive.is_override() || options.strip_embed_comment,
	});

	(
		compare_with_original(rendered, fence.raw, snippet.line_count),
		target,
	)
}
