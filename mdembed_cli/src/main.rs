use std::io::Write;
use std::path::Path;
use std::path::PathBuf;
use std::process;

use clap::Parser;
use mdembed_cli::MdembedCli;
use mdembed_cli::OutputFormat;
use mdembed_core::AnyResult;
use mdembed_core::BlockReport;
use mdembed_core::DiscoveryOptions;
use mdembed_core::EmbedConfig;
use mdembed_core::EmbedError;
use mdembed_core::EmbedOptions;
use mdembed_core::ReplacementOutcome;
use mdembed_core::RunMode;
use mdembed_core::Severity;
use mdembed_core::TransformReport;
use mdembed_core::collect_documents;
use mdembed_core::transform_with_report;
use owo_colors::OwoColorize;
use similar::ChangeTag;
use similar::TextDiff;
use tracing_subscriber::EnvFilter;

static USE_COLOR: std::sync::atomic::AtomicBool = std::sync::atomic::AtomicBool::new(true);

fn color_enabled() -> bool {
	USE_COLOR.load(std::sync::atomic::Ordering::Relaxed)
}

/// Apply ANSI color codes only when color is enabled.
macro_rules! colored {
	($text:expr,red) => {
		if color_enabled() {
			format!("{}", $text.red())
		} else {
			format!("{}", $text)
		}
	};
	($text:expr,green) => {
		if color_enabled() {
			format!("{}", $text.green())
		} else {
			format!("{}", $text)
		}
	};
	($text:expr,yellow) => {
		if color_enabled() {
			format!("{}", $text.yellow())
		} else {
			format!("{}", $text)
		}
	};
	($text:expr,blue) => {
		if color_enabled() {
			format!("{}", $text.blue())
		} else {
			format!("{}", $text)
		}
	};
	($text:expr,magenta) => {
		if color_enabled() {
			format!("{}", $text.magenta())
		} else {
			format!("{}", $text)
		}
	};
	($text:expr,dimmed) => {
		if color_enabled() {
			format!("{}", $text.dimmed())
		} else {
			format!("{}", $text)
		}
	};
}

/// Environment variable holding the log filter directives.
const LOG_ENV: &str = "MDEMBED_LOG";

fn main() {
	let args = MdembedCli::parse();

	// Respect NO_COLOR env var and --no-color flag.
	let use_color = !args.no_color && std::env::var_os("NO_COLOR").is_none();
	if !use_color {
		USE_COLOR.store(false, std::sync::atomic::Ordering::Relaxed);
	}

	// Install miette's fancy handler for rich error diagnostics.
	miette::set_hook(Box::new(move |_| {
		Box::new(
			miette::MietteHandlerOpts::new()
				.color(use_color)
				.unicode(use_color)
				.build(),
		)
	}))
	.ok();

	init_tracing(args.verbose, use_color);

	match run(&args) {
		Ok(drift) => {
			if drift {
				process::exit(1);
			}
		}
		Err(e) => {
			match e.downcast::<EmbedError>() {
				Ok(embed_err) => {
					let report: miette::Report = (*embed_err).into();
					eprintln!("{report:?}");
				}
				Err(e) => {
					eprintln!("{} {e}", colored!("error:", red));
				}
			}
			process::exit(2);
		}
	}
}

/// `--verbose` turns on debug output for mdembed itself, otherwise the
/// filter comes from `MDEMBED_LOG` and defaults to warnings only.
fn init_tracing(verbose: bool, use_color: bool) {
	let filter = if verbose {
		EnvFilter::new("mdembed=debug,mdembed_core=debug")
	} else {
		EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"))
	};

	tracing_subscriber::fmt()
		.with_env_filter(filter)
		.with_writer(std::io::stderr)
		.with_ansi(use_color)
		.init();
}

fn resolve_root(args: &MdembedCli) -> PathBuf {
	args.path
		.clone()
		.unwrap_or_else(|| std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")))
}

/// Process every document and return whether verify mode found drift.
fn run(args: &MdembedCli) -> AnyResult<bool> {
	let root = resolve_root(args);
	let config = EmbedConfig::load(&root)?;
	let documents = collect_documents(
		&root,
		&args.files,
		&DiscoveryOptions::from_config(config.as_ref()),
	)?;

	let mode = args.mode();
	if mode == RunMode::Stdout && documents.len() > 1 {
		return Err(EmbedError::StdoutWithMultipleFiles {
			count: documents.len(),
		}
		.into());
	}

	let options = EmbedOptions {
		source_root: args
			.source_root
			.clone()
			.or_else(|| config.as_ref().and_then(|c| c.source_root.clone())),
		strip_embed_comment: args.strip_embed_comment
			|| config.as_ref().is_some_and(|c| c.strip_embed_comment),
		mode,
		working_dir: Some(root.clone()),
	};
	tracing::debug!(
		documents = documents.len(),
		?mode,
		source_root = ?options.source_root,
		"starting run"
	);

	let reporter = Reporter {
		format: args.format,
		mode,
		silent: args.silent,
		strip_embed_comment: options.strip_embed_comment,
	};
	let mut summaries = Vec::new();
	let mut drift = false;

	for document in &documents {
		let rel = make_relative(document, &root);
		let source = std::fs::read_to_string(document)
			.map_err(|e| format!("failed to read {rel}: {e}"))?;

		reporter.log(&colored!(format!("  Analysing {rel}..."), magenta), false);
		let report = transform_with_report(&source, document, &options);
		for block in &report.blocks {
			reporter.block(&rel, block);
		}

		match mode {
			RunMode::Write => {
				if report.changed() {
					reporter.log(
						&colored!(format!("  Writing {rel} with embedded changes."), magenta),
						false,
					);
					std::fs::write(document, &report.output)
						.map_err(|e| format!("failed to write {rel}: {e}"))?;
				}
			}
			RunMode::DryRun => {}
			RunMode::Stdout => {
				let mut stdout = std::io::stdout().lock();
				stdout.write_all(report.output.as_bytes())?;
				stdout.flush()?;
			}
			RunMode::Verify => drift |= report.changed(),
		}

		if args.diff && report.changed() {
			print_diff(&rel, &source, &report.output);
		}

		summaries.push(document_summary(&rel, &report, &reporter));
	}

	if args.format == OutputFormat::Json {
		let output = serde_json::json!({
			"ok": !drift,
			"mode": mode_name(mode),
			"documents": summaries,
		});
		reporter.machine(&output.to_string());
	}

	if drift {
		reporter.log(&colored!("Diff detected, exiting 1", red), true);
	}

	Ok(drift)
}

/// Routes diagnostics to the right stream for the selected mode and format.
struct Reporter {
	format: OutputFormat,
	mode: RunMode,
	silent: bool,
	strip_embed_comment: bool,
}

impl Reporter {
	/// Stdout carries the document in `--stdout` mode and the machine
	/// output for the `json` and `github` formats.
	fn log_to_stderr(&self) -> bool {
		self.mode == RunMode::Stdout || self.format != OutputFormat::Text
	}

	/// Write a line of the human readable log.
	fn log(&self, line: &str, error: bool) {
		if self.silent {
			return;
		}

		if error || self.log_to_stderr() {
			eprintln!("{line}");
		} else {
			println!("{line}");
		}
	}

	/// Write machine readable output.
	fn machine(&self, line: &str) {
		if self.mode == RunMode::Stdout {
			eprintln!("{line}");
		} else {
			println!("{line}");
		}
	}

	fn block(&self, rel: &str, block: &BlockReport) {
		let prefix = colored!(
			format!("   {rel}#L{}-L{}", block.start_line, block.end_line),
			dimmed
		);
		let error = block
			.outcome
			.skip_reason()
			.is_some_and(|reason| reason.severity() == Severity::Error);
		self.log(&format!("{prefix} {}", self.block_message(block)), error);

		if self.format == OutputFormat::Github {
			self.annotate(rel, block);
		}
	}

	fn block_message(&self, block: &BlockReport) -> String {
		match &block.outcome {
			ReplacementOutcome::Replaced { line_count, .. } => {
				let message = self.replaced_message(block, *line_count);
				if self.mode == RunMode::Verify {
					colored!(message, yellow)
				} else {
					colored!(message, green)
				}
			}
			ReplacementOutcome::Unchanged(reason) => {
				let message = reason.message();
				match reason.severity() {
					Severity::Info => colored!(message, dimmed),
					Severity::Notice => colored!(message, blue),
					Severity::Warning => colored!(message, yellow),
					Severity::Error => colored!(message, red),
				}
			}
		}
	}

	fn replaced_message(&self, block: &BlockReport, line_count: usize) -> String {
		let without_comment = if self.strip_embed_comment {
			" without comment line"
		} else {
			""
		};
		format!(
			"Embedded {line_count} lines{without_comment} from file {}",
			block.target.as_deref().unwrap_or_default()
		)
	}

	fn annotate(&self, rel: &str, block: &BlockReport) {
		match &block.outcome {
			ReplacementOutcome::Replaced { .. } if self.mode == RunMode::Verify => {
				self.machine(&format!(
					"::warning file={rel},line={}::Embedded block is out of date with {}",
					block.start_line,
					block.target.as_deref().unwrap_or_default()
				));
			}
			ReplacementOutcome::Unchanged(reason) if reason.severity() == Severity::Error => {
				self.machine(&format!(
					"::error file={rel},line={}::{}",
					block.start_line,
					reason.message()
				));
			}
			_ => {}
		}
	}
}

fn document_summary(rel: &str, report: &TransformReport, reporter: &Reporter) -> serde_json::Value {
	let blocks: Vec<serde_json::Value> = report
		.blocks
		.iter()
		.map(|block| {
			let (status, severity, message) = match &block.outcome {
				ReplacementOutcome::Replaced { line_count, .. } => {
					(
						"replaced",
						None,
						reporter.replaced_message(block, *line_count),
					)
				}
				ReplacementOutcome::Unchanged(reason) => {
					(
						reason.code(),
						Some(severity_name(reason.severity())),
						reason.message(),
					)
				}
			};
			serde_json::json!({
				"start_line": block.start_line,
				"end_line": block.end_line,
				"extension": block.extension,
				"target": block.target,
				"status": status,
				"severity": severity,
				"message": message,
			})
		})
		.collect();

	serde_json::json!({
		"file": rel,
		"changed": report.changed(),
		"replaced": report.replaced_count(),
		"blocks": blocks,
	})
}

fn mode_name(mode: RunMode) -> &'static str {
	match mode {
		RunMode::Write => "write",
		RunMode::DryRun => "dry-run",
		RunMode::Stdout => "stdout",
		RunMode::Verify => "verify",
	}
}

fn severity_name(severity: Severity) -> &'static str {
	match severity {
		Severity::Info => "info",
		Severity::Notice => "notice",
		Severity::Warning => "warning",
		Severity::Error => "error",
	}
}

fn print_diff(rel: &str, current: &str, expected: &str) {
	eprintln!("{}", colored!(format!("--- {rel}"), red));
	eprintln!("{}", colored!(format!("+++ {rel} (embedded)"), green));

	let diff = TextDiff::from_lines(current, expected);
	for group in diff.grouped_ops(3) {
		for op in &group {
			for change in diff.iter_changes(op) {
				match change.tag() {
					ChangeTag::Delete => {
						eprint!("  {}", colored!(format!("-{change}"), red));
					}
					ChangeTag::Insert => {
						eprint!("  {}", colored!(format!("+{change}"), green));
					}
					ChangeTag::Equal => {
						eprint!("   {change}");
					}
				}
				if change.missing_newline() {
					eprintln!();
				}
			}
		}
	}
}

/// Make a path relative to root for display purposes.
fn make_relative(path: &Path, root: &Path) -> String {
	path.strip_prefix(root)
		.unwrap_or(path)
		.display()
		.to_string()
}
