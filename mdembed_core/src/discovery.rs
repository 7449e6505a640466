//! Expanding file arguments into the list of documents to process.

use std::collections::HashSet;
use std::path::Path;
use std::path::PathBuf;

use globset::GlobBuilder;
use globset::GlobSet;
use globset::GlobSetBuilder;
use ignore::gitignore::Gitignore;
use ignore::gitignore::GitignoreBuilder;

use crate::EmbedError;
use crate::EmbedResult;
use crate::config::EmbedConfig;

/// Options controlling how glob arguments are expanded.
#[derive(Debug, Clone, Default)]
pub struct DiscoveryOptions {
	/// Gitignore-style patterns to exclude.
	pub exclude_patterns: Vec<String>,
	/// Skip the root `.gitignore` rules.
	pub disable_gitignore: bool,
}

impl DiscoveryOptions {
	/// Construct [`DiscoveryOptions`] from an optional [`EmbedConfig`].
	pub fn from_config(config: Option<&EmbedConfig>) -> Self {
		Self {
			exclude_patterns: config
				.map(|c| c.exclude.patterns.clone())
				.unwrap_or_default(),
			disable_gitignore: config.is_some_and(|c| c.disable_gitignore),
		}
	}
}

/// Resolve `inputs` against `root` into a sorted, de-duplicated list of
/// documents.
///
/// An input naming an existing file is used as is, even when it would be
/// excluded. Any other input is a glob pattern matched against the files
/// under `root`.
pub fn collect_documents(
	root: &Path,
	inputs: &[String],
	options: &DiscoveryOptions,
) -> EmbedResult<Vec<PathBuf>> {
	let mut documents = Vec::new();
	let mut patterns = Vec::new();

	for input in inputs {
		let path = root.join(input.strip_prefix("./").unwrap_or(input));
		if path.is_file() {
			documents.push(path);
		} else {
			patterns.push(input.as_str());
		}
	}

	if !patterns.is_empty() {
		let glob_set = build_glob_set(&patterns)?;
		let gitignore = if options.disable_gitignore {
			Gitignore::empty()
		} else {
			build_gitignore(root)
		};
		let exclude = build_exclude_matcher(root, &options.exclude_patterns)?;
		let mut visited_dirs = HashSet::new();

		walk_dir(
			root,
			root,
			&Matchers {
				glob_set: &glob_set,
				gitignore: &gitignore,
				exclude: &exclude,
			},
			&mut documents,
			&mut visited_dirs,
		)?;
	}

	documents.sort();
	documents.dedup();

	if documents.is_empty() {
		return Err(EmbedError::NoInputFiles {
			patterns: inputs.join(", "),
		});
	}

	tracing::debug!(count = documents.len(), "collected documents");

	Ok(documents)
}

fn build_glob_set(patterns: &[&str]) -> EmbedResult<GlobSet> {
	let mut builder = GlobSetBuilder::new();
	for pattern in patterns {
		let normalized = pattern.strip_prefix("./").unwrap_or(pattern);
		let glob = GlobBuilder::new(normalized)
			.literal_separator(true)
			.build()
			.map_err(|e| {
				EmbedError::InvalidPattern {
					pattern: (*pattern).to_string(),
					reason: e.to_string(),
				}
			})?;
		builder.add(glob);
	}

	builder.build().map_err(|e| {
		EmbedError::InvalidPattern {
			pattern: patterns.join(", "),
			reason: e.to_string(),
		}
	})
}

/// Build a `Gitignore` matcher from `[exclude]` patterns.
fn build_exclude_matcher(root: &Path, patterns: &[String]) -> EmbedResult<Gitignore> {
	let mut builder = GitignoreBuilder::new(root);
	for pattern in patterns {
		builder.add_line(None, pattern).map_err(|e| {
			EmbedError::ConfigParse(format!("invalid exclude pattern `{pattern}`: {e}"))
		})?;
	}
	builder
		.build()
		.map_err(|e| EmbedError::ConfigParse(format!("failed to build exclude rules: {e}")))
}

/// Build a `Gitignore` matcher from the root `.gitignore` file (if any).
fn build_gitignore(root: &Path) -> Gitignore {
	let mut builder = GitignoreBuilder::new(root);
	let gitignore_path = root.join(".gitignore");
	if gitignore_path.exists() {
		let _ = builder.add(gitignore_path);
	}
	builder.build().unwrap_or_else(|_| Gitignore::empty())
}

fn is_ignored_directory_name(name: &str) -> bool {
	name.starts_with('.') || name == "node_modules" || name == "target"
}

struct Matchers<'a> {
	glob_set: &'a GlobSet,
	gitignore: &'a Gitignore,
	exclude: &'a Gitignore,
}

fn walk_dir(
	root: &Path,
	dir: &Path,
	matchers: &Matchers<'_>,
	files: &mut Vec<PathBuf>,
	visited_dirs: &mut HashSet<PathBuf>,
) -> EmbedResult<()> {
	if !dir.is_dir() {
		return Ok(());
	}

	// A directory reached twice through symlinks is a cycle.
	let canonical = dir.canonicalize().unwrap_or_else(|_| dir.to_path_buf());
	if !visited_dirs.insert(canonical) {
		return Err(EmbedError::SymlinkCycle {
			path: dir.display().to_string(),
		});
	}

	for entry in std::fs::read_dir(dir)? {
		let path = entry?.path();
		let is_dir = path.is_dir();

		if is_dir
			&& path
				.file_name()
				.and_then(|n| n.to_str())
				.is_some_and(is_ignored_directory_name)
		{
			continue;
		}

		if matchers.gitignore.matched(&path, is_dir).is_ignore()
			|| matchers.exclude.matched(&path, is_dir).is_ignore()
		{
			continue;
		}

		if is_dir {
			walk_dir(root, &path, matchers, files, visited_dirs)?;
		} else if is_glob_match(matchers.glob_set, root, &path) {
			files.push(path);
		}
	}

	Ok(())
}

fn is_glob_match(glob_set: &GlobSet, root: &Path, path: &Path) -> bool {
	path.strip_prefix(root)
		.is_ok_and(|relative| glob_set.is_match(relative))
		|| glob_set.is_match(path)
}
