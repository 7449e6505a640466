use std::path::Path;
use std::path::PathBuf;

use serde::Deserialize;

use crate::EmbedError;
use crate::EmbedResult;

/// Config file names looked up under the project root. The first one that
/// exists is used.
pub const CONFIG_FILE_CANDIDATES: [&str; 3] =
	["mdembed.toml", ".mdembed.toml", ".config/mdembed.toml"];

/// Configuration loaded from an `mdembed.toml` file.
///
/// ```toml
/// source_root = "snippets"
/// strip_embed_comment = false
/// disable_gitignore = false
///
/// [exclude]
/// patterns = ["vendor/", "CHANGELOG.md"]
/// ```
#[derive(Debug, Default, Deserialize)]
pub struct EmbedConfig {
	/// Base directory for embed paths, relative to the project root. Unset
	/// means paths resolve against each document's own directory.
	#[serde(default)]
	pub source_root: Option<PathBuf>,
	/// Render fences without the first-line embed comment.
	#[serde(default)]
	pub strip_embed_comment: bool,
	/// When true, `.gitignore` files are not consulted while expanding glob
	/// arguments.
	#[serde(default)]
	pub disable_gitignore: bool,
	/// Files and directories left out when expanding glob arguments.
	#[serde(default)]
	pub exclude: ExcludeConfig,
}

/// Configuration for excluding files and directories from glob expansion.
///
/// Patterns follow gitignore syntax and are applied on top of any
/// `.gitignore` rules (unless `disable_gitignore` is set).
#[derive(Debug, Default, Deserialize)]
pub struct ExcludeConfig {
	/// Gitignore-style patterns relative to the project root.
	///
	/// For example `"vendor/"`, `"CHANGELOG.md"` or `"!docs/keep.md"`.
	#[serde(default)]
	pub patterns: Vec<String>,
}

impl EmbedConfig {
	/// Path of the config file that [`EmbedConfig::load`] would read.
	#[must_use]
	pub fn resolve_path(root: &Path) -> Option<PathBuf> {
		CONFIG_FILE_CANDIDATES
			.iter()
			.map(|candidate| root.join(candidate))
			.find(|path| path.is_file())
	}

	/// Read and parse the config under `root`, or `None` when there is none.
	pub fn load(root: &Path) -> EmbedResult<Option<EmbedConfig>> {
		let Some(config_path) = Self::resolve_path(root) else {
			return Ok(None);
		};

		let content = std::fs::read_to_string(&config_path)?;
		let config = Self::parse(&content)?;
		tracing::debug!(path = %config_path.display(), "loaded config");

		Ok(Some(config))
	}

	/// Parse config file contents.
	pub fn parse(content: &str) -> EmbedResult<EmbedConfig> {
		toml::from_str(content).map_err(|e| EmbedError::ConfigParse(e.to_string()))
	}
}
