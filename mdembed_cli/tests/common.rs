#![allow(dead_code)]

use std::path::Path;

use assert_cmd::Command;
use tempfile::TempDir;

pub fn mdembed_cmd() -> Command {
	let mut cmd = Command::cargo_bin("mdembed").unwrap_or_else(|e| panic!("mdembed binary: {e}"));
	cmd.env("NO_COLOR", "1").env_remove("MDEMBED_LOG");
	cmd
}

/// Create a temporary project containing `files`, given as `(path, content)`
/// pairs relative to its root.
pub fn project(files: &[(&str, &str)]) -> std::io::Result<TempDir> {
	let tmp = tempfile::tempdir()?;
	for (relative, content) in files {
		let path = tmp.path().join(relative);
		if let Some(parent) = path.parent() {
			std::fs::create_dir_all(parent)?;
		}
		std::fs::write(path, content)?;
	}
	Ok(tmp)
}

pub fn read(root: &Path, relative: &str) -> std::io::Result<String> {
	std::fs::read_to_string(root.join(relative))
}

pub const STALE_README: &str = "# Demo\n\n```js\n// ./a.js\n```\n";
pub const EMBEDDED_README: &str = "# Demo\n\n```js\n// ./a.js\n\nconsole.log(1);\n```\n";
pub const SCRIPT: &str = "console.log(1);\n";
