use std::path::Path;
use std::path::PathBuf;

use tempfile::TempDir;

use crate::EmbedOptions;
use crate::EmbedResult;
use crate::RunMode;

/// A temporary directory holding a document and the files it embeds.
pub struct Workspace {
	dir: TempDir,
}

impl Workspace {
	pub fn new() -> EmbedResult<Self> {
		Ok(Self {
			dir: tempfile::tempdir()?,
		})
	}

	pub fn root(&self) -> &Path {
		self.dir.path()
	}

	/// Write `content` to `relative`, creating parent directories.
	pub fn write(&self, relative: &str, content: &str) -> EmbedResult<PathBuf> {
		let path = self.root().join(relative);
		if let Some(parent) = path.parent() {
			std::fs::create_dir_all(parent)?;
		}
		std::fs::write(&path, content)?;
		Ok(path)
	}

	pub fn path(&self, relative: &str) -> PathBuf {
		self.root().join(relative)
	}

	/// Options anchored at this workspace, in write mode.
	pub fn options(&self) -> EmbedOptions {
		EmbedOptions {
			working_dir: Some(self.root().to_path_buf()),
			..EmbedOptions::default()
		}
	}

	pub fn options_with_mode(&self, mode: RunMode) -> EmbedOptions {
		EmbedOptions {
			mode,
			..self.options()
		}
	}
}

/// A workspace with `a.js` containing a single statement.
pub fn workspace_with_script() -> EmbedResult<Workspace> {
	let workspace = Workspace::new()?;
	workspace.write("a.js", "console.log(1);\n")?;
	Ok(workspace)
}

pub const FIVE_LINES: &str = "one\ntwo\nthree\nfour\nfive\n";
