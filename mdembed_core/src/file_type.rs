//! The closed set of fence extension tags that can carry an embed directive,
//! and the comment syntax each one uses.

use std::collections::HashMap;
use std::fmt;
use std::sync::LazyLock;

/// An extension tag that may follow the opening fence delimiter.
///
/// Tags are matched exactly and case sensitively (`rust`, not `rs` or
/// `Rust`). A tag outside this set is never inferred.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FileType {
	PlainText,
	TypeScript,
	JavaScript,
	Reason,
	Scss,
	Rust,
	Java,
	Cpp,
	C,
	Html,
	Xml,
	Markdown,
	Yaml,
	Json,
	Json5,
	Python,
	Bash,
	Shell,
	Golang,
	ObjectiveC,
	Php,
	CSharp,
	Swift,
	Ruby,
	Kotlin,
	Scala,
	Crystal,
	PlantUml,
	Mermaid,
	CMake,
	Protobuf,
	Sql,
	Haskell,
	Arduino,
	Jsx,
	Tsx,
}

impl FileType {
	/// Every supported file type, in the order used for diagnostics.
	pub const ALL: [FileType; 36] = [
		Self::PlainText,
		Self::TypeScript,
		Self::JavaScript,
		Self::Reason,
		Self::Scss,
		Self::Rust,
		Self::Java,
		Self::Cpp,
		Self::C,
		Self::Html,
		Self::Xml,
		Self::Markdown,
		Self::Yaml,
		Self::Json,
		Self::Json5,
		Self::Python,
		Self::Bash,
		Self::Shell,
		Self::Golang,
		Self::ObjectiveC,
		Self::Php,
		Self::CSharp,
		Self::Swift,
		Self::Ruby,
		Self::Kotlin,
		Self::Scala,
		Self::Crystal,
		Self::PlantUml,
		Self::Mermaid,
		Self::CMake,
		Self::Protobuf,
		Self::Sql,
		Self::Haskell,
		Self::Arduino,
		Self::Jsx,
		Self::Tsx,
	];

	/// The tag as written after the opening fence.
	pub const fn as_tag(self) -> &'static str {
		match self {
			Self::PlainText => "txt",
			Self::TypeScript => "ts",
			Self::JavaScript => "js",
			Self::Reason => "re",
			Self::Scss => "scss",
			Self::Rust => "rust",
			Self::Java => "java",
			Self::Cpp => "cpp",
			Self::C => "c",
			Self::Html => "html",
			Self::Xml => "xml",
			Self::Markdown => "md",
			Self::Yaml => "yaml",
			Self::Json => "json",
			Self::Json5 => "json5",
			Self::Python => "py",
			Self::Bash => "bash",
			Self::Shell => "sh",
			Self::Golang => "go",
			Self::ObjectiveC => "objectivec",
			Self::Php => "php",
			Self::CSharp => "cs",
			Self::Swift => "swift",
			Self::Ruby => "rb",
			Self::Kotlin => "kotlin",
			Self::Scala => "scala",
			Self::Crystal => "cr",
			Self::PlantUml => "puml",
			Self::Mermaid => "mermaid",
			Self::CMake => "cmake",
			Self::Protobuf => "proto",
			Self::Sql => "sql",
			Self::Haskell => "hs",
			Self::Arduino => "ino",
			Self::Jsx => "jsx",
			Self::Tsx => "tsx",
		}
	}

	/// Look up a fence extension tag. Returns `None` for unsupported tags.
	pub fn from_tag(tag: &str) -> Option<Self> {
		TYPES_BY_TAG.get(tag).copied()
	}
}

impl fmt::Display for FileType {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_tag())
	}
}

/// The syntactic style used to write a single-line comment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommentFamily {
	/// No comment syntax. Blocks of these types can only be embedded through
	/// an `embed-directive` override preceding the fence.
	None,
	/// `// path`
	C,
	/// `<!-- path -->`
	Xml,
	/// `# path`
	Hash,
	/// `' path`
	SingleQuote,
	/// `%% path`
	DoublePercent,
	/// `-- path`
	DoubleHyphens,
}

impl CommentFamily {
	/// The marker that opens a comment of this family, if any.
	pub const fn marker(self) -> Option<&'static str> {
		match self {
			Self::None => None,
			Self::C => Some("//"),
			Self::Xml => Some("<!--"),
			Self::Hash => Some("#"),
			Self::SingleQuote => Some("'"),
			Self::DoublePercent => Some("%%"),
			Self::DoubleHyphens => Some("--"),
		}
	}
}

/// Partition of the supported file types into comment families. Every
/// [`FileType`] appears in exactly one bucket.
pub const FAMILY_MEMBERS: &[(CommentFamily, &[FileType])] = &[
	(CommentFamily::None, &[FileType::Json]),
	(
		CommentFamily::C,
		&[
			FileType::PlainText,
			FileType::C,
			FileType::TypeScript,
			FileType::Reason,
			FileType::JavaScript,
			FileType::Rust,
			FileType::Cpp,
			FileType::Java,
			FileType::Golang,
			FileType::ObjectiveC,
			FileType::Scss,
			FileType::Php,
			FileType::CSharp,
			FileType::Swift,
			FileType::Kotlin,
			FileType::Scala,
			FileType::Json5,
			FileType::Protobuf,
			FileType::Arduino,
			FileType::Jsx,
			FileType::Tsx,
		],
	),
	(
		CommentFamily::Xml,
		&[FileType::Html, FileType::Markdown, FileType::Xml],
	),
	(
		CommentFamily::Hash,
		&[
			FileType::Python,
			FileType::Bash,
			FileType::Shell,
			FileType::Yaml,
			FileType::Ruby,
			FileType::Crystal,
			FileType::CMake,
		],
	),
	(CommentFamily::SingleQuote, &[FileType::PlantUml]),
	(CommentFamily::DoublePercent, &[FileType::Mermaid]),
	(
		CommentFamily::DoubleHyphens,
		&[FileType::Sql, FileType::Haskell],
	),
];

static TYPES_BY_TAG: LazyLock<HashMap<&'static str, FileType>> = LazyLock::new(|| {
	FileType::ALL
		.iter()
		.map(|file_type| (file_type.as_tag(), *file_type))
		.collect()
});

static FAMILY_BY_TYPE: LazyLock<HashMap<FileType, CommentFamily>> = LazyLock::new(|| {
	FAMILY_MEMBERS
		.iter()
		.flat_map(|(family, members)| members.iter().map(move |member| (*member, *family)))
		.collect()
});

/// Resolve the comment family for a supported file type.
///
/// `None` means the type is supported but missing from every bucket of
/// [`FAMILY_MEMBERS`], which is an internal inconsistency rather than an
/// unsupported extension.
pub fn comment_family_of(file_type: FileType) -> Option<CommentFamily> {
	FAMILY_BY_TYPE.get(&file_type).copied()
}

/// Comma separated list of every supported tag, for diagnostics.
pub fn supported_tags() -> String {
	FileType::ALL
		.iter()
		.map(|file_type| file_type.as_tag())
		.collect::<Vec<_>>()
		.join(", ")
}
