mod common;

use common::EMBEDDED_README;
use common::SCRIPT;
use common::STALE_README;
use mdembed_core::AnyEmptyResult;
use similar_asserts::assert_eq;

#[test]
fn stdout_prints_document_and_logs_to_stderr() -> AnyEmptyResult {
	let tmp = common::project(&[("README.md", STALE_README), ("a.js", SCRIPT)])?;

	let output = common::mdembed_cmd()
		.arg("--path")
		.arg(tmp.path())
		.arg("--stdout")
		.arg("README.md")
		.output()?;
	assert!(output.status.success());

	assert_eq!(String::from_utf8(output.stdout)?, EMBEDDED_README);
	let stderr = String::from_utf8(output.stderr)?;
	assert!(stderr.contains("  Analysing README.md..."), "{stderr}");
	assert!(stderr.contains("   README.md#L3-L7 Embedded 2 lines from file ./a.js"), "{stderr}");

	assert_eq!(common::read(tmp.path(), "README.md")?, STALE_README);

	Ok(())
}

#[test]
fn stdout_keeps_crlf_documents_intact() -> AnyEmptyResult {
	let tmp = common::project(&[
		("README.md", "```js\r\n// ./a.js\r\n```\r\n"),
		("a.js", SCRIPT),
	])?;

	let output = common::mdembed_cmd()
		.arg("--path")
		.arg(tmp.path())
		.arg("--stdout")
		.arg("--silent")
		.arg("README.md")
		.output()?;
	assert!(output.status.success());

	assert_eq!(
		String::from_utf8(output.stdout)?,
		"```js\r\n// ./a.js\r\n\r\nconsole.log(1);\r\n```\r\n"
	);
	assert_eq!(String::from_utf8(output.stderr)?, "");

	Ok(())
}

#[test]
fn stdout_rejects_multiple_documents() -> AnyEmptyResult {
	let tmp = common::project(&[
		("one.md", STALE_README),
		("two.md", STALE_README),
		("a.js", SCRIPT),
	])?;

	common::mdembed_cmd()
		.arg("--path")
		.arg(tmp.path())
		.arg("--stdout")
		.arg("*.md")
		.assert()
		.code(2)
		.stderr(predicates::str::contains("can only be used with a single file"));

	assert_eq!(common::read(tmp.path(), "one.md")?, STALE_README);

	Ok(())
}
