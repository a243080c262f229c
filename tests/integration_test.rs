#![allow(deprecated)] // assert_cmd::Command::cargo_bin is deprecated but replacement requires nightly

use predicates::prelude::*;
use std::fs;

fn sr_cmd() -> assert_cmd::Command {
	assert_cmd::Command::cargo_bin("sr").unwrap()
}

// ============================================================================
// CLI flag tests
// ============================================================================

#[test]
fn test_help_flag() {
	sr_cmd()
		.arg("--help")
		.assert()
		.success()
		.stdout(predicate::str::contains("Search and replace stdin"))
		.stdout(predicate::str::contains("sx: search regex"));
}

#[test]
fn test_version_flag() {
	sr_cmd()
		.arg("--version")
		.assert()
		.success()
		.stdout(predicate::str::contains("sr"));
}

#[test]
fn test_no_rules_echoes_input() {
	sr_cmd()
		.write_stdin("nothing to do\n")
		.assert()
		.success()
		.stdout("nothing to do\n");
}

// ============================================================================
// Inline rule tests
// ============================================================================

#[test]
fn test_inline_literal_rule() {
	sr_cmd()
		.args(["--yaml", "[{s: ab, r: x}]"])
		.write_stdin("ababab")
		.assert()
		.success()
		.stdout("xxx");
}

#[test]
fn test_inline_rules_apply_in_order() {
	sr_cmd()
		.args(["--yaml", "[{s: a, r: b}, {s: b, r: c}]"])
		.write_stdin("a")
		.assert()
		.success()
		.stdout("c");
}

#[test]
fn test_numeric_looking_operands_match_as_written() {
	sr_cmd()
		.args(["--yaml", "[{s: 3.10, r: 3.11}]"])
		.write_stdin("python 3.14 / 3.10")
		.assert()
		.success()
		.stdout("python 3.14 / 3.11");
}

#[test]
fn test_regex_rule_inserts_literal_text() {
	sr_cmd()
		.args(["--yaml", r#"[{sx: "<(/){0,1}samp>", r: "<s>"}, {sx: "h(i)", r: "$1"}]"#])
		.write_stdin("<samp>hi</samp>")
		.assert()
		.success()
		.stdout("<s>$1<s>");
}

#[test]
fn test_expression_rules() {
	sr_cmd()
		.args(["--yaml", "[{se: int8((1+2)*3), r: nine}, {s: '.<', re: '1 << 4'}]"])
		.write_stdin("9 .<")
		.assert()
		.success()
		.stdout("nine 16");
}

#[test]
fn test_expression_failure_warns_and_continues() {
	sr_cmd()
		.args(["--yaml", "[{s: a, re: int8(300)}, {s: a, r: b}]"])
		.write_stdin("a")
		.assert()
		.success()
		.stdout("b")
		.stderr(predicate::str::contains(
			"warning: rule 1: replace operand: Failed to evaluate `int8(300)`",
		))
		.stderr(predicate::str::contains("overflows int8"));
}

#[test]
fn test_binary_input_passes_through() {
	sr_cmd()
		.args(["--yaml", "[{s: b, r: B}]"])
		.write_stdin(vec![0xffu8, b'b', 0x00, b'b'])
		.assert()
		.success()
		.stdout(vec![0xffu8, b'B', 0x00, b'B']);
}

// ============================================================================
// Command operand tests
// ============================================================================

#[cfg(unix)]
#[test]
fn test_command_operand_replaces() {
	sr_cmd()
		.args(["--yaml", "[{s: '9', rc: printf nine}]"])
		.write_stdin("9 and 9")
		.assert()
		.success()
		.stdout("nine and nine");
}

#[cfg(unix)]
#[test]
fn test_command_exit_status_alone_is_not_failure() {
	let temp_dir = tempfile::tempdir().unwrap();
	let script = temp_dir.path().join("quiet-fail.sh");
	fs::write(&script, "printf nine\nexit 1\n").unwrap();

	let rules = format!("[{{s: '9', rc: sh {}}}]", script.display());

	sr_cmd()
		.args(["--yaml", rules.as_str()])
		.write_stdin("9")
		.assert()
		.success()
		.stdout("nine")
		.stderr(predicate::str::contains("warning").not());
}

#[cfg(unix)]
#[test]
fn test_failing_command_skips_only_its_rule() {
	let temp_dir = tempfile::tempdir().unwrap();
	let script = temp_dir.path().join("noisy.sh");
	fs::write(&script, "printf replaced\necho 'something went wrong' >&2\n").unwrap();

	let rules = format!(
		"[{{s: foo, r: bar}}, {{s: bar, rc: sh {}}}, {{s: baz, r: qux}}]",
		script.display()
	);

	sr_cmd()
		.args(["--yaml", rules.as_str()])
		.write_stdin("foo baz")
		.assert()
		.success()
		.stdout("bar qux")
		.stderr(predicate::str::contains("rule 2: replace operand"))
		.stderr(predicate::str::contains("something went wrong"));
}

#[cfg(unix)]
#[test]
fn test_unrunnable_command_reports_cause() {
	let temp_dir = tempfile::tempdir().unwrap();
	let script = temp_dir.path().join("not-executable.sh");
	fs::write(&script, "printf nine\n").unwrap();

	let rules = format!("[{{s: '9', rc: {}}}]", script.display());

	sr_cmd()
		.args(["--yaml", rules.as_str()])
		.write_stdin("9")
		.assert()
		.success()
		.stdout("9")
		.stderr(predicate::str::contains("rule 1: replace operand: Command execution failed"))
		.stderr(predicate::str::contains("ermission denied"));
}

#[test]
fn test_missing_command_warns() {
	sr_cmd()
		.args(["--yaml", "[{sc: /nonexistent/sr-test-binary, r: x}]"])
		.write_stdin("input")
		.assert()
		.success()
		.stdout("input")
		.stderr(predicate::str::contains("rule 1: search operand"))
		.stderr(predicate::str::contains("Command not found"));
}

// ============================================================================
// Rules file tests
// ============================================================================

#[test]
fn test_yaml_rules_file() {
	let temp_dir = tempfile::tempdir().unwrap();
	let rules_path = temp_dir.path().join("rules.yaml");
	fs::write(
		&rules_path,
		"- s: \"{{form .\"\n  r: \"{{template .\"\n- sx: \"<(/){0,1}samp>\"\n  r: \"<s>\"\n",
	)
	.unwrap();

	sr_cmd()
		.arg("--file")
		.arg(&rules_path)
		.write_stdin("{{form .Name}} <samp>x</samp>")
		.assert()
		.success()
		.stdout("{{template .Name}} <s>x<s>");
}

#[test]
fn test_toml_rules_file() {
	let temp_dir = tempfile::tempdir().unwrap();
	let rules_path = temp_dir.path().join("rules.toml");
	fs::write(
		&rules_path,
		"[[rules]]\ns = \"foo\"\nr = \"bar\"\n\n[[rules]]\nse = \"len(\\\"four\\\")\"\nr = \"four\"\n",
	)
	.unwrap();

	sr_cmd()
		.arg("--file")
		.arg(&rules_path)
		.write_stdin("foo 4")
		.assert()
		.success()
		.stdout("bar four");
}

#[test]
fn test_inline_rules_run_before_file_rules() {
	let temp_dir = tempfile::tempdir().unwrap();
	let rules_path = temp_dir.path().join("rules.yml");
	fs::write(&rules_path, "- s: b\n  r: c\n").unwrap();

	sr_cmd()
		.args(["--yaml", "[{s: a, r: b}]"])
		.arg("--file")
		.arg(&rules_path)
		.write_stdin("a")
		.assert()
		.success()
		.stdout("c");
}

#[test]
fn test_missing_rules_file_is_fatal() {
	sr_cmd()
		.args(["--file", "/nonexistent/rules.yaml"])
		.write_stdin("input")
		.assert()
		.failure()
		.stdout("")
		.stderr(predicate::str::contains("Failed to load rules"));
}

#[test]
fn test_unknown_rule_key_is_fatal() {
	sr_cmd()
		.args(["--yaml", "[{rx: foo}]"])
		.write_stdin("input")
		.assert()
		.failure()
		.stdout("")
		.stderr(predicate::str::contains("Failed to parse YAML rules"));
}

// ============================================================================
// Invalid regex tests
// ============================================================================

#[test]
fn test_invalid_regex_is_fatal_with_no_output() {
	sr_cmd()
		.args(["--yaml", "[{s: a, r: b}, {sx: '[unclosed', r: x}]"])
		.write_stdin("a")
		.assert()
		.failure()
		.stdout("")
		.stderr(predicate::str::contains("Invalid regex pattern in rule 2"));
}

// ============================================================================
// --check tests
// ============================================================================

#[test]
fn test_check_valid_rules() {
	sr_cmd()
		.args(["--check", "--yaml", "[{s: a, r: b}, {sx: 'a+', r: c}]"])
		.assert()
		.success()
		.stdout(predicate::str::contains("2 rule(s) OK"));
}

#[test]
fn test_check_invalid_rules() {
	sr_cmd()
		.args(["--check", "--yaml", "[{sx: '(', r: c}]"])
		.assert()
		.failure()
		.stderr(predicate::str::contains("Invalid regex"));
}
