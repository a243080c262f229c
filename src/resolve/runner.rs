use crate::error::{Result, SrError};
use std::process::{Command, Stdio};

/// Everything a finished command produced.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
	pub stdout: Vec<u8>,
	pub stderr: Vec<u8>,

	/// Exit code, `None` if the process was killed by a signal.
	pub status_code: Option<i32>,
}

/// Runs external commands for command operands.
///
/// Implementations only report what the process did. Deciding whether the
/// output is usable is up to the resolver.
pub trait CommandRunner {
	fn run(&self, program: &str, args: &[&str]) -> Result<CommandOutput>;
}

/// Runs commands as real child processes.
///
/// The child gets no stdin. Both output streams are captured and the call
/// blocks until the child exits.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
	fn run(&self, program: &str, args: &[&str]) -> Result<CommandOutput> {
		let output = Command::new(program)
			.args(args)
			.stdin(Stdio::null())
			.stdout(Stdio::piped())
			.stderr(Stdio::piped())
			.output()
			.map_err(|source| {
				if source.kind() == std::io::ErrorKind::NotFound {
					SrError::CommandNotFound {
						command: program.to_string(),
					}
				} else {
					SrError::CommandFailed {
						command: program.to_string(),
						source,
					}
				}
			})?;

		Ok(CommandOutput {
			stdout: output.stdout,
			stderr: output.stderr,
			status_code: output.status.code(),
		})
	}
}

/// Split a command line on whitespace into a program and its arguments.
///
/// There is no shell: quotes, pipes and globs are passed through as-is.
/// Returns `None` for a blank command line.
pub fn split_command(command: &str) -> Option<(&str, Vec<&str>)> {
	let mut parts = command.split_whitespace();
	let program = parts.next()?;
	Some((program, parts.collect()))
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_split_command() {
		let (program, args) = split_command("go help  tool").unwrap();
		assert_eq!(program, "go");
		assert_eq!(args, vec!["help", "tool"]);
	}

	#[test]
	fn test_split_command_no_quote_handling() {
		let (program, args) = split_command("echo 'a b'").unwrap();
		assert_eq!(program, "echo");
		assert_eq!(args, vec!["'a", "b'"]);
	}

	#[test]
	fn test_split_command_blank() {
		assert!(split_command("").is_none());
		assert!(split_command(" \t ").is_none());
	}

	#[test]
	fn test_run_not_found() {
		let result = SystemRunner.run("/nonexistent/path/to/binary", &[]);
		assert!(matches!(result, Err(SrError::CommandNotFound { .. })));
	}

	#[cfg(unix)]
	#[test]
	fn test_run_captures_both_streams() {
		let output = SystemRunner
			.run("sh", &["-c", "printf out; printf err >&2; exit 3"])
			.unwrap();

		assert_eq!(output.stdout, b"out");
		assert_eq!(output.stderr, b"err");
		assert_eq!(output.status_code, Some(3));
	}

	#[cfg(unix)]
	#[test]
	fn test_run_has_no_stdin() {
		let output = SystemRunner.run("cat", &[]).unwrap();
		assert!(output.stdout.is_empty());
		assert_eq!(output.status_code, Some(0));
	}
}
