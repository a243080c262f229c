use crate::error::{Result, SrError};
use crate::resolve::eval::Evaluator;
use crate::resolve::runner::{CommandRunner, split_command};
use crate::rules::compiler::CompiledSearch;
use crate::rules::spec::ReplaceSpec;
use regex::bytes::Regex;
use std::borrow::Cow;

/// A resolved search side.
#[derive(Debug, Clone)]
pub enum SearchOperand<'a> {
	/// Exact bytes to find. Borrowed for literals, owned otherwise.
	Bytes(Cow<'a, [u8]>),

	/// A compiled pattern; only `sx` rules produce this.
	Pattern(&'a Regex),
}

/// Turns rule operand sources into concrete bytes.
///
/// Commands go through `R` and expressions through `E`, so either can be
/// swapped out without touching the engine.
#[derive(Debug, Clone, Default)]
pub struct Resolver<R, E> {
	runner: R,
	evaluator: E,
}

impl<R: CommandRunner, E: Evaluator> Resolver<R, E> {
	pub fn new(runner: R, evaluator: E) -> Self {
		Resolver { runner, evaluator }
	}

	/// Resolve the search side of a compiled rule.
	pub fn resolve_search<'a>(&self, search: &'a CompiledSearch) -> Result<SearchOperand<'a>> {
		match search {
			CompiledSearch::Pattern(regex) => Ok(SearchOperand::Pattern(regex)),
			CompiledSearch::Command(cmd) => Ok(SearchOperand::Bytes(self.run_command(cmd)?.into())),
			CompiledSearch::Expression(expr) => Ok(SearchOperand::Bytes(self.evaluate(expr)?.into())),
			CompiledSearch::Literal(bytes) => Ok(SearchOperand::Bytes(bytes.as_slice().into())),
		}
	}

	/// Resolve the replace side of a rule.
	pub fn resolve_replace(&self, replace: &ReplaceSpec) -> Result<Vec<u8>> {
		match replace {
			ReplaceSpec::Command(cmd) => self.run_command(cmd),
			ReplaceSpec::Expression(expr) => self.evaluate(expr),
			ReplaceSpec::Literal(bytes) => Ok(bytes.clone()),
		}
	}

	/// Run a command line and return its stdout.
	///
	/// Any stderr output fails the resolution whatever the exit code is. A
	/// non-zero exit with a silent stderr is accepted.
	fn run_command(&self, command: &str) -> Result<Vec<u8>> {
		let (program, args) = split_command(command).ok_or(SrError::EmptyCommand)?;

		tracing::debug!(command, "running operand command");
		let output = self.runner.run(program, &args)?;

		if !output.stderr.is_empty() {
			return Err(SrError::CommandStderr {
				command: command.to_string(),
				stderr: String::from_utf8_lossy(&output.stderr).trim_end().to_string(),
			});
		}

		if output.status_code != Some(0) {
			tracing::debug!(
				command,
				status = ?output.status_code,
				"operand command exited unsuccessfully, using its stdout"
			);
		}

		Ok(output.stdout)
	}

	fn evaluate(&self, expr: &str) -> Result<Vec<u8>> {
		self.evaluator
			.evaluate(expr)
			.map_err(|source| SrError::Expression {
				expr: expr.to_string(),
				source,
			})
	}
}
