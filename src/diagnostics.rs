use crate::error::SrError;
use std::fmt;
use std::io::Write;

/// Which side of a rule failed to resolve.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
	Search,
	Replace,
}

impl Side {
	pub fn as_str(&self) -> &'static str {
		match self {
			Side::Search => "search",
			Side::Replace => "replace",
		}
	}
}

/// A rule that was skipped because one of its operands did not resolve.
#[derive(Debug)]
pub struct Diagnostic {
	/// 1-based position of the rule.
	pub rule: usize,

	pub side: Side,

	pub error: SrError,
}

impl fmt::Display for Diagnostic {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(
			f,
			"rule {}: {} operand: {}",
			self.rule,
			self.side.as_str(),
			self.error
		)
	}
}

/// Receives one diagnostic per skipped rule.
pub trait DiagnosticSink {
	fn report(&mut self, diagnostic: Diagnostic);
}

/// Collects diagnostics in memory.
impl DiagnosticSink for Vec<Diagnostic> {
	fn report(&mut self, diagnostic: Diagnostic) {
		self.push(diagnostic);
	}
}

/// Writes each diagnostic as a `warning: ...` line.
#[derive(Debug)]
pub struct WriterSink<W> {
	writer: W,
}

impl<W: Write> WriterSink<W> {
	pub fn new(writer: W) -> Self {
		WriterSink { writer }
	}

	pub fn into_inner(self) -> W {
		self.writer
	}
}

impl<W: Write> DiagnosticSink for WriterSink<W> {
	fn report(&mut self, diagnostic: Diagnostic) {
		// A broken diagnostics stream must not stop the pass
		let _ = writeln!(self.writer, "warning: {diagnostic}");
	}
}
