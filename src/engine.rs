//! Applies a rule list to a buffer.
//!
//! Rules run strictly in order and each one sees the buffer left by the one
//! before it. A rule whose operand cannot be resolved is reported to the
//! diagnostics sink and leaves the buffer untouched; the pass carries on.

use crate::config::types::Rule;
use crate::diagnostics::{Diagnostic, DiagnosticSink, Side};
use crate::error::Result;
use crate::resolve::{CommandRunner, Evaluator, Resolver, SearchOperand, SystemResolver};
use crate::rules::compiler::{CompiledRule, compile_rules};
use regex::bytes::NoExpand;
use std::borrow::Cow;

/// Compile `rules` and apply them to `input` using real processes and the
/// built-in evaluator.
///
/// An invalid pattern anywhere in the list fails before any rule runs.
pub fn replace(input: Vec<u8>, rules: &[Rule], sink: &mut dyn DiagnosticSink) -> Result<Vec<u8>> {
	let compiled = compile_rules(rules)?;
	Ok(apply_rules(input, &compiled, &SystemResolver::default(), sink))
}

/// Apply compiled rules in order. Never fails.
pub fn apply_rules<R, E>(
	input: Vec<u8>,
	rules: &[CompiledRule],
	resolver: &Resolver<R, E>,
	sink: &mut dyn DiagnosticSink,
) -> Vec<u8>
where
	R: CommandRunner,
	E: Evaluator,
{
	rules.iter().fold(input, |buffer, rule| {
		match apply_rule(&buffer, rule, resolver) {
			Ok(Some(output)) => output,
			Ok(None) => buffer,
			Err(diagnostic) => {
				tracing::debug!(rule = rule.index, "skipping rule: {diagnostic}");
				sink.report(diagnostic);
				buffer
			}
		}
	})
}

/// Apply one rule. `Ok(None)` means the rule left the buffer as it was.
fn apply_rule<R, E>(
	buffer: &[u8],
	rule: &CompiledRule,
	resolver: &Resolver<R, E>,
) -> std::result::Result<Option<Vec<u8>>, Diagnostic>
where
	R: CommandRunner,
	E: Evaluator,
{
	let search = resolver
		.resolve_search(&rule.search)
		.map_err(|error| Diagnostic {
			rule: rule.index,
			side: Side::Search,
			error,
		})?;

	let replacement = resolver
		.resolve_replace(&rule.replace)
		.map_err(|error| Diagnostic {
			rule: rule.index,
			side: Side::Replace,
			error,
		})?;

	let output = match search {
		SearchOperand::Pattern(regex) => {
			match regex.replace_all(buffer, NoExpand(&replacement)) {
				Cow::Borrowed(_) => None,
				Cow::Owned(output) => Some(output),
			}
		}
		SearchOperand::Bytes(needle) => replace_literal(buffer, &needle, &replacement),
	};

	tracing::debug!(
		rule = rule.index,
		search = rule.search.key(),
		replace = rule.replace.key(),
		changed = output.is_some(),
		"applied rule"
	);

	Ok(output)
}

/// Replace every non-overlapping occurrence of `needle`, scanning left to right.
///
/// Returns `None` when nothing matched. An empty needle matches nothing.
pub fn replace_literal(haystack: &[u8], needle: &[u8], with: &[u8]) -> Option<Vec<u8>> {
	if needle.is_empty() {
		return None;
	}

	let mut output: Option<Vec<u8>> = None;
	let mut rest = haystack;

	while let Some(pos) = rest.windows(needle.len()).position(|window| window == needle) {
		let buf = output.get_or_insert_with(|| Vec::with_capacity(haystack.len()));
		buf.extend_from_slice(&rest[..pos]);
		buf.extend_from_slice(with);
		rest = &rest[pos + needle.len()..];
	}

	let mut output = output?;
	output.extend_from_slice(rest);
	Some(output)
}
