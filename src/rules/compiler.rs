use crate::config::types::Rule;
use crate::error::{Result, SrError};
use crate::rules::spec::{ReplaceSpec, SearchSpec};
use regex::bytes::Regex;

/// Search side of a compiled rule. Patterns are compiled up front;
/// commands and expressions are resolved later, once per application.
#[derive(Debug, Clone)]
pub enum CompiledSearch {
	Literal(Vec<u8>),
	Command(String),
	Expression(String),

	/// Compiled with Unicode mode on, so `.` and negated classes only match
	/// whole UTF-8 sequences; an invalid byte in the buffer is never matched
	/// by them. Patterns can opt out with `(?-u)`.
	Pattern(Regex),
}

impl CompiledSearch {
	/// Short document key of the search source.
	pub fn key(&self) -> &'static str {
		match self {
			CompiledSearch::Literal(_) => "s",
			CompiledSearch::Command(_) => "sc",
			CompiledSearch::Expression(_) => "se",
			CompiledSearch::Pattern(_) => "sx",
		}
	}
}

/// A rule ready for the engine.
#[derive(Debug, Clone)]
pub struct CompiledRule {
	/// 1-based position in the rule list, used in diagnostics.
	pub index: usize,

	pub search: CompiledSearch,

	pub replace: ReplaceSpec,
}

impl CompiledRule {
	/// Compile one rule. `index` is its 1-based position.
	pub fn from_rule(rule: &Rule, index: usize) -> Result<Self> {
		warn_ignored_fields(rule, index);

		let search = match SearchSpec::from_rule(rule) {
			SearchSpec::Literal(bytes) => CompiledSearch::Literal(bytes),
			SearchSpec::Command(cmd) => CompiledSearch::Command(cmd),
			SearchSpec::Expression(expr) => CompiledSearch::Expression(expr),
			SearchSpec::Pattern(pattern) => CompiledSearch::Pattern(compile_regex(&pattern, index)?),
		};

		Ok(CompiledRule {
			index,
			search,
			replace: ReplaceSpec::from_rule(rule),
		})
	}
}

fn warn_ignored_fields(rule: &Rule, index: usize) {
	let search = rule.search_fields_set();
	if search.len() > 1 {
		tracing::warn!(
			rule = index,
			used = search[0],
			ignored = ?&search[1..],
			"rule sets more than one search field"
		);
	}

	let replace = rule.replace_fields_set();
	if replace.len() > 1 {
		tracing::warn!(
			rule = index,
			used = replace[0],
			ignored = ?&replace[1..],
			"rule sets more than one replace field"
		);
	}
}

/// Compile a regex pattern string.
fn compile_regex(pattern: &str, index: usize) -> Result<Regex> {
	Regex::new(pattern).map_err(|source| SrError::InvalidRegex {
		index,
		pattern: pattern.to_string(),
		source,
	})
}

/// Compile every rule, failing on the first invalid pattern.
pub fn compile_rules(rules: &[Rule]) -> Result<Vec<CompiledRule>> {
	rules
		.iter()
		.enumerate()
		.map(|(i, rule)| CompiledRule::from_rule(rule, i + 1))
		.collect()
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_compile_valid_regex() {
		let result = compile_regex(r"<(/){0,1}samp>", 1);
		assert!(result.is_ok());
	}

	#[test]
	fn test_compile_invalid_regex() {
		let result = compile_regex(r"[invalid", 3);
		match result.unwrap_err() {
			SrError::InvalidRegex { index, pattern, .. } => {
				assert_eq!(index, 3);
				assert_eq!(pattern, "[invalid");
			}
			other => panic!("Expected InvalidRegex error, got {other:?}"),
		}
	}

	#[test]
	fn test_compile_rules_numbers_from_one() {
		let rules = vec![
			Rule {
				search: Some("a".to_string()),
				..Default::default()
			},
			Rule {
				search_regex: Some("b+".to_string()),
				..Default::default()
			},
		];

		let compiled = compile_rules(&rules).unwrap();

		assert_eq!(compiled[0].index, 1);
		assert!(matches!(compiled[0].search, CompiledSearch::Literal(ref b) if b == b"a"));
		assert_eq!(compiled[1].index, 2);
		assert!(matches!(compiled[1].search, CompiledSearch::Pattern(_)));
	}

	#[test]
	fn test_compile_rules_fails_on_any_bad_pattern() {
		let rules = vec![
			Rule {
				search: Some("fine".to_string()),
				..Default::default()
			},
			Rule {
				search_regex: Some("(unclosed".to_string()),
				..Default::default()
			},
		];

		let result = compile_rules(&rules);
		assert!(matches!(result, Err(SrError::InvalidRegex { index: 2, .. })));
	}

	#[test]
	fn test_regex_wins_over_literal() {
		let rule = Rule {
			search: Some("literal".to_string()),
			search_regex: Some("x+".to_string()),
			..Default::default()
		};

		let compiled = CompiledRule::from_rule(&rule, 1).unwrap();
		assert!(matches!(compiled.search, CompiledSearch::Pattern(_)));
	}
}
