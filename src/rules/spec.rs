use crate::config::types::{Rule, non_empty};

/// Where a rule's search operand comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchSpec {
	/// Search for these exact bytes.
	Literal(Vec<u8>),

	/// Run this command and search for its standard output.
	Command(String),

	/// Evaluate this expression and search for its value.
	Expression(String),

	/// Search for matches of this regular expression.
	Pattern(String),
}

/// Where a rule's replacement comes from. There is no regex variant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplaceSpec {
	Literal(Vec<u8>),
	Command(String),
	Expression(String),
}

impl SearchSpec {
	/// Select the search source of a rule: `sx` > `sc` > `se` > `s`.
	pub fn from_rule(rule: &Rule) -> Self {
		match (
			non_empty(&rule.search_regex),
			non_empty(&rule.search_cmd),
			non_empty(&rule.search_eval),
		) {
			(Some(pattern), _, _) => SearchSpec::Pattern(pattern.to_string()),
			(None, Some(cmd), _) => SearchSpec::Command(cmd.to_string()),
			(None, None, Some(expr)) => SearchSpec::Expression(expr.to_string()),
			(None, None, None) => {
				SearchSpec::Literal(rule.search.clone().unwrap_or_default().into_bytes())
			}
		}
	}
}

impl ReplaceSpec {
	/// Select the replace source of a rule: `rc` > `re` > `r`.
	pub fn from_rule(rule: &Rule) -> Self {
		match (non_empty(&rule.replace_cmd), non_empty(&rule.replace_eval)) {
			(Some(cmd), _) => ReplaceSpec::Command(cmd.to_string()),
			(None, Some(expr)) => ReplaceSpec::Expression(expr.to_string()),
			(None, None) => {
				ReplaceSpec::Literal(rule.replace.clone().unwrap_or_default().into_bytes())
			}
		}
	}

	pub fn key(&self) -> &'static str {
		match self {
			ReplaceSpec::Literal(_) => "r",
			ReplaceSpec::Command(_) => "rc",
			ReplaceSpec::Expression(_) => "re",
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn full_rule() -> Rule {
		Rule {
			search: Some("lit".to_string()),
			search_cmd: Some("echo cmd".to_string()),
			search_eval: Some("1+1".to_string()),
			search_regex: Some("re+".to_string()),
			replace: Some("lit".to_string()),
			replace_cmd: Some("echo cmd".to_string()),
			replace_eval: Some("2+2".to_string()),
		}
	}

	#[test]
	fn test_search_precedence() {
		let mut rule = full_rule();
		assert_eq!(SearchSpec::from_rule(&rule), SearchSpec::Pattern("re+".to_string()));

		rule.search_regex = None;
		assert_eq!(
			SearchSpec::from_rule(&rule),
			SearchSpec::Command("echo cmd".to_string())
		);

		rule.search_cmd = Some(String::new());
		assert_eq!(
			SearchSpec::from_rule(&rule),
			SearchSpec::Expression("1+1".to_string())
		);

		rule.search_eval = None;
		assert_eq!(SearchSpec::from_rule(&rule), SearchSpec::Literal(b"lit".to_vec()));
	}

	#[test]
	fn test_replace_precedence() {
		let mut rule = full_rule();
		assert_eq!(
			ReplaceSpec::from_rule(&rule),
			ReplaceSpec::Command("echo cmd".to_string())
		);

		rule.replace_cmd = None;
		assert_eq!(
			ReplaceSpec::from_rule(&rule),
			ReplaceSpec::Expression("2+2".to_string())
		);

		rule.replace_eval = None;
		assert_eq!(ReplaceSpec::from_rule(&rule), ReplaceSpec::Literal(b"lit".to_vec()));
	}

	#[test]
	fn test_empty_rule_is_empty_literals() {
		let rule = Rule::default();
		assert_eq!(SearchSpec::from_rule(&rule), SearchSpec::Literal(Vec::new()));
		assert_eq!(ReplaceSpec::from_rule(&rule), ReplaceSpec::Literal(Vec::new()));
		assert_eq!(ReplaceSpec::from_rule(&rule).key(), "r");
	}
}
