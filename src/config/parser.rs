use crate::config::types::{Rule, RuleFile};
use crate::error::{Result, SrError};
use std::path::Path;

/// Parse a YAML list of rules, e.g. `[{s: foo, r: bar}, {se: "int8((1+2)*3)", r: nine}]`.
///
/// Blank input is an empty list rather than an error.
pub fn parse_rules_yaml(content: &str, origin: &str) -> Result<Vec<Rule>> {
	if content.trim().is_empty() {
		return Ok(Vec::new());
	}

	let rules: Option<Vec<Rule>> =
		serde_yaml::from_str(content).map_err(|source| SrError::YamlParseError {
			origin: origin.to_string(),
			source,
		})?;

	Ok(rules.unwrap_or_default())
}

/// Parse a TOML document holding a `rules` array.
pub fn parse_rules_toml(content: &str, origin: &str) -> Result<Vec<Rule>> {
	let file: RuleFile = toml::from_str(content).map_err(|source| SrError::TomlParseError {
		origin: origin.to_string(),
		source,
	})?;

	Ok(file.rules)
}

/// Parse a rules file from the given path.
///
/// Files ending in `.toml` are read as TOML, anything else as YAML.
pub fn parse_rules_file(path: &Path) -> Result<Vec<Rule>> {
	let content = std::fs::read_to_string(path).map_err(|source| SrError::RulesReadError {
		path: path.to_path_buf(),
		source,
	})?;

	let origin = path.display().to_string();
	let is_toml = path
		.extension()
		.is_some_and(|ext| ext.eq_ignore_ascii_case("toml"));

	if is_toml {
		parse_rules_toml(&content, &origin)
	} else {
		parse_rules_yaml(&content, &origin)
	}
}

/// Build the full rule list: inline rules first, then rules from the file.
pub fn load_rules(inline_yaml: Option<&str>, file: Option<&Path>) -> Result<Vec<Rule>> {
	let mut rules = match inline_yaml {
		Some(content) => parse_rules_yaml(content, "--yaml")?,
		None => Vec::new(),
	};

	if let Some(path) = file {
		rules.extend(parse_rules_file(path)?);
	}

	Ok(rules)
}
