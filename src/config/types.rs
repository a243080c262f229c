use serde::Deserialize;

/// A single search-and-replace rule as written in a rules document.
///
/// Each side is meant to have exactly one field populated. When several are,
/// the search side prefers `sx` > `sc` > `se` > `s` and the replace side
/// prefers `rc` > `re` > `r`. Empty strings count as absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Rule {
	/// Literal search string.
	#[serde(rename = "s", default)]
	pub search: Option<String>,

	/// Command whose standard output is the search string.
	#[serde(rename = "sc", default)]
	pub search_cmd: Option<String>,

	/// Expression whose value is the search string.
	#[serde(rename = "se", default)]
	pub search_eval: Option<String>,

	/// Regular expression to search for.
	#[serde(rename = "sx", default)]
	pub search_regex: Option<String>,

	/// Literal replacement string.
	#[serde(rename = "r", default)]
	pub replace: Option<String>,

	/// Command whose standard output is the replacement.
	#[serde(rename = "rc", default)]
	pub replace_cmd: Option<String>,

	/// Expression whose value is the replacement.
	#[serde(rename = "re", default)]
	pub replace_eval: Option<String>,
}

/// Top-level layout of a TOML rules file: an array of `[[rules]]` tables.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RuleFile {
	#[serde(default)]
	pub rules: Vec<Rule>,
}

/// Borrow a field's value, treating an empty string as unset.
pub(crate) fn non_empty(field: &Option<String>) -> Option<&str> {
	field.as_deref().filter(|s| !s.is_empty())
}

impl Rule {
	/// Names of the populated search fields, in precedence order.
	pub fn search_fields_set(&self) -> Vec<&'static str> {
		[
			("sx", &self.search_regex),
			("sc", &self.search_cmd),
			("se", &self.search_eval),
			("s", &self.search),
		]
		.into_iter()
		.filter(|(_, field)| non_empty(field).is_some())
		.map(|(name, _)| name)
		.collect()
	}

	/// Names of the populated replace fields, in precedence order.
	pub fn replace_fields_set(&self) -> Vec<&'static str> {
		[
			("rc", &self.replace_cmd),
			("re", &self.replace_eval),
			("r", &self.replace),
		]
		.into_iter()
		.filter(|(_, field)| non_empty(field).is_some())
		.map(|(name, _)| name)
		.collect()
	}
}
