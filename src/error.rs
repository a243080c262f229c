use crate::resolve::eval::EvalError;
use std::path::PathBuf;

/// Library-level structured errors for sr.
///
/// Configuration errors (`RulesReadError`, the parse errors, `InvalidRegex`) abort a run.
/// Everything else is a resolution error: the engine reports it to a diagnostics sink
/// and skips the offending rule.
#[derive(Debug, thiserror::Error)]
pub enum SrError {
	#[error("Failed to read rules file: {path}")]
	RulesReadError {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	#[error("Failed to parse YAML rules from {origin}")]
	YamlParseError {
		origin: String,
		#[source]
		source: serde_yaml::Error,
	},

	#[error("Failed to parse TOML rules from {origin}")]
	TomlParseError {
		origin: String,
		#[source]
		source: toml::de::Error,
	},

	#[error("Invalid regex pattern in rule {index}: {pattern}")]
	InvalidRegex {
		index: usize,
		pattern: String,
		#[source]
		source: regex::Error,
	},

	#[error("Command is empty")]
	EmptyCommand,

	#[error("Command not found: {command}")]
	CommandNotFound { command: String },

	#[error("Command execution failed: {command}: {source}")]
	CommandFailed {
		command: String,
		#[source]
		source: std::io::Error,
	},

	#[error("Command `{command}` wrote to stderr: {stderr}")]
	CommandStderr { command: String, stderr: String },

	#[error("Failed to evaluate `{expr}`: {source}")]
	Expression {
		expr: String,
		#[source]
		source: EvalError,
	},
}

/// Result type alias using SrError.
pub type Result<T> = std::result::Result<T, SrError>;
