//! Rule list loading for sr.
//!
//! This module handles:
//! - The `Rule` record and its short document keys
//! - YAML (inline or file) and TOML file parsing

pub mod parser;
pub mod types;

pub use parser::{load_rules, parse_rules_file, parse_rules_toml, parse_rules_yaml};
pub use types::{Rule, RuleFile};
