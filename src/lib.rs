//! sr - search-and-replace over a byte stream, driven by an ordered rule list.
//!
//! This library provides the core functionality for sr, including:
//! - Rule list parsing from YAML or TOML
//! - Operand resolution from literals, commands, expressions and regexes
//! - Sequential application of rules with per-rule failure reporting
//!
//! # Example
//!
//! ```no_run
//! use sr_cli::config::parse_rules_yaml;
//! use sr_cli::diagnostics::WriterSink;
//! use sr_cli::engine::replace;
//!
//! let rules = parse_rules_yaml("[{s: foo, r: bar}, {se: int8((1+2)*3), r: nine}]", "inline").unwrap();
//! let mut sink = WriterSink::new(std::io::stderr());
//!
//! let output = replace(b"foo 9".to_vec(), &rules, &mut sink).unwrap();
//! assert_eq!(output, b"bar nine");
//! ```

pub mod config;
pub mod diagnostics;
pub mod engine;
pub mod error;
pub mod resolve;
pub mod rules;

pub use error::{Result, SrError};
