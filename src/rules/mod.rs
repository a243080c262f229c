//! Rule selection and compilation for sr.
//!
//! This module handles:
//! - Picking each side's operand source by field precedence
//! - Compiling search patterns before any rule is applied

pub mod compiler;
pub mod spec;

pub use compiler::{CompiledRule, CompiledSearch, compile_rules};
pub use spec::{ReplaceSpec, SearchSpec};
