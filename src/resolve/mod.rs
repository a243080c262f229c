//! Operand resolution for sr.
//!
//! This module handles:
//! - Running operand commands and capturing their output
//! - Evaluating operand expressions
//! - Choosing between the two for each side of a rule

pub mod eval;
pub mod resolver;
pub mod runner;

pub use eval::{ConstEvaluator, EvalError, Evaluator};
pub use resolver::{Resolver, SearchOperand};
pub use runner::{CommandOutput, CommandRunner, SystemRunner, split_command};

/// Resolver wired to real processes and the built-in evaluator.
pub type SystemResolver = Resolver<SystemRunner, ConstEvaluator>;
