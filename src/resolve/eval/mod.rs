//! Constant expression evaluation for `se` / `re` operands.
//!
//! The language is a small typed constant-expression subset in the style of
//! C-family systems languages. There are no variables; everything is folded
//! at evaluation time.
//!
//! Supported:
//! - Integer literals: decimal, `0x` hex, `0o` or leading-zero octal, `0b` binary,
//!   with `_` separators. Float literals such as `1.5`, `.5`, `1e3`.
//! - String literals `"..."` (escapes `\n \t \xHH \uHHHH \NNN` and friends) and raw
//!   strings `` `...` ``. Rune literals `'a'` evaluate to their code point.
//! - `true`, `false`.
//! - Unary `+ - ! ^`, binary `* / % << >> & &^ + - | ^ == != < <= > >= && ||`
//!   with the usual five precedence levels.
//! - Conversions `int int8 int16 int32 int64 uint uint8 uint16 uint32 uint64
//!   byte rune float32 float64 string` and the builtin `len`.
//!
//! Literals are untyped until a conversion or a typed operand gives them a type.
//! Typed results are range checked, so `int8(200)` is an error rather than a
//! wrapped value.

mod lexer;
mod parser;
pub mod value;

pub use value::{FloatKind, IntKind, Value};

/// Why an expression could not be evaluated.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum EvalError {
	#[error("syntax error at offset {offset}: {message}")]
	Syntax { offset: usize, message: String },

	#[error("undefined: {name} (offset {offset})")]
	UnknownIdentifier { name: String, offset: usize },

	#[error("mismatched types {lhs} and {rhs} for {op}")]
	TypeMismatch {
		op: String,
		lhs: String,
		rhs: String,
	},

	#[error("operator {op} not defined on {ty}")]
	InvalidOperation { op: String, ty: String },

	#[error("constant {value} overflows {ty}")]
	Overflow { value: String, ty: String },

	#[error("constant {value} truncated to integer")]
	Truncated { value: String },

	#[error("division by zero")]
	DivisionByZero,

	#[error("invalid negative shift count {count}")]
	NegativeShift { count: i128 },

	#[error("cannot convert {from} to {to}")]
	InvalidConversion { from: String, to: String },

	#[error("{name} expects {expected} argument(s), got {got}")]
	ArgumentCount {
		name: String,
		expected: usize,
		got: usize,
	},
}

/// Turns expression source into operand bytes.
pub trait Evaluator {
	fn evaluate(&self, source: &str) -> Result<Vec<u8>, EvalError>;
}

/// The built-in constant-expression evaluator.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConstEvaluator;

impl Evaluator for ConstEvaluator {
	fn evaluate(&self, source: &str) -> Result<Vec<u8>, EvalError> {
		Ok(evaluate_value(source)?.into_bytes())
	}
}

/// Evaluate an expression to a typed constant.
pub fn evaluate_value(source: &str) -> Result<Value, EvalError> {
	parser::parse(source)?.eval()
}
