use super::EvalError;
use std::cmp::Ordering;
use std::fmt;

/// Integer constant types. `Untyped` is what a bare literal has until
/// it meets a typed operand or a conversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntKind {
	Untyped,
	Int,
	Int8,
	Int16,
	Int32,
	Int64,
	Uint,
	Uint8,
	Uint16,
	Uint32,
	Uint64,
}

impl IntKind {
	pub fn from_name(name: &str) -> Option<Self> {
		match name {
			"int" => Some(IntKind::Int),
			"int8" => Some(IntKind::Int8),
			"int16" => Some(IntKind::Int16),
			"int32" | "rune" => Some(IntKind::Int32),
			"int64" => Some(IntKind::Int64),
			"uint" => Some(IntKind::Uint),
			"uint8" | "byte" => Some(IntKind::Uint8),
			"uint16" => Some(IntKind::Uint16),
			"uint32" => Some(IntKind::Uint32),
			"uint64" => Some(IntKind::Uint64),
			_ => None,
		}
	}

	pub fn name(self) -> &'static str {
		match self {
			IntKind::Untyped => "untyped int",
			IntKind::Int => "int",
			IntKind::Int8 => "int8",
			IntKind::Int16 => "int16",
			IntKind::Int32 => "int32",
			IntKind::Int64 => "int64",
			IntKind::Uint => "uint",
			IntKind::Uint8 => "uint8",
			IntKind::Uint16 => "uint16",
			IntKind::Uint32 => "uint32",
			IntKind::Uint64 => "uint64",
		}
	}

	/// Inclusive range of representable values. `int` and `uint` are 64-bit.
	fn bounds(self) -> (i128, i128) {
		match self {
			IntKind::Untyped => (i128::MIN, i128::MAX),
			IntKind::Int | IntKind::Int64 => (i64::MIN.into(), i64::MAX.into()),
			IntKind::Int8 => (i8::MIN.into(), i8::MAX.into()),
			IntKind::Int16 => (i16::MIN.into(), i16::MAX.into()),
			IntKind::Int32 => (i32::MIN.into(), i32::MAX.into()),
			IntKind::Uint | IntKind::Uint64 => (0, u64::MAX.into()),
			IntKind::Uint8 => (0, u8::MAX.into()),
			IntKind::Uint16 => (0, u16::MAX.into()),
			IntKind::Uint32 => (0, u32::MAX.into()),
		}
	}

	fn is_unsigned(self) -> bool {
		matches!(
			self,
			IntKind::Uint | IntKind::Uint8 | IntKind::Uint16 | IntKind::Uint32 | IntKind::Uint64
		)
	}

	fn check(self, value: i128) -> Result<Value, EvalError> {
		let (min, max) = self.bounds();
		if value < min || value > max {
			return Err(EvalError::Overflow {
				value: value.to_string(),
				ty: self.name().to_string(),
			});
		}
		Ok(Value::Int(value, self))
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FloatKind {
	Untyped,
	Float32,
	Float64,
}

impl FloatKind {
	pub fn from_name(name: &str) -> Option<Self> {
		match name {
			"float32" => Some(FloatKind::Float32),
			"float64" => Some(FloatKind::Float64),
			_ => None,
		}
	}

	pub fn name(self) -> &'static str {
		match self {
			FloatKind::Untyped => "untyped float",
			FloatKind::Float32 => "float32",
			FloatKind::Float64 => "float64",
		}
	}

	/// Round to this kind's precision, rejecting values it cannot hold.
	fn check(self, value: f64) -> Result<Value, EvalError> {
		let rounded = match self {
			FloatKind::Float32 => f64::from(value as f32),
			_ => value,
		};
		if !rounded.is_finite() {
			return Err(EvalError::Overflow {
				value: format_float(value, FloatKind::Float64),
				ty: self.name().to_string(),
			});
		}
		Ok(Value::Float(rounded, self))
	}
}

/// A constant produced by evaluating an expression.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
	Int(i128, IntKind),
	Float(f64, FloatKind),
	Str(Vec<u8>),
	Bool(bool),
}

impl Value {
	pub fn type_name(&self) -> &'static str {
		match self {
			Value::Int(_, kind) => kind.name(),
			Value::Float(_, kind) => kind.name(),
			Value::Str(_) => "string",
			Value::Bool(_) => "bool",
		}
	}

	/// Default textual form of the value, as used for operands.
	pub fn into_bytes(self) -> Vec<u8> {
		match self {
			Value::Str(bytes) => bytes,
			other => other.to_string().into_bytes(),
		}
	}
}

impl fmt::Display for Value {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Value::Int(v, _) => write!(f, "{v}"),
			Value::Float(v, kind) => write!(f, "{}", format_float(*v, *kind)),
			Value::Str(bytes) => write!(f, "{}", String::from_utf8_lossy(bytes)),
			Value::Bool(b) => write!(f, "{b}"),
		}
	}
}

/// Shortest round-trip form; exponent notation below 1e-4 or from 1e6 up,
/// with a signed, at least two digit exponent (`1e+06`, `2.5e-05`).
pub fn format_float(value: f64, kind: FloatKind) -> String {
	if value.is_nan() {
		return "NaN".to_string();
	}
	if value.is_infinite() {
		let text = if value > 0.0 { "+Inf" } else { "-Inf" };
		return text.to_string();
	}
	if value == 0.0 {
		let text = if value.is_sign_negative() { "-0" } else { "0" };
		return text.to_string();
	}

	let (scientific, plain) = match kind {
		FloatKind::Float32 => (format!("{:e}", value as f32), format!("{}", value as f32)),
		_ => (format!("{value:e}"), format!("{value}")),
	};

	let Some((mantissa, exponent)) = scientific.split_once('e') else {
		return plain;
	};
	let exponent: i32 = exponent.parse().unwrap_or(0);

	if (-4..6).contains(&exponent) {
		plain
	} else {
		let sign = if exponent < 0 { '-' } else { '+' };
		format!("{mantissa}e{sign}{:02}", exponent.abs())
	}
}

fn mismatch(op: &str, lhs: &Value, rhs: &Value) -> EvalError {
	EvalError::TypeMismatch {
		op: op.to_string(),
		lhs: lhs.type_name().to_string(),
		rhs: rhs.type_name().to_string(),
	}
}

fn not_defined(op: &str, value: &Value) -> EvalError {
	EvalError::InvalidOperation {
		op: op.to_string(),
		ty: value.type_name().to_string(),
	}
}

/// An untyped float that holds a whole number can stand in for an integer.
fn float_to_int(value: f64, kind: IntKind) -> Result<Value, EvalError> {
	if value.fract() != 0.0 || !value.is_finite() {
		return Err(EvalError::Truncated {
			value: format_float(value, FloatKind::Untyped),
		});
	}
	if value < i128::MIN as f64 || value > i128::MAX as f64 {
		return Err(EvalError::Overflow {
			value: format_float(value, FloatKind::Untyped),
			ty: kind.name().to_string(),
		});
	}
	kind.check(value as i128)
}

/// Bring two operands to a common type, following untyped-constant rules.
fn unify(op: &str, lhs: Value, rhs: Value) -> Result<(Value, Value), EvalError> {
	use Value::{Float, Int};

	match (&lhs, &rhs) {
		(Int(a, ka), Int(b, kb)) => {
			let kind = match (*ka, *kb) {
				(IntKind::Untyped, k) | (k, IntKind::Untyped) => k,
				(x, y) if x == y => x,
				_ => return Err(mismatch(op, &lhs, &rhs)),
			};
			Ok((kind.check(*a)?, kind.check(*b)?))
		}
		(Float(a, ka), Float(b, kb)) => {
			let kind = match (*ka, *kb) {
				(FloatKind::Untyped, k) | (k, FloatKind::Untyped) => k,
				(x, y) if x == y => x,
				_ => return Err(mismatch(op, &lhs, &rhs)),
			};
			Ok((kind.check(*a)?, kind.check(*b)?))
		}
		(Int(a, IntKind::Untyped), Float(_, kind)) => Ok((kind.check(*a as f64)?, rhs)),
		(Float(_, kind), Int(b, IntKind::Untyped)) => {
			let converted = kind.check(*b as f64)?;
			Ok((lhs, converted))
		}
		(Int(_, kind), Float(b, FloatKind::Untyped)) => {
			let converted = float_to_int(*b, *kind)?;
			Ok((lhs, converted))
		}
		(Float(a, FloatKind::Untyped), Int(_, kind)) => Ok((float_to_int(*a, *kind)?, rhs)),
		(Value::Str(_), Value::Str(_)) | (Value::Bool(_), Value::Bool(_)) => Ok((lhs, rhs)),
		_ => Err(mismatch(op, &lhs, &rhs)),
	}
}

/// Apply a binary operator.
pub fn binary(op: &str, lhs: Value, rhs: Value) -> Result<Value, EvalError> {
	match op {
		"&&" | "||" => logical(op, lhs, rhs),
		"<<" | ">>" => shift(op, lhs, rhs),
		"==" | "!=" | "<" | "<=" | ">" | ">=" => compare(op, lhs, rhs),
		_ => arithmetic(op, lhs, rhs),
	}
}

fn logical(op: &str, lhs: Value, rhs: Value) -> Result<Value, EvalError> {
	match (&lhs, &rhs) {
		(Value::Bool(a), Value::Bool(b)) => Ok(Value::Bool(if op == "&&" {
			*a && *b
		} else {
			*a || *b
		})),
		(Value::Bool(_), other) | (other, _) => Err(not_defined(op, other)),
	}
}

fn arithmetic(op: &str, lhs: Value, rhs: Value) -> Result<Value, EvalError> {
	let (lhs, rhs) = unify(op, lhs, rhs)?;

	match (lhs, rhs) {
		(Value::Int(a, kind), Value::Int(b, _)) => {
			if matches!(op, "/" | "%") && b == 0 {
				return Err(EvalError::DivisionByZero);
			}
			let result = match op {
				"+" => a.checked_add(b),
				"-" => a.checked_sub(b),
				"*" => a.checked_mul(b),
				"/" => a.checked_div(b),
				"%" => a.checked_rem(b),
				"&" => Some(a & b),
				"|" => Some(a | b),
				"^" => Some(a ^ b),
				"&^" => Some(a & !b),
				_ => return Err(not_defined(op, &Value::Int(a, kind))),
			};
			let value = result.ok_or_else(|| EvalError::Overflow {
				value: format!("{a} {op} {b}"),
				ty: kind.name().to_string(),
			})?;
			kind.check(value)
		}
		(Value::Float(a, kind), Value::Float(b, _)) => {
			let value = match op {
				"+" => a + b,
				"-" => a - b,
				"*" => a * b,
				"/" if b == 0.0 => return Err(EvalError::DivisionByZero),
				"/" => a / b,
				_ => return Err(not_defined(op, &Value::Float(a, kind))),
			};
			kind.check(value)
		}
		(Value::Str(mut a), Value::Str(b)) if op == "+" => {
			a.extend_from_slice(&b);
			Ok(Value::Str(a))
		}
		(lhs, _) => Err(not_defined(op, &lhs)),
	}
}

fn compare(op: &str, lhs: Value, rhs: Value) -> Result<Value, EvalError> {
	let (lhs, rhs) = unify(op, lhs, rhs)?;

	let ordering = match (&lhs, &rhs) {
		(Value::Int(a, _), Value::Int(b, _)) => Some(a.cmp(b)),
		(Value::Float(a, _), Value::Float(b, _)) => a.partial_cmp(b),
		(Value::Str(a), Value::Str(b)) => Some(a.cmp(b)),
		(Value::Bool(a), Value::Bool(b)) if matches!(op, "==" | "!=") => Some(a.cmp(b)),
		_ => return Err(not_defined(op, &lhs)),
	};

	// NaN compares unequal to everything
	let result = match ordering {
		None => op == "!=",
		Some(ord) => match op {
			"==" => ord == Ordering::Equal,
			"!=" => ord != Ordering::Equal,
			"<" => ord == Ordering::Less,
			"<=" => ord != Ordering::Greater,
			">" => ord == Ordering::Greater,
			_ => ord != Ordering::Less,
		},
	};

	Ok(Value::Bool(result))
}

/// Integer view of a shift operand; whole untyped floats are accepted.
fn shift_operand(op: &str, value: Value) -> Result<(i128, IntKind), EvalError> {
	match value {
		Value::Int(v, kind) => Ok((v, kind)),
		Value::Float(f, FloatKind::Untyped) => match float_to_int(f, IntKind::Untyped)? {
			Value::Int(v, kind) => Ok((v, kind)),
			other => Err(not_defined(op, &other)),
		},
		other => Err(not_defined(op, &other)),
	}
}

fn shift(op: &str, lhs: Value, rhs: Value) -> Result<Value, EvalError> {
	let (a, kind) = shift_operand(op, lhs)?;
	let (count, _) = shift_operand(op, rhs)?;

	if count < 0 {
		return Err(EvalError::NegativeShift { count });
	}

	let value = if op == "<<" {
		let overflow = || EvalError::Overflow {
			value: format!("{a} << {count}"),
			ty: kind.name().to_string(),
		};
		if a == 0 {
			0
		} else if count >= 127 {
			return Err(overflow());
		} else {
			let shifted = a << count;
			if shifted >> count != a {
				return Err(overflow());
			}
			shifted
		}
	} else if count >= 127 {
		if a < 0 { -1 } else { 0 }
	} else {
		a >> count
	};

	kind.check(value)
}

/// Apply a unary operator.
pub fn unary(op: &str, operand: Value) -> Result<Value, EvalError> {
	match (op, operand) {
		("+", value @ (Value::Int(..) | Value::Float(..))) => Ok(value),
		("-", Value::Int(v, kind)) => {
			let negated = v.checked_neg().ok_or_else(|| EvalError::Overflow {
				value: format!("-{v}"),
				ty: kind.name().to_string(),
			})?;
			kind.check(negated)
		}
		("-", Value::Float(v, kind)) => kind.check(-v),
		("!", Value::Bool(b)) => Ok(Value::Bool(!b)),
		("^", Value::Int(v, kind)) if kind.is_unsigned() => kind.check(kind.bounds().1 ^ v),
		("^", Value::Int(v, kind)) => kind.check(!v),
		(op, operand) => Err(not_defined(op, &operand)),
	}
}

/// Apply a conversion `name(value)`. Returns `None` if `name` is not a type.
pub fn convert(name: &str, value: Value) -> Option<Result<Value, EvalError>> {
	let invalid = |value: &Value| EvalError::InvalidConversion {
		from: value.type_name().to_string(),
		to: name.to_string(),
	};

	if let Some(kind) = IntKind::from_name(name) {
		return Some(match value {
			Value::Int(v, _) => kind.check(v),
			Value::Float(f, _) => float_to_int(f, kind),
			other => Err(invalid(&other)),
		});
	}

	if let Some(kind) = FloatKind::from_name(name) {
		return Some(match value {
			Value::Int(v, _) => kind.check(v as f64),
			Value::Float(f, _) => kind.check(f),
			other => Err(invalid(&other)),
		});
	}

	if name == "string" {
		return Some(match value {
			Value::Str(bytes) => Ok(Value::Str(bytes)),
			Value::Int(v, _) => {
				let ch = u32::try_from(v)
					.ok()
					.and_then(char::from_u32)
					.unwrap_or(char::REPLACEMENT_CHARACTER);
				Ok(Value::Str(ch.to_string().into_bytes()))
			}
			other => Err(invalid(&other)),
		});
	}

	None
}
