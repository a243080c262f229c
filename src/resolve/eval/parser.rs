use super::EvalError;
use super::lexer::{Token, tokenize};
use super::value::{FloatKind, IntKind, Value, binary, convert, unary};

/// Parsed expression tree.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Expr {
	Literal(Value),
	Ident {
		name: String,
		offset: usize,
	},
	Unary {
		op: &'static str,
		operand: Box<Expr>,
	},
	Binary {
		op: &'static str,
		lhs: Box<Expr>,
		rhs: Box<Expr>,
	},
	Call {
		name: String,
		args: Vec<Expr>,
		offset: usize,
	},
}

/// Binding strength of a binary operator, higher binds tighter.
fn precedence(op: &str) -> Option<u8> {
	match op {
		"*" | "/" | "%" | "<<" | ">>" | "&" | "&^" => Some(5),
		"+" | "-" | "|" | "^" => Some(4),
		"==" | "!=" | "<" | "<=" | ">" | ">=" => Some(3),
		"&&" => Some(2),
		"||" => Some(1),
		_ => None,
	}
}

/// Parse a complete expression.
pub(crate) fn parse(src: &str) -> Result<Expr, EvalError> {
	let mut parser = Parser {
		tokens: tokenize(src)?,
		pos: 0,
	};

	let expr = parser.expr(1)?;
	match parser.peek() {
		(Token::Eof, _) => Ok(expr),
		(token, offset) => Err(EvalError::Syntax {
			offset: *offset,
			message: format!("unexpected {token} after expression"),
		}),
	}
}

struct Parser {
	tokens: Vec<(Token, usize)>,
	pos: usize,
}

impl Parser {
	fn peek(&self) -> &(Token, usize) {
		// tokenize always ends with Eof, never step past it
		&self.tokens[self.pos.min(self.tokens.len() - 1)]
	}

	fn next(&mut self) -> (Token, usize) {
		let token = self.peek().clone();
		if self.pos < self.tokens.len() - 1 {
			self.pos += 1;
		}
		token
	}

	fn expect(&mut self, expected: Token) -> Result<(), EvalError> {
		let (token, offset) = self.next();
		if token == expected {
			Ok(())
		} else {
			Err(EvalError::Syntax {
				offset,
				message: format!("expected {expected}, found {token}"),
			})
		}
	}

	fn expr(&mut self, min_precedence: u8) -> Result<Expr, EvalError> {
		let mut lhs = self.unary()?;

		while let (Token::Op(op), _) = self.peek()
			&& let Some(prec) = precedence(op)
			&& prec >= min_precedence
		{
			let op = *op;
			self.next();
			let rhs = self.expr(prec + 1)?;
			lhs = Expr::Binary {
				op,
				lhs: Box::new(lhs),
				rhs: Box::new(rhs),
			};
		}

		Ok(lhs)
	}

	fn unary(&mut self) -> Result<Expr, EvalError> {
		if let (Token::Op(op @ ("+" | "-" | "!" | "^")), _) = self.peek() {
			let op = *op;
			self.next();
			let operand = self.unary()?;
			return Ok(Expr::Unary {
				op,
				operand: Box::new(operand),
			});
		}

		self.primary()
	}

	fn primary(&mut self) -> Result<Expr, EvalError> {
		let (token, offset) = self.next();

		match token {
			Token::Int(v) | Token::Rune(v) => Ok(Expr::Literal(Value::Int(v, IntKind::Untyped))),
			Token::Float(v) => Ok(Expr::Literal(Value::Float(v, FloatKind::Untyped))),
			Token::Str(bytes) => Ok(Expr::Literal(Value::Str(bytes))),
			Token::LParen => {
				let inner = self.expr(1)?;
				self.expect(Token::RParen)?;
				Ok(inner)
			}
			Token::Ident(name) if self.peek().0 == Token::LParen => {
				self.next();
				let args = self.arguments()?;
				Ok(Expr::Call { name, args, offset })
			}
			Token::Ident(name) => Ok(Expr::Ident { name, offset }),
			token => Err(EvalError::Syntax {
				offset,
				message: format!("unexpected {token}"),
			}),
		}
	}

	/// Comma separated arguments after the opening parenthesis.
	fn arguments(&mut self) -> Result<Vec<Expr>, EvalError> {
		let mut args = Vec::new();
		if self.peek().0 == Token::RParen {
			self.next();
			return Ok(args);
		}

		loop {
			args.push(self.expr(1)?);
			match self.next() {
				(Token::Comma, _) if self.peek().0 == Token::RParen => {
					self.next();
					return Ok(args);
				}
				(Token::Comma, _) => continue,
				(Token::RParen, _) => return Ok(args),
				(token, offset) => {
					return Err(EvalError::Syntax {
						offset,
						message: format!("expected , or ), found {token}"),
					});
				}
			}
		}
	}
}

impl Expr {
	/// Evaluate the tree to a constant.
	pub(crate) fn eval(&self) -> Result<Value, EvalError> {
		match self {
			Expr::Literal(value) => Ok(value.clone()),
			Expr::Ident { name, offset } => match name.as_str() {
				"true" => Ok(Value::Bool(true)),
				"false" => Ok(Value::Bool(false)),
				_ => Err(EvalError::UnknownIdentifier {
					name: name.clone(),
					offset: *offset,
				}),
			},
			Expr::Unary { op, operand } => unary(op, operand.eval()?),
			Expr::Binary { op, lhs, rhs } => binary(op, lhs.eval()?, rhs.eval()?),
			Expr::Call { name, args, offset } => call(name, args, *offset),
		}
	}
}

fn call(name: &str, args: &[Expr], offset: usize) -> Result<Value, EvalError> {
	let [arg] = args else {
		return Err(EvalError::ArgumentCount {
			name: name.to_string(),
			expected: 1,
			got: args.len(),
		});
	};
	let value = arg.eval()?;

	if name == "len" {
		return match value {
			Value::Str(bytes) => Ok(Value::Int(bytes.len() as i128, IntKind::Int)),
			other => Err(EvalError::InvalidOperation {
				op: "len".to_string(),
				ty: other.type_name().to_string(),
			}),
		};
	}

	convert(name, value).unwrap_or_else(|| {
		Err(EvalError::UnknownIdentifier {
			name: name.to_string(),
			offset,
		})
	})
}
