use super::EvalError;

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Token {
	Int(i128),
	Float(f64),
	Str(Vec<u8>),
	Rune(i128),
	Ident(String),
	Op(&'static str),
	LParen,
	RParen,
	Comma,
	Eof,
}

impl std::fmt::Display for Token {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			Token::Int(v) | Token::Rune(v) => write!(f, "{v}"),
			Token::Float(v) => write!(f, "{v}"),
			Token::Str(s) => write!(f, "{:?}", String::from_utf8_lossy(s)),
			Token::Ident(name) => write!(f, "{name}"),
			Token::Op(op) => write!(f, "{op}"),
			Token::LParen => write!(f, "("),
			Token::RParen => write!(f, ")"),
			Token::Comma => write!(f, ","),
			Token::Eof => write!(f, "end of input"),
		}
	}
}

/// Longest operators first so `<<` is not read as `<`.
const OPERATORS: [&str; 20] = [
	"&^", "<<", ">>", "&&", "||", "==", "!=", "<=", ">=", "+", "-", "*", "/", "%", "&", "|", "^",
	"!", "<", ">",
];

/// Split an expression into tokens, each paired with its byte offset.
/// The last token is always `Eof`.
pub(crate) fn tokenize(src: &str) -> Result<Vec<(Token, usize)>, EvalError> {
	let mut lexer = Lexer { src, pos: 0 };
	let mut tokens = Vec::new();

	loop {
		lexer.skip_whitespace();
		let offset = lexer.pos;
		let token = lexer.next_token()?;
		let done = token == Token::Eof;
		tokens.push((token, offset));
		if done {
			return Ok(tokens);
		}
	}
}

struct Lexer<'a> {
	src: &'a str,
	pos: usize,
}

impl Lexer<'_> {
	fn peek(&self) -> Option<char> {
		self.src[self.pos..].chars().next()
	}

	fn peek_second(&self) -> Option<char> {
		let mut chars = self.src[self.pos..].chars();
		chars.next();
		chars.next()
	}

	fn bump(&mut self) -> Option<char> {
		let c = self.peek()?;
		self.pos += c.len_utf8();
		Some(c)
	}

	fn error(&self, offset: usize, message: impl Into<String>) -> EvalError {
		EvalError::Syntax {
			offset,
			message: message.into(),
		}
	}

	fn skip_whitespace(&mut self) {
		while self.peek().is_some_and(char::is_whitespace) {
			self.bump();
		}
	}

	fn next_token(&mut self) -> Result<Token, EvalError> {
		let Some(c) = self.peek() else {
			return Ok(Token::Eof);
		};

		match c {
			'0'..='9' => self.number(),
			'.' if self.peek_second().is_some_and(|n| n.is_ascii_digit()) => self.number(),
			'"' => self.interpreted_string(),
			'`' => self.raw_string(),
			'\'' => self.rune(),
			'(' => {
				self.bump();
				Ok(Token::LParen)
			}
			')' => {
				self.bump();
				Ok(Token::RParen)
			}
			',' => {
				self.bump();
				Ok(Token::Comma)
			}
			c if c.is_alphabetic() || c == '_' => Ok(self.ident()),
			_ => self.operator(),
		}
	}

	fn ident(&mut self) -> Token {
		let start = self.pos;
		while self.peek().is_some_and(|c| c.is_alphanumeric() || c == '_') {
			self.bump();
		}
		Token::Ident(self.src[start..self.pos].to_string())
	}

	fn operator(&mut self) -> Result<Token, EvalError> {
		let rest = &self.src[self.pos..];
		let op = OPERATORS.iter().copied().find(|op| rest.starts_with(op));

		match op {
			Some(op) => {
				self.pos += op.len();
				Ok(Token::Op(op))
			}
			None => {
				let c = self.peek().unwrap_or_default();
				Err(self.error(self.pos, format!("unexpected character {c:?}")))
			}
		}
	}

	fn number(&mut self) -> Result<Token, EvalError> {
		let start = self.pos;
		let hex = self.src[start..].starts_with("0x") || self.src[start..].starts_with("0X");

		while let Some(c) = self.peek() {
			let prev = self.src[..self.pos].chars().last();
			let exponent_sign =
				(c == '+' || c == '-') && !hex && matches!(prev, Some('e') | Some('E'));
			if c.is_ascii_alphanumeric() || c == '_' || c == '.' || exponent_sign {
				self.bump();
			} else {
				break;
			}
		}

		let text = &self.src[start..self.pos];
		parse_number(text).ok_or_else(|| self.error(start, format!("invalid number literal {text}")))
	}

	fn interpreted_string(&mut self) -> Result<Token, EvalError> {
		let start = self.pos;
		self.bump();
		let mut bytes = Vec::new();

		loop {
			match self.bump() {
				None | Some('\n') => return Err(self.error(start, "string literal not terminated")),
				Some('"') => return Ok(Token::Str(bytes)),
				Some('\\') => self.escape('"', &mut bytes)?,
				Some(c) => {
					let mut buf = [0u8; 4];
					bytes.extend_from_slice(c.encode_utf8(&mut buf).as_bytes());
				}
			}
		}
	}

	fn raw_string(&mut self) -> Result<Token, EvalError> {
		let start = self.pos;
		self.bump();
		let body_start = self.pos;

		while let Some(c) = self.bump() {
			if c == '`' {
				let body = &self.src[body_start..self.pos - 1];
				return Ok(Token::Str(body.replace('\r', "").into_bytes()));
			}
		}

		Err(self.error(start, "raw string literal not terminated"))
	}

	fn rune(&mut self) -> Result<Token, EvalError> {
		let start = self.pos;
		self.bump();

		let value = match self.bump() {
			None | Some('\n') | Some('\'') => {
				return Err(self.error(start, "empty or unterminated rune literal"));
			}
			Some('\\') => {
				let mut bytes = Vec::new();
				let escape_start = self.pos;
				self.escape('\'', &mut bytes)?;
				let escape_text = &self.src[escape_start..self.pos];
				if escape_text.starts_with(['x', '0', '1', '2', '3', '4', '5', '6', '7']) {
					i128::from(bytes[0])
				} else {
					let decoded = String::from_utf8_lossy(&bytes);
					decoded.chars().next().map_or(0, |c| i128::from(u32::from(c)))
				}
			}
			Some(c) => i128::from(u32::from(c)),
		};

		if self.bump() != Some('\'') {
			return Err(self.error(start, "rune literal must hold exactly one character"));
		}

		Ok(Token::Rune(value))
	}

	/// Decode one escape sequence (after the backslash) into `out`.
	fn escape(&mut self, quote: char, out: &mut Vec<u8>) -> Result<(), EvalError> {
		let start = self.pos - 1;
		let c = self
			.bump()
			.ok_or_else(|| self.error(start, "escape sequence not terminated"))?;

		let simple = match c {
			'a' => Some(0x07),
			'b' => Some(0x08),
			'f' => Some(0x0c),
			'n' => Some(b'\n'),
			'r' => Some(b'\r'),
			't' => Some(b'\t'),
			'v' => Some(0x0b),
			'\\' => Some(b'\\'),
			c if c == quote => Some(c as u8),
			_ => None,
		};
		if let Some(byte) = simple {
			out.push(byte);
			return Ok(());
		}

		match c {
			'x' => {
				let value = self.digits(2, 16, start)?;
				out.push(value as u8);
			}
			'0'..='7' => {
				let rest = self.digits(2, 8, start)?;
				let value = (c as u32 - '0' as u32) * 64 + rest;
				if value > 255 {
					return Err(self.error(start, "octal escape value > 255"));
				}
				out.push(value as u8);
			}
			'u' | 'U' => {
				let len = if c == 'u' { 4 } else { 8 };
				let value = self.digits(len, 16, start)?;
				let ch = char::from_u32(value)
					.ok_or_else(|| self.error(start, "escape sequence is invalid Unicode code point"))?;
				let mut buf = [0u8; 4];
				out.extend_from_slice(ch.encode_utf8(&mut buf).as_bytes());
			}
			_ => return Err(self.error(start, format!("unknown escape sequence \\{c}"))),
		}

		Ok(())
	}

	fn digits(&mut self, count: usize, radix: u32, start: usize) -> Result<u32, EvalError> {
		let mut value = 0u32;
		for _ in 0..count {
			let digit = self
				.peek()
				.and_then(|c| c.to_digit(radix))
				.ok_or_else(|| self.error(start, "invalid character in escape sequence"))?;
			self.bump();
			value = value * radix + digit;
		}
		Ok(value)
	}
}

/// Classify and parse a scanned number literal.
fn parse_number(text: &str) -> Option<Token> {
	let lower = text.to_ascii_lowercase();
	let digits = |s: &str| s.replace('_', "");

	if let Some(hex) = lower.strip_prefix("0x") {
		return i128::from_str_radix(&digits(hex), 16).ok().map(Token::Int);
	}
	if let Some(bin) = lower.strip_prefix("0b") {
		return i128::from_str_radix(&digits(bin), 2).ok().map(Token::Int);
	}
	if let Some(oct) = lower.strip_prefix("0o") {
		return i128::from_str_radix(&digits(oct), 8).ok().map(Token::Int);
	}
	if lower.contains(['.', 'e']) {
		return digits(&lower).parse::<f64>().ok().map(Token::Float);
	}
	if lower.len() > 1 && lower.starts_with('0') {
		return i128::from_str_radix(&digits(&lower[1..]), 8).ok().map(Token::Int);
	}

	digits(&lower).parse::<i128>().ok().map(Token::Int)
}
