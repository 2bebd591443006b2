use crate::ast::Node;
use crate::{ErrorKind, Result, SyntaxError};

mod token;
mod tokenizer;
pub use token::Token;
pub use tokenizer::{Tokenizer, TokenizerError, KINDS, LANGUAGE, PATTERNS};

const UNARY: [&str; 3] = ["-", "+", "!"];
const PRIMITIVES: [&str; 5] = ["number", "string", "true", "false", "null"];

/// Binary operators, loosest first. Every level is left-associative except the last.
const PRECEDENCE: [&[&str]; 8] = [
	&["||"],
	&["&&"],
	&["in"],
	&["==", "!="],
	&["<", ">", "<=", ">="],
	&["+", "-"],
	&["*", "/"],
	&["**"],
];

/// Everything an expression can start with, for error messages.
pub const EXPRESSION_START: [&str; 12] =
	["!", "(", "+", "-", "[", "false", "identifier", "null", "number", "string", "true", "{"];

/// A type that handles parsing source code into [`Node`]s.
///
/// Tokens are pulled from the [`Tokenizer`] one at a time; the parser only ever looks one token ahead.
#[must_use]
pub struct Parser<'s, 't> {
	source: &'s str,
	tokenizer: &'t Tokenizer,
	current: Option<Token<'s>>,
}

impl<'s, 't> Parser<'s, 't> {
	/// Creates a new `Parser`, which starts at the first token at or after `offset`.
	pub fn new(source: &'s str, tokenizer: &'t Tokenizer, offset: usize) -> Result<Self> {
		let current = tokenizer.next(source, offset)?;

		Ok(Self { source, tokenizer, current })
	}

	/// The token that will be consumed next, if any.
	#[must_use]
	pub fn current(&self) -> Option<&Token<'s>> {
		self.current.as_ref()
	}

	fn advance(&mut self) -> Result<()> {
		if let Some(token) = self.current {
			self.current = self.tokenizer.next(self.source, token.end)?;
		}

		Ok(())
	}

	fn unexpected(&self, expected: &[&'static str]) -> SyntaxError {
		let expected = expected.to_vec();

		match self.current {
			Some(token) => ErrorKind::Unexpected { found: token.value.to_owned(), expected }
				.error(self.source, token.start, token.end),
			None => {
				let end = self.source.len();
				ErrorKind::UnexpectedEnd { expected }.error(self.source, end.saturating_sub(1), end)
			}
		}
	}

	/// Consumes the current token, which must be one of `kinds`.
	pub fn take(&mut self, kinds: &[&'static str]) -> Result<Token<'s>> {
		match self.current {
			Some(token) if token.is_any(kinds) => {
				self.advance()?;
				Ok(token)
			}
			_ => Err(self.unexpected(kinds)),
		}
	}

	fn take_if(&mut self, kind: &str) -> Result<Option<Token<'s>>> {
		match self.current {
			Some(token) if token.is(kind) => {
				self.advance()?;
				Ok(Some(token))
			}
			_ => Ok(None),
		}
	}

	fn peek_is(&self, kind: &str) -> bool {
		self.current.map_or(false, |token| token.is(kind))
	}

	/// Parses a single expression, leaving whatever follows it unconsumed.
	pub fn parse(&mut self) -> Result<Node<'s>> {
		self.parse_level(0)
	}

	/// Parses an expression which must make up the rest of the source.
	pub fn parse_program(mut self) -> Result<Node<'s>> {
		let node = self.parse()?;

		if let Some(token) = self.current {
			return Err(ErrorKind::TrailingInput.error(self.source, token.start, token.end));
		}

		Ok(node)
	}

	/// Parses an expression which must be followed by a `terminator` token.
	///
	/// The terminator isn't consumed; its starting offset is returned alongside the expression.
	pub fn parse_until(mut self, terminator: &'static str) -> Result<(Node<'s>, usize)> {
		let node = self.parse()?;

		match self.current {
			Some(token) if token.is(terminator) => Ok((node, token.start)),
			_ => Err(self.unexpected(&[terminator])),
		}
	}

	fn parse_level(&mut self, level: usize) -> Result<Node<'s>> {
		let Some(operators) = PRECEDENCE.get(level) else {
			return self.parse_unary();
		};

		let mut left = self.parse_level(level + 1)?;

		while let Some(operator) = self.current.filter(|token| token.is_any(operators)) {
			self.advance()?;

			// the last level (`**`) is right-associative.
			let right = if level + 1 == PRECEDENCE.len() {
				self.parse_level(level)?
			} else {
				self.parse_level(level + 1)?
			};

			left = Node::BinOp { operator, left: Box::new(left), right: Box::new(right) };
		}

		Ok(left)
	}

	fn parse_unary(&mut self) -> Result<Node<'s>> {
		match self.current {
			Some(operator) if operator.is_any(&UNARY) => {
				self.advance()?;
				let operand = Box::new(self.parse_unary()?);
				Ok(Node::UnaryOp { operator, operand })
			}
			_ => self.parse_postfix(),
		}
	}

	fn parse_postfix(&mut self) -> Result<Node<'s>> {
		let mut node = self.parse_primary()?;

		while let Some(token) = self.current {
			node = match token.kind {
				"." => {
					self.advance()?;
					let property = self.take(&["identifier"])?;
					Node::BinOp {
						operator: token,
						left: Box::new(node),
						right: Box::new(Node::Literal(property)),
					}
				}
				"(" => {
					self.advance()?;
					let args = self.parse_sequence(")")?;
					Node::FunctionCall { token, callee: Box::new(node), args }
				}
				"[" => {
					self.advance()?;
					self.parse_access(token, node)?
				}
				_ => break,
			};
		}

		Ok(node)
	}

	fn parse_primary(&mut self) -> Result<Node<'s>> {
		let Some(token) = self.current else {
			return Err(self.unexpected(&EXPRESSION_START));
		};

		match token.kind {
			"(" => {
				self.advance()?;
				let node = self.parse()?;
				self.take(&[")"])?;
				Ok(node)
			}
			"[" => {
				self.advance()?;
				let elements = self.parse_sequence("]")?;
				Ok(Node::List { token, elements })
			}
			"{" => {
				self.advance()?;
				self.parse_object(token)
			}
			"identifier" => {
				self.advance()?;
				Ok(Node::ContextValue(token))
			}
			kind if PRIMITIVES.contains(&kind) => {
				self.advance()?;
				Ok(Node::Literal(token))
			}
			_ => Err(
				ErrorKind::ExpectedExpression {
					found: token.value.to_owned(),
					expected: EXPRESSION_START.to_vec(),
				}
				.error(self.source, token.start, token.end),
			),
		}
	}

	/// Parses `expr, expr, ...` up to and including `close`, after the opening token was taken.
	fn parse_sequence(&mut self, close: &'static str) -> Result<Vec<Node<'s>>> {
		let mut elements = Vec::new();

		if self.take_if(close)?.is_some() {
			return Ok(elements);
		}

		loop {
			elements.push(self.parse()?);

			if self.take(&[",", close])?.is(close) {
				return Ok(elements);
			}
		}
	}

	fn parse_object(&mut self, token: Token<'s>) -> Result<Node<'s>> {
		let mut properties = Vec::new();

		if self.take_if("}")?.is_none() {
			loop {
				let key = self.take(&["string", "identifier"])?;
				let key = if key.is("string") { unquote(key.value) } else { key.value };

				self.take(&[":"])?;
				properties.push((key, self.parse()?));

				if self.take(&[",", "}"])?.is("}") {
					break;
				}
			}
		}

		Ok(Node::Object { token, properties })
	}

	fn parse_access(&mut self, token: Token<'s>, target: Node<'s>) -> Result<Node<'s>> {
		let left = if self.peek_is(":") { None } else { Some(Box::new(self.parse()?)) };
		let is_slice = self.take_if(":")?.is_some();

		let right =
			if is_slice && !self.peek_is("]") { Some(Box::new(self.parse()?)) } else { None };

		self.take(if is_slice { &["]"][..] } else { &[":", "]"][..] })?;

		Ok(Node::ValueAccess { token, target: Box::new(target), is_slice, left, right })
	}
}

/// Strips the quotes from a `string` token.
pub(crate) fn unquote(literal: &str) -> &str {
	literal.get(1..literal.len().saturating_sub(1)).unwrap_or_default()
}
