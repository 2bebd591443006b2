use crate::function::CallError;
use std::fmt::{self, Display, Formatter};
use thiserror::Error;

/// The single error surfaced by [`execute`](crate::execute) and [`execute_until`](crate::execute_until).
///
/// Lexical, syntactic and evaluation failures all end up here; [`kind`](Self::kind) says which.
#[derive(Debug, Clone, PartialEq)]
#[must_use]
pub struct SyntaxError {
	/// What went wrong.
	pub kind: ErrorKind,

	/// The full source text of the expression.
	pub source: String,

	/// Byte offset where the problem starts.
	pub start: usize,

	/// Byte offset one past the end of the problem.
	pub end: usize,
}

/// Type alias for `Result<T, SyntaxError>`.
pub type Result<T> = std::result::Result<T, SyntaxError>;

/// The different reasons an expression can fail to parse or evaluate.
#[derive(Error, Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum ErrorKind {
	/// No token kind matched the remaining input.
	#[error("unexpected input")]
	UnknownToken,

	/// Tokenizing was asked to start somewhere that isn't a character boundary of the source.
	#[error("offset {0} is not a character boundary")]
	InvalidOffset(usize),

	/// The input ended while more tokens were required.
	#[error("unexpected end of input")]
	UnexpectedEnd { expected: Vec<&'static str> },

	/// A token was found that isn't allowed at this point.
	#[error("unexpected '{found}'")]
	Unexpected { found: String, expected: Vec<&'static str> },

	/// A token that cannot begin an expression was found where one was required.
	#[error("found '{found}' where an expression was expected")]
	ExpectedExpression { found: String, expected: Vec<&'static str> },

	/// A complete expression was parsed, but tokens remain.
	#[error("expected end of input")]
	TrailingInput,

	/// An identifier isn't bound in the context.
	#[error("undefined variable {0}")]
	UndefinedVariable(String),

	/// A literal token couldn't be turned into a value.
	#[error("invalid literal {0:?}")]
	InvalidLiteral(String),

	/// An operator token the interpreter doesn't know about.
	#[error("unknown operator '{0}'")]
	UnknownOperator(String),

	/// Unary `+` or `-` was applied to a non-number.
	#[error("expected number after {0}")]
	ExpectedNumber(String),

	/// `.name` on an object without `name`.
	#[error("object has no such property {0:?}")]
	NoSuchProperty(String),

	/// `.name` on something other than an object.
	#[error("cannot access properties of non-object")]
	NotAnObject,

	/// The right-hand side of `.` wasn't an identifier.
	#[error("property access requires an identifier")]
	InvalidProperty,

	/// Operands of the wrong types were given to an operator.
	#[error("{0}")]
	TypeError(&'static str),

	/// Division by zero.
	#[error("division by zero")]
	DivisionByZero,

	/// An index past the end of an array or string.
	#[error("index out of bounds")]
	IndexOutOfBounds,

	/// A call was attempted on something other than a function.
	#[error("{0} is not callable")]
	NotCallable(String),

	/// A function call failed.
	#[error("{0}")]
	Call(#[from] CallError),
}

impl ErrorKind {
	/// Helper function to create a new [`SyntaxError`] covering `start..end` of `source`.
	pub fn error(self, source: &str, start: usize, end: usize) -> SyntaxError {
		SyntaxError { kind: self, source: source.to_owned(), start, end }
	}

	/// The token kinds that would have been accepted, if known.
	#[must_use]
	pub fn expected(&self) -> Option<&[&'static str]> {
		match self {
			Self::UnexpectedEnd { expected }
			| Self::Unexpected { expected, .. }
			| Self::ExpectedExpression { expected, .. }
				if !expected.is_empty() =>
			{
				Some(expected.as_slice())
			}
			_ => None,
		}
	}
}

impl SyntaxError {
	/// The human-readable description of what went wrong.
	#[must_use]
	pub fn message(&self) -> String {
		self.kind.to_string()
	}

	/// The token kinds that would have been accepted, if known.
	#[must_use]
	pub fn expected(&self) -> Option<&[&'static str]> {
		self.kind.expected()
	}

	/// The part of the source the error points at.
	#[must_use]
	pub fn snippet(&self) -> &str {
		self.source.get(self.start..self.end).unwrap_or_default()
	}
}

impl Display for SyntaxError {
	fn fmt(&self, f: &mut Formatter) -> fmt::Result {
		Display::fmt(&self.kind, f)?;

		if let Some(expected) = self.expected() {
			write!(f, " expected {}", expected.join(", "))?;
		}

		write!(f, " at {} -> '{}' in '{}'", self.start, self.snippet(), self.source)
	}
}

impl std::error::Error for SyntaxError {
	fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
		match self.kind {
			ErrorKind::Call(ref err) => Some(err),
			_ => None,
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn display_includes_expected_and_snippet() {
		let err = ErrorKind::Unexpected { found: ")".into(), expected: vec!["number", "string"] }
			.error("1 + )", 4, 5);

		assert_eq!(err.snippet(), ")");
		assert_eq!(err.to_string(), "unexpected ')' expected number, string at 4 -> ')' in '1 + )'");
	}

	#[test]
	fn display_without_expected() {
		let err = ErrorKind::DivisionByZero.error("6/0", 1, 2);

		assert_eq!(err.expected(), None);
		assert_eq!(err.message(), "division by zero");
		assert_eq!(err.to_string(), "division by zero at 1 -> '/' in '6/0'");
	}

	#[test]
	fn snippet_out_of_range_is_empty() {
		let err = ErrorKind::UnknownToken.error("abc", 2, 10);
		assert_eq!(err.snippet(), "");
	}
}
