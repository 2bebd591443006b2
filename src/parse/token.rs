use std::fmt::{self, Display, Formatter};

/// A [`Token`], representing one lexeme of a source expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Token<'src> {
	/// What kind of token it is; one of the kinds the [`Tokenizer`](super::Tokenizer) was built with.
	pub kind: &'static str,

	/// The raw text of the token.
	pub value: &'src str,

	/// Byte offset of the first character.
	pub start: usize,

	/// Byte offset one past the last character.
	pub end: usize,
}

impl Token<'_> {
	/// Whether this token is of `kind`.
	#[must_use]
	pub fn is(&self, kind: &str) -> bool {
		self.kind == kind
	}

	/// Whether this token is any of `kinds`.
	#[must_use]
	pub fn is_any(&self, kinds: &[&str]) -> bool {
		kinds.contains(&self.kind)
	}
}

impl Display for Token<'_> {
	fn fmt(&self, f: &mut Formatter) -> fmt::Result {
		f.write_str(self.value)
	}
}
