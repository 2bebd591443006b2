use crate::parse::Token;

/// A parsed expression.
///
/// Nodes borrow their text from the source they were parsed from, and own their children. Every
/// node has an anchoring [`Token`] (see [`Node::token`]) which errors raised while evaluating it
/// point at.
#[derive(Debug, Clone, PartialEq)]
pub enum Node<'src> {
	/// A `number`, `string`, `true`, `false`, or `null` token.
	Literal(Token<'src>),

	/// An identifier, resolved against the context.
	ContextValue(Token<'src>),

	/// A prefix `-`, `+`, or `!`.
	UnaryOp { operator: Token<'src>, operand: Box<Self> },

	/// A binary operator. For `.`, `right` is always a [`Node::Literal`] of the property's identifier.
	BinOp { operator: Token<'src>, left: Box<Self>, right: Box<Self> },

	/// `[a, b, ...]`; `token` is the `[`.
	List { token: Token<'src>, elements: Vec<Self> },

	/// `{key: value, ...}`; `token` is the `{`. Keys are unquoted, in source order.
	Object { token: Token<'src>, properties: Vec<(&'src str, Self)> },

	/// `target[left]` or `target[left? : right?]`; `token` is the `[`.
	ValueAccess {
		token: Token<'src>,
		target: Box<Self>,
		is_slice: bool,
		left: Option<Box<Self>>,
		right: Option<Box<Self>>,
	},

	/// `callee(args...)`; `token` is the `(`.
	FunctionCall { token: Token<'src>, callee: Box<Self>, args: Vec<Self> },
}

impl<'src> Node<'src> {
	/// The token errors for this node are reported at.
	#[must_use]
	pub fn token(&self) -> &Token<'src> {
		match self {
			Self::Literal(token) | Self::ContextValue(token) => token,
			Self::UnaryOp { operator, .. } | Self::BinOp { operator, .. } => operator,
			Self::List { token, .. }
			| Self::Object { token, .. }
			| Self::ValueAccess { token, .. }
			| Self::FunctionCall { token, .. } => token,
		}
	}
}
