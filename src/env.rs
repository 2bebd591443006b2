use crate::interpreter::Interpreter;
use crate::parse::{Parser, LANGUAGE};
use crate::{Result, Value};
use log::debug;
use std::collections::HashMap;

mod builder;
pub use builder::Builder;

/// The names an expression can refer to, and their values.
///
/// A `Context` is never modified by evaluating an expression, so one can be shared between any
/// number of evaluations. Build one with a [`Builder`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Context {
	variables: HashMap<String, Value>,
}

#[cfg(feature = "multithreaded")]
sa::assert_impl_all!(Context: Send, Sync);

impl Context {
	/// Creates an empty `Context`, without even the builtins.
	#[must_use]
	pub fn new() -> Self {
		Self::default()
	}

	/// Creates a [`Builder`], which starts out with the builtins (when enabled).
	pub fn builder() -> Builder {
		Builder::default()
	}

	/// Fetches the value bound to `name`.
	#[must_use]
	pub fn get(&self, name: &str) -> Option<&Value> {
		self.variables.get(name)
	}

	/// Whether `name` is bound.
	#[must_use]
	pub fn contains(&self, name: &str) -> bool {
		self.variables.contains_key(name)
	}

	#[must_use]
	pub fn len(&self) -> usize {
		self.variables.len()
	}

	#[must_use]
	pub fn is_empty(&self) -> bool {
		self.variables.is_empty()
	}

	pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
		self.variables.iter().map(|(name, value)| (name.as_str(), value))
	}

	/// Parses and evaluates `expression`, which must be a single expression.
	pub fn execute(&self, expression: &str) -> Result<Value> {
		debug!("executing {expression:?}");

		let node = Parser::new(expression, &LANGUAGE, 0)?.parse_program()?;
		Interpreter::new(expression, self).evaluate(&node)
	}

	/// Parses and evaluates the expression starting at `offset`, which must be followed by a
	/// `terminator` token.
	///
	/// Returns the value and the offset the terminator starts at; nothing past the terminator is
	/// looked at.
	pub fn execute_until(
		&self,
		expression: &str,
		offset: usize,
		terminator: &'static str,
	) -> Result<(Value, usize)> {
		debug!("executing {expression:?} from {offset} until {terminator:?}");

		let (node, end) = Parser::new(expression, &LANGUAGE, offset)?.parse_until(terminator)?;
		Ok((Interpreter::new(expression, self).evaluate(&node)?, end))
	}
}
