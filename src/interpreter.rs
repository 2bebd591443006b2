use crate::ast::Node;
use crate::env::Context;
use crate::parse::{unquote, Token};
use crate::value::Object;
use crate::{ErrorKind, Result, SyntaxError, Value};

mod ops;
mod slice;

/// Evaluates [`Node`]s against a [`Context`].
///
/// Nothing is mutated while evaluating, so one interpreter can evaluate any number of nodes parsed
/// from its `source`.
#[derive(Debug, Clone, Copy)]
pub struct Interpreter<'s, 'c> {
	source: &'s str,
	context: &'c Context,
}

impl<'s, 'c> Interpreter<'s, 'c> {
	/// Creates a new `Interpreter` for nodes parsed from `source`.
	#[must_use]
	pub const fn new(source: &'s str, context: &'c Context) -> Self {
		Self { source, context }
	}

	fn error(&self, kind: ErrorKind, token: &Token) -> SyntaxError {
		kind.error(self.source, token.start, token.end)
	}

	/// Evaluates `node`.
	pub fn evaluate(&self, node: &Node) -> Result<Value> {
		match node {
			Node::Literal(token) => literal(token).map_err(|kind| self.error(kind, token)),

			Node::ContextValue(token) => self
				.context
				.get(token.value)
				.cloned()
				.ok_or_else(|| self.error(ErrorKind::UndefinedVariable(token.value.to_owned()), token)),

			Node::UnaryOp { operator, operand } => {
				let operand = self.evaluate(operand)?;
				ops::unary(operator.kind, operand).map_err(|kind| self.error(kind, operator))
			}

			Node::BinOp { operator, left, right } => self.binary(operator, left, right),

			Node::List { elements, .. } => {
				elements.iter().map(|element| self.evaluate(element)).collect::<Result<_>>().map(Value::Array)
			}

			Node::Object { properties, .. } => {
				let mut object = Object::new();

				for (key, value) in properties {
					object.insert((*key).to_owned(), self.evaluate(value)?);
				}

				Ok(Value::Object(object))
			}

			Node::ValueAccess { token, target, is_slice, left, right } => {
				let target = self.evaluate(target)?;
				let left = left.as_deref().map(|left| self.evaluate(left)).transpose()?;
				let right = right.as_deref().map(|right| self.evaluate(right)).transpose()?;

				slice::access(target, *is_slice, left, right).map_err(|kind| self.error(kind, token))
			}

			Node::FunctionCall { token, callee, args } => {
				let function = match self.evaluate(callee)? {
					Value::Function(function) => function,
					other => return Err(self.error(ErrorKind::NotCallable(other.to_string()), token)),
				};

				let args = args.iter().map(|arg| self.evaluate(arg)).collect::<Result<Vec<_>>>()?;

				function.invoke(self.context, args).map_err(|err| self.error(ErrorKind::Call(err), token))
			}
		}
	}

	fn binary(&self, operator: &Token, left: &Node, right: &Node) -> Result<Value> {
		let left = self.evaluate(left)?;

		match operator.kind {
			"||" if left.is_truthy() => return Ok(Value::Bool(true)),
			"&&" if !left.is_truthy() => return Ok(Value::Bool(false)),
			"||" | "&&" => return Ok(Value::Bool(self.evaluate(right)?.is_truthy())),
			"." => {
				let Node::Literal(property) = right else {
					return Err(self.error(ErrorKind::InvalidProperty, operator));
				};

				return ops::property(left, property.value).map_err(|kind| self.error(kind, operator));
			}
			_ => {}
		}

		let right = self.evaluate(right)?;
		ops::binary(operator.kind, left, right).map_err(|kind| self.error(kind, operator))
	}
}

fn literal(token: &Token) -> std::result::Result<Value, ErrorKind> {
	match token.kind {
		"number" => token
			.value
			.parse()
			.map(Value::Number)
			.map_err(|_| ErrorKind::InvalidLiteral(token.value.to_owned())),
		"string" => Ok(Value::from(unquote(token.value))),
		"true" => Ok(Value::Bool(true)),
		"false" => Ok(Value::Bool(false)),
		"null" => Ok(Value::Null),
		_ => Err(ErrorKind::InvalidLiteral(token.value.to_owned())),
	}
}
