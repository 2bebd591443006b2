#![allow(clippy::module_inception)]
#![cfg_attr(doc_cfg, feature(doc_cfg))]

//! The expression language JSON-e templates are built on.
//!
//! ```
//! use jsone_expr::{execute, Context, Value};
//!
//! let mut builder = Context::builder();
//! builder.insert("a", 3.0);
//! let context = builder.build().unwrap();
//!
//! assert_eq!(execute("a ** 2 + 1", &context), Ok(Value::Number(10.0)));
//! ```

extern crate static_assertions as sa;

#[macro_use]
extern crate cfg_if;

pub mod ast;
mod containers;
pub mod env;
mod error;
pub mod function;
pub mod interpreter;
pub mod parse;
pub mod value;
mod variable;

pub use containers::{MaybeSendSync, RefCount};
pub use env::Context;
pub use error::{ErrorKind, Result, SyntaxError};
pub use function::Function;
pub use interpreter::Interpreter;
pub use parse::{Parser, Tokenizer};
pub use value::Value;
pub use variable::IllegalVariableName;

/// Parses and evaluates `expression` against `context`.
///
/// The whole of `expression` must be a single expression.
pub fn execute(expression: &str, context: &Context) -> Result<Value> {
	context.execute(expression)
}

/// Parses and evaluates the expression at `offset` in `expression`, which must be followed by a
/// `terminator` token (such as `"}"`).
///
/// Returns the value and the offset of the terminator. This is how `${ ... }` interpolations are
/// evaluated without knowing where they end beforehand.
pub fn execute_until(
	expression: &str,
	offset: usize,
	terminator: &'static str,
	context: &Context,
) -> Result<(Value, usize)> {
	context.execute_until(expression, offset, terminator)
}
