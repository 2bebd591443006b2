use crate::containers::{MaybeSendSync, RefCount};
use crate::env::Context;
use crate::value::Value;
use log::debug;
use std::fmt::{self, Debug, Display, Formatter};
use thiserror::Error;

#[cfg(feature = "builtins")]
#[cfg_attr(doc_cfg, doc(cfg(feature = "builtins")))]
pub mod builtins;
mod host;
pub use host::{HostFn, Param, Rest, Returns};

/// The kinds of values host functions can accept and return.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
	Boolean,
	String,
	Number,
	Array,
	Object,

	/// Accepts every value.
	Any,
}

impl Kind {
	/// The name of the kind, as used in error messages.
	#[must_use]
	pub const fn name(self) -> &'static str {
		match self {
			Self::Boolean => "boolean",
			Self::String => "string",
			Self::Number => "number",
			Self::Array => "array",
			Self::Object => "object",
			Self::Any => "any",
		}
	}

	/// Whether `value` is of this kind.
	#[must_use]
	pub const fn accepts(self, value: &Value) -> bool {
		matches!(
			(self, value),
			(Self::Any, _)
				| (Self::Boolean, Value::Bool(_))
				| (Self::String, Value::String(_))
				| (Self::Number, Value::Number(_))
				| (Self::Array, Value::Array(_))
				| (Self::Object, Value::Object(_))
		)
	}
}

impl Display for Kind {
	fn fmt(&self, f: &mut Formatter) -> fmt::Result {
		f.write_str(self.name())
	}
}

/// One parameter or return value of a host function.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slot {
	/// The evaluation [`Context`]; only allowed as the first parameter.
	Context,

	/// A single value.
	Value(Kind),

	/// Any number of values; only allowed as the last parameter.
	Variadic(Kind),

	/// An error the function may report; only allowed as the second return value.
	Error,
}

/// Describes the parameters and return values of a host function.
///
/// Signatures are checked once, when the function is wrapped; see [`SignatureError`] for the rules.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Signature {
	pub params: Vec<Slot>,
	pub returns: Vec<Slot>,
}

/// Problems with a [`Signature`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SignatureError {
	#[error("function wants the context, but its first parameter isn't the context")]
	MissingContext,

	#[error("the context can only be the first parameter, found at position {0}")]
	MisplacedContext(usize),

	#[error("only the last parameter can be variadic, found at position {0}")]
	MisplacedVariadic(usize),

	#[error("parameter {0} cannot be an error")]
	IllegalParameter(usize),

	#[error("functions must return a value")]
	NoReturn,

	#[error("functions return at most two values, not {0}")]
	TooManyReturns(usize),

	#[error("the first return value must be a value")]
	IllegalReturn,

	#[error("the second return value must be an error")]
	SecondReturnNotError,
}

/// A validated [`Signature`].
#[derive(Debug, Clone, PartialEq, Eq)]
struct Arity {
	fixed: Vec<Kind>,
	variadic: Option<Kind>,
	returns: Kind,
}

impl Signature {
	fn validate(&self, wants_context: bool) -> Result<Arity, SignatureError> {
		let mut params = self.params.iter().copied().enumerate().peekable();

		if wants_context && params.next_if(|&(_, slot)| slot == Slot::Context).is_none() {
			return Err(SignatureError::MissingContext);
		}

		let mut fixed = Vec::with_capacity(self.params.len());
		let mut variadic = None;

		while let Some((position, slot)) = params.next() {
			match slot {
				Slot::Context => return Err(SignatureError::MisplacedContext(position)),
				Slot::Error => return Err(SignatureError::IllegalParameter(position)),
				Slot::Variadic(_) if params.peek().is_some() => {
					return Err(SignatureError::MisplacedVariadic(position))
				}
				Slot::Variadic(kind) => variadic = Some(kind),
				Slot::Value(kind) => fixed.push(kind),
			}
		}

		let returns = match *self.returns.as_slice() {
			[] => return Err(SignatureError::NoReturn),
			[Slot::Value(kind)] | [Slot::Value(kind), Slot::Error] => kind,
			[Slot::Value(_), _] => return Err(SignatureError::SecondReturnNotError),
			[_] | [_, _] => return Err(SignatureError::IllegalReturn),
			ref more => return Err(SignatureError::TooManyReturns(more.len())),
		};

		Ok(Arity { fixed, variadic, returns })
	}
}

const fn at_least(variadic: &bool) -> &'static str {
	if *variadic {
		"at least "
	} else {
		""
	}
}

/// Problems with invoking a [`Function`].
#[derive(Error, Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum CallError {
	/// The wrong number of arguments was given.
	#[error("{name}() expects {}{expected} arguments, received {received}", at_least(.variadic))]
	Arity { name: String, expected: usize, received: usize, variadic: bool },

	/// An argument had the wrong type. `position` starts at 1.
	#[error("{name}() argument {position} must be {expected}, not {actual}")]
	ArgumentType { name: String, position: usize, expected: Kind, actual: &'static str },

	/// The function returned something other than what its signature declared.
	#[error("{name}() returned {actual}, not {expected}")]
	ReturnType { name: String, expected: Kind, actual: &'static str },

	/// The function itself reported an error.
	#[error("{message}")]
	Host { name: String, message: String },
}

/// The type-erased form of a host function.
///
/// It always receives the context, and any arguments after they've been checked against the
/// function's [`Signature`].
pub trait RawFn: Fn(&Context, Vec<Value>) -> Result<Value, String> + MaybeSendSync {}
impl<T: Fn(&Context, Vec<Value>) -> Result<Value, String> + MaybeSendSync> RawFn for T {}

/// A host function that can be called from expressions.
#[derive(Clone)]
pub struct Function(RefCount<Inner>);

struct Inner {
	name: String,
	arity: Arity,
	func: Box<dyn RawFn>,
}

#[cfg(feature = "multithreaded")]
sa::assert_impl_all!(Function: Send, Sync);

impl Eq for Function {}
impl PartialEq for Function {
	/// Functions are only equal if they're identical.
	fn eq(&self, rhs: &Self) -> bool {
		RefCount::ptr_eq(&self.0, &rhs.0)
	}
}

impl Debug for Function {
	fn fmt(&self, f: &mut Formatter) -> fmt::Result {
		if f.alternate() {
			f.debug_struct("Function")
				.field("name", &self.name())
				.field("params", &self.0.arity.fixed)
				.field("variadic", &self.0.arity.variadic)
				.field("returns", &self.0.arity.returns)
				.finish()
		} else {
			f.debug_tuple("Function").field(&self.name()).finish()
		}
	}
}

impl Function {
	/// Wraps a Rust function or closure, deriving its [`Signature`] from its types.
	///
	/// Parameters may be `bool`, `f64`, [`String`], [`Array`](crate::value::Array),
	/// [`Object`](crate::value::Object), or [`Value`] (for any kind), and the last one may be
	/// [`Rest<T>`] to accept any number of trailing arguments. It may return any of those, or a
	/// `Result` of one of them whose error is [`Display`].
	pub fn wrap<M, F: HostFn<M>>(name: impl Into<String>, func: F) -> Result<Self, SignatureError> {
		Self::new(name.into(), &F::signature(), false, func.into_raw())
	}

	/// Like [`Function::wrap`], except the function's first parameter is `&Context`.
	pub fn wrap_with_context<M, F: HostFn<M>>(
		name: impl Into<String>,
		func: F,
	) -> Result<Self, SignatureError> {
		Self::new(name.into(), &F::signature(), true, func.into_raw())
	}

	/// Wraps an untyped function with an explicitly supplied `signature`.
	///
	/// `func` is only ever called with arguments that match `signature`, and its result is checked
	/// against the first return slot.
	pub fn from_signature<F: RawFn + 'static>(
		name: impl Into<String>,
		signature: &Signature,
		wants_context: bool,
		func: F,
	) -> Result<Self, SignatureError> {
		Self::new(name.into(), signature, wants_context, Box::new(func))
	}

	fn new(
		name: String,
		signature: &Signature,
		wants_context: bool,
		func: Box<dyn RawFn>,
	) -> Result<Self, SignatureError> {
		let arity = signature.validate(wants_context)?;

		Ok(Self(Inner { name, arity, func }.into()))
	}

	/// Gets the name of the function.
	#[must_use]
	pub fn name(&self) -> &str {
		&self.0.name
	}

	/// Calls the function, after checking `args` against its signature.
	pub fn invoke(&self, context: &Context, args: Vec<Value>) -> Result<Value, CallError> {
		let Inner { name, arity, func } = &*self.0;
		debug!("invoking {name}() with {} arguments", args.len());

		let expected = arity.fixed.len();
		if args.len() < expected || (arity.variadic.is_none() && args.len() > expected) {
			return Err(CallError::Arity {
				name: name.clone(),
				expected,
				received: args.len(),
				variadic: arity.variadic.is_some(),
			});
		}

		for (idx, arg) in args.iter().enumerate() {
			let Some(kind) = arity.fixed.get(idx).copied().or(arity.variadic) else {
				continue;
			};

			if !kind.accepts(arg) {
				return Err(CallError::ArgumentType {
					name: name.clone(),
					position: idx + 1,
					expected: kind,
					actual: arg.typename(),
				});
			}
		}

		let result =
			func(context, args).map_err(|message| CallError::Host { name: name.clone(), message })?;

		if !arity.returns.accepts(&result) {
			return Err(CallError::ReturnType {
				name: name.clone(),
				expected: arity.returns,
				actual: result.typename(),
			});
		}

		Ok(result)
	}
}
