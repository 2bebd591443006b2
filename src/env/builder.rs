use super::*;
use crate::function::{Function, HostFn, SignatureError};
use crate::variable::{validate_name, IllegalVariableName};

/// A Builder for a [`Context`], allowing its names to be bound.
#[must_use]
#[derive(Debug, Clone)]
pub struct Builder {
	variables: HashMap<String, Value>,
}

impl Default for Builder {
	/// Creates a builder which has the builtins when the `builtins` feature is enabled.
	fn default() -> Self {
		#[allow(unused_mut)]
		let mut builder = Self::new();

		#[cfg(feature = "builtins")]
		builder.builtins();

		builder
	}
}

impl Builder {
	/// Creates a builder with nothing bound.
	pub fn new() -> Self {
		Self { variables: HashMap::new() }
	}

	/// Binds every builtin function under its own name.
	#[cfg(feature = "builtins")]
	#[cfg_attr(doc_cfg, doc(cfg(feature = "builtins")))]
	pub fn builtins(&mut self) {
		for function in crate::function::builtins::all() {
			self.variables.insert(function.name().to_owned(), function.into());
		}
	}

	/// Binds `name` to `value`, returning the previous value if there was one.
	pub fn insert(&mut self, name: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
		self.variables.insert(name.into(), value.into())
	}

	/// Wraps `func` (see [`Function::wrap`]) and binds it to `name`.
	pub fn function<M, F: HostFn<M>>(
		&mut self,
		name: impl Into<String>,
		func: F,
	) -> std::result::Result<(), SignatureError> {
		let name = name.into();
		let function = Function::wrap(name.clone(), func)?;
		self.variables.insert(name, function.into());
		Ok(())
	}

	/// Wraps `func` (see [`Function::wrap_with_context`]) and binds it to `name`.
	pub fn function_with_context<M, F: HostFn<M>>(
		&mut self,
		name: impl Into<String>,
		func: F,
	) -> std::result::Result<(), SignatureError> {
		let name = name.into();
		let function = Function::wrap_with_context(name.clone(), func)?;
		self.variables.insert(name, function.into());
		Ok(())
	}

	/// Binds every key of a JSON object.
	pub fn json(&mut self, object: serde_json::Map<String, serde_json::Value>) {
		for (name, value) in object {
			self.variables.insert(name, Value::from(value));
		}
	}

	/// Creates the [`Context`], after checking every name could be referred to from an expression.
	pub fn build(self) -> std::result::Result<Context, IllegalVariableName> {
		for name in self.variables.keys() {
			validate_name(name)?;
		}

		Ok(Context { variables: self.variables })
	}
}
