use crate::value::{Array, Object};
use crate::Function;
use std::fmt::{self, Display, Formatter};

/// A Value within an expression; anything JSON can represent, plus functions.
#[derive(Debug, Default, Clone, PartialEq)]
pub enum Value {
	#[default]
	/// Represents `null`.
	Null,

	/// Represents `true` and `false`.
	Bool(bool),

	/// Every number is a double.
	Number(f64),

	/// Represents a string.
	String(String),

	/// Represents a list of [`Value`]s.
	Array(Array),

	/// Represents a mapping of strings to [`Value`]s.
	Object(Object),

	/// A host function, callable from expressions.
	Function(Function),
}

#[cfg(feature = "multithreaded")]
sa::assert_impl_all!(Value: Send, Sync);

impl From<()> for Value {
	#[inline]
	fn from(_: ()) -> Self {
		Self::Null
	}
}

impl From<bool> for Value {
	#[inline]
	fn from(boolean: bool) -> Self {
		Self::Bool(boolean)
	}
}

impl From<f64> for Value {
	#[inline]
	fn from(number: f64) -> Self {
		Self::Number(number)
	}
}

impl From<String> for Value {
	#[inline]
	fn from(string: String) -> Self {
		Self::String(string)
	}
}

impl From<&str> for Value {
	#[inline]
	fn from(string: &str) -> Self {
		Self::String(string.to_owned())
	}
}

impl From<Array> for Value {
	#[inline]
	fn from(array: Array) -> Self {
		Self::Array(array)
	}
}

impl From<Object> for Value {
	#[inline]
	fn from(object: Object) -> Self {
		Self::Object(object)
	}
}

impl From<Function> for Value {
	#[inline]
	fn from(function: Function) -> Self {
		Self::Function(function)
	}
}

impl Value {
	/// Fetch the type's name.
	#[must_use = "getting the type name by itself does nothing."]
	pub const fn typename(&self) -> &'static str {
		match self {
			Self::Null => "null",
			Self::Bool(_) => "boolean",
			Self::Number(_) => "number",
			Self::String(_) => "string",
			Self::Array(_) => "array",
			Self::Object(_) => "object",
			Self::Function(_) => "function",
		}
	}

	/// Whether `self` counts as true in `!`, `&&`, and `||`.
	///
	/// Empty strings, arrays, and objects are false, as are `0`, `false`, and `null`.
	#[must_use]
	pub fn is_truthy(&self) -> bool {
		match self {
			Self::Null => false,
			Self::Bool(boolean) => *boolean,
			Self::Number(number) => *number != 0.0,
			Self::String(string) => !string.is_empty(),
			Self::Array(array) => !array.is_empty(),
			Self::Object(object) => !object.is_empty(),
			Self::Function(_) => true,
		}
	}

	#[must_use]
	pub const fn as_bool(&self) -> Option<bool> {
		match *self {
			Self::Bool(boolean) => Some(boolean),
			_ => None,
		}
	}

	#[must_use]
	pub const fn as_number(&self) -> Option<f64> {
		match *self {
			Self::Number(number) => Some(number),
			_ => None,
		}
	}

	#[must_use]
	pub fn as_str(&self) -> Option<&str> {
		match self {
			Self::String(string) => Some(string),
			_ => None,
		}
	}

	#[must_use]
	pub const fn as_array(&self) -> Option<&Array> {
		match self {
			Self::Array(array) => Some(array),
			_ => None,
		}
	}

	#[must_use]
	pub const fn as_object(&self) -> Option<&Object> {
		match self {
			Self::Object(object) => Some(object),
			_ => None,
		}
	}

	#[must_use]
	pub const fn as_function(&self) -> Option<&Function> {
		match self {
			Self::Function(function) => Some(function),
			_ => None,
		}
	}
}

fn write_string(string: &str, f: &mut Formatter) -> fmt::Result {
	f.write_str(&serde_json::to_string(string).map_err(|_| fmt::Error)?)
}

/// Renders JSON text; functions render as `<function NAME>`.
impl Display for Value {
	fn fmt(&self, f: &mut Formatter) -> fmt::Result {
		match self {
			Self::Null => f.write_str("null"),
			Self::Bool(boolean) => Display::fmt(boolean, f),
			Self::Number(number) => Display::fmt(number, f),
			Self::String(string) => write_string(string, f),
			Self::Array(array) => {
				f.write_str("[")?;
				for (idx, element) in array.iter().enumerate() {
					if idx != 0 {
						f.write_str(",")?;
					}
					Display::fmt(element, f)?;
				}
				f.write_str("]")
			}
			Self::Object(object) => {
				f.write_str("{")?;
				for (idx, (key, value)) in object.iter().enumerate() {
					if idx != 0 {
						f.write_str(",")?;
					}
					write_string(key, f)?;
					f.write_str(":")?;
					Display::fmt(value, f)?;
				}
				f.write_str("}")
			}
			Self::Function(function) => write!(f, "<function {}>", function.name()),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use serde_json::json;

	#[test]
	fn truthiness() {
		for falsey in [json!(null), json!(false), json!(0), json!(""), json!([]), json!({})] {
			assert!(!Value::from(falsey.clone()).is_truthy(), "{falsey}");
		}

		for truthy in [json!(true), json!(-0.5), json!(" "), json!([0]), json!({"a": null})] {
			assert!(Value::from(truthy.clone()).is_truthy(), "{truthy}");
		}

		let function = Function::wrap("nothing", || true).unwrap();
		assert!(Value::from(function).is_truthy());
	}

	#[test]
	fn typenames() {
		assert_eq!(Value::Null.typename(), "null");
		assert_eq!(Value::from(1.0).typename(), "number");
		assert_eq!(Value::from("x").typename(), "string");
		assert_eq!(Value::from(json!({})).typename(), "object");
	}

	#[test]
	fn deep_equality() {
		assert_eq!(Value::from(json!({"a": [1, {"b": null}]})), Value::from(json!({"a": [1.0, {"b": null}]})));
		assert_ne!(Value::from(json!([1, 2])), Value::from(json!([2, 1])));
		assert_ne!(Value::from(json!(5)), Value::from(json!("5")));
	}

	#[test]
	fn functions_compare_by_identity() {
		let a = Value::from(Function::wrap("f", || 1.0).unwrap());
		let b = Value::from(Function::wrap("f", || 1.0).unwrap());

		assert_eq!(a, a.clone());
		assert_ne!(a, b);
	}

	#[test]
	fn displays_as_json() {
		let value = Value::from(json!({"b": [1, 2.5, "x\"y"], "a": null, "c": true}));
		assert_eq!(value.to_string(), r#"{"a":null,"b":[1,2.5,"x\"y"],"c":true}"#);

		let function = Value::from(Function::wrap("len", || 0.0).unwrap());
		assert_eq!(function.to_string(), "<function len>");
	}
}
