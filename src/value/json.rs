use crate::value::Value;
use serde::ser::{Error as _, Serialize, Serializer};
use serde_json::{Map, Number};
use thiserror::Error;

/// Largest integer a double represents exactly.
const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_992.0;

/// A [`Value`] that has no JSON representation.
#[derive(Error, Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum ConversionError {
	/// Functions only exist inside of expressions.
	#[error("function {0} cannot be converted to JSON")]
	Function(String),

	/// `NaN` and the infinities aren't valid JSON.
	#[error("{0} cannot be converted to JSON")]
	NonFinite(f64),
}

#[allow(clippy::cast_possible_truncation)]
fn as_integer(number: f64) -> Option<i64> {
	(number.fract() == 0.0 && number.abs() < MAX_SAFE_INTEGER).then_some(number as i64)
}

impl From<serde_json::Value> for Value {
	fn from(json: serde_json::Value) -> Self {
		match json {
			serde_json::Value::Null => Self::Null,
			serde_json::Value::Bool(boolean) => Self::Bool(boolean),
			serde_json::Value::Number(number) => Self::Number(number.as_f64().unwrap_or_default()),
			serde_json::Value::String(string) => Self::String(string),
			serde_json::Value::Array(array) => Self::Array(array.into_iter().map(Self::from).collect()),
			serde_json::Value::Object(object) => {
				Self::Object(object.into_iter().map(|(key, value)| (key, Self::from(value))).collect())
			}
		}
	}
}

impl TryFrom<Value> for serde_json::Value {
	type Error = ConversionError;

	fn try_from(value: Value) -> Result<Self, Self::Error> {
		Ok(match value {
			Value::Null => Self::Null,
			Value::Bool(boolean) => Self::Bool(boolean),
			Value::Number(number) => match as_integer(number) {
				Some(integer) => Self::Number(integer.into()),
				None => Self::Number(Number::from_f64(number).ok_or(ConversionError::NonFinite(number))?),
			},
			Value::String(string) => Self::String(string),
			Value::Array(array) => {
				Self::Array(array.into_iter().map(Self::try_from).collect::<Result<_, _>>()?)
			}
			Value::Object(object) => Self::Object(
				object
					.into_iter()
					.map(|(key, value)| Ok((key, Self::try_from(value)?)))
					.collect::<Result<Map<_, _>, ConversionError>>()?,
			),
			Value::Function(function) => return Err(ConversionError::Function(function.name().to_owned())),
		})
	}
}

/// Serializes like JSON: integral numbers become integers, and functions or non-finite numbers are errors.
impl Serialize for Value {
	fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
		match self {
			Self::Null => serializer.serialize_unit(),
			Self::Bool(boolean) => serializer.serialize_bool(*boolean),
			Self::Number(number) if !number.is_finite() => {
				Err(S::Error::custom(ConversionError::NonFinite(*number)))
			}
			Self::Number(number) => match as_integer(*number) {
				Some(integer) => serializer.serialize_i64(integer),
				None => serializer.serialize_f64(*number),
			},
			Self::String(string) => serializer.serialize_str(string),
			Self::Array(array) => serializer.collect_seq(array),
			Self::Object(object) => serializer.collect_map(object),
			Self::Function(function) => {
				Err(S::Error::custom(ConversionError::Function(function.name().to_owned())))
			}
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::Function;
	use assert_matches::assert_matches;
	use serde_json::json;

	#[test]
	fn from_json() {
		let value = Value::from(json!({"a": [1, "two", null, false]}));

		let object = value.as_object().unwrap();
		assert_eq!(
			object["a"],
			Value::Array(vec![Value::Number(1.0), "two".into(), Value::Null, false.into()])
		);
	}

	#[test]
	fn integral_numbers_become_integers() {
		let json = serde_json::Value::try_from(Value::from(json!([3.0, 0.5, -2]))).unwrap();

		assert_eq!(json, json!([3, 0.5, -2]));
		assert!(json[0].is_i64());
	}

	#[test]
	fn non_finite_numbers_are_rejected() {
		assert_matches!(
			serde_json::Value::try_from(Value::Number(f64::INFINITY)),
			Err(ConversionError::NonFinite(_))
		);
		assert!(serde_json::to_string(&Value::Number(f64::NAN)).is_err());
	}

	#[test]
	fn functions_are_rejected() {
		let function = Value::from(Function::wrap("f", || true).unwrap());
		let nested = Value::Array(vec![function.clone()]);

		assert_matches!(
			serde_json::Value::try_from(nested),
			Err(ConversionError::Function(name)) if name == "f"
		);
		assert!(serde_json::to_string(&function).is_err());
	}

	#[test]
	fn serializes() {
		let value = Value::from(json!({"b": 1.5, "a": [1, null]}));
		assert_eq!(serde_json::to_string(&value).unwrap(), r#"{"a":[1,null],"b":1.5}"#);
	}
}
