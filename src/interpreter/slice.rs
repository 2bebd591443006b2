use crate::{ErrorKind, Value};

const INTEGER_ARGUMENTS: ErrorKind =
	ErrorKind::TypeError("slicing can only be used with integer arguments");

/// Converts a bound to an integer, if it's present.
#[allow(clippy::cast_possible_truncation)]
fn bound(value: Option<Value>) -> Result<Option<i64>, ErrorKind> {
	match value {
		None => Ok(None),
		Some(Value::Number(number)) if number.fract() == 0.0 => Ok(Some(number as i64)),
		Some(_) => Err(INTEGER_ARGUMENTS),
	}
}

/// Resolves negative bounds and clamps both to `0..=len`, with `start <= end`.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::cast_possible_wrap)]
fn normalize(start: Option<i64>, end: Option<i64>, len: usize) -> (usize, usize) {
	let len = len as i64;
	let clamp = |bound: i64| {
		if bound < 0 {
			bound.saturating_add(len).max(0) as usize
		} else {
			bound.min(len) as usize
		}
	};

	let end = clamp(end.unwrap_or(len));
	(clamp(start.unwrap_or(0)).min(end), end)
}

/// The number of code points in `string`.
fn length(string: &str) -> usize {
	if string.is_ascii() {
		string.len()
	} else {
		string.chars().count()
	}
}

/// The code points `start..end` of `string`.
fn substring(string: &str, start: usize, end: usize) -> String {
	if string.is_ascii() {
		string.get(start..end).unwrap_or_default().to_owned()
	} else {
		string.chars().skip(start).take(end.saturating_sub(start)).collect()
	}
}

/// `target[left]` (when `is_slice` is false) or `target[left:right]`.
pub fn access(
	target: Value,
	is_slice: bool,
	left: Option<Value>,
	right: Option<Value>,
) -> Result<Value, ErrorKind> {
	let target = match (target, is_slice, &left) {
		(Value::Object(mut object), false, Some(Value::String(key))) => {
			return Ok(object.remove(key).unwrap_or_default());
		}
		(Value::Object(_), false, _) => {
			return Err(ErrorKind::TypeError("object properties must be accessed with strings"));
		}
		(target, ..) => target,
	};

	let start = bound(left)?;
	let end = bound(right)?;

	match target {
		Value::Array(mut array) => {
			let (start, end) = normalize(start, end, array.len());

			if is_slice {
				Ok(Value::Array(array.drain(start..end).collect()))
			} else if start < array.len() {
				Ok(array.swap_remove(start))
			} else {
				Err(ErrorKind::IndexOutOfBounds)
			}
		}

		Value::String(string) => {
			let len = length(&string);
			let (start, end) = normalize(start, end, len);

			if is_slice {
				Ok(Value::String(substring(&string, start, end)))
			} else if start < len {
				Ok(Value::String(substring(&string, start, start + 1)))
			} else {
				Err(ErrorKind::IndexOutOfBounds)
			}
		}

		_ => Err(ErrorKind::TypeError("slicing can only be used on arrays and strings")),
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use assert_matches::assert_matches;
	use serde_json::json;

	fn index(target: serde_json::Value, at: f64) -> Result<Value, ErrorKind> {
		access(Value::from(target), false, Some(Value::Number(at)), None)
	}

	fn slice(target: serde_json::Value, left: Option<f64>, right: Option<f64>) -> Result<Value, ErrorKind> {
		access(Value::from(target), true, left.map(Value::Number), right.map(Value::Number))
	}

	#[test]
	fn array_indices() {
		assert_eq!(index(json!([1, 2, 3, 4]), 2.0), Ok(Value::Number(3.0)));
		assert_eq!(index(json!([1, 2, 3, 4]), -1.0), Ok(Value::Number(4.0)));
		assert_eq!(index(json!([1, 2, 3, 4]), 4.0), Err(ErrorKind::IndexOutOfBounds));
		assert_eq!(index(json!([]), 0.0), Err(ErrorKind::IndexOutOfBounds));
	}

	#[test]
	fn array_slices() {
		let array = json!([1, 2, 3, 4]);

		assert_eq!(slice(array.clone(), Some(2.0), None), Ok(Value::from(json!([3, 4]))));
		assert_eq!(slice(array.clone(), None, Some(2.0)), Ok(Value::from(json!([1, 2]))));
		assert_eq!(slice(array.clone(), Some(2.0), Some(4.0)), Ok(Value::from(json!([3, 4]))));
		assert_eq!(slice(array.clone(), Some(-3.0), Some(-1.0)), Ok(Value::from(json!([2, 3]))));
		assert_eq!(slice(array.clone(), Some(-10.0), Some(10.0)), Ok(Value::from(array.clone())));
		assert_eq!(slice(array.clone(), Some(3.0), Some(1.0)), Ok(Value::from(json!([]))));
		assert_eq!(slice(array, None, None), Ok(Value::from(json!([1, 2, 3, 4]))));
	}

	#[test]
	fn string_indices_use_code_points() {
		assert_eq!(index(json!("abc"), 1.0), Ok(Value::from("b")));
		assert_eq!(index(json!("añb"), 1.0), Ok(Value::from("ñ")));
		assert_eq!(index(json!("añb"), -1.0), Ok(Value::from("b")));
		assert_eq!(index(json!("añb"), 3.0), Err(ErrorKind::IndexOutOfBounds));
	}

	#[test]
	fn string_slices_use_code_points() {
		assert_eq!(slice(json!("€ab"), Some(1.0), None), Ok(Value::from("ab")));
		assert_eq!(slice(json!("a€😀b"), Some(1.0), Some(3.0)), Ok(Value::from("€😀")));
		assert_eq!(slice(json!("hello"), Some(1.0), Some(-1.0)), Ok(Value::from("ell")));
		assert_eq!(slice(json!("hi"), Some(5.0), Some(9.0)), Ok(Value::from("")));
	}

	#[test]
	fn object_lookups() {
		let object = Value::from(json!({"a": 1}));

		assert_eq!(access(object.clone(), false, Some("a".into()), None), Ok(Value::Number(1.0)));
		assert_eq!(access(object.clone(), false, Some("b".into()), None), Ok(Value::Null));
		assert_matches!(
			access(object, true, Some("a".into()), None),
			Err(ErrorKind::TypeError("slicing can only be used with integer arguments"))
		);
	}

	#[test]
	fn bounds_must_be_integers() {
		assert_eq!(index(json!([1]), 0.5), Err(INTEGER_ARGUMENTS));
		assert_eq!(slice(json!([1]), None, Some(f64::INFINITY)), Err(INTEGER_ARGUMENTS));
		assert_eq!(access(Value::from("abc"), false, Some(true.into()), None), Err(INTEGER_ARGUMENTS));
	}

	#[test]
	fn only_arrays_and_strings() {
		assert_matches!(
			index(json!(12), 0.0),
			Err(ErrorKind::TypeError("slicing can only be used on arrays and strings"))
		);
		assert_matches!(
			index(json!({"0": 1}), 0.0),
			Err(ErrorKind::TypeError("object properties must be accessed with strings"))
		);
		assert_matches!(
			access(Value::from(json!({"a": 1})), false, Some(true.into()), None),
			Err(ErrorKind::TypeError("object properties must be accessed with strings"))
		);
	}
}
