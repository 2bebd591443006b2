use crate::{ErrorKind, Value};

type Result<T> = std::result::Result<T, ErrorKind>;

pub fn unary(operator: &str, operand: Value) -> Result<Value> {
	match (operator, operand) {
		("!", operand) => Ok(Value::Bool(!operand.is_truthy())),
		("-", Value::Number(number)) => Ok(Value::Number(-number)),
		("+", Value::Number(number)) => Ok(Value::Number(number)),
		("-" | "+", _) => Err(ErrorKind::ExpectedNumber(operator.to_owned())),
		_ => Err(ErrorKind::UnknownOperator(operator.to_owned())),
	}
}

/// `target.key`.
pub fn property(target: Value, key: &str) -> Result<Value> {
	match target {
		Value::Object(mut object) => {
			object.remove(key).ok_or_else(|| ErrorKind::NoSuchProperty(key.to_owned()))
		}
		_ => Err(ErrorKind::NotAnObject),
	}
}

/// `needle in haystack`.
fn contains(needle: &Value, haystack: &Value) -> Result<bool> {
	match (needle, haystack) {
		(Value::String(needle), Value::String(haystack)) => Ok(haystack.contains(needle.as_str())),
		(_, Value::String(_)) => {
			Err(ErrorKind::TypeError("in operator expected a string when querying on a string"))
		}
		(Value::String(key), Value::Object(object)) => Ok(object.contains_key(key)),
		(_, Value::Object(_)) => {
			Err(ErrorKind::TypeError("in operator expected a string when querying on an object"))
		}
		(_, Value::Array(array)) => Ok(array.contains(needle)),
		_ => Err(ErrorKind::TypeError("in operator expected string, array or object")),
	}
}

fn arithmetic(operator: &str, left: f64, right: f64) -> Result<f64> {
	match operator {
		"-" => Ok(left - right),
		"*" => Ok(left * right),
		"/" if right == 0.0 => Err(ErrorKind::DivisionByZero),
		"/" => Ok(left / right),
		"**" => Ok(left.powf(right)),
		_ => Err(ErrorKind::UnknownOperator(operator.to_owned())),
	}
}

fn compare<T: PartialOrd + ?Sized>(operator: &str, left: &T, right: &T) -> Result<bool> {
	match operator {
		"<" => Ok(left < right),
		">" => Ok(left > right),
		"<=" => Ok(left <= right),
		">=" => Ok(left >= right),
		_ => Err(ErrorKind::UnknownOperator(operator.to_owned())),
	}
}

/// Every binary operator except the short-circuiting ones and `.`.
pub fn binary(operator: &str, left: Value, right: Value) -> Result<Value> {
	match operator {
		"==" => Ok(Value::Bool(left == right)),
		"!=" => Ok(Value::Bool(left != right)),
		"in" => contains(&left, &right).map(Value::Bool),

		"+" => match (left, right) {
			(Value::Number(left), Value::Number(right)) => Ok(Value::Number(left + right)),
			(Value::String(mut left), Value::String(right)) => {
				left.push_str(&right);
				Ok(Value::String(left))
			}
			_ => Err(ErrorKind::TypeError("expected either number or string operands")),
		},

		"-" | "*" | "/" | "**" => match (left, right) {
			(Value::Number(left), Value::Number(right)) => {
				arithmetic(operator, left, right).map(Value::Number)
			}
			_ => Err(ErrorKind::TypeError("expected number operands")),
		},

		"<" | ">" | "<=" | ">=" => match (left, right) {
			(Value::Number(left), Value::Number(right)) => compare(operator, &left, &right),
			(Value::String(left), Value::String(right)) => compare(operator, left.as_str(), right.as_str()),
			_ => Err(ErrorKind::TypeError("comparison operator requires two strings or numbers")),
		}
		.map(Value::Bool),

		_ => Err(ErrorKind::UnknownOperator(operator.to_owned())),
	}
}
