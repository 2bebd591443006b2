//! The functions every [`Context`] built with [`Builder::default`](crate::env::Builder) has.

use super::{Function, HostFn, Rest};
use crate::env::Context;
use crate::value::{Array, Value};

fn min(first: f64, rest: Rest<f64>) -> f64 {
	rest.0.into_iter().fold(first, f64::min)
}

fn max(first: f64, rest: Rest<f64>) -> f64 {
	rest.0.into_iter().fold(first, f64::max)
}

/// Stringifies the scalar values.
fn stringify(value: &Value) -> Option<String> {
	match value {
		Value::Null => Some("null".to_owned()),
		Value::Bool(boolean) => Some(boolean.to_string()),
		Value::Number(number) => Some(number.to_string()),
		Value::String(string) => Some(string.clone()),
		_ => None,
	}
}

fn to_str(value: Value) -> Result<String, String> {
	stringify(&value).ok_or_else(|| format!("str() cannot convert {}", value.typename()))
}

fn number(string: String) -> Result<f64, String> {
	string.parse().map_err(|_| format!("{string:?} can't be converted to number"))
}

fn type_of(value: Value) -> String {
	value.typename().to_owned()
}

#[allow(clippy::cast_precision_loss)]
fn len(value: Value) -> Result<f64, String> {
	match value {
		Value::String(string) => Ok(string.chars().count() as f64),
		Value::Array(array) => Ok(array.len() as f64),
		other => Err(format!("len() cannot be used on {}", other.typename())),
	}
}

fn separator(value: &Value) -> Result<String, String> {
	match value {
		Value::String(string) => Ok(string.clone()),
		Value::Number(number) => Ok(number.to_string()),
		other => Err(format!("invalid separator of type {}", other.typename())),
	}
}

fn join(array: Array, sep: Value) -> Result<String, String> {
	let sep = separator(&sep)?;
	let strings = array
		.iter()
		.map(|element| {
			stringify(element).ok_or_else(|| format!("join() cannot stringify {}", element.typename()))
		})
		.collect::<Result<Vec<_>, _>>()?;

	Ok(strings.join(&sep))
}

fn split(string: String, sep: Value) -> Result<Array, String> {
	let sep = separator(&sep)?;

	if string.is_empty() {
		return Ok(vec![Value::from("")]);
	}

	Ok(string.split(sep.as_str()).filter(|part| !part.is_empty()).map(Value::from).collect())
}

#[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
fn range(start: f64, stop: f64, step: Rest<f64>) -> Result<Array, String> {
	let step = match *step.0 {
		[] => 1,
		[step] if step.round() >= 1.0 => step.round() as usize,
		[_] => return Err("range() step must be positive".to_owned()),
		ref more => return Err(format!("range() expects at most 3 arguments, received {}", more.len() + 2)),
	};

	Ok((start.round() as i64..stop.round() as i64).step_by(step).map(|i| Value::Number(i as f64)).collect())
}

fn defined(context: &Context, name: String) -> bool {
	context.contains(&name)
}

fn wrap<M, F: HostFn<M>>(functions: &mut Vec<Function>, name: &str, func: F) {
	match Function::wrap(name, func) {
		Ok(function) => functions.push(function),
		Err(err) => log::error!("builtin {name}() has an invalid signature: {err}"),
	}
}

/// All the builtin functions.
#[must_use]
pub fn all() -> Vec<Function> {
	let mut functions = Vec::new();

	wrap(&mut functions, "min", min);
	wrap(&mut functions, "max", max);
	wrap(&mut functions, "sqrt", f64::sqrt);
	wrap(&mut functions, "ceil", f64::ceil);
	wrap(&mut functions, "floor", f64::floor);
	wrap(&mut functions, "abs", f64::abs);
	wrap(&mut functions, "lowercase", |string: String| string.to_lowercase());
	wrap(&mut functions, "uppercase", |string: String| string.to_uppercase());
	wrap(&mut functions, "strip", |string: String| string.trim().to_owned());
	wrap(&mut functions, "lstrip", |string: String| string.trim_start().to_owned());
	wrap(&mut functions, "rstrip", |string: String| string.trim_end().to_owned());
	wrap(&mut functions, "str", to_str);
	wrap(&mut functions, "number", number);
	wrap(&mut functions, "typeof", type_of);
	wrap(&mut functions, "len", len);
	wrap(&mut functions, "join", join);
	wrap(&mut functions, "split", split);
	wrap(&mut functions, "range", range);

	match Function::wrap_with_context("defined", defined) {
		Ok(function) => functions.push(function),
		Err(err) => log::error!("builtin defined() has an invalid signature: {err}"),
	}

	functions
}
