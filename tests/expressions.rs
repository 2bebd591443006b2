use assert_matches::assert_matches;
use jsone_expr::env::Builder;
use jsone_expr::{execute, execute_until, Context, ErrorKind, Value};
use serde_json::json;

fn context(json: serde_json::Value) -> Context {
	let mut builder = Builder::default();
	if let serde_json::Value::Object(object) = json {
		builder.json(object);
	}
	builder.build().unwrap()
}

fn eval(expression: &str) -> Value {
	execute(expression, &context(json!({}))).unwrap()
}

fn eval_with(expression: &str, json: serde_json::Value) -> Value {
	execute(expression, &context(json)).unwrap()
}

#[test]
fn numeric_literals() {
	for literal in ["0", "7", "12.5", "3.14159", "1000000", "0.001"] {
		assert_eq!(eval(literal), Value::Number(literal.parse().unwrap()), "{literal}");
	}
}

#[test]
fn unary_operators() {
	assert_eq!(eval("-2"), Value::Number(-2.0));
	assert_eq!(eval("+7"), Value::Number(7.0));
	assert_eq!(eval("!5"), Value::Bool(false));
	assert_eq!(eval("!!''"), Value::Bool(false));
}

#[test]
fn arithmetic() {
	assert_eq!(eval("2+3"), Value::Number(5.0));
	assert_eq!(eval("2-3"), Value::Number(-1.0));
	assert_eq!(eval("6/2"), Value::Number(3.0));
	assert_eq!(eval("2*3"), Value::Number(6.0));
	assert_eq!(eval("2**3"), Value::Number(8.0));
	assert_eq!(eval("1 + 2 * 3 - 4 / 2"), Value::Number(5.0));
}

#[test]
fn exponentiation_is_right_associative() {
	assert_eq!(eval("2**3**2"), Value::Number(512.0));
	assert_eq!(eval("(2**3)**2"), Value::Number(64.0));
}

#[test]
fn comparisons() {
	assert_eq!(eval("5>2"), Value::Bool(true));
	assert_eq!(eval("4<7"), Value::Bool(true));
	assert_eq!(eval("3>=3"), Value::Bool(true));
	assert_eq!(eval("6<=2"), Value::Bool(false));
	assert_eq!(eval("2!=3"), Value::Bool(true));
	assert_eq!(eval("5==2"), Value::Bool(false));
	assert_eq!(eval("'a' < 'b'"), Value::Bool(true));
}

#[test]
fn short_circuiting() {
	let empty = Context::new();

	assert_eq!(execute("true || a", &empty), Ok(Value::Bool(true)));
	assert_eq!(execute("false && a", &empty), Ok(Value::Bool(false)));
	assert_matches!(execute("true && a", &empty).unwrap_err().kind, ErrorKind::UndefinedVariable(_));
}

#[test]
#[cfg(feature = "builtins")]
fn builtin_calls() {
	assert_eq!(eval("max(5,2,9)"), Value::Number(9.0));
	assert_eq!(eval("min(max(1, 2), 3)"), Value::Number(2.0));
	assert_eq!(eval_with("len(s)", json!({"s": "ñ€😀"})), Value::Number(3.0));
}

#[test]
fn function_calls() {
	let mut builder = Builder::new();
	builder.function("max", |first: f64, rest: jsone_expr::function::Rest<f64>| {
		rest.0.into_iter().fold(first, f64::max)
	})
	.unwrap();
	let context = builder.build().unwrap();

	assert_eq!(execute("max(5,2,9)", &context), Ok(Value::Number(9.0)));
}

#[test]
fn property_and_index_access() {
	let array = json!({"a": [1, 2, 3, 4]});

	assert_eq!(eval("{a:1}.a"), Value::Number(1.0));
	assert_eq!(eval_with("a[2]", array.clone()), Value::Number(3.0));
	assert_eq!(eval_with("a[2:]", array.clone()), Value::from(json!([3, 4])));
	assert_eq!(eval_with("a[:2]", array.clone()), Value::from(json!([1, 2])));
	assert_eq!(eval_with("a[2:4]", array.clone()), Value::from(json!([3, 4])));
	assert_eq!(eval_with("a[-1]", array), Value::Number(4.0));
	assert_eq!(eval_with("o['missing']", json!({"o": {}})), Value::Null);
	assert_eq!(eval_with("o.a.b", json!({"o": {"a": {"b": "deep"}}})), Value::from("deep"));
}

#[test]
fn membership() {
	assert_eq!(eval(r#""abc" in "aabc""#), Value::Bool(true));
	assert_eq!(eval(r#"5 in ["5","five"]"#), Value::Bool(false));
	assert_eq!(eval(r#""5" in {"5":"five"}"#), Value::Bool(true));
	assert_eq!(eval("[1, 2] in [[1, 2], 3]"), Value::Bool(true));
}

#[test]
fn literals_are_deterministic() {
	for literal in [
		"[1, 'two', null, true, [3.5], {a: {b: []}}]",
		"{x: [1, {y: 'z'}], 'quoted key': false}",
		"[]",
		"{}",
	] {
		let first = eval(literal);
		assert_eq!(first, eval(literal), "{literal}");
		assert!(serde_json::Value::try_from(first).is_ok());
	}

	assert_eq!(eval("{a: [1, {b: null}]}"), Value::from(json!({"a": [1, {"b": null}]})));
}

#[test]
fn unicode_slicing() {
	let context = json!({"s": "ñ€😀"});

	assert_eq!(eval_with("s[1:]", context.clone()), Value::from("€😀"));
	assert_eq!(eval_with("s[2]", context.clone()), Value::from("😀"));
	assert_eq!(eval_with("s[:-1]", context.clone()), Value::from("ñ€"));
	assert_eq!(eval_with("s[-1:]", context), Value::from("😀"));
}

#[test]
fn division_by_zero() {
	let err = execute("6/0", &Context::new()).unwrap_err();

	assert_eq!(err.kind, ErrorKind::DivisionByZero);
	assert_eq!(err.snippet(), "/");
}

#[test]
fn property_of_non_object() {
	let err = execute("a.b", &context(json!({"a": 1}))).unwrap_err();

	assert_eq!(err.kind, ErrorKind::NotAnObject);
	assert_eq!(err.message(), "cannot access properties of non-object");
	assert_eq!(err.source, "a.b");
}

#[test]
fn unexpected_end_of_input() {
	let err = execute("2+", &Context::new()).unwrap_err();

	assert_matches!(err.kind, ErrorKind::UnexpectedEnd { .. });
	assert_eq!((err.start, err.end), (1, 2));
	assert!(err.expected().is_some_and(|expected| expected.contains(&"number")));
}

#[test]
fn lexical_errors() {
	let err = execute("1 + $", &Context::new()).unwrap_err();

	assert_eq!(err.kind, ErrorKind::UnknownToken);
	assert_eq!((err.start, err.end), (4, 5));
}

#[test]
fn trailing_input() {
	let err = execute("1 2", &Context::new()).unwrap_err();
	assert_eq!(err.kind, ErrorKind::TrailingInput);
}

#[test]
fn interpolation() {
	let context = context(json!({"who": "world", "n": 2}));
	let template = "hello ${who}, ${n * 21}!";

	let (value, end) = execute_until(template, 8, "}", &context).unwrap();
	assert_eq!((value, end), (Value::from("world"), 11));

	let (value, end) = execute_until(template, 16, "}", &context).unwrap();
	assert_eq!((value, end), (Value::Number(42.0), 22));
	assert_eq!(&template[end..], "}!");
}

#[test]
fn interpolation_requires_the_terminator() {
	let err = execute_until("${ 1 + 2", 2, "}", &Context::new()).unwrap_err();
	assert_matches!(err.kind, ErrorKind::UnexpectedEnd { expected } if expected == ["}"]);

	let err = execute_until("${ 1 ) }", 2, "}", &Context::new()).unwrap_err();
	assert_matches!(err.kind, ErrorKind::Unexpected { found, .. } if found == ")");
}

#[test]
fn errors_display_their_location() {
	let err = execute("[1, 2][5]", &Context::new()).unwrap_err();

	assert_eq!(err.kind, ErrorKind::IndexOutOfBounds);
	assert_eq!(err.to_string(), "index out of bounds at 6 -> '[' in '[1, 2][5]'");
}
