//! Deriving [`Signature`]s from the types of Rust functions.

use super::{Kind, RawFn, Signature, Slot};
use crate::containers::MaybeSendSync;
use crate::env::Context;
use crate::value::{Array, Object, Value};
use std::fmt::Display;

/// A type that can be a host function's parameter.
pub trait Param: Sized + 'static {
	/// The kind of value this parameter accepts.
	const KIND: Kind;

	/// Extracts `Self` from a value, if it's the right kind.
	fn from_value(value: Value) -> Option<Self>;
}

impl Param for bool {
	const KIND: Kind = Kind::Boolean;

	fn from_value(value: Value) -> Option<Self> {
		value.as_bool()
	}
}

impl Param for f64 {
	const KIND: Kind = Kind::Number;

	fn from_value(value: Value) -> Option<Self> {
		value.as_number()
	}
}

impl Param for String {
	const KIND: Kind = Kind::String;

	fn from_value(value: Value) -> Option<Self> {
		match value {
			Value::String(string) => Some(string),
			_ => None,
		}
	}
}

impl Param for Array {
	const KIND: Kind = Kind::Array;

	fn from_value(value: Value) -> Option<Self> {
		match value {
			Value::Array(array) => Some(array),
			_ => None,
		}
	}
}

impl Param for Object {
	const KIND: Kind = Kind::Object;

	fn from_value(value: Value) -> Option<Self> {
		match value {
			Value::Object(object) => Some(object),
			_ => None,
		}
	}
}

impl Param for Value {
	const KIND: Kind = Kind::Any;

	fn from_value(value: Value) -> Option<Self> {
		Some(value)
	}
}

/// The trailing arguments of a variadic host function.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Rest<T>(pub Vec<T>);

/// A type that can be returned from a host function.
pub trait Returns: 'static {
	/// The return slots this type occupies.
	fn slots() -> Vec<Slot>;

	/// Converts `self` into what the function produced, or the message of the error it reported.
	fn into_result(self) -> Result<Value, String>;
}

impl<T: Param + Into<Value>> Returns for T {
	fn slots() -> Vec<Slot> {
		vec![Slot::Value(T::KIND)]
	}

	fn into_result(self) -> Result<Value, String> {
		Ok(self.into())
	}
}

impl<T: Param + Into<Value>, E: Display + 'static> Returns for Result<T, E> {
	fn slots() -> Vec<Slot> {
		vec![Slot::Value(T::KIND), Slot::Error]
	}

	fn into_result(self) -> Result<Value, String> {
		self.map(Into::into).map_err(|err| err.to_string())
	}
}

/// A Rust function that can be wrapped as a [`Function`](super::Function).
///
/// `Marker` only exists to keep the implementations for different parameter lists apart; it's
/// inferred, and never needs to be named.
pub trait HostFn<Marker>: MaybeSendSync + Sized + 'static {
	/// The signature derived from the function's types.
	fn signature() -> Signature;

	/// Erases the function's types. Arguments must already match [`HostFn::signature`].
	fn into_raw(self) -> Box<dyn RawFn>;
}

type Args = std::vec::IntoIter<Value>;

fn next<T: Param>(args: &mut Args) -> Result<T, String> {
	args.next().and_then(T::from_value).ok_or_else(|| format!("expected {} argument", T::KIND))
}

fn rest<T: Param>(args: Args) -> Result<Rest<T>, String> {
	args.map(T::from_value)
		.collect::<Option<Vec<_>>>()
		.map(Rest)
		.ok_or_else(|| format!("expected {} arguments", T::KIND))
}

macro_rules! host_fn {
	($($arg:ident),*) => {
		impl<F, R $(, $arg)*> HostFn<fn($($arg),*) -> R> for F
		where
			F: Fn($($arg),*) -> R + MaybeSendSync + 'static,
			R: Returns
			$(, $arg: Param)*
		{
			fn signature() -> Signature {
				Signature { params: vec![$(Slot::Value(<$arg as Param>::KIND)),*], returns: R::slots() }
			}

			#[allow(non_snake_case, unused_mut, unused_variables)]
			fn into_raw(self) -> Box<dyn RawFn> {
				Box::new(move |_: &Context, args: Vec<Value>| {
					let mut args = args.into_iter();
					$(let $arg = next::<$arg>(&mut args)?;)*
					self($($arg),*).into_result()
				})
			}
		}

		impl<F, R, V $(, $arg)*> HostFn<(Rest<V>, fn($($arg),*) -> R)> for F
		where
			F: Fn($($arg,)* Rest<V>) -> R + MaybeSendSync + 'static,
			R: Returns,
			V: Param
			$(, $arg: Param)*
		{
			fn signature() -> Signature {
				Signature {
					params: vec![$(Slot::Value(<$arg as Param>::KIND),)* Slot::Variadic(V::KIND)],
					returns: R::slots(),
				}
			}

			#[allow(non_snake_case, unused_mut, unused_variables)]
			fn into_raw(self) -> Box<dyn RawFn> {
				Box::new(move |_: &Context, args: Vec<Value>| {
					let mut args = args.into_iter();
					$(let $arg = next::<$arg>(&mut args)?;)*
					self($($arg,)* rest::<V>(args)?).into_result()
				})
			}
		}

		impl<F, R $(, $arg)*> HostFn<(Context, fn($($arg),*) -> R)> for F
		where
			F: Fn(&Context $(, $arg)*) -> R + MaybeSendSync + 'static,
			R: Returns
			$(, $arg: Param)*
		{
			fn signature() -> Signature {
				Signature {
					params: vec![Slot::Context $(, Slot::Value(<$arg as Param>::KIND))*],
					returns: R::slots(),
				}
			}

			#[allow(non_snake_case, unused_mut, unused_variables)]
			fn into_raw(self) -> Box<dyn RawFn> {
				Box::new(move |context: &Context, args: Vec<Value>| {
					let mut args = args.into_iter();
					$(let $arg = next::<$arg>(&mut args)?;)*
					self(context $(, $arg)*).into_result()
				})
			}
		}

		impl<F, R, V $(, $arg)*> HostFn<(Context, Rest<V>, fn($($arg),*) -> R)> for F
		where
			F: Fn(&Context, $($arg,)* Rest<V>) -> R + MaybeSendSync + 'static,
			R: Returns,
			V: Param
			$(, $arg: Param)*
		{
			fn signature() -> Signature {
				Signature {
					params: vec![Slot::Context, $(Slot::Value(<$arg as Param>::KIND),)* Slot::Variadic(V::KIND)],
					returns: R::slots(),
				}
			}

			#[allow(non_snake_case, unused_mut, unused_variables)]
			fn into_raw(self) -> Box<dyn RawFn> {
				Box::new(move |context: &Context, args: Vec<Value>| {
					let mut args = args.into_iter();
					$(let $arg = next::<$arg>(&mut args)?;)*
					self(context, $($arg,)* rest::<V>(args)?).into_result()
				})
			}
		}
	};
}

host_fn!();
host_fn!(A);
host_fn!(A, B);
host_fn!(A, B, C);
host_fn!(A, B, C, D);
host_fn!(A, B, C, D, E);
host_fn!(A, B, C, D, E, G);

#[cfg(test)]
mod tests {
	use super::*;

	fn signature_of<M, F: HostFn<M>>(_: F) -> Signature {
		F::signature()
	}

	#[test]
	fn derives_parameters() {
		fn all(_: bool, _: f64, _: String, _: Array, _: Object, _: Value) -> bool {
			true
		}

		let kinds = [Kind::Boolean, Kind::Number, Kind::String, Kind::Array, Kind::Object, Kind::Any];
		assert_eq!(signature_of(all).params, kinds.map(Slot::Value));
	}

	#[test]
	fn derives_variadics_and_context() {
		fn max(_: f64, _: Rest<f64>) -> f64 {
			0.0
		}

		fn defined(_: &Context, _: String) -> bool {
			false
		}

		fn everything(_: &Context, _: Rest<Value>) -> Value {
			Value::Null
		}

		assert_eq!(signature_of(max).params, [Slot::Value(Kind::Number), Slot::Variadic(Kind::Number)]);
		assert_eq!(signature_of(defined).params, [Slot::Context, Slot::Value(Kind::String)]);
		assert_eq!(signature_of(everything).params, [Slot::Context, Slot::Variadic(Kind::Any)]);
	}

	#[test]
	fn derives_returns() {
		assert_eq!(signature_of(|| 1.0).returns, [Slot::Value(Kind::Number)]);
		assert_eq!(
			signature_of(|| -> Result<String, std::fmt::Error> { Ok(String::new()) }).returns,
			[Slot::Value(Kind::String), Slot::Error]
		);
	}

	#[test]
	fn raw_functions_unpack_arguments() {
		let raw = HostFn::into_raw(|a: String, b: Rest<f64>| format!("{a}{}", b.0.len()));

		assert_eq!(
			raw(&Context::new(), vec!["x".into(), 1.0.into(), 2.0.into()]),
			Ok(Value::from("x2"))
		);
		assert!(raw(&Context::new(), vec![]).is_err());
	}

	#[test]
	fn nullary_functions() {
		let plain = HostFn::into_raw(|| 1.0);
		let with_context = HostFn::into_raw(|context: &Context| context.len() as f64);

		assert_eq!(plain(&Context::new(), vec![]), Ok(Value::Number(1.0)));
		assert_eq!(with_context(&Context::new(), vec![]), Ok(Value::Number(0.0)));
	}
}
