//! Types relating to [`Value`]s.

mod json;
mod value;

pub use json::ConversionError;
pub use value::Value;

/// An ordered sequence of [`Value`]s.
pub type Array = Vec<Value>;

/// A string-keyed mapping of [`Value`]s.
pub type Object = std::collections::BTreeMap<String, Value>;
