use thiserror::Error;

/// Indicates that a context name was illegal.
///
/// Names follow the same rules as the `identifier` token: `[a-zA-Z_][a-zA-Z0-9_]*`. Anything else
/// could never be looked up from an expression.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum IllegalVariableName {
	/// The name was empty.
	#[error("empty variable name supplied")]
	Empty,

	/// The name had an illegal character at the beginning.
	#[error("variable name {name:?} cannot start with {chr:?}")]
	IllegalStartingChar { name: String, chr: char },

	/// The name had an illegal character in the middle.
	#[error("variable name {name:?} cannot include {chr:?}")]
	IllegalBodyChar { name: String, chr: char },
}

/// Check to see if `name` is a valid context name.
pub fn validate_name(name: &str) -> Result<(), IllegalVariableName> {
	let first = name.chars().next().ok_or(IllegalVariableName::Empty)?;

	if !(first.is_ascii_alphabetic() || first == '_') {
		return Err(IllegalVariableName::IllegalStartingChar { name: name.to_owned(), chr: first });
	}

	if let Some(chr) = name.chars().find(|&c| !c.is_ascii_alphanumeric() && c != '_') {
		return Err(IllegalVariableName::IllegalBodyChar { name: name.to_owned(), chr });
	}

	Ok(())
}

#[cfg(test)]
mod tests {
	use super::*;
	use assert_matches::assert_matches;

	#[test]
	fn valid_names() {
		for name in ["a", "_", "snake_case", "CamelCase2", "_0"] {
			assert_eq!(validate_name(name), Ok(()), "{name}");
		}
	}

	#[test]
	fn invalid_names() {
		assert_eq!(validate_name(""), Err(IllegalVariableName::Empty));
		assert_matches!(validate_name("1a"), Err(IllegalVariableName::IllegalStartingChar { chr: '1', .. }));
		assert_matches!(validate_name("a-b"), Err(IllegalVariableName::IllegalBodyChar { chr: '-', .. }));
		assert_matches!(validate_name("café"), Err(IllegalVariableName::IllegalBodyChar { chr: 'é', .. }));
	}
}
