use super::Token;
use crate::{ErrorKind, Result};
use log::{debug, trace};
use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

/// The token kinds of the expression language, in matching order.
pub const KINDS: [&str; 30] = [
	"**", "+", "-", "*", "/", "[", "]", ".", "(", ")", "{", "}", ":", ",", ">=", "<=", "<", ">", "==",
	"!=", "!", "&&", "||", "true", "false", "in", "null", "number", "identifier", "string",
];

/// Kinds that aren't matched literally.
pub const PATTERNS: [(&str, &str); 7] = [
	("number", r"[0-9]+(?:\.[0-9]+)?"),
	("identifier", r"[a-zA-Z_][a-zA-Z_0-9]*"),
	("string", r#"'[^']*'|"[^"]*""#),
	("true", r"true\b"),
	("false", r"false\b"),
	("in", r"in\b"),
	("null", r"null\b"),
];

/// The tokenizer for the expression language. It's immutable, so it's built once and shared.
pub static LANGUAGE: Lazy<Tokenizer> = Lazy::new(|| {
	Tokenizer::new(Some(r"[ \t\n\f\r]+"), &KINDS, &PATTERNS).expect("the builtin language definition is valid")
});

/// Problems with a language definition given to [`Tokenizer::new`].
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum TokenizerError {
	/// A pattern was supplied for a kind that isn't in the kind list.
	#[error("kind {0:?} listed in patterns, but not in kinds")]
	UnknownKind(&'static str),

	/// A pattern contained a capturing group, which would break kind detection.
	#[error("pattern {0:?} must not contain capturing groups")]
	CapturingGroup(String),

	/// A pattern wasn't a valid regex.
	#[error("invalid pattern: {0}")]
	Regex(#[from] regex::Error),
}

/// Splits source text into [`Token`]s, as described by a language definition.
///
/// Every alternative is compiled into one regex, `^(?:(ignore)|(kind0)|(kind1)|...)`; the group
/// that participated in the match tells which kind was found. Earlier kinds win ties, so longer
/// operators must be listed before their prefixes.
#[derive(Debug, Clone)]
pub struct Tokenizer {
	kinds: Vec<&'static str>,
	has_ignore: bool,
	regex: Regex,
}

fn non_capturing(pattern: &str) -> std::result::Result<(), TokenizerError> {
	// `captures_len` counts the implicit whole-match group.
	if Regex::new(pattern)?.captures_len() != 1 {
		return Err(TokenizerError::CapturingGroup(pattern.to_owned()));
	}

	Ok(())
}

impl Tokenizer {
	/// Creates a new [`Tokenizer`].
	///
	/// `kinds` is the ordered list of token kinds; a kind without an entry in `patterns` is
	/// matched literally. Text matching `ignore` is skipped between tokens.
	pub fn new(
		ignore: Option<&str>,
		kinds: &[&'static str],
		patterns: &[(&'static str, &str)],
	) -> std::result::Result<Self, TokenizerError> {
		let mut options = Vec::with_capacity(kinds.len() + 1);

		if let Some(ignore) = ignore {
			non_capturing(ignore)?;
			options.push(format!("({ignore})"));
		}

		for &(kind, pattern) in patterns {
			if !kinds.contains(&kind) {
				return Err(TokenizerError::UnknownKind(kind));
			}
			non_capturing(pattern)?;
		}

		for kind in kinds {
			match patterns.iter().find(|(name, _)| name == kind) {
				Some((_, pattern)) => options.push(format!("({pattern})")),
				None => options.push(format!("({})", regex::escape(kind))),
			}
		}

		let regex = Regex::new(&format!("^(?:{})", options.join("|")))?;
		debug!("built tokenizer with {} kinds", kinds.len());

		Ok(Self { kinds: kinds.to_vec(), has_ignore: ignore.is_some(), regex })
	}

	/// The kinds this tokenizer produces, in matching order.
	#[must_use]
	pub fn kinds(&self) -> &[&'static str] {
		&self.kinds
	}

	/// Returns the next token of `source` at or after `offset`, or `None` at the end of input.
	pub fn next<'src>(&self, source: &'src str, mut offset: usize) -> Result<Option<Token<'src>>> {
		loop {
			let Some(rest) = source.get(offset..) else {
				let start = offset.min(source.len());
				return Err(ErrorKind::InvalidOffset(offset).error(source, start, source.len()));
			};

			if rest.is_empty() {
				return Ok(None);
			}

			let found = self.regex.captures(rest).and_then(|captures| {
				captures
					.iter()
					.skip(1)
					.enumerate()
					.find_map(|(index, group)| group.map(|group| (index, group.as_str())))
			});

			// An empty match would never advance, so it counts as no match at all.
			let Some((mut index, text)) = found.filter(|(_, text)| !text.is_empty()) else {
				return Err(ErrorKind::UnknownToken.error(source, offset, source.len()));
			};

			offset += text.len();

			if self.has_ignore {
				if index == 0 {
					continue;
				}
				index -= 1;
			}

			let Some(&kind) = self.kinds.get(index) else {
				return Err(ErrorKind::UnknownToken.error(source, offset - text.len(), source.len()));
			};

			let token = Token { kind, value: text, start: offset - text.len(), end: offset };
			trace!("token {:?} at {}..{}", token.kind, token.start, token.end);
			return Ok(Some(token));
		}
	}

	/// Tokenizes all of `source` starting at `offset`.
	pub fn tokenize<'src>(&self, source: &'src str, mut offset: usize) -> Result<Vec<Token<'src>>> {
		let mut tokens = Vec::new();

		while let Some(token) = self.next(source, offset)? {
			offset = token.end;
			tokens.push(token);
		}

		Ok(tokens)
	}
}
