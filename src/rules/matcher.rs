use crate::error::{RebatchError, Result};
use crate::rules::shorthand::compile_pattern;
use regex::Regex;

/// Which end of the name a numeric selector looks at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumberAnchor {
	/// Digit run at the very start of the name.
	Start,

	/// Digit run at the end of the name, before the extension.
	End,
}

/// Decides whether a file name is selected for renaming.
#[derive(Debug, Clone)]
pub enum Matcher {
	/// Name ends with the suffix.
	Extension(String),

	/// Name contains the substring.
	Literal(String),

	/// Name contains a match of the compiled shorthand pattern.
	Pattern(Regex),

	/// Name has a digit run at the given anchor.
	Number(NumberAnchor),
}

impl Matcher {
	pub fn extension(suffix: &str) -> Self {
		Matcher::Extension(suffix.to_string())
	}

	/// Build a literal-substring matcher. The substring must not be empty.
	pub fn literal_text(text: &str) -> Result<Self> {
		if text.is_empty() {
			return Err(RebatchError::EmptySelector);
		}
		Ok(Matcher::Literal(text.to_string()))
	}

	/// Build a pattern matcher from `%`-shorthand.
	pub fn pattern(shorthand: &str) -> Result<Self> {
		if shorthand.is_empty() {
			return Err(RebatchError::EmptySelector);
		}
		compile_pattern(shorthand).map(Matcher::Pattern)
	}

	pub fn number(anchor: NumberAnchor) -> Self {
		Matcher::Number(anchor)
	}

	/// Check whether `name` qualifies.
	pub fn matches(&self, name: &str) -> bool {
		match self {
			Matcher::Extension(suffix) => name.ends_with(suffix.as_str()),
			Matcher::Literal(text) => name.contains(text.as_str()),
			Matcher::Pattern(regex) => regex.is_match(name),
			Matcher::Number(anchor) => digit_run(name, *anchor).is_some(),
		}
	}

	/// The compiled pattern, for pattern matchers.
	pub fn regex(&self) -> Option<&Regex> {
		match self {
			Matcher::Pattern(regex) => Some(regex),
			_ => None,
		}
	}

	/// The literal text, for literal matchers.
	pub fn literal(&self) -> Option<&str> {
		match self {
			Matcher::Literal(text) => Some(text),
			_ => None,
		}
	}

	/// Short human-readable description for diagnostics.
	pub fn describe(&self) -> String {
		match self {
			Matcher::Extension(suffix) => format!("extension {suffix:?}"),
			Matcher::Literal(text) => format!("string {text:?}"),
			Matcher::Pattern(regex) => format!("regex /{}/", regex.as_str()),
			Matcher::Number(NumberAnchor::Start) => "number at start".to_string(),
			Matcher::Number(NumberAnchor::End) => "number at end".to_string(),
		}
	}
}

/// Split a name into stem and extension (extension includes the dot).
///
/// A leading dot does not start an extension, so `.bashrc` has none.
pub fn split_extension(name: &str) -> (&str, &str) {
	match name.rfind('.') {
		Some(i) if i > 0 => name.split_at(i),
		_ => (name, ""),
	}
}

/// Byte range of the ASCII digit run at `anchor`, if present.
pub fn digit_run(name: &str, anchor: NumberAnchor) -> Option<std::ops::Range<usize>> {
	match anchor {
		NumberAnchor::Start => {
			let len = name.bytes().take_while(u8::is_ascii_digit).count();
			(len > 0).then_some(0..len)
		}
		NumberAnchor::End => {
			let (stem, _) = split_extension(name);
			let len = stem.bytes().rev().take_while(u8::is_ascii_digit).count();
			(len > 0).then(|| stem.len() - len..stem.len())
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_extension_matcher() {
		let m = Matcher::extension(".jpg");
		assert!(m.matches("photo.jpg"));
		assert!(!m.matches("photo.jpeg"));
		assert!(!m.matches("jpg"));
	}

	#[test]
	fn test_literal_matcher() {
		let m = Matcher::literal_text("photo").unwrap();
		assert!(m.matches("photo1.jpg"));
		assert!(m.matches("my_photo.jpg"));
		assert!(!m.matches("image.jpg"));
		assert_eq!(m.literal(), Some("photo"));
		assert!(m.regex().is_none());
	}

	#[test]
	fn test_literal_matcher_rejects_empty() {
		assert!(matches!(
			Matcher::literal_text(""),
			Err(RebatchError::EmptySelector)
		));
	}

	#[test]
	fn test_pattern_matcher() {
		let m = Matcher::pattern("%d+.txt").unwrap();
		assert!(m.matches("42.txt"));
		assert!(!m.matches("abc.txt"));
		assert!(m.regex().is_some());
		assert!(m.literal().is_none());
	}

	#[test]
	fn test_pattern_matcher_propagates_shorthand_error() {
		assert!(matches!(
			Matcher::pattern("%x"),
			Err(RebatchError::InvalidShorthand { .. })
		));
	}

	#[test]
	fn test_number_start_matcher() {
		let m = Matcher::number(NumberAnchor::Start);
		assert!(m.matches("01 intro.mp3"));
		assert!(!m.matches("intro 01.mp3"));
	}

	#[test]
	fn test_number_end_matcher_ignores_extension() {
		let m = Matcher::number(NumberAnchor::End);
		assert!(m.matches("frame007.png"));
		assert!(m.matches("frame007"));
		assert!(!m.matches("007frame.png"));
		assert!(!m.matches("frame.mp3"));
	}

	#[test]
	fn test_split_extension() {
		assert_eq!(split_extension("a.tar.gz"), ("a.tar", ".gz"));
		assert_eq!(split_extension("readme"), ("readme", ""));
		assert_eq!(split_extension(".bashrc"), (".bashrc", ""));
	}

	#[test]
	fn test_digit_run_ranges() {
		assert_eq!(digit_run("123abc", NumberAnchor::Start), Some(0..3));
		assert_eq!(digit_run("abc45.txt", NumberAnchor::End), Some(3..5));
		assert_eq!(digit_run("abc.txt", NumberAnchor::End), None);
		// Digits in the extension are not part of the stem.
		assert_eq!(digit_run("track.mp3", NumberAnchor::End), None);
	}
}
