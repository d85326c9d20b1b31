use crate::error::{RebatchError, Result};
use crate::rules::matcher::{Matcher, NumberAnchor, digit_run};
use crate::rules::shorthand::Template;

/// Widest zero padding accepted; no file name can be longer.
pub const MAX_ZERO_PAD: usize = 255;

/// How many replacements to perform within one name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Limit {
	AtMost(usize),
	Unlimited,
}

impl Limit {
	/// Interpret a user count: negative means unlimited.
	pub fn from_count(count: i64) -> Self {
		usize::try_from(count).map_or(Limit::Unlimited, Limit::AtMost)
	}

	fn max_replacements(self) -> usize {
		match self {
			Limit::AtMost(n) => n,
			Limit::Unlimited => usize::MAX,
		}
	}
}

impl Default for Limit {
	fn default() -> Self {
		Limit::AtMost(1)
	}
}

/// Signed adjustment applied by the numeric replacer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NumberOp {
	pub delta: i64,
	pub anchor: NumberAnchor,
	pub width: usize,
}

impl NumberOp {
	/// Parse an operand such as `+4`, `-2` or `10`.
	pub fn parse(operand: &str, anchor: NumberAnchor, width: usize) -> Result<Self> {
		if width > MAX_ZERO_PAD {
			return Err(RebatchError::InvalidConfigValue {
				key: "zero-pad".to_string(),
				reason: format!("must be at most {MAX_ZERO_PAD}, got {width}"),
			});
		}

		let trimmed = operand.trim();
		let (negative, digits) = match trimmed.strip_prefix('-') {
			Some(rest) => (true, rest.trim_start()),
			None => (false, trimmed.strip_prefix('+').unwrap_or(trimmed).trim_start()),
		};

		// Parse with the sign reattached so i64::MIN stays representable.
		let signed = if negative {
			format!("-{digits}")
		} else {
			digits.to_string()
		};
		let delta = signed
			.parse::<i64>()
			.map_err(|source| RebatchError::InvalidNumberOperand {
				operand: operand.to_string(),
				source,
			})?;

		Ok(NumberOp {
			delta,
			anchor,
			width,
		})
	}

	fn apply(&self, name: &str) -> Result<String> {
		let range = digit_run(name, self.anchor).ok_or_else(|| RebatchError::NoDigitRun {
			name: name.to_string(),
		})?;
		let overflow = || RebatchError::NumberOverflow {
			name: name.to_string(),
			delta: self.delta,
		};

		let current: i64 = name[range.clone()].parse().map_err(|_| overflow())?;
		let next = current.checked_add(self.delta).ok_or_else(overflow)?;
		let sign = if next < 0 { "-" } else { "" };
		let digits = next.unsigned_abs().to_string();
		let padding = self.width.saturating_sub(sign.len() + digits.len());

		Ok(format!(
			"{}{sign}{}{digits}{}",
			&name[..range.start],
			"0".repeat(padding),
			&name[range.end..]
		))
	}
}

/// Computes the new name for a matched file.
#[derive(Debug, Clone)]
pub enum Replacer {
	/// Replace matched text with a fixed string.
	Literal { with: String, limit: Limit },

	/// Replace pattern matches with a rendered capture template.
	Template { template: Template, limit: Limit },

	/// Adjust the digit run by a signed delta.
	Number(NumberOp),
}

impl Replacer {
	/// Compute the replacement for `name`, which `matcher` has already selected.
	pub fn replace(&self, name: &str, matcher: &Matcher) -> Result<String> {
		match (self, matcher) {
			(Replacer::Number(op), _) => op.apply(name),
			(Replacer::Literal { with, limit }, Matcher::Literal(text)) => Ok(match limit {
				Limit::Unlimited => name.replace(text.as_str(), with),
				Limit::AtMost(n) => name.replacen(text.as_str(), with, *n),
			}),
			(Replacer::Literal { with, limit }, Matcher::Pattern(regex)) => {
				let mut out = String::with_capacity(name.len());
				let mut last = 0;
				for m in regex.find_iter(name).take(limit.max_replacements()) {
					out.push_str(&name[last..m.start()]);
					out.push_str(with);
					last = m.end();
				}
				out.push_str(&name[last..]);
				Ok(out)
			}
			(Replacer::Template { template, limit }, Matcher::Pattern(regex)) => {
				let mut out = String::with_capacity(name.len());
				let mut last = 0;
				for caps in regex.captures_iter(name).take(limit.max_replacements()) {
					let Some(whole) = caps.get(0) else { continue };
					out.push_str(&name[last..whole.start()]);
					template.render_into(&caps, &mut out);
					last = whole.end();
				}
				out.push_str(&name[last..]);
				Ok(out)
			}
			(replacer, matcher) => Err(RebatchError::MutuallyExclusive {
				option1: replacer.describe(),
				option2: matcher.describe(),
			}),
		}
	}

	/// Short human-readable description for diagnostics.
	pub fn describe(&self) -> String {
		match self {
			Replacer::Literal { with, .. } => format!("string {with:?}"),
			Replacer::Template { template, .. } => format!("template {:?}", template.as_str()),
			Replacer::Number(op) => format!("number {:+}", op.delta),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn literal(with: &str, limit: Limit) -> Replacer {
		Replacer::Literal {
			with: with.to_string(),
			limit,
		}
	}

	fn template(t: &str, limit: Limit) -> Replacer {
		Replacer::Template {
			template: Template::parse(t).unwrap(),
			limit,
		}
	}

	#[test]
	fn test_limit_from_count() {
		assert_eq!(Limit::from_count(1), Limit::AtMost(1));
		assert_eq!(Limit::from_count(0), Limit::AtMost(0));
		assert_eq!(Limit::from_count(-1), Limit::Unlimited);
		assert_eq!(Limit::default(), Limit::AtMost(1));
	}

	#[test]
	fn test_literal_replace_once() {
		let m = Matcher::literal_text("photo").unwrap();
		let r = literal("img", Limit::AtMost(1));
		assert_eq!(r.replace("photo1.jpg", &m).unwrap(), "img1.jpg");
	}

	#[test]
	fn test_literal_replace_respects_limit() {
		let m = Matcher::literal_text("a").unwrap();
		assert_eq!(
			literal("b", Limit::AtMost(2)).replace("aaaa", &m).unwrap(),
			"bbaa"
		);
		assert_eq!(
			literal("b", Limit::Unlimited).replace("aaaa", &m).unwrap(),
			"bbbb"
		);
	}

	#[test]
	fn test_literal_replace_with_pattern_keeps_other_text() {
		let m = Matcher::pattern("%d+").unwrap();
		let r = literal("N", Limit::AtMost(1));
		assert_eq!(r.replace("ep12_part3.txt", &m).unwrap(), "epN_part3.txt");

		let r = literal("N", Limit::Unlimited);
		assert_eq!(r.replace("ep12_part3.txt", &m).unwrap(), "epN_partN.txt");
	}

	#[test]
	fn test_template_replace_two_groups() {
		let m = Matcher::pattern("(%d+)_(%d+)").unwrap();
		let r = template("%1-%2", Limit::AtMost(1));
		assert_eq!(r.replace("2024_03", &m).unwrap(), "2024-03");
		assert_eq!(
			r.replace("report 2024_03.pdf", &m).unwrap(),
			"report 2024-03.pdf"
		);
	}

	#[test]
	fn test_template_replace_swaps_groups_repeatedly() {
		let m = Matcher::pattern("(%w)(%d)").unwrap();
		let r = template("%2%1", Limit::Unlimited);
		assert_eq!(r.replace("a1b2.txt", &m).unwrap(), "1a2b.txt");

		let r = template("%2%1", Limit::AtMost(1));
		assert_eq!(r.replace("a1b2.txt", &m).unwrap(), "1ab2.txt");
	}

	#[test]
	fn test_template_whole_match_group() {
		let m = Matcher::pattern("draft").unwrap();
		let r = template("[%0]", Limit::AtMost(1));
		assert_eq!(r.replace("draft.md", &m).unwrap(), "[draft].md");
	}

	#[test]
	fn test_template_requires_pattern_matcher() {
		let m = Matcher::literal_text("x").unwrap();
		let r = template("%1", Limit::AtMost(1));
		assert!(matches!(
			r.replace("x.txt", &m),
			Err(RebatchError::MutuallyExclusive { .. })
		));
	}

	#[test]
	fn test_number_op_parse() {
		assert_eq!(NumberOp::parse("+4", NumberAnchor::End, 0).unwrap().delta, 4);
		assert_eq!(NumberOp::parse("-4", NumberAnchor::End, 0).unwrap().delta, -4);
		assert_eq!(NumberOp::parse("- 4", NumberAnchor::End, 0).unwrap().delta, -4);
		assert_eq!(NumberOp::parse("12", NumberAnchor::End, 0).unwrap().delta, 12);
	}

	#[test]
	fn test_number_op_parse_rejects_garbage() {
		for bad in ["", "+", "x1", "1.5", "--1"] {
			assert!(
				matches!(
					NumberOp::parse(bad, NumberAnchor::Start, 0),
					Err(RebatchError::InvalidNumberOperand { .. })
				),
				"operand {bad:?} should be rejected"
			);
		}
	}

	#[test]
	fn test_number_replace_end_with_padding() {
		let op = NumberOp::parse("+1", NumberAnchor::End, 3).unwrap();
		let r = Replacer::Number(op);
		let m = Matcher::number(NumberAnchor::End);
		assert_eq!(r.replace("frame007.png", &m).unwrap(), "frame008.png");
	}

	#[test]
	fn test_number_replace_end_without_padding() {
		let op = NumberOp::parse("+1", NumberAnchor::End, 0).unwrap();
		let m = Matcher::number(NumberAnchor::End);
		assert_eq!(
			Replacer::Number(op).replace("frame007.png", &m).unwrap(),
			"frame8.png"
		);
	}

	#[test]
	fn test_number_replace_start() {
		let op = NumberOp::parse("-1", NumberAnchor::Start, 2).unwrap();
		let m = Matcher::number(NumberAnchor::Start);
		assert_eq!(
			Replacer::Number(op).replace("10 intro 10.mp3", &m).unwrap(),
			"09 intro 10.mp3"
		);
	}

	#[test]
	fn test_number_replace_negative_result_keeps_sign_first() {
		let op = NumberOp::parse("-5", NumberAnchor::Start, 3).unwrap();
		let m = Matcher::number(NumberAnchor::Start);
		assert_eq!(Replacer::Number(op).replace("2.txt", &m).unwrap(), "-03.txt");
	}

	#[test]
	fn test_number_replace_without_digits_fails() {
		let op = NumberOp::parse("+1", NumberAnchor::End, 0).unwrap();
		let m = Matcher::number(NumberAnchor::End);
		assert!(matches!(
			Replacer::Number(op).replace("frame.png", &m),
			Err(RebatchError::NoDigitRun { .. })
		));
	}

	#[test]
	fn test_number_op_parse_rejects_huge_width() {
		assert!(NumberOp::parse("+1", NumberAnchor::End, MAX_ZERO_PAD).is_ok());
		match NumberOp::parse("+1", NumberAnchor::End, 70_000).unwrap_err() {
			RebatchError::InvalidConfigValue { key, .. } => assert_eq!(key, "zero-pad"),
			other => panic!("Expected InvalidConfigValue, got {other:?}"),
		}
	}

	#[test]
	fn test_number_replace_wide_padding_does_not_panic() {
		let op = NumberOp {
			delta: 1,
			anchor: NumberAnchor::End,
			width: 70_000,
		};
		let m = Matcher::number(NumberAnchor::End);
		let renamed = Replacer::Number(op).replace("frame7.png", &m).unwrap();
		assert_eq!(renamed.len(), "frame".len() + 70_000 + ".png".len());
		assert!(renamed.ends_with("0008.png"));
	}

	#[test]
	fn test_number_replace_overflow() {
		let op = NumberOp::parse("+1", NumberAnchor::Start, 0).unwrap();
		let m = Matcher::number(NumberAnchor::Start);
		let name = format!("{}.txt", i64::MAX);
		assert!(matches!(
			Replacer::Number(op).replace(&name, &m),
			Err(RebatchError::NumberOverflow { .. })
		));
	}
}
