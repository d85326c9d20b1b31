use crate::error::{RebatchError, Result};
use crate::rules::matcher::{Matcher, NumberAnchor};
use crate::rules::replacer::{Limit, NumberOp, Replacer};
use crate::rules::shorthand::Template;

/// The user's choice of what to select.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selector {
	/// `--from`: literal substring.
	Literal(String),

	/// `--from-regex`: `%`-shorthand pattern.
	Pattern(String),

	/// `--number-start` / `--number-end`: digit run plus an operand.
	Number { anchor: NumberAnchor, operand: String },
}

/// The user's choice of what to replace with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Replacement {
	/// `--to`
	Literal(String),

	/// `--to-regex`
	Template(String),
}

/// Tuning shared by the replacers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReplaceOptions {
	pub limit: Limit,
	pub zero_pad: usize,
}

/// Exactly one matcher paired with a compatible replacer.
#[derive(Debug, Clone)]
pub struct RuleSet {
	matcher: Matcher,
	replacer: Replacer,
}

impl RuleSet {
	/// Build the matcher/replacer pair, rejecting incompatible combinations.
	///
	/// Without a replacement the matched text is removed. A template paired
	/// with a literal selector has no groups to draw from and is applied as a
	/// plain string.
	pub fn new(
		selector: Selector,
		replacement: Option<Replacement>,
		options: ReplaceOptions,
	) -> Result<Self> {
		let (matcher, replacer) = match (selector, replacement) {
			(Selector::Number { anchor, .. }, Some(replacement)) => {
				return Err(RebatchError::MutuallyExclusive {
					option1: number_flag(anchor).to_string(),
					option2: replacement.flag().to_string(),
				});
			}
			(Selector::Number { anchor, operand }, None) => (
				Matcher::number(anchor),
				Replacer::Number(NumberOp::parse(&operand, anchor, options.zero_pad)?),
			),
			(Selector::Literal(text), replacement) => {
				let with = match replacement {
					Some(Replacement::Literal(s) | Replacement::Template(s)) => s,
					None => String::new(),
				};
				(
					Matcher::literal_text(&text)?,
					Replacer::Literal {
						with,
						limit: options.limit,
					},
				)
			}
			(Selector::Pattern(pattern), Some(Replacement::Template(t))) => {
				let matcher = Matcher::pattern(&pattern)?;
				let template = Template::parse(&t)?;
				check_groups(&matcher, &template)?;
				(
					matcher,
					Replacer::Template {
						template,
						limit: options.limit,
					},
				)
			}
			(Selector::Pattern(pattern), replacement) => {
				let with = match replacement {
					Some(Replacement::Literal(s)) => s,
					_ => String::new(),
				};
				(
					Matcher::pattern(&pattern)?,
					Replacer::Literal {
						with,
						limit: options.limit,
					},
				)
			}
		};

		Ok(RuleSet { matcher, replacer })
	}

	pub fn matcher(&self) -> &Matcher {
		&self.matcher
	}

	pub fn replacer(&self) -> &Replacer {
		&self.replacer
	}

	/// Compute the new name if `name` is selected.
	pub fn apply(&self, name: &str) -> Result<Option<String>> {
		if !self.matcher.matches(name) {
			return Ok(None);
		}
		self.replacer.replace(name, &self.matcher).map(Some)
	}
}

impl Replacement {
	fn flag(&self) -> &'static str {
		match self {
			Replacement::Literal(_) => "--to",
			Replacement::Template(_) => "--to-regex",
		}
	}
}

fn number_flag(anchor: NumberAnchor) -> &'static str {
	match anchor {
		NumberAnchor::Start => "--number-start",
		NumberAnchor::End => "--number-end",
	}
}

fn check_groups(matcher: &Matcher, template: &Template) -> Result<()> {
	let (Some(regex), Some(group)) = (matcher.regex(), template.max_group()) else {
		return Ok(());
	};
	// captures_len counts the implicit whole-match group.
	let available = regex.captures_len() - 1;
	if group > available {
		return Err(RebatchError::TemplateGroupOutOfRange {
			template: template.as_str().to_string(),
			group,
			available,
		});
	}
	Ok(())
}

#[cfg(test)]
mod tests {
	use super::*;

	fn opts() -> ReplaceOptions {
		ReplaceOptions::default()
	}

	#[test]
	fn test_literal_rule() {
		let rules = RuleSet::new(
			Selector::Literal("photo".to_string()),
			Some(Replacement::Literal("img".to_string())),
			opts(),
		)
		.unwrap();
		assert_eq!(rules.apply("photo1.jpg").unwrap(), Some("img1.jpg".to_string()));
		assert_eq!(rules.apply("other.jpg").unwrap(), None);
	}

	#[test]
	fn test_missing_replacement_removes_match() {
		let rules = RuleSet::new(Selector::Literal("_copy".to_string()), None, opts()).unwrap();
		assert_eq!(rules.apply("a_copy.txt").unwrap(), Some("a.txt".to_string()));
	}

	#[test]
	fn test_template_with_literal_selector_is_plain_string() {
		let rules = RuleSet::new(
			Selector::Literal("old".to_string()),
			Some(Replacement::Template("new".to_string())),
			opts(),
		)
		.unwrap();
		assert!(matches!(rules.replacer(), Replacer::Literal { .. }));
		assert_eq!(rules.apply("old.txt").unwrap(), Some("new.txt".to_string()));
	}

	#[test]
	fn test_pattern_to_template_rule() {
		let rules = RuleSet::new(
			Selector::Pattern("(%d+)_(%d+)".to_string()),
			Some(Replacement::Template("%1-%2".to_string())),
			opts(),
		)
		.unwrap();
		assert_eq!(rules.apply("2024_03").unwrap(), Some("2024-03".to_string()));
	}

	#[test]
	fn test_pattern_to_literal_rule() {
		let rules = RuleSet::new(
			Selector::Pattern(" +".to_string()),
			Some(Replacement::Literal("_".to_string())),
			ReplaceOptions {
				limit: Limit::Unlimited,
				zero_pad: 0,
			},
		)
		.unwrap();
		assert_eq!(
			rules.apply("my  holiday pic.jpg").unwrap(),
			Some("my_holiday_pic.jpg".to_string())
		);
	}

	#[test]
	fn test_template_group_out_of_range() {
		let result = RuleSet::new(
			Selector::Pattern("(%d+)".to_string()),
			Some(Replacement::Template("%1-%2".to_string())),
			opts(),
		);
		match result.unwrap_err() {
			RebatchError::TemplateGroupOutOfRange {
				group, available, ..
			} => {
				assert_eq!(group, 2);
				assert_eq!(available, 1);
			}
			other => panic!("Expected TemplateGroupOutOfRange, got {other:?}"),
		}
	}

	#[test]
	fn test_number_selector_rejects_replacement() {
		let result = RuleSet::new(
			Selector::Number {
				anchor: NumberAnchor::End,
				operand: "+1".to_string(),
			},
			Some(Replacement::Literal("x".to_string())),
			opts(),
		);
		match result.unwrap_err() {
			RebatchError::MutuallyExclusive { option1, option2 } => {
				assert_eq!(option1, "--number-end");
				assert_eq!(option2, "--to");
			}
			other => panic!("Expected MutuallyExclusive, got {other:?}"),
		}
	}

	#[test]
	fn test_number_rule_uses_zero_pad() {
		let rules = RuleSet::new(
			Selector::Number {
				anchor: NumberAnchor::End,
				operand: "+1".to_string(),
			},
			None,
			ReplaceOptions {
				limit: Limit::default(),
				zero_pad: 3,
			},
		)
		.unwrap();
		assert_eq!(
			rules.apply("frame007.png").unwrap(),
			Some("frame008.png".to_string())
		);
		assert_eq!(rules.apply("frame.png").unwrap(), None);
	}

	#[test]
	fn test_number_rule_bad_operand() {
		let result = RuleSet::new(
			Selector::Number {
				anchor: NumberAnchor::Start,
				operand: "two".to_string(),
			},
			None,
			opts(),
		);
		assert!(matches!(
			result,
			Err(RebatchError::InvalidNumberOperand { .. })
		));
	}
}
