use crate::error::{RebatchError, Result};
use regex::{Captures, Regex};

/// Expand the `%` shorthand into regex syntax and compile it.
///
/// `%s %S %w %W %d %D` become the matching backslash classes, `%%` is a
/// literal percent sign, and a lone trailing `%` is kept as-is.
pub fn compile_pattern(pattern: &str) -> Result<Regex> {
	let mut expanded = String::with_capacity(pattern.len());
	let mut chars = pattern.chars();

	while let Some(c) = chars.next() {
		if c != '%' {
			expanded.push(c);
			continue;
		}

		match chars.next() {
			None => expanded.push('%'),
			Some('%') => expanded.push('%'),
			Some(class @ ('d' | 'D' | 's' | 'S' | 'w' | 'W')) => {
				expanded.push('\\');
				expanded.push(class);
			}
			Some(other) => {
				return Err(RebatchError::InvalidShorthand {
					pattern: pattern.to_string(),
					sequence: format!("%{other}"),
				});
			}
		}
	}

	Regex::new(&expanded).map_err(|source| RebatchError::InvalidRegex {
		pattern: expanded,
		source,
	})
}

/// One piece of a parsed replacement template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
	/// Text copied verbatim.
	Text(String),

	/// Capture group reference (`%0` is the whole match).
	Group(usize),
}

/// A `%N` replacement template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
	source: String,
	segments: Vec<Segment>,
}

impl Template {
	/// Parse a template such as `%2-%1` or `100%% %1`.
	pub fn parse(template: &str) -> Result<Self> {
		let mut segments = Vec::new();
		let mut text = String::new();
		let mut chars = template.chars().peekable();

		while let Some(c) = chars.next() {
			if c != '%' {
				text.push(c);
				continue;
			}

			match chars.peek().copied() {
				Some('%') => {
					chars.next();
					text.push('%');
				}
				Some(d) if d.is_ascii_digit() => {
					let mut group = 0usize;
					while let Some(d) = chars.peek().and_then(|c| c.to_digit(10)) {
						chars.next();
						group = group
							.checked_mul(10)
							.and_then(|g| g.checked_add(d as usize))
							.ok_or_else(|| RebatchError::InvalidTemplate {
								template: template.to_string(),
								sequence: "group index".to_string(),
							})?;
					}
					if !text.is_empty() {
						segments.push(Segment::Text(std::mem::take(&mut text)));
					}
					segments.push(Segment::Group(group));
				}
				Some(other) => {
					return Err(RebatchError::InvalidTemplate {
						template: template.to_string(),
						sequence: format!("%{other}"),
					});
				}
				None => {
					return Err(RebatchError::InvalidTemplate {
						template: template.to_string(),
						sequence: "%".to_string(),
					});
				}
			}
		}

		if !text.is_empty() {
			segments.push(Segment::Text(text));
		}

		Ok(Template {
			source: template.to_string(),
			segments,
		})
	}

	/// The template text as written by the user.
	pub fn as_str(&self) -> &str {
		&self.source
	}

	pub fn segments(&self) -> &[Segment] {
		&self.segments
	}

	/// Highest group index referenced, if any.
	pub fn max_group(&self) -> Option<usize> {
		self.segments
			.iter()
			.filter_map(|s| match s {
				Segment::Group(g) => Some(*g),
				Segment::Text(_) => None,
			})
			.max()
	}

	/// Render the template for one match, appending to `out`.
	pub fn render_into(&self, caps: &Captures<'_>, out: &mut String) {
		for segment in &self.segments {
			match segment {
				Segment::Text(text) => out.push_str(text),
				Segment::Group(g) => {
					if let Some(m) = caps.get(*g) {
						out.push_str(m.as_str());
					}
				}
			}
		}
	}
}
