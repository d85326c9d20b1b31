//! Rule matching and name replacement for rebatch.
//!
//! This module handles:
//! - Selecting file names (extension, literal, `%`-shorthand pattern, digit run)
//! - Computing replacement names (literal, capture template, numeric delta)
//! - Pairing exactly one selector with one compatible replacement

pub mod matcher;
pub mod replacer;
pub mod set;
pub mod shorthand;

pub use matcher::{Matcher, NumberAnchor, split_extension};
pub use replacer::{Limit, MAX_ZERO_PAD, NumberOp, Replacer};
pub use set::{ReplaceOptions, Replacement, RuleSet, Selector};
pub use shorthand::{Template, compile_pattern};
