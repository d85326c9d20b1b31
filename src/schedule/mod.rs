//! Rename scheduling for rebatch.
//!
//! This module handles:
//! - Pre-flight validation of the whole candidate set
//! - Ordering renames so a destination is vacated before it is reused
//! - The filesystem seam the renames go through

pub mod executor;
pub mod fs;
pub mod validate;

pub use executor::{ExecutionMode, ExecutionReport};
pub use fs::{FileSystem, RealFileSystem};

use crate::scan::Candidate;
use std::collections::HashMap;
use std::path::PathBuf;

/// A validated set of rename candidates.
///
/// Built by [`Batch::validate`]; only the per-candidate done flags change
/// afterwards.
#[derive(Debug)]
pub struct Batch {
	candidates: Vec<Candidate>,
	by_source: HashMap<PathBuf, usize>,
	done: Vec<bool>,
}

impl Batch {
	pub fn candidates(&self) -> &[Candidate] {
		&self.candidates
	}

	pub fn len(&self) -> usize {
		self.candidates.len()
	}

	pub fn is_empty(&self) -> bool {
		self.candidates.is_empty()
	}

	/// The candidate whose current path is candidate `i`'s destination.
	fn blocker_of(&self, i: usize) -> Option<usize> {
		self.by_source.get(&self.candidates[i].to).copied()
	}
}
