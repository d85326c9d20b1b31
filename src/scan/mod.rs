//! Directory traversal for rebatch.
//!
//! Walks the tree breadth-first and turns every selected file into a rename
//! candidate. Directories are only traversed, never renamed.

use crate::config::Settings;
use crate::error::{RebatchError, Result};
use crate::rules::{Matcher, RuleSet};
use std::collections::VecDeque;
use std::fs;
use std::path::{Path, PathBuf};

/// One proposed rename.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
	/// Current path of the file.
	pub from: PathBuf,

	/// Path the file will be renamed to (same directory).
	pub to: PathBuf,
}

impl Candidate {
	pub fn new(from: impl Into<PathBuf>, to: impl Into<PathBuf>) -> Self {
		Candidate {
			from: from.into(),
			to: to.into(),
		}
	}
}

/// Scan `settings.root` and collect rename candidates in traversal order.
pub fn scan(settings: &Settings, rules: &RuleSet) -> Result<Vec<Candidate>> {
	let ext = settings.ext.as_deref().map(Matcher::extension);
	let mut candidates = Vec::new();
	let mut dirs = VecDeque::from([settings.root.clone()]);

	while let Some(dir) = dirs.pop_front() {
		for (path, is_dir) in read_sorted(&dir)? {
			if is_dir {
				if settings.recurse {
					dirs.push_back(path);
				}
				continue;
			}

			let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
				tracing::warn!(path = %path.display(), "skipping file with non UTF-8 name");
				continue;
			};

			if let Some(ref ext) = ext
				&& !ext.matches(name)
			{
				continue;
			}

			let Some(new_name) = rules.apply(name)? else {
				continue;
			};
			tracing::debug!(path = %path.display(), "matching file");

			if new_name == name {
				tracing::debug!(path = %path.display(), "name unchanged, skipping");
				continue;
			}
			check_file_name(&path, &new_name)?;

			candidates.push(Candidate::new(path, dir.join(new_name)));
		}
	}

	Ok(candidates)
}

/// Read one directory, returning entries sorted by name with a directory flag.
fn read_sorted(dir: &Path) -> Result<Vec<(PathBuf, bool)>> {
	let read_err = |source: std::io::Error| RebatchError::ReadDir {
		path: dir.to_path_buf(),
		source,
	};

	let mut entries = Vec::new();
	for entry in fs::read_dir(dir).map_err(read_err)? {
		let entry = entry.map_err(read_err)?;
		let is_dir = entry.file_type().map_err(read_err)?.is_dir();
		entries.push((entry.path(), is_dir));
	}
	entries.sort();

	Ok(entries)
}

/// A computed name must stay a plain name inside the same directory.
fn check_file_name(from: &Path, name: &str) -> Result<()> {
	let invalid = name.is_empty()
		|| name == "."
		|| name == ".."
		|| name.contains('/')
		|| name.contains(std::path::MAIN_SEPARATOR);

	if invalid {
		return Err(RebatchError::InvalidFileName {
			from: from.to_path_buf(),
			name: name.to_string(),
		});
	}
	Ok(())
}
