use crate::error::{RebatchError, Result};
use crate::scan::Candidate;
use crate::schedule::Batch;
use crate::schedule::fs::FileSystem;
use std::collections::HashSet;

/// Whether renames are performed or only reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecutionMode {
	Live,
	DryRun,
}

impl ExecutionMode {
	pub fn from_dry_run(dry_run: bool) -> Self {
		if dry_run {
			ExecutionMode::DryRun
		} else {
			ExecutionMode::Live
		}
	}
}

/// What a batch execution did, in the order it did it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutionReport {
	pub mode: ExecutionMode,

	/// Renames issued (or planned, in dry-run mode).
	pub renames: Vec<Candidate>,
}

impl Batch {
	/// Apply every rename exactly once, moving blockers out of the way first.
	///
	/// For each pending candidate the chain of candidates occupying its
	/// destination is collected and renamed from the far end back. A failed
	/// rename aborts the rest of the batch.
	pub fn execute(&mut self, fs: &impl FileSystem, mode: ExecutionMode) -> Result<ExecutionReport> {
		let mut report = ExecutionReport {
			mode,
			renames: Vec::with_capacity(self.candidates.len()),
		};

		for start in 0..self.candidates.len() {
			if self.done[start] {
				continue;
			}
			let chain = self.pending_chain(start)?;
			for &i in chain.iter().rev() {
				self.rename_one(i, fs, &mut report)?;
			}
		}

		Ok(report)
	}

	/// `start` followed by each not-yet-done candidate blocking the previous one.
	fn pending_chain(&self, start: usize) -> Result<Vec<usize>> {
		let mut chain = vec![start];
		let mut seen = HashSet::from([start]);
		let mut current = start;

		while let Some(next) = self.blocker_of(current) {
			if self.done[next] {
				break;
			}
			if !seen.insert(next) {
				return Err(RebatchError::RenameCycle {
					path: self.candidates[next].from.clone(),
				});
			}
			chain.push(next);
			current = next;
		}

		Ok(chain)
	}

	fn rename_one(
		&mut self,
		i: usize,
		fs: &impl FileSystem,
		report: &mut ExecutionReport,
	) -> Result<()> {
		if self.done[i] {
			return Ok(());
		}
		self.done[i] = true;

		let candidate = &self.candidates[i];
		if report.mode == ExecutionMode::Live {
			tracing::info!(
				from = %candidate.from.display(),
				to = %candidate.to.display(),
				"renaming"
			);
			fs.rename(&candidate.from, &candidate.to)
				.map_err(|source| RebatchError::RenameFailed {
					from: candidate.from.clone(),
					to: candidate.to.clone(),
					completed: report.renames.len(),
					source,
				})?;
		}

		report.renames.push(candidate.clone());
		Ok(())
	}
}
