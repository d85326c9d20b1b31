use crate::error::{RebatchError, Result};
use crate::scan::Candidate;
use crate::schedule::Batch;
use crate::schedule::fs::FileSystem;
use std::collections::HashMap;
use std::path::Path;

#[derive(Clone, Copy, PartialEq, Eq)]
enum Visit {
	Unseen,
	OnPath,
	Finished,
}

impl Batch {
	/// Check the whole candidate set before anything is renamed.
	///
	/// Rejects, in this order: two candidates with the same destination, a
	/// destination occupied by a file that is not itself being renamed, a
	/// two-file swap, and any longer rename cycle.
	pub fn validate(candidates: Vec<Candidate>, fs: &impl FileSystem) -> Result<Batch> {
		let mut by_destination: HashMap<&Path, usize> = HashMap::with_capacity(candidates.len());
		for (i, candidate) in candidates.iter().enumerate() {
			if let Some(&first) = by_destination.get(candidate.to.as_path()) {
				return Err(RebatchError::DuplicateDestination {
					destination: candidate.to.clone(),
					first: candidates[first].from.clone(),
					second: candidate.from.clone(),
				});
			}
			by_destination.insert(&candidate.to, i);
		}

		let by_source: HashMap<_, _> = candidates
			.iter()
			.enumerate()
			.map(|(i, c)| (c.from.clone(), i))
			.collect();

		for candidate in &candidates {
			match by_source.get(&candidate.to) {
				Some(&other) if candidates[other].to == candidate.from => {
					return Err(RebatchError::SwapNotSupported {
						first: candidate.from.clone(),
						second: candidates[other].from.clone(),
					});
				}
				Some(_) => {}
				None if fs.exists(&candidate.to) => {
					return Err(RebatchError::DestinationExists {
						source_path: candidate.from.clone(),
						destination: candidate.to.clone(),
					});
				}
				None => {}
			}
		}

		let done = vec![false; candidates.len()];
		let batch = Batch {
			candidates,
			by_source,
			done,
		};
		batch.check_cycles()?;
		Ok(batch)
	}

	/// Follow every blocker chain once; reaching a candidate already on the
	/// current chain means the chain loops.
	fn check_cycles(&self) -> Result<()> {
		let mut state = vec![Visit::Unseen; self.candidates.len()];

		for start in 0..self.candidates.len() {
			let mut path = Vec::new();
			let mut current = Some(start);

			while let Some(i) = current {
				match state[i] {
					Visit::Unseen => {
						state[i] = Visit::OnPath;
						path.push(i);
						current = self.blocker_of(i);
					}
					Visit::OnPath => {
						return Err(RebatchError::RenameCycle {
							path: self.candidates[i].from.clone(),
						});
					}
					Visit::Finished => break,
				}
			}

			for i in path {
				state[i] = Visit::Finished;
			}
		}

		Ok(())
	}
}
