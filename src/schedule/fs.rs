use std::io;
use std::path::Path;

/// The filesystem operations the scheduler depends on.
pub trait FileSystem {
	/// Whether anything (file, directory or symlink) occupies `path`.
	fn exists(&self, path: &Path) -> bool;

	/// Rename `from` to `to` on the same filesystem.
	fn rename(&self, from: &Path, to: &Path) -> io::Result<()>;
}

/// The real filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct RealFileSystem;

impl FileSystem for RealFileSystem {
	fn exists(&self, path: &Path) -> bool {
		// Dangling symlinks count as occupied.
		std::fs::symlink_metadata(path).is_ok()
	}

	fn rename(&self, from: &Path, to: &Path) -> io::Result<()> {
		std::fs::rename(from, to)
	}
}
