//! Rebatch - batch file renamer with collision-safe ordering.
//!
//! This library provides the core functionality for rebatch, including:
//! - Selecting file names by literal text, `%`-shorthand pattern or digit run
//! - Computing new names by literal, capture template or numeric delta
//! - Breadth-first directory scanning into rename candidates
//! - Validating and ordering renames so no pending file is clobbered
//! - `.rebatch.toml` configuration cascade
//!
//! # Example
//!
//! ```no_run
//! use rebatch::config::{Defaults, MergedConfig, Settings};
//! use rebatch::rules::{ReplaceOptions, Replacement, RuleSet, Selector};
//! use rebatch::scan::scan;
//! use rebatch::schedule::{Batch, ExecutionMode, RealFileSystem};
//! use std::path::PathBuf;
//!
//! let settings = Settings::resolve(PathBuf::from("."), Defaults::default(), &MergedConfig::default());
//! let rules = RuleSet::new(
//!     Selector::Literal("photo".to_string()),
//!     Some(Replacement::Literal("img".to_string())),
//!     ReplaceOptions::default(),
//! )
//! .unwrap();
//!
//! let candidates = scan(&settings, &rules).unwrap();
//! let mut batch = Batch::validate(candidates, &RealFileSystem).unwrap();
//! let report = batch.execute(&RealFileSystem, ExecutionMode::DryRun).unwrap();
//! for rename in &report.renames {
//!     println!("{} -> {}", rename.from.display(), rename.to.display());
//! }
//! ```

pub mod config;
pub mod error;
pub mod rules;
pub mod scan;
pub mod schedule;

pub use error::{RebatchError, Result};
