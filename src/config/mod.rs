//! Configuration loading for rebatch.
//!
//! This module handles:
//! - `.rebatch.toml` parsing
//! - Directory cascade discovery
//! - Layering file defaults under command-line values

pub mod cascade;
pub mod parser;
pub mod types;

pub use cascade::{
	CONFIG_FILE_NAME, discover_configs, load_merged_config, merge_configs, user_config_path,
};
pub use parser::{parse_config_file, parse_config_str};
pub use types::{Config, Defaults, LoadedConfig, MergedConfig, Settings};
