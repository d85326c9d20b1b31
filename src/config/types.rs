use serde::Deserialize;
use std::path::PathBuf;

/// Defaults that can come from a config file or the command line.
///
/// Every field is optional so layers can be merged: the first layer that
/// sets a key wins.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Defaults {
	/// Descend into sub-directories.
	pub recurse: Option<bool>,

	/// Emit per-match and per-rename diagnostics.
	pub verbose: Option<bool>,

	/// Validate and report without renaming.
	pub dry_run: Option<bool>,

	/// Only consider names ending with this suffix.
	pub ext: Option<String>,

	/// Minimum width of numeric results.
	pub zero_pad: Option<usize>,

	/// Replacements per name (negative means unlimited).
	pub count: Option<i64>,
}

impl Defaults {
	/// Fill unset keys from `fallback`.
	pub fn or(self, fallback: &Defaults) -> Defaults {
		Defaults {
			recurse: self.recurse.or(fallback.recurse),
			verbose: self.verbose.or(fallback.verbose),
			dry_run: self.dry_run.or(fallback.dry_run),
			ext: self.ext.or_else(|| fallback.ext.clone()),
			zero_pad: self.zero_pad.or(fallback.zero_pad),
			count: self.count.or(fallback.count),
		}
	}
}

/// Top-level configuration from a `.rebatch.toml` file.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Config {
	/// If true, stop the directory cascade here and jump to ~/.rebatch.toml.
	#[serde(default)]
	pub root: bool,

	/// Environment variable name that, if truthy, skips ~/.rebatch.toml lookup.
	#[serde(default)]
	pub root_config_lookup_disable_env_var: Option<String>,

	/// Default option values.
	#[serde(flatten)]
	pub defaults: Defaults,
}

/// A loaded configuration with its source path for debugging/display.
#[derive(Debug, Clone)]
pub struct LoadedConfig {
	/// The parsed configuration.
	pub config: Config,

	/// The path this config was loaded from.
	pub path: PathBuf,
}

/// Merged configuration from multiple config files in the cascade.
#[derive(Debug, Clone, Default)]
pub struct MergedConfig {
	/// Effective defaults, nearest file first.
	pub defaults: Defaults,

	/// Files that contributed, in cascade order.
	pub sources: Vec<PathBuf>,
}

/// Effective, immutable settings for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
	/// Directory the scan starts from.
	pub root: PathBuf,
	pub recurse: bool,
	pub verbose: bool,
	pub dry_run: bool,
	pub ext: Option<String>,
	pub zero_pad: usize,
	pub count: i64,
}

impl Settings {
	/// Resolve settings: command-line values first, then config files, then
	/// built-in defaults.
	pub fn resolve(root: PathBuf, cli: Defaults, merged: &MergedConfig) -> Settings {
		let layered = cli.or(&merged.defaults);
		Settings {
			root,
			recurse: layered.recurse.unwrap_or(false),
			verbose: layered.verbose.unwrap_or(false),
			dry_run: layered.dry_run.unwrap_or(false),
			ext: layered.ext,
			zero_pad: layered.zero_pad.unwrap_or(0),
			count: layered.count.unwrap_or(1),
		}
	}
}

impl Config {
	/// Validate values that parse but make no sense.
	pub fn validate(&self) -> Result<(), crate::error::RebatchError> {
		if let Some(ref ext) = self.defaults.ext
			&& ext.is_empty()
		{
			return Err(crate::error::RebatchError::InvalidConfigValue {
				key: "ext".to_string(),
				reason: "must not be empty".to_string(),
			});
		}
		if let Some(width) = self.defaults.zero_pad
			&& width > crate::rules::MAX_ZERO_PAD
		{
			return Err(crate::error::RebatchError::InvalidConfigValue {
				key: "zero-pad".to_string(),
				reason: format!("must be at most {}", crate::rules::MAX_ZERO_PAD),
			});
		}
		Ok(())
	}
}
