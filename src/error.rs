use std::path::PathBuf;

/// Library-level structured errors for rebatch.
///
/// Use `thiserror` for structured errors that library consumers can match on.
/// The CLI binary wraps these with `anyhow` for rich context chains.
#[derive(Debug, thiserror::Error)]
pub enum RebatchError {
	#[error("Failed to read config file: {path}")]
	ConfigReadError {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	#[error("Failed to parse config file: {path}")]
	ConfigParseError {
		path: PathBuf,
		#[source]
		source: toml::de::Error,
	},

	#[error("Invalid config value for `{key}`: {reason}")]
	InvalidConfigValue { key: String, reason: String },

	#[error("Failed to resolve home directory")]
	HomeDirectoryNotFound,

	#[error("Mutually exclusive options: {option1} and {option2}")]
	MutuallyExclusive { option1: String, option2: String },

	#[error("Selector must not be empty")]
	EmptySelector,

	#[error("Could not parse pattern {pattern:?}: {sequence} is not a valid combination")]
	InvalidShorthand { pattern: String, sequence: String },

	#[error("Invalid regex pattern: {pattern}")]
	InvalidRegex {
		pattern: String,
		#[source]
		source: regex::Error,
	},

	#[error("Could not parse template {template:?}: {sequence} is not a valid combination")]
	InvalidTemplate { template: String, sequence: String },

	#[error("Template {template:?} references group %{group} but the pattern has {available} group(s)")]
	TemplateGroupOutOfRange {
		template: String,
		group: usize,
		available: usize,
	},

	#[error("Could not parse number operand: {operand:?}")]
	InvalidNumberOperand {
		operand: String,
		#[source]
		source: std::num::ParseIntError,
	},

	#[error("No digit run found in {name:?}")]
	NoDigitRun { name: String },

	#[error("Number in {name:?} overflows when adjusted by {delta}")]
	NumberOverflow { name: String, delta: i64 },

	#[error("Cannot rename {from}: computed name {name:?} is not a valid file name")]
	InvalidFileName { from: PathBuf, name: String },

	#[error("Multiple files being renamed to {destination} ({first} and {second})")]
	DuplicateDestination {
		destination: PathBuf,
		first: PathBuf,
		second: PathBuf,
	},

	#[error("Cannot rename {source_path} ({destination} already exists)")]
	DestinationExists {
		source_path: PathBuf,
		destination: PathBuf,
	},

	#[error("Swapping not supported ({first} <-> {second})")]
	SwapNotSupported { first: PathBuf, second: PathBuf },

	#[error("Rename cycle detected through {path}")]
	RenameCycle { path: PathBuf },

	#[error("Failed to read directory: {path}")]
	ReadDir {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	#[error("Failed to rename {from} to {to} after {completed} successful rename(s)")]
	RenameFailed {
		from: PathBuf,
		to: PathBuf,
		completed: usize,
		#[source]
		source: std::io::Error,
	},
}

/// Result type alias using RebatchError.
pub type Result<T> = std::result::Result<T, RebatchError>;
