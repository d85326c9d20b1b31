use anyhow::{Context, Result};
use clap::error::ErrorKind;
use clap::{ArgGroup, CommandFactory, Parser};
use std::io::IsTerminal;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

use rebatch::config::{Defaults, MergedConfig, Settings, load_merged_config, user_config_path};
use rebatch::rules::{
	Limit, MAX_ZERO_PAD, NumberAnchor, ReplaceOptions, Replacement, RuleSet, Selector,
};
use rebatch::scan::scan;
use rebatch::schedule::{Batch, ExecutionMode, RealFileSystem};

#[derive(Parser)]
#[command(name = "rebatch")]
#[command(
	author,
	version,
	about = "Batch rename files with literal, pattern or numeric rules"
)]
#[command(arg_required_else_help = true)]
#[command(group(
	ArgGroup::new("selector")
		.args(["from", "from_regex", "number_start", "number_end"])
))]
#[command(group(ArgGroup::new("replacement").args(["to", "to_regex"])))]
struct Cli {
	/// Directory to start from
	#[arg(value_name = "DIR", default_value = ".")]
	dir: PathBuf,

	/// Only consider files whose name ends with this suffix (e.g. ".jpg")
	#[arg(long, value_name = "SUFFIX")]
	ext: Option<String>,

	/// Select files containing this text
	#[arg(long, value_name = "TEXT")]
	from: Option<String>,

	/// Select files matching this pattern (%d %w %s and uppercase forms, %% for %)
	#[arg(long, value_name = "PATTERN")]
	from_regex: Option<String>,

	/// Add OP (e.g. +1, -4) to the number at the start of the name
	#[arg(
		long,
		value_name = "OP",
		allow_hyphen_values = true,
		conflicts_with = "replacement"
	)]
	number_start: Option<String>,

	/// Add OP (e.g. +1, -4) to the number at the end of the name, before the extension
	#[arg(
		long,
		value_name = "OP",
		allow_hyphen_values = true,
		conflicts_with = "replacement"
	)]
	number_end: Option<String>,

	/// Replace the selected text with this string
	#[arg(long, value_name = "TEXT")]
	to: Option<String>,

	/// Replace each pattern match with this template (%1, %2... for groups)
	#[arg(long, value_name = "TEMPLATE")]
	to_regex: Option<String>,

	/// Replacements per file name (negative for unlimited) [default: 1]
	#[arg(short = 'n', long, value_name = "N", allow_negative_numbers = true)]
	count: Option<i64>,

	/// Pad numeric results with zeros to this width
	#[arg(short = 'z', long, value_name = "WIDTH", value_parser = parse_zero_pad)]
	zero_pad: Option<usize>,

	/// Recurse into child folders
	#[arg(short = 'R', long, overrides_with = "no_recurse")]
	recurse: bool,

	/// Stay in the starting folder, even if a config file enables recurse
	#[arg(long, overrides_with = "recurse")]
	no_recurse: bool,

	/// Print each match and rename
	#[arg(short, long, overrides_with = "no_verbose")]
	verbose: bool,

	/// Turn off verbose output enabled by a config file
	#[arg(long, overrides_with = "verbose")]
	no_verbose: bool,

	/// Print renames without performing them
	#[arg(short = 't', long, visible_alias = "test", overrides_with = "no_dry_run")]
	dry_run: bool,

	/// Rename for real, even if a config file enables dry-run
	#[arg(long, overrides_with = "dry_run")]
	no_dry_run: bool,

	/// Ignore .rebatch.toml files
	#[arg(long)]
	no_config: bool,

	/// Show config files and effective settings, then exit
	#[arg(long)]
	show_config: bool,
}

impl Cli {
	fn defaults(&self) -> Defaults {
		Defaults {
			recurse: switch(self.recurse, self.no_recurse),
			verbose: switch(self.verbose, self.no_verbose),
			dry_run: switch(self.dry_run, self.no_dry_run),
			ext: self.ext.clone(),
			zero_pad: self.zero_pad,
			count: self.count,
		}
	}

	fn selector(&self) -> Option<Selector> {
		if let Some(ref text) = self.from {
			return Some(Selector::Literal(text.clone()));
		}
		if let Some(ref pattern) = self.from_regex {
			return Some(Selector::Pattern(pattern.clone()));
		}
		if let Some(ref operand) = self.number_start {
			return Some(Selector::Number {
				anchor: NumberAnchor::Start,
				operand: operand.clone(),
			});
		}
		self.number_end.as_ref().map(|operand| Selector::Number {
			anchor: NumberAnchor::End,
			operand: operand.clone(),
		})
	}

	fn replacement(&self) -> Option<Replacement> {
		self.to
			.clone()
			.map(Replacement::Literal)
			.or_else(|| self.to_regex.clone().map(Replacement::Template))
	}
}

/// A `--flag`/`--no-flag` pair: `None` when neither was given.
fn switch(on: bool, off: bool) -> Option<bool> {
	match (on, off) {
		(true, _) => Some(true),
		(_, true) => Some(false),
		_ => None,
	}
}

fn parse_zero_pad(value: &str) -> std::result::Result<usize, String> {
	let width: usize = value.parse().map_err(|e| format!("{e}"))?;
	if width > MAX_ZERO_PAD {
		return Err(format!("must be at most {MAX_ZERO_PAD}"));
	}
	Ok(width)
}

fn main() -> ExitCode {
	match run() {
		Ok(code) => code,
		Err(e) => {
			eprintln!("error: {e:?}");
			ExitCode::FAILURE
		}
	}
}

fn run() -> Result<ExitCode> {
	let cli = Cli::parse();

	let cwd = std::env::current_dir().context("Failed to get current directory")?;
	let merged = if cli.no_config {
		MergedConfig::default()
	} else {
		load_merged_config(&cwd).context("Failed to load configuration")?
	};
	let settings = Settings::resolve(cli.dir.clone(), cli.defaults(), &merged);

	init_tracing(settings.verbose);

	if cli.show_config {
		return handle_show_config(&merged, &settings);
	}

	let Some(selector) = cli.selector() else {
		Cli::command()
			.error(
				ErrorKind::MissingRequiredArgument,
				"one of --from, --from-regex, --number-start or --number-end is required",
			)
			.exit();
	};

	handle_rename(selector, cli.replacement(), &settings)
}

fn init_tracing(verbose: bool) {
	let default_level = if verbose { "debug" } else { "warn" };
	let filter =
		EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

	tracing_subscriber::fmt()
		.with_env_filter(filter)
		.with_writer(std::io::stderr)
		.with_ansi(std::io::stderr().is_terminal())
		.without_time()
		.with_target(false)
		.init();
}

fn handle_rename(
	selector: Selector,
	replacement: Option<Replacement>,
	settings: &Settings,
) -> Result<ExitCode> {
	if settings.verbose
		&& replacement.is_none()
		&& !matches!(selector, Selector::Number { .. })
	{
		tracing::warn!("neither --to nor --to-regex given, matched text will be removed");
	}

	let options = ReplaceOptions {
		limit: Limit::from_count(settings.count),
		zero_pad: settings.zero_pad,
	};
	let rules = RuleSet::new(selector, replacement, options).context("Invalid rename rule")?;
	tracing::debug!(
		matcher = %rules.matcher().describe(),
		replacer = %rules.replacer().describe(),
		ext = ?settings.ext,
		"using rules"
	);

	let candidates = scan(settings, &rules)
		.with_context(|| format!("Failed to scan {}", settings.root.display()))?;

	if candidates.is_empty() {
		println!("No matches found.");
		return Ok(ExitCode::SUCCESS);
	}

	let fs = RealFileSystem;
	let mut batch = Batch::validate(candidates, &fs).context("Refusing to rename")?;
	let mode = ExecutionMode::from_dry_run(settings.dry_run);
	let report = batch.execute(&fs, mode).context("Rename batch aborted")?;

	match mode {
		ExecutionMode::DryRun => {
			for rename in &report.renames {
				println!(" {} -> {}", rename.from.display(), rename.to.display());
			}
		}
		ExecutionMode::Live => {
			println!("Renamed {} file(s).", report.renames.len());
		}
	}

	Ok(ExitCode::SUCCESS)
}

fn handle_show_config(merged: &MergedConfig, settings: &Settings) -> Result<ExitCode> {
	if merged.sources.is_empty() {
		println!("No configuration files found.");
	} else {
		println!("Configuration files (in cascade order):");
		for source in &merged.sources {
			println!("  {}", source.display());
		}
	}

	println!();
	println!("Effective settings:");
	println!("  root: {}", settings.root.display());
	println!("  recurse: {}", settings.recurse);
	println!("  verbose: {}", settings.verbose);
	println!("  dry-run: {}", settings.dry_run);
	println!("  ext: {}", settings.ext.as_deref().unwrap_or("(any)"));
	println!("  zero-pad: {}", settings.zero_pad);
	println!("  count: {}", settings.count);

	if let Ok(user_path) = user_config_path() {
		println!();
		println!("User config path: {}", user_path.display());
		if user_path.exists() {
			println!("  (exists)");
		} else {
			println!("  (not found)");
		}
	}

	Ok(ExitCode::SUCCESS)
}
