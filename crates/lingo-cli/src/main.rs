// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use lingo_catalog::{load_config, Catalog, CatalogConfig, LocaleTag};
use tracing::{debug, error};
use tracing_subscriber::EnvFilter;

/// Inspect and query Qt Linguist translation catalogs
#[derive(Parser, Debug)]
#[command(name = "lingo", version)]
struct Args {
	/// Config file (TOML)
	#[arg(long, global = true, env = "LINGO_CONFIG")]
	config: Option<PathBuf>,

	/// Fall back to source text instead of serving unfinished translations
	#[arg(long, global = true)]
	no_unfinished: bool,

	#[command(subcommand)]
	command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
	/// Load TS files and report whether they are valid
	Check {
		#[arg(required = true)]
		files: Vec<PathBuf>,
	},

	/// Print entry counts by status
	Stats { file: PathBuf },

	/// Resolve one message
	Lookup {
		/// TS file to read (default: the configured translations directory)
		#[arg(long, conflicts_with = "locale")]
		file: Option<PathBuf>,

		/// Locale to load from the translations directory
		#[arg(long)]
		locale: Option<LocaleTag>,

		#[arg(long)]
		context: String,

		#[arg(long)]
		source: String,

		/// Disambiguating comment
		#[arg(long)]
		comment: Option<String>,

		/// Count for plural selection and `%n`
		#[arg(long, allow_negative_numbers = true)]
		count: Option<i64>,

		/// Values for `%1`, `%2`, ... in order
		#[arg(long = "arg")]
		args: Vec<String>,
	},
}

fn main() {
	tracing_subscriber::fmt()
		.with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
		.with_writer(std::io::stderr)
		.init();

	let args = Args::parse();
	if let Err(err) = run(args) {
		error!(error = %err, "command failed");
		eprintln!("error: {err:#}");
		std::process::exit(1);
	}
}

fn run(args: Args) -> Result<()> {
	let mut config = load_config(args.config.as_deref()).context("failed to load configuration")?;
	if args.no_unfinished {
		config.serve_unfinished = false;
	}

	match args.command {
		Command::Check { files } => check(&config, &files),
		Command::Stats { file } => stats(&config, &file),
		Command::Lookup {
			file,
			locale,
			context,
			source,
			comment,
			count,
			args,
		} => {
			let catalog = match file {
				Some(path) => Catalog::load_file(&path, config.options())?,
				None => {
					let locale = locale.unwrap_or_else(|| config.effective_locale());
					debug!(locale = %locale, "loading catalog for lookup");
					config.loader().load(&locale)?
				}
			};
			let args: Vec<&str> = args.iter().map(String::as_str).collect();
			println!(
				"{}",
				catalog.translate(&context, &source, comment.as_deref(), count, &args)
			);
			Ok(())
		}
	}
}

fn check(config: &CatalogConfig, files: &[PathBuf]) -> Result<()> {
	let mut failed = 0;
	for path in files {
		match Catalog::load_file(path, config.options()) {
			Ok(catalog) => println!("{}: ok, {}", path.display(), catalog.stats()),
			Err(err) => {
				failed += 1;
				println!("{}: {err}", path.display());
			}
		}
	}

	if failed > 0 {
		bail!("{failed} of {} file(s) failed to load", files.len());
	}
	Ok(())
}

fn stats(config: &CatalogConfig, path: &Path) -> Result<()> {
	let catalog = Catalog::load_file(path, config.options())?;
	let stats = catalog.stats();
	let language = catalog
		.language()
		.map(ToString::to_string)
		.unwrap_or_else(|| "unknown".to_string());

	println!("language:      {language}");
	println!("plural forms:  {}", catalog.plural_rule().form_count());
	println!("contexts:      {}", stats.contexts);
	println!("finished:      {}", stats.finished);
	println!("unfinished:    {}", stats.unfinished);
	println!("untranslated:  {}", stats.untranslated);
	println!("plural:        {}", stats.plural);
	println!("obsolete:      {}", stats.obsolete);
	println!("vanished:      {}", stats.vanished);
	Ok(())
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_parse_lookup_args() {
		let args = Args::try_parse_from([
			"lingo",
			"--no-unfinished",
			"lookup",
			"--locale",
			"nb_NO",
			"--context",
			"LocalTrashDialog",
			"--source",
			"Restore %n note(s)?",
			"--count",
			"3",
			"--arg",
			"a",
			"--arg",
			"b",
		])
		.unwrap();

		assert!(args.no_unfinished);
		match args.command {
			Command::Lookup {
				locale, count, args, file, ..
			} => {
				assert_eq!(locale.map(|l| l.to_string()).as_deref(), Some("nb_NO"));
				assert_eq!(count, Some(3));
				assert_eq!(args, vec!["a", "b"]);
				assert!(file.is_none());
			}
			other => panic!("unexpected command {other:?}"),
		}
	}

	#[test]
	fn test_file_conflicts_with_locale() {
		let result = Args::try_parse_from([
			"lingo", "lookup", "--file", "a.ts", "--locale", "sv", "--context", "C", "--source", "S",
		]);
		assert!(result.is_err());
	}

	#[test]
	fn test_invalid_locale_rejected() {
		let result = Args::try_parse_from([
			"lingo", "lookup", "--locale", "POSIX", "--context", "C", "--source", "S",
		]);
		assert!(result.is_err());
	}

	#[test]
	fn test_check_requires_files() {
		assert!(Args::try_parse_from(["lingo", "check"]).is_err());
	}
}
