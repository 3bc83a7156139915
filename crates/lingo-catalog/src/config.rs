// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Layered catalog configuration: built-in defaults, a TOML file and
//! `LINGO_*` environment variables, in increasing precedence.
//!
//! ```toml
//! [catalog]
//! translations_dir = "/usr/share/qownnotes/translations"
//! file_prefix = "QOwnNotes"
//! locale = "nb_NO"
//! serve_unfinished = false
//! ```

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::{debug, info};

use crate::catalog::CatalogOptions;
use crate::error::ConfigError;
use crate::loader::CatalogLoader;
use crate::locale::{system_locale, LocaleTag};

pub const DEFAULT_TRANSLATIONS_DIR: &str = "translations";
pub const DEFAULT_FILE_PREFIX: &str = "QOwnNotes";

pub const ENV_TRANSLATIONS_DIR: &str = "LINGO_TRANSLATIONS_DIR";
pub const ENV_FILE_PREFIX: &str = "LINGO_FILE_PREFIX";
pub const ENV_LOCALE: &str = "LINGO_LOCALE";
pub const ENV_SERVE_UNFINISHED: &str = "LINGO_SERVE_UNFINISHED";

/// Catalog configuration (runtime, fully resolved).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogConfig {
	pub translations_dir: PathBuf,
	pub file_prefix: String,
	/// Explicit locale; `None` means "detect from the system".
	pub locale: Option<LocaleTag>,
	pub serve_unfinished: bool,
}

impl Default for CatalogConfig {
	fn default() -> Self {
		Self {
			translations_dir: PathBuf::from(DEFAULT_TRANSLATIONS_DIR),
			file_prefix: DEFAULT_FILE_PREFIX.to_string(),
			locale: None,
			serve_unfinished: true,
		}
	}
}

impl CatalogConfig {
	pub fn options(&self) -> CatalogOptions {
		CatalogOptions {
			serve_unfinished: self.serve_unfinished,
		}
	}

	pub fn loader(&self) -> CatalogLoader {
		CatalogLoader::new(&self.translations_dir, &self.file_prefix).with_options(self.options())
	}

	/// Configured locale, else the system locale, else English.
	pub fn effective_locale(&self) -> LocaleTag {
		self.locale
			.clone()
			.or_else(system_locale)
			.unwrap_or_default()
	}
}

/// Catalog configuration layer (partial, for merging).
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
pub struct CatalogConfigLayer {
	#[serde(default)]
	pub translations_dir: Option<PathBuf>,
	#[serde(default)]
	pub file_prefix: Option<String>,
	#[serde(default)]
	pub locale: Option<String>,
	#[serde(default)]
	pub serve_unfinished: Option<bool>,
}

impl CatalogConfigLayer {
	pub fn merge(&mut self, other: CatalogConfigLayer) {
		if other.translations_dir.is_some() {
			self.translations_dir = other.translations_dir;
		}
		if other.file_prefix.is_some() {
			self.file_prefix = other.file_prefix;
		}
		if other.locale.is_some() {
			self.locale = other.locale;
		}
		if other.serve_unfinished.is_some() {
			self.serve_unfinished = other.serve_unfinished;
		}
	}

	pub fn finalize(self) -> Result<CatalogConfig, ConfigError> {
		let defaults = CatalogConfig::default();
		let locale = match self.locale {
			None => None,
			Some(value) => Some(LocaleTag::parse(&value).ok_or_else(|| {
				ConfigError::invalid_value("catalog.locale", format!("'{value}' is not a locale"))
			})?),
		};
		Ok(CatalogConfig {
			translations_dir: self.translations_dir.unwrap_or(defaults.translations_dir),
			file_prefix: self.file_prefix.unwrap_or(defaults.file_prefix),
			locale,
			serve_unfinished: self.serve_unfinished.unwrap_or(defaults.serve_unfinished),
		})
	}
}

/// Top-level shape of the TOML config file.
#[derive(Debug, Clone, Default, Deserialize)]
struct FileLayer {
	#[serde(default)]
	catalog: Option<CatalogConfigLayer>,
}

/// Source precedence levels (higher = overrides lower).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Precedence {
	Defaults = 10,
	ConfigFile = 20,
	Environment = 50,
}

/// Trait for configuration sources.
pub trait ConfigSource: Send + Sync {
	fn name(&self) -> &'static str;
	fn precedence(&self) -> Precedence;
	fn load(&self) -> Result<CatalogConfigLayer, ConfigError>;
}

/// Built-in defaults source.
pub struct DefaultsSource;

impl ConfigSource for DefaultsSource {
	fn name(&self) -> &'static str {
		"defaults"
	}

	fn precedence(&self) -> Precedence {
		Precedence::Defaults
	}

	fn load(&self) -> Result<CatalogConfigLayer, ConfigError> {
		Ok(CatalogConfigLayer::default())
	}
}

/// TOML file configuration source. A missing file contributes nothing.
pub struct TomlSource {
	path: PathBuf,
}

impl TomlSource {
	pub fn new(path: impl Into<PathBuf>) -> Self {
		Self { path: path.into() }
	}
}

impl ConfigSource for TomlSource {
	fn name(&self) -> &'static str {
		"toml-config"
	}

	fn precedence(&self) -> Precedence {
		Precedence::ConfigFile
	}

	fn load(&self) -> Result<CatalogConfigLayer, ConfigError> {
		if !self.path.exists() {
			debug!(path = %self.path.display(), "config file not found, skipping");
			return Ok(CatalogConfigLayer::default());
		}

		debug!(path = %self.path.display(), "loading config file");
		let content = std::fs::read_to_string(&self.path).map_err(|e| ConfigError::FileRead {
			path: self.path.clone(),
			source: e,
		})?;

		let layer: FileLayer = toml::from_str(&content).map_err(|e| ConfigError::TomlParse {
			path: self.path.clone(),
			source: e,
		})?;

		Ok(layer.catalog.unwrap_or_default())
	}
}

/// Environment variable source.
///
/// Convention: LINGO_<FIELD>
#[derive(Default)]
pub struct EnvSource {
	vars: Option<HashMap<String, String>>,
}

impl EnvSource {
	/// Read from the process environment.
	pub fn new() -> Self {
		Self::default()
	}

	/// Read from a fixed set of variables instead of the process environment.
	pub fn with_vars<I, K, V>(vars: I) -> Self
	where
		I: IntoIterator<Item = (K, V)>,
		K: Into<String>,
		V: Into<String>,
	{
		Self {
			vars: Some(vars.into_iter().map(|(k, v)| (k.into(), v.into())).collect()),
		}
	}

	fn var(&self, name: &str) -> Option<String> {
		let value = match &self.vars {
			Some(vars) => vars.get(name).cloned(),
			None => std::env::var(name).ok(),
		};
		value.filter(|s| !s.is_empty())
	}
}

impl ConfigSource for EnvSource {
	fn name(&self) -> &'static str {
		"environment"
	}

	fn precedence(&self) -> Precedence {
		Precedence::Environment
	}

	fn load(&self) -> Result<CatalogConfigLayer, ConfigError> {
		let serve_unfinished = match self.var(ENV_SERVE_UNFINISHED) {
			None => None,
			Some(value) => Some(parse_bool(&value).ok_or_else(|| {
				ConfigError::invalid_value(
					ENV_SERVE_UNFINISHED,
					format!("'{value}' is not a boolean (expected true/false/1/0/yes/no/on/off)"),
				)
			})?),
		};

		Ok(CatalogConfigLayer {
			translations_dir: self.var(ENV_TRANSLATIONS_DIR).map(PathBuf::from),
			file_prefix: self.var(ENV_FILE_PREFIX),
			locale: self.var(ENV_LOCALE),
			serve_unfinished,
		})
	}
}

fn parse_bool(value: &str) -> Option<bool> {
	match value.trim().to_ascii_lowercase().as_str() {
		"1" | "true" | "yes" | "on" => Some(true),
		"0" | "false" | "no" | "off" => Some(false),
		_ => None,
	}
}

/// Merge sources in precedence order and resolve the result.
pub fn load_from_sources(
	mut sources: Vec<Box<dyn ConfigSource>>,
) -> Result<CatalogConfig, ConfigError> {
	sources.sort_by_key(|s| s.precedence());

	let mut merged = CatalogConfigLayer::default();
	for source in sources {
		debug!(source = source.name(), "loading configuration source");
		merged.merge(source.load()?);
	}

	let config = merged.finalize()?;
	info!(
		translations_dir = %config.translations_dir.display(),
		file_prefix = %config.file_prefix,
		locale = %config.locale.as_ref().map(ToString::to_string).unwrap_or_else(|| "system".to_string()),
		serve_unfinished = config.serve_unfinished,
		"Catalog configuration loaded"
	);
	Ok(config)
}

/// Load configuration from defaults, an optional TOML file and the environment.
pub fn load_config(config_path: Option<&Path>) -> Result<CatalogConfig, ConfigError> {
	let mut sources: Vec<Box<dyn ConfigSource>> = vec![Box::new(DefaultsSource), Box::new(EnvSource::new())];
	if let Some(path) = config_path {
		sources.push(Box::new(TomlSource::new(path)));
	}
	load_from_sources(sources)
}
