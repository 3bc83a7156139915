// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Locale identifiers and fallback order.

use std::fmt;
use std::str::FromStr;

/// Locale used when nothing else is configured or detected.
pub const DEFAULT_LOCALE: &str = "en";

/// A language with an optional region, as used in TS file names and the
/// `language` attribute (`nb_NO`, `de`, `pt_BR`).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LocaleTag {
	language: String,
	region: Option<String>,
}

impl LocaleTag {
	/// Parse a POSIX or BCP 47 style locale.
	///
	/// Accepts `nb_NO`, `nb-NO`, `nb_NO.UTF-8` and `nb_NO@euro`. Returns `None`
	/// for empty input and the `C`/`POSIX` pseudo-locales.
	///
	/// # Example
	///
	/// ```
	/// use lingo_catalog::LocaleTag;
	///
	/// let tag = LocaleTag::parse("nb-NO").unwrap();
	/// assert_eq!(tag.to_string(), "nb_NO");
	/// assert!(LocaleTag::parse("C").is_none());
	/// ```
	pub fn parse(value: &str) -> Option<Self> {
		let value = value.trim();
		let value = value.split(['.', '@']).next().unwrap_or_default();
		if value.is_empty() || value.eq_ignore_ascii_case("c") || value.eq_ignore_ascii_case("posix")
		{
			return None;
		}

		let mut parts = value.split(['_', '-']);
		let language = parts.next()?.to_ascii_lowercase();
		if language.is_empty() || !language.chars().all(|c| c.is_ascii_alphabetic()) {
			return None;
		}

		// Script subtags (`zh-Hans-CN`) are skipped; the region is the first
		// two-letter or three-digit subtag.
		let region = parts
			.find(|p| {
				(p.len() == 2 && p.chars().all(|c| c.is_ascii_alphabetic()))
					|| (p.len() == 3 && p.chars().all(|c| c.is_ascii_digit()))
			})
			.map(|p| p.to_ascii_uppercase());

		Some(Self { language, region })
	}

	pub fn language(&self) -> &str {
		&self.language
	}

	pub fn region(&self) -> Option<&str> {
		self.region.as_deref()
	}

	/// Tags to try, most specific first.
	///
	/// Norwegian Bokmål and Nynorsk fall back to the `no` macrolanguage and
	/// `no` falls back to Bokmål, since translations are published under
	/// either name.
	pub fn fallback_chain(&self) -> Vec<String> {
		let mut chain = Vec::with_capacity(3);
		if let Some(region) = &self.region {
			chain.push(format!("{}_{}", self.language, region));
		}
		chain.push(self.language.clone());
		match self.language.as_str() {
			"nb" | "nn" => chain.push("no".to_string()),
			"no" => chain.push("nb".to_string()),
			_ => {}
		}
		chain
	}
}

impl Default for LocaleTag {
	/// The [`DEFAULT_LOCALE`].
	fn default() -> Self {
		Self {
			language: DEFAULT_LOCALE.to_string(),
			region: None,
		}
	}
}

impl fmt::Display for LocaleTag {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match &self.region {
			Some(region) => write!(f, "{}_{}", self.language, region),
			None => f.write_str(&self.language),
		}
	}
}

/// Error returned when a string is not a usable locale.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("not a locale: '{0}'")]
pub struct InvalidLocale(pub String);

impl FromStr for LocaleTag {
	type Err = InvalidLocale;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		Self::parse(s).ok_or_else(|| InvalidLocale(s.to_string()))
	}
}

/// Detect the user's locale from the operating system.
pub fn system_locale() -> Option<LocaleTag> {
	sys_locale::get_locale().and_then(|l| LocaleTag::parse(&l))
}
