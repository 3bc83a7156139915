// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! In-memory message catalog for one locale.

use std::collections::{HashMap, HashSet};
use std::fmt;
use std::path::Path;

use tracing::{debug, warn};

use crate::entry::{EntryState, Retirement, Translation, TranslationEntry};
use crate::error::{LoadError, ParseError};
use crate::format::substitute;
use crate::locale::LocaleTag;
use crate::plural::PluralRule;
use crate::ts::{self, TsDocument};

/// Load-time policy for a catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CatalogOptions {
	/// Serve unfinished translations instead of falling back to source text.
	pub serve_unfinished: bool,
}

impl Default for CatalogOptions {
	fn default() -> Self {
		Self {
			serve_unfinished: true,
		}
	}
}

/// Immutable set of translations for one locale.
///
/// Lookups never fail: anything that cannot be served resolves to the source
/// text it was asked for.
#[derive(Debug, Clone)]
pub struct Catalog {
	language: Option<LocaleTag>,
	source_language: Option<LocaleTag>,
	plural_rule: PluralRule,
	options: CatalogOptions,
	entries: Vec<TranslationEntry>,
	/// context -> source text -> indices into `entries`, declaration order.
	/// Retired entries are not indexed.
	index: HashMap<String, HashMap<String, Vec<usize>>>,
}

impl Default for Catalog {
	fn default() -> Self {
		Self::empty()
	}
}

impl Catalog {
	/// A catalog with no entries; every lookup yields the source text.
	pub fn empty() -> Self {
		Self {
			language: None,
			source_language: None,
			plural_rule: PluralRule::OneOther,
			options: CatalogOptions::default(),
			entries: Vec::new(),
			index: HashMap::new(),
		}
	}

	/// Parse a TS document and build a catalog from it.
	///
	/// # Example
	///
	/// ```
	/// use lingo_catalog::{Catalog, CatalogOptions};
	///
	/// let catalog = Catalog::load(
	///     r#"<TS version="2.1" language="nb_NO">
	///          <context>
	///            <name>AboutDialog</name>
	///            <message>
	///              <source>About QOwnNotes</source>
	///              <translation>Om QOwnNotes</translation>
	///            </message>
	///          </context>
	///        </TS>"#,
	///     CatalogOptions::default(),
	/// )
	/// .unwrap();
	///
	/// assert_eq!(catalog.resolve("AboutDialog", "About QOwnNotes", None, None), "Om QOwnNotes");
	/// assert_eq!(catalog.resolve("AboutDialog", "Foo Bar", None, None), "Foo Bar");
	/// ```
	pub fn load(resource: &str, options: CatalogOptions) -> Result<Self, ParseError> {
		Self::from_document(ts::parse(resource)?, options)
	}

	/// Read and load a TS file.
	pub fn load_file(path: impl AsRef<Path>, options: CatalogOptions) -> Result<Self, LoadError> {
		let path = path.as_ref();
		let content = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
			path: path.to_path_buf(),
			source,
		})?;
		Self::load(&content, options).map_err(|source| LoadError::Parse {
			path: path.to_path_buf(),
			source,
		})
	}

	/// Build a catalog from an already parsed document.
	pub fn from_document(document: TsDocument, options: CatalogOptions) -> Result<Self, ParseError> {
		let language = document.language.as_deref().and_then(LocaleTag::parse);
		let source_language = document.source_language.as_deref().and_then(LocaleTag::parse);
		let mut catalog = Self::from_entries(language, document.entries, options)?;
		catalog.source_language = source_language;
		Ok(catalog)
	}

	/// Build a catalog from entries, validating plural forms and uniqueness.
	pub fn from_entries(
		language: Option<LocaleTag>,
		entries: Vec<TranslationEntry>,
		options: CatalogOptions,
	) -> Result<Self, ParseError> {
		let plural_rule = plural_rule_for(language.as_ref());
		validate(&entries, plural_rule)?;

		let mut index: HashMap<String, HashMap<String, Vec<usize>>> = HashMap::new();
		for (i, entry) in entries.iter().enumerate() {
			if entry.state.is_retired() {
				continue;
			}
			index
				.entry(entry.context.clone())
				.or_default()
				.entry(entry.source_text.clone())
				.or_default()
				.push(i);
		}

		let catalog = Self {
			language,
			source_language: None,
			plural_rule,
			options,
			entries,
			index,
		};

		debug!(
			language = %catalog.language.as_ref().map(ToString::to_string).unwrap_or_default(),
			entries = catalog.entries.len(),
			contexts = catalog.index.len(),
			"translation catalog loaded"
		);

		Ok(catalog)
	}

	pub fn language(&self) -> Option<&LocaleTag> {
		self.language.as_ref()
	}

	pub fn source_language(&self) -> Option<&LocaleTag> {
		self.source_language.as_ref()
	}

	pub fn plural_rule(&self) -> PluralRule {
		self.plural_rule
	}

	pub fn options(&self) -> CatalogOptions {
		self.options
	}

	/// All declared entries, retired ones included, in document order.
	pub fn entries(&self) -> &[TranslationEntry] {
		&self.entries
	}

	pub fn len(&self) -> usize {
		self.entries.len()
	}

	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}

	/// Find the entry a lookup would use.
	///
	/// Among the servable entries for `(context, source_text)`:
	/// 1. the first one declared with exactly `comment`, when a comment is given;
	/// 2. else the first uncommented entry that has text;
	/// 3. else the first declared entry that has text;
	/// 4. else the first declared entry.
	///
	/// A missing and an empty comment are the same.
	pub fn lookup(
		&self,
		context: &str,
		source_text: &str,
		comment: Option<&str>,
	) -> Option<&TranslationEntry> {
		let candidates = self.index.get(context)?.get(source_text)?;
		let wanted = comment.filter(|c| !c.is_empty());

		let mut uncommented = None;
		let mut translated = None;
		let mut first = None;
		for entry in candidates.iter().map(|&i| &self.entries[i]) {
			if !self.is_servable(entry) {
				continue;
			}
			if wanted.is_some() && entry.comment.as_deref() == wanted {
				return Some(entry);
			}
			first.get_or_insert(entry);
			if entry.state.translation().is_some_and(|t| !t.is_empty()) {
				translated.get_or_insert(entry);
				if entry.comment.is_none() {
					uncommented.get_or_insert(entry);
				}
			}
		}
		uncommented.or(translated).or(first)
	}

	/// Resolve a message to its translated text.
	///
	/// With `count`, plural entries pick the form given by the catalog's plural
	/// rule, or the last declared form if the rule points past the end. Without
	/// `count` a plural entry yields its first form. Returns `source_text`
	/// when nothing servable is found or the chosen text is empty.
	pub fn resolve<'a>(
		&'a self,
		context: &str,
		source_text: &'a str,
		comment: Option<&str>,
		count: Option<i64>,
	) -> &'a str {
		let Some(translation) = self
			.lookup(context, source_text, comment)
			.and_then(|e| e.state.translation())
		else {
			return source_text;
		};

		let text = match translation {
			Translation::Single(text) => Some(text),
			Translation::Plural(forms) => {
				let index = count.map_or(0, |n| self.plural_rule.form_index(n));
				forms.get(index).or_else(|| forms.last())
			}
		};

		match text {
			Some(text) if !text.is_empty() => text.as_str(),
			_ => source_text,
		}
	}

	/// Resolve a message and substitute its placeholders.
	///
	/// `count` selects the plural form and fills `%n`.
	pub fn translate(
		&self,
		context: &str,
		source_text: &str,
		comment: Option<&str>,
		count: Option<i64>,
		args: &[&str],
	) -> String {
		let text = self.resolve(context, source_text, comment, count);
		substitute(text, args, count)
	}

	/// Per-status counts, as reported by lrelease.
	pub fn stats(&self) -> CatalogStats {
		let mut stats = CatalogStats {
			contexts: self
				.entries
				.iter()
				.map(|e| e.context.as_str())
				.collect::<HashSet<_>>()
				.len(),
			..Default::default()
		};

		for entry in &self.entries {
			match &entry.state {
				EntryState::Active(t) => {
					stats.finished += 1;
					stats.untranslated += usize::from(t.is_empty());
				}
				EntryState::Draft(t) => {
					stats.unfinished += 1;
					stats.untranslated += usize::from(t.is_empty());
				}
				EntryState::Retired(Retirement::Obsolete) => stats.obsolete += 1,
				EntryState::Retired(Retirement::Vanished) => stats.vanished += 1,
			}
			stats.plural += usize::from(entry.is_plural());
		}
		stats
	}

	fn is_servable(&self, entry: &TranslationEntry) -> bool {
		match entry.state {
			EntryState::Active(_) => true,
			EntryState::Draft(_) => self.options.serve_unfinished,
			EntryState::Retired(_) => false,
		}
	}
}

fn plural_rule_for(language: Option<&LocaleTag>) -> PluralRule {
	match language {
		Some(tag) => PluralRule::for_locale(tag).unwrap_or_else(|| {
			warn!(language = %tag, "no plural rule for language, using one/other");
			PluralRule::OneOther
		}),
		None => PluralRule::OneOther,
	}
}

fn validate(entries: &[TranslationEntry], rule: PluralRule) -> Result<(), ParseError> {
	let mut seen = HashSet::new();
	for entry in entries {
		let translation = match entry.state.translation() {
			Some(t) => t,
			None => continue,
		};

		if let Translation::Plural(forms) = translation {
			// An unfinished message with no forms yet is untranslated, not malformed.
			let untranslated_draft = matches!(entry.state, EntryState::Draft(_)) && forms.is_empty();
			if !untranslated_draft && forms.len() < rule.form_count() {
				return Err(ParseError::MissingPluralForms {
					context: entry.context.clone(),
					source_text: entry.source_text.clone(),
					expected: rule.form_count(),
					found: forms.len(),
				});
			}
		}

		let key = (
			entry.context.as_str(),
			entry.source_text.as_str(),
			entry.comment.as_deref(),
		);
		if !seen.insert(key) {
			return Err(ParseError::DuplicateMessage {
				context: entry.context.clone(),
				source_text: entry.source_text.clone(),
				comment: entry.comment.clone(),
			});
		}
	}
	Ok(())
}

/// Entry counts by status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CatalogStats {
	pub contexts: usize,
	pub finished: usize,
	pub unfinished: usize,
	pub obsolete: usize,
	pub vanished: usize,
	/// Plural messages among finished and unfinished entries.
	pub plural: usize,
	/// Finished or unfinished entries without any text.
	pub untranslated: usize,
}

impl CatalogStats {
	/// Entries that may be served.
	pub fn live(&self) -> usize {
		self.finished + self.unfinished
	}
}

impl fmt::Display for CatalogStats {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(
			f,
			"{} translation(s) in {} context(s) ({} finished and {} unfinished), \
			 {} untranslated, {} obsolete, {} vanished",
			self.live(),
			self.contexts,
			self.finished,
			self.unfinished,
			self.untranslated,
			self.obsolete,
			self.vanished
		)
	}
}
