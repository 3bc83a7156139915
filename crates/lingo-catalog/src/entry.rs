// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Translation entries as declared in a TS resource.

use std::fmt;

/// Translated text for one message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Translation {
	/// A message whose wording does not depend on a count.
	Single(String),
	/// Plural forms, ordered by the catalog language's plural rule.
	Plural(Vec<String>),
}

impl Translation {
	pub fn is_plural(&self) -> bool {
		matches!(self, Translation::Plural(_))
	}

	/// True when no text was supplied (an empty string, or only empty forms).
	pub fn is_empty(&self) -> bool {
		match self {
			Translation::Single(text) => text.is_empty(),
			Translation::Plural(forms) => forms.iter().all(String::is_empty),
		}
	}
}

/// Why an entry no longer participates in lookups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Retirement {
	/// The source string was removed from the application.
	Obsolete,
	/// The source string vanished but the translation was kept for reuse.
	Vanished,
}

/// Review state of an entry together with the text it may serve.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryState {
	/// Finished translation.
	Active(Translation),
	/// Unfinished translation; served only when the catalog allows drafts.
	Draft(Translation),
	/// Never served.
	Retired(Retirement),
}

impl EntryState {
	pub fn translation(&self) -> Option<&Translation> {
		match self {
			EntryState::Active(t) | EntryState::Draft(t) => Some(t),
			EntryState::Retired(_) => None,
		}
	}

	pub fn is_retired(&self) -> bool {
		matches!(self, EntryState::Retired(_))
	}
}

/// Line reference of a location hint.
///
/// lupdate writes relative lines (`+3`) when asked for compact files.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineRef {
	Absolute(u32),
	Relative(i32),
}

impl LineRef {
	pub(crate) fn parse(value: &str) -> Option<Self> {
		let value = value.trim();
		if value.starts_with('+') || value.starts_with('-') {
			value.parse().ok().map(LineRef::Relative)
		} else {
			value.parse().ok().map(LineRef::Absolute)
		}
	}
}

impl fmt::Display for LineRef {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			LineRef::Absolute(line) => write!(f, "{line}"),
			LineRef::Relative(delta) => write!(f, "{delta:+}"),
		}
	}
}

/// Where a message was extracted from. Advisory only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
	pub filename: Option<String>,
	pub line: Option<LineRef>,
}

/// One `<message>` of a TS resource.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslationEntry {
	pub context: String,
	pub source_text: String,
	/// Disambiguating comment; `None` when absent or empty.
	pub comment: Option<String>,
	pub state: EntryState,
	pub id: Option<String>,
	pub locations: Vec<Location>,
	pub extra_comment: Option<String>,
	pub translator_comment: Option<String>,
	pub old_source: Option<String>,
	pub old_comment: Option<String>,
}

impl TranslationEntry {
	/// Creates a finished entry with no advisory data.
	pub fn new(
		context: impl Into<String>,
		source_text: impl Into<String>,
		translation: Translation,
	) -> Self {
		Self {
			context: context.into(),
			source_text: source_text.into(),
			comment: None,
			state: EntryState::Active(translation),
			id: None,
			locations: Vec::new(),
			extra_comment: None,
			translator_comment: None,
			old_source: None,
			old_comment: None,
		}
	}

	pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
		let comment = comment.into();
		self.comment = (!comment.is_empty()).then_some(comment);
		self
	}

	pub fn with_state(mut self, state: EntryState) -> Self {
		self.state = state;
		self
	}

	pub fn is_plural(&self) -> bool {
		self.state.translation().is_some_and(Translation::is_plural)
	}
}
