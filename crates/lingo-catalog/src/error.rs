// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Catalog error types.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while turning a TS resource into a [`Catalog`](crate::Catalog).
///
/// A load either yields a complete catalog or one of these; there is no
/// partially-populated result.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
	/// The XML itself is malformed (bad syntax, mismatched end tag, bad entity).
	#[error("malformed XML at byte {position}: {message}")]
	Xml { position: usize, message: String },

	/// An element appeared where the TS format does not allow it.
	#[error("unexpected <{element}> at byte {position}: {message}")]
	Structure {
		element: String,
		position: usize,
		message: String,
	},

	/// The document ended while an element was still open.
	#[error("unbalanced document: <{0}> is never closed")]
	Unclosed(String),

	/// The document has no `<TS>` root element.
	#[error("document has no <TS> root element")]
	MissingRoot,

	/// A required child element is absent.
	#[error("<{parent}> ending at byte {position} has no <{element}>")]
	MissingElement {
		parent: &'static str,
		element: &'static str,
		position: usize,
	},

	/// An attribute carries a value the format does not define.
	#[error("invalid value '{value}' for attribute '{attribute}' at byte {position}")]
	InvalidAttribute {
		attribute: String,
		value: String,
		position: usize,
	},

	/// A plural message declares fewer forms than the catalog language needs.
	#[error(
		"message '{source_text}' in context '{context}' declares {found} plural form(s), \
		 language requires {expected}"
	)]
	MissingPluralForms {
		context: String,
		source_text: String,
		expected: usize,
		found: usize,
	},

	/// Two live messages share context, source text and comment.
	#[error("duplicate message '{source_text}' in context '{context}'{}", comment_suffix(.comment))]
	DuplicateMessage {
		context: String,
		source_text: String,
		comment: Option<String>,
	},
}

fn comment_suffix(comment: &Option<String>) -> String {
	match comment {
		Some(comment) => format!(" (comment '{comment}')"),
		None => String::new(),
	}
}

impl ParseError {
	pub(crate) fn xml(position: usize, err: impl std::fmt::Display) -> Self {
		Self::Xml {
			position,
			message: err.to_string(),
		}
	}

	pub(crate) fn structure(element: &str, position: usize, message: impl Into<String>) -> Self {
		Self::Structure {
			element: element.to_string(),
			position,
			message: message.into(),
		}
	}

	pub(crate) fn invalid_attribute(attribute: &str, value: &str, position: usize) -> Self {
		Self::InvalidAttribute {
			attribute: attribute.to_string(),
			value: value.to_string(),
			position,
		}
	}
}

/// Errors raised while locating and reading a catalog from disk.
#[derive(Debug, Error)]
pub enum LoadError {
	#[error("failed to read {path}: {source}")]
	Io {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	#[error("failed to parse {path}: {source}")]
	Parse {
		path: PathBuf,
		#[source]
		source: ParseError,
	},

	#[error("no translation file for locale '{locale}' in {dir}")]
	NotFound { locale: String, dir: PathBuf },
}

/// Errors raised while assembling [`CatalogConfig`](crate::CatalogConfig).
#[derive(Debug, Error)]
pub enum ConfigError {
	/// Config file exists but could not be read
	#[error("failed to read config file {path}: {source}")]
	FileRead {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	/// TOML parsing error
	#[error("TOML parse error in {path}: {source}")]
	TomlParse {
		path: PathBuf,
		#[source]
		source: toml::de::Error,
	},

	/// Invalid value
	#[error("invalid value for {field}: {message}")]
	InvalidValue { field: String, message: String },
}

impl ConfigError {
	pub fn invalid_value(field: impl Into<String>, message: impl Into<String>) -> Self {
		Self::InvalidValue {
			field: field.into(),
			message: message.into(),
		}
	}
}
