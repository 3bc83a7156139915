// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Locating translation files on disk.

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::catalog::{Catalog, CatalogOptions};
use crate::error::LoadError;
use crate::locale::LocaleTag;

/// Loads `{prefix}_{locale}.ts` files from a translations directory.
#[derive(Debug, Clone)]
pub struct CatalogLoader {
	dir: PathBuf,
	prefix: String,
	options: CatalogOptions,
}

impl CatalogLoader {
	pub fn new(dir: impl Into<PathBuf>, prefix: impl Into<String>) -> Self {
		Self {
			dir: dir.into(),
			prefix: prefix.into(),
			options: CatalogOptions::default(),
		}
	}

	pub fn with_options(mut self, options: CatalogOptions) -> Self {
		self.options = options;
		self
	}

	pub fn dir(&self) -> &Path {
		&self.dir
	}

	/// File paths tried for `locale`, in order.
	pub fn candidates(&self, locale: &LocaleTag) -> Vec<PathBuf> {
		locale
			.fallback_chain()
			.into_iter()
			.map(|tag| self.dir.join(format!("{}_{}.ts", self.prefix, tag)))
			.collect()
	}

	/// Load the most specific existing file for `locale`.
	pub fn load(&self, locale: &LocaleTag) -> Result<Catalog, LoadError> {
		for path in self.candidates(locale) {
			if !path.is_file() {
				debug!(path = %path.display(), "translation file not found, trying next");
				continue;
			}
			debug!(path = %path.display(), locale = %locale, "loading translation file");
			return Catalog::load_file(&path, self.options);
		}

		Err(LoadError::NotFound {
			locale: locale.to_string(),
			dir: self.dir.clone(),
		})
	}
}
