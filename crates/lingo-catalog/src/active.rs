// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! The catalog currently used by the application.
//!
//! UI code reaches translations through [`active()`] rather than passing a
//! catalog around. A locale switch loads a complete new catalog first and then
//! replaces the shared pointer in one step, so a reader holding a
//! [`snapshot`](CatalogHandle::snapshot) always sees a single locale.

use std::sync::{Arc, PoisonError, RwLock};

use once_cell::sync::Lazy;
use tracing::{info, warn};

use crate::catalog::Catalog;
use crate::error::LoadError;
use crate::loader::CatalogLoader;
use crate::locale::LocaleTag;

static ACTIVE: Lazy<CatalogHandle> = Lazy::new(CatalogHandle::empty);

/// Shared, swappable reference to a catalog.
///
/// Clones refer to the same slot. Independent handles can be created for
/// tests or for components that keep their own locale.
#[derive(Debug, Clone)]
pub struct CatalogHandle {
	slot: Arc<RwLock<Arc<Catalog>>>,
}

impl Default for CatalogHandle {
	fn default() -> Self {
		Self::empty()
	}
}

impl CatalogHandle {
	pub fn new(catalog: Catalog) -> Self {
		Self {
			slot: Arc::new(RwLock::new(Arc::new(catalog))),
		}
	}

	pub fn empty() -> Self {
		Self::new(Catalog::empty())
	}

	/// The current catalog. Stays valid after later swaps.
	pub fn snapshot(&self) -> Arc<Catalog> {
		// The guarded value is a pointer that is only ever replaced whole, so
		// a poisoned lock still holds a usable catalog.
		let guard = self.slot.read().unwrap_or_else(PoisonError::into_inner);
		Arc::clone(&guard)
	}

	/// Make `catalog` current and return the one it replaces.
	pub fn replace(&self, catalog: Catalog) -> Arc<Catalog> {
		let next = Arc::new(catalog);
		let language = next
			.language()
			.map(ToString::to_string)
			.unwrap_or_else(|| "none".to_string());
		let previous = {
			let mut guard = self.slot.write().unwrap_or_else(PoisonError::into_inner);
			std::mem::replace(&mut *guard, next)
		};
		info!(language = %language, "active translation catalog replaced");
		previous
	}

	/// Load the catalog for `locale` and make it current.
	///
	/// On failure the current catalog stays in place and the error is
	/// returned to the caller.
	pub fn switch_locale(&self, loader: &CatalogLoader, locale: &LocaleTag) -> Result<(), LoadError> {
		match loader.load(locale) {
			Ok(catalog) => {
				self.replace(catalog);
				Ok(())
			}
			Err(err) => {
				warn!(locale = %locale, error = %err, "locale switch failed, keeping current catalog");
				Err(err)
			}
		}
	}

	pub fn tr(&self, context: &str, source_text: &str) -> String {
		self.snapshot().resolve(context, source_text, None, None).to_string()
	}

	pub fn tr_n(&self, context: &str, source_text: &str, count: i64) -> String {
		self.snapshot()
			.translate(context, source_text, None, Some(count), &[])
	}
}

/// Process-wide handle used by UI code.
pub fn active() -> &'static CatalogHandle {
	&ACTIVE
}

/// Replace the process-wide catalog.
pub fn install(catalog: Catalog) -> Arc<Catalog> {
	active().replace(catalog)
}

/// Translate through the process-wide catalog.
pub fn tr(context: &str, source_text: &str) -> String {
	active().tr(context, source_text)
}

/// Translate a count-dependent message through the process-wide catalog,
/// filling `%n`.
pub fn tr_n(context: &str, source_text: &str, count: i64) -> String {
	active().tr_n(context, source_text, count)
}

/// Full lookup through the process-wide catalog.
pub fn tr_with(
	context: &str,
	source_text: &str,
	comment: Option<&str>,
	count: Option<i64>,
	args: &[&str],
) -> String {
	active()
		.snapshot()
		.translate(context, source_text, comment, count, args)
}

#[cfg(test)]
mod tests {
	use std::thread;

	use super::*;
	use crate::catalog::CatalogOptions;
	use crate::entry::{Translation, TranslationEntry};

	fn catalog(language: &str, about: &str, quit: &str) -> Catalog {
		Catalog::from_entries(
			LocaleTag::parse(language),
			vec![
				TranslationEntry::new("MainWindow", "About", Translation::Single(about.into())),
				TranslationEntry::new("MainWindow", "Quit", Translation::Single(quit.into())),
			],
			CatalogOptions::default(),
		)
		.unwrap()
	}

	#[test]
	fn test_empty_handle_returns_source() {
		let handle = CatalogHandle::empty();
		assert_eq!(handle.tr("MainWindow", "About"), "About");
		assert_eq!(handle.tr_n("MainWindow", "%n note(s)", 2), "2 note(s)");
	}

	#[test]
	fn test_replace_returns_previous() {
		let handle = CatalogHandle::new(catalog("nb", "Om", "Avslutt"));
		let previous = handle.replace(catalog("sv", "Om", "Avsluta"));
		assert_eq!(previous.resolve("MainWindow", "Quit", None, None), "Avslutt");
		assert_eq!(handle.tr("MainWindow", "Quit"), "Avsluta");
	}

	#[test]
	fn test_snapshot_survives_replace() {
		let handle = CatalogHandle::new(catalog("nb", "Om", "Avslutt"));
		let snapshot = handle.snapshot();
		handle.replace(catalog("de", "Über", "Beenden"));
		assert_eq!(snapshot.resolve("MainWindow", "About", None, None), "Om");
		assert_eq!(handle.tr("MainWindow", "About"), "Über");
	}

	#[test]
	fn test_clones_share_slot() {
		let handle = CatalogHandle::empty();
		let clone = handle.clone();
		clone.replace(catalog("nb", "Om", "Avslutt"));
		assert_eq!(handle.tr("MainWindow", "Quit"), "Avslutt");
	}

	#[test]
	fn test_readers_never_see_mixed_locales() {
		let handle = CatalogHandle::new(catalog("nb", "Om", "Avslutt"));
		let nb = ("Om".to_string(), "Avslutt".to_string());
		let de = ("Über".to_string(), "Beenden".to_string());

		let readers: Vec<_> = (0..4)
			.map(|_| {
				let handle = handle.clone();
				let (nb, de) = (nb.clone(), de.clone());
				thread::spawn(move || {
					for _ in 0..2_000 {
						let catalog = handle.snapshot();
						let pair = (
							catalog.resolve("MainWindow", "About", None, None).to_string(),
							catalog.resolve("MainWindow", "Quit", None, None).to_string(),
						);
						assert!(pair == nb || pair == de, "mixed locales: {pair:?}");
					}
				})
			})
			.collect();

		for i in 0..200 {
			if i % 2 == 0 {
				handle.replace(catalog("de", "Über", "Beenden"));
			} else {
				handle.replace(catalog("nb", "Om", "Avslutt"));
			}
		}

		for reader in readers {
			reader.join().unwrap();
		}
	}
}
