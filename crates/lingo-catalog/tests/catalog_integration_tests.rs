// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Integration tests for loading TS files from disk.
//!
//! Tests cover:
//! - Exact, comment-disambiguated and missing lookups
//! - Plural selection and `%n` substitution
//! - Unfinished, obsolete and vanished entries
//! - Load failures (missing plural form, missing file)
//! - Locale fallback through `CatalogLoader`

use std::path::PathBuf;

use lingo_catalog::{
	Catalog, CatalogLoader, CatalogOptions, CatalogStats, EntryState, LineRef, LoadError,
	LocaleTag, ParseError, PluralRule, Retirement,
};
use proptest::prelude::*;

const RESTORE: &str = "Restore <strong>%n</strong> selected note(s)?";

fn fixtures() -> PathBuf {
	PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures")
}

fn load_nb(options: CatalogOptions) -> Catalog {
	Catalog::load_file(fixtures().join("QOwnNotes_nb_NO.ts"), options).unwrap()
}

// ============================================================================
// Lookup
// ============================================================================

#[test]
fn test_resolve_declared_translation() {
	let catalog = load_nb(CatalogOptions::default());
	assert_eq!(catalog.language().map(ToString::to_string).as_deref(), Some("nb_NO"));
	assert_eq!(catalog.source_language().map(ToString::to_string).as_deref(), Some("en_US"));
	assert_eq!(catalog.plural_rule(), PluralRule::OneOther);
	assert_eq!(
		catalog.resolve("AboutDialog", "About QOwnNotes", None, None),
		"Om QOwnNotes"
	);
}

#[test]
fn test_resolve_missing_returns_source() {
	let catalog = load_nb(CatalogOptions::default());
	assert_eq!(catalog.resolve("AboutDialog", "Foo Bar", None, None), "Foo Bar");
	assert_eq!(catalog.resolve("NoSuchContext", "About QOwnNotes", None, None), "About QOwnNotes");
}

#[test]
fn test_resolve_by_comment() {
	let catalog = load_nb(CatalogOptions::default());
	assert_eq!(catalog.resolve("MainWindow", "Copy", Some("noun"), None), "Kopi");
	assert_eq!(catalog.resolve("MainWindow", "Copy", Some("verb"), None), "Kopier");
	// Ambiguous without a comment: first declared wins.
	assert_eq!(catalog.resolve("MainWindow", "Copy", None, None), "Kopi");
	assert_eq!(catalog.resolve("MainWindow", "Copy", Some("adjective"), None), "Kopi");
}

#[test]
fn test_untranslated_sibling_does_not_hide_translation() {
	let catalog = Catalog::load(
		r#"<TS version="2.1" language="nb_NO">
<context>
    <name>MainWindow</name>
    <message>
        <source>Copy</source>
        <comment>noun</comment>
        <translation type="unfinished"></translation>
    </message>
    <message>
        <source>Copy</source>
        <comment>verb</comment>
        <translation>Kopier</translation>
    </message>
</context>
</TS>"#,
		CatalogOptions::default(),
	)
	.unwrap();
	assert_eq!(catalog.resolve("MainWindow", "Copy", None, None), "Kopier");
	assert_eq!(catalog.resolve("MainWindow", "Copy", Some("verb"), None), "Kopier");
}

#[test]
fn test_second_root_fails_load() {
	let err = Catalog::load(
		r#"<TS language="nb_NO"><context><name>C</name><message><source>A</source><translation>B</translation></message></context></TS><TS language="ru"></TS>"#,
		CatalogOptions::default(),
	)
	.unwrap_err();
	assert!(matches!(err, ParseError::Structure { .. }));
}

#[test]
fn test_plural_forms_and_substitution() {
	let catalog = load_nb(CatalogOptions::default());
	assert_eq!(
		catalog.resolve("LocalTrashDialog", RESTORE, None, Some(1)),
		"Gjenopprett <strong>%n</strong> valgt notat?"
	);
	assert_eq!(
		catalog.resolve("LocalTrashDialog", RESTORE, None, Some(5)),
		"Gjenopprett <strong>%n</strong> valgte notater?"
	);
	assert_eq!(
		catalog.translate("LocalTrashDialog", RESTORE, None, Some(5), &[]),
		"Gjenopprett <strong>5</strong> valgte notater?"
	);
	assert_eq!(
		catalog.translate("LocalTrashDialog", RESTORE, None, Some(1), &[]),
		"Gjenopprett <strong>1</strong> valgt notat?"
	);
}

#[test]
fn test_positional_arguments() {
	let catalog = load_nb(CatalogOptions::default());
	assert_eq!(
		catalog.translate("MainWindow", "%1 of %2 notes selected", None, None, &["3", "12"]),
		"3 av 12 notater valgt"
	);
	assert_eq!(
		catalog.translate("AboutDialog", "Version %1 (build %2)", None, None, &["24.1.0"]),
		"Versjon 24.1.0 (bygg %2)"
	);
}

// ============================================================================
// Status handling
// ============================================================================

#[test]
fn test_retired_entries_never_served() {
	let catalog = load_nb(CatalogOptions::default());
	assert_eq!(
		catalog.resolve("LocalTrashDialog", "stored %n note(s) to disk", None, Some(2)),
		"stored %n note(s) to disk"
	);
	assert_eq!(
		catalog.resolve("MainWindow", "Sync with ownCloud", None, None),
		"Sync with ownCloud"
	);

	let retired: Vec<_> = catalog
		.entries()
		.iter()
		.filter_map(|e| match e.state {
			EntryState::Retired(r) => Some((e.source_text.as_str(), r)),
			_ => None,
		})
		.collect();
	assert_eq!(
		retired,
		vec![
			("stored %n note(s) to disk", Retirement::Obsolete),
			("Sync with ownCloud", Retirement::Vanished),
		]
	);
}

#[test]
fn test_unfinished_policy() {
	let serving = load_nb(CatalogOptions {
		serve_unfinished: true,
	});
	assert_eq!(serving.resolve("MainWindow", "Find in notes", None, None), "Finn i notater");

	let strict = load_nb(CatalogOptions {
		serve_unfinished: false,
	});
	assert_eq!(strict.resolve("MainWindow", "Find in notes", None, None), "Find in notes");
}

#[test]
fn test_untranslated_entries_fall_back() {
	let catalog = load_nb(CatalogOptions::default());
	assert_eq!(catalog.resolve("MainWindow", "Note folder", None, None), "Note folder");
	let remove = "Remove <strong>%n</strong> selected note(s) permanently?";
	assert_eq!(
		catalog.translate("LocalTrashDialog", remove, None, Some(4), &[]),
		"Remove <strong>4</strong> selected note(s) permanently?"
	);
}

#[test]
fn test_advisory_data_kept() {
	let catalog = load_nb(CatalogOptions::default());
	let about = catalog
		.lookup("AboutDialog", "About QOwnNotes", None)
		.unwrap();
	assert_eq!(about.locations.len(), 2);
	assert_eq!(about.locations[0].filename.as_deref(), Some("../dialogs/aboutdialog.ui"));
	assert_eq!(about.locations[1].line, Some(LineRef::Relative(12)));

	let version = catalog
		.lookup("AboutDialog", "Version %1 (build %2)", None)
		.unwrap();
	assert_eq!(
		version.extra_comment.as_deref(),
		Some("Shown below the application name")
	);
}

#[test]
fn test_stats() {
	let catalog = load_nb(CatalogOptions::default());
	assert_eq!(
		catalog.stats(),
		CatalogStats {
			contexts: 3,
			finished: 6,
			unfinished: 3,
			obsolete: 1,
			vanished: 1,
			plural: 2,
			untranslated: 2,
		}
	);
}

// ============================================================================
// Load failures
// ============================================================================

#[test]
fn test_missing_plural_form_fails_load() {
	let err = Catalog::load_file(fixtures().join("missing_plural_form.ts"), CatalogOptions::default())
		.unwrap_err();
	match err {
		LoadError::Parse {
			source: ParseError::MissingPluralForms { expected, found, .. },
			..
		} => {
			assert_eq!(expected, 3);
			assert_eq!(found, 2);
		}
		other => panic!("expected missing plural forms, got {other:?}"),
	}
}

#[test]
fn test_missing_file() {
	let err = Catalog::load_file(fixtures().join("QOwnNotes_xx.ts"), CatalogOptions::default())
		.unwrap_err();
	assert!(matches!(err, LoadError::Io { .. }));
}

#[test]
fn test_loader_region_fallback() {
	let loader = CatalogLoader::new(fixtures(), "QOwnNotes");
	let catalog = loader.load(&LocaleTag::parse("sv_FI").unwrap()).unwrap();
	assert_eq!(
		catalog.resolve("AboutDialog", "About QOwnNotes", None, None),
		"Om QOwnNotes (sv)"
	);

	let catalog = loader.load(&LocaleTag::parse("nb-NO.UTF-8").unwrap()).unwrap();
	assert_eq!(catalog.resolve("MainWindow", "Copy", Some("verb"), None), "Kopier");
}

#[test]
fn test_loader_honours_options() {
	let loader = CatalogLoader::new(fixtures(), "QOwnNotes").with_options(CatalogOptions {
		serve_unfinished: false,
	});
	let catalog = loader.load(&LocaleTag::parse("nb_NO").unwrap()).unwrap();
	assert!(!catalog.options().serve_unfinished);
	assert_eq!(catalog.resolve("MainWindow", "Find in notes", None, None), "Find in notes");
}

proptest! {
	#[test]
	fn prop_plural_selection_follows_count(n in 0i64..10_000) {
		let catalog = load_nb(CatalogOptions::default());
		let text = catalog.translate("LocalTrashDialog", RESTORE, None, Some(n), &[]);
		let expected = if n == 1 {
			"Gjenopprett <strong>1</strong> valgt notat?".to_string()
		} else {
			format!("Gjenopprett <strong>{n}</strong> valgte notater?")
		};
		prop_assert_eq!(text, expected);
	}

	#[test]
	fn prop_unknown_source_is_identity(source in "[A-Za-z ]{1,40}") {
		let catalog = load_nb(CatalogOptions::default());
		prop_assume!(catalog.lookup("Unknown", &source, None).is_none());
		prop_assert_eq!(catalog.resolve("Unknown", &source, None, None), source.as_str());
	}
}
