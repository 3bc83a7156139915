// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Runtime message catalogs for Qt Linguist `.ts` translation files.
//!
//! This crate provides:
//! - A TS parser that keeps translation status (finished, unfinished, obsolete, vanished)
//! - Lookup by context, source text and disambiguation comment
//! - Count-dependent plural forms following Qt's numerus rules
//! - `%1`..`%99` and `%n` placeholder substitution
//! - A process-wide catalog that is swapped whole on locale change
//!
//! Lookups never fail. Anything that cannot be served resolves to the
//! source text it was asked for.
//!
//! # Example
//!
//! ```
//! use lingo_catalog::{install, tr, tr_n, Catalog, CatalogOptions};
//!
//! let catalog = Catalog::load(
//!     r#"<TS version="2.1" language="sv">
//!          <context>
//!            <name>MainWindow</name>
//!            <message>
//!              <source>Quit</source>
//!              <translation>Avsluta</translation>
//!            </message>
//!            <message numerus="yes">
//!              <source>%n note(s)</source>
//!              <translation>
//!                <numerusform>%n anteckning</numerusform>
//!                <numerusform>%n anteckningar</numerusform>
//!              </translation>
//!            </message>
//!          </context>
//!        </TS>"#,
//!     CatalogOptions::default(),
//! )?;
//!
//! install(catalog);
//! assert_eq!(tr("MainWindow", "Quit"), "Avsluta");
//! assert_eq!(tr_n("MainWindow", "%n note(s)", 3), "3 anteckningar");
//! # Ok::<(), lingo_catalog::ParseError>(())
//! ```

pub mod active;
pub mod catalog;
pub mod config;
pub mod entry;
pub mod error;
pub mod format;
pub mod loader;
pub mod locale;
pub mod plural;
pub mod ts;

pub use active::{active, install, tr, tr_n, tr_with, CatalogHandle};
pub use catalog::{Catalog, CatalogOptions, CatalogStats};
pub use config::{load_config, CatalogConfig};
pub use entry::{EntryState, LineRef, Location, Retirement, Translation, TranslationEntry};
pub use error::{ConfigError, LoadError, ParseError};
pub use format::substitute;
pub use loader::CatalogLoader;
pub use locale::{system_locale, InvalidLocale, LocaleTag, DEFAULT_LOCALE};
pub use plural::PluralRule;
pub use ts::TsDocument;
