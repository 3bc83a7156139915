// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Plural ("numerus") form selection.
//!
//! TS files store plural translations as an ordered list of forms. The number
//! of forms and the mapping from a count to a form index are fixed per
//! language by the Linguist tables, which do not always agree with CLDR
//! (Russian has three forms here, not four).

use crate::locale::LocaleTag;

/// Plural rule families used by TS catalogs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PluralRule {
	/// One form for every count.
	Single,
	/// `n == 1` and everything else.
	OneOther,
	/// `n <= 1` and everything else.
	French,
	/// Russian-style: 1/21/31…, 2-4/22-24…, everything else.
	Slavic,
	/// 1, 2-4, everything else.
	Czech,
	/// 1, 2-4/22-24 (not 12-14), everything else.
	Polish,
	Lithuanian,
	Latvian,
	Romanian,
	/// 1, 2, everything else.
	Irish,
	/// 1/101…, 2/102…, 3-4/103-104…, everything else.
	Slovenian,
	/// 0, 1, 2, 3-10, 11-99, everything else (modulo 100).
	Arabic,
}

impl PluralRule {
	/// Rule for a catalog language, or `None` when the language is unknown.
	pub fn for_locale(locale: &LocaleTag) -> Option<Self> {
		let rule = match (locale.language(), locale.region()) {
			("pt", Some("BR")) => PluralRule::French,
			("ja" | "zh" | "ko" | "vi" | "th" | "id" | "ms" | "tr" | "fa" | "ka" | "my"
			| "lo" | "km" | "jv" | "su", _) => PluralRule::Single,
			("en" | "nb" | "nn" | "no" | "da" | "sv" | "de" | "nl" | "es" | "it" | "pt"
			| "el" | "fi" | "et" | "hu" | "ca" | "bg" | "eu" | "eo" | "gl" | "he" | "af"
			| "fy" | "fo" | "is" | "sq" | "hi" | "bn" | "ur" | "ta" | "te" | "ml" | "mr"
			| "sw" | "mn" | "az" | "kk" | "ky" | "uz", _) => PluralRule::OneOther,
			("fr" | "oc" | "fil" | "tl" | "br" | "ln", _) => PluralRule::French,
			("ru" | "uk" | "be" | "sr" | "hr" | "bs", _) => PluralRule::Slavic,
			("cs" | "sk", _) => PluralRule::Czech,
			("pl", _) => PluralRule::Polish,
			("lt", _) => PluralRule::Lithuanian,
			("lv", _) => PluralRule::Latvian,
			("ro" | "mo", _) => PluralRule::Romanian,
			("ga", _) => PluralRule::Irish,
			("sl", _) => PluralRule::Slovenian,
			("ar", _) => PluralRule::Arabic,
			_ => return None,
		};
		Some(rule)
	}

	/// Number of forms a plural message must declare.
	pub fn form_count(self) -> usize {
		match self {
			PluralRule::Single => 1,
			PluralRule::OneOther | PluralRule::French => 2,
			PluralRule::Slavic
			| PluralRule::Czech
			| PluralRule::Polish
			| PluralRule::Lithuanian
			| PluralRule::Latvian
			| PluralRule::Romanian
			| PluralRule::Irish => 3,
			PluralRule::Slovenian => 4,
			PluralRule::Arabic => 6,
		}
	}

	/// Index of the form to use for `count`. Negative counts use their
	/// magnitude. Always less than [`form_count`](Self::form_count).
	pub fn form_index(self, count: i64) -> usize {
		let n = count.unsigned_abs();
		let n10 = n % 10;
		let n100 = n % 100;
		match self {
			PluralRule::Single => 0,
			PluralRule::OneOther => usize::from(n != 1),
			PluralRule::French => usize::from(n > 1),
			PluralRule::Slavic => {
				if n10 == 1 && n100 != 11 {
					0
				} else if (2..=4).contains(&n10) && !(12..=14).contains(&n100) {
					1
				} else {
					2
				}
			}
			PluralRule::Czech => match n {
				1 => 0,
				2..=4 => 1,
				_ => 2,
			},
			PluralRule::Polish => {
				if n == 1 {
					0
				} else if (2..=4).contains(&n10) && !(12..=14).contains(&n100) {
					1
				} else {
					2
				}
			}
			PluralRule::Lithuanian => {
				if n10 == 1 && n100 != 11 {
					0
				} else if n10 >= 2 && !(10..20).contains(&n100) {
					1
				} else {
					2
				}
			}
			PluralRule::Latvian => {
				if n10 == 1 && n100 != 11 {
					0
				} else if n != 0 {
					1
				} else {
					2
				}
			}
			PluralRule::Romanian => {
				if n == 1 {
					0
				} else if n == 0 || (1..20).contains(&n100) {
					1
				} else {
					2
				}
			}
			PluralRule::Irish => match n {
				1 => 0,
				2 => 1,
				_ => 2,
			},
			PluralRule::Slovenian => match n100 {
				1 => 0,
				2 => 1,
				3 | 4 => 2,
				_ => 3,
			},
			PluralRule::Arabic => match (n, n100) {
				(0, _) => 0,
				(1, _) => 1,
				(2, _) => 2,
				(_, 3..=10) => 3,
				(_, 11..=99) => 4,
				_ => 5,
			},
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use proptest::prelude::*;

	fn rule(locale: &str) -> Option<PluralRule> {
		PluralRule::for_locale(&LocaleTag::parse(locale).unwrap())
	}

	#[test]
	fn test_norwegian_is_two_forms() {
		let nb = rule("nb_NO").unwrap();
		assert_eq!(nb, PluralRule::OneOther);
		assert_eq!(nb.form_count(), 2);
		assert_eq!(nb.form_index(1), 0);
		assert_eq!(nb.form_index(0), 1);
		assert_eq!(nb.form_index(5), 1);
	}

	#[test]
	fn test_brazilian_portuguese_differs_from_portuguese() {
		assert_eq!(rule("pt_BR"), Some(PluralRule::French));
		assert_eq!(rule("pt_PT"), Some(PluralRule::OneOther));
	}

	#[test]
	fn test_unknown_language() {
		assert_eq!(rule("xx"), None);
	}

	#[test]
	fn test_french_zero_is_singular() {
		let fr = rule("fr").unwrap();
		assert_eq!(fr.form_index(0), 0);
		assert_eq!(fr.form_index(1), 0);
		assert_eq!(fr.form_index(2), 1);
	}

	#[test]
	fn test_russian_forms() {
		let ru = rule("ru").unwrap();
		assert_eq!(ru.form_index(1), 0);
		assert_eq!(ru.form_index(21), 0);
		assert_eq!(ru.form_index(11), 2);
		assert_eq!(ru.form_index(3), 1);
		assert_eq!(ru.form_index(23), 1);
		assert_eq!(ru.form_index(13), 2);
		assert_eq!(ru.form_index(5), 2);
		assert_eq!(ru.form_index(0), 2);
	}

	#[test]
	fn test_polish_forms() {
		let pl = rule("pl").unwrap();
		assert_eq!(pl.form_index(1), 0);
		assert_eq!(pl.form_index(21), 2);
		assert_eq!(pl.form_index(22), 1);
		assert_eq!(pl.form_index(12), 2);
	}

	#[test]
	fn test_arabic_forms() {
		let ar = rule("ar").unwrap();
		let indices: Vec<usize> = [0, 1, 2, 3, 10, 11, 99, 100, 102, 103]
			.into_iter()
			.map(|n| ar.form_index(n))
			.collect();
		assert_eq!(indices, vec![0, 1, 2, 3, 3, 4, 4, 5, 5, 3]);
	}

	#[test]
	fn test_slovenian_forms() {
		let sl = rule("sl").unwrap();
		assert_eq!(sl.form_index(101), 0);
		assert_eq!(sl.form_index(102), 1);
		assert_eq!(sl.form_index(104), 2);
		assert_eq!(sl.form_index(5), 3);
	}

	#[test]
	fn test_negative_counts_use_magnitude() {
		let nb = rule("nb").unwrap();
		assert_eq!(nb.form_index(-1), 0);
		assert_eq!(nb.form_index(-3), 1);
	}

	const ALL: [PluralRule; 12] = [
		PluralRule::Single,
		PluralRule::OneOther,
		PluralRule::French,
		PluralRule::Slavic,
		PluralRule::Czech,
		PluralRule::Polish,
		PluralRule::Lithuanian,
		PluralRule::Latvian,
		PluralRule::Romanian,
		PluralRule::Irish,
		PluralRule::Slovenian,
		PluralRule::Arabic,
	];

	proptest! {
		/// Every count maps to a declared form.
		#[test]
		fn form_index_within_form_count(idx in 0usize..12, n: i64) {
			let rule = ALL[idx];
			prop_assert!(rule.form_index(n) < rule.form_count());
		}

		/// Two-form Germanic rule: singular only for one.
		#[test]
		fn one_other_singular_only_for_one(n in 2i64..1_000_000) {
			prop_assert_eq!(PluralRule::OneOther.form_index(n), 1);
		}
	}
}
