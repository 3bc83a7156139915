// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Placeholder substitution for resolved messages.

/// Replace `%1`..`%99` with positional arguments and `%n`/`%Ln` with `count`.
///
/// The text is scanned once, left to right; substituted values are never
/// rescanned. Placeholders without a value (an index past the end of `args`,
/// `%n` without a count, `%0`) are copied through unchanged. Placeholders take
/// up to two digits, so `%10` is the tenth argument.
///
/// # Example
///
/// ```
/// use lingo_catalog::substitute;
///
/// let text = substitute("Gjenopprett %n notater fra %1?", &["i går"], Some(3));
/// assert_eq!(text, "Gjenopprett 3 notater fra i går?");
///
/// assert_eq!(substitute("%1 og %3", &["a", "b"], None), "a og %3");
/// ```
pub fn substitute(text: &str, args: &[&str], count: Option<i64>) -> String {
	let bytes = text.as_bytes();
	let mut out = String::with_capacity(text.len());
	let mut copied = 0;
	let mut i = 0;

	while i < bytes.len() {
		if bytes[i] != b'%' {
			i += 1;
			continue;
		}

		let (len, value) = placeholder(&bytes[i + 1..], args, count);
		match value {
			Some(value) => {
				out.push_str(&text[copied..i]);
				out.push_str(&value);
				i += 1 + len;
				copied = i;
			}
			None => i += 1 + len,
		}
	}

	out.push_str(&text[copied..]);
	out
}

/// Inspect the bytes after a `%`. Returns how many of them belong to the
/// placeholder and the replacement, if there is one.
fn placeholder(rest: &[u8], args: &[&str], count: Option<i64>) -> (usize, Option<String>) {
	match rest {
		[b'n', ..] => (1, count.map(|n| n.to_string())),
		[b'L', b'n', ..] => (2, count.map(|n| n.to_string())),
		[d @ b'1'..=b'9', ..] => {
			let mut index = usize::from(d - b'0');
			let mut len = 1;
			if let Some(d2 @ b'0'..=b'9') = rest.get(1) {
				index = index * 10 + usize::from(d2 - b'0');
				len = 2;
			}
			(len, args.get(index - 1).map(|a| (*a).to_string()))
		}
		_ => (0, None),
	}
}
