// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Streaming reader for Qt Linguist TS documents.
//!
//! ```text
//! <TS version="2.1" language="nb_NO" sourcelanguage="en_US">
//!   <context>
//!     <name>LocalTrashDialog</name>
//!     <message numerus="yes">
//!       <location filename="../dialogs/localtrashdialog.cpp" line="142"/>
//!       <source>Restore <strong>%n</strong> selected note(s)?</source>
//!       <translation>
//!         <numerusform>...</numerusform>
//!         <numerusform>...</numerusform>
//!       </translation>
//!     </message>
//!   </context>
//! </TS>
//! ```
//!
//! Elements outside this vocabulary (`defaultcodec`, `dependencies`,
//! `extra-*`, …) are skipped together with their children.

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use tracing::trace;

use crate::entry::{EntryState, LineRef, Location, Retirement, Translation, TranslationEntry};
use crate::error::ParseError;

/// Everything read from a TS document, before any catalog validation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TsDocument {
	pub version: Option<String>,
	/// Raw `language` attribute (`nb_NO`).
	pub language: Option<String>,
	/// Raw `sourcelanguage` attribute.
	pub source_language: Option<String>,
	/// Messages in document order.
	pub entries: Vec<TranslationEntry>,
}

/// Parse a TS document.
pub fn parse(input: &str) -> Result<TsDocument, ParseError> {
	let mut reader = Reader::from_str(input);
	reader.trim_text(false);
	let mut parser = Parser::default();

	loop {
		let event = match reader.read_event() {
			Ok(event) => event,
			Err(err) => return Err(ParseError::xml(reader.buffer_position(), err)),
		};
		let position = reader.buffer_position();

		match event {
			Event::Start(e) => parser.start(&e, position, false)?,
			Event::Empty(e) => parser.start(&e, position, true)?,
			Event::End(_) => parser.end(position)?,
			Event::Text(e) if parser.wants_text() => {
				let text = e.unescape().map_err(|err| ParseError::xml(position, err))?;
				parser.push_text(&text);
			}
			Event::CData(e) if parser.wants_text() => {
				let bytes = e.into_inner();
				let text = std::str::from_utf8(&bytes).map_err(|err| ParseError::xml(position, err))?;
				parser.push_text(text);
			}
			Event::Eof => break,
			_ => {}
		}
	}

	parser.finish()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Tag {
	Ts,
	Context,
	Name,
	Message,
	Location,
	Source,
	OldSource,
	Comment,
	OldComment,
	ExtraComment,
	TranslatorComment,
	Translation,
	NumerusForm,
	LengthVariant,
	Byte,
}

impl Tag {
	fn from_name(name: &[u8]) -> Option<Self> {
		let tag = match name {
			b"TS" => Tag::Ts,
			b"context" => Tag::Context,
			b"name" => Tag::Name,
			b"message" => Tag::Message,
			b"location" => Tag::Location,
			b"source" => Tag::Source,
			b"oldsource" => Tag::OldSource,
			b"comment" => Tag::Comment,
			b"oldcomment" => Tag::OldComment,
			b"extracomment" => Tag::ExtraComment,
			b"translatorcomment" => Tag::TranslatorComment,
			b"translation" => Tag::Translation,
			b"numerusform" => Tag::NumerusForm,
			b"lengthvariant" => Tag::LengthVariant,
			b"byte" => Tag::Byte,
			_ => return None,
		};
		Some(tag)
	}

	fn as_str(self) -> &'static str {
		match self {
			Tag::Ts => "TS",
			Tag::Context => "context",
			Tag::Name => "name",
			Tag::Message => "message",
			Tag::Location => "location",
			Tag::Source => "source",
			Tag::OldSource => "oldsource",
			Tag::Comment => "comment",
			Tag::OldComment => "oldcomment",
			Tag::ExtraComment => "extracomment",
			Tag::TranslatorComment => "translatorcomment",
			Tag::Translation => "translation",
			Tag::NumerusForm => "numerusform",
			Tag::LengthVariant => "lengthvariant",
			Tag::Byte => "byte",
		}
	}

	fn holds_text(self) -> bool {
		matches!(
			self,
			Tag::Name
				| Tag::Source
				| Tag::OldSource
				| Tag::Comment
				| Tag::OldComment
				| Tag::ExtraComment
				| Tag::TranslatorComment
				| Tag::Translation
				| Tag::NumerusForm
				| Tag::LengthVariant
		)
	}

	fn allowed_under(self, parent: Option<Tag>) -> bool {
		match self {
			Tag::Ts => parent.is_none(),
			Tag::Context => parent == Some(Tag::Ts),
			Tag::Name | Tag::Message => parent == Some(Tag::Context),
			Tag::Location
			| Tag::Source
			| Tag::OldSource
			| Tag::Comment
			| Tag::OldComment
			| Tag::ExtraComment
			| Tag::TranslatorComment
			| Tag::Translation => parent == Some(Tag::Message),
			Tag::NumerusForm => parent == Some(Tag::Translation),
			Tag::LengthVariant => matches!(parent, Some(Tag::Translation | Tag::NumerusForm)),
			Tag::Byte => parent.is_some_and(Tag::holds_text),
		}
	}
}

struct Frame {
	tag: Tag,
	text: String,
	first_variant: Option<String>,
}

impl Frame {
	fn new(tag: Tag) -> Self {
		Self {
			tag,
			text: String::new(),
			first_variant: None,
		}
	}

	/// Served text: the first length variant if any, else the direct text.
	fn into_text(self) -> String {
		self.first_variant.unwrap_or(self.text)
	}
}

#[derive(Default)]
struct TranslationBuilder {
	state: Option<Retirement>,
	unfinished: bool,
	text: String,
	forms: Vec<String>,
}

#[derive(Default)]
struct MessageBuilder {
	id: Option<String>,
	numerus: bool,
	locations: Vec<Location>,
	source: Option<String>,
	old_source: Option<String>,
	comment: Option<String>,
	old_comment: Option<String>,
	extra_comment: Option<String>,
	translator_comment: Option<String>,
	translation: Option<TranslationBuilder>,
	end_position: usize,
}

impl MessageBuilder {
	fn build(self, context: &str) -> Result<TranslationEntry, ParseError> {
		let source_text = self.source.ok_or(ParseError::MissingElement {
			parent: "message",
			element: "source",
			position: self.end_position,
		})?;

		let state = match self.translation {
			None => EntryState::Draft(empty_translation(self.numerus)),
			Some(t) => {
				let translation = if self.numerus || !t.forms.is_empty() {
					Translation::Plural(t.forms)
				} else {
					Translation::Single(t.text)
				};
				match (t.state, t.unfinished) {
					(Some(retirement), _) => EntryState::Retired(retirement),
					(None, true) => EntryState::Draft(translation),
					(None, false) => EntryState::Active(translation),
				}
			}
		};

		Ok(TranslationEntry {
			context: context.to_string(),
			source_text,
			comment: self.comment,
			state,
			id: self.id,
			locations: self.locations,
			extra_comment: self.extra_comment,
			translator_comment: self.translator_comment,
			old_source: self.old_source,
			old_comment: self.old_comment,
		})
	}
}

fn empty_translation(numerus: bool) -> Translation {
	if numerus {
		Translation::Plural(Vec::new())
	} else {
		Translation::Single(String::new())
	}
}

#[derive(Default)]
struct ContextBuilder {
	name: Option<String>,
	messages: Vec<MessageBuilder>,
}

#[derive(Default)]
struct Parser {
	stack: Vec<Frame>,
	/// Depth inside an unrecognised element whose subtree is ignored.
	skip_depth: usize,
	seen_root: bool,
	doc: TsDocument,
	context: Option<ContextBuilder>,
	message: Option<MessageBuilder>,
}

impl Parser {
	fn parent(&self) -> Option<Tag> {
		self.stack.last().map(|f| f.tag)
	}

	fn wants_text(&self) -> bool {
		self.skip_depth == 0 && self.parent().is_some_and(Tag::holds_text)
	}

	fn push_text(&mut self, text: &str) {
		if let Some(frame) = self.stack.last_mut() {
			frame.text.push_str(text);
		}
	}

	fn start(&mut self, e: &BytesStart<'_>, position: usize, empty: bool) -> Result<(), ParseError> {
		if self.skip_depth > 0 {
			if !empty {
				self.skip_depth += 1;
			}
			return Ok(());
		}

		let raw_name = e.name();
		let name = String::from_utf8_lossy(raw_name.as_ref());
		let parent = self.parent();

		let Some(tag) = Tag::from_name(raw_name.as_ref()) else {
			if parent.is_none() && !self.seen_root {
				return Err(ParseError::MissingRoot);
			}
			trace!(element = %name, "skipping unrecognised element");
			if !empty {
				self.skip_depth = 1;
			}
			return Ok(());
		};

		let second_root = tag == Tag::Ts && self.seen_root;
		if second_root || !tag.allowed_under(parent) {
			let message = match parent {
				Some(parent) => format!("not allowed inside <{}>", parent.as_str()),
				None if self.seen_root => "content after the root element".to_string(),
				None => "expected <TS> root element".to_string(),
			};
			return Err(if tag != Tag::Ts && parent.is_none() && !self.seen_root {
				ParseError::MissingRoot
			} else {
				ParseError::structure(&name, position, message)
			});
		}

		let attrs = attributes(e, position)?;
		self.open(tag, &attrs, position)?;

		if tag == Tag::Byte {
			// Character references are folded into the enclosing text.
			if !empty {
				self.skip_depth = 1;
			}
			return Ok(());
		}

		self.stack.push(Frame::new(tag));
		if empty {
			self.end(position)?;
		}
		Ok(())
	}

	fn open(&mut self, tag: Tag, attrs: &[(String, String)], position: usize) -> Result<(), ParseError> {
		match tag {
			Tag::Ts => {
				self.seen_root = true;
				self.doc.version = attr(attrs, "version");
				self.doc.language = attr(attrs, "language");
				self.doc.source_language = attr(attrs, "sourcelanguage");
			}
			Tag::Context => self.context = Some(ContextBuilder::default()),
			Tag::Message => {
				let numerus = match attr(attrs, "numerus").as_deref() {
					None | Some("no") => false,
					Some("yes") => true,
					Some(other) => return Err(ParseError::invalid_attribute("numerus", other, position)),
				};
				self.message = Some(MessageBuilder {
					id: attr(attrs, "id"),
					numerus,
					..Default::default()
				});
			}
			Tag::Location => {
				let line = match attr(attrs, "line") {
					None => None,
					Some(value) => Some(
						LineRef::parse(&value)
							.ok_or_else(|| ParseError::invalid_attribute("line", &value, position))?,
					),
				};
				if let Some(message) = self.message.as_mut() {
					message.locations.push(Location {
						filename: attr(attrs, "filename"),
						line,
					});
				}
			}
			Tag::Translation => {
				let mut translation = TranslationBuilder::default();
				match attr(attrs, "type").as_deref() {
					None | Some("finished") => {}
					Some("unfinished") => translation.unfinished = true,
					Some("obsolete") => translation.state = Some(Retirement::Obsolete),
					Some("vanished") => translation.state = Some(Retirement::Vanished),
					Some(other) => return Err(ParseError::invalid_attribute("type", other, position)),
				}
				if let Some(message) = self.message.as_mut() {
					message.translation = Some(translation);
				}
			}
			Tag::Byte => {
				let value = attr(attrs, "value").unwrap_or_default();
				let decoded = decode_byte(&value)
					.ok_or_else(|| ParseError::invalid_attribute("value", &value, position))?;
				if let Some(c) = decoded {
					self.push_text(c.encode_utf8(&mut [0; 4]));
				}
			}
			_ => {}
		}
		Ok(())
	}

	fn end(&mut self, position: usize) -> Result<(), ParseError> {
		if self.skip_depth > 0 {
			self.skip_depth -= 1;
			return Ok(());
		}

		let frame = self
			.stack
			.pop()
			.ok_or_else(|| ParseError::structure("?", position, "closing tag without opening tag"))?;

		match frame.tag {
			Tag::Ts | Tag::Location | Tag::Byte => {}
			Tag::Context => {
				let context = self.context.take().unwrap_or_default();
				let name = context.name.ok_or(ParseError::MissingElement {
					parent: "context",
					element: "name",
					position,
				})?;
				for message in context.messages {
					self.doc.entries.push(message.build(&name)?);
				}
			}
			Tag::Name => {
				if let Some(context) = self.context.as_mut() {
					context.name = Some(frame.text);
				}
			}
			Tag::Message => {
				if let (Some(mut message), Some(context)) = (self.message.take(), self.context.as_mut()) {
					message.end_position = position;
					context.messages.push(message);
				}
			}
			Tag::LengthVariant => {
				let text = frame.into_text();
				if let Some(parent) = self.stack.last_mut() {
					parent.first_variant.get_or_insert(text);
				}
			}
			Tag::NumerusForm => {
				let text = frame.into_text();
				if let Some(t) = self.message.as_mut().and_then(|m| m.translation.as_mut()) {
					t.forms.push(text);
				}
			}
			Tag::Translation => {
				let text = frame.into_text();
				if let Some(t) = self.message.as_mut().and_then(|m| m.translation.as_mut()) {
					t.text = text;
				}
			}
			tag => {
				let text = frame.text;
				if let Some(message) = self.message.as_mut() {
					let slot = match tag {
						Tag::Source => &mut message.source,
						Tag::OldSource => &mut message.old_source,
						Tag::Comment => &mut message.comment,
						Tag::OldComment => &mut message.old_comment,
						Tag::ExtraComment => &mut message.extra_comment,
						_ => &mut message.translator_comment,
					};
					// Source text may legitimately be empty; comments may not.
					*slot = if tag == Tag::Source || !text.is_empty() {
						Some(text)
					} else {
						None
					};
				}
			}
		}
		Ok(())
	}

	fn finish(self) -> Result<TsDocument, ParseError> {
		if let Some(frame) = self.stack.last() {
			return Err(ParseError::Unclosed(frame.tag.as_str().to_string()));
		}
		if self.skip_depth > 0 {
			return Err(ParseError::Unclosed("unknown element".to_string()));
		}
		if !self.seen_root {
			return Err(ParseError::MissingRoot);
		}
		Ok(self.doc)
	}
}

fn attributes(e: &BytesStart<'_>, position: usize) -> Result<Vec<(String, String)>, ParseError> {
	let mut out = Vec::new();
	for attribute in e.attributes() {
		let attribute = attribute.map_err(|err| ParseError::xml(position, err))?;
		let key = String::from_utf8_lossy(attribute.key.as_ref()).into_owned();
		let value = attribute
			.unescape_value()
			.map_err(|err| ParseError::xml(position, err))?
			.into_owned();
		out.push((key, value));
	}
	Ok(out)
}

fn attr(attrs: &[(String, String)], key: &str) -> Option<String> {
	attrs.iter().find(|(k, _)| k == key).map(|(_, v)| v.clone())
}

/// Decode a `<byte value="..."/>` reference: `x9`/`0x9` are hex, anything
/// else decimal. Zero decodes to no character. `None` for invalid values.
fn decode_byte(value: &str) -> Option<Option<char>> {
	let value = value.trim();
	let (radix, digits) = if let Some(hex) = value.strip_prefix("0x") {
		(16, hex)
	} else if let Some(hex) = value.strip_prefix('x') {
		(16, hex)
	} else {
		(10, value)
	};
	let n = u32::from_str_radix(digits, radix).ok()?;
	if n == 0 {
		return Some(None);
	}
	char::from_u32(n).map(Some)
}
