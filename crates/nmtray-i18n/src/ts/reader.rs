//! Streaming reader for TS documents.

use crate::error::{I18nError, I18nResult};
use crate::message::{Context, Location, Message, Translation, TranslationKind, TsDocument};
use quick_xml::events::{BytesStart, Event};
use quick_xml::name::QName;
use quick_xml::Reader;
use std::collections::HashMap;
use tracing::{debug, trace};

pub(crate) fn parse_document(input: &str) -> I18nResult<TsDocument> {
    let mut reader = Reader::from_str(input);
    reader.config_mut().trim_text(false);

    let mut parser = TsParser {
        reader,
        current_file: None,
        current_lines: HashMap::new(),
    };
    let document = parser.document()?;

    debug!(
        contexts = document.contexts.len(),
        messages = document.message_count(),
        language = document.language.as_deref().unwrap_or(""),
        "Parsed translation document"
    );
    Ok(document)
}

/// Text content of an element plus any `<lengthvariant>` children.
struct TextContent {
    text: String,
    variants: Vec<String>,
}

struct TsParser<'a> {
    reader: Reader<&'a [u8]>,
    /// File of the last `<location>`, inherited when `filename` is omitted.
    current_file: Option<String>,
    /// Last absolute line seen per file, base for relative `line="+N"`.
    current_lines: HashMap<String, i64>,
}

impl<'a> TsParser<'a> {
    fn position(&self) -> u64 {
        self.reader.buffer_position() as u64
    }

    fn invalid(&self, message: impl Into<String>) -> I18nError {
        I18nError::Parse {
            position: self.position(),
            message: message.into(),
        }
    }

    fn next(&mut self) -> I18nResult<Event<'a>> {
        self.reader.read_event().map_err(|source| I18nError::Xml {
            position: self.reader.buffer_position() as u64,
            source,
        })
    }

    fn skip(&mut self, start: &BytesStart<'_>) -> I18nResult<()> {
        let name = start.name().as_ref().to_vec();
        trace!(element = %String::from_utf8_lossy(&name), "Skipping unknown element");
        self.reader
            .read_to_end(QName(&name))
            .map(|_| ())
            .map_err(|source| I18nError::Xml {
                position: self.reader.buffer_position() as u64,
                source,
            })
    }

    fn attribute(&self, start: &BytesStart<'_>, key: &[u8]) -> I18nResult<Option<String>> {
        for attr in start.attributes() {
            let attr = attr.map_err(|e| I18nError::Xml {
                position: self.position(),
                source: e.into(),
            })?;
            if attr.key.as_ref() == key {
                let value = attr.unescape_value().map_err(|source| I18nError::Xml {
                    position: self.position(),
                    source,
                })?;
                return Ok(Some(value.into_owned()));
            }
        }
        Ok(None)
    }

    fn unexpected_eof(&self, element: &str) -> I18nError {
        self.invalid(format!("unexpected end of document inside <{element}>"))
    }

    fn document(&mut self) -> I18nResult<TsDocument> {
        loop {
            match self.next()? {
                Event::Start(start) if start.name().as_ref() == b"TS" => {
                    let mut document = self.root_attributes(&start)?;
                    self.root_children(&mut document)?;
                    return Ok(document);
                }
                Event::Empty(start) if start.name().as_ref() == b"TS" => {
                    return self.root_attributes(&start);
                }
                Event::Start(start) | Event::Empty(start) => {
                    let name = String::from_utf8_lossy(start.name().as_ref()).into_owned();
                    return Err(self.invalid(format!("expected <TS> root element, found <{name}>")));
                }
                Event::Eof => return Err(self.invalid("missing <TS> root element")),
                _ => {}
            }
        }
    }

    fn root_attributes(&self, start: &BytesStart<'_>) -> I18nResult<TsDocument> {
        Ok(TsDocument {
            version: self
                .attribute(start, b"version")?
                .unwrap_or_else(|| "1.1".to_string()),
            language: self.attribute(start, b"language")?.filter(|l| !l.is_empty()),
            source_language: self
                .attribute(start, b"sourcelanguage")?
                .filter(|l| !l.is_empty()),
            contexts: Vec::new(),
        })
    }

    fn root_children(&mut self, document: &mut TsDocument) -> I18nResult<()> {
        loop {
            match self.next()? {
                Event::Start(start) if start.name().as_ref() == b"context" => {
                    let context = self.context()?;
                    document.contexts.push(context);
                }
                Event::Start(start) => self.skip(&start)?,
                Event::End(_) => return Ok(()),
                Event::Eof => return Err(self.unexpected_eof("TS")),
                _ => {}
            }
        }
    }

    fn context(&mut self) -> I18nResult<Context> {
        let mut context = Context::default();
        let mut has_name = false;

        loop {
            match self.next()? {
                Event::Start(start) => match start.name().as_ref() {
                    b"name" => {
                        context.name = self.text("name")?.text;
                        has_name = true;
                    }
                    b"comment" => context.comment = Some(self.text("comment")?.text),
                    b"message" => {
                        if !has_name {
                            return Err(self.invalid("<message> before the context <name>"));
                        }
                        let message = self.message(&start, &context.name)?;
                        context.messages.push(message);
                    }
                    _ => self.skip(&start)?,
                },
                Event::Empty(start) if start.name().as_ref() == b"name" => has_name = true,
                Event::Empty(start) if start.name().as_ref() == b"message" => {
                    return Err(self.invalid("<message> without <source>"));
                }
                Event::End(_) => break,
                Event::Eof => return Err(self.unexpected_eof("context")),
                _ => {}
            }
        }

        if has_name {
            Ok(context)
        } else {
            Err(self.invalid("<context> without <name>"))
        }
    }

    fn message(&mut self, start: &BytesStart<'_>, context: &str) -> I18nResult<Message> {
        let mut message = Message {
            context: context.to_string(),
            id: self.attribute(start, b"id")?.filter(|id| !id.is_empty()),
            numerus: self.attribute(start, b"numerus")?.as_deref() == Some("yes"),
            ..Message::default()
        };
        let mut source = None;

        loop {
            match self.next()? {
                Event::Start(child) => match child.name().as_ref() {
                    b"source" => source = Some(self.text("source")?.text),
                    b"comment" => message.comment = Some(self.text("comment")?.text),
                    b"oldsource" => message.old_source = Some(self.text("oldsource")?.text),
                    b"oldcomment" => message.old_comment = Some(self.text("oldcomment")?.text),
                    b"extracomment" => {
                        message.extra_comment = Some(self.text("extracomment")?.text);
                    }
                    b"translatorcomment" => {
                        message.translator_comment = Some(self.text("translatorcomment")?.text);
                    }
                    b"translation" => {
                        message.translation = self.translation(&child, message.numerus, false)?;
                    }
                    b"location" => {
                        message.locations.push(self.location(&child)?);
                        self.skip(&child)?;
                    }
                    _ => self.skip(&child)?,
                },
                Event::Empty(child) => match child.name().as_ref() {
                    b"location" => message.locations.push(self.location(&child)?),
                    b"translation" => {
                        message.translation = self.translation(&child, message.numerus, true)?;
                    }
                    b"source" => source = Some(String::new()),
                    _ => {}
                },
                Event::End(_) => break,
                Event::Eof => return Err(self.unexpected_eof("message")),
                _ => {}
            }
        }

        message.source = source.ok_or_else(|| self.invalid("<message> without <source>"))?;
        if message.translation.forms.is_empty() {
            message.translation.forms.push(String::new());
        }
        Ok(message)
    }

    fn location(&mut self, start: &BytesStart<'_>) -> I18nResult<Location> {
        let file = match self.attribute(start, b"filename")? {
            Some(file) if !file.is_empty() => file,
            _ => self.current_file.clone().unwrap_or_default(),
        };
        self.current_file = Some(file.clone());

        let line = match self.attribute(start, b"line")? {
            None => None,
            Some(value) => {
                let is_relative = value.starts_with('+') || value.starts_with('-');
                let number: i64 = value
                    .parse()
                    .map_err(|_| self.invalid(format!("invalid location line '{value}'")))?;
                let absolute = if is_relative {
                    self.current_lines.get(&file).copied().unwrap_or(0) + number
                } else {
                    number
                };
                self.current_lines.insert(file.clone(), absolute);
                Some(
                    u32::try_from(absolute)
                        .map_err(|_| self.invalid(format!("location line {absolute} out of range")))?,
                )
            }
        };

        Ok(Location { file, line })
    }

    fn translation(
        &mut self,
        start: &BytesStart<'_>,
        numerus: bool,
        empty: bool,
    ) -> I18nResult<Translation> {
        let kind_attr = self.attribute(start, b"type")?;
        let kind = TranslationKind::from_attr(kind_attr.as_deref()).ok_or_else(|| {
            self.invalid(format!(
                "unknown translation type '{}'",
                kind_attr.as_deref().unwrap_or_default()
            ))
        })?;

        if empty {
            return Ok(Translation {
                kind,
                forms: vec![String::new()],
                variants: Vec::new(),
            });
        }

        let content = self.content("translation", true)?;
        let (forms, variants) = match content {
            Content::Forms(forms) if numerus => (forms, Vec::new()),
            Content::Forms(forms) => {
                // Plain message written with numerus forms: keep the first.
                (forms.into_iter().take(1).collect(), Vec::new())
            }
            Content::Text(TextContent { text, variants }) if variants.is_empty() => {
                (vec![text], Vec::new())
            }
            Content::Text(TextContent { variants, .. }) if numerus => {
                // Numerus messages keep only forms: the first variant stands in.
                (variants.into_iter().take(1).collect(), Vec::new())
            }
            Content::Text(TextContent { variants, .. }) => (vec![variants[0].clone()], variants),
        };

        Ok(Translation {
            kind,
            forms,
            variants,
        })
    }

    fn text(&mut self, element: &str) -> I18nResult<TextContent> {
        match self.content(element, false)? {
            Content::Text(text) => Ok(text),
            Content::Forms(_) => Err(self.invalid(format!("unexpected <numerusform> in <{element}>"))),
        }
    }

    /// Read character data up to the end of `element`, decoding entities,
    /// CDATA sections and `<byte value="..."/>` escapes.
    fn content(&mut self, element: &str, allow_forms: bool) -> I18nResult<Content> {
        let mut text = String::new();
        let mut variants = Vec::new();
        let mut forms: Option<Vec<String>> = None;

        loop {
            match self.next()? {
                Event::Text(chunk) => {
                    let decoded = chunk.unescape().map_err(|source| I18nError::Xml {
                        position: self.position(),
                        source,
                    })?;
                    text.push_str(&decoded);
                }
                Event::CData(chunk) => {
                    let decoded = std::str::from_utf8(&chunk)
                        .map_err(|_| self.invalid("CDATA section is not valid UTF-8"))?;
                    text.push_str(decoded);
                }
                Event::Empty(child) if child.name().as_ref() == b"byte" => {
                    let ch = self.byte_escape(&child)?;
                    text.push(ch);
                }
                Event::Empty(child) if child.name().as_ref() == b"numerusform" && allow_forms => {
                    forms.get_or_insert_with(Vec::new).push(String::new());
                }
                Event::Empty(child) if child.name().as_ref() == b"lengthvariant" => {
                    variants.push(String::new());
                }
                Event::Start(child) => match child.name().as_ref() {
                    b"numerusform" if allow_forms => {
                        let form = self.text("numerusform")?;
                        let form = form.variants.into_iter().next().unwrap_or(form.text);
                        forms.get_or_insert_with(Vec::new).push(form);
                    }
                    b"lengthvariant" => variants.push(self.text("lengthvariant")?.text),
                    _ => self.skip(&child)?,
                },
                Event::End(_) => break,
                Event::Eof => return Err(self.unexpected_eof(element)),
                _ => {}
            }
        }

        Ok(match forms {
            Some(forms) => Content::Forms(forms),
            None => Content::Text(TextContent { text, variants }),
        })
    }

    fn byte_escape(&self, start: &BytesStart<'_>) -> I18nResult<char> {
        let value = self
            .attribute(start, b"value")?
            .ok_or_else(|| self.invalid("<byte> without value"))?;
        let code = match value.strip_prefix('x') {
            Some(hex) => u32::from_str_radix(hex, 16),
            None => value.parse(),
        }
        .map_err(|_| self.invalid(format!("invalid byte value '{value}'")))?;

        char::from_u32(code).ok_or_else(|| self.invalid(format!("invalid byte value '{value}'")))
    }
}

enum Content {
    Text(TextContent),
    Forms(Vec<String>),
}
