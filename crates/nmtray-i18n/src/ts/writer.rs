//! Serializer producing the layout written by Qt's extraction tool.

use crate::message::{Context, Message, Translation, TsDocument};
use quick_xml::escape::escape;
use std::fmt::Write;

const INDENT: &str = "    ";

pub(crate) fn write_document(document: &TsDocument) -> String {
    let mut out = String::with_capacity(256 + document.message_count() * 256);

    out.push_str("<?xml version=\"1.0\" encoding=\"utf-8\"?>\n<!DOCTYPE TS>\n");
    out.push_str("<TS version=\"");
    out.push_str(&protect(&document.version));
    out.push('"');
    if let Some(language) = &document.language {
        push_attr(&mut out, "language", language);
    }
    if let Some(source_language) = &document.source_language {
        push_attr(&mut out, "sourcelanguage", source_language);
    }
    out.push_str(">\n");

    for context in &document.contexts {
        write_context(&mut out, context);
    }

    out.push_str("</TS>\n");
    out
}

fn write_context(out: &mut String, context: &Context) {
    out.push_str("<context>\n");
    push_element(out, 1, "name", &context.name);
    if let Some(comment) = &context.comment {
        push_element(out, 1, "comment", comment);
    }
    for message in &context.messages {
        write_message(out, message);
    }
    out.push_str("</context>\n");
}

fn write_message(out: &mut String, message: &Message) {
    out.push_str(INDENT);
    out.push_str("<message");
    if let Some(id) = &message.id {
        push_attr(out, "id", id);
    }
    if message.numerus {
        out.push_str(" numerus=\"yes\"");
    }
    out.push_str(">\n");

    for location in &message.locations {
        push_indent(out, 2);
        out.push_str("<location");
        push_attr(out, "filename", &location.file);
        if let Some(line) = location.line {
            let _ = write!(out, " line=\"{line}\"");
        }
        out.push_str("/>\n");
    }

    push_element(out, 2, "source", &message.source);
    let optional = [
        ("oldsource", &message.old_source),
        ("comment", &message.comment),
        ("oldcomment", &message.old_comment),
        ("extracomment", &message.extra_comment),
        ("translatorcomment", &message.translator_comment),
    ];
    for (name, value) in optional {
        if let Some(value) = value {
            push_element(out, 2, name, value);
        }
    }

    write_translation(out, &message.translation, message.numerus);

    out.push_str(INDENT);
    out.push_str("</message>\n");
}

fn write_translation(out: &mut String, translation: &Translation, numerus: bool) {
    push_indent(out, 2);
    out.push_str("<translation");
    if let Some(kind) = translation.kind.as_attr() {
        push_attr(out, "type", kind);
    }

    if numerus {
        out.push_str(">\n");
        for form in &translation.forms {
            push_element(out, 3, "numerusform", form);
        }
        push_indent(out, 2);
    } else if !translation.variants.is_empty() {
        out.push_str(" variants=\"yes\">\n");
        for variant in &translation.variants {
            push_element(out, 3, "lengthvariant", variant);
        }
        push_indent(out, 2);
    } else {
        out.push('>');
        out.push_str(&protect(translation.text()));
    }

    out.push_str("</translation>\n");
}

fn push_indent(out: &mut String, depth: usize) {
    for _ in 0..depth {
        out.push_str(INDENT);
    }
}

fn push_attr(out: &mut String, name: &str, value: &str) {
    let _ = write!(out, " {name}=\"{}\"", protect(value));
}

fn push_element(out: &mut String, depth: usize, name: &str, text: &str) {
    push_indent(out, depth);
    let _ = writeln!(out, "<{name}>{}</{name}>", protect(text));
}

/// Escape markup characters as entities and control characters as
/// `<byte>` elements.
fn protect(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;

    while let Some(pos) = rest.find(is_unprintable) {
        out.push_str(&escape(&rest[..pos]));
        let ch = rest[pos..].chars().next().unwrap_or_default();
        let _ = write!(out, "<byte value=\"x{:x}\"/>", u32::from(ch));
        rest = &rest[pos + ch.len_utf8()..];
    }
    out.push_str(&escape(rest));
    out
}

const fn is_unprintable(ch: char) -> bool {
    (ch as u32) < 0x20 && !matches!(ch, '\t' | '\n' | '\r')
}
