//! Inline spans inside a single line: `**bold**` and `` `code` ``

use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum Inline {
    Text(String),
    /// Bold span; may contain inline code but never nested bold
    Strong(Vec<Inline>),
    Code(String),
}

/// Scan a line left to right. Unmatched delimiters stay literal.
pub fn parse_inlines(line: &str) -> Vec<Inline> {
    let mut out = Vec::new();
    let mut text = String::new();
    let mut rest = line;

    while !rest.is_empty() {
        if let Some((code, after)) = take_code(rest) {
            flush_text(&mut text, &mut out);
            out.push(Inline::Code(code.to_string()));
            rest = after;
            continue;
        }

        if let Some((inner, after)) = take_strong(rest) {
            flush_text(&mut text, &mut out);
            out.push(Inline::Strong(parse_code_spans(inner)));
            rest = after;
            continue;
        }

        let mut chars = rest.chars();
        if let Some(c) = chars.next() {
            text.push(c);
        }
        rest = chars.as_str();
    }

    flush_text(&mut text, &mut out);
    out
}

/// Inline code only; used for the inside of bold spans
fn parse_code_spans(segment: &str) -> Vec<Inline> {
    let mut out = Vec::new();
    let mut text = String::new();
    let mut rest = segment;

    while !rest.is_empty() {
        if let Some((code, after)) = take_code(rest) {
            flush_text(&mut text, &mut out);
            out.push(Inline::Code(code.to_string()));
            rest = after;
            continue;
        }
        let mut chars = rest.chars();
        if let Some(c) = chars.next() {
            text.push(c);
        }
        rest = chars.as_str();
    }

    flush_text(&mut text, &mut out);
    out
}

fn flush_text(text: &mut String, out: &mut Vec<Inline>) {
    if !text.is_empty() {
        out.push(Inline::Text(std::mem::take(text)));
    }
}

/// `` `x` `` at the start of `s`: returns the content and the remainder
fn take_code(s: &str) -> Option<(&str, &str)> {
    let body = s.strip_prefix('`')?;
    let end = body.find('`')?;
    if end == 0 {
        return None;
    }
    Some((&body[..end], &body[end + 1..]))
}

/// `**x**` at the start of `s`, shortest match
fn take_strong(s: &str) -> Option<(&str, &str)> {
    let body = s.strip_prefix("**")?;
    let end = body.find("**")?;
    if end == 0 {
        return None;
    }
    Some((&body[..end], &body[end + 2..]))
}
