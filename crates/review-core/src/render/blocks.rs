//! Line classifier turning report text into block nodes

use super::inline::{parse_inlines, Inline};
use serde::Serialize;

const FENCE: &str = "```";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Block {
    /// `##` maps to level 4, `###` to level 5
    Header { level: u8, inlines: Vec<Inline> },
    List { items: Vec<Vec<Inline>> },
    Code { lang: String, body: String },
    /// One entry per source line
    Paragraph { lines: Vec<Vec<Inline>> },
}

/// What a single (non-fenced) line is
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LineKind<'a> {
    Blank,
    /// Only spaces or tabs; not a paragraph boundary
    Spacer(&'a str),
    Header(u8, &'a str),
    Item(&'a str),
    Text(&'a str),
}

fn classify(line: &str) -> LineKind<'_> {
    if line.is_empty() {
        LineKind::Blank
    } else if line.trim().is_empty() {
        LineKind::Spacer(line)
    } else if let Some(rest) = line.strip_prefix("### ") {
        LineKind::Header(5, rest)
    } else if let Some(rest) = line.strip_prefix("## ") {
        LineKind::Header(4, rest)
    } else if let Some(rest) = line.strip_prefix("- ") {
        LineKind::Item(rest)
    } else {
        LineKind::Text(line)
    }
}

/// Collects blocks while tracking the open paragraph and list
#[derive(Default)]
struct Builder {
    blocks: Vec<Block>,
    paragraph: Vec<Vec<Inline>>,
    list: Vec<Vec<Inline>>,
}

impl Builder {
    fn close_paragraph(&mut self) {
        if !self.paragraph.is_empty() {
            let lines = std::mem::take(&mut self.paragraph);
            self.blocks.push(Block::Paragraph { lines });
        }
    }

    fn close_list(&mut self) {
        if !self.list.is_empty() {
            let items = std::mem::take(&mut self.list);
            self.blocks.push(Block::List { items });
        }
    }

    fn close_all(&mut self) {
        self.close_paragraph();
        self.close_list();
    }

    fn push_block(&mut self, block: Block) {
        self.close_all();
        self.blocks.push(block);
    }

    fn push_line(&mut self, line: &str) {
        match classify(line) {
            // Blank lines end paragraphs; list items separated only by
            // blank lines stay in one list.
            LineKind::Blank => self.close_paragraph(),
            // Whitespace between list items keeps the list together
            LineKind::Spacer(text) => {
                if self.paragraph.is_empty() && !self.list.is_empty() {
                    return;
                }
                self.paragraph.push(parse_inlines(text));
            }
            LineKind::Header(level, text) => self.push_block(Block::Header {
                level,
                inlines: parse_inlines(text),
            }),
            LineKind::Item(text) => {
                self.close_paragraph();
                self.list.push(parse_inlines(text));
            }
            LineKind::Text(text) => {
                self.close_list();
                self.paragraph.push(parse_inlines(text));
            }
        }
    }

    fn finish(mut self) -> Vec<Block> {
        self.close_all();
        self.blocks
    }
}

/// Language tag of an opening fence, if `line` is one
fn opening_fence(line: &str) -> Option<&str> {
    let rest = line.strip_prefix(FENCE)?;
    Some(rest.split_whitespace().next().unwrap_or(""))
}

fn is_closing_fence(line: &str) -> bool {
    line.trim_start().starts_with(FENCE)
}

/// Split a report into blocks.
///
/// Fenced code is taken verbatim. An opening fence without a closing one is
/// treated as ordinary text, as is anything else that matches no marker.
pub fn parse(text: &str) -> Vec<Block> {
    let lines: Vec<&str> = text
        .split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
        .collect();

    let mut builder = Builder::default();
    let mut i = 0;

    while i < lines.len() {
        let line = lines[i];

        if let Some(lang) = opening_fence(line) {
            let close = lines[i + 1..]
                .iter()
                .position(|l| is_closing_fence(l))
                .map(|offset| i + 1 + offset);

            if let Some(close) = close {
                builder.push_block(Block::Code {
                    lang: lang.to_string(),
                    body: lines[i + 1..close].join("\n"),
                });
                i = close + 1;
                continue;
            }
        }

        builder.push_line(line);
        i += 1;
    }

    builder.finish()
}
