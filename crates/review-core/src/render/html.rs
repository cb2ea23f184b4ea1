//! HTML emitter for parsed report blocks

use super::blocks::Block;
use super::inline::Inline;

const H4_OPEN: &str =
    "<h4 class=\"mt-4 mb-3 text-primary\"><i class=\"fas fa-chevron-right me-2\"></i>";
const H5_OPEN: &str = "<h5 class=\"mt-3 mb-2 text-secondary\">";
const UL_OPEN: &str = "<ul class=\"mb-3\">";
const LI_OPEN: &str = "<li class=\"mb-1\">";
const PRE_OPEN: &str = "<pre class=\"bg-light p-3 rounded\">";
const INLINE_CODE_OPEN: &str = "<code class=\"bg-light px-2 py-1 rounded\">";

/// Escape text for use in element content and quoted attributes
pub fn escape_html(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Render blocks, one top-level element per line
pub fn to_html(blocks: &[Block]) -> String {
    blocks.iter().map(block_html).collect::<Vec<_>>().join("\n")
}

fn block_html(block: &Block) -> String {
    match block {
        Block::Header { level, inlines } => {
            let open = if *level <= 4 { H4_OPEN } else { H5_OPEN };
            let tag = if *level <= 4 { "h4" } else { "h5" };
            format!("{}{}</{}>", open, inlines_html(inlines), tag)
        }
        Block::List { items } => {
            let mut out = String::from(UL_OPEN);
            for item in items {
                out.push_str(LI_OPEN);
                out.push_str(&inlines_html(item));
                out.push_str("</li>");
            }
            out.push_str("</ul>");
            out
        }
        Block::Code { lang, body } => format!(
            "{}<code class=\"language-{}\">{}</code></pre>",
            PRE_OPEN,
            escape_html(lang),
            escape_html(body)
        ),
        Block::Paragraph { lines } => {
            let body = lines
                .iter()
                .map(|line| inlines_html(line))
                .collect::<Vec<_>>()
                .join("\n");
            format!("<p>{}</p>", body)
        }
    }
}

fn inlines_html(inlines: &[Inline]) -> String {
    let mut out = String::new();
    for inline in inlines {
        match inline {
            Inline::Text(text) => out.push_str(&escape_html(text)),
            Inline::Strong(inner) => {
                out.push_str("<strong>");
                out.push_str(&inlines_html(inner));
                out.push_str("</strong>");
            }
            Inline::Code(code) => {
                out.push_str(INLINE_CODE_OPEN);
                out.push_str(&escape_html(code));
                out.push_str("</code>");
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_escape_html_encodes_special_chars() {
        assert_eq!(
            escape_html(r#"<a href="x">'&'</a>"#),
            "&lt;a href=&quot;x&quot;&gt;&#39;&amp;&#39;&lt;/a&gt;"
        );
    }

    #[test]
    fn test_code_block_markup() {
        let html = to_html(&[Block::Code {
            lang: "js".to_string(),
            body: "if (a < b) {}".to_string(),
        }]);
        assert_eq!(
            html,
            "<pre class=\"bg-light p-3 rounded\"><code class=\"language-js\">if (a &lt; b) {}</code></pre>"
        );
    }

    #[test]
    fn test_strong_with_code() {
        let html = to_html(&[Block::Paragraph {
            lines: vec![vec![Inline::Strong(vec![
                Inline::Text("use ".to_string()),
                Inline::Code("<=".to_string()),
            ])]],
        }]);
        assert_eq!(
            html,
            "<p><strong>use <code class=\"bg-light px-2 py-1 rounded\">&lt;=</code></strong></p>"
        );
    }
}
