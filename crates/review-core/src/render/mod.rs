//! Analysis report rendering
//!
//! Reports use a small markdown-like subset. Rendering happens in two
//! steps so each part can be tested alone:
//!
//! 1. [`parse`] classifies lines into [`Block`]s (headers, lists, fenced
//!    code, paragraphs) and scans inline spans.
//! 2. [`to_html`] emits markup with the results page's CSS classes.
//!
//! Headers and lists are separate blocks, so they can never end up inside
//! a paragraph, and empty paragraphs are never produced. Text that matches
//! no marker is kept as escaped paragraph text.

mod blocks;
mod html;
mod inline;

pub use blocks::{parse, Block};
pub use html::{escape_html, to_html};
pub use inline::{parse_inlines, Inline};

/// Render report text to HTML
pub fn render(report: &str) -> String {
    let blocks = parse(report);
    tracing::debug!(blocks = blocks.len(), "rendered analysis report");
    to_html(&blocks)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    #[test]
    fn test_summary_with_bullets() {
        let html = render("## Summary\n- point one\n- point two");
        assert_eq!(
            html,
            "<h4 class=\"mt-4 mb-3 text-primary\"><i class=\"fas fa-chevron-right me-2\"></i>Summary</h4>\n\
             <ul class=\"mb-3\"><li class=\"mb-1\">point one</li><li class=\"mb-1\">point two</li></ul>"
        );
    }

    #[test]
    fn test_full_report() {
        let report = "## AI Code Review Summary\n\
                      **Total Issues Found**: 3\n\
                      \n\
                      ### Style Issues (2 found):\n\
                      - **Line 4**: Use `const` instead of `var`\n\
                      - **Line 9**: Missing semicolon\n\
                      \n\
                      ```javascript\n\
                      const total = 0;\n\
                      ```\n\
                      \n\
                      Overall the code is <fine>.";

        let html = render(report);
        let expected = [
            "<h4 class=\"mt-4 mb-3 text-primary\"><i class=\"fas fa-chevron-right me-2\"></i>AI Code Review Summary</h4>",
            "<p><strong>Total Issues Found</strong>: 3</p>",
            "<h5 class=\"mt-3 mb-2 text-secondary\">Style Issues (2 found):</h5>",
            "<ul class=\"mb-3\"><li class=\"mb-1\"><strong>Line 4</strong>: Use <code class=\"bg-light px-2 py-1 rounded\">const</code> instead of <code class=\"bg-light px-2 py-1 rounded\">var</code></li><li class=\"mb-1\"><strong>Line 9</strong>: Missing semicolon</li></ul>",
            "<pre class=\"bg-light p-3 rounded\"><code class=\"language-javascript\">const total = 0;</code></pre>",
            "<p>Overall the code is &lt;fine&gt;.</p>",
        ]
        .join("\n");
        assert_eq!(html, expected);
    }

    #[test]
    fn test_whitespace_only_line_does_not_split_paragraph() {
        assert_eq!(render("alpha\n   \nbeta"), "<p>alpha\n   \nbeta</p>");
    }

    #[test]
    fn test_no_containers_for_empty_report() {
        assert_eq!(render(""), "");
        assert_eq!(render("\n\n\n"), "");
    }

    #[test]
    fn test_paragraph_never_wraps_header_or_list() {
        let html = render("intro\n## Head\n- item\nouter");
        assert!(!html.contains("<p><h"));
        assert!(!html.contains("<p><ul"));
        assert!(!html.contains("<p></p>"));
        assert_eq!(html.matches("<p>").count(), 2);
    }

    proptest! {
        #[test]
        fn plain_text_is_one_paragraph(
            lines in proptest::collection::vec(
                "[a-zA-Z0-9][a-zA-Z0-9 ,.!?]{0,30}|[ \t]{1,4}",
                1..6
            )
        ) {
            let text = lines.join("\n");
            prop_assert_eq!(render(&text), format!("<p>{}</p>", text));
        }

        #[test]
        fn render_never_emits_empty_or_wrapping_paragraphs(text in "(## |- |```|\\*\\*|`|[a-z ]|\n){0,60}") {
            let html = render(&text);
            prop_assert!(!html.contains("<p></p>"));
            prop_assert!(!html.contains("<p><h"));
            prop_assert!(!html.contains("<p><ul"));
        }
    }
}
