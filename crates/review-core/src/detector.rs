//! Heuristic language detection for pasted code
//!
//! Python patterns are checked before JavaScript ones, so text matching
//! both resolves to Python. Identifiers are matched as ASCII word
//! characters only. Detection is advisory: it only ever fills in
//! an unset language.

use crate::types::Language;
use lazy_static::lazy_static;
use regex::Regex;
use tracing::debug;

lazy_static! {
    static ref PYTHON_PATTERNS: Vec<Regex> = compile(&[
        r"(?m)def\s+[A-Za-z0-9_]+\s*\(",
        r"(?m)import\s+[A-Za-z0-9_]+",
        r"(?m)from\s+[A-Za-z0-9_]+\s+import",
        r"(?m)print\s*\(",
    ]);

    static ref JAVASCRIPT_PATTERNS: Vec<Regex> = compile(&[
        r"(?m)function\s+[A-Za-z0-9_]+\s*\(",
        r"(?m)const\s+[A-Za-z0-9_]+\s*=",
        r"(?m)let\s+[A-Za-z0-9_]+\s*=",
        r"(?m)console\.log\s*\(",
        r"(?m)=>\s*\{",
    ]);
}

fn compile(patterns: &[&str]) -> Vec<Regex> {
    patterns
        .iter()
        .map(|p| Regex::new(p).expect("detector pattern must compile"))
        .collect()
}

/// Classify `text`, or `None` when no indicator matches
pub fn detect(text: &str) -> Option<Language> {
    if PYTHON_PATTERNS.iter().any(|re| re.is_match(text)) {
        return Some(Language::Python);
    }
    if JAVASCRIPT_PATTERNS.iter().any(|re| re.is_match(text)) {
        return Some(Language::JavaScript);
    }
    None
}

/// Detection only fires while no language is chosen and there is input
pub fn should_detect(current: Option<Language>, text: &str) -> bool {
    current.is_none() && !text.trim().is_empty()
}

/// Run detection if allowed for the current selection
pub fn detect_for(current: Option<Language>, text: &str) -> Option<Language> {
    if !should_detect(current, text) {
        return None;
    }
    let detected = detect(text);
    debug!(?detected, chars = text.len(), "language detection");
    detected
}
