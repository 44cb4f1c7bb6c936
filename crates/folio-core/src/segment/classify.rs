//! Numbered sub-heading detection
//!
//! Manuscripts mark "4.1 Title" headings inconsistently: sometimes every run
//! is bold, sometimes only the paragraph style says so. Each signal is its own
//! predicate; [`classify_heading`] accepts either.

use std::sync::OnceLock;

use regex::Regex;

use folio_ast::Paragraph;

use crate::config::StructureSettings;

/// Rendered level of a numbered sub-heading
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum HeadingLevel {
    /// "4 Title"
    H2,
    /// "4.1 Title"
    H3,
    /// "4.1.1 Title" and deeper
    H4,
}

impl HeadingLevel {
    /// HTML tag name
    pub fn tag(self) -> &'static str {
        match self {
            HeadingLevel::H2 => "h2",
            HeadingLevel::H3 => "h3",
            HeadingLevel::H4 => "h4",
        }
    }
}

/// Whether the trimmed text starts with `N`, `N.`, `N.N`, ... followed by whitespace
pub fn has_numbered_prefix(text: &str) -> bool {
    static NUMBERED_RE: OnceLock<Regex> = OnceLock::new();
    let re = NUMBERED_RE.get_or_init(|| Regex::new(r"^\d+(\.\d+)*\.?\s").unwrap());
    re.is_match(text.trim())
}

/// Whether the paragraph has runs and every run with visible text is bold
pub fn all_runs_bold(para: &Paragraph) -> bool {
    let mut runs = para.runs().peekable();
    runs.peek().is_some() && runs.filter(|r| !r.text.trim().is_empty()).all(|r| r.bold)
}

/// Whether the paragraph uses the designated body text style
pub fn is_body_text_style(para: &Paragraph, settings: &StructureSettings) -> bool {
    para.style == settings.body_text_style
}

/// Level from the count of dot-separated numbers before the first space
pub fn heading_level(text: &str) -> HeadingLevel {
    let prefix = text.split_whitespace().next().unwrap_or("");
    let prefix = prefix.strip_suffix('.').unwrap_or(prefix);
    match prefix.split('.').count() {
        0 | 1 => HeadingLevel::H2,
        2 => HeadingLevel::H3,
        _ => HeadingLevel::H4,
    }
}

/// Classify a paragraph as a numbered sub-heading, if it is one
pub fn classify_heading(para: &Paragraph, settings: &StructureSettings) -> Option<HeadingLevel> {
    let text = para.text();
    if !has_numbered_prefix(&text) {
        return None;
    }
    if all_runs_bold(para) || is_body_text_style(para, settings) {
        Some(heading_level(&text))
    } else {
        None
    }
}
