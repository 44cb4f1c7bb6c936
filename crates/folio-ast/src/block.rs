//! Block-level elements in reading order
//!
//! A document is a flat `Vec<Block>`. Structure (chapters, headings) is not
//! stored here; it is reconstructed later from style names and text patterns.

use serde::{Deserialize, Serialize};

use crate::math::Math;

/// Block-level content element
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Block {
    /// A paragraph of runs and embedded math
    Paragraph(Paragraph),
    /// A table of plain-text cells
    Table(Table),
}

impl Block {
    /// Returns the paragraph if this block is one
    pub fn as_paragraph(&self) -> Option<&Paragraph> {
        match self {
            Block::Paragraph(p) => Some(p),
            Block::Table(_) => None,
        }
    }
}

/// A paragraph with its style name and content
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Paragraph {
    /// Display name of the paragraph style (e.g. "Heading 1", "Body Text")
    pub style: String,
    /// Runs and math objects in document order
    pub items: Vec<ParagraphItem>,
}

/// Child content of a paragraph
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ParagraphItem {
    /// A styled text run
    Run(Run),
    /// An embedded math object
    Math(Math),
}

/// A text run with formatting
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Run {
    /// The text content
    pub text: String,
    /// Whether the text is bold
    pub bold: bool,
    /// Whether the text is italic
    pub italic: bool,
}

/// A table
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Table {
    /// Rows of cell text, row-major
    pub rows: Vec<Vec<String>>,
}

impl Paragraph {
    /// Create a paragraph with the given style and no content
    pub fn new(style: impl Into<String>) -> Self {
        Self {
            style: style.into(),
            items: Vec::new(),
        }
    }

    /// Append a run (builder style, mostly for tests and fixtures)
    pub fn with_run(mut self, run: Run) -> Self {
        self.items.push(ParagraphItem::Run(run));
        self
    }

    /// Append a math object
    pub fn with_math(mut self, math: Math) -> Self {
        self.items.push(ParagraphItem::Math(math));
        self
    }

    /// All text runs, skipping math
    pub fn runs(&self) -> impl Iterator<Item = &Run> {
        self.items.iter().filter_map(|item| match item {
            ParagraphItem::Run(run) => Some(run),
            ParagraphItem::Math(_) => None,
        })
    }

    /// All math objects
    pub fn math(&self) -> impl Iterator<Item = &Math> {
        self.items.iter().filter_map(|item| match item {
            ParagraphItem::Math(math) => Some(math),
            ParagraphItem::Run(_) => None,
        })
    }

    /// Concatenated run text (math excluded)
    pub fn text(&self) -> String {
        self.runs().map(|r| r.text.as_str()).collect()
    }

    /// Whether any run carries non-whitespace text
    pub fn has_visible_text(&self) -> bool {
        self.runs().any(|r| !r.text.trim().is_empty())
    }

    /// Whether the paragraph embeds any math
    pub fn has_math(&self) -> bool {
        self.math().next().is_some()
    }

    /// Whether the paragraph embeds a display (block) math object
    pub fn has_display_math(&self) -> bool {
        self.math().any(|m| m.display)
    }

    /// No visible text and no math
    pub fn is_empty(&self) -> bool {
        !self.has_visible_text() && !self.has_math()
    }
}

impl Run {
    /// Plain, unformatted run
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            bold: false,
            italic: false,
        }
    }

    /// Bold run
    pub fn bold(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            bold: true,
            italic: false,
        }
    }

    /// Italic run
    pub fn italic(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            bold: false,
            italic: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::MathNode;

    #[test]
    fn test_text_skips_math() {
        let p = Paragraph::new("Normal")
            .with_run(Run::plain("Energy "))
            .with_math(Math::inline(MathNode::run("E")))
            .with_run(Run::plain(" is conserved."));

        assert_eq!(p.text(), "Energy  is conserved.");
        assert!(p.has_math());
        assert!(!p.has_display_math());
    }

    #[test]
    fn test_whitespace_paragraph_is_empty() {
        let p = Paragraph::new("Normal").with_run(Run::plain("   "));
        assert!(!p.has_visible_text());
        assert!(p.is_empty());
    }

    #[test]
    fn test_math_only_paragraph_is_not_empty() {
        let p = Paragraph::new("Normal").with_math(Math::display(MathNode::run("x")));
        assert!(!p.has_visible_text());
        assert!(!p.is_empty());
        assert!(p.has_display_math());
    }

    #[test]
    fn test_block_serializes() {
        let block = Block::Table(Table {
            rows: vec![vec!["a".to_string(), "b".to_string()]],
        });
        let json = serde_json::to_string(&block).unwrap();
        assert!(json.contains("Table"));
        assert!(block.as_paragraph().is_none());
    }
}
