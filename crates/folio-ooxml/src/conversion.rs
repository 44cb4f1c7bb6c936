//! Conversion from OOXML types to folio-ast types
//!
//! Resolves style ids to display names and flattens hyperlinks into plain
//! runs. Table cells collapse to their text.

use folio_ast::{
    Block as AstBlock, Paragraph as AstParagraph, ParagraphItem, Run as AstRun,
    Table as AstTable,
};

use crate::document::{Block, Document, Paragraph, ParagraphChild, Run, Table};
use crate::styles::{StyleSheet, FALLBACK_PARAGRAPH_STYLE};

/// Context for conversion, holding style information
#[derive(Default)]
pub struct ConversionContext<'a> {
    /// Style sheet for resolving display names
    pub styles: Option<&'a StyleSheet>,
}

impl<'a> ConversionContext<'a> {
    /// Create a new context without styles
    pub fn new() -> Self {
        Self { styles: None }
    }

    /// Create a context with style information
    pub fn with_styles(styles: &'a StyleSheet) -> Self {
        Self {
            styles: Some(styles),
        }
    }

    /// Display name for a paragraph's style reference
    pub fn style_name(&self, style_id: Option<&str>) -> String {
        match self.styles {
            Some(styles) => styles.display_name(style_id),
            None => style_id.unwrap_or(FALLBACK_PARAGRAPH_STYLE).to_string(),
        }
    }
}

/// Trait for converting OOXML types to AST types
pub trait ToAst {
    /// The AST type this converts to
    type Output;

    /// Convert to AST representation
    fn to_ast(&self, ctx: &ConversionContext) -> Self::Output;
}

impl ToAst for Run {
    type Output = AstRun;

    fn to_ast(&self, _ctx: &ConversionContext) -> Self::Output {
        AstRun {
            text: self.text.clone(),
            bold: self.bold,
            italic: self.italic,
        }
    }
}

impl ToAst for Paragraph {
    type Output = AstParagraph;

    fn to_ast(&self, ctx: &ConversionContext) -> Self::Output {
        let mut items = Vec::with_capacity(self.children.len());
        for child in &self.children {
            match child {
                ParagraphChild::Run(run) => items.push(ParagraphItem::Run(run.to_ast(ctx))),
                ParagraphChild::Hyperlink(link) => {
                    items.extend(link.runs.iter().map(|r| ParagraphItem::Run(r.to_ast(ctx))))
                }
                ParagraphChild::Math(math) => items.push(ParagraphItem::Math(math.clone())),
            }
        }

        AstParagraph {
            style: ctx.style_name(self.style_id.as_deref()),
            items,
        }
    }
}

impl ToAst for Table {
    type Output = AstTable;

    fn to_ast(&self, _ctx: &ConversionContext) -> Self::Output {
        AstTable {
            rows: self
                .rows
                .iter()
                .map(|row| row.cells.iter().map(|cell| cell.plain_text()).collect())
                .collect(),
        }
    }
}

impl ToAst for Block {
    type Output = AstBlock;

    fn to_ast(&self, ctx: &ConversionContext) -> Self::Output {
        match self {
            Block::Paragraph(p) => AstBlock::Paragraph(p.to_ast(ctx)),
            Block::Table(t) => AstBlock::Table(t.to_ast(ctx)),
        }
    }
}

/// Convert a parsed document into AST blocks, resolving style names when a
/// style sheet is available
pub fn convert_document(doc: &Document, styles: Option<&StyleSheet>) -> Vec<AstBlock> {
    let ctx = ConversionContext { styles };
    doc.blocks.iter().map(|b| b.to_ast(&ctx)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::{Hyperlink, TableCell, TableRow};
    use folio_ast::{Math, MathNode};

    fn run(text: &str, bold: bool) -> Run {
        Run {
            text: text.to_string(),
            bold,
            italic: false,
        }
    }

    #[test]
    fn test_style_name_without_styles() {
        let ctx = ConversionContext::new();
        assert_eq!(ctx.style_name(Some("Heading1")), "Heading1");
        assert_eq!(ctx.style_name(None), "Normal");
    }

    #[test]
    fn test_hyperlink_runs_flattened() {
        let para = Paragraph {
            style_id: None,
            children: vec![
                ParagraphChild::Run(run("See ", false)),
                ParagraphChild::Hyperlink(Hyperlink {
                    runs: vec![run("the ", false), run("site", true)],
                }),
            ],
        };

        let ast = para.to_ast(&ConversionContext::new());
        assert_eq!(ast.items.len(), 3);
        assert_eq!(ast.text(), "See the site");
        assert!(ast.runs().nth(2).unwrap().bold);
    }

    #[test]
    fn test_math_carried_through() {
        let math = Math::display(MathNode::run("x"));
        let para = Paragraph {
            style_id: Some("Normal".to_string()),
            children: vec![ParagraphChild::Math(math.clone())],
        };

        let ast = para.to_ast(&ConversionContext::new());
        assert_eq!(ast.math().next(), Some(&math));
        assert!(ast.has_display_math());
    }

    #[test]
    fn test_table_cells_to_text() {
        let cell = |text: &str| TableCell {
            paragraphs: vec![Paragraph {
                style_id: None,
                children: vec![ParagraphChild::Run(run(text, false))],
            }],
        };
        let table = Table {
            rows: vec![TableRow {
                cells: vec![cell("Symbol"), cell("Value")],
            }],
        };

        let doc = Document {
            blocks: vec![Block::Table(table)],
        };
        let blocks = convert_document(&doc, None);
        let AstBlock::Table(t) = &blocks[0] else {
            panic!("Expected table");
        };
        assert_eq!(t.rows, vec![vec!["Symbol".to_string(), "Value".to_string()]]);
    }

    #[test]
    fn test_convert_with_styles() {
        let styles = StyleSheet::parse(
            br#"<w:styles xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main">
                <w:style w:type="paragraph" w:styleId="Heading2"><w:name w:val="heading 2"/></w:style>
            </w:styles>"#,
        )
        .unwrap();
        let doc = Document {
            blocks: vec![Block::Paragraph(Paragraph {
                style_id: Some("Heading2".to_string()),
                children: vec![],
            })],
        };

        let blocks = convert_document(&doc, Some(&styles));
        assert_eq!(blocks[0].as_paragraph().unwrap().style, "Heading 2");
    }
}
