//! Document content parsing (word/document.xml)
//!
//! This module parses the main document content and extracts paragraphs,
//! tables, and embedded math in reading order.

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use folio_ast::Math;

use crate::error::{OoxmlError, Result};
use crate::math::{read_subtree, to_math, OmmlElement};

/// A parsed Word document
#[derive(Debug, Clone, Default)]
pub struct Document {
    /// Document body blocks
    pub blocks: Vec<Block>,
}

/// Block-level elements
#[derive(Debug, Clone)]
pub enum Block {
    /// A paragraph
    Paragraph(Paragraph),
    /// A table
    Table(Table),
}

/// A paragraph with its content and style
#[derive(Debug, Clone, Default)]
pub struct Paragraph {
    /// Style ID (references styles.xml)
    pub style_id: Option<String>,
    /// Children (runs, hyperlinks, math)
    pub children: Vec<ParagraphChild>,
}

/// Child elements of a paragraph
#[derive(Debug, Clone)]
pub enum ParagraphChild {
    /// A text run
    Run(Run),
    /// A hyperlink
    Hyperlink(Hyperlink),
    /// An Office Math object (`m:oMath` or `m:oMathPara`)
    Math(Math),
}

/// A hyperlink with its content
#[derive(Debug, Clone, Default)]
pub struct Hyperlink {
    /// Child runs inside the hyperlink
    pub runs: Vec<Run>,
}

/// A text run with formatting
#[derive(Debug, Clone, Default)]
pub struct Run {
    /// The text content
    pub text: String,
    /// Whether the text is bold
    pub bold: bool,
    /// Whether the text is italic
    pub italic: bool,
}

/// A table
#[derive(Debug, Clone, Default)]
pub struct Table {
    /// Table rows
    pub rows: Vec<TableRow>,
}

/// A table row
#[derive(Debug, Clone, Default)]
pub struct TableRow {
    /// Cells in this row
    pub cells: Vec<TableCell>,
}

/// A table cell
#[derive(Debug, Clone, Default)]
pub struct TableCell {
    /// Paragraphs in this cell
    pub paragraphs: Vec<Paragraph>,
}

impl Document {
    /// Parse a document from XML bytes
    pub fn parse(xml: &[u8]) -> Result<Self> {
        let mut reader = Reader::from_reader(xml);
        // Don't trim text - preserve whitespace in runs
        reader.config_mut().trim_text(false);

        let mut blocks = Vec::new();
        let mut buf = Vec::new();

        let mut in_body = false;
        let mut current_para: Option<Paragraph> = None;
        let mut current_run: Option<Run> = None;
        let mut current_hyperlink: Option<Hyperlink> = None;
        // Only the outermost table becomes a block; nested tables feed its cells
        let mut current_table: Option<TableBuilder> = None;
        let mut table_depth = 0u32;
        // Track if we're inside a <w:t> element (actual text vs instrText)
        let mut in_text_element = false;
        // Block-level content controls (generated TOCs) are not body paragraphs
        let mut block_sdt_depth = 0u32;
        // Paragraphs nested inside a paragraph (text boxes) are not body content
        let mut nested_para_depth = 0u32;

        loop {
            match reader.read_event_into(&mut buf) {
                Ok(Event::Start(ref e)) => {
                    let name = e.local_name();
                    match name.as_ref() {
                        b"p" if current_para.is_some() => nested_para_depth += 1,
                        _ if nested_para_depth > 0 => {}
                        b"body" => in_body = true,
                        b"oMathPara" | b"oMath" if current_para.is_some() => {
                            let root = OmmlElement::from_start(e);
                            let display = root.name == "oMathPara";
                            let element = read_subtree(&mut reader, root)?;
                            if let Some(ref mut para) = current_para {
                                para.children
                                    .push(ParagraphChild::Math(to_math(&element, display)));
                            }
                        }
                        b"sdt" if current_para.is_none() && table_depth == 0 => {
                            block_sdt_depth += 1;
                        }
                        b"p" if in_body && block_sdt_depth == 0 => {
                            current_para = Some(Paragraph::default());
                        }
                        b"pStyle" => set_style(&mut current_para, e),
                        b"r" if current_para.is_some() => {
                            current_run = Some(Run::default());
                        }
                        b"b" => set_flag(&mut current_run, e, bold_flag),
                        b"i" => set_flag(&mut current_run, e, italic_flag),
                        b"t" if current_run.is_some() => {
                            in_text_element = true;
                        }
                        b"hyperlink" if current_para.is_some() => {
                            current_hyperlink = Some(Hyperlink::default());
                        }
                        b"tbl" if in_body => {
                            if table_depth == 0 {
                                current_table = Some(TableBuilder::default());
                            }
                            table_depth += 1;
                        }
                        b"tr" if table_depth == 1 => {
                            if let Some(ref mut table) = current_table {
                                table.current_row = Some(RowBuilder::default());
                            }
                        }
                        b"tc" if table_depth == 1 => {
                            if let Some(row) = current_table
                                .as_mut()
                                .and_then(|t| t.current_row.as_mut())
                            {
                                row.current_cell = Some(TableCell::default());
                            }
                        }
                        _ => {}
                    }
                }
                Ok(Event::End(ref e)) => {
                    let name = e.local_name();
                    match name.as_ref() {
                        b"p" if nested_para_depth > 0 => nested_para_depth -= 1,
                        _ if nested_para_depth > 0 => {}
                        b"body" => in_body = false,
                        b"sdt" if current_para.is_none() && table_depth == 0 => {
                            block_sdt_depth = block_sdt_depth.saturating_sub(1);
                        }
                        b"p" => {
                            if let Some(para) = current_para.take() {
                                match current_table.as_mut() {
                                    Some(table) => table.push_paragraph(para),
                                    None => blocks.push(Block::Paragraph(para)),
                                }
                            }
                        }
                        b"t" => in_text_element = false,
                        b"r" => {
                            if let Some(run) = current_run.take() {
                                if !run.text.is_empty() {
                                    if let Some(ref mut hyperlink) = current_hyperlink {
                                        hyperlink.runs.push(run);
                                    } else if let Some(ref mut para) = current_para {
                                        para.children.push(ParagraphChild::Run(run));
                                    }
                                }
                            }
                        }
                        b"hyperlink" => {
                            if let Some(hyperlink) = current_hyperlink.take() {
                                if let Some(ref mut para) = current_para {
                                    para.children.push(ParagraphChild::Hyperlink(hyperlink));
                                }
                            }
                        }
                        b"tc" if table_depth == 1 => {
                            if let Some(row) = current_table
                                .as_mut()
                                .and_then(|t| t.current_row.as_mut())
                            {
                                if let Some(cell) = row.current_cell.take() {
                                    row.cells.push(cell);
                                }
                            }
                        }
                        b"tr" if table_depth == 1 => {
                            if let Some(ref mut table) = current_table {
                                if let Some(row) = table.current_row.take() {
                                    table.rows.push(TableRow { cells: row.cells });
                                }
                            }
                        }
                        b"tbl" if table_depth > 0 => {
                            table_depth -= 1;
                            if table_depth == 0 {
                                if let Some(table) = current_table.take() {
                                    blocks.push(Block::Table(Table { rows: table.rows }));
                                }
                            }
                        }
                        _ => {}
                    }
                }
                Ok(Event::Empty(ref e)) => {
                    // Self-closing elements like <w:pStyle w:val="Heading1"/>
                    let name = e.local_name();
                    match name.as_ref() {
                        _ if nested_para_depth > 0 => {}
                        b"p" if in_body && block_sdt_depth == 0 && current_para.is_none() => {
                            let para = Paragraph::default();
                            match current_table.as_mut() {
                                Some(table) => table.push_paragraph(para),
                                None => blocks.push(Block::Paragraph(para)),
                            }
                        }
                        b"pStyle" => set_style(&mut current_para, e),
                        b"b" => set_flag(&mut current_run, e, bold_flag),
                        b"i" => set_flag(&mut current_run, e, italic_flag),
                        b"tab" if current_run.is_some() => {
                            if let Some(ref mut run) = current_run {
                                run.text.push('\t');
                            }
                        }
                        b"br" | b"cr" if current_run.is_some() => {
                            if let Some(ref mut run) = current_run {
                                run.text.push('\n');
                            }
                        }
                        _ => {}
                    }
                }
                Ok(Event::Text(ref e)) => {
                    // Only capture text inside <w:t> elements, not <w:instrText>
                    if in_text_element {
                        if let Some(ref mut run) = current_run {
                            let text = e.unescape().map_err(OoxmlError::Xml)?;
                            run.text.push_str(&text);
                        }
                    }
                }
                Ok(Event::Eof) => break,
                Err(e) => return Err(OoxmlError::Xml(e)),
                _ => {}
            }
            buf.clear();
        }

        Ok(Document { blocks })
    }

    /// Get all top-level paragraphs
    pub fn paragraphs(&self) -> impl Iterator<Item = &Paragraph> {
        self.blocks.iter().filter_map(|block| match block {
            Block::Paragraph(p) => Some(p),
            Block::Table(_) => None,
        })
    }

    /// Get plain text content
    pub fn plain_text(&self) -> String {
        self.paragraphs()
            .map(|p| p.plain_text())
            .collect::<Vec<_>>()
            .join("\n\n")
    }
}

impl Paragraph {
    /// Get plain text of this paragraph (math excluded)
    pub fn plain_text(&self) -> String {
        self.runs().map(|r| r.text.as_str()).collect()
    }

    /// Get all runs (flattening hyperlinks)
    pub fn runs(&self) -> impl Iterator<Item = &Run> {
        self.children.iter().flat_map(|child| match child {
            ParagraphChild::Run(run) => std::slice::from_ref(run).iter(),
            ParagraphChild::Hyperlink(hyperlink) => hyperlink.runs.iter(),
            ParagraphChild::Math(_) => Default::default(),
        })
    }
}

impl TableCell {
    /// Cell text: paragraph texts joined by newlines
    pub fn plain_text(&self) -> String {
        self.paragraphs
            .iter()
            .map(|p| p.plain_text())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[derive(Default)]
struct TableBuilder {
    rows: Vec<TableRow>,
    current_row: Option<RowBuilder>,
}

impl TableBuilder {
    fn push_paragraph(&mut self, para: Paragraph) {
        if let Some(cell) = self
            .current_row
            .as_mut()
            .and_then(|row| row.current_cell.as_mut())
        {
            cell.paragraphs.push(para);
        }
    }
}

#[derive(Default)]
struct RowBuilder {
    cells: Vec<TableCell>,
    current_cell: Option<TableCell>,
}

// Helper functions

fn set_style(para: &mut Option<Paragraph>, e: &BytesStart) {
    if let (Some(para), Some(style)) = (para.as_mut(), get_attr(e, b"w:val")) {
        para.style_id = Some(style);
    }
}

/// Toggle properties are on unless `w:val` is "0"/"false"
fn set_flag(run: &mut Option<Run>, e: &BytesStart, field: fn(&mut Run) -> &mut bool) {
    if let Some(run) = run.as_mut() {
        let is_off = get_attr(e, b"w:val")
            .map(|v| v == "0" || v == "false")
            .unwrap_or(false);
        *field(run) = !is_off;
    }
}

fn bold_flag(run: &mut Run) -> &mut bool {
    &mut run.bold
}

fn italic_flag(run: &mut Run) -> &mut bool {
    &mut run.italic
}

fn get_attr(e: &BytesStart, name: &[u8]) -> Option<String> {
    e.attributes()
        .filter_map(|a| a.ok())
        .find(|a| a.key.as_ref() == name)
        .and_then(|a| String::from_utf8(a.value.to_vec()).ok())
}
