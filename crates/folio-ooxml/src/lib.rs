//! # folio-ooxml
//!
//! DOCX reading for folio.
//!
//! This crate provides functionality to:
//! - Unpack a DOCX package and parse `word/document.xml` in reading order
//! - Resolve paragraph style ids to display names via `word/styles.xml`
//! - Parse Office Math (OMML) into the [`folio_ast::MathNode`] tree
//!
//! ## Example: Loading a Document
//!
//! ```no_run
//! use folio_ooxml::load_docx;
//!
//! let blocks = load_docx("book.docx")?;
//! for block in &blocks {
//!     println!("{:?}", block);
//! }
//! # Ok::<(), folio_ooxml::OoxmlError>(())
//! ```

use std::path::Path;

pub mod archive;
pub mod conversion;
pub mod document;
pub mod error;
pub mod math;
pub mod styles;
pub mod test_utils;

pub use archive::OoxmlArchive;
pub use conversion::{convert_document, ConversionContext, ToAst};
pub use document::{
    Block, Document, Hyperlink, Paragraph, ParagraphChild, Run, Table, TableCell, TableRow,
};
pub use error::{OoxmlError, Result};
pub use math::{parse_omml, OmmlElement};
pub use styles::{Style, StyleSheet, StyleType};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Read a DOCX file into AST blocks in reading order
pub fn load_docx<P: AsRef<Path>>(path: P) -> Result<Vec<folio_ast::Block>> {
    let archive = OoxmlArchive::open(path)?;
    load_archive(&archive)
}

/// Convert an already unpacked archive into AST blocks
pub fn load_archive(archive: &OoxmlArchive) -> Result<Vec<folio_ast::Block>> {
    let document = Document::parse(archive.document_xml()?)?;
    let styles = match archive.styles_xml() {
        Some(xml) => Some(StyleSheet::parse(xml)?),
        None => None,
    };

    tracing::debug!(
        blocks = document.blocks.len(),
        styles = styles.as_ref().map_or(0, |s| s.len()),
        "parsed document part"
    );

    Ok(convert_document(&document, styles.as_ref()))
}
