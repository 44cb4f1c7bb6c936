//! Fixture helpers for building DOCX packages in memory
//!
//! Used by this crate's tests and by downstream integration tests that need
//! a real `.docx` on disk.

use std::io::{Cursor, Write};

use zip::write::SimpleFileOptions;
use zip::CompressionMethod;
use zip::ZipWriter;

use crate::error::Result;

const CONTENT_TYPES: &[u8] = br#"<?xml version="1.0" encoding="UTF-8"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">
  <Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/>
  <Default Extension="xml" ContentType="application/xml"/>
  <Override PartName="/word/document.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml"/>
</Types>"#;

const ROOT_RELS: &[u8] = br#"<?xml version="1.0" encoding="UTF-8"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
  <Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="word/document.xml"/>
</Relationships>"#;

/// Namespace declarations for `w:` and `m:` prefixes
pub const NAMESPACES: &str = r#"xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main" xmlns:m="http://schemas.openxmlformats.org/officeDocument/2006/math""#;

/// Build a minimal DOCX package from a document part and optional styles part
pub fn build_docx(document_xml: &[u8], styles_xml: Option<&[u8]>) -> Result<Vec<u8>> {
    let mut buffer = Cursor::new(Vec::new());
    let mut zip = ZipWriter::new(&mut buffer);
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Stored);

    zip.start_file("[Content_Types].xml", options)?;
    zip.write_all(CONTENT_TYPES)?;

    zip.start_file("_rels/.rels", options)?;
    zip.write_all(ROOT_RELS)?;

    zip.start_file("word/document.xml", options)?;
    zip.write_all(document_xml)?;

    if let Some(styles) = styles_xml {
        zip.start_file("word/styles.xml", options)?;
        zip.write_all(styles)?;
    }

    zip.finish()?;
    Ok(buffer.into_inner())
}

/// Wrap body XML in a `w:document` element declaring the usual namespaces
pub fn wrap_body(body: &str) -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?><w:document {}><w:body>{}</w:body></w:document>"#,
        NAMESPACES, body
    )
}
