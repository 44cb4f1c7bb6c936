//! Archive handling for DOCX files
//!
//! DOCX files are ZIP archives containing XML parts and media.

use std::collections::HashMap;
use std::fs::File;
use std::io::{Read, Seek};
use std::path::Path;

use zip::read::ZipArchive;

use crate::error::{OoxmlError, Result};

/// Main document part
pub const DOCUMENT_PART: &str = "word/document.xml";
/// Style definitions part
pub const STYLES_PART: &str = "word/styles.xml";

/// Represents an unpacked OOXML package
#[derive(Debug)]
pub struct OoxmlArchive {
    /// All files in the archive, keyed by path
    files: HashMap<String, Vec<u8>>,
}

impl OoxmlArchive {
    /// Open and unpack a DOCX file
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path)?;
        Self::from_reader(file)
    }

    /// Create from any reader that implements Read + Seek
    pub fn from_reader<R: Read + Seek>(reader: R) -> Result<Self> {
        let mut archive = ZipArchive::new(reader)?;
        let mut files = HashMap::new();

        for i in 0..archive.len() {
            let mut file = archive.by_index(i)?;
            let name = file.name().to_string();

            // Skip directories
            if name.ends_with('/') {
                continue;
            }

            let mut contents = Vec::new();
            file.read_to_end(&mut contents)?;
            files.insert(name, contents);
        }

        Ok(Self { files })
    }

    /// Get a file's contents by path
    pub fn get(&self, path: &str) -> Option<&[u8]> {
        self.files.get(path).map(|v| v.as_slice())
    }

    /// Get the main document content (word/document.xml)
    pub fn document_xml(&self) -> Result<&[u8]> {
        self.get(DOCUMENT_PART)
            .ok_or_else(|| OoxmlError::MissingFile(DOCUMENT_PART.to_string()))
    }

    /// Get the styles definition (word/styles.xml), if present
    pub fn styles_xml(&self) -> Option<&[u8]> {
        self.get(STYLES_PART)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::build_docx;
    use std::io::Cursor;

    #[test]
    fn test_from_reader_unpacks_parts() {
        let docx = build_docx(
            br#"<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:body/></w:document>"#,
            None,
        )
        .unwrap();
        let archive = OoxmlArchive::from_reader(Cursor::new(docx)).unwrap();

        assert!(archive.get("[Content_Types].xml").is_some());
        assert!(archive.styles_xml().is_none());
        assert!(archive.document_xml().is_ok());
    }

    #[test]
    fn test_missing_document_part() {
        let archive = OoxmlArchive {
            files: HashMap::new(),
        };
        let err = archive.document_xml().unwrap_err();
        assert!(matches!(err, OoxmlError::MissingFile(ref p) if p == DOCUMENT_PART));
    }

    #[test]
    fn test_open_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("book.docx");
        let docx = build_docx(
            br#"<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:body/></w:document>"#,
            Some(br#"<w:styles xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"/>"#),
        )
        .unwrap();
        std::fs::write(&path, docx).unwrap();

        let archive = OoxmlArchive::open(&path).unwrap();
        let styles = archive.styles_xml().unwrap();
        assert!(String::from_utf8_lossy(styles).contains("w:styles"));
    }
}
