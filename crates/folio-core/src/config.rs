//! Book configuration
//!
//! Everything that is specific to one manuscript lives here: titles, the
//! chapter and part tables, the literal appendix markers, and the paragraph
//! offsets that bound the preface. Defaults describe *Ocean From Motion*;
//! other books supply a `folio.toml`.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised while loading a configuration file
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The file could not be read
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file is not valid TOML for this schema
    #[error("invalid configuration: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Result type for configuration loading
pub type Result<T> = std::result::Result<T, ConfigError>;

/// Top-level book configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BookConfig {
    /// Book title shown in the navigation bar and on the cover
    pub title: String,
    /// Cover subtitle
    pub subtitle: String,
    /// Secondary cover lines; the last one is emphasized
    pub tagline: Vec<String>,
    /// URL prefix for every generated link (no trailing slash)
    pub base_url: String,
    /// File name of the downloadable source document
    pub download_name: String,
    /// Anchors and skip counts used by the segmenter
    pub structure: StructureSettings,
    /// Chapter table, in chapter order
    pub chapters: Vec<ChapterInfo>,
    /// Appendix page titles
    pub appendices: AppendixTitles,
}

impl Default for BookConfig {
    fn default() -> Self {
        Self {
            title: "Ocean From Motion".to_string(),
            subtitle: "A Study in the Nature of Possible Primitives of Motion".to_string(),
            tagline: vec![
                "Incorporating".to_string(),
                "The Motion Calendar".to_string(),
                "A Universe of Motion Rather Than in Motion".to_string(),
            ],
            base_url: "/Ocean-From-Motion".to_string(),
            download_name: "Ocean_From_Motion.docx".to_string(),
            structure: StructureSettings::default(),
            chapters: default_chapters(),
            appendices: AppendixTitles::default(),
        }
    }
}

impl BookConfig {
    /// Parse configuration from a TOML string
    pub fn from_toml_str(toml_str: &str) -> Result<Self> {
        Ok(toml::from_str(toml_str)?)
    }

    /// Load configuration from a TOML file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    /// Number of chapters in the book
    pub fn chapter_count(&self) -> usize {
        self.chapters.len()
    }

    /// Chapter entry by chapter number
    pub fn chapter(&self, number: u32) -> Option<&ChapterInfo> {
        self.chapters.iter().find(|c| c.number == number)
    }

    /// Page title for a chapter, e.g. "Chapter 1: Heat"
    pub fn chapter_title(&self, number: u32) -> String {
        match self.chapter(number) {
            Some(info) if !info.title.is_empty() => {
                format!("Chapter {}: {}", number, info.title)
            }
            _ => format!("Chapter {}", number),
        }
    }
}

/// Segmentation anchors and rendering skip counts
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StructureSettings {
    /// Paragraph styles whose name starts with this are top-level headings
    pub heading_style_prefix: String,
    /// Style that marks a numbered paragraph as a sub-heading
    pub body_text_style: String,
    /// Heading text prefix of a part label
    pub part_prefix: String,
    /// Preface bounds as paragraph indices (end exclusive)
    pub preface: ParagraphRange,
    /// Exact trimmed text of the paragraph that opens appendix A
    pub appendix_a_marker: String,
    /// Exact trimmed text of the paragraph that opens appendix B
    pub appendix_b_marker: String,
    /// Leading content paragraphs elided from the preface
    pub preface_skip: usize,
    /// Leading content paragraphs elided from each chapter
    pub chapter_skip: usize,
    /// Leading content paragraphs elided from each appendix
    pub appendix_skip: usize,
}

impl Default for StructureSettings {
    fn default() -> Self {
        Self {
            heading_style_prefix: "Heading".to_string(),
            body_text_style: "Body Text".to_string(),
            part_prefix: "PART".to_string(),
            preface: ParagraphRange { start: 77, end: 92 },
            appendix_a_marker: "APPENDIX A".to_string(),
            appendix_b_marker: "APPENDIX B".to_string(),
            preface_skip: 1,
            chapter_skip: 2,
            appendix_skip: 2,
        }
    }
}

/// Half-open range of paragraph indices
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParagraphRange {
    pub start: usize,
    pub end: usize,
}

/// One entry of the chapter table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChapterInfo {
    pub number: u32,
    pub title: String,
    pub part: PartInfo,
}

/// Part a chapter belongs to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartInfo {
    /// Roman numeral, e.g. "II"
    pub number: String,
    pub name: String,
}

impl PartInfo {
    /// Label as shown in the table of contents, e.g. "Part II: The Motion Calendar"
    pub fn label(&self) -> String {
        format!("Part {}: {}", self.number, self.name)
    }
}

/// Titles of the two appendix pages
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppendixTitles {
    pub a: String,
    pub b: String,
}

impl Default for AppendixTitles {
    fn default() -> Self {
        Self {
            a: "Appendix A: Mathematical Constants".to_string(),
            b: "Appendix B: Notation Reference".to_string(),
        }
    }
}

fn default_chapters() -> Vec<ChapterInfo> {
    const TITLES: [&str; 15] = [
        "A Universe of Motion",
        "Heat",
        "Polarity",
        "Existence",
        "Righteousness",
        "Order",
        "Movement",
        "Entropy",
        "Learning Systems",
        "Identity and Persistence",
        "Agency and Choice",
        "Error, Correction, and Growth",
        "Ethics as Stability",
        "Coercion as Forced Motion",
        "Freedom as Available Motion",
    ];

    TITLES
        .iter()
        .zip(0u32..)
        .map(|(title, number)| {
            let (part_number, part_name) = match number {
                0 => ("I", "Orientation"),
                1..=6 => ("II", "The Motion Calendar"),
                7..=11 => ("III", "Systems"),
                _ => ("IV", "Meaning"),
            };
            ChapterInfo {
                number,
                title: title.to_string(),
                part: PartInfo {
                    number: part_number.to_string(),
                    name: part_name.to_string(),
                },
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_book() {
        let config = BookConfig::default();
        assert_eq!(config.chapter_count(), 15);
        assert_eq!(config.chapter_title(1), "Chapter 1: Heat");
        assert_eq!(config.chapter(7).unwrap().part.label(), "Part III: Systems");
        assert_eq!(config.chapter(14).unwrap().part.number, "IV");
        assert_eq!(config.structure.preface, ParagraphRange { start: 77, end: 92 });
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = BookConfig::from_toml_str(
            r#"
            title = "Tides"
            base_url = ""

            [structure]
            chapter_skip = 1
            preface = { start = 3, end = 5 }
            "#,
        )
        .unwrap();

        assert_eq!(config.title, "Tides");
        assert_eq!(config.base_url, "");
        assert_eq!(config.structure.chapter_skip, 1);
        assert_eq!(config.structure.appendix_skip, 2);
        assert_eq!(config.structure.preface.end, 5);
        assert_eq!(config.chapter_count(), 15);
    }

    #[test]
    fn test_chapter_table_override() {
        let config = BookConfig::from_toml_str(
            r#"
            [[chapters]]
            number = 0
            title = "Start"
            part = { number = "I", name = "Only" }
            "#,
        )
        .unwrap();

        assert_eq!(config.chapter_count(), 1);
        assert_eq!(config.chapter_title(0), "Chapter 0: Start");
        assert_eq!(config.chapter_title(3), "Chapter 3");
    }

    #[test]
    fn test_invalid_toml() {
        let err = BookConfig::from_toml_str("chapter_skip = [").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_load_missing_file() {
        let err = BookConfig::load("/nonexistent/folio.toml").unwrap_err();
        assert!(err.to_string().contains("/nonexistent/folio.toml"));
    }
}
