//! Structural segmentation
//!
//! A DOCX body is a flat list of paragraphs and tables. Chapters, parts,
//! the preface and the appendices are recovered here from heading styles,
//! heading text patterns and literal marker paragraphs.
//!
//! Sections are index ranges into the block sequence and are recomputed
//! from the same anchors on every run.

mod classify;
mod render;

use std::collections::BTreeMap;
use std::fmt;
use std::ops::Range;
use std::sync::OnceLock;

use regex::Regex;
use serde::{Serialize, Serializer};

use folio_ast::Block;

use crate::config::StructureSettings;

pub use classify::{
    all_runs_bold, classify_heading, has_numbered_prefix, heading_level, is_body_text_style,
    HeadingLevel,
};
pub use render::{escape_html, extract_subtitle, render_section, RenderedSection};

/// A top-level heading paragraph
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeadingAnchor {
    /// Index into the block sequence
    pub position: usize,
    /// Index among paragraphs only
    pub paragraph_index: usize,
    /// Raw paragraph text
    pub text: String,
}

/// Structural markers found in one pass over the block sequence
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnchorTable {
    /// Heading-styled paragraphs in order
    pub headings: Vec<HeadingAnchor>,
    /// Block index of each paragraph, indexed by paragraph index
    pub paragraph_offsets: Vec<usize>,
    /// Block index of the appendix A marker paragraph
    pub appendix_a: Option<usize>,
    /// Block index of the appendix B marker paragraph
    pub appendix_b: Option<usize>,
    /// Length of the scanned sequence
    pub len: usize,
}

/// Name of a logical section
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SectionId {
    Preface,
    Chapter(u32),
    AppendixA,
    AppendixB,
}

impl SectionId {
    /// Every section of a book with `chapters` chapters, in reading order
    pub fn all(chapters: usize) -> Vec<SectionId> {
        let mut ids = Vec::with_capacity(chapters + 3);
        ids.push(SectionId::Preface);
        ids.extend((0u32..).take(chapters).map(SectionId::Chapter));
        ids.push(SectionId::AppendixA);
        ids.push(SectionId::AppendixB);
        ids
    }

    /// Short navigation label, e.g. "Chapter 3"
    pub fn label(&self) -> String {
        match self {
            SectionId::Preface => "Preface".to_string(),
            SectionId::Chapter(n) => format!("Chapter {}", n),
            SectionId::AppendixA => "Appendix A".to_string(),
            SectionId::AppendixB => "Appendix B".to_string(),
        }
    }
}

impl fmt::Display for SectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SectionId::Preface => write!(f, "preface"),
            SectionId::Chapter(n) => write!(f, "chapter-{}", n),
            SectionId::AppendixA => write!(f, "appendix-a"),
            SectionId::AppendixB => write!(f, "appendix-b"),
        }
    }
}

impl Serialize for SectionId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// The section partition of a document
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Segmentation {
    /// Block range of each section found
    pub sections: BTreeMap<SectionId, Range<usize>>,
    /// Part heading text in effect for each chapter number
    pub parts: BTreeMap<u32, String>,
}

impl Segmentation {
    /// Block range of a section, if it was found
    pub fn range(&self, id: SectionId) -> Option<Range<usize>> {
        self.sections.get(&id).cloned()
    }

    /// Blocks of a section, if it was found
    pub fn blocks<'a>(&self, blocks: &'a [Block], id: SectionId) -> Option<&'a [Block]> {
        self.sections.get(&id).and_then(|r| blocks.get(r.clone()))
    }

    /// Chapters found, in order
    pub fn chapters(&self) -> impl Iterator<Item = (u32, &Range<usize>)> {
        self.sections.iter().filter_map(|(id, range)| match id {
            SectionId::Chapter(n) => Some((*n, range)),
            _ => None,
        })
    }
}

/// Scan the block sequence once for headings, paragraph offsets and
/// appendix markers.
///
/// Markers match on exact trimmed text; when a marker appears more than
/// once the last occurrence wins.
pub fn locate_anchors(blocks: &[Block], settings: &StructureSettings) -> AnchorTable {
    let mut table = AnchorTable {
        len: blocks.len(),
        ..Default::default()
    };

    for (position, block) in blocks.iter().enumerate() {
        let Block::Paragraph(para) = block else {
            continue;
        };
        let paragraph_index = table.paragraph_offsets.len();
        table.paragraph_offsets.push(position);

        let text = para.text();
        if para.style.starts_with(&settings.heading_style_prefix) {
            table.headings.push(HeadingAnchor {
                position,
                paragraph_index,
                text: text.clone(),
            });
        }

        let trimmed = text.trim();
        if trimmed == settings.appendix_a_marker {
            table.appendix_a = Some(position);
        } else if trimmed == settings.appendix_b_marker {
            table.appendix_b = Some(position);
        }
    }

    tracing::debug!(
        headings = table.headings.len(),
        paragraphs = table.paragraph_offsets.len(),
        appendix_a = ?table.appendix_a,
        appendix_b = ?table.appendix_b,
        "located anchors"
    );
    table
}

/// Partition the sequence into sections using the anchors.
///
/// Never fails: sections whose anchors are absent are left out of the map.
pub fn segment(anchors: &AnchorTable, settings: &StructureSettings) -> Segmentation {
    let len = anchors.len;
    let mut seg = Segmentation::default();

    // Preface: fixed paragraph offsets; a missing offset maps to 0, end clamped to start
    let offset = |p: usize| anchors.paragraph_offsets.get(p).copied().unwrap_or(0);
    let preface_start = offset(settings.preface.start);
    let preface_end = offset(settings.preface.end).max(preface_start);
    seg.sections
        .insert(SectionId::Preface, preface_start..preface_end);

    // Chapter starts, remembering the part each one falls under
    let mut starts: Vec<(usize, u32)> = Vec::new();
    let mut current_part: Option<&str> = None;
    for heading in &anchors.headings {
        let text = heading.text.trim();
        if text.starts_with(&settings.part_prefix) {
            current_part = Some(text);
            continue;
        }
        if let Some(number) = chapter_number(text) {
            starts.push((heading.position, number));
            if let Some(part) = current_part {
                seg.parts.insert(number, part.to_string());
            }
        }
    }

    for (idx, &(start, number)) in starts.iter().enumerate() {
        let end = match starts.get(idx + 1) {
            Some(&(next, _)) => {
                if is_part_heading_at(anchors, settings, next.wrapping_sub(1)) {
                    next - 1
                } else {
                    next
                }
            }
            None => anchors
                .appendix_a
                .filter(|&a| a > start)
                .unwrap_or(len),
        };
        seg.sections
            .insert(SectionId::Chapter(number), start..end.max(start));
    }

    match (anchors.appendix_a, anchors.appendix_b) {
        (Some(a), Some(b)) => {
            seg.sections.insert(SectionId::AppendixA, a..b.max(a));
        }
        (Some(a), None) => {
            seg.sections.insert(SectionId::AppendixA, a..len);
        }
        _ => {}
    }
    if let Some(b) = anchors.appendix_b {
        seg.sections.insert(SectionId::AppendixB, b..len);
    }

    tracing::debug!(
        sections = seg.sections.len(),
        chapters = starts.len(),
        "segmented document"
    );
    seg
}

/// Convenience: locate anchors and segment in one call
pub fn segment_blocks(blocks: &[Block], settings: &StructureSettings) -> Segmentation {
    segment(&locate_anchors(blocks, settings), settings)
}

/// Chapter number of a heading like "Chapter 4: Righteousness"
fn chapter_number(text: &str) -> Option<u32> {
    static CHAPTER_RE: OnceLock<Regex> = OnceLock::new();
    let re = CHAPTER_RE.get_or_init(|| Regex::new(r"^Chapter\s+(\d+)").unwrap());
    re.captures(text)?.get(1)?.as_str().parse().ok()
}

/// Whether a part heading sits exactly at `position`
fn is_part_heading_at(anchors: &AnchorTable, settings: &StructureSettings, position: usize) -> bool {
    anchors
        .headings
        .iter()
        .any(|h| h.position == position && h.text.trim().starts_with(&settings.part_prefix))
}
