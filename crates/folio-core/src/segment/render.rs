//! Section body rendering

use folio_ast::{Block, Paragraph, ParagraphItem, Run, Table};

use super::classify::classify_heading;
use crate::config::StructureSettings;
use crate::math::translate_math;

/// HTML body of a section
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderedSection {
    pub html: String,
    /// Whether any rendered paragraph carried math
    pub has_math: bool,
}

/// Render a section's blocks to HTML.
///
/// Empty paragraphs are dropped without counting toward `skip_count`; the
/// first `skip_count` paragraphs with content are elided. Tables are never
/// skipped.
pub fn render_section(
    blocks: &[Block],
    skip_count: usize,
    settings: &StructureSettings,
) -> RenderedSection {
    let mut parts = Vec::new();
    let mut skipped = 0;
    let mut has_math = false;

    for block in blocks {
        let para = match block {
            Block::Table(table) => {
                parts.push(table_html(table));
                continue;
            }
            Block::Paragraph(para) => para,
        };

        if para.is_empty() {
            continue;
        }
        if skipped < skip_count {
            skipped += 1;
            continue;
        }

        let (content, produced_math) = paragraph_content(para);
        if !para.has_visible_text() && !produced_math {
            continue;
        }
        has_math |= produced_math;

        if para.style.starts_with(&settings.heading_style_prefix) {
            parts.push(format!("<h1>{}</h1>", content));
        } else if let Some(level) = classify_heading(para, settings) {
            let tag = level.tag();
            parts.push(format!("<{tag}>{content}</{tag}>"));
        } else if produced_math && para.has_display_math() {
            parts.push(format!("<div class=\"math-display\">{}</div>", content));
        } else if is_list_item(&para.text()) {
            parts.push(format!("<p class=\"list-item\">{}</p>", content));
        } else {
            parts.push(format!("<p>{}</p>", content));
        }
    }

    RenderedSection {
        html: parts.join("\n"),
        has_math,
    }
}

/// First non-heading paragraph with visible text, trimmed
pub fn extract_subtitle(blocks: &[Block], settings: &StructureSettings) -> Option<String> {
    blocks
        .iter()
        .filter_map(Block::as_paragraph)
        .filter(|p| !p.style.starts_with(&settings.heading_style_prefix))
        .map(|p| p.text().trim().to_string())
        .find(|text| !text.is_empty())
}

/// Escape text for HTML element content and attribute values
pub fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

fn is_list_item(text: &str) -> bool {
    let text = text.trim();
    text.starts_with('\u{2022}') || text.starts_with("- ")
}

/// HTML for the paragraph's runs and math, and whether any math was emitted
fn paragraph_content(para: &Paragraph) -> (String, bool) {
    let mut out = String::new();
    let mut produced_math = false;
    for item in &para.items {
        match item {
            ParagraphItem::Run(run) => out.push_str(&run_html(run)),
            ParagraphItem::Math(math) => {
                if let Some(wrapped) = translate_math(math).wrapped() {
                    out.push_str(&escape_html(&wrapped));
                    produced_math = true;
                }
            }
        }
    }
    (out, produced_math)
}

fn run_html(run: &Run) -> String {
    let text = escape_html(&run.text);
    if text.is_empty() {
        return text;
    }
    match (run.bold, run.italic) {
        (true, true) => format!("<strong><em>{}</em></strong>", text),
        (true, false) => format!("<strong>{}</strong>", text),
        (false, true) => format!("<em>{}</em>", text),
        (false, false) => text,
    }
}

fn table_html(table: &Table) -> String {
    let rows: Vec<String> = table
        .rows
        .iter()
        .enumerate()
        .map(|(i, row)| {
            let tag = if i == 0 { "th" } else { "td" };
            let cells: String = row
                .iter()
                .map(|cell| format!("<{tag}>{}</{tag}>", escape_html(cell)))
                .collect();
            format!("<tr>{}</tr>", cells)
        })
        .collect();
    format!("<table>\n{}\n</table>", rows.join("\n"))
}
