//! Style definitions parsing (word/styles.xml)
//!
//! Paragraphs reference styles by id (`Heading1`, `BodyText`). The
//! segmenter works with display names (`Heading 1`, `Body Text`), so this
//! module resolves ids to names, normalizing Word's lowercase built-in names
//! to the names shown in the Word UI.

use std::collections::HashMap;

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use crate::error::{OoxmlError, Result};

/// Style applied when a paragraph has no `w:pStyle` and no default exists
pub const FALLBACK_PARAGRAPH_STYLE: &str = "Normal";

/// Collection of styles from a document
#[derive(Debug, Clone, Default)]
pub struct StyleSheet {
    /// All styles, keyed by style ID
    styles: HashMap<String, Style>,
    /// Default paragraph style ID
    pub default_paragraph: Option<String>,
}

/// A Word style definition
#[derive(Debug, Clone)]
pub struct Style {
    /// Style ID (used in document references)
    pub id: String,
    /// Name as stored in styles.xml
    pub name: String,
    /// Style type
    pub style_type: StyleType,
}

/// Type of style
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StyleType {
    /// Paragraph style
    Paragraph,
    /// Character (run) style
    Character,
    /// Table style
    Table,
    /// Numbering style
    Numbering,
}

impl StyleSheet {
    /// Parse styles from XML bytes
    pub fn parse(xml: &[u8]) -> Result<Self> {
        let mut reader = Reader::from_reader(xml);
        reader.config_mut().trim_text(true);

        let mut stylesheet = StyleSheet::default();
        let mut buf = Vec::new();
        let mut current_style: Option<StyleBuilder> = None;

        loop {
            match reader.read_event_into(&mut buf) {
                Ok(Event::Start(ref e)) | Ok(Event::Empty(ref e)) => {
                    let name = e.local_name();
                    match name.as_ref() {
                        b"style" => {
                            let mut builder = StyleBuilder::default();

                            if let Some(t) = get_attr(e, b"w:type") {
                                builder.style_type = Some(match t.as_str() {
                                    "character" => StyleType::Character,
                                    "table" => StyleType::Table,
                                    "numbering" => StyleType::Numbering,
                                    _ => StyleType::Paragraph,
                                });
                            }
                            builder.id = get_attr(e, b"w:styleId");
                            builder.is_default = get_attr(e, b"w:default").as_deref() == Some("1");

                            current_style = Some(builder);
                        }
                        b"name" => {
                            if let (Some(style), Some(val)) =
                                (current_style.as_mut(), get_attr(e, b"w:val"))
                            {
                                style.name = Some(val);
                            }
                        }
                        _ => {}
                    }
                }
                Ok(Event::End(ref e)) => {
                    if e.local_name().as_ref() == b"style" {
                        if let Some(builder) = current_style.take() {
                            let is_default = builder.is_default;
                            if let Some(style) = builder.build() {
                                if is_default && style.style_type == StyleType::Paragraph {
                                    stylesheet.default_paragraph = Some(style.id.clone());
                                }
                                stylesheet.styles.insert(style.id.clone(), style);
                            }
                        }
                    }
                }
                Ok(Event::Eof) => break,
                Err(e) => return Err(OoxmlError::Xml(e)),
                _ => {}
            }
            buf.clear();
        }

        Ok(stylesheet)
    }

    /// Get a style by ID
    pub fn get(&self, id: &str) -> Option<&Style> {
        self.styles.get(id)
    }

    /// Number of styles defined
    pub fn len(&self) -> usize {
        self.styles.len()
    }

    /// Whether no styles were defined
    pub fn is_empty(&self) -> bool {
        self.styles.is_empty()
    }

    /// Display name for a paragraph style reference.
    ///
    /// `None` resolves to the default paragraph style. Unknown ids are
    /// returned unchanged.
    pub fn display_name(&self, style_id: Option<&str>) -> String {
        let id = match style_id.or(self.default_paragraph.as_deref()) {
            Some(id) => id,
            None => return FALLBACK_PARAGRAPH_STYLE.to_string(),
        };
        match self.get(id) {
            Some(style) => ui_name(&style.name),
            None => id.to_string(),
        }
    }
}

/// Map Word's stored built-in names (`heading 1`, `body text`) to UI names
pub fn ui_name(stored: &str) -> String {
    const BUILTIN: &[(&str, &str)] = &[
        ("normal", "Normal"),
        ("title", "Title"),
        ("subtitle", "Subtitle"),
        ("caption", "Caption"),
        ("header", "Header"),
        ("footer", "Footer"),
        ("body text", "Body Text"),
        ("list paragraph", "List Paragraph"),
        ("list bullet", "List Bullet"),
        ("list number", "List Number"),
        ("toc heading", "TOC Heading"),
    ];

    if let Some(level) = stored.strip_prefix("heading ") {
        if level.chars().all(|c| c.is_ascii_digit()) && !level.is_empty() {
            return format!("Heading {}", level);
        }
    }
    if let Some(level) = stored.strip_prefix("toc ") {
        if level.chars().all(|c| c.is_ascii_digit()) && !level.is_empty() {
            return format!("TOC {}", level);
        }
    }
    BUILTIN
        .iter()
        .find(|(raw, _)| *raw == stored)
        .map(|(_, ui)| ui.to_string())
        .unwrap_or_else(|| stored.to_string())
}

#[derive(Default)]
struct StyleBuilder {
    id: Option<String>,
    name: Option<String>,
    style_type: Option<StyleType>,
    is_default: bool,
}

impl StyleBuilder {
    fn build(self) -> Option<Style> {
        let id = self.id?;
        Some(Style {
            name: self.name.unwrap_or_else(|| id.clone()),
            id,
            style_type: self.style_type.unwrap_or(StyleType::Paragraph),
        })
    }
}

fn get_attr(e: &BytesStart, name: &[u8]) -> Option<String> {
    e.attributes()
        .filter_map(|a| a.ok())
        .find(|a| a.key.as_ref() == name)
        .and_then(|a| String::from_utf8(a.value.to_vec()).ok())
}
