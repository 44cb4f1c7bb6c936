//! # folio-core
//!
//! Turns the flat block sequence of a book manuscript into HTML pages.
//!
//! - [`segment`]: recovers preface, chapters, parts and appendices from
//!   heading styles and marker paragraphs, and renders section bodies
//! - [`math`]: translates Office Math trees into LaTeX for KaTeX
//! - [`site`]: wraps sections into navigable pages and builds the cover
//! - [`config`]: the per-book anchors, titles and tables
//!
//! ## Example
//!
//! ```
//! use folio_ast::{Block, Paragraph, Run};
//! use folio_core::{build_site, BookConfig, SectionId};
//!
//! let blocks = vec![
//!     Block::Paragraph(Paragraph::new("Heading 1").with_run(Run::plain("Chapter 0: Start"))),
//!     Block::Paragraph(Paragraph::new("Normal").with_run(Run::plain("Subtitle"))),
//!     Block::Paragraph(Paragraph::new("Normal").with_run(Run::plain("Body"))),
//! ];
//! let site = build_site(&blocks, &BookConfig::default());
//! assert!(site.page(SectionId::Chapter(0)).is_some());
//! ```

pub mod config;
pub mod math;
pub mod segment;
pub mod site;

pub use config::{BookConfig, ConfigError, StructureSettings};
pub use segment::{locate_anchors, segment, segment_blocks, AnchorTable, SectionId, Segmentation};
pub use site::{build_site, Page, Site};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
