//! folio-ast - Document model definitions
//!
//! This crate provides the types shared between the DOCX reader and the
//! segmenter/translator: a flat, reading-ordered sequence of [`Block`]s and
//! the [`MathNode`] tree embedded in paragraphs.

pub mod block;
pub mod math;

pub use block::{Block, Paragraph, ParagraphItem, Run, Table};
pub use math::{GroupPosition, LimitPosition, Math, MathNode};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
