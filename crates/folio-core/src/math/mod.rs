//! Math expression translation
//!
//! Converts [`folio_ast::MathNode`] trees into LaTeX that KaTeX can render.
//! Translation is a pure recursive function over the node kinds; every kind
//! has a defined fallback, so it never fails.
//!
//! ## Example
//!
//! ```
//! use folio_ast::MathNode;
//! use folio_core::math::translate;
//!
//! let frac = MathNode::Fraction {
//!     numerator: Box::new(MathNode::run("a")),
//!     denominator: Box::new(MathNode::run("b")),
//! };
//! assert_eq!(translate(&frac), "\\frac{a}{b}");
//! ```

pub mod symbols;
mod translate;

pub use translate::{ends_with_command, join, translate, translate_math, TranslatedMath};
