//! Embedded math expression trees
//!
//! One variant per construct of Office Math. Each variant owns its
//! children; there is no sharing between nodes. Glyph properties are kept
//! as the raw characters found in the source (`None` when the source left
//! them out) so the translator can apply its own defaults.

use serde::{Deserialize, Serialize};

/// A math object embedded in a paragraph
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Math {
    /// Display (set off on its own line) vs inline
    pub display: bool,
    /// Root of the expression tree
    pub root: MathNode,
}

impl Math {
    /// Inline math object
    pub fn inline(root: MathNode) -> Self {
        Self {
            display: false,
            root,
        }
    }

    /// Display math object
    pub fn display(root: MathNode) -> Self {
        Self {
            display: true,
            root,
        }
    }
}

/// Placement of a limit relative to its body
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LimitPosition {
    /// Limit drawn above the body (`m:limUpp`)
    Upper,
    /// Limit drawn below the body (`m:limLow`)
    Lower,
}

/// Placement of a grouping character
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GroupPosition {
    Top,
    Bottom,
}

/// A node of a math expression tree
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum MathNode {
    /// Leaf text; `plain` marks upright (non-italic) styling
    Run { text: String, plain: bool },
    Fraction {
        numerator: Box<MathNode>,
        denominator: Box<MathNode>,
    },
    /// Root with optional degree
    Radical {
        degree: Option<Box<MathNode>>,
        radicand: Box<MathNode>,
    },
    Subscript {
        base: Box<MathNode>,
        sub: Box<MathNode>,
    },
    Superscript {
        base: Box<MathNode>,
        sup: Box<MathNode>,
    },
    SubSup {
        base: Box<MathNode>,
        sub: Box<MathNode>,
        sup: Box<MathNode>,
    },
    /// Scripts placed before the base (`m:sPre`)
    PreSubSup {
        base: Box<MathNode>,
        sub: Box<MathNode>,
        sup: Box<MathNode>,
    },
    /// Bracketed group; several items form an implicit tuple
    Delimited {
        begin: Option<String>,
        end: Option<String>,
        items: Vec<MathNode>,
    },
    /// Large operator such as a sum or integral
    Nary {
        operator: Option<String>,
        sub: Option<Box<MathNode>>,
        sup: Option<Box<MathNode>>,
        sub_hide: bool,
        sup_hide: bool,
        body: Box<MathNode>,
    },
    Accent {
        accent: Option<String>,
        body: Box<MathNode>,
    },
    /// Function application such as `sin x`
    Function {
        name: Box<MathNode>,
        body: Box<MathNode>,
    },
    Limit {
        position: LimitPosition,
        body: Box<MathNode>,
        limit: Box<MathNode>,
    },
    /// Vertically stacked equations
    EqArray(Vec<MathNode>),
    /// Over/under brace
    GroupChar {
        position: Option<GroupPosition>,
        glyph: Option<String>,
        body: Box<MathNode>,
    },
    /// Rows of cells
    Matrix(Vec<Vec<MathNode>>),
    /// Box or border box; rendered as its content
    Boxed(Box<MathNode>),
    /// Generic grouping (argument slots, `m:oMath`)
    Container(Vec<MathNode>),
    /// Element kind this model does not know about
    Unknown { tag: String, children: Vec<MathNode> },
}

impl MathNode {
    /// Italic (default styled) run
    pub fn run(text: impl Into<String>) -> Self {
        MathNode::Run {
            text: text.into(),
            plain: false,
        }
    }

    /// Upright run
    pub fn plain_run(text: impl Into<String>) -> Self {
        MathNode::Run {
            text: text.into(),
            plain: true,
        }
    }

    /// Container of the given children
    pub fn container(children: Vec<MathNode>) -> Self {
        MathNode::Container(children)
    }

    /// Raw leaf text in document order, without any markup
    pub fn plain_text(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        match self {
            MathNode::Run { text, .. } => out.push_str(text),
            MathNode::Fraction {
                numerator,
                denominator,
            } => {
                numerator.collect_text(out);
                denominator.collect_text(out);
            }
            MathNode::Radical { degree, radicand } => {
                if let Some(degree) = degree {
                    degree.collect_text(out);
                }
                radicand.collect_text(out);
            }
            MathNode::Subscript { base, sub } => {
                base.collect_text(out);
                sub.collect_text(out);
            }
            MathNode::Superscript { base, sup } => {
                base.collect_text(out);
                sup.collect_text(out);
            }
            MathNode::SubSup { base, sub, sup } | MathNode::PreSubSup { base, sub, sup } => {
                base.collect_text(out);
                sub.collect_text(out);
                sup.collect_text(out);
            }
            MathNode::Nary { sub, sup, body, .. } => {
                for limit in [sub, sup].into_iter().flatten() {
                    limit.collect_text(out);
                }
                body.collect_text(out);
            }
            MathNode::Accent { body, .. }
            | MathNode::GroupChar { body, .. }
            | MathNode::Boxed(body) => body.collect_text(out),
            MathNode::Function { name, body } => {
                name.collect_text(out);
                body.collect_text(out);
            }
            MathNode::Limit { body, limit, .. } => {
                body.collect_text(out);
                limit.collect_text(out);
            }
            MathNode::Matrix(rows) => {
                for cell in rows.iter().flatten() {
                    cell.collect_text(out);
                }
            }
            MathNode::Delimited { items: children, .. }
            | MathNode::EqArray(children)
            | MathNode::Container(children)
            | MathNode::Unknown { children, .. } => {
                for child in children {
                    child.collect_text(out);
                }
            }
        }
    }
}
