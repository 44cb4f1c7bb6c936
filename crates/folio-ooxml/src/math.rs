//! Office Math (OMML) parsing
//!
//! An `m:oMath` subtree is read from the event stream into a small generic
//! element tree, then lowered once into typed [`MathNode`]s. Property
//! elements (`m:fPr`, `m:naryPr`, `m:rPr`, ...) are folded into the fields of
//! the node they describe and never become nodes themselves.

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use folio_ast::{GroupPosition, LimitPosition, Math, MathNode};

use crate::error::{OoxmlError, Result};

/// A raw OMML element: local name, its `m:val` attribute, and children
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OmmlElement {
    /// Local element name (`f`, `nary`, `r`, ...)
    pub name: String,
    /// Value of the `val` attribute, if any
    pub val: Option<String>,
    /// Child elements and text in order
    pub children: Vec<OmmlChild>,
}

/// Child of a raw OMML element
#[derive(Debug, Clone, PartialEq)]
pub enum OmmlChild {
    Element(OmmlElement),
    Text(String),
}

impl OmmlElement {
    /// Start an element from its opening tag
    pub fn from_start(e: &BytesStart) -> Self {
        let name = String::from_utf8_lossy(e.local_name().as_ref()).into_owned();
        let val = e
            .attributes()
            .filter_map(|a| a.ok())
            .find(|a| a.key.local_name().as_ref() == b"val")
            .and_then(|a| a.unescape_value().ok().map(|v| v.into_owned()));
        Self {
            name,
            val,
            children: Vec::new(),
        }
    }

    /// Child elements, skipping text
    pub fn elements(&self) -> impl Iterator<Item = &OmmlElement> {
        self.children.iter().filter_map(|c| match c {
            OmmlChild::Element(el) => Some(el),
            OmmlChild::Text(_) => None,
        })
    }

    /// First child element with the given local name
    pub fn child(&self, name: &str) -> Option<&OmmlElement> {
        self.elements().find(|el| el.name == name)
    }

    /// All child elements with the given local name
    pub fn children_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a OmmlElement> {
        self.elements().filter(move |el| el.name == name)
    }

    /// Concatenated text of direct text children
    pub fn text(&self) -> String {
        self.children
            .iter()
            .filter_map(|c| match c {
                OmmlChild::Text(t) => Some(t.as_str()),
                OmmlChild::Element(_) => None,
            })
            .collect()
    }

    /// `val` of a property inside this element's properties child
    fn prop(&self, props: &str, name: &str) -> Option<&OmmlElement> {
        self.child(props).and_then(|p| p.child(name))
    }

    fn is_property(&self) -> bool {
        self.name.ends_with("Pr")
    }
}

/// Read the remainder of an element whose start tag has just been consumed.
///
/// Consumes events up to and including the matching end tag.
pub fn read_subtree(reader: &mut Reader<&[u8]>, root: OmmlElement) -> Result<OmmlElement> {
    let mut stack = vec![root];
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) => stack.push(OmmlElement::from_start(e)),
            Ok(Event::Empty(ref e)) => {
                let el = OmmlElement::from_start(e);
                if let Some(parent) = stack.last_mut() {
                    parent.children.push(OmmlChild::Element(el));
                }
            }
            Ok(Event::Text(ref e)) => {
                let text = e.unescape().map_err(OoxmlError::Xml)?;
                if let Some(parent) = stack.last_mut() {
                    parent.children.push(OmmlChild::Text(text.into_owned()));
                }
            }
            Ok(Event::End(_)) => {
                let Some(done) = stack.pop() else {
                    return Err(OoxmlError::InvalidStructure(
                        "unbalanced math element".to_string(),
                    ));
                };
                match stack.last_mut() {
                    Some(parent) => parent.children.push(OmmlChild::Element(done)),
                    None => return Ok(done),
                }
            }
            Ok(Event::Eof) => {
                return Err(OoxmlError::InvalidStructure(
                    "unexpected end of document inside math".to_string(),
                ))
            }
            Err(e) => return Err(OoxmlError::Xml(e)),
            _ => {}
        }
        buf.clear();
    }
}

/// Parse a standalone OMML fragment (`<m:oMath>` or `<m:oMathPara>`)
pub fn parse_omml(xml: &str) -> Result<Math> {
    let mut reader = Reader::from_reader(xml.as_bytes());
    reader.config_mut().trim_text(false);
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) => {
                let root = OmmlElement::from_start(e);
                let display = root.name == "oMathPara";
                let element = read_subtree(&mut reader, root)?;
                return Ok(to_math(&element, display));
            }
            Ok(Event::Eof) => {
                return Err(OoxmlError::InvalidStructure(
                    "no math element found".to_string(),
                ))
            }
            Err(e) => return Err(OoxmlError::Xml(e)),
            _ => {}
        }
        buf.clear();
    }
}

/// Build a [`Math`] object from a parsed `m:oMath`/`m:oMathPara` element
pub fn to_math(element: &OmmlElement, display: bool) -> Math {
    Math {
        display,
        root: lower(element),
    }
}

/// Lower a raw element into a typed math node
pub fn lower(el: &OmmlElement) -> MathNode {
    match el.name.as_str() {
        "r" => lower_run(el),
        "f" => MathNode::Fraction {
            numerator: Box::new(arg(el, "num")),
            denominator: Box::new(arg(el, "den")),
        },
        "rad" => {
            let hidden = el.prop("radPr", "degHide").is_some_and(is_on);
            let degree = if hidden {
                None
            } else {
                el.child("deg").map(|d| Box::new(slot(d)))
            };
            MathNode::Radical {
                degree,
                radicand: Box::new(arg(el, "e")),
            }
        }
        "sSub" => MathNode::Subscript {
            base: Box::new(arg(el, "e")),
            sub: Box::new(arg(el, "sub")),
        },
        "sSup" => MathNode::Superscript {
            base: Box::new(arg(el, "e")),
            sup: Box::new(arg(el, "sup")),
        },
        "sSubSup" => MathNode::SubSup {
            base: Box::new(arg(el, "e")),
            sub: Box::new(arg(el, "sub")),
            sup: Box::new(arg(el, "sup")),
        },
        "sPre" => MathNode::PreSubSup {
            base: Box::new(arg(el, "e")),
            sub: Box::new(arg(el, "sub")),
            sup: Box::new(arg(el, "sup")),
        },
        "d" => MathNode::Delimited {
            begin: el.prop("dPr", "begChr").map(glyph),
            end: el.prop("dPr", "endChr").map(glyph),
            items: el.children_named("e").map(slot).collect(),
        },
        "nary" => MathNode::Nary {
            operator: el.prop("naryPr", "chr").map(glyph),
            sub: el.child("sub").map(|s| Box::new(slot(s))),
            sup: el.child("sup").map(|s| Box::new(slot(s))),
            sub_hide: el.prop("naryPr", "subHide").is_some_and(is_on),
            sup_hide: el.prop("naryPr", "supHide").is_some_and(is_on),
            body: Box::new(arg(el, "e")),
        },
        "acc" => MathNode::Accent {
            accent: el.prop("accPr", "chr").map(glyph),
            body: Box::new(arg(el, "e")),
        },
        "func" => MathNode::Function {
            name: Box::new(arg(el, "fName")),
            body: Box::new(arg(el, "e")),
        },
        "limUpp" | "limLow" => MathNode::Limit {
            position: if el.name == "limUpp" {
                LimitPosition::Upper
            } else {
                LimitPosition::Lower
            },
            body: Box::new(arg(el, "e")),
            limit: Box::new(arg(el, "lim")),
        },
        "eqArr" => MathNode::EqArray(el.children_named("e").map(slot).collect()),
        "groupChr" => MathNode::GroupChar {
            position: el
                .prop("groupChrPr", "pos")
                .and_then(|p| p.val.as_deref())
                .map(|pos| {
                    if pos == "top" {
                        GroupPosition::Top
                    } else {
                        GroupPosition::Bottom
                    }
                }),
            glyph: el.prop("groupChrPr", "chr").map(glyph),
            body: Box::new(arg(el, "e")),
        },
        "m" => MathNode::Matrix(
            el.children_named("mr")
                .map(|row| row.children_named("e").map(slot).collect())
                .collect(),
        ),
        "box" | "borderBox" => MathNode::Boxed(Box::new(arg(el, "e"))),
        "oMath" | "oMathPara" | "e" | "num" | "den" | "deg" | "sub" | "sup" | "fName"
        | "lim" => MathNode::Container(lower_children(el)),
        _ => MathNode::Unknown {
            tag: el.name.clone(),
            children: lower_children(el),
        },
    }
}

fn lower_run(el: &OmmlElement) -> MathNode {
    let text: String = el.children_named("t").map(|t| t.text()).collect();
    let plain = el
        .child("rPr")
        .map(|rpr| {
            rpr.child("sty").and_then(|s| s.val.as_deref()) == Some("p")
                || rpr.child("nor").is_some_and(is_on)
        })
        .unwrap_or(false);
    MathNode::Run { text, plain }
}

fn lower_children(el: &OmmlElement) -> Vec<MathNode> {
    el.elements()
        .filter(|child| !child.is_property())
        .map(lower)
        .collect()
}

/// Lower an argument slot, collapsing a single child
fn slot(el: &OmmlElement) -> MathNode {
    let mut children = lower_children(el);
    if children.len() == 1 {
        children.remove(0)
    } else {
        MathNode::Container(children)
    }
}

/// Lower the named argument slot; a missing slot is an empty container
fn arg(el: &OmmlElement, name: &str) -> MathNode {
    el.child(name)
        .map(slot)
        .unwrap_or_else(|| MathNode::Container(Vec::new()))
}

fn glyph(el: &OmmlElement) -> String {
    el.val.clone().unwrap_or_default()
}

/// OOXML on/off: absent `val` means on
fn is_on(el: &OmmlElement) -> bool {
    !matches!(el.val.as_deref(), Some("0" | "false" | "off"))
}
