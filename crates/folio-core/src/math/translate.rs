//! Recursive MathNode to LaTeX translation

use std::sync::OnceLock;

use regex::Regex;

use folio_ast::{GroupPosition, LimitPosition, Math, MathNode};

use super::symbols::{
    ACCENTS, CLOSE_DELIMITERS, DEFAULT_ACCENT, DEFAULT_NARY, KNOWN_FUNCTIONS, NARY_OPERATORS,
    OPEN_DELIMITERS, OVERBRACE_GLYPH, SYMBOLS,
};

/// LaTeX for one math object, tagged with its context
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslatedMath {
    pub latex: String,
    pub display: bool,
}

impl TranslatedMath {
    /// The LaTeX wrapped in `\[..\]` (display) or `\(..\)` (inline).
    ///
    /// Returns `None` when the translation is blank.
    pub fn wrapped(&self) -> Option<String> {
        let latex = self.latex.trim();
        if latex.is_empty() {
            return None;
        }
        Some(if self.display {
            format!("\\[{}\\]", latex)
        } else {
            format!("\\({}\\)", latex)
        })
    }
}

/// Translate a top-level math object
pub fn translate_math(math: &Math) -> TranslatedMath {
    TranslatedMath {
        latex: translate(&math.root),
        display: math.display,
    }
}

/// Translate a math node into LaTeX
pub fn translate(node: &MathNode) -> String {
    match node {
        MathNode::Run { text, plain } => translate_run(text, *plain),
        MathNode::Fraction {
            numerator,
            denominator,
        } => format!(
            "\\frac{{{}}}{{{}}}",
            translate(numerator),
            translate(denominator)
        ),
        MathNode::Radical { degree, radicand } => {
            let degree = degree.as_deref().map(translate).unwrap_or_default();
            let radicand = translate(radicand);
            if degree.trim().is_empty() {
                format!("\\sqrt{{{}}}", radicand)
            } else {
                format!("\\sqrt[{}]{{{}}}", degree.trim(), radicand)
            }
        }
        MathNode::Subscript { base, sub } => {
            format!("{}_{{{}}}", translate(base), translate(sub))
        }
        MathNode::Superscript { base, sup } => {
            format!("{}^{{{}}}", translate(base), translate(sup))
        }
        MathNode::SubSup { base, sub, sup } => format!(
            "{}_{{{}}}^{{{}}}",
            translate(base),
            translate(sub),
            translate(sup)
        ),
        MathNode::PreSubSup { base, sub, sup } => format!(
            "{{}}_{{{}}}^{{{}}}{}",
            translate(sub),
            translate(sup),
            translate(base)
        ),
        MathNode::Delimited { begin, end, items } => {
            translate_delimited(begin.as_deref(), end.as_deref(), items)
        }
        MathNode::Nary {
            operator,
            sub,
            sup,
            sub_hide,
            sup_hide,
            body,
        } => {
            let mut out = operator
                .as_deref()
                .and_then(|op| NARY_OPERATORS.get(op))
                .copied()
                .unwrap_or(DEFAULT_NARY)
                .to_string();
            if let Some(limit) = sub.as_deref().filter(|_| !sub_hide).map(translate) {
                if !limit.is_empty() {
                    out.push_str(&format!("_{{{}}}", limit));
                }
            }
            if let Some(limit) = sup.as_deref().filter(|_| !sup_hide).map(translate) {
                if !limit.is_empty() {
                    out.push_str(&format!("^{{{}}}", limit));
                }
            }
            out.push(' ');
            out.push_str(&translate(body));
            out
        }
        MathNode::Accent { accent, body } => {
            let command = accent
                .as_deref()
                .and_then(|a| ACCENTS.get(a))
                .copied()
                .unwrap_or(DEFAULT_ACCENT);
            format!("{}{{{}}}", command, translate(body))
        }
        MathNode::Function { name, body } => translate_function(name, body),
        MathNode::Limit {
            position,
            body,
            limit,
        } => {
            let command = match position {
                LimitPosition::Upper => "\\overset",
                LimitPosition::Lower => "\\underset",
            };
            format!("{}{{{}}}{{{}}}", command, translate(limit), translate(body))
        }
        MathNode::EqArray(rows) => rows
            .iter()
            .map(translate)
            .collect::<Vec<_>>()
            .join(" \\\\ "),
        MathNode::GroupChar {
            position,
            glyph,
            body,
        } => {
            let over = *position == Some(GroupPosition::Top)
                || glyph.as_deref() == Some(OVERBRACE_GLYPH);
            let command = if over { "\\overbrace" } else { "\\underbrace" };
            format!("{}{{{}}}", command, translate(body))
        }
        MathNode::Matrix(rows) => {
            let body = rows
                .iter()
                .map(|row| row.iter().map(translate).collect::<Vec<_>>().join(" & "))
                .collect::<Vec<_>>()
                .join(" \\\\ ");
            format!("\\begin{{pmatrix}} {} \\end{{pmatrix}}", body)
        }
        MathNode::Boxed(inner) => translate(inner),
        MathNode::Container(children) | MathNode::Unknown { children, .. } => {
            join(children.iter().map(translate))
        }
    }
}

/// Concatenate sibling translations.
///
/// A space separates two non-empty parts when the first ends in a
/// multi-letter command and the second starts with a letter.
pub fn join<I, S>(parts: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut out = String::new();
    for part in parts {
        let part = part.as_ref();
        if part.is_empty() {
            continue;
        }
        if ends_with_command(&out) && part.chars().next().is_some_and(char::is_alphabetic) {
            out.push(' ');
        }
        out.push_str(part);
    }
    out
}

/// Whether the text ends in `\` followed by one or more ASCII letters
pub fn ends_with_command(text: &str) -> bool {
    static COMMAND_RE: OnceLock<Regex> = OnceLock::new();
    let re = COMMAND_RE.get_or_init(|| Regex::new(r"\\[a-zA-Z]+$").unwrap());
    re.is_match(text)
}

fn translate_run(text: &str, plain: bool) -> String {
    let mut out = String::new();
    for c in text.chars() {
        if c.is_alphabetic() && ends_with_command(&out) {
            out.push(' ');
        }
        match c {
            '#' | '$' | '%' | '&' | '_' | '{' | '}' => {
                out.push('\\');
                out.push(c);
            }
            '~' => out.push_str("\\sim"),
            '^' => out.push_str("\\hat{}"),
            '\\' => out.push_str("\\backslash"),
            _ => match SYMBOLS.get(&c) {
                Some(command) => out.push_str(command),
                None => out.push(c),
            },
        }
    }

    let trimmed = text.trim();
    if plain && trimmed.chars().count() > 1 && trimmed.chars().all(char::is_alphabetic) {
        format!("\\mathrm{{{}}}", out.trim())
    } else {
        out
    }
}

fn translate_delimited(begin: Option<&str>, end: Option<&str>, items: &[MathNode]) -> String {
    let open = delimiter(begin.unwrap_or("("), "\\left", &OPEN_DELIMITERS);
    let close = delimiter(end.unwrap_or(")"), "\\right", &CLOSE_DELIMITERS);
    let inner = items.iter().map(translate).collect::<Vec<_>>().join(", ");
    join([open, inner, close])
}

fn delimiter(glyph: &str, sizing: &str, table: &phf::Map<&'static str, &'static str>) -> String {
    if glyph.is_empty() {
        return format!("{}.", sizing);
    }
    match table.get(glyph) {
        Some(command) => command.to_string(),
        None => format!("{}{}", sizing, glyph),
    }
}

fn translate_function(name: &MathNode, body: &MathNode) -> String {
    let body = translate(body);

    // Scripts and lower limits stay attached to the name: \log_{2} x
    let (base, scripts) = match name {
        MathNode::Limit {
            position: LimitPosition::Lower,
            body: inner,
            limit,
        } => (inner.as_ref(), format!("_{{{}}}", translate(limit))),
        MathNode::Subscript { base, sub } => (base.as_ref(), format!("_{{{}}}", translate(sub))),
        MathNode::Superscript { base, sup } => {
            (base.as_ref(), format!("^{{{}}}", translate(sup)))
        }
        MathNode::SubSup { base, sub, sup } => (
            base.as_ref(),
            format!("_{{{}}}^{{{}}}", translate(sub), translate(sup)),
        ),
        _ => (name, String::new()),
    };

    let fname = base.plain_text();
    let fname = fname.trim();
    if KNOWN_FUNCTIONS.contains(fname) {
        return format!("\\{}{} {}", fname, scripts, body);
    }

    if is_text_only(base) {
        if fname.is_empty() {
            return body;
        }
        let operator = format!("\\operatorname{{{}}}{}", translate_run(fname, false), scripts);
        join([operator, body])
    } else {
        join([translate(name), body])
    }
}

/// Runs, possibly grouped, with no math structure
fn is_text_only(node: &MathNode) -> bool {
    match node {
        MathNode::Run { .. } => true,
        MathNode::Container(children) => children.iter().all(is_text_only),
        _ => false,
    }
}
