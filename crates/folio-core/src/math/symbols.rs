//! Static lookup tables for LaTeX translation

use phf::{phf_map, phf_set};

/// Unicode characters with a LaTeX command equivalent
pub static SYMBOLS: phf::Map<char, &'static str> = phf_map! {
    // Greek lowercase
    'α' => "\\alpha",
    'β' => "\\beta",
    'γ' => "\\gamma",
    'δ' => "\\delta",
    'ε' => "\\epsilon",
    'ϵ' => "\\epsilon",
    'ζ' => "\\zeta",
    'η' => "\\eta",
    'θ' => "\\theta",
    'ϑ' => "\\vartheta",
    'ι' => "\\iota",
    'κ' => "\\kappa",
    'λ' => "\\lambda",
    'μ' => "\\mu",
    'ν' => "\\nu",
    'ξ' => "\\xi",
    'π' => "\\pi",
    'ρ' => "\\rho",
    'σ' => "\\sigma",
    'ς' => "\\varsigma",
    'τ' => "\\tau",
    'υ' => "\\upsilon",
    'φ' => "\\phi",
    'ϕ' => "\\phi",
    'χ' => "\\chi",
    'ψ' => "\\psi",
    'ω' => "\\omega",
    // Greek uppercase
    'Γ' => "\\Gamma",
    'Δ' => "\\Delta",
    'Θ' => "\\Theta",
    'Λ' => "\\Lambda",
    'Ξ' => "\\Xi",
    'Π' => "\\Pi",
    'Σ' => "\\Sigma",
    'Υ' => "\\Upsilon",
    'Φ' => "\\Phi",
    'Ψ' => "\\Psi",
    'Ω' => "\\Omega",
    // Relations
    '≤' => "\\leq",
    '≥' => "\\geq",
    '≠' => "\\neq",
    '≈' => "\\approx",
    '≡' => "\\equiv",
    '∼' => "\\sim",
    '≃' => "\\simeq",
    '≅' => "\\cong",
    '∝' => "\\propto",
    '≪' => "\\ll",
    '≫' => "\\gg",
    '⊥' => "\\perp",
    '∥' => "\\parallel",
    // Operators
    '±' => "\\pm",
    '∓' => "\\mp",
    '×' => "\\times",
    '÷' => "\\div",
    '·' => "\\cdot",
    '⋅' => "\\cdot",
    '∘' => "\\circ",
    '−' => "-",
    '∗' => "\\ast",
    '⊗' => "\\otimes",
    '⊕' => "\\oplus",
    '∑' => "\\sum",
    '∏' => "\\prod",
    '∫' => "\\int",
    '∮' => "\\oint",
    '√' => "\\surd",
    // Calculus and misc
    '∞' => "\\infty",
    '∂' => "\\partial",
    '∇' => "\\nabla",
    'ℏ' => "\\hbar",
    'ℓ' => "\\ell",
    '∠' => "\\angle",
    '°' => "^{\\circ}",
    '′' => "'",
    '″' => "''",
    '…' => "\\ldots",
    '⋯' => "\\cdots",
    '⋮' => "\\vdots",
    // Sets and logic
    '∈' => "\\in",
    '∉' => "\\notin",
    '∋' => "\\ni",
    '⊂' => "\\subset",
    '⊆' => "\\subseteq",
    '⊃' => "\\supset",
    '⊇' => "\\supseteq",
    '∪' => "\\cup",
    '∩' => "\\cap",
    '∅' => "\\emptyset",
    '∀' => "\\forall",
    '∃' => "\\exists",
    '¬' => "\\neg",
    '∧' => "\\land",
    '∨' => "\\lor",
    '∴' => "\\therefore",
    // Arrows
    '→' => "\\to",
    '←' => "\\leftarrow",
    '↔' => "\\leftrightarrow",
    '⇒' => "\\Rightarrow",
    '⇐' => "\\Leftarrow",
    '⇔' => "\\Leftrightarrow",
    '↦' => "\\mapsto",
    '↑' => "\\uparrow",
    '↓' => "\\downarrow",
    // Blackboard bold
    'ℝ' => "\\mathbb{R}",
    'ℕ' => "\\mathbb{N}",
    'ℤ' => "\\mathbb{Z}",
    'ℚ' => "\\mathbb{Q}",
    'ℂ' => "\\mathbb{C}",
    // Brackets outside delimiter objects
    '⟨' => "\\langle",
    '⟩' => "\\rangle",
    // Invisible operators and spacing
    '\u{200B}' => "",
    '\u{2061}' => "",
    '\u{2062}' => "",
    '\u{2063}' => "",
    '\u{2009}' => "\\,",
    '\u{200A}' => "\\,",
    '\u{00A0}' => "~",
};

/// Auto-sizing open commands keyed by the delimiter character
pub static OPEN_DELIMITERS: phf::Map<&'static str, &'static str> = phf_map! {
    "(" => "\\left(",
    "[" => "\\left[",
    "{" => "\\left\\{",
    "|" => "\\left|",
    "‖" => "\\left\\|",
    "⟨" => "\\left\\langle",
    "⌊" => "\\left\\lfloor",
    "⌈" => "\\left\\lceil",
};

/// Auto-sizing close commands keyed by the delimiter character
pub static CLOSE_DELIMITERS: phf::Map<&'static str, &'static str> = phf_map! {
    ")" => "\\right)",
    "]" => "\\right]",
    "}" => "\\right\\}",
    "|" => "\\right|",
    "‖" => "\\right\\|",
    "⟩" => "\\right\\rangle",
    "⌋" => "\\right\\rfloor",
    "⌉" => "\\right\\rceil",
};

/// Accent commands keyed by the (usually combining) accent glyph
pub static ACCENTS: phf::Map<&'static str, &'static str> = phf_map! {
    "\u{0302}" => "\\hat",
    "\u{0300}" => "\\grave",
    "\u{0301}" => "\\acute",
    "\u{0303}" => "\\tilde",
    "\u{0304}" => "\\bar",
    "\u{0305}" => "\\bar",
    "\u{0307}" => "\\dot",
    "\u{0308}" => "\\ddot",
    "\u{20D7}" => "\\vec",
    "^" => "\\hat",
    "~" => "\\tilde",
    "¯" => "\\bar",
};

/// Large-operator commands keyed by the n-ary glyph
pub static NARY_OPERATORS: phf::Map<&'static str, &'static str> = phf_map! {
    "∑" => "\\sum",
    "∏" => "\\prod",
    "∐" => "\\coprod",
    "∫" => "\\int",
    "∬" => "\\iint",
    "∭" => "\\iiint",
    "∮" => "\\oint",
    "⋃" => "\\bigcup",
    "⋂" => "\\bigcap",
    "⋁" => "\\bigvee",
    "⋀" => "\\bigwedge",
    "⨁" => "\\bigoplus",
    "⨂" => "\\bigotimes",
};

/// Function names with a built-in LaTeX command
pub static KNOWN_FUNCTIONS: phf::Set<&'static str> = phf_set! {
    "sin", "cos", "tan", "log", "ln", "exp", "lim",
    "max", "min", "sup", "inf", "det", "gcd",
};

/// Default accent when none is given (combining circumflex)
pub const DEFAULT_ACCENT: &str = "\\hat";
/// Default n-ary operator when the glyph is absent or unknown
pub const DEFAULT_NARY: &str = "\\sum";
/// Over-brace glyph that selects `\overbrace` regardless of position
pub const OVERBRACE_GLYPH: &str = "\u{23DE}";
