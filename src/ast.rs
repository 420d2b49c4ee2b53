//! The normalized tree the lowering stage produces and the emitter consumes.
//!
//! Unlike the parse tree (`crate::parser`), this has a small fixed set of
//! node kinds: macros are gone (inlined), and operator chains have been
//! folded into their semantic wrappers (`Repeat`, `Capture`, `Negation`).

/// A single item inside a [`Ast::CharClass`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClassItem {
    Char(char),
    Range(char, char),
}

/// An anchor whose concrete spelling depends on [`crate::options::Flavor`]
/// and [`crate::options::CompileOptions::multiline`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnchorKind {
    StartString,
    EndString,
    StartLine,
    EndLine,
    WordBoundary,
    NotWordBoundary,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Ast {
    /// Literal text to be escaped and emitted verbatim.
    Literal(String),
    /// An already-valid regex fragment for the target flavor, used for
    /// built-in macros like `#space` that map directly to `\s`.
    Raw(String),
    Concat(Vec<Ast>),
    Alt(Vec<Ast>),
    Repeat {
        child: Box<Ast>,
        min: u32,
        max: Option<u32>,
        greedy: bool,
    },
    Capture {
        child: Box<Ast>,
        name: Option<String>,
    },
    /// Case-insensitive wrapper introduced by the `case_insensitive`/`ci` op.
    CaseInsensitive(Box<Ast>),
    /// Negation of a single character or character class; only ever
    /// constructed over a child that folds into a `CharClass` (see
    /// `crate::lower`).
    Negation(Box<Ast>),
    CharClass {
        items: Vec<ClassItem>,
        negated: bool,
    },
    Anchor(AnchorKind),
}

impl Ast {
    /// The empty match: what `[]` lowers to.
    pub fn empty() -> Ast {
        Ast::Concat(Vec::new())
    }

    pub fn is_empty_concat(&self) -> bool {
        matches!(self, Ast::Concat(items) if items.is_empty())
    }

    /// Whether this node, emitted as-is, denotes exactly one character (used
    /// to decide if negation / character-class folding apply).
    pub fn as_single_char_class(&self) -> Option<Vec<ClassItem>> {
        match self {
            Ast::Literal(text) => {
                let mut chars = text.chars();
                let c = chars.next()?;
                if chars.next().is_some() {
                    None
                } else {
                    Some(vec![ClassItem::Char(c)])
                }
            }
            Ast::Raw(fragment) => {
                let mut chars = fragment.chars();
                let c = chars.next()?;
                if chars.next().is_some() {
                    return None;
                }
                // Exclude fragments where the raw regex text isn't the
                // literal character itself: `.` means "any character", and
                // a bare `\` never appears alone (it always starts a
                // multi-char escape, caught above by the length check).
                if c == '.' || c == '\\' {
                    None
                } else {
                    Some(vec![ClassItem::Char(c)])
                }
            }
            Ast::CharClass { items, negated: false } => Some(items.clone()),
            Ast::Alt(branches) => {
                let mut items = Vec::new();
                for branch in branches {
                    items.extend(branch.as_single_char_class()?);
                }
                Some(items)
            }
            _ => None,
        }
    }
}
