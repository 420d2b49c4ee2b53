//! Typed errors raised while compiling a Kleene Expression.

use std::fmt;

use thiserror::Error;

/// Byte offsets into the original source, inclusive-exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub(crate) fn from_pest(span: pest::Span<'_>) -> Self {
        Span::new(span.start(), span.end())
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

/// Everything that can go wrong while turning a KE source string into a
/// target-flavor regex.
#[derive(Debug, Error)]
#[error("{kind} (at {span})")]
pub struct CompileError {
    kind: ErrorKind,
    span: Span,
}

impl CompileError {
    pub fn new(kind: ErrorKind, span: Span) -> Self {
        Self { kind, span }
    }

    pub fn kind(&self) -> &ErrorKind {
        &self.kind
    }

    pub fn span(&self) -> Span {
        self.span
    }
}

/// Classifier for a [`CompileError`]; see each variant's message for the
/// condition that produces it.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ErrorKind {
    #[error("syntax error: {0}")]
    SyntaxError(String),

    #[error("unknown macro `#{0}`")]
    UnknownMacro(String),

    #[error("cyclic definition of macro `#{0}`")]
    CyclicMacro(String),

    #[error("macro `#{0}` is defined twice in the same scope")]
    DuplicateDefinition(String),

    #[error("invalid range `#{0}..{1}`: endpoints must be the same kind of character and strictly ordered")]
    InvalidRange(char, char),

    #[error("`not` can only negate a single character or character class")]
    InvalidNegation,

    #[error("operator `{0}` is not supported")]
    UnsupportedOperator(String),

    #[error("macro expansion exceeded the configured depth limit ({0})")]
    ExpansionDepthExceeded(usize),
}

impl From<pest::error::Error<crate::parser::Rule>> for CompileError {
    fn from(err: pest::error::Error<crate::parser::Rule>) -> Self {
        let span = match err.location {
            pest::error::InputLocation::Pos(p) => Span::new(p, p),
            pest::error::InputLocation::Span((a, b)) => Span::new(a, b),
        };
        let message = rename_rules(err).to_string();
        CompileError::new(ErrorKind::SyntaxError(message), span)
    }
}

fn rename_rules(err: pest::error::Error<crate::parser::Rule>) -> pest::error::Error<crate::parser::Rule> {
    err.renamed_rules(|rule| format!("{rule:?}"))
}

pub type CompileResult<T> = Result<T, CompileError>;
