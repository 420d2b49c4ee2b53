//! A thin wrapper over the host `regex` crate for callers who want to
//! compile a Kleene Expression and use it immediately, without managing the
//! intermediate regex string themselves. Outside the compiler core: none of
//! the testable properties in `SPEC_FULL.md` cover this module.

use regex::{Captures, Regex};

use crate::error::CompileError;
use crate::options::CompileOptions;

/// A KE pattern compiled once, ready to search/match/replace repeatedly.
#[derive(Debug, Clone)]
pub struct KleenExpRegex {
    regex: Regex,
}

/// Errors either come from compiling the KE source or from the downstream
/// `regex` crate rejecting the emitted pattern (which should not happen for
/// well-formed input, but the host engine has the final say).
#[derive(Debug, thiserror::Error)]
pub enum KleenExpError {
    #[error(transparent)]
    Compile(#[from] CompileError),
    #[error(transparent)]
    Regex(#[from] regex::Error),
}

impl KleenExpRegex {
    pub fn new(source: &str, options: &CompileOptions) -> Result<Self, KleenExpError> {
        let pattern = crate::compile(source, options)?;
        let regex = Regex::new(&pattern)?;
        Ok(Self { regex })
    }

    pub fn pattern(&self) -> &str {
        self.regex.as_str()
    }

    pub fn is_match(&self, text: &str) -> bool {
        self.regex.is_match(text)
    }

    pub fn find<'t>(&self, text: &'t str) -> Option<regex::Match<'t>> {
        self.regex.find(text)
    }

    pub fn captures<'t>(&self, text: &'t str) -> Option<Captures<'t>> {
        self.regex.captures(text)
    }

    pub fn replace<'t>(&self, text: &'t str, rep: &str) -> std::borrow::Cow<'t, str> {
        self.regex.replace(text, rep)
    }

    pub fn replace_all<'t>(&self, text: &'t str, rep: &str) -> std::borrow::Cow<'t, str> {
        self.regex.replace_all(text, rep)
    }
}
