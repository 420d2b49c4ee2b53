//! Compile-time configuration accepted by [`crate::compile`].

/// Target regex dialect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Flavor {
    /// PCRE-like: supports `\A`/`\Z`, `(?P<name>...)`, `(?i:...)`.
    #[default]
    Pcre,
    /// ECMAScript-like: no `\A`/`\Z`, named groups use `(?<name>...)`.
    EcmaScript,
}

/// Knobs threaded through every compiler stage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompileOptions {
    pub flavor: Flavor,
    /// Whether `#start_line`/`#end_line` should additionally toggle the
    /// target flavor's multiline mode semantics at the emission site.
    pub multiline: bool,
    /// Whether letter-case macros should lower to Unicode property classes
    /// instead of the ASCII-only ranges.
    pub unicode: bool,
    /// Recursion guard for macro expansion during lowering.
    pub max_expansion_depth: usize,
}

impl Default for CompileOptions {
    fn default() -> Self {
        Self {
            flavor: Flavor::default(),
            multiline: false,
            unicode: false,
            max_expansion_depth: 100,
        }
    }
}
