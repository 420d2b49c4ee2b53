//! Opt-in trace output for the compile pipeline, printed to stderr.
//!
//! Mirrors the teacher-idiom debug context: every `print_*` method
//! early-returns when disabled, so call sites don't need to guard on
//! `enabled` themselves.

use crate::ast::Ast;

#[derive(Debug, Clone)]
pub struct DebugTracer {
    enabled: bool,
    source: String,
}

impl DebugTracer {
    pub fn new(enabled: bool, source: impl Into<String>) -> Self {
        Self {
            enabled,
            source: source.into(),
        }
    }

    pub fn enabled(&self) -> bool {
        self.enabled
    }

    pub fn print_start(&self) {
        if !self.enabled {
            return;
        }
        eprintln!("DEBUG: ═══════════════════════════════════════");
        eprintln!("DEBUG: COMPILE START");
        eprintln!("DEBUG: Source: {:?}", self.source);
        eprintln!("DEBUG: ───────────────────────────────────────");
    }

    pub fn print_parsed(&self, item_count: usize) {
        if !self.enabled {
            return;
        }
        eprintln!("DEBUG: Parsed {item_count} top-level item(s)");
    }

    pub fn print_lowered(&self, ast: &Ast) {
        if !self.enabled {
            return;
        }
        eprintln!("DEBUG: Lowered AST: {ast:?}");
    }

    pub fn print_result(&self, regex: &str) {
        if !self.enabled {
            return;
        }
        eprintln!("DEBUG: ✅ COMPILE COMPLETE");
        eprintln!("DEBUG: 🎯 Emitted regex: {regex:?}");
        eprintln!("DEBUG: ═══════════════════════════════════════");
    }

    pub fn print_error(&self, error: &crate::error::CompileError) {
        if !self.enabled {
            return;
        }
        eprintln!("DEBUG: ❌ COMPILE ERROR: {error}");
        eprintln!("DEBUG: ═══════════════════════════════════════");
    }
}
