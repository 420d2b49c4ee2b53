//! # kleenexp
//!
//! Compiles Kleene Expressions — a readable surface syntax for regular
//! expressions — into a string accepted by a target regex engine.
//!
//! ```
//! use kleenexp::{compile, CompileOptions};
//!
//! let pattern = compile("[#digit]", &CompileOptions::default()).unwrap();
//! assert_eq!(pattern, "\\d");
//! ```

mod ast;
mod convenience;
mod debug;
mod emit;
mod error;
mod lower;
mod macros;
mod options;
mod parser;

pub use convenience::{KleenExpError, KleenExpRegex};
pub use debug::DebugTracer;
pub use error::{CompileError, CompileResult, ErrorKind, Span};
pub use options::{CompileOptions, Flavor};

/// Compile a Kleene Expression source string into a regex string for the
/// flavor named by `options`.
pub fn compile(source: &str, options: &CompileOptions) -> CompileResult<String> {
    let tracer = DebugTracer::new(false, source);
    compile_traced(source, options, &tracer)
}

/// Like [`compile`], but prints a trace of each pipeline stage to stderr
/// when `tracer` is enabled.
pub fn compile_traced(
    source: &str,
    options: &CompileOptions,
    tracer: &DebugTracer,
) -> CompileResult<String> {
    tracer.print_start();
    let result = (|| {
        let items = parser::parse(source)?;
        tracer.print_parsed(items.len());
        let ast = lower::lower_program(&items, options)?;
        tracer.print_lowered(&ast);
        Ok(emit::emit(&ast, options))
    })();

    match &result {
        Ok(regex) => tracer.print_result(regex),
        Err(err) => tracer.print_error(err),
    }
    result
}

/// Alias for [`compile`], matching the external-interface naming used
/// elsewhere in the ecosystem for "compile this pattern".
pub fn re(source: &str, options: &CompileOptions) -> CompileResult<String> {
    compile(source, options)
}
