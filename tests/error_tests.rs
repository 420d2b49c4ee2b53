//! Exercises each named error classifier from the language reference.

use kleenexp::{CompileOptions, ErrorKind, compile};

fn err(source: &str) -> ErrorKind {
    compile(source, &CompileOptions::default())
        .unwrap_err()
        .kind()
        .clone()
}

#[test]
fn unclosed_bracket_is_syntax_error() {
    assert!(matches!(err("[abc"), ErrorKind::SyntaxError(_)));
}

#[test]
fn mixing_ops_and_pipe_is_syntax_error() {
    assert!(matches!(err("[capture 'a' | 'b']"), ErrorKind::SyntaxError(_)));
}

#[test]
fn unknown_macro_is_reported() {
    assert!(matches!(err("[#not_a_real_macro]"), ErrorKind::UnknownMacro(name) if name == "not_a_real_macro"));
}

#[test]
fn cyclic_definition_is_reported() {
    assert!(matches!(err("[#a=[#b] #b=[#a] #a]"), ErrorKind::CyclicMacro(_)));
}

#[test]
fn duplicate_definition_in_same_scope_is_reported() {
    assert!(matches!(
        err("[#a=['x'] #a=['y'] #a]"),
        ErrorKind::DuplicateDefinition(name) if name == "a"
    ));
}

#[test]
fn invalid_range_mixed_classes_is_reported() {
    assert!(matches!(err("[#a..9]"), ErrorKind::InvalidRange('a', '9')));
}

#[test]
fn invalid_range_out_of_order_is_reported() {
    assert!(matches!(err("[#f..a]"), ErrorKind::InvalidRange('f', 'a')));
}

#[test]
fn negating_a_multi_character_literal_is_reported() {
    assert!(matches!(err("[not ['ab']]"), ErrorKind::InvalidNegation));
}

#[test]
fn unsupported_operator_is_reported() {
    assert!(matches!(err("[frobnicate 'x']"), ErrorKind::UnsupportedOperator(_)));
}

#[test]
fn expansion_depth_is_enforced() {
    let mut options = CompileOptions::default();
    options.max_expansion_depth = 2;
    let source = "[#a=[#b] #b=[#c] #c=['x'] #a]";
    let result = compile(source, &options);
    assert!(matches!(
        result.unwrap_err().kind(),
        ErrorKind::ExpansionDepthExceeded(2)
    ));
}
