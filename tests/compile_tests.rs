//! End-to-end compile scenarios, one per worked example in the language
//! reference.

use kleenexp::{CompileOptions, Flavor, compile};

fn pcre(source: &str) -> String {
    compile(source, &CompileOptions::default()).unwrap()
}

#[test]
fn literal_text_is_escaped() {
    assert_eq!(
        pcre("This is a (short) literal :-)"),
        "This\\ is\\ a\\ \\(short\\)\\ literal\\ :-\\)"
    );
}

#[test]
fn digit_macro_emits_shorthand() {
    assert_eq!(pcre("[#digit]"), "\\d");
}

#[test]
fn case_insensitive_alternation() {
    assert_eq!(
        pcre("[case_insensitive ['Laugh' | 'Cry']]"),
        "(?i:Laugh|Cry)"
    );
}

#[test]
fn one_or_more_capture() {
    assert_eq!(pcre("[c 1+ #d]"), "(\\d+)");
}

#[test]
fn named_capture_with_exact_repeat_and_anchors() {
    assert_eq!(
        pcre("[#start_line]articles/[capture:year 4 #digit]/[#end_line]"),
        "^articles/(?P<year>\\d{4})/$"
    );
}

#[test]
fn negated_alternation_of_single_chars() {
    assert_eq!(pcre("[not ['a' | 'b']]"), "[^ab]");
}

#[test]
fn negated_raw_single_char_builtin() {
    assert_eq!(pcre("[not #quote]"), "[^']");
}

#[test]
fn alternation_of_ranges_enumerates() {
    assert_eq!(pcre("[#digit | #a..f]"), "[0-9a-f]");
}

#[test]
fn user_defined_hex_byte_macro() {
    assert_eq!(
        pcre("['#' [[6 #h] | [3 #h]] #h=[#digit | #a..f]]"),
        "\\#(?:[0-9a-f]{6}|[0-9a-f]{3})"
    );
}

#[test]
fn empty_source_is_a_syntax_error() {
    assert!(compile("", &CompileOptions::default()).is_err());
}

#[test]
fn explicit_empty_braces_compiles_to_empty_string() {
    assert_eq!(pcre("[]"), "");
}

#[test]
fn hex_digit_builtin_matches_its_manual_definition() {
    assert_eq!(pcre("[#hex_digit]"), pcre("[#digit | #a..f | #A..F]"));
}

#[test]
fn short_and_long_macro_aliases_are_identical() {
    assert_eq!(pcre("[#digit]"), pcre("[#d]"));
    assert_eq!(pcre("[#letter]"), pcre("[#l]"));
    assert_eq!(pcre("[#not_letter]"), pcre("[#L]"));
}

#[test]
fn not_letter_builtin_emits_negated_ascii_class() {
    assert_eq!(pcre("[#not_letter]"), "[^A-Za-z]");
}

#[test]
fn ecmascript_flavor_uses_caret_dollar_string_anchors() {
    let options = CompileOptions {
        flavor: Flavor::EcmaScript,
        ..CompileOptions::default()
    };
    let pattern = compile("[#start_string]a[#end_string]", &options).unwrap();
    assert_eq!(pattern, "^a$");
}

#[test]
fn ecmascript_named_capture_uses_angle_bracket_form() {
    let options = CompileOptions {
        flavor: Flavor::EcmaScript,
        ..CompileOptions::default()
    };
    assert_eq!(compile("[capture:n 'x']", &options).unwrap(), "(?<n>x)");
}

#[test]
fn outer_literal_and_braces_interleave_without_separators() {
    assert_eq!(pcre("a[#digit]b[#digit]c"), "a\\db\\dc");
}

#[test]
fn sibling_matches_need_no_separator_right_after_a_closing_bracket() {
    assert_eq!(pcre("[[#digit]'x']"), "\\dx");
}
