//! Lowering: parse tree -> normalized AST.
//!
//! Macro references are inlined lazily, right here, rather than as a
//! separate pre-pass — that's what lets cyclic definitions be caught with a
//! simple visit stack instead of a whole-graph analysis up front.

use crate::ast::{Ast, ClassItem};
use crate::error::{CompileError, CompileResult, ErrorKind, Span};
use crate::macros::{self, Builtin, Scope};
use crate::options::CompileOptions;
use crate::parser::{self, Braces, BracesBody, Match, MatchesSeq, Op, TopItem};

struct State {
    visiting: Vec<String>,
    max_depth: usize,
}

impl State {
    fn new(max_depth: usize) -> Self {
        State {
            visiting: Vec::new(),
            max_depth,
        }
    }

    fn enter(&mut self, name: &str, span: Span) -> CompileResult<()> {
        if self.visiting.iter().any(|n| n == name) {
            return Err(CompileError::new(ErrorKind::CyclicMacro(name.to_string()), span));
        }
        self.visiting.push(name.to_string());
        if self.visiting.len() > self.max_depth {
            return Err(CompileError::new(
                ErrorKind::ExpansionDepthExceeded(self.max_depth),
                span,
            ));
        }
        Ok(())
    }

    fn exit(&mut self) {
        self.visiting.pop();
    }
}

/// Lower a fully parsed KE source (top-level items) into one AST node.
pub(crate) fn lower_program(items: &[TopItem], options: &CompileOptions) -> CompileResult<Ast> {
    let mut state = State::new(options.max_expansion_depth);
    let root = Scope::root();
    lower_top_items(items, &root, &mut state, options)
}

fn lower_top_items(
    items: &[TopItem],
    scope: &Scope,
    state: &mut State,
    options: &CompileOptions,
) -> CompileResult<Ast> {
    let mut parts = Vec::new();
    for item in items {
        let ast = match item {
            TopItem::OuterLiteral(text) => Ast::Literal(text.clone()),
            TopItem::Braces(braces) => lower_braces(braces, scope, state, options)?,
        };
        parts.push(ast);
    }
    Ok(concat(parts))
}

/// Concatenate lowered parts, merging adjacent literals and collapsing a
/// single child down to itself.
fn concat(parts: Vec<Ast>) -> Ast {
    let mut merged: Vec<Ast> = Vec::new();
    for part in parts {
        match (merged.last_mut(), &part) {
            (Some(Ast::Literal(prev)), Ast::Literal(next)) => prev.push_str(next),
            _ => merged.push(part),
        }
    }
    match merged.len() {
        0 => Ast::empty(),
        1 => merged.into_iter().next().unwrap(),
        _ => Ast::Concat(merged),
    }
}

fn lower_braces(
    braces: &Braces,
    scope: &Scope,
    state: &mut State,
    options: &CompileOptions,
) -> CompileResult<Ast> {
    lower_braces_body(&braces.body, braces.span, scope, state, options)
}

fn lower_braces_body(
    body: &BracesBody,
    span: Span,
    scope: &Scope,
    state: &mut State,
    options: &CompileOptions,
) -> CompileResult<Ast> {
    let child_scope = Scope::child_from_body(scope, body).map_err(|dup| {
        CompileError::new(ErrorKind::DuplicateDefinition(dup), span)
    })?;

    match body {
        BracesBody::Empty => Ok(Ast::empty()),
        BracesBody::Matches(m) => lower_matches(m, &child_scope, state, options),
        BracesBody::Either(branches) => {
            let mut lowered = Vec::with_capacity(branches.len());
            for branch in branches {
                lowered.push(lower_matches(branch, &child_scope, state, options)?);
            }
            Ok(fold_alt(lowered))
        }
        BracesBody::OpsMatches(ops, matches) => {
            let inner = match matches {
                Some(m) => lower_matches(m, &child_scope, state, options)?,
                None => {
                    return Err(CompileError::new(
                        ErrorKind::SyntaxError(
                            "operator requires a following expression".to_string(),
                        ),
                        span,
                    ));
                }
            };
            wrap_ops(ops, inner, span)
        }
    }
}

fn lower_matches(
    matches: &MatchesSeq,
    scope: &Scope,
    state: &mut State,
    options: &CompileOptions,
) -> CompileResult<Ast> {
    let mut parts = Vec::new();
    for m in &matches.0 {
        if let Some(ast) = lower_match(m, scope, state, options)? {
            parts.push(ast);
        }
    }
    Ok(concat(parts))
}

/// Returns `None` for `Def` matches, which contribute to scope only.
fn lower_match(
    m: &Match,
    scope: &Scope,
    state: &mut State,
    options: &CompileOptions,
) -> CompileResult<Option<Ast>> {
    match m {
        Match::Def(..) => Ok(None),
        Match::InnerLiteral(text, _) => Ok(Some(Ast::Literal(text.clone()))),
        Match::Braces(braces) => Ok(Some(lower_braces(braces, scope, state, options)?)),
        Match::RangeMacro(a, b, span) => Ok(Some(lower_range_macro(*a, *b, *span)?)),
        Match::MacroRef(name, span) => Ok(Some(lower_macro_ref(name, *span, scope, state, options)?)),
    }
}

fn lower_range_macro(a: char, b: char, span: Span) -> CompileResult<Ast> {
    let class_of = |c: char| -> Option<u8> {
        if c.is_ascii_digit() {
            Some(0)
        } else if c.is_ascii_lowercase() {
            Some(1)
        } else if c.is_ascii_uppercase() {
            Some(2)
        } else {
            None
        }
    };
    let same_class = matches!((class_of(a), class_of(b)), (Some(x), Some(y)) if x == y);
    if !same_class || a >= b {
        return Err(CompileError::new(ErrorKind::InvalidRange(a, b), span));
    }
    Ok(Ast::CharClass {
        items: vec![ClassItem::Range(a, b)],
        negated: false,
    })
}

fn lower_macro_ref(
    name: &str,
    span: Span,
    scope: &Scope,
    state: &mut State,
    options: &CompileOptions,
) -> CompileResult<Ast> {
    if let Some(def_braces) = scope.lookup(name) {
        state.enter(name, span)?;
        let result = lower_braces(def_braces, scope, state, options);
        state.exit();
        return result;
    }

    match macros::lookup_builtin(name) {
        Some(Builtin::Expansion(source)) => {
            state.enter(name, span)?;
            let items = parser::parse(source).expect("built-in expansion source is always valid");
            let root = Scope::root();
            let result = lower_top_items(&items, &root, state, options);
            state.exit();
            result
        }
        Some(builtin) => Ok(macros::builtin_to_ast(builtin, options)
            .expect("non-expansion builtins always convert directly")),
        None => Err(CompileError::new(
            ErrorKind::UnknownMacro(name.to_string()),
            span,
        )),
    }
}

/// Fold an `Either`'s lowered branches into a single `CharClass` when every
/// branch denotes exactly one character or class; otherwise keep the `Alt`.
fn fold_alt(branches: Vec<Ast>) -> Ast {
    let mut items = Vec::new();
    let mut foldable = true;
    for branch in &branches {
        match branch.as_single_char_class() {
            Some(mut branch_items) => items.append(&mut branch_items),
            None => {
                foldable = false;
                break;
            }
        }
    }
    if foldable && !branches.is_empty() {
        Ast::CharClass {
            items,
            negated: false,
        }
    } else {
        Ast::Alt(branches)
    }
}

fn wrap_ops(ops: &[Op], inner: Ast, span: Span) -> CompileResult<Ast> {
    match ops.split_first() {
        None => Ok(inner),
        Some((op, rest)) => {
            let wrapped = wrap_ops(rest, inner, span)?;
            apply_op(op, wrapped, span)
        }
    }
}

fn apply_op(op: &Op, inner: Ast, span: Span) -> CompileResult<Ast> {
    match op.name.as_str() {
        "capture" | "c" => Ok(Ast::Capture {
            child: Box::new(inner),
            name: op.arg.clone(),
        }),
        "not" => {
            if op.arg.is_some() {
                return Err(unsupported(op, span));
            }
            apply_negation(inner, span)
        }
        "comment" => Ok(Ast::empty()),
        "case_insensitive" | "ci" => {
            if op.arg.is_some() {
                return Err(unsupported(op, span));
            }
            Ok(Ast::CaseInsensitive(Box::new(inner)))
        }
        name => {
            if let Some((min, max)) = parse_quantifier(name) {
                let greedy = match op.arg.as_deref() {
                    None => true,
                    Some("fewest") => false,
                    Some(_) => return Err(unsupported(op, span)),
                };
                Ok(Ast::Repeat {
                    child: Box::new(inner),
                    min,
                    max,
                    greedy,
                })
            } else {
                Err(unsupported(op, span))
            }
        }
    }
}

fn unsupported(op: &Op, span: Span) -> CompileError {
    let full = match &op.arg {
        Some(arg) => format!("{}:{}", op.name, arg),
        None => op.name.clone(),
    };
    CompileError::new(ErrorKind::UnsupportedOperator(full), span)
}

/// Parses the numeric quantifier forms `N`, `N+`, `N-M`.
fn parse_quantifier(name: &str) -> Option<(u32, Option<u32>)> {
    if let Some(prefix) = name.strip_suffix('+') {
        let n: u32 = prefix.parse().ok()?;
        return Some((n, None));
    }
    if let Some((lo, hi)) = name.split_once('-') {
        let lo: u32 = lo.parse().ok()?;
        let hi: u32 = hi.parse().ok()?;
        if lo > hi {
            return None;
        }
        return Some((lo, Some(hi)));
    }
    let n: u32 = name.parse().ok()?;
    Some((n, Some(n)))
}

fn apply_negation(child: Ast, span: Span) -> CompileResult<Ast> {
    match child {
        Ast::CharClass { items, negated } => Ok(Ast::CharClass {
            items,
            negated: !negated,
        }),
        other => match other.as_single_char_class() {
            Some(items) => Ok(Ast::CharClass {
                items,
                negated: true,
            }),
            None => Err(CompileError::new(ErrorKind::InvalidNegation, span)),
        },
    }
}
