//! Emitter: normalized AST -> target-flavor regex string.
//!
//! Emission is a pure recursive walk; the AST it consumes has already been
//! validated by lowering; `Negation` never reaches here (it's folded into a
//! `CharClass` as soon as it's built — see `crate::lower::apply_negation`).

use crate::ast::{AnchorKind, Ast, ClassItem};
use crate::options::{CompileOptions, Flavor};

const TOP_METACHARS: &str = ".^$|?*+()[]{}\\#";
const CLASS_METACHARS: &str = "]\\^-";

pub(crate) fn emit(ast: &Ast, options: &CompileOptions) -> String {
    let body = render(ast, options, true);
    if options.multiline && options.flavor == Flavor::Pcre {
        format!("(?m:{body})")
    } else {
        body
    }
}

fn render(ast: &Ast, options: &CompileOptions, root: bool) -> String {
    match ast {
        Ast::Literal(text) => text.chars().map(escape_top_char).collect(),
        Ast::Raw(fragment) => fragment.clone(),
        Ast::Concat(children) => children
            .iter()
            .map(|c| render(c, options, false))
            .collect(),
        Ast::Alt(branches) => {
            let inner = branches
                .iter()
                .map(|b| render(b, options, true))
                .collect::<Vec<_>>()
                .join("|");
            if root { inner } else { format!("(?:{inner})") }
        }
        Ast::Repeat {
            child,
            min,
            max,
            greedy,
        } => {
            let atom = render_as_atom(child, options);
            let quantifier = render_quantifier(*min, *max);
            let lazy_suffix = if *greedy { "" } else { "?" };
            format!("{atom}{quantifier}{lazy_suffix}")
        }
        Ast::Capture { child, name } => {
            let inner = render(child, options, true);
            match name {
                Some(n) => format!("{}{inner})", capture_open(options.flavor, n)),
                None => format!("({inner})"),
            }
        }
        Ast::CaseInsensitive(child) => format!("(?i:{})", render(child, options, true)),
        Ast::CharClass { items, negated } => render_class(items, *negated),
        Ast::Anchor(kind) => render_anchor(*kind, options).to_string(),
        Ast::Negation(_) => unreachable!("negation is folded away during lowering"),
    }
}

fn capture_open(flavor: Flavor, name: &str) -> String {
    match flavor {
        Flavor::Pcre => format!("(?P<{name}>"),
        Flavor::EcmaScript => format!("(?<{name}>"),
    }
}

fn render_quantifier(min: u32, max: Option<u32>) -> String {
    match (min, max) {
        (0, Some(1)) => "?".to_string(),
        (0, None) => "*".to_string(),
        (1, None) => "+".to_string(),
        (n, Some(m)) if n == m => format!("{{{n}}}"),
        (n, None) => format!("{{{n},}}"),
        (n, Some(m)) => format!("{{{n},{m}}}"),
    }
}

fn is_atomic(ast: &Ast) -> bool {
    match ast {
        Ast::Literal(s) => s.chars().count() == 1,
        Ast::Raw(_) | Ast::CharClass { .. } | Ast::Anchor(_) | Ast::Capture { .. } | Ast::CaseInsensitive(_) => true,
        Ast::Alt(_) | Ast::Concat(_) => false,
        Ast::Negation(_) => unreachable!("negation is folded away during lowering"),
    }
}

fn render_as_atom(ast: &Ast, options: &CompileOptions) -> String {
    let rendered = render(ast, options, true);
    if is_atomic(ast) { rendered } else { format!("(?:{rendered})") }
}

fn render_anchor(kind: AnchorKind, options: &CompileOptions) -> &'static str {
    match kind {
        AnchorKind::StartString => match options.flavor {
            Flavor::Pcre => "\\A",
            Flavor::EcmaScript => "^",
        },
        AnchorKind::EndString => match options.flavor {
            Flavor::Pcre => "\\Z",
            Flavor::EcmaScript => "$",
        },
        AnchorKind::StartLine => "^",
        AnchorKind::EndLine => "$",
        AnchorKind::WordBoundary => "\\b",
        AnchorKind::NotWordBoundary => "\\B",
    }
}

fn render_class(items: &[ClassItem], negated: bool) -> String {
    if let Some(shorthand) = shorthand_for(items) {
        return if negated { shorthand.1.to_string() } else { shorthand.0.to_string() };
    }
    let mut out = String::from("[");
    if negated {
        out.push('^');
    }
    for item in items {
        match item {
            ClassItem::Char(c) => out.push_str(&escape_class_char(*c)),
            ClassItem::Range(a, b) => {
                out.push_str(&escape_class_char(*a));
                out.push('-');
                out.push_str(&escape_class_char(*b));
            }
        }
    }
    out.push(']');
    out
}

/// Exact-match canonical patterns that have a single-token shorthand in
/// every supported flavor. Folding (see `crate::lower::fold_alt`) merges
/// items from multiple branches, so only an *unfolded* class — exactly the
/// builtin's own items — still matches one of these.
fn shorthand_for(items: &[ClassItem]) -> Option<(&'static str, &'static str)> {
    match items {
        [ClassItem::Range('0', '9')] => Some(("\\d", "\\D")),
        _ => None,
    }
}

fn escape_top_char(c: char) -> String {
    if TOP_METACHARS.contains(c) {
        format!("\\{c}")
    } else if c.is_whitespace() {
        format!("\\{c}")
    } else {
        c.to_string()
    }
}

fn escape_class_char(c: char) -> String {
    if CLASS_METACHARS.contains(c) {
        format!("\\{c}")
    } else {
        c.to_string()
    }
}
