//! The built-in macro table and the scoped resolver that maps `MacroRef`
//! names (from the parse tree) to their definitions.

use std::collections::HashMap;

use once_cell::sync::Lazy;

use crate::ast::{AnchorKind, Ast, ClassItem};
use crate::options::CompileOptions;
use crate::parser::{Braces, BracesBody, Match, MatchesSeq};

/// What a built-in macro name expands to.
#[derive(Debug, Clone)]
pub(crate) enum Builtin {
    /// Already a valid regex fragment for any supported flavor.
    Raw(&'static str),
    /// A fixed ASCII character class; resolved to `\p{...}`/`\P{...}` forms
    /// instead when `CompileOptions::unicode` is set.
    AsciiClass {
        items: &'static [ClassItem],
        negated: bool,
        unicode_raw: Option<&'static str>,
    },
    Anchor(AnchorKind),
    /// Defined in terms of KE itself; re-parsed and lowered lazily so it
    /// participates in the same recursion-depth accounting as user macros.
    Expansion(&'static str),
}

macro_rules! ascii_class {
    ($($item:expr),+ $(,)?) => {
        &[$($item),+]
    };
}

const DIGIT_ITEMS: &[ClassItem] = ascii_class!(ClassItem::Range('0', '9'));
const LETTER_ITEMS: &[ClassItem] = ascii_class!(ClassItem::Range('A', 'Z'), ClassItem::Range('a', 'z'));
const LOWER_ITEMS: &[ClassItem] = ascii_class!(ClassItem::Range('a', 'z'));
const UPPER_ITEMS: &[ClassItem] = ascii_class!(ClassItem::Range('A', 'Z'));

static BUILTINS: Lazy<HashMap<&'static str, Builtin>> = Lazy::new(|| {
    let mut m = HashMap::new();
    let mut add = |names: &[&'static str], b: Builtin| {
        for name in names {
            m.insert(*name, b.clone());
        }
    };

    add(
        &["digit", "d"],
        Builtin::AsciiClass {
            items: DIGIT_ITEMS,
            negated: false,
            unicode_raw: None,
        },
    );
    add(
        &["not_digit", "D"],
        Builtin::Raw("\\D"),
    );
    add(
        &["letter", "l"],
        Builtin::AsciiClass {
            items: LETTER_ITEMS,
            negated: false,
            unicode_raw: Some("\\p{L}"),
        },
    );
    add(
        &["not_letter", "L"],
        Builtin::AsciiClass {
            items: LETTER_ITEMS,
            negated: true,
            unicode_raw: Some("\\P{L}"),
        },
    );
    add(
        &["lowercase", "lc"],
        Builtin::AsciiClass {
            items: LOWER_ITEMS,
            negated: false,
            unicode_raw: Some("\\p{Ll}"),
        },
    );
    add(
        &["uppercase", "uc"],
        Builtin::AsciiClass {
            items: UPPER_ITEMS,
            negated: false,
            unicode_raw: Some("\\p{Lu}"),
        },
    );
    add(&["space", "s"], Builtin::Raw("\\s"));
    add(&["not_space", "S"], Builtin::Raw("\\S"));
    add(&["token_char", "tc"], Builtin::Raw("\\w"));
    add(&["not_token_char", "TC"], Builtin::Raw("\\W"));
    add(&["word_boundary", "wb"], Builtin::Anchor(AnchorKind::WordBoundary));
    add(
        &["not_word_boundary", "nwb"],
        Builtin::Anchor(AnchorKind::NotWordBoundary),
    );
    add(&["newline", "n"], Builtin::Raw("\\n"));
    add(&["tab", "t"], Builtin::Raw("\\t"));
    add(&["carriage_return", "cr"], Builtin::Raw("\\r"));
    add(&["quote", "q"], Builtin::Raw("'"));
    add(&["double_quote", "dq"], Builtin::Raw("\""));
    add(&["any"], Builtin::Raw("."));
    add(&["start_string", "ss"], Builtin::Anchor(AnchorKind::StartString));
    add(&["end_string", "es"], Builtin::Anchor(AnchorKind::EndString));
    add(&["start_line", "sl"], Builtin::Anchor(AnchorKind::StartLine));
    add(&["end_line", "el"], Builtin::Anchor(AnchorKind::EndLine));
    add(
        &["hex_digit", "hex"],
        Builtin::Expansion("[#digit | #a..f | #A..F]"),
    );

    m
});

pub(crate) fn lookup_builtin(name: &str) -> Option<&'static Builtin> {
    BUILTINS.get(name)
}

/// Render a built-in that doesn't require recursive expansion directly into
/// an AST node. `Expansion` built-ins are handled by the caller (lowering),
/// which re-enters the normal parse+lower pipeline so expansion depth is
/// tracked uniformly with user macros.
pub(crate) fn builtin_to_ast(builtin: &Builtin, options: &CompileOptions) -> Option<Ast> {
    match builtin {
        Builtin::Raw(fragment) => Some(Ast::Raw((*fragment).to_string())),
        Builtin::AsciiClass {
            items,
            negated,
            unicode_raw,
        } => {
            if options.unicode {
                if let Some(raw) = unicode_raw {
                    return Some(Ast::Raw((*raw).to_string()));
                }
            }
            Some(Ast::CharClass {
                items: items.to_vec(),
                negated: *negated,
            })
        }
        Builtin::Anchor(kind) => Some(Ast::Anchor(*kind)),
        Builtin::Expansion(_) => None,
    }
}

/// One lexical scope of user definitions, as collected from the `Def`
/// siblings of a single `Braces` body. Scopes chain outward through
/// `parent` so an inner `Braces` can see definitions from any enclosing one.
pub(crate) struct Scope<'a> {
    defs: HashMap<String, &'a Braces>,
    parent: Option<&'a Scope<'a>>,
}

impl<'a> Scope<'a> {
    pub(crate) fn root() -> Self {
        Scope {
            defs: HashMap::new(),
            parent: None,
        }
    }

    /// Build a child scope from every `Def` found anywhere directly inside
    /// `body` (across every branch of an `Either`, the trailing matches of
    /// an `OpsMatches`, or a plain `Matches`) — a definition is visible
    /// throughout the whole enclosing `Braces`, not just its own branch.
    /// Returns an error name if the same macro is defined twice in scope.
    pub(crate) fn child_from_body(
        parent: &'a Scope<'a>,
        body: &'a BracesBody,
    ) -> Result<Scope<'a>, String> {
        let mut defs = HashMap::new();
        let mut visit = |matches: &'a MatchesSeq| -> Result<(), String> {
            for m in &matches.0 {
                if let Match::Def(name, def_body, _) = m {
                    if defs.insert(name.clone(), def_body).is_some() {
                        return Err(name.clone());
                    }
                }
            }
            Ok(())
        };
        match body {
            BracesBody::Empty => {}
            BracesBody::Matches(m) => visit(m)?,
            BracesBody::Either(branches) => {
                for m in branches {
                    visit(m)?;
                }
            }
            BracesBody::OpsMatches(_, m) => {
                if let Some(m) = m {
                    visit(m)?;
                }
            }
        }
        Ok(Scope {
            defs,
            parent: Some(parent),
        })
    }

    pub(crate) fn lookup(&self, name: &str) -> Option<&'a Braces> {
        if let Some(def) = self.defs.get(name) {
            return Some(*def);
        }
        self.parent.and_then(|p| p.lookup(name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_letter_is_a_negated_ascii_class() {
        let builtin = lookup_builtin("not_letter").unwrap();
        let ast = builtin_to_ast(builtin, &CompileOptions::default()).unwrap();
        assert_eq!(
            ast,
            Ast::CharClass {
                items: LETTER_ITEMS.to_vec(),
                negated: true,
            }
        );
    }

    #[test]
    fn long_and_short_not_letter_aliases_match() {
        assert!(lookup_builtin("not_letter").is_some());
        assert!(lookup_builtin("L").is_some());
    }
}
