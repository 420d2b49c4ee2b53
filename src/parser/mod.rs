//! Parses Kleene Expression source into the concrete parse tree.
//!
//! The grammar itself lives in `grammar.pest`; this module walks the
//! resulting `pest::iterators::Pairs<Rule>` into the owned tree types below,
//! which the rest of the compiler (`crate::macros`, `crate::lower`) consumes.

use pest::Parser;
use pest::iterators::Pair;
use pest_derive::Parser;

use crate::error::{CompileError, CompileResult, ErrorKind, Span};

#[derive(Parser)]
#[grammar = "parser/grammar.pest"]
pub(crate) struct KeParser;

/// One top-level item: either a run of literal text or a bracketed form.
#[derive(Debug, Clone)]
pub enum TopItem {
    OuterLiteral(String),
    Braces(Braces),
}

#[derive(Debug, Clone)]
pub struct Braces {
    pub body: BracesBody,
    pub span: Span,
}

#[derive(Debug, Clone)]
pub enum BracesBody {
    Empty,
    Matches(MatchesSeq),
    Either(Vec<MatchesSeq>),
    OpsMatches(Vec<Op>, Option<MatchesSeq>),
}

#[derive(Debug, Clone)]
pub struct MatchesSeq(pub Vec<Match>);

#[derive(Debug, Clone)]
pub enum Match {
    InnerLiteral(String, Span),
    MacroRef(String, Span),
    RangeMacro(char, char, Span),
    Def(String, Braces, Span),
    Braces(Braces),
}

#[derive(Debug, Clone)]
pub struct Op {
    pub name: String,
    pub arg: Option<String>,
    pub span: Span,
}

/// Parse a full KE source string into its top-level items.
pub fn parse(source: &str) -> CompileResult<Vec<TopItem>> {
    if source.is_empty() {
        return Err(CompileError::new(
            ErrorKind::SyntaxError("empty source".to_string()),
            Span::new(0, 0),
        ));
    }

    let mut pairs = KeParser::parse(Rule::program, source)?;
    let program = pairs.next().expect("program rule always produces one pair");

    let mut items = Vec::new();
    for pair in program.into_inner() {
        match pair.as_rule() {
            Rule::outer_literal => items.push(TopItem::OuterLiteral(pair.as_str().to_string())),
            Rule::braces => items.push(TopItem::Braces(build_braces(pair)?)),
            Rule::EOI => {}
            r => unreachable!("unexpected top-level rule {r:?}"),
        }
    }
    Ok(items)
}

fn build_braces(pair: Pair<Rule>) -> CompileResult<Braces> {
    debug_assert_eq!(pair.as_rule(), Rule::braces);
    let span = Span::from_pest(pair.as_span());
    let mut inner = pair.into_inner();
    let body = match inner.next() {
        None => BracesBody::Empty,
        Some(body_pair) => build_braces_body(body_pair)?,
    };
    Ok(Braces { body, span })
}

fn build_braces_body(pair: Pair<Rule>) -> CompileResult<BracesBody> {
    debug_assert_eq!(pair.as_rule(), Rule::braces_body);
    let inner = pair
        .into_inner()
        .next()
        .expect("braces_body always wraps one alternative");
    match inner.as_rule() {
        Rule::ops_matches => build_ops_matches(inner),
        Rule::either => build_either(inner),
        Rule::matches => Ok(BracesBody::Matches(build_matches(inner)?)),
        r => unreachable!("unexpected braces_body alternative {r:?}"),
    }
}

fn build_ops_matches(pair: Pair<Rule>) -> CompileResult<BracesBody> {
    let mut ops = Vec::new();
    let mut matches = None;
    for child in pair.into_inner() {
        match child.as_rule() {
            Rule::op => ops.push(build_op(child)),
            Rule::matches => matches = Some(build_matches(child)?),
            r => unreachable!("unexpected ops_matches child {r:?}"),
        }
    }
    Ok(BracesBody::OpsMatches(ops, matches))
}

fn build_op(pair: Pair<Rule>) -> Op {
    debug_assert_eq!(pair.as_rule(), Rule::op);
    let span = Span::from_pest(pair.as_span());
    let mut tokens = pair.into_inner();
    let name = tokens
        .next()
        .expect("op always has a name token")
        .as_str()
        .to_string();
    let arg = tokens.next().map(|p| p.as_str().to_string());
    Op { name, arg, span }
}

fn build_either(pair: Pair<Rule>) -> CompileResult<BracesBody> {
    let mut branches = Vec::new();
    for child in pair.into_inner() {
        branches.push(build_matches(child)?);
    }
    Ok(BracesBody::Either(branches))
}

fn build_matches(pair: Pair<Rule>) -> CompileResult<MatchesSeq> {
    debug_assert_eq!(pair.as_rule(), Rule::matches);
    let mut items = Vec::new();
    for child in pair.into_inner() {
        items.push(build_match(child)?);
    }
    Ok(MatchesSeq(items))
}

fn build_match(pair: Pair<Rule>) -> CompileResult<Match> {
    debug_assert_eq!(pair.as_rule(), Rule::match_item);
    let inner = pair
        .into_inner()
        .next()
        .expect("match_item always wraps one alternative");
    let span = Span::from_pest(inner.as_span());
    match inner.as_rule() {
        Rule::def => build_def(inner, span),
        Rule::range_macro_ref => build_range_macro(inner, span),
        Rule::macro_ref => {
            let name = inner
                .into_inner()
                .next()
                .expect("macro_ref always has a token")
                .as_str()
                .to_string();
            Ok(Match::MacroRef(name, span))
        }
        Rule::inner_literal => Ok(Match::InnerLiteral(build_inner_literal(inner), span)),
        Rule::braces => Ok(Match::Braces(build_braces(inner)?)),
        r => unreachable!("unexpected match_item alternative {r:?}"),
    }
}

fn build_def(pair: Pair<Rule>, span: Span) -> CompileResult<Match> {
    let mut inner = pair.into_inner();
    let name = inner
        .next()
        .expect("def always has a name token")
        .as_str()
        .to_string();
    let braces_pair = inner.next().expect("def always has a body");
    let body = build_braces(braces_pair)?;
    Ok(Match::Def(name, body, span))
}

fn build_range_macro(pair: Pair<Rule>, span: Span) -> CompileResult<Match> {
    let mut endpoints = pair.into_inner();
    let a = parse_range_endpoint(endpoints.next().expect("range_macro_ref has two endpoints"));
    let b = parse_range_endpoint(endpoints.next().expect("range_macro_ref has two endpoints"));
    Ok(Match::RangeMacro(a, b, span))
}

fn parse_range_endpoint(pair: Pair<Rule>) -> char {
    pair.as_str()
        .chars()
        .next()
        .expect("range_endpoint matches exactly one character")
}

fn build_inner_literal(pair: Pair<Rule>) -> String {
    let quoted = pair
        .into_inner()
        .next()
        .expect("inner_literal wraps single_quoted or double_quoted");
    let content = quoted
        .into_inner()
        .next()
        .expect("quoted literal always has a content pair");
    content.as_str().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_plain_literal() {
        let items = parse("hello").unwrap();
        assert!(matches!(items.as_slice(), [TopItem::OuterLiteral(s)] if s == "hello"));
    }

    #[test]
    fn parses_empty_braces() {
        let items = parse("[]").unwrap();
        assert_eq!(items.len(), 1);
        match &items[0] {
            TopItem::Braces(b) => assert!(matches!(b.body, BracesBody::Empty)),
            _ => panic!("expected braces"),
        }
    }

    #[test]
    fn rejects_empty_source() {
        assert!(parse("").is_err());
    }

    #[test]
    fn parses_macro_and_literal_adjacent_without_space() {
        let items = parse("[1+ #d][#letter]").unwrap();
        assert_eq!(items.len(), 2);
    }

    #[test]
    fn parses_either() {
        let items = parse("['a' | 'b']").unwrap();
        match &items[0] {
            TopItem::Braces(b) => assert!(matches!(b.body, BracesBody::Either(ref v) if v.len() == 2)),
            _ => panic!("expected braces"),
        }
    }

    #[test]
    fn rejects_unmatched_bracket() {
        assert!(parse("[abc").is_err());
    }

    #[test]
    fn allows_no_space_between_a_braces_item_and_the_match_after_it() {
        let items = parse("[[#digit]'b']").unwrap();
        match &items[0] {
            TopItem::Braces(b) => match &b.body {
                BracesBody::Matches(m) => assert_eq!(m.0.len(), 2),
                other => panic!("expected Matches, got {other:?}"),
            },
            _ => panic!("expected braces"),
        }
    }

    #[test]
    fn rejects_two_non_bracket_matches_with_no_separator() {
        assert!(parse("['a''b']").is_err());
    }
}
