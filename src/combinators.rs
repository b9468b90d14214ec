//! Public combinator constructors (see SPEC_FULL.md §6 for the naming map
//! from the original API: `CHAR`, `CHARCODE`, `END`, `ERROR`, `AT`, `NOT`,
//! `SKIP`, `LEX`, `TEXT`, `MAYBE`, `MANY`, `MANY0`, `OR`, `SEQ`, `MEMO`, `TAG`).
use std::rc::Rc;

use crate::builder::{IntoRule, SeqBuilder};
use crate::rule::{CharClass, MemoNode, Rule};
use crate::unicode_ranges::UnicodeRange;
use crate::value::{default_extractor, Extractor, Value};

/// Matches any single character present in `chars`.
pub fn char_set(chars: &str) -> Rc<Rule> {
    Rc::new(Rule::CharPredicate(CharClass::from_chars(chars), None))
}

/// Matches any character in the inclusive range `[lo, hi]`.
pub fn char_range(lo: char, hi: char) -> Rc<Rule> {
    Rc::new(Rule::CharPredicate(CharClass::from_range(lo, hi), None))
}

/// Matches any character in the named Unicode general category.
pub fn char_unicode(category: &str) -> Rc<Rule> {
    Rc::new(Rule::CharPredicate(
        CharClass::from_unicode(UnicodeRange::new(category)),
        None,
    ))
}

/// Matches any single character satisfying an arbitrary predicate.
pub fn char_code(predicate: impl Fn(char) -> bool + 'static) -> Rc<Rule> {
    Rc::new(Rule::CharPredicate(CharClass::from_predicate(predicate), None))
}

pub fn end() -> Rc<Rule> {
    Rc::new(Rule::EndOfInput)
}

pub fn error(msg: impl Into<String>) -> Rc<Rule> {
    Rc::new(Rule::Error(msg.into()))
}

/// Positive lookahead: succeeds iff `rule` matches, without consuming input.
pub fn at(rule: impl IntoRule) -> Rc<Rule> {
    Rc::new(Rule::Lookahead(rule.into_rule()))
}

/// Negative lookahead: succeeds iff `rule` does not match.
pub fn not(rule: impl IntoRule) -> Rc<Rule> {
    Rc::new(Rule::NegLookahead(rule.into_rule()))
}

/// Matches `rule` but discards its value.
pub fn skip(rule: impl IntoRule) -> Rc<Rule> {
    Rc::new(Rule::Skip(rule.into_rule()))
}

/// Matches `rule` with whitespace skipping suppressed, labeling it `name`
/// for diagnostics.
pub fn lex(name: &str, rule: impl IntoRule) -> Rc<Rule> {
    Rc::new(Rule::Lexical(Some(name.into()), rule.into_rule()))
}

/// Matches `rule` with whitespace skipping suppressed, anonymously.
pub fn lex_anon(rule: impl IntoRule) -> Rc<Rule> {
    Rc::new(Rule::Lexical(None, rule.into_rule()))
}

/// Matches `rule`; the value is the matched substring.
pub fn text(rule: impl IntoRule) -> Rc<Rule> {
    Rc::new(Rule::TextValue(rule.into_rule(), default_extractor()))
}

/// Matches `rule`; the value is `extractor` applied to the matched substring.
pub fn text_with(rule: impl IntoRule, extractor: impl Fn(&str) -> Value + 'static) -> Rc<Rule> {
    let extractor: Extractor = Rc::new(extractor);
    Rc::new(Rule::TextValue(rule.into_rule(), extractor))
}

pub fn maybe(rule: impl IntoRule) -> Rc<Rule> {
    Rc::new(Rule::Optional(rule.into_rule()))
}

/// One or more repetitions of `rule`.
pub fn many(rule: impl IntoRule) -> Rc<Rule> {
    Rc::new(Rule::Repeat {
        inner: rule.into_rule(),
        sep: None,
        min: 1,
    })
}

/// One or more repetitions of `rule`, separated by `sep`; a trailing
/// separator is never consumed.
pub fn many_sep(rule: impl IntoRule, sep: impl IntoRule) -> Rc<Rule> {
    Rc::new(Rule::Repeat {
        inner: rule.into_rule(),
        sep: Some(sep.into_rule()),
        min: 1,
    })
}

/// Zero or more repetitions of `rule`.
pub fn many0(rule: impl IntoRule) -> Rc<Rule> {
    Rc::new(Rule::Repeat {
        inner: rule.into_rule(),
        sep: None,
        min: 0,
    })
}

/// Zero or more repetitions of `rule`, separated by `sep`.
pub fn many0_sep(rule: impl IntoRule, sep: impl IntoRule) -> Rc<Rule> {
    Rc::new(Rule::Repeat {
        inner: rule.into_rule(),
        sep: Some(sep.into_rule()),
        min: 0,
    })
}

/// Ordered choice among `alternatives`. All alternatives must agree on
/// whether they generate a value (a grammar-construction mistake otherwise;
/// see DESIGN.md's Open Question decision on `Choice`).
pub fn or(alternatives: Vec<Rc<Rule>>) -> Rc<Rule> {
    assert!(!alternatives.is_empty(), "or() requires at least one alternative");
    let first_generates = alternatives[0].generates_value();
    assert!(
        alternatives.iter().all(|r| r.generates_value() == first_generates),
        "all alternatives of or() must agree on whether they generate a value"
    );
    Rc::new(Rule::Choice(alternatives))
}

/// Starts a fluent sequence: `seq().then(a).then(b).build()` or
/// `.reduce(|values| ...)` to finish with a reducer.
pub fn seq() -> SeqBuilder {
    SeqBuilder::new()
}

/// Packrat-memoizes `rule` by position within a single parse.
pub fn memo(rule: impl IntoRule) -> Rc<Rule> {
    Rc::new(Rule::Memo(MemoNode::new(rule.into_rule())))
}

/// Wraps `rule`'s value as `[label, value]`, a common pattern for tagging an
/// alternative's output with its production name.
pub fn tag(label: &str, rule: impl IntoRule) -> Rc<Rule> {
    let label = label.to_string();
    let inner = rule.into_rule();
    let reducer = move |values: &[Value]| -> Value {
        let inner_value = values.first().cloned().unwrap_or(Value::Null);
        Value::List(vec![Value::Text(label.clone()), inner_value])
    };
    seq().then(inner).reduce(reducer).expect("tag() always builds a single-element sequence")
}
