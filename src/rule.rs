//! The closed rule algebra at the core of the engine.
//!
//! Every grammar, however it is authored, compiles down to a graph of these
//! variants. The graph may contain cycles, but only through `Rule::Symbol`
//! back-edges (see `symbol.rs`).
use std::fmt;
use std::rc::Rc;
use std::sync::atomic::{AtomicUsize, Ordering};

use smol_str::SmolStr;

use crate::symbol::Symbol;
use crate::unicode_ranges::UnicodeRange;
use crate::value::{Extractor, Reducer};

/// A single character matcher, one arm of a `CharClass`.
#[derive(Clone)]
pub enum CharMatcher {
    Exact(char),
    Range(char, char),
    Unicode(UnicodeRange),
    Predicate(Rc<dyn Fn(char) -> bool>),
}

impl CharMatcher {
    fn accept(&self, c: char) -> bool {
        match self {
            CharMatcher::Exact(e) => c == *e,
            CharMatcher::Range(lo, hi) => *lo <= c && c <= *hi,
            CharMatcher::Unicode(range) => range.accept(c),
            CharMatcher::Predicate(pred) => pred(c),
        }
    }
}

impl fmt::Debug for CharMatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CharMatcher::Exact(c) => write!(f, "Exact({c:?})"),
            CharMatcher::Range(lo, hi) => write!(f, "Range({lo:?}, {hi:?})"),
            CharMatcher::Unicode(range) => write!(f, "Unicode({range:?})"),
            CharMatcher::Predicate(_) => write!(f, "Predicate(..)"),
        }
    }
}

/// A character class: union of matchers, optionally negated.
#[derive(Clone, Debug)]
pub struct CharClass {
    matchers: Vec<CharMatcher>,
    is_exclude: bool,
}

impl CharClass {
    pub fn from_chars(chars: &str) -> CharClass {
        CharClass {
            matchers: chars.chars().map(CharMatcher::Exact).collect(),
            is_exclude: false,
        }
    }

    pub fn from_range(lo: char, hi: char) -> CharClass {
        CharClass {
            matchers: vec![CharMatcher::Range(lo, hi)],
            is_exclude: false,
        }
    }

    pub fn from_unicode(range: UnicodeRange) -> CharClass {
        CharClass {
            matchers: vec![CharMatcher::Unicode(range)],
            is_exclude: false,
        }
    }

    pub fn from_predicate(predicate: impl Fn(char) -> bool + 'static) -> CharClass {
        CharClass {
            matchers: vec![CharMatcher::Predicate(Rc::new(predicate))],
            is_exclude: false,
        }
    }

    pub fn negated(mut self) -> CharClass {
        self.is_exclude = !self.is_exclude;
        self
    }

    pub fn accept(&self, c: char) -> bool {
        let hit = self.matchers.iter().any(|m| m.accept(c));
        hit != self.is_exclude
    }
}

static NEXT_MEMO_ID: AtomicUsize = AtomicUsize::new(0);

fn mint_memo_id() -> usize {
    NEXT_MEMO_ID.fetch_add(1, Ordering::Relaxed)
}

/// A compiled sequence: an ordered list of subrules plus the derived value
/// shape (see §4.1 of the design: valueCount and an optional reducer).
pub struct SequenceNode {
    pub subrules: Vec<Rc<Rule>>,
    pub value_count: usize,
    pub reducer: Option<Reducer>,
}

/// A memoized rule, keyed by its own identity plus match position.
pub struct MemoNode {
    pub id: usize,
    pub inner: Rc<Rule>,
}

impl MemoNode {
    pub fn new(inner: Rc<Rule>) -> MemoNode {
        MemoNode {
            id: mint_memo_id(),
            inner,
        }
    }
}

pub enum Rule {
    Literal(SmolStr),
    AnyChar,
    CharPredicate(CharClass, Option<SmolStr>),
    EndOfInput,
    Error(String),
    Symbol(Symbol),
    Skip(Rc<Rule>),
    TextValue(Rc<Rule>, Extractor),
    Optional(Rc<Rule>),
    /// `min` is 0 or 1; enforced by the `many`/`many0` combinator pair rather
    /// than accepting an arbitrary integer.
    Repeat {
        inner: Rc<Rule>,
        sep: Option<Rc<Rule>>,
        min: u8,
    },
    Sequence(SequenceNode),
    Choice(Vec<Rc<Rule>>),
    Lookahead(Rc<Rule>),
    NegLookahead(Rc<Rule>),
    Lexical(Option<SmolStr>, Rc<Rule>),
    Memo(MemoNode),
}

impl Rule {
    /// Whether a successful match of this rule contributes a `Value` to its
    /// enclosing context. Sequences, Optional, Repeat and Choice derive this
    /// from their subrules; everything else is static.
    pub fn generates_value(&self) -> bool {
        match self {
            Rule::Literal(_) => false,
            Rule::AnyChar => false,
            Rule::CharPredicate(..) => false,
            Rule::EndOfInput => false,
            Rule::Error(_) => false,
            Rule::Symbol(_) => true,
            Rule::Skip(_) => false,
            Rule::TextValue(..) => true,
            Rule::Optional(_) => true,
            Rule::Repeat { .. } => true,
            Rule::Sequence(node) => node.value_count > 0 || node.reducer.is_some(),
            Rule::Choice(alts) => alts.first().map_or(false, |r| r.generates_value()),
            Rule::Lookahead(_) => false,
            Rule::NegLookahead(_) => false,
            Rule::Lexical(..) => false,
            Rule::Memo(node) => node.inner.generates_value(),
        }
    }

    /// Human-readable description used in furthest-failure diagnostics, for
    /// rules that are "expectable" (only literals and named lexical tokens).
    pub fn expectable(&self) -> Option<String> {
        match self {
            Rule::Literal(text) => Some(format!("'{text}'")),
            Rule::Lexical(Some(name), _) => Some(name.to_string()),
            _ => None,
        }
    }
}

/// Anything that can be compiled into a `Rule`: a string literal, a `Symbol`
/// reference, or an already-built rule.
pub trait IntoRule {
    fn into_rule(self) -> Rc<Rule>;
}

impl IntoRule for Rc<Rule> {
    fn into_rule(self) -> Rc<Rule> {
        self
    }
}

impl IntoRule for Rule {
    fn into_rule(self) -> Rc<Rule> {
        Rc::new(self)
    }
}

impl IntoRule for &str {
    fn into_rule(self) -> Rc<Rule> {
        Rc::new(Rule::Literal(self.into()))
    }
}

impl IntoRule for String {
    fn into_rule(self) -> Rc<Rule> {
        Rc::new(Rule::Literal(self.into()))
    }
}

impl IntoRule for Symbol {
    fn into_rule(self) -> Rc<Rule> {
        Rc::new(Rule::Symbol(self))
    }
}

impl IntoRule for &Symbol {
    fn into_rule(self) -> Rc<Rule> {
        Rc::new(Rule::Symbol(self.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn char_class_respects_negation() {
        let vowels = CharClass::from_chars("aeiou");
        assert!(vowels.clone().accept('a'));
        assert!(!vowels.clone().negated().accept('a'));
        assert!(vowels.negated().accept('x'));
    }

    #[test]
    fn literal_is_expectable_but_anychar_is_not() {
        let literal = Rule::Literal("foo".into());
        assert_eq!(literal.expectable(), Some("'foo'".to_string()));
        assert_eq!(Rule::AnyChar.expectable(), None);
    }

    #[test]
    fn only_some_variants_generate_a_value() {
        assert!(!Rule::Literal("x".into()).generates_value());
        assert!(!Rule::AnyChar.generates_value());
        assert!(Rule::Optional(Rc::new(Rule::AnyChar)).generates_value());
    }
}
