//! Small named grammars covering representative parsing scenarios, reused by
//! both the demo binary and the integration tests.
use std::rc::Rc;

use crate::combinators::{at, char_set, many, many_sep, seq, tag, text};
use crate::grammar::Grammar;
use crate::rule::Rule;
use crate::symbol::Symbol;
use crate::value::Value;

/// A builtin grammar: a name, a fully-wired `Grammar`, and the root symbol
/// to pass to `Grammar::parse`.
pub trait BuiltinGrammar {
    fn name(&self) -> &'static str;
    fn build(&self) -> (Grammar, Symbol);
}

pub struct LiteralSeq;

impl BuiltinGrammar for LiteralSeq {
    fn name(&self) -> &'static str {
        "literal_seq"
    }

    fn build(&self) -> (Grammar, Symbol) {
        let mut g = Grammar::new();
        let root = g.symbol("S");
        root.define(seq().then("a").then("b").build().unwrap());
        (g, root)
    }
}

fn number() -> Rc<Rule> {
    text(many(char_set("0123456789")))
}

pub struct DigitsText;

impl BuiltinGrammar for DigitsText {
    fn name(&self) -> &'static str {
        "digits_text"
    }

    fn build(&self) -> (Grammar, Symbol) {
        let mut g = Grammar::new();
        let root = g.symbol("N");
        root.define(number());
        (g, root)
    }
}

pub struct SeparatedList;

impl BuiltinGrammar for SeparatedList {
    fn name(&self) -> &'static str {
        "separated_list"
    }

    fn build(&self) -> (Grammar, Symbol) {
        let mut g = Grammar::new();
        let root = g.symbol("List");
        root.define(
            seq()
                .then("[")
                .then(many_sep(number(), ","))
                .then("]")
                .build()
                .unwrap(),
        );
        (g, root)
    }
}

pub struct ReducedAddition;

impl BuiltinGrammar for ReducedAddition {
    fn name(&self) -> &'static str {
        "reduced_addition"
    }

    fn build(&self) -> (Grammar, Symbol) {
        let mut g = Grammar::new();
        let root = g.symbol("E");
        let reducer = |values: &[Value]| -> Value {
            Value::List(vec![Value::Text("+".to_string()), values[0].clone(), values[1].clone()])
        };
        root.define(seq().then(number()).then("+").then(number()).reduce(reducer).unwrap());
        (g, root)
    }
}

pub struct LookaheadGuard;

impl BuiltinGrammar for LookaheadGuard {
    fn name(&self) -> &'static str {
        "lookahead_guard"
    }

    fn build(&self) -> (Grammar, Symbol) {
        let mut g = Grammar::new();
        let root = g.symbol("S");
        root.define(seq().then(at("xyz")).then("xyz").build().unwrap());
        (g, root)
    }
}

/// Every registered builtin, in a stable order.
pub fn all_builtin_grammars() -> Vec<Box<dyn BuiltinGrammar>> {
    vec![
        Box::new(LiteralSeq),
        Box::new(DigitsText),
        Box::new(SeparatedList),
        Box::new(ReducedAddition),
        Box::new(LookaheadGuard),
    ]
}

/// Wraps `rule` in a single-element tag, demonstrating the `TAG` combinator
/// over an arbitrary production name.
pub fn tagged_example() -> Rc<Rule> {
    tag("example", char_set("xyz"))
}
