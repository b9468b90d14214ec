//! Named-symbol registry, whitespace rule, and the `parse()` entry point.
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

use log::info;
use string_builder::Builder as StringBuilder;

use crate::builder::IntoRule;
use crate::diagnostic::Diagnostic;
use crate::error::ParseError;
use crate::matcher::{match_rule, skip_whitespace};
use crate::rule::{CharClass, Rule};
use crate::state::{MatchOutcome, ParserState};
use crate::symbol::Symbol;
use crate::value::Value;

fn default_whitespace() -> Rc<Rule> {
    Rc::new(Rule::CharPredicate(CharClass::from_chars(" \t\r\n"), None))
}

pub struct Grammar {
    symbols: HashMap<String, Symbol>,
    whitespace: Rc<Rule>,
}

impl Grammar {
    pub fn new() -> Grammar {
        Grammar {
            symbols: HashMap::new(),
            whitespace: default_whitespace(),
        }
    }

    /// Get or create the named symbol. Repeated calls with the same name
    /// return handles to the same underlying cell.
    pub fn symbol(&mut self, name: &str) -> Symbol {
        self.symbols
            .entry(name.to_string())
            .or_insert_with(|| Symbol::new(name))
            .clone()
    }

    pub fn set_whitespace(&mut self, rule: impl IntoRule) {
        self.whitespace = rule.into_rule();
    }

    pub fn disable_whitespace(&mut self) {
        self.whitespace = Rc::new(Rule::Sequence(crate::rule::SequenceNode {
            subrules: Vec::new(),
            value_count: 0,
            reducer: None,
        }));
    }

    fn undefined_symbols(&self) -> Vec<&str> {
        self.symbols
            .values()
            .filter(|s| !s.is_defined())
            .map(|s| s.name())
            .collect()
    }

    /// Parse `text` starting from `root`. Returns the root's value on a
    /// complete, unambiguous match, or a diagnostic describing the furthest
    /// failure otherwise.
    pub fn parse(&self, root: impl IntoRule, text: &str) -> Result<Value, ParseError> {
        let undefined = self.undefined_symbols();
        if !undefined.is_empty() {
            return Err(ParseError::Aborted(format!(
                "grammar has undefined symbols: {}",
                undefined.join(", ")
            )));
        }

        info!("parsing {} characters", text.chars().count());
        let root = root.into_rule();
        let mut state = ParserState::new(text, Rc::clone(&self.whitespace));

        let outcome = match_rule(&root, &mut state, 0).map_err(ParseError::Aborted)?;
        match outcome {
            MatchOutcome::Matched(end_pos, value) => {
                let end_pos = skip_whitespace(&mut state, end_pos).map_err(ParseError::Aborted)?;
                if end_pos >= state.end() {
                    info!("parse succeeded");
                    Ok(value)
                } else {
                    Err(ParseError::NoMatch(Diagnostic::render(text, &state)))
                }
            }
            MatchOutcome::Failed => Err(ParseError::NoMatch(Diagnostic::render(text, &state))),
        }
    }
}

impl Default for Grammar {
    fn default() -> Grammar {
        Grammar::new()
    }
}

impl fmt::Display for Grammar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut builder = StringBuilder::default();
        let mut names: Vec<&String> = self.symbols.keys().collect();
        names.sort();
        for name in names {
            let defined = self.symbols[name].is_defined();
            builder.append(format!("{name}: {}\n", if defined { "defined" } else { "undefined" }));
        }
        write!(f, "{}", builder.string().unwrap_or_default())
    }
}
