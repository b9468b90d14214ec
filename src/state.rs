//! Per-parse mutable context: cursor bounds, whitespace mode, furthest-failure
//! tracking, and the packrat memo cache.
use std::collections::{HashMap, HashSet};
use std::rc::Rc;

use crate::rule::Rule;
use crate::value::Value;

/// The outcome of matching a rule at a position, short of an abort. Failure
/// is a plain value, not an `Err` — only a parse abort uses `Err` (see
/// `MatchResult` below), matching the spec's three-regime error model.
pub enum MatchOutcome {
    Matched(usize, Value),
    Failed,
}

impl MatchOutcome {
    pub fn is_match(&self) -> bool {
        matches!(self, MatchOutcome::Matched(..))
    }
}

/// `Err(String)` signals a parse abort (an `Error` rule fired, or an
/// undefined symbol was reached) and unwinds the whole parse via `?`.
pub type MatchResult = Result<MatchOutcome, String>;

pub struct ParserState {
    chars: Vec<char>,
    whitespace: Rc<Rule>,
    in_whitespace_mode: bool,
    inhibit_expected_tracking_depth: u32,
    max_pos: usize,
    max_rule: HashSet<String>,
    memo: HashMap<(usize, usize), Option<(usize, Value)>>,
}

impl ParserState {
    pub fn new(text: &str, whitespace: Rc<Rule>) -> ParserState {
        ParserState {
            chars: text.chars().collect(),
            whitespace,
            in_whitespace_mode: false,
            inhibit_expected_tracking_depth: 0,
            max_pos: 0,
            max_rule: HashSet::new(),
            memo: HashMap::new(),
        }
    }

    pub fn end(&self) -> usize {
        self.chars.len()
    }

    pub fn char_at(&self, pos: usize) -> Option<char> {
        self.chars.get(pos).copied()
    }

    pub fn slice(&self, start: usize, end: usize) -> String {
        self.chars[start..end].iter().collect()
    }

    pub fn whitespace_rule(&self) -> Rc<Rule> {
        Rc::clone(&self.whitespace)
    }

    pub fn in_whitespace_mode(&self) -> bool {
        self.in_whitespace_mode
    }

    pub fn with_whitespace_mode<T>(&mut self, on: bool, f: impl FnOnce(&mut Self) -> T) -> T {
        let prev = self.in_whitespace_mode;
        self.in_whitespace_mode = on;
        let result = f(self);
        self.in_whitespace_mode = prev;
        result
    }

    pub fn inhibit_tracking<T>(&mut self, f: impl FnOnce(&mut Self) -> T) -> T {
        self.inhibit_expected_tracking_depth += 1;
        let result = f(self);
        self.inhibit_expected_tracking_depth -= 1;
        result
    }

    pub fn is_tracking_inhibited(&self) -> bool {
        self.inhibit_expected_tracking_depth > 0
    }

    /// Record an attempt at `pos` by a rule with an optional expectable
    /// description. Implements the monotone furthest-failure law from the
    /// design: `max_pos` only advances, `max_rule` is replaced on strict
    /// advance and extended on a tie.
    pub fn note_attempt(&mut self, pos: usize, expectable: Option<String>) {
        if self.is_tracking_inhibited() {
            return;
        }
        if pos > self.max_pos {
            self.max_pos = pos;
            self.max_rule.clear();
            if let Some(desc) = expectable {
                self.max_rule.insert(desc);
            }
        } else if pos == self.max_pos {
            if let Some(desc) = expectable {
                self.max_rule.insert(desc);
            }
        }
    }

    pub fn max_pos(&self) -> usize {
        self.max_pos
    }

    pub fn expected_set(&self) -> &HashSet<String> {
        &self.max_rule
    }

    pub fn memo_get(&self, memo_id: usize, pos: usize) -> Option<Option<(usize, Value)>> {
        self.memo.get(&(memo_id, pos)).cloned()
    }

    pub fn memo_put(&mut self, memo_id: usize, pos: usize, outcome: Option<(usize, Value)>) {
        self.memo.insert((memo_id, pos), outcome);
    }
}
