//! The matching engine: whitespace skipping, expected-set tracking, and the
//! semantics of each rule variant, including packrat memoization.
use std::rc::Rc;

use log::trace;

use crate::rule::Rule;
use crate::state::{MatchOutcome, MatchResult, ParserState};
use crate::value::Value;

/// Matches `rule` at `pos`, first skipping whitespace unless the state is
/// already in lexical (whitespace-suppressed) mode.
pub fn match_rule(rule: &Rc<Rule>, state: &mut ParserState, pos: usize) -> MatchResult {
    let pos = if state.in_whitespace_mode() {
        pos
    } else {
        skip_whitespace(state, pos)?
    };
    match_after_ws(rule, state, pos)
}

/// Skips whitespace from `pos` onward, per the grammar's whitespace rule.
/// Exposed so callers outside the matcher (the root-match completeness check
/// in `grammar.rs`) can skip trailing whitespace the same way the matcher
/// skips it between tokens.
pub fn skip_whitespace(state: &mut ParserState, mut pos: usize) -> Result<usize, String> {
    let ws = state.whitespace_rule();
    loop {
        let outcome = state.with_whitespace_mode(true, |state| {
            state.inhibit_tracking(|state| match_after_ws(&ws, state, pos))
        })?;
        match outcome {
            MatchOutcome::Matched(next, _) if next > pos => pos = next,
            _ => return Ok(pos),
        }
    }
}

/// Entered once whitespace at `pos` has already been skipped (or suppressed).
/// Performs expected-set tracking, then dispatches on the rule variant.
fn match_after_ws(rule: &Rc<Rule>, state: &mut ParserState, pos: usize) -> MatchResult {
    state.note_attempt(pos, rule.expectable());
    trace!("match {:p} at {pos}", Rc::as_ptr(rule));

    match rule.as_ref() {
        Rule::Literal(text) => match_literal(text, state, pos),
        Rule::AnyChar => match state.char_at(pos) {
            Some(_) => Ok(MatchOutcome::Matched(pos + 1, Value::Null)),
            None => Ok(MatchOutcome::Failed),
        },
        Rule::CharPredicate(class, _name) => match state.char_at(pos) {
            Some(c) if class.accept(c) => Ok(MatchOutcome::Matched(pos + 1, Value::Null)),
            _ => Ok(MatchOutcome::Failed),
        },
        Rule::EndOfInput => {
            if pos >= state.end() {
                Ok(MatchOutcome::Matched(pos, Value::Null))
            } else {
                Ok(MatchOutcome::Failed)
            }
        }
        Rule::Error(msg) => Err(msg.clone()),
        Rule::Symbol(symbol) => match symbol.definition() {
            Some(def) => match match_rule(&def, state, pos)? {
                MatchOutcome::Matched(next, value) => Ok(MatchOutcome::Matched(next, value)),
                MatchOutcome::Failed => Ok(MatchOutcome::Failed),
            },
            None => Err(format!("undefined symbol '{}'", symbol.name())),
        },
        Rule::Skip(inner) => match match_rule(inner, state, pos)? {
            MatchOutcome::Matched(next, _) => Ok(MatchOutcome::Matched(next, Value::Null)),
            MatchOutcome::Failed => Ok(MatchOutcome::Failed),
        },
        Rule::TextValue(inner, extractor) => match match_rule(inner, state, pos)? {
            MatchOutcome::Matched(next, _) => {
                let text = state.slice(pos, next);
                Ok(MatchOutcome::Matched(next, extractor(&text)))
            }
            MatchOutcome::Failed => Ok(MatchOutcome::Failed),
        },
        Rule::Optional(inner) => match match_rule(inner, state, pos)? {
            MatchOutcome::Matched(next, value) => {
                let value = if inner.generates_value() { value } else { Value::Bool(true) };
                Ok(MatchOutcome::Matched(next, value))
            }
            MatchOutcome::Failed => {
                let value = if inner.generates_value() { Value::Null } else { Value::Bool(false) };
                Ok(MatchOutcome::Matched(pos, value))
            }
        },
        Rule::Repeat { inner, sep, min } => match_repeat(inner, sep.as_ref(), *min, state, pos),
        Rule::Sequence(node) => match_sequence(&node.subrules, node.value_count, node.reducer.as_ref(), state, pos),
        Rule::Choice(alts) => match_choice(alts, state, pos),
        Rule::Lookahead(inner) => match match_bare(inner, state, pos)? {
            MatchOutcome::Matched(_, _) => Ok(MatchOutcome::Matched(pos, Value::Null)),
            MatchOutcome::Failed => Ok(MatchOutcome::Failed),
        },
        Rule::NegLookahead(inner) => match match_bare(inner, state, pos)? {
            MatchOutcome::Matched(_, _) => Ok(MatchOutcome::Failed),
            MatchOutcome::Failed => Ok(MatchOutcome::Matched(pos, Value::Null)),
        },
        Rule::Lexical(_, inner) => {
            let outcome = state.with_whitespace_mode(true, |state| match_rule(inner, state, pos))?;
            match outcome {
                MatchOutcome::Matched(next, _) => Ok(MatchOutcome::Matched(next, Value::Null)),
                MatchOutcome::Failed => Ok(MatchOutcome::Failed),
            }
        }
        Rule::Memo(node) => match_memo(node.id, &node.inner, state, pos),
    }
}

/// Lookahead entry point: bypasses the whitespace-skipping `match_rule` and
/// the expected-set tracking of `match_after_ws`, per the spec's contract
/// that lookahead never contributes to the diagnostic's expected set.
fn match_bare(rule: &Rc<Rule>, state: &mut ParserState, pos: usize) -> MatchResult {
    state.inhibit_tracking(|state| match_rule(rule, state, pos))
}

fn match_literal(text: &str, state: &mut ParserState, pos: usize) -> MatchResult {
    let mut cursor = pos;
    for expected in text.chars() {
        match state.char_at(cursor) {
            Some(actual) if actual == expected => cursor += 1,
            _ => return Ok(MatchOutcome::Failed),
        }
    }
    Ok(MatchOutcome::Matched(cursor, Value::Null))
}

fn match_sequence(
    subrules: &[Rc<Rule>],
    value_count: usize,
    reducer: Option<&crate::value::Reducer>,
    state: &mut ParserState,
    pos: usize,
) -> MatchResult {
    let mut cursor = pos;
    let mut values = Vec::with_capacity(value_count);
    for rule in subrules {
        match match_rule(rule, state, cursor)? {
            MatchOutcome::Matched(next, value) => {
                if rule.generates_value() {
                    values.push(value);
                }
                cursor = next;
            }
            MatchOutcome::Failed => return Ok(MatchOutcome::Failed),
        }
    }
    let value = match reducer {
        Some(reduce) => reduce(&values),
        None => match values.len() {
            0 => Value::Null,
            1 => values.into_iter().next().unwrap(),
            _ => Value::List(values),
        },
    };
    Ok(MatchOutcome::Matched(cursor, value))
}

fn match_choice(alts: &[Rc<Rule>], state: &mut ParserState, pos: usize) -> MatchResult {
    for alt in alts {
        match match_rule(alt, state, pos)? {
            matched @ MatchOutcome::Matched(..) => return Ok(matched),
            MatchOutcome::Failed => continue,
        }
    }
    Ok(MatchOutcome::Failed)
}

fn match_repeat(
    inner: &Rc<Rule>,
    sep: Option<&Rc<Rule>>,
    min: u8,
    state: &mut ParserState,
    pos: usize,
) -> MatchResult {
    let mut cursor = pos;
    let mut items = Vec::new();
    let generates = inner.generates_value();

    match match_rule(inner, state, cursor)? {
        MatchOutcome::Matched(next, value) => {
            if generates {
                items.push(value);
            }
            cursor = next;
        }
        MatchOutcome::Failed => {
            return if min == 0 {
                Ok(MatchOutcome::Matched(pos, Value::List(items)))
            } else {
                Ok(MatchOutcome::Failed)
            };
        }
    }

    loop {
        let before_sep = cursor;
        if let Some(sep_rule) = sep {
            match match_rule(sep_rule, state, cursor)? {
                MatchOutcome::Matched(next, _) => cursor = next,
                MatchOutcome::Failed => break,
            }
        }
        match match_rule(inner, state, cursor)? {
            MatchOutcome::Matched(next, value) => {
                if generates {
                    items.push(value);
                }
                cursor = next;
            }
            MatchOutcome::Failed => {
                cursor = before_sep;
                break;
            }
        }
    }

    Ok(MatchOutcome::Matched(cursor, Value::List(items)))
}

fn match_memo(memo_id: usize, inner: &Rc<Rule>, state: &mut ParserState, pos: usize) -> MatchResult {
    if let Some(cached) = state.memo_get(memo_id, pos) {
        trace!("memo hit for {memo_id} at {pos}");
        return Ok(match cached {
            Some((next, value)) => MatchOutcome::Matched(next, value),
            None => MatchOutcome::Failed,
        });
    }
    let outcome = match_rule(inner, state, pos)?;
    let cached = match &outcome {
        MatchOutcome::Matched(next, value) => Some((*next, value.clone())),
        MatchOutcome::Failed => None,
    };
    state.memo_put(memo_id, pos, cached);
    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combinators::{at, char_set, many, many0, many0_sep, many_sep, memo, not, seq, text};
    use crate::grammar::Grammar;

    #[test]
    fn literal_sequence_matches_and_generates_null() {
        let mut g = Grammar::new();
        let s = g.symbol("S");
        s.define(seq().then("a").then("b").build().unwrap());
        let value = g.parse(&s, "ab").unwrap();
        assert!(value.is_null());
        assert!(g.parse(&s, "ac").is_err());
    }

    #[test]
    fn ordered_choice_prefers_first_success() {
        let mut g = Grammar::new();
        let s = g.symbol("S");
        s.define(crate::combinators::or(vec![text(char_set("a")), text(char_set("b"))]));
        assert_eq!(g.parse(&s, "a").unwrap().as_text(), Some("a"));
        assert_eq!(g.parse(&s, "b").unwrap().as_text(), Some("b"));
        assert!(g.parse(&s, "c").is_err());
    }

    #[test]
    fn lookahead_does_not_consume_input() {
        let mut g = Grammar::new();
        let s = g.symbol("S");
        s.define(seq().then(at("xyz")).then("xyz").build().unwrap());
        assert!(g.parse(&s, "xyz").is_ok());
        assert!(g.parse(&s, "yzz").is_err());
    }

    #[test]
    fn negative_lookahead_rejects_match() {
        let mut g = Grammar::new();
        let s = g.symbol("S");
        s.define(seq().then(not("x")).then(char_set("y")).build().unwrap());
        assert!(g.parse(&s, "y").is_ok());
        assert!(g.parse(&s, "x").is_err());
    }

    #[test]
    fn many_sep_never_consumes_trailing_separator() {
        let mut g = Grammar::new();
        let s = g.symbol("List");
        let digit = char_set("0123456789");
        s.define(many_sep(digit, ","));
        assert!(g.parse(&s, "1,2,3").is_ok());
        // trailing comma is left unconsumed -> overall parse fails (trailing input)
        assert!(g.parse(&s, "1,2,3,").is_err());
    }

    #[test]
    fn many0_matches_empty_input() {
        let mut g = Grammar::new();
        let s = g.symbol("S");
        s.define(many0(char_set("x")));
        let value = g.parse(&s, "").unwrap();
        assert_eq!(value.as_list().unwrap().len(), 0);
    }

    #[test]
    fn many0_sep_matches_empty_input() {
        let mut g = Grammar::new();
        let s = g.symbol("S");
        s.define(many0_sep(char_set("x"), ","));
        let value = g.parse(&s, "").unwrap();
        assert_eq!(value.as_list().unwrap().len(), 0);
    }

    #[test]
    fn whitespace_is_skipped_between_sequence_elements() {
        let mut g = Grammar::new();
        let s = g.symbol("S");
        s.define(seq().then("a").then("b").build().unwrap());
        assert!(g.parse(&s, "  a   b  ").is_ok());
    }

    #[test]
    fn memo_does_not_change_match_outcome() {
        let mut plain = Grammar::new();
        let s1 = plain.symbol("S");
        s1.define(many(char_set("ab")));

        let mut memoized = Grammar::new();
        let s2 = memoized.symbol("S");
        s2.define(memo(many(char_set("ab"))));

        let input = "ababab";
        let v1 = plain.parse(&s1, input).unwrap();
        let v2 = memoized.parse(&s2, input).unwrap();
        assert_eq!(v1.as_list().unwrap().len(), v2.as_list().unwrap().len());
    }

    #[test]
    fn end_of_input_rejects_trailing_text() {
        let mut g = Grammar::new();
        let s = g.symbol("S");
        s.define(seq().then("a").then(crate::combinators::end()).build().unwrap());
        assert!(g.parse(&s, "a").is_ok());
        assert!(g.parse(&s, "ab").is_err());
    }
}
