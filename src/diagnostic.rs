//! Furthest-failure diagnostic rendering: a sorted expected-set plus a
//! source-line pointer, adapted from the teacher's `debug_parse_failure`
//! context-window-and-caret format.
use itertools::Itertools;
use string_builder::Builder as StringBuilder;

use crate::state::ParserState;

pub struct Diagnostic;

impl Diagnostic {
    /// Renders a human-readable furthest-failure message for `text` given
    /// the parser state's recorded `max_pos`/expected-set.
    pub fn render(text: &str, state: &ParserState) -> String {
        let pos = state.max_pos();
        let chars: Vec<char> = text.chars().collect();

        let expected = sorted_expected(state);
        let found = if pos < chars.len() {
            format!("'{}'", chars[pos])
        } else {
            "end of file".to_string()
        };

        let mut out = StringBuilder::default();
        if expected.is_empty() {
            out.append(format!("parse failed at position {pos}, found {found}\n"));
        } else {
            out.append(format!("Expected {} but found {found}\n", expected.join(" or ")));
        }

        let (line_start, line_end) = line_bounds(&chars, pos);
        let line: String = chars[line_start..line_end].iter().collect();
        let caret_offset = pos - line_start;
        out.append(format!("{line}\n"));
        out.append(format!("{}^\n", " ".repeat(caret_offset)));

        out.string().unwrap_or_default()
    }
}

/// Non-quoted descriptions sort before quoted literal descriptions, and
/// each class is lexicographically ordered, per the design's §4.5 contract.
fn sorted_expected(state: &ParserState) -> Vec<String> {
    state
        .expected_set()
        .iter()
        .cloned()
        .sorted_by(|a, b| {
            let quoted_a = a.starts_with('\'');
            let quoted_b = b.starts_with('\'');
            quoted_a.cmp(&quoted_b).then_with(|| a.cmp(b))
        })
        .collect()
}

fn line_bounds(chars: &[char], pos: usize) -> (usize, usize) {
    let mut start = pos.min(chars.len());
    while start > 0 && chars[start - 1] != '\n' {
        start -= 1;
    }
    let mut end = pos.min(chars.len());
    while end < chars.len() && chars[end] != '\n' {
        end += 1;
    }
    (start, end)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rule::{CharClass, Rule};
    use std::rc::Rc;

    #[test]
    fn reports_line_and_caret() {
        let ws = Rc::new(Rule::CharPredicate(CharClass::from_chars(" \t\r\n"), None));
        let mut state = ParserState::new("ab\ncd", ws);
        state.note_attempt(4, Some("'x'".to_string()));
        let msg = Diagnostic::render("ab\ncd", &state);
        assert!(msg.contains("cd"));
        assert!(msg.contains("^"));
    }
}
