//! The fluent sequence builder, enforcing "a reducer may only be last".
use std::rc::Rc;

use crate::error::RuleBuildError;
pub use crate::rule::IntoRule;
use crate::rule::{Rule, SequenceNode};
use crate::value::Reducer;

/// Fluent sequence builder. Mirrors the spec's "list with at most one
/// trailing reducer function" compilation rule: `.reduce()` consumes the
/// builder, so a reducer cannot be attached anywhere but last.
#[derive(Default)]
pub struct SeqBuilder {
    subrules: Vec<Rc<Rule>>,
}

impl SeqBuilder {
    pub fn new() -> SeqBuilder {
        SeqBuilder { subrules: Vec::new() }
    }

    pub fn then(mut self, rule: impl IntoRule) -> SeqBuilder {
        self.subrules.push(rule.into_rule());
        self
    }

    /// Finish the sequence with no reducer: the automatic value shape from
    /// §4.1 applies (null / single value / list, by `valueCount`).
    pub fn build(self) -> Result<Rc<Rule>, RuleBuildError> {
        if self.subrules.is_empty() {
            return Err(RuleBuildError::EmptySequence);
        }
        let value_count = self.subrules.iter().filter(|r| r.generates_value()).count();
        Ok(Rc::new(Rule::Sequence(SequenceNode {
            subrules: self.subrules,
            value_count,
            reducer: None,
        })))
    }

    /// Finish the sequence with a reducer applied to the ordered values of
    /// its value-generating subrules.
    pub fn reduce(
        self,
        reducer: impl Fn(&[crate::value::Value]) -> crate::value::Value + 'static,
    ) -> Result<Rc<Rule>, RuleBuildError> {
        if self.subrules.is_empty() {
            return Err(RuleBuildError::EmptySequence);
        }
        let value_count = self.subrules.iter().filter(|r| r.generates_value()).count();
        let reducer: Reducer = Rc::new(reducer);
        Ok(Rc::new(Rule::Sequence(SequenceNode {
            subrules: self.subrules,
            value_count,
            reducer: Some(reducer),
        })))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_sequence_is_rejected() {
        assert!(matches!(SeqBuilder::new().build(), Err(RuleBuildError::EmptySequence)));
    }

    #[test]
    fn sequence_value_shape_follows_value_count() {
        // two literals, neither value-generating -> valueCount == 0
        let rule = SeqBuilder::new().then("a").then("b").build().unwrap();
        match rule.as_ref() {
            Rule::Sequence(node) => assert_eq!(node.value_count, 0),
            _ => panic!("expected a Sequence"),
        }
    }
}
