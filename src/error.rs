//! Errors raised by this crate, split along the three regimes described in
//! the design: construction errors, normal parse failure (never an `Err`,
//! see `matcher.rs`), and parse abort.
use std::fmt;

/// A grammar-construction mistake caught before any parsing happens.
///
/// `SeqBuilder` makes a misplaced reducer structurally impossible (`.reduce()`
/// consumes the builder and is the only way to attach one), so the only
/// remaining way to misuse it is to finish with no elements at all.
#[derive(Debug, Clone)]
pub enum RuleBuildError {
    EmptySequence,
}

impl fmt::Display for RuleBuildError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RuleBuildError::EmptySequence => write!(f, "a sequence must have at least one element"),
        }
    }
}

impl std::error::Error for RuleBuildError {}

/// Why a `Grammar::parse` call did not produce a value.
#[derive(Debug, Clone)]
pub enum ParseError {
    /// Ordinary furthest-failure mismatch, with a rendered diagnostic.
    NoMatch(String),
    /// An `error(msg)` rule was entered, or an undefined symbol was reached
    /// mid-parse. Distinguishable from `NoMatch`: this aborts the whole
    /// parse rather than participating in ordered choice.
    Aborted(String),
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::NoMatch(msg) => write!(f, "{msg}"),
            ParseError::Aborted(msg) => write!(f, "parse aborted: {msg}"),
        }
    }
}

impl std::error::Error for ParseError {}
