//! Unicode general-category predicates usable inside a character class.
//! See: https://en.wikipedia.org/wiki/Unicode_character_property#General_Category
use unicode_character_database::general_category::{DECIMAL_NUMBER, LETTER, NONSPACING_MARK, SPACE_SEPARATOR};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UnicodeRange {
    /// Letter (category L, all subcategories).
    L,
    /// Nonspacing mark (Mn).
    Mn,
    /// Decimal number (Nd).
    Nd,
    /// Space separator (Zs).
    Zs,
}

impl UnicodeRange {
    pub fn new(name: &str) -> Self {
        match name {
            "L" => Self::L,
            "Mn" => Self::Mn,
            "Nd" => Self::Nd,
            "Zs" => Self::Zs,
            _ => panic!("unknown Unicode general category {name}"),
        }
    }

    pub fn accept(&self, ch: char) -> bool {
        match self {
            Self::L => member_of_category(ch, LETTER),
            Self::Mn => member_of_category(ch, NONSPACING_MARK),
            Self::Nd => member_of_category(ch, DECIMAL_NUMBER),
            Self::Zs => member_of_category(ch, SPACE_SEPARATOR),
        }
    }
}

fn member_of_category(ch: char, spec: &'static [(u32, u32)]) -> bool {
    let codepoint = ch as u32;
    spec.iter().any(|(bot, top)| *bot <= codepoint && codepoint <= *top)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn letter_accepts_ascii_and_rejects_digit() {
        assert!(UnicodeRange::L.accept('a'));
        assert!(!UnicodeRange::L.accept('5'));
    }

    #[test]
    fn decimal_number_accepts_digits() {
        assert!(UnicodeRange::Nd.accept('7'));
        assert!(!UnicodeRange::Nd.accept('x'));
    }

    #[test]
    fn space_separator_accepts_plain_space() {
        assert!(UnicodeRange::Zs.accept(' '));
        assert!(!UnicodeRange::Zs.accept('a'));
    }
}
