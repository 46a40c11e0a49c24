//! Mask vocabulary: editable placeholder symbols and the input classes they accept.

/// Symbol that forces the following mask character to be a literal.
pub const ESCAPE: char = '\\';

/// Symbol rendered in place of an unfilled editable position.
pub const BLANK: char = '_';

/// Input-character class accepted by an editable mask position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum CharClass {
    /// `0-9`
    Digit,
    /// ASCII letters
    Letter,
    /// ASCII letters and digits
    Alphanumeric,
    /// `0-9`, `a-f`, `A-F`
    HexDigit,
}

/// Editable placeholder symbols, in the order they are documented.
const EDITABLE_SYMBOLS: &[(char, CharClass)] = &[
    ('1', CharClass::Digit),
    ('9', CharClass::Digit),
    ('a', CharClass::Letter),
    ('*', CharClass::Alphanumeric),
    ('h', CharClass::HexDigit),
];

impl CharClass {
    /// Class for an editable mask symbol, `None` when the symbol is a literal.
    pub fn from_symbol(symbol: char) -> Option<Self> {
        EDITABLE_SYMBOLS
            .iter()
            .find(|(s, _)| *s == symbol)
            .map(|(_, class)| *class)
    }

    /// Whether a typed character fits this class.
    pub fn accepts(self, ch: char) -> bool {
        match self {
            CharClass::Digit => ch.is_ascii_digit(),
            CharClass::Letter => ch.is_ascii_alphabetic(),
            CharClass::Alphanumeric => ch.is_ascii_alphanumeric(),
            CharClass::HexDigit => ch.is_ascii_hexdigit(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn digit_symbols_accept_only_digits() {
        let class = CharClass::from_symbol('1').unwrap();
        assert!(class.accepts('7'));
        assert!(!class.accepts('x'));
        assert_eq!(CharClass::from_symbol('9'), Some(CharClass::Digit));
    }

    #[test]
    fn literals_have_no_class() {
        for symbol in ['-', '(', ESCAPE, BLANK] {
            assert_eq!(CharClass::from_symbol(symbol), None);
        }
    }

    #[test]
    fn hex_and_alphanumeric_classes() {
        assert!(CharClass::HexDigit.accepts('F'));
        assert!(!CharClass::HexDigit.accepts('g'));
        assert!(CharClass::Alphanumeric.accepts('g'));
        assert!(!CharClass::Alphanumeric.accepts('-'));
        assert_eq!(EDITABLE_SYMBOLS.len(), 5);
    }
}
