//! Mask validation and derivation of the placeholder and empty sentinel.

use super::format::{CharClass, BLANK, ESCAPE};
use std::collections::BTreeSet;
use thiserror::Error;

/// One position of a compiled mask.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slot {
    /// A position the user fills with a character of the given class.
    Editable(CharClass),
    /// A fixed character, emitted verbatim (escaped symbols land here too).
    Literal(char),
}

/// Why a mask was rejected. Rejection is never an error for the control: the caller
/// simply renders without a mask.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MaskRejection {
    #[error("mask is empty")]
    Empty,
    #[error("mask ends with a dangling escape")]
    DanglingEscape,
    #[error("mask has no editable position")]
    NoEditablePosition,
    #[error("mask uses the blank symbol `_` as a literal")]
    BlankLiteral,
}

/// A validated mask and everything derived from it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MaskSpec {
    pattern: String,
    slots: Vec<Slot>,
    placeholder: String,
    empty_sentinel: String,
}

impl MaskSpec {
    /// The mask string as configured.
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// Slot layout with escapes resolved.
    pub fn slots(&self) -> &[Slot] {
        &self.slots
    }

    /// Text shown in an empty field: `_` per editable position, literals verbatim.
    pub fn placeholder(&self) -> &str {
        &self.placeholder
    }

    /// The value a fully erased field is normalized from.
    ///
    /// This is the pattern with every character except `-` replaced by `_`, so for
    /// `111-111` it is `___-___`.
    pub fn empty_sentinel(&self) -> &str {
        &self.empty_sentinel
    }

    /// Input classes used by this mask.
    pub fn editable_classes(&self) -> BTreeSet<CharClass> {
        self.slots
            .iter()
            .filter_map(|slot| match slot {
                Slot::Editable(class) => Some(*class),
                Slot::Literal(_) => None,
            })
            .collect()
    }

    /// Number of editable positions.
    pub fn editable_len(&self) -> usize {
        self.slots
            .iter()
            .filter(|slot| matches!(slot, Slot::Editable(_)))
            .count()
    }

    /// True when `edited` is a blank pattern and should count as no value at all: the
    /// empty sentinel, or the placeholder with no editable slot filled.
    pub fn is_blank(&self, edited: &str) -> bool {
        edited == self.empty_sentinel || edited == self.placeholder
    }
}

/// Validate a mask without building the derived strings.
pub fn validate(mask: &str) -> Result<(), MaskRejection> {
    parse_slots(mask).map(|_| ())
}

/// Compile a mask. `None` means "no mask" and callers treat it exactly like an
/// unconfigured mask.
pub fn compile(mask: &str) -> Option<MaskSpec> {
    let slots = match parse_slots(mask) {
        Ok(slots) => slots,
        Err(reason) => {
            log::warn!("ignoring mask {mask:?}: {reason}");
            return None;
        }
    };

    let placeholder = slots
        .iter()
        .map(|slot| match slot {
            Slot::Editable(_) => BLANK,
            Slot::Literal(ch) => *ch,
        })
        .collect();

    let empty_sentinel = mask
        .chars()
        .map(|ch| if ch == '-' { ch } else { BLANK })
        .collect();

    Some(MaskSpec {
        pattern: mask.to_string(),
        slots,
        placeholder,
        empty_sentinel,
    })
}

fn parse_slots(mask: &str) -> Result<Vec<Slot>, MaskRejection> {
    if mask.is_empty() {
        return Err(MaskRejection::Empty);
    }

    let mut slots = Vec::with_capacity(mask.len());
    let mut escaped = false;

    for ch in mask.chars() {
        if escaped {
            escaped = false;
            if ch == BLANK {
                return Err(MaskRejection::BlankLiteral);
            }
            slots.push(Slot::Literal(ch));
            continue;
        }

        if ch == ESCAPE {
            escaped = true;
            continue;
        }

        match CharClass::from_symbol(ch) {
            Some(class) => slots.push(Slot::Editable(class)),
            None if ch == BLANK => return Err(MaskRejection::BlankLiteral),
            None => slots.push(Slot::Literal(ch)),
        }
    }

    if escaped {
        return Err(MaskRejection::DanglingEscape);
    }

    if !slots.iter().any(|slot| matches!(slot, Slot::Editable(_))) {
        return Err(MaskRejection::NoEditablePosition);
    }

    Ok(slots)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn phone_mask_placeholder_and_sentinel() {
        let spec = compile("111-111").expect("valid mask");
        assert_eq!(spec.placeholder(), "___-___");
        assert_eq!(spec.empty_sentinel(), "___-___");
        assert_eq!(spec.editable_len(), 6);
        assert!(spec.is_blank("___-___"));
        assert!(!spec.is_blank("1__-___"));
    }

    #[test]
    fn escaped_symbols_become_literals() {
        let spec = compile(r"+\1 (111) 111").expect("valid mask");
        assert_eq!(spec.placeholder(), "+1 (___) ___");
        assert_eq!(spec.slots()[1], Slot::Literal('1'));
        assert_eq!(spec.editable_len(), 6);
    }

    #[test]
    fn sentinel_keeps_only_hyphens() {
        let spec = compile("(111) 11-11").expect("valid mask");
        assert_eq!(spec.empty_sentinel(), "________-__");
        assert_eq!(spec.placeholder(), "(___) __-__");
        assert!(spec.is_blank("(___) __-__"));
        assert!(!spec.is_blank("(1__) __-__"));
    }

    #[test]
    fn rejected_masks() {
        assert_eq!(validate(""), Err(MaskRejection::Empty));
        assert_eq!(validate(r"111\"), Err(MaskRejection::DanglingEscape));
        assert_eq!(validate("---"), Err(MaskRejection::NoEditablePosition));
        assert_eq!(validate(r"\1\9"), Err(MaskRejection::NoEditablePosition));
        assert_eq!(validate("11_11"), Err(MaskRejection::BlankLiteral));
        assert_eq!(validate(r"11\_"), Err(MaskRejection::BlankLiteral));
        assert!(compile("---").is_none());
    }

    #[test]
    fn editable_classes_are_collected() {
        let spec = compile("aa-11-**").expect("valid mask");
        let classes: Vec<_> = spec.editable_classes().into_iter().collect();
        assert_eq!(
            classes,
            vec![CharClass::Digit, CharClass::Letter, CharClass::Alphanumeric]
        );
    }

    fn token() -> impl Strategy<Value = &'static str> {
        prop_oneof![
            Just("1"),
            Just("9"),
            Just("a"),
            Just("*"),
            Just("h"),
            Just("-"),
            Just("("),
            Just(")"),
            Just(" "),
            Just(r"\1"),
            Just(r"\-"),
        ]
    }

    fn literal_token() -> impl Strategy<Value = &'static str> {
        prop_oneof![Just("-"), Just("("), Just(" "), Just("+"), Just(r"\1"), Just(r"\a")]
    }

    proptest! {
        #[test]
        fn placeholder_drops_escapes_and_blanks_editables(
            tokens in prop::collection::vec(token(), 1..16)
        ) {
            let editable = tokens.iter().any(|t| t.len() == 1 && "19a*h".contains(*t));
            prop_assume!(editable);

            let mask: String = tokens.concat();
            let escapes = tokens.iter().filter(|t| t.starts_with('\\')).count();
            let spec = compile(&mask).expect("generated mask is valid");

            prop_assert_eq!(spec.placeholder().chars().count(), mask.chars().count() - escapes);
            for (slot, ch) in spec.slots().iter().zip(spec.placeholder().chars()) {
                match slot {
                    Slot::Editable(_) => prop_assert_eq!(ch, BLANK),
                    Slot::Literal(lit) => prop_assert_eq!(ch, *lit),
                }
            }
        }

        #[test]
        fn masks_without_editables_do_not_compile(
            tokens in prop::collection::vec(literal_token(), 0..10)
        ) {
            let mask: String = tokens.concat();
            prop_assert!(compile(&mask).is_none());
        }
    }
}
