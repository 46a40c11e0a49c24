//! Live masked editing surface.
//!
//! The toolkit hands us whatever the user's text box currently holds; [`MaskSpec::conform`]
//! lays those characters back onto the mask so the field always shows the full pattern,
//! with typed characters in editable slots and `_` in the ones still open.

use super::compiler::{MaskSpec, Slot};
use super::format::BLANK;
use crate::value::Value;

impl MaskSpec {
    /// Lay raw typed text onto the mask.
    ///
    /// Literal slots are always emitted and swallow a matching typed character. Editable
    /// slots take the next typed character their class accepts, skipping the ones it
    /// rejects; a typed `_` leaves the slot open.
    pub fn conform(&self, raw: &str) -> String {
        let mut input = raw.chars().peekable();
        let mut out = String::with_capacity(self.slots().len());

        for slot in self.slots() {
            match *slot {
                Slot::Literal(lit) => {
                    out.push(lit);
                    if input.peek() == Some(&lit) {
                        input.next();
                    }
                }
                Slot::Editable(class) => {
                    let filled = loop {
                        match input.next() {
                            None | Some(BLANK) => break BLANK,
                            Some(ch) if class.accepts(ch) => break ch,
                            Some(_) => continue,
                        }
                    };
                    out.push(filled);
                }
            }
        }

        out
    }

    /// True once every editable slot of a conformed value holds a character.
    pub fn is_complete(&self, conformed: &str) -> bool {
        let chars: Vec<char> = conformed.chars().collect();
        chars.len() == self.slots().len()
            && self
                .slots()
                .iter()
                .zip(chars)
                .all(|(slot, ch)| !matches!(slot, Slot::Editable(_)) || ch != BLANK)
    }

    /// The value a masked live edit presents to the synchronization engine: the
    /// conformed text, or `Empty` when the field is back to its blank pattern.
    pub fn edit_value(&self, raw: &str) -> Value {
        if raw.is_empty() {
            return Value::Empty;
        }
        let conformed = self.conform(raw);
        if self.is_blank(&conformed) {
            Value::Empty
        } else {
            Value::Text(conformed)
        }
    }
}
