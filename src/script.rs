//! Line-oriented event scripts.
//!
//! Scripts drive a [`Form`](crate::form::Form) without a real toolkit: each line is one
//! user or host action, replayed against a virtual clock.
//!
//! ```text
//! # comment
//! edit phone 123456       # text box content is now "123456"
//! wait 250                # advance the clock by 250ms
//! select choice b
//! key notes Tab shift
//! blur phone
//! push phone 555-000      # another session changed the stored value
//! push phone              # ...and cleared it
//! busy phone on
//! measure phone 32        # affordance list measured 32 wide
//! ```
//!
//! Edit text may use `\t`, `\n` and `\\` escapes.

use crate::error::{Result, UniversalInputError};
use std::time::Duration;

/// One scripted action.
#[derive(Debug, Clone, PartialEq)]
pub enum Step {
    Edit { key: String, text: String },
    Select { key: String, value: String },
    Blur { key: String },
    Key { key: String, name: String, shift: bool },
    Wait(Duration),
    /// `None` clears the value
    Push { key: String, value: Option<String> },
    Busy { key: String, busy: bool },
    Measure { key: String, width: u16 },
}

impl Step {
    /// Field the step targets, if any.
    pub fn key(&self) -> Option<&str> {
        match self {
            Step::Edit { key, .. }
            | Step::Select { key, .. }
            | Step::Blur { key }
            | Step::Key { key, .. }
            | Step::Push { key, .. }
            | Step::Busy { key, .. }
            | Step::Measure { key, .. } => Some(key),
            Step::Wait(_) => None,
        }
    }
}

/// Parse a whole script. Blank lines and `#` comments are skipped.
pub fn parse_script(source: &str) -> Result<Vec<Step>> {
    source
        .lines()
        .enumerate()
        .filter_map(|(idx, line)| parse_line(idx + 1, line).transpose())
        .collect()
}

/// Parse one 1-based line; `Ok(None)` for blank and comment lines.
pub fn parse_line(line_no: usize, line: &str) -> Result<Option<Step>> {
    let line = strip_comment(line).trim();
    if line.is_empty() {
        return Ok(None);
    }

    let (command, rest) = split_word(line);
    let err = |message: String| UniversalInputError::script(line_no, message);

    let step = match command {
        "wait" => {
            let ms = rest
                .parse::<u64>()
                .map_err(|_| err(format!("`wait` expects milliseconds, got `{rest}`")))?;
            Step::Wait(Duration::from_millis(ms))
        }
        "edit" | "select" | "blur" | "key" | "push" | "busy" | "measure" => {
            let (key, arg) = split_word(rest);
            if key.is_empty() {
                return Err(err(format!("`{command}` needs a field key")));
            }
            let key = key.to_string();

            match command {
                "edit" => Step::Edit {
                    key,
                    text: unescape(arg),
                },
                "select" => Step::Select {
                    key,
                    value: arg.to_string(),
                },
                "blur" => Step::Blur { key },
                "key" => {
                    let (name, modifier) = split_word(arg);
                    if name.is_empty() {
                        return Err(err("`key` needs a key name".to_string()));
                    }
                    let shift = match modifier {
                        "" => false,
                        "shift" => true,
                        other => return Err(err(format!("unknown key modifier `{other}`"))),
                    };
                    Step::Key {
                        key,
                        name: name.to_string(),
                        shift,
                    }
                }
                "push" => Step::Push {
                    key,
                    value: (!arg.is_empty()).then(|| unescape(arg)),
                },
                "busy" => {
                    let busy = match arg {
                        "on" => true,
                        "off" => false,
                        other => {
                            return Err(err(format!("`busy` expects on|off, got `{other}`")))
                        }
                    };
                    Step::Busy { key, busy }
                }
                _ => {
                    let width = arg
                        .parse::<u16>()
                        .map_err(|_| err(format!("`measure` expects a width, got `{arg}`")))?;
                    Step::Measure { key, width }
                }
            }
        }
        other => return Err(err(format!("unknown command `{other}`"))),
    };

    Ok(Some(step))
}

fn strip_comment(line: &str) -> &str {
    match line.find(" #") {
        Some(idx) => &line[..idx],
        None if line.trim_start().starts_with('#') => "",
        None => line,
    }
}

fn split_word(s: &str) -> (&str, &str) {
    let s = s.trim_start();
    match s.find(char::is_whitespace) {
        Some(idx) => (&s[..idx], s[idx..].trim_start()),
        None => (s, ""),
    }
}

fn unescape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut chars = s.chars();
    while let Some(ch) = chars.next() {
        if ch != '\\' {
            out.push(ch);
            continue;
        }
        match chars.next() {
            Some('t') => out.push('\t'),
            Some('n') => out.push('\n'),
            Some('\\') => out.push('\\'),
            Some(other) => {
                out.push('\\');
                out.push(other);
            }
            None => out.push('\\'),
        }
    }
    out
}
