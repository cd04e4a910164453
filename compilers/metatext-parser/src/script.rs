//! Line-oriented gesture scripts used to record and replay pointer input.
//!
//! ```text
//! # drag across three words
//! press 1 @0
//! enter 2 @20
//! enter 3 @25
//! release @40
//! ```
//!
//! A missing `@millis` reuses the previous timestamp (0 for the first line).

use std::time::Duration;

use metatext_protocol::PointerEvent;
use nom::{
    character::complete::{alpha1, char, digit1, space0, space1},
    sequence::{pair, preceded},
    IResult,
};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScriptError {
    #[error("line {line}: unknown event '{keyword}'")]
    UnknownEvent { line: usize, keyword: String },

    #[error("line {line}: '{keyword}' needs a word index")]
    MissingIndex { line: usize, keyword: String },

    #[error("line {line}: invalid number '{text}'")]
    InvalidNumber { line: usize, text: String },

    #[error("line {line}: unexpected trailing input '{rest}'")]
    TrailingInput { line: usize, rest: String },

    #[error("line {line}: timestamp {current}ms is earlier than {previous}ms")]
    TimestampRegressed { line: usize, previous: u64, current: u64 },
}

/// A pointer event stamped with the monotonic time it was observed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimedEvent {
    pub line: usize,
    pub at: Duration,
    pub event: PointerEvent,
}

fn keyword(input: &str) -> IResult<&str, &str> {
    preceded(space0, alpha1)(input)
}

fn index(input: &str) -> IResult<&str, &str> {
    preceded(space1, digit1)(input)
}

fn timestamp(input: &str) -> IResult<&str, &str> {
    preceded(pair(space0, char('@')), digit1)(input)
}

fn parse_number<T: std::str::FromStr>(line: usize, text: &str) -> Result<T, ScriptError> {
    text.parse().map_err(|_| ScriptError::InvalidNumber {
        line,
        text: text.to_string(),
    })
}

fn strip_comment(raw: &str) -> &str {
    match raw.find('#') {
        Some(pos) => &raw[..pos],
        None => raw,
    }
}

/// Parses a whole script. Blank lines and `#` comments are skipped.
pub fn parse_script(source: &str) -> Result<Vec<TimedEvent>, ScriptError> {
    let mut events = Vec::new();
    let mut last_ms = 0u64;

    for (n, raw) in source.lines().enumerate() {
        let line = n + 1;
        let body = strip_comment(raw).trim_end();
        if body.trim_start().is_empty() {
            continue;
        }

        let (rest, word) = keyword(body).map_err(|_| ScriptError::UnknownEvent {
            line,
            keyword: body.trim().to_string(),
        })?;

        let needs_index = matches!(word, "press" | "enter");
        let (rest, idx) = if needs_index {
            match index(rest) {
                Ok((rest, digits)) => (rest, Some(parse_number::<usize>(line, digits)?)),
                Err(_) => {
                    return Err(ScriptError::MissingIndex {
                        line,
                        keyword: word.to_string(),
                    })
                }
            }
        } else {
            (rest, None)
        };

        let event = match (word, idx) {
            ("press", Some(index)) => PointerEvent::Press { index },
            ("enter", Some(index)) => PointerEvent::Enter { index },
            ("release", None) => PointerEvent::Release,
            ("leave", None) => PointerEvent::Leave,
            ("clear", None) => PointerEvent::Clear,
            _ => {
                return Err(ScriptError::UnknownEvent {
                    line,
                    keyword: word.to_string(),
                })
            }
        };

        let rest = match timestamp(rest) {
            Ok((rest, digits)) => {
                let ms = parse_number::<u64>(line, digits)?;
                if ms < last_ms {
                    return Err(ScriptError::TimestampRegressed {
                        line,
                        previous: last_ms,
                        current: ms,
                    });
                }
                last_ms = ms;
                rest
            }
            Err(_) => rest,
        };

        if !rest.trim().is_empty() {
            return Err(ScriptError::TrailingInput {
                line,
                rest: rest.trim().to_string(),
            });
        }

        events.push(TimedEvent {
            line,
            at: Duration::from_millis(last_ms),
            event,
        });
    }

    Ok(events)
}
