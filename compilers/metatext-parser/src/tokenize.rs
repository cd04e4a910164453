use nom::{
    bytes::complete::{take_till1, take_while},
    IResult,
};

use crate::token::{Span, Token};

fn skip_whitespace(input: &str) -> IResult<&str, &str> {
    take_while(char::is_whitespace)(input)
}

fn word(input: &str) -> IResult<&str, &str> {
    take_till1(char::is_whitespace)(input)
}

/// Splits chunk text into words on runs of Unicode whitespace.
///
/// Words keep their punctuation and casing; trimming only happens on a
/// finalized selection.
pub fn tokenize(original_input: &str) -> Vec<Token<'_>> {
    let mut input = original_input;
    let mut result = Vec::new();

    loop {
        input = match skip_whitespace(input) {
            Ok((rest, _)) => rest,
            Err(_) => break,
        };

        if input.is_empty() {
            break;
        }

        match word(input) {
            Ok((rest, text)) => {
                let start = original_input.len() - input.len();
                result.push(Token {
                    span: Span::new(start, start + text.len()),
                    text,
                });
                input = rest;
            }
            // take_till1 only fails on empty input, handled above
            Err(_) => break,
        }
    }

    result
}

/// Owned word list, the form a selection engine holds.
pub fn words(text: &str) -> Vec<String> {
    tokenize(text).into_iter().map(|t| t.text.to_string()).collect()
}
