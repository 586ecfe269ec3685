//! Tokenizer-backed parsing of numeric, font-family and free-form values.

use cssparser::{ParseError, Parser, ParserInput, Token};

use super::{SizeUnit, SizeValue, Value};
use crate::error::{Error, Result};

/// Widens a tokenizer float, dropping the noise of the f32 representation.
pub(super) fn widen(value: f32) -> f64 {
    (f64::from(value) * 1e6).round() / 1e6
}

/// Parses a single dimension, percentage or number token.
pub(super) fn numeric(text: &str) -> Result<Value> {
    let invalid = || Error::invalid_value("a size, number or percentage", text);

    let mut input = ParserInput::new(text);
    let mut parser = Parser::new(&mut input);
    let value = match parser.next() {
        Ok(Token::Dimension { value, unit, .. }) => {
            let unit = SizeUnit::from_css(unit).ok_or_else(invalid)?;
            Value::Size(SizeValue::new(widen(*value), unit))
        }
        Ok(Token::Percentage {
            unit_value,
            int_value,
            ..
        }) => match int_value {
            Some(whole) => Value::Percentage(f64::from(*whole)),
            None => Value::Percentage(widen(*unit_value * 100.0)),
        },
        Ok(Token::Number { value, .. }) => Value::Number(widen(*value)),
        _ => return Err(invalid()),
    };
    parser.expect_exhausted().map_err(|_| invalid())?;
    Ok(value)
}

/// Validates a comma-separated font-family list and returns it trimmed.
///
/// Each family is either a quoted string or one or more identifiers
/// (`Times New Roman`).
pub(super) fn font_family(text: &str) -> Result<String> {
    let invalid = || Error::invalid_value("a font-family list", text);

    let mut input = ParserInput::new(text);
    let mut parser = Parser::new(&mut input);
    let mut awaiting_name = true;
    let mut families = 0usize;
    while let Ok(token) = parser.next() {
        match token {
            Token::Ident(_) | Token::QuotedString(_) => {
                if awaiting_name {
                    families += 1;
                }
                awaiting_name = false;
            }
            Token::Comma if !awaiting_name => awaiting_name = true,
            _ => return Err(invalid()),
        }
    }
    if families == 0 || awaiting_name {
        return Err(invalid());
    }
    Ok(text.trim().to_string())
}

/// Returns true if `text` is a non-empty run of CSS component values.
///
/// Blocks must be balanced. Declaration and rule punctuation (`;`, `{`, `}`)
/// and bad string or url tokens are rejected.
pub(crate) fn is_component_list(text: &str) -> bool {
    let mut input = ParserInput::new(text);
    let mut parser = Parser::new(&mut input);
    let mut tokens = 0usize;
    component_values(&mut parser, &mut tokens).is_ok() && tokens > 0
}

fn component_values<'i>(
    parser: &mut Parser<'i, '_>,
    tokens: &mut usize,
) -> std::result::Result<(), ParseError<'i, ()>> {
    loop {
        let location = parser.current_source_location();
        let token = match parser.next() {
            Ok(token) => token.clone(),
            Err(_) => return Ok(()),
        };
        *tokens += 1;
        match token {
            Token::Function(_) | Token::ParenthesisBlock | Token::SquareBracketBlock => {
                let closer = if token == Token::SquareBracketBlock { ']' } else { ')' };
                let end = parser.parse_nested_block(|nested| {
                    component_values(nested, tokens)?;
                    Ok(nested.position())
                })?;
                // The tokenizer closes blocks left open at the end of input.
                if !parser.slice_from(end).starts_with(closer) {
                    return Err(location.new_custom_error(()));
                }
            }
            Token::Semicolon
            | Token::CurlyBracketBlock
            | Token::CloseCurlyBracket
            | Token::CloseParenthesis
            | Token::CloseSquareBracket
            | Token::BadString(_)
            | Token::BadUrl(_) => return Err(location.new_custom_error(())),
            _ => {}
        }
    }
}
