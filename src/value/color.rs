//! RGBA colors parsed from CSS color syntax.

use cssparser::{ParseError, Parser, ParserInput, Token};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// An 8-bit RGBA color.
///
/// Parses hex notation (`#rgb`, `#rgba`, `#rrggbb`, `#rrggbbaa`), the
/// comma forms of `rgb()`/`rgba()`, and a fixed set of named colors.
/// Displays as lowercase hex.
///
/// ```rust
/// use stylecascade::ColorValue;
///
/// let white = ColorValue::parse("#fff").unwrap();
/// assert_eq!(white, ColorValue::rgb(255, 255, 255));
/// assert_eq!(white.to_string(), "#ffffff");
/// assert_eq!(ColorValue::parse("rgba(0, 0, 0, 0.5)").unwrap().to_string(), "#00000080");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ColorValue {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl ColorValue {
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::rgba(r, g, b, 255)
    }

    /// Parses a CSS color.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidValue`] for anything that is not a supported color.
    pub fn parse(text: &str) -> Result<ColorValue> {
        let invalid = || Error::invalid_value("a color", text);

        let mut input = ParserInput::new(text);
        let mut parser = Parser::new(&mut input);
        let color = parse_color(&mut parser).map_err(|_| invalid())?;
        parser.expect_exhausted().map_err(|_| invalid())?;
        Ok(color)
    }
}

fn parse_color<'i>(parser: &mut Parser<'i, '_>) -> std::result::Result<ColorValue, ParseError<'i, ()>> {
    let location = parser.current_source_location();
    let token = parser.next()?.clone();
    match token {
        Token::Hash(ref hex) | Token::IDHash(ref hex) => {
            from_hex(hex).ok_or_else(|| location.new_custom_error(()))
        }
        Token::Ident(ref name) => named(name).ok_or_else(|| location.new_custom_error(())),
        Token::Function(ref name)
            if name.eq_ignore_ascii_case("rgb") || name.eq_ignore_ascii_case("rgba") =>
        {
            parser.parse_nested_block(|p| {
                let r = channel(p)?;
                p.expect_comma()?;
                let g = channel(p)?;
                p.expect_comma()?;
                let b = channel(p)?;
                let a = if p.try_parse(|p| p.expect_comma()).is_ok() {
                    alpha(p)?
                } else {
                    255
                };
                Ok(ColorValue::rgba(r, g, b, a))
            })
        }
        _ => Err(location.new_custom_error(())),
    }
}

/// A color channel in `0..=255`. Out-of-range values are an error, not clamped.
fn channel<'i>(parser: &mut Parser<'i, '_>) -> std::result::Result<u8, ParseError<'i, ()>> {
    let location = parser.current_source_location();
    let value = parser.expect_number()?;
    if !(0.0..=255.0).contains(&value) {
        return Err(location.new_custom_error(()));
    }
    Ok(value.round() as u8)
}

/// An alpha in `0..=1`, scaled to a byte.
fn alpha<'i>(parser: &mut Parser<'i, '_>) -> std::result::Result<u8, ParseError<'i, ()>> {
    let location = parser.current_source_location();
    let value = parser.expect_number()?;
    if !(0.0..=1.0).contains(&value) {
        return Err(location.new_custom_error(()));
    }
    Ok((value * 255.0).round() as u8)
}

fn from_hex(hex: &str) -> Option<ColorValue> {
    if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    let digit = |i: usize| u8::from_str_radix(&hex[i..=i], 16).ok();
    let pair = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
    match hex.len() {
        3 | 4 => {
            let short = |i: usize| digit(i).map(|d| d * 17);
            let a = if hex.len() == 4 { short(3)? } else { 255 };
            Some(ColorValue::rgba(short(0)?, short(1)?, short(2)?, a))
        }
        6 | 8 => {
            let a = if hex.len() == 8 { pair(6)? } else { 255 };
            Some(ColorValue::rgba(pair(0)?, pair(2)?, pair(4)?, a))
        }
        _ => None,
    }
}

fn named(name: &str) -> Option<ColorValue> {
    let color = match name.to_ascii_lowercase().as_str() {
        "transparent" => ColorValue::rgba(0, 0, 0, 0),
        "black" => ColorValue::rgb(0, 0, 0),
        "white" => ColorValue::rgb(255, 255, 255),
        "red" => ColorValue::rgb(255, 0, 0),
        "green" => ColorValue::rgb(0, 128, 0),
        "lime" => ColorValue::rgb(0, 255, 0),
        "blue" => ColorValue::rgb(0, 0, 255),
        "yellow" => ColorValue::rgb(255, 255, 0),
        "cyan" | "aqua" => ColorValue::rgb(0, 255, 255),
        "magenta" | "fuchsia" => ColorValue::rgb(255, 0, 255),
        "gray" | "grey" => ColorValue::rgb(128, 128, 128),
        "silver" => ColorValue::rgb(192, 192, 192),
        "maroon" => ColorValue::rgb(128, 0, 0),
        "olive" => ColorValue::rgb(128, 128, 0),
        "navy" => ColorValue::rgb(0, 0, 128),
        "purple" => ColorValue::rgb(128, 0, 128),
        "teal" => ColorValue::rgb(0, 128, 128),
        "orange" => ColorValue::rgb(255, 165, 0),
        _ => return None,
    };
    Some(color)
}

impl std::fmt::Display for ColorValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)?;
        if self.a != 255 {
            write!(f, "{:02x}", self.a)?;
        }
        Ok(())
    }
}

impl TryFrom<String> for ColorValue {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        ColorValue::parse(&value)
    }
}

impl From<ColorValue> for String {
    fn from(value: ColorValue) -> Self {
        value.to_string()
    }
}
