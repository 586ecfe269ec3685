//! Typed values for variables and style properties.
//!
//! This module provides the closed value vocabulary:
//!
//! - [`VariableType`]: the five variable types
//! - [`Value`]: a concrete typed value
//! - [`ColorValue`], [`SizeValue`], [`SizeUnit`]: structured value payloads
//! - [`CustomValue`]: an opaque escape-hatch token that is never aliased further
//! - [`VariableValue`]: what a variable stores per mode (value, alias, or custom)
//! - [`ResolvedValue`]: what alias resolution produces
//!
//! Values are parsed from CSS-like text with [`Value::parse`] and
//! [`Value::parse_any`]. Anything outside the vocabulary is rejected with
//! [`Error::InvalidValue`](crate::Error::InvalidValue).

mod color;
mod parse;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::ids::VariableId;

pub use color::ColorValue;
pub(crate) use parse::is_component_list;

/// The declared type of a variable. Fixed at creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum VariableType {
    Color,
    Size,
    Number,
    Percentage,
    FontFamily,
}

impl VariableType {
    pub fn as_str(self) -> &'static str {
        match self {
            VariableType::Color => "color",
            VariableType::Size => "size",
            VariableType::Number => "number",
            VariableType::Percentage => "percentage",
            VariableType::FontFamily => "font-family",
        }
    }
}

impl std::fmt::Display for VariableType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Units accepted by [`SizeValue`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SizeUnit {
    Px,
    Em,
    Rem,
    Vh,
    Vw,
    Dvh,
    Dvw,
    Lvh,
    Lvw,
    Svh,
    Svw,
    Vmax,
    Vmin,
    Ch,
}

impl SizeUnit {
    pub const ALL: [SizeUnit; 14] = [
        SizeUnit::Px,
        SizeUnit::Em,
        SizeUnit::Rem,
        SizeUnit::Vh,
        SizeUnit::Vw,
        SizeUnit::Dvh,
        SizeUnit::Dvw,
        SizeUnit::Lvh,
        SizeUnit::Lvw,
        SizeUnit::Svh,
        SizeUnit::Svw,
        SizeUnit::Vmax,
        SizeUnit::Vmin,
        SizeUnit::Ch,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            SizeUnit::Px => "px",
            SizeUnit::Em => "em",
            SizeUnit::Rem => "rem",
            SizeUnit::Vh => "vh",
            SizeUnit::Vw => "vw",
            SizeUnit::Dvh => "dvh",
            SizeUnit::Dvw => "dvw",
            SizeUnit::Lvh => "lvh",
            SizeUnit::Lvw => "lvw",
            SizeUnit::Svh => "svh",
            SizeUnit::Svw => "svw",
            SizeUnit::Vmax => "vmax",
            SizeUnit::Vmin => "vmin",
            SizeUnit::Ch => "ch",
        }
    }

    /// Looks up a unit by its CSS spelling, case-insensitively.
    pub fn from_css(unit: &str) -> Option<SizeUnit> {
        Self::ALL
            .into_iter()
            .find(|u| u.as_str().eq_ignore_ascii_case(unit))
    }
}

/// A length with a unit, e.g. `16px`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SizeValue {
    pub value: f64,
    pub unit: SizeUnit,
}

impl SizeValue {
    pub fn new(value: f64, unit: SizeUnit) -> Self {
        Self { value, unit }
    }

    pub fn px(value: f64) -> Self {
        Self::new(value, SizeUnit::Px)
    }
}

impl std::fmt::Display for SizeValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.value, self.unit.as_str())
    }
}

/// A concrete typed value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "kebab-case")]
pub enum Value {
    Color(ColorValue),
    Size(SizeValue),
    Number(f64),
    /// Percentage in percent units (`50%` is `50.0`).
    Percentage(f64),
    FontFamily(String),
}

impl Value {
    /// Returns the variable type this value belongs to.
    pub fn variable_type(&self) -> VariableType {
        match self {
            Value::Color(_) => VariableType::Color,
            Value::Size(_) => VariableType::Size,
            Value::Number(_) => VariableType::Number,
            Value::Percentage(_) => VariableType::Percentage,
            Value::FontFamily(_) => VariableType::FontFamily,
        }
    }

    /// Parses `text` as a value of type `ty`.
    ///
    /// # Example
    ///
    /// ```rust
    /// use stylecascade::{SizeUnit, SizeValue, Value, VariableType};
    ///
    /// let v = Value::parse(VariableType::Size, "1.5rem").unwrap();
    /// assert_eq!(v, Value::Size(SizeValue::new(1.5, SizeUnit::Rem)));
    /// assert!(Value::parse(VariableType::Size, "50%").is_err());
    /// ```
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidValue`] if the text is not a `ty` value.
    pub fn parse(ty: VariableType, text: &str) -> Result<Value> {
        match ty {
            VariableType::Color => ColorValue::parse(text).map(Value::Color),
            VariableType::FontFamily => parse::font_family(text).map(Value::FontFamily),
            VariableType::Size | VariableType::Number | VariableType::Percentage => {
                let value = parse::numeric(text)?;
                if value.variable_type() == ty {
                    Ok(value)
                } else {
                    Err(Error::invalid_value(ty.as_str(), text))
                }
            }
        }
    }

    /// Parses `text`, inferring the type from its syntax.
    ///
    /// Font families are never inferred, since a bare identifier could just
    /// as well be a named color.
    pub fn parse_any(text: &str) -> Result<Value> {
        parse::numeric(text).or_else(|_| {
            ColorValue::parse(text)
                .map(Value::Color)
                .map_err(|_| Error::invalid_value("a color, size, number or percentage", text))
        })
    }
}

impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Color(c) => write!(f, "{}", c),
            Value::Size(s) => write!(f, "{}", s),
            Value::Number(n) => write!(f, "{}", n),
            Value::Percentage(p) => write!(f, "{}%", p),
            Value::FontFamily(family) => f.write_str(family),
        }
    }
}

/// An opaque value passed through verbatim, e.g. `clamp(1rem, 2vw, 3rem)`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CustomValue(String);

impl CustomValue {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for CustomValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// What a variable stores for one mode.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum VariableValue {
    Value(Value),
    /// Reference to another variable of the same type.
    Alias(VariableId),
    Custom(CustomValue),
}

impl From<Value> for VariableValue {
    fn from(value: Value) -> Self {
        VariableValue::Value(value)
    }
}

impl From<ColorValue> for VariableValue {
    fn from(color: ColorValue) -> Self {
        VariableValue::Value(Value::Color(color))
    }
}

impl From<SizeValue> for VariableValue {
    fn from(size: SizeValue) -> Self {
        VariableValue::Value(Value::Size(size))
    }
}

impl From<VariableId> for VariableValue {
    fn from(target: VariableId) -> Self {
        VariableValue::Alias(target)
    }
}

impl From<CustomValue> for VariableValue {
    fn from(custom: CustomValue) -> Self {
        VariableValue::Custom(custom)
    }
}

impl From<ResolvedValue> for VariableValue {
    fn from(resolved: ResolvedValue) -> Self {
        match resolved {
            ResolvedValue::Value(v) => VariableValue::Value(v),
            ResolvedValue::Custom(c) => VariableValue::Custom(c),
        }
    }
}

/// The end of an alias chain.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ResolvedValue {
    Value(Value),
    Custom(CustomValue),
}

impl ResolvedValue {
    pub fn as_value(&self) -> Option<&Value> {
        match self {
            ResolvedValue::Value(v) => Some(v),
            ResolvedValue::Custom(_) => None,
        }
    }
}
