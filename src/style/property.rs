//! The closed style property vocabulary.
//!
//! Each [`StyleProperty`] carries a [`PropertyKind`] describing which values
//! it accepts, both literal values and variable types.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::str::FromStr;

use crate::error::{Error, Result};
use crate::ids::VariableId;
use crate::value::{is_component_list, ColorValue, CustomValue, Value, VariableType};

/// Keyword that sets a property to "explicitly no value".
pub const UNSET_KEYWORD: &str = "unset";

/// What a style property accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PropertyKind {
    Color,
    /// A size, a percentage, or `auto`.
    Length,
    Number,
    /// A whole number (`order`, `z-index`).
    Integer,
    /// A size, a percentage, or a unitless number (`line-height`).
    LengthOrNumber,
    /// A number or a percentage (`opacity`).
    Alpha,
    FontFamily,
    /// One of a fixed list of keywords.
    Keyword(&'static [&'static str]),
    /// Free-form CSS component values (`transform`, `box-shadow`).
    Text,
}

impl PropertyKind {
    /// Returns true if variables of type `ty` may be bound to this kind.
    pub fn accepts_type(self, ty: VariableType) -> bool {
        match self {
            PropertyKind::Color => ty == VariableType::Color,
            PropertyKind::Length => matches!(ty, VariableType::Size | VariableType::Percentage),
            PropertyKind::Number | PropertyKind::Integer => ty == VariableType::Number,
            PropertyKind::LengthOrNumber => matches!(
                ty,
                VariableType::Size | VariableType::Percentage | VariableType::Number
            ),
            PropertyKind::Alpha => matches!(ty, VariableType::Number | VariableType::Percentage),
            PropertyKind::FontFamily => ty == VariableType::FontFamily,
            PropertyKind::Keyword(_) | PropertyKind::Text => false,
        }
    }

    /// Returns true if `keyword` is a valid keyword for this kind.
    pub fn accepts_keyword(self, keyword: &str) -> bool {
        match self {
            PropertyKind::Keyword(allowed) => allowed.iter().any(|k| *k == keyword),
            PropertyKind::Length => keyword == "auto",
            PropertyKind::Text => is_component_list(keyword),
            PropertyKind::Color
            | PropertyKind::Number
            | PropertyKind::Integer
            | PropertyKind::LengthOrNumber
            | PropertyKind::Alpha
            | PropertyKind::FontFamily => false,
        }
    }

    pub(crate) fn describe(self) -> String {
        match self {
            PropertyKind::Color => "a color".to_string(),
            PropertyKind::Length => "a size, percentage or 'auto'".to_string(),
            PropertyKind::Number => "a number".to_string(),
            PropertyKind::Integer => "an integer".to_string(),
            PropertyKind::LengthOrNumber => "a size, percentage or number".to_string(),
            PropertyKind::Alpha => "a number or percentage".to_string(),
            PropertyKind::FontFamily => "a font-family list".to_string(),
            PropertyKind::Keyword(allowed) => format!("one of: {}", allowed.join(", ")),
            PropertyKind::Text => "CSS component values".to_string(),
        }
    }
}

macro_rules! style_properties {
    ($($variant:ident => $name:literal : $kind:expr,)*) => {
        /// A CSS-like style property.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(try_from = "String", into = "String")]
        pub enum StyleProperty {
            $($variant,)*
        }

        impl StyleProperty {
            /// Every property, in declaration order.
            pub const ALL: &'static [StyleProperty] = &[$(StyleProperty::$variant,)*];

            /// The kebab-case CSS name.
            pub fn as_str(self) -> &'static str {
                match self {
                    $(StyleProperty::$variant => $name,)*
                }
            }

            pub fn kind(self) -> PropertyKind {
                match self {
                    $(StyleProperty::$variant => $kind,)*
                }
            }
        }
    };
}

const DISPLAY: &[&str] = &[
    "block",
    "inline",
    "inline-block",
    "flex",
    "inline-flex",
    "grid",
    "inline-grid",
    "contents",
    "none",
];
const POSITION: &[&str] = &["static", "relative", "absolute", "fixed", "sticky"];
const FLEX_DIRECTION: &[&str] = &["row", "row-reverse", "column", "column-reverse"];
const FLEX_WRAP: &[&str] = &["nowrap", "wrap", "wrap-reverse"];
const ALIGNMENT: &[&str] = &[
    "normal",
    "stretch",
    "flex-start",
    "flex-end",
    "start",
    "end",
    "center",
    "baseline",
    "space-between",
    "space-around",
    "space-evenly",
];
const OVERFLOW: &[&str] = &["visible", "hidden", "clip", "scroll", "auto"];
const FONT_WEIGHT: &[&str] = &[
    "normal", "bold", "lighter", "bolder", "100", "200", "300", "400", "500", "600", "700", "800",
    "900",
];
const FONT_STYLE: &[&str] = &["normal", "italic", "oblique"];
const TEXT_ALIGN: &[&str] = &["left", "right", "center", "justify", "start", "end"];
const TEXT_TRANSFORM: &[&str] = &["none", "capitalize", "uppercase", "lowercase"];
const TEXT_DECORATION: &[&str] = &["none", "underline", "overline", "line-through"];
const WHITE_SPACE: &[&str] = &["normal", "nowrap", "pre", "pre-wrap", "pre-line", "break-spaces"];
const BORDER_STYLE: &[&str] = &[
    "none", "hidden", "dotted", "dashed", "solid", "double", "groove", "ridge", "inset", "outset",
];
const CURSOR: &[&str] = &[
    "auto",
    "default",
    "pointer",
    "text",
    "move",
    "wait",
    "not-allowed",
    "grab",
    "grabbing",
];
const BOX_SIZING: &[&str] = &["content-box", "border-box"];
const VISIBILITY: &[&str] = &["visible", "hidden", "collapse"];

style_properties! {
    Color => "color": PropertyKind::Color,
    BackgroundColor => "background-color": PropertyKind::Color,
    BorderTopColor => "border-top-color": PropertyKind::Color,
    BorderRightColor => "border-right-color": PropertyKind::Color,
    BorderBottomColor => "border-bottom-color": PropertyKind::Color,
    BorderLeftColor => "border-left-color": PropertyKind::Color,
    OutlineColor => "outline-color": PropertyKind::Color,
    TextDecorationColor => "text-decoration-color": PropertyKind::Color,

    FontFamily => "font-family": PropertyKind::FontFamily,
    FontSize => "font-size": PropertyKind::Length,
    FontWeight => "font-weight": PropertyKind::Keyword(FONT_WEIGHT),
    FontStyle => "font-style": PropertyKind::Keyword(FONT_STYLE),
    LineHeight => "line-height": PropertyKind::LengthOrNumber,
    LetterSpacing => "letter-spacing": PropertyKind::Length,
    TextAlign => "text-align": PropertyKind::Keyword(TEXT_ALIGN),
    TextTransform => "text-transform": PropertyKind::Keyword(TEXT_TRANSFORM),
    TextDecorationLine => "text-decoration-line": PropertyKind::Keyword(TEXT_DECORATION),
    WhiteSpace => "white-space": PropertyKind::Keyword(WHITE_SPACE),

    Width => "width": PropertyKind::Length,
    Height => "height": PropertyKind::Length,
    MinWidth => "min-width": PropertyKind::Length,
    MaxWidth => "max-width": PropertyKind::Length,
    MinHeight => "min-height": PropertyKind::Length,
    MaxHeight => "max-height": PropertyKind::Length,
    MarginTop => "margin-top": PropertyKind::Length,
    MarginRight => "margin-right": PropertyKind::Length,
    MarginBottom => "margin-bottom": PropertyKind::Length,
    MarginLeft => "margin-left": PropertyKind::Length,
    PaddingTop => "padding-top": PropertyKind::Length,
    PaddingRight => "padding-right": PropertyKind::Length,
    PaddingBottom => "padding-bottom": PropertyKind::Length,
    PaddingLeft => "padding-left": PropertyKind::Length,
    Top => "top": PropertyKind::Length,
    Right => "right": PropertyKind::Length,
    Bottom => "bottom": PropertyKind::Length,
    Left => "left": PropertyKind::Length,

    BorderTopWidth => "border-top-width": PropertyKind::Length,
    BorderRightWidth => "border-right-width": PropertyKind::Length,
    BorderBottomWidth => "border-bottom-width": PropertyKind::Length,
    BorderLeftWidth => "border-left-width": PropertyKind::Length,
    BorderTopStyle => "border-top-style": PropertyKind::Keyword(BORDER_STYLE),
    BorderRightStyle => "border-right-style": PropertyKind::Keyword(BORDER_STYLE),
    BorderBottomStyle => "border-bottom-style": PropertyKind::Keyword(BORDER_STYLE),
    BorderLeftStyle => "border-left-style": PropertyKind::Keyword(BORDER_STYLE),
    BorderTopLeftRadius => "border-top-left-radius": PropertyKind::Length,
    BorderTopRightRadius => "border-top-right-radius": PropertyKind::Length,
    BorderBottomLeftRadius => "border-bottom-left-radius": PropertyKind::Length,
    BorderBottomRightRadius => "border-bottom-right-radius": PropertyKind::Length,

    Display => "display": PropertyKind::Keyword(DISPLAY),
    Position => "position": PropertyKind::Keyword(POSITION),
    FlexDirection => "flex-direction": PropertyKind::Keyword(FLEX_DIRECTION),
    FlexWrap => "flex-wrap": PropertyKind::Keyword(FLEX_WRAP),
    FlexGrow => "flex-grow": PropertyKind::Number,
    FlexShrink => "flex-shrink": PropertyKind::Number,
    FlexBasis => "flex-basis": PropertyKind::Length,
    JustifyContent => "justify-content": PropertyKind::Keyword(ALIGNMENT),
    AlignItems => "align-items": PropertyKind::Keyword(ALIGNMENT),
    AlignSelf => "align-self": PropertyKind::Keyword(ALIGNMENT),
    RowGap => "row-gap": PropertyKind::Length,
    ColumnGap => "column-gap": PropertyKind::Length,
    Order => "order": PropertyKind::Integer,
    ZIndex => "z-index": PropertyKind::Integer,
    OverflowX => "overflow-x": PropertyKind::Keyword(OVERFLOW),
    OverflowY => "overflow-y": PropertyKind::Keyword(OVERFLOW),
    BoxSizing => "box-sizing": PropertyKind::Keyword(BOX_SIZING),
    Visibility => "visibility": PropertyKind::Keyword(VISIBILITY),

    Opacity => "opacity": PropertyKind::Alpha,
    Cursor => "cursor": PropertyKind::Keyword(CURSOR),
    BoxShadow => "box-shadow": PropertyKind::Text,
    Transform => "transform": PropertyKind::Text,
    Transition => "transition": PropertyKind::Text,
    Filter => "filter": PropertyKind::Text,
    BackgroundImage => "background-image": PropertyKind::Text,
    GridTemplateColumns => "grid-template-columns": PropertyKind::Text,
    GridTemplateRows => "grid-template-rows": PropertyKind::Text,
}

static PROPERTIES_BY_NAME: Lazy<HashMap<&'static str, StyleProperty>> = Lazy::new(|| {
    StyleProperty::ALL
        .iter()
        .map(|prop| (prop.as_str(), *prop))
        .collect()
});

impl StyleProperty {
    /// Looks up a property by its CSS name.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownProperty`] for names outside the vocabulary.
    pub fn from_name(name: &str) -> Result<StyleProperty> {
        PROPERTIES_BY_NAME
            .get(name)
            .copied()
            .ok_or_else(|| Error::UnknownProperty {
                name: name.to_string(),
            })
    }

    /// Validates a literal property value against this property's kind.
    ///
    /// Variable references are checked by type elsewhere, since the style
    /// store does not see variables; [`PropertyValue::Unset`] is always valid.
    pub fn validate(self, value: &PropertyValue) -> Result<()> {
        let kind = self.kind();
        match value {
            PropertyValue::Value(v) => {
                if !kind.accepts_type(v.variable_type()) {
                    return Err(Error::type_mismatch(kind.describe(), v.variable_type()));
                }
                match v {
                    Value::Number(n) if kind == PropertyKind::Integer && n.fract() != 0.0 => {
                        Err(Error::invalid_value(kind.describe(), v.to_string()))
                    }
                    _ => Ok(()),
                }
            }
            PropertyValue::Keyword(keyword) => {
                if kind.accepts_keyword(keyword) {
                    Ok(())
                } else {
                    Err(Error::invalid_value(kind.describe(), keyword.as_str()))
                }
            }
            PropertyValue::Variable(_) | PropertyValue::Unset => Ok(()),
        }
    }

    /// Parses CSS-like value text for this property.
    ///
    /// ```rust
    /// use stylecascade::{PropertyValue, SizeValue, StyleProperty, Value};
    ///
    /// let width = StyleProperty::Width.parse_value("320px").unwrap();
    /// assert_eq!(width, PropertyValue::Value(Value::Size(SizeValue::px(320.0))));
    /// assert_eq!(StyleProperty::Width.parse_value("unset").unwrap(), PropertyValue::Unset);
    /// assert!(StyleProperty::Display.parse_value("floaty").is_err());
    /// ```
    pub fn parse_value(self, text: &str) -> Result<PropertyValue> {
        let text = text.trim();
        if text == UNSET_KEYWORD {
            return Ok(PropertyValue::Unset);
        }
        let kind = self.kind();
        if kind.accepts_keyword(text) {
            return Ok(PropertyValue::Keyword(text.to_string()));
        }
        let value = match kind {
            PropertyKind::Color => Value::Color(ColorValue::parse(text)?),
            PropertyKind::FontFamily => Value::parse(VariableType::FontFamily, text)?,
            PropertyKind::Keyword(_) | PropertyKind::Text => {
                return Err(Error::invalid_value(kind.describe(), text));
            }
            PropertyKind::Length
            | PropertyKind::Number
            | PropertyKind::Integer
            | PropertyKind::LengthOrNumber
            | PropertyKind::Alpha => Value::parse_any(text)?,
        };
        let value = PropertyValue::Value(value);
        self.validate(&value)
            .map_err(|_| Error::invalid_value(kind.describe(), text))?;
        Ok(value)
    }
}

impl std::fmt::Display for StyleProperty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StyleProperty {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        StyleProperty::from_name(s)
    }
}

impl TryFrom<String> for StyleProperty {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        StyleProperty::from_name(&value)
    }
}

impl From<StyleProperty> for String {
    fn from(value: StyleProperty) -> Self {
        value.as_str().to_string()
    }
}

/// A value stored in a style's property table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PropertyValue {
    Value(Value),
    Keyword(String),
    /// Reference to a variable, substituted during cascade resolution.
    Variable(VariableId),
    /// Explicitly no value; blocks breakpoint fallback.
    Unset,
}

impl From<Value> for PropertyValue {
    fn from(value: Value) -> Self {
        PropertyValue::Value(value)
    }
}

impl From<ColorValue> for PropertyValue {
    fn from(color: ColorValue) -> Self {
        PropertyValue::Value(Value::Color(color))
    }
}

impl From<VariableId> for PropertyValue {
    fn from(variable: VariableId) -> Self {
        PropertyValue::Variable(variable)
    }
}

/// A fully resolved property value, as returned by the cascade.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ComputedValue {
    Value(Value),
    Keyword(String),
    /// A variable resolved to a custom token.
    Custom(CustomValue),
}

impl ComputedValue {
    pub fn as_value(&self) -> Option<&Value> {
        match self {
            ComputedValue::Value(v) => Some(v),
            ComputedValue::Keyword(_) | ComputedValue::Custom(_) => None,
        }
    }
}

impl std::fmt::Display for ComputedValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ComputedValue::Value(v) => write!(f, "{}", v),
            ComputedValue::Keyword(k) => f.write_str(k),
            ComputedValue::Custom(c) => write!(f, "{}", c),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::SizeValue;

    #[test]
    fn test_every_property_is_indexed_by_name() {
        for prop in StyleProperty::ALL {
            assert_eq!(StyleProperty::from_name(prop.as_str()).unwrap(), *prop);
        }
        assert_eq!(PROPERTIES_BY_NAME.len(), StyleProperty::ALL.len());
    }

    #[test]
    fn test_unknown_property() {
        assert!(matches!(
            "colour".parse::<StyleProperty>(),
            Err(Error::UnknownProperty { .. })
        ));
    }

    #[test]
    fn test_parse_color_property() {
        assert_eq!(
            StyleProperty::Color.parse_value("red").unwrap(),
            PropertyValue::from(ColorValue::rgb(255, 0, 0))
        );
        assert!(StyleProperty::Color.parse_value("12px").is_err());
    }

    #[test]
    fn test_parse_length_accepts_auto_and_percentage() {
        assert_eq!(
            StyleProperty::MarginLeft.parse_value("auto").unwrap(),
            PropertyValue::Keyword("auto".to_string())
        );
        assert_eq!(
            StyleProperty::Width.parse_value("50%").unwrap(),
            PropertyValue::Value(Value::Percentage(50.0))
        );
        assert!(StyleProperty::Width.parse_value("3").is_err());
    }

    #[test]
    fn test_parse_line_height_number() {
        assert_eq!(
            StyleProperty::LineHeight.parse_value("1.5").unwrap(),
            PropertyValue::Value(Value::Number(1.5))
        );
    }

    #[test]
    fn test_parse_keyword_property() {
        assert_eq!(
            StyleProperty::FontWeight.parse_value("700").unwrap(),
            PropertyValue::Keyword("700".to_string())
        );
        assert!(matches!(
            StyleProperty::Display.parse_value("table-ish"),
            Err(Error::InvalidValue { .. })
        ));
    }

    #[test]
    fn test_parse_text_property() {
        assert_eq!(
            StyleProperty::Transform.parse_value("rotate(45deg)").unwrap(),
            PropertyValue::Keyword("rotate(45deg)".to_string())
        );
        assert!(StyleProperty::Transform.parse_value("  ").is_err());
    }

    #[test]
    fn test_parse_text_property_rejects_malformed_css() {
        assert_eq!(
            StyleProperty::Transform
                .parse_value("translate(4px, 2px) rotate(3deg)")
                .unwrap(),
            PropertyValue::Keyword("translate(4px, 2px) rotate(3deg)".to_string())
        );
        for text in ["}}} ; banana {", "rotate(45deg", "none; color: red", "blur(2px))"] {
            assert!(
                matches!(
                    StyleProperty::Transform.parse_value(text),
                    Err(Error::InvalidValue { .. })
                ),
                "{text:?} should be rejected"
            );
        }
        assert!(StyleProperty::Filter
            .validate(&PropertyValue::Keyword("{".to_string()))
            .is_err());
    }

    #[test]
    fn test_order_and_z_index_take_integers() {
        assert_eq!(
            StyleProperty::ZIndex.parse_value("2").unwrap(),
            PropertyValue::Value(Value::Number(2.0))
        );
        assert_eq!(
            StyleProperty::Order.parse_value("-1").unwrap(),
            PropertyValue::Value(Value::Number(-1.0))
        );
        assert!(matches!(
            StyleProperty::ZIndex.parse_value("1.5"),
            Err(Error::InvalidValue { .. })
        ));
        assert!(StyleProperty::Order
            .validate(&PropertyValue::Value(Value::Number(0.5)))
            .is_err());
        assert!(PropertyKind::Integer.accepts_type(VariableType::Number));
    }

    #[test]
    fn test_validate_typed_value() {
        let size = PropertyValue::Value(Value::Size(SizeValue::px(4.0)));
        assert!(StyleProperty::PaddingTop.validate(&size).is_ok());
        assert!(matches!(
            StyleProperty::Color.validate(&size),
            Err(Error::TypeMismatch { .. })
        ));
    }

    #[test]
    fn test_kind_accepts_variable_types() {
        assert!(PropertyKind::Length.accepts_type(VariableType::Size));
        assert!(PropertyKind::Alpha.accepts_type(VariableType::Percentage));
        assert!(!PropertyKind::Color.accepts_type(VariableType::Number));
        assert!(!PropertyKind::Keyword(DISPLAY).accepts_type(VariableType::Number));
    }
}
