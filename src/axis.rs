//! Responsive breakpoints and interaction pseudo-states.
//!
//! These are the two axes a style's property table is keyed on. Both domains
//! are closed: parsing any other token fails with
//! [`Error::InvalidAxisValue`](crate::Error::InvalidAxisValue).
//!
//! # Breakpoint cascade
//!
//! Breakpoints are ordered from widest to narrowest:
//!
//! | Breakpoint | Side of `main` |
//! |------------|----------------|
//! | `xxl`, `xl`, `large` | wider |
//! | `main` | anchor |
//! | `medium`, `small`, `tiny` | narrower |
//!
//! A value set at a breakpoint applies to every breakpoint further from
//! `main` on the same side until overridden. See [`Breakpoint::cascade`].

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::Error;

/// One of the seven fixed responsive-width tiers.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Breakpoint {
    Xxl,
    Xl,
    Large,
    #[default]
    Main,
    Medium,
    Small,
    Tiny,
}

impl Breakpoint {
    /// All breakpoints, widest first.
    pub const ALL: [Breakpoint; 7] = [
        Breakpoint::Xxl,
        Breakpoint::Xl,
        Breakpoint::Large,
        Breakpoint::Main,
        Breakpoint::Medium,
        Breakpoint::Small,
        Breakpoint::Tiny,
    ];

    const MAIN_INDEX: usize = 3;

    fn index(self) -> usize {
        self as usize
    }

    /// Returns the breakpoints consulted when resolving at `self`, in order.
    ///
    /// The walk starts at `self` and moves toward `main`, inclusive:
    ///
    /// ```rust
    /// use stylecascade::Breakpoint;
    ///
    /// let walk: Vec<_> = Breakpoint::Small.cascade().collect();
    /// assert_eq!(walk, [Breakpoint::Small, Breakpoint::Medium, Breakpoint::Main]);
    ///
    /// let walk: Vec<_> = Breakpoint::Xl.cascade().collect();
    /// assert_eq!(walk, [Breakpoint::Xl, Breakpoint::Large, Breakpoint::Main]);
    /// ```
    pub fn cascade(self) -> impl Iterator<Item = Breakpoint> {
        let start = self.index();
        let indices: Vec<usize> = if start <= Self::MAIN_INDEX {
            (start..=Self::MAIN_INDEX).collect()
        } else {
            (Self::MAIN_INDEX..=start).rev().collect()
        };
        indices.into_iter().map(|i| Self::ALL[i])
    }

    /// Returns true if this breakpoint is wider than `main`.
    pub fn is_wider_than_main(self) -> bool {
        self.index() < Self::MAIN_INDEX
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Breakpoint::Xxl => "xxl",
            Breakpoint::Xl => "xl",
            Breakpoint::Large => "large",
            Breakpoint::Main => "main",
            Breakpoint::Medium => "medium",
            Breakpoint::Small => "small",
            Breakpoint::Tiny => "tiny",
        }
    }
}

impl std::fmt::Display for Breakpoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Breakpoint {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|bp| bp.as_str() == s)
            .ok_or_else(|| Error::InvalidAxisValue {
                axis: "breakpoint",
                value: s.to_string(),
            })
    }
}

/// An interaction state, or the implicit normal state [`PseudoState::None`].
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(try_from = "String", into = "String")]
pub enum PseudoState {
    #[default]
    None,
    Hover,
    Active,
    Pressed,
    Visited,
    Focus,
    FocusVisible,
    FocusWithin,
    Placeholder,
    Empty,
    FirstChild,
    LastChild,
    NthChildOdd,
    NthChildEven,
    Before,
    After,
}

impl PseudoState {
    pub const ALL: [PseudoState; 16] = [
        PseudoState::None,
        PseudoState::Hover,
        PseudoState::Active,
        PseudoState::Pressed,
        PseudoState::Visited,
        PseudoState::Focus,
        PseudoState::FocusVisible,
        PseudoState::FocusWithin,
        PseudoState::Placeholder,
        PseudoState::Empty,
        PseudoState::FirstChild,
        PseudoState::LastChild,
        PseudoState::NthChildOdd,
        PseudoState::NthChildEven,
        PseudoState::Before,
        PseudoState::After,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            PseudoState::None => "none",
            PseudoState::Hover => "hover",
            PseudoState::Active => "active",
            PseudoState::Pressed => "pressed",
            PseudoState::Visited => "visited",
            PseudoState::Focus => "focus",
            PseudoState::FocusVisible => "focus-visible",
            PseudoState::FocusWithin => "focus-within",
            PseudoState::Placeholder => "placeholder",
            PseudoState::Empty => "empty",
            PseudoState::FirstChild => "first-child",
            PseudoState::LastChild => "last-child",
            PseudoState::NthChildOdd => "nth-child(odd)",
            PseudoState::NthChildEven => "nth-child(even)",
            PseudoState::Before => "before",
            PseudoState::After => "after",
        }
    }

    /// Returns true for the implicit normal state.
    pub fn is_none(self) -> bool {
        self == PseudoState::None
    }
}

impl std::fmt::Display for PseudoState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PseudoState {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // "noPseudo" is the host API's spelling of the normal state.
        if s == "noPseudo" {
            return Ok(PseudoState::None);
        }
        Self::ALL
            .into_iter()
            .find(|p| p.as_str() == s)
            .ok_or_else(|| Error::InvalidAxisValue {
                axis: "pseudo-state",
                value: s.to_string(),
            })
    }
}

impl TryFrom<String> for PseudoState {
    type Error = Error;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<PseudoState> for String {
    fn from(value: PseudoState) -> Self {
        value.as_str().to_string()
    }
}

/// A `(breakpoint, pseudo-state)` key into a style's property table.
///
/// Serializes as `"breakpoint:pseudo"`, e.g. `"small:hover"`, so it can key
/// maps in any format.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(try_from = "String", into = "String")]
pub struct StyleAxis {
    pub breakpoint: Breakpoint,
    pub pseudo: PseudoState,
}

impl StyleAxis {
    pub fn new(breakpoint: Breakpoint, pseudo: PseudoState) -> Self {
        Self { breakpoint, pseudo }
    }

    /// The axis at `breakpoint` in the normal state.
    pub fn at(breakpoint: Breakpoint) -> Self {
        Self::new(breakpoint, PseudoState::None)
    }

    /// Parses both axis tokens.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidAxisValue`] if either token is unknown.
    pub fn parse(breakpoint: &str, pseudo: &str) -> Result<Self, Error> {
        Ok(Self::new(breakpoint.parse()?, pseudo.parse()?))
    }
}

impl std::fmt::Display for StyleAxis {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.breakpoint, self.pseudo)
    }
}

impl FromStr for StyleAxis {
    type Err = Error;

    /// Parses `"breakpoint:pseudo"`; a bare breakpoint means the normal state.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.split_once(':') {
            Some((breakpoint, pseudo)) => Self::parse(breakpoint, pseudo),
            None => Ok(Self::at(s.parse()?)),
        }
    }
}

impl TryFrom<String> for StyleAxis {
    type Error = Error;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<StyleAxis> for String {
    fn from(value: StyleAxis) -> Self {
        value.to_string()
    }
}
