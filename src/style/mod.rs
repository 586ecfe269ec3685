//! Styles: classes, combo classes and their per-axis property tables.
//!
//! This module provides:
//!
//! - [`StyleProperty`]: the closed vocabulary of style properties
//! - [`Style`] and [`PropertyBlock`]: a style and what it sets at one axis pair
//! - [`StyleStore`]: the registry all styles live in
//!
//! A style is either a plain class or a combo class (a class with a
//! `parent`). Combo classes apply on top of their parent and cannot
//! themselves be parents.

mod property;
mod store;
#[allow(clippy::module_inception)]
mod style;

pub use property::{
    ComputedValue, PropertyKind, PropertyValue, StyleProperty, UNSET_KEYWORD,
};
pub use store::StyleStore;
pub use style::{PropertyBlock, Style};
