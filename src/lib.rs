//! Design-token variables and multi-axis style resolution.
//!
//! `stylecascade` models the style layer of a visual site builder:
//!
//! - **Variables** are typed design tokens grouped into collections. Each
//!   collection has one or more modes ("Light"/"Dark", "Compact"/"Roomy"),
//!   and a variable holds a value per mode or an alias to another variable.
//! - **Styles** are named classes. A combo class applies on top of exactly one
//!   parent class. Every style keeps a property table keyed by responsive
//!   [`Breakpoint`] and interaction [`PseudoState`].
//! - The [`Cascade`] resolves what a chain of styles actually produces at a
//!   given breakpoint and pseudo-state, substituting variables in the modes
//!   the styles bind.
//!
//! ## Quick Start
//!
//! ```rust
//! use stylecascade::{
//!     Breakpoint, ColorValue, Project, PseudoState, StyleAxis, StyleProperty, VariableType,
//!     VariableValue,
//! };
//!
//! let mut project = Project::new();
//! let theme = project.create_collection("Theme").unwrap();
//! let dark = project.create_mode(theme, "Dark").unwrap();
//! let bg = project
//!     .create_variable(
//!         theme,
//!         "bg",
//!         VariableType::Color,
//!         ColorValue::rgb(255, 255, 255),
//!         [(dark, VariableValue::from(ColorValue::rgb(0, 0, 0)))],
//!     )
//!     .unwrap();
//!
//! let panel = project.create_style("panel", None).unwrap();
//! project
//!     .set_property(panel, StyleProperty::BackgroundColor, bg, StyleAxis::default())
//!     .unwrap();
//! project
//!     .set_variable_mode(panel, theme, dark, StyleAxis::default())
//!     .unwrap();
//!
//! // No hover block: the hover state falls back to the normal state.
//! let props = project
//!     .cascade()
//!     .resolve_properties(&[panel], Breakpoint::Main, PseudoState::Hover)
//!     .unwrap();
//! assert_eq!(props[&StyleProperty::BackgroundColor].to_string(), "#000000");
//! ```
//!
//! ## Modules
//!
//! - [`axis`]: breakpoints, pseudo-states and the cascade walk
//! - [`value`]: variable types and concrete values, parsed from CSS-like text
//! - [`variable`]: collections, modes, variables and alias resolution
//! - [`style`]: the property vocabulary, styles and the style store
//! - [`cascade`]: multi-axis property resolution
//! - [`project`]: both stores with their cross-references kept valid
//! - [`shared`]: snapshot reads and serialized writes across threads
//! - [`events`]: change notifications for the surrounding application
//! - [`element`]: binding styles to host elements
//! - [`document`]: YAML seed documents
//!
//! ## Logging
//!
//! Mutations emit `tracing` events at `debug` level and resolution walks at
//! `trace` level. The crate never installs a subscriber.

pub mod axis;
pub mod cascade;
pub mod document;
pub mod element;
mod error;
pub mod events;
mod ids;
pub mod project;
pub mod shared;
pub mod style;
pub mod value;
pub mod variable;

pub use axis::{Breakpoint, PseudoState, StyleAxis};
pub use cascade::{Cascade, PropertyMap};
pub use document::Document;
pub use element::{resolve_element, ElementStyleAssignment, ResolvedElement};
pub use error::{Error, Result};
pub use events::{ChangeEvent, EventBus, SubscriptionId, Topic};
pub use ids::{CollectionId, ModeId, StyleId, VariableId};
pub use project::Project;
pub use shared::{SharedProject, Snapshot};
pub use style::{
    ComputedValue, PropertyBlock, PropertyKind, PropertyValue, Style, StyleProperty, StyleStore,
};
pub use value::{
    ColorValue, CustomValue, ResolvedValue, SizeUnit, SizeValue, Value, VariableType,
    VariableValue,
};
pub use variable::{AliasResolver, Mode, Variable, VariableCollection, VariableStore};
