//! The style store: classes, combo classes and their property tables.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::debug;

use super::property::{PropertyValue, StyleProperty};
use super::style::Style;
use crate::axis::StyleAxis;
use crate::error::{Error, Result};
use crate::ids::{CollectionId, IdGen, ModeId, StyleId, VariableId};
use crate::value::Value;

/// Registry of named styles.
///
/// The store validates property names and literal values against the
/// closed vocabulary. It does not see variables: type-checking variable
/// references and keeping mode bindings valid is done by
/// [`Project`](crate::Project), which owns both stores.
///
/// # Example
///
/// ```rust
/// use stylecascade::{StyleAxis, StyleProperty, StyleStore};
///
/// let mut styles = StyleStore::new();
/// let button = styles.create("button", None).unwrap();
/// let primary = styles.create("primary", Some(button)).unwrap();
///
/// styles
///     .set_property_str(primary, "background-color", "#0af", StyleAxis::default())
///     .unwrap();
/// assert!(styles
///     .get_property(primary, StyleProperty::BackgroundColor, StyleAxis::default())
///     .unwrap()
///     .is_some());
///
/// // Combo classes cannot be parents themselves.
/// assert!(styles.create("primary-large", Some(primary)).is_err());
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StyleStore {
    pub(crate) ids: IdGen,
    pub(crate) styles: BTreeMap<StyleId, Style>,
}

impl StyleStore {
    pub fn new() -> Self {
        Self::default()
    }

    // =========================================================================
    // Lookups
    // =========================================================================

    pub fn style(&self, id: StyleId) -> Result<&Style> {
        self.styles
            .get(&id)
            .ok_or_else(|| Error::not_found("style", id))
    }

    pub fn style_by_name(&self, name: &str) -> Option<&Style> {
        self.styles.values().find(|s| s.name == name)
    }

    /// Styles in creation order.
    pub fn styles(&self) -> impl Iterator<Item = &Style> {
        self.styles.values()
    }

    /// Combo classes whose parent is `style`.
    pub fn combo_children(&self, style: StyleId) -> Vec<StyleId> {
        self.styles
            .values()
            .filter(|s| s.parent == Some(style))
            .map(|s| s.id)
            .collect()
    }

    pub fn len(&self) -> usize {
        self.styles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.styles.is_empty()
    }

    // =========================================================================
    // Lifecycle
    // =========================================================================

    /// Creates a style; with a `parent` it is a combo class of that parent.
    ///
    /// # Errors
    ///
    /// - [`Error::DuplicateName`] if the name is taken.
    /// - [`Error::NotFound`] if the parent does not exist.
    /// - [`Error::NestedComboNotSupported`] if the parent is a combo class.
    pub fn create(&mut self, name: &str, parent: Option<StyleId>) -> Result<StyleId> {
        self.ensure_name_free(name)?;
        if let Some(parent) = parent {
            let parent_style = self.style(parent)?;
            if parent_style.is_combo() {
                return Err(Error::NestedComboNotSupported {
                    parent: parent_style.name.clone(),
                });
            }
        }

        let id = self.ids.style();
        self.styles.insert(id, Style::new(id, name, parent));
        debug!(style = %id, name, parent = ?parent, "created style");
        Ok(id)
    }

    pub fn rename(&mut self, style: StyleId, name: &str) -> Result<()> {
        let current = self.style(style)?;
        if current.name != name {
            self.ensure_name_free(name)?;
        }
        if let Some(s) = self.styles.get_mut(&style) {
            s.name = name.to_string();
        }
        debug!(%style, name, "renamed style");
        Ok(())
    }

    /// Removes a style and its property table.
    ///
    /// A style with combo children is only removed when `force` is set; the
    /// children are then detached into standalone classes, never deleted.
    pub fn remove(&mut self, style: StyleId, force: bool) -> Result<()> {
        let target = self.style(style)?;
        let children = self.combo_children(style);
        if !children.is_empty() && !force {
            return Err(Error::NotEmptyOrForced {
                entity: format!("style '{}'", target.name),
                dependents: children.len(),
            });
        }

        for child in &children {
            if let Some(s) = self.styles.get_mut(child) {
                s.parent = None;
            }
        }
        self.styles.remove(&style);
        debug!(%style, detached = children.len(), "removed style");
        Ok(())
    }

    // =========================================================================
    // Properties
    // =========================================================================

    /// Sets `prop` at exactly `axis`.
    ///
    /// # Errors
    ///
    /// [`Error::TypeMismatch`] or [`Error::InvalidValue`] if the value is not
    /// accepted by the property.
    pub fn set_property(
        &mut self,
        style: StyleId,
        prop: StyleProperty,
        value: impl Into<PropertyValue>,
        axis: StyleAxis,
    ) -> Result<()> {
        let value = value.into();
        self.style(style)?;
        prop.validate(&value)?;

        if let Some(s) = self.styles.get_mut(&style) {
            s.edit_block(axis, |block| block.properties.insert(prop, value));
        }
        debug!(%style, property = %prop, %axis, "set property");
        Ok(())
    }

    /// Parses a property name and CSS-like value text, then sets it.
    ///
    /// # Errors
    ///
    /// [`Error::UnknownProperty`] for names outside the vocabulary and
    /// [`Error::InvalidValue`] for unparseable values.
    pub fn set_property_str(
        &mut self,
        style: StyleId,
        name: &str,
        text: &str,
        axis: StyleAxis,
    ) -> Result<()> {
        let prop = StyleProperty::from_name(name)?;
        let value = prop.parse_value(text)?;
        self.set_property(style, prop, value, axis)
    }

    /// Removes `prop` at exactly `axis`, returning the previous value.
    pub fn remove_property(
        &mut self,
        style: StyleId,
        prop: StyleProperty,
        axis: StyleAxis,
    ) -> Result<Option<PropertyValue>> {
        self.style(style)?;
        let previous = self
            .styles
            .get_mut(&style)
            .and_then(|s| s.edit_block(axis, |block| block.properties.remove(&prop)));
        debug!(%style, property = %prop, %axis, "removed property");
        Ok(previous)
    }

    /// The value set at exactly `axis`; `None` means not set there.
    ///
    /// For the effective value use [`Cascade::resolve_property`](crate::Cascade::resolve_property).
    pub fn get_property(
        &self,
        style: StyleId,
        prop: StyleProperty,
        axis: StyleAxis,
    ) -> Result<Option<&PropertyValue>> {
        Ok(self.style(style)?.property(prop, axis))
    }

    // =========================================================================
    // Variable modes
    // =========================================================================

    pub fn set_variable_mode(
        &mut self,
        style: StyleId,
        collection: CollectionId,
        mode: ModeId,
        axis: StyleAxis,
    ) -> Result<()> {
        self.style(style)?;
        if let Some(s) = self.styles.get_mut(&style) {
            s.edit_block(axis, |block| block.modes.insert(collection, mode));
        }
        debug!(%style, %collection, %mode, %axis, "set variable mode");
        Ok(())
    }

    pub fn remove_variable_mode(
        &mut self,
        style: StyleId,
        collection: CollectionId,
        axis: StyleAxis,
    ) -> Result<Option<ModeId>> {
        self.style(style)?;
        let previous = self
            .styles
            .get_mut(&style)
            .and_then(|s| s.edit_block(axis, |block| block.modes.remove(&collection)));
        debug!(%style, %collection, %axis, "removed variable mode");
        Ok(previous)
    }

    pub fn get_variable_mode(
        &self,
        style: StyleId,
        collection: CollectionId,
        axis: StyleAxis,
    ) -> Result<Option<ModeId>> {
        Ok(self.style(style)?.variable_mode(collection, axis))
    }

    // =========================================================================
    // References into the variable store
    // =========================================================================

    /// Counts property entries that reference any variable in `variables`.
    pub fn variable_references(&self, variables: &[VariableId]) -> usize {
        self.styles
            .values()
            .flat_map(|s| s.table.values())
            .flat_map(|block| block.properties.values())
            .filter(|value| matches!(value, PropertyValue::Variable(v) if variables.contains(v)))
            .count()
    }

    /// Counts mode bindings for `collection`, or only those selecting `mode`.
    pub fn mode_bindings(&self, collection: CollectionId, mode: Option<ModeId>) -> usize {
        self.styles
            .values()
            .flat_map(|s| s.table.values())
            .filter_map(|block| block.modes.get(&collection))
            .filter(|bound| mode.map_or(true, |m| **bound == m))
            .count()
    }

    /// Replaces references to the variables in `replacements`.
    ///
    /// A reference whose replacement is `None` is removed.
    pub(crate) fn detach_variables(&mut self, replacements: &BTreeMap<VariableId, Option<Value>>) {
        for style in self.styles.values_mut() {
            style.edit_blocks(|block| {
                block.properties.retain(|_, value| match value {
                    PropertyValue::Variable(v) => match replacements.get(v) {
                        Some(Some(flat)) => {
                            *value = PropertyValue::Value(flat.clone());
                            true
                        }
                        Some(None) => false,
                        None => true,
                    },
                    _ => true,
                });
            });
        }
    }

    /// Removes mode bindings for `collection`, or only those selecting `mode`.
    pub(crate) fn detach_modes(&mut self, collection: CollectionId, mode: Option<ModeId>) {
        for style in self.styles.values_mut() {
            style.edit_blocks(|block| {
                if let Some(bound) = block.modes.get(&collection) {
                    if mode.map_or(true, |m| *bound == m) {
                        block.modes.remove(&collection);
                    }
                }
            });
        }
    }

    fn ensure_name_free(&self, name: &str) -> Result<()> {
        if self.style_by_name(name).is_some() {
            return Err(Error::DuplicateName {
                kind: "style",
                name: name.to_string(),
            });
        }
        Ok(())
    }
}
