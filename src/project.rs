//! The project: a variable store and a style store kept consistent.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use tracing::debug;

use crate::axis::StyleAxis;
use crate::cascade::Cascade;
use crate::error::{Error, Result};
use crate::ids::{CollectionId, ModeId, StyleId, VariableId};
use crate::style::{PropertyValue, StyleProperty, StyleStore};
use crate::value::{ResolvedValue, Value, VariableType, VariableValue};
use crate::variable::VariableStore;

/// Owns both stores and enforces the invariants that span them.
///
/// Styles reference variables by id and bind collections to modes. The
/// project checks those references when they are written:
///
/// - a variable bound to a property must exist and have a type the property
///   accepts;
/// - a mode binding must name an existing mode of an existing collection;
///
/// and keeps them valid when variables, modes or collections are removed.
/// Removals that would break a style reference fail with
/// [`Error::NotEmptyOrForced`] unless forced. A forced removal replaces each
/// property reference with the variable's default-mode value and drops mode
/// bindings that select a removed mode.
///
/// Mutations that cannot break a cross-store reference are plain
/// delegations to the owning store.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Project {
    variables: VariableStore,
    styles: StyleStore,
}

impl Project {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn variables(&self) -> &VariableStore {
        &self.variables
    }

    pub fn styles(&self) -> &StyleStore {
        &self.styles
    }

    /// A resolver over the current state.
    pub fn cascade(&self) -> Cascade<'_> {
        Cascade::new(&self.variables, &self.styles)
    }

    // =========================================================================
    // Variables
    // =========================================================================

    pub fn create_collection(&mut self, name: &str) -> Result<CollectionId> {
        self.variables.create_collection(name)
    }

    pub fn create_mode(&mut self, collection: CollectionId, name: &str) -> Result<ModeId> {
        self.variables.create_mode(collection, name)
    }

    pub fn create_variable(
        &mut self,
        collection: CollectionId,
        name: &str,
        ty: VariableType,
        initial: impl Into<VariableValue>,
        overrides: impl IntoIterator<Item = (ModeId, VariableValue)>,
    ) -> Result<VariableId> {
        self.variables
            .create_variable(collection, name, ty, initial, overrides)
    }

    pub fn set_value(
        &mut self,
        variable: VariableId,
        value: impl Into<VariableValue>,
        mode: Option<ModeId>,
    ) -> Result<()> {
        self.variables.set_value(variable, value, mode)
    }

    pub fn clear_value(
        &mut self,
        variable: VariableId,
        mode: ModeId,
    ) -> Result<Option<VariableValue>> {
        self.variables.clear_value(variable, mode)
    }

    pub fn get_value(
        &self,
        variable: VariableId,
        mode: Option<ModeId>,
        resolve_alias: bool,
    ) -> Result<VariableValue> {
        self.variables.get_value(variable, mode, resolve_alias)
    }

    pub fn rename_collection(&mut self, collection: CollectionId, name: &str) -> Result<()> {
        self.variables.rename_collection(collection, name)
    }

    pub fn rename_mode(&mut self, collection: CollectionId, mode: ModeId, name: &str) -> Result<()> {
        self.variables.rename_mode(collection, mode, name)
    }

    pub fn rename_variable(&mut self, variable: VariableId, name: &str) -> Result<()> {
        self.variables.rename_variable(variable, name)
    }

    /// Removes a variable.
    ///
    /// Aliases from other variables and property references from styles both
    /// count as dependents.
    pub fn remove_variable(&mut self, variable: VariableId, force: bool) -> Result<()> {
        let var = self.variables.variable(variable)?;
        let dependents =
            self.variables.dependents(variable).len() + self.styles.variable_references(&[variable]);
        if dependents > 0 && !force {
            return Err(Error::NotEmptyOrForced {
                entity: format!("variable '{}'", var.name()),
                dependents,
            });
        }

        let replacements = self.flatten_plan(&[variable])?;
        self.variables.remove_variable(variable, true)?;
        self.styles.detach_variables(&replacements);
        Ok(())
    }

    /// Removes a non-default mode. Style bindings selecting it count as
    /// dependents; forcing drops them.
    pub fn remove_mode(&mut self, collection: CollectionId, mode: ModeId, force: bool) -> Result<()> {
        let coll = self.variables.collection(collection)?;
        if coll.default_mode() == mode {
            return Err(Error::DefaultMode {
                collection: coll.name().to_string(),
            });
        }
        let dependents = self.styles.mode_bindings(collection, Some(mode));
        if dependents > 0 && !force {
            return Err(Error::NotEmptyOrForced {
                entity: format!("mode '{}' of collection '{}'", mode, coll.name()),
                dependents,
            });
        }

        self.variables.remove_mode(collection, mode)?;
        self.styles.detach_modes(collection, Some(mode));
        Ok(())
    }

    /// Removes a collection.
    ///
    /// Its variables, style references to them, and style bindings for the
    /// collection all count as dependents.
    pub fn remove_collection(&mut self, collection: CollectionId, force: bool) -> Result<()> {
        let coll = self.variables.collection(collection)?;
        let members = coll.variables().to_vec();
        let dependents = members.len()
            + self.styles.variable_references(&members)
            + self.styles.mode_bindings(collection, None);
        if dependents > 0 && !force {
            return Err(Error::NotEmptyOrForced {
                entity: format!("collection '{}'", coll.name()),
                dependents,
            });
        }

        let replacements = self.flatten_plan(&members)?;
        self.variables.remove_collection(collection, true)?;
        self.styles.detach_variables(&replacements);
        self.styles.detach_modes(collection, None);
        debug!(%collection, force, "removed collection from project");
        Ok(())
    }

    // =========================================================================
    // Styles
    // =========================================================================

    pub fn create_style(&mut self, name: &str, parent: Option<StyleId>) -> Result<StyleId> {
        self.styles.create(name, parent)
    }

    pub fn rename_style(&mut self, style: StyleId, name: &str) -> Result<()> {
        self.styles.rename(style, name)
    }

    pub fn remove_style(&mut self, style: StyleId, force: bool) -> Result<()> {
        self.styles.remove(style, force)
    }

    /// Sets a property, checking variable references against the property.
    ///
    /// # Errors
    ///
    /// [`Error::NotFound`] for an unknown variable and [`Error::TypeMismatch`]
    /// when the property does not accept the variable's type, in addition to
    /// the errors of [`StyleStore::set_property`].
    pub fn set_property(
        &mut self,
        style: StyleId,
        prop: StyleProperty,
        value: impl Into<PropertyValue>,
        axis: StyleAxis,
    ) -> Result<()> {
        let value = value.into();
        if let PropertyValue::Variable(id) = &value {
            let ty = self.variables.variable(*id)?.variable_type();
            if !prop.kind().accepts_type(ty) {
                return Err(Error::type_mismatch(prop.kind().describe(), ty));
            }
        }
        self.styles.set_property(style, prop, value, axis)
    }

    pub fn set_property_str(
        &mut self,
        style: StyleId,
        name: &str,
        text: &str,
        axis: StyleAxis,
    ) -> Result<()> {
        self.styles.set_property_str(style, name, text, axis)
    }

    pub fn remove_property(
        &mut self,
        style: StyleId,
        prop: StyleProperty,
        axis: StyleAxis,
    ) -> Result<Option<PropertyValue>> {
        self.styles.remove_property(style, prop, axis)
    }

    pub fn get_property(
        &self,
        style: StyleId,
        prop: StyleProperty,
        axis: StyleAxis,
    ) -> Result<Option<&PropertyValue>> {
        self.styles.get_property(style, prop, axis)
    }

    /// Binds `collection` to `mode` for variables used under `style` at `axis`.
    pub fn set_variable_mode(
        &mut self,
        style: StyleId,
        collection: CollectionId,
        mode: ModeId,
        axis: StyleAxis,
    ) -> Result<()> {
        if !self.variables.collection(collection)?.has_mode(mode) {
            return Err(Error::not_found("mode", mode));
        }
        self.styles.set_variable_mode(style, collection, mode, axis)
    }

    pub fn remove_variable_mode(
        &mut self,
        style: StyleId,
        collection: CollectionId,
        axis: StyleAxis,
    ) -> Result<Option<ModeId>> {
        self.styles.remove_variable_mode(style, collection, axis)
    }

    pub fn get_variable_mode(
        &self,
        style: StyleId,
        collection: CollectionId,
        axis: StyleAxis,
    ) -> Result<Option<ModeId>> {
        self.styles.get_variable_mode(style, collection, axis)
    }

    /// Default-mode values for style references to `removed`.
    ///
    /// Custom tokens have no property representation; those references are
    /// dropped instead.
    fn flatten_plan(&self, removed: &[VariableId]) -> Result<BTreeMap<VariableId, Option<Value>>> {
        let referenced: BTreeSet<VariableId> = removed
            .iter()
            .copied()
            .filter(|id| self.styles.variable_references(&[*id]) > 0)
            .collect();

        let mut plan = BTreeMap::new();
        for id in referenced {
            let flat = match self.variables.resolve(id, None)? {
                ResolvedValue::Value(v) => Some(v),
                ResolvedValue::Custom(_) => None,
            };
            plan.insert(id, flat);
        }
        Ok(plan)
    }
}
