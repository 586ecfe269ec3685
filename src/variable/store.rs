//! The variable store: collections, modes and typed variables.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use tracing::debug;

use super::collection::{Mode, Variable, VariableCollection};
use super::resolve::AliasResolver;
use crate::error::{Error, Result};
use crate::ids::{CollectionId, IdGen, ModeId, VariableId};
use crate::value::{ResolvedValue, VariableType, VariableValue};

/// Name given to the mode every collection is created with.
pub const DEFAULT_MODE_NAME: &str = "Default";

/// Registry of variable collections, their modes and their variables.
///
/// Every mutation validates its input completely before writing, so a
/// failed call leaves the store exactly as it was.
///
/// # Example
///
/// ```rust
/// use stylecascade::{ColorValue, VariableStore, VariableType, VariableValue};
///
/// let mut store = VariableStore::new();
/// let theme = store.create_collection("Theme").unwrap();
/// let dark = store.create_mode(theme, "Dark").unwrap();
/// let bg = store
///     .create_variable(theme, "bg", VariableType::Color, ColorValue::rgb(255, 255, 255), [])
///     .unwrap();
/// store.set_value(bg, ColorValue::rgb(0, 0, 0), Some(dark)).unwrap();
///
/// let value = store.get_value(bg, Some(dark), false).unwrap();
/// assert_eq!(value, VariableValue::from(ColorValue::rgb(0, 0, 0)));
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VariableStore {
    pub(crate) ids: IdGen,
    pub(crate) collections: BTreeMap<CollectionId, VariableCollection>,
    pub(crate) variables: BTreeMap<VariableId, Variable>,
}

impl VariableStore {
    pub fn new() -> Self {
        Self::default()
    }

    // =========================================================================
    // Lookups
    // =========================================================================

    pub fn collection(&self, id: CollectionId) -> Result<&VariableCollection> {
        self.collections
            .get(&id)
            .ok_or_else(|| Error::not_found("collection", id))
    }

    pub fn collection_by_name(&self, name: &str) -> Option<&VariableCollection> {
        self.collections.values().find(|c| c.name == name)
    }

    /// Collections in creation order.
    pub fn collections(&self) -> impl Iterator<Item = &VariableCollection> {
        self.collections.values()
    }

    pub fn default_mode(&self, collection: CollectionId) -> Result<ModeId> {
        Ok(self.collection(collection)?.default_mode())
    }

    pub fn variable(&self, id: VariableId) -> Result<&Variable> {
        self.variables
            .get(&id)
            .ok_or_else(|| Error::not_found("variable", id))
    }

    pub fn variable_by_name(&self, collection: CollectionId, name: &str) -> Option<&Variable> {
        self.variables
            .values()
            .find(|v| v.collection == collection && v.name == name)
    }

    /// Variables of `collection` in creation order.
    pub fn variables_in(&self, collection: CollectionId) -> Result<Vec<&Variable>> {
        self.collection(collection)?
            .variables
            .iter()
            .map(|id| self.variable(*id))
            .collect()
    }

    /// Variables that alias `variable` in at least one mode.
    pub fn dependents(&self, variable: VariableId) -> Vec<VariableId> {
        self.variables
            .values()
            .filter(|v| v.alias_targets().any(|target| target == variable))
            .map(|v| v.id)
            .collect()
    }

    // =========================================================================
    // Creation
    // =========================================================================

    /// Creates a collection with a single default mode named [`DEFAULT_MODE_NAME`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::DuplicateName`] if a collection with this name exists.
    pub fn create_collection(&mut self, name: &str) -> Result<CollectionId> {
        self.ensure_collection_name_free(name)?;

        let id = self.ids.collection();
        let default_mode = Mode {
            id: self.ids.mode(),
            name: DEFAULT_MODE_NAME.to_string(),
        };
        self.collections.insert(
            id,
            VariableCollection {
                id,
                name: name.to_string(),
                modes: vec![default_mode],
                variables: Vec::new(),
            },
        );
        debug!(%id, name, "created collection");
        Ok(id)
    }

    /// Adds a mode to `collection`.
    pub fn create_mode(&mut self, collection: CollectionId, name: &str) -> Result<ModeId> {
        let coll = self.collection(collection)?;
        if coll.mode_by_name(name).is_some() {
            return Err(Error::DuplicateName {
                kind: "mode",
                name: name.to_string(),
            });
        }

        let id = self.ids.mode();
        if let Some(coll) = self.collections.get_mut(&collection) {
            coll.modes.push(Mode {
                id,
                name: name.to_string(),
            });
        }
        debug!(%collection, %id, name, "created mode");
        Ok(id)
    }

    /// Creates a variable of type `ty` in `collection`.
    ///
    /// `initial` becomes the default-mode entry; `overrides` set entries for
    /// other modes of the collection.
    ///
    /// # Errors
    ///
    /// - [`Error::DuplicateName`] if the name is taken in this collection.
    /// - [`Error::TypeMismatch`] if any entry disagrees with `ty`.
    /// - [`Error::NotFound`] for an unknown collection, mode or alias target.
    pub fn create_variable(
        &mut self,
        collection: CollectionId,
        name: &str,
        ty: VariableType,
        initial: impl Into<VariableValue>,
        overrides: impl IntoIterator<Item = (ModeId, VariableValue)>,
    ) -> Result<VariableId> {
        let coll = self.collection(collection)?;
        if self.variable_by_name(collection, name).is_some() {
            return Err(Error::DuplicateName {
                kind: "variable",
                name: name.to_string(),
            });
        }
        let default_mode = coll.default_mode();

        let initial = initial.into();
        self.check_entry(ty, &initial, None)?;
        let mut entries = BTreeMap::new();
        for (mode, value) in overrides {
            if !coll.has_mode(mode) {
                return Err(Error::not_found("mode", mode));
            }
            self.check_entry(ty, &value, None)?;
            entries.insert(mode, value);
        }

        let (default, overrides) = match entries.remove(&default_mode) {
            Some(explicit_default) => (explicit_default, entries),
            None => (initial, entries),
        };

        let id = self.ids.variable();
        self.variables.insert(
            id,
            Variable {
                id,
                collection,
                name: name.to_string(),
                ty,
                default_mode,
                default,
                overrides,
            },
        );
        if let Some(coll) = self.collections.get_mut(&collection) {
            coll.variables.push(id);
        }
        debug!(%collection, %id, name, %ty, "created variable");
        Ok(id)
    }

    // =========================================================================
    // Values
    // =========================================================================

    /// Sets the entry of `variable` for `mode` (`None` for the default mode).
    ///
    /// # Errors
    ///
    /// - [`Error::TypeMismatch`] if the value, or the alias target, has a
    ///   different type than the variable.
    /// - [`Error::AliasCycle`] if the alias would make the variable reach
    ///   itself.
    /// - [`Error::NotFound`] for an unknown variable, mode or alias target.
    pub fn set_value(
        &mut self,
        variable: VariableId,
        value: impl Into<VariableValue>,
        mode: Option<ModeId>,
    ) -> Result<()> {
        let value = value.into();
        let mode = self.mode_of(variable, mode)?;
        let ty = self.variable(variable)?.ty;
        self.check_entry(ty, &value, Some(variable))?;

        if let Some(var) = self.variables.get_mut(&variable) {
            var.set(mode, value);
        }
        debug!(%variable, %mode, "set variable value");
        Ok(())
    }

    /// Unsets the entry for a non-default mode so it inherits the default.
    ///
    /// Returns the previous entry, if there was one.
    pub fn clear_value(
        &mut self,
        variable: VariableId,
        mode: ModeId,
    ) -> Result<Option<VariableValue>> {
        let var = self.variable(variable)?;
        let coll = self.collection(var.collection)?;
        if !coll.has_mode(mode) {
            return Err(Error::not_found("mode", mode));
        }
        if mode == var.default_mode {
            return Err(Error::DefaultMode {
                collection: coll.name.clone(),
            });
        }
        let previous = self
            .variables
            .get_mut(&variable)
            .and_then(|var| var.overrides.remove(&mode));
        debug!(%variable, %mode, "cleared variable value");
        Ok(previous)
    }

    /// Reads the entry of `variable` for `mode` (`None` for the default mode).
    ///
    /// With `resolve_alias = false` the raw entry is returned, one hop only:
    /// an alias comes back as [`VariableValue::Alias`]. An unset mode yields
    /// the default entry. With `resolve_alias = true` the chain is followed by
    /// the [`AliasResolver`].
    pub fn get_value(
        &self,
        variable: VariableId,
        mode: Option<ModeId>,
        resolve_alias: bool,
    ) -> Result<VariableValue> {
        let mode = self.mode_of(variable, mode)?;
        if resolve_alias {
            AliasResolver::new(self)
                .follow(variable, mode)
                .map(VariableValue::from)
        } else {
            Ok(self.variable(variable)?.value_for(mode).clone())
        }
    }

    /// Resolves `variable` to a concrete value or custom token.
    pub fn resolve(&self, variable: VariableId, mode: Option<ModeId>) -> Result<ResolvedValue> {
        let mode = self.mode_of(variable, mode)?;
        AliasResolver::new(self).follow(variable, mode)
    }

    // =========================================================================
    // Renaming
    // =========================================================================

    pub fn rename_collection(&mut self, collection: CollectionId, name: &str) -> Result<()> {
        let current = self.collection(collection)?;
        if current.name != name {
            self.ensure_collection_name_free(name)?;
        }
        if let Some(coll) = self.collections.get_mut(&collection) {
            coll.name = name.to_string();
        }
        debug!(%collection, name, "renamed collection");
        Ok(())
    }

    pub fn rename_mode(
        &mut self,
        collection: CollectionId,
        mode: ModeId,
        name: &str,
    ) -> Result<()> {
        let coll = self.collection(collection)?;
        if !coll.has_mode(mode) {
            return Err(Error::not_found("mode", mode));
        }
        if coll.modes.iter().any(|m| m.name == name && m.id != mode) {
            return Err(Error::DuplicateName {
                kind: "mode",
                name: name.to_string(),
            });
        }
        if let Some(m) = self
            .collections
            .get_mut(&collection)
            .and_then(|coll| coll.modes.iter_mut().find(|m| m.id == mode))
        {
            m.name = name.to_string();
        }
        debug!(%collection, %mode, name, "renamed mode");
        Ok(())
    }

    pub fn rename_variable(&mut self, variable: VariableId, name: &str) -> Result<()> {
        let var = self.variable(variable)?;
        if let Some(existing) = self.variable_by_name(var.collection, name) {
            if existing.id != variable {
                return Err(Error::DuplicateName {
                    kind: "variable",
                    name: name.to_string(),
                });
            }
        }
        if let Some(var) = self.variables.get_mut(&variable) {
            var.name = name.to_string();
        }
        debug!(%variable, name, "renamed variable");
        Ok(())
    }

    // =========================================================================
    // Removal
    // =========================================================================

    /// Removes a variable.
    ///
    /// If other variables alias it, removal fails with
    /// [`Error::NotEmptyOrForced`] unless `force` is set. A forced removal
    /// detaches each dependent entry by replacing the alias with the value the
    /// removed variable resolved to in that mode.
    pub fn remove_variable(&mut self, variable: VariableId, force: bool) -> Result<()> {
        let var = self.variable(variable)?;
        let removed = BTreeSet::from([variable]);
        let detached = self.detach_plan(&removed)?;
        if !detached.is_empty() && !force {
            return Err(Error::NotEmptyOrForced {
                entity: format!("variable '{}'", var.name),
                dependents: self.dependents(variable).len(),
            });
        }

        self.apply_detach(detached);
        self.drop_variables(&removed);
        debug!(%variable, force, "removed variable");
        Ok(())
    }

    /// Removes a non-default mode and every variable entry set for it.
    pub fn remove_mode(&mut self, collection: CollectionId, mode: ModeId) -> Result<()> {
        let coll = self.collection(collection)?;
        if !coll.has_mode(mode) {
            return Err(Error::not_found("mode", mode));
        }
        if coll.default_mode() == mode {
            return Err(Error::DefaultMode {
                collection: coll.name.clone(),
            });
        }

        let members = coll.variables.clone();
        if let Some(coll) = self.collections.get_mut(&collection) {
            coll.modes.retain(|m| m.id != mode);
        }
        for id in members {
            if let Some(var) = self.variables.get_mut(&id) {
                var.overrides.remove(&mode);
            }
        }
        debug!(%collection, %mode, "removed mode");
        Ok(())
    }

    /// Removes a collection with its modes and variables.
    ///
    /// A collection that still holds variables is only removed when `force`
    /// is set; aliases into it from other collections are then detached as in
    /// [`remove_variable`](Self::remove_variable).
    pub fn remove_collection(&mut self, collection: CollectionId, force: bool) -> Result<()> {
        let coll = self.collection(collection)?;
        if !coll.is_empty() && !force {
            return Err(Error::NotEmptyOrForced {
                entity: format!("collection '{}'", coll.name),
                dependents: coll.variables.len(),
            });
        }

        let removed: BTreeSet<VariableId> = coll.variables.iter().copied().collect();
        let detached = self.detach_plan(&removed)?;
        self.apply_detach(detached);
        self.drop_variables(&removed);
        self.collections.remove(&collection);
        debug!(%collection, variables = removed.len(), "removed collection");
        Ok(())
    }

    // =========================================================================
    // Internals
    // =========================================================================

    fn ensure_collection_name_free(&self, name: &str) -> Result<()> {
        if self.collection_by_name(name).is_some() {
            return Err(Error::DuplicateName {
                kind: "collection",
                name: name.to_string(),
            });
        }
        Ok(())
    }

    /// Maps an optional mode to a concrete mode of the variable's collection.
    pub(crate) fn mode_of(&self, variable: VariableId, mode: Option<ModeId>) -> Result<ModeId> {
        let var = self.variable(variable)?;
        match mode {
            None => Ok(var.default_mode),
            Some(mode) => {
                if self.collection(var.collection)?.has_mode(mode) {
                    Ok(mode)
                } else {
                    Err(Error::not_found("mode", mode))
                }
            }
        }
    }

    /// Validates an entry for a variable of type `ty`.
    ///
    /// `owner` is the variable receiving the entry; new variables cannot be
    /// part of a cycle yet.
    fn check_entry(
        &self,
        ty: VariableType,
        value: &VariableValue,
        owner: Option<VariableId>,
    ) -> Result<()> {
        match value {
            VariableValue::Value(v) => {
                if v.variable_type() != ty {
                    return Err(Error::type_mismatch(ty, v.variable_type()));
                }
            }
            VariableValue::Alias(target) => {
                let target_var = self.variable(*target)?;
                if target_var.ty != ty {
                    return Err(Error::type_mismatch(ty, target_var.ty));
                }
                if let Some(owner) = owner {
                    if let Some(path) = self.alias_path(*target, owner) {
                        let mut names = vec![self.variable(owner)?.name.clone()];
                        for id in path {
                            names.push(self.variable(id)?.name.clone());
                        }
                        return Err(Error::AliasCycle { path: names });
                    }
                }
            }
            VariableValue::Custom(_) => {}
        }
        Ok(())
    }

    /// Finds an alias path from `from` to `to` over entries of any mode.
    fn alias_path(&self, from: VariableId, to: VariableId) -> Option<Vec<VariableId>> {
        let mut stack = vec![vec![from]];
        let mut seen = BTreeSet::new();
        while let Some(path) = stack.pop() {
            let last = *path.last()?;
            if last == to {
                return Some(path);
            }
            if !seen.insert(last) {
                continue;
            }
            if let Some(var) = self.variables.get(&last) {
                for next in var.alias_targets() {
                    let mut extended = path.clone();
                    extended.push(next);
                    stack.push(extended);
                }
            }
        }
        None
    }

    /// Computes replacements for entries that alias any of `removed`.
    fn detach_plan(
        &self,
        removed: &BTreeSet<VariableId>,
    ) -> Result<Vec<(VariableId, ModeId, VariableValue)>> {
        let resolver = AliasResolver::new(self);
        let mut plan = Vec::new();
        for var in self.variables.values() {
            if removed.contains(&var.id) {
                continue;
            }
            // Every mode, including those inheriting an aliased default, gets
            // an explicit entry so its resolution does not change.
            for mode in self.collection(var.collection)?.modes() {
                if let VariableValue::Alias(target) = var.value_for(mode.id) {
                    if removed.contains(target) {
                        let flattened = resolver.follow(*target, mode.id)?;
                        plan.push((var.id, mode.id, VariableValue::from(flattened)));
                    }
                }
            }
        }
        Ok(plan)
    }

    fn apply_detach(&mut self, plan: Vec<(VariableId, ModeId, VariableValue)>) {
        for (id, mode, value) in plan {
            if let Some(var) = self.variables.get_mut(&id) {
                debug!(variable = %id, %mode, "detached alias");
                var.set(mode, value);
            }
        }
    }

    fn drop_variables(&mut self, removed: &BTreeSet<VariableId>) {
        for id in removed {
            if let Some(var) = self.variables.remove(id) {
                if let Some(coll) = self.collections.get_mut(&var.collection) {
                    coll.variables.retain(|v| v != id);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::{ColorValue, CustomValue, SizeValue, Value};

    fn color(hex: &str) -> VariableValue {
        VariableValue::Value(Value::Color(ColorValue::parse(hex).unwrap()))
    }

    fn theme() -> (VariableStore, CollectionId, ModeId, VariableId) {
        let mut store = VariableStore::new();
        let c = store.create_collection("Theme").unwrap();
        let dark = store.create_mode(c, "Dark").unwrap();
        let bg = store
            .create_variable(c, "bg", VariableType::Color, color("#fff"), [(dark, color("#000"))])
            .unwrap();
        (store, c, dark, bg)
    }

    // =========================================================================
    // Collections and modes
    // =========================================================================

    #[test]
    fn test_collection_has_default_mode() {
        let mut store = VariableStore::new();
        let c = store.create_collection("Theme").unwrap();
        let coll = store.collection(c).unwrap();
        assert_eq!(coll.modes().len(), 1);
        assert_eq!(coll.modes()[0].name, DEFAULT_MODE_NAME);
        assert_eq!(coll.default_mode(), coll.modes()[0].id);
    }

    #[test]
    fn test_duplicate_collection_name() {
        let mut store = VariableStore::new();
        store.create_collection("Theme").unwrap();
        assert!(matches!(
            store.create_collection("Theme"),
            Err(Error::DuplicateName { kind: "collection", .. })
        ));
    }

    #[test]
    fn test_duplicate_mode_name() {
        let (mut store, c, _, _) = theme();
        assert!(matches!(
            store.create_mode(c, "Dark"),
            Err(Error::DuplicateName { kind: "mode", .. })
        ));
    }

    #[test]
    fn test_rename_mode() {
        let (mut store, c, dark, _) = theme();
        store.rename_mode(c, dark, "Night").unwrap();
        assert!(store.collection(c).unwrap().mode_by_name("Night").is_some());
        assert!(store.rename_mode(c, dark, DEFAULT_MODE_NAME).is_err());
    }

    #[test]
    fn test_remove_default_mode_fails() {
        let (mut store, c, _, _) = theme();
        let default = store.default_mode(c).unwrap();
        assert!(matches!(
            store.remove_mode(c, default),
            Err(Error::DefaultMode { .. })
        ));
    }

    #[test]
    fn test_remove_mode_drops_entries() {
        let (mut store, c, dark, bg) = theme();
        store.remove_mode(c, dark).unwrap();
        assert!(!store.collection(c).unwrap().has_mode(dark));
        assert_eq!(store.variable(bg).unwrap().entries().count(), 1);
    }

    // =========================================================================
    // Variables
    // =========================================================================

    #[test]
    fn test_duplicate_variable_name_in_same_collection() {
        let (mut store, c, _, _) = theme();
        assert!(matches!(
            store.create_variable(c, "bg", VariableType::Color, color("#123"), []),
            Err(Error::DuplicateName { kind: "variable", .. })
        ));
        // Another collection may reuse the name.
        let other = store.create_collection("Other").unwrap();
        assert!(store
            .create_variable(other, "bg", VariableType::Color, color("#123"), [])
            .is_ok());
    }

    #[test]
    fn test_create_variable_type_mismatch() {
        let mut store = VariableStore::new();
        let c = store.create_collection("Theme").unwrap();
        let err = store
            .create_variable(c, "gap", VariableType::Size, color("#fff"), [])
            .unwrap_err();
        assert!(matches!(err, Error::TypeMismatch { .. }));
        assert!(store.variables_in(c).unwrap().is_empty());
    }

    #[test]
    fn test_get_value_unset_mode_inherits_default() {
        let mut store = VariableStore::new();
        let c = store.create_collection("Theme").unwrap();
        let dark = store.create_mode(c, "Dark").unwrap();
        let v = store
            .create_variable(c, "gap", VariableType::Size, SizeValue::px(8.0), [])
            .unwrap();
        assert_eq!(
            store.get_value(v, Some(dark), false).unwrap(),
            VariableValue::from(SizeValue::px(8.0))
        );
        assert!(store.variable(v).unwrap().explicit_value(dark).is_none());
    }

    #[test]
    fn test_get_value_raw_returns_alias() {
        let (mut store, c, dark, bg) = theme();
        let surface = store
            .create_variable(c, "surface", VariableType::Color, bg, [])
            .unwrap();
        assert_eq!(
            store.get_value(surface, Some(dark), false).unwrap(),
            VariableValue::Alias(bg)
        );
        assert_eq!(
            store.get_value(surface, Some(dark), true).unwrap(),
            color("#000")
        );
    }

    #[test]
    fn test_set_value_type_mismatch() {
        let (mut store, _, _, bg) = theme();
        let err = store
            .set_value(bg, Value::Number(3.0), None)
            .unwrap_err();
        assert!(matches!(err, Error::TypeMismatch { .. }));
        assert_eq!(store.get_value(bg, None, false).unwrap(), color("#fff"));
    }

    #[test]
    fn test_set_value_alias_type_mismatch() {
        let (mut store, c, _, bg) = theme();
        let gap = store
            .create_variable(c, "gap", VariableType::Size, SizeValue::px(4.0), [])
            .unwrap();
        assert!(matches!(
            store.set_value(bg, gap, None),
            Err(Error::TypeMismatch { .. })
        ));
    }

    #[test]
    fn test_set_value_rejects_cycle() {
        let (mut store, c, dark, bg) = theme();
        let a = store.create_variable(c, "a", VariableType::Color, bg, []).unwrap();
        let b = store.create_variable(c, "b", VariableType::Color, a, []).unwrap();

        let err = store.set_value(bg, b, Some(dark)).unwrap_err();
        match err {
            Error::AliasCycle { path } => assert_eq!(path, ["bg", "b", "a", "bg"]),
            other => panic!("expected alias cycle, got {other:?}"),
        }
        assert!(matches!(
            store.set_value(bg, bg, None),
            Err(Error::AliasCycle { .. })
        ));
    }

    #[test]
    fn test_set_value_custom_accepted_for_any_type() {
        let (mut store, _, dark, bg) = theme();
        store
            .set_value(bg, CustomValue::new("color-mix(in srgb, red, blue)"), Some(dark))
            .unwrap();
        assert!(matches!(
            store.get_value(bg, Some(dark), true).unwrap(),
            VariableValue::Custom(_)
        ));
    }

    #[test]
    fn test_set_value_is_idempotent() {
        let (mut store, _, dark, bg) = theme();
        store.set_value(bg, color("#222"), Some(dark)).unwrap();
        let once = store.clone();
        store.set_value(bg, color("#222"), Some(dark)).unwrap();
        assert_eq!(store.variable(bg).unwrap(), once.variable(bg).unwrap());
    }

    #[test]
    fn test_clear_value() {
        let (mut store, _, dark, bg) = theme();
        let previous = store.clear_value(bg, dark).unwrap();
        assert_eq!(previous, Some(color("#000")));
        assert_eq!(store.get_value(bg, Some(dark), false).unwrap(), color("#fff"));

        let default = store.variable(bg).unwrap().default_mode;
        assert!(matches!(
            store.clear_value(bg, default),
            Err(Error::DefaultMode { .. })
        ));
    }

    #[test]
    fn test_rename_variable_conflict() {
        let (mut store, c, _, bg) = theme();
        store
            .create_variable(c, "fg", VariableType::Color, color("#000"), [])
            .unwrap();
        assert!(store.rename_variable(bg, "fg").is_err());
        store.rename_variable(bg, "background").unwrap();
        assert!(store.variable_by_name(c, "background").is_some());
    }

    // =========================================================================
    // Removal
    // =========================================================================

    #[test]
    fn test_remove_aliased_variable_requires_force() {
        let (mut store, c, dark, bg) = theme();
        let surface = store
            .create_variable(c, "surface", VariableType::Color, bg, [])
            .unwrap();

        assert!(matches!(
            store.remove_variable(bg, false),
            Err(Error::NotEmptyOrForced { dependents: 1, .. })
        ));
        assert!(store.variable(bg).is_ok());

        store.remove_variable(bg, true).unwrap();
        assert!(store.variable(bg).is_err());
        // Detached, not deleted: surface keeps the values it used to resolve to.
        assert_eq!(store.get_value(surface, None, false).unwrap(), color("#fff"));
        assert_eq!(
            store.get_value(surface, Some(dark), false).unwrap(),
            color("#000")
        );
    }

    #[test]
    fn test_remove_collection_requires_force_when_not_empty() {
        let (mut store, c, _, bg) = theme();
        assert!(matches!(
            store.remove_collection(c, false),
            Err(Error::NotEmptyOrForced { .. })
        ));
        store.remove_collection(c, true).unwrap();
        assert!(store.collection(c).is_err());
        assert!(store.variable(bg).is_err());
    }

    #[test]
    fn test_remove_empty_collection() {
        let mut store = VariableStore::new();
        let c = store.create_collection("Empty").unwrap();
        store.remove_collection(c, false).unwrap();
        assert_eq!(store.collections().count(), 0);
    }

    #[test]
    fn test_remove_collection_detaches_external_aliases() {
        let (mut store, c, _, bg) = theme();
        let other = store.create_collection("Brand").unwrap();
        let brand_bg = store
            .create_variable(other, "brand-bg", VariableType::Color, bg, [])
            .unwrap();

        store.remove_collection(c, true).unwrap();
        assert_eq!(store.get_value(brand_bg, None, false).unwrap(), color("#fff"));
    }
}
