//! Collections, modes and variables.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::ids::{CollectionId, ModeId, VariableId};
use crate::value::{VariableType, VariableValue};

/// A named alternative value-set within a collection, e.g. "Dark".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mode {
    pub id: ModeId,
    pub name: String,
}

/// A named group of variables sharing a set of modes.
///
/// The first mode is the default; it can be renamed but never removed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VariableCollection {
    pub(crate) id: CollectionId,
    pub(crate) name: String,
    pub(crate) modes: Vec<Mode>,
    pub(crate) variables: Vec<VariableId>,
}

impl VariableCollection {
    pub fn id(&self) -> CollectionId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Modes in creation order; the first is the default.
    pub fn modes(&self) -> &[Mode] {
        &self.modes
    }

    pub fn default_mode(&self) -> ModeId {
        self.modes[0].id
    }

    pub fn has_mode(&self, mode: ModeId) -> bool {
        self.modes.iter().any(|m| m.id == mode)
    }

    pub fn mode_by_name(&self, name: &str) -> Option<&Mode> {
        self.modes.iter().find(|m| m.name == name)
    }

    /// Variable ids in creation order.
    pub fn variables(&self) -> &[VariableId] {
        &self.variables
    }

    pub fn is_empty(&self) -> bool {
        self.variables.is_empty()
    }
}

/// A typed design token with one entry per mode.
///
/// The default-mode entry is always present. A missing entry for any other
/// mode inherits the default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Variable {
    pub(crate) id: VariableId,
    pub(crate) collection: CollectionId,
    pub(crate) name: String,
    pub(crate) ty: VariableType,
    pub(crate) default_mode: ModeId,
    pub(crate) default: VariableValue,
    pub(crate) overrides: BTreeMap<ModeId, VariableValue>,
}

impl Variable {
    pub fn id(&self) -> VariableId {
        self.id
    }

    pub fn collection(&self) -> CollectionId {
        self.collection
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn variable_type(&self) -> VariableType {
        self.ty
    }

    /// The entry set explicitly for `mode`, if any.
    pub fn explicit_value(&self, mode: ModeId) -> Option<&VariableValue> {
        if mode == self.default_mode {
            Some(&self.default)
        } else {
            self.overrides.get(&mode)
        }
    }

    /// The entry for `mode`, inheriting the default when unset.
    ///
    /// Modes of other collections always yield the default entry.
    pub fn value_for(&self, mode: ModeId) -> &VariableValue {
        self.overrides.get(&mode).unwrap_or(&self.default)
    }

    pub fn default_value(&self) -> &VariableValue {
        &self.default
    }

    /// Iterates the explicitly set `(mode, entry)` pairs, default first.
    pub fn entries(&self) -> impl Iterator<Item = (ModeId, &VariableValue)> {
        std::iter::once((self.default_mode, &self.default))
            .chain(self.overrides.iter().map(|(mode, value)| (*mode, value)))
    }

    /// Variables this one aliases in any mode.
    pub fn alias_targets(&self) -> impl Iterator<Item = VariableId> + '_ {
        self.entries().filter_map(|(_, value)| match value {
            VariableValue::Alias(target) => Some(*target),
            VariableValue::Value(_) | VariableValue::Custom(_) => None,
        })
    }

    pub(crate) fn set(&mut self, mode: ModeId, value: VariableValue) {
        if mode == self.default_mode {
            self.default = value;
        } else {
            self.overrides.insert(mode, value);
        }
    }
}
