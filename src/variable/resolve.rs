//! Alias resolution for variables.

use tracing::trace;

use super::store::VariableStore;
use crate::error::{Error, Result};
use crate::ids::{ModeId, VariableId};
use crate::value::{ResolvedValue, VariableValue};

/// Follows alias chains through a [`VariableStore`] down to a concrete value.
///
/// At each hop the target's entry for the same mode is used when the target
/// defines one; otherwise the target's default entry applies. Since modes
/// belong to collections, a hop into another collection always lands on that
/// collection's default. A [`CustomValue`](crate::CustomValue) ends the chain
/// and is returned verbatim.
///
/// # Example
///
/// ```rust
/// use stylecascade::{AliasResolver, ColorValue, ResolvedValue, Value, VariableStore, VariableType};
///
/// let mut store = VariableStore::new();
/// let palette = store.create_collection("Palette").unwrap();
/// let black = store
///     .create_variable(palette, "black", VariableType::Color, ColorValue::rgb(0, 0, 0), [])
///     .unwrap();
/// let text = store
///     .create_variable(palette, "text", VariableType::Color, black, [])
///     .unwrap();
///
/// let mode = store.default_mode(palette).unwrap();
/// let resolved = AliasResolver::new(&store).resolve(text, mode).unwrap();
/// assert_eq!(resolved, ResolvedValue::Value(Value::Color(ColorValue::rgb(0, 0, 0))));
/// ```
#[derive(Debug, Clone, Copy)]
pub struct AliasResolver<'a> {
    store: &'a VariableStore,
}

impl<'a> AliasResolver<'a> {
    pub fn new(store: &'a VariableStore) -> Self {
        Self { store }
    }

    /// Resolves `variable` in `mode`.
    ///
    /// # Errors
    ///
    /// - [`Error::NotFound`] if the variable, or a variable on the chain, does
    ///   not exist, or if `mode` is not a mode of the variable's collection.
    /// - [`Error::AliasCycle`] if the chain revisits a variable.
    pub fn resolve(&self, variable: VariableId, mode: ModeId) -> Result<ResolvedValue> {
        let start = self.store.variable(variable)?;
        let collection = self.store.collection(start.collection())?;
        if !collection.has_mode(mode) {
            return Err(Error::not_found("mode", mode));
        }
        self.follow(variable, mode)
    }

    /// Resolves without checking that `mode` belongs to the start variable.
    pub(crate) fn follow(&self, variable: VariableId, mode: ModeId) -> Result<ResolvedValue> {
        let mut visited: Vec<VariableId> = Vec::new();
        let mut current = variable;
        loop {
            if let Some(pos) = visited.iter().position(|seen| *seen == current) {
                let mut path: Vec<String> =
                    visited[pos..].iter().map(|id| self.name_of(*id)).collect();
                path.push(self.name_of(current));
                return Err(Error::AliasCycle { path });
            }
            visited.push(current);

            match self.store.variable(current)?.value_for(mode) {
                VariableValue::Value(value) => {
                    trace!(%variable, %mode, hops = visited.len(), "resolved variable");
                    return Ok(ResolvedValue::Value(value.clone()));
                }
                VariableValue::Custom(custom) => {
                    return Ok(ResolvedValue::Custom(custom.clone()));
                }
                VariableValue::Alias(target) => {
                    trace!(from = %current, to = %target, "following alias");
                    current = *target;
                }
            }
        }
    }

    fn name_of(&self, id: VariableId) -> String {
        self.store
            .variable(id)
            .map(|v| v.name().to_string())
            .unwrap_or_else(|_| id.to_string())
    }
}
