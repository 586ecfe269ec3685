//! Style classes and their per-axis property tables.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::property::{PropertyValue, StyleProperty};
use crate::axis::StyleAxis;
use crate::ids::{CollectionId, ModeId, StyleId};

/// Everything a style sets at one `(breakpoint, pseudo-state)` pair.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PropertyBlock {
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub properties: BTreeMap<StyleProperty, PropertyValue>,
    /// Collection -> mode bindings applied to variables used under this style.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub modes: BTreeMap<CollectionId, ModeId>,
}

impl PropertyBlock {
    pub fn is_empty(&self) -> bool {
        self.properties.is_empty() && self.modes.is_empty()
    }
}

/// A named style: a plain class, or a combo class applied on top of its parent.
///
/// Properties not set at an axis pair are absent rather than defaulted;
/// effective values come from the [`Cascade`](crate::Cascade).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Style {
    pub(crate) id: StyleId,
    pub(crate) name: String,
    pub(crate) parent: Option<StyleId>,
    pub(crate) table: BTreeMap<StyleAxis, PropertyBlock>,
}

impl Style {
    pub(crate) fn new(id: StyleId, name: &str, parent: Option<StyleId>) -> Self {
        Self {
            id,
            name: name.to_string(),
            parent,
            table: BTreeMap::new(),
        }
    }

    pub fn id(&self) -> StyleId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The combo parent, for combo classes.
    pub fn parent(&self) -> Option<StyleId> {
        self.parent
    }

    pub fn is_combo(&self) -> bool {
        self.parent.is_some()
    }

    pub fn block(&self, axis: StyleAxis) -> Option<&PropertyBlock> {
        self.table.get(&axis)
    }

    /// Non-empty blocks keyed by axis.
    pub fn blocks(&self) -> impl Iterator<Item = (StyleAxis, &PropertyBlock)> {
        self.table.iter().map(|(axis, block)| (*axis, block))
    }

    /// The value set at exactly `axis`, without any fallback.
    pub fn property(&self, prop: StyleProperty, axis: StyleAxis) -> Option<&PropertyValue> {
        self.block(axis).and_then(|block| block.properties.get(&prop))
    }

    /// The mode bound for `collection` at exactly `axis`.
    pub fn variable_mode(&self, collection: CollectionId, axis: StyleAxis) -> Option<ModeId> {
        self.block(axis)
            .and_then(|block| block.modes.get(&collection))
            .copied()
    }

    pub(crate) fn block_mut(&mut self, axis: StyleAxis) -> &mut PropertyBlock {
        self.table.entry(axis).or_default()
    }

    /// Applies `edit` to the block at `axis`, dropping the block if it empties.
    pub(crate) fn edit_block<T>(
        &mut self,
        axis: StyleAxis,
        edit: impl FnOnce(&mut PropertyBlock) -> T,
    ) -> T {
        let result = edit(self.block_mut(axis));
        if self.table.get(&axis).is_some_and(PropertyBlock::is_empty) {
            self.table.remove(&axis);
        }
        result
    }

    /// Applies `edit` to every block, dropping blocks that empty.
    pub(crate) fn edit_blocks(&mut self, mut edit: impl FnMut(&mut PropertyBlock)) {
        for block in self.table.values_mut() {
            edit(block);
        }
        self.table.retain(|_, block| !block.is_empty());
    }
}
