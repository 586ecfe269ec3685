//! Opaque identifiers for collections, modes, variables and styles.
//!
//! Ids are allocated from per-store counters and never reused, so a stale id
//! fails lookups with [`Error::NotFound`](crate::Error::NotFound) instead of
//! silently addressing a newer entity.

use serde::{Deserialize, Serialize};

macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident, $prefix:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(u64);

        impl $name {
            /// Returns the raw numeric value.
            pub fn get(self) -> u64 {
                self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, concat!($prefix, "-{}"), self.0)
            }
        }
    };
}

define_id!(
    /// Identifies a [`VariableCollection`](crate::VariableCollection).
    CollectionId,
    "collection"
);
define_id!(
    /// Identifies a [`Mode`](crate::Mode) within a collection.
    ModeId,
    "mode"
);
define_id!(
    /// Identifies a [`Variable`](crate::Variable).
    VariableId,
    "variable"
);
define_id!(
    /// Identifies a [`Style`](crate::Style).
    StyleId,
    "style"
);

/// Monotonic id allocator shared by a store.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub(crate) struct IdGen {
    next: u64,
}

impl IdGen {
    pub(crate) fn next_raw(&mut self) -> u64 {
        self.next += 1;
        self.next
    }

    pub(crate) fn collection(&mut self) -> CollectionId {
        CollectionId(self.next_raw())
    }

    pub(crate) fn mode(&mut self) -> ModeId {
        ModeId(self.next_raw())
    }

    pub(crate) fn variable(&mut self) -> VariableId {
        VariableId(self.next_raw())
    }

    pub(crate) fn style(&mut self) -> StyleId {
        StyleId(self.next_raw())
    }
}
