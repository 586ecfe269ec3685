//! Error types for the variable and style stores.

use thiserror::Error;

/// Error returned by store mutations, lookups and resolution.
///
/// Every failure is reported synchronously. A failed mutation never leaves a
/// store partially written.
#[derive(Debug, Error)]
pub enum Error {
    /// A value or alias target does not match the declared type.
    #[error("type mismatch: expected {expected}, found {found}")]
    TypeMismatch { expected: String, found: String },

    /// A cycle was detected while following variable aliases.
    #[error("cycle detected in variable aliases: {}", path.join(" -> "))]
    AliasCycle { path: Vec<String> },

    /// The requested combo parent is itself a combo class.
    #[error("style '{parent}' is a combo class and cannot be used as a combo parent")]
    NestedComboNotSupported { parent: String },

    /// The property name is not part of the style property vocabulary.
    #[error("unknown style property '{name}'")]
    UnknownProperty { name: String },

    /// A breakpoint or pseudo-state token outside the fixed domain.
    #[error("invalid {axis} '{value}'")]
    InvalidAxisValue { axis: &'static str, value: String },

    /// A value outside the accepted vocabulary.
    #[error("invalid value '{value}': expected {expected}")]
    InvalidValue { expected: String, value: String },

    /// Removal blocked by dependents; retry with `force` to detach them.
    #[error("{entity} still has {dependents} dependent(s); removal must be forced")]
    NotEmptyOrForced { entity: String, dependents: usize },

    /// A stale or unknown id.
    #[error("{kind} '{id}' not found")]
    NotFound { kind: &'static str, id: String },

    /// A name that must be unique is already taken.
    #[error("{kind} named '{name}' already exists")]
    DuplicateName { kind: &'static str, name: String },

    /// The default mode of a collection cannot be removed or unset.
    #[error("the default mode of collection '{collection}' cannot be removed or unset")]
    DefaultMode { collection: String },

    /// A seed document could not be parsed.
    #[error("invalid document: {0}")]
    Document(#[from] serde_yaml::Error),
}

impl Error {
    pub(crate) fn not_found(kind: &'static str, id: impl std::fmt::Display) -> Self {
        Error::NotFound {
            kind,
            id: id.to_string(),
        }
    }

    pub(crate) fn invalid_value(expected: impl Into<String>, value: impl Into<String>) -> Self {
        Error::InvalidValue {
            expected: expected.into(),
            value: value.into(),
        }
    }

    pub(crate) fn type_mismatch(
        expected: impl std::fmt::Display,
        found: impl std::fmt::Display,
    ) -> Self {
        Error::TypeMismatch {
            expected: expected.to_string(),
            found: found.to_string(),
        }
    }
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alias_cycle_error_display() {
        let err = Error::AliasCycle {
            path: vec!["a".to_string(), "b".to_string(), "a".to_string()],
        };
        let msg = err.to_string();
        assert!(msg.contains("cycle"));
        assert!(msg.contains("a -> b -> a"));
    }

    #[test]
    fn test_not_found_error_display() {
        let err = Error::not_found("variable", "var-7");
        let msg = err.to_string();
        assert!(msg.contains("variable"));
        assert!(msg.contains("var-7"));
    }

    #[test]
    fn test_type_mismatch_error_display() {
        let err = Error::type_mismatch("color", "size");
        assert_eq!(err.to_string(), "type mismatch: expected color, found size");
    }
}
