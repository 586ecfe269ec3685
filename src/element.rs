//! Binding styles to host elements.
//!
//! Elements belong to the host application; this crate only sees an opaque
//! handle and the ordered list of styles assigned to it.

use serde::{Deserialize, Serialize};

use crate::axis::{Breakpoint, PseudoState};
use crate::cascade::{Cascade, PropertyMap};
use crate::error::Result;
use crate::ids::StyleId;

/// Styles applied to one element, in application order (later wins).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ElementStyleAssignment {
    pub styles: Vec<StyleId>,
}

impl ElementStyleAssignment {
    pub fn new(styles: impl IntoIterator<Item = StyleId>) -> Self {
        Self {
            styles: styles.into_iter().collect(),
        }
    }

    pub fn push(&mut self, style: StyleId) {
        self.styles.push(style);
    }

    pub fn is_empty(&self) -> bool {
        self.styles.is_empty()
    }
}

/// An element handle paired with its resolved properties.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedElement<H> {
    pub handle: H,
    pub properties: PropertyMap,
}

/// Resolves the properties of one element.
///
/// The assignment is expanded with [`Cascade::expand_chain`] first, so combo
/// classes pull in their parent. The handle is returned untouched.
pub fn resolve_element<H>(
    cascade: &Cascade<'_>,
    handle: H,
    assignment: &ElementStyleAssignment,
    breakpoint: Breakpoint,
    pseudo: PseudoState,
) -> Result<ResolvedElement<H>> {
    let chain = cascade.expand_chain(assignment)?;
    let properties = cascade.resolve_properties(&chain, breakpoint, pseudo)?;
    Ok(ResolvedElement { handle, properties })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::axis::StyleAxis;
    use crate::style::{ComputedValue, StyleProperty, StyleStore};
    use crate::value::{ColorValue, Value};
    use crate::variable::VariableStore;

    #[test]
    fn test_resolve_element_expands_combo_parent() {
        let variables = VariableStore::new();
        let mut styles = StyleStore::new();
        let button = styles.create("button", None).unwrap();
        let primary = styles.create("primary", Some(button)).unwrap();
        styles
            .set_property_str(button, "color", "red", StyleAxis::default())
            .unwrap();
        styles
            .set_property_str(primary, "background-color", "blue", StyleAxis::default())
            .unwrap();

        let cascade = Cascade::new(&variables, &styles);
        let resolved = resolve_element(
            &cascade,
            "node-17",
            &ElementStyleAssignment::new([primary]),
            Breakpoint::Main,
            PseudoState::None,
        )
        .unwrap();

        assert_eq!(resolved.handle, "node-17");
        assert_eq!(
            resolved.properties.get(&StyleProperty::Color),
            Some(&ComputedValue::Value(Value::Color(ColorValue::rgb(255, 0, 0))))
        );
        assert!(resolved
            .properties
            .contains_key(&StyleProperty::BackgroundColor));
    }

    #[test]
    fn test_empty_assignment() {
        let variables = VariableStore::new();
        let styles = StyleStore::new();
        let cascade = Cascade::new(&variables, &styles);
        let resolved = resolve_element(
            &cascade,
            42u32,
            &ElementStyleAssignment::default(),
            Breakpoint::Tiny,
            PseudoState::Hover,
        )
        .unwrap();
        assert!(resolved.properties.is_empty());
    }
}
