//! Multi-axis property resolution.
//!
//! The [`Cascade`] answers "what is the effective value of this property for
//! these styles at this breakpoint and pseudo-state". Resolution happens in
//! four steps:
//!
//! 1. **Breakpoint axis.** Starting at the requested breakpoint, walk toward
//!    `main` (see [`Breakpoint::cascade`]).
//! 2. **Pseudo axis.** A requested pseudo-state is looked up at the requested
//!    breakpoint only. Without a value there, resolution continues exactly as
//!    for `none`: the `none` block at the requested breakpoint, then the rest
//!    of the breakpoint walk. Pseudo blocks at other breakpoints never apply,
//!    and there is no fallback between two different pseudo-states.
//! 3. **Chain merge.** Each style in the chain is resolved on its own; for
//!    every property the last style in chain order that yields a value wins.
//! 4. **Mode substitution.** Variable references resolve through the
//!    [`AliasResolver`] in the mode bound for their collection by the chain
//!    (same walk over mode bindings), or the collection's default mode.
//!
//! An [`PropertyValue::Unset`] met during the walk stops it: that style yields
//! nothing for the property, at this breakpoint and at every narrower (or
//! wider) breakpoint whose walk passes through it.

use std::collections::{BTreeMap, BTreeSet};
use tracing::trace;

use crate::axis::{Breakpoint, PseudoState, StyleAxis};
use crate::element::ElementStyleAssignment;
use crate::error::Result;
use crate::ids::{CollectionId, ModeId, StyleId};
use crate::style::{ComputedValue, PropertyValue, Style, StyleProperty, StyleStore};
use crate::value::ResolvedValue;
use crate::variable::{AliasResolver, VariableStore};

/// Resolved properties of a style chain, keyed by property.
pub type PropertyMap = BTreeMap<StyleProperty, ComputedValue>;

/// Read-only resolver over a variable store and a style store.
///
/// # Example
///
/// ```rust
/// use stylecascade::{Breakpoint, Cascade, PseudoState, StyleAxis, StyleProperty, StyleStore, VariableStore};
///
/// let variables = VariableStore::new();
/// let mut styles = StyleStore::new();
/// let card = styles.create("card", None).unwrap();
/// styles.set_property_str(card, "padding-top", "16px", StyleAxis::default()).unwrap();
/// styles.set_property_str(card, "padding-top", "8px", StyleAxis::at(Breakpoint::Small)).unwrap();
///
/// let cascade = Cascade::new(&variables, &styles);
/// let at = |bp| {
///     cascade
///         .resolve_property(&[card], StyleProperty::PaddingTop, bp, PseudoState::None)
///         .unwrap()
///         .map(|v| v.to_string())
/// };
/// assert_eq!(at(Breakpoint::Medium).as_deref(), Some("16px"));
/// assert_eq!(at(Breakpoint::Tiny).as_deref(), Some("8px"));
/// assert_eq!(at(Breakpoint::Xl).as_deref(), Some("16px"));
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Cascade<'a> {
    variables: &'a VariableStore,
    styles: &'a StyleStore,
}

impl<'a> Cascade<'a> {
    pub fn new(variables: &'a VariableStore, styles: &'a StyleStore) -> Self {
        Self { variables, styles }
    }

    /// Turns an element's assignment into a resolvable chain.
    ///
    /// Each combo class is preceded by its parent when the parent is not
    /// already earlier in the chain. Repeated styles keep their first position.
    pub fn expand_chain(&self, assignment: &ElementStyleAssignment) -> Result<Vec<StyleId>> {
        let mut chain: Vec<StyleId> = Vec::with_capacity(assignment.styles.len());
        for &id in &assignment.styles {
            let style = self.styles.style(id)?;
            if let Some(parent) = style.parent() {
                self.styles.style(parent)?;
                if !chain.contains(&parent) {
                    chain.push(parent);
                }
            }
            if !chain.contains(&id) {
                chain.push(id);
            }
        }
        Ok(chain)
    }

    /// Resolves every property any style in `chain` sets.
    ///
    /// Properties that resolve to nothing are absent from the map. An empty
    /// chain yields an empty map.
    ///
    /// # Errors
    ///
    /// [`Error::NotFound`](crate::Error::NotFound) for unknown styles, and any
    /// alias resolution error for referenced variables.
    pub fn resolve_properties(
        &self,
        chain: &[StyleId],
        breakpoint: Breakpoint,
        pseudo: PseudoState,
    ) -> Result<PropertyMap> {
        let styles = self.load(chain)?;
        let modes = merge_modes(&styles, breakpoint, pseudo);

        let props: BTreeSet<StyleProperty> = styles
            .iter()
            .flat_map(|s| s.blocks())
            .flat_map(|(_, block)| block.properties.keys().copied())
            .collect();

        let mut resolved = PropertyMap::new();
        for prop in props {
            if let Some(value) = merge_property(&styles, prop, breakpoint, pseudo) {
                resolved.insert(prop, self.compute(value, &modes)?);
            }
        }
        trace!(
            chain = chain.len(),
            %breakpoint,
            %pseudo,
            properties = resolved.len(),
            "resolved properties"
        );
        Ok(resolved)
    }

    /// Resolves a single property; `None` means no style in the chain sets it.
    pub fn resolve_property(
        &self,
        chain: &[StyleId],
        prop: StyleProperty,
        breakpoint: Breakpoint,
        pseudo: PseudoState,
    ) -> Result<Option<ComputedValue>> {
        let styles = self.load(chain)?;
        match merge_property(&styles, prop, breakpoint, pseudo) {
            Some(value) => {
                let modes = merge_modes(&styles, breakpoint, pseudo);
                self.compute(value, &modes).map(Some)
            }
            None => Ok(None),
        }
    }

    /// The collection -> mode bindings in effect for `chain`.
    ///
    /// Bindings cascade exactly like properties. Collections without a
    /// binding are absent and use their default mode.
    pub fn resolve_variable_modes(
        &self,
        chain: &[StyleId],
        breakpoint: Breakpoint,
        pseudo: PseudoState,
    ) -> Result<BTreeMap<CollectionId, ModeId>> {
        let styles = self.load(chain)?;
        Ok(merge_modes(&styles, breakpoint, pseudo))
    }

    fn load(&self, chain: &[StyleId]) -> Result<Vec<&'a Style>> {
        chain.iter().map(|&id| self.styles.style(id)).collect()
    }

    fn compute(
        &self,
        value: &PropertyValue,
        modes: &BTreeMap<CollectionId, ModeId>,
    ) -> Result<ComputedValue> {
        let computed = match value {
            PropertyValue::Value(v) => ComputedValue::Value(v.clone()),
            PropertyValue::Keyword(k) => ComputedValue::Keyword(k.clone()),
            PropertyValue::Variable(id) => {
                let variable = self.variables.variable(*id)?;
                let collection = self.variables.collection(variable.collection())?;
                let mode = modes
                    .get(&collection.id())
                    .copied()
                    .filter(|m| collection.has_mode(*m))
                    .unwrap_or_else(|| collection.default_mode());
                trace!(variable = %id, %mode, "substituting variable");
                match AliasResolver::new(self.variables).resolve(*id, mode)? {
                    ResolvedValue::Value(v) => ComputedValue::Value(v),
                    ResolvedValue::Custom(c) => ComputedValue::Custom(c),
                }
            }
            // Never returned by `lookup`.
            PropertyValue::Unset => ComputedValue::Keyword(crate::style::UNSET_KEYWORD.into()),
        };
        Ok(computed)
    }
}

/// Axis keys consulted for one style, in order.
fn walk(breakpoint: Breakpoint, pseudo: PseudoState) -> impl Iterator<Item = StyleAxis> {
    let requested = (!pseudo.is_none()).then(|| StyleAxis::new(breakpoint, pseudo));
    requested
        .into_iter()
        .chain(breakpoint.cascade().map(StyleAxis::at))
}

/// The value one style yields for `prop`, or `None` if it yields nothing.
fn lookup(
    style: &Style,
    prop: StyleProperty,
    breakpoint: Breakpoint,
    pseudo: PseudoState,
) -> Option<&PropertyValue> {
    let found = walk(breakpoint, pseudo).find_map(|axis| style.property(prop, axis))?;
    match found {
        PropertyValue::Unset => None,
        value => Some(value),
    }
}

fn merge_property<'s>(
    styles: &[&'s Style],
    prop: StyleProperty,
    breakpoint: Breakpoint,
    pseudo: PseudoState,
) -> Option<&'s PropertyValue> {
    styles
        .iter()
        .rev()
        .find_map(|&style| lookup(style, prop, breakpoint, pseudo))
}

fn merge_modes(
    styles: &[&Style],
    breakpoint: Breakpoint,
    pseudo: PseudoState,
) -> BTreeMap<CollectionId, ModeId> {
    let mut modes = BTreeMap::new();
    for style in styles {
        let collections: BTreeSet<CollectionId> = style
            .blocks()
            .flat_map(|(_, block)| block.modes.keys().copied())
            .collect();
        for collection in collections {
            if let Some(mode) =
                walk(breakpoint, pseudo).find_map(|axis| style.variable_mode(collection, axis))
            {
                modes.insert(collection, mode);
            }
        }
    }
    modes
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::value::{ColorValue, CustomValue, SizeValue, Value, VariableType, VariableValue};

    fn color(text: &str) -> ColorValue {
        ColorValue::parse(text).unwrap()
    }

    fn computed(text: &str) -> Option<ComputedValue> {
        Some(ComputedValue::Value(Value::Color(color(text))))
    }

    #[test]
    fn test_walk_checks_pseudo_only_at_requested_breakpoint() {
        let axes: Vec<String> = walk(Breakpoint::Small, PseudoState::Hover)
            .map(|a| a.to_string())
            .collect();
        assert_eq!(axes, ["small:hover", "small:none", "medium:none", "main:none"]);
        assert_eq!(walk(Breakpoint::Main, PseudoState::None).count(), 1);
        assert_eq!(walk(Breakpoint::Main, PseudoState::Focus).count(), 2);
    }

    #[test]
    fn test_empty_chain_is_empty() {
        let variables = VariableStore::new();
        let styles = StyleStore::new();
        let cascade = Cascade::new(&variables, &styles);
        assert!(cascade
            .resolve_properties(&[], Breakpoint::Main, PseudoState::None)
            .unwrap()
            .is_empty());
    }

    #[test]
    fn test_unknown_style_in_chain() {
        let variables = VariableStore::new();
        let mut styles = StyleStore::new();
        let s = styles.create("card", None).unwrap();
        styles.remove(s, false).unwrap();
        let cascade = Cascade::new(&variables, &styles);
        assert!(matches!(
            cascade.resolve_properties(&[s], Breakpoint::Main, PseudoState::None),
            Err(Error::NotFound { kind: "style", .. })
        ));
    }

    #[test]
    fn test_narrower_override_does_not_leak_wider() {
        let variables = VariableStore::new();
        let mut styles = StyleStore::new();
        let s = styles.create("card", None).unwrap();
        styles
            .set_property(s, StyleProperty::Color, color("red"), StyleAxis::default())
            .unwrap();
        styles
            .set_property(s, StyleProperty::Color, color("blue"), StyleAxis::at(Breakpoint::Medium))
            .unwrap();

        let cascade = Cascade::new(&variables, &styles);
        let at = |bp| {
            cascade
                .resolve_property(&[s], StyleProperty::Color, bp, PseudoState::None)
                .unwrap()
        };
        assert_eq!(at(Breakpoint::Main), computed("red"));
        assert_eq!(at(Breakpoint::Large), computed("red"));
        assert_eq!(at(Breakpoint::Medium), computed("blue"));
        assert_eq!(at(Breakpoint::Tiny), computed("blue"));
    }

    #[test]
    fn test_hover_block_applies_only_at_its_breakpoint() {
        let variables = VariableStore::new();
        let mut styles = StyleStore::new();
        let s = styles.create("link", None).unwrap();
        styles
            .set_property(s, StyleProperty::Color, color("red"), StyleAxis::default())
            .unwrap();
        styles
            .set_property(
                s,
                StyleProperty::Color,
                color("blue"),
                StyleAxis::new(Breakpoint::Main, PseudoState::Hover),
            )
            .unwrap();
        styles
            .set_property(
                s,
                StyleProperty::Color,
                color("green"),
                StyleAxis::new(Breakpoint::Small, PseudoState::Hover),
            )
            .unwrap();

        let cascade = Cascade::new(&variables, &styles);
        let at = |bp, pseudo| {
            cascade
                .resolve_property(&[s], StyleProperty::Color, bp, pseudo)
                .unwrap()
        };
        assert_eq!(at(Breakpoint::Main, PseudoState::Hover), computed("blue"));
        assert_eq!(at(Breakpoint::Small, PseudoState::Hover), computed("green"));
        // main:hover does not reach medium; medium:hover is medium:none.
        assert_eq!(at(Breakpoint::Medium, PseudoState::Hover), computed("red"));
        assert_eq!(
            at(Breakpoint::Medium, PseudoState::Hover),
            at(Breakpoint::Medium, PseudoState::None)
        );
        // small:hover does not reach tiny either.
        assert_eq!(at(Breakpoint::Tiny, PseudoState::Hover), computed("red"));
        // No fallback from focus to hover.
        assert_eq!(
            cascade
                .resolve_property(&[s], StyleProperty::Color, Breakpoint::Main, PseudoState::Focus)
                .unwrap(),
            None
        );
    }

    #[test]
    fn test_unset_stops_the_walk() {
        let variables = VariableStore::new();
        let mut styles = StyleStore::new();
        let s = styles.create("card", None).unwrap();
        styles
            .set_property(s, StyleProperty::Color, color("red"), StyleAxis::default())
            .unwrap();
        styles
            .set_property(s, StyleProperty::Color, PropertyValue::Unset, StyleAxis::at(Breakpoint::Medium))
            .unwrap();

        let cascade = Cascade::new(&variables, &styles);
        let at = |bp| {
            cascade
                .resolve_property(&[s], StyleProperty::Color, bp, PseudoState::None)
                .unwrap()
        };
        assert_eq!(at(Breakpoint::Main), computed("red"));
        assert_eq!(at(Breakpoint::Medium), None);
        assert_eq!(at(Breakpoint::Small), None);
        assert_eq!(at(Breakpoint::Xxl), computed("red"));
    }

    #[test]
    fn test_unset_on_combo_lets_parent_show_through() {
        let variables = VariableStore::new();
        let mut styles = StyleStore::new();
        let base = styles.create("button", None).unwrap();
        let combo = styles.create("ghost", Some(base)).unwrap();
        styles
            .set_property(base, StyleProperty::BackgroundColor, color("navy"), StyleAxis::default())
            .unwrap();
        styles
            .set_property(combo, StyleProperty::BackgroundColor, PropertyValue::Unset, StyleAxis::default())
            .unwrap();

        let cascade = Cascade::new(&variables, &styles);
        let map = cascade
            .resolve_properties(&[base, combo], Breakpoint::Main, PseudoState::None)
            .unwrap();
        assert_eq!(
            map.get(&StyleProperty::BackgroundColor).cloned(),
            computed("navy")
        );
    }

    #[test]
    fn test_chain_last_wins() {
        let variables = VariableStore::new();
        let mut styles = StyleStore::new();
        let a = styles.create("a", None).unwrap();
        let b = styles.create("b", None).unwrap();
        styles
            .set_property(a, StyleProperty::Color, color("red"), StyleAxis::default())
            .unwrap();
        styles
            .set_property_str(a, "display", "flex", StyleAxis::default())
            .unwrap();
        styles
            .set_property(b, StyleProperty::Color, color("blue"), StyleAxis::default())
            .unwrap();

        let cascade = Cascade::new(&variables, &styles);
        let map = cascade
            .resolve_properties(&[a, b], Breakpoint::Main, PseudoState::None)
            .unwrap();
        assert_eq!(map.get(&StyleProperty::Color).cloned(), computed("blue"));
        assert_eq!(
            map.get(&StyleProperty::Display),
            Some(&ComputedValue::Keyword("flex".into()))
        );

        let map = cascade
            .resolve_properties(&[b, a], Breakpoint::Main, PseudoState::None)
            .unwrap();
        assert_eq!(map.get(&StyleProperty::Color).cloned(), computed("red"));
    }

    #[test]
    fn test_variable_substitution_uses_bound_mode() {
        let mut variables = VariableStore::new();
        let theme = variables.create_collection("Theme").unwrap();
        let dark = variables.create_mode(theme, "Dark").unwrap();
        let bg = variables
            .create_variable(
                theme,
                "bg",
                VariableType::Color,
                color("#fff"),
                [(dark, VariableValue::from(color("#000")))],
            )
            .unwrap();

        let mut styles = StyleStore::new();
        let s = styles.create("panel", None).unwrap();
        styles
            .set_property(s, StyleProperty::BackgroundColor, bg, StyleAxis::default())
            .unwrap();

        let cascade = Cascade::new(&variables, &styles);
        assert_eq!(
            cascade
                .resolve_property(&[s], StyleProperty::BackgroundColor, Breakpoint::Main, PseudoState::None)
                .unwrap(),
            computed("#fff")
        );

        styles
            .set_variable_mode(s, theme, dark, StyleAxis::default())
            .unwrap();
        let cascade = Cascade::new(&variables, &styles);
        assert_eq!(
            cascade
                .resolve_variable_modes(&[s], Breakpoint::Small, PseudoState::Hover)
                .unwrap()
                .get(&theme),
            Some(&dark)
        );
        assert_eq!(
            cascade
                .resolve_property(&[s], StyleProperty::BackgroundColor, Breakpoint::Main, PseudoState::Hover)
                .unwrap(),
            computed("#000")
        );
    }

    #[test]
    fn test_mode_binding_from_later_style_applies_to_earlier_reference() {
        let mut variables = VariableStore::new();
        let theme = variables.create_collection("Theme").unwrap();
        let dark = variables.create_mode(theme, "Dark").unwrap();
        let gap = variables
            .create_variable(
                theme,
                "gap",
                VariableType::Size,
                SizeValue::px(8.0),
                [(dark, VariableValue::from(Value::Size(SizeValue::px(4.0))))],
            )
            .unwrap();

        let mut styles = StyleStore::new();
        let layout = styles.create("layout", None).unwrap();
        let compact = styles.create("compact", None).unwrap();
        styles
            .set_property(layout, StyleProperty::RowGap, gap, StyleAxis::default())
            .unwrap();
        styles
            .set_variable_mode(compact, theme, dark, StyleAxis::default())
            .unwrap();

        let cascade = Cascade::new(&variables, &styles);
        let map = cascade
            .resolve_properties(&[layout, compact], Breakpoint::Main, PseudoState::None)
            .unwrap();
        assert_eq!(
            map.get(&StyleProperty::RowGap),
            Some(&ComputedValue::Value(Value::Size(SizeValue::px(4.0))))
        );
    }

    #[test]
    fn test_custom_variable_value_is_passed_through() {
        let mut variables = VariableStore::new();
        let theme = variables.create_collection("Theme").unwrap();
        let font = variables
            .create_variable(
                theme,
                "body",
                VariableType::FontFamily,
                CustomValue::new("var(--host-font)"),
                [],
            )
            .unwrap();
        let mut styles = StyleStore::new();
        let s = styles.create("body", None).unwrap();
        styles
            .set_property(s, StyleProperty::FontFamily, font, StyleAxis::default())
            .unwrap();

        let cascade = Cascade::new(&variables, &styles);
        assert_eq!(
            cascade
                .resolve_property(&[s], StyleProperty::FontFamily, Breakpoint::Main, PseudoState::None)
                .unwrap(),
            Some(ComputedValue::Custom(CustomValue::new("var(--host-font)")))
        );
    }

    #[test]
    fn test_expand_chain_inserts_parent() {
        let variables = VariableStore::new();
        let mut styles = StyleStore::new();
        let base = styles.create("button", None).unwrap();
        let combo = styles.create("primary", Some(base)).unwrap();
        let other = styles.create("wide", None).unwrap();
        let cascade = Cascade::new(&variables, &styles);

        let chain = cascade
            .expand_chain(&ElementStyleAssignment::new([other, combo]))
            .unwrap();
        assert_eq!(chain, [other, base, combo]);

        let chain = cascade
            .expand_chain(&ElementStyleAssignment::new([base, combo, base]))
            .unwrap();
        assert_eq!(chain, [base, combo]);
    }
}
