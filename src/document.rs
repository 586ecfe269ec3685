//! Declarative YAML seed documents.
//!
//! A document declares collections, their modes and variables, then styles
//! with their per-axis property blocks:
//!
//! ```yaml
//! collections:
//!   - name: Theme
//!     modes: [Light, Dark]      # the first renames the default mode
//!     variables:
//!       - name: bg
//!         type: color
//!         value: "#fff"         # default mode
//!         modes:
//!           Dark: "#000"
//!       - name: surface
//!         type: color
//!         value: { alias: bg }  # same collection, or "Collection/name"
//!
//! styles:
//!   - name: card
//!     set:                      # shorthand for the main:none block
//!       background-color: { var: Theme/surface }
//!       padding-top: 16px
//!     modes:
//!       Theme: Dark
//!     at:
//!       small:
//!         set: { padding-top: 8px }
//!       main:hover:
//!         set: { opacity: 0.9 }
//!   - name: card-flat
//!     parent: card
//!     set: { box-shadow: unset }
//! ```
//!
//! Everything is applied in document order, so aliases, variable references
//! and combo parents must refer to earlier declarations. Values use the same
//! CSS-like text accepted by [`Value::parse`] and
//! [`StyleProperty::parse_value`]; bare YAML numbers are read as that text.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::debug;

use crate::axis::StyleAxis;
use crate::error::{Error, Result};
use crate::ids::{CollectionId, StyleId, VariableId};
use crate::project::Project;
use crate::style::{PropertyValue, StyleProperty};
use crate::value::{CustomValue, Value, VariableType, VariableValue};

/// A parsed seed document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Document {
    #[serde(default)]
    pub collections: Vec<CollectionDoc>,
    #[serde(default)]
    pub styles: Vec<StyleDoc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CollectionDoc {
    pub name: String,
    /// Mode names; the first one names the default mode.
    #[serde(default)]
    pub modes: Vec<String>,
    #[serde(default)]
    pub variables: Vec<VariableDoc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct VariableDoc {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: VariableType,
    /// Default-mode value.
    pub value: ValueDoc,
    /// Per-mode overrides keyed by mode name.
    #[serde(default)]
    pub modes: BTreeMap<String, ValueDoc>,
}

/// A variable entry as written in a document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ValueDoc {
    Number(f64),
    Text(String),
    Alias { alias: String },
    Custom { custom: String },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StyleDoc {
    pub name: String,
    /// Name of the combo parent.
    #[serde(default)]
    pub parent: Option<String>,
    /// Properties of the `main:none` block.
    #[serde(default)]
    pub set: BTreeMap<String, PropertyDoc>,
    /// Mode bindings of the `main:none` block, collection name to mode name.
    #[serde(default)]
    pub modes: BTreeMap<String, String>,
    /// Other blocks keyed by `breakpoint` or `breakpoint:pseudo`.
    #[serde(default)]
    pub at: BTreeMap<StyleAxis, BlockDoc>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BlockDoc {
    #[serde(default)]
    pub set: BTreeMap<String, PropertyDoc>,
    #[serde(default)]
    pub modes: BTreeMap<String, String>,
}

/// A property value as written in a document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PropertyDoc {
    Number(f64),
    Text(String),
    /// Reference to a variable as `Collection/name`.
    Variable { var: String },
}

impl Document {
    pub fn from_yaml(text: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(text)?)
    }

    /// Builds a fresh project from this document.
    pub fn build(&self) -> Result<Project> {
        let mut project = Project::new();
        self.apply(&mut project)?;
        Ok(project)
    }

    /// Applies this document on top of `project`.
    ///
    /// Applies to a copy; `project` is only replaced when every declaration
    /// succeeds.
    pub fn apply(&self, project: &mut Project) -> Result<()> {
        let mut draft = project.clone();
        for collection in &self.collections {
            apply_collection(&mut draft, collection)?;
        }
        for style in &self.styles {
            apply_style(&mut draft, style)?;
        }
        *project = draft;
        debug!(
            collections = self.collections.len(),
            styles = self.styles.len(),
            "applied document"
        );
        Ok(())
    }
}

impl Project {
    /// Parses a YAML seed document and builds a project from it.
    ///
    /// ```rust
    /// use stylecascade::{Breakpoint, Project, PseudoState, StyleProperty};
    ///
    /// let project = Project::from_yaml(r##"
    /// collections:
    ///   - name: Theme
    ///     modes: [Light, Dark]
    ///     variables:
    ///       - { name: bg, type: color, value: "#fff", modes: { Dark: "#000" } }
    /// styles:
    ///   - name: panel
    ///     set: { background-color: { var: Theme/bg } }
    ///     modes: { Theme: Dark }
    /// "##).unwrap();
    ///
    /// let panel = project.styles().style_by_name("panel").unwrap().id();
    /// let bg = project
    ///     .cascade()
    ///     .resolve_property(&[panel], StyleProperty::BackgroundColor, Breakpoint::Main, PseudoState::Hover)
    ///     .unwrap()
    ///     .unwrap();
    /// assert_eq!(bg.to_string(), "#000000");
    /// ```
    pub fn from_yaml(text: &str) -> Result<Project> {
        Document::from_yaml(text)?.build()
    }
}

fn apply_collection(project: &mut Project, doc: &CollectionDoc) -> Result<()> {
    let collection = project.create_collection(&doc.name)?;
    let mut names = doc.modes.iter();
    if let Some(first) = names.next() {
        let default = project.variables().default_mode(collection)?;
        project.rename_mode(collection, default, first)?;
    }
    for name in names {
        project.create_mode(collection, name)?;
    }

    for var in &doc.variables {
        let initial = variable_value(project, collection, var.ty, &var.value)?;
        let mut overrides = Vec::with_capacity(var.modes.len());
        for (mode_name, value) in &var.modes {
            let mode = project
                .variables()
                .collection(collection)?
                .mode_by_name(mode_name)
                .map(|m| m.id)
                .ok_or_else(|| Error::not_found("mode", format!("{}/{}", doc.name, mode_name)))?;
            overrides.push((mode, variable_value(project, collection, var.ty, value)?));
        }
        project.create_variable(collection, &var.name, var.ty, initial, overrides)?;
    }
    Ok(())
}

fn apply_style(project: &mut Project, doc: &StyleDoc) -> Result<()> {
    let parent = match &doc.parent {
        Some(name) => Some(style_named(project, name)?),
        None => None,
    };
    let style = project.create_style(&doc.name, parent)?;

    let main = BlockDoc {
        set: doc.set.clone(),
        modes: doc.modes.clone(),
    };
    apply_block(project, style, StyleAxis::default(), &main)?;
    for (axis, block) in &doc.at {
        apply_block(project, style, *axis, block)?;
    }
    Ok(())
}

fn apply_block(project: &mut Project, style: StyleId, axis: StyleAxis, doc: &BlockDoc) -> Result<()> {
    for (name, value) in &doc.set {
        let prop = StyleProperty::from_name(name)?;
        let value = match value {
            PropertyDoc::Number(n) => prop.parse_value(&n.to_string())?,
            PropertyDoc::Text(text) => prop.parse_value(text)?,
            PropertyDoc::Variable { var } => PropertyValue::Variable(variable_path(project, None, var)?),
        };
        project.set_property(style, prop, value, axis)?;
    }

    for (collection_name, mode_name) in &doc.modes {
        let collection = project
            .variables()
            .collection_by_name(collection_name)
            .ok_or_else(|| Error::not_found("collection", collection_name))?;
        let mode = collection
            .mode_by_name(mode_name)
            .map(|m| m.id)
            .ok_or_else(|| Error::not_found("mode", format!("{}/{}", collection_name, mode_name)))?;
        let collection = collection.id();
        project.set_variable_mode(style, collection, mode, axis)?;
    }
    Ok(())
}

fn variable_value(
    project: &Project,
    collection: CollectionId,
    ty: VariableType,
    doc: &ValueDoc,
) -> Result<VariableValue> {
    Ok(match doc {
        ValueDoc::Number(n) => VariableValue::Value(Value::parse(ty, &n.to_string())?),
        ValueDoc::Text(text) => VariableValue::Value(Value::parse(ty, text)?),
        ValueDoc::Alias { alias } => VariableValue::Alias(variable_path(project, Some(collection), alias)?),
        ValueDoc::Custom { custom } => VariableValue::Custom(CustomValue::new(custom.as_str())),
    })
}

/// Looks up `Collection/name`, or a bare `name` inside `scope`.
fn variable_path(project: &Project, scope: Option<CollectionId>, path: &str) -> Result<VariableId> {
    let variables = project.variables();
    let (collection, name) = match path.split_once('/') {
        Some((collection_name, name)) => {
            let collection = variables
                .collection_by_name(collection_name)
                .ok_or_else(|| Error::not_found("collection", collection_name))?;
            (collection.id(), name)
        }
        None => match scope {
            Some(collection) => (collection, path),
            None => return Err(Error::invalid_value("a 'Collection/name' variable path", path)),
        },
    };
    variables
        .variable_by_name(collection, name)
        .map(|v| v.id())
        .ok_or_else(|| Error::not_found("variable", path))
}

fn style_named(project: &Project, name: &str) -> Result<StyleId> {
    project
        .styles()
        .style_by_name(name)
        .map(|s| s.id())
        .ok_or_else(|| Error::not_found("style", name))
}
