//! Contract entity - the declarative description of a component version
//!
//! Contracts are authored as YAML, TOML or JSON. This module only holds the
//! data model and its validation rules; reading files is the job of the
//! `ContractStore` adapter.

use std::collections::{BTreeMap, HashSet};
use std::fmt;
use std::path::Path;

use serde::{Deserialize, Deserializer, Serialize};

use crate::domain::value_objects::{ComponentName, Version};
use crate::error::{ContractorError, ContractorResult};

/// A whitespace-separated token list (`"px-4 py-2"` or `["px-4", "py-2"]`)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Tokens(Vec<String>);

impl Tokens {
    pub fn new<I, S>(tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(tokens.into_iter().map(Into::into).collect())
    }

    /// Individual tokens, splitting any entry that itself contains whitespace
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().flat_map(|entry| entry.split_whitespace())
    }

    pub fn is_empty(&self) -> bool {
        self.iter().next().is_none()
    }
}

impl<'de> Deserialize<'de> for Tokens {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Inline(String),
            List(Vec<String>),
        }

        Ok(match Repr::deserialize(deserializer)? {
            Repr::Inline(s) => Tokens(vec![s]),
            Repr::List(list) => Tokens(list),
        })
    }
}

/// Type of a component prop
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PropType {
    String,
    Boolean,
    Number,
    Enum,
    /// Renderable content (`React.ReactNode`)
    Node,
}

impl fmt::Display for PropType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            PropType::String => "string",
            PropType::Boolean => "boolean",
            PropType::Number => "number",
            PropType::Enum => "enum",
            PropType::Node => "node",
        };
        f.write_str(s)
    }
}

/// Literal default value of a prop
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PropValue {
    Bool(bool),
    Number(f64),
    Text(String),
}

impl fmt::Display for PropValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PropValue::Bool(b) => write!(f, "{}", b),
            PropValue::Number(n) => write!(f, "{}", n),
            PropValue::Text(s) => f.write_str(s),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropSpec {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: PropType,
    /// Allowed values for `enum` props
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub values: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<PropValue>,
    #[serde(default)]
    pub required: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotSpec {
    pub name: String,
    #[serde(default)]
    pub required: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Accessibility expectations
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct A11ySpec {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    /// Prop whose value becomes `aria-label`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label_prop: Option<String>,
    #[serde(default)]
    pub focus_visible: bool,
    /// Keys the component must handle (`Enter`, `Space`, ...)
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub keyboard: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StyleSpec {
    #[serde(default)]
    pub base: Tokens,
    /// prop name -> prop value -> tokens
    #[serde(default)]
    pub variants: BTreeMap<String, BTreeMap<String, Tokens>>,
}

/// Contract for one version of one component
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Contract {
    pub name: String,
    pub version: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default = "default_element")]
    pub element: String,
    #[serde(default)]
    pub props: Vec<PropSpec>,
    #[serde(default)]
    pub slots: Vec<SlotSpec>,
    #[serde(default)]
    pub a11y: A11ySpec,
    #[serde(default)]
    pub styles: StyleSpec,
}

fn default_element() -> String {
    "div".to_string()
}

impl Contract {
    pub fn prop(&self, name: &str) -> Option<&PropSpec> {
        self.props.iter().find(|p| p.name == name)
    }

    /// Check the contract against the location it was loaded from
    pub fn validate(
        &self,
        component: &ComponentName,
        version: &Version,
        path: &Path,
    ) -> ContractorResult<()> {
        let invalid = |message: String| ContractorError::InvalidContract {
            path: path.to_path_buf(),
            message,
        };

        if self.name.trim().is_empty() {
            return Err(invalid("name must not be empty".to_string()));
        }
        if self.name != component.as_str() {
            return Err(invalid(format!(
                "name '{}' does not match component directory '{}'",
                self.name, component
            )));
        }
        let declared = Version::parse(&self.version)
            .map_err(|_| invalid(format!("invalid version '{}'", self.version)))?;
        if &declared != version {
            return Err(invalid(format!(
                "version '{}' does not match file name '{}'",
                self.version, version
            )));
        }
        if self.element.trim().is_empty() {
            return Err(invalid("element must not be empty".to_string()));
        }

        let mut seen = HashSet::new();
        for prop in &self.props {
            if !seen.insert(prop.name.as_str()) {
                return Err(invalid(format!("duplicate prop '{}'", prop.name)));
            }
            self.validate_prop(prop).map_err(invalid)?;
        }

        for prop_name in self.styles.variants.keys() {
            match self.prop(prop_name) {
                Some(p) if matches!(p.kind, PropType::Enum | PropType::Boolean) => {}
                Some(p) => {
                    return Err(invalid(format!(
                        "variant '{}' must refer to an enum or boolean prop, not {}",
                        prop_name, p.kind
                    )))
                }
                None => {
                    return Err(invalid(format!(
                        "variant '{}' refers to an undeclared prop",
                        prop_name
                    )))
                }
            }
        }

        if let Some(label) = &self.a11y.label_prop {
            if self.prop(label).is_none() {
                return Err(invalid(format!(
                    "a11y.label_prop '{}' refers to an undeclared prop",
                    label
                )));
            }
        }

        Ok(())
    }

    fn validate_prop(&self, prop: &PropSpec) -> Result<(), String> {
        match (prop.kind, &prop.default) {
            (PropType::Enum, _) if prop.values.is_empty() => {
                Err(format!("enum prop '{}' has no values", prop.name))
            }
            (PropType::Enum, Some(PropValue::Text(d))) if !prop.values.contains(d) => Err(format!(
                "default '{}' of prop '{}' is not one of [{}]",
                d,
                prop.name,
                prop.values.join(", ")
            )),
            (PropType::Enum | PropType::String, Some(d @ (PropValue::Bool(_) | PropValue::Number(_))))
            | (PropType::Boolean, Some(d @ (PropValue::Text(_) | PropValue::Number(_))))
            | (PropType::Number, Some(d @ (PropValue::Text(_) | PropValue::Bool(_)))) => Err(
                format!("default '{}' does not fit {} prop '{}'", d, prop.kind, prop.name),
            ),
            (PropType::Node, Some(_)) => {
                Err(format!("node prop '{}' cannot have a default", prop.name))
            }
            _ => Ok(()),
        }
    }
}
