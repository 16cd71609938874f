//! Component IR - the normalized, defaults-resolved form of a contract
//!
//! Generators consume only this type. Everything that could make two runs
//! over the same contract differ (map ordering, duplicate tokens, implicit
//! defaults) is settled here so generation stays deterministic.

use std::collections::HashSet;

use crate::domain::entities::contract::{Contract, PropSpec, PropType, PropValue, Tokens};
use crate::domain::value_objects::{ComponentName, Version};

/// A prop as it appears in the generated props interface
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IrProp {
    pub name: String,
    pub kind: PropType,
    /// TypeScript type expression
    pub ts_type: String,
    pub optional: bool,
    /// TypeScript literal used as the destructuring default
    pub default: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IrSlot {
    pub name: String,
    pub required: bool,
    pub description: Option<String>,
}

/// Class table for one variant prop
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IrVariant {
    pub prop: String,
    pub kind: PropType,
    /// (value, tokens) in declaration order of the prop's values
    pub options: Vec<(String, Vec<String>)>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IrA11y {
    pub role: Option<String>,
    pub label_prop: Option<String>,
    pub focus_visible: bool,
    pub keyboard: Vec<String>,
}

/// Generator input for one component version
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComponentIr {
    pub name: ComponentName,
    /// Identifier used for the component, file and directory names
    pub pascal_name: String,
    pub version: Version,
    pub description: Option<String>,
    pub element: String,
    pub props: Vec<IrProp>,
    pub slots: Vec<IrSlot>,
    pub a11y: IrA11y,
    pub base_tokens: Vec<String>,
    pub variants: Vec<IrVariant>,
}

/// Tokens split on whitespace with duplicates removed, first occurrence kept
pub fn normalize_tokens(tokens: &Tokens) -> Vec<String> {
    let mut seen = HashSet::new();
    tokens
        .iter()
        .filter(|t| seen.insert(*t))
        .map(str::to_string)
        .collect()
}

fn ts_string(s: &str) -> String {
    format!("\"{}\"", s.replace('\\', "\\\\").replace('"', "\\\""))
}

fn ts_type(prop: &PropSpec) -> String {
    match prop.kind {
        PropType::String => "string".to_string(),
        PropType::Boolean => "boolean".to_string(),
        PropType::Number => "number".to_string(),
        PropType::Node => "React.ReactNode".to_string(),
        PropType::Enum => prop
            .values
            .iter()
            .map(|v| ts_string(v))
            .collect::<Vec<_>>()
            .join(" | "),
    }
}

fn ts_default(prop: &PropSpec) -> Option<String> {
    if prop.required {
        return None;
    }
    match (&prop.default, prop.kind) {
        (Some(PropValue::Text(s)), _) => Some(ts_string(s)),
        (Some(value), _) => Some(value.to_string()),
        (None, PropType::String) => Some("\"\"".to_string()),
        (None, PropType::Boolean) => Some("false".to_string()),
        (None, PropType::Number) => Some("0".to_string()),
        (None, PropType::Enum) => prop.values.first().map(|v| ts_string(v)),
        (None, PropType::Node) => None,
    }
}

impl ComponentIr {
    /// Derive the IR from a validated contract
    pub fn from_contract(name: ComponentName, version: Version, contract: &Contract) -> Self {
        let props = contract
            .props
            .iter()
            .map(|p| IrProp {
                name: p.name.clone(),
                kind: p.kind,
                ts_type: ts_type(p),
                optional: !p.required,
                default: ts_default(p),
                description: p.description.clone(),
            })
            .collect();

        let slots = contract
            .slots
            .iter()
            .map(|s| IrSlot {
                name: s.name.clone(),
                required: s.required,
                description: s.description.clone(),
            })
            .collect();

        // BTreeMap keys are already sorted by prop name
        let variants = contract
            .styles
            .variants
            .iter()
            .filter_map(|(prop_name, table)| {
                let prop = contract.prop(prop_name)?;
                let order: Vec<String> = match prop.kind {
                    PropType::Enum => prop.values.clone(),
                    _ => vec!["true".to_string(), "false".to_string()],
                };
                let mut options: Vec<(String, Vec<String>)> = order
                    .iter()
                    .filter_map(|value| {
                        table
                            .get(value)
                            .map(|tokens| (value.clone(), normalize_tokens(tokens)))
                    })
                    .collect();
                // Keys outside the declared value order go last, sorted
                options.extend(
                    table
                        .iter()
                        .filter(|(value, _)| !order.contains(value))
                        .map(|(value, tokens)| (value.clone(), normalize_tokens(tokens))),
                );
                Some(IrVariant {
                    prop: prop_name.clone(),
                    kind: prop.kind,
                    options,
                })
            })
            .collect();

        Self {
            pascal_name: name.pascal_case(),
            name,
            version,
            description: contract.description.clone(),
            element: contract.element.clone(),
            props,
            slots,
            a11y: IrA11y {
                role: contract.a11y.role.clone(),
                label_prop: contract.a11y.label_prop.clone(),
                focus_visible: contract.a11y.focus_visible,
                keyboard: contract.a11y.keyboard.clone(),
            },
            base_tokens: normalize_tokens(&contract.styles.base),
            variants,
        }
    }

    /// Whether the component renders children
    pub fn has_children(&self) -> bool {
        self.slots.iter().any(|s| s.name == "children")
            || self.props.iter().any(|p| p.name == "children")
    }

    /// Named slots other than `children`
    pub fn named_slots(&self) -> impl Iterator<Item = &IrSlot> {
        self.slots.iter().filter(|s| s.name != "children")
    }
}
