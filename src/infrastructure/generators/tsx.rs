//! TSX source shared by the React generators
//!
//! Both styles emit the same component shape: a props interface, a function
//! component that destructures its props with defaults, and one root element.
//! They differ only in how the class list is built, which a `Styling`
//! describes.

use crate::domain::entities::{ComponentIr, IrSlot, IrVariant, PropType};
use crate::domain::value_objects::Style;

/// Style-specific parts of a component file
pub(super) struct Styling {
    /// Import lines after the React import
    pub imports: Vec<String>,
    /// Top-level declarations, each newline-terminated
    pub declarations: Vec<String>,
    /// Expressions joined into the element's class list
    pub class_parts: Vec<String>,
}

/// Comment syntax of a generated file
#[derive(Clone, Copy)]
pub(super) enum Comment {
    Line,
    Block,
}

pub(super) fn header(ir: &ComponentIr, style: Style, comment: Comment) -> String {
    let text = format!(
        "Generated by contractor from {}@{} ({}). Local edits are kept across upgrades.",
        ir.name, ir.version, style
    );
    match comment {
        Comment::Line => format!("// {}\n", text),
        Comment::Block => format!("/* {} */\n", text),
    }
}

pub(super) fn quote(s: &str) -> String {
    format!("\"{}\"", s.replace('\\', "\\\\").replace('"', "\\\""))
}

/// Object key, bare when it is a valid identifier
pub(super) fn object_key(s: &str) -> String {
    let mut chars = s.chars();
    let ident = chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_' || c == '$')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$');
    if ident {
        s.to_string()
    } else {
        quote(s)
    }
}

/// `(value, tokens)` rows of a variant table; boolean tables always
/// carry both keys so indexing by the prop is total
pub(super) fn variant_rows(variant: &IrVariant) -> Vec<(String, String)> {
    let lookup = |value: &str| {
        variant
            .options
            .iter()
            .find(|(v, _)| v == value)
            .map(|(_, tokens)| tokens.join(" "))
            .unwrap_or_default()
    };
    match variant.kind {
        PropType::Boolean => ["true", "false"]
            .iter()
            .map(|v| (v.to_string(), lookup(v)))
            .collect(),
        _ => variant
            .options
            .iter()
            .map(|(v, tokens)| (v.clone(), tokens.join(" ")))
            .collect(),
    }
}

fn needs_react(ir: &ComponentIr) -> bool {
    !ir.slots.is_empty() || ir.props.iter().any(|p| p.kind == PropType::Node)
}

/// Slots that are not already declared as props
fn slot_fields(ir: &ComponentIr) -> impl Iterator<Item = &IrSlot> {
    ir.slots
        .iter()
        .filter(|s| !ir.props.iter().any(|p| p.name == s.name))
}

fn push_doc(out: &mut String, indent: &str, doc: Option<&str>) {
    if let Some(doc) = doc.filter(|d| !d.trim().is_empty()) {
        out.push_str(&format!("{}/** {} */\n", indent, doc.trim()));
    }
}

fn props_interface(ir: &ComponentIr) -> String {
    let mut out = format!("export interface {}Props {{\n", ir.pascal_name);
    for prop in &ir.props {
        push_doc(&mut out, "  ", prop.description.as_deref());
        let mark = if prop.optional { "?" } else { "" };
        out.push_str(&format!("  {}{}: {};\n", prop.name, mark, prop.ts_type));
    }
    for slot in slot_fields(ir) {
        push_doc(&mut out, "  ", slot.description.as_deref());
        let mark = if slot.required { "" } else { "?" };
        out.push_str(&format!("  {}{}: React.ReactNode;\n", slot.name, mark));
    }
    out.push_str("  className?: string;\n");
    out.push_str("}\n");
    out
}

fn component_doc(ir: &ComponentIr) -> String {
    let mut paragraphs = Vec::new();
    if let Some(description) = ir.description.as_deref().filter(|d| !d.trim().is_empty()) {
        paragraphs.push(description.trim().to_string());
    }
    if !ir.a11y.keyboard.is_empty() {
        paragraphs.push(format!("Keyboard: {}", ir.a11y.keyboard.join(", ")));
    }
    if paragraphs.is_empty() {
        return String::new();
    }
    let body = paragraphs
        .iter()
        .map(|p| format!(" * {}\n", p))
        .collect::<Vec<_>>()
        .join(" *\n");
    format!("/**\n{} */\n", body)
}

fn opening_tag(ir: &ComponentIr) -> String {
    let mut tag = format!("<{} className={{classes}}", ir.element);
    if let Some(role) = &ir.a11y.role {
        tag.push_str(&format!(" role={}", quote(role)));
    }
    if let Some(label) = &ir.a11y.label_prop {
        tag.push_str(&format!(" aria-label={{{}}}", label));
    }
    tag
}

fn component_function(ir: &ComponentIr, styling: &Styling) -> String {
    let mut out = component_doc(ir);
    out.push_str(&format!("export function {}({{\n", ir.pascal_name));
    for prop in &ir.props {
        match &prop.default {
            Some(default) => out.push_str(&format!("  {} = {},\n", prop.name, default)),
            None => out.push_str(&format!("  {},\n", prop.name)),
        }
    }
    for slot in slot_fields(ir) {
        out.push_str(&format!("  {},\n", slot.name));
    }
    out.push_str("  className,\n");
    out.push_str(&format!("}}: {}Props) {{\n", ir.pascal_name));

    out.push_str("  const classes = [\n");
    for part in &styling.class_parts {
        out.push_str(&format!("    {},\n", part));
    }
    out.push_str("  ]\n    .filter(Boolean)\n    .join(\" \");\n\n");

    let mut children: Vec<String> = ir.named_slots().map(|s| s.name.clone()).collect();
    if ir.has_children() {
        children.push("children".to_string());
    }

    out.push_str("  return (\n");
    if children.is_empty() {
        out.push_str(&format!("    {} />\n", opening_tag(ir)));
    } else {
        out.push_str(&format!("    {}>\n", opening_tag(ir)));
        for child in &children {
            out.push_str(&format!("      {{{}}}\n", child));
        }
        out.push_str(&format!("    </{}>\n", ir.element));
    }
    out.push_str("  );\n}\n");
    out
}

/// `<Name>.tsx`
pub(super) fn component_source(ir: &ComponentIr, style: Style, styling: &Styling) -> String {
    let mut out = header(ir, style, Comment::Line);

    let mut imports = Vec::new();
    if needs_react(ir) {
        imports.push("import * as React from \"react\";".to_string());
    }
    imports.extend(styling.imports.iter().cloned());
    if !imports.is_empty() {
        out.push('\n');
        for import in imports {
            out.push_str(&import);
            out.push('\n');
        }
    }

    for declaration in &styling.declarations {
        out.push('\n');
        out.push_str(declaration);
    }

    out.push('\n');
    out.push_str(&props_interface(ir));
    out.push('\n');
    out.push_str(&component_function(ir, styling));
    out
}

/// `index.ts`
pub(super) fn index_source(ir: &ComponentIr, style: Style) -> String {
    format!(
        "{}\nexport {{ {name} }} from \"./{name}\";\nexport type {{ {name}Props }} from \"./{name}\";\n",
        header(ir, style, Comment::Line),
        name = ir.pascal_name
    )
}
