//! Tailwind Generator
//!
//! Generates:
//! - `<Name>/<Name>.tsx` - component with utility class strings inlined
//! - `<Name>/index.ts` - re-exports
//!
//! Every class list is a single-line string assignment
//! (`const base = "...";`) so concurrent token edits stay resolvable.

use std::path::Path;

use crate::domain::entities::{Artifact, ComponentIr, PropType};
use crate::domain::ports::Generator;
use crate::domain::value_objects::Style;

use super::tsx::{self, Styling};

const FOCUS_RING: &str = "focus-visible:outline-none focus-visible:ring-2 focus-visible:ring-offset-2";

pub struct TailwindGenerator;

impl TailwindGenerator {
    pub fn new() -> Self {
        Self
    }

    fn styling(&self, ir: &ComponentIr) -> Styling {
        let mut declarations = vec![format!(
            "const base = {};\n",
            tsx::quote(&ir.base_tokens.join(" "))
        )];
        let mut class_parts = vec!["base".to_string()];

        if ir.a11y.focus_visible {
            declarations.push(format!("const focusRing = {};\n", tsx::quote(FOCUS_RING)));
            class_parts.push("focusRing".to_string());
        }

        for variant in &ir.variants {
            let table = format!("{}Classes", variant.prop);
            let mut decl = format!("const {} = {{\n", table);
            for (value, tokens) in tsx::variant_rows(variant) {
                decl.push_str(&format!(
                    "  {}: {},\n",
                    tsx::object_key(&value),
                    tsx::quote(&tokens)
                ));
            }
            decl.push_str("} as const;\n");
            declarations.push(decl);

            class_parts.push(match variant.kind {
                PropType::Boolean => {
                    format!("{}[{} ? \"true\" : \"false\"]", table, variant.prop)
                }
                _ => format!("{}[{}]", table, variant.prop),
            });
        }

        class_parts.push("className".to_string());
        Styling {
            imports: Vec::new(),
            declarations,
            class_parts,
        }
    }
}

impl Default for TailwindGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl Generator for TailwindGenerator {
    fn style(&self) -> Style {
        Style::Tailwind
    }

    fn generate(&self, ir: &ComponentIr, output_dir: &Path) -> Vec<Artifact> {
        let dir = output_dir.join(&ir.pascal_name);
        vec![
            Artifact::new(
                dir.join(format!("{}.tsx", ir.pascal_name)),
                tsx::component_source(ir, Style::Tailwind, &self.styling(ir)),
            ),
            Artifact::new(dir.join("index.ts"), tsx::index_source(ir, Style::Tailwind)),
        ]
    }
}
