//! CSS Modules Generator
//!
//! Generates:
//! - `<Name>/<Name>.tsx` - component reading class names from the module
//! - `<Name>/<Name>.module.css` - one rule per class list, composing the
//!   utility classes from global scope
//! - `<Name>/index.ts` - re-exports
//!
//! Variant rules are named `<prop>-<value>`, so the component indexes the
//! module with a template string for enum and boolean props alike.

use std::path::Path;

use crate::domain::entities::{Artifact, ComponentIr};
use crate::domain::ports::Generator;
use crate::domain::value_objects::Style;

use super::tsx::{self, Comment, Styling};

pub struct CssModulesGenerator;

impl CssModulesGenerator {
    pub fn new() -> Self {
        Self
    }

    fn styling(&self, ir: &ComponentIr) -> Styling {
        let mut class_parts = vec!["styles.base".to_string()];
        for variant in &ir.variants {
            class_parts.push(format!(
                "styles[`{prop}-${{{prop}}}`]",
                prop = variant.prop
            ));
        }
        class_parts.push("className".to_string());

        Styling {
            imports: vec![format!(
                "import styles from \"./{}.module.css\";",
                ir.pascal_name
            )],
            declarations: Vec::new(),
            class_parts,
        }
    }

    fn stylesheet(&self, ir: &ComponentIr) -> String {
        let mut out = tsx::header(ir, Style::CssModules, Comment::Block);
        push_rule(&mut out, "base", &ir.base_tokens.join(" "));

        if ir.a11y.focus_visible {
            out.push_str("\n.base:focus-visible {\n");
            out.push_str("  outline: 2px solid currentColor;\n");
            out.push_str("  outline-offset: 2px;\n");
            out.push_str("}\n");
        }

        for variant in &ir.variants {
            for (value, tokens) in tsx::variant_rows(variant) {
                push_rule(&mut out, &format!("{}-{}", variant.prop, value), &tokens);
            }
        }
        out
    }
}

fn push_rule(out: &mut String, class: &str, tokens: &str) {
    out.push_str(&format!("\n.{} {{\n", class));
    if !tokens.is_empty() {
        out.push_str(&format!("  composes: {} from global;\n", tokens));
    }
    out.push_str("}\n");
}

impl Default for CssModulesGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl Generator for CssModulesGenerator {
    fn style(&self) -> Style {
        Style::CssModules
    }

    fn generate(&self, ir: &ComponentIr, output_dir: &Path) -> Vec<Artifact> {
        let dir = output_dir.join(&ir.pascal_name);
        vec![
            Artifact::new(
                dir.join(format!("{}.tsx", ir.pascal_name)),
                tsx::component_source(ir, Style::CssModules, &self.styling(ir)),
            ),
            Artifact::new(
                dir.join(format!("{}.module.css", ir.pascal_name)),
                self.stylesheet(ir),
            ),
            Artifact::new(
                dir.join("index.ts"),
                tsx::index_source(ir, Style::CssModules),
            ),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::generators::tests::{ir_from_yaml, BUTTON};
    use insta::assert_snapshot;

    fn generate() -> Vec<Artifact> {
        CssModulesGenerator::new().generate(&ir_from_yaml(BUTTON), Path::new("src/components"))
    }

    #[test]
    fn generates_three_files() {
        let names: Vec<_> = generate()
            .iter()
            .map(|a| a.path().file_name().unwrap().to_string_lossy().to_string())
            .collect();
        assert_eq!(names, vec!["Button.tsx", "Button.module.css", "index.ts"]);
    }

    #[test]
    fn stylesheet() {
        assert_snapshot!(generate()[1].content(), @r#"
/* Generated by contractor from Button@1.0.0 (css-modules). Local edits are kept across upgrades. */

.base {
  composes: inline-flex items-center from global;
}

.base:focus-visible {
  outline: 2px solid currentColor;
  outline-offset: 2px;
}

.disabled-true {
  composes: opacity-50 from global;
}

.disabled-false {
}

.size-sm {
  composes: h-8 px-3 from global;
}

.size-md {
  composes: h-10 px-4 from global;
}
"#);
    }

    #[test]
    fn component_reads_classes_from_module() {
        let artifacts = generate();
        let source = artifacts[0].content();

        assert!(source.contains("import styles from \"./Button.module.css\";\n"));
        assert!(source.contains("    styles.base,\n"));
        assert!(source.contains("    styles[`disabled-${disabled}`],\n"));
        assert!(source.contains("    styles[`size-${size}`],\n"));
        assert!(!source.contains("const base"));
    }
}
