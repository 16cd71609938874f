//! Test fixtures - Button contracts and conflict helpers.
//!
//! The versions differ in controlled ways:
//! - 1.1.0 appends `rounded-md` to the base classes
//! - 2.0.0 also rewrites the description

pub const BUTTON_TSX: &str = "src/components/Button/Button.tsx";
pub const BUTTON_INDEX: &str = "src/components/Button/index.ts";

pub const BUTTON_1_0_0: &str = r#"
name: Button
version: 1.0.0
description: Clickable action
element: button
props:
  - name: label
    type: string
    required: true
slots:
  - name: children
a11y:
  role: button
  label_prop: label
styles:
  base: inline-flex items-center
"#;

pub const BUTTON_1_1_0: &str = r#"
name: Button
version: 1.1.0
description: Clickable action
element: button
props:
  - name: label
    type: string
    required: true
slots:
  - name: children
a11y:
  role: button
  label_prop: label
styles:
  base: inline-flex items-center rounded-md
"#;

pub const BUTTON_2_0_0: &str = r#"
name: Button
version: 2.0.0
description: Primary action trigger
element: button
props:
  - name: label
    type: string
    required: true
slots:
  - name: children
a11y:
  role: button
  label_prop: label
styles:
  base: inline-flex items-center rounded-md
"#;

/// Resolve every conflict block by keeping the incoming side
pub fn take_incoming(text: &str) -> String {
    #[derive(PartialEq)]
    enum Section {
        Outside,
        Local,
        Incoming,
    }

    let mut section = Section::Outside;
    let mut out = String::new();
    for line in text.split_inclusive('\n') {
        if line.starts_with("<<<<<<< ") {
            section = Section::Local;
        } else if line.starts_with("=======") && section == Section::Local {
            section = Section::Incoming;
        } else if line.starts_with(">>>>>>> ") && section == Section::Incoming {
            section = Section::Outside;
        } else if section != Section::Local {
            out.push_str(line);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn take_incoming_drops_local_side_and_markers() {
        let text = "a\n<<<<<<< LOCAL\nmine\n=======\ntheirs\n>>>>>>> INCOMING 2.0.0\nb\n";
        assert_eq!(take_incoming(text), "a\ntheirs\nb\n");
    }
}
