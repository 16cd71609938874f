//! Generator port - turns a component IR into artifacts
//!
//! One generator per `Style`. Generation must be deterministic: the same IR
//! and output directory always yield byte-identical artifacts, which is what
//! lets base snapshots serve as merge ancestors.

use std::path::Path;

use crate::domain::entities::{Artifact, ComponentIr};
use crate::domain::value_objects::Style;

pub trait Generator: Send + Sync {
    /// Style this generator implements
    fn style(&self) -> Style;

    /// Artifacts for `ir`, with paths under `output_dir`, in a stable order
    fn generate(&self, ir: &ComponentIr, output_dir: &Path) -> Vec<Artifact>;
}

/// Pick the generator for a style from a registry
pub fn generator_for(generators: &[Box<dyn Generator>], style: Style) -> Option<&dyn Generator> {
    generators
        .iter()
        .find(|g| g.style() == style)
        .map(|g| g.as_ref())
}
