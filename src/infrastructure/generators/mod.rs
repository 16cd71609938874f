//! Component Generators
//!
//! These implement the Generator port from the domain layer, one per
//! `Style`. They turn a `ComponentIr` into React source artifacts.

mod css_modules;
mod tailwind;
mod tsx;

pub use css_modules::CssModulesGenerator;
pub use tailwind::TailwindGenerator;

use crate::domain::ports::Generator;
use crate::domain::value_objects::Style;

/// Get all available generators
pub fn all_generators() -> Vec<Box<dyn Generator>> {
    vec![
        Box::new(TailwindGenerator::new()),
        Box::new(CssModulesGenerator::new()),
    ]
}

/// Get the generator for a specific style
pub fn get_generator(style: Style) -> Box<dyn Generator> {
    match style {
        Style::Tailwind => Box::new(TailwindGenerator::new()),
        Style::CssModules => Box::new(CssModulesGenerator::new()),
    }
}
