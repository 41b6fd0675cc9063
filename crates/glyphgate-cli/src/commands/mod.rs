//! CLI command implementations

pub mod generate;
pub mod glyphs;
pub mod render;

mod output;
