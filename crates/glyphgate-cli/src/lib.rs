//! Glyphgate CLI library.
//!
//! Command implementations and config loading for the `glyphgate` binary.

pub mod commands;
pub mod input;
