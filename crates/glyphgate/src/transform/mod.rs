//! Geometric transforms applied to the composed text.

mod rotate;
mod scale;

pub use rotate::{random_angle, rotate};
pub use scale::scale;
