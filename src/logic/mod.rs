pub mod drawdown;
pub mod engine;
pub mod irrigation;
pub mod ratios;
pub mod zone_set;

#[cfg(test)]
pub(crate) mod fixtures;

pub use engine::{compute, CalculationInputs};
