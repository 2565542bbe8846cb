//! Irrigation scheduling metrics for a vineyard block's soil-moisture sensor depths.

pub mod config;
pub mod error;
pub mod logic;
pub mod models;
pub mod snapshot;

pub use error::{IrrigationError, Result};
pub use logic::{compute, CalculationInputs};
