use crate::models::ZoneId;
use chrono::NaiveDate;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum IrrigationError {
    #[error("Missing zone data: zone {zone} not found in {dataset}")]
    MissingZoneData { zone: ZoneId, dataset: &'static str },

    #[error("Root zone selection is empty")]
    EmptySelection,

    #[error("Degenerate zone config: zone {0} has field capacity equal to permanent wilting point")]
    DegenerateZoneConfig(ZoneId),

    #[error("Invalid zone config for zone {zone}: {reason}")]
    InvalidZoneConfig { zone: ZoneId, reason: String },

    #[error("Division by zero: {0}")]
    DivisionByZero(&'static str),

    #[error("Invalid absorption rate: {0}")]
    InvalidAbsorptionRate(f64),

    #[error("Invalid zone ordering: {0}")]
    InvalidZoneOrdering(String),

    #[error("Invalid date range: current date {current} is before last irrigation {last}")]
    InvalidDateRange { last: NaiveDate, current: NaiveDate },

    #[error("Invalid configuration value: {0}")]
    InvalidConfig(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(String),

    #[error("YAML parsing error: {0}")]
    Yaml(String),

    #[error("JSON error: {0}")]
    Json(String),
}

// Kept as strings so reports holding per-metric errors stay Clone + PartialEq.
impl From<std::io::Error> for IrrigationError {
    fn from(e: std::io::Error) -> Self {
        IrrigationError::Io(e.to_string())
    }
}

impl From<serde_yaml::Error> for IrrigationError {
    fn from(e: serde_yaml::Error) -> Self {
        IrrigationError::Yaml(e.to_string())
    }
}

impl From<serde_json::Error> for IrrigationError {
    fn from(e: serde_json::Error) -> Self {
        IrrigationError::Json(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, IrrigationError>;
