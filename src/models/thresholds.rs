use super::ZoneId;
use crate::error::{IrrigationError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub const DEFAULT_FC_HIGH: f64 = 0.95;
pub const DEFAULT_FC_LOW: f64 = 0.85;
pub const DEFAULT_MULTIPLIER: f64 = 1.0;

/// Grower-chosen targets and the volume applied at the last irrigation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Thresholds {
    /// Target fraction of field capacity after irrigating.
    pub fc_high: f64,
    /// Fraction of field capacity at which the next irrigation is due.
    pub fc_low: f64,
    /// Empirical safety factor on the root-zone deficit.
    pub multiplier: f64,
    pub last_irrigation_gpp: f64,
}

impl Thresholds {
    pub fn validate(&self) -> Result<()> {
        if !(self.fc_low.is_finite() && self.fc_high.is_finite()) {
            return Err(IrrigationError::InvalidConfig(
                "fc_high and fc_low must be finite".into(),
            ));
        }
        if self.fc_low <= 0.0 || self.fc_low > self.fc_high {
            return Err(IrrigationError::InvalidConfig(format!(
                "expected 0 < fc_low <= fc_high, got fc_low={} fc_high={}",
                self.fc_low, self.fc_high
            )));
        }
        if !self.multiplier.is_finite() || self.multiplier <= 0.0 {
            return Err(IrrigationError::InvalidConfig(format!(
                "multiplier must be positive, got {}",
                self.multiplier
            )));
        }
        if !self.last_irrigation_gpp.is_finite() || self.last_irrigation_gpp < 0.0 {
            return Err(IrrigationError::InvalidConfig(format!(
                "last_irrigation_gpp must be non-negative, got {}",
                self.last_irrigation_gpp
            )));
        }
        Ok(())
    }
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            fc_high: DEFAULT_FC_HIGH,
            fc_low: DEFAULT_FC_LOW,
            multiplier: DEFAULT_MULTIPLIER,
            last_irrigation_gpp: 0.0,
        }
    }
}

/// Share of each shallow zone's moisture loss attributed to surface evaporation
/// rather than root uptake. Zones absent from the table get no correction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EvaporationTable(BTreeMap<ZoneId, f64>);

impl EvaporationTable {
    pub fn new(fractions: BTreeMap<ZoneId, f64>) -> Self {
        Self(fractions)
    }

    pub fn fraction(&self, zone: ZoneId) -> f64 {
        self.0.get(&zone).copied().unwrap_or(0.0)
    }

    pub fn validate(&self) -> Result<()> {
        for (zone, fraction) in &self.0 {
            if !fraction.is_finite() || !(0.0..=1.0).contains(fraction) {
                return Err(IrrigationError::InvalidConfig(format!(
                    "evaporation fraction for zone {} must be within [0, 1], got {}",
                    zone, fraction
                )));
            }
        }
        Ok(())
    }
}

impl Default for EvaporationTable {
    fn default() -> Self {
        Self(BTreeMap::from([(ZoneId::new(4), 1.0), (ZoneId::new(8), 0.2)]))
    }
}
