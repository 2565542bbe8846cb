use super::ZoneId;
use crate::error::{IrrigationError, Result};
use serde::{Deserialize, Serialize};

/// Static retention constants for one sensor depth, in sensor moisture units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ZoneConfig {
    pub saturation_point: f64,
    pub field_capacity_point: f64,
    pub perm_wilting_point: f64,
}

impl ZoneConfig {
    pub fn new(saturation_point: f64, field_capacity_point: f64, perm_wilting_point: f64) -> Self {
        Self {
            saturation_point,
            field_capacity_point,
            perm_wilting_point,
        }
    }

    /// Moisture span a plant can actually draw on.
    pub fn available_water_capacity(&self) -> f64 {
        self.field_capacity_point - self.perm_wilting_point
    }

    /// Checks saturation >= field capacity >= wilting point.
    ///
    /// Field capacity equal to wilting point passes here; only the AWC ratio
    /// rejects it, since FC ratios remain well defined for such a zone.
    pub fn validate(&self, zone: ZoneId) -> Result<()> {
        let invalid = |reason: String| IrrigationError::InvalidZoneConfig { zone, reason };

        if !(self.saturation_point.is_finite()
            && self.field_capacity_point.is_finite()
            && self.perm_wilting_point.is_finite())
        {
            return Err(invalid("retention points must be finite".into()));
        }
        if self.field_capacity_point <= 0.0 {
            return Err(invalid(format!(
                "field capacity point must be positive, got {}",
                self.field_capacity_point
            )));
        }
        if self.saturation_point < self.field_capacity_point {
            return Err(invalid(format!(
                "saturation point {} is below field capacity point {}",
                self.saturation_point, self.field_capacity_point
            )));
        }
        if self.field_capacity_point < self.perm_wilting_point {
            return Err(invalid(format!(
                "field capacity point {} is below permanent wilting point {}",
                self.field_capacity_point, self.perm_wilting_point
            )));
        }
        Ok(())
    }
}
