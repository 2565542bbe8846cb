use super::zone_set::{reading, zone_config};
use crate::error::{IrrigationError, Result};
use crate::models::{MoistureReadings, ZoneConfigs, ZoneId};

/// Current moisture as a fraction of field capacity, per selected zone.
pub fn percent_fc_by_zone(
    root_zones: &[ZoneId],
    readings: &MoistureReadings,
    configs: &ZoneConfigs,
) -> Result<Vec<(ZoneId, f64)>> {
    root_zones
        .iter()
        .map(|&zone| -> Result<(ZoneId, f64)> {
            let current = reading(readings, zone)?.current;
            let cfg = zone_config(configs, zone)?;
            if cfg.field_capacity_point == 0.0 {
                return Err(IrrigationError::DivisionByZero("field capacity point"));
            }
            Ok((zone, current / cfg.field_capacity_point))
        })
        .collect()
}

/// Position of current moisture between wilting point (0) and field capacity (1),
/// per selected zone.
pub fn percent_awc_by_zone(
    root_zones: &[ZoneId],
    readings: &MoistureReadings,
    configs: &ZoneConfigs,
) -> Result<Vec<(ZoneId, f64)>> {
    root_zones
        .iter()
        .map(|&zone| -> Result<(ZoneId, f64)> {
            let current = reading(readings, zone)?.current;
            let cfg = zone_config(configs, zone)?;
            let awc = cfg.available_water_capacity();
            if awc == 0.0 {
                return Err(IrrigationError::DegenerateZoneConfig(zone));
            }
            Ok((zone, (current - cfg.perm_wilting_point) / awc))
        })
        .collect()
}

fn mean(ratios: &[(ZoneId, f64)]) -> Result<f64> {
    if ratios.is_empty() {
        return Err(IrrigationError::EmptySelection);
    }
    Ok(ratios.iter().map(|(_, r)| r).sum::<f64>() / ratios.len() as f64)
}

/// Unweighted mean of the per-zone FC ratios across the root zone.
pub fn average_percent_fc(
    root_zones: &[ZoneId],
    readings: &MoistureReadings,
    configs: &ZoneConfigs,
) -> Result<f64> {
    if root_zones.is_empty() {
        return Err(IrrigationError::EmptySelection);
    }
    mean(&percent_fc_by_zone(root_zones, readings, configs)?)
}

/// Unweighted mean of the per-zone AWC ratios across the root zone.
pub fn average_percent_awc(
    root_zones: &[ZoneId],
    readings: &MoistureReadings,
    configs: &ZoneConfigs,
) -> Result<f64> {
    if root_zones.is_empty() {
        return Err(IrrigationError::EmptySelection);
    }
    mean(&percent_awc_by_zone(root_zones, readings, configs)?)
}
