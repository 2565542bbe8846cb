//! Volume needed to bring the root zone up to the `fc_high` target.
//!
//! Water applied at the surface first wets the zones above the root zone, so
//! their shortfall from field capacity is added to the (multiplied) root-zone
//! deficit. The result is scaled by how much summed moisture rose per unit of
//! volume during the previous irrigation.

use super::zone_set::{sum_current, sum_field_capacity, sum_saturation, zones_above_root_zone};
use crate::error::{IrrigationError, Result};
use crate::models::{MoistureReadings, ZoneConfigs, ZoneId};

/// Σ current − Σ saturation over the zones above the root zone.
pub fn sm_minus_saturation_above(
    root_zones: &[ZoneId],
    all_zones: &[ZoneId],
    readings: &MoistureReadings,
    configs: &ZoneConfigs,
) -> Result<f64> {
    let above = zones_above_root_zone(root_zones, all_zones)?;
    Ok(sum_current(&above, readings)? - sum_saturation(&above, configs)?)
}

/// Σ current − Σ field capacity over the zones above the root zone.
pub fn sm_minus_fc_above(
    root_zones: &[ZoneId],
    all_zones: &[ZoneId],
    readings: &MoistureReadings,
    configs: &ZoneConfigs,
) -> Result<f64> {
    let above = zones_above_root_zone(root_zones, all_zones)?;
    Ok(sum_current(&above, readings)? - sum_field_capacity(&above, configs)?)
}

/// Headroom between field capacity and saturation above the root zone,
/// as a negative number (Σ FC − Σ saturation).
pub fn excess_above_root_zone(
    root_zones: &[ZoneId],
    all_zones: &[ZoneId],
    readings: &MoistureReadings,
    configs: &ZoneConfigs,
) -> Result<f64> {
    Ok(sm_minus_saturation_above(root_zones, all_zones, readings, configs)?
        - sm_minus_fc_above(root_zones, all_zones, readings, configs)?)
}

/// Σ current − (Σ field capacity × fc_high) over the root zone. Negative means
/// the root zone is short of its target.
pub fn root_zone_deficit(
    root_zones: &[ZoneId],
    readings: &MoistureReadings,
    configs: &ZoneConfigs,
    fc_high: f64,
) -> Result<f64> {
    if root_zones.is_empty() {
        return Err(IrrigationError::EmptySelection);
    }
    Ok(sum_current(root_zones, readings)? - sum_field_capacity(root_zones, configs)? * fc_high)
}

pub fn required_moisture_increase(
    root_zones: &[ZoneId],
    all_zones: &[ZoneId],
    readings: &MoistureReadings,
    configs: &ZoneConfigs,
    fc_high: f64,
    multiplier: f64,
) -> Result<f64> {
    let above = sm_minus_fc_above(root_zones, all_zones, readings, configs)?;
    let deficit = root_zone_deficit(root_zones, readings, configs, fc_high)?;
    Ok(above + deficit * multiplier)
}

/// Summed moisture rise across every reported zone per unit of volume applied
/// at the last irrigation.
pub fn absorption_rate(readings: &MoistureReadings, last_irrigation_gpp: f64) -> Result<f64> {
    if last_irrigation_gpp == 0.0 {
        return Err(IrrigationError::DivisionByZero("last irrigation volume"));
    }
    let rise: f64 = readings.values().map(|r| r.irrigation_rise()).sum();
    if rise == 0.0 {
        return Err(IrrigationError::DivisionByZero(
            "no moisture rise after last irrigation",
        ));
    }

    let rate = rise / last_irrigation_gpp;
    if rate == 0.0 || !rate.is_finite() {
        return Err(IrrigationError::InvalidAbsorptionRate(rate));
    }
    Ok(rate)
}

/// Irrigation volume required to reach `fc_high`; zero when the root zone
/// already meets it.
pub fn gpp_required(
    root_zones: &[ZoneId],
    all_zones: &[ZoneId],
    readings: &MoistureReadings,
    configs: &ZoneConfigs,
    fc_high: f64,
    multiplier: f64,
    last_irrigation_gpp: f64,
) -> Result<f64> {
    if root_zone_deficit(root_zones, readings, configs, fc_high)? >= 0.0 {
        return Ok(0.0);
    }

    let increase =
        required_moisture_increase(root_zones, all_zones, readings, configs, fc_high, multiplier)?;
    let rate = absorption_rate(readings, last_irrigation_gpp)?;

    // The empirical rate can carry either sign; only the magnitude is meaningful.
    let volume = (increase / rate).abs();
    if !volume.is_finite() {
        return Err(IrrigationError::InvalidAbsorptionRate(rate));
    }
    Ok(volume)
}
