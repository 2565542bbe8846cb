use super::zone_set::{sum_current, sum_field_capacity};
use crate::error::{IrrigationError, Result};
use crate::models::{EvaporationTable, MoistureReadings, ZoneConfigs, ZoneId};
use chrono::NaiveDate;

/// Moisture change since the post-irrigation reading, summed over every
/// reported zone after removing the evaporation share of shallow zones.
pub fn total_drawdown(readings: &MoistureReadings, evaporation: &EvaporationTable) -> f64 {
    readings
        .iter()
        .map(|(zone, r)| {
            let change = r.change_since_irrigation();
            change - change * evaporation.fraction(*zone)
        })
        .sum()
}

pub fn elapsed_days(last_irrigation_date: NaiveDate, current_date: NaiveDate) -> Result<i64> {
    let days = (current_date - last_irrigation_date).num_days();
    if days < 0 {
        return Err(IrrigationError::InvalidDateRange {
            last: last_irrigation_date,
            current: current_date,
        });
    }
    if days == 0 {
        return Err(IrrigationError::DivisionByZero(
            "no days elapsed since last irrigation",
        ));
    }
    Ok(days)
}

/// Average moisture change per day since the last irrigation. Negative while
/// the block is drying out.
pub fn average_drawdown_per_day(
    readings: &MoistureReadings,
    evaporation: &EvaporationTable,
    last_irrigation_date: NaiveDate,
    current_date: NaiveDate,
) -> Result<f64> {
    let days = elapsed_days(last_irrigation_date, current_date)?;
    Ok(total_drawdown(readings, evaporation) / days as f64)
}

/// (Σ field capacity × fc_low) − Σ current over the root zone. Negative while
/// the root zone is still above the low threshold.
pub fn moisture_to_low_threshold(
    root_zones: &[ZoneId],
    readings: &MoistureReadings,
    configs: &ZoneConfigs,
    fc_low: f64,
) -> Result<f64> {
    if root_zones.is_empty() {
        return Err(IrrigationError::EmptySelection);
    }
    Ok(sum_field_capacity(root_zones, configs)? * fc_low - sum_current(root_zones, readings)?)
}

/// Days until the root zone reaches `fc_low` at the current drawdown rate.
///
/// Not clamped: a negative estimate (already below threshold and drying) or a
/// positive one on a rising trend is passed through as-is.
pub fn est_days_until_irrigation(
    root_zones: &[ZoneId],
    readings: &MoistureReadings,
    configs: &ZoneConfigs,
    evaporation: &EvaporationTable,
    fc_low: f64,
    last_irrigation_date: NaiveDate,
    current_date: NaiveDate,
) -> Result<f64> {
    let budget = moisture_to_low_threshold(root_zones, readings, configs, fc_low)?;
    let rate = average_drawdown_per_day(readings, evaporation, last_irrigation_date, current_date)?;
    if rate == 0.0 {
        return Err(IrrigationError::DivisionByZero("zero drawdown rate"));
    }
    Ok(budget / rate)
}
