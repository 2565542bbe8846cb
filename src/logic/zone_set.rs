//! Lookups and sums over sets of zones, shared by every calculation layer.

use crate::error::{IrrigationError, Result};
use crate::models::{MoistureReading, MoistureReadings, ZoneConfig, ZoneConfigs, ZoneId};

pub fn reading(readings: &MoistureReadings, zone: ZoneId) -> Result<&MoistureReading> {
    readings.get(&zone).ok_or(IrrigationError::MissingZoneData {
        zone,
        dataset: "moisture readings",
    })
}

pub fn zone_config(configs: &ZoneConfigs, zone: ZoneId) -> Result<&ZoneConfig> {
    configs.get(&zone).ok_or(IrrigationError::MissingZoneData {
        zone,
        dataset: "zone configs",
    })
}

/// Sorts the block's zone list by depth, rejecting empty or duplicated lists.
pub fn ordered_zones(all_zones: &[ZoneId]) -> Result<Vec<ZoneId>> {
    if all_zones.is_empty() {
        return Err(IrrigationError::InvalidZoneOrdering(
            "zone list is empty".into(),
        ));
    }
    let mut zones = all_zones.to_vec();
    zones.sort();
    if let Some(pair) = zones.windows(2).find(|w| w[0] == w[1]) {
        return Err(IrrigationError::InvalidZoneOrdering(format!(
            "zone {} listed more than once",
            pair[0]
        )));
    }
    Ok(zones)
}

/// Root zone selection must be a non-empty set drawn from the block's zones.
pub fn validate_selection(root_zones: &[ZoneId], all_zones: &[ZoneId]) -> Result<()> {
    if root_zones.is_empty() {
        return Err(IrrigationError::EmptySelection);
    }
    if let Some((i, zone)) = root_zones
        .iter()
        .enumerate()
        .find(|&(i, z)| root_zones[..i].contains(z))
    {
        return Err(IrrigationError::InvalidZoneOrdering(format!(
            "root zone {} selected more than once (position {})",
            zone, i
        )));
    }
    match root_zones.iter().find(|z| !all_zones.contains(z)) {
        Some(zone) => Err(IrrigationError::MissingZoneData {
            zone: *zone,
            dataset: "all zones",
        }),
        None => Ok(()),
    }
}

/// Zones shallower than the shallowest selected root depth.
pub fn zones_above_root_zone(root_zones: &[ZoneId], all_zones: &[ZoneId]) -> Result<Vec<ZoneId>> {
    validate_selection(root_zones, all_zones)?;
    let shallowest = root_zones
        .iter()
        .min()
        .copied()
        .ok_or(IrrigationError::EmptySelection)?;

    Ok(all_zones
        .iter()
        .filter(|z| !root_zones.contains(z) && **z < shallowest)
        .copied()
        .collect())
}

pub fn sum_current(zones: &[ZoneId], readings: &MoistureReadings) -> Result<f64> {
    zones
        .iter()
        .map(|z| reading(readings, *z).map(|r| r.current))
        .sum()
}

pub fn sum_field_capacity(zones: &[ZoneId], configs: &ZoneConfigs) -> Result<f64> {
    zones
        .iter()
        .map(|z| zone_config(configs, *z).map(|c| c.field_capacity_point))
        .sum()
}

pub fn sum_saturation(zones: &[ZoneId], configs: &ZoneConfigs) -> Result<f64> {
    zones
        .iter()
        .map(|z| zone_config(configs, *z).map(|c| c.saturation_point))
        .sum()
}
