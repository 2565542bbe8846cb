//! Reference vineyard block shared by the engine tests.
//!
//! Retention constants are the block's published values; the moisture snapshot
//! is 15 days after an 8 GPP irrigation.

use crate::models::{MoistureReading, MoistureReadings, ZoneConfig, ZoneConfigs, ZoneId};
use chrono::NaiveDate;

pub fn zones(depths: &[u32]) -> Vec<ZoneId> {
    depths.iter().copied().map(ZoneId::new).collect()
}

pub fn all_zones() -> Vec<ZoneId> {
    zones(&[4, 8, 16, 24, 32, 40])
}

pub fn root_zones() -> Vec<ZoneId> {
    zones(&[16, 24, 32])
}

pub fn reference_configs() -> ZoneConfigs {
    [
        (4, ZoneConfig::new(69.0, 64.0, 41.0)),
        (8, ZoneConfig::new(71.0, 66.0, 42.0)),
        (16, ZoneConfig::new(69.0, 66.0, 42.0)),
        (24, ZoneConfig::new(74.0, 73.0, 48.0)),
        (32, ZoneConfig::new(70.0, 70.0, 45.0)),
        (40, ZoneConfig::new(64.0, 64.0, 41.0)),
    ]
    .into_iter()
    .map(|(depth, cfg)| (ZoneId::new(depth), cfg))
    .collect()
}

pub fn reference_readings() -> MoistureReadings {
    [
        (4, MoistureReading::new(60.0, 55.0, 66.0)),
        (8, MoistureReading::new(62.0, 58.0, 67.0)),
        (16, MoistureReading::new(60.0, 58.0, 66.0)),
        (24, MoistureReading::new(66.0, 63.0, 72.0)),
        (32, MoistureReading::new(64.0, 62.0, 70.0)),
        (40, MoistureReading::new(57.8, 60.9, 64.0)),
    ]
    .into_iter()
    .map(|(depth, reading)| (ZoneId::new(depth), reading))
    .collect()
}

pub fn last_irrigation_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 7, 1).unwrap()
}

pub fn current_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 7, 16).unwrap()
}

pub fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}
