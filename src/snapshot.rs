use crate::config::Config;
use crate::error::{IrrigationError, Result};
use crate::logic::zone_set::validate_selection;
use crate::logic::CalculationInputs;
use crate::models::{MoistureReadings, Thresholds, ZoneId};
use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Per-cycle input from the host: readings plus the last irrigation event,
/// with optional overrides of the block defaults.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Snapshot {
    pub sm_units: MoistureReadings,
    pub last_irrigation_gpp: f64,
    pub last_irrigation_date: NaiveDate,
    #[serde(default)]
    pub current_date: Option<NaiveDate>,
    #[serde(default)]
    pub root_zones: Option<Vec<ZoneId>>,
    #[serde(default)]
    pub fc_high: Option<f64>,
    #[serde(default)]
    pub fc_low: Option<f64>,
    #[serde(default)]
    pub multiplier: Option<f64>,
}

impl Snapshot {
    /// Reads a snapshot file; `.json` files are parsed as JSON, anything else as YAML.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let is_json = path
            .extension()
            .map(|ext| ext.eq_ignore_ascii_case("json"))
            .unwrap_or(false);

        if is_json {
            Ok(serde_json::from_str(&content)?)
        } else {
            Ok(serde_yaml::from_str(&content)?)
        }
    }

    /// Date the readings were taken; today when the host leaves it out.
    pub fn current_date(&self) -> NaiveDate {
        self.current_date
            .unwrap_or_else(|| Local::now().date_naive())
    }

    pub fn root_zones<'a>(&'a self, config: &'a Config) -> &'a [ZoneId] {
        self.root_zones
            .as_deref()
            .unwrap_or(&config.vineyard.root_zones)
    }

    pub fn thresholds(&self, config: &Config) -> Thresholds {
        let defaults = config.thresholds(self.last_irrigation_gpp);
        Thresholds {
            fc_high: self.fc_high.unwrap_or(defaults.fc_high),
            fc_low: self.fc_low.unwrap_or(defaults.fc_low),
            multiplier: self.multiplier.unwrap_or(defaults.multiplier),
            last_irrigation_gpp: self.last_irrigation_gpp,
        }
    }

    /// Bundles this snapshot with the block config, rejecting overrides that
    /// break the block's invariants.
    pub fn inputs<'a>(&'a self, config: &'a Config) -> Result<CalculationInputs<'a>> {
        let root_zones = self.root_zones(config);
        validate_selection(root_zones, &config.vineyard.all_zones)?;

        let thresholds = self.thresholds(config);
        thresholds.validate()?;

        for (zone, reading) in &self.sm_units {
            if !reading.is_finite() {
                return Err(IrrigationError::InvalidConfig(format!(
                    "non-finite moisture reading for zone {}",
                    zone
                )));
            }
            if !config.vineyard.all_zones.contains(zone) {
                tracing::warn!("Snapshot has readings for zone {} outside all_zones", zone);
            }
        }
        if self.sm_units.is_empty() {
            return Err(IrrigationError::InvalidConfig(
                "snapshot has no moisture readings".into(),
            ));
        }

        Ok(CalculationInputs {
            root_zones,
            all_zones: &config.vineyard.all_zones,
            readings: &self.sm_units,
            configs: &config.zones,
            thresholds,
            evaporation: &config.evaporation,
            last_irrigation_date: self.last_irrigation_date,
            current_date: self.current_date(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::compute;

    const SNAPSHOT: &str = r#"
last_irrigation_gpp: 8
last_irrigation_date: 2024-07-01
current_date: 2024-07-16
multiplier: 1.3
sm_units:
  '4': {current: 60.0, last_irrigated: 55.0, 24hrs_post_irrigation: 66.0}
  '8': {current: 62.0, last_irrigated: 58.0, 24hrs_post_irrigation: 67.0}
  '16': {current: 60.0, last_irrigated: 58.0, 24hrs_post_irrigation: 66.0}
  '24': {current: 66.0, last_irrigated: 63.0, 24hrs_post_irrigation: 72.0}
  '32': {current: 64.0, last_irrigated: 62.0, 24hrs_post_irrigation: 70.0}
  '40': {current: 57.8, last_irrigated: 60.9, 24hrs_post_irrigation: 64.0}
"#;

    fn round2(v: f64) -> f64 {
        (v * 100.0).round() / 100.0
    }

    #[test]
    fn snapshot_against_default_block() {
        let config = Config::default();
        let snapshot: Snapshot = serde_yaml::from_str(SNAPSHOT).unwrap();
        let inputs = snapshot.inputs(&config).unwrap();

        assert_eq!(inputs.thresholds.multiplier, 1.3);
        assert_eq!(inputs.thresholds.fc_high, 0.95);
        assert_eq!(inputs.root_zones, config.vineyard.root_zones.as_slice());

        let result = compute(&inputs).into_result().unwrap();
        assert_eq!(round2(result.gpp_required), 3.18);
        assert_eq!(round2(result.est_days_to_next_irrigation), 6.57);
    }

    #[test]
    fn json_snapshot_with_integer_keys() {
        let json = r#"{
            "last_irrigation_gpp": 8,
            "last_irrigation_date": "2024-07-01",
            "root_zones": [24, 32],
            "sm_units": {"24": {"current": 66.0, "last_irrigated": 63.0, "24hrs_post_irrigation": 72.0}}
        }"#;
        let snapshot: Snapshot = serde_json::from_str(json).unwrap();
        let config = Config::default();

        assert_eq!(
            snapshot.root_zones(&config),
            &[ZoneId::new(24), ZoneId::new(32)]
        );
        assert!(snapshot.current_date.is_none());
        assert_eq!(snapshot.current_date(), Local::now().date_naive());
    }

    #[test]
    fn non_finite_reading_rejected() {
        let yaml = SNAPSHOT.replace("'24': {current: 66.0", "'24': {current: .nan");
        let snapshot: Snapshot = serde_yaml::from_str(&yaml).unwrap();
        assert!(snapshot.sm_units[&ZoneId::new(24)].current.is_nan());

        match snapshot.inputs(&Config::default()) {
            Err(IrrigationError::InvalidConfig(msg)) => assert!(msg.contains("24")),
            other => panic!("unexpected: {:?}", other.map(|i| i.readings.len())),
        }
    }

    #[test]
    fn repeated_root_zone_override_rejected() {
        let mut snapshot: Snapshot = serde_yaml::from_str(SNAPSHOT).unwrap();
        snapshot.root_zones = Some(vec![
            ZoneId::new(16),
            ZoneId::new(16),
            ZoneId::new(24),
            ZoneId::new(32),
        ]);
        assert!(matches!(
            snapshot.inputs(&Config::default()),
            Err(IrrigationError::InvalidZoneOrdering(_))
        ));
    }

    #[test]
    fn invalid_override_rejected() {
        let mut snapshot: Snapshot = serde_yaml::from_str(SNAPSHOT).unwrap();
        snapshot.fc_low = Some(0.99);
        assert!(matches!(
            snapshot.inputs(&Config::default()),
            Err(IrrigationError::InvalidConfig(_))
        ));

        snapshot.fc_low = None;
        snapshot.root_zones = Some(Vec::new());
        assert!(matches!(
            snapshot.inputs(&Config::default()),
            Err(IrrigationError::EmptySelection)
        ));
    }
}
