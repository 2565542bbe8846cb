use super::{ZoneConfig, ZoneId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One zone's sensor snapshot around the last irrigation event.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MoistureReading {
    pub current: f64,
    pub last_irrigated: f64,
    #[serde(rename = "24hrs_post_irrigation")]
    pub post_irrigation_24h: f64,
}

impl MoistureReading {
    pub fn new(current: f64, last_irrigated: f64, post_irrigation_24h: f64) -> Self {
        Self {
            current,
            last_irrigated,
            post_irrigation_24h,
        }
    }

    pub fn is_finite(&self) -> bool {
        self.current.is_finite()
            && self.last_irrigated.is_finite()
            && self.post_irrigation_24h.is_finite()
    }

    /// Moisture gained in the 24 hours after the last application.
    pub fn irrigation_rise(&self) -> f64 {
        self.post_irrigation_24h - self.last_irrigated
    }

    /// Moisture change since the post-irrigation reading; negative while drying.
    pub fn change_since_irrigation(&self) -> f64 {
        self.current - self.post_irrigation_24h
    }
}

pub type MoistureReadings = BTreeMap<ZoneId, MoistureReading>;

pub type ZoneConfigs = BTreeMap<ZoneId, ZoneConfig>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_host_field_names() {
        let yaml = "'16': {current: 60.0, last_irrigated: 58.0, 24hrs_post_irrigation: 66.0}\n";
        let readings: MoistureReadings = serde_yaml::from_str(yaml).unwrap();
        let reading = readings[&ZoneId::new(16)];
        assert!((reading.irrigation_rise() - 8.0).abs() < 1e-9);
        assert!((reading.change_since_irrigation() - (-6.0)).abs() < 1e-9);
    }

    #[test]
    fn finite_only_when_every_field_is() {
        assert!(MoistureReading::new(60.0, 58.0, 66.0).is_finite());
        assert!(!MoistureReading::new(f64::NAN, 58.0, 66.0).is_finite());
        assert!(!MoistureReading::new(60.0, 58.0, f64::INFINITY).is_finite());
    }

    #[test]
    fn serializes_host_field_names() {
        let json = serde_json::to_string(&MoistureReading::new(1.0, 2.0, 3.0)).unwrap();
        assert!(json.contains("\"24hrs_post_irrigation\":3.0"));
    }
}
