use crate::error::{IrrigationError, Result};
use crate::logic::zone_set::{ordered_zones, validate_selection};
use crate::models::{
    EvaporationTable, Thresholds, ZoneConfig, ZoneConfigs, ZoneId, DEFAULT_FC_HIGH, DEFAULT_FC_LOW,
    DEFAULT_MULTIPLIER,
};
use dialoguer::Input;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    pub vineyard: VineyardConfig,
    pub zones: ZoneConfigs,
    #[serde(default)]
    pub thresholds: ThresholdDefaults,
    #[serde(default)]
    pub evaporation: EvaporationTable,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct VineyardConfig {
    pub name: String,
    #[serde(default)]
    pub block: Option<String>,
    pub all_zones: Vec<ZoneId>,
    #[serde(default = "default_root_zones")]
    pub root_zones: Vec<ZoneId>,
}

fn default_root_zones() -> Vec<ZoneId> {
    [16, 24, 32].into_iter().map(ZoneId::new).collect()
}

/// Block-wide defaults; a snapshot may override any of them.
#[derive(Debug, Clone, Copy, Deserialize, Serialize)]
pub struct ThresholdDefaults {
    #[serde(default = "default_fc_high")]
    pub fc_high: f64,
    #[serde(default = "default_fc_low")]
    pub fc_low: f64,
    #[serde(default = "default_multiplier")]
    pub multiplier: f64,
}

fn default_fc_high() -> f64 {
    DEFAULT_FC_HIGH
}

fn default_fc_low() -> f64 {
    DEFAULT_FC_LOW
}

fn default_multiplier() -> f64 {
    DEFAULT_MULTIPLIER
}

impl Default for ThresholdDefaults {
    fn default() -> Self {
        Self {
            fc_high: DEFAULT_FC_HIGH,
            fc_low: DEFAULT_FC_LOW,
            multiplier: DEFAULT_MULTIPLIER,
        }
    }
}

impl Config {
    pub fn load(config_override: Option<&Path>) -> Result<Self> {
        let config_path = match config_override {
            Some(p) => p.to_path_buf(),
            None => Self::find_config_path()?,
        };

        if !config_path.exists() {
            return Err(IrrigationError::Config(format!(
                "Config file not found at {:?}. Run `vinewater init` to set up.",
                config_path
            )));
        }

        let config_str = std::fs::read_to_string(&config_path)
            .map_err(|e| IrrigationError::Config(format!("Failed to read config: {}", e)))?;

        tracing::debug!("Loading vineyard config from {}", config_path.display());
        Self::from_yaml(&config_str)
    }

    /// Parses and validates config text, substituting `${VAR}` references first.
    pub fn from_yaml(content: &str) -> Result<Self> {
        let content = Self::substitute_env_vars(content);

        let mut config: Config = serde_yaml::from_str(&content)
            .map_err(|e| IrrigationError::Config(format!("Failed to parse config: {}", e)))?;

        config.normalize()?;
        config.validate()?;
        Ok(config)
    }

    fn normalize(&mut self) -> Result<()> {
        self.vineyard.all_zones = ordered_zones(&self.vineyard.all_zones)?;
        self.vineyard.root_zones.sort();
        self.vineyard.root_zones.dedup();
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        for zone in &self.vineyard.all_zones {
            let cfg = self
                .zones
                .get(zone)
                .ok_or(IrrigationError::MissingZoneData {
                    zone: *zone,
                    dataset: "zone configs",
                })?;
            cfg.validate(*zone)?;
        }
        validate_selection(&self.vineyard.root_zones, &self.vineyard.all_zones)?;
        self.thresholds(0.0).validate()?;
        self.evaporation.validate()?;

        for zone in self.zones.keys() {
            if !self.vineyard.all_zones.contains(zone) {
                tracing::warn!("Zone {} has retention constants but is not in all_zones", zone);
            }
        }
        Ok(())
    }

    pub fn thresholds(&self, last_irrigation_gpp: f64) -> Thresholds {
        Thresholds {
            fc_high: self.thresholds.fc_high,
            fc_low: self.thresholds.fc_low,
            multiplier: self.thresholds.multiplier,
            last_irrigation_gpp,
        }
    }

    /// Search for config.yaml in standard locations.
    /// Returns the path of the first found config, or the XDG default path if none found.
    fn find_config_path() -> Result<PathBuf> {
        let local_config = PathBuf::from("config/vineyard.yaml");
        if local_config.exists() {
            return Ok(local_config);
        }

        let default_path = Self::default_config_path()?;
        Ok(default_path)
    }

    pub fn exists(config_override: Option<&Path>) -> bool {
        match config_override {
            Some(p) => p.exists(),
            None => Self::find_config_path()
                .map(|p| p.exists())
                .unwrap_or(false),
        }
    }

    /// Default path for writing new config files (~/.config/vinewater/config.yaml).
    pub fn default_config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| IrrigationError::Config("Cannot determine config directory".into()))?
            .join("vinewater");
        Ok(config_dir.join("config.yaml"))
    }

    /// Run interactive setup prompts and write config to disk.
    pub fn setup_interactive() -> Result<(Self, PathBuf)> {
        println!();
        println!("Let's set up a vineyard block for vinewater.");
        println!();

        let name: String = Input::new()
            .with_prompt("  Vineyard name")
            .default("Home Vineyard".into())
            .interact_text()
            .map_err(|e| IrrigationError::Config(format!("Input error: {}", e)))?;

        let block: String = Input::new()
            .with_prompt("  Block (leave blank to skip)")
            .default(String::new())
            .allow_empty(true)
            .interact_text()
            .map_err(|e| IrrigationError::Config(format!("Input error: {}", e)))?;

        let root_zones: String = Input::new()
            .with_prompt("  Root zone depths (inches, comma separated)")
            .default("16, 24, 32".into())
            .interact_text()
            .map_err(|e| IrrigationError::Config(format!("Input error: {}", e)))?;
        let root_zones = parse_zone_list(&root_zones)?;

        let fc_high: f64 = Input::new()
            .with_prompt("  % FC goal (root zone)")
            .default(DEFAULT_FC_HIGH)
            .interact_text()
            .map_err(|e| IrrigationError::Config(format!("Input error: {}", e)))?;

        let fc_low: f64 = Input::new()
            .with_prompt("  % FC minimum (root zone)")
            .default(DEFAULT_FC_LOW)
            .interact_text()
            .map_err(|e| IrrigationError::Config(format!("Input error: {}", e)))?;

        let multiplier: f64 = Input::new()
            .with_prompt("  Deficit multiplier")
            .default(1.3)
            .interact_text()
            .map_err(|e| IrrigationError::Config(format!("Input error: {}", e)))?;

        println!();

        let mut config = Config::default();
        config.vineyard.name = name;
        config.vineyard.block = (!block.is_empty()).then_some(block);
        config.vineyard.root_zones = root_zones;
        config.thresholds = ThresholdDefaults {
            fc_high,
            fc_low,
            multiplier,
        };
        config.normalize()?;
        config.validate()?;

        let config_path = Self::default_config_path()?;
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let yaml = serde_yaml::to_string(&config)
            .map_err(|e| IrrigationError::Config(format!("Failed to serialize config: {}", e)))?;

        let content = format!(
            "# vinewater configuration\n# Generated by `vinewater init`\n# Environment variable substitution (${{VAR}}) is supported.\n# Retention constants are the reference block's; replace with your own soil data.\n\n{}",
            yaml
        );
        std::fs::write(&config_path, content)?;

        println!("Configuration saved to {}", config_path.display());
        println!();

        Ok((config, config_path))
    }

    fn substitute_env_vars(content: &str) -> String {
        let mut result = content.to_string();

        let re = match regex_lite::Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}") {
            Ok(re) => re,
            Err(_) => return result,
        };

        for cap in re.captures_iter(content) {
            let var_name = &cap[1];
            let placeholder = &cap[0];
            if let Ok(value) = std::env::var(var_name) {
                result = result.replace(placeholder, &value);
            }
        }

        result
    }
}

pub fn parse_zone_list(s: &str) -> Result<Vec<ZoneId>> {
    s.split(',')
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(|p| p.parse::<ZoneId>())
        .collect()
}

impl Default for Config {
    fn default() -> Self {
        let zones = [
            (4, ZoneConfig::new(69.0, 64.0, 41.0)),
            (8, ZoneConfig::new(71.0, 66.0, 42.0)),
            (16, ZoneConfig::new(69.0, 66.0, 42.0)),
            (24, ZoneConfig::new(74.0, 73.0, 48.0)),
            (32, ZoneConfig::new(70.0, 70.0, 45.0)),
            (40, ZoneConfig::new(64.0, 64.0, 41.0)),
        ]
        .into_iter()
        .map(|(depth, cfg)| (ZoneId::new(depth), cfg))
        .collect::<ZoneConfigs>();

        Self {
            vineyard: VineyardConfig {
                name: "Home Vineyard".into(),
                block: None,
                all_zones: zones.keys().copied().collect(),
                root_zones: default_root_zones(),
            },
            zones,
            thresholds: ThresholdDefaults::default(),
            evaporation: EvaporationTable::default(),
        }
    }
}
