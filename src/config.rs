use crate::error::{FincaError, Result};
use crate::logic::farm::DEFAULT_PLANTATION_WATER;
use crate::logic::irrigation::reader::{HUMIDITY_RANGE, TEMPERATURE_RANGE};
use crate::logic::irrigation::IrrigationThresholds;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub irrigation: IrrigationThresholds,
    #[serde(default)]
    pub farm: FarmConfig,
    #[serde(default)]
    pub simulation: SimulationConfig,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct FarmConfig {
    #[serde(default = "default_plantation_water")]
    pub default_water: f64,
}

fn default_plantation_water() -> f64 {
    DEFAULT_PLANTATION_WATER
}

impl Default for FarmConfig {
    fn default() -> Self {
        Self {
            default_water: DEFAULT_PLANTATION_WATER,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct SimulationConfig {
    #[serde(default = "default_readings")]
    pub readings: u32,
    #[serde(default = "default_interval_ms")]
    pub interval_ms: u64,
    #[serde(default)]
    pub seed: Option<u64>,
    #[serde(default = "default_temperature_range")]
    pub temperature_range: [f64; 2],
    #[serde(default = "default_humidity_range")]
    pub humidity_range: [f64; 2],
}

fn default_readings() -> u32 {
    5
}

fn default_interval_ms() -> u64 {
    1500
}

fn default_temperature_range() -> [f64; 2] {
    TEMPERATURE_RANGE
}

fn default_humidity_range() -> [f64; 2] {
    HUMIDITY_RANGE
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            readings: default_readings(),
            interval_ms: default_interval_ms(),
            seed: None,
            temperature_range: TEMPERATURE_RANGE,
            humidity_range: HUMIDITY_RANGE,
        }
    }
}

impl Config {
    /// Loads the config from `config_override` or the standard locations,
    /// falling back to defaults when no file exists.
    pub fn load(config_override: Option<&PathBuf>) -> Result<Self> {
        let config_path = match config_override {
            Some(p) => {
                if !p.exists() {
                    return Err(FincaError::Config(format!(
                        "Config file not found at {:?}",
                        p
                    )));
                }
                p.clone()
            }
            None => match Self::find_config_path() {
                Some(p) => p,
                None => {
                    tracing::debug!("No config file found, using defaults");
                    return Ok(Self::default());
                }
            },
        };

        let config_str = std::fs::read_to_string(&config_path)
            .map_err(|e| FincaError::Config(format!("Failed to read config: {}", e)))?;
        let config = Self::parse(&config_str)?;
        tracing::info!(path = %config_path.display(), "Configuration loaded");
        Ok(config)
    }

    pub fn parse(content: &str) -> Result<Self> {
        // Substitute environment variables
        let content = Self::substitute_env_vars(content);

        let config: Config = serde_yaml::from_str(&content)
            .map_err(|e| FincaError::Config(format!("Failed to parse config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        let t = &self.irrigation;
        for (name, value) in [
            ("irrigation.temp_min", t.temp_min),
            ("irrigation.temp_max", t.temp_max),
            ("irrigation.humidity_max", t.humidity_max),
            ("farm.default_water", self.farm.default_water),
            ("simulation.temperature_range", self.simulation.temperature_range[0]),
            ("simulation.temperature_range", self.simulation.temperature_range[1]),
            ("simulation.humidity_range", self.simulation.humidity_range[0]),
            ("simulation.humidity_range", self.simulation.humidity_range[1]),
        ] {
            if !value.is_finite() {
                return Err(FincaError::Config(format!(
                    "{} must be a finite number, got {}",
                    name, value
                )));
            }
        }
        if t.temp_min > t.temp_max {
            return Err(FincaError::Config(format!(
                "irrigation.temp_min ({}) exceeds irrigation.temp_max ({})",
                t.temp_min, t.temp_max
            )));
        }
        if self.farm.default_water < 0.0 {
            return Err(FincaError::Config(
                "farm.default_water must be non-negative".into(),
            ));
        }
        for (name, [lo, hi]) in [
            ("temperature_range", self.simulation.temperature_range),
            ("humidity_range", self.simulation.humidity_range),
        ] {
            if lo > hi {
                return Err(FincaError::Config(format!(
                    "simulation.{} is inverted: [{}, {}]",
                    name, lo, hi
                )));
            }
        }
        Ok(())
    }

    /// First existing config among `config/config.yaml` and the XDG location.
    fn find_config_path() -> Option<PathBuf> {
        // Try current directory first
        let local_config = PathBuf::from("config/config.yaml");
        if local_config.exists() {
            return Some(local_config);
        }

        // Try XDG config directory
        let xdg_config = dirs::config_dir()?.join("fincaops").join("config.yaml");
        xdg_config.exists().then_some(xdg_config)
    }

    /// Default path for writing new config files (~/.config/fincaops/config.yaml).
    pub fn default_config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| FincaError::Config("Cannot determine config directory".into()))?
            .join("fincaops");
        Ok(config_dir.join("config.yaml"))
    }

    /// Writes the default config to `path` (or the default location).
    pub fn write_default(path: Option<&PathBuf>) -> Result<PathBuf> {
        let config_path = match path {
            Some(p) => p.clone(),
            None => Self::default_config_path()?,
        };
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let yaml = serde_yaml::to_string(&Self::default())
            .map_err(|e| FincaError::Config(format!("Failed to serialize config: {}", e)))?;

        // Write with a header comment
        let content = format!(
            "# FincaOps Configuration\n# Generated by `fincaops init`\n# Environment variable substitution (${{VAR}}) is supported.\n\n{}",
            yaml
        );
        std::fs::write(&config_path, content)?;
        Ok(config_path)
    }

    fn substitute_env_vars(content: &str) -> String {
        let mut result = content.to_string();

        // Find all ${VAR_NAME} patterns and substitute
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

    pub fn data_dir(data_dir_override: Option<&PathBuf>) -> Result<PathBuf> {
        // CLI override takes priority
        if let Some(dir) = data_dir_override {
            return Ok(dir.clone());
        }

        // Then check env var
        if let Ok(dir) = std::env::var("FINCAOPS_DATA_DIR") {
            return Ok(PathBuf::from(dir));
        }

        // Use XDG data directory
        let data_dir = dirs::data_dir()
            .ok_or_else(|| FincaError::Config("Cannot determine data directory".into()))?
            .join("fincaops");
        Ok(data_dir)
    }
}
