// SPDX-License-Identifier: MIT OR Apache-2.0
//! Driver configuration.
//!
//! Stored as RON. Every field is optional in the file; missing fields take
//! their defaults.

use crate::mesh::unit_cube;
use matrixmotion_timeline::{demo_script, IntervalConsumption, Operation, DEFAULT_INITIAL_WAIT};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Current configuration format version
pub const CONFIG_FORMAT_VERSION: u32 = 1;

/// Settings for a headless run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DemoConfig {
    /// Format version
    pub version: u32,
    /// Simulated frames per second
    pub tick_rate: f32,
    /// Playback speed multiplier
    pub speed: f32,
    /// Pause between demonstration groups, in seconds
    pub initial_wait: f32,
    /// How overdue rotation intervals are consumed
    pub interval_consumption: IntervalConsumption,
    /// Points transformed by the matrix
    pub points: Vec<[f32; 3]>,
    /// Custom operations replacing the demonstration script
    pub script: Option<Vec<Operation>>,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            version: CONFIG_FORMAT_VERSION,
            tick_rate: 60.0,
            speed: 1.0,
            initial_wait: DEFAULT_INITIAL_WAIT,
            interval_consumption: IntervalConsumption::default(),
            points: unit_cube(),
            script: None,
        }
    }
}

impl DemoConfig {
    /// Load configuration from a file
    pub fn load(path: &Path) -> std::io::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: DemoConfig = ron::from_str(&content).map_err(|e| {
            std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string())
        })?;

        if config.version > CONFIG_FORMAT_VERSION {
            return Err(std::io::Error::new(
                std::io::ErrorKind::InvalidData,
                format!(
                    "Config version {} is newer than supported version {}",
                    config.version, CONFIG_FORMAT_VERSION
                ),
            ));
        }

        tracing::info!("Loaded config from {:?}", path);
        Ok(config)
    }

    /// Save configuration to a file
    pub fn save(&self, path: &Path) -> std::io::Result<()> {
        let pretty = ron::ser::PrettyConfig::default()
            .struct_names(true)
            .enumerate_arrays(false);

        let content = ron::ser::to_string_pretty(self, pretty).map_err(|e| {
            std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string())
        })?;

        std::fs::write(path, content)?;
        tracing::info!("Saved config to {:?}", path);
        Ok(())
    }

    /// Check values that would stall or break playback
    pub fn validate(&self) -> Result<(), String> {
        if !(self.tick_rate.is_finite() && self.tick_rate > 0.0) {
            return Err(format!("tick_rate must be positive, got {}", self.tick_rate));
        }
        if !(self.speed.is_finite() && self.speed > 0.0 && self.speed <= 10.0) {
            return Err(format!("speed must be in (0, 10], got {}", self.speed));
        }
        if !self.initial_wait.is_finite() {
            return Err("initial_wait must be finite".to_string());
        }
        Ok(())
    }

    /// Seconds between simulated ticks
    pub fn tick_interval(&self) -> f32 {
        1.0 / self.tick_rate
    }

    /// Operations to build: the custom script or the demonstration
    pub fn operations(&self) -> Vec<Operation> {
        self.script
            .clone()
            .unwrap_or_else(|| demo_script(self.initial_wait))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use matrixmotion_timeline::Axis;

    #[test]
    fn test_default_config() {
        let config = DemoConfig::default();
        assert_eq!(config.version, CONFIG_FORMAT_VERSION);
        assert_eq!(config.points.len(), 8);
        assert!(config.validate().is_ok());
        assert_eq!(config.operations(), demo_script(DEFAULT_INITIAL_WAIT));
    }

    #[test]
    fn test_serialization() {
        let config = DemoConfig {
            tick_rate: 24.0,
            interval_consumption: IntervalConsumption::SingleStep,
            script: Some(vec![Operation::Scale {
                axis: Axis::Vertical,
                from: 1.0,
                to: 2.0,
                duration: 1.0,
                wait: 0.0,
            }]),
            ..DemoConfig::default()
        };
        let ron_str = ron::ser::to_string_pretty(&config, ron::ser::PrettyConfig::default()).unwrap();
        let loaded: DemoConfig = ron::from_str(&ron_str).unwrap();
        assert_eq!(loaded, config);
        assert_eq!(loaded.operations().len(), 1);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let loaded: DemoConfig = ron::from_str("(tick_rate: 30.0)").unwrap();
        assert_eq!(loaded.tick_rate, 30.0);
        assert_eq!(loaded.speed, 1.0);
        assert_eq!(loaded.points, unit_cube());
    }

    #[test]
    fn test_validation() {
        let mut config = DemoConfig {
            tick_rate: 0.0,
            ..DemoConfig::default()
        };
        assert!(config.validate().is_err());
        config.tick_rate = 30.0;
        config.speed = 0.0;
        assert!(config.validate().is_err());
        config.speed = 2.0;
        assert!(config.validate().is_ok());
        assert_abs_diff_eq!(config.tick_interval(), 1.0 / 30.0);
    }

    #[test]
    fn test_save_and_load() {
        let path = std::env::temp_dir().join(format!(
            "matrixmotion-config-{}.ron",
            std::process::id()
        ));
        let config = DemoConfig {
            initial_wait: 1.0,
            ..DemoConfig::default()
        };
        config.save(&path).unwrap();
        let loaded = DemoConfig::load(&path).unwrap();
        std::fs::remove_file(&path).ok();
        assert_eq!(loaded, config);
    }
}
