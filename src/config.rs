//! Configuration structs with defaults and JSON persistence.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::engine_state::voxels::chunk::coordinate::ChunkDimensions;
use crate::engine_state::voxels::terrain::{BEDROCK_LEVEL, WATER_LEVEL};
use crate::error::ConfigError;

/// Top-level engine configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct EngineConfig {
    /// World generation and streaming settings.
    pub world: WorldConfig,
    /// Headless demo walk settings.
    pub demo: DemoConfig,
    /// Save file read at startup and written at shutdown, if set.
    pub save_path: Option<PathBuf>,
}

/// World generation and streaming configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct WorldConfig {
    /// Seed of every noise field and of each chunk's random stream.
    pub seed: i32,
    /// Chebyshev radius, in chunks, of the resident window.
    pub load_radius: u32,
    /// Size of one chunk in blocks.
    pub chunk: ChunkDimensions,
}

/// Configuration of the headless demo walk.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DemoConfig {
    /// Number of simulation ticks to run.
    pub ticks: u32,
    /// Blocks the viewer moves along +X per tick.
    pub speed: f32,
    /// Starting viewer position.
    pub start: [f32; 3],
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            seed: 12345,
            load_radius: 6,
            chunk: ChunkDimensions::default(),
        }
    }
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            ticks: 600,
            speed: 0.5,
            start: [8.0, 80.0, 8.0],
        }
    }
}

impl WorldConfig {
    /// Checks that the values can drive a world.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.load_radius == 0 {
            return Err(ConfigError::Invalid {
                field: "world.load_radius",
                reason: "must be at least 1 so meshing has a detailed border".to_string(),
            });
        }
        if self.chunk.width == 0 || self.chunk.depth == 0 {
            return Err(ConfigError::Invalid {
                field: "world.chunk",
                reason: "width and depth must be non-zero".to_string(),
            });
        }
        let minimum = WATER_LEVEL.max(BEDROCK_LEVEL) + 2;
        if self.chunk.height < minimum {
            return Err(ConfigError::Invalid {
                field: "world.chunk.height",
                reason: format!("must be at least {minimum} to hold the water level"),
            });
        }
        Ok(())
    }
}

// --- Load / Save ---

impl EngineConfig {
    /// Load config from `path`, or write a default config there if it is missing.
    pub fn load_or_create(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            let config = Self::load(path)?;
            log::info!("Loaded config from {}", path.display());
            Ok(config)
        } else {
            let config = EngineConfig::default();
            config.save(path)?;
            log::info!("Created default config at {}", path.display());
            Ok(config)
        }
    }

    /// Load and validate config from `path`.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(ConfigError::ReadError)?;
        let config: EngineConfig =
            serde_json::from_str(&contents).map_err(ConfigError::ParseError)?;
        config.validate()?;
        Ok(config)
    }

    /// Save config to `path` as pretty-printed JSON.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(ConfigError::WriteError)?;
        }

        let serialized =
            serde_json::to_string_pretty(self).map_err(ConfigError::SerializeError)?;
        std::fs::write(path, serialized).map_err(ConfigError::WriteError)?;
        Ok(())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.world.validate()?;
        if !self.demo.speed.is_finite() {
            return Err(ConfigError::Invalid {
                field: "demo.speed",
                reason: "must be a finite number".to_string(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_serializes() {
        let json = serde_json::to_string_pretty(&EngineConfig::default()).unwrap();
        assert!(json.contains("\"seed\": 12345"));
        assert!(json.contains("\"load_radius\": 6"));
        assert!(json.contains("\"height\": 100"));
    }

    #[test]
    fn test_missing_field_uses_default() {
        let config: EngineConfig = serde_json::from_str(r#"{"world": {"seed": 7}}"#).unwrap();
        assert_eq!(config.world.seed, 7);
        assert_eq!(config.world.load_radius, 6);
        assert_eq!(config.demo, DemoConfig::default());
        assert_eq!(config.save_path, None);
    }

    #[test]
    fn test_extra_field_ignored() {
        let result: Result<EngineConfig, _> = serde_json::from_str(r#"{"future_setting": true}"#);
        assert!(result.is_ok());
    }

    #[test]
    fn test_default_config_is_valid() {
        assert!(EngineConfig::default().validate().is_ok());
    }

    #[test]
    fn test_zero_radius_is_rejected() {
        let mut config = WorldConfig::default();
        config.load_radius = 0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Invalid {
                field: "world.load_radius",
                ..
            })
        ));
    }

    #[test]
    fn test_short_chunks_are_rejected() {
        let mut config = WorldConfig::default();
        config.chunk.height = WATER_LEVEL;
        assert!(config.validate().is_err());

        config.chunk.height = WATER_LEVEL + 2;
        assert!(config.validate().is_ok());

        config.chunk.width = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("engine.json");

        let mut config = EngineConfig::default();
        config.world.seed = -99;
        config.demo.ticks = 12;
        config.save_path = Some(dir.path().join("world.json"));

        config.save(&path).unwrap();
        let loaded = EngineConfig::load_or_create(&path).unwrap();
        assert_eq!(config, loaded);
    }

    #[test]
    fn test_load_or_create_writes_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("engine.json");

        let created = EngineConfig::load_or_create(&path).unwrap();
        assert!(path.exists());
        assert_eq!(created, EngineConfig::default());
    }

    #[test]
    fn test_invalid_file_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("engine.json");
        std::fs::write(&path, r#"{"world": {"load_radius": 0}}"#).unwrap();

        assert!(matches!(
            EngineConfig::load(&path),
            Err(ConfigError::Invalid { .. })
        ));

        std::fs::write(&path, "not json").unwrap();
        assert!(matches!(
            EngineConfig::load(&path),
            Err(ConfigError::ParseError(_))
        ));
    }
}
