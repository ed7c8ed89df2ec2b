//! # Engine State Module
//!
//! The coordinator that owns the world and the viewer and advances both once
//! per simulation tick.
//!
//! ## Key Components
//!
//! * `EngineState` - The main state container for the engine
//! * `camera_state` - Tracks the viewer the world streams around
//! * `persistence` - Reads and writes world saves
//! * `rendering` - Meshing, UV lookup and the mesh backends
//! * `voxels` - Voxel data, terrain generation, structures and streaming
//!
//! ## Tick Order
//!
//! 1. Apply queued camera movement
//! 2. Advance the world: evict, queue, then load, detail or mesh
//! 3. Log what happened

use cgmath::Point3;
use log::{debug, info};

use camera_state::CameraState;
use persistence::WorldSave;
use rendering::mesh_backend::MeshBackend;
use voxels::world::{TickReport, World};

use crate::config::EngineConfig;
use crate::error::{ConfigError, EngineError, PersistenceError};

pub mod camera_state;
pub mod persistence;
pub mod rendering;
pub mod voxels;

/// Running totals over every tick so far.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct TickTotals {
    pub ticks: u64,
    pub generated: u64,
    pub restored: u64,
    pub evicted: u64,
    pub detailed: u64,
    pub meshed: u64,
}

impl TickTotals {
    fn record(&mut self, report: &TickReport) {
        self.ticks += 1;
        self.generated += report.generated as u64;
        self.restored += report.restored as u64;
        self.evicted += report.evicted as u64;
        self.detailed += report.detailed.is_some() as u64;
        self.meshed += report.meshed.is_some() as u64;
    }
}

/// The main state container for the voxel engine
///
/// # Examples
///
/// ```no_run
/// use voxel_world::config::EngineConfig;
/// use voxel_world::engine_state::EngineState;
/// use voxel_world::engine_state::rendering::mesh_backend::HeadlessMeshBackend;
///
/// let mut engine = EngineState::new(EngineConfig::default(), HeadlessMeshBackend::new())?;
/// engine.update();
/// # Ok::<(), voxel_world::error::ConfigError>(())
/// ```
pub struct EngineState<B: MeshBackend> {
    pub config: EngineConfig,
    pub world: World<B>,
    pub camera_state: CameraState,
    totals: TickTotals,
}

impl<B: MeshBackend> EngineState<B> {
    /// Creates a fresh world with the viewer at the configured start.
    pub fn new(config: EngineConfig, backend: B) -> Result<Self, ConfigError> {
        config.validate()?;
        let start = Self::start_position(&config);
        let world = World::new(&config.world, backend, start)?;
        Ok(Self::assemble(config, world, start))
    }

    /// Creates a world from a save with the viewer at the configured start.
    pub fn from_save(
        config: EngineConfig,
        save: WorldSave,
        backend: B,
    ) -> Result<Self, EngineError> {
        config.validate()?;
        let start = Self::start_position(&config);
        let world = World::from_save(&config.world, save, backend, start)?;
        Ok(Self::assemble(config, world, start))
    }

    fn start_position(config: &EngineConfig) -> Point3<f32> {
        let [x, y, z] = config.demo.start;
        Point3::new(x, y, z)
    }

    fn assemble(config: EngineConfig, world: World<B>, start: Point3<f32>) -> Self {
        let camera_state = CameraState::new(start, config.world.chunk);
        Self {
            config,
            world,
            camera_state,
            totals: TickTotals::default(),
        }
    }

    /// Runs one simulation tick.
    pub fn update(&mut self) -> TickReport {
        if let Some(updates) = self.camera_state.update() {
            info!(
                "Viewer entered chunk ({}, {})",
                updates.new_chunk_position.x, updates.new_chunk_position.z
            );
        }

        let report = self.world.tick(&self.camera_state);
        self.totals.record(&report);

        if !report.is_idle() {
            debug!(
                "Tick {}: {} generated, {} restored, {} evicted, detailed {:?}, meshed {:?}",
                self.totals.ticks,
                report.generated,
                report.restored,
                report.evicted,
                report.detailed,
                report.meshed
            );
        }
        report
    }

    pub fn totals(&self) -> TickTotals {
        self.totals
    }

    /// Writes the world to the configured save path, if one is set.
    ///
    /// # Returns
    /// `true` if a save was written.
    pub fn save(&self) -> Result<bool, PersistenceError> {
        match &self.config.save_path {
            Some(path) => {
                self.world.world_save().write_to(path)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::WorldConfig;
    use crate::engine_state::voxels::chunk::coordinate::ChunkDimensions;
    use cgmath::Vector3;
    use crate::engine_state::rendering::mesh_backend::HeadlessMeshBackend;

    fn small_config() -> EngineConfig {
        let mut config = EngineConfig::default();
        config.world = WorldConfig {
            seed: 99,
            load_radius: 1,
            chunk: ChunkDimensions::new(8, 32, 8),
        };
        config.demo.start = [4.0, 30.0, 4.0];
        config
    }

    #[test]
    fn totals_accumulate_tick_reports() {
        let mut engine = EngineState::new(small_config(), HeadlessMeshBackend::new()).unwrap();
        for _ in 0..12 {
            engine.update();
        }

        let totals = engine.totals();
        assert_eq!(totals.ticks, 12);
        assert_eq!(totals.generated, 8);
        assert_eq!(totals.detailed, 9);
        assert_eq!(totals.meshed, 1);
    }

    #[test]
    fn camera_movement_drives_streaming() {
        let mut engine = EngineState::new(small_config(), HeadlessMeshBackend::new()).unwrap();
        engine.update();

        engine.camera_state.move_by(Vector3::new(16.0, 0.0, 0.0));
        let report = engine.update();
        assert_eq!(engine.world.centre(), engine.camera_state.current_chunk());
        assert_eq!(report.evicted, 6);
        assert_eq!(report.generated, 6);
    }

    #[test]
    fn non_finite_demo_speed_is_rejected() {
        let mut config = small_config();
        config.demo.speed = f32::NAN;
        assert!(matches!(
            EngineState::new(config, HeadlessMeshBackend::new()),
            Err(ConfigError::Invalid {
                field: "demo.speed",
                ..
            })
        ));
    }

    #[test]
    fn saving_without_a_path_is_a_no_op() {
        let engine = EngineState::new(small_config(), HeadlessMeshBackend::new()).unwrap();
        assert!(!engine.save().unwrap());
    }
}
