#![warn(rustdoc::missing_crate_level_docs)]
#![warn(rustdoc::invalid_rust_codeblocks)]

//! # Voxel World
//!
//! A streaming voxel world: procedural terrain generated chunk by chunk
//! around a moving viewer, structures stamped across chunk borders, visible
//! faces meshed for a GPU, and player edits kept across unloads and saves.
//!
//! ## Key Modules
//!
//! * `config` - Engine configuration with JSON persistence
//! * `error` - Error types for configuration and saves
//! * `engine_state` - The world, the viewer, meshing and persistence
//!
//! ## Architecture
//!
//! The engine separates:
//! * World state (chunks, terrain, structures, streaming)
//! * Meshing (pure functions from grids to vertex lists)
//! * Mesh ownership (the `MeshBackend` trait, headless or `wgpu`)
//!
//! ## Usage
//!
//! ```no_run
//! // Headless demo walk
//! fn main() {
//!     if let Err(error) = voxel_world::run() {
//!         eprintln!("{error}");
//!     }
//! }
//! ```

use std::path::PathBuf;

use cgmath::Vector3;
use log::info;

use config::EngineConfig;
use engine_state::persistence::WorldSave;
use engine_state::rendering::mesh_backend::HeadlessMeshBackend;
use engine_state::EngineState;
use error::EngineError;

pub mod config;
pub mod engine_state;
pub mod error;

pub use engine_state::voxels::world::{current_chunk_coordinate, TickReport, World};

/// Config file used when no path is given on the command line.
pub const DEFAULT_CONFIG_PATH: &str = "voxel-world.json";

/// Runs the headless demo: walks the viewer along +X and reports what streamed.
///
/// The config path is the first command-line argument, defaulting to
/// [`DEFAULT_CONFIG_PATH`]. A missing config file is created with defaults.
pub fn run() -> Result<(), EngineError> {
    let mut log_builder = env_logger::Builder::new();
    log_builder
        .target(env_logger::Target::Stdout)
        .parse_env("RUST_LOG")
        .init();

    info!("Logger initialized");

    let config_path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH));
    let config = EngineConfig::load_or_create(&config_path)?;

    let backend = HeadlessMeshBackend::new();
    let mut engine = match config.save_path.as_deref().filter(|path| path.exists()) {
        Some(path) => {
            let save = WorldSave::read_from(path)?;
            EngineState::from_save(config.clone(), save, backend)?
        }
        None => EngineState::new(config.clone(), backend)?,
    };

    let step = Vector3::new(config.demo.speed, 0.0, 0.0);
    for _ in 0..config.demo.ticks {
        engine.camera_state.move_by(step);
        engine.update();
    }

    let totals = engine.totals();
    let backend = engine.world.backend();
    info!(
        "Ran {} ticks: {} chunks generated, {} restored, {} evicted, {} detailed, {} meshed",
        totals.ticks,
        totals.generated,
        totals.restored,
        totals.evicted,
        totals.detailed,
        totals.meshed
    );
    info!(
        "{} resident chunks, {} live meshes with {} vertices, {} chunks retained",
        engine.world.resident_count(),
        backend.live_meshes(),
        backend.live_vertices(),
        engine.world.overlay_len()
    );

    engine.save()?;
    Ok(())
}
