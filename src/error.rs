//! Error types for configuration and world persistence.
//!
//! The world itself never fails: queries read air where nothing is loaded and
//! refused edits return `false`. Errors only arise at the file-system edges.

use crate::engine_state::voxels::chunk::coordinate::{ChunkCoordinate, ChunkDimensions};

/// Errors that can occur when loading, saving, or validating configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the config file from disk.
    #[error("failed to read config: {0}")]
    ReadError(#[source] std::io::Error),

    /// Failed to write the config file to disk.
    #[error("failed to write config: {0}")]
    WriteError(#[source] std::io::Error),

    /// Failed to parse JSON content.
    #[error("failed to parse config: {0}")]
    ParseError(#[source] serde_json::Error),

    /// Failed to serialize config to JSON.
    #[error("failed to serialize config: {0}")]
    SerializeError(#[source] serde_json::Error),

    /// A value parsed but cannot drive a world.
    #[error("invalid config value `{field}`: {reason}")]
    Invalid {
        field: &'static str,
        reason: String,
    },
}

/// Errors that can occur when reading or writing a world save.
#[derive(Debug, thiserror::Error)]
pub enum PersistenceError {
    #[error("failed to read save: {0}")]
    ReadError(#[source] std::io::Error),

    #[error("failed to write save: {0}")]
    WriteError(#[source] std::io::Error),

    #[error("failed to parse save: {0}")]
    ParseError(#[source] serde_json::Error),

    #[error("failed to serialize save: {0}")]
    SerializeError(#[source] serde_json::Error),

    /// The save was written for chunks of another size.
    #[error("save uses chunk dimensions {found:?}, world expects {expected:?}")]
    DimensionMismatch {
        expected: ChunkDimensions,
        found: ChunkDimensions,
    },

    /// A saved grid does not hold exactly one chunk of voxels.
    #[error("chunk ({}, {}) holds {len} bytes, expected {expected}", .coordinate.x, .coordinate.z)]
    CorruptChunk {
        coordinate: ChunkCoordinate,
        len: usize,
        expected: usize,
    },
}

/// Any failure of the engine binary.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Persistence(#[from] PersistenceError),
}
