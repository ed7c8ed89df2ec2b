//! # World Saves
//!
//! A save is the seed, the chunk dimensions and the raw grid of every chunk
//! that differs from what the generator would produce. Unmodified chunks are
//! left out and regenerated on demand.
//!
//! The on-disk encoding is JSON. There is no version field; the loader only
//! checks that dimensions match and that every grid holds exactly one chunk.

use std::collections::BTreeMap;
use std::path::Path;

use log::info;
use serde::{Deserialize, Serialize};

use crate::engine_state::voxels::chunk::coordinate::{ChunkCoordinate, ChunkDimensions};
use crate::engine_state::voxels::chunk::voxel_grid::{VoxelGrid, CHANNELS};
use crate::error::PersistenceError;

/// One retained chunk grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedChunk {
    pub coordinate: ChunkCoordinate,
    /// Flat grid bytes, two per voxel (id, variant).
    pub voxels: Vec<u8>,
}

/// Logical contents of a saved world.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorldSave {
    pub seed: i32,
    pub dimensions: ChunkDimensions,
    /// Sorted by coordinate.
    pub chunks: Vec<SavedChunk>,
}

impl WorldSave {
    pub fn from_grids(
        seed: i32,
        dimensions: ChunkDimensions,
        grids: &BTreeMap<ChunkCoordinate, VoxelGrid>,
    ) -> Self {
        let chunks = grids
            .iter()
            .map(|(coordinate, grid)| SavedChunk {
                coordinate: *coordinate,
                voxels: grid.as_bytes().to_vec(),
            })
            .collect();

        WorldSave {
            seed,
            dimensions,
            chunks,
        }
    }

    /// Rebuilds the grids of a save for a world with `expected` dimensions.
    ///
    /// # Errors
    ///
    /// * [`PersistenceError::DimensionMismatch`] if the save used other dimensions
    /// * [`PersistenceError::CorruptChunk`] if any grid has the wrong length
    pub fn into_overlay(
        self,
        expected: ChunkDimensions,
    ) -> Result<BTreeMap<ChunkCoordinate, VoxelGrid>, PersistenceError> {
        if self.dimensions != expected {
            return Err(PersistenceError::DimensionMismatch {
                expected,
                found: self.dimensions,
            });
        }

        let mut overlay = BTreeMap::new();
        for chunk in self.chunks {
            let len = chunk.voxels.len();
            let grid = VoxelGrid::from_raw(expected, chunk.voxels).ok_or(
                PersistenceError::CorruptChunk {
                    coordinate: chunk.coordinate,
                    len,
                    expected: expected.volume() * CHANNELS,
                },
            )?;
            overlay.insert(chunk.coordinate, grid);
        }
        Ok(overlay)
    }

    pub fn to_json(&self) -> Result<String, PersistenceError> {
        serde_json::to_string(self).map_err(PersistenceError::SerializeError)
    }

    pub fn from_json(contents: &str) -> Result<Self, PersistenceError> {
        serde_json::from_str(contents).map_err(PersistenceError::ParseError)
    }

    /// Writes the save to `path`, creating parent directories as needed.
    pub fn write_to(&self, path: &Path) -> Result<(), PersistenceError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(PersistenceError::WriteError)?;
        }
        std::fs::write(path, self.to_json()?).map_err(PersistenceError::WriteError)?;
        info!("Saved {} chunks to {}", self.chunks.len(), path.display());
        Ok(())
    }

    pub fn read_from(path: &Path) -> Result<Self, PersistenceError> {
        let contents = std::fs::read_to_string(path).map_err(PersistenceError::ReadError)?;
        let save = Self::from_json(&contents)?;
        info!("Read {} chunks from {}", save.chunks.len(), path.display());
        Ok(save)
    }
}
