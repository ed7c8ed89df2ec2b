//! # Chunk Module
//!
//! This module provides the `Chunk` struct: one full-height column of the world
//! together with its lifecycle state and, once meshed, the handle of its
//! uploaded geometry.
//!
//! ## Lifecycle
//!
//! ```text
//! Loaded ──detail──▶ Detailed ──mesh──▶ Meshed
//! ```
//!
//! * `Loaded` - the voxel grid exists, structure markers are still pending
//! * `Detailed` - markers have been expanded into blocks
//! * `Meshed` - a vertex list has been handed to the mesh backend
//!
//! Transitions only move forward. Eviction drops the chunk entirely.

use coordinate::ChunkCoordinate;
use voxel_grid::VoxelGrid;

use crate::engine_state::rendering::mesh_backend::MeshHandle;

pub mod chunk_iteration;
pub mod coordinate;
pub mod voxel_grid;

/// Where a resident chunk is in its generation pipeline.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ChunkState {
    Loaded,
    Detailed,
    Meshed,
}

/// A resident chunk. Owns its grid and its mesh handle exclusively.
#[derive(Debug)]
pub struct Chunk {
    /// The position of this chunk in chunk coordinates (not block coordinates).
    pub coordinate: ChunkCoordinate,
    pub grid: VoxelGrid,
    pub state: ChunkState,
    mesh: Option<MeshHandle>,
    /// Set whenever the grid is written after generation.
    pub modified: bool,
}

impl Chunk {
    /// Wraps a freshly generated grid.
    pub fn generated(coordinate: ChunkCoordinate, grid: VoxelGrid) -> Self {
        Chunk {
            coordinate,
            grid,
            state: ChunkState::Loaded,
            mesh: None,
            modified: false,
        }
    }

    /// Rebuilds a chunk from a grid kept in the overlay.
    ///
    /// Saved grids already carry their expanded structures, so the chunk starts
    /// out `Detailed` unless a floor marker is still waiting to be expanded.
    pub fn restored(coordinate: ChunkCoordinate, grid: VoxelGrid) -> Self {
        let state = if grid.has_pending_markers() {
            ChunkState::Loaded
        } else {
            ChunkState::Detailed
        };

        Chunk {
            coordinate,
            grid,
            state,
            mesh: None,
            modified: true,
        }
    }

    pub fn mesh(&self) -> Option<MeshHandle> {
        self.mesh
    }

    /// Stores a new mesh handle and returns the previous one, which the caller must release.
    pub fn replace_mesh(&mut self, handle: MeshHandle) -> Option<MeshHandle> {
        self.state = ChunkState::Meshed;
        self.mesh.replace(handle)
    }

    pub fn take_mesh(&mut self) -> Option<MeshHandle> {
        self.mesh.take()
    }
}
