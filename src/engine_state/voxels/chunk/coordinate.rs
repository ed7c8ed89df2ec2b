//! Chunk-grid coordinates and the per-world chunk dimensions.

use cgmath::Point3;
use serde::{Deserialize, Serialize};

/// Position of a chunk in chunk-grid units (not blocks).
///
/// Chunks span the full world height, so only the horizontal axes are needed.
/// The ordering is lexicographic on `(x, z)` which keeps saved worlds stable.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ChunkCoordinate {
    pub x: i32,
    pub z: i32,
}

/// Size of every chunk in a world, in blocks.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChunkDimensions {
    /// Extent along X.
    pub width: usize,
    /// Extent along Y. Chunks always span the whole world height.
    pub height: usize,
    /// Extent along Z.
    pub depth: usize,
}

impl Default for ChunkDimensions {
    fn default() -> Self {
        Self {
            width: 16,
            height: 100,
            depth: 16,
        }
    }
}

impl ChunkDimensions {
    pub fn new(width: usize, height: usize, depth: usize) -> Self {
        Self {
            width,
            height,
            depth,
        }
    }

    /// Number of voxel cells in one chunk.
    pub fn volume(&self) -> usize {
        self.width * self.height * self.depth
    }

    /// Converts signed chunk-local coordinates into grid indices.
    ///
    /// # Returns
    /// `None` when any component falls outside the chunk.
    pub fn local(&self, x: i32, y: i32, z: i32) -> Option<(usize, usize, usize)> {
        if x < 0 || y < 0 || z < 0 {
            return None;
        }
        let (x, y, z) = (x as usize, y as usize, z as usize);
        if x >= self.width || y >= self.height || z >= self.depth {
            return None;
        }
        Some((x, y, z))
    }
}

impl ChunkCoordinate {
    pub fn new(x: i32, z: i32) -> Self {
        Self { x, z }
    }

    /// Moves the coordinate by whole chunks.
    pub fn offset(&self, dx: i32, dz: i32) -> Self {
        Self::new(self.x + dx, self.z + dz)
    }

    /// World-space block position of this chunk's `(0, 0, 0)` corner.
    pub fn origin(&self, dims: ChunkDimensions) -> Point3<i32> {
        Point3::new(
            self.x * dims.width as i32,
            0,
            self.z * dims.depth as i32,
        )
    }

    /// The chunk containing an integer block position.
    pub fn from_block(position: Point3<i32>, dims: ChunkDimensions) -> Self {
        Self::new(
            position.x.div_euclid(dims.width as i32),
            position.z.div_euclid(dims.depth as i32),
        )
    }

    /// The chunk containing a continuous world position, flooring towards negative infinity.
    pub fn from_world(position: Point3<f32>, dims: ChunkDimensions) -> Self {
        Self::new(
            (position.x / dims.width as f32).floor() as i32,
            (position.z / dims.depth as f32).floor() as i32,
        )
    }

    /// Chebyshev distance in chunks, the metric of the streaming window.
    pub fn chebyshev_distance(&self, other: &ChunkCoordinate) -> u32 {
        self.x.abs_diff(other.x).max(self.z.abs_diff(other.z))
    }

    /// Whether this coordinate lies in the square window `centre ± radius` on both axes.
    pub fn is_within(&self, centre: &ChunkCoordinate, radius: u32) -> bool {
        self.chebyshev_distance(centre) <= radius
    }
}
