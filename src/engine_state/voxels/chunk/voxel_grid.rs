//! # Voxel Grid
//!
//! Dense two-channel storage for one chunk.
//!
//! ## Memory Layout
//!
//! Cells are kept in a single flat byte buffer. The byte for `(x, y, z, channel)`
//! lives at `((x * depth + z) * height + y) * 2 + channel`, so a vertical column
//! is contiguous. Channel 0 holds the block id and channel 1 the variant.
//!
//! Reads outside the grid return air and writes outside it are dropped, which
//! lets generators and structure stamps clip at chunk bounds without checks.

use super::coordinate::ChunkDimensions;
use crate::engine_state::voxels::block::{block_type::BlockType, Block, BlockTypeSize};

/// Number of bytes stored per voxel.
pub const CHANNELS: usize = 2;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VoxelGrid {
    dims: ChunkDimensions,
    data: Vec<u8>,
}

impl VoxelGrid {
    /// Creates a grid filled with air.
    pub fn new(dims: ChunkDimensions) -> Self {
        Self {
            dims,
            data: vec![0; dims.volume() * CHANNELS],
        }
    }

    /// Wraps a raw buffer, typically one read back from a save.
    ///
    /// # Returns
    /// `None` if the buffer length does not match the dimensions.
    pub fn from_raw(dims: ChunkDimensions, data: Vec<u8>) -> Option<Self> {
        if data.len() != dims.volume() * CHANNELS {
            return None;
        }
        Some(Self { dims, data })
    }

    pub fn dimensions(&self) -> ChunkDimensions {
        self.dims
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    fn offset(&self, x: usize, y: usize, z: usize) -> Option<usize> {
        if x >= self.dims.width || y >= self.dims.height || z >= self.dims.depth {
            return None;
        }
        Some(((x * self.dims.depth + z) * self.dims.height + y) * CHANNELS)
    }

    /// Reads the cell at chunk-local coordinates.
    pub fn get(&self, x: usize, y: usize, z: usize) -> Block {
        match self.offset(x, y, z) {
            Some(offset) => Block {
                block_type: self.data[offset],
                variant: self.data[offset + 1],
            },
            None => Block::AIR,
        }
    }

    pub fn block_type_at(&self, x: usize, y: usize, z: usize) -> BlockTypeSize {
        self.get(x, y, z).block_type
    }

    /// Writes both channels of a cell.
    ///
    /// # Returns
    /// `false` if the coordinates are outside the grid and nothing was written.
    pub fn set(&mut self, x: usize, y: usize, z: usize, block: Block) -> bool {
        match self.offset(x, y, z) {
            Some(offset) => {
                self.data[offset] = block.block_type;
                self.data[offset + 1] = block.variant;
                true
            }
            None => false,
        }
    }

    /// Copies a full vertical column into the grid, starting at y = 0.
    pub fn write_column(&mut self, x: usize, z: usize, column: &[Block]) {
        for (y, block) in column.iter().enumerate().take(self.dims.height) {
            self.set(x, y, z, *block);
        }
    }

    /// Columns whose y = 0 cell still holds an unexpanded structure marker.
    pub fn pending_markers(&self) -> impl Iterator<Item = (usize, usize, u8)> + '_ {
        let marker = BlockType::STRUCTURE_MARKER.id();
        (0..self.dims.width).flat_map(move |x| {
            (0..self.dims.depth).filter_map(move |z| {
                let cell = self.get(x, 0, z);
                (cell.block_type == marker).then_some((x, z, cell.variant))
            })
        })
    }

    pub fn has_pending_markers(&self) -> bool {
        self.pending_markers().next().is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offset_matches_column_major_layout() {
        let dims = ChunkDimensions::new(2, 3, 4);
        let mut grid = VoxelGrid::new(dims);
        grid.set(1, 2, 3, Block::with_variant(BlockType::STONE, 4));

        let offset = ((1 * 4 + 3) * 3 + 2) * CHANNELS;
        assert_eq!(grid.as_bytes()[offset], BlockType::STONE.id());
        assert_eq!(grid.as_bytes()[offset + 1], 4);
    }

    #[test]
    fn out_of_range_access_is_air_and_ignored() {
        let mut grid = VoxelGrid::new(ChunkDimensions::new(2, 2, 2));
        assert!(!grid.set(2, 0, 0, Block::new(BlockType::DIRT)));
        assert_eq!(grid.get(0, 5, 0), Block::AIR);
        assert!(grid.as_bytes().iter().all(|byte| *byte == 0));
    }

    #[test]
    fn from_raw_checks_length() {
        let dims = ChunkDimensions::new(2, 2, 2);
        assert!(VoxelGrid::from_raw(dims, vec![0; 16]).is_some());
        assert!(VoxelGrid::from_raw(dims, vec![0; 15]).is_none());
    }

    #[test]
    fn pending_markers_only_look_at_the_floor() {
        let mut grid = VoxelGrid::new(ChunkDimensions::new(3, 4, 3));
        grid.set(1, 3, 1, Block::new(BlockType::STRUCTURE_MARKER));
        assert!(!grid.has_pending_markers());

        grid.set(2, 0, 1, Block::with_variant(BlockType::STRUCTURE_MARKER, 2));
        assert_eq!(grid.pending_markers().collect::<Vec<_>>(), vec![(2, 1, 2)]);
    }
}
