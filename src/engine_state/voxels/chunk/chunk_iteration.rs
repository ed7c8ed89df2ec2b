//! # Chunk Iteration Module
//!
//! This module provides an iterator over all non-air cells of a voxel grid.
//!
//! ## Memory-Aware Iteration
//!
//! The iterator walks the grid in storage order (x, then z, then y), so each
//! step reads the next two bytes of the buffer and whole columns of air are
//! skipped without any lookups into neighbouring memory.

use cgmath::Point3;

use crate::engine_state::voxels::block::Block;

use super::voxel_grid::VoxelGrid;

/// An iterator over all non-air blocks in a grid, yielding chunk-local positions.
pub struct ChunkBlockIterator<'a> {
    /// Grid being iterated over
    grid: &'a VoxelGrid,
    /// Current X position within the chunk
    local_x: usize,
    /// Current Y position within the chunk
    local_y: usize,
    /// Current Z position within the chunk
    local_z: usize,
}

impl<'a> ChunkBlockIterator<'a> {
    /// Creates a new `ChunkBlockIterator` positioned at the first cell.
    ///
    /// # Arguments
    /// * `grid` - A reference to the grid to iterate over
    pub fn new(grid: &'a VoxelGrid) -> Self {
        ChunkBlockIterator {
            grid,
            local_x: 0,
            local_y: 0,
            local_z: 0,
        }
    }

    fn advance(&mut self) {
        let dims = self.grid.dimensions();
        self.local_y += 1;
        if self.local_y == dims.height {
            self.local_y = 0;
            self.local_z += 1;
            if self.local_z == dims.depth {
                self.local_z = 0;
                self.local_x += 1;
            }
        }
    }
}

impl Iterator for ChunkBlockIterator<'_> {
    type Item = (Point3<usize>, Block);

    fn next(&mut self) -> Option<Self::Item> {
        let dims = self.grid.dimensions();
        if dims.height == 0 || dims.depth == 0 {
            return None;
        }

        while self.local_x < dims.width {
            let position = Point3::new(self.local_x, self.local_y, self.local_z);
            let block = self.grid.get(self.local_x, self.local_y, self.local_z);
            self.advance();

            if !block.is_air() {
                return Some((position, block));
            }
        }

        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine_state::voxels::block::block_type::BlockType;
    use crate::engine_state::voxels::chunk::coordinate::ChunkDimensions;

    #[test]
    fn yields_only_non_air_cells_in_storage_order() {
        let mut grid = VoxelGrid::new(ChunkDimensions::new(2, 3, 2));
        grid.set(1, 0, 0, Block::new(BlockType::DIRT));
        grid.set(0, 2, 1, Block::new(BlockType::WATER));
        grid.set(0, 1, 0, Block::new(BlockType::STONE));

        let visited: Vec<_> = ChunkBlockIterator::new(&grid)
            .map(|(position, block)| (position, block.block_type))
            .collect();

        assert_eq!(
            visited,
            vec![
                (Point3::new(0, 1, 0), BlockType::STONE.id()),
                (Point3::new(0, 2, 1), BlockType::WATER.id()),
                (Point3::new(1, 0, 0), BlockType::DIRT.id()),
            ]
        );
    }

    #[test]
    fn empty_grid_yields_nothing() {
        let grid = VoxelGrid::new(ChunkDimensions::new(4, 4, 4));
        assert_eq!(ChunkBlockIterator::new(&grid).count(), 0);
    }
}
