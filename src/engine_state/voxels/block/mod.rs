//! # Block Module
//!
//! This module provides the core block-related functionality for the voxel world.
//! It includes block type definitions, block face handling, and the two-byte
//! voxel cell stored in every chunk grid.

use block_type::BlockType;

pub mod block_side;
pub mod block_type;

/// The underlying integer type used to represent block types in memory.
pub type BlockTypeSize = u8;

/// Highest variant that has its own band in the texture atlas.
pub const MAX_VARIANT: u8 = 4;

/// Represents a single voxel cell: a block id and a variant byte.
///
/// The meaning of `variant` depends on the block: ore kind for stone,
/// texture orientation for grass and water, structure kind for markers.
///
/// # Memory Layout
/// The `#[repr(C)]` attribute keeps the two bytes in grid channel order.
#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable, Debug, Default, PartialEq, Eq)]
pub struct Block {
    /// The type of this block, encoded as a `BlockTypeSize` for compact storage.
    pub block_type: BlockTypeSize,
    /// Variant byte stored in channel 1.
    pub variant: u8,
}

impl Block {
    /// Air with no variant.
    pub const AIR: Block = Block {
        block_type: 0,
        variant: 0,
    };

    /// Creates a new block of the specified type with variant 0.
    ///
    /// # Arguments
    /// * `block_type` - The type of block to create
    ///
    /// # Returns
    /// A new `Block` instance with the specified type.
    pub fn new(block_type: BlockType) -> Self {
        Block {
            block_type: block_type as BlockTypeSize,
            variant: 0,
        }
    }

    /// Creates a block with an explicit variant.
    pub fn with_variant(block_type: BlockType, variant: u8) -> Self {
        Block {
            block_type: block_type as BlockTypeSize,
            variant,
        }
    }

    pub fn is_air(&self) -> bool {
        self.block_type == BlockType::AIR.id()
    }

    pub fn is_water(&self) -> bool {
        self.block_type == BlockType::WATER.id()
    }

    pub fn is(&self, block_type: BlockType) -> bool {
        self.block_type == block_type.id()
    }
}
