//! # Block Type Module
//!
//! This module defines the different types of blocks in the voxel world.
//! Block ids are stored directly in channel 0 of a chunk's voxel grid, so the
//! discriminants below are part of the persisted format.

use num_derive::FromPrimitive;
use num_traits::FromPrimitive;

use super::BlockTypeSize;

/// Enumerates all block types the generator and the editing API know about.
///
/// The `FromPrimitive` derive allows conversion from the raw id stored in a
/// voxel grid. Gaps in the numbering (6, 13, 14, 16..=19) are ids the atlas
/// reserves but nothing in the world produces.
#[allow(non_camel_case_types)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, FromPrimitive)]
pub enum BlockType {
    /// Empty space.
    AIR = 0,

    /// Default underground fill. Variants 1 to 4 are ore speckles.
    STONE = 1,

    /// House walls.
    BRICK = 2,

    /// Layer between the surface cap and stone.
    DIRT = 3,

    /// Plains surface cap.
    GRASS = 4,

    /// Translucent fill below the water level. The variant is a visual orientation.
    WATER = 5,

    /// Tree trunks and house posts.
    LOG = 7,

    /// Tree canopies. Cacti reuse this block.
    LEAVES = 8,

    /// Desert surface cap.
    SAND = 9,

    /// Snow hills surface cap.
    SNOW = 10,

    /// House roofs.
    PLANKS = 11,

    /// Unbreakable floor stamped at y = 1.
    BEDROCK = 12,

    /// Mountain caps above the snow line.
    PACKED_SNOW = 15,

    /// Placeholder left by terrain generation and consumed while detailing.
    STRUCTURE_MARKER = 20,
}

impl BlockType {
    /// Converts a raw block id into a `BlockType`.
    ///
    /// # Arguments
    /// * `id` - The block id as stored in a voxel grid
    ///
    /// # Returns
    /// The matching `BlockType`, or `None` for ids no block uses
    pub fn from_id(id: BlockTypeSize) -> Option<Self> {
        FromPrimitive::from_u8(id)
    }

    /// The raw id of this block type.
    pub const fn id(self) -> BlockTypeSize {
        self as BlockTypeSize
    }

    /// Whether physics should collide with this block (anything but air and water).
    pub fn is_solid(self) -> bool {
        !matches!(self, BlockType::AIR | BlockType::WATER)
    }
}
