//! # Block Side Module
//!
//! This module defines the six faces of a voxel block and the atlas row each
//! face samples from.

use cgmath::Vector3;

/// Represents the six possible faces of a voxel block.
///
/// The order is: [FRONT, BACK, BOTTOM, TOP, LEFT, RIGHT]
#[derive(PartialEq, Eq, Hash, Copy, Clone, Debug)]
pub enum BlockSide {
    /// The face pointing towards negative X
    FRONT = 0,

    /// The face pointing towards positive X
    BACK = 1,

    /// The face pointing towards negative Y
    BOTTOM = 2,

    /// The face pointing towards positive Y
    TOP = 3,

    /// The face pointing towards negative Z
    LEFT = 4,

    /// The face pointing towards positive Z
    RIGHT = 5,
}

/// Which sub-row of a variant band in the texture atlas a face samples.
#[derive(PartialEq, Eq, Copy, Clone, Debug)]
pub enum AtlasFace {
    Top = 0,
    Bottom = 1,
    Side = 2,
}

impl BlockSide {
    /// Returns an array containing all six block faces in a consistent order.
    ///
    /// # Returns
    /// An array containing all `BlockSide` variants.
    pub fn all() -> [BlockSide; 6] {
        [
            BlockSide::FRONT,
            BlockSide::BACK,
            BlockSide::BOTTOM,
            BlockSide::TOP,
            BlockSide::LEFT,
            BlockSide::RIGHT,
        ]
    }

    /// Offset from a block to the neighbour this face touches.
    pub fn offset(self) -> Vector3<i32> {
        match self {
            BlockSide::FRONT => Vector3::new(-1, 0, 0),
            BlockSide::BACK => Vector3::new(1, 0, 0),
            BlockSide::BOTTOM => Vector3::new(0, -1, 0),
            BlockSide::TOP => Vector3::new(0, 1, 0),
            BlockSide::LEFT => Vector3::new(0, 0, -1),
            BlockSide::RIGHT => Vector3::new(0, 0, 1),
        }
    }

    /// Outward unit normal of this face.
    pub fn normal(self) -> [f32; 3] {
        let offset = self.offset();
        [offset.x as f32, offset.y as f32, offset.z as f32]
    }

    pub fn atlas_face(self) -> AtlasFace {
        match self {
            BlockSide::TOP => AtlasFace::Top,
            BlockSide::BOTTOM => AtlasFace::Bottom,
            _ => AtlasFace::Side,
        }
    }
}
