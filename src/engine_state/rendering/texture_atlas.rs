//! # Texture Atlas
//!
//! UV lookup into the block atlas.
//!
//! The atlas is a grid of [`ATLAS_COLUMNS`] by [`ATLAS_ROWS`] tiles. Each block
//! id owns one column. Each variant owns a band of three rows inside that
//! column, holding the top, bottom and side tiles in that order:
//!
//! ```text
//!            id 0   id 1   id 2  ...
//! variant 0  top    top    top
//!            bottom bottom bottom
//!            side   side   side
//! variant 1  top    ...
//! ```

use crate::engine_state::voxels::block::{block_side::AtlasFace, BlockTypeSize, MAX_VARIANT};

/// Number of block columns in the atlas.
pub const ATLAS_COLUMNS: u32 = 20;
/// Number of tile rows in the atlas: five variants of three rows each.
pub const ATLAS_ROWS: u32 = 15;

/// A UV rectangle, `min` being the top-left corner in texture space.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct UvRect {
    pub min: [f32; 2],
    pub max: [f32; 2],
}

/// Looks up the tile for `(block id, face, variant)`.
///
/// Ids past the last column and variants past the last band are clamped, so
/// the lookup is total.
pub fn uv_rect(block_type: BlockTypeSize, face: AtlasFace, variant: u8) -> UvRect {
    let column = (block_type as u32).min(ATLAS_COLUMNS - 1);
    let row = variant.min(MAX_VARIANT) as u32 * 3 + face as u32;

    UvRect {
        min: [
            column as f32 / ATLAS_COLUMNS as f32,
            row as f32 / ATLAS_ROWS as f32,
        ],
        max: [
            (column + 1) as f32 / ATLAS_COLUMNS as f32,
            (row + 1) as f32 / ATLAS_ROWS as f32,
        ],
    }
}
