//! # Structure Placement
//!
//! Expands the markers left by terrain generation into multi-block stamps.
//!
//! A marked column carries two marker cells: one at y = 0 whose variant names
//! the [`StructureKind`], and one at the column's surface height where the stamp
//! is anchored. Stamps are written through a [`BlockWriter`] so they can reach
//! into neighbouring chunks; the writer decides what to clip.
//!
//! Expansion runs exactly once per chunk, during the `Loaded → Detailed` step.
//! Afterwards the floor marker is turned back into stone.

use cgmath::Point3;

use super::block::{block_type::BlockType, Block};
use super::chunk::coordinate::ChunkCoordinate;
use super::chunk::voxel_grid::VoxelGrid;

/// Height of a cactus column.
pub const CACTUS_HEIGHT: i32 = 3;
/// Height of a tree trunk.
pub const TRUNK_HEIGHT: i32 = 5;
/// Side of a house footprint, walls included.
pub const HOUSE_SIZE: i32 = 7;
/// Height of house walls.
pub const WALL_HEIGHT: i32 = 3;

/// Kind of stamp encoded in a floor marker's variant.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum StructureKind {
    Cactus = 1,
    Tree = 2,
    House = 3,
}

impl StructureKind {
    pub fn from_variant(variant: u8) -> Option<Self> {
        match variant {
            1 => Some(StructureKind::Cactus),
            2 => Some(StructureKind::Tree),
            3 => Some(StructureKind::House),
            _ => None,
        }
    }
}

/// World access used while stamping structures.
pub trait BlockWriter {
    /// The block at a world position, air if unavailable.
    fn block_at(&self, position: Point3<i32>) -> Block;

    /// Writes a block at a world position.
    ///
    /// # Returns
    /// `false` if the write was refused or clipped.
    fn place_block(&mut self, position: Point3<i32>, block: Block) -> bool;
}

/// A marked column found in a chunk.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct StructureMarker {
    /// World position of the floor marker.
    pub floor: Point3<i32>,
    /// `None` when the variant names no known structure.
    pub kind: Option<StructureKind>,
    /// Height of the surface marker, `None` if the column has none.
    pub surface: Option<i32>,
}

#[derive(Default)]
pub struct StructurePlacer;

impl StructurePlacer {
    pub fn new() -> Self {
        StructurePlacer
    }

    /// Collects every pending marker of a chunk grid.
    pub fn find_markers(grid: &VoxelGrid, coordinate: ChunkCoordinate) -> Vec<StructureMarker> {
        let dims = grid.dimensions();
        let origin = coordinate.origin(dims);
        let marker = BlockType::STRUCTURE_MARKER.id();

        grid.pending_markers()
            .map(|(x, z, variant)| StructureMarker {
                floor: Point3::new(origin.x + x as i32, 0, origin.z + z as i32),
                kind: StructureKind::from_variant(variant),
                surface: (1..dims.height)
                    .find(|y| grid.block_type_at(x, *y, z) == marker)
                    .map(|y| y as i32),
            })
            .collect()
    }

    /// Stamps every marker and clears the floor markers.
    ///
    /// # Returns
    /// The number of structures stamped.
    pub fn expand<W: BlockWriter>(&self, markers: &[StructureMarker], writer: &mut W) -> usize {
        let mut stamped = 0;

        for marker in markers {
            if let (Some(kind), Some(surface)) = (marker.kind, marker.surface) {
                let anchor = Point3::new(marker.floor.x, surface, marker.floor.z);
                match kind {
                    StructureKind::Cactus => Self::stamp_cactus(anchor, writer),
                    StructureKind::Tree => Self::stamp_tree(anchor, writer),
                    StructureKind::House => Self::stamp_house(anchor, writer),
                }
                stamped += 1;
            }

            writer.place_block(marker.floor, Block::new(BlockType::STONE));
        }

        stamped
    }

    fn stamp_cactus<W: BlockWriter>(anchor: Point3<i32>, writer: &mut W) {
        for dy in 0..CACTUS_HEIGHT {
            writer.place_block(anchor + cgmath::vec3(0, dy, 0), Block::new(BlockType::LEAVES));
        }
    }

    fn stamp_tree<W: BlockWriter>(anchor: Point3<i32>, writer: &mut W) {
        let leaves = Block::new(BlockType::LEAVES);

        for dy in 0..TRUNK_HEIGHT {
            writer.place_block(anchor + cgmath::vec3(0, dy, 0), Block::new(BlockType::LOG));
        }

        // Two wide layers around the upper trunk.
        for dy in 3..5 {
            for dx in -2..=2 {
                for dz in -2..=2 {
                    if dx == 0 && dz == 0 {
                        continue;
                    }
                    writer.place_block(anchor + cgmath::vec3(dx, dy, dz), leaves);
                }
            }
        }

        for dx in -1..=1 {
            for dz in -1..=1 {
                writer.place_block(anchor + cgmath::vec3(dx, 5, dz), leaves);
            }
        }

        for (dx, dz) in [(0, 0), (1, 0), (-1, 0), (0, 1), (0, -1)] {
            writer.place_block(anchor + cgmath::vec3(dx, 6, dz), leaves);
        }
    }

    /// A single room with its door gap on the -X wall.
    fn stamp_house<W: BlockWriter>(anchor: Point3<i32>, writer: &mut W) {
        let (x, y, z) = (anchor.x, anchor.y, anchor.z);
        let far = HOUSE_SIZE - 1;
        let brick = Block::new(BlockType::BRICK);
        let planks = Block::new(BlockType::PLANKS);
        let log = Block::new(BlockType::LOG);

        for i in 0..HOUSE_SIZE {
            for j in 0..WALL_HEIGHT {
                writer.place_block(Point3::new(x + i, y + j, z), brick);
                writer.place_block(Point3::new(x, y + j, z + i), brick);
                writer.place_block(Point3::new(x + far, y + j, z + i), brick);
                writer.place_block(Point3::new(x + i, y + j, z + far), brick);
            }
        }

        // Gabled roof overhanging one block past the front and back walls.
        for i in 0..HOUSE_SIZE {
            writer.place_block(Point3::new(x + i, y + 3, z - 1), planks);
            writer.place_block(Point3::new(x + i, y + 3, z), planks);
            for dz in 1..far {
                writer.place_block(Point3::new(x + i, y + 4, z + dz), planks);
            }
            writer.place_block(Point3::new(x + i, y + 3, z + far), planks);
            writer.place_block(Point3::new(x + i, y + 3, z + far + 1), planks);
        }

        for (px, pz) in [(x, z + 1), (x, z + far - 1), (x + far, z + 1), (x + far, z + far - 1)] {
            writer.place_block(Point3::new(px, y + 3, pz), log);
        }

        for dz in 2..=4 {
            writer.place_block(Point3::new(x, y, z + dz), Block::AIR);
            writer.place_block(Point3::new(x, y + 1, z + dz), Block::AIR);
        }
    }
}
