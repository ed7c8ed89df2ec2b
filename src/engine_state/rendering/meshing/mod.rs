//! # Chunk Meshing
//!
//! Converts a chunk's voxel grid into a triangle list containing only the
//! faces that can be seen.
//!
//! ## Face Culling
//!
//! Every non-air voxel considers its six neighbours. Which neighbours hide a
//! face is decided by an [`Occlusion`] rule picked from the voxel's own id:
//!
//! * water is hidden by any non-air neighbour, so touching water never
//!   renders interior faces
//! * everything else is hidden only by solid neighbours, so a stone face
//!   under a lake is still drawn
//!
//! A water voxel that shows its top face also emits the same quad facing
//! down, which keeps the surface visible from below while submerged.
//!
//! Neighbours across the chunk's horizontal edges are read through a
//! [`NeighborQuery`]. Cells above or below the world are air, and bottom faces
//! on the world floor are never emitted.

use cgmath::{Point3, Vector3};

use crate::engine_state::voxels::block::{block_side::BlockSide, block_type::BlockType, BlockTypeSize};
use crate::engine_state::voxels::chunk::{
    chunk_iteration::ChunkBlockIterator, coordinate::ChunkCoordinate, voxel_grid::VoxelGrid,
};

use super::texture_atlas::uv_rect;
use super::vertex::Vertex;

mod face;

pub use face::Face;

/// Vertices emitted per visible face: two triangles.
pub const VERTICES_PER_FACE: usize = 6;

/// Read-only block lookups outside the chunk being meshed.
pub trait NeighborQuery {
    /// Block id at a world position, air where nothing is loaded.
    fn block_type_at(&self, position: Point3<i32>) -> BlockTypeSize;
}

/// A query that sees nothing but air.
pub struct NoNeighbors;

impl NeighborQuery for NoNeighbors {
    fn block_type_at(&self, _position: Point3<i32>) -> BlockTypeSize {
        BlockType::AIR.id()
    }
}

/// Which neighbours hide a voxel's faces.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Occlusion {
    /// Any non-air neighbour occludes. Used for water.
    AnyBlock,
    /// Only neighbours that are neither air nor water occlude.
    SolidOnly,
}

impl Occlusion {
    pub fn for_block(block_type: BlockTypeSize) -> Self {
        if block_type == BlockType::WATER.id() {
            Occlusion::AnyBlock
        } else {
            Occlusion::SolidOnly
        }
    }

    pub fn occludes(self, neighbor: BlockTypeSize) -> bool {
        let air = BlockType::AIR.id();
        match self {
            Occlusion::AnyBlock => neighbor != air,
            Occlusion::SolidOnly => neighbor != air && neighbor != BlockType::WATER.id(),
        }
    }
}

/// Builds the visible-face triangle list of one chunk.
///
/// # Arguments
/// * `grid` - The chunk's voxels
/// * `coordinate` - The chunk's position, used to translate vertices into world space
/// * `neighbors` - Lookup for cells beyond the chunk's horizontal edges
///
/// # Returns
/// Six vertices per visible face, positioned in world space.
pub fn build_mesh<Q: NeighborQuery>(
    grid: &VoxelGrid,
    coordinate: ChunkCoordinate,
    neighbors: &Q,
) -> Vec<Vertex> {
    let dims = grid.dimensions();
    let origin = coordinate.origin(dims);
    let translation = Vector3::new(origin.x, origin.y, origin.z);
    let mut vertices = Vec::new();

    for (position, block) in ChunkBlockIterator::new(grid) {
        let local = Point3::new(position.x as i32, position.y as i32, position.z as i32);
        let occlusion = Occlusion::for_block(block.block_type);

        for side in BlockSide::all() {
            if side == BlockSide::BOTTOM && local.y == 0 {
                continue;
            }

            let neighbor = local + side.offset();
            let neighbor_type = match dims.local(neighbor.x, neighbor.y, neighbor.z) {
                Some((x, y, z)) => grid.block_type_at(x, y, z),
                None if neighbor.y < 0 || neighbor.y >= dims.height as i32 => BlockType::AIR.id(),
                None => neighbors.block_type_at(origin + Vector3::new(neighbor.x, neighbor.y, neighbor.z)),
            };

            if occlusion.occludes(neighbor_type) {
                continue;
            }

            let face = Face::new(local, side);
            let uv = uv_rect(block.block_type, side.atlas_face(), block.variant);
            face.push_vertices(translation, uv, &mut vertices);

            if side == BlockSide::TOP && block.is_water() {
                face.push_reversed_vertices(translation, uv, &mut vertices);
            }
        }
    }

    vertices
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine_state::voxels::block::Block;
    use crate::engine_state::voxels::chunk::coordinate::ChunkDimensions;

    struct SolidNeighbors;

    impl NeighborQuery for SolidNeighbors {
        fn block_type_at(&self, _position: Point3<i32>) -> BlockTypeSize {
            BlockType::STONE.id()
        }
    }

    fn grid_with(blocks: &[((usize, usize, usize), BlockType)]) -> VoxelGrid {
        let mut grid = VoxelGrid::new(ChunkDimensions::new(4, 6, 4));
        for ((x, y, z), block_type) in blocks {
            grid.set(*x, *y, *z, Block::new(*block_type));
        }
        grid
    }

    fn faces(vertices: &[Vertex]) -> usize {
        vertices.len() / VERTICES_PER_FACE
    }

    fn faces_with_normal(vertices: &[Vertex], normal: [f32; 3]) -> usize {
        vertices
            .chunks(VERTICES_PER_FACE)
            .filter(|face| face[0].normal == normal)
            .count()
    }

    #[test]
    fn isolated_voxel_emits_six_faces() {
        let grid = grid_with(&[((1, 2, 1), BlockType::STONE)]);
        let vertices = build_mesh(&grid, ChunkCoordinate::new(0, 0), &NoNeighbors);
        assert_eq!(faces(&vertices), 6);
        assert_eq!(vertices.len() / 3, 12);
    }

    #[test]
    fn shared_faces_are_culled() {
        let grid = grid_with(&[((1, 2, 1), BlockType::STONE), ((2, 2, 1), BlockType::DIRT)]);
        let vertices = build_mesh(&grid, ChunkCoordinate::new(0, 0), &NoNeighbors);
        assert_eq!(faces(&vertices), 10);
    }

    #[test]
    fn water_under_air_also_faces_down() {
        let water = grid_with(&[((1, 2, 1), BlockType::WATER)]);
        let vertices = build_mesh(&water, ChunkCoordinate::new(0, 0), &NoNeighbors);
        assert_eq!(faces(&vertices), 7);
        assert_eq!(faces_with_normal(&vertices, [0.0, 1.0, 0.0]), 1);
        assert_eq!(faces_with_normal(&vertices, [0.0, -1.0, 0.0]), 2);

        let stone = grid_with(&[((1, 2, 1), BlockType::STONE)]);
        let vertices = build_mesh(&stone, ChunkCoordinate::new(0, 0), &NoNeighbors);
        assert_eq!(faces_with_normal(&vertices, [0.0, 1.0, 0.0]), 1);
        assert_eq!(faces_with_normal(&vertices, [0.0, -1.0, 0.0]), 1);
    }

    #[test]
    fn water_underside_reuses_the_top_quad() {
        let grid = grid_with(&[((1, 2, 1), BlockType::WATER)]);
        let vertices = build_mesh(&grid, ChunkCoordinate::new(0, 0), &NoNeighbors);
        let faces: Vec<&[Vertex]> = vertices.chunks(VERTICES_PER_FACE).collect();

        let top = faces
            .iter()
            .position(|face| face[0].normal == [0.0, 1.0, 0.0])
            .unwrap();
        let underside = faces[top + 1];
        assert_eq!(underside[0].normal, [0.0, -1.0, 0.0]);

        let corners = |face: &[Vertex]| {
            let mut corners: Vec<[f32; 3]> = face.iter().map(|v| v.position).collect();
            corners.sort_by(|a, b| a.partial_cmp(b).unwrap());
            corners.dedup();
            corners
        };
        assert_eq!(corners(underside), corners(faces[top]));
        assert!(corners(underside).iter().all(|corner| corner[1] == 3.0));
        assert_ne!(underside[1].position, faces[top][1].position);
    }

    #[test]
    fn solid_tops_under_water_stay_visible() {
        let grid = grid_with(&[((1, 2, 1), BlockType::STONE), ((1, 3, 1), BlockType::WATER)]);
        let vertices = build_mesh(&grid, ChunkCoordinate::new(0, 0), &NoNeighbors);
        // Stone keeps all six; water loses its bottom and gains the underside.
        assert_eq!(faces(&vertices), 12);
        assert_eq!(faces_with_normal(&vertices, [0.0, 1.0, 0.0]), 2);
        assert_eq!(faces_with_normal(&vertices, [0.0, -1.0, 0.0]), 2);
    }

    #[test]
    fn stacked_water_hides_its_interior() {
        let grid = grid_with(&[((1, 1, 1), BlockType::WATER), ((1, 2, 1), BlockType::WATER)]);
        let vertices = build_mesh(&grid, ChunkCoordinate::new(0, 0), &NoNeighbors);
        // Lower: bottom and four sides. Upper: top, underside and four sides.
        assert_eq!(faces(&vertices), 11);
    }

    #[test]
    fn solid_faces_next_to_water_stay_visible() {
        let grid = grid_with(&[((1, 2, 1), BlockType::STONE), ((2, 2, 1), BlockType::WATER)]);
        let vertices = build_mesh(&grid, ChunkCoordinate::new(0, 0), &NoNeighbors);
        // Stone keeps all six, water loses the side touching stone.
        assert_eq!(faces(&vertices), 6 + 6);
        assert_eq!(faces_with_normal(&vertices, [1.0, 0.0, 0.0]), 2);
        assert_eq!(faces_with_normal(&vertices, [-1.0, 0.0, 0.0]), 1);
    }

    #[test]
    fn floor_bottoms_are_skipped_and_ceiling_tops_kept() {
        let grid = grid_with(&[((1, 0, 1), BlockType::STONE), ((2, 5, 2), BlockType::STONE)]);
        let vertices = build_mesh(&grid, ChunkCoordinate::new(0, 0), &NoNeighbors);
        assert_eq!(faces(&vertices), 5 + 6);
    }

    #[test]
    fn chunk_edges_consult_the_neighbor_query() {
        let grid = grid_with(&[((0, 2, 3), BlockType::STONE)]);
        let open = build_mesh(&grid, ChunkCoordinate::new(0, 0), &NoNeighbors);
        let closed = build_mesh(&grid, ChunkCoordinate::new(0, 0), &SolidNeighbors);
        assert_eq!(faces(&open), 6);
        // -X and +Z neighbours are in other chunks.
        assert_eq!(faces(&closed), 4);
    }

    #[test]
    fn vertices_are_translated_by_the_chunk_origin() {
        let grid = grid_with(&[((0, 1, 0), BlockType::STONE)]);
        let vertices = build_mesh(&grid, ChunkCoordinate::new(2, -1), &NoNeighbors);
        let min_x = vertices.iter().map(|v| v.position[0]).fold(f32::MAX, f32::min);
        let min_z = vertices.iter().map(|v| v.position[2]).fold(f32::MAX, f32::min);
        assert_eq!(min_x, 8.0);
        assert_eq!(min_z, -4.0);
    }
}
