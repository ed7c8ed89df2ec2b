use cgmath::{Point3, Vector3};

use crate::engine_state::rendering::texture_atlas::UvRect;
use crate::engine_state::rendering::vertex::Vertex;
use crate::engine_state::voxels::block::block_side::BlockSide;

/// Represents a single quad face of a voxel in the mesh.
///
/// A face is defined by four corner points (lower-left, lower-right, upper-right, upper-left)
/// in chunk-local coordinates. Seen from outside the block, the corners run
/// counter-clockwise `ll → lr → ur → ul`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Face {
    /// Lower-left corner of the face in chunk coordinates
    pub ll: Point3<i32>,
    /// Lower-right corner of the face in chunk coordinates
    pub lr: Point3<i32>,
    /// Upper-left corner of the face in chunk coordinates
    pub ul: Point3<i32>,
    /// Upper-right corner of the face in chunk coordinates
    pub ur: Point3<i32>,
    /// Which side of the block this face represents
    pub block_side: BlockSide,
}

impl Face {
    /// Creates the face of the voxel at `position` facing `block_side`.
    ///
    /// The voxel occupies the unit cube from `position` to `position + 1`.
    pub fn new(position: Point3<i32>, block_side: BlockSide) -> Self {
        let (i, j, k) = (position.x, position.y, position.z);
        let (ll, lr, ul, ur) = match block_side {
            BlockSide::FRONT => (
                Point3::new(i, j, k),
                Point3::new(i, j, k + 1),
                Point3::new(i, j + 1, k),
                Point3::new(i, j + 1, k + 1),
            ),
            BlockSide::BACK => (
                Point3::new(i + 1, j, k + 1),
                Point3::new(i + 1, j, k),
                Point3::new(i + 1, j + 1, k + 1),
                Point3::new(i + 1, j + 1, k),
            ),
            BlockSide::BOTTOM => (
                Point3::new(i, j, k + 1),
                Point3::new(i, j, k),
                Point3::new(i + 1, j, k + 1),
                Point3::new(i + 1, j, k),
            ),
            BlockSide::TOP => (
                Point3::new(i, j + 1, k),
                Point3::new(i, j + 1, k + 1),
                Point3::new(i + 1, j + 1, k),
                Point3::new(i + 1, j + 1, k + 1),
            ),
            BlockSide::LEFT => (
                Point3::new(i + 1, j, k),
                Point3::new(i, j, k),
                Point3::new(i + 1, j + 1, k),
                Point3::new(i, j + 1, k),
            ),
            BlockSide::RIGHT => (
                Point3::new(i, j, k + 1),
                Point3::new(i + 1, j, k + 1),
                Point3::new(i, j + 1, k + 1),
                Point3::new(i + 1, j + 1, k + 1),
            ),
        };

        Face {
            ll,
            lr,
            ul,
            ur,
            block_side,
        }
    }

    /// Appends the two triangles of this face, translated by `origin`.
    pub fn push_vertices(&self, origin: Vector3<i32>, uv: UvRect, out: &mut Vec<Vertex>) {
        let normal = self.block_side.normal();
        let corners = self.corners(origin, uv);
        for index in [0, 1, 2, 0, 2, 3] {
            let (position, tex_coords) = corners[index];
            out.push(Vertex::new(position, normal, tex_coords));
        }
    }

    /// Appends the same quad wound the other way, with the normal flipped.
    pub fn push_reversed_vertices(&self, origin: Vector3<i32>, uv: UvRect, out: &mut Vec<Vertex>) {
        let [nx, ny, nz] = self.block_side.normal();
        let normal = [-nx, -ny, -nz];
        let corners = self.corners(origin, uv);
        for index in [0, 2, 1, 0, 3, 2] {
            let (position, tex_coords) = corners[index];
            out.push(Vertex::new(position, normal, tex_coords));
        }
    }

    /// Corners in `ll, lr, ur, ul` order with their texture coordinates.
    fn corners(&self, origin: Vector3<i32>, uv: UvRect) -> [([f32; 3], [f32; 2]); 4] {
        let world = |corner: Point3<i32>| {
            let p = corner + origin;
            [p.x as f32, p.y as f32, p.z as f32]
        };

        [
            (world(self.ll), [uv.min[0], uv.max[1]]),
            (world(self.lr), [uv.max[0], uv.max[1]]),
            (world(self.ur), [uv.max[0], uv.min[1]]),
            (world(self.ul), [uv.min[0], uv.min[1]]),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cgmath::InnerSpace;

    fn to_vector(p: [f32; 3]) -> Vector3<f32> {
        Vector3::new(p[0], p[1], p[2])
    }

    #[test]
    fn winding_matches_the_outward_normal() {
        let uv = UvRect {
            min: [0.0, 0.0],
            max: [1.0, 1.0],
        };
        for side in BlockSide::all() {
            let mut out = Vec::new();
            Face::new(Point3::new(0, 0, 0), side).push_vertices(Vector3::new(0, 0, 0), uv, &mut out);
            assert_eq!(out.len(), 6);

            for triangle in out.chunks(3) {
                let a = to_vector(triangle[0].position);
                let b = to_vector(triangle[1].position);
                let c = to_vector(triangle[2].position);
                let winding = (b - a).cross(c - a).normalize();
                assert_eq!(winding, to_vector(side.normal()), "{side:?}");
            }
        }
    }
}
