//! # Camera State Management
//!
//! This module tracks the viewer the world streams around.
//!
//! ## Core Components
//! - `ViewerPosition`: The only thing the world asks of a viewer
//! - `CameraState`: A viewer position with queued movement and chunk tracking
//! - `CameraUpdates`: Returned when an update moved the viewer into a new chunk

use cgmath::{Point3, Vector3, Zero};

use super::voxels::{
    block::block_side::BlockSide,
    chunk::coordinate::{ChunkCoordinate, ChunkDimensions},
};

/// Source of the continuous position the world streams around.
pub trait ViewerPosition {
    fn viewer_position(&self) -> Point3<f32>;
}

impl ViewerPosition for Point3<f32> {
    fn viewer_position(&self) -> Point3<f32> {
        *self
    }
}

/// Viewer position and the movement queued for the next update.
///
/// # Fields
/// - `position`: The current viewer position in world space
/// - `pending_movement`: Displacement applied on the next `update`
/// - `chunk`: The chunk containing `position` as of the last update
pub struct CameraState {
    pub position: Point3<f32>,
    pending_movement: Vector3<f32>,
    chunk: ChunkCoordinate,
    dims: ChunkDimensions,
}

impl CameraState {
    /// Creates a camera at `position`.
    ///
    /// # Arguments
    /// * `position` - Starting viewer position
    /// * `dims` - Chunk size of the world, used to track the current chunk
    pub fn new(position: Point3<f32>, dims: ChunkDimensions) -> Self {
        Self {
            position,
            pending_movement: Vector3::zero(),
            chunk: ChunkCoordinate::from_world(position, dims),
            dims,
        }
    }

    /// Queues a displacement for the next update.
    pub fn move_by(&mut self, movement: Vector3<f32>) {
        self.pending_movement += movement;
    }

    /// Queues one step along a block face direction.
    pub fn step_towards(&mut self, side: BlockSide, distance: f32) {
        let [x, y, z] = side.normal();
        self.move_by(Vector3::new(x, y, z) * distance);
    }

    pub fn has_updates(&self) -> bool {
        !self.pending_movement.is_zero()
    }

    pub fn current_chunk(&self) -> ChunkCoordinate {
        self.chunk
    }

    /// Applies queued movement.
    ///
    /// # Returns
    /// - `Some(CameraUpdates)` if the viewer entered a different chunk
    /// - `None` otherwise
    pub fn update(&mut self) -> Option<CameraUpdates> {
        if !self.has_updates() {
            return None;
        }

        self.position += self.pending_movement;
        self.pending_movement = Vector3::zero();

        let new_chunk_position = ChunkCoordinate::from_world(self.position, self.dims);
        if new_chunk_position == self.chunk {
            return None;
        }

        let previous_chunk_position = self.chunk;
        self.chunk = new_chunk_position;
        Some(CameraUpdates {
            previous_chunk_position,
            new_chunk_position,
        })
    }
}

impl ViewerPosition for CameraState {
    fn viewer_position(&self) -> Point3<f32> {
        self.position
    }
}

/// Represents a chunk crossing produced by `CameraState::update()`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CameraUpdates {
    pub previous_chunk_position: ChunkCoordinate,
    /// The chunk now containing the viewer
    pub new_chunk_position: ChunkCoordinate,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn updates_report_chunk_crossings_only() {
        let dims = ChunkDimensions::new(16, 100, 16);
        let mut camera = CameraState::new(Point3::new(1.0, 50.0, 1.0), dims);
        assert!(camera.update().is_none());

        camera.move_by(Vector3::new(4.0, 0.0, 0.0));
        assert!(camera.update().is_none());
        assert_eq!(camera.position, Point3::new(5.0, 50.0, 1.0));

        camera.step_towards(BlockSide::FRONT, 6.0);
        let updates = camera.update();
        assert_eq!(
            updates,
            Some(CameraUpdates {
                previous_chunk_position: ChunkCoordinate::new(0, 0),
                new_chunk_position: ChunkCoordinate::new(-1, 0),
            })
        );
        assert_eq!(camera.current_chunk(), ChunkCoordinate::new(-1, 0));
        assert!(!camera.has_updates());
    }
}
