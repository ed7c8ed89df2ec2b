//! Rendering side of the voxel engine.
//!
//! This module turns chunk grids into vertex lists and hands them to a mesh
//! backend. It knows nothing about streaming; the world decides when a chunk
//! is meshed and when its mesh is released.

pub mod mesh_backend;
pub mod meshing;
pub mod texture_atlas;
pub mod vertex;

// Re-export commonly used types
pub use mesh_backend::{HeadlessMeshBackend, MeshBackend, MeshHandle, WgpuMeshBackend};
pub use vertex::Vertex;
