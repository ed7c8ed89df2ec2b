//! # Mesh Backends
//!
//! The world hands finished chunk meshes to a [`MeshBackend`] and gets an
//! opaque [`MeshHandle`] back. Handles are released explicitly: on eviction and
//! before a chunk's replacement mesh is uploaded.
//!
//! Two backends are provided:
//! * [`HeadlessMeshBackend`] - keeps vertex counts only, used by the demo binary and tests
//! * [`WgpuMeshBackend`] - one GPU vertex buffer per chunk mesh

use std::collections::HashMap;

use log::{trace, warn};
use wgpu::{util::DeviceExt, Buffer, Device};

use super::vertex::Vertex;

/// Opaque reference to a mesh owned by a backend.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MeshHandle(pub u64);

/// Rendering collaborator that owns uploaded chunk geometry.
pub trait MeshBackend {
    /// Takes ownership of a copy of `vertices` and returns its handle.
    fn upload_mesh(&mut self, vertices: &[Vertex]) -> MeshHandle;

    /// Frees the resources behind `handle`. Unknown handles are ignored.
    fn release_mesh(&mut self, handle: MeshHandle);
}

/// Bookkeeping-only backend.
#[derive(Debug, Default)]
pub struct HeadlessMeshBackend {
    next_handle: u64,
    live: HashMap<MeshHandle, usize>,
    uploads: u64,
    releases: u64,
}

impl HeadlessMeshBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of meshes uploaded and not yet released.
    pub fn live_meshes(&self) -> usize {
        self.live.len()
    }

    pub fn vertex_count(&self, handle: MeshHandle) -> Option<usize> {
        self.live.get(&handle).copied()
    }

    /// Sum of vertices over all live meshes.
    pub fn live_vertices(&self) -> usize {
        self.live.values().sum()
    }

    pub fn total_uploads(&self) -> u64 {
        self.uploads
    }

    pub fn total_releases(&self) -> u64 {
        self.releases
    }
}

impl MeshBackend for HeadlessMeshBackend {
    fn upload_mesh(&mut self, vertices: &[Vertex]) -> MeshHandle {
        let handle = MeshHandle(self.next_handle);
        self.next_handle += 1;
        self.uploads += 1;
        self.live.insert(handle, vertices.len());
        handle
    }

    fn release_mesh(&mut self, handle: MeshHandle) {
        if self.live.remove(&handle).is_some() {
            self.releases += 1;
        } else {
            warn!("Release of unknown mesh handle {:?}", handle);
        }
    }
}

/// Vertex buffer of one uploaded chunk mesh.
pub struct ChunkBuffer {
    pub buffer: Buffer,
    pub vertex_count: u32,
}

/// Backend that creates one vertex buffer per chunk mesh.
///
/// Meant for embedding the world in a renderer that owns a `wgpu` device:
/// the host passes its device in, lets the world upload and release meshes,
/// and looks buffers up by handle when recording draw calls. The headless
/// demo binary does not open a device and never constructs one.
///
/// Buffers are destroyed as soon as their handle is released.
pub struct WgpuMeshBackend {
    device: Device,
    buffers: HashMap<MeshHandle, ChunkBuffer>,
    next_handle: u64,
}

impl WgpuMeshBackend {
    /// Creates a backend on an already initialized device.
    ///
    /// # Arguments
    ///
    /// * `device` - The GPU device buffers are allocated on
    pub fn new(device: Device) -> Self {
        Self {
            device,
            buffers: HashMap::new(),
            next_handle: 0,
        }
    }

    /// The buffer behind a handle, for issuing draw calls.
    pub fn chunk_buffer(&self, handle: MeshHandle) -> Option<&ChunkBuffer> {
        self.buffers.get(&handle)
    }
}

impl MeshBackend for WgpuMeshBackend {
    fn upload_mesh(&mut self, vertices: &[Vertex]) -> MeshHandle {
        let handle = MeshHandle(self.next_handle);
        self.next_handle += 1;

        let buffer = self
            .device
            .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("Chunk Vertex Buffer"),
                contents: bytemuck::cast_slice(vertices),
                usage: wgpu::BufferUsages::VERTEX,
            });
        trace!("Uploaded {} vertices as {:?}", vertices.len(), handle);

        self.buffers.insert(
            handle,
            ChunkBuffer {
                buffer,
                vertex_count: vertices.len() as u32,
            },
        );
        handle
    }

    fn release_mesh(&mut self, handle: MeshHandle) {
        match self.buffers.remove(&handle) {
            Some(chunk_buffer) => chunk_buffer.buffer.destroy(),
            None => warn!("Release of unknown mesh handle {:?}", handle),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn headless_backend_tracks_live_meshes() {
        let mut backend = HeadlessMeshBackend::new();
        let vertex = Vertex::new([0.0; 3], [0.0, 1.0, 0.0], [0.0; 2]);

        let first = backend.upload_mesh(&[vertex; 6]);
        let second = backend.upload_mesh(&[vertex; 12]);
        assert_ne!(first, second);
        assert_eq!(backend.live_vertices(), 18);

        backend.release_mesh(first);
        backend.release_mesh(first);
        assert_eq!(backend.live_meshes(), 1);
        assert_eq!(backend.vertex_count(second), Some(12));
        assert_eq!(backend.total_uploads(), 2);
        assert_eq!(backend.total_releases(), 1);
    }
}
