//! # Voxel World
//!
//! This module contains everything that represents and changes the voxel
//! world itself, independent of how it is drawn.
//!
//! ## Architecture
//!
//! * **Block**: Block ids, variants and the six face directions
//! * **Chunk**: Full-height columns of voxels and their lifecycle state
//! * **Terrain**: Biome classification and column generation from noise
//! * **Structures**: Expansion of structure markers into cacti, trees and houses
//! * **Spiral**: Nearest-first ordering of chunk coordinates
//! * **World**: Streaming, detailing, meshing and editing around one viewer
//!
//! ## Data Flow
//!
//! 1. The world learns the viewer position each tick
//! 2. Missing chunks in the window are generated or restored from the overlay
//! 3. Loaded chunks have their structure markers expanded, spilling into neighbours
//! 4. Detailed chunks are meshed and handed to the mesh backend
//! 5. Edits write through to the overlay and remesh the affected chunks

pub mod block;
pub mod chunk;
pub mod spiral;
pub mod structures;
pub mod terrain;
pub mod world;
