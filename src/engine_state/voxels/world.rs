//! # World Module
//!
//! This module provides the `World` struct which streams chunks around a
//! moving viewer. It is the single owner of every resident chunk, the load
//! queue, the overlay of retained grids and the mesh backend.
//!
//! ## Per-Tick Algorithm
//!
//! 1. Recompute the centre chunk from the viewer position
//! 2. Evict resident chunks outside `centre ± load_radius`, releasing their
//!    meshes and keeping modified grids in the overlay
//! 3. Queue every missing window coordinate in spiral order
//! 4. If anything is queued, load all of it this tick, from the overlay when
//!    possible and from the terrain generator otherwise
//! 5. Otherwise detail one `Loaded` chunk, or failing that mesh one `Detailed`
//!    chunk inside the window shrunk by one
//!
//! Loading is never throttled. Detailing and meshing advance at most one chunk
//! per tick so newly visible terrain is spread over several frames.
//!
//! ## Queries
//!
//! Block queries never fail: positions in chunks that are not resident, or
//! outside `[0, height)` vertically, read as air.

use std::collections::{BTreeMap, BTreeSet, HashMap, VecDeque};

use cgmath::Point3;
use log::{debug, info, trace};

use crate::config::WorldConfig;
use crate::engine_state::camera_state::ViewerPosition;
use crate::engine_state::persistence::WorldSave;
use crate::engine_state::rendering::mesh_backend::MeshBackend;
use crate::engine_state::rendering::meshing::{build_mesh, NeighborQuery};
use crate::error::{ConfigError, EngineError};

use super::block::{block_type::BlockType, Block, BlockTypeSize};
use super::chunk::coordinate::{ChunkCoordinate, ChunkDimensions};
use super::chunk::voxel_grid::VoxelGrid;
use super::chunk::{Chunk, ChunkState};
use super::spiral::SpiralIterator;
use super::structures::{BlockWriter, StructurePlacer};
use super::terrain::TerrainGenerator;

/// The chunk containing a continuous world position.
pub fn current_chunk_coordinate(position: Point3<f32>, dims: ChunkDimensions) -> ChunkCoordinate {
    ChunkCoordinate::from_world(position, dims)
}

/// Integer block position containing a continuous world position.
pub fn block_position(position: Point3<f32>) -> Point3<i32> {
    Point3::new(
        position.x.floor() as i32,
        position.y.floor() as i32,
        position.z.floor() as i32,
    )
}

/// What a single call to [`World::tick`] did.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct TickReport {
    /// Chunks dropped for leaving the window.
    pub evicted: u32,
    /// Chunks created by the terrain generator.
    pub generated: u32,
    /// Chunks rebuilt from the overlay.
    pub restored: u32,
    /// Chunk whose structures were expanded this tick.
    pub detailed: Option<ChunkCoordinate>,
    /// Chunk whose mesh was built this tick.
    pub meshed: Option<ChunkCoordinate>,
}

impl TickReport {
    /// `true` when the tick found nothing left to do.
    pub fn is_idle(&self) -> bool {
        *self == TickReport::default()
    }

    /// Chunks created this tick, generated or restored.
    pub fn loaded(&self) -> u32 {
        self.generated + self.restored
    }
}

/// Resident chunks keyed by coordinate, with world-space block access.
struct ResidentChunks {
    dims: ChunkDimensions,
    chunks: HashMap<ChunkCoordinate, Chunk>,
}

impl ResidentChunks {
    /// Splits a world position into its chunk and chunk-local cell.
    fn locate(&self, position: Point3<i32>) -> Option<(ChunkCoordinate, usize, usize, usize)> {
        let coordinate = ChunkCoordinate::from_block(position, self.dims);
        let origin = coordinate.origin(self.dims);
        let (x, y, z) = self
            .dims
            .local(position.x - origin.x, position.y, position.z - origin.z)?;
        Some((coordinate, x, y, z))
    }

    fn block_at(&self, position: Point3<i32>) -> Block {
        self.locate(position)
            .and_then(|(coordinate, x, y, z)| {
                self.chunks
                    .get(&coordinate)
                    .map(|chunk| chunk.grid.get(x, y, z))
            })
            .unwrap_or(Block::AIR)
    }
}

impl NeighborQuery for ResidentChunks {
    fn block_type_at(&self, position: Point3<i32>) -> BlockTypeSize {
        self.block_at(position).block_type
    }
}

/// Structure writes during detailing. Refuses bedrock and clips at the
/// edge of the resident set, remembering which chunks it touched.
struct SpillWriter<'a> {
    resident: &'a mut ResidentChunks,
    touched: BTreeSet<ChunkCoordinate>,
}

impl BlockWriter for SpillWriter<'_> {
    fn block_at(&self, position: Point3<i32>) -> Block {
        self.resident.block_at(position)
    }

    fn place_block(&mut self, position: Point3<i32>, block: Block) -> bool {
        let Some((coordinate, x, y, z)) = self.resident.locate(position) else {
            return false;
        };
        let Some(chunk) = self.resident.chunks.get_mut(&coordinate) else {
            return false;
        };
        if chunk.grid.get(x, y, z).is(BlockType::BEDROCK) {
            return false;
        }

        chunk.grid.set(x, y, z, block);
        chunk.modified = true;
        self.touched.insert(coordinate);
        true
    }
}

/// Streams, details, meshes and edits the chunks around one viewer.
///
/// # Examples
///
/// ```no_run
/// use cgmath::Point3;
/// use voxel_world::config::WorldConfig;
/// use voxel_world::engine_state::rendering::mesh_backend::HeadlessMeshBackend;
/// use voxel_world::engine_state::voxels::world::World;
///
/// let viewer = Point3::new(8.0, 60.0, 8.0);
/// let mut world = World::new(&WorldConfig::default(), HeadlessMeshBackend::new(), viewer)?;
/// let report = world.tick(&viewer);
/// assert!(report.loaded() > 0);
/// # Ok::<(), voxel_world::error::ConfigError>(())
/// ```
pub struct World<B: MeshBackend> {
    seed: i32,
    load_radius: u32,
    dims: ChunkDimensions,
    centre: ChunkCoordinate,
    resident: ResidentChunks,
    pending_load: VecDeque<ChunkCoordinate>,
    overlay: BTreeMap<ChunkCoordinate, VoxelGrid>,
    generator: TerrainGenerator,
    placer: StructurePlacer,
    backend: B,
}

impl<B: MeshBackend> World<B> {
    /// Creates a fresh world around `viewer`.
    ///
    /// The viewer's own chunk is generated before this returns; the rest of
    /// the window is queued for the first tick.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] if `config` fails validation.
    pub fn new(
        config: &WorldConfig,
        backend: B,
        viewer: Point3<f32>,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::with_overlay(
            config.seed,
            config.load_radius,
            config.chunk,
            BTreeMap::new(),
            backend,
            viewer,
        ))
    }

    /// Recreates a world from a save. The save's seed replaces the configured one.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Config`] if `config` fails validation, and
    /// [`EngineError::Persistence`] if the save was written with other chunk
    /// dimensions or holds a grid of the wrong size.
    pub fn from_save(
        config: &WorldConfig,
        save: WorldSave,
        backend: B,
        viewer: Point3<f32>,
    ) -> Result<Self, EngineError> {
        config.validate()?;
        let seed = save.seed;
        let overlay = save.into_overlay(config.chunk)?;
        info!("Restoring {} saved chunks", overlay.len());
        Ok(Self::with_overlay(
            seed,
            config.load_radius,
            config.chunk,
            overlay,
            backend,
            viewer,
        ))
    }

    fn with_overlay(
        seed: i32,
        load_radius: u32,
        dims: ChunkDimensions,
        overlay: BTreeMap<ChunkCoordinate, VoxelGrid>,
        backend: B,
        viewer: Point3<f32>,
    ) -> Self {
        let centre = current_chunk_coordinate(viewer, dims);
        let mut world = World {
            seed,
            load_radius,
            dims,
            centre,
            resident: ResidentChunks {
                dims,
                chunks: HashMap::new(),
            },
            pending_load: VecDeque::new(),
            overlay,
            generator: TerrainGenerator::new(seed, dims),
            placer: StructurePlacer::new(),
            backend,
        };

        world.load_chunk(centre);
        world.enqueue_window();
        info!(
            "World created with seed {} around chunk ({}, {}), {} chunks queued",
            seed,
            centre.x,
            centre.z,
            world.pending_load.len()
        );
        world
    }

    /// Advances streaming by one simulation tick.
    pub fn tick<V: ViewerPosition>(&mut self, viewer: &V) -> TickReport {
        let mut report = TickReport::default();
        self.centre = current_chunk_coordinate(viewer.viewer_position(), self.dims);

        report.evicted = self.evict_outside_window();
        self.enqueue_window();

        if !self.pending_load.is_empty() {
            while let Some(coordinate) = self.pending_load.pop_front() {
                if self.resident.chunks.contains_key(&coordinate) {
                    continue;
                }
                if self.load_chunk(coordinate) {
                    report.restored += 1;
                } else {
                    report.generated += 1;
                }
            }
            debug!(
                "Loaded {} chunks ({} from overlay)",
                report.loaded(),
                report.restored
            );
        } else if let Some(coordinate) = self.detail_next() {
            report.detailed = Some(coordinate);
        } else if let Some(coordinate) = self.mesh_next() {
            report.meshed = Some(coordinate);
        }

        report
    }

    /// Creates the chunk at `coordinate`.
    ///
    /// # Returns
    /// `true` if it was rebuilt from the overlay, `false` if freshly generated.
    fn load_chunk(&mut self, coordinate: ChunkCoordinate) -> bool {
        let (chunk, restored) = match self.overlay.get(&coordinate) {
            Some(grid) => (Chunk::restored(coordinate, grid.clone()), true),
            None => (
                Chunk::generated(coordinate, self.generator.generate_chunk(coordinate)),
                false,
            ),
        };
        trace!("Loaded chunk ({}, {}) as {:?}", coordinate.x, coordinate.z, chunk.state);
        self.resident.chunks.insert(coordinate, chunk);
        restored
    }

    fn evict_outside_window(&mut self) -> u32 {
        let (centre, radius) = (self.centre, self.load_radius);
        let outside: Vec<ChunkCoordinate> = self
            .resident
            .chunks
            .keys()
            .filter(|coordinate| !coordinate.is_within(&centre, radius))
            .copied()
            .collect();

        for coordinate in &outside {
            if let Some(mut chunk) = self.resident.chunks.remove(coordinate) {
                if let Some(handle) = chunk.take_mesh() {
                    self.backend.release_mesh(handle);
                }
                if chunk.modified {
                    self.overlay.insert(*coordinate, chunk.grid);
                }
            }
        }

        self.pending_load
            .retain(|coordinate| coordinate.is_within(&centre, radius));

        if !outside.is_empty() {
            debug!("Evicted {} chunks", outside.len());
        }
        outside.len() as u32
    }

    fn enqueue_window(&mut self) {
        for coordinate in SpiralIterator::new(self.centre, self.load_radius) {
            if !self.resident.chunks.contains_key(&coordinate)
                && !self.pending_load.contains(&coordinate)
            {
                self.pending_load.push_back(coordinate);
            }
        }
    }

    /// Nearest resident chunk in the given window with the given state.
    fn nearest_in_state(&self, radius: u32, state: ChunkState) -> Option<ChunkCoordinate> {
        SpiralIterator::new(self.centre, radius).find(|coordinate| {
            self.resident
                .chunks
                .get(coordinate)
                .is_some_and(|chunk| chunk.state == state)
        })
    }

    fn detail_next(&mut self) -> Option<ChunkCoordinate> {
        let coordinate = self.nearest_in_state(self.load_radius, ChunkState::Loaded)?;
        self.detail_chunk(coordinate);
        Some(coordinate)
    }

    /// Meshing stays one ring inside the window so every mesh reads detailed neighbours.
    fn mesh_next(&mut self) -> Option<ChunkCoordinate> {
        let radius = self.load_radius.saturating_sub(1);
        let coordinate = self.nearest_in_state(radius, ChunkState::Detailed)?;
        self.remesh(coordinate);
        Some(coordinate)
    }

    /// Expands the structure markers of one chunk and moves it to `Detailed`.
    fn detail_chunk(&mut self, coordinate: ChunkCoordinate) {
        let markers = match self.resident.chunks.get(&coordinate) {
            Some(chunk) => StructurePlacer::find_markers(&chunk.grid, coordinate),
            None => return,
        };

        let mut writer = SpillWriter {
            resident: &mut self.resident,
            touched: BTreeSet::new(),
        };
        let stamped = self.placer.expand(&markers, &mut writer);
        let touched = writer.touched;

        if let Some(chunk) = self.resident.chunks.get_mut(&coordinate) {
            chunk.state = ChunkState::Detailed;
        }
        debug!(
            "Detailed chunk ({}, {}): {} structures",
            coordinate.x, coordinate.z, stamped
        );

        for neighbor in touched {
            if neighbor != coordinate && self.state_of(neighbor) == Some(ChunkState::Meshed) {
                self.remesh(neighbor);
            }
        }
    }

    /// Rebuilds and re-uploads the mesh of a resident chunk.
    ///
    /// The previous mesh is released before the new one is uploaded.
    fn remesh(&mut self, coordinate: ChunkCoordinate) {
        let vertices = match self.resident.chunks.get(&coordinate) {
            Some(chunk) => build_mesh(&chunk.grid, coordinate, &self.resident),
            None => return,
        };

        let Some(chunk) = self.resident.chunks.get_mut(&coordinate) else {
            return;
        };
        if let Some(previous) = chunk.take_mesh() {
            self.backend.release_mesh(previous);
        }
        let handle = self.backend.upload_mesh(&vertices);
        chunk.replace_mesh(handle);
        trace!(
            "Meshed chunk ({}, {}) with {} vertices",
            coordinate.x,
            coordinate.z,
            vertices.len()
        );
    }

    /// Replaces the block at `position`, clearing its variant.
    ///
    /// Bedrock is never overwritten. Targets outside the resident set or the
    /// world height are ignored.
    ///
    /// # Returns
    /// `true` if the block was written.
    pub fn set_block_at(&mut self, position: Point3<i32>, block_type: BlockTypeSize) -> bool {
        let Some((coordinate, x, y, z)) = self.resident.locate(position) else {
            return false;
        };
        let Some(chunk) = self.resident.chunks.get_mut(&coordinate) else {
            return false;
        };
        if chunk.grid.get(x, y, z).is(BlockType::BEDROCK) {
            return false;
        }

        chunk.grid.set(
            x,
            y,
            z,
            Block {
                block_type,
                variant: 0,
            },
        );
        chunk.modified = true;
        self.overlay.insert(coordinate, chunk.grid.clone());

        let mut affected = vec![coordinate];
        if x == 0 {
            affected.push(coordinate.offset(-1, 0));
        }
        if x + 1 == self.dims.width {
            affected.push(coordinate.offset(1, 0));
        }
        if z == 0 {
            affected.push(coordinate.offset(0, -1));
        }
        if z + 1 == self.dims.depth {
            affected.push(coordinate.offset(0, 1));
        }

        for target in affected {
            if self.state_of(target) == Some(ChunkState::Meshed) {
                self.remesh(target);
            }
        }

        true
    }

    /// Block id at a world position.
    pub fn get_block_at(&self, position: Point3<i32>) -> BlockTypeSize {
        self.resident.block_at(position).block_type
    }

    /// `true` for any block except air and water. Unknown ids count as solid.
    pub fn is_solid_at(&self, position: Point3<i32>) -> bool {
        BlockType::from_id(self.get_block_at(position)).map_or(true, BlockType::is_solid)
    }

    /// `true` for any non-air block, water included.
    pub fn is_opaque_or_present_at(&self, position: Point3<i32>) -> bool {
        !self.resident.block_at(position).is_air()
    }

    /// `true` if the block at `position` is water.
    pub fn is_submerged_at(&self, position: Point3<i32>) -> bool {
        self.resident.block_at(position).is_water()
    }

    /// Snapshot of every retained grid: the overlay plus modified resident chunks.
    pub fn world_save(&self) -> WorldSave {
        let mut grids = self.overlay.clone();
        for (coordinate, chunk) in &self.resident.chunks {
            if chunk.modified {
                grids.insert(*coordinate, chunk.grid.clone());
            }
        }
        WorldSave::from_grids(self.seed, self.dims, &grids)
    }

    /// Lifecycle state of a resident chunk, `None` if it is not resident.
    pub fn state_of(&self, coordinate: ChunkCoordinate) -> Option<ChunkState> {
        self.resident.chunks.get(&coordinate).map(|chunk| chunk.state)
    }

    /// The resident chunk at `coordinate`, if any.
    pub fn chunk(&self, coordinate: ChunkCoordinate) -> Option<&Chunk> {
        self.resident.chunks.get(&coordinate)
    }

    pub fn resident_coordinates(&self) -> impl Iterator<Item = ChunkCoordinate> + '_ {
        self.resident.chunks.keys().copied()
    }

    pub fn resident_count(&self) -> usize {
        self.resident.chunks.len()
    }

    pub fn pending_count(&self) -> usize {
        self.pending_load.len()
    }

    pub fn is_overlaid(&self, coordinate: ChunkCoordinate) -> bool {
        self.overlay.contains_key(&coordinate)
    }

    /// Number of grids held for chunks that differ from generation.
    pub fn overlay_len(&self) -> usize {
        self.overlay.len()
    }

    pub fn centre(&self) -> ChunkCoordinate {
        self.centre
    }

    pub fn seed(&self) -> i32 {
        self.seed
    }

    pub fn load_radius(&self) -> u32 {
        self.load_radius
    }

    pub fn dimensions(&self) -> ChunkDimensions {
        self.dims
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }
}

impl<B: MeshBackend> Drop for World<B> {
    fn drop(&mut self) {
        for chunk in self.resident.chunks.values_mut() {
            if let Some(handle) = chunk.take_mesh() {
                self.backend.release_mesh(handle);
            }
        }
    }
}
