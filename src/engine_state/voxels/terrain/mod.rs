//! # Terrain Generation
//!
//! Turns a chunk coordinate into a fully populated voxel grid.
//!
//! ## Architecture
//!
//! Generation runs column by column. For each world column:
//!
//! 1. [`BiomeClassifier`] picks the biome
//! 2. a biome-specific height function of the terrain noise gives the surface
//! 3. the column below the surface is filled with the biome's cap over stone
//! 4. low columns are flooded up to [`WATER_LEVEL`], high ones may get a structure marker
//! 5. bedrock is stamped at [`BEDROCK_LEVEL`]
//!
//! ## Determinism
//!
//! Every random roll comes from one `fastrand::Rng` per chunk, seeded by
//! [`chunk_seed`] from the chunk coordinate and the world seed. Columns are
//! visited in a fixed order, so the same `(seed, coordinate, dimensions)` always
//! produces a byte-identical grid.

use fastrand::Rng;

use super::block::{block_type::BlockType, Block};
use super::chunk::coordinate::{ChunkCoordinate, ChunkDimensions};
use super::chunk::voxel_grid::VoxelGrid;
use super::structures::StructureKind;
use biome::{Biome, BiomeClassifier};
use noise_field::NoiseField;

pub mod biome;
pub mod noise_field;

/// Columns whose surface is at or below this height are flooded up to it.
pub const WATER_LEVEL: usize = 11;
/// Height of the unbreakable floor layer.
pub const BEDROCK_LEVEL: usize = 1;
/// Mountain cells at or above this height are packed snow.
pub const SNOW_LINE: usize = 50;

/// One in this many stone cells becomes an ore, times four ore kinds.
const ORE_ROLL: u32 = 50;
const GRASS_VARIANT_ROLL: u32 = 30;
const DESERT_WATER_VARIANT_ROLL: u32 = 20;
const WATER_VARIANT_ROLL: u32 = 30;
const TREE_ROLL: u32 = 100;
const HOUSE_ROLL: u32 = 25_000;

/// Seed of the per-chunk random stream.
///
/// Both chunk axes are folded onto the naturals (`n >= 0 → 2n`, `n < 0 → -2n - 1`),
/// combined with the Cantor pairing function and multiplied by the world seed.
/// The arithmetic wraps, so every coordinate maps to some seed.
pub fn chunk_seed(coordinate: ChunkCoordinate, world_seed: i32) -> u64 {
    fn fold(n: i32) -> i128 {
        let n = n as i128;
        if n >= 0 {
            2 * n
        } else {
            -2 * n - 1
        }
    }

    let a = fold(coordinate.x);
    let b = fold(coordinate.z);
    let paired = (a + b) * (a + b + 1) / 2 + a;
    paired.wrapping_mul(world_seed as i128) as u64
}

/// Rolls `0..range` and keeps hits on `1..=4` as a variant.
fn roll_variant(rng: &mut Rng, range: u32) -> u8 {
    match rng.u32(0..range) {
        roll @ 1..=4 => roll as u8,
        _ => 0,
    }
}

fn stone(rng: &mut Rng) -> Block {
    Block::with_variant(BlockType::STONE, roll_variant(rng, ORE_ROLL))
}

/// Generates chunk grids for one world.
#[derive(Clone)]
pub struct TerrainGenerator {
    seed: i32,
    dims: ChunkDimensions,
    biomes: BiomeClassifier,
    terrain: NoiseField,
}

impl TerrainGenerator {
    /// Creates a generator for the given world seed and chunk dimensions.
    ///
    /// The terrain height field is seeded with five times the world seed.
    pub fn new(seed: i32, dims: ChunkDimensions) -> Self {
        Self {
            seed,
            dims,
            biomes: BiomeClassifier::new(seed),
            terrain: NoiseField::new(seed.wrapping_mul(5)),
        }
    }

    pub fn biome_at(&self, world_x: i32, world_z: i32) -> Biome {
        self.biomes.classify(world_x, world_z)
    }

    /// Surface height of a column: the first free cell above the terrain.
    ///
    /// Every biome multiplies a low-frequency base term with the same roughness
    /// term `(P(100) + 1) * 2`, where `P(s)` samples the terrain field at scale `s`.
    /// The result is truncated and clamped to `[0, height - 1]`.
    pub fn surface_height(&self, world_x: i32, world_z: i32, biome: Biome) -> usize {
        let (x, z) = (world_x as f64, world_z as f64);
        let sample = |scale: f64| self.terrain.sample(x, z, scale);
        let roughness = (sample(100.0) + 1.0) * 2.0;

        let height = match biome {
            Biome::Desert => 15.0 + roughness * roughness,
            Biome::Plains => 11.0 + (sample(85.0).abs() * 5.0) * roughness,
            Biome::SnowHills => ((sample(50.0) + 1.0) * 6.0) * roughness,
            Biome::Mountains => 10.0 + ((sample(50.0) + 1.0) * 11.0) * roughness,
        };

        let top = self.dims.height.saturating_sub(1) as i64;
        (height as i64).clamp(0, top) as usize
    }

    /// Produces one full column, bottom to top.
    ///
    /// # Arguments
    /// * `world_x`, `world_z` - World-space column position
    /// * `biome` - Biome of the column
    /// * `rng` - The chunk's random stream
    ///
    /// # Returns
    /// `height` cells, index 0 being y = 0
    pub fn generate_column(
        &self,
        world_x: i32,
        world_z: i32,
        biome: Biome,
        rng: &mut Rng,
    ) -> Vec<Block> {
        let height = self.dims.height;
        let surface = self.surface_height(world_x, world_z, biome);
        let mut column = vec![Block::AIR; height];

        for (y, cell) in column.iter_mut().enumerate().take(surface) {
            *cell = Self::fill(biome, y, surface, rng);
        }

        if surface <= WATER_LEVEL {
            let variant_roll = match biome {
                Biome::Desert => DESERT_WATER_VARIANT_ROLL,
                _ => WATER_VARIANT_ROLL,
            };
            let top = WATER_LEVEL.min(height.saturating_sub(1));
            for y in (surface..=top).rev() {
                column[y] = Block::with_variant(BlockType::WATER, roll_variant(rng, variant_roll));
            }
        } else if let Some(kind) = Self::roll_structure(biome, rng) {
            column[0] = Block::with_variant(BlockType::STRUCTURE_MARKER, kind as u8);
            column[surface] = Block::new(BlockType::STRUCTURE_MARKER);
        }

        if let Some(cell) = column.get_mut(BEDROCK_LEVEL) {
            cell.block_type = BlockType::BEDROCK.id();
        }

        column
    }

    /// Material of the cell `y` in a column whose surface is `surface`.
    fn fill(biome: Biome, y: usize, surface: usize, rng: &mut Rng) -> Block {
        let is_top = y + 1 == surface;
        let in_subsoil = y + 3 >= surface;

        match biome {
            Biome::Desert if is_top => Block::new(BlockType::SAND),
            Biome::Plains if is_top => {
                Block::with_variant(BlockType::GRASS, roll_variant(rng, GRASS_VARIANT_ROLL))
            }
            Biome::SnowHills if is_top => Block::new(BlockType::SNOW),
            Biome::Plains | Biome::SnowHills if in_subsoil => Block::new(BlockType::DIRT),
            Biome::Mountains if y >= SNOW_LINE => Block::new(BlockType::PACKED_SNOW),
            _ => stone(rng),
        }
    }

    fn roll_structure(biome: Biome, rng: &mut Rng) -> Option<StructureKind> {
        match biome {
            Biome::Desert => (rng.u32(0..TREE_ROLL) == 0).then_some(StructureKind::Cactus),
            Biome::Plains => {
                if rng.u32(0..TREE_ROLL) == 0 {
                    Some(StructureKind::Tree)
                } else if rng.u32(0..HOUSE_ROLL) == 0 {
                    Some(StructureKind::House)
                } else {
                    None
                }
            }
            Biome::SnowHills | Biome::Mountains => None,
        }
    }

    /// Generates the full grid of one chunk.
    pub fn generate_chunk(&self, coordinate: ChunkCoordinate) -> VoxelGrid {
        let mut rng = Rng::with_seed(chunk_seed(coordinate, self.seed));
        let mut grid = VoxelGrid::new(self.dims);
        let origin = coordinate.origin(self.dims);

        for x in 0..self.dims.width {
            for z in 0..self.dims.depth {
                let world_x = origin.x + x as i32;
                let world_z = origin.z + z as i32;
                let biome = self.biome_at(world_x, world_z);
                let column = self.generate_column(world_x, world_z, biome, &mut rng);
                grid.write_column(x, z, &column);
            }
        }

        grid
    }
}
