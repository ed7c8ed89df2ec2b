//! # Biome Classification
//!
//! Two independent noise fields, a temperature-like one and a humidity-like
//! one, are sampled at `(x / 200, z / 200)` and shifted into `[0, 2]`. A fixed
//! decision tree turns the pair into one of four biomes:
//!
//! ```text
//!               temperature <= 1.4 ?
//!              /                    \
//!    humidity <= 1.3 ?        humidity <= 1.5 ?
//!     /          \             /           \
//!  Plains      Desert      SnowHills     Mountains
//! ```
//!
//! Boundaries are hard: there is no blending between neighbouring biomes.

use super::noise_field::NoiseField;

/// Horizontal scale of both classification fields.
pub const BIOME_SCALE: f64 = 200.0;
pub const TEMPERATURE_SPLIT: f64 = 1.4;
pub const WARM_HUMIDITY_SPLIT: f64 = 1.3;
pub const COLD_HUMIDITY_SPLIT: f64 = 1.5;

/// Terrain profile selected for a world column.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Biome {
    Desert,
    Plains,
    SnowHills,
    Mountains,
}

impl Biome {
    /// All biomes, in code order.
    pub fn all() -> [Biome; 4] {
        [Biome::Desert, Biome::Plains, Biome::SnowHills, Biome::Mountains]
    }
}

/// Maps world columns to biomes.
#[derive(Clone)]
pub struct BiomeClassifier {
    temperature: NoiseField,
    humidity: NoiseField,
}

impl BiomeClassifier {
    /// Builds the classifier for a world seed.
    ///
    /// The temperature field uses the seed itself and the humidity field uses
    /// three times the seed, so the two are independent.
    pub fn new(seed: i32) -> Self {
        Self {
            temperature: NoiseField::new(seed),
            humidity: NoiseField::new(seed.wrapping_mul(3)),
        }
    }

    /// Both classification samples for a column, shifted into `[0, 2]`.
    pub fn climate(&self, world_x: i32, world_z: i32) -> (f64, f64) {
        let (x, z) = (world_x as f64, world_z as f64);
        (
            self.temperature.sample(x, z, BIOME_SCALE) + 1.0,
            self.humidity.sample(x, z, BIOME_SCALE) + 1.0,
        )
    }

    pub fn classify(&self, world_x: i32, world_z: i32) -> Biome {
        let (temperature, humidity) = self.climate(world_x, world_z);
        Self::decide(temperature, humidity)
    }

    /// The decision tree on its own, for already-sampled climate values.
    pub fn decide(temperature: f64, humidity: f64) -> Biome {
        if temperature <= TEMPERATURE_SPLIT {
            if humidity <= WARM_HUMIDITY_SPLIT {
                Biome::Plains
            } else {
                Biome::Desert
            }
        } else if humidity <= COLD_HUMIDITY_SPLIT {
            Biome::SnowHills
        } else {
            Biome::Mountains
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decision_tree_thresholds_are_inclusive() {
        assert_eq!(BiomeClassifier::decide(1.4, 1.3), Biome::Plains);
        assert_eq!(BiomeClassifier::decide(1.4, 1.31), Biome::Desert);
        assert_eq!(BiomeClassifier::decide(1.41, 1.5), Biome::SnowHills);
        assert_eq!(BiomeClassifier::decide(1.41, 1.51), Biome::Mountains);
        assert_eq!(BiomeClassifier::decide(0.0, 2.0), Biome::Desert);
    }

    #[test]
    fn classification_is_stable_across_calls_and_instances() {
        let first = BiomeClassifier::new(2024);
        let second = BiomeClassifier::new(2024);
        for step in -50..50 {
            let (x, z) = (step * 37, step * -53);
            let biome = first.classify(x, z);
            assert_eq!(biome, first.classify(x, z));
            assert_eq!(biome, second.classify(x, z));
        }
    }
}
