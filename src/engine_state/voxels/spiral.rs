//! Square spiral ordering of the streaming window.
//!
//! Coordinates are produced ring by ring around a centre, so chunks nearest
//! the viewer come first. Ring `r` holds exactly `8r` cells, which makes a full
//! walk of radius `R` visit `(2R + 1)²` coordinates, each once.

use super::chunk::coordinate::ChunkCoordinate;

/// Iterator over a `(2R + 1) × (2R + 1)` window in spiral order.
#[derive(Clone, Debug)]
pub struct SpiralIterator {
    centre: ChunkCoordinate,
    radius: i32,
    ring: i32,
    step: i32,
}

impl SpiralIterator {
    pub fn new(centre: ChunkCoordinate, radius: u32) -> Self {
        Self {
            centre,
            radius: radius as i32,
            ring: 0,
            step: 0,
        }
    }
}

impl Iterator for SpiralIterator {
    type Item = ChunkCoordinate;

    fn next(&mut self) -> Option<Self::Item> {
        if self.ring > self.radius {
            return None;
        }

        if self.ring == 0 {
            self.ring = 1;
            return Some(self.centre);
        }

        let r = self.ring;
        let side = 2 * r;
        let (leg, along) = (self.step / side, self.step % side);

        // Walk the ring from its (-r, -r) corner: +x, +z, -x, -z.
        let (dx, dz) = match leg {
            0 => (-r + along, -r),
            1 => (r, -r + along),
            2 => (r - along, r),
            _ => (-r, r - along),
        };

        self.step += 1;
        if self.step == 4 * side {
            self.step = 0;
            self.ring += 1;
        }

        Some(self.centre.offset(dx, dz))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn covers_every_window_cell_exactly_once() {
        let centre = ChunkCoordinate::new(4, -7);
        for radius in 0..=3u32 {
            let visited: Vec<_> = SpiralIterator::new(centre, radius).collect();
            let unique: HashSet<_> = visited.iter().copied().collect();
            let side = 2 * radius as usize + 1;

            assert_eq!(visited.len(), side * side);
            assert_eq!(unique.len(), visited.len());
            assert!(visited.iter().all(|c| c.is_within(&centre, radius)));
        }
    }

    #[test]
    fn starts_at_the_centre_and_moves_outward() {
        let centre = ChunkCoordinate::new(0, 0);
        let visited: Vec<_> = SpiralIterator::new(centre, 3).collect();
        assert_eq!(visited[0], centre);

        let distances: Vec<_> = visited.iter().map(|c| c.chebyshev_distance(&centre)).collect();
        assert!(distances.windows(2).all(|pair| pair[0] <= pair[1]));
    }
}
