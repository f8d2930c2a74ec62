#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Map importers that populate the Hexfield tile store.
//!
//! The core is agnostic to where tiles come from; anything implementing
//! [`TileImporter`] may build a [`HexMap`]. Two importers are provided: a
//! uniform board for tests and demos, and a seeded procedural generator
//! whose output is reproducible for a fixed seed.

use hexfield_core::{AxialCoord, TerrainId, Tile};
use hexfield_world::HexMap;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Capability trait for components that can produce a populated map.
pub trait TileImporter {
    /// Builds and returns a fully populated map.
    fn load(&self) -> HexMap;
}

/// Importer that fills a hex-shaped board with one uniform terrain.
///
/// The board contains every cell within `radius` hex steps of the origin,
/// `3r^2 + 3r + 1` tiles in total. Note this is a hexagonal region, not a
/// square one: a corner such as `(radius, radius)` lies `2 * radius` steps
/// out and is not part of the board.
#[derive(Clone, Debug)]
pub struct UniformImporter {
    radius: u32,
    terrain: TerrainId,
}

impl UniformImporter {
    /// Creates an importer covering all cells within `radius` of the origin.
    #[must_use]
    pub fn new(radius: u32, terrain: TerrainId) -> Self {
        Self { radius, terrain }
    }

    /// Radius of the generated board in hex steps.
    #[must_use]
    pub const fn radius(&self) -> u32 {
        self.radius
    }
}

impl TileImporter for UniformImporter {
    fn load(&self) -> HexMap {
        let mut map = HexMap::new();
        for coord in AxialCoord::new(0, 0).range(self.radius) {
            map.insert(coord, Tile::new(self.terrain.clone(), 0, true, 1));
        }
        map
    }
}

/// Importer that carves terrain bands out of seeded elevation noise.
///
/// Elevations are drawn from a [`ChaCha8Rng`] keyed by the seed and each
/// cell's coordinates, so regenerating with the same seed always yields an
/// identical map. Cells below sea level become impassable water; higher
/// bands cost progressively more to traverse.
#[derive(Clone, Copy, Debug)]
pub struct NoiseImporter {
    radius: u32,
    seed: u64,
}

impl NoiseImporter {
    /// Elevation below which a cell floods and becomes impassable.
    const SEA_LEVEL: i32 = 0;
    /// Elevation at which grass gives way to hills.
    const HILL_LEVEL: i32 = 4;
    /// Elevation at which hills give way to mountains.
    const MOUNTAIN_LEVEL: i32 = 7;

    /// Creates an importer covering all cells within `radius` of the origin.
    #[must_use]
    pub const fn new(radius: u32, seed: u64) -> Self {
        Self { radius, seed }
    }

    /// Seed driving the procedural generation.
    #[must_use]
    pub const fn seed(&self) -> u64 {
        self.seed
    }

    fn tile_at(&self, coord: AxialCoord) -> Tile {
        // Key the stream by cell so tile generation is order-independent.
        let cell_key = (coord.q() as u64) << 32 ^ (coord.r() as u64 & 0xffff_ffff);
        let mut rng = ChaCha8Rng::seed_from_u64(self.seed ^ cell_key);
        let elevation = rng.gen_range(-3..=9);

        if elevation < Self::SEA_LEVEL {
            Tile::new(TerrainId::new("water"), elevation, false, 1)
        } else if elevation < Self::HILL_LEVEL {
            Tile::new(TerrainId::new("grass"), elevation, true, 1)
        } else if elevation < Self::MOUNTAIN_LEVEL {
            Tile::new(TerrainId::new("hills"), elevation, true, 2)
        } else {
            Tile::new(TerrainId::new("mountain"), elevation, true, 4)
        }
    }
}

impl TileImporter for NoiseImporter {
    fn load(&self) -> HexMap {
        let mut map = HexMap::new();
        for coord in AxialCoord::new(0, 0).range(self.radius) {
            map.insert(coord, self.tile_at(coord));
        }
        map
    }
}
