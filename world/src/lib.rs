#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative map state for the Hexfield toolkit.
//!
//! This crate owns the sparse [`HexMap`] tile store and the grid projector
//! that translates between lattice cells and world-space positions. Systems
//! read the store through the [`query`] module and never mutate tiles;
//! importers populate the store once before any query runs.

mod projection;

use std::collections::HashMap;

use hexfield_core::{AxialCoord, Tile};

pub use projection::{FlatTopHexGrid, GridError, GridProjection};

/// Sparse mapping from axial coordinates to terrain tiles.
///
/// A coordinate present in the map holds exactly one tile. Absent
/// coordinates are a normal outcome: consumers treat them as unknown or
/// impassable terrain, never as an error.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct HexMap {
    tiles: HashMap<AxialCoord, Tile>,
}

impl HexMap {
    /// Creates an empty map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a tile at the provided coordinate, overwriting any previous
    /// tile stored there.
    pub fn insert(&mut self, coord: AxialCoord, tile: Tile) {
        let _ = self.tiles.insert(coord, tile);
    }

    /// Tile stored at the provided coordinate, if one exists.
    #[must_use]
    pub fn tile(&self, coord: AxialCoord) -> Option<&Tile> {
        self.tiles.get(&coord)
    }

    /// Whether a tile is stored at the provided coordinate.
    #[must_use]
    pub fn contains(&self, coord: AxialCoord) -> bool {
        self.tiles.contains_key(&coord)
    }

    /// Number of tiles stored in the map.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    /// Whether the map holds no tiles at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    /// Iterator over all stored coordinate/tile pairs in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = (AxialCoord, &Tile)> {
        self.tiles.iter().map(|(coord, tile)| (*coord, tile))
    }
}

/// Read-only queries exposed to systems and adapters.
pub mod query {
    use super::HexMap;
    use hexfield_core::AxialCoord;

    /// Whether searches may step onto the provided coordinate.
    ///
    /// Unmapped coordinates count as impassable.
    #[must_use]
    pub fn is_passable(map: &HexMap, coord: AxialCoord) -> bool {
        map.tile(coord).map_or(false, |tile| tile.passable())
    }

    /// Cost of stepping onto the provided coordinate, if it is traversable.
    #[must_use]
    pub fn step_cost(map: &HexMap, coord: AxialCoord) -> Option<u32> {
        map.tile(coord)
            .filter(|tile| tile.passable())
            .map(|tile| tile.cost())
    }
}
