#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Hexfield toolkit.
//!
//! This crate defines the coordinate types, terrain tiles, and pure lattice
//! math that every other crate builds on. The world crate stores tiles keyed
//! by [`AxialCoord`], systems query that store and produce [`Path`] values,
//! and adapters translate between world positions and lattice cells without
//! ever needing to reimplement hex arithmetic.
//!
//! Cube coordinates exist only as an intermediate representation for distance
//! and rounding; they are never stored. All operations here are total
//! functions with no failure modes: absence and emptiness are expressed by
//! the callers, not by errors raised from this crate.

use serde::{Deserialize, Serialize};

/// The six axial direction vectors of a flat-top hex lattice.
///
/// The declaration order matches [`HexDirection::ALL`] and is load-bearing:
/// ring traversal walks the directions in exactly this order, so reordering
/// variants would silently change every ring enumeration.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HexDirection {
    /// Offset (1, 0).
    East,
    /// Offset (1, -1).
    NorthEast,
    /// Offset (0, -1).
    NorthWest,
    /// Offset (-1, 0).
    West,
    /// Offset (-1, 1).
    SouthWest,
    /// Offset (0, 1).
    SouthEast,
}

impl HexDirection {
    /// All six directions in canonical traversal order.
    pub const ALL: [Self; 6] = [
        Self::East,
        Self::NorthEast,
        Self::NorthWest,
        Self::West,
        Self::SouthWest,
        Self::SouthEast,
    ];

    /// Axial (dq, dr) offset contributed by one step in this direction.
    #[must_use]
    pub const fn offset(self) -> (i32, i32) {
        match self {
            Self::East => (1, 0),
            Self::NorthEast => (1, -1),
            Self::NorthWest => (0, -1),
            Self::West => (-1, 0),
            Self::SouthWest => (-1, 1),
            Self::SouthEast => (0, 1),
        }
    }
}

/// Location of a single hex cell expressed in axial (q, r) coordinates.
///
/// Identity is value equality; the type is used directly as a map key.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default,
)]
pub struct AxialCoord {
    q: i32,
    r: i32,
}

impl AxialCoord {
    /// Creates a new axial coordinate.
    #[must_use]
    pub const fn new(q: i32, r: i32) -> Self {
        Self { q, r }
    }

    /// Column-like axis of the coordinate.
    #[must_use]
    pub const fn q(&self) -> i32 {
        self.q
    }

    /// Row-like axis of the coordinate.
    #[must_use]
    pub const fn r(&self) -> i32 {
        self.r
    }

    /// Converts the coordinate into its cube representation.
    #[must_use]
    pub const fn to_cube(self) -> CubeCoord {
        CubeCoord::new(self.q, -self.q - self.r, self.r)
    }

    /// The adjacent coordinate one step along the provided direction.
    #[must_use]
    pub const fn neighbor(self, direction: HexDirection) -> Self {
        let (dq, dr) = direction.offset();
        Self::new(self.q + dq, self.r + dr)
    }

    /// All six adjacent coordinates, in [`HexDirection::ALL`] order.
    #[must_use]
    pub fn neighbors(self) -> [Self; 6] {
        HexDirection::ALL.map(|direction| self.neighbor(direction))
    }

    /// Exact lattice distance to another coordinate, counted in hex steps.
    ///
    /// This is the cube-space max metric. It equals the true graph distance
    /// on an unweighted hex lattice, which makes it an admissible heuristic
    /// for any search whose edge costs are at least one.
    #[must_use]
    pub fn distance_to(self, other: Self) -> u32 {
        let a = self.to_cube();
        let b = other.to_cube();
        (a.x() - b.x())
            .unsigned_abs()
            .max((a.y() - b.y()).unsigned_abs())
            .max((a.z() - b.z()).unsigned_abs())
    }

    /// All coordinates within `radius` hex steps of this one, inclusive.
    ///
    /// The result contains exactly `3r² + 3r + 1` coordinates.
    #[must_use]
    pub fn range(self, radius: u32) -> Vec<Self> {
        let mut results = Vec::with_capacity(range_len(radius));
        let radius = radius as i32;

        for dq in -radius..=radius {
            let lower = (-radius).max(-dq - radius);
            let upper = radius.min(-dq + radius);
            for dr in lower..=upper {
                results.push(Self::new(self.q + dq, self.r + dr));
            }
        }

        results
    }

    /// The `6 * radius` coordinates at exactly `radius` hex steps, in
    /// traversal order.
    ///
    /// The walk starts `radius` steps along direction index 4 (south-west)
    /// and then takes `radius` steps along each direction in
    /// [`HexDirection::ALL`] order. A radius of zero yields the center
    /// alone.
    #[must_use]
    pub fn ring(self, radius: u32) -> Vec<Self> {
        if radius == 0 {
            return vec![self];
        }

        let steps = radius as i32;
        let (dq, dr) = HexDirection::ALL[4].offset();
        let mut cursor = Self::new(self.q + dq * steps, self.r + dr * steps);
        let mut results = Vec::with_capacity(6 * radius as usize);

        for direction in HexDirection::ALL {
            for _ in 0..radius {
                results.push(cursor);
                cursor = cursor.neighbor(direction);
            }
        }

        results
    }
}

/// Closed-form cell count of a radius-`r` hex region, `3r² + 3r + 1`.
///
/// Computed in `u128` so no `u32` radius can overflow the arithmetic
/// before the caller ever allocates. Counts beyond `usize` clamp to zero
/// and the vector simply grows on demand.
const fn range_len(radius: u32) -> usize {
    let radius = radius as u128;
    let count = 3 * radius * radius + 3 * radius + 1;
    if count > usize::MAX as u128 {
        0
    } else {
        count as usize
    }
}

/// Cube (x, y, z) representation of a hex cell.
///
/// Maintains the invariant `x + y + z == 0`. The type only ever appears as
/// an intermediate value for distance and rounding arithmetic; stores and
/// paths always hold [`AxialCoord`] values.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct CubeCoord {
    x: i32,
    y: i32,
    z: i32,
}

impl CubeCoord {
    /// Creates a new cube coordinate.
    ///
    /// The zero-sum invariant is a caller precondition. It is checked in
    /// debug builds only so that release-mode coordinate math stays free of
    /// validation overhead.
    #[must_use]
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        debug_assert!(x + y + z == 0);
        Self { x, y, z }
    }

    /// First cube axis.
    #[must_use]
    pub const fn x(&self) -> i32 {
        self.x
    }

    /// Second cube axis.
    #[must_use]
    pub const fn y(&self) -> i32 {
        self.y
    }

    /// Third cube axis.
    #[must_use]
    pub const fn z(&self) -> i32 {
        self.z
    }

    /// Converts the coordinate back to axial form by dropping the `y` axis.
    #[must_use]
    pub const fn to_axial(self) -> AxialCoord {
        AxialCoord::new(self.x, self.z)
    }
}

/// Fractional axial coordinate produced by inverse pixel projection.
///
/// Projecting a world position onto the lattice yields a point between cell
/// centers; [`FractionalAxial::round`] snaps it to the nearest actual cell.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct FractionalAxial {
    q: f32,
    r: f32,
}

impl FractionalAxial {
    /// Creates a new fractional axial coordinate.
    #[must_use]
    pub const fn new(q: f32, r: f32) -> Self {
        Self { q, r }
    }

    /// Fractional q component.
    #[must_use]
    pub const fn q(&self) -> f32 {
        self.q
    }

    /// Fractional r component.
    #[must_use]
    pub const fn r(&self) -> f32 {
        self.r
    }

    /// Snaps the fractional coordinate to the nearest lattice cell.
    ///
    /// Each cube component is rounded to the nearest integer, then the
    /// component with the largest rounding error is recomputed from the
    /// zero-sum invariant. Ties are broken in fixed x > y > z order; the
    /// order is part of the contract because it keeps rounding
    /// deterministic across platforms.
    #[must_use]
    pub fn round(self) -> AxialCoord {
        let x = self.q;
        let z = self.r;
        let y = -x - z;

        let mut rx = x.round();
        let mut ry = y.round();
        let mut rz = z.round();

        let dx = (rx - x).abs();
        let dy = (ry - y).abs();
        let dz = (rz - z).abs();

        if dx > dy && dx > dz {
            rx = -ry - rz;
        } else if dy > dz {
            ry = -rx - rz;
        } else {
            rz = -rx - ry;
        }

        CubeCoord::new(rx as i32, ry as i32, rz as i32).to_axial()
    }
}

/// Opaque identifier naming a terrain kind.
///
/// Importers are free to invent identifiers; the core never interprets them
/// beyond equality.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TerrainId(String);

impl TerrainId {
    /// Creates a terrain identifier from any string-like value.
    #[must_use]
    pub fn new<T>(name: T) -> Self
    where
        T: Into<String>,
    {
        Self(name.into())
    }

    /// Borrow of the identifier text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Terrain tile occupying a single hex cell.
///
/// Tiles are immutable by convention: the store that owns a tile only ever
/// reads it, and searches treat the traversal cost and passability as fixed
/// for the duration of a query.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Tile {
    terrain: TerrainId,
    elevation: i32,
    passable: bool,
    cost: u32,
}

impl Tile {
    /// Creates a new tile.
    ///
    /// Traversal cost below one would break the admissibility of the
    /// hex-distance heuristic, so `cost` is clamped to a minimum of one.
    #[must_use]
    pub fn new(terrain: TerrainId, elevation: i32, passable: bool, cost: u32) -> Self {
        Self {
            terrain,
            elevation,
            passable,
            cost: cost.max(1),
        }
    }

    /// Terrain kind occupying the cell.
    #[must_use]
    pub fn terrain(&self) -> &TerrainId {
        &self.terrain
    }

    /// Elevation of the cell in map-defined units.
    #[must_use]
    pub const fn elevation(&self) -> i32 {
        self.elevation
    }

    /// Whether searches may step onto this cell.
    #[must_use]
    pub const fn passable(&self) -> bool {
        self.passable
    }

    /// Cost of stepping onto this cell. Always at least one.
    #[must_use]
    pub const fn cost(&self) -> u32 {
        self.cost
    }
}

/// Ordered route from a start cell to a goal cell, both inclusive.
///
/// Every consecutive pair of steps is lattice-adjacent. Paths are produced
/// fresh by each search and owned entirely by the caller.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Path {
    steps: Vec<AxialCoord>,
}

impl Path {
    /// Creates a path from an ordered step sequence.
    #[must_use]
    pub fn new(steps: Vec<AxialCoord>) -> Self {
        Self { steps }
    }

    /// Ordered steps from start to goal.
    #[must_use]
    pub fn steps(&self) -> &[AxialCoord] {
        &self.steps
    }

    /// Number of cells on the path, including both endpoints.
    #[must_use]
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Whether the path contains no steps at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// First cell of the path, if any.
    #[must_use]
    pub fn start(&self) -> Option<AxialCoord> {
        self.steps.first().copied()
    }

    /// Final cell of the path, if any.
    #[must_use]
    pub fn goal(&self) -> Option<AxialCoord> {
        self.steps.last().copied()
    }

    /// Consumes the path, yielding the underlying step sequence.
    #[must_use]
    pub fn into_steps(self) -> Vec<AxialCoord> {
        self.steps
    }
}

#[cfg(test)]
mod tests {
    use super::{range_len, AxialCoord, FractionalAxial, HexDirection, Path, TerrainId, Tile};
    use serde::{de::DeserializeOwned, Serialize};
    use std::collections::HashSet;

    #[test]
    fn axial_cube_round_trip_preserves_coordinates() {
        for q in -4..=4 {
            for r in -4..=4 {
                let axial = AxialCoord::new(q, r);
                let cube = axial.to_cube();
                assert_eq!(cube.x() + cube.y() + cube.z(), 0);
                assert_eq!(cube.to_axial(), axial);
            }
        }
    }

    #[test]
    fn neighbors_are_distinct_adjacent_and_symmetric() {
        let center = AxialCoord::new(3, -2);
        let neighbors = center.neighbors();

        let distinct: HashSet<_> = neighbors.iter().copied().collect();
        assert_eq!(distinct.len(), 6);

        for neighbor in neighbors {
            assert_eq!(center.distance_to(neighbor), 1);
            assert!(
                neighbor.neighbors().contains(&center),
                "adjacency must be symmetric"
            );
        }
    }

    #[test]
    fn neighbor_offsets_follow_canonical_order() {
        let offsets: Vec<_> = HexDirection::ALL
            .iter()
            .map(|direction| direction.offset())
            .collect();
        assert_eq!(
            offsets,
            vec![(1, 0), (1, -1), (0, -1), (-1, 0), (-1, 1), (0, 1)]
        );
    }

    #[test]
    fn distance_is_zero_reflexive_and_symmetric() {
        let samples = [
            AxialCoord::new(0, 0),
            AxialCoord::new(2, 3),
            AxialCoord::new(-5, 1),
            AxialCoord::new(4, -4),
        ];

        for a in samples {
            assert_eq!(a.distance_to(a), 0);
            for b in samples {
                assert_eq!(a.distance_to(b), b.distance_to(a));
            }
        }
    }

    #[test]
    fn distance_satisfies_triangle_inequality() {
        let samples = [
            AxialCoord::new(0, 0),
            AxialCoord::new(1, -3),
            AxialCoord::new(-2, 4),
            AxialCoord::new(5, 0),
            AxialCoord::new(-3, -1),
        ];

        for a in samples {
            for b in samples {
                for c in samples {
                    assert!(a.distance_to(c) <= a.distance_to(b) + b.distance_to(c));
                }
            }
        }
    }

    #[test]
    fn range_counts_match_closed_form_and_distance_filter() {
        let center = AxialCoord::new(-1, 2);

        for radius in 0..5u32 {
            let range = center.range(radius);
            let expected = (3 * radius * radius + 3 * radius + 1) as usize;
            assert_eq!(range.len(), expected);

            let as_set: HashSet<_> = range.iter().copied().collect();
            assert_eq!(as_set.len(), expected, "range must not repeat cells");

            let by_filter: HashSet<_> = center
                .range(radius + 2)
                .into_iter()
                .filter(|coord| center.distance_to(*coord) <= radius)
                .collect();
            assert_eq!(as_set, by_filter);
        }
    }

    #[test]
    fn range_len_survives_radii_that_overflow_i32_arithmetic() {
        // 3r² alone exceeds i32::MAX from radius 26_755 onward; the count
        // must still come out exact rather than trapping in debug builds.
        assert_eq!(range_len(0), 1);
        assert_eq!(range_len(5), 91);
        assert_eq!(range_len(26_755), 2_147_570_341);
        // Past usize the count clamps to zero instead of overflowing.
        assert_eq!(range_len(u32::MAX), 0);
    }

    #[test]
    fn ring_yields_six_radius_distinct_cells_at_exact_distance() {
        let center = AxialCoord::new(2, 2);

        assert_eq!(center.ring(0), vec![center]);

        for radius in 1..5u32 {
            let ring = center.ring(radius);
            assert_eq!(ring.len(), 6 * radius as usize);

            let distinct: HashSet<_> = ring.iter().copied().collect();
            assert_eq!(distinct.len(), ring.len(), "ring must not repeat cells");

            for coord in ring {
                assert_eq!(center.distance_to(coord), radius);
            }
        }
    }

    #[test]
    fn ring_starts_at_south_west_corner() {
        let center = AxialCoord::new(0, 0);
        let ring = center.ring(2);
        assert_eq!(ring[0], AxialCoord::new(-2, 2));
    }

    #[test]
    fn fractional_round_is_identity_on_lattice_points() {
        for q in -3..=3 {
            for r in -3..=3 {
                let fractional = FractionalAxial::new(q as f32, r as f32);
                assert_eq!(fractional.round(), AxialCoord::new(q, r));
            }
        }
    }

    #[test]
    fn fractional_round_snaps_small_perturbations_back() {
        for q in -3..=3 {
            for r in -3..=3 {
                let fractional = FractionalAxial::new(q as f32 + 0.12, r as f32 - 0.09);
                assert_eq!(fractional.round(), AxialCoord::new(q, r));
            }
        }
    }

    #[test]
    fn tile_clamps_cost_to_minimum_of_one() {
        let tile = Tile::new(TerrainId::new("swamp"), 0, true, 0);
        assert_eq!(tile.cost(), 1);

        let tile = Tile::new(TerrainId::new("hills"), 2, true, 3);
        assert_eq!(tile.cost(), 3);
    }

    #[test]
    fn path_exposes_endpoints_and_length() {
        let steps = vec![
            AxialCoord::new(0, 0),
            AxialCoord::new(1, 0),
            AxialCoord::new(2, 0),
        ];
        let path = Path::new(steps.clone());

        assert_eq!(path.len(), 3);
        assert!(!path.is_empty());
        assert_eq!(path.start(), Some(AxialCoord::new(0, 0)));
        assert_eq!(path.goal(), Some(AxialCoord::new(2, 0)));
        assert_eq!(path.into_steps(), steps);
    }

    fn assert_round_trip<T>(value: &T)
    where
        T: Serialize + DeserializeOwned + PartialEq + std::fmt::Debug,
    {
        let bytes = bincode::serialize(value).expect("serialize");
        let restored: T = bincode::deserialize(&bytes).expect("deserialize");
        assert_eq!(&restored, value);
    }

    #[test]
    fn axial_coord_round_trips_through_bincode() {
        assert_round_trip(&AxialCoord::new(-7, 11));
    }

    #[test]
    fn tile_round_trips_through_bincode() {
        let tile = Tile::new(TerrainId::new("grass"), 1, true, 2);
        assert_round_trip(&tile);
    }

    #[test]
    fn path_round_trips_through_bincode() {
        let path = Path::new(vec![AxialCoord::new(0, 0), AxialCoord::new(0, 1)]);
        assert_round_trip(&path);
    }
}
