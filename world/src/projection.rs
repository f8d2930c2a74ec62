//! Flat-top hex projection between lattice cells and world positions.

use glam::Vec2;
use hexfield_core::{AxialCoord, FractionalAxial};
use thiserror::Error;

/// Capability trait for translating between grid cells and world space.
///
/// The concrete flat-top hex grid is one implementation; square or triangle
/// lattices could be substituted behind the same interface without touching
/// any consumer.
pub trait GridProjection {
    /// World-space position of the provided cell's center.
    fn to_world(&self, coord: AxialCoord) -> Vec2;

    /// Lattice cell whose center is nearest to the provided world position.
    fn from_world(&self, position: Vec2) -> AxialCoord;

    /// All cells adjacent to the provided cell.
    fn neighbors(&self, coord: AxialCoord) -> [AxialCoord; 6];
}

/// Errors that can occur when constructing a grid projector.
#[derive(Clone, Copy, Debug, Error, PartialEq)]
pub enum GridError {
    /// The hex size must be positive to keep the inverse projection finite.
    #[error("hex size must be positive (received {size})")]
    NonPositiveSize {
        /// Size value that failed validation.
        size: f32,
    },
}

/// Flat-top hexagonal grid projector.
///
/// The size is the distance from a cell's center to any of its corners,
/// fixed for the lifetime of the projector. The origin offsets every
/// projection and may be mutated for panning; all methods are pure
/// functions of the current state plus their input.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FlatTopHexGrid {
    size: f32,
    origin: Vec2,
}

impl FlatTopHexGrid {
    /// Creates a projector with the provided hex size and a zero origin.
    ///
    /// Returns an error when `size` is not strictly positive.
    pub fn new(size: f32) -> Result<Self, GridError> {
        if !(size > 0.0) {
            return Err(GridError::NonPositiveSize { size });
        }

        Ok(Self {
            size,
            origin: Vec2::ZERO,
        })
    }

    /// Returns the projector with its origin replaced.
    #[must_use]
    pub fn with_origin(mut self, origin: Vec2) -> Self {
        self.origin = origin;
        self
    }

    /// Center-to-corner size of a single hex in world units.
    #[must_use]
    pub const fn size(&self) -> f32 {
        self.size
    }

    /// Current origin offset applied to every projection.
    #[must_use]
    pub const fn origin(&self) -> Vec2 {
        self.origin
    }

    /// Moves the origin, shifting the whole grid in world space.
    pub fn set_origin(&mut self, origin: Vec2) {
        self.origin = origin;
    }
}

impl GridProjection for FlatTopHexGrid {
    fn to_world(&self, coord: AxialCoord) -> Vec2 {
        let q = coord.q() as f32;
        let r = coord.r() as f32;
        let x = self.size * 1.5 * q;
        let y = self.size * 3.0_f32.sqrt() * (r + q * 0.5);
        Vec2::new(x, y) + self.origin
    }

    fn from_world(&self, position: Vec2) -> AxialCoord {
        let local = position - self.origin;
        let q = (2.0 / 3.0 * local.x) / self.size;
        let r = (-1.0 / 3.0 * local.x + 3.0_f32.sqrt() / 3.0 * local.y) / self.size;
        FractionalAxial::new(q, r).round()
    }

    fn neighbors(&self, coord: AxialCoord) -> [AxialCoord; 6] {
        coord.neighbors()
    }
}
