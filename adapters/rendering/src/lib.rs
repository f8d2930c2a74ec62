#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Shared rendering contracts for Hexfield adapters.
//!
//! Backends receive a [`Presentation`] describing the initial scene and a
//! per-frame closure that applies input to the scene before it is drawn.
//! The scene speaks entirely in world-space positions; the [`Camera`] is
//! the only place where world coordinates meet the screen, so the grid
//! projector and the pathfinder never learn about zoom or screen pixels.

use anyhow::Result as AnyResult;
use glam::Vec2;
use hexfield_core::AxialCoord;
use std::time::Duration;
use thiserror::Error;

/// RGBA color used when presenting frames.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
    /// Red channel intensity in the range 0.0..=1.0.
    pub red: f32,
    /// Green channel intensity in the range 0.0..=1.0.
    pub green: f32,
    /// Blue channel intensity in the range 0.0..=1.0.
    pub blue: f32,
    /// Alpha channel intensity in the range 0.0..=1.0.
    pub alpha: f32,
}

impl Color {
    /// Creates a new color from floating point channels.
    #[must_use]
    pub const fn new(red: f32, green: f32, blue: f32, alpha: f32) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    /// Creates an opaque color from byte RGB values.
    #[must_use]
    pub const fn from_rgb_u8(red: u8, green: u8, blue: u8) -> Self {
        Self {
            red: red as f32 / 255.0,
            green: green as f32 / 255.0,
            blue: blue as f32 / 255.0,
            alpha: 1.0,
        }
    }

    /// Returns a new color lightened towards white by the provided amount.
    #[must_use]
    pub fn lighten(self, amount: f32) -> Self {
        let amount = amount.clamp(0.0, 1.0);

        Self {
            red: lighten_channel(self.red, amount),
            green: lighten_channel(self.green, amount),
            blue: lighten_channel(self.blue, amount),
            alpha: self.alpha,
        }
    }
}

fn lighten_channel(channel: f32, amount: f32) -> f32 {
    channel + (1.0 - channel) * amount
}

/// Screen-space camera with pan offset and clamped zoom.
///
/// World positions produced by the grid projector are camera-agnostic;
/// backends push every draw call through [`Camera::world_to_screen`] and
/// translate cursor positions back with [`Camera::screen_to_world`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Camera {
    offset: Vec2,
    zoom: f32,
}

impl Camera {
    /// Smallest zoom factor the camera will accept.
    pub const MIN_ZOOM: f32 = 0.2;
    /// Largest zoom factor the camera will accept.
    pub const MAX_ZOOM: f32 = 5.0;

    /// Creates a camera with no pan offset and a 1:1 zoom.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            offset: Vec2::ZERO,
            zoom: 1.0,
        }
    }

    /// Returns the camera with its pan offset replaced.
    #[must_use]
    pub fn with_offset(mut self, offset: Vec2) -> Self {
        self.offset = offset;
        self
    }

    /// Current pan offset in screen units.
    #[must_use]
    pub const fn offset(&self) -> Vec2 {
        self.offset
    }

    /// Current zoom factor.
    #[must_use]
    pub const fn zoom(&self) -> f32 {
        self.zoom
    }

    /// Shifts the view by a screen-space delta.
    pub fn pan_by(&mut self, delta: Vec2) {
        self.offset += delta;
    }

    /// Projects a world-space position onto the screen.
    #[must_use]
    pub fn world_to_screen(&self, position: Vec2) -> Vec2 {
        position * self.zoom + self.offset
    }

    /// Recovers the world-space position under a screen coordinate.
    #[must_use]
    pub fn screen_to_world(&self, position: Vec2) -> Vec2 {
        (position - self.offset) / self.zoom
    }

    /// Scales the zoom while keeping the world point under `screen_pos`
    /// fixed on screen.
    ///
    /// Factors above one zoom in, factors below one zoom out. The zoom is
    /// clamped to [`Self::MIN_ZOOM`]..=[`Self::MAX_ZOOM`]; at the limits
    /// the call is a no-op.
    pub fn zoom_at(&mut self, factor: f32, screen_pos: Vec2) {
        let new_zoom = (self.zoom * factor).clamp(Self::MIN_ZOOM, Self::MAX_ZOOM);
        if new_zoom == self.zoom {
            return;
        }

        let world_before = self.screen_to_world(screen_pos);
        self.zoom = new_zoom;
        let world_after = self.screen_to_world(screen_pos);
        self.offset += (world_after - world_before) * self.zoom;
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new()
    }
}

/// Input snapshot gathered by adapters before updating the scene.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct FrameInput {
    /// Cursor position in screen units, when the cursor is over the window.
    pub cursor_screen: Option<Vec2>,
    /// Screen-space drag delta accumulated on this frame while panning.
    pub pan_delta: Vec2,
    /// Scroll wheel steps accumulated on this frame; positive zooms in.
    pub zoom_steps: f32,
    /// Whether the adapter detected a start-selection press on this frame.
    pub select_start: bool,
    /// Whether the adapter detected a goal-selection press on this frame.
    pub select_goal: bool,
}

/// Single hex tile ready to be drawn at a world-space center.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TilePresentation {
    /// Lattice cell the tile occupies.
    pub coord: AxialCoord,
    /// World-space position of the tile's center.
    pub world_pos: Vec2,
    /// Fill color chosen for the tile's terrain.
    pub fill: Color,
    /// Whether the tile is traversable; backends may mark blocked tiles.
    pub passable: bool,
}

impl TilePresentation {
    /// Creates a new tile descriptor.
    #[must_use]
    pub const fn new(coord: AxialCoord, world_pos: Vec2, fill: Color, passable: bool) -> Self {
        Self {
            coord,
            world_pos,
            fill,
            passable,
        }
    }
}

/// Route overlay drawn as a polyline through tile centers.
#[derive(Clone, Debug, PartialEq)]
pub struct PathPresentation {
    /// World-space centers of the route's cells, start to goal.
    pub world_points: Vec<Vec2>,
    /// Stroke color of the overlay.
    pub color: Color,
}

impl PathPresentation {
    /// Creates a new route overlay descriptor.
    #[must_use]
    pub fn new(world_points: Vec<Vec2>, color: Color) -> Self {
        Self {
            world_points,
            color,
        }
    }
}

/// Emphasised cell, typically the selected start or goal.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HighlightPresentation {
    /// Lattice cell being emphasised.
    pub coord: AxialCoord,
    /// World-space position of the highlighted cell's center.
    pub world_pos: Vec2,
    /// Outline color of the highlight.
    pub color: Color,
}

impl HighlightPresentation {
    /// Creates a new highlight descriptor.
    #[must_use]
    pub const fn new(coord: AxialCoord, world_pos: Vec2, color: Color) -> Self {
        Self {
            coord,
            world_pos,
            color,
        }
    }
}

/// Scene description combining the tile layer, overlays, and the camera.
#[derive(Clone, Debug, PartialEq)]
pub struct Scene {
    /// Center-to-corner size of a hex in world units, used as draw radius.
    pub hex_size: f32,
    /// Camera applied to every draw call.
    pub camera: Camera,
    /// Tiles composing the map layer.
    pub tiles: Vec<TilePresentation>,
    /// Optional route overlay.
    pub path: Option<PathPresentation>,
    /// Highlighted cells drawn above the tile layer.
    pub highlights: Vec<HighlightPresentation>,
}

impl Scene {
    /// Creates a new scene.
    ///
    /// Returns an error when `hex_size` is not strictly positive.
    pub fn new(
        hex_size: f32,
        camera: Camera,
        tiles: Vec<TilePresentation>,
    ) -> Result<Self, RenderingError> {
        if !(hex_size > 0.0) {
            return Err(RenderingError::NonPositiveHexSize { hex_size });
        }

        Ok(Self {
            hex_size,
            camera,
            tiles,
            path: None,
            highlights: Vec::new(),
        })
    }
}

/// Presentation descriptor consumed by rendering backends.
#[derive(Clone, Debug, PartialEq)]
pub struct Presentation {
    /// Title used by the created window.
    pub window_title: String,
    /// Solid color used to clear each frame.
    pub clear_color: Color,
    /// Scene content that should be displayed.
    pub scene: Scene,
}

impl Presentation {
    /// Constructs a new presentation descriptor.
    #[must_use]
    pub fn new<T>(window_title: T, clear_color: Color, scene: Scene) -> Self
    where
        T: Into<String>,
    {
        Self {
            window_title: window_title.into(),
            clear_color,
            scene,
        }
    }
}

/// Rendering backend capable of presenting Hexfield scenes.
pub trait RenderingBackend {
    /// Runs the rendering backend until it is requested to exit.
    ///
    /// The provided `update_scene` closure receives the frame delta and the
    /// input captured by the adapter, and may mutate the scene before it is
    /// rendered. Application state beyond the scene itself lives inside the
    /// closure, never in module-level globals.
    fn run<F>(self, presentation: Presentation, update_scene: F) -> AnyResult<()>
    where
        F: FnMut(Duration, FrameInput, &mut Scene) + 'static;
}

/// Errors that can occur when constructing rendering descriptors.
#[derive(Clone, Copy, Debug, Error, PartialEq)]
pub enum RenderingError {
    /// Hex size must be positive to produce a drawable polygon.
    #[error("hex size must be positive (received {hex_size})")]
    NonPositiveHexSize {
        /// Provided size that failed validation.
        hex_size: f32,
    },
}
