#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Macroquad-backed rendering adapter for Hexfield.
//!
//! Macroquad's optional audio stack depends on native ALSA development
//! libraries, which are unavailable in the containerised CI environment.
//! To keep `cargo test` usable everywhere we depend on macroquad without its
//! default `audio` feature. Consumers that need sound playback can opt back
//! in by enabling `macroquad/audio` in their own `Cargo.toml` dependency
//! specification.
//!
//! Input conventions: middle-button drag pans, the scroll wheel zooms at
//! the cursor, left click selects the route start, right click selects the
//! goal, and Escape or Q quits.

use anyhow::Result;
use glam::Vec2;
use hexfield_rendering::{
    Color, FrameInput, PathPresentation, Presentation, RenderingBackend, Scene,
};
use macroquad::input::{
    is_key_pressed, is_mouse_button_down, is_mouse_button_pressed, mouse_position, mouse_wheel,
    KeyCode, MouseButton,
};
use std::time::Duration;

/// Rendering backend implemented on top of macroquad.
#[derive(Clone, Copy, Debug)]
pub struct MacroquadBackend {
    swap_interval: Option<i32>,
    show_fps: bool,
}

impl Default for MacroquadBackend {
    fn default() -> Self {
        Self {
            swap_interval: None,
            show_fps: false,
        }
    }
}

impl MacroquadBackend {
    /// Returns a backend that requests the platform's default swap interval.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Configures the backend to request a specific swap interval from the platform.
    #[must_use]
    pub fn with_swap_interval(mut self, swap_interval: Option<i32>) -> Self {
        self.swap_interval = swap_interval;
        self
    }

    /// Configures the backend to either synchronise presentation with the display refresh rate
    /// or render as fast as possible.
    #[must_use]
    pub fn with_vsync(self, enabled: bool) -> Self {
        let swap_interval = if enabled { Some(1) } else { Some(0) };
        self.with_swap_interval(swap_interval)
    }

    /// Configures whether the backend prints a frame counter once per second.
    #[must_use]
    pub fn with_show_fps(mut self, show: bool) -> Self {
        self.show_fps = show;
        self
    }
}

/// Snapshot of edge-triggered keyboard shortcuts observed during a single frame.
#[derive(Clone, Copy, Debug, Default)]
struct KeyboardShortcuts {
    /// `Q` or `Escape` to quit the render loop.
    quit_requested: bool,
}

impl KeyboardShortcuts {
    fn poll() -> Self {
        Self {
            quit_requested: is_key_pressed(KeyCode::Escape) || is_key_pressed(KeyCode::Q),
        }
    }
}

/// Tracks the cursor across frames so middle-button drags become pan deltas.
#[derive(Clone, Copy, Debug, Default)]
struct PointerState {
    last_cursor: Option<Vec2>,
}

impl PointerState {
    fn gather(&mut self) -> FrameInput {
        let (cursor_x, cursor_y) = mouse_position();
        let cursor = Vec2::new(cursor_x, cursor_y);

        let pan_delta = if is_mouse_button_down(MouseButton::Middle) {
            self.last_cursor.map_or(Vec2::ZERO, |last| cursor - last)
        } else {
            Vec2::ZERO
        };
        self.last_cursor = Some(cursor);

        let (_, wheel_y) = mouse_wheel();
        let zoom_steps = if wheel_y > 0.0 {
            1.0
        } else if wheel_y < 0.0 {
            -1.0
        } else {
            0.0
        };

        FrameInput {
            cursor_screen: Some(cursor),
            pan_delta,
            zoom_steps,
            select_start: is_mouse_button_pressed(MouseButton::Left),
            select_goal: is_mouse_button_pressed(MouseButton::Right),
        }
    }
}

/// Counts rendered frames and reports the rate once per second.
#[derive(Clone, Copy, Debug, Default)]
struct FpsCounter {
    elapsed: Duration,
    frames: u32,
}

impl FpsCounter {
    fn record_frame(&mut self, dt: Duration) -> Option<f32> {
        self.elapsed += dt;
        self.frames = self.frames.saturating_add(1);

        if self.elapsed < Duration::from_secs(1) {
            return None;
        }

        let seconds = self.elapsed.as_secs_f32();
        let per_second = if seconds <= f32::EPSILON {
            0.0
        } else {
            self.frames as f32 / seconds
        };
        self.elapsed = Duration::ZERO;
        self.frames = 0;
        Some(per_second)
    }
}

impl RenderingBackend for MacroquadBackend {
    fn run<F>(self, presentation: Presentation, mut update_scene: F) -> Result<()>
    where
        F: FnMut(Duration, FrameInput, &mut Scene) + 'static,
    {
        let Self {
            swap_interval,
            show_fps,
        } = self;

        let Presentation {
            window_title,
            clear_color,
            scene,
        } = presentation;

        let mut config = macroquad::window::Conf {
            window_title,
            window_width: 960,
            window_height: 720,
            ..macroquad::window::Conf::default()
        };
        if let Some(swap_interval) = swap_interval {
            config.platform.swap_interval = Some(swap_interval);
        }

        macroquad::Window::from_config(config, async move {
            let background = to_macroquad_color(clear_color);
            let mut scene = scene;
            let mut pointer = PointerState::default();
            let mut fps_counter = FpsCounter::default();

            loop {
                let keyboard = KeyboardShortcuts::poll();
                if keyboard.quit_requested {
                    break;
                }

                macroquad::window::clear_background(background);

                let dt_seconds = macroquad::time::get_frame_time();
                let frame_dt = Duration::from_secs_f32(dt_seconds.max(0.0));
                let frame_input = pointer.gather();

                update_scene(frame_dt, frame_input, &mut scene);

                let viewport = Viewport {
                    width: macroquad::window::screen_width(),
                    height: macroquad::window::screen_height(),
                };

                draw_tiles(&scene, viewport);
                if let Some(path) = &scene.path {
                    draw_path(&scene, path);
                }
                draw_highlights(&scene);

                if show_fps {
                    if let Some(per_second) = fps_counter.record_frame(frame_dt) {
                        println!("FPS: {per_second:.2}");
                    }
                }

                macroquad::window::next_frame().await;
            }
        });

        Ok(())
    }
}

/// Screen dimensions captured once per frame for culling.
#[derive(Clone, Copy, Debug)]
struct Viewport {
    width: f32,
    height: f32,
}

/// Whether a hex drawn at `center` with `radius` can touch the viewport.
fn hex_visible(center: Vec2, radius: f32, viewport: Viewport) -> bool {
    center.x + radius >= 0.0
        && center.y + radius >= 0.0
        && center.x - radius <= viewport.width
        && center.y - radius <= viewport.height
}

fn draw_tiles(scene: &Scene, viewport: Viewport) {
    let radius = scene.hex_size * scene.camera.zoom();
    let outline = to_macroquad_color(Color::from_rgb_u8(30, 30, 30));

    for tile in &scene.tiles {
        let center = scene.camera.world_to_screen(tile.world_pos);
        if !hex_visible(center, radius, viewport) {
            continue;
        }

        // Rotation 0 puts a vertex at angle zero, which is the flat-top
        // orientation for macroquad's polygon winding.
        macroquad::shapes::draw_poly(
            center.x,
            center.y,
            6,
            radius * 0.95,
            0.0,
            to_macroquad_color(tile.fill),
        );

        if !tile.passable {
            macroquad::shapes::draw_poly_lines(center.x, center.y, 6, radius * 0.95, 0.0, 2.0, outline);
        }
    }
}

fn draw_path(scene: &Scene, path: &PathPresentation) {
    let color = to_macroquad_color(path.color);
    let thickness = (scene.hex_size * scene.camera.zoom() * 0.2).max(1.0);

    for pair in path.world_points.windows(2) {
        let from = scene.camera.world_to_screen(pair[0]);
        let to = scene.camera.world_to_screen(pair[1]);
        macroquad::shapes::draw_line(from.x, from.y, to.x, to.y, thickness, color);
    }
}

fn draw_highlights(scene: &Scene) {
    let radius = scene.hex_size * scene.camera.zoom();

    for highlight in &scene.highlights {
        let center = scene.camera.world_to_screen(highlight.world_pos);
        macroquad::shapes::draw_poly_lines(
            center.x,
            center.y,
            6,
            radius,
            0.0,
            3.0,
            to_macroquad_color(highlight.color),
        );
    }
}

fn to_macroquad_color(color: Color) -> macroquad::color::Color {
    macroquad::color::Color::new(color.red, color.green, color.blue, color.alpha)
}

#[cfg(test)]
mod tests {
    use super::{hex_visible, to_macroquad_color, Viewport};
    use glam::Vec2;
    use hexfield_rendering::Color;

    const VIEWPORT: Viewport = Viewport {
        width: 800.0,
        height: 600.0,
    };

    #[test]
    fn hexes_inside_the_viewport_are_visible() {
        assert!(hex_visible(Vec2::new(400.0, 300.0), 20.0, VIEWPORT));
    }

    #[test]
    fn hexes_overlapping_an_edge_are_still_visible() {
        assert!(hex_visible(Vec2::new(-10.0, 300.0), 20.0, VIEWPORT));
        assert!(hex_visible(Vec2::new(805.0, 300.0), 20.0, VIEWPORT));
    }

    #[test]
    fn hexes_far_outside_the_viewport_are_culled() {
        assert!(!hex_visible(Vec2::new(-100.0, 300.0), 20.0, VIEWPORT));
        assert!(!hex_visible(Vec2::new(400.0, 700.0), 20.0, VIEWPORT));
    }

    #[test]
    fn color_conversion_preserves_channels() {
        let converted = to_macroquad_color(Color::new(0.1, 0.2, 0.3, 0.4));
        assert!((converted.r - 0.1).abs() < f32::EPSILON);
        assert!((converted.g - 0.2).abs() < f32::EPSILON);
        assert!((converted.b - 0.3).abs() < f32::EPSILON);
        assert!((converted.a - 0.4).abs() < f32::EPSILON);
    }
}
