#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that boots the Hexfield map viewer.
//!
//! The binary imports a map, projects it into world space, and hands the
//! resulting scene to the macroquad backend. Selection and route state live
//! in an explicit [`AppState`] owned by the frame closure; the camera lives
//! in the scene. With `--route` the binary skips the window entirely and
//! prints the A* result for a start/goal pair.

use anyhow::{bail, Context, Result};
use clap::{Parser, ValueEnum};
use glam::Vec2;
use hexfield_core::{AxialCoord, Path, TerrainId, Tile};
use hexfield_rendering::{
    Camera, Color, FrameInput, HighlightPresentation, PathPresentation, Presentation,
    RenderingBackend, Scene, TilePresentation,
};
use hexfield_rendering_macroquad::MacroquadBackend;
use hexfield_system_import::{NoiseImporter, TileImporter, UniformImporter};
use hexfield_system_pathfinding::Pathfinder;
use hexfield_world::{FlatTopHexGrid, GridProjection, HexMap};

const WINDOW_TITLE: &str = "Hexfield";
const CLEAR_COLOR: Color = Color::from_rgb_u8(24, 26, 34);
const PATH_COLOR: Color = Color::from_rgb_u8(240, 200, 60);
const START_COLOR: Color = Color::from_rgb_u8(80, 220, 120);
const GOAL_COLOR: Color = Color::from_rgb_u8(230, 80, 80);

/// Map generator selected on the command line.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum MapKind {
    /// Dense uniform grass board.
    Uniform,
    /// Seeded terrain bands with impassable water.
    Noise,
}

/// Hexfield map viewer and route planner.
#[derive(Debug, Parser)]
#[command(name = "hexfield", version, about)]
struct Args {
    /// Map generator to load.
    #[arg(long, value_enum, default_value_t = MapKind::Noise)]
    map: MapKind,

    /// Board radius in hex steps around the origin.
    #[arg(long, default_value_t = 10)]
    radius: u32,

    /// Seed for the noise generator.
    #[arg(long, default_value_t = 0xc0ffee)]
    seed: u64,

    /// Center-to-corner hex size in world units.
    #[arg(long, default_value_t = 24.0)]
    hex_size: f32,

    /// Print a frame counter once per second.
    #[arg(long)]
    show_fps: bool,

    /// Compute a route headlessly and print it instead of opening a window.
    /// Coordinates are written as `q,r`, e.g. `--route 0,0 2,3`.
    #[arg(long, num_args = 2, value_names = ["START", "GOAL"])]
    route: Option<Vec<String>>,
}

impl Args {
    fn build_map(&self) -> HexMap {
        match self.map {
            MapKind::Uniform => UniformImporter::new(self.radius, TerrainId::new("grass")).load(),
            MapKind::Noise => NoiseImporter::new(self.radius, self.seed).load(),
        }
    }
}

/// Entry point for the Hexfield command-line interface.
fn main() -> Result<()> {
    let args = Args::parse();
    let map = args.build_map();
    let grid =
        FlatTopHexGrid::new(args.hex_size).context("invalid hex size on the command line")?;

    if let Some(route) = &args.route {
        return print_route(&map, route);
    }

    run_viewer(&args, map, grid)
}

fn print_route(map: &HexMap, route: &[String]) -> Result<()> {
    let [start, goal] = route else {
        bail!("--route expects exactly two q,r coordinates");
    };
    let start = parse_coord(start)?;
    let goal = parse_coord(goal)?;

    match Pathfinder::new().find_path(map, start, goal) {
        Some(path) => {
            println!("path with {} cells:", path.len());
            for step in path.steps() {
                println!("  {},{}", step.q(), step.r());
            }
        }
        None => println!("no path found"),
    }

    Ok(())
}

fn parse_coord(text: &str) -> Result<AxialCoord> {
    let Some((q, r)) = text.split_once(',') else {
        bail!("coordinate {text:?} is not of the form q,r");
    };
    let q = q
        .trim()
        .parse()
        .with_context(|| format!("invalid q component in {text:?}"))?;
    let r = r
        .trim()
        .parse()
        .with_context(|| format!("invalid r component in {text:?}"))?;
    Ok(AxialCoord::new(q, r))
}

fn run_viewer(args: &Args, map: HexMap, grid: FlatTopHexGrid) -> Result<()> {
    let tiles = map
        .iter()
        .map(|(coord, tile)| {
            TilePresentation::new(coord, grid.to_world(coord), terrain_color(tile), tile.passable())
        })
        .collect();

    // Start with the lattice origin in the middle of the window.
    let camera = Camera::new().with_offset(Vec2::new(480.0, 360.0));
    let scene = Scene::new(args.hex_size, camera, tiles)?;
    let presentation = Presentation::new(WINDOW_TITLE, CLEAR_COLOR, scene);

    let mut app = AppState::new(map, grid);
    let backend = MacroquadBackend::new()
        .with_vsync(true)
        .with_show_fps(args.show_fps);

    backend.run(presentation, move |_dt, input, scene| {
        app.handle_frame(&input, scene);
    })
}

fn terrain_color(tile: &Tile) -> Color {
    match tile.terrain().as_str() {
        "water" => Color::from_rgb_u8(58, 94, 196),
        "grass" => Color::from_rgb_u8(84, 164, 80),
        "hills" => Color::from_rgb_u8(158, 138, 86),
        "mountain" => Color::from_rgb_u8(138, 138, 142),
        _ => Color::from_rgb_u8(110, 110, 110),
    }
}

/// Per-session application state owned by the frame closure.
#[derive(Debug)]
struct AppState {
    map: HexMap,
    grid: FlatTopHexGrid,
    pathfinder: Pathfinder,
    start: Option<AxialCoord>,
    goal: Option<AxialCoord>,
}

impl AppState {
    fn new(map: HexMap, grid: FlatTopHexGrid) -> Self {
        Self {
            map,
            grid,
            pathfinder: Pathfinder::new(),
            start: None,
            goal: None,
        }
    }

    fn handle_frame(&mut self, input: &FrameInput, scene: &mut Scene) {
        scene.camera.pan_by(input.pan_delta);

        if input.zoom_steps != 0.0 {
            if let Some(cursor) = input.cursor_screen {
                scene.camera.zoom_at(1.1_f32.powf(input.zoom_steps), cursor);
            }
        }

        let mut selection_changed = false;
        if input.select_start {
            if let Some(coord) = self.pick(scene.camera, input.cursor_screen) {
                self.start = Some(coord);
                selection_changed = true;
            }
        }
        if input.select_goal {
            if let Some(coord) = self.pick(scene.camera, input.cursor_screen) {
                self.goal = Some(coord);
                selection_changed = true;
            }
        }

        if selection_changed {
            self.refresh_overlays(scene);
        }
    }

    /// Maps a cursor position to the mapped cell under it, if any.
    fn pick(&self, camera: Camera, cursor: Option<Vec2>) -> Option<AxialCoord> {
        let cursor = cursor?;
        let coord = self.grid.from_world(camera.screen_to_world(cursor));
        self.map.contains(coord).then_some(coord)
    }

    fn refresh_overlays(&self, scene: &mut Scene) {
        scene.highlights.clear();
        if let Some(start) = self.start {
            scene.highlights.push(HighlightPresentation::new(
                start,
                self.grid.to_world(start),
                START_COLOR,
            ));
        }
        if let Some(goal) = self.goal {
            scene.highlights.push(HighlightPresentation::new(
                goal,
                self.grid.to_world(goal),
                GOAL_COLOR,
            ));
        }

        scene.path = match (self.start, self.goal) {
            (Some(start), Some(goal)) => self
                .pathfinder
                .find_path(&self.map, start, goal)
                .map(|path| self.present_path(&path)),
            _ => None,
        };
    }

    fn present_path(&self, path: &Path) -> PathPresentation {
        let points = path
            .steps()
            .iter()
            .map(|step| self.grid.to_world(*step))
            .collect();
        PathPresentation::new(points, PATH_COLOR)
    }
}
