use hexfield_core::{AxialCoord, HexDirection, TerrainId, Tile};
use hexfield_system_pathfinding::Pathfinder;
use hexfield_world::HexMap;

fn grass() -> Tile {
    Tile::new(TerrainId::new("grass"), 0, true, 1)
}

fn rock() -> Tile {
    Tile::new(TerrainId::new("rock"), 2, false, 1)
}

/// Dense 11x11 board with q and r ranging over [-5, 5], all passable at
/// uniform cost.
fn square_board() -> HexMap {
    let mut map = HexMap::new();
    for q in -5..=5 {
        for r in -5..=5 {
            map.insert(AxialCoord::new(q, r), grass());
        }
    }
    map
}

fn assert_consecutive_steps_are_adjacent(steps: &[AxialCoord]) {
    for pair in steps.windows(2) {
        let delta = (pair[1].q() - pair[0].q(), pair[1].r() - pair[0].r());
        assert!(
            HexDirection::ALL
                .iter()
                .any(|direction| direction.offset() == delta),
            "step {:?} -> {:?} is not a neighbor move",
            pair[0],
            pair[1]
        );
    }
}

#[test]
fn uniform_cost_path_length_equals_hex_distance_plus_one() {
    let map = square_board();
    let start = AxialCoord::new(0, 0);
    let goal = AxialCoord::new(2, 3);

    let path = Pathfinder::new()
        .find_path(&map, start, goal)
        .expect("goal is reachable on a dense board");

    assert_eq!(path.start(), Some(start));
    assert_eq!(path.goal(), Some(goal));
    assert_eq!(path.len(), start.distance_to(goal) as usize + 1);
    assert_consecutive_steps_are_adjacent(path.steps());
}

#[test]
fn path_routes_around_a_single_impassable_cell() {
    let mut map = square_board();
    let blocked = AxialCoord::new(1, 0);
    map.insert(blocked, rock());

    let start = AxialCoord::new(0, 0);
    let goal = AxialCoord::new(2, 0);
    let path = Pathfinder::new()
        .find_path(&map, start, goal)
        .expect("detour around the rock exists");

    assert!(
        !path.steps().contains(&blocked),
        "path must not cross the impassable cell"
    );
    assert_eq!(path.start(), Some(start));
    assert_eq!(path.goal(), Some(goal));
    assert_consecutive_steps_are_adjacent(path.steps());
    // One blocked cell forces exactly one extra step on this board.
    assert_eq!(path.len(), start.distance_to(goal) as usize + 2);
}

#[test]
fn path_never_enters_impassable_terrain() {
    let mut map = square_board();
    for coord in AxialCoord::new(0, 0).ring(2) {
        map.insert(coord, rock());
    }
    // Leave one gap in the wall so a route exists.
    map.insert(AxialCoord::new(2, 0), grass());

    let path = Pathfinder::new()
        .find_path(&map, AxialCoord::new(0, 0), AxialCoord::new(4, 0))
        .expect("gap in the wall is reachable");

    for step in path.steps() {
        let tile = map.tile(*step).expect("path stays on mapped cells");
        assert!(tile.passable(), "path entered impassable cell {step:?}");
    }
}

#[test]
fn surrounded_start_reports_no_path() {
    let mut map = square_board();
    for coord in AxialCoord::new(0, 0).ring(1) {
        map.insert(coord, rock());
    }

    let result = Pathfinder::new().find_path(&map, AxialCoord::new(0, 0), AxialCoord::new(3, 0));
    assert!(result.is_none(), "walled-in start must yield no path");
}

#[test]
fn goal_outside_the_map_reports_no_path() {
    let map = square_board();
    let result = Pathfinder::new().find_path(&map, AxialCoord::new(0, 0), AxialCoord::new(40, 40));
    assert!(result.is_none());
}

#[test]
fn start_on_blocked_terrain_is_still_expandable() {
    // The start is seeded without a passability check; a search may begin
    // on blocked terrain and walk off it.
    let mut map = square_board();
    let start = AxialCoord::new(0, 0);
    map.insert(start, rock());

    let path = Pathfinder::new()
        .find_path(&map, start, AxialCoord::new(2, 0))
        .expect("search starting on a rock still expands outward");

    assert_eq!(path.start(), Some(start));
    assert_consecutive_steps_are_adjacent(path.steps());
}

#[test]
fn weighted_terrain_shifts_the_optimal_route() {
    let mut map = square_board();
    // Pave a ridge of expensive hills across the direct corridor.
    for r in -5..=5 {
        map.insert(
            AxialCoord::new(1, r),
            Tile::new(TerrainId::new("hills"), 1, true, 4),
        );
    }

    let start = AxialCoord::new(0, 0);
    let goal = AxialCoord::new(2, 0);
    let path = Pathfinder::new()
        .find_path(&map, start, goal)
        .expect("ridge is expensive but passable");

    // Crossing the ridge once is unavoidable, so the optimal route pays for
    // exactly one hill step.
    let hill_steps = path
        .steps()
        .iter()
        .filter(|step| step.q() == 1)
        .count();
    assert_eq!(hill_steps, 1, "optimal route crosses the ridge exactly once");
}

#[test]
fn repeated_searches_are_deterministic() {
    let map = square_board();
    let pathfinder = Pathfinder::new();
    let start = AxialCoord::new(-3, 2);
    let goal = AxialCoord::new(4, -2);

    let first = pathfinder
        .find_path(&map, start, goal)
        .expect("reachable goal");
    for _ in 0..5 {
        let again = pathfinder
            .find_path(&map, start, goal)
            .expect("reachable goal");
        assert_eq!(again, first, "equal-priority pops must break ties stably");
    }
}
