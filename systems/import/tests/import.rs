use hexfield_core::{AxialCoord, TerrainId};
use hexfield_system_import::{NoiseImporter, TileImporter, UniformImporter};
use hexfield_system_pathfinding::Pathfinder;
use hexfield_world::query;

#[test]
fn uniform_board_supports_corner_to_corner_routing() {
    let map = UniformImporter::new(5, TerrainId::new("grass")).load();
    let start = AxialCoord::new(-5, 0);
    let goal = AxialCoord::new(5, 0);

    let path = Pathfinder::new()
        .find_path(&map, start, goal)
        .expect("uniform board is fully connected");
    assert_eq!(path.len(), start.distance_to(goal) as usize + 1);
}

#[test]
fn routes_on_generated_terrain_stay_out_of_the_water() {
    let map = NoiseImporter::new(10, 7).load();
    let pathfinder = Pathfinder::new();

    // Probe every cell near the origin; whenever a route exists it must
    // stay on traversable terrain after the seeded start.
    for goal in AxialCoord::new(0, 0).range(4) {
        if let Some(path) = pathfinder.find_path(&map, AxialCoord::new(0, 0), goal) {
            for step in &path.steps()[1..] {
                assert!(
                    query::is_passable(&map, *step),
                    "route stepped into water at {step:?}"
                );
            }
        }
    }

    // The generator should flood part of the board and leave the rest open.
    let water = map
        .iter()
        .filter(|(_, tile)| !tile.passable())
        .count();
    assert!(water > 0, "expected some flooded cells");
    assert!(water < map.len(), "expected some traversable cells");
}
