/// The built-in level: maze layout, spawn points and the ghost roster.
///
/// ## Tile legend:
///   '#' = Wall           '.' = Pellet
///   'o' = Power pellet   ' ' = Open (anything else is open too)
///
/// There is exactly one level. Home corners are the open tiles nearest
/// each corner of the maze, so patrol routes actually reach them.

use rand::rngs::StdRng;

use crate::config::GameConfig;
use crate::domain::entity::{Ghost, GhostColor, Player};
use crate::domain::maze::{LayoutError, Maze, TilePos};
use crate::domain::mode::ModeScheduler;
use crate::domain::physics::tile_origin;
use crate::domain::rules::Points;
use crate::sim::world::{Phase, WorldState};

pub const LAYOUT: [&str; 12] = [
    "###############",
    "#.............#",
    "#.###.###.###.#",
    "#o###.###.###o#",
    "#.............#",
    "#.###.###.###.#",
    "#...#.....#...#",
    "###.#.###.#.###",
    "#...#.#.#.#...#",
    "#.###.#.#.###.#",
    "#.............#",
    "###############",
];

pub const PLAYER_SPAWN: TilePos = TilePos::new(7, 9);
pub const GHOST_SPAWN: TilePos = TilePos::new(7, 6);

/// Ghosts in collision-check order, with their patrol corners.
pub const GHOSTS: [(GhostColor, TilePos); 4] = [
    (GhostColor::Red, TilePos::new(13, 1)),
    (GhostColor::Pink, TilePos::new(1, 1)),
    (GhostColor::Cyan, TilePos::new(13, 10)),
    (GhostColor::White, TilePos::new(1, 10)),
];

/// Build a fresh session on the built-in level.
pub fn build_world(config: &GameConfig, rng: StdRng) -> Result<WorldState, LayoutError> {
    build_world_from(&LAYOUT, PLAYER_SPAWN, GHOST_SPAWN, &GHOSTS, config, rng)
}

/// Build a session from an arbitrary layout. Spawns must sit on open tiles.
pub fn build_world_from(
    rows: &[&str],
    player_spawn: TilePos,
    ghost_spawn: TilePos,
    roster: &[(GhostColor, TilePos)],
    config: &GameConfig,
    rng: StdRng,
) -> Result<WorldState, LayoutError> {
    let maze = Maze::parse(rows)?;
    for spawn in [player_spawn, ghost_spawn] {
        if !maze.is_open(spawn) {
            return Err(LayoutError::SpawnInWall { col: spawn.col, row: spawn.row });
        }
    }

    let speed = config.speed.clone();
    let player = Player::new(tile_origin(player_spawn), speed.player_speed, config.lives);
    let ghosts = roster
        .iter()
        .map(|&(color, home)| Ghost::new(color, tile_origin(ghost_spawn), home, speed.ghost_speed))
        .collect();

    Ok(WorldState {
        maze,
        player,
        ghosts,
        mode: ModeScheduler::new(speed.patrol_ticks, speed.pursuit_ticks),
        phase: Phase::Playing,
        speed,
        scoring: Points::from(&config.scoring),
        rng,
        tick: 0,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entity::Direction;
    use crate::domain::tile::Pickup;
    use rand::SeedableRng;

    fn rng() -> StdRng {
        StdRng::seed_from_u64(7)
    }

    #[test]
    fn builtin_level_loads_with_four_ghosts() {
        let world = build_world(&GameConfig::default(), rng()).expect("built-in level is valid");
        assert_eq!(world.maze.width(), 15);
        assert_eq!(world.maze.height(), 12);
        assert_eq!(world.ghosts.len(), 4);
        assert_eq!(world.player.lives, 3);
        assert_eq!(world.player.actor.tile(), PLAYER_SPAWN);
        assert_eq!(world.player.actor.dir, Direction::None);
        assert!(world.ghosts.iter().all(|g| g.actor.tile() == GHOST_SPAWN));
        assert_eq!(world.phase, Phase::Playing);
    }

    #[test]
    fn builtin_level_has_two_power_pellets() {
        let world = build_world(&GameConfig::default(), rng()).expect("built-in level is valid");
        assert_eq!(world.maze.pickup_tiles(Pickup::Power), vec![TilePos::new(1, 3), TilePos::new(13, 3)]);
        assert_eq!(world.maze.pickup_at(PLAYER_SPAWN), Pickup::Pellet);
    }

    #[test]
    fn home_corners_are_open() {
        let maze = Maze::parse(&LAYOUT).expect("built-in level is valid");
        for (_, home) in GHOSTS {
            assert!(maze.is_open(home), "{home:?} is a wall");
        }
    }

    #[test]
    fn spawn_in_wall_is_rejected() {
        let err = build_world_from(
            &["###", "# #", "###"],
            TilePos::new(0, 0),
            TilePos::new(1, 1),
            &[],
            &GameConfig::default(),
            rng(),
        )
        .unwrap_err();
        assert_eq!(err, LayoutError::SpawnInWall { col: 0, row: 0 });
    }
}
