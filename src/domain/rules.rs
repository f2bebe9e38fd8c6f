/// Player movement and pickup rules.
///
/// ## Per-tick truth table
///
/// ┌────────────────────────────────────────┬──────────────────────────┐
/// │ Condition                               │ Effect                   │
/// ├────────────────────────────────────────┼──────────────────────────┤
/// │ queued ≠ dir, queued step is clear      │ dir := queued            │
/// │ dir step is clear                       │ advance one step         │
/// │ dir step hits a wall                    │ stay put, keep dir, stop │
/// │ moved onto a pellet                     │ +pellet pts, remove it   │
/// │ moved onto a power pellet               │ +power pts, remove it,   │
/// │                                         │ fright triggered         │
/// └────────────────────────────────────────┴──────────────────────────┘
///
/// "Step is clear" means the tile-sized box at the projected position
/// overlaps no wall. A zero direction is always clear. Illegal moves are
/// silent no-ops, never errors.

use super::entity::{Actor, Direction, Player};
use super::maze::{Maze, TilePos};
use super::physics;
use super::tile::Pickup;

/// Point values for everything the player can eat.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Points {
    pub pellet: u32,
    pub power: u32,
    pub ghost: u32,
}

impl Default for Points {
    fn default() -> Self {
        Points { pellet: 10, power: 50, ghost: 200 }
    }
}

/// What happened to the player this tick.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct PlayerOutcome {
    pub moved: bool,
    pub tile: TilePos,
    pub consumed: Pickup,
}

impl PlayerOutcome {
    /// The only path that starts global fright mode.
    pub fn fright_triggered(&self) -> bool {
        self.consumed == Pickup::Power
    }
}

/// Would one step in `dir` keep the actor's box clear of every wall?
pub fn can_move(maze: &Maze, actor: &Actor, dir: Direction) -> bool {
    !physics::box_hits_wall(maze, actor.projected(dir))
}

/// Record the player's desired next turn. `None` is not a turn.
pub fn queue_turn(player: &mut Player, dir: Direction) {
    if dir != Direction::None {
        player.queued = dir;
    }
}

/// Advance the player one tick.
pub fn update_player(player: &mut Player, maze: &mut Maze, points: &Points) -> PlayerOutcome {
    if player.queued != player.actor.dir && can_move(maze, &player.actor, player.queued) {
        player.actor.dir = player.queued;
    }

    if !can_move(maze, &player.actor, player.actor.dir) {
        return PlayerOutcome { moved: false, tile: player.actor.tile(), consumed: Pickup::None };
    }

    player.actor.advance();
    let tile = player.actor.tile();
    let consumed = if maze.has_pickup(tile) || maze.has_power(tile) {
        maze.consume(tile)
    } else {
        Pickup::None
    };
    match consumed {
        Pickup::Pellet => player.award(points.pellet),
        Pickup::Power => player.award(points.power),
        Pickup::None => {}
    }

    PlayerOutcome { moved: player.actor.dir != Direction::None, tile, consumed }
}

// ══════════════════════════════════════════════════════════════
// Unit tests
// ══════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::physics::{tile_origin, PixelPos, TILE_SIZE};

    fn maze_from(rows: &[&str]) -> Maze {
        Maze::parse(rows).expect("fixture layout is valid")
    }

    fn player_at(col: i32, row: i32) -> Player {
        Player::new(tile_origin(TilePos::new(col, row)), 2, 3)
    }

    fn points() -> Points {
        Points::default()
    }

    // ── turning ──

    #[test]
    fn queued_turn_commits_when_clear() {
        let mut m = maze_from(&[
            "#####",
            "#   #",
            "#####",
        ]);
        let mut p = player_at(2, 1);
        queue_turn(&mut p, Direction::Left);
        let out = update_player(&mut p, &mut m, &points());
        assert!(out.moved);
        assert_eq!(p.actor.dir, Direction::Left);
        assert_eq!(p.actor.pos, PixelPos::new(2 * TILE_SIZE - 2, TILE_SIZE));
    }

    #[test]
    fn blocked_turn_stays_queued_until_legal() {
        let mut m = maze_from(&[
            "#####",
            "### #",
            "#   #",
            "#####",
        ]);
        // Heading right along row 2, wanting to go up; only col 3 opens upward.
        let mut p = player_at(1, 2);
        p.actor.dir = Direction::Right;
        queue_turn(&mut p, Direction::Up);

        let mut turned_at = None;
        for _ in 0..64 {
            update_player(&mut p, &mut m, &points());
            if p.actor.dir == Direction::Up {
                turned_at = Some(p.actor.pos);
                break;
            }
            assert_eq!(p.queued, Direction::Up);
        }
        // Turn commits on the step that leaves the row-2 centerline at col 3.
        assert_eq!(turned_at, Some(PixelPos::new(3 * TILE_SIZE, 2 * TILE_SIZE - 2)));
    }

    #[test]
    fn queue_ignores_none() {
        let mut p = player_at(1, 1);
        queue_turn(&mut p, Direction::Down);
        queue_turn(&mut p, Direction::None);
        assert_eq!(p.queued, Direction::Down);
    }

    // ── blocking ──

    #[test]
    fn wall_ahead_stops_player_but_keeps_direction() {
        let mut m = maze_from(&[
            "###",
            "# #",
            "###",
        ]);
        let mut p = player_at(1, 1);
        p.actor.dir = Direction::Right;
        p.queued = Direction::Right;
        let out = update_player(&mut p, &mut m, &points());
        assert!(!out.moved);
        assert_eq!(p.actor.pos, tile_origin(TilePos::new(1, 1)));
        assert_eq!(p.actor.dir, Direction::Right);
    }

    #[test]
    fn player_never_overlaps_walls() {
        let mut m = maze_from(&[
            "#######",
            "#.....#",
            "#.###.#",
            "#.....#",
            "#######",
        ]);
        let mut p = player_at(1, 1);
        let script = [Direction::Right, Direction::Down, Direction::Left, Direction::Up];
        for tick in 0..400 {
            queue_turn(&mut p, script[(tick / 37) % script.len()]);
            update_player(&mut p, &mut m, &points());
            assert!(!physics::box_hits_wall(&m, p.actor.pos), "overlap at tick {tick}");
        }
    }

    // ── pickups ──

    #[test]
    fn entering_pellet_tile_scores_ten_and_removes_it() {
        let mut m = maze_from(&[
            "#####",
            "#  .#",
            "#####",
        ]);
        let mut p = player_at(2, 1);
        p.actor.dir = Direction::Right;
        p.queued = Direction::Right;
        // Still inside col 2 until the box corner reaches x = 96.
        for _ in 0..TILE_SIZE / 2 - 1 {
            let out = update_player(&mut p, &mut m, &points());
            assert_eq!(out.consumed, Pickup::None);
        }
        let out = update_player(&mut p, &mut m, &points());
        assert_eq!(out.consumed, Pickup::Pellet);
        assert_eq!(out.tile, TilePos::new(3, 1));
        assert_eq!(p.score, 10);
        assert!(!m.has_pickup(TilePos::new(3, 1)));
    }

    #[test]
    fn power_pellet_scores_fifty_and_triggers_fright() {
        let mut m = maze_from(&[
            "####",
            "# o#",
            "####",
        ]);
        let mut p = player_at(1, 1);
        p.actor.pos = PixelPos::new(2 * TILE_SIZE - 2, TILE_SIZE);
        p.actor.dir = Direction::Right;
        p.queued = Direction::Right;
        let out = update_player(&mut p, &mut m, &points());
        assert!(out.fright_triggered());
        assert_eq!(p.score, 50);
        assert!(!m.has_power(TilePos::new(2, 1)));
        assert_eq!(m.remaining_count(), 0);
    }

    #[test]
    fn huge_pellet_value_pins_score_at_max() {
        let mut m = maze_from(&[
            "#####",
            "# ..#",
            "#####",
        ]);
        let mut p = player_at(1, 1);
        p.actor.dir = Direction::Right;
        p.queued = Direction::Right;
        let rich = Points { pellet: u32::MAX, ..Points::default() };
        let mut eaten = 0;
        for _ in 0..TILE_SIZE {
            if update_player(&mut p, &mut m, &rich).consumed == Pickup::Pellet {
                eaten += 1;
            }
        }
        assert_eq!(eaten, 2);
        assert_eq!(p.score, u32::MAX);
        assert!(m.is_cleared());
    }

    #[test]
    fn standing_still_eats_spawn_pellet_once() {
        let mut m = maze_from(&[
            "###",
            "#.#",
            "###",
        ]);
        let mut p = player_at(1, 1);
        let first = update_player(&mut p, &mut m, &points());
        let second = update_player(&mut p, &mut m, &points());
        assert!(!first.moved);
        assert_eq!(first.consumed, Pickup::Pellet);
        assert_eq!(second.consumed, Pickup::None);
        assert_eq!(p.score, 10);
    }
}
