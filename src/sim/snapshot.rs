/// Immutable per-tick view of the session for the renderer.
///
/// The renderer never touches `WorldState`; it draws from this.

use crate::domain::entity::{GhostColor, GlobalPhase};
use crate::domain::maze::TilePos;
use crate::domain::physics::PixelPos;
use crate::domain::tile::Pickup;
use super::world::{Phase, WorldState};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GhostView {
    pub pos: PixelPos,
    pub color: GhostColor,
    pub frightened: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Snapshot {
    pub width: usize,
    pub height: usize,
    pub walls: Vec<TilePos>,
    pub pellets: Vec<TilePos>,
    pub powers: Vec<TilePos>,
    pub player_pos: PixelPos,
    pub score: u32,
    pub lives: u32,
    pub ghosts: Vec<GhostView>,
    pub phase: Phase,
    pub global_phase: GlobalPhase,
    /// Whole seconds until the next patrol/pursuit flip, rounded up.
    pub phase_secs_left: u32,
}

pub fn capture_snapshot(world: &WorldState) -> Snapshot {
    Snapshot {
        width: world.maze.width(),
        height: world.maze.height(),
        walls: world.maze.wall_tiles(),
        pellets: world.maze.pickup_tiles(Pickup::Pellet),
        powers: world.maze.pickup_tiles(Pickup::Power),
        player_pos: world.player.actor.pos,
        score: world.player.score,
        lives: world.player.lives,
        ghosts: world
            .ghosts
            .iter()
            .map(|g| GhostView { pos: g.actor.pos, color: g.color, frightened: g.is_frightened() })
            .collect(),
        phase: world.phase,
        global_phase: world.mode.phase(),
        phase_secs_left: world.mode.remaining().div_ceil(world.speed.tick_rate_hz.max(1)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::sim::level;
    use crate::sim::step::step;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn snapshot_mirrors_the_world() {
        let mut w = level::build_world(&GameConfig::default(), StdRng::seed_from_u64(3))
            .expect("built-in level is valid");
        let before = capture_snapshot(&w);
        assert_eq!((before.width, before.height), (15, 12));
        assert_eq!(before.powers.len(), 2);
        assert_eq!(before.ghosts.len(), 4);
        assert!(before.ghosts.iter().all(|g| !g.frightened));
        assert_eq!(before.global_phase, GlobalPhase::Patrol);
        assert_eq!(before.phase_secs_left, 7);

        step(&mut w, None);
        let after = capture_snapshot(&w);
        assert_eq!(after.pellets.len(), before.pellets.len() - 1);
        assert!(!after.pellets.contains(&level::PLAYER_SPAWN));
        assert_eq!(after.score, 10);
        assert_eq!(after.walls, before.walls);
        // 419 ticks left still rounds up to a full 7 seconds.
        assert_eq!(after.phase_secs_left, 7);

        for _ in 0..60 {
            step(&mut w, None);
        }
        assert_eq!(capture_snapshot(&w).phase_secs_left, 6);
    }
}
