/// WorldState: the complete state of a running session.
///
/// Everything the simulation mutates lives here and is touched only by
/// `step()`, in a fixed order, once per tick. The random source is owned
/// by the session too, so a seed plus an input sequence replays exactly.

use rand::rngs::StdRng;

use crate::config::SpeedConfig;
use crate::domain::entity::{Ghost, Player};
use crate::domain::maze::Maze;
use crate::domain::mode::ModeScheduler;
use crate::domain::rules::Points;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Phase {
    Playing,
    Won,
    GameOver,
}

impl Phase {
    pub fn is_terminal(self) -> bool {
        self != Phase::Playing
    }
}

#[derive(Clone, Debug)]
pub struct WorldState {
    pub maze: Maze,
    pub player: Player,
    /// Collision checks walk this list in order.
    pub ghosts: Vec<Ghost>,
    pub mode: ModeScheduler,
    pub phase: Phase,

    // Config (from config.toml)
    pub speed: SpeedConfig,
    pub scoring: Points,

    pub rng: StdRng,
    pub tick: u64,
}

impl WorldState {
    /// Player and every ghost back to their spawn points.
    pub fn reset_positions(&mut self) {
        self.player.respawn();
        for g in &mut self.ghosts {
            g.reset();
        }
    }
}
