/// Events emitted during a simulation step.
/// The frontend consumes these for logging.

use crate::domain::entity::{GhostColor, GlobalPhase};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GameEvent {
    PelletEaten { col: i32, row: i32 },
    PowerPelletEaten { col: i32, row: i32 },
    GhostsFrightened,
    GhostEaten { ghost: GhostColor },
    PhaseChanged { phase: GlobalPhase },
    PlayerCaught { lives_left: u32 },
    GameOver,
    MazeCleared,
}
