/// The step function: advances the world by one tick.
///
/// Processing order (fixed; it decides who wins a same-tick contact):
///   1. Queue the tick's input direction
///   2. Mode scheduler countdown (may flip patrol/pursuit)
///   3. Player movement + pickup
///   4. Fright trigger (every ghost, if a power pellet was eaten)
///   5. Ghost movement, against the post-flip global phase
///   6. Player/ghost contact
///   7. Win check
///
/// A terminal phase makes `step` a no-op.

use crate::domain::ai;
use crate::domain::entity::Direction;
use crate::domain::physics;
use crate::domain::rules;
use crate::domain::tile::Pickup;
use super::event::GameEvent;
use super::world::{Phase, WorldState};

// ══════════════════════════════════════════════════════════════
// Main entry point
// ══════════════════════════════════════════════════════════════

pub fn step(world: &mut WorldState, input: Option<Direction>) -> Vec<GameEvent> {
    if world.phase.is_terminal() { return vec![]; }

    let mut events: Vec<GameEvent> = Vec::new();
    world.tick += 1;

    if let Some(dir) = input {
        rules::queue_turn(&mut world.player, dir);
    }

    resolve_mode(world, &mut events);
    resolve_player(world, &mut events);
    resolve_ghosts(world);
    if resolve_collisions(world, &mut events) { return events; }
    resolve_win(world, &mut events);

    events
}

// ══════════════════════════════════════════════════════════════
// Mode
// ══════════════════════════════════════════════════════════════

fn resolve_mode(world: &mut WorldState, events: &mut Vec<GameEvent>) {
    if let Some(phase) = world.mode.tick() {
        events.push(GameEvent::PhaseChanged { phase });
    }
}

// ══════════════════════════════════════════════════════════════
// Player (+ fright trigger)
// ══════════════════════════════════════════════════════════════

fn resolve_player(world: &mut WorldState, events: &mut Vec<GameEvent>) {
    let outcome = rules::update_player(&mut world.player, &mut world.maze, &world.scoring);
    let (col, row) = (outcome.tile.col, outcome.tile.row);
    match outcome.consumed {
        Pickup::Pellet => events.push(GameEvent::PelletEaten { col, row }),
        Pickup::Power => events.push(GameEvent::PowerPelletEaten { col, row }),
        Pickup::None => {}
    }

    if outcome.fright_triggered() {
        let duration = world.speed.fright_ticks;
        for g in &mut world.ghosts {
            g.frighten(duration);
        }
        events.push(GameEvent::GhostsFrightened);
    }
}

// ══════════════════════════════════════════════════════════════
// Ghosts
// ══════════════════════════════════════════════════════════════

fn resolve_ghosts(world: &mut WorldState) {
    let phase = world.mode.phase();
    let player_tile = world.player.actor.tile();
    for g in &mut world.ghosts {
        ai::update_ghost(g, &world.maze, phase, player_tile, &mut world.rng);
    }
}

// ══════════════════════════════════════════════════════════════
// Contact
// ══════════════════════════════════════════════════════════════

/// Walk the ghosts in list order. A frightened ghost is eaten and the
/// walk goes on; any other contact costs a life and ends the walk.
/// Returns true when the session just ended.
fn resolve_collisions(world: &mut WorldState, events: &mut Vec<GameEvent>) -> bool {
    let player_pos = world.player.actor.pos;

    for i in 0..world.ghosts.len() {
        if !physics::actors_overlap(player_pos, world.ghosts[i].actor.pos) { continue; }

        if world.ghosts[i].is_frightened() {
            world.ghosts[i].reset();
            world.player.award(world.scoring.ghost);
            events.push(GameEvent::GhostEaten { ghost: world.ghosts[i].color });
            continue;
        }

        world.player.lives = world.player.lives.saturating_sub(1);
        events.push(GameEvent::PlayerCaught { lives_left: world.player.lives });
        if world.player.lives == 0 {
            world.phase = Phase::GameOver;
            events.push(GameEvent::GameOver);
            return true;
        }
        world.reset_positions();
        break;
    }

    false
}

// ══════════════════════════════════════════════════════════════
// Win check
// ══════════════════════════════════════════════════════════════

fn resolve_win(world: &mut WorldState, events: &mut Vec<GameEvent>) {
    if world.maze.is_cleared() {
        world.phase = Phase::Won;
        events.push(GameEvent::MazeCleared);
    }
}

// ══════════════════════════════════════════════════════════════
// Unit tests
// ══════════════════════════════════════════════════════════════
