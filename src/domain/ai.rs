/// Ghost AI: behavior state machine plus BFS pathfinding.
///
/// Per ghost, per tick:
///   1. **Frightened** (`fright_ticks > 0`): count down; at a tile center
///      pick a random valid direction; always advance.
///   2. Otherwise adopt the global phase. At a tile center only, steer
///      toward the home corner (patrol) or the player's tile (pursuit)
///      along a shortest path; off-center ticks keep the current heading.
///
/// Ghosts never idle on a wall: every heading is chosen at a tile center
/// from open neighbors, and between centers they only move straight.
///
/// The BFS runs once per ghost per centered tick and is not cached; the
/// pursuit target moves every tick and the maze is small.

use std::collections::VecDeque;

use rand::seq::SliceRandom;
use rand::Rng;

use super::entity::{Behavior, Direction, Ghost, GlobalPhase};
use super::maze::{Maze, TilePos};

/// Result of a shortest-path query.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum PathStep {
    /// Start and target are the same tile.
    Arrived,
    /// First move along a shortest path.
    Toward(Direction),
    /// Target is a wall, outside the maze, or cut off.
    Unreachable,
}

// ── Shortest path ──

/// Breadth-first search over open cells (4-connected), expanding
/// neighbors in `Direction::ALL` order so ties break the same way every
/// time. Stops as soon as the target is dequeued.
pub fn shortest_path_step(maze: &Maze, start: TilePos, target: TilePos) -> PathStep {
    if start == target { return PathStep::Arrived; }
    if !maze.in_bounds(start) || !maze.is_open(target) { return PathStep::Unreachable; }

    let (w, h) = (maze.width(), maze.height());
    let mut came_from: Vec<Vec<Option<TilePos>>> = vec![vec![None; w]; h];
    came_from[start.row as usize][start.col as usize] = Some(start);

    let mut queue = VecDeque::with_capacity(w * h);
    queue.push_back(start);

    let mut found = false;
    while let Some(current) = queue.pop_front() {
        if current == target {
            found = true;
            break;
        }
        for dir in Direction::ALL {
            let (dx, dy) = dir.delta();
            let next = current.offset(dx, dy);
            if !maze.is_open(next) { continue; }
            let slot = &mut came_from[next.row as usize][next.col as usize];
            if slot.is_none() {
                *slot = Some(current);
                queue.push_back(next);
            }
        }
    }
    if !found { return PathStep::Unreachable; }

    // Walk back until the tile whose predecessor is the start.
    let mut step = target;
    while let Some(prev) = came_from[step.row as usize][step.col as usize] {
        if prev == start { break; }
        step = prev;
    }
    PathStep::Toward(Direction::from_delta(step.col - start.col, step.row - start.row))
}

// ── Valid directions ──

/// Open neighbors of `tile`, in `Direction::ALL` order. When more than
/// one exists, the exact reverse of `heading` is dropped.
pub fn valid_directions(maze: &Maze, tile: TilePos, heading: Direction) -> Vec<Direction> {
    let mut dirs: Vec<Direction> = Direction::ALL
        .into_iter()
        .filter(|d| {
            let (dx, dy) = d.delta();
            maze.is_open(tile.offset(dx, dy))
        })
        .collect();
    if dirs.len() > 1 {
        let back = heading.reverse();
        dirs.retain(|&d| d != back);
    }
    dirs
}

/// Uniform pick among `valid_directions`; `None` only when boxed in.
pub fn random_direction<R: Rng + ?Sized>(
    maze: &Maze,
    tile: TilePos,
    heading: Direction,
    rng: &mut R,
) -> Direction {
    valid_directions(maze, tile, heading)
        .choose(rng)
        .copied()
        .unwrap_or(Direction::None)
}

/// Direction toward `target`, falling back to a random valid direction
/// when the target cannot be reached.
pub fn next_step<R: Rng + ?Sized>(
    maze: &Maze,
    start: TilePos,
    target: TilePos,
    heading: Direction,
    rng: &mut R,
) -> Direction {
    match shortest_path_step(maze, start, target) {
        PathStep::Arrived => Direction::None,
        PathStep::Toward(dir) => dir,
        PathStep::Unreachable => random_direction(maze, start, heading, rng),
    }
}

// ── Per-tick update ──

/// Advance one ghost by one tick.
pub fn update_ghost<R: Rng + ?Sized>(
    ghost: &mut Ghost,
    maze: &Maze,
    phase: GlobalPhase,
    player_tile: TilePos,
    rng: &mut R,
) {
    let centered = ghost.actor.is_tile_centered();

    if ghost.fright_ticks > 0 {
        ghost.fright_ticks -= 1;
        if centered {
            ghost.actor.dir = random_direction(maze, ghost.actor.tile(), ghost.actor.dir, rng);
        }
        if ghost.fright_ticks == 0 {
            ghost.behavior = phase.into();
        }
        ghost.actor.advance();
        return;
    }

    ghost.behavior = phase.into();
    if centered {
        let target = match ghost.behavior {
            Behavior::Pursuit => player_tile,
            Behavior::Patrol | Behavior::Frightened => ghost.home,
        };
        ghost.actor.dir = next_step(maze, ghost.actor.tile(), target, ghost.actor.dir, rng);
    }
    ghost.actor.advance();
}

// ══════════════════════════════════════════════════════════════
// Unit tests
// ══════════════════════════════════════════════════════════════
