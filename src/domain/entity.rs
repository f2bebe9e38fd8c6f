/// Entities: the shared movable actor, the player and the ghosts.
///
/// Player and ghosts both own an `Actor` by composition; what differs is
/// which controller drives them (`rules` for the player, `ai` for ghosts).

use super::maze::TilePos;
use super::physics::{self, PixelPos};

/// Movement direction. `None` is the zero vector.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
    #[default]
    None,
}

impl Direction {
    /// Neighbor expansion order used everywhere a fixed order matters.
    pub const ALL: [Direction; 4] = [
        Direction::Left,
        Direction::Right,
        Direction::Up,
        Direction::Down,
    ];

    pub fn delta(self) -> (i32, i32) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
            Direction::None => (0, 0),
        }
    }

    pub fn from_delta(dx: i32, dy: i32) -> Self {
        match (dx.signum(), dy.signum()) {
            (0, -1) => Direction::Up,
            (0, 1) => Direction::Down,
            (-1, 0) => Direction::Left,
            (1, 0) => Direction::Right,
            _ => Direction::None,
        }
    }

    pub fn reverse(self) -> Self {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
            Direction::None => Direction::None,
        }
    }
}

/// Grid-aligned movable actor. Position is in integer pixels so the
/// tile-centered test is exact.
#[derive(Clone, Debug)]
pub struct Actor {
    pub pos: PixelPos,
    pub dir: Direction,
    pub speed: i32,
}

impl Actor {
    pub fn new(pos: PixelPos, speed: i32) -> Self {
        Actor { pos, dir: Direction::None, speed }
    }

    /// Unconditional step of `dir * speed`. Callers check legality first.
    pub fn advance(&mut self) {
        self.pos = self.projected(self.dir);
    }

    /// Where one step in `dir` would land.
    pub fn projected(&self, dir: Direction) -> PixelPos {
        let (dx, dy) = dir.delta();
        PixelPos::new(self.pos.x + dx * self.speed, self.pos.y + dy * self.speed)
    }

    pub fn tile(&self) -> TilePos {
        physics::tile_of(self.pos)
    }

    pub fn is_tile_centered(&self) -> bool {
        physics::is_tile_aligned(self.pos)
    }
}

#[derive(Clone, Debug)]
pub struct Player {
    pub actor: Actor,
    pub queued: Direction,
    pub lives: u32,
    pub score: u32,
    pub spawn: PixelPos,
}

impl Player {
    pub fn new(spawn: PixelPos, speed: i32, lives: u32) -> Self {
        Player {
            actor: Actor::new(spawn, speed),
            queued: Direction::None,
            lives,
            score: 0,
            spawn,
        }
    }

    /// Add points; the score pins at `u32::MAX` rather than wrapping.
    pub fn award(&mut self, points: u32) {
        self.score = self.score.saturating_add(points);
    }

    /// Back to the spawn point. Direction and queued turn are kept.
    pub fn respawn(&mut self) {
        self.actor.pos = self.spawn;
    }
}

/// Identity of a ghost, used by the renderer for its color.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum GhostColor {
    Red,
    Pink,
    Cyan,
    White,
}

/// Global alternation between patrol (home corners) and pursuit (player).
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum GlobalPhase {
    #[default]
    Patrol,
    Pursuit,
}

/// What a single ghost is doing right now.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum Behavior {
    #[default]
    Patrol,
    Pursuit,
    Frightened,
}

impl From<GlobalPhase> for Behavior {
    fn from(phase: GlobalPhase) -> Self {
        match phase {
            GlobalPhase::Patrol => Behavior::Patrol,
            GlobalPhase::Pursuit => Behavior::Pursuit,
        }
    }
}

#[derive(Clone, Debug)]
pub struct Ghost {
    pub color: GhostColor,
    pub actor: Actor,
    pub home: TilePos,
    pub behavior: Behavior,
    pub fright_ticks: u32,
    pub origin: PixelPos,
}

impl Ghost {
    pub fn new(color: GhostColor, origin: PixelPos, home: TilePos, speed: i32) -> Self {
        Ghost {
            color,
            actor: Actor::new(origin, speed),
            home,
            behavior: Behavior::Patrol,
            fright_ticks: 0,
            origin,
        }
    }

    pub fn is_frightened(&self) -> bool {
        self.fright_ticks > 0
    }

    /// Enter fright for `duration` ticks and turn around on the spot,
    /// whether or not the ghost is tile-centered.
    pub fn frighten(&mut self, duration: u32) {
        self.fright_ticks = duration;
        if duration > 0 {
            self.behavior = Behavior::Frightened;
        }
        self.actor.dir = self.actor.dir.reverse();
    }

    /// Back to spawn, standing still, patrolling, not frightened.
    pub fn reset(&mut self) {
        self.actor.pos = self.origin;
        self.actor.dir = Direction::None;
        self.behavior = Behavior::Patrol;
        self.fright_ticks = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::physics::{PixelPos, TILE_SIZE};

    #[test]
    fn reverse_is_an_involution() {
        for d in Direction::ALL {
            assert_ne!(d.reverse(), d);
            assert_eq!(d.reverse().reverse(), d);
        }
        assert_eq!(Direction::None.reverse(), Direction::None);
    }

    #[test]
    fn delta_round_trips_through_from_delta() {
        for d in Direction::ALL {
            let (dx, dy) = d.delta();
            assert_eq!(Direction::from_delta(dx, dy), d);
        }
        assert_eq!(Direction::from_delta(0, 0), Direction::None);
    }

    #[test]
    fn advance_moves_by_speed_along_direction() {
        let mut a = Actor::new(PixelPos::new(64, 64), 2);
        a.dir = Direction::Left;
        a.advance();
        assert_eq!(a.pos, PixelPos::new(62, 64));
        a.dir = Direction::Down;
        a.advance();
        assert_eq!(a.pos, PixelPos::new(62, 66));
        a.dir = Direction::None;
        a.advance();
        assert_eq!(a.pos, PixelPos::new(62, 66));
    }

    #[test]
    fn tile_and_centering_follow_pixel_position() {
        let mut a = Actor::new(PixelPos::new(2 * TILE_SIZE, 3 * TILE_SIZE), 2);
        assert!(a.is_tile_centered());
        assert_eq!(a.tile(), TilePos::new(2, 3));
        a.dir = Direction::Up;
        a.advance();
        assert!(!a.is_tile_centered());
        assert_eq!(a.tile(), TilePos::new(2, 2));
    }

    #[test]
    fn frighten_reverses_and_reset_restores_origin() {
        let origin = PixelPos::new(7 * TILE_SIZE, 6 * TILE_SIZE);
        let mut g = Ghost::new(GhostColor::Red, origin, TilePos::new(13, 1), 2);
        g.actor.dir = Direction::Right;
        g.actor.advance();

        g.frighten(420);
        assert!(g.is_frightened());
        assert_eq!(g.behavior, Behavior::Frightened);
        assert_eq!(g.actor.dir, Direction::Left);

        g.reset();
        assert_eq!(g.actor.pos, origin);
        assert_eq!(g.actor.dir, Direction::None);
        assert_eq!(g.behavior, Behavior::Patrol);
        assert!(!g.is_frightened());
    }

    #[test]
    fn award_saturates_instead_of_wrapping() {
        let mut p = Player::new(PixelPos::new(0, 0), 2, 3);
        p.award(u32::MAX - 5);
        p.award(200);
        assert_eq!(p.score, u32::MAX);
    }

    #[test]
    fn player_respawn_keeps_score_and_heading() {
        let spawn = PixelPos::new(7 * TILE_SIZE, 9 * TILE_SIZE);
        let mut p = Player::new(spawn, 2, 3);
        p.actor.dir = Direction::Up;
        p.actor.advance();
        p.score = 120;
        p.respawn();
        assert_eq!(p.actor.pos, spawn);
        assert_eq!(p.actor.dir, Direction::Up);
        assert_eq!(p.score, 120);
    }
}
