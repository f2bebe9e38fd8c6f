/// Pixel-space geometry: tile math and bounding-box collision.
///
/// Every actor occupies a tile-sized square whose top-left corner is its
/// pixel position. Positions are integers, so "tile-centered" (the
/// corner sits exactly on a tile origin) is an exact test with no drift.
///
/// Overlap is strict: boxes that only share an edge do not collide. This
/// lets an actor slide along a corridor flush against the walls.

use super::maze::{Maze, TilePos};

/// Side of one tile in pixels. Actor speeds must divide it evenly.
pub const TILE_SIZE: i32 = 32;

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default)]
pub struct PixelPos {
    pub x: i32,
    pub y: i32,
}

impl PixelPos {
    pub const fn new(x: i32, y: i32) -> Self {
        PixelPos { x, y }
    }
}

/// Axis-aligned box in pixels.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl Rect {
    /// Tile-sized box with its top-left corner at `pos`.
    pub fn tile_box(pos: PixelPos) -> Self {
        Rect { x: pos.x, y: pos.y, w: TILE_SIZE, h: TILE_SIZE }
    }

    pub fn of_tile(tile: TilePos) -> Self {
        Rect::tile_box(tile_origin(tile))
    }

    /// Strict overlap; touching edges do not count.
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.x < other.x + other.w
            && other.x < self.x + self.w
            && self.y < other.y + other.h
            && other.y < self.y + self.h
    }
}

/// Tile containing `pos` (floor division, correct for negatives too).
#[inline]
pub fn tile_of(pos: PixelPos) -> TilePos {
    TilePos::new(pos.x.div_euclid(TILE_SIZE), pos.y.div_euclid(TILE_SIZE))
}

/// Pixel origin (top-left corner) of a tile.
#[inline]
pub fn tile_origin(tile: TilePos) -> PixelPos {
    PixelPos::new(tile.col * TILE_SIZE, tile.row * TILE_SIZE)
}

/// Both axes sit on an exact multiple of the tile size.
#[inline]
pub fn is_tile_aligned(pos: PixelPos) -> bool {
    pos.x.rem_euclid(TILE_SIZE) == 0 && pos.y.rem_euclid(TILE_SIZE) == 0
}

/// Does a tile-sized box at `pos` overlap any wall cell?
///
/// Only the (at most four) tiles under the box can overlap it, so those
/// are the only walls tested. Out-of-bounds tiles count as wall.
pub fn box_hits_wall(maze: &Maze, pos: PixelPos) -> bool {
    let body = Rect::tile_box(pos);
    let first = tile_of(pos);
    let last = tile_of(PixelPos::new(pos.x + TILE_SIZE - 1, pos.y + TILE_SIZE - 1));
    for row in first.row..=last.row {
        for col in first.col..=last.col {
            if maze.is_wall(col, row) && body.overlaps(&Rect::of_tile(TilePos::new(col, row))) {
                return true;
            }
        }
    }
    false
}

/// Do two actors' boxes overlap?
pub fn actors_overlap(a: PixelPos, b: PixelPos) -> bool {
    Rect::tile_box(a).overlaps(&Rect::tile_box(b))
}

// ══════════════════════════════════════════════════════════════
// Unit tests
// ══════════════════════════════════════════════════════════════
