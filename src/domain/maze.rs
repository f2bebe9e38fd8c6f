/// Maze model: the static wall grid plus the mutable pickup layer.
///
/// The wall grid never changes after parsing. Pickups are only ever
/// removed (via `consume`), never added back, so `remaining_count` is
/// non-increasing over a session.

use thiserror::Error;

use super::tile::{Cell, Pickup};

/// Integer grid coordinate. May lie outside the maze; every query treats
/// out-of-bounds coordinates as wall.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default)]
pub struct TilePos {
    pub col: i32,
    pub row: i32,
}

impl TilePos {
    pub const fn new(col: i32, row: i32) -> Self {
        TilePos { col, row }
    }

    pub fn offset(self, dx: i32, dy: i32) -> Self {
        TilePos { col: self.col + dx, row: self.row + dy }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum LayoutError {
    #[error("layout has no rows")]
    Empty,
    #[error("row {row} has {found} columns, expected {expected}")]
    Ragged { row: usize, expected: usize, found: usize },
    #[error("spawn tile ({col},{row}) is not an open cell")]
    SpawnInWall { col: i32, row: i32 },
}

#[derive(Clone, Debug)]
pub struct Maze {
    cells: Vec<Vec<Cell>>,
    pickups: Vec<Vec<Pickup>>,
    width: usize,
    height: usize,
    remaining: usize,
}

impl Maze {
    /// Build a maze from layout rows. Every row must have the same width.
    pub fn parse<S: AsRef<str>>(rows: &[S]) -> Result<Self, LayoutError> {
        let first = rows.first().ok_or(LayoutError::Empty)?;
        let width = first.as_ref().chars().count();
        if width == 0 { return Err(LayoutError::Empty); }

        let height = rows.len();
        let mut cells = vec![vec![Cell::Open; width]; height];
        let mut pickups = vec![vec![Pickup::None; width]; height];
        let mut remaining = 0;

        for (y, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            let found = row.chars().count();
            if found != width {
                return Err(LayoutError::Ragged { row: y, expected: width, found });
            }
            for (x, ch) in row.chars().enumerate() {
                let cell = Cell::from_char(ch);
                cells[y][x] = cell;
                if !cell.is_wall() {
                    let pickup = Pickup::from_char(ch);
                    if pickup.is_some() { remaining += 1; }
                    pickups[y][x] = pickup;
                }
            }
        }

        Ok(Maze { cells, pickups, width, height, remaining })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn in_bounds(&self, tile: TilePos) -> bool {
        tile.col >= 0 && tile.row >= 0
            && (tile.col as usize) < self.width
            && (tile.row as usize) < self.height
    }

    /// Out of bounds counts as wall.
    pub fn is_wall(&self, col: i32, row: i32) -> bool {
        let tile = TilePos::new(col, row);
        if !self.in_bounds(tile) { return true; }
        self.cells[row as usize][col as usize].is_wall()
    }

    pub fn is_open(&self, tile: TilePos) -> bool {
        !self.is_wall(tile.col, tile.row)
    }

    pub fn pickup_at(&self, tile: TilePos) -> Pickup {
        if !self.in_bounds(tile) { return Pickup::None; }
        self.pickups[tile.row as usize][tile.col as usize]
    }

    pub fn has_pickup(&self, tile: TilePos) -> bool {
        self.pickup_at(tile) == Pickup::Pellet
    }

    pub fn has_power(&self, tile: TilePos) -> bool {
        self.pickup_at(tile) == Pickup::Power
    }

    /// Remove whatever pickup lies on `tile` and report its kind.
    /// A second call on the same tile reports `Pickup::None`.
    pub fn consume(&mut self, tile: TilePos) -> Pickup {
        if !self.in_bounds(tile) { return Pickup::None; }
        let slot = &mut self.pickups[tile.row as usize][tile.col as usize];
        let taken = std::mem::take(slot);
        if taken.is_some() {
            self.remaining -= 1;
        }
        taken
    }

    /// Pellets plus power pellets still on the board.
    pub fn remaining_count(&self) -> usize {
        self.remaining
    }

    pub fn is_cleared(&self) -> bool {
        self.remaining == 0
    }

    pub fn wall_tiles(&self) -> Vec<TilePos> {
        self.tiles_where(|cell, _| cell.is_wall())
    }

    pub fn pickup_tiles(&self, kind: Pickup) -> Vec<TilePos> {
        self.tiles_where(|_, pickup| pickup == kind)
    }

    fn tiles_where(&self, pred: impl Fn(Cell, Pickup) -> bool) -> Vec<TilePos> {
        let mut out = Vec::new();
        for y in 0..self.height {
            for x in 0..self.width {
                if pred(self.cells[y][x], self.pickups[y][x]) {
                    out.push(TilePos::new(x as i32, y as i32));
                }
            }
        }
        out
    }
}

// ══════════════════════════════════════════════════════════════
// Unit tests
// ══════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;

    fn maze_from(rows: &[&str]) -> Maze {
        Maze::parse(rows).expect("fixture layout is valid")
    }

    #[test]
    fn parse_counts_both_pickup_kinds() {
        let m = maze_from(&[
            "#####",
            "#.o #",
            "#####",
        ]);
        assert_eq!(m.width(), 5);
        assert_eq!(m.height(), 3);
        assert_eq!(m.remaining_count(), 2);
        assert!(m.has_pickup(TilePos::new(1, 1)));
        assert!(m.has_power(TilePos::new(2, 1)));
        assert!(!m.has_pickup(TilePos::new(3, 1)));
    }

    #[test]
    fn out_of_bounds_is_wall() {
        let m = maze_from(&["   "]);
        assert!(!m.is_wall(0, 0));
        assert!(m.is_wall(-1, 0));
        assert!(m.is_wall(0, -1));
        assert!(m.is_wall(3, 0));
        assert!(m.is_wall(0, 1));
    }

    #[test]
    fn consume_is_idempotent() {
        let mut m = maze_from(&["#.o#"]);
        let t = TilePos::new(1, 0);
        assert_eq!(m.consume(t), Pickup::Pellet);
        assert_eq!(m.consume(t), Pickup::None);
        assert_eq!(m.remaining_count(), 1);

        let p = TilePos::new(2, 0);
        assert_eq!(m.consume(p), Pickup::Power);
        assert_eq!(m.consume(p), Pickup::None);
        assert!(m.is_cleared());
    }

    #[test]
    fn consume_outside_maze_removes_nothing() {
        let mut m = maze_from(&["."]);
        assert_eq!(m.consume(TilePos::new(4, 4)), Pickup::None);
        assert_eq!(m.remaining_count(), 1);
    }

    #[test]
    fn pickup_sets_are_disjoint_and_open() {
        let m = maze_from(&[
            "#.o.#",
            "#o.o#",
        ]);
        let pellets = m.pickup_tiles(Pickup::Pellet);
        let powers = m.pickup_tiles(Pickup::Power);
        assert_eq!(pellets.len(), 3);
        assert_eq!(powers.len(), 3);
        for t in pellets.iter().chain(powers.iter()) {
            assert!(m.is_open(*t));
        }
        assert!(pellets.iter().all(|t| !powers.contains(t)));
    }

    #[test]
    fn wall_tiles_lists_every_wall() {
        let m = maze_from(&["#.#", "# #"]);
        assert_eq!(
            m.wall_tiles(),
            vec![TilePos::new(0, 0), TilePos::new(2, 0), TilePos::new(0, 1), TilePos::new(2, 1)],
        );
    }

    #[test]
    fn ragged_and_empty_layouts_are_rejected() {
        let empty: [&str; 0] = [];
        assert_eq!(Maze::parse(&empty).unwrap_err(), LayoutError::Empty);
        assert_eq!(
            Maze::parse(&["###", "##"]).unwrap_err(),
            LayoutError::Ragged { row: 1, expected: 3, found: 2 },
        );
    }
}
