/// Cell and pickup kinds.
/// Properties are queried via methods, not stored as flags,
/// so cell semantics are centralized here.

/// Static structure of one maze cell. Never changes after the level is built.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum Cell {
    #[default]
    Open,
    Wall,
}

impl Cell {
    /// Layout legend: `#` is a wall, everything else is open floor.
    pub fn from_char(ch: char) -> Self {
        match ch {
            '#' => Cell::Wall,
            _ => Cell::Open,
        }
    }

    pub fn is_wall(self) -> bool {
        matches!(self, Cell::Wall)
    }
}

/// What is lying on an open cell. One value per coordinate, so a cell
/// can never hold a pellet and a power pellet at the same time.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum Pickup {
    #[default]
    None,
    Pellet,
    Power,
}

impl Pickup {
    /// Layout legend: `.` is a pellet, `o` a power pellet.
    pub fn from_char(ch: char) -> Self {
        match ch {
            '.' => Pickup::Pellet,
            'o' => Pickup::Power,
            _ => Pickup::None,
        }
    }

    pub fn is_some(self) -> bool {
        !matches!(self, Pickup::None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn legend_maps_walls_and_pickups() {
        assert_eq!(Cell::from_char('#'), Cell::Wall);
        assert_eq!(Cell::from_char('.'), Cell::Open);
        assert_eq!(Cell::from_char('o'), Cell::Open);
        assert_eq!(Cell::from_char('x'), Cell::Open);
        assert_eq!(Pickup::from_char('.'), Pickup::Pellet);
        assert_eq!(Pickup::from_char('o'), Pickup::Power);
        assert_eq!(Pickup::from_char(' '), Pickup::None);
        assert_eq!(Pickup::from_char('#'), Pickup::None);
    }
}
