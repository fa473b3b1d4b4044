//! Compass and vertical directions.
//!
//! `Direction` covers all six sides of a room. `Wall` is the cardinal subset
//! used by every wall-geometry lookup, so a vertical direction can never reach
//! code that needs a wall position or a yaw.

use rand::Rng;

/// A side of a room: four walls plus ceiling and floor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    North,
    South,
    East,
    West,
    Up,
    Down,
}

impl Direction {
    pub const ALL: [Direction; 6] = [
        Direction::North,
        Direction::South,
        Direction::East,
        Direction::West,
        Direction::Up,
        Direction::Down,
    ];

    /// Slot of this direction in a [`DirectionFlags`] array.
    pub fn index(self) -> usize {
        match self {
            Direction::North => 0,
            Direction::South => 1,
            Direction::East => 2,
            Direction::West => 3,
            Direction::Up => 4,
            Direction::Down => 5,
        }
    }

    /// The direction pointing the other way.
    pub fn reverse(self) -> Self {
        match self {
            Direction::North => Direction::South,
            Direction::South => Direction::North,
            Direction::East => Direction::West,
            Direction::West => Direction::East,
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
        }
    }

    /// The wall this direction faces, `None` for Up/Down.
    pub fn wall(self) -> Option<Wall> {
        match self {
            Direction::North => Some(Wall::North),
            Direction::South => Some(Wall::South),
            Direction::East => Some(Wall::East),
            Direction::West => Some(Wall::West),
            Direction::Up | Direction::Down => None,
        }
    }

    pub fn is_vertical(self) -> bool {
        matches!(self, Direction::Up | Direction::Down)
    }
}

/// One of the four walls of a room.
///
/// North is toward smaller z, west toward smaller x.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Wall {
    North,
    South,
    East,
    West,
}

impl Wall {
    /// Walls in the order used for "first free wall" scans.
    pub const ALL: [Wall; 4] = [Wall::North, Wall::South, Wall::East, Wall::West];

    pub fn reverse(self) -> Self {
        match self {
            Wall::North => Wall::South,
            Wall::South => Wall::North,
            Wall::East => Wall::West,
            Wall::West => Wall::East,
        }
    }

    /// Yaw (degrees about the vertical axis) of an object facing this wall.
    pub fn yaw_degrees(self) -> f32 {
        match self {
            Wall::North => 270.0,
            Wall::South => 90.0,
            Wall::East => 180.0,
            Wall::West => 0.0,
        }
    }

    /// True for north/south walls, which run along the x axis.
    pub fn runs_along_x(self) -> bool {
        matches!(self, Wall::North | Wall::South)
    }

    /// Uniformly random wall. Consumes one draw from `rng`.
    pub fn random(rng: &mut impl Rng) -> Self {
        Wall::ALL[rng.gen_range(0..Wall::ALL.len())]
    }
}

impl From<Wall> for Direction {
    fn from(wall: Wall) -> Self {
        match wall {
            Wall::North => Direction::North,
            Wall::South => Direction::South,
            Wall::East => Direction::East,
            Wall::West => Direction::West,
        }
    }
}

/// Per-direction boolean flags, indexed by [`Direction::index`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DirectionFlags([bool; 6]);

impl DirectionFlags {
    pub fn is_set(&self, dir: Direction) -> bool {
        self.0[dir.index()]
    }

    pub fn set(&mut self, dir: Direction) {
        self.0[dir.index()] = true;
    }

    /// True when all four walls are set (ceiling and floor are ignored).
    pub fn all_walls_set(&self) -> bool {
        Wall::ALL.iter().all(|&w| self.is_set(w.into()))
    }

    /// First unset wall in N, S, E, W order.
    pub fn first_free_wall(&self) -> Option<Wall> {
        Wall::ALL.iter().copied().find(|&w| !self.is_set(w.into()))
    }

    /// All unset walls in N, S, E, W order.
    pub fn free_walls(&self) -> impl Iterator<Item = Wall> + '_ {
        Wall::ALL.iter().copied().filter(|&w| !self.is_set(w.into()))
    }
}
