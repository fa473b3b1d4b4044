//! Room model: an axis-aligned rectangle on one floor.

use crate::direction::{Direction, DirectionFlags, Wall};
use crate::geometry::{Rect, Vec3};

/// Room identifier, unique within one generated building.
pub type RoomId = u32;

/// Added around raw bounds when deriving wall coordinates, so rooms placed
/// flush against a wall never intersect their neighbour.
pub const BOUNDS_GAP: f32 = 0.001;

/// A rectangular room on a single floor.
#[derive(Debug, Clone, PartialEq)]
pub struct Room {
    pub id: RoomId,
    pub floor: usize,
    bounds: Rect,
    blocked: DirectionFlags,
    is_balcony: bool,
}

impl Room {
    pub fn new(id: RoomId, floor: usize, bounds: Rect) -> Self {
        Self {
            id,
            floor,
            bounds,
            blocked: DirectionFlags::default(),
            is_balcony: false,
        }
    }

    /// Same footprint as `self`, on another floor, nothing blocked.
    pub fn stacked(&self, id: RoomId, floor: usize) -> Self {
        Self::new(id, floor, self.bounds)
    }

    pub fn bounds(&self) -> &Rect {
        &self.bounds
    }

    pub fn west(&self) -> f32 {
        self.bounds.min_x - BOUNDS_GAP
    }

    pub fn east(&self) -> f32 {
        self.bounds.max_x + BOUNDS_GAP
    }

    pub fn north(&self) -> f32 {
        self.bounds.min_z - BOUNDS_GAP
    }

    pub fn south(&self) -> f32 {
        self.bounds.max_z + BOUNDS_GAP
    }

    /// Center x.
    pub fn x(&self) -> f32 {
        self.bounds.center_x()
    }

    /// Center z.
    pub fn z(&self) -> f32 {
        self.bounds.center_z()
    }

    pub fn width(&self) -> f32 {
        self.bounds.width()
    }

    pub fn height(&self) -> f32 {
        self.bounds.height()
    }

    pub fn is_balcony(&self) -> bool {
        self.is_balcony
    }

    pub fn is_blocked(&self, dir: Direction) -> bool {
        self.blocked.is_set(dir)
    }

    pub fn blocked(&self) -> &DirectionFlags {
        &self.blocked
    }

    pub fn all_walls_blocked(&self) -> bool {
        self.blocked.all_walls_set()
    }

    pub fn first_free_wall(&self) -> Option<Wall> {
        self.blocked.first_free_wall()
    }

    pub(crate) fn block(&mut self, dir: Direction) {
        self.blocked.set(dir);
    }

    pub(crate) fn make_balcony(&mut self) {
        self.blocked.set(Direction::Up);
        self.is_balcony = true;
    }

    /// Coordinate of a wall (x for east/west, z for north/south), gap included.
    pub fn wall_position(&self, wall: Wall) -> f32 {
        match wall {
            Wall::North => self.north(),
            Wall::South => self.south(),
            Wall::East => self.east(),
            Wall::West => self.west(),
        }
    }

    /// Extent of a wall along its own axis, as `(low, high)`.
    pub fn wall_span(&self, wall: Wall) -> (f32, f32) {
        if wall.runs_along_x() {
            (self.west(), self.east())
        } else {
            (self.north(), self.south())
        }
    }

    /// Midpoint of a wall at elevation `y`.
    pub fn wall_midpoint(&self, wall: Wall, y: f32) -> Vec3 {
        self.wall_point(wall, y, if wall.runs_along_x() { self.x() } else { self.z() })
    }

    /// Point on a wall at elevation `y`, `along` units on the wall's own axis.
    pub fn wall_point(&self, wall: Wall, y: f32, along: f32) -> Vec3 {
        match wall {
            Wall::North => Vec3::new(along, y, self.north()),
            Wall::South => Vec3::new(along, y, self.south()),
            Wall::East => Vec3::new(self.east(), y, along),
            Wall::West => Vec3::new(self.west(), y, along),
        }
    }

    /// Wall midpoint moved `inset` units toward the room center.
    pub fn inset_point(&self, wall: Wall, y: f32, inset: f32) -> Vec3 {
        match wall {
            Wall::North => Vec3::new(self.x(), y, self.north() + inset),
            Wall::South => Vec3::new(self.x(), y, self.south() - inset),
            Wall::East => Vec3::new(self.east() - inset, y, self.z()),
            Wall::West => Vec3::new(self.west() + inset, y, self.z()),
        }
    }

    /// Whether a room branching off `wall` would come within
    /// `min_room_size + 1` of the plot edge.
    pub fn is_too_close_to_side(
        &self,
        wall: Wall,
        plot_width: f32,
        plot_height: f32,
        min_room_size: f32,
    ) -> bool {
        let reach = min_room_size + 1.0;
        match wall {
            Wall::West => self.west() - reach < 0.0,
            Wall::East => self.east() + reach > plot_width,
            Wall::North => self.north() - reach < 0.0,
            Wall::South => self.south() + reach > plot_height,
        }
    }

    pub fn intersects(&self, other: &Room) -> bool {
        self.bounds.intersects(&other.bounds)
    }
}
