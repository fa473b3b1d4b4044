//! Connections between rooms: doors on shared walls and stairs between floors.

use crate::direction::{Direction, Wall};
use crate::geometry::Transform;
use crate::room::RoomId;

/// Connection identifier, unique within one generated building.
pub type ConnectionId = u32;

/// A directed adjacency from `room_start` to `room_end`.
///
/// `direction` is as seen from `room_start`; from `room_end` it is the
/// reverse. Stairs are stored as `Up` on the lower floor and never as `Down`.
#[derive(Debug, Clone, PartialEq)]
pub struct Connection {
    pub id: ConnectionId,
    /// Floor whose connection list owns this edge (the lower floor for stairs).
    pub floor: usize,
    pub direction: Direction,
    pub room_start: RoomId,
    pub room_end: RoomId,
    pub(crate) is_entrance_valid: bool,
    /// Where the door or stair sits. `None` when no opening fits.
    pub entrance: Option<Transform>,
}

impl Connection {
    pub fn is_entrance_valid(&self) -> bool {
        self.is_entrance_valid
    }

    pub fn is_stair(&self) -> bool {
        self.direction == Direction::Up
    }

    /// A usable door on a shared wall (not a stair, not pruned).
    pub fn is_open_door(&self) -> bool {
        !self.direction.is_vertical() && self.is_entrance_valid
    }

    pub fn involves(&self, room: RoomId) -> bool {
        self.room_start == room || self.room_end == room
    }

    /// The room at the far end from `room`.
    pub fn other(&self, room: RoomId) -> RoomId {
        if self.room_start == room {
            self.room_end
        } else {
            self.room_start
        }
    }

    /// Direction of travel when leaving `room` through this connection.
    pub fn direction_from(&self, room: RoomId) -> Direction {
        if self.room_start == room {
            self.direction
        } else {
            self.direction.reverse()
        }
    }

    /// Wall crossed when leaving `room`, `None` for stairs.
    pub fn wall_from(&self, room: RoomId) -> Option<Wall> {
        self.direction_from(room).wall()
    }

    /// True if this connection joins `a` and `b`, in either order.
    pub fn joins(&self, a: RoomId, b: RoomId) -> bool {
        (self.room_start == a && self.room_end == b) || (self.room_start == b && self.room_end == a)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Vec3;

    fn door() -> Connection {
        Connection {
            id: 0,
            floor: 0,
            direction: Direction::East,
            room_start: 1,
            room_end: 2,
            is_entrance_valid: true,
            entrance: Some(Transform::new(Vec3::ZERO, 180.0)),
        }
    }

    #[test]
    fn direction_seen_from_each_end() {
        let c = door();
        assert_eq!(c.direction_from(1), Direction::East);
        assert_eq!(c.direction_from(2), Direction::West);
        assert_eq!(c.wall_from(2), Some(Wall::West));
    }

    #[test]
    fn other_end() {
        let c = door();
        assert_eq!(c.other(1), 2);
        assert_eq!(c.other(2), 1);
        assert!(c.joins(2, 1));
        assert!(!c.joins(1, 3));
        assert!(c.involves(2));
    }

    #[test]
    fn stairs_are_not_doors() {
        let mut c = door();
        c.direction = Direction::Up;
        assert!(c.is_stair());
        assert!(!c.is_open_door());
        assert_eq!(c.wall_from(1), None);
    }

    #[test]
    fn pruned_door_is_closed() {
        let mut c = door();
        assert!(c.is_open_door());
        c.is_entrance_valid = false;
        assert!(!c.is_open_door());
    }
}
