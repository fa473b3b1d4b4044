//! The floor plan aggregate: every room and connection of one building.
//!
//! A `FloorPlan` is created empty at the start of a generation run, mutated
//! by each pass in turn, and handed off read-only inside a
//! [`Building`](crate::generator::Building). Rooms and connections live in
//! flat tables indexed by their ids; each floor keeps the ordered id lists
//! that passes iterate over.

use crate::config::GenerationConfig;
use crate::connection::{Connection, ConnectionId};
use crate::direction::{Direction, Wall};
use crate::geometry::{approx_eq, less_not_equal, Transform};
use crate::room::{Room, RoomId};
use rand::Rng;

/// Shared wall length a door needs.
pub const MIN_DOOR_SPAN: f32 = 2.0;

/// Doors keep this far from either end of the shared wall.
pub const DOOR_CORNER_MARGIN: f32 = 1.0;

/// Ordered room and connection ids of one floor.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Floor {
    rooms: Vec<RoomId>,
    connections: Vec<ConnectionId>,
}

impl Floor {
    pub fn rooms(&self) -> &[RoomId] {
        &self.rooms
    }

    pub fn connections(&self) -> &[ConnectionId] {
        &self.connections
    }
}

/// Rooms and connections of every floor of one building.
#[derive(Debug, Clone, PartialEq)]
pub struct FloorPlan {
    plot_width: f32,
    plot_height: f32,
    rooms: Vec<Room>,
    connections: Vec<Connection>,
    floors: Vec<Floor>,
}

impl FloorPlan {
    pub fn new(floor_count: usize, plot_width: f32, plot_height: f32) -> Self {
        Self {
            plot_width,
            plot_height,
            rooms: Vec::new(),
            connections: Vec::new(),
            floors: vec![Floor::default(); floor_count],
        }
    }

    pub fn for_config(config: &GenerationConfig) -> Self {
        Self::new(
            config.floor_count as usize,
            config.plot_width_f(),
            config.plot_height_f(),
        )
    }

    pub fn plot_width(&self) -> f32 {
        self.plot_width
    }

    pub fn plot_height(&self) -> f32 {
        self.plot_height
    }

    pub fn floor_count(&self) -> usize {
        self.floors.len()
    }

    pub fn floors(&self) -> &[Floor] {
        &self.floors
    }

    pub fn floor(&self, floor: usize) -> Option<&Floor> {
        self.floors.get(floor)
    }

    /// All rooms of all floors, in creation order.
    pub fn rooms(&self) -> &[Room] {
        &self.rooms
    }

    pub fn room(&self, id: RoomId) -> Option<&Room> {
        self.rooms.get(id as usize)
    }

    pub(crate) fn room_mut(&mut self, id: RoomId) -> Option<&mut Room> {
        self.rooms.get_mut(id as usize)
    }

    /// Room ids on a floor, in placement order. Empty for unknown floors.
    pub fn room_ids_on(&self, floor: usize) -> &[RoomId] {
        self.floors
            .get(floor)
            .map_or(&[][..], |f| f.rooms.as_slice())
    }

    pub fn rooms_on(&self, floor: usize) -> impl Iterator<Item = &Room> + '_ {
        self.room_ids_on(floor)
            .iter()
            .filter_map(move |&id| self.room(id))
    }

    pub fn room_count_on(&self, floor: usize) -> usize {
        self.room_ids_on(floor).len()
    }

    /// All connections of all floors, in creation order.
    pub fn connections(&self) -> &[Connection] {
        &self.connections
    }

    pub fn connection(&self, id: ConnectionId) -> Option<&Connection> {
        self.connections.get(id as usize)
    }

    pub fn connections_on(&self, floor: usize) -> impl Iterator<Item = &Connection> + '_ {
        self.floors
            .get(floor)
            .map_or(&[][..], |f| f.connections.as_slice())
            .iter()
            .filter_map(move |&id| self.connection(id))
    }

    /// Open doors (valid, non-vertical) touching `room`, in creation order.
    pub fn door_connections(&self, room: RoomId) -> Vec<ConnectionId> {
        let Some(floor) = self.room(room).map(|r| r.floor) else {
            return Vec::new();
        };
        self.connections_on(floor)
            .filter(|c| c.is_open_door() && c.involves(room))
            .map(|c| c.id)
            .collect()
    }

    /// The stair arriving at `room` from the floor below, if any.
    pub fn stair_into(&self, room: RoomId) -> Option<&Connection> {
        let floor = self.room(room)?.floor;
        let below = floor.checked_sub(1)?;
        self.connections_on(below)
            .find(|c| c.is_stair() && c.room_end == room)
    }

    pub fn are_connected(&self, a: RoomId, b: RoomId) -> bool {
        let Some(floor) = self.room(a).map(|r| r.floor) else {
            return false;
        };
        self.connections_on(floor).any(|c| c.joins(a, b))
    }

    /// True if `candidate` overlaps any room already on its floor.
    pub fn intersects_any(&self, candidate: &Room) -> bool {
        self.rooms_on(candidate.floor)
            .any(|r| r.id != candidate.id && r.intersects(candidate))
    }

    pub(crate) fn next_room_id(&self) -> RoomId {
        self.rooms.len() as RoomId
    }

    /// Append a room to the table and to its floor's list.
    pub(crate) fn add_room(&mut self, room: Room) -> RoomId {
        let id = room.id;
        debug_assert_eq!(id, self.next_room_id());
        if let Some(floor) = self.floors.get_mut(room.floor) {
            floor.rooms.push(id);
        }
        self.rooms.push(room);
        id
    }

    pub(crate) fn add_connection(
        &mut self,
        floor: usize,
        direction: Direction,
        room_start: RoomId,
        room_end: RoomId,
        entrance: Option<Transform>,
    ) -> ConnectionId {
        let id = self.connections.len() as ConnectionId;
        self.connections.push(Connection {
            id,
            floor,
            direction,
            room_start,
            room_end,
            is_entrance_valid: entrance.is_some(),
            entrance,
        });
        if let Some(f) = self.floors.get_mut(floor) {
            f.connections.push(id);
        }
        id
    }

    pub(crate) fn close_entrance(&mut self, id: ConnectionId) {
        if let Some(c) = self.connections.get_mut(id as usize) {
            c.is_entrance_valid = false;
        }
    }

    // ── Adjacency discovery ─────────────────────────────────────────────

    /// Connect a room that is about to be inserted to every aligned,
    /// overlapping neighbour on its floor.
    ///
    /// `room` is not yet part of the plan; its wall flags are blocked here and
    /// the neighbours' flags are blocked in place. Returns the number of
    /// connections created.
    pub(crate) fn connect_new_room(
        &mut self,
        room: &mut Room,
        config: &GenerationConfig,
        rng: &mut impl Rng,
    ) -> usize {
        let neighbours: Vec<RoomId> = self.room_ids_on(room.floor).to_vec();
        let mut created = 0;

        for other_id in neighbours {
            if other_id == room.id || self.are_connected(room.id, other_id) {
                continue;
            }
            let Some(other) = self.room(other_id) else {
                continue;
            };
            if let Some(wall) = shared_wall(room, other) {
                self.add_door_connection(room, other_id, wall, config, rng);
                created += 1;
            }
        }

        created
    }

    /// Re-run adjacency discovery for a room already in the plan.
    ///
    /// Pairs that are already connected are skipped, so on a floor built by
    /// the generator this creates nothing.
    pub fn rediscover_connections(
        &mut self,
        id: RoomId,
        config: &GenerationConfig,
        rng: &mut impl Rng,
    ) -> usize {
        let Some(mut room) = self.room(id).cloned() else {
            return 0;
        };
        let created = self.connect_new_room(&mut room, config, rng);
        if let Some(slot) = self.room_mut(id) {
            *slot = room;
        }
        created
    }

    fn add_door_connection(
        &mut self,
        room: &mut Room,
        other_id: RoomId,
        wall: Wall,
        config: &GenerationConfig,
        rng: &mut impl Rng,
    ) -> ConnectionId {
        let (lower, upper) = match self.room(other_id) {
            Some(other) => {
                let (lo_a, hi_a) = room.wall_span(wall);
                let (lo_b, hi_b) = other.wall_span(wall);
                (lo_a.max(lo_b), hi_a.min(hi_b))
            }
            None => (0.0, 0.0),
        };

        let entrance = if upper - lower > MIN_DOOR_SPAN {
            let along = rng.gen_range((lower + DOOR_CORNER_MARGIN)..=(upper - DOOR_CORNER_MARGIN));
            let y = config.opening_elevation(room.floor);
            Some(Transform::new(
                room.wall_point(wall, y, along),
                wall.yaw_degrees(),
            ))
        } else {
            None
        };

        room.block(wall.into());
        if let Some(other) = self.room_mut(other_id) {
            other.block(wall.reverse().into());
        }

        self.add_connection(room.floor, wall.into(), room.id, other_id, entrance)
    }
}

/// The wall of `room` that lines up with a wall of `other` over a span of
/// positive length, checked in N, S, W, E order.
fn shared_wall(room: &Room, other: &Room) -> Option<Wall> {
    let overlaps_x = less_not_equal(other.west(), room.east()) && less_not_equal(room.west(), other.east());
    let overlaps_z =
        less_not_equal(other.north(), room.south()) && less_not_equal(room.north(), other.south());

    if approx_eq(other.south(), room.north()) && overlaps_x {
        Some(Wall::North)
    } else if approx_eq(other.north(), room.south()) && overlaps_x {
        Some(Wall::South)
    } else if approx_eq(other.east(), room.west()) && overlaps_z {
        Some(Wall::West)
    } else if approx_eq(other.west(), room.east()) && overlaps_z {
        Some(Wall::East)
    } else {
        None
    }
}
