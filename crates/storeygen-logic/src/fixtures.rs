//! Outside doors and windows, derived from the finished layout.
//!
//! Both only go on walls with nothing behind them: a wall is free when no
//! neighbour, inner door, stair or earlier fixture has blocked it.

use crate::config::GenerationConfig;
use crate::direction::Wall;
use crate::error::{PlacementExhausted, Rejection, Stage};
use crate::geometry::Transform;
use crate::plan::FloorPlan;
use crate::room::{Room, RoomId};
use rand::Rng;

/// A door from a ground-floor room to the outside.
#[derive(Debug, Clone, PartialEq)]
pub struct OutsideDoor {
    pub room: RoomId,
    pub wall: Wall,
    pub transform: Transform,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Window {
    pub room: RoomId,
    pub wall: Wall,
    pub transform: Transform,
}

/// One attempt at an outside door on a random ground-floor room.
///
/// The door takes the room's first free wall and blocks it.
pub fn try_place_outside_door(
    plan: &mut FloorPlan,
    config: &GenerationConfig,
    rng: &mut impl Rng,
) -> Result<OutsideDoor, Rejection> {
    let ids = plan.room_ids_on(0);
    if ids.is_empty() {
        return Err(Rejection::NoSourceRoom);
    }
    let id = ids[rng.gen_range(0..ids.len())];
    let room = plan.room_mut(id).ok_or(Rejection::NoSourceRoom)?;
    let wall = room.first_free_wall().ok_or(Rejection::WallBlocked)?;

    let transform = Transform::new(
        room.wall_midpoint(wall, config.opening_elevation(0)),
        wall.yaw_degrees(),
    );
    room.block(wall.into());
    Ok(OutsideDoor {
        room: id,
        wall,
        transform,
    })
}

/// Place one outside door within `config.retry_budget` attempts.
pub fn place_outside_door(
    plan: &mut FloorPlan,
    config: &GenerationConfig,
    rng: &mut impl Rng,
) -> Result<OutsideDoor, PlacementExhausted> {
    for attempt in 1..=config.retry_budget {
        match try_place_outside_door(plan, config, rng) {
            Ok(door) => return Ok(door),
            Err(Rejection::NoSourceRoom) => break,
            Err(rejection) => {
                log::debug!("Outside door attempt {} rejected: {:?}", attempt, rejection);
            }
        }
    }
    log::warn!("No free ground-floor wall left for an outside door");
    Err(PlacementExhausted {
        stage: Stage::OutsideDoor,
        floor: 0,
        attempts: config.retry_budget,
    })
}

/// Place `config.outside_door_count` outside doors, appending to `doors`.
///
/// Stops at the first exhausted search; doors placed before it are kept.
pub fn place_outside_doors(
    plan: &mut FloorPlan,
    config: &GenerationConfig,
    rng: &mut impl Rng,
    doors: &mut Vec<OutsideDoor>,
) -> Result<(), PlacementExhausted> {
    for _ in 0..config.outside_door_count {
        let door = place_outside_door(plan, config, rng)?;
        log::debug!("Outside door on the {:?} wall of room {}", door.wall, door.room);
        doors.push(door);
    }
    Ok(())
}

/// Windows per wall for a wall of length `length`.
fn windows_along(length: f32, config: &GenerationConfig, rng: &mut impl Rng) -> u32 {
    let n = if (config.window_count as f32) < length {
        config.window_count
    } else {
        (length.floor() as u32).saturating_sub(1)
    };
    if config.randomise_windows && n > 0 {
        rng.gen_range(1..=n)
    } else {
        n
    }
}

fn room_windows(room: &Room, nx: u32, nz: u32, y: f32, out: &mut Vec<Window>) {
    for wall in room.blocked().free_walls() {
        let n = if wall.runs_along_x() { nx } else { nz };
        if n == 0 {
            continue;
        }
        let (lo, _) = room.wall_span(wall);
        let length = if wall.runs_along_x() { room.width() } else { room.height() };
        let inc = length / n as f32;
        for i in 0..n {
            let along = lo + i as f32 * inc + inc / 2.0;
            out.push(Window {
                room: room.id,
                wall,
                transform: Transform::new(room.wall_point(wall, y, along), wall.yaw_degrees()),
            });
        }
    }
}

/// Evenly spaced windows on every free wall of every non-balcony room.
pub fn place_windows(
    plan: &FloorPlan,
    config: &GenerationConfig,
    rng: &mut impl Rng,
) -> Vec<Window> {
    let mut windows = Vec::new();
    for room in plan.rooms().iter().filter(|r| !r.is_balcony()) {
        let nx = windows_along(room.width(), config, rng);
        let nz = windows_along(room.height(), config, rng);
        room_windows(room, nx, nz, config.opening_elevation(room.floor), &mut windows);
    }
    log::debug!("Placed {} windows", windows.len());
    windows
}
