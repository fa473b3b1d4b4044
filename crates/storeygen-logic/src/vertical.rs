//! Vertical linking: one stairwell per floor gap, then stacked rooms.
//!
//! Upper floors are never laid out from scratch. A stairwell picks a room on
//! the floor below and copies its footprint upward; the remaining rooms of the
//! floor below are then copied too, except the last `remove_room_count`.

use crate::config::GenerationConfig;
use crate::direction::Direction;
use crate::error::{PlacementExhausted, Rejection, Stage};
use crate::geometry::Transform;
use crate::plan::FloorPlan;
use crate::room::RoomId;
use rand::Rng;

/// Distance from the chosen wall to the stair entrance.
pub const STAIR_INSET: f32 = 1.0;

/// One attempt at placing a stairwell from `floor` to `floor + 1`.
///
/// Returns the id of the room created on `floor + 1`.
pub fn try_add_stairwell(
    plan: &mut FloorPlan,
    config: &GenerationConfig,
    floor: usize,
    rng: &mut impl Rng,
) -> Result<RoomId, Rejection> {
    let ids = plan.room_ids_on(floor);
    if ids.is_empty() || floor + 1 >= plan.floor_count() {
        return Err(Rejection::NoSourceRoom);
    }
    let source_id = ids[rng.gen_range(0..ids.len())];
    let source = plan.room(source_id).ok_or(Rejection::NoSourceRoom)?;
    let wall = source.first_free_wall().ok_or(Rejection::WallBlocked)?;

    let entrance = Transform::new(
        source.inset_point(wall, config.floor_elevation(floor), STAIR_INSET),
        wall.yaw_degrees() + 90.0,
    );
    let mut upper = source.stacked(plan.next_room_id(), floor + 1);
    upper.block(Direction::Down);

    if let Some(source) = plan.room_mut(source_id) {
        source.block(wall.into());
        source.block(Direction::Up);
    }
    let upper_id = plan.add_room(upper);
    plan.add_connection(floor, Direction::Up, source_id, upper_id, Some(entrance));

    log::debug!(
        "Stairwell from room {} (floor {}) through its {:?} side to room {}",
        source_id,
        floor,
        wall,
        upper_id
    );
    Ok(upper_id)
}

/// Place the stairwell above `floor`, retrying up to `config.retry_budget` times.
pub fn add_stairwell_and_room(
    plan: &mut FloorPlan,
    config: &GenerationConfig,
    floor: usize,
    rng: &mut impl Rng,
) -> Result<RoomId, PlacementExhausted> {
    for attempt in 1..=config.retry_budget {
        match try_add_stairwell(plan, config, floor, rng) {
            Ok(id) => return Ok(id),
            Err(Rejection::NoSourceRoom) => break,
            Err(rejection) => {
                log::debug!("Stairwell attempt {} on floor {} rejected: {:?}", attempt, floor, rejection);
            }
        }
    }
    log::warn!("No stairwell could be placed above floor {}", floor);
    Err(PlacementExhausted {
        stage: Stage::Stairwell,
        floor,
        attempts: config.retry_budget,
    })
}

/// Stack rooms from `floor - 1` onto `floor`.
///
/// Only the first `rooms_on(floor - 1) - remove_room_count` rooms are
/// considered, and only those whose ceiling is still free. Each stacked room
/// is connected to the rooms already on `floor` before it is inserted.
pub fn add_remaining_rooms_on_floor(
    plan: &mut FloorPlan,
    config: &GenerationConfig,
    floor: usize,
    rng: &mut impl Rng,
) -> Vec<RoomId> {
    let Some(below) = floor.checked_sub(1) else {
        return Vec::new();
    };
    if floor >= plan.floor_count() {
        return Vec::new();
    }
    let candidates = plan.room_ids_on(below).to_vec();
    let keep = candidates
        .len()
        .saturating_sub(config.remove_room_count as usize);

    let mut added = Vec::new();
    for &source_id in &candidates[..keep] {
        let Some(source) = plan.room(source_id) else {
            continue;
        };
        if source.is_blocked(Direction::Up) {
            continue;
        }
        let mut room = source.stacked(plan.next_room_id(), floor);
        plan.connect_new_room(&mut room, config, rng);
        room.block(Direction::Down);
        if let Some(source) = plan.room_mut(source_id) {
            source.block(Direction::Up);
        }
        added.push(plan.add_room(room));
    }

    log::debug!(
        "Stacked {} rooms onto floor {} ({} skipped)",
        added.len(),
        floor,
        candidates.len() - added.len()
    );
    added
}
