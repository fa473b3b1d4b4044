//! Roof regions over every room with an open ceiling.
//!
//! Rooms below the top floor that nothing was stacked on get their own roof.
//! On the top floor, runs of door-connected rooms sharing a width or height
//! are merged into one slab along the run's direction.

use crate::config::GenerationConfig;
use crate::direction::{Direction, Wall};
use crate::geometry::{approx_eq, Vec3};
use crate::plan::FloorPlan;
use crate::room::{Room, RoomId};

/// A roof slab. `scale` is (width, 1, length) before `yaw_degrees` is applied.
#[derive(Debug, Clone, PartialEq)]
pub struct RoofRegion {
    pub floor: usize,
    pub position: Vec3,
    pub yaw_degrees: f32,
    pub scale: Vec3,
    /// Rooms covered by this slab.
    pub rooms: Vec<RoomId>,
}

/// Compute the roof regions of a finished plan. Consumes no randomness.
pub fn generate_roofs(plan: &FloorPlan, config: &GenerationConfig) -> Vec<RoofRegion> {
    let order: Vec<RoomId> = plan
        .rooms()
        .iter()
        .filter(|r| !r.is_blocked(Direction::Up))
        .map(|r| r.id)
        .collect();
    let mut pending = vec![false; plan.rooms().len()];
    for &id in &order {
        pending[id as usize] = true;
    }
    let top = plan.floor_count().saturating_sub(1);

    let mut roofs = Vec::new();
    for &seed_id in &order {
        if !pending[seed_id as usize] {
            continue;
        }
        pending[seed_id as usize] = false;
        let Some(seed) = plan.room(seed_id) else {
            continue;
        };

        if seed.floor != top {
            roofs.push(standalone_roof(seed, config));
            continue;
        }

        match collect_run(plan, seed, &mut pending) {
            Some((wall, run)) if run.len() > 1 => {
                roofs.push(merged_roof(plan, seed, wall, run, config));
            }
            _ => roofs.push(standalone_roof(seed, config)),
        }
    }

    log::debug!(
        "{} roof regions over {} open rooms",
        roofs.len(),
        order.len()
    );
    roofs
}

fn matches_run(a: &Room, b: &Room) -> bool {
    approx_eq(a.width(), b.width()) || approx_eq(a.height(), b.height())
}

/// The chain starting at `seed`, consumed from `pending`, and its direction.
///
/// The first matching neighbour fixes the direction. After that the chain
/// only grows from its far end, one room at a time, so the run is ordered
/// from `seed` outward.
fn collect_run(
    plan: &FloorPlan,
    seed: &Room,
    pending: &mut [bool],
) -> Option<(Wall, Vec<RoomId>)> {
    let (wall, first) = plan.door_connections(seed.id).into_iter().find_map(|id| {
        let c = plan.connection(id)?;
        let other = plan.room(c.other(seed.id))?;
        if pending[other.id as usize] && matches_run(seed, other) {
            Some((c.wall_from(seed.id)?, other.id))
        } else {
            None
        }
    })?;

    pending[first as usize] = false;
    let mut run = vec![seed.id, first];
    let mut end = first;
    while let Some(next) = next_in_run(plan, end, wall, pending) {
        pending[next as usize] = false;
        run.push(next);
        end = next;
    }

    Some((wall, run))
}

/// First pending, matching neighbour of `from` through its `wall`.
fn next_in_run(plan: &FloorPlan, from: RoomId, wall: Wall, pending: &[bool]) -> Option<RoomId> {
    let current = plan.room(from)?;
    plan.door_connections(from).into_iter().find_map(|id| {
        let c = plan.connection(id)?;
        if c.wall_from(from) != Some(wall) {
            return None;
        }
        let next = plan.room(c.other(from))?;
        (pending[next.id as usize] && matches_run(current, next)).then_some(next.id)
    })
}

fn roof_elevation(config: &GenerationConfig, floor: usize) -> f32 {
    config.roof_height * (floor + 1) as f32
}

fn standalone_roof(room: &Room, config: &GenerationConfig) -> RoofRegion {
    let (yaw_degrees, scale) = if room.width() > room.height() {
        (270.0, Vec3::new(room.height(), 1.0, room.width()))
    } else {
        (180.0, Vec3::new(room.width(), 1.0, room.height()))
    };
    RoofRegion {
        floor: room.floor,
        position: Vec3::new(room.x(), roof_elevation(config, room.floor), room.z()),
        yaw_degrees,
        scale,
        rooms: vec![room.id],
    }
}

fn merged_roof(
    plan: &FloorPlan,
    seed: &Room,
    wall: Wall,
    run: Vec<RoomId>,
    config: &GenerationConfig,
) -> RoofRegion {
    let rooms: Vec<&Room> = run.iter().filter_map(|&id| plan.room(id)).collect();
    let start = seed.wall_position(wall.reverse());
    let end = rooms.last().map_or(start, |r| r.wall_position(wall));
    let middle = (start + end) / 2.0;
    let y = roof_elevation(config, seed.floor);

    // East/west runs lie along x.
    let horizontal = !wall.runs_along_x();
    let (position, width, length) = if horizontal {
        (
            Vec3::new(middle, y, seed.z()),
            seed.height(),
            rooms.iter().map(|r| r.width()).sum::<f32>(),
        )
    } else {
        (
            Vec3::new(seed.x(), y, middle),
            seed.width(),
            rooms.iter().map(|r| r.height()).sum::<f32>(),
        )
    };

    log::debug!(
        "Merged roof over {} rooms heading {:?} from room {}",
        run.len(),
        wall,
        seed.id
    );
    RoofRegion {
        floor: seed.floor,
        position,
        yaw_degrees: (wall.yaw_degrees() + 90.0).rem_euclid(360.0),
        scale: Vec3::new(width, 1.0, length),
        rooms: run,
    }
}
