//! Ground-floor room placement.
//!
//! The first room is centered on the plot. Every further room branches off a
//! random wall of a random existing room: it inherits that room's size across
//! the wall, takes a random depth away from it, and is placed flush against
//! it. Candidates that hit a blocked wall, the plot edge or another room are
//! rejected and retried.

use crate::config::GenerationConfig;
use crate::direction::Wall;
use crate::error::{PlacementExhausted, Rejection, Stage};
use crate::geometry::Rect;
use crate::plan::FloorPlan;
use crate::room::{Room, RoomId, BOUNDS_GAP};
use rand::Rng;

/// Place the first room in the middle of the plot.
///
/// Sides are whole numbers in `[min_room_size, max_room_size]`, shrunk by the
/// bounds gap on each side.
pub fn place_first_room(
    plan: &mut FloorPlan,
    config: &GenerationConfig,
    rng: &mut impl Rng,
) -> RoomId {
    let x = config.plot_width_f() / 2.0;
    let z = config.plot_height_f() / 2.0;
    let width = rng.gen_range(config.min_room_size..=config.max_room_size) as f32 - BOUNDS_GAP * 2.0;
    let height =
        rng.gen_range(config.min_room_size..=config.max_room_size) as f32 - BOUNDS_GAP * 2.0;

    let room = Room::new(plan.next_room_id(), 0, Rect::from_center(x, z, width, height));
    log::debug!("First room {} at ({:.1}, {:.1}) {:.1}x{:.1}", room.id, x, z, width, height);
    plan.add_room(room)
}

/// One attempt at branching a new ground-floor room off an existing one.
pub fn try_place_ground_room(
    plan: &mut FloorPlan,
    config: &GenerationConfig,
    rng: &mut impl Rng,
) -> Result<RoomId, Rejection> {
    let ids = plan.room_ids_on(0);
    if ids.is_empty() {
        return Err(Rejection::NoSourceRoom);
    }
    let source_id = ids[rng.gen_range(0..ids.len())];
    let wall = Wall::random(rng);
    let source = plan.room(source_id).ok_or(Rejection::NoSourceRoom)?;

    if source.is_blocked(wall.into()) {
        return Err(Rejection::WallBlocked);
    }
    let (plot_w, plot_h) = (config.plot_width_f(), config.plot_height_f());
    let (min, max) = (config.min_room_size_f(), config.max_room_size_f());
    if source.is_too_close_to_side(wall, plot_w, plot_h, min) {
        return Err(Rejection::TooCloseToSide);
    }

    let rect = match wall {
        Wall::West => {
            let max_w = if source.west() - max < 0.0 { min } else { max };
            let w = rng.gen_range(min..=max_w);
            Rect::from_center(source.west() - w / 2.0, source.z(), w, source.height())
        }
        Wall::East => {
            let max_w = if source.east() + max > plot_w { min } else { max };
            let w = rng.gen_range(min..=max_w);
            Rect::from_center(source.east() + w / 2.0, source.z(), w, source.height())
        }
        Wall::North => {
            let max_h = if source.north() - max < 0.0 { min } else { max };
            let h = rng.gen_range(min..=max_h);
            Rect::from_center(source.x(), source.north() - h / 2.0, source.width(), h)
        }
        Wall::South => {
            let max_h = if source.south() + max > plot_h { min } else { max };
            let h = rng.gen_range(min..=max_h);
            Rect::from_center(source.x(), source.south() + h / 2.0, source.width(), h)
        }
    };

    let mut room = Room::new(plan.next_room_id(), 0, rect);
    if plan.intersects_any(&room) {
        return Err(Rejection::Intersects);
    }

    plan.connect_new_room(&mut room, config, rng);
    Ok(plan.add_room(room))
}

/// Branch a new ground-floor room, retrying up to `config.retry_budget` times.
pub fn place_random_ground_room(
    plan: &mut FloorPlan,
    config: &GenerationConfig,
    rng: &mut impl Rng,
) -> Result<RoomId, PlacementExhausted> {
    for attempt in 1..=config.retry_budget {
        match try_place_ground_room(plan, config, rng) {
            Ok(id) => return Ok(id),
            Err(rejection) => {
                log::debug!("Ground room attempt {} rejected: {:?}", attempt, rejection);
            }
        }
    }
    log::warn!(
        "Gave up placing a ground room after {} attempts ({} rooms placed)",
        config.retry_budget,
        plan.room_count_on(0)
    );
    Err(PlacementExhausted {
        stage: Stage::GroundRoom,
        floor: 0,
        attempts: config.retry_budget,
    })
}

/// Populate the ground floor with `config.room_count` rooms.
///
/// Stops at the first exhausted search; the rooms placed so far stay.
pub fn build_ground_floor(
    plan: &mut FloorPlan,
    config: &GenerationConfig,
    rng: &mut impl Rng,
) -> Result<(), PlacementExhausted> {
    place_first_room(plan, config, rng);
    for _ in 1..config.room_count {
        place_random_ground_room(plan, config, rng)?;
    }
    Ok(())
}
