//! Balcony selection on the top floor.

use crate::config::GenerationConfig;
use crate::error::{PlacementExhausted, Rejection, Stage};
use crate::plan::FloorPlan;
use crate::room::RoomId;
use rand::Rng;

/// One attempt at turning a random room on `floor` into a balcony.
///
/// Rooms a stair arrives in are refused. A room that is already a balcony is
/// refused unless all four of its walls are blocked.
pub fn try_make_balcony(
    plan: &mut FloorPlan,
    floor: usize,
    rng: &mut impl Rng,
) -> Result<RoomId, Rejection> {
    let ids = plan.room_ids_on(floor);
    if ids.is_empty() {
        return Err(Rejection::NoSourceRoom);
    }
    let id = ids[rng.gen_range(0..ids.len())];

    if plan.stair_into(id).is_some() {
        return Err(Rejection::StairArrival);
    }
    let room = plan.room_mut(id).ok_or(Rejection::NoSourceRoom)?;
    if room.is_balcony() && !room.all_walls_blocked() {
        return Err(Rejection::AlreadyBalcony);
    }
    room.make_balcony();
    Ok(id)
}

/// Make `count` balconies on `floor` within `config.retry_budget` attempts.
///
/// Returns how many were made. Balconies made before the budget ran out stay.
pub fn make_balcony_rooms(
    plan: &mut FloorPlan,
    config: &GenerationConfig,
    floor: usize,
    count: u32,
    rng: &mut impl Rng,
) -> Result<usize, PlacementExhausted> {
    let mut made = 0usize;
    let mut attempts = 0u32;

    while made < count as usize {
        if attempts >= config.retry_budget {
            log::warn!(
                "Made {} of {} balconies on floor {} before running out of attempts",
                made,
                count,
                floor
            );
            return Err(PlacementExhausted {
                stage: Stage::Balcony,
                floor,
                attempts,
            });
        }
        attempts += 1;
        match try_make_balcony(plan, floor, rng) {
            Ok(id) => {
                log::debug!("Room {} on floor {} is now a balcony", id, floor);
                made += 1;
            }
            Err(Rejection::NoSourceRoom) => {
                attempts = config.retry_budget;
            }
            Err(rejection) => {
                log::debug!("Balcony attempt {} rejected: {:?}", attempts, rejection);
            }
        }
    }

    Ok(made)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::build_ground_floor;
    use crate::direction::Direction;
    use crate::vertical::{add_remaining_rooms_on_floor, add_stairwell_and_room};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn two_floors(config: &GenerationConfig, seed: u64) -> (FloorPlan, StdRng) {
        let mut plan = FloorPlan::for_config(config);
        let mut rng = StdRng::seed_from_u64(seed);
        build_ground_floor(&mut plan, config, &mut rng).expect("ground floor fits");
        add_stairwell_and_room(&mut plan, config, 0, &mut rng).expect("stairwell");
        add_remaining_rooms_on_floor(&mut plan, config, 1, &mut rng);
        (plan, rng)
    }

    #[test]
    fn balconies_avoid_the_stair_room() {
        let config = GenerationConfig::default();
        for seed in 0..20 {
            let (mut plan, mut rng) = two_floors(&config, seed);
            let made = make_balcony_rooms(&mut plan, &config, 1, 2, &mut rng).expect("room for two");
            assert_eq!(made, 2);

            let balconies: Vec<_> = plan.rooms_on(1).filter(|r| r.is_balcony()).collect();
            assert!(!balconies.is_empty(), "seed {seed}");
            for room in balconies {
                assert!(plan.stair_into(room.id).is_none(), "seed {seed}: stair into balcony");
                assert!(room.is_blocked(Direction::Up));
            }
        }
    }

    #[test]
    fn unsatisfiable_count_is_reported() {
        let mut config = GenerationConfig::default();
        config.retry_budget = 200;
        let (mut plan, mut rng) = two_floors(&config, 3);
        let err = make_balcony_rooms(&mut plan, &config, 1, 50, &mut rng).unwrap_err();
        assert_eq!(err.stage, Stage::Balcony);
        assert_eq!(err.floor, 1);
        assert!(plan.rooms_on(1).any(|r| r.is_balcony()));
    }

    #[test]
    fn stair_room_is_refused() {
        let mut config = GenerationConfig::default();
        config.room_count = 1;
        let (mut plan, mut rng) = two_floors(&config, 0);
        assert_eq!(plan.room_count_on(1), 1);
        assert_eq!(try_make_balcony(&mut plan, 1, &mut rng), Err(Rejection::StairArrival));
    }

    #[test]
    fn zero_count_makes_nothing() {
        let config = GenerationConfig::default();
        let (mut plan, mut rng) = two_floors(&config, 0);
        assert_eq!(make_balcony_rooms(&mut plan, &config, 1, 0, &mut rng), Ok(0));
        assert!(plan.rooms().iter().all(|r| !r.is_balcony()));
    }
}
