//! Integration tests for the full building generation pipeline.
//!
//! Exercises: GenerationConfig → ground floor → door pruning → stairwells
//! → stacked floors → balconies → roofs → outside doors → windows
//!
//! All tests are pure logic, driven by fixed seeds.

use storeygen_logic::config::GenerationConfig;
use storeygen_logic::direction::Direction;
use storeygen_logic::doors::reachable_rooms;
use storeygen_logic::error::GenerationError;
use storeygen_logic::generator::{generate_building, generate_building_from_seed, Building};
use storeygen_logic::plan::FloorPlan;
use storeygen_logic::validation::{self, Severity};

use rand::rngs::StdRng;
use rand::SeedableRng;

// ── Helpers ────────────────────────────────────────────────────────────

fn config_with(edit: impl FnOnce(&mut GenerationConfig)) -> GenerationConfig {
    let mut config = GenerationConfig::default();
    edit(&mut config);
    config
}

fn generate(config: &GenerationConfig, seed: u64) -> Building {
    generate_building_from_seed(config, seed)
        .unwrap_or_else(|e| panic!("seed {seed}: generation failed: {e}"))
}

fn assert_no_overlaps(plan: &FloorPlan, seed: u64) {
    for floor in 0..plan.floor_count() {
        let rooms: Vec<_> = plan.rooms_on(floor).collect();
        for (i, a) in rooms.iter().enumerate() {
            for b in &rooms[i + 1..] {
                assert!(
                    !a.intersects(b),
                    "seed {seed}: rooms {} and {} overlap on floor {floor}",
                    a.id,
                    b.id
                );
            }
        }
    }
}

// ── Scenarios ──────────────────────────────────────────────────────────

#[test]
fn single_room_building() {
    let config = config_with(|c| {
        c.room_count = 1;
        c.floor_count = 1;
        c.roof_enabled = true;
    });
    for seed in 0..20 {
        let building = generate(&config, seed);
        let plan = building.plan();
        assert_eq!(plan.rooms().len(), 1);
        assert!(plan.connections().is_empty());

        let room = &plan.rooms()[0];
        for side in [room.width(), room.height()] {
            assert!((3.997..=15.0).contains(&side), "seed {seed}: side {side}");
        }
        assert!((room.x() - 25.0).abs() < 1e-4);
        assert!((room.z() - 25.0).abs() < 1e-4);

        let roofs = building.roofs();
        assert_eq!(roofs.len(), 1, "seed {seed}");
        let roof = &roofs[0];
        assert_eq!(roof.rooms, vec![room.id]);
        assert!((roof.position.x - room.x()).abs() < 1e-4);
        assert!((roof.position.z - room.z()).abs() < 1e-4);
        let (short, long) = if room.width() > room.height() {
            (room.height(), room.width())
        } else {
            (room.width(), room.height())
        };
        assert!((roof.scale.x - short).abs() < 1e-4);
        assert!((roof.scale.z - long).abs() < 1e-4);
    }
}

#[test]
fn five_room_floor_is_connected() {
    let config = config_with(|c| {
        c.room_count = 5;
        c.floor_count = 1;
        c.pathfind_doors = false;
    });
    for seed in 0..20 {
        let building = generate(&config, seed);
        let plan = building.plan();
        assert_eq!(plan.room_count_on(0), 5, "seed {seed}");
        assert_no_overlaps(plan, seed);
        assert_eq!(reachable_rooms(plan, 0).len(), 5, "seed {seed}: graph split");
    }
}

#[test]
fn three_floors_one_stair_each() {
    let config = config_with(|c| {
        c.room_count = 6;
        c.floor_count = 3;
        c.remove_room_count = 1;
    });
    for seed in 0..20 {
        let building = generate(&config, seed);
        let plan = building.plan();
        for floor in 0..2 {
            let stairs: Vec<_> = plan.connections_on(floor).filter(|c| c.is_stair()).collect();
            assert_eq!(stairs.len(), 1, "seed {seed}: floor {floor}");
            assert!(stairs[0].is_entrance_valid());
        }
        for floor in 1..3 {
            for room in plan.rooms_on(floor) {
                assert!(room.is_blocked(Direction::Down), "seed {seed}: room {}", room.id);
                let source = plan
                    .rooms_on(floor - 1)
                    .find(|r| r.bounds() == room.bounds())
                    .unwrap_or_else(|| panic!("seed {seed}: room {} has no room below", room.id));
                assert!(source.is_blocked(Direction::Up));
            }
            let below = plan.room_count_on(floor - 1);
            let here = plan.room_count_on(floor);
            assert!(here >= below - 1 && here <= below, "seed {seed}: {below} -> {here}");
        }
    }
}

// ── Invariants ─────────────────────────────────────────────────────────

#[test]
fn deterministic_output() {
    let config = config_with(|c| {
        c.floor_count = 3;
        c.room_count = 7;
        c.roof_enabled = true;
        c.window_count = 3;
        c.randomise_windows = true;
    });
    let a = generate(&config, 1234);
    let b = generate(&config, 1234);
    assert_eq!(a, b);

    let mut rng = StdRng::seed_from_u64(1234);
    let c = generate_building(&config, &mut rng).unwrap();
    assert_eq!(a.plan(), c.plan());
    assert_eq!(a.roofs(), c.roofs());
}

#[test]
fn pruning_keeps_floors_connected() {
    let config = config_with(|c| {
        c.room_count = 10;
        c.floor_count = 2;
    });
    for seed in 0..20 {
        let building = generate(&config, seed);
        let plan = building.plan();
        for floor in 0..plan.floor_count() {
            let reached = reachable_rooms(plan, floor).len();
            assert_eq!(reached, plan.room_count_on(floor), "seed {seed}: floor {floor}");
        }
    }
}

#[test]
fn roofs_cover_every_open_room_once() {
    let config = config_with(|c| {
        c.floor_count = 3;
        c.room_count = 8;
        c.remove_room_count = 2;
        c.balcony_count = 2;
        c.roof_enabled = true;
    });
    for seed in 0..20 {
        let building = generate(&config, seed);
        let errors = validation::check_roof_coverage(building.plan(), building.roofs());
        assert!(errors.is_empty(), "seed {seed}: {errors:?}");
        for roof in building.roofs() {
            for id in &roof.rooms {
                let room = building.plan().room(*id).unwrap();
                assert!(!room.is_balcony(), "seed {seed}: roof over balcony {id}");
            }
        }
    }
}

#[test]
fn merged_roofs_match_their_rooms() {
    let config = config_with(|c| {
        c.room_count = 10;
        c.floor_count = 1;
        c.roof_enabled = true;
    });
    for seed in (0..300).chain([1295]) {
        let building = generate(&config, seed);
        let errors = validation::check_roof_extents(building.plan(), building.roofs());
        assert!(errors.is_empty(), "seed {seed}: {errors:?}");
    }
}

#[test]
fn blocked_flags_are_symmetric() {
    let config = config_with(|c| {
        c.floor_count = 3;
        c.room_count = 8;
    });
    for seed in 0..20 {
        let building = generate(&config, seed);
        let plan = building.plan();
        for c in plan.connections() {
            let start = plan.room(c.room_start).unwrap();
            let end = plan.room(c.room_end).unwrap();
            if c.is_stair() {
                assert!(start.is_blocked(Direction::Up) && end.is_blocked(Direction::Down));
            } else {
                assert!(start.is_blocked(c.direction), "seed {seed}: #{}", c.id);
                assert!(end.is_blocked(c.direction.reverse()), "seed {seed}: #{}", c.id);
            }
        }
    }
}

#[test]
fn rediscovery_is_idempotent() {
    let config = config_with(|c| {
        c.floor_count = 2;
        c.room_count = 8;
    });
    let building = generate(&config, 77);
    let mut plan = building.plan().clone();
    let mut rng = StdRng::seed_from_u64(0);
    let before = plan.connections().len();
    let ids: Vec<_> = plan.rooms().iter().map(|r| r.id).collect();
    for id in ids {
        assert_eq!(plan.rediscover_connections(id, &config, &mut rng), 0);
    }
    assert_eq!(plan.connections().len(), before);
    assert_eq!(&plan, building.plan());
}

#[test]
fn validation_passes_across_seeds() {
    let config = config_with(|c| {
        c.floor_count = 4;
        c.room_count = 9;
        c.remove_room_count = 2;
        c.balcony_count = 2;
        c.outside_door_count = 2;
        c.window_count = 2;
        c.roof_enabled = true;
    });
    for seed in 0..25 {
        let building = generate(&config, seed);
        let errors: Vec<_> = validation::validate_all(&building)
            .into_iter()
            .filter(|e| e.severity == Severity::Error)
            .collect();
        assert!(errors.is_empty(), "seed {seed}: {errors:?}");
    }
}

// ── Errors ─────────────────────────────────────────────────────────────

#[test]
fn invalid_config_is_an_error() {
    let config = config_with(|c| {
        c.min_room_size = 20;
        c.max_room_size = 10;
    });
    let err = generate_building_from_seed(&config, 0).unwrap_err();
    assert!(matches!(err, GenerationError::InvalidConfig(_)));
    assert!(err.to_string().contains("exceeds maximum"));
}

#[test]
fn strict_mode_aborts_on_exhaustion() {
    // A 15×15 room on a 20×20 plot leaves no room to branch.
    let config = config_with(|c| {
        c.plot_width = 20;
        c.plot_height = 20;
        c.min_room_size = 15;
        c.max_room_size = 15;
        c.room_count = 3;
        c.floor_count = 1;
        c.retry_budget = 20;
    });
    let building = generate(&config, 0);
    assert_eq!(building.plan().rooms().len(), 1);
    assert!(!building.report().is_clean());

    let strict = GenerationConfig {
        strict: true,
        ..config
    };
    assert!(matches!(
        generate_building_from_seed(&strict, 0),
        Err(GenerationError::Exhausted(_))
    ));
}

#[test]
fn preset_json_round_trips_through_generation() {
    let config: GenerationConfig = serde_json::from_str(
        r#"{ "room_count": 6, "floor_count": 2, "roof_enabled": true, "seed": 3 }"#,
    )
    .expect("valid preset");
    let building = storeygen_logic::generator::generate_from_config(&config).unwrap();
    assert_eq!(building.report().seed, Some(3));
    assert_eq!(building, generate(&config, 3));
}
