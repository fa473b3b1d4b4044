//! Layout validation for generated buildings.
//!
//! Pure functions over a finished plan and its fixtures. Each check returns
//! the problems it found; an empty list means the invariant holds.

use std::collections::{HashMap, HashSet};

use crate::direction::Direction;
use crate::doors::reachable_rooms;
use crate::fixtures::{OutsideDoor, Window};
use crate::generator::Building;
use crate::geometry::{approx_eq, EPSILON};
use crate::plan::FloorPlan;
use crate::roof::RoofRegion;
use crate::room::RoomId;

/// A layout validation error.
#[derive(Debug, Clone)]
pub struct ValidationError {
    pub category: &'static str,
    pub severity: Severity,
    pub message: String,
}

/// Error severity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Severity {
    Error,
    Warning,
}

fn error(category: &'static str, message: String) -> ValidationError {
    ValidationError {
        category,
        severity: Severity::Error,
        message,
    }
}

// ── A. Room geometry (per-room) ─────────────────────────────────────────

/// Check that no room has zero or negative dimensions.
pub fn check_room_dimensions(plan: &FloorPlan) -> Vec<ValidationError> {
    plan.rooms()
        .iter()
        .filter(|r| r.width() <= 0.0 || r.height() <= 0.0)
        .map(|r| {
            error(
                "room_geometry",
                format!(
                    "Room #{} has non-positive dimensions: {}×{}",
                    r.id,
                    r.width(),
                    r.height()
                ),
            )
        })
        .collect()
}

/// Check that every room lies inside the plot.
pub fn check_rooms_within_plot(plan: &FloorPlan) -> Vec<ValidationError> {
    let (w, h) = (plan.plot_width() + EPSILON, plan.plot_height() + EPSILON);
    let mut errors = Vec::new();
    for r in plan.rooms() {
        let b = r.bounds();
        if !b.within(w, h) {
            errors.push(error(
                "room_geometry",
                format!(
                    "Room #{} on floor {} extends outside the plot: ({:.2}, {:.2})-({:.2}, {:.2})",
                    r.id, r.floor, b.min_x, b.min_z, b.max_x, b.max_z
                ),
            ));
        }
    }
    errors
}

// ── B. Room-to-room (pairwise) ──────────────────────────────────────────

/// Check no two rooms on the same floor overlap.
pub fn check_room_overlaps(plan: &FloorPlan) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    for floor in 0..plan.floor_count() {
        let rooms: Vec<_> = plan.rooms_on(floor).collect();
        for i in 0..rooms.len() {
            for j in (i + 1)..rooms.len() {
                if rooms[i].intersects(rooms[j]) {
                    errors.push(error(
                        "room_overlap",
                        format!(
                            "Rooms #{} and #{} overlap on floor {}",
                            rooms[i].id, rooms[j].id, floor
                        ),
                    ));
                }
            }
        }
    }
    errors
}

// ── C. Connection validity ──────────────────────────────────────────────

/// Check that both ends of every connection exist on the expected floors.
pub fn check_connection_rooms_exist(plan: &FloorPlan) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    for c in plan.connections() {
        let end_floor = if c.is_stair() { c.floor + 1 } else { c.floor };
        let start_ok = plan.room(c.room_start).is_some_and(|r| r.floor == c.floor);
        let end_ok = plan.room(c.room_end).is_some_and(|r| r.floor == end_floor);
        if !start_ok || !end_ok {
            errors.push(error(
                "connection",
                format!(
                    "Connection #{} joins rooms #{} and #{} that are missing or on the wrong floor",
                    c.id, c.room_start, c.room_end
                ),
            ));
        }
    }
    errors
}

/// Check that no room pair is connected twice.
pub fn check_duplicate_connections(plan: &FloorPlan) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    let mut seen: HashSet<(RoomId, RoomId)> = HashSet::new();
    for c in plan.connections() {
        let key = (c.room_start.min(c.room_end), c.room_start.max(c.room_end));
        if !seen.insert(key) {
            errors.push(error(
                "connection",
                format!("Rooms #{} and #{} are connected more than once", key.0, key.1),
            ));
        }
    }
    errors
}

/// Check that both ends of every connection block the side it crosses.
pub fn check_blocked_symmetry(plan: &FloorPlan) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    for c in plan.connections() {
        let (Some(start), Some(end)) = (plan.room(c.room_start), plan.room(c.room_end)) else {
            continue;
        };
        let (start_dir, end_dir) = if c.is_stair() {
            (Direction::Up, Direction::Down)
        } else {
            (c.direction, c.direction.reverse())
        };
        if !start.is_blocked(start_dir) || !end.is_blocked(end_dir) {
            errors.push(error(
                "blocked_flags",
                format!(
                    "Connection #{} ({:?}) between #{} and #{} is not blocked on both sides",
                    c.id, c.direction, c.room_start, c.room_end
                ),
            ));
        }
    }
    errors
}

/// Check that each populated upper floor is reached by exactly one stair,
/// arriving in a room with the same footprint as its source.
pub fn check_stairs(plan: &FloorPlan) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    for floor in 0..plan.floor_count().saturating_sub(1) {
        if plan.room_count_on(floor + 1) == 0 {
            continue;
        }
        let stairs: Vec<_> = plan.connections_on(floor).filter(|c| c.is_stair()).collect();
        if stairs.len() != 1 {
            errors.push(error(
                "stairs",
                format!(
                    "Floors {} and {} are joined by {} stairs",
                    floor,
                    floor + 1,
                    stairs.len()
                ),
            ));
        }
        for c in stairs {
            let same = match (plan.room(c.room_start), plan.room(c.room_end)) {
                (Some(a), Some(b)) => a.bounds() == b.bounds(),
                _ => false,
            };
            if !same || !c.is_entrance_valid() {
                errors.push(error(
                    "stairs",
                    format!("Stair #{} does not join two stacked rooms", c.id),
                ));
            }
        }
    }
    errors
}

// ── D. Connectivity (graph-level) ───────────────────────────────────────

/// Check that every room on a floor is reachable through open doors.
///
/// The ground floor must always be connected. Upper floors lose rooms when
/// stacking skips some, which can split them, so those are warnings.
pub fn check_floor_connectivity(plan: &FloorPlan) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    for floor in 0..plan.floor_count() {
        let reached = reachable_rooms(plan, floor);
        let unreached: Vec<RoomId> = plan
            .room_ids_on(floor)
            .iter()
            .copied()
            .filter(|id| !reached.contains(id))
            .collect();
        if !unreached.is_empty() {
            errors.push(ValidationError {
                category: "connectivity",
                severity: if floor == 0 {
                    Severity::Error
                } else {
                    Severity::Warning
                },
                message: format!(
                    "Floor {}: {} of {} rooms unreachable (e.g. room #{})",
                    floor,
                    unreached.len(),
                    plan.room_count_on(floor),
                    unreached[0]
                ),
            });
        }
    }
    errors
}

// ── E. Roofs ────────────────────────────────────────────────────────────

/// Check that every room with an open ceiling is under exactly one roof and
/// that no roof covers a room with something above it.
pub fn check_roof_coverage(plan: &FloorPlan, roofs: &[RoofRegion]) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    let mut covered: HashMap<RoomId, usize> = HashMap::new();
    for roof in roofs {
        for &id in &roof.rooms {
            *covered.entry(id).or_default() += 1;
        }
    }
    for r in plan.rooms() {
        let count = covered.get(&r.id).copied().unwrap_or(0);
        let expected = usize::from(!r.is_blocked(Direction::Up));
        if count != expected {
            errors.push(error(
                "roof",
                format!(
                    "Room #{} on floor {} is under {} roofs, expected {}",
                    r.id, r.floor, count, expected
                ),
            ));
        }
    }
    errors
}

/// Check that every merged roof is exactly as long as the chain it covers.
///
/// A merged roof runs along x when its yaw is 90 or 270 degrees, along z
/// otherwise. Adjacent rooms sit `2 * BOUNDS_GAP` apart, which the tolerance
/// absorbs.
pub fn check_roof_extents(plan: &FloorPlan, roofs: &[RoofRegion]) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    for roof in roofs.iter().filter(|r| r.rooms.len() > 1) {
        let along_x = approx_eq(roof.yaw_degrees, 90.0) || approx_eq(roof.yaw_degrees, 270.0);
        let spans: Vec<(f32, f32)> = roof
            .rooms
            .iter()
            .filter_map(|&id| plan.room(id))
            .map(|r| {
                let b = r.bounds();
                if along_x {
                    (b.min_x, b.max_x)
                } else {
                    (b.min_z, b.max_z)
                }
            })
            .collect();
        let lo = spans.iter().map(|s| s.0).fold(f32::MAX, f32::min);
        let hi = spans.iter().map(|s| s.1).fold(f32::MIN, f32::max);
        let extent = hi - lo;
        if spans.len() != roof.rooms.len()
            || (roof.scale.z - extent).abs() > EPSILON * roof.rooms.len() as f32
        {
            errors.push(error(
                "roof",
                format!(
                    "Roof over rooms {:?} on floor {} is {:.3} long but the rooms span {:.3}",
                    roof.rooms, roof.floor, roof.scale.z, extent
                ),
            ));
        }
    }
    errors
}

// ── F. Fixtures ─────────────────────────────────────────────────────────

/// Check outside doors: ground floor only, one per wall, wall blocked.
pub fn check_outside_doors(plan: &FloorPlan, doors: &[OutsideDoor]) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    let mut seen = HashSet::new();
    for d in doors {
        let Some(room) = plan.room(d.room) else {
            errors.push(error("fixtures", format!("Outside door on missing room #{}", d.room)));
            continue;
        };
        if room.floor != 0 {
            errors.push(error(
                "fixtures",
                format!("Outside door on room #{} above the ground floor", d.room),
            ));
        }
        if !room.is_blocked(d.wall.into()) || !seen.insert((d.room, d.wall)) {
            errors.push(error(
                "fixtures",
                format!("Outside door on the {:?} wall of room #{} shares its wall", d.wall, d.room),
            ));
        }
    }
    errors
}

/// Check windows: never on balconies, never on blocked walls.
pub fn check_windows(plan: &FloorPlan, windows: &[Window]) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    for w in windows {
        let ok = plan
            .room(w.room)
            .is_some_and(|r| !r.is_balcony() && !r.is_blocked(w.wall.into()));
        if !ok {
            errors.push(error(
                "fixtures",
                format!("Window on the {:?} wall of room #{} is not on a free wall", w.wall, w.room),
            ));
        }
    }
    errors
}

// ── Master validation ───────────────────────────────────────────────────

/// Run all layout validations and return combined results.
pub fn validate_all(building: &Building) -> Vec<ValidationError> {
    let plan = building.plan();
    let mut all = Vec::new();
    all.extend(check_room_dimensions(plan));
    all.extend(check_rooms_within_plot(plan));
    all.extend(check_room_overlaps(plan));
    all.extend(check_connection_rooms_exist(plan));
    all.extend(check_duplicate_connections(plan));
    all.extend(check_blocked_symmetry(plan));
    all.extend(check_stairs(plan));
    if building.config().pathfind_doors {
        all.extend(check_floor_connectivity(plan));
    }
    if building.config().roof_enabled {
        all.extend(check_roof_coverage(plan, building.roofs()));
        all.extend(check_roof_extents(plan, building.roofs()));
    }
    all.extend(check_outside_doors(plan, building.outside_doors()));
    all.extend(check_windows(plan, building.windows()));
    all
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GenerationConfig;
    use crate::direction::Wall;
    use crate::generator::generate_building_from_seed;
    use crate::geometry::{Rect, Transform, Vec3};
    use crate::room::Room;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn plan_with(floor_count: u32, rooms: &[(usize, Rect)]) -> FloorPlan {
        let mut config = GenerationConfig::default();
        config.floor_count = floor_count;
        let mut plan = FloorPlan::for_config(&config);
        let mut rng = StdRng::seed_from_u64(0);
        for &(floor, rect) in rooms {
            let mut room = Room::new(plan.next_room_id(), floor, rect);
            plan.connect_new_room(&mut room, &config, &mut rng);
            plan.add_room(room);
        }
        plan
    }

    fn pair() -> FloorPlan {
        plan_with(
            1,
            &[
                (0, Rect::from_center(10.0, 10.0, 6.0, 6.0)),
                (0, Rect::from_center(16.002, 10.0, 6.0, 6.0)),
            ],
        )
    }

    #[test]
    fn test_room_outside_plot() {
        let plan = plan_with(1, &[(0, Rect::from_center(48.0, 10.0, 6.0, 6.0))]);
        assert_eq!(check_rooms_within_plot(&plan).len(), 1);
    }

    #[test]
    fn test_overlapping_rooms() {
        let mut plan = pair();
        plan.add_room(Room::new(2, 0, Rect::from_center(12.0, 12.0, 4.0, 4.0)));
        assert_eq!(check_room_overlaps(&plan).len(), 2);
    }

    #[test]
    fn test_no_overlap_adjacent() {
        assert!(check_room_overlaps(&pair()).is_empty());
    }

    #[test]
    fn test_blocked_symmetry() {
        let plan = pair();
        assert!(check_blocked_symmetry(&plan).is_empty());

        let mut broken = FloorPlan::for_config(&GenerationConfig::default());
        broken.add_room(Room::new(0, 0, Rect::from_center(10.0, 10.0, 6.0, 6.0)));
        broken.add_room(Room::new(1, 0, Rect::from_center(16.002, 10.0, 6.0, 6.0)));
        broken.add_connection(0, Direction::West, 1, 0, None);
        assert_eq!(check_blocked_symmetry(&broken).len(), 1);
    }

    #[test]
    fn test_duplicate_connections() {
        let mut plan = pair();
        assert!(check_duplicate_connections(&plan).is_empty());
        plan.add_connection(0, Direction::East, 0, 1, None);
        assert_eq!(check_duplicate_connections(&plan).len(), 1);
    }

    #[test]
    fn test_floor_connectivity() {
        let plan = plan_with(
            1,
            &[
                (0, Rect::from_center(10.0, 10.0, 6.0, 6.0)),
                (0, Rect::from_center(30.0, 30.0, 6.0, 6.0)),
            ],
        );
        let errors = check_floor_connectivity(&plan);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].severity, Severity::Error);
        assert!(check_floor_connectivity(&pair()).is_empty());
    }

    #[test]
    fn test_missing_stair() {
        let plan = plan_with(
            2,
            &[
                (0, Rect::from_center(10.0, 10.0, 6.0, 6.0)),
                (1, Rect::from_center(10.0, 10.0, 6.0, 6.0)),
            ],
        );
        assert_eq!(check_stairs(&plan).len(), 1);
    }

    #[test]
    fn test_roof_coverage() {
        let plan = pair();
        let roof = RoofRegion {
            floor: 0,
            position: Vec3::ZERO,
            yaw_degrees: 0.0,
            scale: Vec3::new(6.0, 1.0, 6.0),
            rooms: vec![0],
        };
        let errors = check_roof_coverage(&plan, std::slice::from_ref(&roof));
        assert_eq!(errors.len(), 1);
        assert!(errors[0].message.contains("#1"));

        let twice = vec![roof.clone(), roof];
        assert_eq!(check_roof_coverage(&plan, &twice).len(), 2);
    }

    #[test]
    fn test_roof_extents() {
        let plan = pair();
        let mut roof = RoofRegion {
            floor: 0,
            position: Vec3::new(13.001, 3.0, 10.0),
            yaw_degrees: 270.0,
            scale: Vec3::new(6.0, 1.0, 12.0),
            rooms: vec![0, 1],
        };
        assert!(check_roof_extents(&plan, std::slice::from_ref(&roof)).is_empty());

        roof.scale.z = 18.0;
        let errors = check_roof_extents(&plan, std::slice::from_ref(&roof));
        assert_eq!(errors.len(), 1);
        assert!(errors[0].message.contains("18.000"));

        // Measured along z, the pair is only 6 long.
        roof.scale.z = 12.0;
        roof.yaw_degrees = 180.0;
        assert_eq!(check_roof_extents(&plan, &[roof]).len(), 1);
    }

    #[test]
    fn test_window_on_blocked_wall() {
        let plan = pair();
        let window = |wall: Wall| Window {
            room: 0,
            wall,
            transform: Transform::new(Vec3::ZERO, wall.yaw_degrees()),
        };
        assert_eq!(check_windows(&plan, &[window(Wall::East)]).len(), 1);
        assert!(check_windows(&plan, &[window(Wall::West)]).is_empty());
    }

    #[test]
    fn test_outside_door_upstairs() {
        let mut plan = plan_with(2, &[(1, Rect::from_center(10.0, 10.0, 6.0, 6.0))]);
        plan.room_mut(0).unwrap().block(Direction::North);
        let door = OutsideDoor {
            room: 0,
            wall: Wall::North,
            transform: Transform::new(Vec3::ZERO, 270.0),
        };
        assert_eq!(check_outside_doors(&plan, &[door]).len(), 1);
    }

    #[test]
    fn test_validate_all_clean() {
        let mut config = GenerationConfig::default();
        config.floor_count = 3;
        config.room_count = 6;
        config.roof_enabled = true;
        for seed in 0..10 {
            let building = generate_building_from_seed(&config, seed).unwrap();
            let errors: Vec<_> = validate_all(&building)
                .into_iter()
                .filter(|e| e.severity == Severity::Error)
                .collect();
            assert!(errors.is_empty(), "seed {seed}: {errors:?}");
        }
    }
}
