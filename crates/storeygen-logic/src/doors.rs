//! Door pruning: a random walk that keeps a spanning set of doors.
//!
//! The walk starts at a floor's first room. Each time it stands in a room it
//! closes every door leading back to an already visited room unless the walk
//! itself came through that door, then leaves through a random door. The
//! doors used for first visits are never closed, so the rooms stay reachable.

use std::collections::{HashSet, VecDeque};

use crate::config::GenerationConfig;
use crate::connection::ConnectionId;
use crate::plan::FloorPlan;
use crate::room::RoomId;
use rand::Rng;

/// How a pruning walk ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PruneOutcome {
    /// Every room on the floor was visited.
    Complete,
    /// The walk reached a room with no open door.
    Stranded { unvisited: Vec<RoomId> },
    /// The step budget ran out, usually because the door graph is split.
    BudgetExhausted { unvisited: Vec<RoomId> },
}

impl PruneOutcome {
    pub fn is_complete(&self) -> bool {
        matches!(self, PruneOutcome::Complete)
    }

    pub fn unvisited(&self) -> &[RoomId] {
        match self {
            PruneOutcome::Complete => &[],
            PruneOutcome::Stranded { unvisited } | PruneOutcome::BudgetExhausted { unvisited } => {
                unvisited
            }
        }
    }
}

/// Close redundant doors on `floor` with a bounded random walk.
pub fn prune_doors(
    plan: &mut FloorPlan,
    config: &GenerationConfig,
    floor: usize,
    rng: &mut impl Rng,
) -> PruneOutcome {
    let rooms = plan.room_ids_on(floor).to_vec();
    let Some(&start) = rooms.first() else {
        return PruneOutcome::Complete;
    };

    let mut visited: HashSet<RoomId> = HashSet::new();
    let mut traversed: HashSet<ConnectionId> = HashSet::new();
    let mut current = start;
    let mut steps = 0u32;
    let mut closed = 0usize;

    while visited.len() < rooms.len() {
        visited.insert(current);

        let doors = plan.door_connections(current);
        if doors.is_empty() {
            if visited.len() == rooms.len() {
                break;
            }
            let outcome = PruneOutcome::Stranded {
                unvisited: unvisited(&rooms, &visited),
            };
            log::warn!(
                "Door walk on floor {} stranded in room {} with {} rooms unvisited",
                floor,
                current,
                outcome.unvisited().len()
            );
            return outcome;
        }

        for &id in &doors {
            let Some(c) = plan.connection(id) else {
                continue;
            };
            if visited.contains(&c.other(current)) && !traversed.contains(&id) {
                plan.close_entrance(id);
                closed += 1;
            }
        }

        if steps >= config.walk_budget {
            let outcome = PruneOutcome::BudgetExhausted {
                unvisited: unvisited(&rooms, &visited),
            };
            log::warn!(
                "Door walk on floor {} gave up after {} steps with {} rooms unvisited",
                floor,
                steps,
                outcome.unvisited().len()
            );
            return outcome;
        }
        steps += 1;

        // Picks from the snapshot, so a door closed just now can still be walked.
        let pick = doors[rng.gen_range(0..doors.len())];
        traversed.insert(pick);
        if let Some(c) = plan.connection(pick) {
            current = c.other(current);
        }
    }

    log::debug!(
        "Door walk on floor {} visited {} rooms in {} steps, closed {} doors",
        floor,
        rooms.len(),
        steps,
        closed
    );
    PruneOutcome::Complete
}

fn unvisited(rooms: &[RoomId], visited: &HashSet<RoomId>) -> Vec<RoomId> {
    rooms.iter().copied().filter(|id| !visited.contains(id)).collect()
}

/// Rooms on `floor` reachable from its first room through open doors.
pub fn reachable_rooms(plan: &FloorPlan, floor: usize) -> HashSet<RoomId> {
    let mut seen = HashSet::new();
    let Some(&start) = plan.room_ids_on(floor).first() else {
        return seen;
    };
    let mut queue = VecDeque::new();
    seen.insert(start);
    queue.push_back(start);

    while let Some(room) = queue.pop_front() {
        for id in plan.door_connections(room) {
            let Some(c) = plan.connection(id) else {
                continue;
            };
            let next = c.other(room);
            if seen.insert(next) {
                queue.push_back(next);
            }
        }
    }

    seen
}
