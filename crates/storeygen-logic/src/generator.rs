//! Whole-building generation.
//!
//! Runs every pass in order against a fresh [`FloorPlan`]:
//!
//! 1. ground floor rooms, then door pruning on floor 0
//! 2. for each upper floor: stairwell, stacked rooms, door pruning
//! 3. balconies on the top floor
//! 4. roofs, outside doors, windows
//!
//! A search that runs out of attempts is recorded in the
//! [`GenerationReport`] and the run carries on with what it has, unless the
//! config asks for strict mode.

use crate::balcony::make_balcony_rooms;
use crate::builder::build_ground_floor;
use crate::config::{validate_config, GenerationConfig};
use crate::doors::{prune_doors, PruneOutcome};
use crate::error::{GenerationError, PlacementExhausted};
use crate::fixtures::{place_outside_doors, place_windows, OutsideDoor, Window};
use crate::plan::FloorPlan;
use crate::roof::{generate_roofs, RoofRegion};
use crate::vertical::{add_remaining_rooms_on_floor, add_stairwell_and_room};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Something that went wrong without aborting the run.
#[derive(Debug, Clone, PartialEq)]
pub enum Diagnostic {
    Exhausted(PlacementExhausted),
    IncompletePrune { floor: usize, outcome: PruneOutcome },
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Diagnostic::Exhausted(e) => write!(f, "{}", e),
            Diagnostic::IncompletePrune { floor, outcome } => write!(
                f,
                "door walk on floor {} left {} rooms unvisited",
                floor,
                outcome.unvisited().len()
            ),
        }
    }
}

/// What happened during a run besides the building itself.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GenerationReport {
    /// Seed the random stream started from, when known.
    pub seed: Option<u64>,
    pub diagnostics: Vec<Diagnostic>,
}

impl GenerationReport {
    pub fn is_clean(&self) -> bool {
        self.diagnostics.is_empty()
    }

    fn exhausted(&mut self, config: &GenerationConfig, e: PlacementExhausted) -> Result<(), GenerationError> {
        if config.strict {
            return Err(e.into());
        }
        self.diagnostics.push(Diagnostic::Exhausted(e));
        Ok(())
    }

    fn pruned(&mut self, floor: usize, outcome: PruneOutcome) {
        if !outcome.is_complete() {
            self.diagnostics
                .push(Diagnostic::IncompletePrune { floor, outcome });
        }
    }
}

/// A generated building. Read-only once returned.
#[derive(Debug, Clone, PartialEq)]
pub struct Building {
    config: GenerationConfig,
    plan: FloorPlan,
    roofs: Vec<RoofRegion>,
    outside_doors: Vec<OutsideDoor>,
    windows: Vec<Window>,
    report: GenerationReport,
}

impl Building {
    pub fn config(&self) -> &GenerationConfig {
        &self.config
    }

    pub fn plan(&self) -> &FloorPlan {
        &self.plan
    }

    /// Empty unless roofs were enabled.
    pub fn roofs(&self) -> &[RoofRegion] {
        &self.roofs
    }

    pub fn outside_doors(&self) -> &[OutsideDoor] {
        &self.outside_doors
    }

    pub fn windows(&self) -> &[Window] {
        &self.windows
    }

    pub fn report(&self) -> &GenerationReport {
        &self.report
    }
}

/// Generate a building from `config`, drawing every random choice from `rng`.
///
/// Each call builds a new plan from nothing, so calling it again is how a
/// layout is regenerated.
pub fn generate_building(
    config: &GenerationConfig,
    rng: &mut impl Rng,
) -> Result<Building, GenerationError> {
    let errors = validate_config(config);
    if !errors.is_empty() {
        return Err(GenerationError::InvalidConfig(errors));
    }

    let mut plan = FloorPlan::for_config(config);
    let mut report = GenerationReport::default();

    if let Err(e) = build_ground_floor(&mut plan, config, rng) {
        report.exhausted(config, e)?;
    }
    if config.pathfind_doors {
        report.pruned(0, prune_doors(&mut plan, config, 0, rng));
    }

    for floor in 1..config.floor_count as usize {
        if let Err(e) = add_stairwell_and_room(&mut plan, config, floor - 1, rng) {
            // Nothing above an unreachable floor.
            report.exhausted(config, e)?;
            break;
        }
        add_remaining_rooms_on_floor(&mut plan, config, floor, rng);
        if config.pathfind_doors {
            report.pruned(floor, prune_doors(&mut plan, config, floor, rng));
        }
    }

    if config.floor_count > 1 {
        let top = config.top_floor();
        if let Err(e) = make_balcony_rooms(&mut plan, config, top, config.balcony_count, rng) {
            report.exhausted(config, e)?;
        }
    }

    let roofs = if config.roof_enabled {
        generate_roofs(&plan, config)
    } else {
        Vec::new()
    };

    let mut outside_doors = Vec::new();
    if let Err(e) = place_outside_doors(&mut plan, config, rng, &mut outside_doors) {
        report.exhausted(config, e)?;
    }
    let windows = place_windows(&plan, config, rng);

    log::info!(
        "Generated {} rooms on {} floors: {} connections, {} roofs, {} outside doors, {} windows",
        plan.rooms().len(),
        plan.floor_count(),
        plan.connections().len(),
        roofs.len(),
        outside_doors.len(),
        windows.len()
    );
    if !report.is_clean() {
        log::warn!("Generation finished with {} diagnostics", report.diagnostics.len());
    }

    Ok(Building {
        config: config.clone(),
        plan,
        roofs,
        outside_doors,
        windows,
        report,
    })
}

/// Generate with a `StdRng` seeded from `seed`. Same config and seed give the
/// same building.
pub fn generate_building_from_seed(
    config: &GenerationConfig,
    seed: u64,
) -> Result<Building, GenerationError> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut building = generate_building(config, &mut rng)?;
    building.report.seed = Some(seed);
    Ok(building)
}

/// Generate with `config.seed`, or a fresh seed from OS entropy.
pub fn generate_from_config(config: &GenerationConfig) -> Result<Building, GenerationError> {
    let seed = match config.seed {
        Some(seed) => seed,
        None => {
            let seed: u64 = StdRng::from_entropy().gen();
            log::info!("Using random seed {}", seed);
            seed
        }
    };
    generate_building_from_seed(config, seed)
}
