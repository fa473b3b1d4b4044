//! storeygen Headless Generation Harness
//!
//! Generates buildings from the bundled presets across many seeds and checks
//! every layout invariant. Runs entirely in-process, no rendering.
//!
//! Usage:
//!   cargo run -p storeygen-simtest
//!   cargo run -p storeygen-simtest -- --verbose
//!   cargo run -p storeygen-simtest -- --seeds 200
//!   cargo run -p storeygen-simtest -- --seed 100

use log::{LevelFilter, Metadata, Record};
use serde::Deserialize;
use storeygen_logic::config::{validate_config, GenerationConfig};
use storeygen_logic::direction::Direction;
use storeygen_logic::error::GenerationError;
use storeygen_logic::generator::{generate_building_from_seed, Building, Diagnostic};
use storeygen_logic::validation::{validate_all, Severity};

// ── Building presets (bundled JSON) ─────────────────────────────────────
const PRESETS_JSON: &str = include_str!("../../../data/building_presets.json");

#[derive(Debug, Deserialize)]
struct Preset {
    name: String,
    config: GenerationConfig,
}

// ── Logging ─────────────────────────────────────────────────────────────

struct StderrLogger;

impl log::Log for StderrLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            eprintln!("[{:<5}] {}", record.level(), record.args());
        }
    }

    fn flush(&self) {}
}

static LOGGER: StderrLogger = StderrLogger;

fn init_logging(verbose: bool) {
    let level = if verbose {
        LevelFilter::Info
    } else {
        LevelFilter::Error
    };
    if log::set_logger(&LOGGER).is_ok() {
        log::set_max_level(level);
    }
}

// ── Test harness ────────────────────────────────────────────────────────

struct TestResult {
    name: String,
    passed: bool,
    detail: String,
}

struct Options {
    verbose: bool,
    seeds: u64,
    first_seed: u64,
}

fn parse_args() -> Options {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let value = |flag: &str| {
        args.iter()
            .position(|a| a == flag)
            .and_then(|i| args.get(i + 1))
            .cloned()
    };
    Options {
        verbose: args.iter().any(|a| a == "--verbose"),
        seeds: value("--seeds").and_then(|s| s.parse().ok()).unwrap_or(50),
        first_seed: value("--seed").and_then(|s| s.parse().ok()).unwrap_or(0),
    }
}

fn main() {
    let opts = parse_args();
    init_logging(opts.verbose);

    let presets: Vec<Preset> = match serde_json::from_str(PRESETS_JSON) {
        Ok(p) => p,
        Err(e) => {
            eprintln!("building_presets.json: {}", e);
            std::process::exit(1);
        }
    };

    println!("=== storeygen Generation Harness ===\n");

    let mut results = Vec::new();

    // 1. Preset data
    results.extend(validate_presets(&presets));

    // 2. Seed sweep over every preset
    results.extend(validate_seed_sweep(&presets, &opts));

    // 3. Determinism
    results.extend(validate_determinism(&presets, opts.first_seed));

    // 4. Reference scenarios
    results.extend(validate_scenarios(opts.first_seed));

    // 5. Error handling
    results.extend(validate_error_handling());

    // ── Summary ──
    println!();
    let passed = results.iter().filter(|r| r.passed).count();
    let failed = results.iter().filter(|r| !r.passed).count();
    let total = results.len();

    for r in &results {
        let icon = if r.passed { "✓" } else { "✗" };
        if !r.passed || opts.verbose {
            println!("  {} {}: {}", icon, r.name, r.detail);
        }
    }

    println!(
        "\n=== RESULT: {}/{} passed, {} failed ===",
        passed, total, failed
    );

    if failed > 0 {
        std::process::exit(1);
    }
}

// ── 1. Presets ──────────────────────────────────────────────────────────

fn validate_presets(presets: &[Preset]) -> Vec<TestResult> {
    println!("--- Presets ---");
    let mut results = Vec::new();

    results.push(TestResult {
        name: "presets_not_empty".into(),
        passed: !presets.is_empty(),
        detail: format!("{} presets loaded", presets.len()),
    });

    for p in presets {
        let errors = validate_config(&p.config);
        results.push(TestResult {
            name: format!("preset_{}_valid", p.name),
            passed: errors.is_empty(),
            detail: if errors.is_empty() {
                format!(
                    "{} rooms, {} floors, roof {}",
                    p.config.room_count,
                    p.config.floor_count,
                    if p.config.roof_enabled { "on" } else { "off" }
                )
            } else {
                errors
                    .iter()
                    .map(|e| e.to_string())
                    .collect::<Vec<_>>()
                    .join("; ")
            },
        });
    }

    results
}

// ── 2. Seed sweep ───────────────────────────────────────────────────────

fn validate_seed_sweep(presets: &[Preset], opts: &Options) -> Vec<TestResult> {
    println!("--- Seed Sweep ({} seeds per preset) ---", opts.seeds);
    let mut results = Vec::new();

    for p in presets {
        let mut failures = Vec::new();
        let mut warnings = 0;
        let mut diagnostics = 0;
        let mut rooms = 0;

        for seed in opts.first_seed..opts.first_seed + opts.seeds {
            let building = match generate_building_from_seed(&p.config, seed) {
                Ok(b) => b,
                Err(e) => {
                    failures.push(format!("seed {}: {}", seed, e));
                    continue;
                }
            };
            rooms += building.plan().rooms().len();
            for d in &building.report().diagnostics {
                log::info!("{} seed {}: {}", p.name, seed, d);
            }
            diagnostics += building.report().diagnostics.len();
            for err in validate_all(&building) {
                match err.severity {
                    Severity::Error => {
                        failures.push(format!("seed {}: [{}] {}", seed, err.category, err.message))
                    }
                    Severity::Warning => warnings += 1,
                }
            }
        }

        results.push(TestResult {
            name: format!("sweep_{}", p.name),
            passed: failures.is_empty(),
            detail: if failures.is_empty() {
                format!(
                    "{} rooms generated, {} warnings, {} diagnostics",
                    rooms, warnings, diagnostics
                )
            } else {
                format!(
                    "{} failures, first: {}",
                    failures.len(),
                    failures[0]
                )
            },
        });
    }

    results
}

// ── 3. Determinism ──────────────────────────────────────────────────────

fn validate_determinism(presets: &[Preset], seed: u64) -> Vec<TestResult> {
    println!("--- Determinism ---");
    let mut results = Vec::new();

    for p in presets {
        let a = generate_building_from_seed(&p.config, seed);
        let b = generate_building_from_seed(&p.config, seed);
        let same = match (&a, &b) {
            (Ok(a), Ok(b)) => a == b,
            _ => false,
        };
        results.push(TestResult {
            name: format!("deterministic_{}", p.name),
            passed: same,
            detail: format!("seed {} generated twice", seed),
        });
    }

    results
}

// ── 4. Reference scenarios ──────────────────────────────────────────────

fn scenario(
    name: &str,
    config: GenerationConfig,
    seed: u64,
    check: impl FnOnce(&Building) -> Result<String, String>,
) -> TestResult {
    let (passed, detail) = match generate_building_from_seed(&config, seed) {
        Ok(building) => match check(&building) {
            Ok(detail) => (true, detail),
            Err(detail) => (false, detail),
        },
        Err(e) => (false, e.to_string()),
    };
    TestResult {
        name: name.into(),
        passed,
        detail,
    }
}

fn validate_scenarios(seed: u64) -> Vec<TestResult> {
    println!("--- Scenarios ---");
    let mut results = Vec::new();

    let single = GenerationConfig {
        room_count: 1,
        floor_count: 1,
        roof_enabled: true,
        ..GenerationConfig::default()
    };
    results.push(scenario("single_room", single, seed, |b| {
        let plan = b.plan();
        let room = plan.rooms().first().ok_or("no room generated")?;
        let centered = (room.x() - 25.0).abs() < 1e-3 && (room.z() - 25.0).abs() < 1e-3;
        if plan.rooms().len() == 1 && plan.connections().is_empty() && centered && b.roofs().len() == 1 {
            Ok(format!("{:.1}×{:.1} room under one roof", room.width(), room.height()))
        } else {
            Err(format!(
                "{} rooms, {} connections, {} roofs",
                plan.rooms().len(),
                plan.connections().len(),
                b.roofs().len()
            ))
        }
    }));

    let five = GenerationConfig {
        room_count: 5,
        floor_count: 1,
        pathfind_doors: false,
        ..GenerationConfig::default()
    };
    results.push(scenario("five_rooms_connected", five, seed, |b| {
        let reached = storeygen_logic::doors::reachable_rooms(b.plan(), 0).len();
        let count = b.plan().room_count_on(0);
        if count == 5 && reached == 5 {
            Ok("5 rooms, all reachable".into())
        } else {
            Err(format!("{} rooms, {} reachable", count, reached))
        }
    }));

    let three = GenerationConfig {
        room_count: 6,
        floor_count: 3,
        ..GenerationConfig::default()
    };
    results.push(scenario("three_floor_stairs", three, seed, |b| {
        let plan = b.plan();
        let stairs: Vec<usize> = (0..2)
            .map(|f| plan.connections_on(f).filter(|c| c.is_stair()).count())
            .collect();
        let stacked = (1..3).all(|f| plan.rooms_on(f).all(|r| r.is_blocked(Direction::Down)));
        if stairs == [1, 1] && stacked {
            Ok("one stair per floor gap".into())
        } else {
            Err(format!("stairs per gap {:?}, all stacked: {}", stairs, stacked))
        }
    }));

    results
}

// ── 5. Error handling ───────────────────────────────────────────────────

fn validate_error_handling() -> Vec<TestResult> {
    println!("--- Error Handling ---");
    let mut results = Vec::new();

    let invalid = GenerationConfig {
        floor_count: 0,
        ..GenerationConfig::default()
    };
    let rejected = matches!(
        generate_building_from_seed(&invalid, 0),
        Err(GenerationError::InvalidConfig(_))
    );
    results.push(TestResult {
        name: "invalid_config_rejected".into(),
        passed: rejected,
        detail: "zero floors".into(),
    });

    let cramped = GenerationConfig {
        plot_width: 20,
        plot_height: 20,
        min_room_size: 15,
        max_room_size: 15,
        room_count: 3,
        floor_count: 1,
        retry_budget: 50,
        ..GenerationConfig::default()
    };
    let degraded = match generate_building_from_seed(&cramped, 0) {
        Ok(b) => b
            .report()
            .diagnostics
            .iter()
            .any(|d| matches!(d, Diagnostic::Exhausted(_))),
        Err(_) => false,
    };
    results.push(TestResult {
        name: "exhaustion_degrades".into(),
        passed: degraded,
        detail: "cramped plot reports exhausted ground-room search".into(),
    });

    let strict = GenerationConfig {
        strict: true,
        ..cramped
    };
    let aborted = matches!(
        generate_building_from_seed(&strict, 0),
        Err(GenerationError::Exhausted(_))
    );
    results.push(TestResult {
        name: "strict_mode_aborts".into(),
        passed: aborted,
        detail: "strict run stops on the first exhausted search".into(),
    });

    results
}
