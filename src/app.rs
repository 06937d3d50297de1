use glam::Vec2;
use instant::Instant;

use croc_arena::config::{ArenaConfig, ViewportClass};
use croc_arena::ecs::systems::steering;
use croc_arena::{PickupKind, Simulation, StepOutcome};

/// Simulated seconds per tick.
const TICK_RATE: f32 = 1.0 / 60.0;
/// Ticks to run when no count is given.
const DEFAULT_TICKS: u64 = 60 * 60;
/// How often to log stats (simulated seconds).
const STATS_LOG_INTERVAL: f32 = 5.0;
/// Any non-empty value other than "0" selects the compact preset.
const COMPACT_ENV: &str = "CROC_ARENA_COMPACT";

// ---------------------------------------------------------------------------
// Step timing
// ---------------------------------------------------------------------------

struct StepStats {
    step_count: u64,
    sim_time_since_log: f32,
    step_time_sum: f64,
    step_time_min: f64,
    step_time_max: f64,
    steps_since_log: u32,
}

impl StepStats {
    fn new() -> Self {
        Self {
            step_count: 0,
            sim_time_since_log: 0.0,
            step_time_sum: 0.0,
            step_time_min: f64::MAX,
            step_time_max: 0.0,
            steps_since_log: 0,
        }
    }

    /// Record one step's wall time. Returns true when a log line is due.
    fn record_step(&mut self, wall: f64, dt: f32) -> bool {
        self.step_count += 1;
        self.steps_since_log += 1;
        self.sim_time_since_log += dt;
        self.step_time_sum += wall;
        self.step_time_min = self.step_time_min.min(wall);
        self.step_time_max = self.step_time_max.max(wall);
        self.sim_time_since_log >= STATS_LOG_INTERVAL
    }

    fn log(&mut self, sim: &Simulation) {
        let avg_us = (self.step_time_sum / self.steps_since_log.max(1) as f64) * 1_000_000.0;
        let counts = sim.counts();
        let level = sim.player().map(|p| p.level).unwrap_or(0);
        log::info!(
            "Step avg: {:.1}us | min: {:.1}us | max: {:.1}us | steps: {} | level {} | bank {} | crocs {} | pellets {} rocks {} chests {}",
            avg_us,
            self.step_time_min * 1_000_000.0,
            self.step_time_max * 1_000_000.0,
            self.step_count,
            level,
            sim.bank(),
            counts.npcs,
            counts.pellets,
            counts.rocks,
            counts.chests,
        );
        log::debug!("Systems: {}", sim.timers().summary());

        self.sim_time_since_log = 0.0;
        self.step_time_sum = 0.0;
        self.step_time_min = f64::MAX;
        self.step_time_max = 0.0;
        self.steps_since_log = 0;
    }
}

// ---------------------------------------------------------------------------
// Autopilot
// ---------------------------------------------------------------------------

/// Head for the nearest pellet. `None` keeps the current course.
fn autopilot(sim: &Simulation) -> Option<Vec2> {
    let head = sim.player()?.position;
    let target = sim
        .pickups(PickupKind::Pellet)
        .into_iter()
        .min_by(|a, b| a.distance_squared(head).total_cmp(&b.distance_squared(head)))?;
    steering::heading_towards(head, target)
}

// ---------------------------------------------------------------------------
// Setup
// ---------------------------------------------------------------------------

struct RunArgs {
    ticks: u64,
    seed: Option<u64>,
    compact: bool,
}

fn parse_args() -> Result<RunArgs, Box<dyn std::error::Error>> {
    let mut args = std::env::args().skip(1);
    let ticks = match args.next() {
        Some(raw) => raw.parse().map_err(|e| format!("invalid tick count {raw:?}: {e}"))?,
        None => DEFAULT_TICKS,
    };
    let seed = match args.next() {
        Some(raw) => Some(raw.parse().map_err(|e| format!("invalid seed {raw:?}: {e}"))?),
        None => None,
    };
    let compact = std::env::var(COMPACT_ENV).is_ok_and(|v| !v.is_empty() && v != "0");
    Ok(RunArgs { ticks, seed, compact })
}

/// Entry point: run one headless session and report how it went.
pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let args = parse_args()?;

    let mut config = ArenaConfig::default();
    if args.compact {
        config.set_viewport_class(ViewportClass::Compact);
    }
    if let Some(seed) = args.seed {
        config = config.with_seed(seed);
    }
    log::info!(
        "Running {} ticks ({} layout, seed {})",
        args.ticks,
        config.viewport_class.label(),
        args.seed.map_or_else(|| "random".to_string(), |s| s.to_string()),
    );

    let mut sim = Simulation::new(config);
    let mut stats = StepStats::new();

    for _ in 0..args.ticks {
        let heading = autopilot(&sim);
        let started = Instant::now();
        let outcome = sim.step(TICK_RATE, heading);
        if stats.record_step(started.elapsed().as_secs_f64(), TICK_RATE) {
            stats.log(&sim);
        }
        if outcome.is_over() {
            break;
        }
    }

    match sim.outcome() {
        StepOutcome::Running => log::info!(
            "Survived {} ticks at level {} with {} banked",
            sim.tick_count(),
            sim.player().map(|p| p.level).unwrap_or(0),
            sim.bank(),
        ),
        StepOutcome::PlayerEliminated { by_level } => log::info!(
            "Eliminated by a level {} croc after {} ticks, {} banked",
            by_level,
            sim.tick_count(),
            sim.bank(),
        ),
    }
    Ok(())
}
