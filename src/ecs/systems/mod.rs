pub mod behavior;
pub mod combat;
pub mod feeding;
pub mod movement;
pub mod population;
pub mod steering;

use glam::Vec2;

use crate::body::{self, BodySnapshot};
use crate::camera::Viewport;
use crate::config::ArenaConfig;
use crate::debug::timer::{SystemPhase, SystemTimers};
use combat::{CombatBuffers, CombatReport};
use feeding::{FeedingBuffers, FeedingReport};
use population::PopulationReport;

/// Scratch reused across ticks.
pub struct TickBuffers {
    pub snapshots: Vec<BodySnapshot>,
    pub feeding: FeedingBuffers,
    pub combat: CombatBuffers,
    /// Entities to despawn at the end of the step.
    pub removals: Vec<hecs::Entity>,
}

impl TickBuffers {
    pub fn new(capacity: usize) -> Self {
        Self {
            snapshots: Vec::with_capacity(capacity),
            feeding: FeedingBuffers::new(capacity),
            combat: CombatBuffers::new(capacity),
            removals: Vec::with_capacity(capacity),
        }
    }
}

/// What happened during one tick.
#[derive(Debug, Default, Clone, Copy)]
pub struct TickReport {
    pub feeding: FeedingReport,
    pub combat: CombatReport,
    pub population: PopulationReport,
}

/// Run all simulation systems for one tick.
///
/// Order matters: a croc eliminated this tick has already had its chance to
/// eat, and can never eat after being eliminated. Population runs last so
/// spawns see this tick's survivors. Removals are left queued in
/// `bufs.removals` for the caller to flush.
pub fn tick(
    world: &mut hecs::World,
    player: hecs::Entity,
    dt: f32,
    heading: Option<Vec2>,
    config: &ArenaConfig,
    viewport: &Viewport,
    rng: &mut fastrand::Rng,
    bufs: &mut TickBuffers,
    timers: &mut SystemTimers,
) -> TickReport {
    let mut report = TickReport::default();

    // 1. Player input
    timers.begin();
    steering::steer_player(world, player, heading);
    timers.end(SystemPhase::Steering);

    // 2. Wild croc wandering
    timers.begin();
    behavior::update(world, dt, rng);
    timers.end(SystemPhase::Wander);

    // 3. Integrate, walls, trails
    timers.begin();
    movement::integrate(world, dt, config.world_size);
    timers.end(SystemPhase::Movement);

    // 4. Bodies for this tick
    timers.begin();
    body::rebuild(world, Some(player), &mut bufs.snapshots);
    timers.end(SystemPhase::BodyRebuild);

    // 5. Magnet, then pickups
    timers.begin();
    feeding::attract(world, player, config.magnet_radius, config.magnet_pull);
    report.feeding = feeding::update(
        world,
        player,
        &mut bufs.snapshots,
        &mut bufs.feeding,
        &mut bufs.removals,
        rng,
    );
    timers.end(SystemPhase::Feeding);

    // 6. Croc vs croc. Bodies are rebuilt since eaters grew.
    timers.begin();
    body::rebuild(world, Some(player), &mut bufs.snapshots);
    report.combat = combat::resolve(world, player, &mut bufs.snapshots, &mut bufs.combat, &mut bufs.removals);
    timers.end(SystemPhase::Combat);
    if report.combat.player_eliminated_by.is_some() {
        return report;
    }

    // 7. Refill
    timers.begin();
    body::rebuild(world, Some(player), &mut bufs.snapshots);
    report.population = population::replenish(
        world,
        config,
        viewport,
        config.spawn_attempts,
        &mut bufs.snapshots,
        &bufs.removals,
        rng,
    );
    timers.end(SystemPhase::Population);

    report
}

/// Despawn everything queued during the tick.
pub fn flush_removals(world: &mut hecs::World, removals: &mut Vec<hecs::Entity>) {
    for entity in removals.drain(..) {
        // Already gone is fine.
        let _ = world.despawn(entity);
    }
}
