use glam::Vec2;

use crate::body::{self, BodySnapshot, Disc};
use crate::camera::Viewport;
use crate::config::ArenaConfig;
use crate::croc;
use crate::ecs::components::{Alive, Pickup, Position, Wander};
use crate::ecs::systems::behavior;
use crate::pickup::PickupKind;

/// Result of one replenishment pass.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct PopulationReport {
    pub spawned_npcs: usize,
    /// Wild crocs still missing after the attempt budget ran out.
    pub npc_deficit: usize,
    pub spawned_pickups: usize,
}

/// Top up wild crocs and pickups to their targets.
///
/// `bodies` holds the live crocs' bodies; newly placed crocs are appended so
/// later candidates keep clear of them too. `pending` lists entities already
/// queued for removal this tick; they do not count toward any target.
pub fn replenish(
    world: &mut hecs::World,
    config: &ArenaConfig,
    viewport: &Viewport,
    attempts: usize,
    bodies: &mut Vec<BodySnapshot>,
    pending: &[hecs::Entity],
    rng: &mut fastrand::Rng,
) -> PopulationReport {
    let mut report = PopulationReport::default();

    let live_npcs = count_live_npcs(world);
    let wanted = config.target_npcs.saturating_sub(live_npcs);
    report.spawned_npcs = spawn_npcs(world, config, viewport, wanted, attempts, bodies, rng);
    report.npc_deficit = wanted - report.spawned_npcs;
    if report.npc_deficit > 0 {
        log::debug!(
            "No safe spot for {} wild croc(s) after {} attempts, retrying next tick",
            report.npc_deficit,
            attempts
        );
    }

    for kind in PickupKind::ALL {
        let target = match kind {
            PickupKind::Pellet => config.target_pellets,
            PickupKind::Rock => config.target_rocks,
            PickupKind::Chest => config.target_chests,
        };
        let present = count_pickups(world, kind, pending);
        for _ in present..target {
            let at = random_point(rng, config.world_size, kind.spawn_inset());
            world.spawn((Position(at), Pickup { kind }));
            report.spawned_pickups += 1;
        }
    }

    report
}

fn spawn_npcs(
    world: &mut hecs::World,
    config: &ArenaConfig,
    viewport: &Viewport,
    wanted: usize,
    attempts: usize,
    bodies: &mut Vec<BodySnapshot>,
    rng: &mut fastrand::Rng,
) -> usize {
    let radius = croc::radius_for_level(croc::START_LEVEL);
    let clearance = radius * config.spawn_clearance;
    let no_spawn_zone = viewport.expanded(config.spawn_view_scale);

    let mut spawned = 0;
    for _ in 0..attempts {
        if spawned >= wanted {
            break;
        }
        let at = random_point(rng, config.world_size, radius * 2.0);
        let candidate = croc::fresh_body(at, croc::START_LEVEL);
        if !is_spawn_safe(at, &candidate, &no_spawn_zone, clearance, bodies) {
            continue;
        }

        let heading = behavior::pick_heading(rng);
        let timer = behavior::wander_delay(rng);
        let entity = croc::spawn_npc(world, at, heading * config.npc_speed, config.npc_speed, timer, rng);
        bodies.push(BodySnapshot {
            entity,
            level: croc::START_LEVEL,
            discs: candidate,
        });
        spawned += 1;
    }
    spawned
}

/// A spawn is safe when it is off screen and no disc of it comes within
/// `clearance` of any existing body disc.
pub fn is_spawn_safe(
    head: Vec2,
    candidate: &[Disc],
    no_spawn_zone: &Viewport,
    clearance: f32,
    bodies: &[BodySnapshot],
) -> bool {
    if no_spawn_zone.contains(head) {
        return false;
    }
    !bodies
        .iter()
        .any(|other| body::touching(candidate, &other.discs, clearance))
}

fn count_live_npcs(world: &hecs::World) -> usize {
    world
        .query::<(&Wander, &Alive)>()
        .iter()
        .filter(|(_, (_, alive))| alive.0)
        .count()
}

fn count_pickups(world: &hecs::World, kind: PickupKind, pending: &[hecs::Entity]) -> usize {
    world
        .query::<&Pickup>()
        .iter()
        .filter(|(entity, pickup)| pickup.kind == kind && !pending.contains(entity))
        .count()
}

/// Uniform point at least `inset` away from every world edge.
pub fn random_point(rng: &mut fastrand::Rng, size: Vec2, inset: f32) -> Vec2 {
    let span = (size - Vec2::splat(inset * 2.0)).max(Vec2::ZERO);
    Vec2::new(inset + rng.f32() * span.x, inset + rng.f32() * span.y)
}
