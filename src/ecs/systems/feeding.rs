use glam::Vec2;

use crate::body::{self, BodySnapshot};
use crate::croc::{self, cosmetics::Cosmetics};
use crate::ecs::components::{Alive, Pickup, Position};
use crate::pickup::PickupKind;

// ---------------------------------------------------------------------------
// Buffers (pre-allocated, reused each tick)
// ---------------------------------------------------------------------------

pub struct FeedingBuffers {
    pickups: Vec<(hecs::Entity, Vec2)>,
}

impl FeedingBuffers {
    pub fn new(capacity: usize) -> Self {
        Self {
            pickups: Vec::with_capacity(capacity),
        }
    }
}

// ---------------------------------------------------------------------------
// Magnet
// ---------------------------------------------------------------------------

/// Pull pickups near a magnet-wearing player toward its head.
///
/// Each pickup moves by a share of `min(pull * (1 - d / radius), d)`, so it can
/// never overshoot the head. Pickups sitting exactly on the head are left alone.
pub fn attract(world: &mut hecs::World, player: hecs::Entity, radius: f32, pull: f32) {
    let head = {
        let Ok(mut query) = world.query_one::<(&Position, &Cosmetics, &Alive)>(player) else {
            return;
        };
        match query.get() {
            Some((pos, looks, alive)) if alive.0 && looks.has_magnet() => pos.0,
            _ => return,
        }
    };

    for (_, (pos, pickup)) in world.query_mut::<(&mut Position, &Pickup)>() {
        let to_head = head - pos.0;
        let dist = to_head.length();
        if dist > radius || dist <= f32::EPSILON {
            continue;
        }
        let step = (pull * (1.0 - dist / radius)).min(dist);
        pos.0 += to_head / dist * step * pickup.kind.magnet_factor();
    }
}

// ---------------------------------------------------------------------------
// Consumption
// ---------------------------------------------------------------------------

/// Result of one feeding pass.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct FeedingReport {
    /// Value the player banked this tick.
    pub banked: u64,
    pub consumed: usize,
}

/// Resolve every pickup kind in turn (pellets, rocks, chests).
///
/// `snapshots` must hold the live crocs' bodies, player first; an eater's
/// snapshot is refreshed after it grows. Consumed pickups are queued in
/// `removals` and are never offered to a second croc.
pub fn update(
    world: &mut hecs::World,
    player: hecs::Entity,
    snapshots: &mut [BodySnapshot],
    bufs: &mut FeedingBuffers,
    removals: &mut Vec<hecs::Entity>,
    rng: &mut fastrand::Rng,
) -> FeedingReport {
    let mut report = FeedingReport::default();
    for kind in PickupKind::ALL {
        let pass = update_kind(world, player, kind, snapshots, bufs, removals, rng);
        report.banked += pass.banked;
        report.consumed += pass.consumed;
    }
    report
}

fn update_kind(
    world: &mut hecs::World,
    player: hecs::Entity,
    kind: PickupKind,
    snapshots: &mut [BodySnapshot],
    bufs: &mut FeedingBuffers,
    removals: &mut Vec<hecs::Entity>,
    rng: &mut fastrand::Rng,
) -> FeedingReport {
    let mut report = FeedingReport::default();

    bufs.pickups.clear();
    for (entity, (pos, pickup)) in world.query::<(&Position, &Pickup)>().iter() {
        if pickup.kind == kind && !removals.contains(&entity) {
            bufs.pickups.push((entity, pos.0));
        }
    }

    for &(pickup, at) in bufs.pickups.iter() {
        let eater = snapshots.iter().position(|snap| {
            snap.discs
                .iter()
                .any(|disc| kind.touches(at, disc.center, disc.radius))
        });
        let Some(idx) = eater else {
            continue;
        };

        let entity = snapshots[idx].entity;
        let value = kind.roll_value(rng);
        removals.push(pickup);
        report.consumed += 1;

        let Some(level) = croc::feed(world, player, entity, value) else {
            continue;
        };
        if entity == player {
            report.banked += u64::from(value);
        }
        log::trace!("{:?} ate a {} worth {} -> level {}", entity, kind.label(), value, level);

        if let Some(fresh) = body::snapshot(world, entity) {
            snapshots[idx] = fresh;
        }
    }

    report
}
