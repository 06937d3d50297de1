use glam::Vec2;

use crate::ecs::components::{Alive, Speed, Velocity, Wander};

/// Number of evenly spaced headings a wild croc picks from.
const HEADING_SLICES: u32 = 24;
/// Seconds between heading changes.
const WANDER_MIN: f32 = 1.2;
const WANDER_MAX: f32 = 3.6;

/// Tick wander timers and re-roll headings for wild crocs whose timer ran out.
pub fn update(world: &mut hecs::World, dt: f32, rng: &mut fastrand::Rng) {
    for (_, (wander, vel, speed, alive)) in world
        .query_mut::<(&mut Wander, &mut Velocity, &Speed, &Alive)>()
    {
        if !alive.0 {
            continue;
        }
        wander.timer -= dt;

        if wander.timer <= 0.0 {
            vel.0 = pick_heading(rng) * speed.0;
            wander.timer = wander_delay(rng);
        }
    }
}

/// One of the fixed compass slices, as a unit vector.
pub fn pick_heading(rng: &mut fastrand::Rng) -> Vec2 {
    let slice = rng.u32(0..HEADING_SLICES);
    let angle = slice as f32 * (std::f32::consts::TAU / HEADING_SLICES as f32);
    Vec2::new(angle.cos(), angle.sin())
}

pub fn wander_delay(rng: &mut fastrand::Rng) -> f32 {
    WANDER_MIN + rng.f32() * (WANDER_MAX - WANDER_MIN)
}
