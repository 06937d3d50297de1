use glam::Vec2;

use crate::ecs::components::{Alive, Speed, Velocity};

/// Headings shorter than this count as "no direction requested".
const MIN_HEADING_LEN_SQ: f32 = 1e-6;

/// Point the player along the requested heading at full cruise speed.
///
/// With no heading (or a degenerate one) the previous velocity is kept:
/// the player never stops.
pub fn steer_player(world: &mut hecs::World, player: hecs::Entity, heading: Option<Vec2>) {
    let Some(dir) = heading.and_then(usable_heading) else {
        return;
    };
    let Ok((vel, speed, alive)) = world.query_one_mut::<(&mut Velocity, &Speed, &Alive)>(player) else {
        return;
    };
    if alive.0 {
        vel.0 = dir * speed.0;
    }
}

/// Unit heading from `from` toward `to`, for pointer/touch steering.
pub fn heading_towards(from: Vec2, to: Vec2) -> Option<Vec2> {
    usable_heading(to - from)
}

fn usable_heading(v: Vec2) -> Option<Vec2> {
    if !v.is_finite() || v.length_squared() < MIN_HEADING_LEN_SQ {
        return None;
    }
    Some(v.normalize())
}
