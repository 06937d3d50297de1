use glam::Vec2;

use crate::body;
use crate::ecs::components::{Alive, Growth, Position, Trail, Velocity};

/// Integrate velocity into position, bounce off the world walls and record
/// the new head position in the trail.
///
/// Crocs never slow down: there is no friction, a wall only flips the
/// velocity component that pointed into it.
pub fn integrate(world: &mut hecs::World, dt: f32, world_size: Vec2) {
    for (_, (pos, vel, growth, trail, alive)) in world
        .query_mut::<(&mut Position, &mut Velocity, &Growth, &mut Trail, &Alive)>()
    {
        if !alive.0 {
            continue;
        }

        pos.0 += vel.0 * dt;
        contain(&mut pos.0, &mut vel.0, growth.radius, world_size);

        trail.push(pos.0);
        trail.trim(body::max_trail_points(growth.radius, growth.body_length));
    }
}

/// Keep a head of `radius` fully inside `[0, size]`, pointing the clamped
/// velocity component back inward.
pub fn contain(pos: &mut Vec2, vel: &mut Vec2, radius: f32, size: Vec2) {
    if pos.x < radius {
        pos.x = radius;
        vel.x = vel.x.abs();
    } else if pos.x > size.x - radius {
        pos.x = size.x - radius;
        vel.x = -vel.x.abs();
    }

    if pos.y < radius {
        pos.y = radius;
        vel.y = vel.y.abs();
    } else if pos.y > size.y - radius {
        pos.y = size.y - radius;
        vel.y = -vel.y.abs();
    }
}
