use glam::Vec2;

use crate::ecs::components::{Alive, Growth, Position, Trail};

/// Bodies never have fewer discs than this, whatever their trail looks like.
pub const MIN_SEGMENTS: usize = 8;
/// Segment spacing as a multiple of head radius.
const SPACING_FACTOR: f32 = 1.25;
/// Segments on top of `body_length / spacing`.
const EXTRA_SEGMENTS: usize = 6;
/// Body discs are thinner than the head.
const BODY_RADIUS_FACTOR: f32 = 0.75;
const MIN_BODY_RADIUS: f32 = 6.0;
/// Trail history kept per body segment.
const TRAIL_POINTS_PER_SEGMENT: usize = 8;

/// One collision circle of a croc body.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Disc {
    pub center: Vec2,
    pub radius: f32,
}

impl Disc {
    /// Strict overlap, optionally widened by `margin`.
    pub fn overlaps(&self, other: &Disc, margin: f32) -> bool {
        let reach = self.radius + other.radius + margin;
        self.center.distance_squared(other.center) < reach * reach
    }
}

pub fn segment_spacing(radius: f32) -> f32 {
    radius * SPACING_FACTOR
}

pub fn segment_count(radius: f32, body_length: f32) -> usize {
    let spacing = segment_spacing(radius);
    if !(spacing > 0.0) || !body_length.is_finite() {
        return MIN_SEGMENTS;
    }
    ((body_length / spacing).floor().max(0.0) as usize + EXTRA_SEGMENTS).max(MIN_SEGMENTS)
}

/// Upper bound on trail length for a croc of this size.
pub fn max_trail_points(radius: f32, body_length: f32) -> usize {
    segment_count(radius, body_length) * TRAIL_POINTS_PER_SEGMENT
}

pub fn body_radius(radius: f32) -> f32 {
    (radius * BODY_RADIUS_FACTOR).max(MIN_BODY_RADIUS)
}

/// Build the body chain, ordered tail -> head.
///
/// The trail is walked from the newest point back, dropping a disc centre
/// every `segment_spacing(radius)` of travelled distance. When the trail runs
/// out before the chain is full, the oldest centre is repeated, so a croc that
/// has not moved yet still gets a full (stacked) body.
pub fn segments(trail: &Trail, head: Vec2, radius: f32, body_length: f32) -> Vec<Disc> {
    let count = segment_count(radius, body_length);
    let centers = sample_centers(trail.0.iter().rev().copied(), head, segment_spacing(radius), count);

    let tail_radius = body_radius(radius);
    let last = centers.len() - 1;
    centers
        .into_iter()
        .rev()
        .enumerate()
        .map(|(i, center)| Disc {
            center,
            radius: if i == last { radius } else { tail_radius },
        })
        .collect()
}

/// Head-first centres, exactly `count` long.
fn sample_centers(newest_first: impl Iterator<Item = Vec2>, head: Vec2, spacing: f32, count: usize) -> Vec<Vec2> {
    let mut centers = Vec::with_capacity(count);
    centers.push(head);

    if spacing > 0.0 {
        let mut prev = head;
        // Distance covered since the last emitted centre.
        let mut carried = 0.0;
        for point in newest_first {
            if centers.len() >= count {
                break;
            }
            let edge = point - prev;
            let len = edge.length();
            if !(len > f32::EPSILON) {
                prev = point;
                continue;
            }

            let mut along = spacing - carried;
            while along <= len && centers.len() < count {
                centers.push(prev + edge * (along / len));
                along += spacing;
            }
            carried = spacing - (along - len);
            prev = point;
        }
    }

    let oldest = centers[centers.len() - 1];
    centers.resize(count, oldest);
    centers
}

/// Does any disc of `a` overlap any disc of `b`?
pub fn touching(a: &[Disc], b: &[Disc], margin: f32) -> bool {
    a.iter().any(|da| b.iter().any(|db| da.overlaps(db, margin)))
}

// ---------------------------------------------------------------------------
// Per-tick snapshots
// ---------------------------------------------------------------------------

/// A live croc's body for one resolution pass.
/// Built once per pass so collision code never touches the ECS in the hot loop.
#[derive(Debug, Clone)]
pub struct BodySnapshot {
    pub entity: hecs::Entity,
    pub level: u32,
    pub discs: Vec<Disc>,
}

impl BodySnapshot {
    pub fn head(&self) -> Vec2 {
        self.discs.last().map(|d| d.center).unwrap_or(Vec2::ZERO)
    }
}

/// Snapshot a single croc. `None` if the entity is gone, dead, or not a croc.
pub fn snapshot(world: &hecs::World, entity: hecs::Entity) -> Option<BodySnapshot> {
    let mut query = world
        .query_one::<(&Position, &Growth, &Trail, &Alive)>(entity)
        .ok()?;
    let (pos, growth, trail, alive) = query.get()?;
    if !alive.0 {
        return None;
    }
    Some(BodySnapshot {
        entity,
        level: growth.level,
        discs: segments(trail, pos.0, growth.radius, growth.body_length),
    })
}

/// Rebuild snapshots for every live croc. `first` (the player) leads the list
/// when it is alive; the rest follow in world order.
pub fn rebuild(world: &hecs::World, first: Option<hecs::Entity>, snapshots: &mut Vec<BodySnapshot>) {
    snapshots.clear();
    if let Some(lead) = first.and_then(|e| snapshot(world, e)) {
        snapshots.push(lead);
    }
    for (entity, (pos, growth, trail, alive)) in world
        .query::<(&Position, &Growth, &Trail, &Alive)>()
        .iter()
    {
        if !alive.0 || Some(entity) == first {
            continue;
        }
        snapshots.push(BodySnapshot {
            entity,
            level: growth.level,
            discs: segments(trail, pos.0, growth.radius, growth.body_length),
        });
    }
}
