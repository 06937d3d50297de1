pub mod cosmetics;

use glam::Vec2;

use crate::body;
use crate::ecs::components::*;
use self::cosmetics::{Cosmetics, Pattern};

/// Level every croc starts at.
pub const START_LEVEL: u32 = 3;
/// Wild crocs stay within this many levels of the player.
pub const NPC_LEVEL_HEADROOM: u32 = 5;

const BASE_RADIUS: f32 = 12.0;
/// Widens very slowly.
const RADIUS_PER_LEVEL: f32 = 0.6;
const MAX_RADIUS: f32 = 80.0;
/// Head size stops growing here; length carries the rest of the growth.
const HEAD_LOCK_LEVEL: u32 = 3;

const BASE_LENGTH: f32 = 40.0;
const LENGTH_PER_LEVEL: f32 = 10.0;
const MAX_EXTRA_LENGTH: f32 = 220.0;
const MAX_LENGTH_LEVEL: u32 = 30;

pub fn radius_for_level(level: u32) -> f32 {
    (BASE_RADIUS + level.min(HEAD_LOCK_LEVEL) as f32 * RADIUS_PER_LEVEL).min(MAX_RADIUS)
}

pub fn body_length_for_level(level: u32) -> f32 {
    let extra = (level.min(MAX_LENGTH_LEVEL) as f32 * LENGTH_PER_LEVEL).min(MAX_EXTRA_LENGTH);
    BASE_LENGTH + extra
}

pub fn growth_for_level(level: u32) -> Growth {
    Growth {
        level,
        radius: radius_for_level(level),
        body_length: body_length_for_level(level),
    }
}

/// Grow by `amount` levels, clamped to `cap` (the player has none).
/// Level never goes down, even if the cap sits below the current level.
/// Returns the new level.
pub fn consume(growth: &mut Growth, trail: &mut Trail, pos: Vec2, amount: u32, cap: Option<u32>) -> u32 {
    let raised = growth.level.saturating_add(amount);
    let level = match cap {
        Some(cap) => raised.min(cap.max(growth.level)),
        None => raised,
    };
    *growth = growth_for_level(level);
    // Record the spot so the body thickens right away.
    trail.push(pos);
    level
}

/// Level cap for `entity`, relative to the current player level.
pub fn level_cap(world: &hecs::World, player: hecs::Entity, entity: hecs::Entity) -> Option<u32> {
    if entity == player {
        return None;
    }
    let player_level = world
        .get::<&Growth>(player)
        .map(|g| g.level)
        .unwrap_or(START_LEVEL);
    Some(player_level.saturating_add(NPC_LEVEL_HEADROOM))
}

/// `consume` on a croc stored in the world. `None` if `entity` is not a croc.
pub fn feed(world: &mut hecs::World, player: hecs::Entity, entity: hecs::Entity, amount: u32) -> Option<u32> {
    let cap = level_cap(world, player, entity);
    let (pos, growth, trail) = world
        .query_one_mut::<(&Position, &mut Growth, &mut Trail)>(entity)
        .ok()?;
    Some(consume(growth, trail, pos.0, amount, cap))
}

/// Body of a croc that would be placed at `pos` right now (no history yet).
pub fn fresh_body(pos: Vec2, level: u32) -> Vec<body::Disc> {
    let growth = growth_for_level(level);
    body::segments(&Trail::new(pos), pos, growth.radius, growth.body_length)
}

// ---------------------------------------------------------------------------
// Spawning
// ---------------------------------------------------------------------------

/// Spawn the player croc.
pub fn spawn_player(
    world: &mut hecs::World,
    pos: Vec2,
    heading: Vec2,
    speed: f32,
    name: String,
    looks: Cosmetics,
) -> hecs::Entity {
    world.spawn((
        Position(pos),
        Velocity(heading.normalize_or_zero() * speed),
        Speed(speed),
        growth_for_level(START_LEVEL),
        Trail::new(pos),
        Alive(true),
        CrocName(name),
        looks,
        Player,
    ))
}

/// Spawn a wild croc with randomized name and look.
pub fn spawn_npc(
    world: &mut hecs::World,
    pos: Vec2,
    velocity: Vec2,
    speed: f32,
    wander_timer: f32,
    rng: &mut fastrand::Rng,
) -> hecs::Entity {
    world.spawn((
        Position(pos),
        Velocity(velocity),
        Speed(speed),
        growth_for_level(START_LEVEL),
        Trail::new(pos),
        Alive(true),
        CrocName(random_croc_name(rng).to_string()),
        Cosmetics {
            color: random_croc_color(rng),
            pattern: Pattern::WILD[rng.usize(0..Pattern::WILD.len())],
            accessory: None,
            effect: None,
            hue_offset: rng.f32() * 360.0,
        },
        Wander { timer: wander_timer },
    ))
}

fn random_croc_name(rng: &mut fastrand::Rng) -> &'static str {
    const NAMES: &[&str] = &[
        "Snap", "Chomp", "Ripple", "Toothy", "Gnash", "Marsh", "Delta",
        "Swampy", "Bitey", "Lagoon", "Jaws", "Current", "Gator", "Caiman",
        "Gulper", "Floater", "Splash", "Pebble", "Creek",
    ];
    NAMES[rng.usize(0..NAMES.len())]
}

/// Cool swampy tones so wild crocs read apart from the player.
fn random_croc_color(rng: &mut fastrand::Rng) -> u32 {
    let palette: &[[u8; 3]] = &[
        [124, 220, 255], // sky
        [103, 240, 255], // cyan
        [158, 242, 196], // mint
        [159, 211, 255], // powder blue
        [198, 255, 143], // lime
        [126, 228, 200], // teal
    ];
    let [r, g, b] = palette[rng.usize(0..palette.len())];
    (r as u32) << 24 | (g as u32) << 16 | (b as u32) << 8 | 0xFF
}
