use glam::Vec2;
use instant::Instant;

use crate::body::{self, Disc};
use crate::camera::{Camera, Viewport};
use crate::config::ArenaConfig;
use crate::croc::{self, cosmetics::Cosmetics};
use crate::debug::timer::{SystemPhase, SystemTimers};
use crate::debug::ArenaCounts;
use crate::ecs::components::*;
use crate::ecs::systems::{self, population, TickBuffers};
use crate::pickup::PickupKind;

/// Screen size assumed until the renderer reports one.
const DEFAULT_SCREEN: Vec2 = Vec2::new(1280.0, 720.0);
/// Rough entity count for buffer pre-allocation.
const EXPECTED_ENTITIES: usize = 64;

/// Result of a step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    Running,
    /// The player was eliminated by a croc of this level. Terminal.
    PlayerEliminated { by_level: u32 },
}

impl StepOutcome {
    pub fn is_over(self) -> bool {
        matches!(self, StepOutcome::PlayerEliminated { .. })
    }
}

/// Read-only view of a croc for renderers and HUDs.
#[derive(Debug, Clone)]
pub struct ActorView {
    pub entity: hecs::Entity,
    pub name: String,
    pub level: u32,
    pub radius: f32,
    pub alive: bool,
    pub is_player: bool,
    pub position: Vec2,
    pub velocity: Vec2,
    pub cosmetics: Cosmetics,
    /// Body chain, tail -> head.
    pub segments: Vec<Disc>,
}

/// One arena session: the world, the player handle and everything a step
/// needs. Owned by the caller; nothing here is global.
pub struct Simulation {
    config: ArenaConfig,
    world: hecs::World,
    player: hecs::Entity,
    rng: fastrand::Rng,
    /// Player-only running total of consumed value.
    bank: u64,
    camera: Camera,
    /// Viewport pushed by the renderer; overrides the follow camera.
    external_viewport: Option<Viewport>,
    outcome: StepOutcome,
    tick_count: u64,
    bufs: TickBuffers,
    timers: SystemTimers,
}

impl Simulation {
    pub fn new(config: ArenaConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => fastrand::Rng::with_seed(seed),
            None => fastrand::Rng::new(),
        };
        let mut sim = Self {
            camera: Camera::new(DEFAULT_SCREEN, config.world_size),
            config,
            world: hecs::World::new(),
            // Replaced by `start_session` straight away.
            player: hecs::Entity::DANGLING,
            rng,
            bank: 0,
            external_viewport: None,
            outcome: StepOutcome::Running,
            tick_count: 0,
            bufs: TickBuffers::new(EXPECTED_ENTITIES),
            timers: SystemTimers::new(),
        };
        sim.start_session();
        sim
    }

    /// Start over: fresh world, player in the centre, bank emptied.
    /// Keeps the player's cosmetics.
    pub fn restart(&mut self) {
        self.start_session();
    }

    fn start_session(&mut self) {
        let looks = self
            .world
            .get::<&Cosmetics>(self.player)
            .map(|c| *c)
            .unwrap_or_default();

        self.world.clear();
        self.bufs.removals.clear();
        self.bank = 0;
        self.outcome = StepOutcome::Running;
        self.tick_count = 0;

        let centre = self.config.world_size * 0.5;
        self.player = croc::spawn_player(
            &mut self.world,
            centre,
            Vec2::X,
            self.config.player_speed,
            self.config.player_name.clone(),
            looks,
        );
        self.update_camera();

        body::rebuild(&self.world, Some(self.player), &mut self.bufs.snapshots);
        let viewport = self.viewport();
        let report = population::replenish(
            &mut self.world,
            &self.config,
            &viewport,
            self.config.initial_spawn_attempts,
            &mut self.bufs.snapshots,
            &[],
            &mut self.rng,
        );
        log::info!(
            "Arena session started: {}x{} world, {} wild crocs ({} short), {} pickups",
            self.config.world_size.x,
            self.config.world_size.y,
            report.spawned_npcs,
            report.npc_deficit,
            report.spawned_pickups
        );
    }

    /// Advance the whole arena by `dt` seconds, steering the player along
    /// `heading` (or keeping its course when `None`).
    ///
    /// `dt` is clamped to `[0, max_dt]`. Once the player is eliminated every
    /// further call is a no-op returning the same outcome.
    pub fn step(&mut self, dt: f32, heading: Option<Vec2>) -> StepOutcome {
        if self.outcome.is_over() {
            return self.outcome;
        }
        let dt = if dt.is_finite() { dt.clamp(0.0, self.config.max_dt) } else { 0.0 };
        let viewport = self.viewport();

        let report = systems::tick(
            &mut self.world,
            self.player,
            dt,
            heading,
            &self.config,
            &viewport,
            &mut self.rng,
            &mut self.bufs,
            &mut self.timers,
        );
        self.bank += report.feeding.banked;
        self.tick_count += 1;

        if let Some(by_level) = report.combat.player_eliminated_by {
            log::info!(
                "Player swallowed by a level {} croc after {} ticks (level {}, bank {})",
                by_level,
                self.tick_count,
                self.level_of(self.player).unwrap_or(0),
                self.bank
            );
            self.outcome = StepOutcome::PlayerEliminated { by_level };
        } else {
            self.timers.begin();
            self.update_camera();
            self.timers.end(SystemPhase::Camera);
        }

        systems::flush_removals(&mut self.world, &mut self.bufs.removals);
        self.outcome
    }

    fn update_camera(&mut self) {
        let Ok(mut query) = self.world.query_one::<(&Position, &Growth)>(self.player) else {
            return;
        };
        if let Some((pos, growth)) = query.get() {
            self.camera.follow(pos.0, growth.radius, self.config.world_size, self.config.zoom_scale);
        }
    }

    // -----------------------------------------------------------------------
    // Collaborator inputs
    // -----------------------------------------------------------------------

    /// Renderer resized. Switches back to the built-in follow camera.
    pub fn set_screen_size(&mut self, width: f32, height: f32) {
        self.camera.screen = Vec2::new(width.max(1.0), height.max(1.0));
        self.external_viewport = None;
        self.update_camera();
    }

    /// Use a renderer-computed viewport for spawn safety from now on.
    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.external_viewport = Some(viewport);
    }

    /// Replace the player's look. Simulation fields are untouched.
    pub fn equip(&mut self, looks: Cosmetics) {
        if let Ok(mut current) = self.world.get::<&mut Cosmetics>(self.player) {
            *current = looks;
        }
    }

    /// Debit the bank for a purchase. Returns false (and changes nothing) if
    /// the bank cannot cover `cost`.
    pub fn try_spend(&mut self, cost: u64) -> bool {
        if self.bank < cost {
            return false;
        }
        self.bank -= cost;
        true
    }

    /// Grow a croc by `amount` levels, honouring the wild-croc cap.
    /// Returns the new level, or `None` if `entity` is not a croc.
    pub fn consume(&mut self, entity: hecs::Entity, amount: u32) -> Option<u32> {
        croc::feed(&mut self.world, self.player, entity, amount)
    }

    // -----------------------------------------------------------------------
    // Read accessors
    // -----------------------------------------------------------------------

    pub fn player_entity(&self) -> hecs::Entity {
        self.player
    }

    pub fn player(&self) -> Option<ActorView> {
        self.actor(self.player)
    }

    pub fn actor(&self, entity: hecs::Entity) -> Option<ActorView> {
        let mut query = self
            .world
            .query_one::<(&Position, &Velocity, &Growth, &Trail, &Alive, &CrocName, &Cosmetics)>(entity)
            .ok()?;
        let (pos, vel, growth, trail, alive, name, looks) = query.get()?;
        Some(ActorView {
            entity,
            name: name.0.clone(),
            level: growth.level,
            radius: growth.radius,
            alive: alive.0,
            is_player: entity == self.player,
            position: pos.0,
            velocity: vel.0,
            cosmetics: *looks,
            segments: body::segments(trail, pos.0, growth.radius, growth.body_length),
        })
    }

    /// Every croc still in the world, player first.
    pub fn actors(&self) -> Vec<ActorView> {
        let mut views = Vec::with_capacity(EXPECTED_ENTITIES);
        views.extend(self.player());
        for (entity, _) in self.world.query::<&Growth>().iter() {
            if entity == self.player {
                continue;
            }
            views.extend(self.actor(entity));
        }
        views
    }

    pub fn pickups(&self, kind: PickupKind) -> Vec<Vec2> {
        self.world
            .query::<(&Position, &Pickup)>()
            .iter()
            .filter(|(_, (_, pickup))| pickup.kind == kind)
            .map(|(_, (pos, _))| pos.0)
            .collect()
    }

    pub fn level_of(&self, entity: hecs::Entity) -> Option<u32> {
        self.world.get::<&Growth>(entity).map(|g| g.level).ok()
    }

    pub fn bank(&self) -> u64 {
        self.bank
    }

    pub fn viewport(&self) -> Viewport {
        self.external_viewport.unwrap_or_else(|| self.camera.viewport())
    }

    pub fn outcome(&self) -> StepOutcome {
        self.outcome
    }

    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    pub fn timers(&self) -> &SystemTimers {
        &self.timers
    }

    pub fn counts(&self) -> ArenaCounts {
        ArenaCounts::collect(&self.world)
    }

    pub fn config(&self) -> &ArenaConfig {
        &self.config
    }
}

// ---------------------------------------------------------------------------
// Frame clock
// ---------------------------------------------------------------------------

/// Turns frame timestamps into simulation `dt`: zero on the first frame after
/// a (re)start, clamped to `max_dt` after stalls.
pub struct FrameClock {
    last: Option<Instant>,
    max_dt: f32,
}

impl FrameClock {
    pub fn new(max_dt: f32) -> Self {
        Self { last: None, max_dt }
    }

    /// Forget the previous frame; the next `tick` returns 0.
    pub fn reset(&mut self) {
        self.last = None;
    }

    pub fn tick(&mut self, now: Instant) -> f32 {
        let dt = match self.last {
            Some(last) => now.saturating_duration_since(last).as_secs_f32(),
            None => 0.0,
        };
        self.last = Some(now);
        dt.min(self.max_dt)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    use crate::croc::cosmetics::{Effect, Pattern};
    use crate::ecs::systems::behavior;

    impl Simulation {
        /// Drop a wild croc at `pos` with no safety checks.
        fn spawn_npc_at(&mut self, pos: Vec2, heading: Vec2) -> hecs::Entity {
            let speed = self.config.npc_speed;
            let timer = behavior::wander_delay(&mut self.rng);
            croc::spawn_npc(&mut self.world, pos, heading.normalize_or_zero() * speed, speed, timer, &mut self.rng)
        }

        /// Move a croc, resetting its trail to the new spot.
        fn teleport(&mut self, entity: hecs::Entity, pos: Vec2) {
            let (p, trail) = self
                .world
                .query_one_mut::<(&mut Position, &mut Trail)>(entity)
                .unwrap();
            p.0 = pos;
            *trail = Trail::new(pos);
        }
    }

    /// An empty arena: no wild crocs or pickups unless a test places them.
    fn quiet_config() -> ArenaConfig {
        ArenaConfig {
            target_npcs: 0,
            target_pellets: 0,
            target_rocks: 0,
            target_chests: 0,
            ..ArenaConfig::default().with_seed(42)
        }
    }

    #[test]
    fn new_session_fills_population() {
        let sim = Simulation::new(ArenaConfig::default().with_seed(7));
        let counts = sim.counts();
        assert_eq!(counts.pellets, 26);
        assert_eq!(counts.rocks, 8);
        assert_eq!(counts.chests, 2);
        assert!(counts.npcs <= 10);
        assert_eq!(sim.bank(), 0);
        assert_eq!(sim.outcome(), StepOutcome::Running);
        let player = sim.player().unwrap();
        assert_eq!(player.level, croc::START_LEVEL);
        assert_eq!(player.position, sim.config().world_size * 0.5);
    }

    #[test]
    fn first_frame_dt_zero_keeps_player_still() {
        let mut sim = Simulation::new(quiet_config());
        let start = sim.player().unwrap().position;
        sim.step(0.0, None);
        assert_eq!(sim.player().unwrap().position, start);
    }

    #[test]
    fn long_frames_are_clamped() {
        let mut sim = Simulation::new(quiet_config());
        let start = sim.player().unwrap().position;
        sim.step(5.0, None);
        let moved = sim.player().unwrap().position - start;
        let max = sim.config().player_speed * sim.config().max_dt;
        assert!((moved.length() - max).abs() < 1e-2);
    }

    #[test]
    fn heading_steers_player() {
        let mut sim = Simulation::new(quiet_config());
        sim.step(0.016, Some(Vec2::new(0.0, 1.0)));
        let v = sim.player().unwrap().velocity;
        assert!((v - Vec2::new(0.0, sim.config().player_speed)).length() < 1e-3);
        // no input: keep going the same way
        sim.step(0.016, None);
        assert!((sim.player().unwrap().velocity - v).length() < 1e-3);
    }

    #[test]
    fn pellet_scenario_banks_for_player() {
        let mut sim = Simulation::new(quiet_config());
        let player = sim.player_entity();
        sim.teleport(player, Vec2::new(105.0, 100.0));
        let pellet = sim.world.spawn((Position(Vec2::new(100.0, 100.0)), Pickup { kind: PickupKind::Pellet }));

        sim.step(0.0, None);

        assert_eq!(sim.level_of(player), Some(croc::START_LEVEL + 1));
        assert_eq!(sim.bank(), 1);
        assert!(!sim.world.contains(pellet));
    }

    #[test]
    fn swallow_scenario_removes_loser_after_step() {
        let mut sim = Simulation::new(quiet_config());
        let player = sim.player_entity();
        sim.teleport(player, Vec2::new(4000.0, 3000.0));
        let a = sim.spawn_npc_at(Vec2::new(1000.0, 1000.0), Vec2::Y);
        let gap = 2.0 * croc::radius_for_level(5) - 1.0;
        let b = sim.spawn_npc_at(Vec2::new(1000.0 + gap, 1000.0), Vec2::Y);
        sim.consume(a, 2);

        let outcome = sim.step(0.0, None);

        assert_eq!(outcome, StepOutcome::Running);
        assert_eq!(sim.level_of(a), Some(8));
        assert!(!sim.world.contains(b));
    }

    #[test]
    fn equal_level_player_collision_ends_session() {
        let mut sim = Simulation::new(quiet_config());
        let player = sim.player_entity();
        sim.consume(player, 1);
        let npc = sim.spawn_npc_at(Vec2::ZERO, Vec2::X);
        sim.consume(npc, 1);
        let at = sim.player().unwrap().position + Vec2::new(10.0, 0.0);
        sim.teleport(npc, at);

        let outcome = sim.step(0.0, None);

        assert_eq!(outcome, StepOutcome::PlayerEliminated { by_level: 4 });
        assert!(!sim.world.contains(npc));
        assert!(!sim.player().unwrap().alive);
        // terminal: further steps change nothing
        assert_eq!(sim.step(0.016, Some(Vec2::Y)), outcome);
        assert_eq!(sim.tick_count(), 1);
    }

    #[test]
    fn restart_resets_session_but_keeps_looks() {
        let mut sim = Simulation::new(quiet_config());
        let looks = Cosmetics {
            pattern: Pattern::Stripes,
            effect: Some(Effect::Magnet),
            ..Cosmetics::default()
        };
        sim.equip(looks);
        sim.bank = 30;
        let player = sim.player_entity();
        sim.consume(player, 10);

        sim.restart();

        let view = sim.player().unwrap();
        assert_eq!(view.level, croc::START_LEVEL);
        assert_eq!(view.cosmetics, looks);
        assert_eq!(sim.bank(), 0);
    }

    #[test]
    fn spending_needs_funds() {
        let mut sim = Simulation::new(quiet_config());
        sim.bank = 10;
        assert!(!sim.try_spend(11));
        assert!(sim.try_spend(8));
        assert_eq!(sim.bank(), 2);
    }

    #[test]
    fn equip_leaves_simulation_fields_alone() {
        let mut sim = Simulation::new(quiet_config());
        let before = sim.player().unwrap();
        sim.equip(Cosmetics {
            color: 0xFF6B6BFF,
            ..Cosmetics::default()
        });
        let after = sim.player().unwrap();
        assert_eq!(after.cosmetics.color, 0xFF6B6BFF);
        assert_eq!(after.level, before.level);
        assert_eq!(after.radius, before.radius);
        assert_eq!(after.position, before.position);
    }

    #[test]
    fn spawns_avoid_central_viewport() {
        let mut config = ArenaConfig::default().with_seed(9);
        config.target_pellets = 0;
        config.target_rocks = 0;
        config.target_chests = 0;
        let mut sim = Simulation::new(config);
        let view = Viewport::new(sim.config().world_size * 0.5, Vec2::new(800.0, 500.0));
        sim.set_viewport(view);
        let zone = view.expanded(sim.config().spawn_view_scale);

        for _ in 0..5 {
            let before: Vec<hecs::Entity> = sim.actors().iter().map(|a| a.entity).collect();
            sim.step(0.0, None);
            for actor in sim.actors() {
                if !before.contains(&actor.entity) {
                    assert!(!zone.contains(actor.position));
                }
            }
        }
        assert!(sim.counts().npcs <= 10);
    }

    #[test]
    fn wild_crocs_stay_under_player_cap() {
        let mut sim = Simulation::new(ArenaConfig::default().with_seed(13));
        let player = sim.player_entity();
        for _ in 0..300 {
            if sim.step(0.033, None).is_over() {
                break;
            }
            let cap = sim.level_of(player).unwrap() + croc::NPC_LEVEL_HEADROOM;
            for actor in sim.actors() {
                if !actor.is_player {
                    assert!(actor.level <= cap);
                }
            }
        }
    }

    #[test]
    fn segments_exposed_for_rendering() {
        let sim = Simulation::new(quiet_config());
        let view = sim.player().unwrap();
        assert!(view.segments.len() >= body::MIN_SEGMENTS);
        assert_eq!(view.segments.last().unwrap().center, view.position);
    }

    #[test]
    fn frame_clock_starts_at_zero_and_clamps() {
        let mut clock = FrameClock::new(0.033);
        let t0 = Instant::now();
        assert_eq!(clock.tick(t0), 0.0);
        assert_eq!(clock.tick(t0 + Duration::from_secs(2)), 0.033);
        let dt = clock.tick(t0 + Duration::from_secs(2) + Duration::from_millis(10));
        assert!((dt - 0.010).abs() < 1e-4);
        clock.reset();
        assert_eq!(clock.tick(t0 + Duration::from_secs(5)), 0.0);
    }
}
