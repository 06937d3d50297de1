use crate::body::{self, BodySnapshot};
use crate::croc;
use crate::ecs::components::Alive;

/// Outcome of one elimination pass.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct CombatReport {
    /// Set when the player lost. Holds the eliminating croc's level
    /// (after it swallowed the player), or the shared level on a tie.
    pub player_eliminated_by: Option<u32>,
    pub eliminations: usize,
}

/// Per-pair scratch, reused each tick.
pub struct CombatBuffers {
    dead: Vec<bool>,
    levels: Vec<u32>,
}

impl CombatBuffers {
    pub fn new(capacity: usize) -> Self {
        Self {
            dead: Vec::with_capacity(capacity),
            levels: Vec::with_capacity(capacity),
        }
    }
}

/// Resolve body contact between every pair of live crocs.
///
/// Equal levels: both die, so equally matched crocs cannot grind each other
/// forever. Otherwise the bigger croc swallows the smaller and gains its
/// level. A croc that died earlier in the scan takes no further part. The
/// scan stops as soon as the player dies.
///
/// A winner's snapshot is refreshed after it grows, so later pairs test
/// against its longer body.
///
/// Dead crocs get `Alive(false)`; dead wild crocs are queued in `removals`.
/// The player entity is never queued.
pub fn resolve(
    world: &mut hecs::World,
    player: hecs::Entity,
    snapshots: &mut [BodySnapshot],
    bufs: &mut CombatBuffers,
    removals: &mut Vec<hecs::Entity>,
) -> CombatReport {
    let mut report = CombatReport::default();

    let count = snapshots.len();
    bufs.dead.clear();
    bufs.dead.resize(count, false);
    bufs.levels.clear();
    bufs.levels.extend(snapshots.iter().map(|s| s.level));

    for i in 0..count {
        for j in (i + 1)..count {
            if bufs.dead[i] || bufs.dead[j] {
                continue;
            }
            if !body::touching(&snapshots[i].discs, &snapshots[j].discs, 0.0) {
                continue;
            }

            let (level_i, level_j) = (bufs.levels[i], bufs.levels[j]);
            if level_i == level_j {
                for idx in [i, j] {
                    bufs.dead[idx] = true;
                    kill(world, player, snapshots[idx].entity, removals);
                }
                report.eliminations += 2;
                log::debug!(
                    "{:?} and {:?} eliminated each other at level {}",
                    snapshots[i].entity,
                    snapshots[j].entity,
                    level_i
                );
                if snapshots[i].entity == player || snapshots[j].entity == player {
                    report.player_eliminated_by = Some(level_i);
                    return report;
                }
                continue;
            }

            let (winner, loser) = if level_i > level_j { (i, j) } else { (j, i) };
            let swallowed = bufs.levels[loser];
            bufs.dead[loser] = true;
            kill(world, player, snapshots[loser].entity, removals);
            report.eliminations += 1;

            if let Some(level) = croc::feed(world, player, snapshots[winner].entity, swallowed) {
                bufs.levels[winner] = level;
                if let Some(fresh) = body::snapshot(world, snapshots[winner].entity) {
                    snapshots[winner] = fresh;
                }
            }
            log::debug!(
                "{:?} swallowed {:?} (level {}) -> level {}",
                snapshots[winner].entity,
                snapshots[loser].entity,
                swallowed,
                bufs.levels[winner]
            );

            if snapshots[loser].entity == player {
                report.player_eliminated_by = Some(bufs.levels[winner]);
                return report;
            }
        }
    }

    report
}

fn kill(world: &mut hecs::World, player: hecs::Entity, entity: hecs::Entity, removals: &mut Vec<hecs::Entity>) {
    if let Ok(mut alive) = world.get::<&mut Alive>(entity) {
        alive.0 = false;
    }
    if entity != player {
        removals.push(entity);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;

    use crate::croc::cosmetics::Cosmetics;
    use crate::ecs::components::{Growth, Trail};

    struct Fixture {
        world: hecs::World,
        player: hecs::Entity,
        rng: fastrand::Rng,
    }

    impl Fixture {
        fn new(player_at: Vec2, player_level: u32) -> Self {
            let mut world = hecs::World::new();
            let player = croc::spawn_player(&mut world, player_at, Vec2::X, 255.0, "You".into(), Cosmetics::default());
            let mut fx = Self {
                world,
                player,
                rng: fastrand::Rng::with_seed(4),
            };
            fx.raise(player, player_level);
            fx
        }

        fn npc(&mut self, at: Vec2, level: u32) -> hecs::Entity {
            let e = croc::spawn_npc(&mut self.world, at, Vec2::X, 188.0, 2.0, &mut self.rng);
            self.raise(e, level);
            e
        }

        fn raise(&mut self, e: hecs::Entity, level: u32) {
            let current = self.level(e);
            if level > current {
                croc::feed(&mut self.world, self.player, e, level - current);
            }
        }

        fn level(&self, e: hecs::Entity) -> u32 {
            self.world.get::<&Growth>(e).unwrap().level
        }

        fn alive(&self, e: hecs::Entity) -> bool {
            self.world.get::<&Alive>(e).unwrap().0
        }

        fn head_gap(&self, level: u32) -> f32 {
            // Heads overlapping by one unit.
            2.0 * croc::radius_for_level(level) - 1.0
        }

        fn run(&mut self) -> (CombatReport, Vec<hecs::Entity>) {
            let mut snapshots = Vec::new();
            body::rebuild(&self.world, Some(self.player), &mut snapshots);
            let mut bufs = CombatBuffers::new(4);
            let mut removals = Vec::new();
            let report = resolve(&mut self.world, self.player, &mut snapshots, &mut bufs, &mut removals);
            (report, removals)
        }
    }

    #[test]
    fn bigger_croc_swallows_smaller() {
        let mut fx = Fixture::new(Vec2::new(4000.0, 3000.0), 5);
        let gap = fx.head_gap(5);
        let a = fx.npc(Vec2::new(1000.0, 1000.0), 5);
        let b = fx.npc(Vec2::new(1000.0 + gap, 1000.0), 3);

        let (report, removals) = fx.run();

        assert!(fx.alive(a));
        assert!(!fx.alive(b));
        assert_eq!(fx.level(a), 8);
        assert_eq!(removals, vec![b]);
        assert_eq!(report, CombatReport { player_eliminated_by: None, eliminations: 1 });
    }

    #[test]
    fn equal_levels_both_die() {
        let mut fx = Fixture::new(Vec2::new(4000.0, 3000.0), 3);
        let a = fx.npc(Vec2::new(1000.0, 1000.0), 4);
        let b = fx.npc(Vec2::new(1010.0, 1000.0), 4);

        let (report, removals) = fx.run();

        assert!(!fx.alive(a) && !fx.alive(b));
        assert_eq!(fx.level(a), 4);
        assert_eq!(fx.level(b), 4);
        assert_eq!(removals.len(), 2);
        assert_eq!(report.player_eliminated_by, None);
    }

    #[test]
    fn player_tie_ends_session_with_shared_level() {
        let mut fx = Fixture::new(Vec2::new(1000.0, 1000.0), 4);
        let npc = fx.npc(Vec2::new(1010.0, 1000.0), 4);

        let (report, removals) = fx.run();

        assert!(!fx.alive(fx.player));
        assert!(!fx.alive(npc));
        assert_eq!(report.player_eliminated_by, Some(4));
        assert_eq!(removals, vec![npc]);
    }

    #[test]
    fn player_loss_reports_winner_level() {
        let mut fx = Fixture::new(Vec2::new(1000.0, 1000.0), 3);
        let npc = fx.npc(Vec2::new(1010.0, 1000.0), 6);

        let (report, removals) = fx.run();

        assert!(!fx.alive(fx.player));
        assert_eq!(fx.level(npc), 8); // capped at player level + 5
        assert_eq!(report.player_eliminated_by, Some(8));
        assert!(removals.is_empty());
    }

    #[test]
    fn apart_crocs_survive() {
        let mut fx = Fixture::new(Vec2::new(4000.0, 3000.0), 3);
        let a = fx.npc(Vec2::new(1000.0, 1000.0), 4);
        let b = fx.npc(Vec2::new(1100.0, 1000.0), 4);

        let (report, removals) = fx.run();

        assert!(fx.alive(a) && fx.alive(b));
        assert_eq!(report, CombatReport::default());
        assert!(removals.is_empty());
    }

    #[test]
    fn dead_croc_takes_no_further_part() {
        // b touches both a and c; a eats b first, so c never fights b.
        let mut fx = Fixture::new(Vec2::new(4000.0, 3000.0), 5);
        let a = fx.npc(Vec2::new(1000.0, 1000.0), 6);
        let b = fx.npc(Vec2::new(1020.0, 1000.0), 3);
        let c = fx.npc(Vec2::new(1045.0, 1000.0), 4);

        let (report, _) = fx.run();

        assert!(fx.alive(a));
        assert!(!fx.alive(b));
        assert!(fx.alive(c));
        assert_eq!(report.eliminations, 1);
    }

    #[test]
    fn winner_fights_on_with_grown_body() {
        let mut fx = Fixture::new(Vec2::new(4000.0, 3000.0), 8);
        let a = fx.npc(Vec2::new(1000.0, 1000.0), 4);
        // Straight path behind a, longer than any body it will grow.
        let mut trail = Trail::new(Vec2::new(600.0, 1000.0));
        for step in 1..=80 {
            trail.push(Vec2::new(600.0 + step as f32 * 5.0, 1000.0));
        }
        *fx.world.get::<&mut Trail>(a).unwrap() = trail;

        let gap = fx.head_gap(3);
        let b = fx.npc(Vec2::new(1000.0 + gap, 1000.0), 3);
        // Clear of a's level-4 tail, inside the tail it has at level 7.
        let c = fx.npc(Vec2::new(789.0, 1000.0), 5);
        let before = body::snapshot(&fx.world, a).unwrap();
        assert!(!body::touching(&before.discs, &body::snapshot(&fx.world, c).unwrap().discs, 0.0));

        let (report, removals) = fx.run();

        assert!(fx.alive(a));
        assert!(!fx.alive(b));
        assert!(!fx.alive(c));
        assert_eq!(fx.level(a), 12);
        assert_eq!(removals, vec![b, c]);
        assert_eq!(report.eliminations, 2);
    }

    #[test]
    fn player_loss_stops_the_scan() {
        let mut fx = Fixture::new(Vec2::new(1000.0, 1000.0), 3);
        let npc = fx.npc(Vec2::new(1010.0, 1000.0), 6);
        let x = fx.npc(Vec2::new(2000.0, 2000.0), 4);
        let y = fx.npc(Vec2::new(2010.0, 2000.0), 5);

        let (report, removals) = fx.run();

        assert_eq!(report.player_eliminated_by, Some(8));
        assert!(fx.alive(npc));
        assert!(fx.alive(x) && fx.alive(y));
        assert_eq!((fx.level(x), fx.level(y)), (4, 5));
        assert_eq!(report.eliminations, 1);
        assert!(removals.is_empty());
    }

    #[test]
    fn player_tie_stops_the_scan() {
        let mut fx = Fixture::new(Vec2::new(1000.0, 1000.0), 4);
        let npc = fx.npc(Vec2::new(1010.0, 1000.0), 4);
        let x = fx.npc(Vec2::new(2000.0, 2000.0), 5);
        let y = fx.npc(Vec2::new(2010.0, 2000.0), 5);

        let (report, removals) = fx.run();

        assert_eq!(report.player_eliminated_by, Some(4));
        assert!(fx.alive(x) && fx.alive(y));
        assert_eq!((fx.level(x), fx.level(y)), (5, 5));
        assert_eq!(removals, vec![npc]);
    }
}
