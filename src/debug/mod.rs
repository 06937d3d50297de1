pub mod timer;

use crate::ecs::components::{Alive, Pickup, Wander};
use crate::pickup::PickupKind;

/// Entity counts for the stats log line.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ArenaCounts {
    pub npcs: usize,
    pub pellets: usize,
    pub rocks: usize,
    pub chests: usize,
}

impl ArenaCounts {
    pub fn collect(world: &hecs::World) -> Self {
        let mut counts = Self::default();
        for (_, (_, alive)) in world.query::<(&Wander, &Alive)>().iter() {
            if alive.0 {
                counts.npcs += 1;
            }
        }
        for (_, pickup) in world.query::<&Pickup>().iter() {
            match pickup.kind {
                PickupKind::Pellet => counts.pellets += 1,
                PickupKind::Rock => counts.rocks += 1,
                PickupKind::Chest => counts.chests += 1,
            }
        }
        counts
    }
}
