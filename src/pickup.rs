use glam::Vec2;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Base reach of a pellet (and the unit the other kinds scale from).
pub const PELLET_SIZE: f32 = 12.0;
/// Level gained from a rock. Chests pay out in rocks.
pub const ROCK_VALUE: u32 = 3;
/// Chests hold between 2 and 5 rocks.
const CHEST_MIN_ROCKS: u32 = 2;
const CHEST_MAX_ROCKS: u32 = 5;

// ---------------------------------------------------------------------------
// Kinds
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum PickupKind {
    Pellet,
    Rock,
    Chest,
}

impl PickupKind {
    /// Resolution order within a tick.
    pub const ALL: [PickupKind; 3] = [PickupKind::Pellet, PickupKind::Rock, PickupKind::Chest];

    pub fn label(self) -> &'static str {
        match self {
            PickupKind::Pellet => "Pellet",
            PickupKind::Rock => "Rock",
            PickupKind::Chest => "Chest",
        }
    }

    /// Radius a body disc has to reach into.
    pub fn reach(self) -> f32 {
        match self {
            PickupKind::Pellet | PickupKind::Rock => PELLET_SIZE,
            PickupKind::Chest => PELLET_SIZE * 1.5,
        }
    }

    /// Extra forgiveness added on top of `reach`. Rocks are drawn larger than
    /// their reach, so they get a few units more.
    pub fn slack(self) -> f32 {
        match self {
            PickupKind::Rock => 4.0,
            PickupKind::Pellet | PickupKind::Chest => 0.0,
        }
    }

    /// Distance kept from the world edge when spawning.
    pub fn spawn_inset(self) -> f32 {
        match self {
            PickupKind::Pellet | PickupKind::Rock => PELLET_SIZE * 2.0,
            PickupKind::Chest => PELLET_SIZE * 3.0,
        }
    }

    /// Fraction of the magnet step applied to this kind.
    pub fn magnet_factor(self) -> f32 {
        match self {
            PickupKind::Pellet => 0.05,
            PickupKind::Rock => 0.04,
            PickupKind::Chest => 0.03,
        }
    }

    /// Level granted on consumption. Chest contents are rolled here, at the
    /// moment of consumption.
    pub fn roll_value(self, rng: &mut fastrand::Rng) -> u32 {
        match self {
            PickupKind::Pellet => 1,
            PickupKind::Rock => ROCK_VALUE,
            PickupKind::Chest => rng.u32(CHEST_MIN_ROCKS..=CHEST_MAX_ROCKS) * ROCK_VALUE,
        }
    }

    /// Does a disc at `center` with radius `disc_radius` touch a pickup at `at`?
    pub fn touches(self, at: Vec2, center: Vec2, disc_radius: f32) -> bool {
        let reach = disc_radius + self.reach() + self.slack();
        at.distance_squared(center) < reach * reach
    }
}
