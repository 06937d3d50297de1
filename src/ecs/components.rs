use std::collections::VecDeque;

use glam::Vec2;

use crate::pickup::PickupKind;

/// Current world position in world units.
#[derive(Debug, Clone, Copy)]
pub struct Position(pub Vec2);

/// Velocity in world units/second.
#[derive(Debug, Clone, Copy)]
pub struct Velocity(pub Vec2);

/// Cruise speed for this croc's class. Constant for the croc's lifetime.
#[derive(Debug, Clone, Copy)]
pub struct Speed(pub f32);

/// Level and the sizes derived from it.
///
/// `radius` and `body_length` are always `croc::radius_for_level(level)` and
/// `croc::body_length_for_level(level)`; only `croc::consume` writes them.
#[derive(Debug, Clone, Copy)]
pub struct Growth {
    pub level: u32,
    pub radius: f32,
    pub body_length: f32,
}

/// Recent head positions, oldest first. Never empty.
#[derive(Debug, Clone)]
pub struct Trail(pub VecDeque<Vec2>);

impl Trail {
    pub fn new(start: Vec2) -> Self {
        let mut points = VecDeque::with_capacity(64);
        points.push_back(start);
        Self(points)
    }

    pub fn push(&mut self, point: Vec2) {
        self.0.push_back(point);
    }

    /// Drop the oldest points until at most `max_points` remain (never below one).
    pub fn trim(&mut self, max_points: usize) {
        let keep = max_points.max(1);
        while self.0.len() > keep {
            self.0.pop_front();
        }
    }
}

/// Cleared when the croc is eliminated. Dead crocs are skipped by every pass.
#[derive(Debug, Clone, Copy)]
pub struct Alive(pub bool);

/// Autonomous heading changes. Only non-player crocs carry this.
#[derive(Debug, Clone, Copy)]
pub struct Wander {
    /// Seconds until the next heading pick.
    pub timer: f32,
}

/// Marks the player-controlled croc.
#[derive(Debug, Clone, Copy)]
pub struct Player;

/// Name tag shown above the croc.
#[derive(Debug, Clone)]
pub struct CrocName(pub String);

/// A consumable world object.
#[derive(Debug, Clone, Copy)]
pub struct Pickup {
    pub kind: PickupKind,
}
