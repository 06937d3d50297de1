use instant::Instant;

/// Which phase of the simulation tick is being timed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum SystemPhase {
    Steering = 0,
    Wander = 1,
    Movement = 2,
    BodyRebuild = 3,
    Feeding = 4,
    Combat = 5,
    Population = 6,
    Camera = 7,
}

impl SystemPhase {
    pub const ALL: [SystemPhase; 8] = [
        Self::Steering,
        Self::Wander,
        Self::Movement,
        Self::BodyRebuild,
        Self::Feeding,
        Self::Combat,
        Self::Population,
        Self::Camera,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::Steering => "Steering",
            Self::Wander => "Wander",
            Self::Movement => "Movement",
            Self::BodyRebuild => "Bodies",
            Self::Feeding => "Feeding",
            Self::Combat => "Combat",
            Self::Population => "Population",
            Self::Camera => "Camera",
        }
    }
}

/// Per-system timing with exponential moving average smoothing.
pub struct SystemTimers {
    /// EMA-smoothed duration in microseconds per phase.
    pub durations_us: [f64; 8],
    /// Timestamp when `begin()` was called.
    start: Instant,
}

const EMA_ALPHA: f64 = 0.1;

impl SystemTimers {
    pub fn new() -> Self {
        Self {
            durations_us: [0.0; 8],
            start: Instant::now(),
        }
    }

    /// Call before a system runs.
    pub fn begin(&mut self) {
        self.start = Instant::now();
    }

    /// Call after a system finishes. Records elapsed time for `phase`.
    /// Returns the raw (unsmoothed) microseconds.
    pub fn end(&mut self, phase: SystemPhase) -> f64 {
        let elapsed_us = self.start.elapsed().as_secs_f64() * 1_000_000.0;
        let idx = phase as usize;
        self.durations_us[idx] =
            self.durations_us[idx] * (1.0 - EMA_ALPHA) + elapsed_us * EMA_ALPHA;
        elapsed_us
    }

    pub fn get(&self, phase: SystemPhase) -> f64 {
        self.durations_us[phase as usize]
    }

    /// Sum of all phase durations (microseconds).
    pub fn total_us(&self) -> f64 {
        self.durations_us.iter().sum()
    }

    /// One-line breakdown for logs, slowest phase first.
    pub fn summary(&self) -> String {
        let mut phases = SystemPhase::ALL;
        phases.sort_by(|a, b| self.get(*b).total_cmp(&self.get(*a)));
        phases
            .iter()
            .map(|p| format!("{} {:.0}us", p.label(), self.get(*p)))
            .collect::<Vec<_>>()
            .join(" | ")
    }
}

impl Default for SystemTimers {
    fn default() -> Self {
        Self::new()
    }
}
