use glam::Vec2;

/// Viewport class of the rendering collaborator. Small screens see less of
/// the world, so they get a few more wild crocs and a wider zoom.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewportClass {
    Desktop,
    Compact,
}

impl ViewportClass {
    pub fn label(self) -> &'static str {
        match self {
            ViewportClass::Desktop => "Desktop",
            ViewportClass::Compact => "Compact",
        }
    }

    pub fn next(self) -> Self {
        match self {
            ViewportClass::Desktop => ViewportClass::Compact,
            ViewportClass::Compact => ViewportClass::Desktop,
        }
    }
}

/// Base wild croc population on desktop.
const TARGET_NPCS: usize = 10;
/// Compact viewports get this many times the base population.
const COMPACT_NPC_SCALE: f32 = 1.1;
/// Compact viewports zoom out further so crocs feel smaller.
const COMPACT_ZOOM_SCALE: f32 = 0.82;

/// Everything tunable about an arena session.
#[derive(Debug, Clone)]
pub struct ArenaConfig {
    pub world_size: Vec2,
    pub viewport_class: ViewportClass,

    /// Cruise speeds in world units/second. Growth never slows a croc.
    pub player_speed: f32,
    pub npc_speed: f32,

    pub target_npcs: usize,
    pub target_pellets: usize,
    pub target_rocks: usize,
    pub target_chests: usize,

    /// Spawn candidates tried per tick before giving up until the next one.
    pub spawn_attempts: usize,
    /// Spawn candidates tried for the initial fill at session start.
    pub initial_spawn_attempts: usize,
    /// Half extents of the viewport are scaled by this when keeping spawns off screen.
    pub spawn_view_scale: f32,
    /// Extra clearance between a spawn and existing bodies, in head radii.
    pub spawn_clearance: f32,

    /// Magnet effect reach and pull.
    pub magnet_radius: f32,
    pub magnet_pull: f32,

    /// Frames longer than this are simulated as this long.
    pub max_dt: f32,
    /// Zoom multiplier applied on top of the size-based zoom.
    pub zoom_scale: f32,

    /// Fixed RNG seed. `None` seeds from the OS.
    pub seed: Option<u64>,
    pub player_name: String,
}

impl Default for ArenaConfig {
    fn default() -> Self {
        let mut config = Self {
            world_size: Vec2::new(4800.0, 3200.0),
            viewport_class: ViewportClass::Desktop,
            player_speed: 255.0,
            npc_speed: 188.0,
            target_npcs: TARGET_NPCS,
            target_pellets: 26,
            target_rocks: 8,
            target_chests: 2,
            spawn_attempts: 200,
            initial_spawn_attempts: 500,
            spawn_view_scale: 1.2,
            spawn_clearance: 4.0,
            magnet_radius: 260.0,
            magnet_pull: 180.0,
            max_dt: 0.033,
            zoom_scale: 1.0,
            seed: None,
            player_name: "You".to_string(),
        };
        config.apply_preset();
        config
    }
}

impl ArenaConfig {
    pub fn compact() -> Self {
        let mut config = Self::default();
        config.set_viewport_class(ViewportClass::Compact);
        config
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Switch viewport class (e.g. on resize). Returns true if it changed.
    pub fn set_viewport_class(&mut self, class: ViewportClass) -> bool {
        if self.viewport_class == class {
            return false;
        }
        self.viewport_class = class;
        self.apply_preset();
        true
    }

    /// Apply preset values for the current viewport class.
    fn apply_preset(&mut self) {
        match self.viewport_class {
            ViewportClass::Desktop => {
                self.target_npcs = TARGET_NPCS;
                self.zoom_scale = 1.0;
            }
            ViewportClass::Compact => {
                self.target_npcs = (TARGET_NPCS as f32 * COMPACT_NPC_SCALE).ceil() as usize;
                self.zoom_scale = COMPACT_ZOOM_SCALE;
            }
        }
    }
}
