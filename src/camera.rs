use glam::Vec2;

const MIN_ZOOM: f32 = 0.45;
const MAX_ZOOM: f32 = 1.4;
/// Zoom shrinks as the head grows: `1.1 - radius / 140`.
const ZOOM_BASE: f32 = 1.1;
const ZOOM_RADIUS_FALLOFF: f32 = 140.0;

/// Camera-visible rectangle in world coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub center: Vec2,
    pub half_extents: Vec2,
}

impl Viewport {
    pub fn new(center: Vec2, half_extents: Vec2) -> Self {
        Self {
            center,
            half_extents: half_extents.abs(),
        }
    }

    /// Same centre, half extents scaled by `scale`.
    pub fn expanded(&self, scale: f32) -> Self {
        Self::new(self.center, self.half_extents * scale)
    }

    /// Strictly inside (points on the border count as outside).
    pub fn contains(&self, point: Vec2) -> bool {
        let d = (point - self.center).abs();
        d.x < self.half_extents.x && d.y < self.half_extents.y
    }
}

/// Follow camera: keeps the player centred while never showing past the world edge.
#[derive(Debug, Clone, Copy)]
pub struct Camera {
    pub center: Vec2,
    pub zoom: f32,
    /// Screen size in pixels.
    pub screen: Vec2,
}

impl Camera {
    pub fn new(screen: Vec2, world_size: Vec2) -> Self {
        Self {
            center: world_size * 0.5,
            zoom: 1.0,
            screen,
        }
    }

    /// World span currently on screen.
    pub fn span(&self) -> Vec2 {
        self.screen / self.zoom.max(f32::EPSILON)
    }

    /// Track the player. `zoom_scale` is the viewport-class multiplier.
    pub fn follow(&mut self, target: Vec2, head_radius: f32, world_size: Vec2, zoom_scale: f32) {
        self.zoom = ((ZOOM_BASE - head_radius / ZOOM_RADIUS_FALLOFF) * zoom_scale).clamp(MIN_ZOOM, MAX_ZOOM);

        let half = self.span() * 0.5;
        self.center.x = follow_axis(target.x, half.x, world_size.x);
        self.center.y = follow_axis(target.y, half.y, world_size.y);
    }

    pub fn viewport(&self) -> Viewport {
        Viewport::new(self.center, self.span() * 0.5)
    }
}

fn follow_axis(target: f32, half_span: f32, world_len: f32) -> f32 {
    if world_len <= half_span * 2.0 {
        world_len * 0.5
    } else {
        target.clamp(half_span, world_len - half_span)
    }
}
