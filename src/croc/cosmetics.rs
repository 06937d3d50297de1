/// Body pattern variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Pattern {
    Plain,
    Spots,
    Stripes,
    Camouflage,
    Lava,
    Aurora,
    Polka,
    Harlequin,
    Rainbow,
    Disco,
    Nebula,
}

impl Pattern {
    /// Patterns wild crocs can roll.
    pub const WILD: [Pattern; 8] = [
        Pattern::Plain,
        Pattern::Spots,
        Pattern::Stripes,
        Pattern::Camouflage,
        Pattern::Lava,
        Pattern::Aurora,
        Pattern::Polka,
        Pattern::Harlequin,
    ];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Accessory {
    Crown,
    Jester,
}

/// Special effects. `Magnet` is the only one the simulation reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    Disco,
    Magnet,
}

/// Visual look of a croc.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cosmetics {
    /// RGBA packed as u32.
    pub color: u32,
    pub pattern: Pattern,
    pub accessory: Option<Accessory>,
    pub effect: Option<Effect>,
    /// Per-croc phase for animated colours, in degrees.
    pub hue_offset: f32,
}

/// Starter look for the player (jade, plain).
pub const STARTER_COLOR: u32 = 0x5AF18CFF;

impl Default for Cosmetics {
    fn default() -> Self {
        Self {
            color: STARTER_COLOR,
            pattern: Pattern::Plain,
            accessory: None,
            effect: None,
            hue_offset: 0.0,
        }
    }
}

/// Disco hue speed in degrees per second.
const DISCO_DEG_PER_SEC: f32 = 60.0;

impl Cosmetics {
    pub fn has_magnet(&self) -> bool {
        self.effect == Some(Effect::Magnet)
    }

    /// Colour a renderer should use at `time` seconds. Disco crocs cycle hue.
    pub fn display_color(&self, time: f32) -> u32 {
        match self.effect {
            Some(Effect::Disco) => {
                let hue = (time * DISCO_DEG_PER_SEC + self.hue_offset).rem_euclid(360.0);
                hsl_to_rgba(hue, 0.8, 0.6)
            }
            _ => self.color,
        }
    }
}

fn hsl_to_rgba(hue: f32, sat: f32, light: f32) -> u32 {
    let c = (1.0 - (2.0 * light - 1.0).abs()) * sat;
    let h = hue / 60.0;
    let x = c * (1.0 - (h.rem_euclid(2.0) - 1.0).abs());
    let (r, g, b) = match h as u32 {
        0 => (c, x, 0.0),
        1 => (x, c, 0.0),
        2 => (0.0, c, x),
        3 => (0.0, x, c),
        4 => (x, 0.0, c),
        _ => (c, 0.0, x),
    };
    let m = light - c / 2.0;
    let to_u8 = |v: f32| ((v + m) * 255.0).round().clamp(0.0, 255.0) as u32;
    to_u8(r) << 24 | to_u8(g) << 16 | to_u8(b) << 8 | 0xFF
}
