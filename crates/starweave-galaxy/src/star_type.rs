//! Spectral star types and their weighted occurrence table.

use glam::Vec3;
use rand::Rng;

/// Tint of every haze puff.
pub const HAZE_COLOR_HEX: u32 = 0x0082ff;

/// Spectral classification of a generated star, determining its color and
/// base sprite size.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum StarType {
    /// Red dwarf. By far the most common.
    M,
    /// Orange.
    K,
    /// Yellow, Sol-like.
    G,
    /// Yellow-white.
    F,
    /// White.
    A,
    /// Blue-white. Rare and large.
    B,
}

impl StarType {
    /// Every type, in table order.
    pub const ALL: [StarType; 6] = [
        StarType::M,
        StarType::K,
        StarType::G,
        StarType::F,
        StarType::A,
        StarType::B,
    ];

    /// Relative occurrence in percent.
    pub fn weight(&self) -> f32 {
        match self {
            StarType::M => 76.45,
            StarType::K => 12.1,
            StarType::G => 7.6,
            StarType::F => 3.0,
            StarType::A => 0.6,
            StarType::B => 0.13,
        }
    }

    /// Sprite color as `0xRRGGBB`.
    pub fn color_hex(&self) -> u32 {
        match self {
            StarType::M => 0xffcc6f,
            StarType::K => 0xffd2a1,
            StarType::G => 0xfff4ea,
            StarType::F => 0xf8f7ff,
            StarType::A => 0xcad7ff,
            StarType::B => 0xaabfff,
        }
    }

    /// Sprite color as normalized RGB.
    pub fn color(&self) -> Vec3 {
        rgb_from_u32(self.color_hex())
    }

    /// Sprite color as `#rrggbb`.
    pub fn hex_string(&self) -> String {
        color_to_hex(self.color())
    }

    /// Base sprite size before distance scaling.
    pub fn base_size(&self) -> f32 {
        match self {
            StarType::M | StarType::K => 0.7,
            StarType::G => 1.15,
            StarType::F => 1.48,
            StarType::A => 2.0,
            StarType::B => 2.5,
        }
    }

    /// Draw a type according to the occurrence weights.
    pub fn sample<R: Rng + ?Sized>(rng: &mut R) -> StarType {
        let total: f32 = Self::ALL.iter().map(StarType::weight).sum();
        let mut roll = rng.random::<f32>() * total;
        for star_type in Self::ALL {
            if roll < star_type.weight() {
                return star_type;
            }
            roll -= star_type.weight();
        }
        StarType::B
    }
}

pub(crate) fn rgb_from_u32(hex: u32) -> Vec3 {
    Vec3::new(
        ((hex >> 16) & 0xff) as f32 / 255.0,
        ((hex >> 8) & 0xff) as f32 / 255.0,
        (hex & 0xff) as f32 / 255.0,
    )
}

/// Parse `#rrggbb` (leading `#` optional) into normalized RGB.
pub fn color_from_hex(hex: &str) -> Option<Vec3> {
    let digits = hex.trim().trim_start_matches('#');
    if digits.len() != 6 || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    u32::from_str_radix(digits, 16).ok().map(rgb_from_u32)
}

/// Format normalized RGB as `#rrggbb`.
pub fn color_to_hex(color: Vec3) -> String {
    let c = (color.clamp(Vec3::ZERO, Vec3::ONE) * 255.0).round();
    format!("#{:02x}{:02x}{:02x}", c.x as u8, c.y as u8, c.z as u8)
}
