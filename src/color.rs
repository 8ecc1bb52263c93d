use eframe::egui::Color32;
use palette::{Hsl, IntoColor, LinSrgb, Mix, Srgb};

use crate::data::model::Record;

// ---------------------------------------------------------------------------
// Type colour table
// ---------------------------------------------------------------------------

/// Top and bottom colours of a vertical card gradient.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TypeColors {
    pub top: Color32,
    pub bottom: Color32,
}

const fn pair(top: [u8; 3], bottom: [u8; 3]) -> TypeColors {
    TypeColors {
        top: Color32::from_rgb(top[0], top[1], top[2]),
        bottom: Color32::from_rgb(bottom[0], bottom[1], bottom[2]),
    }
}

/// Used for unknown tags and for the missing second type.
pub const DEFAULT_COLORS: TypeColors = pair([0xF0, 0xF0, 0xF0], [0xD0, 0xD0, 0xD0]);

/// Look up the gradient for a single type tag (case-insensitive).
pub fn type_colors(tag: &str) -> TypeColors {
    match tag.trim().to_ascii_uppercase().as_str() {
        "WATER" => pair([0x6B, 0xB6, 0xFF], [0x00, 0x66, 0xCC]),
        "FIRE" => pair([0xFF, 0x6B, 0x6B], [0xCC, 0x00, 0x00]),
        "GRASS" => pair([0x4C, 0xAF, 0x50], [0x2E, 0x7D, 0x32]),
        "ELECTRIC" => pair([0xFF, 0xD7, 0x00], [0xFF, 0xA5, 0x00]),
        "PSYCHIC" => pair([0xFF, 0x69, 0xB4], [0x8B, 0x00, 0x8B]),
        "ICE" => pair([0x87, 0xCE, 0xEB], [0x41, 0x69, 0xE1]),
        "DRAGON" => pair([0x93, 0x70, 0xDB], [0x4B, 0x00, 0x82]),
        "DARK" => pair([0x69, 0x69, 0x69], [0x2F, 0x2F, 0x2F]),
        "FIGHTING" => pair([0xCD, 0x85, 0x3F], [0x8B, 0x45, 0x13]),
        "POISON" => pair([0x99, 0x32, 0xCC], [0x4B, 0x00, 0x82]),
        "GROUND" => pair([0xDE, 0xB8, 0x87], [0x8B, 0x73, 0x55]),
        "FLYING" => pair([0x87, 0xCE, 0xEB], [0x64, 0x95, 0xED]),
        "BUG" => pair([0x9A, 0xCD, 0x32], [0x55, 0x6B, 0x2F]),
        "ROCK" => pair([0xA0, 0x52, 0x2D], [0x65, 0x43, 0x21]),
        "GHOST" => pair([0x93, 0x70, 0xDB], [0x48, 0x3D, 0x8B]),
        "STEEL" => pair([0xC0, 0xC0, 0xC0], [0x70, 0x80, 0x90]),
        "FAIRY" => pair([0xFF, 0xB6, 0xC1], [0xFF, 0x69, 0xB4]),
        "NORMAL" => pair([0xF5, 0xF5, 0xDC], [0xD2, 0xB4, 0x8C]),
        _ => DEFAULT_COLORS,
    }
}

/// Card background: follows the primary type.
pub fn primary_colors(record: &Record) -> TypeColors {
    type_colors(record.primary_type())
}

/// Second badge colours; the default grey when the record has one type.
pub fn secondary_colors(record: &Record) -> TypeColors {
    record
        .secondary_type()
        .map(type_colors)
        .unwrap_or(DEFAULT_COLORS)
}

// ---------------------------------------------------------------------------
// Blending helpers
// ---------------------------------------------------------------------------

impl TypeColors {
    /// Colour at `t` ∈ [0, 1] between top and bottom, mixed in linear RGB.
    pub fn at(&self, t: f32) -> Color32 {
        let a = to_linear(self.top);
        let b = to_linear(self.bottom);
        from_linear(a.mix(b, t.clamp(0.0, 1.0)))
    }

    /// Midpoint colour, used for flat badges.
    pub fn mid(&self) -> Color32 {
        self.at(0.5)
    }
}

fn to_linear(c: Color32) -> LinSrgb {
    Srgb::new(c.r(), c.g(), c.b())
        .into_format::<f32>()
        .into_linear()
}

fn from_linear(c: LinSrgb) -> Color32 {
    let srgb: Srgb<u8> = Srgb::<f32>::from_linear(c).into_format();
    Color32::from_rgb(srgb.red, srgb.green, srgb.blue)
}

/// Black or white, whichever reads better on `background`.
pub fn text_color_on(background: Color32) -> Color32 {
    let rgb = Srgb::new(background.r(), background.g(), background.b()).into_format::<f32>();
    let hsl: Hsl = rgb.into_color();
    if hsl.lightness > 0.6 {
        Color32::BLACK
    } else {
        Color32::WHITE
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::factory::RecordFactory;

    #[test]
    fn test_lookup_is_case_insensitive() {
        assert_eq!(type_colors("water"), type_colors("WATER"));
        assert_eq!(type_colors(" Fire "), type_colors("FIRE"));
        assert_eq!(type_colors("Water").top, Color32::from_rgb(0x6B, 0xB6, 0xFF));
    }

    #[test]
    fn test_unknown_type_uses_default() {
        assert_eq!(type_colors("Sound"), DEFAULT_COLORS);
        assert_eq!(type_colors(""), DEFAULT_COLORS);
    }

    #[test]
    fn test_primary_and_secondary_colors() {
        let mut factory = RecordFactory::new();
        let charizard = factory
            .parse_record("Charizard,90.5kg,1.7m,0.84,0.78,0.78,Fire-Flying")
            .unwrap();
        let pikachu = factory
            .parse_record("Pikachu,6.0kg,0.4m,0.55,0.40,0.35,Electric")
            .unwrap();

        assert_eq!(primary_colors(&charizard), type_colors("Fire"));
        assert_eq!(secondary_colors(&charizard), type_colors("Flying"));
        assert_eq!(secondary_colors(&pikachu), DEFAULT_COLORS);
    }

    fn close(a: Color32, b: Color32) -> bool {
        a.to_array()
            .iter()
            .zip(b.to_array().iter())
            .all(|(x, y)| x.abs_diff(*y) <= 1)
    }

    #[test]
    fn test_gradient_endpoints() {
        let water = type_colors("Water");
        assert!(close(water.at(0.0), water.top));
        assert!(close(water.at(1.0), water.bottom));
        assert!(close(water.at(-3.0), water.top));
        assert!(!close(water.mid(), water.top));
    }

    #[test]
    fn test_text_color_contrast() {
        assert_eq!(text_color_on(Color32::from_rgb(0xF5, 0xF5, 0xDC)), Color32::BLACK);
        assert_eq!(text_color_on(Color32::from_rgb(0x2F, 0x2F, 0x2F)), Color32::WHITE);
    }
}
