use bevy::prelude::*;
use rand::Rng;

/// Near-black blue the frame clears to; the canvas the glow accumulates over.
pub const BACKGROUND: Color = Color::srgb(0.02, 0.02, 0.063);

/// Stream colors: cyan and orange, phase-opposed agents.
pub const AGENT_COLORS: [Color; 2] = [
    Color::srgb(0.0, 0.76, 1.0),  // #00C2FF
    Color::srgb(1.0, 0.56, 0.0),  // #FF8F00
];

pub const AGENT_HEAD_COLOR: Color = Color::WHITE;

/// Random bright RGB for a particle's inherent color: each channel in
/// [55, 255] so no particle disappears into the background.
pub fn random_particle_color(rng: &mut impl Rng) -> Color {
    Color::srgb(
        rng.gen_range(55u16..255) as f32 / 255.0,
        rng.gen_range(55u16..255) as f32 / 255.0,
        rng.gen_range(55u16..255) as f32 / 255.0,
    )
}

/// Scale a color into HDR range so bloom picks it up.
pub fn boosted(color: Color, boost: f32) -> Color {
    let lin = color.to_linear();
    Color::from(LinearRgba {
        red: lin.red * boost,
        green: lin.green * boost,
        blue: lin.blue * boost,
        alpha: lin.alpha,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn particle_color_channels_stay_bright() {
        let mut rng = rand::thread_rng();
        for _ in 0..64 {
            let c = random_particle_color(&mut rng).to_srgba();
            for ch in [c.red, c.green, c.blue] {
                assert!(ch >= 55.0 / 255.0 && ch <= 1.0);
            }
        }
    }

    #[test]
    fn boost_scales_linear_channels() {
        let c = boosted(Color::linear_rgb(0.2, 0.4, 0.1), 3.0).to_linear();
        assert!((c.red - 0.6).abs() < 1e-5);
        assert!((c.green - 1.2).abs() < 1e-5);
        assert!((c.blue - 0.3).abs() < 1e-5);
    }
}
