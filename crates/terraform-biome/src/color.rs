//! Host default grass and foliage tints, sampled from a colormap triangle
//! indexed by temperature and downfall.

#[derive(Clone, Copy, Debug)]
struct Triangle {
    hot_wet: u32,
    hot_dry: u32,
    cold: u32,
}

const GRASS: Triangle = Triangle {
    hot_wet: 0x47CD33,
    hot_dry: 0xBFB755,
    cold: 0x80B497,
};

const FOLIAGE: Triangle = Triangle {
    hot_wet: 0x1ABF00,
    hot_dry: 0xAEA42A,
    cold: 0x60A17B,
};

fn channel(c: u32, shift: u32) -> f32 {
    ((c >> shift) & 0xFF) as f32
}

fn sample(tri: &Triangle, temperature: f32, downfall: f32) -> u32 {
    let t = temperature.clamp(0.0, 1.0);
    let d = downfall.clamp(0.0, 1.0) * t;
    let (w_wet, w_dry, w_cold) = (d, t - d, 1.0 - t);
    let mut out = 0u32;
    for shift in [16, 8, 0] {
        let v = w_wet * channel(tri.hot_wet, shift)
            + w_dry * channel(tri.hot_dry, shift)
            + w_cold * channel(tri.cold, shift);
        out |= (v.round().clamp(0.0, 255.0) as u32) << shift;
    }
    out
}

pub fn default_grass_color(temperature: f32, downfall: f32) -> u32 {
    sample(&GRASS, temperature, downfall)
}

pub fn default_foliage_color(temperature: f32, downfall: f32) -> u32 {
    sample(&FOLIAGE, temperature, downfall)
}
