//! Compositing math for the software surface.
//!
//! Byte channels are straight (non-premultiplied) RGBA8; float channels are
//! normalized to 0.0–1.0.

/// 0–255 integer channel → 0.0–1.0, clamped.
pub(crate) fn channel_unit(c: i32) -> f64 {
    (f64::from(c) / 255.0).clamp(0.0, 1.0)
}

/// 0.0–1.0 → 0–255 with rounding.
pub(crate) fn to_byte(v: f64) -> u8 {
    (v.clamp(0.0, 1.0) * 255.0 + 0.5) as u8
}

pub(crate) fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

/// Interpolate two straight-alpha colors in premultiplied space.
///
/// Fully transparent results come back as transparent black.
pub(crate) fn mix_premultiplied(from: [f64; 4], to: [f64; 4], t: f64) -> [f64; 4] {
    let a = lerp(from[3], to[3], t);
    if a <= 0.0 {
        return [0.0; 4];
    }
    let channel = |i: usize| lerp(from[i] * from[3], to[i] * to[3], t) / a;
    [channel(0), channel(1), channel(2), a]
}

/// Porter-Duff source-over of a straight float color onto a stored pixel.
pub(crate) fn source_over(src: [f64; 4], dst: [u8; 4]) -> [u8; 4] {
    let sa = src[3];
    let da = f64::from(dst[3]) / 255.0;
    let out_a = sa + da * (1.0 - sa);
    if out_a <= 0.0 {
        return [0; 4];
    }
    let channel = |i: usize| {
        let dc = f64::from(dst[i]) / 255.0;
        to_byte((src[i] * sa + dc * da * (1.0 - sa)) / out_a)
    };
    [channel(0), channel(1), channel(2), to_byte(out_a)]
}
