//! RGB to HSV conversion in the half-degree byte convention.

use image::{ImageBuffer, Rgb, RgbImage};

/// A frame whose three channels hold H, S, V bytes rather than R, G, B.
pub type HsvImage = ImageBuffer<Rgb<u8>, Vec<u8>>;

/// Convert one RGB triple to HSV bytes: H in 0-179 (half degrees),
/// S and V in 0-255.
pub fn rgb_to_hsv(r: u8, g: u8, b: u8) -> (u8, u8, u8) {
    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let delta = (max - min) as f32;
    if delta == 0.0 {
        // Achromatic: hue is undefined, saturation zero.
        return (0, 0, max);
    }

    let (rf, gf, bf) = (r as f32, g as f32, b as f32);
    let h_deg = if max == r {
        60.0 * (((gf - bf) / delta) % 6.0)
    } else if max == g {
        60.0 * ((bf - rf) / delta + 2.0)
    } else {
        60.0 * ((rf - gf) / delta + 4.0)
    };
    let h_deg = if h_deg < 0.0 { h_deg + 360.0 } else { h_deg };

    let h = ((h_deg / 2.0).round() as u16 % 180) as u8;
    let s = (delta * 255.0 / max as f32).round() as u8;
    (h, s, max)
}

/// Convert a whole RGB frame to HSV. Done once per frame; every per-label mask
/// is derived from the same conversion.
pub fn to_hsv(frame: &RgbImage) -> HsvImage {
    let mut hsv = HsvImage::new(frame.width(), frame.height());
    for (out, px) in hsv.pixels_mut().zip(frame.pixels()) {
        let (h, s, v) = rgb_to_hsv(px[0], px[1], px[2]);
        out.0 = [h, s, v];
    }
    hsv
}
