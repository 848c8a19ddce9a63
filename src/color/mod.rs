//! RGB/HSV conversions and the colour adjustments used by the plane shader
//!
//! CPU mirror of the maths in `shaders/art_plane.wgsl` so the shading
//! pipeline can be tested without a GPU. Hue is stored as a fraction of a
//! full turn in [0, 1).

use crate::physics::HUE_SHIFT_GAIN;

/// Guard against division by zero for achromatic pixels.
const CHROMA_EPSILON: f32 = 1.0e-10;

/// Convert RGB (channels in [0, 1]) to HSV using the hexagonal formulation.
pub fn rgb_to_hsv(rgb: [f32; 3]) -> [f32; 3] {
    let [r, g, b] = rgb;
    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let chroma = max - min;

    let hue = if chroma < CHROMA_EPSILON {
        0.0
    } else if max == r {
        ((g - b) / chroma).rem_euclid(6.0) / 6.0
    } else if max == g {
        ((b - r) / chroma + 2.0) / 6.0
    } else {
        ((r - g) / chroma + 4.0) / 6.0
    };

    let saturation = if max < CHROMA_EPSILON {
        0.0
    } else {
        chroma / max
    };

    [hue, saturation, max]
}

/// Convert HSV back to RGB.
pub fn hsv_to_rgb(hsv: [f32; 3]) -> [f32; 3] {
    let [h, s, v] = hsv;
    let h = h.rem_euclid(1.0) * 6.0;
    let sector = h.floor();
    let f = h - sector;
    let p = v * (1.0 - s);
    let q = v * (1.0 - s * f);
    let t = v * (1.0 - s * (1.0 - f));

    match sector as i32 % 6 {
        0 => [v, t, p],
        1 => [q, v, p],
        2 => [p, v, t],
        3 => [p, q, v],
        4 => [t, p, v],
        _ => [v, p, q],
    }
}

/// Doppler hue rotation plus beaming brightness boost.
///
/// The hue advances by `10 * ln(D) / 360` of a turn and wraps; the value is
/// scaled by `D` and saturates at 1.
pub fn doppler_shift(rgb: [f32; 3], doppler: f32) -> [f32; 3] {
    let mut hsv = rgb_to_hsv(rgb);
    let hue_shift = HUE_SHIFT_GAIN * doppler.ln() / 360.0;
    hsv[0] = (hsv[0] + hue_shift).rem_euclid(1.0);
    hsv[2] = (hsv[2] * doppler).min(1.0);
    hsv_to_rgb(hsv)
}

/// Zoom-dependent contrast and saturation correction.
///
/// Zoom levels below 1 are valid and pull contrast/saturation below baseline.
pub fn zoom_correct(rgb: [f32; 3], zoom: f32) -> [f32; 3] {
    let contrast_boost = 1.0 + (zoom - 1.0) * 0.1;
    let saturation_boost = 1.0 + (zoom - 1.0) * 0.2;

    let contrasted = rgb.map(|c| (c - 0.5) * contrast_boost + 0.5);

    let mut hsv = rgb_to_hsv(contrasted);
    hsv[1] = (hsv[1] * saturation_boost).clamp(0.0, 1.0);
    hsv_to_rgb(hsv)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_rgb_close(a: [f32; 3], b: [f32; 3]) {
        for i in 0..3 {
            assert!(
                (a[i] - b[i]).abs() < 1e-4,
                "channel {}: {:?} vs {:?}",
                i,
                a,
                b
            );
        }
    }

    #[test]
    fn test_round_trip() {
        let samples = [
            [1.0, 0.0, 0.0],
            [0.0, 1.0, 0.0],
            [0.0, 0.0, 1.0],
            [0.8, 0.4, 0.1],
            [0.1, 0.9, 0.7],
            [0.33, 0.21, 0.95],
            [1.0, 1.0, 1.0],
            [0.0, 0.0, 0.0],
        ];
        for rgb in samples {
            assert_rgb_close(hsv_to_rgb(rgb_to_hsv(rgb)), rgb);
        }
    }

    #[test]
    fn test_achromatic() {
        // R=G=B must not divide by zero and must survive the round trip
        let grey = [0.42, 0.42, 0.42];
        let hsv = rgb_to_hsv(grey);
        assert_eq!(hsv[0], 0.0);
        assert_eq!(hsv[1], 0.0);
        assert_rgb_close(hsv_to_rgb(hsv), grey);
    }

    #[test]
    fn test_primary_hues() {
        assert!((rgb_to_hsv([1.0, 0.0, 0.0])[0] - 0.0).abs() < 1e-6);
        assert!((rgb_to_hsv([0.0, 1.0, 0.0])[0] - 1.0 / 3.0).abs() < 1e-6);
        assert!((rgb_to_hsv([0.0, 0.0, 1.0])[0] - 2.0 / 3.0).abs() < 1e-6);
    }

    #[test]
    fn test_doppler_identity_at_rest() {
        let rgb = [0.6, 0.3, 0.8];
        assert_rgb_close(doppler_shift(rgb, 1.0), rgb);
    }

    #[test]
    fn test_doppler_hue_stays_in_range() {
        // Even an absurd Doppler factor must leave hue in [0, 1)
        let shifted = rgb_to_hsv(doppler_shift([0.9, 0.2, 0.2], 1.0e6));
        assert!((0.0..1.0).contains(&shifted[0]));
    }

    #[test]
    fn test_doppler_brightness_saturates() {
        let shifted = doppler_shift([0.5, 0.5, 0.5], 1.0e4);
        for channel in shifted {
            assert!(channel <= 1.0 + 1e-6);
        }
    }

    #[test]
    fn test_zoom_correct_identity_at_one() {
        let rgb = [0.7, 0.2, 0.4];
        assert_rgb_close(zoom_correct(rgb, 1.0), rgb);
    }

    #[test]
    fn test_zoom_correct_below_one_reduces_contrast() {
        // zoom < 1 is not clamped; it pulls channels toward the midpoint
        let rgb = [0.9, 0.9, 0.9];
        let corrected = zoom_correct(rgb, 0.5);
        assert!(corrected[0] < rgb[0]);
        assert!(corrected[0] > 0.5);
    }

    #[test]
    fn test_zoom_correct_boosts_saturation() {
        let rgb = [0.8, 0.4, 0.4];
        let before = rgb_to_hsv(rgb)[1];
        let after = rgb_to_hsv(zoom_correct(rgb, 3.0))[1];
        assert!(after > before);
        assert!(after <= 1.0);
    }
}
