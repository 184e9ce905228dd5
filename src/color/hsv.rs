// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! RGB ↔ HSV conversion on normalized hue and saturation.

/// Extracts hue and saturation from RGB channels.
///
/// Channels are 0-255 (fractional values allowed, out-of-range values are
/// clamped). Returns `(hue, saturation)`, both in `[0, 1]`. The value channel
/// is computed but not returned: device brightness is controlled separately.
///
/// Achromatic input (`r == g == b`) yields `(0.0, 0.0)`.
///
/// # Examples
///
/// ```
/// use rubetek_light::color::rgb_to_hsv;
///
/// assert_eq!(rgb_to_hsv(255.0, 0.0, 0.0), (0.0, 1.0));
/// assert_eq!(rgb_to_hsv(42.0, 42.0, 42.0), (0.0, 0.0));
/// ```
#[allow(clippy::many_single_char_names)]
#[must_use]
pub fn rgb_to_hsv(red: f64, green: f64, blue: f64) -> (f64, f64) {
    let r = unit_channel(red);
    let g = unit_channel(green);
    let b = unit_channel(blue);

    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let delta = max - min;

    let saturation = if max <= 0.0 { 0.0 } else { delta / max };

    if delta < f64::EPSILON {
        return (0.0, saturation);
    }

    let sector = if (max - r).abs() < f64::EPSILON {
        (g - b) / delta
    } else if (max - g).abs() < f64::EPSILON {
        (b - r) / delta + 2.0
    } else {
        (r - g) / delta + 4.0
    };

    let hue = sector / 6.0;
    let hue = if hue < 0.0 { hue + 1.0 } else { hue };

    (hue, saturation)
}

/// Converts normalized HSV to RGB channels.
///
/// All inputs are in `[0, 1]` and clamped to it. The result channels are
/// 0-255 floats; callers sending them to a device floor them.
///
/// For any `(r, g, b)` produced by this function, [`rgb_to_hsv`] returns the
/// original hue and saturation (modulo floating point error), except that
/// hue is meaningless when saturation is zero.
///
/// # Examples
///
/// ```
/// use rubetek_light::color::hsv_to_rgb;
///
/// let (r, g, b) = hsv_to_rgb(0.0, 1.0, 0.5);
/// assert_eq!((r, g, b), (127.5, 0.0, 0.0));
/// ```
#[allow(
    clippy::many_single_char_names,
    clippy::cast_possible_truncation,
    clippy::similar_names
)]
#[must_use]
pub fn hsv_to_rgb(hue: f64, saturation: f64, value: f64) -> (f64, f64, f64) {
    let h = clamp_unit(hue);
    let s = clamp_unit(saturation);
    let v = clamp_unit(value);

    let scaled = h * 6.0;
    let sector = scaled.floor();
    let f = scaled - sector;

    let p = v * (1.0 - s);
    let q = v * (1.0 - f * s);
    let t = v * (1.0 - (1.0 - f) * s);

    // sector is 0..=6 after clamping; 6 wraps back to red
    let (r, g, b) = match (sector as i64).rem_euclid(6) {
        0 => (v, t, p),
        1 => (q, v, p),
        2 => (p, v, t),
        3 => (p, q, v),
        4 => (t, p, v),
        _ => (v, p, q),
    };

    (r * 255.0, g * 255.0, b * 255.0)
}

fn unit_channel(channel: f64) -> f64 {
    clamp_unit(channel / 255.0)
}

fn clamp_unit(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 1.0)
    }
}
