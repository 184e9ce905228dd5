// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! RGB ↔ HSL conversion backed by `palette`.

use palette::{FromColor, Hsl, Srgb};

/// Converts 8-bit RGB to HSL.
///
/// Returns `(hue, saturation, lightness)` with hue in degrees `[0, 360)` and
/// saturation/lightness as fractions in `[0, 1]`. Gray input has zero
/// saturation and hue `0`.
///
/// # Examples
///
/// ```
/// use rubetek_light::color::rgb_to_hsl;
///
/// let (hue, saturation, _) = rgb_to_hsl(128, 128, 128);
/// assert_eq!(hue, 0.0);
/// assert_eq!(saturation, 0.0);
/// ```
#[must_use]
pub fn rgb_to_hsl(red: u8, green: u8, blue: u8) -> (f32, f32, f32) {
    let rgb = Srgb::new(red, green, blue).into_format::<f32>();
    let hsl = Hsl::from_color(rgb);

    (
        hsl.hue.into_positive_degrees(),
        hsl.saturation.clamp(0.0, 1.0),
        hsl.lightness.clamp(0.0, 1.0),
    )
}

/// Converts HSL to 8-bit RGB.
///
/// Hue is in degrees and wraps; saturation and lightness are clamped to
/// `[0, 1]`.
#[must_use]
pub fn hsl_to_rgb(hue: f32, saturation: f32, lightness: f32) -> (u8, u8, u8) {
    let hsl = Hsl::new(hue, saturation.clamp(0.0, 1.0), lightness.clamp(0.0, 1.0));
    let rgb = Srgb::<f32>::from_color(hsl).into_format::<u8>();

    (rgb.red, rgb.green, rgb.blue)
}
