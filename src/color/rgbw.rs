// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Split and merge of the dedicated white channel.

/// Decomposes an RGB color into RGBW channels.
///
/// The color is scaled so that its brightest channel reaches 255. A whiteness
/// estimate `((M + m) / 2 - 127.5) * (255 / 127.5)` is taken from the scaled
/// maximum `M` and minimum `m`, then divided back by the scale factor. White
/// is the floor of that estimate and every color channel is the floor of the
/// original channel minus it, each clamped to `[0, 255]`.
///
/// The arithmetic runs on integer numerators over the brightest channel, so
/// the result is exact: gray `(k, k, k)` always becomes `(0, 0, 0, k)`.
/// The decomposition is lossy and not inverted by [`rgbw_to_rgb`].
///
/// # Examples
///
/// ```
/// use rubetek_light::color::rgb_to_rgbw;
///
/// assert_eq!(rgb_to_rgbw(0, 0, 0), (0, 0, 0, 0));
/// assert_eq!(rgb_to_rgbw(255, 0, 0), (255, 0, 0, 0));
/// assert_eq!(rgb_to_rgbw(200, 100, 50), (150, 50, 0, 50));
/// ```
#[must_use]
pub fn rgb_to_rgbw(red: u8, green: u8, blue: u8) -> (u8, u8, u8, u8) {
    let top = i32::from(red.max(green).max(blue));
    if top == 0 {
        return (0, 0, 0, 0);
    }
    let bottom = i32::from(red.min(green).min(blue));

    // Scaled channels are `c * 255 / top`; keep their numerators over `top`.
    let scaled_max = top * 255;
    let scaled_min = bottom * 255;

    // Whiteness on the scaled reference is `M + m - 255`; dividing by the
    // scale factor `255 / top` leaves this numerator over 255.
    let luminance = scaled_max + scaled_min - 255 * top;

    let white = luminance.div_euclid(255);
    let channel = |c: u8| (i32::from(c) * 255 - luminance).div_euclid(255);

    (
        clamp_channel(channel(red)),
        clamp_channel(channel(green)),
        clamp_channel(channel(blue)),
        clamp_channel(white),
    )
}

/// Recombines RGBW channels into RGB by adding white to every channel.
///
/// The sums are returned unclamped (up to 510); use
/// [`RgbwColor::to_rgb`](crate::types::RgbwColor::to_rgb) for a saturating
/// conversion.
///
/// # Examples
///
/// ```
/// use rubetek_light::color::rgbw_to_rgb;
///
/// assert_eq!(rgbw_to_rgb(0, 0, 0, 128), (128, 128, 128));
/// assert_eq!(rgbw_to_rgb(255, 0, 0, 255), (510, 255, 255));
/// ```
#[must_use]
pub fn rgbw_to_rgb(red: u8, green: u8, blue: u8, white: u8) -> (u16, u16, u16) {
    let white = u16::from(white);
    (
        u16::from(red) + white,
        u16::from(green) + white,
        u16::from(blue) + white,
    )
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn clamp_channel(value: i32) -> u8 {
    value.clamp(0, 255) as u8
}
