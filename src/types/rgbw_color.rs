// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! RGBW channel intensities with HSL conversion.
//!
//! RGBW bulbs carry a dedicated white LED. Reads merge white back into the
//! color channels and go through HSL; writes encode HSL at half lightness
//! and split the gray component off into the white channel.

use std::fmt;

use crate::color::{hsl_to_rgb, rgb_to_hsl, rgb_to_rgbw, rgbw_to_rgb};

use super::{HueSaturation, RgbColor};

/// RGBW color with 8-bit channels (0-255).
///
/// # Examples
///
/// ```
/// use rubetek_light::types::{RgbColor, RgbwColor};
///
/// let rgbw = RgbwColor::from_rgb(RgbColor::new(200, 100, 50));
/// assert_eq!(rgbw, RgbwColor::new(150, 50, 0, 50));
/// assert_eq!(rgbw.to_rgb(), RgbColor::new(200, 100, 50));
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct RgbwColor {
    red: u8,
    green: u8,
    blue: u8,
    white: u8,
}

impl RgbwColor {
    /// HSL lightness used when encoding hue and saturation for the device.
    pub const WRITE_LIGHTNESS: f32 = 0.5;

    /// Creates a new RGBW color.
    #[must_use]
    pub const fn new(red: u8, green: u8, blue: u8, white: u8) -> Self {
        Self {
            red,
            green,
            blue,
            white,
        }
    }

    /// Returns the red component.
    #[must_use]
    pub const fn red(&self) -> u8 {
        self.red
    }

    /// Returns the green component.
    #[must_use]
    pub const fn green(&self) -> u8 {
        self.green
    }

    /// Returns the blue component.
    #[must_use]
    pub const fn blue(&self) -> u8 {
        self.blue
    }

    /// Returns the white component.
    #[must_use]
    pub const fn white(&self) -> u8 {
        self.white
    }

    /// Splits an RGB color into color and white channels.
    #[must_use]
    pub fn from_rgb(rgb: RgbColor) -> Self {
        let (red, green, blue, white) = rgb_to_rgbw(rgb.red(), rgb.green(), rgb.blue());
        Self::new(red, green, blue, white)
    }

    /// Merges white back into the color channels, saturating at 255.
    ///
    /// See [`rgbw_to_rgb`](crate::color::rgbw_to_rgb) for the unclamped sum.
    #[must_use]
    pub fn to_rgb(&self) -> RgbColor {
        let (r, g, b) = rgbw_to_rgb(self.red, self.green, self.blue, self.white);
        RgbColor::new(saturate(r), saturate(g), saturate(b))
    }

    /// Extracts hue and saturation through HSL.
    #[must_use]
    pub fn to_hue_saturation(&self) -> HueSaturation {
        let rgb = self.to_rgb();
        let (hue, saturation, _) = rgb_to_hsl(rgb.red(), rgb.green(), rgb.blue());
        HueSaturation::new(
            f64::from(hue),
            f64::from(saturation) * HueSaturation::MAX_SATURATION,
        )
    }

    /// Encodes hue and saturation at [`Self::WRITE_LIGHTNESS`] and splits off
    /// the white channel.
    #[allow(clippy::cast_possible_truncation)]
    #[must_use]
    pub fn from_hue_saturation(color: &HueSaturation) -> Self {
        let (red, green, blue) = hsl_to_rgb(
            color.hue() as f32,
            (color.saturation() / HueSaturation::MAX_SATURATION) as f32,
            Self::WRITE_LIGHTNESS,
        );
        Self::from_rgb(RgbColor::new(red, green, blue))
    }
}

impl fmt::Display for RgbwColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "RGBW({}, {}, {}, {})",
            self.red, self.green, self.blue, self.white
        )
    }
}

fn saturate(channel: u16) -> u8 {
    u8::try_from(channel).unwrap_or(u8::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gray_reads_as_unsaturated() {
        let hs = RgbwColor::new(128, 128, 128, 0).to_hue_saturation();
        assert_eq!(hs.saturation(), 0.0);
        assert_eq!(hs.hue(), 0.0);
    }

    #[test]
    fn white_only_reads_as_unsaturated() {
        let hs = RgbwColor::new(0, 0, 0, 200).to_hue_saturation();
        assert_eq!(hs.saturation(), 0.0);
    }

    #[test]
    fn to_rgb_saturates() {
        let rgb = RgbwColor::new(255, 100, 0, 200).to_rgb();
        assert_eq!(rgb, RgbColor::new(255, 255, 200));
    }

    #[test]
    fn saturated_hue_has_no_white() {
        let rgbw = RgbwColor::from_hue_saturation(&HueSaturation::new(0.0, 100.0));
        assert_eq!(rgbw, RgbwColor::new(255, 0, 0, 0));

        let rgbw = RgbwColor::from_hue_saturation(&HueSaturation::new(240.0, 100.0));
        assert_eq!(rgbw, RgbwColor::new(0, 0, 255, 0));
    }

    #[test]
    fn unsaturated_goes_to_white() {
        let rgbw = RgbwColor::from_hue_saturation(&HueSaturation::new(90.0, 0.0));
        assert_eq!(rgbw.red(), 0);
        assert_eq!(rgbw.green(), 0);
        assert_eq!(rgbw.blue(), 0);
        assert!(rgbw.white() > 0);
    }

    #[test]
    fn encoded_hue_reads_back() {
        let original = HueSaturation::new(120.0, 100.0);
        let decoded = RgbwColor::from_hue_saturation(&original).to_hue_saturation();
        assert!((decoded.hue() - 120.0).abs() < 1.0);
        assert!((decoded.saturation() - 100.0).abs() < 1.0);
    }

    #[test]
    fn display_format() {
        assert_eq!(RgbwColor::new(1, 2, 3, 4).to_string(), "RGBW(1, 2, 3, 4)");
    }
}
