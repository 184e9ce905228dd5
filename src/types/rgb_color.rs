// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! RGB channel intensities with HSV conversion.
//!
//! RGB-only bulbs receive their color as three raw channels. The light
//! model's hue and saturation are mapped onto them through HSV with a fixed
//! value of one half; brightness is a separate device parameter.

use std::fmt;

use crate::color::{hsv_to_rgb, rgb_to_hsv};

use super::HueSaturation;

/// RGB color with 8-bit channels (0-255).
///
/// # Examples
///
/// ```
/// use rubetek_light::types::{HueSaturation, RgbColor};
///
/// let red = RgbColor::new(255, 0, 0);
/// let hs = red.to_hue_saturation();
/// assert_eq!(hs.hue(), 0.0);
/// assert_eq!(hs.saturation(), 100.0);
///
/// // Writes use half value, floored
/// let rgb = RgbColor::from_hue_saturation(&HueSaturation::new(0.0, 100.0));
/// assert_eq!(rgb, RgbColor::new(127, 0, 0));
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct RgbColor {
    red: u8,
    green: u8,
    blue: u8,
}

impl RgbColor {
    /// HSV value used when encoding hue and saturation for the device.
    pub const WRITE_VALUE: f64 = 0.5;

    /// Creates a new RGB color.
    #[must_use]
    pub const fn new(red: u8, green: u8, blue: u8) -> Self {
        Self { red, green, blue }
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

    /// Extracts hue and saturation through HSV.
    ///
    /// Achromatic colors (including black) give hue 0 and saturation 0.
    #[must_use]
    pub fn to_hue_saturation(&self) -> HueSaturation {
        let (hue, saturation) = rgb_to_hsv(
            f64::from(self.red),
            f64::from(self.green),
            f64::from(self.blue),
        );
        HueSaturation::from_fractions(hue, saturation)
    }

    /// Encodes hue and saturation at [`Self::WRITE_VALUE`], flooring each
    /// channel.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    #[must_use]
    pub fn from_hue_saturation(color: &HueSaturation) -> Self {
        let (hue, saturation) = color.to_fractions();
        let (r, g, b) = hsv_to_rgb(hue, saturation, Self::WRITE_VALUE);
        // hsv_to_rgb stays within 0-255, so the casts cannot wrap
        Self::new(r.floor() as u8, g.floor() as u8, b.floor() as u8)
    }
}

impl fmt::Display for RgbColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.red, self.green, self.blue)
    }
}

impl From<(u8, u8, u8)> for RgbColor {
    fn from((red, green, blue): (u8, u8, u8)) -> Self {
        Self::new(red, green, blue)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pure_red_has_hue_zero() {
        let hs = RgbColor::new(255, 0, 0).to_hue_saturation();
        assert!(hs.hue().abs() < f64::EPSILON);
        assert!((hs.saturation() - 100.0).abs() < f64::EPSILON);
    }

    #[test]
    fn green_and_blue_hues() {
        let hs = RgbColor::new(0, 255, 0).to_hue_saturation();
        assert!((hs.hue() - 120.0).abs() < 1e-9);

        let hs = RgbColor::new(0, 0, 255).to_hue_saturation();
        assert!((hs.hue() - 240.0).abs() < 1e-9);
    }

    #[test]
    fn black_and_gray_are_unsaturated() {
        assert_eq!(RgbColor::new(0, 0, 0).to_hue_saturation(), HueSaturation::default());
        assert_eq!(
            RgbColor::new(128, 128, 128).to_hue_saturation(),
            HueSaturation::default()
        );
    }

    #[test]
    fn encoding_floors_half_value() {
        let rgb = RgbColor::from_hue_saturation(&HueSaturation::new(120.0, 100.0));
        assert_eq!(rgb, RgbColor::new(0, 127, 0));

        let rgb = RgbColor::from_hue_saturation(&HueSaturation::new(0.0, 0.0));
        assert_eq!(rgb, RgbColor::new(127, 127, 127));
    }

    #[test]
    fn encoded_color_decodes_close_to_original() {
        let original = HueSaturation::new(200.0, 60.0);
        let decoded = RgbColor::from_hue_saturation(&original).to_hue_saturation();
        // Flooring to integers costs a little precision
        assert!((decoded.hue() - 200.0).abs() < 2.0);
        assert!((decoded.saturation() - 60.0).abs() < 2.0);
    }

    #[test]
    fn display_is_hex() {
        assert_eq!(RgbColor::new(255, 128, 0).to_string(), "#FF8000");
    }

    #[test]
    fn from_tuple() {
        let color: RgbColor = (1, 2, 3).into();
        assert_eq!(color, RgbColor::new(1, 2, 3));
    }
}
