// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Hue and saturation as seen by the light model.

use std::fmt;

/// Hue (degrees) and saturation (percent) of the lamp color.
///
/// This is the unit convention used everywhere inside the crate: hue in
/// `[0, 360]` and saturation in `[0, 100]`. Construction clamps, so a value
/// of this type is always in range.
///
/// # Examples
///
/// ```
/// use rubetek_light::types::HueSaturation;
///
/// let color = HueSaturation::new(120.0, 100.0);
/// assert_eq!(color.hue(), 120.0);
///
/// let clamped = HueSaturation::new(400.0, -10.0);
/// assert_eq!(clamped.hue(), 360.0);
/// assert_eq!(clamped.saturation(), 0.0);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct HueSaturation {
    hue: f64,
    saturation: f64,
}

impl HueSaturation {
    /// Maximum hue value in degrees.
    pub const MAX_HUE: f64 = 360.0;

    /// Maximum saturation value in percent.
    pub const MAX_SATURATION: f64 = 100.0;

    /// Creates a new hue/saturation pair, clamping both values.
    ///
    /// NaN is treated as zero.
    #[must_use]
    pub fn new(hue: f64, saturation: f64) -> Self {
        Self {
            hue: clamp(hue, Self::MAX_HUE),
            saturation: clamp(saturation, Self::MAX_SATURATION),
        }
    }

    /// Creates a pair from normalized HSV components in `[0, 1]`.
    #[must_use]
    pub fn from_fractions(hue: f64, saturation: f64) -> Self {
        Self::new(hue * Self::MAX_HUE, saturation * Self::MAX_SATURATION)
    }

    /// Returns the hue in degrees (0-360).
    #[must_use]
    pub const fn hue(&self) -> f64 {
        self.hue
    }

    /// Returns the saturation in percent (0-100).
    #[must_use]
    pub const fn saturation(&self) -> f64 {
        self.saturation
    }

    /// Returns hue and saturation normalized to `[0, 1]`.
    #[must_use]
    pub fn to_fractions(&self) -> (f64, f64) {
        (
            self.hue / Self::MAX_HUE,
            self.saturation / Self::MAX_SATURATION,
        )
    }

    /// Returns a copy with a different hue.
    #[must_use]
    pub fn with_hue(&self, hue: f64) -> Self {
        Self::new(hue, self.saturation)
    }

    /// Returns a copy with a different saturation.
    #[must_use]
    pub fn with_saturation(&self, saturation: f64) -> Self {
        Self::new(self.hue, saturation)
    }
}

impl fmt::Display for HueSaturation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "HS({:.1}, {:.1}%)", self.hue, self.saturation)
    }
}

fn clamp(value: f64, max: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn values_in_range_are_kept() {
        let color = HueSaturation::new(180.5, 42.0);
        assert!((color.hue() - 180.5).abs() < f64::EPSILON);
        assert!((color.saturation() - 42.0).abs() < f64::EPSILON);
    }

    #[test]
    fn values_out_of_range_are_clamped() {
        let color = HueSaturation::new(-1.0, 150.0);
        assert!(color.hue().abs() < f64::EPSILON);
        assert!((color.saturation() - 100.0).abs() < f64::EPSILON);
    }

    #[test]
    fn nan_becomes_zero() {
        let color = HueSaturation::new(f64::NAN, f64::NAN);
        assert_eq!(color, HueSaturation::default());
    }

    #[test]
    fn fractions_round_trip() {
        let color = HueSaturation::from_fractions(0.5, 0.25);
        assert!((color.hue() - 180.0).abs() < f64::EPSILON);
        assert!((color.saturation() - 25.0).abs() < f64::EPSILON);

        let (h, s) = color.to_fractions();
        assert!((h - 0.5).abs() < f64::EPSILON);
        assert!((s - 0.25).abs() < f64::EPSILON);
    }

    #[test]
    fn with_methods_replace_one_field() {
        let color = HueSaturation::new(10.0, 20.0).with_hue(30.0);
        assert_eq!(color, HueSaturation::new(30.0, 20.0));

        let color = color.with_saturation(90.0);
        assert_eq!(color, HueSaturation::new(30.0, 90.0));
    }

    #[test]
    fn display_format() {
        assert_eq!(HueSaturation::new(120.0, 50.0).to_string(), "HS(120.0, 50.0%)");
    }
}
