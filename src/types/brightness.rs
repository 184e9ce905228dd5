// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Brightness type for the lamp's dimming parameter.
//!
//! Brightness is a device parameter of its own; it is never folded into the
//! RGB channels.

use std::fmt;

/// Brightness level as a percentage (0-100).
///
/// # Examples
///
/// ```
/// use rubetek_light::types::Brightness;
///
/// let level = Brightness::clamped(75);
/// assert_eq!(level.value(), 75);
///
/// assert_eq!(Brightness::clamped(180).value(), 100);
/// assert_eq!(Brightness::from_percent(42.6).value(), 43);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Brightness(u8);

impl Brightness {
    /// Minimum brightness (0%).
    pub const MIN: Self = Self(0);

    /// Maximum brightness (100%).
    pub const MAX: Self = Self(100);

    /// Creates a brightness value, clamping to the valid range.
    #[must_use]
    pub const fn clamped(value: u8) -> Self {
        if value > 100 { Self(100) } else { Self(value) }
    }

    /// Creates a brightness from a host-provided percentage.
    ///
    /// The value is rounded and clamped to 0-100; NaN maps to 0.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    #[must_use]
    pub fn from_percent(percent: f64) -> Self {
        if percent.is_nan() {
            return Self::MIN;
        }
        Self(percent.round().clamp(0.0, 100.0) as u8)
    }

    /// Returns the brightness percentage.
    #[must_use]
    pub const fn value(&self) -> u8 {
        self.0
    }
}

impl fmt::Display for Brightness {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn brightness_valid_values() {
        for v in 0..=100 {
            assert_eq!(Brightness::clamped(v).value(), v);
        }
    }

    #[test]
    fn brightness_clamped() {
        assert_eq!(Brightness::clamped(50).value(), 50);
        assert_eq!(Brightness::clamped(255).value(), 100);
    }

    #[test]
    fn brightness_from_percent() {
        assert_eq!(Brightness::from_percent(42.4).value(), 42);
        assert_eq!(Brightness::from_percent(42.6).value(), 43);
        assert_eq!(Brightness::from_percent(-5.0).value(), 0);
        assert_eq!(Brightness::from_percent(250.0).value(), 100);
        assert_eq!(Brightness::from_percent(f64::NAN).value(), 0);
    }

    #[test]
    fn brightness_display() {
        assert_eq!(Brightness::clamped(80).to_string(), "80%");
    }
}
