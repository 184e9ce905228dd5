// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Lamp state tracking.

use crate::types::{Brightness, HueSaturation};

use super::StateChange;

/// Last known state of the lamp, in light model units.
///
/// Hue is stored in degrees, saturation and brightness in percent. Every
/// setter goes through a clamping type, so the fields are always in range.
///
/// # Examples
///
/// ```
/// use rubetek_light::state::{DeviceState, StateChange};
///
/// let mut state = DeviceState::new();
/// state.apply(&StateChange::Power(true));
/// assert!(state.is_on());
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DeviceState {
    on: bool,
    color: HueSaturation,
    brightness: Brightness,
}

impl DeviceState {
    /// Creates a state with the lamp off, unsaturated and at zero brightness.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a state from all of its fields.
    #[must_use]
    pub const fn from_parts(on: bool, color: HueSaturation, brightness: Brightness) -> Self {
        Self {
            on,
            color,
            brightness,
        }
    }

    // ========== Power ==========

    /// Returns whether the lamp is on.
    #[must_use]
    pub const fn is_on(&self) -> bool {
        self.on
    }

    /// Sets the power state.
    pub fn set_on(&mut self, on: bool) {
        self.on = on;
    }

    // ========== Color ==========

    /// Returns hue and saturation.
    #[must_use]
    pub const fn color(&self) -> HueSaturation {
        self.color
    }

    /// Returns the hue in degrees.
    #[must_use]
    pub const fn hue(&self) -> f64 {
        self.color.hue()
    }

    /// Returns the saturation in percent.
    #[must_use]
    pub const fn saturation(&self) -> f64 {
        self.color.saturation()
    }

    /// Sets hue and saturation.
    pub fn set_color(&mut self, color: HueSaturation) {
        self.color = color;
    }

    // ========== Brightness ==========

    /// Returns the brightness.
    #[must_use]
    pub const fn brightness(&self) -> Brightness {
        self.brightness
    }

    /// Sets the brightness.
    pub fn set_brightness(&mut self, brightness: Brightness) {
        self.brightness = brightness;
    }

    // ========== State Changes ==========

    /// Applies a single-parameter change, clamping numeric values.
    pub fn apply(&mut self, change: &StateChange) {
        match *change {
            StateChange::Power(on) => self.on = on,
            StateChange::Hue(hue) => self.color = self.color.with_hue(hue),
            StateChange::Saturation(saturation) => {
                self.color = self.color.with_saturation(saturation);
            }
            StateChange::Brightness(brightness) => self.brightness = brightness,
        }
    }
}
