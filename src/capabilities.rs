// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Characteristics exposed to the accessory host.
//!
//! A lightbulb service exposes four characteristics, each readable and
//! writable by the host. The host framework itself is out of scope; it only
//! needs something implementing [`CharacteristicHandler`].
//!
//! | Characteristic | Value              | Range   |
//! |----------------|--------------------|---------|
//! | On             | `Bool`             | -       |
//! | Hue            | `Number` (degrees) | 0-360   |
//! | Saturation     | `Number` (percent) | 0-100   |
//! | Brightness     | `Number` (percent) | 0-100   |

use std::fmt;
use std::future::Future;

use crate::error::{Result, ValueError};

/// A controllable parameter of the lightbulb service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Characteristic {
    /// Power on/off.
    On,
    /// Color hue in degrees.
    Hue,
    /// Color saturation in percent.
    Saturation,
    /// Brightness in percent.
    Brightness,
}

impl Characteristic {
    /// Returns the characteristic name as the host displays it.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::On => "On",
            Self::Hue => "Hue",
            Self::Saturation => "Saturation",
            Self::Brightness => "Brightness",
        }
    }
}

impl fmt::Display for Characteristic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Value read from or written to a characteristic.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CharacteristicValue {
    /// Boolean value (On).
    Bool(bool),
    /// Numeric value (Hue, Saturation, Brightness).
    Number(f64),
}

impl CharacteristicValue {
    /// Interprets the value as a boolean for `characteristic`.
    ///
    /// # Errors
    ///
    /// Returns `ValueError::TypeMismatch` for numeric values.
    pub fn as_bool(&self, characteristic: Characteristic) -> std::result::Result<bool, ValueError> {
        match self {
            Self::Bool(b) => Ok(*b),
            Self::Number(_) => Err(ValueError::TypeMismatch {
                characteristic,
                expected: "boolean",
            }),
        }
    }

    /// Interprets the value as a finite number for `characteristic`.
    ///
    /// # Errors
    ///
    /// Returns `ValueError::TypeMismatch` for booleans and
    /// `ValueError::NotFinite` for NaN or infinite numbers.
    pub fn as_number(&self, characteristic: Characteristic) -> std::result::Result<f64, ValueError> {
        match self {
            Self::Number(n) if n.is_finite() => Ok(*n),
            Self::Number(_) => Err(ValueError::NotFinite { characteristic }),
            Self::Bool(_) => Err(ValueError::TypeMismatch {
                characteristic,
                expected: "numeric",
            }),
        }
    }
}

impl From<bool> for CharacteristicValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<f64> for CharacteristicValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<u8> for CharacteristicValue {
    fn from(value: u8) -> Self {
        Self::Number(f64::from(value))
    }
}

/// Read/write access to characteristics, as called by the host.
///
/// Both operations may suspend on network I/O.
pub trait CharacteristicHandler {
    /// Returns the current value of `characteristic`.
    ///
    /// # Errors
    ///
    /// Returns error if the state had to be refreshed and the refresh failed.
    fn read(
        &self,
        characteristic: Characteristic,
    ) -> impl Future<Output = Result<CharacteristicValue>> + Send;

    /// Sets `characteristic` to `value`.
    ///
    /// # Errors
    ///
    /// Returns error if the value is unusable or the device write failed.
    fn write(
        &self,
        characteristic: Characteristic,
        value: CharacteristicValue,
    ) -> impl Future<Output = Result<()>> + Send;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_and_display() {
        assert_eq!(Characteristic::On.to_string(), "On");
        assert_eq!(Characteristic::Saturation.name(), "Saturation");
    }

    #[test]
    fn bool_value() {
        assert_eq!(
            CharacteristicValue::from(true).as_bool(Characteristic::On),
            Ok(true)
        );
        assert!(matches!(
            CharacteristicValue::Number(1.0).as_bool(Characteristic::On),
            Err(ValueError::TypeMismatch { .. })
        ));
    }

    #[test]
    fn number_value() {
        assert_eq!(
            CharacteristicValue::from(42u8).as_number(Characteristic::Brightness),
            Ok(42.0)
        );
        assert!(matches!(
            CharacteristicValue::Bool(true).as_number(Characteristic::Hue),
            Err(ValueError::TypeMismatch { .. })
        ));
        assert_eq!(
            CharacteristicValue::Number(f64::INFINITY).as_number(Characteristic::Hue),
            Err(ValueError::NotFinite {
                characteristic: Characteristic::Hue
            })
        );
    }
}
