// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! State change representation.
//!
//! A characteristic write from the host becomes one [`StateChange`] applied
//! to the cached [`DeviceState`](super::DeviceState). Changes touch a single
//! field; a full refresh from the cloud replaces the state instead.
//!
//! # Examples
//!
//! ```
//! use rubetek_light::capabilities::Characteristic;
//! use rubetek_light::state::StateChange;
//! use rubetek_light::types::Brightness;
//!
//! let change = StateChange::from_write(Characteristic::Brightness, 40.0.into()).unwrap();
//! assert_eq!(change, StateChange::Brightness(Brightness::clamped(40)));
//! ```

use crate::capabilities::{Characteristic, CharacteristicValue};
use crate::error::ValueError;
use crate::types::Brightness;

/// A change of a single lamp parameter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StateChange {
    /// Lamp switched on or off.
    Power(bool),

    /// Hue changed, in degrees.
    Hue(f64),

    /// Saturation changed, in percent.
    Saturation(f64),

    /// Brightness changed.
    Brightness(Brightness),
}

impl StateChange {
    /// Interprets a host write of `value` to `characteristic`.
    ///
    /// Numbers are not range checked here; applying the change clamps them.
    ///
    /// # Errors
    ///
    /// Returns `ValueError::TypeMismatch` if the value has the wrong type and
    /// `ValueError::NotFinite` for NaN or infinite numbers.
    pub fn from_write(
        characteristic: Characteristic,
        value: CharacteristicValue,
    ) -> Result<Self, ValueError> {
        Ok(match characteristic {
            Characteristic::On => Self::Power(value.as_bool(characteristic)?),
            Characteristic::Hue => Self::Hue(value.as_number(characteristic)?),
            Characteristic::Saturation => Self::Saturation(value.as_number(characteristic)?),
            Characteristic::Brightness => {
                Self::Brightness(Brightness::from_percent(value.as_number(characteristic)?))
            }
        })
    }
}
