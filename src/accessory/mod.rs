// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The lightbulb accessory and its configuration.
//!
//! [`LightAccessory`] ties the state cache, the color conversions and the
//! write coalescer to a [`DeviceApi`](crate::protocol::DeviceApi) and exposes
//! the result through
//! [`CharacteristicHandler`](crate::capabilities::CharacteristicHandler).

mod config;
mod light;

pub use config::{AccessoryConfig, LightVariant};
pub use light::{AccessoryInformation, LightAccessory};
